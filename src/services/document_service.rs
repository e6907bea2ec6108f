// src/services/document_service.rs

use genpdf::{elements, style, Element};
use image::Luma;
use qrcode::QrCode;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CompanyRepository, OrderRepository},
};

#[derive(Clone)]
pub struct DocumentService {
    order_repo: OrderRepository,
    company_repo: CompanyRepository,
}

impl DocumentService {
    pub fn new(order_repo: OrderRepository, company_repo: CompanyRepository) -> Self {
        Self {
            order_repo,
            company_repo,
        }
    }

    /// Renders the order confirmation as a PDF in memory.
    pub async fn generate_order_pdf(&self, order_id: Uuid) -> Result<Vec<u8>, AppError> {
        // 1. Fetch the data
        let order = self
            .order_repo
            .find_by_id(order_id)
            .await?
            .ok_or(AppError::OrderNotFound)?;
        let company = self
            .company_repo
            .find_by_id(order.company_id)
            .await?
            .ok_or(AppError::CompanyNotFound)?;

        // 2. Set up the PDF
        // Loads the font family from the 'fonts/' directory
        let font_family = genpdf::fonts::from_files("./fonts", "Roboto", None)
            .map_err(|_| AppError::FontNotFound("Font not found in ./fonts".to_string()))?;

        let mut doc = genpdf::Document::new(font_family);
        doc.set_title(format!("Order #{}", order.order_number));
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(10);
        doc.set_page_decorator(decorator);

        // --- HEADER ---
        doc.push(
            elements::Paragraph::new("BON B2B PORTAL")
                .styled(style::Style::new().bold().with_font_size(18)),
        );
        doc.push(elements::Break::new(1.5));

        doc.push(
            elements::Paragraph::new(format!("ORDER CONFIRMATION #{}", order.order_number))
                .styled(style::Style::new().bold().with_font_size(14)),
        );
        doc.push(elements::Paragraph::new(format!(
            "Date: {}",
            order.created_at.format("%d.%m.%Y")
        )));
        doc.push(elements::Paragraph::new(format!(
            "Customer: {} (org. {})",
            company.name, company.org_number
        )));

        doc.push(elements::Break::new(2));

        // --- ITEM TABLE ---
        // Column weights: name (4), qty (1), unit price (2), line total (2)
        let mut table = elements::TableLayout::new(vec![4, 1, 2, 2]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

        let style_bold = style::Style::new().bold();
        table
            .row()
            .element(elements::Paragraph::new("Product").styled(style_bold))
            .element(elements::Paragraph::new("Qty").styled(style_bold))
            .element(elements::Paragraph::new("Unit").styled(style_bold))
            .element(elements::Paragraph::new("Total").styled(style_bold))
            .push()
            .expect("Table error");

        for item in order.items.0.iter() {
            let line_total = rust_decimal::Decimal::from(item.quantity) * item.unit_price;
            table
                .row()
                .element(elements::Paragraph::new(item.product_name.clone()))
                .element(elements::Paragraph::new(format!("{}", item.quantity)))
                .element(elements::Paragraph::new(format!("{:.2} kr", item.unit_price)))
                .element(elements::Paragraph::new(format!("{:.2} kr", line_total)))
                .push()
                .expect("Table row error");
        }

        doc.push(table);
        doc.push(elements::Break::new(2));

        // --- TOTAL ---
        let mut total_paragraph =
            elements::Paragraph::new(format!("TOTAL: {:.2} {}", order.total, order.currency));
        total_paragraph.set_alignment(genpdf::Alignment::Right);
        doc.push(total_paragraph.styled(style::Style::new().bold().with_font_size(12)));

        doc.push(elements::Break::new(2));

        // --- ORDER REFERENCE (QR CODE) ---
        // The warehouse scans this at picking time; it encodes the order
        // reference only, not a payment payload.
        let reference = format!("BON-ORDER-{}", order.order_number);
        let code = QrCode::new(reference.as_bytes())
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        let image_buffer = code.render::<Luma<u8>>().build();
        let dynamic_image = image::DynamicImage::ImageLuma8(image_buffer);

        let pdf_image = genpdf::elements::Image::from_dynamic_image(dynamic_image)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?
            .with_scale(genpdf::Scale::new(0.5, 0.5));

        doc.push(pdf_image);

        // --- FOOTER ---
        let delivery = &company.shipping_addresses.0;
        if let Some(default_address) = delivery.iter().find(|a| a.is_default) {
            doc.push(elements::Break::new(2));
            doc.push(
                elements::Paragraph::new(format!(
                    "Delivery: {}, {} {}",
                    default_address.street, default_address.zip, default_address.city
                ))
                .styled(style::Style::new().italic().with_font_size(8)),
            );
        }

        // 3. Render into an in-memory buffer
        let mut buffer = Vec::new();
        doc.render(&mut buffer)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        Ok(buffer)
    }
}
