// src/services/order_service.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{InventoryRepository, OrderRepository, ProductRepository},
    models::auth::{User, UserRole},
    models::order::{Order, OrderItem, OrderStatus},
    models::product::ProductStatus,
};

// One requested order line, before the catalog has been consulted.
#[derive(Debug, Clone)]
pub struct OrderLine {
    pub product_id: Uuid,
    pub quantity: i64,
}

fn compute_total(items: &[OrderItem]) -> Decimal {
    items
        .iter()
        .map(|item| Decimal::from(item.quantity) * item.unit_price)
        .sum()
}

#[derive(Clone)]
pub struct OrderService {
    order_repo: OrderRepository,
    inventory_repo: InventoryRepository,
    product_repo: ProductRepository,
    pool: PgPool,
}

impl OrderService {
    pub fn new(
        order_repo: OrderRepository,
        inventory_repo: InventoryRepository,
        product_repo: ProductRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            order_repo,
            inventory_repo,
            product_repo,
            pool,
        }
    }

    /// Places an order for an active customer. Prices come from the catalog,
    /// never from the client; stock is deducted per line inside the same
    /// transaction, so an insufficient line rolls the whole order back.
    pub async fn place_order(&self, user: &User, lines: Vec<OrderLine>) -> Result<Order, AppError> {
        if !user.can_order() {
            return Err(AppError::AccountNotActive);
        }
        let company_id = user.company_id.ok_or(AppError::AccountNotActive)?;

        let mut tx = self.pool.begin().await?;

        let mut items = Vec::with_capacity(lines.len());
        for line in &lines {
            let product = self
                .product_repo
                .find_by_id(line.product_id)
                .await?
                .ok_or(AppError::ProductNotFound)?;

            if product.status != ProductStatus::Active {
                return Err(AppError::ProductNotAvailable(product.name));
            }

            // Orders consume loose base units.
            let consumed = self
                .inventory_repo
                .consume_fpakk(&mut *tx, product.id, line.quantity)
                .await?;
            if consumed.is_none() {
                return Err(AppError::InsufficientStock(product.name));
            }

            items.push(OrderItem {
                product_id: product.id,
                product_name: product.name,
                quantity: line.quantity,
                unit_price: product.base_price,
            });
        }

        let total = compute_total(&items);
        let order = self
            .order_repo
            .create(&mut *tx, company_id, user.id, &items, total, "NOK")
            .await?;

        tx.commit().await?;

        tracing::info!(
            "🧾 Order #{} placed by company {} ({} kr)",
            order.order_number,
            company_id,
            order.total
        );

        Ok(order)
    }

    pub async fn list_my_orders(&self, user: &User) -> Result<Vec<Order>, AppError> {
        let company_id = user.company_id.ok_or(AppError::AccountNotActive)?;
        self.order_repo.list_by_company(company_id).await
    }

    pub async fn list_orders(&self, status: Option<OrderStatus>) -> Result<Vec<Order>, AppError> {
        self.order_repo.list(status).await
    }

    /// Fetches one order, scoped: admins see everything, customers only
    /// their own company's orders.
    pub async fn get_order(&self, user: &User, order_id: Uuid) -> Result<Order, AppError> {
        let order = self
            .order_repo
            .find_by_id(order_id)
            .await?
            .ok_or(AppError::OrderNotFound)?;

        if user.role != UserRole::Admin && Some(order.company_id) != user.company_id {
            return Err(AppError::OrderNotFound);
        }
        Ok(order)
    }

    /// Moves an order along the fulfilment chain. Cancelling puts the
    /// deducted stock back.
    pub async fn update_status(
        &self,
        order_id: Uuid,
        next: OrderStatus,
    ) -> Result<Order, AppError> {
        let mut tx = self.pool.begin().await?;

        let order = self
            .order_repo
            .find_by_id_for_update(&mut *tx, order_id)
            .await?
            .ok_or(AppError::OrderNotFound)?;

        if !order.status.can_transition_to(next) {
            return Err(AppError::InvalidStatusTransition);
        }

        if next == OrderStatus::Cancelled {
            for item in order.items.0.iter() {
                self.inventory_repo
                    .restore_fpakk(&mut *tx, item.product_id, item.quantity)
                    .await?;
            }
        }

        let updated = self.order_repo.set_status(&mut *tx, order_id, next).await?;
        tx.commit().await?;

        Ok(updated)
    }

    /// Customer-side cancellation of their own not-yet-shipped order.
    pub async fn cancel_order(&self, user: &User, order_id: Uuid) -> Result<Order, AppError> {
        // Existence + ownership check runs with customer scoping
        self.get_order(user, order_id).await?;
        self.update_status(order_id, OrderStatus::Cancelled).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: i64, unit_price: Decimal) -> OrderItem {
        OrderItem {
            product_id: Uuid::new_v4(),
            product_name: "Pilsner".to_string(),
            quantity,
            unit_price,
        }
    }

    #[test]
    fn the_total_sums_quantity_times_unit_price() {
        let items = vec![
            item(12, Decimal::new(2995, 2)), // 359.40
            item(2, Decimal::new(10000, 2)), // 200.00
        ];
        assert_eq!(compute_total(&items), Decimal::new(55940, 2));
    }

    #[test]
    fn an_empty_order_totals_zero() {
        assert_eq!(compute_total(&[]), Decimal::ZERO);
    }

    #[test]
    fn orders_only_move_forward() {
        use OrderStatus::*;
        assert!(Pending.can_transition_to(Processing));
        assert!(Processing.can_transition_to(Shipped));
        assert!(Shipped.can_transition_to(Delivered));

        assert!(!Shipped.can_transition_to(Processing));
        assert!(!Delivered.can_transition_to(Pending));
        assert!(!Pending.can_transition_to(Delivered));
    }

    #[test]
    fn cancellation_stops_once_goods_have_shipped() {
        use OrderStatus::*;
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Processing.can_transition_to(Cancelled));
        assert!(!Shipped.can_transition_to(Cancelled));
        assert!(!Delivered.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Cancelled));
    }
}
