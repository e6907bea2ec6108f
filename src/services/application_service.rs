// src/services/application_service.rs

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ApplicationRepository, CompanyRepository, UserRepository},
    models::application::{ApplicationStatus, CompanyApplication},
    models::company::Company,
};

/// The review state machine: `pending` may become `approved` or `rejected`,
/// both terminal. Repeating the transition an application already took is
/// allowed (a retry after a reported failure must be able to converge);
/// crossing from one terminal state to the other is not.
fn ensure_can_become(
    current: ApplicationStatus,
    target: ApplicationStatus,
) -> Result<(), AppError> {
    if current == ApplicationStatus::Pending || current == target {
        Ok(())
    } else {
        Err(AppError::ApplicationAlreadyReviewed)
    }
}

#[derive(Clone)]
pub struct ApplicationService {
    application_repo: ApplicationRepository,
    company_repo: CompanyRepository,
    user_repo: UserRepository,
    pool: PgPool,
}

impl ApplicationService {
    pub fn new(
        application_repo: ApplicationRepository,
        company_repo: CompanyRepository,
        user_repo: UserRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            application_repo,
            company_repo,
            user_repo,
            pool,
        }
    }

    pub async fn list(
        &self,
        status: Option<ApplicationStatus>,
    ) -> Result<Vec<CompanyApplication>, AppError> {
        self.application_repo.list_by_status(status).await
    }

    pub async fn get(&self, id: Uuid) -> Result<CompanyApplication, AppError> {
        self.application_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::ApplicationNotFound)
    }

    /// Approves a company application.
    ///
    /// Company, user and application are written in one transaction, in this
    /// fixed order: company first, then the user, then the application. All
    /// three writes are set-to (never increment), and the company insert is
    /// an upsert keyed by the application id, so re-running an approval
    /// converges on the same final state.
    pub async fn approve_application(
        &self,
        application_id: Uuid,
        admin_id: Uuid,
    ) -> Result<CompanyApplication, AppError> {
        let mut tx = self.pool.begin().await?;

        // The FOR UPDATE lock serializes two admins reviewing the same
        // application at the same time.
        let application = self
            .application_repo
            .find_by_id_for_update(&mut *tx, application_id)
            .await?
            .ok_or(AppError::ApplicationNotFound)?;

        ensure_can_become(application.status, ApplicationStatus::Approved)?;

        let now = Utc::now();

        // 1. Create the company from the application's profile
        let company = Company::from_application(&application, admin_id, now);
        self.company_repo.upsert(&mut *tx, &company).await?;

        // 2. Promote the applicant's user account
        self.user_repo
            .apply_approval(&mut *tx, application.user_id, application.id)
            .await?;

        // 3. Stamp the application itself
        let reviewed = self
            .application_repo
            .mark_approved(&mut *tx, application.id, admin_id, now)
            .await?;

        tx.commit().await?;

        tracing::info!(
            "✅ Application '{}' approved by admin {}",
            reviewed.company_name,
            admin_id
        );

        // Approval e-mail to the applicant goes out from here once the
        // notification channel exists.
        // send_approval_email(&reviewed.contact_email, &reviewed.company_name);

        Ok(reviewed)
    }

    /// Rejects a company application. `reason` must be non-empty; the user is
    /// downgraded and no company record is created.
    pub async fn reject_application(
        &self,
        application_id: Uuid,
        admin_id: Uuid,
        reason: &str,
    ) -> Result<CompanyApplication, AppError> {
        if reason.trim().is_empty() {
            return Err(AppError::RejectionReasonRequired);
        }

        let mut tx = self.pool.begin().await?;

        let application = self
            .application_repo
            .find_by_id_for_update(&mut *tx, application_id)
            .await?
            .ok_or(AppError::ApplicationNotFound)?;

        ensure_can_become(application.status, ApplicationStatus::Rejected)?;

        let now = Utc::now();

        // 1. Stamp the application with the outcome and the reason
        let reviewed = self
            .application_repo
            .mark_rejected(&mut *tx, application.id, admin_id, reason, now)
            .await?;

        // 2. Downgrade the applicant's user account
        self.user_repo
            .apply_rejection(&mut *tx, application.user_id)
            .await?;

        tx.commit().await?;

        tracing::info!(
            "❌ Application '{}' rejected by admin {}",
            reviewed.company_name,
            admin_id
        );

        // send_rejection_email(&reviewed.contact_email, &reviewed.company_name, reason);

        Ok(reviewed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::application::{Address, CompanyType, ContactPerson};
    use sqlx::types::Json;

    fn pending_application() -> CompanyApplication {
        CompanyApplication {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            company_name: "The Grand Hotel".to_string(),
            org_number: "987654321".to_string(),
            company_type: CompanyType::Horeca,
            contact_email: "purchasing@grandhotel.no".to_string(),
            contact_phone: "+47 123 45 678".to_string(),
            contact_person: Json(ContactPerson {
                first_name: "Max".to_string(),
                last_name: "Robinson".to_string(),
            }),
            visiting_address: Json(Address {
                street: "Storgata 15".to_string(),
                zip: "0184".to_string(),
                city: "Oslo".to_string(),
                country: "Norway".to_string(),
            }),
            billing_address: Json(Address {
                street: "Billing Street 1".to_string(),
                zip: "0185".to_string(),
                city: "Oslo".to_string(),
                country: "Norway".to_string(),
            }),
            delivery_address: Json(Address {
                street: "Delivery Street 1".to_string(),
                zip: "0186".to_string(),
                city: "Oslo".to_string(),
                country: "Norway".to_string(),
            }),
            comments: Some("Please call before delivery".to_string()),
            status: ApplicationStatus::Pending,
            submitted_at: Utc::now(),
            reviewed_at: None,
            reviewed_by: None,
            rejection_reason: None,
        }
    }

    #[test]
    fn pending_may_go_either_way() {
        assert!(ensure_can_become(ApplicationStatus::Pending, ApplicationStatus::Approved).is_ok());
        assert!(ensure_can_become(ApplicationStatus::Pending, ApplicationStatus::Rejected).is_ok());
    }

    #[test]
    fn repeating_a_terminal_transition_is_allowed() {
        assert!(
            ensure_can_become(ApplicationStatus::Approved, ApplicationStatus::Approved).is_ok()
        );
        assert!(
            ensure_can_become(ApplicationStatus::Rejected, ApplicationStatus::Rejected).is_ok()
        );
    }

    #[test]
    fn terminal_states_cannot_cross_over() {
        assert!(matches!(
            ensure_can_become(ApplicationStatus::Approved, ApplicationStatus::Rejected),
            Err(AppError::ApplicationAlreadyReviewed)
        ));
        assert!(matches!(
            ensure_can_become(ApplicationStatus::Rejected, ApplicationStatus::Approved),
            Err(AppError::ApplicationAlreadyReviewed)
        ));
    }

    #[test]
    fn approval_copies_the_profile_and_raises_both_flags() {
        let application = pending_application();
        let admin_id = Uuid::new_v4();
        let now = Utc::now();

        let company = Company::from_application(&application, admin_id, now);

        assert_eq!(company.id, application.id);
        assert_eq!(company.user_id, application.user_id);
        assert_eq!(company.name, application.company_name);
        assert_eq!(company.org_number, application.org_number);
        assert!(company.active);
        assert!(company.approved);
        assert_eq!(company.registered_at, application.submitted_at);
        assert_eq!(company.approved_at, Some(now));
        assert_eq!(company.approved_by, Some(admin_id));
    }

    #[test]
    fn approval_synthesizes_the_default_shipping_address() {
        let application = pending_application();
        let company = Company::from_application(&application, Uuid::new_v4(), Utc::now());

        let shipping = &company.shipping_addresses.0;
        assert_eq!(shipping.len(), 1);
        assert_eq!(shipping[0].id, "default");
        assert_eq!(shipping[0].label, "Default Delivery Address");
        assert!(shipping[0].is_default);
        assert_eq!(shipping[0].street, application.delivery_address.0.street);
        assert_eq!(shipping[0].zip, application.delivery_address.0.zip);
        assert_eq!(shipping[0].city, application.delivery_address.0.city);
    }

    #[test]
    fn building_the_company_twice_gives_the_same_record() {
        // The approval writes are set-to: retrying with the same arguments
        // must produce an identical company row.
        let application = pending_application();
        let admin_id = Uuid::new_v4();
        let now = Utc::now();

        let first = Company::from_application(&application, admin_id, now);
        let second = Company::from_application(&application, admin_id, now);

        assert_eq!(first.name, second.name);
        assert_eq!(first.shipping_addresses.0, second.shipping_addresses.0);
        assert_eq!(first.approved_at, second.approved_at);
        assert_eq!(first.approved_by, second.approved_by);
    }
}
