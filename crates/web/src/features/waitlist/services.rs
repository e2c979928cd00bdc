use sqlx::PgPool;
use storage::{
    dto::waitlist::{ConversionResponse, CreateWaitlistApplicationRequest},
    error::Result,
    models::{MemberType, PaymentStatus, WaitlistApplication},
    repository::{conversion::ConversionRepository, waitlist::WaitlistRepository},
    services::{conversion, waitlist},
};
use uuid::Uuid;

/// List a club's waitlist in queue order
pub async fn list_applications(pool: &PgPool, club_id: Uuid) -> Result<Vec<WaitlistApplication>> {
    let repo = WaitlistRepository::new(pool);
    waitlist::list_applications(&repo, club_id).await
}

/// Add an application to the back of a club's waitlist
pub async fn create_application(
    pool: &PgPool,
    club_id: Uuid,
    request: &CreateWaitlistApplicationRequest,
) -> Result<WaitlistApplication> {
    let repo = WaitlistRepository::new(pool);
    waitlist::create_application(&repo, club_id, request).await
}

/// Reorder a club's waitlist
pub async fn reorder(pool: &PgPool, club_id: Uuid, ordered_ids: &[Uuid]) -> Result<()> {
    let repo = WaitlistRepository::new(pool);
    waitlist::reorder(&repo, club_id, ordered_ids).await
}

/// Remove an application
pub async fn remove(pool: &PgPool, application_id: Uuid) -> Result<()> {
    let repo = WaitlistRepository::new(pool);
    waitlist::remove(&repo, application_id).await
}

/// Reject a pending application
pub async fn reject(pool: &PgPool, application_id: Uuid) -> Result<WaitlistApplication> {
    let repo = WaitlistRepository::new(pool);
    waitlist::reject_application(&repo, application_id).await
}

/// Record the payment state of an application
pub async fn update_payment_status(
    pool: &PgPool,
    application_id: Uuid,
    payment_status: PaymentStatus,
) -> Result<WaitlistApplication> {
    let repo = WaitlistRepository::new(pool);
    waitlist::update_payment_status(&repo, application_id, payment_status).await
}

/// Convert an application into a club member
pub async fn convert(
    pool: &PgPool,
    application_id: Uuid,
    member_type: MemberType,
) -> Result<ConversionResponse> {
    let repo = ConversionRepository::new(pool);
    conversion::convert_to_member(&repo, application_id, member_type).await
}
