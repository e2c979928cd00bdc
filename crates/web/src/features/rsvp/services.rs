use sqlx::PgPool;
use storage::{
    dto::rsvp::{MemberRsvpResponse, RsvpSummary},
    error::Result,
    models::{EventRsvp, RsvpStatus},
    repository::event_registration::EventRegistrationRepository,
    services::rsvp,
};
use uuid::Uuid;

/// RSVPs of an event with their counts
pub async fn event_summary(pool: &PgPool, event_id: Uuid) -> Result<RsvpSummary> {
    let repo = EventRegistrationRepository::new(pool);
    rsvp::event_rsvp_summary(&repo, event_id).await
}

/// RSVP of a single member
pub async fn member_rsvp(
    pool: &PgPool,
    event_id: Uuid,
    member_id: Uuid,
) -> Result<MemberRsvpResponse> {
    let repo = EventRegistrationRepository::new(pool);
    rsvp::get_member_rsvp(&repo, event_id, member_id).await
}

/// Record a member's RSVP
pub async fn set_rsvp(
    pool: &PgPool,
    event_id: Uuid,
    member_id: Uuid,
    status: RsvpStatus,
) -> Result<EventRsvp> {
    let repo = EventRegistrationRepository::new(pool);
    rsvp::set_rsvp(&repo, event_id, member_id, status).await
}

/// Mark a registered member as having attended
pub async fn mark_attended(pool: &PgPool, event_id: Uuid, member_id: Uuid) -> Result<EventRsvp> {
    let repo = EventRegistrationRepository::new(pool);
    rsvp::mark_attended(&repo, event_id, member_id).await
}

/// Put a registered member on the event waitlist
pub async fn mark_waitlisted(pool: &PgPool, event_id: Uuid, member_id: Uuid) -> Result<EventRsvp> {
    let repo = EventRegistrationRepository::new(pool);
    rsvp::mark_waitlisted(&repo, event_id, member_id).await
}
