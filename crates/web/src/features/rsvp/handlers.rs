use axum::{
    Json,
    extract::{Path, State},
};
use storage::{
    Database,
    dto::rsvp::{MemberRsvpResponse, RsvpSummary, SetRsvpRequest},
    models::EventRsvp,
};
use uuid::Uuid;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/events/{event_id}/rsvps",
    params(
        ("event_id" = Uuid, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "RSVPs for the event with counts per status", body = RsvpSummary)
    ),
    tag = "rsvps"
)]
pub async fn get_event_rsvps(
    State(db): State<Database>,
    Path(event_id): Path<Uuid>,
) -> Result<Json<RsvpSummary>, WebError> {
    let summary = services::event_summary(db.pool(), event_id).await?;

    Ok(Json(summary))
}

#[utoipa::path(
    get,
    path = "/api/events/{event_id}/rsvps/{member_id}",
    params(
        ("event_id" = Uuid, Path, description = "Event ID"),
        ("member_id" = Uuid, Path, description = "Member ID")
    ),
    responses(
        (status = 200, description = "Member's RSVP, not_responded when they never registered", body = MemberRsvpResponse)
    ),
    tag = "rsvps"
)]
pub async fn get_member_rsvp(
    State(db): State<Database>,
    Path((event_id, member_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<MemberRsvpResponse>, WebError> {
    let rsvp = services::member_rsvp(db.pool(), event_id, member_id).await?;

    Ok(Json(rsvp))
}

#[utoipa::path(
    put,
    path = "/api/events/{event_id}/rsvps/{member_id}",
    params(
        ("event_id" = Uuid, Path, description = "Event ID"),
        ("member_id" = Uuid, Path, description = "Member ID")
    ),
    request_body = SetRsvpRequest,
    responses(
        (status = 200, description = "RSVP recorded", body = EventRsvp)
    ),
    tag = "rsvps"
)]
pub async fn set_member_rsvp(
    State(db): State<Database>,
    Path((event_id, member_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<SetRsvpRequest>,
) -> Result<Json<EventRsvp>, WebError> {
    let rsvp = services::set_rsvp(db.pool(), event_id, member_id, req.status).await?;

    Ok(Json(rsvp))
}

#[utoipa::path(
    post,
    path = "/api/events/{event_id}/rsvps/{member_id}/attended",
    params(
        ("event_id" = Uuid, Path, description = "Event ID"),
        ("member_id" = Uuid, Path, description = "Member ID")
    ),
    responses(
        (status = 200, description = "Registration marked as attended", body = EventRsvp),
        (status = 404, description = "Member is not registered for the event")
    ),
    tag = "rsvps"
)]
pub async fn mark_attended(
    State(db): State<Database>,
    Path((event_id, member_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<EventRsvp>, WebError> {
    let rsvp = services::mark_attended(db.pool(), event_id, member_id).await?;

    Ok(Json(rsvp))
}

#[utoipa::path(
    post,
    path = "/api/events/{event_id}/rsvps/{member_id}/waitlisted",
    params(
        ("event_id" = Uuid, Path, description = "Event ID"),
        ("member_id" = Uuid, Path, description = "Member ID")
    ),
    responses(
        (status = 200, description = "Registration moved to the event waitlist", body = EventRsvp),
        (status = 404, description = "Member is not registered for the event")
    ),
    tag = "rsvps"
)]
pub async fn mark_waitlisted(
    State(db): State<Database>,
    Path((event_id, member_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<EventRsvp>, WebError> {
    let rsvp = services::mark_waitlisted(db.pool(), event_id, member_id).await?;

    Ok(Json(rsvp))
}
