use axum::{
    Router,
    routing::{get, post},
};

use super::handlers::{
    get_event_rsvps, get_member_rsvp, mark_attended, mark_waitlisted, set_member_rsvp,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/events/:event_id/rsvps", get(get_event_rsvps))
        .route(
            "/events/:event_id/rsvps/:member_id",
            get(get_member_rsvp).put(set_member_rsvp),
        )
        .route(
            "/events/:event_id/rsvps/:member_id/attended",
            post(mark_attended),
        )
        .route(
            "/events/:event_id/rsvps/:member_id/waitlisted",
            post(mark_waitlisted),
        )
}
