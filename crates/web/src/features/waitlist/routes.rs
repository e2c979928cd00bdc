use axum::{
    Router,
    routing::{delete, get, post, put},
};

use super::handlers::{
    convert_application, create_application, list_applications, reject_application,
    remove_application, reorder_waitlist, update_payment_status,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/clubs/:club_id/waitlist",
            get(list_applications).post(create_application),
        )
        .route("/clubs/:club_id/waitlist/order", put(reorder_waitlist))
        .route("/waitlist/:application_id", delete(remove_application))
        .route("/waitlist/:application_id/convert", post(convert_application))
        .route("/waitlist/:application_id/reject", post(reject_application))
        .route("/waitlist/:application_id/payment", put(update_payment_status))
}
