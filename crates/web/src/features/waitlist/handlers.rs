use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::waitlist::{
        ConversionResponse, CreateWaitlistApplicationRequest, ReorderWaitlistRequest,
        UpdatePaymentStatusRequest,
    },
    models::WaitlistApplication,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/clubs/{club_id}/waitlist",
    params(
        ("club_id" = Uuid, Path, description = "Club ID")
    ),
    responses(
        (status = 200, description = "Waitlist in queue order", body = Vec<WaitlistApplication>)
    ),
    tag = "waitlist"
)]
pub async fn list_applications(
    State(db): State<Database>,
    Path(club_id): Path<Uuid>,
) -> Result<Json<Vec<WaitlistApplication>>, WebError> {
    let applications = services::list_applications(db.pool(), club_id).await?;

    Ok(Json(applications))
}

#[utoipa::path(
    post,
    path = "/api/clubs/{club_id}/waitlist",
    params(
        ("club_id" = Uuid, Path, description = "Club ID")
    ),
    request_body = CreateWaitlistApplicationRequest,
    responses(
        (status = 201, description = "Application added to the waitlist", body = WaitlistApplication),
        (status = 400, description = "Validation error")
    ),
    tag = "waitlist"
)]
pub async fn create_application(
    State(db): State<Database>,
    Path(club_id): Path<Uuid>,
    Json(req): Json<CreateWaitlistApplicationRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    req.validate_amount()
        .map_err(|e| WebError::BadRequest(e.to_string()))?;

    let application = services::create_application(db.pool(), club_id, &req).await?;

    Ok((StatusCode::CREATED, Json(application)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/clubs/{club_id}/waitlist/order",
    params(
        ("club_id" = Uuid, Path, description = "Club ID")
    ),
    request_body = ReorderWaitlistRequest,
    responses(
        (status = 204, description = "Waitlist reordered; ids outside the club are ignored, an empty list is a no-op")
    ),
    tag = "waitlist"
)]
pub async fn reorder_waitlist(
    State(db): State<Database>,
    Path(club_id): Path<Uuid>,
    Json(req): Json<ReorderWaitlistRequest>,
) -> Result<Response, WebError> {
    services::reorder(db.pool(), club_id, &req.application_ids).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

#[utoipa::path(
    delete,
    path = "/api/waitlist/{application_id}",
    params(
        ("application_id" = Uuid, Path, description = "Waitlist application ID")
    ),
    responses(
        (status = 204, description = "Application removed"),
        (status = 404, description = "Application not found")
    ),
    tag = "waitlist"
)]
pub async fn remove_application(
    State(db): State<Database>,
    Path(application_id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::remove(db.pool(), application_id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

#[utoipa::path(
    post,
    path = "/api/waitlist/{application_id}/convert",
    params(
        ("application_id" = Uuid, Path, description = "Waitlist application ID")
    ),
    responses(
        (status = 201, description = "Member created from the application", body = ConversionResponse),
        (status = 404, description = "Application not found"),
        (status = 409, description = "Application already converted or not pending"),
        (status = 502, description = "Member store returned no member")
    ),
    tag = "waitlist"
)]
pub async fn convert_application(
    State(state): State<AppState>,
    Path(application_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let outcome = services::convert(
        state.db.pool(),
        application_id,
        state.default_member_type,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(outcome)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/waitlist/{application_id}/reject",
    params(
        ("application_id" = Uuid, Path, description = "Waitlist application ID")
    ),
    responses(
        (status = 200, description = "Application rejected", body = WaitlistApplication),
        (status = 404, description = "Application not found"),
        (status = 409, description = "Application is not pending")
    ),
    tag = "waitlist"
)]
pub async fn reject_application(
    State(db): State<Database>,
    Path(application_id): Path<Uuid>,
) -> Result<Json<WaitlistApplication>, WebError> {
    let application = services::reject(db.pool(), application_id).await?;

    Ok(Json(application))
}

#[utoipa::path(
    put,
    path = "/api/waitlist/{application_id}/payment",
    params(
        ("application_id" = Uuid, Path, description = "Waitlist application ID")
    ),
    request_body = UpdatePaymentStatusRequest,
    responses(
        (status = 200, description = "Payment status updated", body = WaitlistApplication),
        (status = 404, description = "Application not found")
    ),
    tag = "waitlist"
)]
pub async fn update_payment_status(
    State(db): State<Database>,
    Path(application_id): Path<Uuid>,
    Json(req): Json<UpdatePaymentStatusRequest>,
) -> Result<Json<WaitlistApplication>, WebError> {
    let application =
        services::update_payment_status(db.pool(), application_id, req.payment_status).await?;

    Ok(Json(application))
}
