use std::time::Duration;

use anyhow::Context;
use axum::Router;
use storage::Database;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod state;

use config::Config;
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::waitlist::handlers::list_applications,
        features::waitlist::handlers::create_application,
        features::waitlist::handlers::reorder_waitlist,
        features::waitlist::handlers::remove_application,
        features::waitlist::handlers::convert_application,
        features::waitlist::handlers::reject_application,
        features::waitlist::handlers::update_payment_status,
        features::rsvp::handlers::get_event_rsvps,
        features::rsvp::handlers::get_member_rsvp,
        features::rsvp::handlers::set_member_rsvp,
        features::rsvp::handlers::mark_attended,
        features::rsvp::handlers::mark_waitlisted,
    ),
    components(
        schemas(
            storage::dto::waitlist::CreateWaitlistApplicationRequest,
            storage::dto::waitlist::ReorderWaitlistRequest,
            storage::dto::waitlist::UpdatePaymentStatusRequest,
            storage::dto::waitlist::ConversionResponse,
            storage::dto::rsvp::SetRsvpRequest,
            storage::dto::rsvp::RsvpSummary,
            storage::dto::rsvp::MemberRsvpResponse,
            storage::models::WaitlistApplication,
            storage::models::WaitlistStatus,
            storage::models::PaymentStatus,
            storage::models::MemberType,
            storage::models::RegistrationStatus,
            storage::models::RsvpStatus,
            storage::models::RsvpCounts,
            storage::models::EventRsvp,
        )
    ),
    tags(
        (name = "waitlist", description = "Club waitlist management"),
        (name = "rsvps", description = "Event RSVPs"),
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting Clubhouse API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!(
        default_member_type = %config.default_member_type,
        "Configuration loaded successfully"
    );

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let state = AppState {
        db,
        default_member_type: config.default_member_type,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    let api = features::waitlist::routes().merge(features::rsvp::routes());

    let app = Router::new()
        .nest("/api", api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    axum::serve(listener, app).await?;

    Ok(())
}
