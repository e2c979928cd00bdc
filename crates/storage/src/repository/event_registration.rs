use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{EventRegistration, EventRegistrationRow, RegistrationStatus};
use crate::traits::RegistrationStore;

/// Repository for event registration database operations
pub struct EventRegistrationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> EventRegistrationRepository<'a> {
    /// Create a new EventRegistrationRepository
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RegistrationStore for EventRegistrationRepository<'_> {
    async fn list_rows_by_event(&self, event_id: Uuid) -> Result<Vec<EventRegistrationRow>> {
        let rows = sqlx::query_as::<_, EventRegistrationRow>(
            r#"
            SELECT registration_id, event_id, member_id, status, registration_date,
                   payment_status, payment_amount
            FROM event_registrations
            WHERE event_id = $1
            ORDER BY registration_date ASC
            "#,
        )
        .bind(event_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    async fn find_row(
        &self,
        event_id: Uuid,
        member_id: Uuid,
    ) -> Result<Option<EventRegistrationRow>> {
        let row = sqlx::query_as::<_, EventRegistrationRow>(
            r#"
            SELECT registration_id, event_id, member_id, status, registration_date,
                   payment_status, payment_amount
            FROM event_registrations
            WHERE event_id = $1 AND member_id = $2
            "#,
        )
        .bind(event_id)
        .bind(member_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row)
    }

    async fn upsert_status(
        &self,
        event_id: Uuid,
        member_id: Uuid,
        status: RegistrationStatus,
    ) -> Result<EventRegistration> {
        let row = sqlx::query_as::<_, EventRegistrationRow>(
            r#"
            INSERT INTO event_registrations (event_id, member_id, status)
            VALUES ($1, $2, $3)
            ON CONFLICT (event_id, member_id)
            DO UPDATE SET status = EXCLUDED.status
            RETURNING registration_id, event_id, member_id, status, registration_date,
                      payment_status, payment_amount
            "#,
        )
        .bind(event_id)
        .bind(member_id)
        .bind(status.as_str())
        .fetch_one(self.pool)
        .await?;

        EventRegistration::try_from(row)
    }

    async fn update_status(
        &self,
        event_id: Uuid,
        member_id: Uuid,
        status: RegistrationStatus,
    ) -> Result<EventRegistration> {
        let row = sqlx::query_as::<_, EventRegistrationRow>(
            r#"
            UPDATE event_registrations
            SET status = $3
            WHERE event_id = $1 AND member_id = $2
            RETURNING registration_id, event_id, member_id, status, registration_date,
                      payment_status, payment_amount
            "#,
        )
        .bind(event_id)
        .bind(member_id)
        .bind(status.as_str())
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        EventRegistration::try_from(row)
    }
}
