use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{
    NewWaitlistApplication, PaymentStatus, WaitlistApplication, WaitlistApplicationRow,
    WaitlistStatus,
};
use crate::traits::WaitlistStore;

/// Repository for waitlist application database operations
pub struct WaitlistRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> WaitlistRepository<'a> {
    /// Create a new WaitlistRepository
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WaitlistStore for WaitlistRepository<'_> {
    async fn list_by_club(&self, club_id: Uuid) -> Result<Vec<WaitlistApplication>> {
        let rows = sqlx::query_as::<_, WaitlistApplicationRow>(
            r#"
            SELECT application_id, club_id, email, first_name, last_name, phone,
                   payment_status, payment_amount, position, status, approved_at,
                   converted_member_id, created_at, updated_at
            FROM waitlist_applications
            WHERE club_id = $1
            ORDER BY position ASC, created_at ASC
            "#,
        )
        .bind(club_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(WaitlistApplication::try_from).collect()
    }

    async fn get_by_id(&self, application_id: Uuid) -> Result<Option<WaitlistApplication>> {
        let row = sqlx::query_as::<_, WaitlistApplicationRow>(
            r#"
            SELECT application_id, club_id, email, first_name, last_name, phone,
                   payment_status, payment_amount, position, status, approved_at,
                   converted_member_id, created_at, updated_at
            FROM waitlist_applications
            WHERE application_id = $1
            "#,
        )
        .bind(application_id)
        .fetch_optional(self.pool)
        .await?;

        row.map(WaitlistApplication::try_from).transpose()
    }

    async fn max_position(&self, club_id: Uuid) -> Result<Option<i32>> {
        let max: Option<i32> = sqlx::query_scalar(
            r#"
            SELECT MAX(position)
            FROM waitlist_applications
            WHERE club_id = $1
            "#,
        )
        .bind(club_id)
        .fetch_one(self.pool)
        .await?;

        Ok(max)
    }

    async fn insert(&self, application: &NewWaitlistApplication) -> Result<WaitlistApplication> {
        let row = sqlx::query_as::<_, WaitlistApplicationRow>(
            r#"
            INSERT INTO waitlist_applications (
                club_id, email, first_name, last_name, phone,
                payment_status, payment_amount, position, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'pending')
            RETURNING application_id, club_id, email, first_name, last_name, phone,
                      payment_status, payment_amount, position, status, approved_at,
                      converted_member_id, created_at, updated_at
            "#,
        )
        .bind(application.club_id)
        .bind(&application.email)
        .bind(&application.first_name)
        .bind(&application.last_name)
        .bind(&application.phone)
        .bind(application.payment_status.as_str())
        .bind(application.payment_amount)
        .bind(application.position)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            let e = StorageError::from(e);
            if e.is_check_violation() {
                return StorageError::ConstraintViolation("Position must be >= 0".to_string());
            }
            e
        })?;

        WaitlistApplication::try_from(row)
    }

    async fn update_position(
        &self,
        club_id: Uuid,
        application_id: Uuid,
        position: i32,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE waitlist_applications
            SET position = $3, updated_at = now()
            WHERE application_id = $1 AND club_id = $2
            "#,
        )
        .bind(application_id)
        .bind(club_id)
        .bind(position)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_status(
        &self,
        application_id: Uuid,
        from: WaitlistStatus,
        to: WaitlistStatus,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE waitlist_applications
            SET status = $3, updated_at = now()
            WHERE application_id = $1 AND status = $2
            "#,
        )
        .bind(application_id)
        .bind(from.as_str())
        .bind(to.as_str())
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_payment_status(
        &self,
        application_id: Uuid,
        payment_status: PaymentStatus,
    ) -> Result<WaitlistApplication> {
        let row = sqlx::query_as::<_, WaitlistApplicationRow>(
            r#"
            UPDATE waitlist_applications
            SET payment_status = $2, updated_at = now()
            WHERE application_id = $1
            RETURNING application_id, club_id, email, first_name, last_name, phone,
                      payment_status, payment_amount, position, status, approved_at,
                      converted_member_id, created_at, updated_at
            "#,
        )
        .bind(application_id)
        .bind(payment_status.as_str())
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        WaitlistApplication::try_from(row)
    }

    async fn delete(&self, application_id: Uuid) -> Result<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM waitlist_applications
            WHERE application_id = $1
            "#,
        )
        .bind(application_id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
