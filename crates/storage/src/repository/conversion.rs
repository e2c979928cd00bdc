use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{Member, MemberRow, NewMember, WaitlistApplication, WaitlistApplicationRow};
use crate::traits::{ConversionStore, ConversionUnit};

/// Runs waitlist conversions inside a single Postgres transaction
pub struct ConversionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ConversionRepository<'a> {
    /// Create a new ConversionRepository
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConversionStore for ConversionRepository<'_> {
    async fn begin(&self) -> Result<Box<dyn ConversionUnit + '_>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgConversionUnit { tx }))
    }
}

/// Open transaction; rolled back on drop unless committed
struct PgConversionUnit {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl ConversionUnit for PgConversionUnit {
    async fn lock_application(
        &mut self,
        application_id: Uuid,
    ) -> Result<Option<WaitlistApplication>> {
        let row = sqlx::query_as::<_, WaitlistApplicationRow>(
            r#"
            SELECT application_id, club_id, email, first_name, last_name, phone,
                   payment_status, payment_amount, position, status, approved_at,
                   converted_member_id, created_at, updated_at
            FROM waitlist_applications
            WHERE application_id = $1
            FOR UPDATE
            "#,
        )
        .bind(application_id)
        .fetch_optional(&mut *self.tx)
        .await?;

        row.map(WaitlistApplication::try_from).transpose()
    }

    /// A member with the same email already in the club yields `None`
    async fn create_member(&mut self, member: &NewMember) -> Result<Option<Member>> {
        let inserted = sqlx::query_as::<_, MemberRow>(
            r#"
            INSERT INTO members (
                club_id, first_name, last_name, email, phone,
                member_type, membership_start_date
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING member_id, club_id, first_name, last_name, email, phone,
                      member_type, membership_start_date, created_at
            "#,
        )
        .bind(member.club_id)
        .bind(&member.first_name)
        .bind(&member.last_name)
        .bind(&member.email)
        .bind(&member.phone)
        .bind(member.member_type.as_str())
        .bind(member.membership_start_date)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(StorageError::from);

        match inserted {
            Ok(row) => Member::try_from(row).map(Some),
            Err(e) if e.is_unique_violation() => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn mark_converted(
        &mut self,
        application_id: Uuid,
        member_id: Uuid,
        approved_at: DateTime<Utc>,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE waitlist_applications
            SET status = 'approved',
                converted_member_id = $2,
                approved_at = $3,
                updated_at = now()
            WHERE application_id = $1
              AND converted_member_id IS NULL
              AND status = 'pending'
            "#,
        )
        .bind(application_id)
        .bind(member_id)
        .bind(approved_at)
        .execute(&mut *self.tx)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        self.tx.commit().await?;
        Ok(())
    }
}
