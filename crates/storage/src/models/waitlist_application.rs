use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::PaymentStatus;
use crate::error::StorageError;

/// Lifecycle of a waitlist application. `Approved`, `Rejected` and `Removed`
/// are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum WaitlistStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Removed,
}

impl WaitlistStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Removed => "removed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    fn parse_str(s: &str) -> Result<Self, StorageError> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "removed" => Ok(Self::Removed),
            _ => Err(StorageError::InvalidRow(format!(
                "unknown waitlist status '{}'",
                s
            ))),
        }
    }
}

impl TryFrom<&str> for WaitlistStatus {
    type Error = StorageError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse_str(value)
    }
}

impl std::str::FromStr for WaitlistStatus {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for WaitlistStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WaitlistApplication {
    pub application_id: Uuid,
    pub club_id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub payment_status: PaymentStatus,
    pub payment_amount: Decimal,
    pub position: i32,
    pub status: WaitlistStatus,
    pub approved_at: Option<DateTime<Utc>>,
    pub converted_member_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WaitlistApplication {
    pub fn is_converted(&self) -> bool {
        self.converted_member_id.is_some()
    }
}

/// Raw `waitlist_applications` row as stored, before enum validation
#[derive(Debug, Clone, FromRow)]
pub struct WaitlistApplicationRow {
    pub application_id: Uuid,
    pub club_id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub payment_status: String,
    pub payment_amount: Decimal,
    pub position: i32,
    pub status: String,
    pub approved_at: Option<DateTime<Utc>>,
    pub converted_member_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<WaitlistApplicationRow> for WaitlistApplication {
    type Error = StorageError;

    fn try_from(row: WaitlistApplicationRow) -> Result<Self, Self::Error> {
        if row.position < 0 {
            return Err(StorageError::InvalidRow(format!(
                "negative waitlist position {} for application {}",
                row.position, row.application_id
            )));
        }

        Ok(Self {
            application_id: row.application_id,
            club_id: row.club_id,
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
            phone: row.phone,
            payment_status: row.payment_status.parse()?,
            payment_amount: row.payment_amount,
            position: row.position,
            status: row.status.parse()?,
            approved_at: row.approved_at,
            converted_member_id: row.converted_member_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// A validated application ready to be inserted with its assigned position
#[derive(Debug, Clone, PartialEq)]
pub struct NewWaitlistApplication {
    pub club_id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub payment_status: PaymentStatus,
    pub payment_amount: Decimal,
    pub position: i32,
}
