use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::PaymentStatus;
use crate::error::StorageError;

/// Backend lifecycle state of a member's registration for an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    Registered,
    Confirmed,
    Canceled,
    Waitlisted,
    Attended,
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Registered => "registered",
            Self::Confirmed => "confirmed",
            Self::Canceled => "canceled",
            Self::Waitlisted => "waitlisted",
            Self::Attended => "attended",
        }
    }

    pub fn all() -> &'static [RegistrationStatus] {
        &[
            Self::Registered,
            Self::Confirmed,
            Self::Canceled,
            Self::Waitlisted,
            Self::Attended,
        ]
    }

    fn parse_str(s: &str) -> Result<Self, StorageError> {
        match s {
            "registered" => Ok(Self::Registered),
            "confirmed" => Ok(Self::Confirmed),
            "canceled" => Ok(Self::Canceled),
            "waitlisted" => Ok(Self::Waitlisted),
            "attended" => Ok(Self::Attended),
            _ => Err(StorageError::InvalidRow(format!(
                "unknown registration status '{}'",
                s
            ))),
        }
    }
}

impl TryFrom<&str> for RegistrationStatus {
    type Error = StorageError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse_str(value)
    }
}

impl std::str::FromStr for RegistrationStatus {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventRegistration {
    pub registration_id: Uuid,
    pub event_id: Uuid,
    pub member_id: Uuid,
    pub status: RegistrationStatus,
    pub registration_date: DateTime<Utc>,
    pub payment_status: PaymentStatus,
    pub payment_amount: Decimal,
}

/// Raw `event_registrations` row as stored, before status validation
#[derive(Debug, Clone, FromRow)]
pub struct EventRegistrationRow {
    pub registration_id: Uuid,
    pub event_id: Uuid,
    pub member_id: Uuid,
    pub status: String,
    pub registration_date: DateTime<Utc>,
    pub payment_status: String,
    pub payment_amount: Decimal,
}

impl TryFrom<EventRegistrationRow> for EventRegistration {
    type Error = StorageError;

    fn try_from(row: EventRegistrationRow) -> Result<Self, Self::Error> {
        Ok(Self {
            registration_id: row.registration_id,
            event_id: row.event_id,
            member_id: row.member_id,
            status: row.status.parse()?,
            registration_date: row.registration_date,
            payment_status: row.payment_status.parse()?,
            payment_amount: row.payment_amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(status: &str) -> EventRegistrationRow {
        EventRegistrationRow {
            registration_id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            member_id: Uuid::new_v4(),
            status: status.to_string(),
            registration_date: Utc::now(),
            payment_status: "pending".to_string(),
            payment_amount: Decimal::ZERO,
        }
    }

    #[test]
    fn test_status_text_round_trips() {
        for status in RegistrationStatus::all() {
            assert_eq!(status.as_str().parse::<RegistrationStatus>().unwrap(), *status);
        }
    }

    #[test]
    fn test_row_conversion_validates_status() {
        let registration = EventRegistration::try_from(row("attended")).unwrap();
        assert_eq!(registration.status, RegistrationStatus::Attended);

        let err = EventRegistration::try_from(row("no_show")).unwrap_err();
        assert!(matches!(err, StorageError::InvalidRow(_)));
    }
}
