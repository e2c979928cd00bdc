use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::PaymentStatus;

/// Request payload for joining a club's waitlist
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateWaitlistApplicationRequest {
    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,

    #[validate(length(
        min = 1,
        max = 255,
        message = "First name must be between 1 and 255 characters"
    ))]
    pub first_name: String,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Last name must be between 1 and 255 characters"
    ))]
    pub last_name: String,

    #[validate(length(max = 50))]
    pub phone: Option<String>,

    pub payment_status: Option<PaymentStatus>,

    pub payment_amount: Option<Decimal>,

    /// Explicit position; when omitted the application goes to the back of the queue
    #[validate(range(min = 0, message = "Position must be >= 0"))]
    pub position: Option<i32>,
}

impl CreateWaitlistApplicationRequest {
    pub fn validate_amount(&self) -> Result<(), &'static str> {
        match self.payment_amount {
            Some(amount) if amount < Decimal::ZERO => Err("Payment amount must not be negative"),
            _ => Ok(()),
        }
    }
}

/// New order for a club's waitlist, front of the queue first. An empty list is accepted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReorderWaitlistRequest {
    pub application_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdatePaymentStatusRequest {
    pub payment_status: PaymentStatus,
}

/// Result of converting a waitlist application into a member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ConversionResponse {
    pub member_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateWaitlistApplicationRequest {
        CreateWaitlistApplicationRequest {
            email: "grace@example.com".to_string(),
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            phone: None,
            payment_status: None,
            payment_amount: None,
            position: None,
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request().validate().is_ok());
        assert!(request().validate_amount().is_ok());
    }

    #[test]
    fn test_invalid_email_is_rejected() {
        let mut req = request();
        req.email = "not-an-email".to_string();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_negative_position_is_rejected() {
        let mut req = request();
        req.position = Some(-2);
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_negative_amount_is_rejected() {
        let mut req = request();
        req.payment_amount = Some(Decimal::new(-500, 2));
        assert!(req.validate_amount().is_err());
    }

    #[test]
    fn test_missing_optional_fields_deserialize() {
        let req: CreateWaitlistApplicationRequest = serde_json::from_str(
            r#"{"email":"a@b.io","first_name":"A","last_name":"B"}"#,
        )
        .unwrap();
        assert!(req.position.is_none());
        assert!(req.payment_status.is_none());
    }

    #[test]
    fn test_empty_reorder_request_deserializes() {
        let req: ReorderWaitlistRequest =
            serde_json::from_str(r#"{"application_ids":[]}"#).unwrap();
        assert!(req.application_ids.is_empty());
    }
}
