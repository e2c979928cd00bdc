use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Simplified RSVP intent shown to members.
///
/// Never stored: always derived from a [`RegistrationStatus`](super::RegistrationStatus).
/// `NotResponded` stands for "no registration row exists".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RsvpStatus {
    Going,
    Maybe,
    NotGoing,
    #[default]
    NotResponded,
}

impl RsvpStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Going => "going",
            Self::Maybe => "maybe",
            Self::NotGoing => "not_going",
            Self::NotResponded => "not_responded",
        }
    }

    pub fn all() -> &'static [RsvpStatus] {
        &[Self::Going, Self::Maybe, Self::NotGoing, Self::NotResponded]
    }
}

impl std::fmt::Display for RsvpStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A member's RSVP for one event, as seen by the UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EventRsvp {
    pub registration_id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub status: RsvpStatus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RsvpCounts {
    pub going: usize,
    pub maybe: usize,
    pub not_going: usize,
    pub not_responded: usize,
    pub total: usize,
}
