use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{EventRsvp, RsvpCounts, RsvpStatus};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SetRsvpRequest {
    pub status: RsvpStatus,
}

/// All RSVPs for an event together with their tallies
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RsvpSummary {
    pub event_id: Uuid,
    pub rsvps: Vec<EventRsvp>,
    pub counts: RsvpCounts,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MemberRsvpResponse {
    pub event_id: Uuid,
    pub member_id: Uuid,
    pub status: RsvpStatus,
}
