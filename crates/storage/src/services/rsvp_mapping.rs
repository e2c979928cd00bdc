use uuid::Uuid;

use crate::models::{EventRsvp, RegistrationStatus, RsvpCounts, RsvpStatus};

/// Collapse a registration status into what the member sees.
///
/// Lossy: `Confirmed`/`Attended` both read as `Going` and
/// `Registered`/`Waitlisted` both read as `Maybe`.
pub fn map_to_rsvp_status(status: RegistrationStatus) -> RsvpStatus {
    match status {
        RegistrationStatus::Confirmed | RegistrationStatus::Attended => RsvpStatus::Going,
        RegistrationStatus::Registered | RegistrationStatus::Waitlisted => RsvpStatus::Maybe,
        RegistrationStatus::Canceled => RsvpStatus::NotGoing,
    }
}

/// Forward mapping for a registration that may be missing or carry a value
/// this build does not know about. Both read as `NotResponded`.
pub fn rsvp_status_from_raw(status: Option<&str>) -> RsvpStatus {
    status
        .and_then(|s| s.parse::<RegistrationStatus>().ok())
        .map_or(RsvpStatus::NotResponded, map_to_rsvp_status)
}

/// Pick the registration status to write for an RSVP.
///
/// Not an inverse of [`map_to_rsvp_status`]: it picks a representative whose
/// forward image is the given RSVP. `Attended` and `Waitlisted` are never
/// produced here.
pub fn map_to_registration_status(status: RsvpStatus) -> RegistrationStatus {
    match status {
        RsvpStatus::Going => RegistrationStatus::Confirmed,
        RsvpStatus::Maybe => RegistrationStatus::Registered,
        RsvpStatus::NotGoing => RegistrationStatus::Canceled,
        RsvpStatus::NotResponded => RegistrationStatus::Registered,
    }
}

pub fn aggregate_counts(statuses: &[RsvpStatus]) -> RsvpCounts {
    statuses.iter().fold(
        RsvpCounts {
            total: statuses.len(),
            ..RsvpCounts::default()
        },
        |mut counts, status| {
            match status {
                RsvpStatus::Going => counts.going += 1,
                RsvpStatus::Maybe => counts.maybe += 1,
                RsvpStatus::NotGoing => counts.not_going += 1,
                RsvpStatus::NotResponded => counts.not_responded += 1,
            }
            counts
        },
    )
}

/// First RSVP belonging to `user_id`. A user should have at most one per
/// event; duplicates resolve to the earliest in the slice.
pub fn find_user_rsvp(rsvps: &[EventRsvp], user_id: Uuid) -> Option<&EventRsvp> {
    rsvps.iter().find(|rsvp| rsvp.user_id == user_id)
}
