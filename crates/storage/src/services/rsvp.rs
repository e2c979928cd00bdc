use uuid::Uuid;

use crate::dto::rsvp::{MemberRsvpResponse, RsvpSummary};
use crate::error::Result;
use crate::models::{
    EventRegistration, EventRegistrationRow, EventRsvp, RegistrationStatus, RsvpStatus,
};
use crate::traits::RegistrationStore;

use super::rsvp_mapping::{
    aggregate_counts, map_to_registration_status, map_to_rsvp_status, rsvp_status_from_raw,
};

impl From<EventRegistration> for EventRsvp {
    fn from(registration: EventRegistration) -> Self {
        Self {
            registration_id: registration.registration_id,
            event_id: registration.event_id,
            user_id: registration.member_id,
            status: map_to_rsvp_status(registration.status),
        }
    }
}

impl From<EventRegistrationRow> for EventRsvp {
    fn from(row: EventRegistrationRow) -> Self {
        Self {
            status: rsvp_status_from_raw(Some(row.status.as_str())),
            registration_id: row.registration_id,
            event_id: row.event_id,
            user_id: row.member_id,
        }
    }
}

/// Every RSVP of an event. Rows with an unrecognised status read as `not_responded`.
pub async fn list_event_rsvps<R>(store: &R, event_id: Uuid) -> Result<Vec<EventRsvp>>
where
    R: RegistrationStore + ?Sized,
{
    let rows = store.list_rows_by_event(event_id).await?;
    Ok(rows.into_iter().map(EventRsvp::from).collect())
}

pub async fn event_rsvp_summary<R>(store: &R, event_id: Uuid) -> Result<RsvpSummary>
where
    R: RegistrationStore + ?Sized,
{
    let rsvps = list_event_rsvps(store, event_id).await?;
    let statuses: Vec<RsvpStatus> = rsvps.iter().map(|rsvp| rsvp.status).collect();

    Ok(RsvpSummary {
        event_id,
        counts: aggregate_counts(&statuses),
        rsvps,
    })
}

/// RSVP of one member, `not_responded` when they never registered or the
/// stored status is not one we know
pub async fn get_member_rsvp<R>(
    store: &R,
    event_id: Uuid,
    member_id: Uuid,
) -> Result<MemberRsvpResponse>
where
    R: RegistrationStore + ?Sized,
{
    let row = store.find_row(event_id, member_id).await?;
    let status = rsvp_status_from_raw(row.as_ref().map(|r| r.status.as_str()));

    Ok(MemberRsvpResponse {
        event_id,
        member_id,
        status,
    })
}

/// Record a member's RSVP, creating the registration when needed
pub async fn set_rsvp<R>(
    store: &R,
    event_id: Uuid,
    member_id: Uuid,
    status: RsvpStatus,
) -> Result<EventRsvp>
where
    R: RegistrationStore + ?Sized,
{
    let registration_status = map_to_registration_status(status);

    tracing::debug!(
        %event_id,
        %member_id,
        rsvp = %status,
        registration = %registration_status,
        "Recording RSVP"
    );

    let registration = store
        .upsert_status(event_id, member_id, registration_status)
        .await?;

    Ok(EventRsvp::from(registration))
}

pub async fn mark_attended<R>(store: &R, event_id: Uuid, member_id: Uuid) -> Result<EventRsvp>
where
    R: RegistrationStore + ?Sized,
{
    set_registration_status(store, event_id, member_id, RegistrationStatus::Attended).await
}

pub async fn mark_waitlisted<R>(store: &R, event_id: Uuid, member_id: Uuid) -> Result<EventRsvp>
where
    R: RegistrationStore + ?Sized,
{
    set_registration_status(store, event_id, member_id, RegistrationStatus::Waitlisted).await
}

async fn set_registration_status<R>(
    store: &R,
    event_id: Uuid,
    member_id: Uuid,
    status: RegistrationStatus,
) -> Result<EventRsvp>
where
    R: RegistrationStore + ?Sized,
{
    let registration = store.update_status(event_id, member_id, status).await?;

    tracing::info!(%event_id, %member_id, %status, "Registration status changed");

    Ok(EventRsvp::from(registration))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal::Decimal;

    use super::*;
    use crate::error::StorageError;
    use crate::models::PaymentStatus;
    use crate::repository::memory::InMemoryRegistrationStore;

    #[test]
    fn test_registration_converts_to_rsvp() {
        let registration = EventRegistration {
            registration_id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            member_id: Uuid::new_v4(),
            status: RegistrationStatus::Attended,
            registration_date: Utc::now(),
            payment_status: PaymentStatus::Completed,
            payment_amount: Decimal::new(1000, 2),
        };

        let rsvp = EventRsvp::from(registration.clone());
        assert_eq!(rsvp.user_id, registration.member_id);
        assert_eq!(rsvp.event_id, registration.event_id);
        assert_eq!(rsvp.status, RsvpStatus::Going);
    }

    #[tokio::test]
    async fn test_set_rsvp_stores_reverse_mapping() {
        let store = InMemoryRegistrationStore::new();
        let event = Uuid::new_v4();
        let cases = [
            (RsvpStatus::Going, "confirmed", RsvpStatus::Going),
            (RsvpStatus::Maybe, "registered", RsvpStatus::Maybe),
            (RsvpStatus::NotGoing, "canceled", RsvpStatus::NotGoing),
            (RsvpStatus::NotResponded, "registered", RsvpStatus::Maybe),
        ];

        for (requested, stored, read_back) in cases {
            let member = Uuid::new_v4();
            let rsvp = set_rsvp(&store, event, member, requested).await.unwrap();

            assert_eq!(store.stored_status(event, member).as_deref(), Some(stored));
            assert_eq!(rsvp.status, read_back);
            assert_eq!(rsvp.user_id, member);
        }
    }

    #[tokio::test]
    async fn test_set_rsvp_overwrites_existing_registration() {
        let store = InMemoryRegistrationStore::new();
        let (event, member) = (Uuid::new_v4(), Uuid::new_v4());
        let seeded = store.seed(event, member, "confirmed");

        let rsvp = set_rsvp(&store, event, member, RsvpStatus::NotGoing).await.unwrap();

        assert_eq!(rsvp.registration_id, seeded.registration_id);
        assert_eq!(store.stored_status(event, member).as_deref(), Some("canceled"));
        assert_eq!(store.list_rows_by_event(event).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_member_without_registration_has_not_responded() {
        let store = InMemoryRegistrationStore::new();

        let response = get_member_rsvp(&store, Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap();

        assert_eq!(response.status, RsvpStatus::NotResponded);
    }

    #[tokio::test]
    async fn test_unknown_stored_status_reads_as_not_responded() {
        let store = InMemoryRegistrationStore::new();
        let (event, member) = (Uuid::new_v4(), Uuid::new_v4());
        store.seed(event, member, "no_show");

        let response = get_member_rsvp(&store, event, member).await.unwrap();
        assert_eq!(response.status, RsvpStatus::NotResponded);

        let listed = list_event_rsvps(&store, event).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].status, RsvpStatus::NotResponded);
    }

    #[tokio::test]
    async fn test_summary_counts_every_registration() {
        let store = InMemoryRegistrationStore::new();
        let event = Uuid::new_v4();
        for status in ["confirmed", "attended", "registered", "canceled", "no_show"] {
            store.seed(event, Uuid::new_v4(), status);
        }
        store.seed(Uuid::new_v4(), Uuid::new_v4(), "confirmed");

        let summary = event_rsvp_summary(&store, event).await.unwrap();

        assert_eq!(summary.event_id, event);
        assert_eq!(summary.rsvps.len(), 5);
        assert_eq!(summary.counts.going, 2);
        assert_eq!(summary.counts.maybe, 1);
        assert_eq!(summary.counts.not_going, 1);
        assert_eq!(summary.counts.not_responded, 1);
        assert_eq!(summary.counts.total, 5);
    }

    #[tokio::test]
    async fn test_marking_requires_a_registration() {
        let store = InMemoryRegistrationStore::new();
        let (event, member) = (Uuid::new_v4(), Uuid::new_v4());

        let err = mark_attended(&store, event, member).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
        let err = mark_waitlisted(&store, event, member).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
        assert!(store.stored_status(event, member).is_none());
    }

    #[tokio::test]
    async fn test_marking_reaches_statuses_reverse_mapping_cannot() {
        let store = InMemoryRegistrationStore::new();
        let (event, member) = (Uuid::new_v4(), Uuid::new_v4());
        store.seed(event, member, "registered");

        let rsvp = mark_waitlisted(&store, event, member).await.unwrap();
        assert_eq!(store.stored_status(event, member).as_deref(), Some("waitlisted"));
        assert_eq!(rsvp.status, RsvpStatus::Maybe);

        let rsvp = mark_attended(&store, event, member).await.unwrap();
        assert_eq!(store.stored_status(event, member).as_deref(), Some("attended"));
        assert_eq!(rsvp.status, RsvpStatus::Going);
    }
}
