use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{
    EventRegistration, EventRegistrationRow, Member, NewMember, NewWaitlistApplication,
    PaymentStatus, RegistrationStatus, WaitlistApplication, WaitlistStatus,
};

/// Persistence for waitlist applications.
///
/// Writes that guard a state transition return `false` when the guard did not
/// match instead of failing, so callers can tell "lost the race" apart from a
/// store error.
#[async_trait]
pub trait WaitlistStore: Send + Sync {
    /// All applications of a club, front of the queue first
    async fn list_by_club(&self, club_id: Uuid) -> Result<Vec<WaitlistApplication>>;

    async fn get_by_id(&self, application_id: Uuid) -> Result<Option<WaitlistApplication>>;

    /// Highest position held by any application of the club, `None` for an empty club
    async fn max_position(&self, club_id: Uuid) -> Result<Option<i32>>;

    async fn insert(&self, application: &NewWaitlistApplication) -> Result<WaitlistApplication>;

    /// Set the position of an application if it belongs to `club_id`
    async fn update_position(&self, club_id: Uuid, application_id: Uuid, position: i32)
    -> Result<bool>;

    /// Move an application from `from` to `to`; no-op when it is not in `from`
    async fn update_status(
        &self,
        application_id: Uuid,
        from: WaitlistStatus,
        to: WaitlistStatus,
    ) -> Result<bool>;

    async fn update_payment_status(
        &self,
        application_id: Uuid,
        payment_status: PaymentStatus,
    ) -> Result<WaitlistApplication>;

    /// Hard delete. Fails with `NotFound` when nothing was deleted.
    async fn delete(&self, application_id: Uuid) -> Result<()>;
}

/// Opens the atomic units a waitlist conversion runs in
#[async_trait]
pub trait ConversionStore: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn ConversionUnit + '_>>;
}

/// One all-or-nothing conversion.
///
/// Nothing written through the unit is visible to others before `commit`, and
/// dropping the unit without committing discards every write. While the unit
/// holds an application returned by `lock_application`, concurrent units
/// locking the same application wait for it.
#[async_trait]
pub trait ConversionUnit: Send {
    async fn lock_application(&mut self, application_id: Uuid)
    -> Result<Option<WaitlistApplication>>;

    /// Returns `None` when the store accepted the call but produced no member
    async fn create_member(&mut self, member: &NewMember) -> Result<Option<Member>>;

    /// Approve the application and record its member, only if it is still
    /// pending and has never been converted.
    async fn mark_converted(
        &mut self,
        application_id: Uuid,
        member_id: Uuid,
        approved_at: DateTime<Utc>,
    ) -> Result<bool>;

    async fn commit(self: Box<Self>) -> Result<()>;
}

/// Persistence for event registrations
#[async_trait]
pub trait RegistrationStore: Send + Sync {
    /// Registrations of an event, oldest first, without status validation
    async fn list_rows_by_event(&self, event_id: Uuid) -> Result<Vec<EventRegistrationRow>>;

    /// Registration of one member, without status validation
    async fn find_row(&self, event_id: Uuid, member_id: Uuid)
    -> Result<Option<EventRegistrationRow>>;

    /// Create the registration or overwrite its status
    async fn upsert_status(
        &self,
        event_id: Uuid,
        member_id: Uuid,
        status: RegistrationStatus,
    ) -> Result<EventRegistration>;

    /// Change the status of an existing registration, `NotFound` if there is none
    async fn update_status(
        &self,
        event_id: Uuid,
        member_id: Uuid,
        status: RegistrationStatus,
    ) -> Result<EventRegistration>;
}
