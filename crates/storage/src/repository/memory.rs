//! In-memory store doubles for service tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{
    EventRegistration, EventRegistrationRow, Member, NewMember, NewWaitlistApplication,
    PaymentStatus, RegistrationStatus, WaitlistApplication, WaitlistStatus,
};
use crate::traits::{ConversionStore, ConversionUnit, RegistrationStore, WaitlistStore};

/// Waitlist applications and club members behind one lock, standing in for
/// the Postgres tables including `UNIQUE (club_id, email)` on members.
#[derive(Default)]
pub struct InMemoryWaitlistStore {
    applications: Mutex<HashMap<Uuid, WaitlistApplication>>,
    members: Mutex<HashMap<Uuid, Member>>,
    row_lock: Arc<tokio::sync::Mutex<()>>,
    /// Number of upcoming `mark_converted` calls that fail with a store error
    pub fail_mark_converted: AtomicUsize,
    /// Identifier handed to the next created member instead of a random one
    pub next_member_id: Mutex<Option<Uuid>>,
    /// Make `create_member` answer with no member
    pub return_no_member: Mutex<bool>,
    create_calls: AtomicUsize,
}

impl InMemoryWaitlistStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, application: WaitlistApplication) {
        self.applications
            .lock()
            .unwrap()
            .insert(application.application_id, application);
    }

    pub fn seed_member(&self, member: Member) {
        self.members.lock().unwrap().insert(member.member_id, member);
    }

    pub fn snapshot(&self, application_id: Uuid) -> Option<WaitlistApplication> {
        self.applications
            .lock()
            .unwrap()
            .get(&application_id)
            .cloned()
    }

    pub fn member_count(&self) -> usize {
        self.members.lock().unwrap().len()
    }

    pub fn member(&self, member_id: Uuid) -> Option<Member> {
        self.members.lock().unwrap().get(&member_id).cloned()
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WaitlistStore for InMemoryWaitlistStore {
    async fn list_by_club(&self, club_id: Uuid) -> Result<Vec<WaitlistApplication>> {
        let mut applications: Vec<_> = self
            .applications
            .lock()
            .unwrap()
            .values()
            .filter(|a| a.club_id == club_id)
            .cloned()
            .collect();
        applications.sort_by(|a, b| {
            a.position
                .cmp(&b.position)
                .then(a.created_at.cmp(&b.created_at))
        });
        Ok(applications)
    }

    async fn get_by_id(&self, application_id: Uuid) -> Result<Option<WaitlistApplication>> {
        Ok(self.snapshot(application_id))
    }

    async fn max_position(&self, club_id: Uuid) -> Result<Option<i32>> {
        Ok(self
            .applications
            .lock()
            .unwrap()
            .values()
            .filter(|a| a.club_id == club_id)
            .map(|a| a.position)
            .max())
    }

    async fn insert(&self, application: &NewWaitlistApplication) -> Result<WaitlistApplication> {
        let now = Utc::now();
        let stored = WaitlistApplication {
            application_id: Uuid::new_v4(),
            club_id: application.club_id,
            email: application.email.clone(),
            first_name: application.first_name.clone(),
            last_name: application.last_name.clone(),
            phone: application.phone.clone(),
            payment_status: application.payment_status,
            payment_amount: application.payment_amount,
            position: application.position,
            status: WaitlistStatus::Pending,
            approved_at: None,
            converted_member_id: None,
            created_at: now,
            updated_at: now,
        };
        self.seed(stored.clone());
        Ok(stored)
    }

    async fn update_position(
        &self,
        club_id: Uuid,
        application_id: Uuid,
        position: i32,
    ) -> Result<bool> {
        let mut applications = self.applications.lock().unwrap();
        match applications.get_mut(&application_id) {
            Some(a) if a.club_id == club_id => {
                a.position = position;
                a.updated_at = Utc::now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn update_status(
        &self,
        application_id: Uuid,
        from: WaitlistStatus,
        to: WaitlistStatus,
    ) -> Result<bool> {
        let mut applications = self.applications.lock().unwrap();
        match applications.get_mut(&application_id) {
            Some(a) if a.status == from => {
                a.status = to;
                a.updated_at = Utc::now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn update_payment_status(
        &self,
        application_id: Uuid,
        payment_status: PaymentStatus,
    ) -> Result<WaitlistApplication> {
        let mut applications = self.applications.lock().unwrap();
        let application = applications
            .get_mut(&application_id)
            .ok_or(StorageError::NotFound)?;
        application.payment_status = payment_status;
        application.updated_at = Utc::now();
        Ok(application.clone())
    }

    async fn delete(&self, application_id: Uuid) -> Result<()> {
        self.applications
            .lock()
            .unwrap()
            .remove(&application_id)
            .map(|_| ())
            .ok_or(StorageError::NotFound)
    }
}

#[async_trait]
impl ConversionStore for InMemoryWaitlistStore {
    async fn begin(&self) -> Result<Box<dyn ConversionUnit + '_>> {
        Ok(Box::new(InMemoryConversionUnit {
            store: self,
            guard: None,
            staged_member: None,
            staged_conversion: None,
        }))
    }
}

/// Buffers writes until commit; holds the store-wide row lock once an
/// application has been locked.
struct InMemoryConversionUnit<'a> {
    store: &'a InMemoryWaitlistStore,
    guard: Option<tokio::sync::OwnedMutexGuard<()>>,
    staged_member: Option<Member>,
    staged_conversion: Option<(Uuid, Uuid, DateTime<Utc>)>,
}

#[async_trait]
impl ConversionUnit for InMemoryConversionUnit<'_> {
    async fn lock_application(
        &mut self,
        application_id: Uuid,
    ) -> Result<Option<WaitlistApplication>> {
        if self.guard.is_none() {
            self.guard = Some(self.store.row_lock.clone().lock_owned().await);
        }
        Ok(self.store.snapshot(application_id))
    }

    async fn create_member(&mut self, member: &NewMember) -> Result<Option<Member>> {
        self.store.create_calls.fetch_add(1, Ordering::SeqCst);
        // Let a concurrent conversion run up to its own lock
        tokio::task::yield_now().await;

        if *self.store.return_no_member.lock().unwrap() {
            return Ok(None);
        }

        let email_taken = self
            .store
            .members
            .lock()
            .unwrap()
            .values()
            .any(|m| m.club_id == member.club_id && m.email == member.email);
        if email_taken {
            return Ok(None);
        }

        let member_id = self
            .store
            .next_member_id
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(Uuid::new_v4);

        let created = Member {
            member_id,
            club_id: member.club_id,
            first_name: member.first_name.clone(),
            last_name: member.last_name.clone(),
            email: member.email.clone(),
            phone: member.phone.clone(),
            member_type: member.member_type,
            membership_start_date: member.membership_start_date,
            created_at: Utc::now(),
        };
        self.staged_member = Some(created.clone());
        Ok(Some(created))
    }

    async fn mark_converted(
        &mut self,
        application_id: Uuid,
        member_id: Uuid,
        approved_at: DateTime<Utc>,
    ) -> Result<bool> {
        if self
            .store
            .fail_mark_converted
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err(StorageError::Database(sqlx::Error::PoolTimedOut));
        }

        let convertible = self.store.snapshot(application_id).is_some_and(|a| {
            a.converted_member_id.is_none() && a.status == WaitlistStatus::Pending
        });
        if convertible {
            self.staged_conversion = Some((application_id, member_id, approved_at));
        }
        Ok(convertible)
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        if let Some(member) = self.staged_member {
            self.store.seed_member(member);
        }
        if let Some((application_id, member_id, approved_at)) = self.staged_conversion {
            let mut applications = self.store.applications.lock().unwrap();
            if let Some(application) = applications.get_mut(&application_id) {
                application.status = WaitlistStatus::Approved;
                application.converted_member_id = Some(member_id);
                application.approved_at = Some(approved_at);
                application.updated_at = Utc::now();
            }
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryRegistrationStore {
    rows: Mutex<Vec<EventRegistrationRow>>,
}

impl InMemoryRegistrationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a row as stored, status text unchecked
    pub fn seed(&self, event_id: Uuid, member_id: Uuid, status: &str) -> EventRegistrationRow {
        let row = EventRegistrationRow {
            registration_id: Uuid::new_v4(),
            event_id,
            member_id,
            status: status.to_string(),
            registration_date: Utc::now(),
            payment_status: PaymentStatus::Pending.as_str().to_string(),
            payment_amount: Decimal::ZERO,
        };
        self.rows.lock().unwrap().push(row.clone());
        row
    }

    pub fn stored_status(&self, event_id: Uuid, member_id: Uuid) -> Option<String> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.event_id == event_id && r.member_id == member_id)
            .map(|r| r.status.clone())
    }
}

#[async_trait]
impl RegistrationStore for InMemoryRegistrationStore {
    async fn list_rows_by_event(&self, event_id: Uuid) -> Result<Vec<EventRegistrationRow>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.event_id == event_id)
            .cloned()
            .collect())
    }

    async fn find_row(
        &self,
        event_id: Uuid,
        member_id: Uuid,
    ) -> Result<Option<EventRegistrationRow>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.event_id == event_id && r.member_id == member_id)
            .cloned())
    }

    async fn upsert_status(
        &self,
        event_id: Uuid,
        member_id: Uuid,
        status: RegistrationStatus,
    ) -> Result<EventRegistration> {
        let existing = {
            let mut rows = self.rows.lock().unwrap();
            rows.iter_mut()
                .find(|r| r.event_id == event_id && r.member_id == member_id)
                .map(|r| {
                    r.status = status.as_str().to_string();
                    r.clone()
                })
        };
        let row = match existing {
            Some(row) => row,
            None => self.seed(event_id, member_id, status.as_str()),
        };
        EventRegistration::try_from(row)
    }

    async fn update_status(
        &self,
        event_id: Uuid,
        member_id: Uuid,
        status: RegistrationStatus,
    ) -> Result<EventRegistration> {
        let row = {
            let mut rows = self.rows.lock().unwrap();
            let row = rows
                .iter_mut()
                .find(|r| r.event_id == event_id && r.member_id == member_id)
                .ok_or(StorageError::NotFound)?;
            row.status = status.as_str().to_string();
            row.clone()
        };
        EventRegistration::try_from(row)
    }
}
