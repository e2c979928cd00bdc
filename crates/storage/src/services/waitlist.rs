use rust_decimal::Decimal;
use uuid::Uuid;

use crate::dto::waitlist::CreateWaitlistApplicationRequest;
use crate::error::{Result, StorageError};
use crate::models::{NewWaitlistApplication, PaymentStatus, WaitlistApplication, WaitlistStatus};
use crate::traits::WaitlistStore;

/// Position for the next application of a club, given the highest one in use.
///
/// Read-then-write: two concurrent inserts can observe the same maximum and
/// end up sharing a position until the club is reordered.
pub fn next_position(current_max: Option<i32>) -> i32 {
    current_max.map_or(0, |max| max + 1)
}

/// Applications of a club, front of the queue first
pub async fn list_applications<S>(store: &S, club_id: Uuid) -> Result<Vec<WaitlistApplication>>
where
    S: WaitlistStore + ?Sized,
{
    store.list_by_club(club_id).await
}

/// Put a new application on a club's waitlist.
///
/// An explicit `position` in the request is used as is; the caller is then
/// responsible for not colliding with an existing one.
pub async fn create_application<S>(
    store: &S,
    club_id: Uuid,
    request: &CreateWaitlistApplicationRequest,
) -> Result<WaitlistApplication>
where
    S: WaitlistStore + ?Sized,
{
    let position = match request.position {
        Some(position) => position,
        None => next_position(store.max_position(club_id).await?),
    };

    let application = NewWaitlistApplication {
        club_id,
        email: request.email.trim().to_string(),
        first_name: request.first_name.trim().to_string(),
        last_name: request.last_name.trim().to_string(),
        phone: request.phone.clone(),
        payment_status: request.payment_status.unwrap_or_default(),
        payment_amount: request.payment_amount.unwrap_or(Decimal::ZERO),
        position,
    };

    let created = store.insert(&application).await?;

    tracing::info!(
        %club_id,
        application_id = %created.application_id,
        position = created.position,
        "Waitlist application created"
    );

    Ok(created)
}

/// Rewrite positions so that `ordered_ids[i]` sits at position `i`.
///
/// One write per id, not atomic. Ids that are unknown or belong to another
/// club are skipped, and an empty list changes nothing.
pub async fn reorder<S>(store: &S, club_id: Uuid, ordered_ids: &[Uuid]) -> Result<()>
where
    S: WaitlistStore + ?Sized,
{
    for (index, application_id) in ordered_ids.iter().enumerate() {
        let position = i32::try_from(index).map_err(|_| {
            StorageError::ConstraintViolation("Too many applications to reorder".to_string())
        })?;

        if !store
            .update_position(club_id, *application_id, position)
            .await?
        {
            tracing::debug!(
                %club_id,
                %application_id,
                "Skipping application that is not in this club"
            );
        }
    }

    tracing::info!(%club_id, count = ordered_ids.len(), "Waitlist reordered");

    Ok(())
}

/// Delete an application. Remaining positions are left untouched.
pub async fn remove<S>(store: &S, application_id: Uuid) -> Result<()>
where
    S: WaitlistStore + ?Sized,
{
    store.delete(application_id).await?;
    tracing::info!(%application_id, "Waitlist application removed");
    Ok(())
}

pub async fn reject_application<S>(store: &S, application_id: Uuid) -> Result<WaitlistApplication>
where
    S: WaitlistStore + ?Sized,
{
    let application = store
        .get_by_id(application_id)
        .await?
        .ok_or(StorageError::NotFound)?;

    if application.status.is_terminal() {
        return Err(StorageError::InvalidTransition(format!(
            "cannot reject an application that is {}",
            application.status
        )));
    }

    if !store
        .update_status(application_id, WaitlistStatus::Pending, WaitlistStatus::Rejected)
        .await?
    {
        return Err(StorageError::InvalidTransition(
            "application is no longer pending".to_string(),
        ));
    }

    tracing::info!(%application_id, "Waitlist application rejected");

    store
        .get_by_id(application_id)
        .await?
        .ok_or(StorageError::NotFound)
}

pub async fn update_payment_status<S>(
    store: &S,
    application_id: Uuid,
    payment_status: PaymentStatus,
) -> Result<WaitlistApplication>
where
    S: WaitlistStore + ?Sized,
{
    store
        .update_payment_status(application_id, payment_status)
        .await
}
