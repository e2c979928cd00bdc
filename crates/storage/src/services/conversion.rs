use chrono::Utc;
use uuid::Uuid;

use crate::dto::waitlist::ConversionResponse;
use crate::error::{Result, StorageError};
use crate::models::{MemberType, NewMember, WaitlistApplication, WaitlistStatus};
use crate::traits::ConversionStore;

/// Turn a pending waitlist application into a club member, at most once.
///
/// Everything happens inside one conversion unit. The application row is
/// locked first, so a concurrent caller waits and then sees it converted. The
/// member insert and the approval commit together: any error drops the unit
/// and rolls both back, which leaves the application convertible.
pub async fn convert_to_member<S>(
    store: &S,
    application_id: Uuid,
    member_type: MemberType,
) -> Result<ConversionResponse>
where
    S: ConversionStore + ?Sized,
{
    let mut unit = store.begin().await?;

    let application = unit
        .lock_application(application_id)
        .await?
        .ok_or(StorageError::NotFound)?;

    ensure_convertible(&application)?;

    let new_member = NewMember {
        club_id: application.club_id,
        first_name: application.first_name.clone(),
        last_name: application.last_name.clone(),
        email: application.email.clone(),
        phone: application.phone.clone(),
        member_type,
        membership_start_date: Utc::now().date_naive(),
    };

    let member = unit
        .create_member(&new_member)
        .await?
        .ok_or_else(|| {
            tracing::warn!(
                %application_id,
                club_id = %application.club_id,
                "Member store returned no member, email may already belong to this club"
            );
            StorageError::MemberCreationFailed
        })?;
    let member_id = member.member_id;

    let converted = unit
        .mark_converted(application_id, member_id, Utc::now())
        .await
        .inspect_err(|e| {
            tracing::warn!(
                %application_id,
                %member_id,
                error = %e,
                "Failed to record conversion, rolling back"
            );
        })?;
    if !converted {
        return Err(StorageError::AlreadyConverted);
    }

    unit.commit().await?;

    tracing::info!(
        %application_id,
        %member_id,
        club_id = %application.club_id,
        "Waitlist application converted to member"
    );

    Ok(ConversionResponse { member_id })
}

fn ensure_convertible(application: &WaitlistApplication) -> Result<()> {
    if application.is_converted() || application.status == WaitlistStatus::Approved {
        return Err(StorageError::AlreadyConverted);
    }
    if !application.status.is_terminal() {
        return Ok(());
    }

    match application.status {
        WaitlistStatus::Removed => Err(StorageError::NotFound),
        status => Err(StorageError::InvalidTransition(format!(
            "cannot convert an application that is {}",
            status
        ))),
    }
}
