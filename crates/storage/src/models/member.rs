use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::StorageError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MemberType {
    #[default]
    Regular,
    Student,
    Family,
    Honorary,
}

impl MemberType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Student => "student",
            Self::Family => "family",
            Self::Honorary => "honorary",
        }
    }

    fn parse_str(s: &str) -> Result<Self, StorageError> {
        match s.trim().to_lowercase().as_str() {
            "regular" => Ok(Self::Regular),
            "student" => Ok(Self::Student),
            "family" => Ok(Self::Family),
            "honorary" => Ok(Self::Honorary),
            _ => Err(StorageError::InvalidRow(format!("unknown member type '{}'", s))),
        }
    }
}

impl TryFrom<&str> for MemberType {
    type Error = StorageError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse_str(value)
    }
}

impl std::str::FromStr for MemberType {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for MemberType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Member {
    pub member_id: Uuid,
    pub club_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub member_type: MemberType,
    pub membership_start_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct MemberRow {
    pub member_id: Uuid,
    pub club_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub member_type: String,
    pub membership_start_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<MemberRow> for Member {
    type Error = StorageError;

    fn try_from(row: MemberRow) -> Result<Self, Self::Error> {
        Ok(Self {
            member_id: row.member_id,
            club_id: row.club_id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            member_type: row.member_type.parse()?,
            membership_start_date: row.membership_start_date,
            created_at: row.created_at,
        })
    }
}

/// Fields for a member record about to be created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
    pub club_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub member_type: MemberType,
    pub membership_start_date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_type_parsing_is_lenient_on_case() {
        assert_eq!("Student".parse::<MemberType>().unwrap(), MemberType::Student);
        assert_eq!(" regular ".parse::<MemberType>().unwrap(), MemberType::Regular);
        assert!("gold".parse::<MemberType>().is_err());
    }

    #[test]
    fn test_default_member_type() {
        assert_eq!(MemberType::default(), MemberType::Regular);
    }
}
