use anyhow::{Context, Result};
use storage::models::MemberType;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub default_member_type: MemberType,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: std::env::var("HOST").context("Cannot load HOST env variable")?,
            port: std::env::var("PORT")
                .context("Cannot load PORT env variable")?
                .parse()
                .context("PORT must be a number")?,
            database_url: std::env::var("DATABASE_URL")
                .context("Cannot load DATABASE_URL env variable")?,
            default_member_type: parse_member_type(std::env::var("DEFAULT_MEMBER_TYPE").ok())?,
        })
    }
}

fn parse_member_type(raw: Option<String>) -> Result<MemberType> {
    match raw {
        Some(value) if !value.trim().is_empty() => value
            .parse()
            .with_context(|| format!("DEFAULT_MEMBER_TYPE '{}' is not a known member type", value)),
        _ => Ok(MemberType::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_type_defaults_when_unset() {
        assert_eq!(parse_member_type(None).unwrap(), MemberType::Regular);
        assert_eq!(parse_member_type(Some("  ".to_string())).unwrap(), MemberType::Regular);
    }

    #[test]
    fn test_member_type_from_env_value() {
        assert_eq!(
            parse_member_type(Some("family".to_string())).unwrap(),
            MemberType::Family
        );
        assert!(parse_member_type(Some("platinum".to_string())).is_err());
    }
}
