//! Configuration validation logic.

use std::path::{Component, Path};
use std::sync::LazyLock;

use regex::Regex;

use crate::config::loader::Config;
use crate::config::settings::LimitSetting;
use crate::download::QuotaLimits;
use crate::error::{Error, Result};

/// Multireddit owners and names: 3-21 chars, alphanumeric, hyphens, underscores.
static REDDIT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]{3,21}$").expect("valid regex"));

/// Validate the entire configuration and return the parsed quotas.
///
/// Runs before any network activity; every failure here aborts the run.
pub fn validate_config(config: &Config) -> Result<QuotaLimits> {
    let albums = parse_limit("album_limit", config.download.album_limit.as_ref())?;
    let standalones = parse_limit("standalone_limit", config.download.standalone_limit.as_ref())?;

    validate_credential("reddit.app_id", &config.reddit.app_id)?;
    validate_credential("reddit.secret", &config.reddit.secret)?;
    validate_credential("imgur.app_id", &config.imgur.app_id)?;
    validate_credential("imgur.secret", &config.imgur.secret)?;

    if config.reddit.user_agent.trim().is_empty() {
        return Err(Error::MissingConfig("reddit.user_agent".to_string()));
    }

    validate_reddit_name("reddit.multireddit_owner", &config.reddit.multireddit_owner)?;
    validate_reddit_name("reddit.multireddit_name", &config.reddit.multireddit_name)?;

    validate_subdirectory("standalone_path", &config.download.standalone_path)?;
    validate_subdirectory("album_path", &config.download.album_path)?;

    if config.download.standalone_path.trim_matches('/')
        == config.download.album_path.trim_matches('/')
    {
        return Err(Error::ConfigValidation {
            field: "album_path".to_string(),
            message: "Album and standalone paths must differ".to_string(),
        });
    }

    if config.download.credit_poll_seconds == 0 {
        return Err(Error::ConfigValidation {
            field: "credit_poll_seconds".to_string(),
            message: "Must be greater than zero".to_string(),
        });
    }

    Ok(QuotaLimits {
        albums,
        standalones,
    })
}

/// Parse a quota into a count. Absent, negative, and non-numeric values are rejected.
pub fn parse_limit(field: &str, value: Option<&LimitSetting>) -> Result<u32> {
    let Some(value) = value else {
        return Err(Error::MissingConfig(field.to_string()));
    };

    let invalid = || Error::ConfigValidation {
        field: field.to_string(),
        message: format!("'{}' is not a non-negative whole number", value),
    };

    match value {
        LimitSetting::Number(n) => u32::try_from(*n).map_err(|_| invalid()),
        LimitSetting::Text(s) => {
            let s = s.trim();
            if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
                return Err(invalid());
            }
            s.parse::<u32>().map_err(|_| invalid())
        }
    }
}

/// Validate an API credential.
pub fn validate_credential(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::MissingConfig(field.to_string()));
    }

    // Check for placeholder values
    let lower = value.to_lowercase();
    if lower.contains("replaceme") || lower.starts_with("your_") {
        return Err(Error::ConfigValidation {
            field: field.to_string(),
            message: "Value appears to be a placeholder. Please provide your actual credentials."
                .to_string(),
        });
    }

    Ok(())
}

fn validate_reddit_name(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::MissingConfig(field.to_string()));
    }

    if !REDDIT_NAME.is_match(value) {
        return Err(Error::ConfigValidation {
            field: field.to_string(),
            message: format!(
                "'{}' must be 3-21 characters of letters, digits, hyphens or underscores",
                value
            ),
        });
    }

    Ok(())
}

fn validate_subdirectory(field: &str, value: &str) -> Result<()> {
    let value = value.trim_matches('/');
    let mut components = Path::new(value).components();

    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(Error::ConfigValidation {
            field: field.to_string(),
            message: format!("'{}' must be a single relative directory name", value),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        let mut config = Config::default();
        config.download.album_limit = Some(LimitSetting::Number(3));
        config.download.standalone_limit = Some(LimitSetting::Text("12".into()));
        config.reddit.app_id = "reddit-app".into();
        config.reddit.secret = "reddit-secret".into();
        config.reddit.multireddit_owner = "wallpaper_fan".into();
        config.reddit.multireddit_name = "walls".into();
        config.imgur.app_id = "imgur-app".into();
        config.imgur.secret = "imgur-secret".into();
        config
    }

    #[test]
    fn test_valid_config() {
        let limits = validate_config(&valid_config()).unwrap();
        assert_eq!(limits.albums, 3);
        assert_eq!(limits.standalones, 12);
    }

    #[test]
    fn test_non_numeric_limit_rejected() {
        let mut config = valid_config();
        config.download.album_limit = Some(LimitSetting::Text("five".into()));

        match validate_config(&config) {
            Err(Error::ConfigValidation { field, .. }) => assert_eq!(field, "album_limit"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_missing_limit_rejected() {
        let mut config = valid_config();
        config.download.standalone_limit = None;
        assert!(matches!(
            validate_config(&config),
            Err(Error::MissingConfig(field)) if field == "standalone_limit"
        ));
    }

    #[test]
    fn test_parse_limit() {
        assert_eq!(parse_limit("x", Some(&LimitSetting::Text(" 7 ".into()))).unwrap(), 7);
        assert_eq!(parse_limit("x", Some(&LimitSetting::Number(0))).unwrap(), 0);
        assert!(parse_limit("x", Some(&LimitSetting::Number(-1))).is_err());
        assert!(parse_limit("x", Some(&LimitSetting::Text("-1".into()))).is_err());
        assert!(parse_limit("x", Some(&LimitSetting::Text("1.5".into()))).is_err());
        assert!(parse_limit("x", Some(&LimitSetting::Text("".into()))).is_err());
    }

    #[test]
    fn test_placeholder_credentials_rejected() {
        let mut config = valid_config();
        config.imgur.secret = "REPLACEME".into();
        assert!(validate_config(&config).is_err());

        let mut config = valid_config();
        config.reddit.app_id = String::new();
        assert!(matches!(
            validate_config(&config),
            Err(Error::MissingConfig(_))
        ));
    }

    #[test]
    fn test_subdirectories() {
        let mut config = valid_config();
        config.download.album_path = "../albums".into();
        assert!(validate_config(&config).is_err());

        let mut config = valid_config();
        config.download.album_path = "images".into();
        assert!(validate_config(&config).is_err());

        let mut config = valid_config();
        config.download.album_path = "albums/".into();
        assert!(validate_config(&config).is_ok());

        let mut config = valid_config();
        config.download.standalone_path = "images".into();
        config.download.album_path = "images/".into();
        assert!(matches!(
            validate_config(&config),
            Err(Error::ConfigValidation { .. })
        ));
    }

    #[test]
    fn test_multireddit_name() {
        let mut config = valid_config();
        config.reddit.multireddit_name = "bad name!".into();
        assert!(validate_config(&config).is_err());
    }
}
