use anyhow::{bail, Context, Result};

pub const DEFAULT_RESEND_API_URL: &str = "https://api.resend.com";
pub const DEFAULT_CONTACT_FROM: &str = "Portfolio Contact <onboarding@resend.dev>";
pub const DEFAULT_CONTACT_TO: &str = "portfolio@example.com";

/// Fixed envelope for every contact email: one sender, one or more recipients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mailbox {
    pub from: String,
    pub to: Vec<String>,
}

/// Application configuration loaded from environment variables.
/// Startup fails if the email provider key is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub resend_api_key: String,
    pub resend_api_url: String,
    pub mailbox: Mailbox,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. `from_env` passes the process
    /// environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let resend_api_key = lookup("RESEND_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .context("Required environment variable 'RESEND_API_KEY' is not set")?;

        let to: Vec<String> = lookup("CONTACT_TO")
            .unwrap_or_else(|| DEFAULT_CONTACT_TO.to_string())
            .split(',')
            .map(str::trim)
            .filter(|addr| !addr.is_empty())
            .map(str::to_string)
            .collect();
        if to.is_empty() {
            bail!("CONTACT_TO must list at least one recipient");
        }

        Ok(Config {
            resend_api_key,
            resend_api_url: lookup("RESEND_API_URL")
                .unwrap_or_else(|| DEFAULT_RESEND_API_URL.to_string()),
            mailbox: Mailbox {
                from: lookup("CONTACT_FROM").unwrap_or_else(|| DEFAULT_CONTACT_FROM.to_string()),
                to,
            },
            port: lookup("PORT")
                .unwrap_or_else(|| "3000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_with_only_api_key() {
        let config = Config::from_lookup(lookup(&[("RESEND_API_KEY", "re_test")])).unwrap();
        assert_eq!(config.resend_api_key, "re_test");
        assert_eq!(config.resend_api_url, DEFAULT_RESEND_API_URL);
        assert_eq!(config.mailbox.from, DEFAULT_CONTACT_FROM);
        assert_eq!(config.mailbox.to, vec![DEFAULT_CONTACT_TO.to_string()]);
        assert_eq!(config.port, 3000);
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_missing_api_key_fails_fast() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(err.to_string().contains("RESEND_API_KEY"));
    }

    #[test]
    fn test_blank_api_key_fails_fast() {
        assert!(Config::from_lookup(lookup(&[("RESEND_API_KEY", "  ")])).is_err());
    }

    #[test]
    fn test_recipient_list_is_split_and_trimmed() {
        let config = Config::from_lookup(lookup(&[
            ("RESEND_API_KEY", "re_test"),
            ("CONTACT_TO", "me@example.com, ops@example.com ,"),
        ]))
        .unwrap();
        assert_eq!(config.mailbox.to, vec!["me@example.com", "ops@example.com"]);
    }

    #[test]
    fn test_empty_recipient_list_is_rejected() {
        let result = Config::from_lookup(lookup(&[
            ("RESEND_API_KEY", "re_test"),
            ("CONTACT_TO", " , "),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let result = Config::from_lookup(lookup(&[
            ("RESEND_API_KEY", "re_test"),
            ("PORT", "eighty"),
        ]));
        assert!(result.is_err());
    }
}
