use anyhow::Result;
use std::env;

use crate::utils::parse_bool;

/// Config holds the Nautobot connection settings for one invocation
#[derive(Debug, Clone)]
pub struct Config {
    pub url: String,
    pub token: String,
    pub validate_certs: bool,
    pub api_version: Option<String>,
    pub timeout_secs: u64,
}

/// Connection values supplied on the command line; `None` keeps the
/// environment value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub url: Option<String>,
    pub token: Option<String>,
    pub no_verify_tls: bool,
    pub api_version: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn load() -> Self {
        Self {
            url: get_env("NAUTOBOT_URL", ""),
            token: get_env("NAUTOBOT_TOKEN", ""),
            validate_certs: parse_bool(&get_env("NAUTOBOT_VALIDATE_CERTS", "true")).unwrap_or(true),
            api_version: env::var("NAUTOBOT_API_VERSION").ok().filter(|v| !v.is_empty()),
            timeout_secs: get_env("NAUTOBOT_TIMEOUT", "30")
                .parse()
                .unwrap_or(30),
        }
    }

    /// Apply command-line values on top of the loaded configuration
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(url) = overrides.url {
            self.url = url;
        }
        if let Some(token) = overrides.token {
            self.token = token;
        }
        if overrides.no_verify_tls {
            self.validate_certs = false;
        }
        if overrides.api_version.is_some() {
            self.api_version = overrides.api_version;
        }
        if let Some(timeout) = overrides.timeout_secs {
            self.timeout_secs = timeout;
        }
        self
    }

    /// Reject configurations that cannot reach Nautobot
    pub fn validate(&self) -> Result<()> {
        if self.url.is_empty() {
            anyhow::bail!("Nautobot URL not configured (set --url or NAUTOBOT_URL)");
        }
        if self.token.is_empty() {
            anyhow::bail!("Nautobot token not configured (set --token or NAUTOBOT_TOKEN)");
        }
        Ok(())
    }
}

fn get_env(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Config {
        Config {
            url: "https://env.example".to_string(),
            token: "env-token".to_string(),
            validate_certs: true,
            api_version: None,
            timeout_secs: 30,
        }
    }

    #[test]
    fn test_overrides_take_precedence() {
        let cfg = base().with_overrides(Overrides {
            url: Some("https://cli.example".to_string()),
            token: None,
            no_verify_tls: true,
            api_version: Some("2.2".to_string()),
            timeout_secs: Some(5),
        });
        assert_eq!(cfg.url, "https://cli.example");
        assert_eq!(cfg.token, "env-token");
        assert!(!cfg.validate_certs);
        assert_eq!(cfg.api_version.as_deref(), Some("2.2"));
        assert_eq!(cfg.timeout_secs, 5);
    }

    #[test]
    fn test_default_overrides_keep_env() {
        let cfg = base().with_overrides(Overrides::default());
        assert_eq!(cfg.url, "https://env.example");
        assert!(cfg.validate_certs);
    }

    #[test]
    fn test_validate() {
        assert!(base().validate().is_ok());

        let mut cfg = base();
        cfg.token.clear();
        let err = cfg.validate().unwrap_err().to_string();
        assert!(err.contains("token"));

        let mut cfg = base();
        cfg.url.clear();
        assert!(cfg.validate().is_err());
    }
}
