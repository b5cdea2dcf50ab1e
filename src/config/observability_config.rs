//! Observability configuration parsing from environment variables.

use std::env;

/// Whether `GET /metrics` is exposed next to `/signal`.
#[derive(Debug, Clone)]
pub struct ObservabilityEnvConfig {
    pub enabled: bool,
}

impl Default for ObservabilityEnvConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl ObservabilityEnvConfig {
    pub fn from_env() -> Self {
        let enabled = env::var("OBSERVABILITY_ENABLED")
            .ok()
            .and_then(|raw| parse_flag(&raw))
            .unwrap_or(Self::default().enabled);
        Self { enabled }
    }
}

/// Accepts true/false, 1/0, yes/no and on/off. Anything else is unset.
fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observability_enabled_by_default() {
        assert!(ObservabilityEnvConfig::default().enabled);
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" off "), Some(false));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
