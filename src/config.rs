use std::env;

use crate::services::status_rules::StatusPolicy;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub host: String,
    pub port: u16,
    pub reports: ReportSettings,
    pub status_policy: StatusPolicy,
}

/// Server-side defaults for reports whose window and size callers may omit.
#[derive(Debug, Clone, Copy)]
pub struct ReportSettings {
    pub top_spenders_months: u32,
    pub top_spenders_limit: u32,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            top_spenders_months: 3,
            top_spenders_limit: 10,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://electronics_store.sqlite".to_string());
        let max_connections = parse_env("DATABASE_MAX_CONNECTIONS").unwrap_or(5);
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = parse_env("APP_PORT").unwrap_or(3000);

        let defaults = ReportSettings::default();
        let reports = ReportSettings {
            top_spenders_months: parse_env("TOP_SPENDERS_MONTHS")
                .unwrap_or(defaults.top_spenders_months),
            top_spenders_limit: parse_env("TOP_SPENDERS_LIMIT")
                .unwrap_or(defaults.top_spenders_limit),
        };

        let status_policy = match env::var("ORDER_STATUS_POLICY") {
            Ok(raw) => raw.parse::<StatusPolicy>()?,
            Err(_) => StatusPolicy::Strict,
        };

        Ok(Self {
            port,
            database_url,
            max_connections,
            host,
            reports,
            status_policy,
        })
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    parse_value(env::var(key).ok())
}

fn parse_value<T: std::str::FromStr>(raw: Option<String>) -> Option<T> {
    raw.and_then(|v| v.trim().parse::<T>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_defaults_are_three_months_and_ten_rows() {
        let settings = ReportSettings::default();
        assert_eq!(settings.top_spenders_months, 3);
        assert_eq!(settings.top_spenders_limit, 10);
    }

    #[test]
    fn env_values_are_trimmed_and_garbage_ignored() {
        assert_eq!(parse_value::<u32>(Some("not-a-number".to_string())), None);
        assert_eq!(parse_value::<u32>(Some(" 42 ".to_string())), Some(42));
        assert_eq!(parse_value::<u32>(None), None);
    }
}
