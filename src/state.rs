use crate::{
    config::{AppConfig, ReportSettings},
    db::{DbPool, OrmConn, orm_from_pool},
    services::status_rules::StatusPolicy,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub reports: ReportSettings,
    pub status_policy: StatusPolicy,
}

impl AppState {
    pub fn new(pool: DbPool, config: &AppConfig) -> Self {
        Self {
            orm: orm_from_pool(&pool),
            pool,
            reports: config.reports,
            status_policy: config.status_policy,
        }
    }

    /// State with default report settings and strict status transitions.
    pub fn with_defaults(pool: DbPool) -> Self {
        Self {
            orm: orm_from_pool(&pool),
            pool,
            reports: ReportSettings::default(),
            status_policy: StatusPolicy::Strict,
        }
    }
}
