use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::{config::ReportSettings, dto::reports::InventoryFilter};

pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;
pub const DEFAULT_LOW_STOCK_THRESHOLD: i32 = 10;

fn clamp_limit(limit: Option<u32>, default: u32) -> u32 {
    limit.unwrap_or(default).clamp(1, MAX_LIMIT)
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LimitQuery {
    pub limit: Option<u32>,
}

impl LimitQuery {
    pub fn resolve(&self) -> u32 {
        clamp_limit(self.limit, DEFAULT_LIMIT)
    }
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TopSpendersQuery {
    /// Lookback window in months, 1 to 24.
    pub months: Option<u32>,
    pub limit: Option<u32>,
}

impl TopSpendersQuery {
    /// `(months, limit)` with server defaults filled in.
    pub fn resolve(&self, defaults: ReportSettings) -> (u32, u32) {
        let months = self.months.unwrap_or(defaults.top_spenders_months).clamp(1, 24);
        let limit = clamp_limit(self.limit, defaults.top_spenders_limit);
        (months, limit)
    }
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SalesStatisticsQuery {
    /// Lookback window in months, 1 to 12.
    pub months: Option<u32>,
    pub limit: Option<u32>,
}

impl SalesStatisticsQuery {
    pub fn resolve(&self) -> (u32, u32) {
        let months = self.months.unwrap_or(6).clamp(1, 12);
        (months, clamp_limit(self.limit, DEFAULT_LIMIT))
    }
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ThresholdQuery {
    pub threshold: Option<i32>,
}

impl ThresholdQuery {
    pub fn resolve(&self) -> i32 {
        self.threshold.unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD).max(0)
    }
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InventoryStatsQuery {
    pub filter: Option<InventoryFilter>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_spenders_uses_configured_defaults() {
        let defaults = ReportSettings {
            top_spenders_months: 12,
            top_spenders_limit: 5,
        };
        assert_eq!(TopSpendersQuery::default().resolve(defaults), (12, 5));
    }

    #[test]
    fn top_spenders_clamps_out_of_range_values() {
        let query = TopSpendersQuery {
            months: Some(100),
            limit: Some(0),
        };
        assert_eq!(query.resolve(ReportSettings::default()), (24, 1));
    }

    #[test]
    fn sales_statistics_window_is_one_to_twelve_months() {
        assert_eq!(SalesStatisticsQuery::default().resolve(), (6, 10));
        let query = SalesStatisticsQuery {
            months: Some(0),
            limit: Some(500),
        };
        assert_eq!(query.resolve(), (1, 100));
        let query = SalesStatisticsQuery {
            months: Some(40),
            limit: None,
        };
        assert_eq!(query.resolve(), (12, 10));
    }

    #[test]
    fn threshold_defaults_to_ten_and_never_goes_negative() {
        assert_eq!(ThresholdQuery::default().resolve(), 10);
        assert_eq!(ThresholdQuery { threshold: Some(-3) }.resolve(), 0);
    }
}
