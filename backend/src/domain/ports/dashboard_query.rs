//! Driving port for the administrator dashboard.

use async_trait::async_trait;

use crate::domain::Error;

/// Headline counts shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardTotals {
    pub total_users: i64,
    pub total_fields: i64,
    pub total_tracks: i64,
}

/// Domain use-case port for dashboard statistics.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DashboardQuery: Send + Sync {
    async fn totals(&self) -> Result<DashboardTotals, Error>;
}

/// Fixture query reporting an empty system.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureDashboardQuery;

#[async_trait]
impl DashboardQuery for FixtureDashboardQuery {
    async fn totals(&self) -> Result<DashboardTotals, Error> {
        Ok(DashboardTotals::default())
    }
}
