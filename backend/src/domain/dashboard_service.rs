//! Dashboard statistics service implementing [`DashboardQuery`].

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::ports::{
    AccountRepository, DashboardQuery, DashboardTotals, FieldRepository, TrackPointRepository,
};

/// Counts accounts, fields and track points.
#[derive(Clone)]
pub struct DashboardService<A, F, T> {
    accounts: Arc<A>,
    fields: Arc<F>,
    tracks: Arc<T>,
}

impl<A, F, T> DashboardService<A, F, T> {
    pub fn new(accounts: Arc<A>, fields: Arc<F>, tracks: Arc<T>) -> Self {
        Self {
            accounts,
            fields,
            tracks,
        }
    }
}

fn unavailable(error: impl std::fmt::Display) -> Error {
    Error::service_unavailable(format!("dashboard statistics unavailable: {error}"))
}

#[async_trait]
impl<A, F, T> DashboardQuery for DashboardService<A, F, T>
where
    A: AccountRepository,
    F: FieldRepository,
    T: TrackPointRepository,
{
    async fn totals(&self) -> Result<DashboardTotals, Error> {
        let total_users = self.accounts.count().await.map_err(unavailable)?;
        let total_fields = self.fields.count().await.map_err(unavailable)?;
        let total_tracks = self.tracks.count().await.map_err(unavailable)?;
        Ok(DashboardTotals {
            total_users,
            total_fields,
            total_tracks,
        })
    }
}
