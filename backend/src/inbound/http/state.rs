//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see driving ports, so
//! they stay testable without a database.

use std::sync::Arc;

use crate::domain::ports::{
    AccountsCommand, AccountsQuery, CsvImportCommand, DashboardQuery, FieldsCommand, FieldsQuery,
    FixtureAccountsCommand, FixtureAccountsQuery, FixtureCsvImportCommand, FixtureDashboardQuery,
    FixtureFieldsCommand, FixtureFieldsQuery, FixtureLoginService, LoginService,
};

/// Default upload size limit: 16 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub accounts: Arc<dyn AccountsCommand>,
    pub accounts_query: Arc<dyn AccountsQuery>,
    pub imports: Arc<dyn CsvImportCommand>,
    pub fields: Arc<dyn FieldsCommand>,
    pub fields_query: Arc<dyn FieldsQuery>,
    pub dashboard: Arc<dyn DashboardQuery>,
    /// Largest accepted CSV upload, in bytes.
    pub max_upload_bytes: usize,
}

impl HttpState {
    /// State backed entirely by fixture ports, for running without a
    /// database and as a starting point in tests.
    ///
    /// ```
    /// use std::sync::Arc;
    ///
    /// use fieldtrack::domain::ports::FixtureDashboardQuery;
    /// use fieldtrack::inbound::http::state::HttpState;
    ///
    /// let state = HttpState {
    ///     dashboard: Arc::new(FixtureDashboardQuery),
    ///     ..HttpState::fixtures()
    /// };
    /// assert_eq!(state.max_upload_bytes, 16 * 1024 * 1024);
    /// ```
    pub fn fixtures() -> Self {
        Self {
            login: Arc::new(FixtureLoginService),
            accounts: Arc::new(FixtureAccountsCommand),
            accounts_query: Arc::new(FixtureAccountsQuery),
            imports: Arc::new(FixtureCsvImportCommand),
            fields: Arc::new(FixtureFieldsCommand),
            fields_query: Arc::new(FixtureFieldsQuery),
            dashboard: Arc::new(FixtureDashboardQuery),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    /// Override the upload size limit.
    #[must_use]
    pub fn with_max_upload_bytes(mut self, limit: usize) -> Self {
        self.max_upload_bytes = limit;
        self
    }
}
