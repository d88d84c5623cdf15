//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories) expose typed errors so adapters map their
//! failures into predictable variants. Driving ports (use-cases) speak the
//! domain [`Error`](crate::domain::Error) and each ships a fixture used when
//! no database is configured.

mod macros;
pub(crate) use macros::define_port_error;

mod account_repository;
mod accounts_command;
mod accounts_query;
mod csv_import_command;
mod dashboard_query;
mod field_repository;
mod fields_command;
mod fields_query;
mod login_service;
mod track_point_repository;

#[cfg(test)]
pub use account_repository::MockAccountRepository;
pub use account_repository::{AccountRepository, AccountRepositoryError};
#[cfg(test)]
pub use accounts_command::MockAccountsCommand;
pub use accounts_command::{AccountsCommand, FixtureAccountsCommand};
#[cfg(test)]
pub use accounts_query::MockAccountsQuery;
pub use accounts_query::{AccountsQuery, FixtureAccountsQuery};
#[cfg(test)]
pub use csv_import_command::MockCsvImportCommand;
pub use csv_import_command::{CsvImportCommand, CsvUpload, FixtureCsvImportCommand};
#[cfg(test)]
pub use dashboard_query::MockDashboardQuery;
pub use dashboard_query::{DashboardQuery, DashboardTotals, FixtureDashboardQuery};
#[cfg(test)]
pub use field_repository::MockFieldRepository;
pub use field_repository::{FieldRepository, FieldRepositoryError, FixtureFieldRepository};
#[cfg(test)]
pub use fields_command::MockFieldsCommand;
pub use fields_command::{FieldsCommand, FixtureFieldsCommand};
#[cfg(test)]
pub use fields_query::MockFieldsQuery;
pub use fields_query::{FieldsQuery, FixtureFieldsQuery};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{FixtureLoginService, LoginService};
#[cfg(test)]
pub use track_point_repository::MockTrackPointRepository;
pub use track_point_repository::{
    FixtureTrackPointRepository, TrackFilter, TrackPointRepository, TrackPointRepositoryError,
};
