//! Builders for HTTP state ports.
//!
//! With a pool each driving port is backed by a domain service over Diesel
//! repositories; without one the fixture ports are used.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;

use fieldtrack::domain::ports::{
    AccountsCommand, AccountsQuery, CsvImportCommand, DashboardQuery, FieldsCommand, FieldsQuery,
    FixtureAccountsCommand, FixtureAccountsQuery, FixtureCsvImportCommand, FixtureDashboardQuery,
    FixtureFieldsCommand, FixtureFieldsQuery, FixtureLoginService, LoginService,
};
use fieldtrack::domain::{AccountService, CsvImportService, DashboardService, FieldTrackService};
use fieldtrack::inbound::http::state::HttpState;
use fieldtrack::outbound::persistence::{
    DbPool, DieselAccountRepository, DieselFieldRepository, DieselTrackPointRepository,
};

use super::ServerConfig;

/// Build a command/query service pair using the real service when a pool is
/// available, otherwise the fixtures.
fn build_service_pair<Pool, S, Cmd, Query, MakeService, Cast>(
    pool: &Option<Pool>,
    make_service: MakeService,
    fixtures: (Arc<Cmd>, Arc<Query>),
    cast: Cast,
) -> (Arc<Cmd>, Arc<Query>)
where
    S: 'static,
    Cmd: ?Sized + 'static,
    Query: ?Sized + 'static,
    MakeService: FnOnce(&Pool) -> S,
    Cast: FnOnce(Arc<S>) -> (Arc<Cmd>, Arc<Query>),
{
    match pool {
        Some(pool) => cast(Arc::new(make_service(pool))),
        None => fixtures,
    }
}

/// Ports implemented by [`AccountService`].
struct AccountPorts {
    login: Arc<dyn LoginService>,
    accounts: Arc<dyn AccountsCommand>,
    accounts_query: Arc<dyn AccountsQuery>,
}

fn build_account_ports(pool: &Option<DbPool>) -> AccountPorts {
    match pool {
        Some(pool) => {
            let service = Arc::new(AccountService::new(
                Arc::new(DieselAccountRepository::new(pool.clone())),
                Arc::new(DefaultClock),
            ));
            AccountPorts {
                login: service.clone(),
                accounts: service.clone(),
                accounts_query: service,
            }
        }
        None => AccountPorts {
            login: Arc::new(FixtureLoginService),
            accounts: Arc::new(FixtureAccountsCommand),
            accounts_query: Arc::new(FixtureAccountsQuery),
        },
    }
}

fn build_fields_pair_with_pool<Pool, Service>(
    pool: &Option<Pool>,
    make_service: impl FnOnce(&Pool) -> Service,
) -> (Arc<dyn FieldsCommand>, Arc<dyn FieldsQuery>)
where
    Service: FieldsCommand + FieldsQuery + 'static,
{
    build_service_pair(
        pool,
        make_service,
        (
            Arc::new(FixtureFieldsCommand) as Arc<dyn FieldsCommand>,
            Arc::new(FixtureFieldsQuery) as Arc<dyn FieldsQuery>,
        ),
        |service| {
            (
                service.clone() as Arc<dyn FieldsCommand>,
                service as Arc<dyn FieldsQuery>,
            )
        },
    )
}

fn build_fields_pair(config: &ServerConfig) -> (Arc<dyn FieldsCommand>, Arc<dyn FieldsQuery>) {
    build_fields_pair_with_pool(&config.db_pool, |pool| {
        FieldTrackService::new(
            Arc::new(DieselFieldRepository::new(pool.clone())),
            Arc::new(DieselTrackPointRepository::new(pool.clone())),
        )
    })
}

fn build_import_command(config: &ServerConfig) -> Arc<dyn CsvImportCommand> {
    match &config.db_pool {
        Some(pool) => Arc::new(CsvImportService::new(
            Arc::new(DieselFieldRepository::new(pool.clone())),
            config.import_batch_size,
        )),
        None => Arc::new(FixtureCsvImportCommand),
    }
}

fn build_dashboard_query(config: &ServerConfig) -> Arc<dyn DashboardQuery> {
    match &config.db_pool {
        Some(pool) => Arc::new(DashboardService::new(
            Arc::new(DieselAccountRepository::new(pool.clone())),
            Arc::new(DieselFieldRepository::new(pool.clone())),
            Arc::new(DieselTrackPointRepository::new(pool.clone())),
        )),
        None => Arc::new(FixtureDashboardQuery),
    }
}

/// Build the shared HTTP state from configured ports and fixture fallbacks.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let AccountPorts {
        login,
        accounts,
        accounts_query,
    } = build_account_ports(&config.db_pool);
    let (fields, fields_query) = build_fields_pair(config);

    web::Data::new(HttpState {
        login,
        accounts,
        accounts_query,
        imports: build_import_command(config),
        fields,
        fields_query,
        dashboard: build_dashboard_query(config),
        max_upload_bytes: config.max_upload_bytes,
    })
}
