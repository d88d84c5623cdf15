//! Import a track CSV file from disk as a new field.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use cap_std::{ambient_authority, fs::Dir};
use clap::Parser;
use fieldtrack::domain::ports::{CsvImportCommand, CsvUpload};
use fieldtrack::domain::{CsvImportService, DEFAULT_IMPORT_BATCH_SIZE, MAX_IMPORT_BATCH_SIZE};
use fieldtrack::outbound::persistence::{
    DbPool, DieselFieldRepository, PoolConfig, run_pending_migrations_blocking,
};
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

/// `import-csv` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "import-csv",
    about = "Import a track CSV file into a new field, printing the import report",
    version
)]
struct CliArgs {
    /// Path to the CSV file.
    #[arg(long = "csv", value_name = "path")]
    csv_path: PathBuf,
    /// Field name to create. Defaults to the file name without `.csv`.
    #[arg(long = "field-name", value_name = "name")]
    field_name: Option<String>,
    /// Database connection URL. Falls back to `DATABASE_URL` when omitted.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
    /// Rows written per insert statement.
    #[arg(
        long = "batch-size",
        value_name = "rows",
        default_value_t = DEFAULT_IMPORT_BATCH_SIZE,
        value_parser = parse_batch_size
    )]
    batch_size: usize,
}

fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let file_name = upload_file_name(&args.csv_path, args.field_name.as_deref())?;
    let bytes = read_input(&args.csv_path)?;

    let database_url = resolve_database_url(args.database_url)?;
    run_pending_migrations_blocking(database_url.clone())
        .await
        .map_err(|error| io::Error::other(format!("run migrations: {error}")))?;
    let pool = DbPool::new(PoolConfig::new(&database_url))
        .await
        .map_err(|error| io::Error::other(format!("create database pool: {error}")))?;

    let command = CsvImportService::new(
        Arc::new(DieselFieldRepository::new(pool)),
        args.batch_size,
    );
    let report = command
        .import(CsvUpload { file_name, bytes })
        .await
        .map_err(|error| io::Error::other(format!("import failed: {error}")))?;

    println!("{report}");
    Ok(())
}

/// File name handed to the importer; an explicit field name wins over the
/// path's own file name.
fn upload_file_name(path: &Path, field_name: Option<&str>) -> io::Result<String> {
    if let Some(name) = field_name {
        return Ok(format!("{name}.csv"));
    }
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "input path must be a file"))
}

fn parse_batch_size(raw: &str) -> Result<usize, String> {
    let value = raw
        .trim()
        .parse::<usize>()
        .map_err(|error| format!("failed to parse batch size: {error}"))?;
    if !(1..=MAX_IMPORT_BATCH_SIZE).contains(&value) {
        return Err(format!(
            "batch size must be between 1 and {MAX_IMPORT_BATCH_SIZE}"
        ));
    }
    Ok(value)
}

fn read_input(path: &Path) -> io::Result<Vec<u8>> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "input path must be a file"))?;
    let directory = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|error| {
        io::Error::other(format!(
            "open input parent directory '{}': {error}",
            parent.display()
        ))
    })?;
    let mut file = directory.open(Path::new(file_name)).map_err(|error| {
        io::Error::other(format!("open input file '{}': {error}", path.display()))
    })?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(|error| {
        io::Error::other(format!("read input file '{}': {error}", path.display()))
    })?;
    Ok(bytes)
}

fn resolve_database_url(explicit: Option<String>) -> io::Result<String> {
    if let Some(value) = explicit {
        if value.trim().is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "--database-url must not be empty when provided",
            ));
        }
        return Ok(value);
    }

    let from_env = env::var("DATABASE_URL").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "database URL missing: set --database-url or DATABASE_URL",
        )
    })?;
    if from_env.trim().is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "DATABASE_URL must not be empty",
        ));
    }
    Ok(from_env)
}
