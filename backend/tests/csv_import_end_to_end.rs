//! End-to-end CSV import: bytes in, stored fields and tracks out, against
//! embedded PostgreSQL.

use std::sync::Arc;

use fieldtrack::domain::ports::{
    CsvImportCommand, CsvUpload, FieldsCommand, FieldsQuery, TrackFilter,
};
use fieldtrack::domain::{CsvImportService, ErrorCode, FieldName, FieldTrackService};
use fieldtrack::outbound::persistence::{
    DbPool, DieselFieldRepository, DieselTrackPointRepository, PoolConfig,
};
use pg_embedded_setup_unpriv::TestCluster;
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;

#[path = "support/pg_embed.rs"]
mod pg_embed;

mod support;

use pg_embed::test_cluster;
use support::{csv_bytes, csv_row, handle_cluster_setup_failure, migrate_schema, reset_database};

const TEST_DB: &str = "fieldtrack_csv_import_test";

type Importer = CsvImportService<DieselFieldRepository>;
type Browser = FieldTrackService<DieselFieldRepository, DieselTrackPointRepository>;

struct TestContext {
    runtime: Runtime,
    _cluster: TestCluster,
    importer: Importer,
    browser: Browser,
}

fn setup_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = test_cluster()?;
    reset_database(&cluster, TEST_DB)?;
    let database_url = cluster.connection().database_url(TEST_DB);
    migrate_schema(&database_url)?;

    let config = PoolConfig::new(&database_url)
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(async { DbPool::new(config).await })
        .map_err(|err| err.to_string())?;
    let fields = Arc::new(DieselFieldRepository::new(pool.clone()));
    let tracks = Arc::new(DieselTrackPointRepository::new(pool));

    Ok(TestContext {
        runtime,
        _cluster: cluster,
        importer: CsvImportService::new(fields.clone(), 2),
        browser: FieldTrackService::new(fields, tracks),
    })
}

#[fixture]
fn import_context() -> Option<TestContext> {
    match setup_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn upload(file_name: &str, rows: &[String]) -> CsvUpload {
    CsvUpload {
        file_name: file_name.to_owned(),
        bytes: csv_bytes(rows),
    }
}

#[rstest]
fn valid_rows_are_stored_and_bad_rows_reported(import_context: Option<TestContext>) {
    let Some(context) = import_context else {
        eprintln!("SKIP-TEST-CLUSTER: valid_rows_are_stored_and_bad_rows_reported skipped");
        return;
    };

    let rows = vec![
        csv_row(1),
        csv_row(2),
        "3,not a time,116.3,39.9,1,2,5.2,90,Y,2.5,180,200".to_owned(),
        csv_row(4),
        csv_row(5),
    ];

    context.runtime.block_on(async {
        let report = context
            .importer
            .import(upload("north-plot.csv", &rows))
            .await
            .expect("import succeeds");
        assert_eq!(report.imported(), 4);
        assert_eq!(report.errors().len(), 1);
        assert_eq!(report.errors()[0].row, 3);
        assert!(
            report.to_string().starts_with("imported 4 records, 1 errors\nerror details:\nrow 3 error:"),
            "{report}"
        );

        let fields = context.browser.list_fields().await.expect("list fields");
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].name.as_ref(), "north-plot");
        assert_eq!(fields[0].track_count, 4);

        let tracks = context
            .browser
            .list_tracks(&TrackFilter {
                field_name: Some(FieldName::new("north-plot").expect("name")),
            })
            .await
            .expect("list tracks");
        let indices: Vec<i32> = tracks.iter().map(|record| record.point.point_index).collect();
        assert_eq!(indices, vec![1, 2, 4, 5]);
    });
}

#[rstest]
fn reimporting_a_field_conflicts_until_it_is_deleted(import_context: Option<TestContext>) {
    let Some(context) = import_context else {
        eprintln!(
            "SKIP-TEST-CLUSTER: reimporting_a_field_conflicts_until_it_is_deleted skipped"
        );
        return;
    };
    let rows = vec![csv_row(1)];

    context.runtime.block_on(async {
        context
            .importer
            .import(upload("north.csv", &rows))
            .await
            .expect("first import");
        let error = context
            .importer
            .import(upload("north.csv", &rows))
            .await
            .expect_err("second import conflicts");
        assert_eq!(error.code(), ErrorCode::Conflict);

        context
            .browser
            .delete_field(&FieldName::new("north").expect("name"))
            .await
            .expect("delete field");
        let report = context
            .importer
            .import(upload("north.csv", &rows))
            .await
            .expect("import after delete");
        assert_eq!(report.imported(), 1);
    });
}

#[rstest]
fn header_only_files_create_empty_fields(import_context: Option<TestContext>) {
    let Some(context) = import_context else {
        eprintln!("SKIP-TEST-CLUSTER: header_only_files_create_empty_fields skipped");
        return;
    };

    context.runtime.block_on(async {
        let report = context
            .importer
            .import(upload("fallow.csv", &[]))
            .await
            .expect("import succeeds");
        assert_eq!(report.to_string(), "imported 0 records, 0 errors\nerror details:\nnone");

        let fields = context.browser.list_fields().await.expect("list fields");
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].track_count, 0);
    });
}
