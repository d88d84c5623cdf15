//! Tests for the CSV import service.

use std::sync::Arc;

use rstest::rstest;

use super::*;
use crate::domain::ports::MockFieldRepository;
use crate::domain::{ErrorCode, Field};

const HEADER: &str = "序列号,GPS时间,经度,纬度,x,y,速度(km/h),航向,工作状态,幅宽(m),深度(mm),深度标准值";

fn upload(file_name: &str, rows: &[&str]) -> CsvUpload {
    let mut text = String::from(HEADER);
    for row in rows {
        text.push('\n');
        text.push_str(row);
    }
    CsvUpload {
        file_name: file_name.to_owned(),
        bytes: text.into_bytes(),
    }
}

fn good_row(index: u32) -> String {
    format!("{index},2024-01-05 10:{index:02},116.3,39.9,1,2,5.2,90,Y,2.5,180,200")
}

fn make_service(repo: MockFieldRepository) -> CsvImportService<MockFieldRepository> {
    CsvImportService::new(Arc::new(repo), 2)
}

#[tokio::test]
async fn imports_valid_rows_and_reports_the_rest() {
    let mut repo = MockFieldRepository::new();
    repo.expect_create_with_tracks()
        .withf(|name, points, batch_size| {
            name.as_ref() == "north" && points.len() == 2 && *batch_size == 2
        })
        .times(1)
        .return_once(|name, _, _| {
            Ok(Field {
                id: 7,
                name: name.clone(),
            })
        });

    let first = good_row(1);
    let third = good_row(3);
    let bad = "2,2024-01-05 10:02,116.3,39.9,1,2,5.2,90,maybe,2.5,180,200";
    let report = make_service(repo)
        .import(upload("north.csv", &[&first, bad, &third]))
        .await
        .expect("import succeeds");

    assert_eq!(report.imported(), 2);
    assert_eq!(
        report.to_string(),
        "imported 2 records, 1 errors\nerror details:\nrow 2 error: invalid boolean value: MAYBE"
    );
}

#[rstest]
#[case("north.txt")]
#[case("north")]
#[case(".csv")]
#[tokio::test]
async fn rejects_bad_file_names_before_writing(#[case] file_name: &str) {
    let mut repo = MockFieldRepository::new();
    repo.expect_create_with_tracks().times(0);

    let error = make_service(repo)
        .import(upload(file_name, &[]))
        .await
        .expect_err("invalid file name");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[case(FieldRepositoryError::conflict("north"), ErrorCode::Conflict, "field already exists: north")]
#[case(
    FieldRepositoryError::query("insert failed"),
    ErrorCode::InternalError,
    "database write failed: insert failed"
)]
#[case(
    FieldRepositoryError::connection("refused"),
    ErrorCode::ServiceUnavailable,
    "database unavailable: refused"
)]
#[tokio::test]
async fn maps_repository_failures(
    #[case] failure: FieldRepositoryError,
    #[case] code: ErrorCode,
    #[case] message: &str,
) {
    let mut repo = MockFieldRepository::new();
    repo.expect_create_with_tracks()
        .times(1)
        .return_once(move |_, _, _| Err(failure));

    let row = good_row(1);
    let error = make_service(repo)
        .import(upload("north.csv", &[&row]))
        .await
        .expect_err("repository failure");
    assert_eq!(error.code(), code);
    assert_eq!(error.message(), message);
}

#[rstest]
#[case(0, 1)]
#[case(100, 100)]
#[case(usize::MAX, MAX_IMPORT_BATCH_SIZE)]
fn batch_size_is_clamped(#[case] requested: usize, #[case] effective: usize) {
    let service = CsvImportService::new(Arc::new(MockFieldRepository::new()), requested);
    assert_eq!(service.batch_size(), effective);
}

#[tokio::test]
async fn empty_file_still_creates_the_field() {
    let mut repo = MockFieldRepository::new();
    repo.expect_create_with_tracks()
        .withf(|_, points, _| points.is_empty())
        .times(1)
        .return_once(|name, _, _| {
            Ok(Field {
                id: 1,
                name: name.clone(),
            })
        });

    let report = make_service(repo)
        .import(CsvUpload {
            file_name: "empty.csv".into(),
            bytes: Vec::new(),
        })
        .await
        .expect("empty import");
    assert_eq!(
        report.to_string(),
        "imported 0 records, 0 errors\nerror details:\nnone"
    );
}
