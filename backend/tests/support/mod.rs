//! Shared helpers for backend integration tests.
//!
//! Each file under `backend/tests/` compiles as its own crate, so helpers
//! shared between suites live here and are pulled in with `mod support;`.
#![allow(dead_code, reason = "each suite uses a different subset")]

pub mod cluster_skip;
pub mod embedded_postgres;

pub use cluster_skip::handle_cluster_setup_failure;
pub use embedded_postgres::{drop_table, migrate_schema, reset_database};

/// Render a `postgres` error with its SQLSTATE, detail and hint.
///
/// `postgres::Error`'s `Display` collapses server errors to `db error`.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };

    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    if let Some(hint) = db_error.hint() {
        summary.push_str("; hint: ");
        summary.push_str(hint);
    }
    summary
}

/// Header row of the tractor export format.
pub const CSV_HEADER: &str =
    "序列号,GPS时间,经度,纬度,x,y,速度(km/h),航向,工作状态,幅宽(m),深度(mm),深度标准值";

/// A well-formed data row whose GPS minute equals `index`.
pub fn csv_row(index: u32) -> String {
    format!("{index},2024-01-05 10:{index:02},116.3,39.9,1,2,5.2,90,Y,2.5,180,200")
}

/// Join the header and `rows` into UTF-8 CSV bytes.
pub fn csv_bytes(rows: &[String]) -> Vec<u8> {
    let mut text = String::from(CSV_HEADER);
    for row in rows {
        text.push('\n');
        text.push_str(row);
    }
    text.into_bytes()
}
