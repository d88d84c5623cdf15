//! CSV upload endpoint.
//!
//! ```text
//! POST /api/v1/uploads   (multipart/form-data, file part `csv_file`)
//! ```
//!
//! Responses are plain text: the import report on success, a one-line
//! message otherwise.

use actix_multipart::{Field, Multipart, MultipartError};
use actix_web::{HttpResponse, http::header::ContentType, post, web};
use futures_util::TryStreamExt;
use tracing::warn;

use crate::domain::ports::CsvUpload;
use crate::domain::{Error, ErrorCode};
use crate::inbound::http::error::status_for;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Multipart part carrying the uploaded file.
pub const CSV_PART: &str = "csv_file";

/// Why an upload was turned away before reaching the import service.
#[derive(Debug, thiserror::Error)]
enum UploadError {
    #[error("no file uploaded: expected a '{CSV_PART}' part")]
    MissingPart,
    #[error("uploaded file has no file name")]
    MissingFileName,
    #[error("file exceeds the {limit} byte upload limit")]
    TooLarge { limit: usize },
    #[error("malformed multipart body: {0}")]
    Multipart(#[from] MultipartError),
}

fn plain_text(status: actix_web::http::StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type(ContentType::plaintext())
        .body(body)
}

fn error_text(error: &Error) -> HttpResponse {
    match error.code() {
        ErrorCode::InternalError => {
            warn!(message = error.message(), "csv upload failed");
            plain_text(
                status_for(ErrorCode::InternalError),
                format!("server processing error: {}", error.message()),
            )
        }
        code => plain_text(status_for(code), error.message().to_owned()),
    }
}

async fn read_limited(field: &mut Field, limit: usize) -> Result<Vec<u8>, UploadError> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.try_next().await? {
        if bytes.len() + chunk.len() > limit {
            return Err(UploadError::TooLarge { limit });
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

/// Pull the `csv_file` part out of the form; other parts are skipped.
async fn extract_upload(mut form: Multipart, limit: usize) -> Result<CsvUpload, UploadError> {
    while let Some(mut field) = form.try_next().await? {
        if field.name() != Some(CSV_PART) {
            continue;
        }
        let file_name = field
            .content_disposition()
            .and_then(|disposition| disposition.get_filename())
            .filter(|name| !name.is_empty())
            .map(str::to_owned)
            .ok_or(UploadError::MissingFileName)?;
        let bytes = read_limited(&mut field, limit).await?;
        return Ok(CsvUpload { file_name, bytes });
    }
    Err(UploadError::MissingPart)
}

/// Upload a CSV of track points; the file name, minus `.csv`, names the new
/// field.
#[utoipa::path(
    post,
    path = "/api/v1/uploads",
    request_body(content_type = "multipart/form-data", description = "Form with a `csv_file` file part"),
    responses(
        (status = 200, description = "Import report", body = String, content_type = "text/plain"),
        (status = 400, description = "Missing part, bad file name or oversize file", body = String, content_type = "text/plain"),
        (status = 401, description = "Login required", body = String, content_type = "text/plain"),
        (status = 409, description = "Field already exists", body = String, content_type = "text/plain"),
        (status = 500, description = "Server processing error", body = String, content_type = "text/plain")
    ),
    tags = ["uploads"],
    operation_id = "uploadCsv"
)]
#[post("/uploads")]
pub async fn upload_csv(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: Multipart,
) -> HttpResponse {
    if let Err(error) = session.require_identity() {
        return error_text(&error);
    }
    let upload = match extract_upload(form, state.max_upload_bytes).await {
        Ok(upload) => upload,
        Err(error) => {
            return plain_text(status_for(ErrorCode::InvalidRequest), error.to_string());
        }
    };
    match state.imports.import(upload).await {
        Ok(report) => plain_text(actix_web::http::StatusCode::OK, report.to_string()),
        Err(error) => error_text(&error),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;

    use super::*;
    use crate::domain::csv_import::{ImportReport, RowError};
    use crate::domain::ports::MockCsvImportCommand;
    use crate::inbound::http::test_utils::{login_cookie, test_session_middleware};
    use crate::inbound::http::users::login;

    const BOUNDARY: &str = "----fieldtrack-test-boundary";

    fn multipart(part: &str, file_name: &str, content: &str) -> Vec<u8> {
        format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"{part}\"; filename=\"{file_name}\"\r\n\
             Content-Type: text/csv\r\n\r\n\
             {content}\r\n\
             --{BOUNDARY}--\r\n"
        )
        .into_bytes()
    }

    fn upload_request(body: Vec<u8>) -> actix_test::TestRequest {
        actix_test::TestRequest::post()
            .uri("/api/v1/uploads")
            .insert_header((
                actix_web::http::header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            ))
            .set_payload(body)
    }

    macro_rules! upload_app {
        ($state:expr) => {
            actix_test::init_service(
                App::new()
                    .app_data(web::Data::new($state))
                    .wrap(test_session_middleware())
                    .service(web::scope("/api/v1").service(login).service(upload_csv)),
            )
            .await
        };
    }

    async fn body_text(response: actix_web::dev::ServiceResponse) -> String {
        let bytes = actix_test::read_body(response).await;
        String::from_utf8(bytes.to_vec()).expect("utf-8 body")
    }

    #[actix_web::test]
    async fn successful_imports_return_the_report() {
        let mut imports = MockCsvImportCommand::new();
        imports
            .expect_import()
            .withf(|upload| upload.file_name == "north.csv" && upload.bytes == b"a,b")
            .times(1)
            .return_once(|_| {
                Ok(ImportReport::new(
                    2,
                    vec![RowError::new(3, "invalid boolean value: MAYBE")],
                ))
            });
        let app = upload_app!(HttpState {
            imports: Arc::new(imports),
            ..HttpState::fixtures()
        });
        let cookie = login_cookie(&app, "grower", "user").await;

        let request = upload_request(multipart(CSV_PART, "north.csv", "a,b"))
            .cookie(cookie)
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_text(response).await,
            "imported 2 records, 1 errors\nerror details:\nrow 3 error: invalid boolean value: MAYBE"
        );
    }

    #[rstest]
    #[case("other_part", "north.csv", "no file uploaded")]
    #[case(CSV_PART, "north.xlsx", "file name must end in .csv")]
    #[case(CSV_PART, ".csv", "field name must not be empty")]
    #[actix_web::test]
    async fn bad_uploads_are_client_errors(
        #[case] part: &str,
        #[case] file_name: &str,
        #[case] expected: &str,
    ) {
        let app = upload_app!(HttpState::fixtures());
        let cookie = login_cookie(&app, "grower", "user").await;

        let request = upload_request(multipart(part, file_name, "data"))
            .cookie(cookie)
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_text(response).await;
        assert!(body.contains(expected), "unexpected body: {body}");
    }

    #[actix_web::test]
    async fn oversize_files_are_rejected_before_import() {
        let mut imports = MockCsvImportCommand::new();
        imports.expect_import().times(0);
        let app = upload_app!(
            HttpState {
                imports: Arc::new(imports),
                ..HttpState::fixtures()
            }
            .with_max_upload_bytes(4)
        );
        let cookie = login_cookie(&app, "grower", "user").await;

        let request = upload_request(multipart(CSV_PART, "north.csv", "0123456789"))
            .cookie(cookie)
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_text(response).await,
            "file exceeds the 4 byte upload limit"
        );
    }

    #[rstest]
    #[case(Error::internal("database write failed: boom"), StatusCode::INTERNAL_SERVER_ERROR, "server processing error: database write failed: boom")]
    #[case(Error::conflict("field already exists: north"), StatusCode::CONFLICT, "field already exists: north")]
    #[case(Error::service_unavailable("database unavailable: refused"), StatusCode::SERVICE_UNAVAILABLE, "database unavailable: refused")]
    #[actix_web::test]
    async fn import_failures_are_plain_text(
        #[case] error: Error,
        #[case] status: StatusCode,
        #[case] expected: &str,
    ) {
        let mut imports = MockCsvImportCommand::new();
        imports.expect_import().return_once(move |_| Err(error));
        let app = upload_app!(HttpState {
            imports: Arc::new(imports),
            ..HttpState::fixtures()
        });
        let cookie = login_cookie(&app, "grower", "user").await;

        let request = upload_request(multipart(CSV_PART, "north.csv", "x"))
            .cookie(cookie)
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), status);
        assert_eq!(body_text(response).await, expected);
    }

    #[actix_web::test]
    async fn uploads_require_a_session() {
        let app = upload_app!(HttpState::fixtures());
        let request = upload_request(multipart(CSV_PART, "north.csv", "x")).to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
