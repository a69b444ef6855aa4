//! Shared HTTP response helpers for directory endpoints.
//!
//! Centralizes status-code classification (429 rate limiting with
//! `Retry-After` parsing, 4xx → not found, other non-success →
//! [`DirectoryError::Api`]) so endpoint modules stay focused on request
//! construction and response mapping.

use serde::de::DeserializeOwned;

use om_core::limits::truncate_chars;

use crate::error::DirectoryError;

const MAX_ERROR_BODY_CHARS: usize = 200;

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success. Handles:
/// - **429 Too Many Requests** → [`DirectoryError::RateLimited`] with
///   `Retry-After` header parsing (falls back to 60 s if absent or
///   unparseable).
/// - **Any other 4xx** → [`DirectoryError::NotFound`]; never retried.
/// - **Other non-success status** → [`DirectoryError::Api`] with status code
///   and the start of the response body.
pub async fn check_response(
    resp: reqwest::Response,
) -> Result<reqwest::Response, DirectoryError> {
    let status = resp.status();
    if status == 429 {
        let retry_after = parse_retry_after(&resp);
        return Err(DirectoryError::RateLimited {
            retry_after_secs: retry_after,
        });
    }
    if status.is_client_error() {
        return Err(DirectoryError::NotFound {
            status: status.as_u16(),
        });
    }
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(DirectoryError::Api {
            status: status.as_u16(),
            message: truncate_chars(&body, MAX_ERROR_BODY_CHARS),
        });
    }
    Ok(resp)
}

/// Read the body and decode it as JSON.
///
/// Decoding failures become [`DirectoryError::Parse`] so they are not
/// mistaken for transport errors and retried.
pub async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, DirectoryError> {
    let body = resp.text().await?;
    serde_json::from_str(&body).map_err(|e| DirectoryError::Parse(e.to_string()))
}

/// Parse the `Retry-After` header as seconds, falling back to 60 s.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_response(status: u16) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body("")
                .unwrap(),
        )
    }

    fn mock_response_with_body(status: u16, body: &'static str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body)
                .unwrap(),
        )
    }

    fn mock_response_with_retry_after(status: u16, value: &str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .header("Retry-After", value)
                .body("")
                .unwrap(),
        )
    }

    #[test]
    fn parse_retry_after_from_header() {
        let resp = mock_response_with_retry_after(429, "120");
        assert_eq!(parse_retry_after(&resp), 120);
    }

    #[test]
    fn parse_retry_after_missing_header() {
        let resp = mock_response(429);
        assert_eq!(parse_retry_after(&resp), 60);
    }

    #[tokio::test]
    async fn check_response_rate_limited() {
        let resp = mock_response_with_retry_after(429, "30");
        let err = check_response(resp).await.unwrap_err();
        assert!(matches!(
            err,
            DirectoryError::RateLimited {
                retry_after_secs: 30
            }
        ));
    }

    #[tokio::test]
    async fn check_response_404_is_not_found() {
        let err = check_response(mock_response(404)).await.unwrap_err();
        assert!(matches!(err, DirectoryError::NotFound { status: 404 }));
    }

    #[tokio::test]
    async fn check_response_other_4xx_is_not_found() {
        let err = check_response(mock_response(422)).await.unwrap_err();
        assert!(matches!(err, DirectoryError::NotFound { status: 422 }));
    }

    #[tokio::test]
    async fn check_response_server_error() {
        let err = check_response(mock_response_with_body(503, "upstream down"))
            .await
            .unwrap_err();
        assert!(
            matches!(err, DirectoryError::Api { status: 503, ref message } if message == "upstream down")
        );
    }

    #[tokio::test]
    async fn check_response_success() {
        assert!(check_response(mock_response(200)).await.is_ok());
    }

    #[tokio::test]
    async fn read_json_reports_parse_errors() {
        let resp = mock_response_with_body(200, "<html>oops</html>");
        let err = read_json::<serde_json::Value>(resp).await.unwrap_err();
        assert!(matches!(err, DirectoryError::Parse(_)));
    }
}
