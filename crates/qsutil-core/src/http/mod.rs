//! HTTP GET transport.
//!
//! The fetcher and provider client only see the `Transport` trait; the
//! libcurl implementation lives in `easy`. Responses are buffered in memory
//! (a wallpaper is a few MiB) so a 404 body never reaches the output file.

mod classify;
mod easy;
#[cfg(test)]
pub(crate) mod fake;

pub use classify::{classify_curl_error, ErrorKind};
pub use easy::CurlTransport;

use crate::error::FetchError;
use std::fmt;
use std::time::Duration;

/// Status and body of a completed GET.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u32,
    pub body: Vec<u8>,
}

/// The request never produced a status line (DNS, connect, timeout, ...).
#[derive(Debug, Clone)]
pub struct TransportError {
    pub kind: ErrorKind,
    pub message: String,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for TransportError {}

/// Blocking HTTP GET. Implementations must be shareable across batch workers.
pub trait Transport: Send + Sync {
    fn get(&self, url: &str, timeout: Duration) -> Result<Response, TransportError>;
}

/// GET `url` and map the result onto the fetch error taxonomy:
/// 2xx → body, 404 → `NotFound`, anything else → `NetworkFailure`.
pub fn get_ok(
    transport: &dyn Transport,
    url: &str,
    timeout: Duration,
) -> Result<Vec<u8>, FetchError> {
    let resp = transport
        .get(url, timeout)
        .map_err(|e| FetchError::NetworkFailure {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
    match resp.status {
        200..=299 => Ok(resp.body),
        404 => Err(FetchError::NotFound {
            url: url.to_string(),
        }),
        code => Err(FetchError::NetworkFailure {
            url: url.to_string(),
            reason: format!("HTTP {}", code),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Result<Response, TransportError>);

    impl Transport for Fixed {
        fn get(&self, _url: &str, _timeout: Duration) -> Result<Response, TransportError> {
            self.0.clone()
        }
    }

    fn status(code: u32) -> Fixed {
        Fixed(Ok(Response {
            status: code,
            body: b"body".to_vec(),
        }))
    }

    #[test]
    fn success_returns_body() {
        let body = get_ok(&status(200), "http://x/a", Duration::from_secs(1)).unwrap();
        assert_eq!(body, b"body");
    }

    #[test]
    fn not_found_maps_to_not_found() {
        let err = get_ok(&status(404), "http://x/a", Duration::from_secs(1)).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn other_status_is_network_failure() {
        for code in [301, 403, 410, 500, 503] {
            let err = get_ok(&status(code), "http://x/a", Duration::from_secs(1)).unwrap_err();
            match err {
                FetchError::NetworkFailure { reason, .. } => {
                    assert_eq!(reason, format!("HTTP {}", code))
                }
                other => panic!("HTTP {code}: unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn transport_error_is_network_failure() {
        let t = Fixed(Err(TransportError {
            kind: ErrorKind::Timeout,
            message: "operation timed out".into(),
        }));
        let err = get_ok(&t, "http://x/a", Duration::from_secs(1)).unwrap_err();
        match err {
            FetchError::NetworkFailure { reason, .. } => assert!(reason.contains("timeout")),
            other => panic!("unexpected {other:?}"),
        }
    }
}
