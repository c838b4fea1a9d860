//! libcurl-backed transport (one `Easy` handle per request).

use super::{classify_curl_error, Response, Transport, TransportError};
use std::time::Duration;

const USER_AGENT: &str = concat!("qsutil/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Copy)]
pub struct CurlTransport {
    pub connect_timeout: Duration,
}

impl CurlTransport {
    pub fn new(connect_timeout: Duration) -> Self {
        Self { connect_timeout }
    }

    fn perform(&self, url: &str, timeout: Duration) -> Result<Response, curl::Error> {
        let mut body = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.useragent(USER_AGENT)?;
        easy.connect_timeout(self.connect_timeout.min(timeout))?;
        easy.timeout(timeout)?;

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()?;
        Ok(Response { status, body })
    }
}

impl Default for CurlTransport {
    fn default() -> Self {
        Self::new(Duration::from_secs(15))
    }
}

impl Transport for CurlTransport {
    fn get(&self, url: &str, timeout: Duration) -> Result<Response, TransportError> {
        tracing::debug!(url, "GET");
        self.perform(url, timeout).map_err(|e| TransportError {
            kind: classify_curl_error(&e),
            message: e.to_string(),
        })
    }
}
