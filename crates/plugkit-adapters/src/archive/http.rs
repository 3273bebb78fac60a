//! Boilerplate download over HTTP(S).

use std::io::Read;
use std::time::Duration;

use tracing::{debug, instrument};

use plugkit_core::{
    application::{
        ApplicationError,
        ports::{ArchiveSource, ProgressEvent, ProgressObserver},
    },
    error::{PlugkitError, PlugkitResult, Stage},
};

const CHUNK: usize = 64 * 1024;

/// Downloads the archive into memory. Nothing is written to disk, so a
/// failed download leaves no trace.
#[derive(Debug, Clone)]
pub struct HttpArchiveSource {
    url: String,
    agent: ureq::Agent,
}

impl HttpArchiveSource {
    pub fn new(url: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .user_agent(concat!("plugkit/", env!("CARGO_PKG_VERSION")))
            .timeout_connect(Duration::from_secs(30))
            .timeout_read(Duration::from_secs(120))
            .build();
        Self {
            url: url.into(),
            agent,
        }
    }

    fn error(&self, reason: impl Into<String>) -> PlugkitError {
        ApplicationError::Fetch {
            source_desc: self.url.clone(),
            reason: reason.into(),
        }
        .into()
    }
}

impl ArchiveSource for HttpArchiveSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    #[instrument(skip_all, fields(url = %self.url))]
    fn fetch(&self, observer: &dyn ProgressObserver) -> PlugkitResult<Vec<u8>> {
        let response = self.agent.get(&self.url).call().map_err(|e| match e {
            ureq::Error::Status(code, resp) => {
                self.error(format!("server returned {} {}", code, resp.status_text()))
            }
            ureq::Error::Transport(t) => self.error(t.to_string()),
        })?;

        let total = response
            .header("Content-Length")
            .and_then(|v| v.parse::<u64>().ok());
        debug!(content_length = ?total, "Response received");

        let mut reader = response.into_reader();
        let mut bytes = Vec::with_capacity(total.unwrap_or(0) as usize);
        let mut buf = vec![0u8; CHUNK];
        loop {
            let n = reader
                .read(&mut buf)
                .map_err(|e| self.error(format!("read failed: {e}")))?;
            if n == 0 {
                break;
            }
            bytes.extend_from_slice(&buf[..n]);
            observer.on_progress(ProgressEvent::new(Stage::Fetch, bytes.len() as u64, total));
        }

        if bytes.is_empty() {
            return Err(self.error("empty response body"));
        }
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plugkit_core::application::ports::NoProgress;
    use plugkit_core::error::ErrorKind;

    #[test]
    fn describes_itself_by_url() {
        let src = HttpArchiveSource::new("https://example.com/a.zip");
        assert_eq!(src.describe(), "https://example.com/a.zip");
    }

    #[test]
    fn unreachable_host_is_fetch_error() {
        // Port 9 on loopback is not listening in test environments.
        let src = HttpArchiveSource::new("http://127.0.0.1:9/boilerplate.zip");
        let err = src.fetch(&NoProgress).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Fetch);
    }
}
