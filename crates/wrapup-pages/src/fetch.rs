//! Network tier of page resolution.
//!
//! [`PageFetcher`] abstracts a single download of one page. The locator only
//! cares about the HTTP status: exactly 200 means the body written to `dest`
//! is the page.

use std::io::Write;

use crate::error::FetchError;
use crate::platform::Platform;

/// Upstream tldr pages repository (raw file host).
pub const DEFAULT_BASE_URL: &str = "https://raw.githubusercontent.com/tldr-pages/tldr/refs/heads/main";

/// Downloads a single page.
pub trait PageFetcher {
    /// Stream the page body for `platform`/`page_name` into `dest`.
    ///
    /// Returns the HTTP status code of the response. The body is written
    /// whatever the status; callers decide whether it is usable.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Transport`] if no response was received and
    /// [`FetchError::Io`] if streaming the body fails.
    fn fetch(
        &self,
        platform: Platform,
        page_name: &str,
        dest: &mut dyn Write,
    ) -> Result<u16, FetchError>;
}

/// Build the upstream URL of a page.
#[must_use]
pub fn page_url(base_url: &str, platform: Platform, page_name: &str) -> String {
    format!(
        "{}/pages/{platform}/{page_name}",
        base_url.trim_end_matches('/')
    )
}

#[cfg(feature = "online")]
pub use http::HttpFetcher;

#[cfg(feature = "online")]
mod http {
    use std::io::Write;
    use std::time::Duration;

    use ureq::Agent;

    use super::{DEFAULT_BASE_URL, PageFetcher, page_url};
    use crate::error::FetchError;
    use crate::platform::Platform;

    /// Default HTTP timeout in seconds.
    const DEFAULT_TIMEOUT: u64 = 30;

    /// [`PageFetcher`] issuing a blocking GET per page.
    pub struct HttpFetcher {
        agent: Agent,
        base_url: String,
    }

    impl HttpFetcher {
        /// Create a fetcher for the default upstream repository.
        #[must_use]
        pub fn new() -> Self {
            Self::with_base_url(DEFAULT_BASE_URL, Duration::from_secs(DEFAULT_TIMEOUT))
        }

        /// Create a fetcher for a mirror at `base_url`.
        #[must_use]
        pub fn with_base_url(base_url: &str, timeout: Duration) -> Self {
            let agent = Agent::config_builder()
                .timeout_global(Some(timeout))
                .http_status_as_error(false)
                .build()
                .into();

            Self {
                agent,
                base_url: base_url.trim_end_matches('/').to_owned(),
            }
        }
    }

    impl Default for HttpFetcher {
        fn default() -> Self {
            Self::new()
        }
    }

    impl PageFetcher for HttpFetcher {
        fn fetch(
            &self,
            platform: Platform,
            page_name: &str,
            dest: &mut dyn Write,
        ) -> Result<u16, FetchError> {
            let url = page_url(&self.base_url, platform, page_name);
            tracing::debug!("GET {url}");

            let response = self
                .agent
                .get(&url)
                .call()
                .map_err(|e| FetchError::Transport(e.to_string()))?;

            let status = response.status().as_u16();
            let mut reader = response.into_body().into_reader();
            std::io::copy(&mut reader, dest)?;
            dest.flush()?;

            Ok(status)
        }
    }
}
