//! Blocking fetch capability and the asset download primitive

use std::path::Path;
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::FetchConfig;
use crate::error::{AssetError, FetchError};

/// `url -> raw content`, or a failure.
pub trait Fetch {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;

    /// Fetch and decode as UTF-8, replacing invalid sequences.
    fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let bytes = self.fetch(url)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl<F> Fetch for F
where
    F: Fn(&str) -> Result<Vec<u8>, FetchError>,
{
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self(url)
    }
}

/// Default transport: a ureq agent sending a fixed header set.
pub struct HttpFetcher {
    agent: ureq::Agent,
    headers: Vec<(String, String)>,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Self {
        let agent = ureq::Agent::new_with_config(
            ureq::Agent::config_builder()
                .timeout_global(config.timeout_secs.map(Duration::from_secs))
                .http_status_as_error(false)
                .build(),
        );

        Self {
            agent,
            headers: config
                .headers
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let mut request = self.agent.get(url);
        for (name, value) in &self.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.call().map_err(|e| FetchError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        response
            .into_body()
            .read_to_vec()
            .map_err(|e| FetchError::Body {
                url: url.to_string(),
                message: e.to_string(),
            })
    }
}

/// Download `url` to `dest`, creating parent directories.
///
/// Any failure is logged and reported as `false`; nothing is written unless
/// the fetch succeeded. No retries.
pub fn download(fetch: &dyn Fetch, url: &str, dest: &Path) -> bool {
    match try_download(fetch, url, dest) {
        Ok(()) => {
            debug!(url, path = %dest.display(), "downloaded asset");
            true
        }
        Err(e) => {
            warn!(url, path = %dest.display(), error = %e, "asset download failed");
            false
        }
    }
}

fn try_download(fetch: &dyn Fetch, url: &str, dest: &Path) -> Result<(), AssetError> {
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let bytes = fetch.fetch(url)?;
    std::fs::write(dest, bytes)?;
    Ok(())
}
