//! One-shot loading of the user record set.
//!
//! The record set is a JSON array of users, read from an HTTP(S) endpoint or a
//! local file. [`fetch_users`] never fails: a load error is logged and the
//! directory starts out empty.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, error, info};
use url::Url;
use userdir_types::User;

pub const APP_USER_AGENT: &str = concat!("userdir/", env!("CARGO_PKG_VERSION"));

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{url} responded with status {status}")]
    Status { url: String, status: u16 },
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Malformed user list: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Http(Url),
    File(PathBuf),
}

impl Source {
    /// `http://` and `https://` URLs are fetched; `file://` URLs and anything
    /// else are read as local paths.
    pub fn parse(location: &str) -> Self {
        match Url::parse(location) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Source::Http(url),
            Ok(url) if url.scheme() == "file" => url
                .to_file_path()
                .map(Source::File)
                .unwrap_or_else(|_| Source::File(PathBuf::from(location))),
            _ => Source::File(PathBuf::from(location)),
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Http(url) => write!(f, "{}", url),
            Source::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: APP_USER_AGENT.to_string(),
        }
    }
}

impl FetchOptions {
    /// A timeout of zero seconds means no timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = (secs > 0).then(|| Duration::from_secs(secs));
        self
    }
}

pub async fn load_users(source: &Source, options: &FetchOptions) -> Result<Vec<User>, SourceError> {
    let body = match source {
        Source::Http(url) => fetch_http(url, options).await?,
        Source::File(path) => tokio::fs::read(path).await.map_err(|e| SourceError::Io {
            path: path.clone(),
            source: e,
        })?,
    };
    debug!("Read {} bytes from {}", body.len(), source);
    let users: Vec<User> = serde_json::from_slice(&body)?;
    Ok(users)
}

/// Loads the record set, logging any failure and returning an empty list in its place.
pub async fn fetch_users(source: &Source, options: &FetchOptions) -> Vec<User> {
    match load_users(source, options).await {
        Ok(users) => {
            info!("Loaded {} users from {}", users.len(), source);
            users
        }
        Err(e) => {
            error!("Failed to load users from {}: {}", source, e);
            Vec::new()
        }
    }
}

async fn fetch_http(url: &Url, options: &FetchOptions) -> Result<Vec<u8>, SourceError> {
    let mut builder = reqwest::Client::builder().user_agent(options.user_agent.as_str());
    if let Some(timeout) = options.timeout {
        builder = builder.timeout(timeout);
    }
    let client = builder.build()?;

    let response = client.get(url.clone()).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    Ok(response.bytes().await?.to_vec())
}
