//! Raw-text providers for the shop CSV.
//!
//! All I/O for the pipeline happens here; [`crate::parse`] only ever sees a
//! complete in-memory string.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Aggregate failure to obtain CSV text. Row-level problems never surface
/// here; they are absorbed by the parser.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to load shops: cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to load shops: HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to load shops: unexpected HTTP status {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("failed to load shops: no data received from {origin}")]
    Empty { origin: String },
}

/// Where the CSV export lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CsvSource {
    File(PathBuf),
    Url(String),
}

impl CsvSource {
    /// `http://` and `https://` strings are URLs; anything else is a path.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            CsvSource::Url(trimmed.to_string())
        } else {
            CsvSource::File(PathBuf::from(trimmed))
        }
    }
}

impl std::fmt::Display for CsvSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CsvSource::File(path) => write!(f, "{}", path.display()),
            CsvSource::Url(url) => f.write_str(url),
        }
    }
}

/// Build the HTTP client used for URL sources.
///
/// # Errors
///
/// Returns [`LoadError::Http`] if the client cannot be constructed.
pub fn build_client(timeout_secs: u64, user_agent: &str) -> Result<reqwest::Client, LoadError> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

/// Read the whole CSV export from `source`.
///
/// # Errors
///
/// Returns [`LoadError`] when the file cannot be read, the request fails or
/// returns a non-2xx status, or the body is blank.
pub async fn load_csv_text(
    client: &reqwest::Client,
    source: &CsvSource,
) -> Result<String, LoadError> {
    let text = match source {
        CsvSource::File(path) => {
            tokio::fs::read_to_string(path)
                .await
                .map_err(|e| LoadError::Io {
                    path: path.display().to_string(),
                    source: e,
                })?
        }
        CsvSource::Url(url) => fetch_text(client, url).await?,
    };

    if text.trim().is_empty() {
        return Err(LoadError::Empty {
            origin: source.to_string(),
        });
    }

    tracing::debug!(%source, bytes = text.len(), "loaded shop csv");
    Ok(text)
}

async fn fetch_text(client: &reqwest::Client, url: &str) -> Result<String, LoadError> {
    let response = client
        .get(url)
        .header(reqwest::header::ACCEPT, "text/csv,text/plain,*/*")
        .send()
        .await?;
    if !response.status().is_success() {
        return Err(LoadError::HttpStatus {
            status: response.status().as_u16(),
            url: url.to_owned(),
        });
    }
    Ok(response.text().await?)
}
