//! Caller-owned cache of the last successfully parsed shop collection.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use shopdir_core::{AppConfig, NormalizedShop};

use crate::loader::{build_client, load_csv_text, CsvSource, LoadError};
use crate::parse::parse_shops;
use crate::search::{build_search_index, filter_shops, ShopFilter};

/// Counts from the most recent successful refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshSummary {
    pub rows_seen: usize,
    pub rows_accepted: usize,
    pub refreshed_at: DateTime<Utc>,
}

/// Loads shops from a [`CsvSource`] and holds the result.
///
/// Nothing is loaded until [`ShopStore::refresh`] is called. Each refresh
/// parses from scratch; a failed refresh leaves the previous collection in
/// place.
pub struct ShopStore {
    source: CsvSource,
    client: reqwest::Client,
    shops: Vec<NormalizedShop>,
    last_refresh: Option<RefreshSummary>,
}

impl ShopStore {
    /// # Errors
    ///
    /// Returns [`LoadError::Http`] if the HTTP client cannot be built.
    pub fn new(source: CsvSource, timeout_secs: u64, user_agent: &str) -> Result<Self, LoadError> {
        Ok(Self {
            source,
            client: build_client(timeout_secs, user_agent)?,
            shops: Vec::new(),
            last_refresh: None,
        })
    }

    /// # Errors
    ///
    /// Returns [`LoadError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, LoadError> {
        Self::new(
            CsvSource::parse(&config.csv_source),
            config.fetch_timeout_secs,
            &config.user_agent,
        )
    }

    #[must_use]
    pub fn source(&self) -> &CsvSource {
        &self.source
    }

    /// Reload and re-parse the source, replacing the cached collection.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the raw text cannot be obtained. The cached
    /// collection is untouched in that case.
    pub async fn refresh(&mut self) -> Result<RefreshSummary, LoadError> {
        let text = match load_csv_text(&self.client, &self.source).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(source = %self.source, error = %e, "shop refresh failed");
                return Err(e);
            }
        };

        let outcome = parse_shops(&text);
        let summary = RefreshSummary {
            rows_seen: outcome.rows_seen,
            rows_accepted: outcome.rows_accepted,
            refreshed_at: Utc::now(),
        };
        self.shops = outcome.shops;
        self.last_refresh = Some(summary);

        tracing::info!(
            source = %self.source,
            rows_seen = summary.rows_seen,
            rows_accepted = summary.rows_accepted,
            "shop store refreshed"
        );
        Ok(summary)
    }

    #[must_use]
    pub fn shops(&self) -> &[NormalizedShop] {
        &self.shops
    }

    #[must_use]
    pub fn last_refresh(&self) -> Option<&RefreshSummary> {
        self.last_refresh.as_ref()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&NormalizedShop> {
        self.shops.iter().find(|shop| shop.id == id)
    }

    /// Mark a shop as claimed by its owner. Returns `false` for unknown ids.
    ///
    /// Claims live only in this cache; the next refresh starts unclaimed.
    pub fn claim(&mut self, id: &str) -> bool {
        let Some(shop) = self.shops.iter_mut().find(|shop| shop.id == id) else {
            return false;
        };
        shop.claimed = true;
        shop.date_updated = Utc::now();
        tracing::info!(shop_id = id, name = %shop.name, "shop claimed");
        true
    }

    #[must_use]
    pub fn search_index(&self) -> BTreeMap<String, Vec<String>> {
        build_search_index(&self.shops)
    }

    #[must_use]
    pub fn filter(&self, filter: &ShopFilter) -> Vec<&NormalizedShop> {
        filter_shops(&self.shops, filter)
    }
}
