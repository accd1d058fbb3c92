//! Shop records as emitted by the ingestion pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// The single country the directory data set covers.
pub const COUNTRY: &str = "USA";

/// Primary product focus of a shop.
///
/// Serialized as the single-letter codes used by the directory front end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BusinessType {
    #[serde(rename = "T")]
    Tobacco,
    #[serde(rename = "V")]
    Vape,
    #[default]
    #[serde(rename = "S")]
    Smoke,
    #[serde(rename = "H")]
    Hookah,
    #[serde(rename = "C")]
    Cbd,
    #[serde(rename = "L")]
    Lounge,
    #[serde(rename = "O")]
    Other,
}

impl BusinessType {
    pub const ALL: [BusinessType; 7] = [
        BusinessType::Tobacco,
        BusinessType::Vape,
        BusinessType::Smoke,
        BusinessType::Hookah,
        BusinessType::Cbd,
        BusinessType::Lounge,
        BusinessType::Other,
    ];

    #[must_use]
    pub fn code(self) -> char {
        match self {
            BusinessType::Tobacco => 'T',
            BusinessType::Vape => 'V',
            BusinessType::Smoke => 'S',
            BusinessType::Hookah => 'H',
            BusinessType::Cbd => 'C',
            BusinessType::Lounge => 'L',
            BusinessType::Other => 'O',
        }
    }

    /// Human-readable label shown in listings.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            BusinessType::Tobacco => "Tobacco Shop",
            BusinessType::Vape => "Vape Shop",
            BusinessType::Smoke => "Smoke Shop",
            BusinessType::Hookah => "Hookah Shop",
            BusinessType::Cbd => "CBD Dispensary",
            BusinessType::Lounge => "Lounge",
            BusinessType::Other => "Other",
        }
    }
}

impl std::fmt::Display for BusinessType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for BusinessType {
    type Err = CoreError;

    /// Accepts either the one-letter code (`"V"`) or the tag name (`"vape"`),
    /// case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        BusinessType::ALL
            .into_iter()
            .find(|bt| {
                trimmed.eq_ignore_ascii_case(&bt.code().to_string())
                    || trimmed.eq_ignore_ascii_case(&format!("{bt:?}"))
            })
            .ok_or_else(|| CoreError::InvalidBusinessType(s.to_string()))
    }
}

/// A fully normalized shop record, one per accepted CSV row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedShop {
    /// Sequential, 1-based, unique within a single parse call.
    pub id: String,
    pub name: String,
    pub address1: String,
    pub address2: String,
    pub city: String,
    /// Two-letter state code, casing as it appeared in the source.
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub website: String,
    pub phone: String,
    pub email: String,
    pub date_added: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
    #[serde(rename = "hasCBD")]
    pub has_cbd: bool,
    pub business_type: BusinessType,
    pub has_marijuana: bool,
    pub has_kratom: bool,
    pub buyer_name: String,
    pub title: String,
    pub claimed: bool,
    /// Synthesized from state and zip; good for clustering, not navigation.
    pub latitude: f64,
    pub longitude: f64,
}
