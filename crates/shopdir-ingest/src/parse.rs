//! Entry point of the ingestion pipeline: raw CSV text in, ordered
//! [`NormalizedShop`] records out.
//!
//! Row-level problems (blank lines, headers, short rows, rows missing a
//! name, city, or state) are dropped without error. The only signal the
//! caller gets is the `rows_seen` / `rows_accepted` pair on
//! [`ParseOutcome`].

use chrono::{DateTime, Utc};
use shopdir_core::{NormalizedShop, COUNTRY};

use crate::classify::classify_name;
use crate::geo::synthesize_coordinates;
use crate::normalize::clean_optional_field;
use crate::tokenize::{tokenize_line, Line};

/// Result of one parse call.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutcome {
    /// Accepted shops in input order, ids `"1"..="n"`.
    pub shops: Vec<NormalizedShop>,
    /// Non-blank lines examined, including headers and rejected rows.
    pub rows_seen: usize,
    pub rows_accepted: usize,
}

/// Columns consumed from one tokenized row.
#[derive(Debug)]
struct ShopFields {
    name: String,
    address1: String,
    address2: String,
    city: String,
    state: String,
    zip_code: String,
    phone: String,
    website: String,
    email: String,
}

impl ShopFields {
    /// Map raw columns to fields. Only the first nine are read.
    fn from_columns(columns: &[&str]) -> Self {
        let col = |idx: usize| clean_optional_field(columns.get(idx).copied());
        Self {
            name: col(0),
            address1: col(1),
            address2: col(2),
            city: col(3),
            state: col(4),
            zip_code: col(5),
            phone: col(6),
            website: col(7),
            email: col(8),
        }
    }

    fn has_required(&self) -> bool {
        !self.name.is_empty() && !self.city.is_empty() && !self.state.is_empty()
    }
}

/// Builds records with sequential ids for a single parse call.
struct ShopAssembler {
    now: DateTime<Utc>,
    next_id: u64,
    shops: Vec<NormalizedShop>,
}

impl ShopAssembler {
    fn new(now: DateTime<Utc>) -> Self {
        Self {
            now,
            next_id: 1,
            shops: Vec::new(),
        }
    }

    fn push(&mut self, fields: ShopFields) {
        let class = classify_name(&fields.name);
        let point = synthesize_coordinates(&fields.zip_code, &fields.state);
        let id = self.next_id;
        self.next_id += 1;

        self.shops.push(NormalizedShop {
            id: id.to_string(),
            name: fields.name,
            address1: fields.address1,
            address2: fields.address2,
            city: fields.city,
            state: fields.state,
            zip_code: fields.zip_code,
            country: COUNTRY.to_string(),
            website: fields.website,
            phone: fields.phone,
            email: fields.email,
            date_added: self.now,
            date_updated: self.now,
            has_cbd: class.has_cbd,
            business_type: class.business_type,
            has_marijuana: class.has_marijuana,
            has_kratom: class.has_kratom,
            buyer_name: String::new(),
            title: String::new(),
            claimed: false,
            latitude: point.lat,
            longitude: point.lng,
        });
    }

    fn finish(self) -> Vec<NormalizedShop> {
        self.shops
    }
}

/// Parse a full CSV export, stamping records with the current time.
#[must_use]
pub fn parse_shops(text: &str) -> ParseOutcome {
    parse_shops_at(text, Utc::now())
}

/// Parse a full CSV export, stamping records with `now`.
///
/// Identical input and `now` produce identical output.
#[must_use]
pub fn parse_shops_at(text: &str, now: DateTime<Utc>) -> ParseOutcome {
    let mut assembler = ShopAssembler::new(now);
    let mut rows_seen = 0usize;

    for (line_no, raw) in text.split('\n').enumerate() {
        let columns = match tokenize_line(raw) {
            Line::Blank => continue,
            Line::Skipped(reason) => {
                rows_seen += 1;
                tracing::trace!(line = line_no + 1, ?reason, "skipping csv line");
                continue;
            }
            Line::Fields(columns) => {
                rows_seen += 1;
                columns
            }
        };

        let fields = ShopFields::from_columns(&columns);
        if !fields.has_required() {
            tracing::trace!(line = line_no + 1, "skipping row without name, city, or state");
            continue;
        }
        assembler.push(fields);
    }

    let shops = assembler.finish();
    tracing::info!(
        bytes = text.len(),
        rows_seen,
        rows_accepted = shops.len(),
        "parsed shop csv"
    );

    ParseOutcome {
        rows_accepted: shops.len(),
        rows_seen,
        shops,
    }
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
