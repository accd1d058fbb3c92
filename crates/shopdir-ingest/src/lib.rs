pub mod classify;
pub mod combine;
pub mod geo;
pub mod loader;
pub mod normalize;
pub mod parse;
pub mod search;
pub mod store;
pub mod tokenize;

pub use classify::{classify_name, Classification};
pub use combine::{combine_csv_texts, is_loose_header_line, CombineOutcome};
pub use geo::{distance_miles, synthesize_coordinates, GeoPoint};
pub use loader::{build_client, load_csv_text, CsvSource, LoadError};
pub use normalize::{clean_field, clean_optional_field};
pub use parse::{parse_shops, parse_shops_at, ParseOutcome};
pub use search::{build_search_index, filter_shops, ShopFilter, DEFAULT_RADIUS_MILES};
pub use store::{RefreshSummary, ShopStore};
pub use tokenize::{is_header_line, split_unquoted_commas, tokenize_line, Line, SkipReason};
