//! Line-level tokenizer for hand-exported shop CSV files.
//!
//! The export is not RFC 4180: there are no escaped quotes or multi-line
//! fields, headers repeat wherever files were concatenated, and rows are
//! frequently short. Each line is classified on its own.

/// Rows with fewer fields than this are treated as malformed.
pub const MIN_FIELDS: usize = 8;

/// Prefix that marks the export's header row.
pub const HEADER_PREFIX: &str = "Shop Name,";

/// Why a non-blank line produced no row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoComma,
    Header,
    OnlyCommas,
    TooFewFields,
}

/// Classification of a single input line.
#[derive(Debug, PartialEq, Eq)]
pub enum Line<'a> {
    Blank,
    Skipped(SkipReason),
    /// Raw, still-quoted fields in column order.
    Fields(Vec<&'a str>),
}

/// Strict header check used by the parser: the trimmed line starts with
/// `Shop Name,`.
///
/// The combiner uses a looser variant
/// ([`crate::combine::is_loose_header_line`]); the two are kept separate.
#[must_use]
pub fn is_header_line(line: &str) -> bool {
    line.trim_start().starts_with(HEADER_PREFIX)
}

/// Split on commas that are not inside a double-quoted span.
///
/// A comma splits only while the count of `"` seen so far on the line is
/// even. Quotes are left in place; see [`crate::normalize::clean_field`].
///
/// A stray unbalanced quote (an inch mark, say) keeps everything after it in
/// one field, so such a row usually falls below [`MIN_FIELDS`] and is
/// dropped. A lookahead that counts the quotes *after* each comma would keep
/// it; this splitter deliberately does not.
#[must_use]
pub fn split_unquoted_commas(line: &str) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut in_quotes = false;
    let mut start = 0usize;

    for (idx, ch) in line.char_indices() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(&line[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    fields.push(&line[start..]);
    fields
}

/// Classify one raw line of input.
#[must_use]
pub fn tokenize_line(raw: &str) -> Line<'_> {
    let line = raw.trim();
    if line.is_empty() {
        return Line::Blank;
    }
    if !line.contains(',') {
        return Line::Skipped(SkipReason::NoComma);
    }
    if is_header_line(line) {
        return Line::Skipped(SkipReason::Header);
    }
    if line.chars().all(|c| c == ',' || c.is_whitespace()) {
        return Line::Skipped(SkipReason::OnlyCommas);
    }

    let fields = split_unquoted_commas(line);
    if fields.len() < MIN_FIELDS {
        return Line::Skipped(SkipReason::TooFewFields);
    }
    Line::Fields(fields)
}
