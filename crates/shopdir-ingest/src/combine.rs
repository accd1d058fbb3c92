//! Concatenation of several shop exports into one CSV.
//!
//! Uses a looser header test than the parser's
//! [`crate::tokenize::is_header_line`]: exports from different tools put
//! `Shop Name` in different positions, and every repeated header after the
//! first has to go.

/// Result of combining exports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombineOutcome {
    /// Combined CSV, one `\n`-terminated line per kept line.
    pub text: String,
    /// Lines written, including the single header.
    pub lines_written: usize,
    pub headers_dropped: usize,
}

/// Loose header check for concatenated exports.
///
/// A line is a header when it is the first line of its file and mentions
/// `Shop Name`, or when it mentions `Shop Name`, `Address`, and `City`
/// anywhere.
#[must_use]
pub fn is_loose_header_line(line: &str, line_index: usize) -> bool {
    (line_index == 0 && line.contains("Shop Name"))
        || (line.contains("Shop Name") && line.contains("Address") && line.contains("City"))
}

/// Combine export files (given as their full text) in the order supplied.
///
/// The first header seen is written once; later headers, blank lines, and
/// lines without a comma are dropped. Other lines are copied verbatim.
#[must_use]
pub fn combine_csv_texts<S: AsRef<str>>(files: &[S]) -> CombineOutcome {
    let mut text = String::new();
    let mut lines_written = 0usize;
    let mut headers_dropped = 0usize;
    let mut header_written = false;

    for file in files {
        for (line_index, line) in file.as_ref().split('\n').enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            if is_loose_header_line(line, line_index) {
                if header_written {
                    headers_dropped += 1;
                    continue;
                }
                header_written = true;
            } else if !line.contains(',') {
                continue;
            }

            text.push_str(line);
            text.push('\n');
            lines_written += 1;
        }
    }

    tracing::debug!(
        files = files.len(),
        lines_written,
        headers_dropped,
        "combined csv exports"
    );

    CombineOutcome {
        text,
        lines_written,
        headers_dropped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_shops;

    const HEADER: &str = "Shop Name,Address1,Address2,City,State,Zip,Phone,Website,Email";

    #[test]
    fn loose_header_matches_first_line_mention() {
        assert!(is_loose_header_line("Id,Shop Name,Phone", 0));
        assert!(!is_loose_header_line("Id,Shop Name,Phone", 3));
    }

    #[test]
    fn loose_header_matches_column_names_anywhere() {
        assert!(is_loose_header_line("Id,Shop Name,Street Address,City", 7));
        assert!(!is_loose_header_line("Shop Name Smoke,1 Main,,Denver", 7));
    }

    #[test]
    fn writes_header_once_across_files() {
        let a = format!("{HEADER}\nA Smoke,1 St,,Waco,TX,76701,1,a.com,a@a.com\n");
        let b = format!("{HEADER}\nB Vape,2 St,,Waco,TX,76701,2,b.com,b@b.com\n\n");
        let outcome = combine_csv_texts(&[a, b]);

        assert_eq!(outcome.lines_written, 3);
        assert_eq!(outcome.headers_dropped, 1);
        assert_eq!(
            outcome.text,
            format!(
                "{HEADER}\nA Smoke,1 St,,Waco,TX,76701,1,a.com,a@a.com\nB Vape,2 St,,Waco,TX,76701,2,b.com,b@b.com\n"
            )
        );
    }

    #[test]
    fn drops_lines_without_commas() {
        let outcome = combine_csv_texts(&["Exported by ShopTool\nA,B,C\n"]);
        assert_eq!(outcome.text, "A,B,C\n");
    }

    #[test]
    fn relocated_header_is_dropped_by_combiner_but_not_parser() {
        // "Id,Shop Name,Address,City" is a header to the combiner only.
        let odd_header = "Id,Shop Name,Address,City,State,Zip,Phone,Website,Email";
        assert!(is_loose_header_line(odd_header, 5));
        assert!(!crate::tokenize::is_header_line(odd_header));
    }

    #[test]
    fn combined_output_parses_with_sequential_ids() {
        let a = format!("{HEADER}\nA Smoke,1 St,,Waco,TX,76701,1,a.com,a@a.com");
        let b = format!("{HEADER}\nB Vape,2 St,,Waco,TX,76701,2,b.com,b@b.com");
        let combined = combine_csv_texts(&[a, b]);
        let outcome = parse_shops(&combined.text);
        let ids: Vec<&str> = outcome.shops.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn no_files_yields_empty_text() {
        let outcome = combine_csv_texts::<&str>(&[]);
        assert!(outcome.text.is_empty());
        assert_eq!(outcome.lines_written, 0);
    }
}
