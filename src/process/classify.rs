// src/process/classify.rs

/// Starts a line that is skipped entirely.
pub const COMMENT_MARKER: char = '*';
/// Starts a section header line.
pub const SECTION_MARKER: char = '$';
/// Separates the section name from its column list.
pub const NAME_SEPARATOR: char = ':';
/// Separates cells within header column lists and data lines.
pub const FIELD_SEPARATOR: char = ';';

/// What a single (already trimmed) input line means to the splitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    Comment,
    Header { name: &'a str, fields: Vec<String> },
    /// A line containing at least one separator, split into cells.
    Data(Vec<String>),
    /// Non-empty text without a separator; never becomes a row.
    Stray,
}

/// Classify one line. Precedence: blank, comment, header, data.
pub fn classify_line(raw: &str) -> LineKind<'_> {
    let line = raw.trim();
    if line.is_empty() {
        return LineKind::Blank;
    }
    if line.starts_with(COMMENT_MARKER) {
        return LineKind::Comment;
    }
    if let Some(rest) = line.strip_prefix(SECTION_MARKER) {
        let (name, fields) = parse_header(rest);
        return LineKind::Header { name, fields };
    }
    if line.contains(FIELD_SEPARATOR) {
        LineKind::Data(split_cells(line))
    } else {
        LineKind::Stray
    }
}

/// Split the text after `$` into a name and its column names.
///
/// Only the first colon separates; anything after it belongs to the
/// column list, colons included.
pub fn parse_header(rest: &str) -> (&str, Vec<String>) {
    match rest.split_once(NAME_SEPARATOR) {
        Some((name, columns)) => (name.trim(), split_cells(columns)),
        None => (rest.trim(), Vec::new()),
    }
}

fn split_cells(line: &str) -> Vec<String> {
    line.split(FIELD_SEPARATOR).map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_and_comment_lines() {
        assert_eq!(classify_line(""), LineKind::Blank);
        assert_eq!(classify_line("   \t "), LineKind::Blank);
        assert_eq!(classify_line("* depots follow"), LineKind::Comment);
        assert_eq!(classify_line("   *;;;"), LineKind::Comment);
    }

    #[test]
    fn test_header_with_columns() {
        assert_eq!(
            classify_line("$ARCS:FROM;TO;COST"),
            LineKind::Header {
                name: "ARCS",
                fields: vec!["FROM".into(), "TO".into(), "COST".into()],
            }
        );
    }

    #[test]
    fn test_header_without_colon_has_no_fields() {
        assert_eq!(
            classify_line("  $DEPOTS  "),
            LineKind::Header {
                name: "DEPOTS",
                fields: vec![],
            }
        );
    }

    #[test]
    fn test_header_splits_on_first_colon_only() {
        let (name, fields) = parse_header("TIMES:START:END;DAY");
        assert_eq!(name, "TIMES");
        assert_eq!(fields, vec!["START:END", "DAY"]);
    }

    #[test]
    fn test_header_name_is_trimmed_but_fields_are_not() {
        let (name, fields) = parse_header(" DEPOTS :ID; CAP");
        assert_eq!(name, "DEPOTS");
        assert_eq!(fields, vec!["ID", " CAP"]);
        assert_eq!(parse_header(" :A;B").0, "");
    }

    #[test]
    fn test_header_without_name() {
        let (name, fields) = parse_header(":A;B");
        assert_eq!(name, "");
        assert_eq!(fields, vec!["A", "B"]);
    }

    #[test]
    fn test_data_and_stray_lines() {
        assert_eq!(
            classify_line(" 1;2;17 "),
            LineKind::Data(vec!["1".into(), "2".into(), "17".into()])
        );
        assert_eq!(
            classify_line("1;"),
            LineKind::Data(vec!["1".into(), "".into()])
        );
        assert_eq!(classify_line("12 17"), LineKind::Stray);
    }

    #[test]
    fn test_comment_wins_over_separator() {
        // a header marker after the comment marker is still a comment
        assert_eq!(classify_line("*$ARCS:A;B"), LineKind::Comment);
    }
}
