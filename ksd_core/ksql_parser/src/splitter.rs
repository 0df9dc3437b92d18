const TERMINATOR: char = ';';
const LINE_COMMENT: &str = "--";

/// Splits a script into whitespace-normalized statements, in source order.
///
/// Every `;` ends a statement, including one inside a string literal or a
/// comment. Comments are removed from each fragment after splitting.
pub fn split_statements(script: &str) -> impl Iterator<Item = String> + '_ {
    script
        .split(TERMINATOR)
        .map(normalize_fragment)
        .filter(|statement| !statement.is_empty())
}

fn normalize_fragment(fragment: &str) -> String {
    fragment
        .lines()
        .map(strip_line_comment)
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn strip_line_comment(line: &str) -> &str {
    match line.find(LINE_COMMENT) {
        Some(idx) => &line[..idx],
        None => line,
    }
}
