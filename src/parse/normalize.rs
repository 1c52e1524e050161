//! Value normalizer: locale-tolerant cleaning of raw CSV cells.

const BOM: char = '\u{feff}';
const WORD_JOINER: char = '\u{2060}';
const NBSP: char = '\u{a0}';
const NARROW_NBSP: char = '\u{202f}';

/// Whitespace as far as cell trimming is concerned. A stray BOM counts.
pub(crate) fn is_blank(c: char) -> bool {
    c.is_whitespace() || c == BOM
}

/// Clean a raw cell: leading BOM, surrounding whitespace, one layer of
/// surrounding quotes (unescaping `""`), no-break spaces → plain spaces.
pub fn clean_value(raw: &str) -> String {
    let s = raw.strip_prefix([BOM, WORD_JOINER]).unwrap_or(raw);
    let s = s.trim_matches(is_blank);

    let unquoted = match s.strip_prefix('"').and_then(|rest| rest.strip_suffix('"')) {
        Some(inner) => inner.replace("\"\"", "\""),
        // A lone quote is an empty quoted value
        None if s == "\"" => String::new(),
        None => s.to_owned(),
    };

    unquoted.replace([NBSP, NARROW_NBSP], " ")
}

/// Parse a cell as a finite number, accepting `,` as decimal separator.
///
/// Returns `None` for blank cells, garbage and non-finite results.
pub fn parse_number(raw: &str) -> Option<f64> {
    let normalized: String = clean_value(raw)
        .chars()
        .filter(|c| !matches!(*c, BOM | NBSP | NARROW_NBSP))
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    let normalized = normalized.trim();
    if normalized.is_empty() {
        return None;
    }
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// `true`, `1` or `yes` (any case) → true. Everything else → false.
pub fn parse_bool(raw: &str) -> bool {
    matches!(raw.trim().to_lowercase().as_str(), "true" | "1" | "yes")
}
