//! CSV line lexer: splits one line into raw fields.
//!
//! Quoting never spans lines. An unterminated quote swallows the rest of
//! its line, commas included.

/// Tokenize a single CSV line into raw (uncleaned) field strings.
pub fn tokenize_line(line: &str) -> Vec<String> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            // Escaped quote inside a quoted span
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                chars.next();
                current.push('"');
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            c => current.push(c),
        }
    }

    fields.push(current);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_fields() {
        assert_eq!(tokenize_line("a,b,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_empty_fields() {
        assert_eq!(tokenize_line(",,"), vec!["", "", ""]);
        assert_eq!(tokenize_line(""), vec![""]);
    }

    #[test]
    fn test_quoted_comma_and_escaped_quote() {
        assert_eq!(tokenize_line(r#"1,"Main, St""""#), vec!["1", "Main, St\""]);
    }

    #[test]
    fn test_trailing_carriage_return() {
        assert_eq!(tokenize_line("a,b\r"), vec!["a", "b"]);
    }

    #[test]
    fn test_unterminated_quote_swallows_rest() {
        assert_eq!(tokenize_line(r#"a,"b,c"#), vec!["a", "b,c"]);
    }

    #[test]
    fn test_quote_mid_field_toggles() {
        assert_eq!(tokenize_line(r#"ab"c,d"e,f"#), vec!["abc,de", "f"]);
    }
}
