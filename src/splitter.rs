//! Quoted-field line splitter for delimited input.
//!
//! Deliberately tolerant: quotes that open and never close treat the rest of
//! the line as quoted, and no whitespace trimming is applied.

/// Splits one line of comma-delimited text into field values.
///
/// A `"` toggles quoted mode, except that `""` inside quotes emits a literal
/// quote. A comma inside quotes is part of the field value. The final field is
/// always emitted, even when empty. Empty or all-whitespace input yields an
/// empty list.
pub fn split_line(line: &str) -> Vec<String> {
    if line.trim().is_empty() {
        return Vec::new();
    }

    let mut result = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '"' {
            // Escaped quote ("") inside a quoted field
            if in_quotes && chars.peek() == Some(&'"') {
                current.push('"');
                chars.next();
            } else {
                in_quotes = !in_quotes;
            }
        } else if c == ',' && !in_quotes {
            result.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }

    // Last value, including the empty one after a trailing delimiter
    result.push(current);

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_fields() {
        assert_eq!(split_line("a,b,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn empty_input_yields_empty_list() {
        assert!(split_line("").is_empty());
        assert!(split_line("   ").is_empty());
    }

    #[test]
    fn quoted_field_keeps_embedded_delimiter() {
        assert_eq!(
            split_line(r#"one,"two, three",four"#),
            vec!["one", "two, three", "four"]
        );
    }

    #[test]
    fn escaped_quote_emits_single_literal_quote() {
        assert_eq!(split_line(r#""say ""hi""",x"#), vec![r#"say "hi""#, "x"]);
    }

    #[test]
    fn trailing_delimiter_emits_empty_final_field() {
        assert_eq!(split_line("a,b,"), vec!["a", "b", ""]);
    }

    #[test]
    fn line_without_delimiter_is_one_field() {
        assert_eq!(split_line("single"), vec!["single"]);
    }

    #[test]
    fn unclosed_quote_swallows_rest_of_line() {
        assert_eq!(split_line(r#"a,"b,c"#), vec!["a", "b,c"]);
    }

    #[test]
    fn no_whitespace_trimming() {
        assert_eq!(split_line(" a , b "), vec![" a ", " b "]);
    }
}
