//! POSIX-style splitting of a command line into argument words

use crate::errors::{IntKeyError, Result};

/// Split `line` the way a POSIX shell would, without expansion
///
/// - unquoted whitespace separates words
/// - `'...'` is literal
/// - `"..."` is literal except `\"` and `\\`
/// - outside quotes `\` escapes the next character
///
/// # Errors
///
/// `UnbalancedQuote` if the line ends inside quotes or after a lone `\`.
pub fn split_words(line: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut chars = line.chars();

    while let Some(ch) = chars.next() {
        match ch {
            c if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            '\'' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(c) => current.push(c),
                        None => return Err(IntKeyError::UnbalancedQuote),
                    }
                }
            }
            '"' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(c @ ('"' | '\\')) => current.push(c),
                            Some(c) => {
                                current.push('\\');
                                current.push(c);
                            }
                            None => return Err(IntKeyError::UnbalancedQuote),
                        },
                        Some(c) => current.push(c),
                        None => return Err(IntKeyError::UnbalancedQuote),
                    }
                }
            }
            '\\' => {
                in_word = true;
                match chars.next() {
                    Some(c) => current.push(c),
                    None => return Err(IntKeyError::UnbalancedQuote),
                }
            }
            c => {
                in_word = true;
                current.push(c);
            }
        }
    }

    if in_word {
        words.push(current);
    }
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_words() {
        assert_eq!(
            split_words("  create -k  apple\t-v 3 ").unwrap(),
            vec!["create", "-k", "apple", "-v", "3"]
        );
    }

    #[test]
    fn test_single_quotes_keep_double_quotes() {
        let words = split_words(r#"disburse -a '((("key" "k")) () "s")'"#).unwrap();
        assert_eq!(words, vec!["disburse", "-a", r#"((("key" "k")) () "s")"#]);
    }

    #[test]
    fn test_double_quote_escapes() {
        let words = split_words(r#"x "a \"b\" \n c""#).unwrap();
        assert_eq!(words, vec!["x", r#"a "b" \n c"#]);
    }

    #[test]
    fn test_adjacent_quoted_segments_join() {
        assert_eq!(split_words(r#"ab'c d'"e""#).unwrap(), vec!["abc de"]);
    }

    #[test]
    fn test_empty_quotes_make_empty_word() {
        assert_eq!(split_words("get -k ''").unwrap(), vec!["get", "-k", ""]);
    }

    #[test]
    fn test_backslash_outside_quotes() {
        assert_eq!(split_words(r"a\ b").unwrap(), vec!["a b"]);
    }

    #[test]
    fn test_unbalanced_quote() {
        assert_eq!(
            split_words("get -k 'apple").unwrap_err(),
            IntKeyError::UnbalancedQuote
        );
        assert!(split_words("trailing \\").is_err());
    }

    #[test]
    fn test_blank_line_is_no_words() {
        assert!(split_words("   ").unwrap().is_empty());
    }
}
