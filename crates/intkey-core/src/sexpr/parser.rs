//! Recursive-descent reader for expression text

use super::value::SExpr;
use crate::errors::{IntKeyError, Result};

/// Deepest nesting of lists and quotes accepted by the reader
pub const MAX_DEPTH: usize = 256;

/// Parse exactly one expression from `text`
pub fn parse_expression(text: &str) -> Result<SExpr> {
    let mut reader = Reader::new(text);
    reader.skip_trivia();
    let expr = reader.read(0)?;
    reader.skip_trivia();
    if let Some((pos, _)) = reader.peek() {
        return Err(malformed(pos, "trailing input after expression"));
    }
    Ok(expr)
}

fn malformed(position: usize, reason: &str) -> IntKeyError {
    IntKeyError::MalformedExpression {
        position,
        reason: reason.to_string(),
    }
}

fn is_delimiter(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '(' | ')' | '"' | '\'' | ';')
}

struct Reader<'a> {
    text: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
}

impl<'a> Reader<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            chars: text.char_indices().peekable(),
        }
    }

    fn peek(&mut self) -> Option<(usize, char)> {
        self.chars.peek().copied()
    }

    fn skip_trivia(&mut self) {
        while let Some((_, ch)) = self.peek() {
            if ch.is_whitespace() {
                self.chars.next();
            } else if ch == ';' {
                while let Some((_, c)) = self.chars.next() {
                    if c == '\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    fn read(&mut self, depth: usize) -> Result<SExpr> {
        let Some((pos, ch)) = self.peek() else {
            return Err(malformed(self.text.len(), "unexpected end of input"));
        };

        if matches!(ch, '(' | '\'') && depth >= MAX_DEPTH {
            return Err(malformed(pos, "expression nested too deeply"));
        }

        match ch {
            '(' => {
                self.chars.next();
                self.read_list(pos, depth + 1)
            }
            ')' => Err(malformed(pos, "unexpected ')'")),
            '\'' => {
                self.chars.next();
                self.skip_trivia();
                Ok(SExpr::Quote(Box::new(self.read(depth + 1)?)))
            }
            '"' => {
                self.chars.next();
                self.read_string(pos)
            }
            _ => self.read_atom(pos),
        }
    }

    fn read_list(&mut self, open: usize, depth: usize) -> Result<SExpr> {
        let mut items = Vec::new();
        loop {
            self.skip_trivia();
            match self.peek() {
                None => return Err(malformed(open, "unclosed '('")),
                Some((_, ')')) => {
                    self.chars.next();
                    return Ok(SExpr::List(items));
                }
                Some(_) => items.push(self.read(depth)?),
            }
        }
    }

    fn read_string(&mut self, open: usize) -> Result<SExpr> {
        let mut out = String::new();
        while let Some((pos, ch)) = self.chars.next() {
            match ch {
                '"' => return Ok(SExpr::Str(out)),
                '\\' => match self.chars.next() {
                    Some((_, 'n')) => out.push('\n'),
                    Some((_, 't')) => out.push('\t'),
                    Some((_, c)) => out.push(c),
                    None => return Err(malformed(pos, "dangling escape in string")),
                },
                c => out.push(c),
            }
        }
        Err(malformed(open, "unterminated string"))
    }

    fn read_atom(&mut self, start: usize) -> Result<SExpr> {
        let mut end = start;
        while let Some((pos, ch)) = self.peek() {
            if is_delimiter(ch) {
                break;
            }
            end = pos + ch.len_utf8();
            self.chars.next();
        }

        let token = &self.text[start..end];
        match token {
            "#t" => Ok(SExpr::Boolean(true)),
            "#f" => Ok(SExpr::Boolean(false)),
            _ => Ok(token
                .parse::<i64>()
                .map(SExpr::Integer)
                .unwrap_or_else(|_| SExpr::Symbol(token.to_string()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_atoms() {
        assert_eq!(parse_expression("42").unwrap(), SExpr::Integer(42));
        assert_eq!(parse_expression("-7").unwrap(), SExpr::Integer(-7));
        assert_eq!(parse_expression("#f").unwrap(), SExpr::Boolean(false));
        assert_eq!(parse_expression("get-value").unwrap(), SExpr::symbol("get-value"));
        assert_eq!(parse_expression(r#""a b""#).unwrap(), SExpr::string("a b"));
    }

    #[test]
    fn test_parse_string_escapes() {
        let e = parse_expression(r#""say \"hi\"\n""#).unwrap();
        assert_eq!(e, SExpr::string("say \"hi\"\n"));
    }

    #[test]
    fn test_parse_nested_list_with_comment() {
        let e = parse_expression("(a ; note\n (b 1) \"c\")").unwrap();
        assert_eq!(
            e,
            SExpr::List(vec![
                SExpr::symbol("a"),
                SExpr::List(vec![SExpr::symbol("b"), SExpr::Integer(1)]),
                SExpr::string("c"),
            ])
        );
    }

    #[test]
    fn test_parse_quote() {
        let e = parse_expression("'(x)").unwrap();
        assert_eq!(e, SExpr::Quote(Box::new(SExpr::List(vec![SExpr::symbol("x")]))));
        assert_eq!(e.to_string(), "'(x)");
    }

    #[test]
    fn test_reserialize_is_stable() {
        let text = r#"((("key" "k1") ("value" 10)) (("k0" 3)) "c2lnbmF0dXJl")"#;
        assert_eq!(parse_expression(text).unwrap().to_string(), text);
    }

    #[test]
    fn test_unclosed_list_is_error() {
        let err = parse_expression("(a (b)").unwrap_err();
        assert!(matches!(err, IntKeyError::MalformedExpression { position: 0, .. }));
    }

    #[test]
    fn test_unexpected_close_is_error() {
        let err = parse_expression(")").unwrap_err();
        assert!(matches!(err, IntKeyError::MalformedExpression { .. }));
    }

    #[test]
    fn test_nesting_at_limit_is_accepted() {
        let text = format!("{}{}", "(".repeat(MAX_DEPTH), ")".repeat(MAX_DEPTH));
        assert!(parse_expression(&text).is_ok());
    }

    #[test]
    fn test_deep_nesting_is_error() {
        let text = format!("{}{}", "(".repeat(200_000), ")".repeat(200_000));
        let err = parse_expression(&text).unwrap_err();
        assert_eq!(
            err,
            IntKeyError::MalformedExpression {
                position: MAX_DEPTH,
                reason: "expression nested too deeply".to_string(),
            }
        );
    }

    #[test]
    fn test_long_quote_chain_is_error() {
        let text = format!("{}x", "'".repeat(100_000));
        let err = parse_expression(&text).unwrap_err();
        assert!(matches!(err, IntKeyError::MalformedExpression { .. }));
    }

    #[test]
    fn test_unterminated_string_is_error() {
        assert!(parse_expression("\"abc").is_err());
    }

    #[test]
    fn test_trailing_input_is_error() {
        let err = parse_expression("(a) b").unwrap_err();
        assert!(matches!(err, IntKeyError::MalformedExpression { position: 4, .. }));
    }

    #[test]
    fn test_empty_input_is_error() {
        assert!(parse_expression("   ").is_err());
    }
}
