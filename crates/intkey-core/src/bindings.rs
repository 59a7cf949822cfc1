//! Session variable bindings
//!
//! Results of earlier commands are stored under a symbol and substituted
//! into later command lines with `$name` or `${name}`. `$$` is a literal `$`.

use crate::errors::{IntKeyError, Result};
use std::collections::BTreeMap;

/// Symbol table written by the dispatcher and read during expansion
pub trait Bindings {
    /// Store `value` under `symbol`, replacing any earlier binding
    fn bind(&mut self, symbol: &str, value: String);

    /// Current value of `symbol`
    fn lookup(&self, symbol: &str) -> Option<&str>;

    /// Substitute bound values into `text`
    ///
    /// # Errors
    ///
    /// `UnboundSymbol` when a placeholder names no binding, `InvalidPlaceholder`
    /// when `$` is followed by neither `$`, `{name}` nor a name.
    fn expand(&self, text: &str) -> Result<String> {
        let mut out = String::with_capacity(text.len());
        let mut chars = text.char_indices().peekable();

        while let Some((pos, ch)) = chars.next() {
            if ch != '$' {
                out.push(ch);
                continue;
            }

            let name = match chars.peek().copied() {
                Some((_, '$')) => {
                    chars.next();
                    out.push('$');
                    continue;
                }
                Some((_, '{')) => {
                    chars.next();
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some((_, '}')) => break,
                            Some((_, c)) if is_ident_char(c, name.is_empty()) => name.push(c),
                            _ => return Err(IntKeyError::InvalidPlaceholder { position: pos }),
                        }
                    }
                    if name.is_empty() {
                        return Err(IntKeyError::InvalidPlaceholder { position: pos });
                    }
                    name
                }
                Some((_, c)) if is_ident_char(c, true) => {
                    let mut name = String::new();
                    while let Some((_, c)) = chars.peek().copied() {
                        if !is_ident_char(c, name.is_empty()) {
                            break;
                        }
                        name.push(c);
                        chars.next();
                    }
                    name
                }
                _ => return Err(IntKeyError::InvalidPlaceholder { position: pos }),
            };

            let value = self
                .lookup(&name)
                .ok_or(IntKeyError::UnboundSymbol { symbol: name })?;
            out.push_str(value);
        }

        Ok(out)
    }
}

fn is_ident_char(c: char, first: bool) -> bool {
    c == '_' || c.is_ascii_alphabetic() || (!first && c.is_ascii_digit())
}

/// In-memory binding table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingTable {
    values: BTreeMap<String, String>,
}

impl BindingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Bindings for BindingTable {
    fn bind(&mut self, symbol: &str, value: String) {
        tracing::debug!(symbol, "bind");
        self.values.insert(symbol.to_string(), value);
    }

    fn lookup(&self, symbol: &str) -> Option<&str> {
        self.values.get(symbol).map(String::as_str)
    }
}
