//! Expression values and their canonical text form

use std::fmt;

/// A parsed Scheme-style expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SExpr {
    Symbol(String),
    Str(String),
    /// String emitted between quotes exactly as given, without escaping
    RawStr(String),
    Integer(i64),
    Boolean(bool),
    List(Vec<SExpr>),
    /// `'x`, kept distinct from a list so it re-serializes as written
    Quote(Box<SExpr>),
}

impl SExpr {
    /// Build a string atom
    pub fn string(value: impl Into<String>) -> Self {
        SExpr::Str(value.into())
    }

    /// Build a string atom whose text is written verbatim
    pub fn raw_string(value: impl Into<String>) -> Self {
        SExpr::RawStr(value.into())
    }

    /// Build a symbol atom
    pub fn symbol(name: impl Into<String>) -> Self {
        SExpr::Symbol(name.into())
    }

    /// Positional access into a list; `None` for atoms and short lists
    pub fn nth(&self, index: usize) -> Option<&SExpr> {
        match self {
            SExpr::List(items) => items.get(index),
            _ => None,
        }
    }

    /// Text of an atom without quoting: string contents, symbol name or digits
    ///
    /// Lists and quoted forms have no atom text.
    pub fn atom_text(&self) -> Option<String> {
        match self {
            SExpr::Str(s) | SExpr::RawStr(s) | SExpr::Symbol(s) => Some(s.clone()),
            SExpr::Integer(n) => Some(n.to_string()),
            SExpr::Boolean(b) => Some(if *b { "#t" } else { "#f" }.to_string()),
            SExpr::List(_) | SExpr::Quote(_) => None,
        }
    }

    /// View a list of pairs as ordered key/value entries
    ///
    /// Each element must be a two-element list `(k v)` or a dotted pair
    /// `(k . v)` whose key is an atom. Returns `None` otherwise.
    pub fn as_mapping(&self) -> Option<Vec<(String, &SExpr)>> {
        let SExpr::List(items) = self else {
            return None;
        };

        items
            .iter()
            .map(|item| {
                let SExpr::List(pair) = item else {
                    return None;
                };
                match pair.as_slice() {
                    [key, value] => Some((key.atom_text()?, value)),
                    [key, SExpr::Symbol(dot), value] if dot == "." => {
                        Some((key.atom_text()?, value))
                    }
                    _ => None,
                }
            })
            .collect()
    }
}

impl fmt::Display for SExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SExpr::Symbol(name) => write!(f, "{}", name),
            SExpr::Str(s) => {
                write!(f, "\"")?;
                for ch in s.chars() {
                    match ch {
                        '"' => write!(f, "\\\"")?,
                        '\\' => write!(f, "\\\\")?,
                        _ => write!(f, "{}", ch)?,
                    }
                }
                write!(f, "\"")
            }
            SExpr::RawStr(s) => write!(f, "\"{}\"", s),
            SExpr::Integer(n) => write!(f, "{}", n),
            SExpr::Boolean(true) => write!(f, "#t"),
            SExpr::Boolean(false) => write!(f, "#f"),
            SExpr::List(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
            SExpr::Quote(inner) => write!(f, "'{}", inner),
        }
    }
}
