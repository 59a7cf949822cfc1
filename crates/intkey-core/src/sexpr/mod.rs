//! Scheme-style expressions exchanged with the contract
//!
//! Provides just what the controller needs from contract results:
//! parsing, positional field access, pair-list lookup and re-serialization
//! to literal text. No evaluation.

pub mod parser;
pub mod value;

pub use parser::parse_expression;
pub use value::SExpr;

impl SExpr {
    /// Parse exactly one expression
    pub fn parse(text: &str) -> crate::errors::Result<SExpr> {
        parse_expression(text)
    }
}
