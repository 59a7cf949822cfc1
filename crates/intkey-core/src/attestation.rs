//! Decoding of escrow attestations consumed by `disburse` and `exchange`
//!
//! An attestation is an expression with positional fields. Asset fields are
//! pair lists from which only the `"key"` entry is read; the dependency list
//! and the signature are carried through as literal text. Nothing here
//! checks signatures or the meaning of the fields.

use crate::errors::{IntKeyError, Result};
use crate::sexpr::SExpr;

/// Mapping entry naming the asset key
pub const ASSET_KEY_ENTRY: &str = "key";

/// Attestation authorizing a disbursement of one escrowed asset
#[derive(Debug, Clone, PartialEq)]
pub struct EscrowAttestation {
    pub asset_key: String,
    pub dependencies: SExpr,
    pub signature: SExpr,
}

/// Attestation authorizing an exchange of two escrowed assets
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeAttestation {
    pub offered_key: String,
    pub max_bid_key: String,
    pub dependencies: SExpr,
    pub signature: SExpr,
}

impl EscrowAttestation {
    /// Decode `(asset deps sig)`
    pub fn parse(text: &str) -> Result<Self> {
        let expr = parse_attestation(text)?;
        Ok(Self {
            asset_key: asset_key(&expr, 0)?,
            dependencies: field(&expr, 1)?.clone(),
            signature: field(&expr, 2)?.clone(),
        })
    }
}

impl ExchangeAttestation {
    /// Decode `(offered maxbid deps sig)`
    pub fn parse(text: &str) -> Result<Self> {
        let expr = parse_attestation(text)?;
        Ok(Self {
            offered_key: asset_key(&expr, 0)?,
            max_bid_key: asset_key(&expr, 1)?,
            dependencies: field(&expr, 2)?.clone(),
            signature: field(&expr, 3)?.clone(),
        })
    }
}

/// Parse attestation text, unwrapping a top-level quote
fn parse_attestation(text: &str) -> Result<SExpr> {
    match SExpr::parse(text)? {
        SExpr::Quote(inner) => Ok(*inner),
        expr => Ok(expr),
    }
}

fn field(expr: &SExpr, index: usize) -> Result<&SExpr> {
    expr.nth(index)
        .ok_or(IntKeyError::AttestationFieldMissing { index })
}

fn asset_key(expr: &SExpr, index: usize) -> Result<String> {
    let asset = field(expr, index)?;
    let mapping = asset
        .as_mapping()
        .ok_or(IntKeyError::AttestationNotMapping { index })?;

    mapping
        .into_iter()
        .find(|(k, _)| k == ASSET_KEY_ENTRY)
        .and_then(|(_, v)| v.atom_text())
        .ok_or(IntKeyError::AttestationKeyMissing { index })
}
