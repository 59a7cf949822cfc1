//! Protocol messages understood by the integer-key contract
//!
//! Every operation is one variant of [`ContractMessage`]; [`ContractMessage::to_wire`]
//! is the only place that produces the textual form sent to the contract.

use crate::sexpr::SExpr;

/// A single contract invocation
#[derive(Debug, Clone, PartialEq)]
pub enum ContractMessage {
    /// Ask the contract for its public signing key
    GetPublicSigningKey,

    /// Create a key with an initial value
    Create { key: String, value: i64 },

    /// Increment the value of a key
    Inc { key: String, value: i64 },

    /// Decrement the value of a key
    Dec { key: String, value: i64 },

    /// Read the value of a key (never committed)
    GetValue { key: String },

    /// Hand ownership of a key to another identity
    TransferOwnership { key: String, owner: String },

    /// Place a key in escrow with an agent
    Escrow { key: String, agent: String },

    /// Request the escrow attestation for a key
    EscrowAttestation { key: String },

    /// Release an escrowed asset using an agent attestation
    Disburse {
        asset_key: String,
        dependencies: SExpr,
        signature: SExpr,
    },

    /// Swap ownership of two escrowed assets
    ExchangeOwnership {
        offered_key: String,
        max_bid_key: String,
        dependencies: SExpr,
        signature: SExpr,
    },
}

impl ContractMessage {
    /// Contract method name
    pub fn method(&self) -> &'static str {
        match self {
            ContractMessage::GetPublicSigningKey => "get-public-signing-key",
            ContractMessage::Create { .. } => "create",
            ContractMessage::Inc { .. } => "inc",
            ContractMessage::Dec { .. } => "dec",
            ContractMessage::GetValue { .. } => "get-value",
            ContractMessage::TransferOwnership { .. } => "transfer-ownership",
            ContractMessage::Escrow { .. } => "escrow",
            ContractMessage::EscrowAttestation { .. } => "escrow-attestation",
            ContractMessage::Disburse { .. } => "disburse",
            ContractMessage::ExchangeOwnership { .. } => "exchange-ownership",
        }
    }

    /// Read-only messages are submitted without committing a transaction
    pub fn is_read_only(&self) -> bool {
        matches!(self, ContractMessage::GetValue { .. })
    }

    /// Method call as an expression: `(method args...)`
    pub fn to_expression(&self) -> SExpr {
        let mut items = vec![SExpr::symbol(self.method())];
        match self {
            ContractMessage::GetPublicSigningKey => {}
            ContractMessage::Create { key, value }
            | ContractMessage::Inc { key, value }
            | ContractMessage::Dec { key, value } => {
                items.push(SExpr::raw_string(key.as_str()));
                items.push(SExpr::Integer(*value));
            }
            ContractMessage::GetValue { key } | ContractMessage::EscrowAttestation { key } => {
                items.push(SExpr::raw_string(key.as_str()));
            }
            ContractMessage::TransferOwnership { key, owner } => {
                items.push(SExpr::raw_string(key.as_str()));
                items.push(SExpr::raw_string(owner.as_str()));
            }
            ContractMessage::Escrow { key, agent } => {
                items.push(SExpr::raw_string(key.as_str()));
                items.push(SExpr::raw_string(agent.as_str()));
            }
            ContractMessage::Disburse {
                asset_key,
                dependencies,
                signature,
            } => {
                items.push(SExpr::raw_string(asset_key.as_str()));
                items.push(dependencies.clone());
                items.push(signature.clone());
            }
            ContractMessage::ExchangeOwnership {
                offered_key,
                max_bid_key,
                dependencies,
                signature,
            } => {
                items.push(SExpr::raw_string(offered_key.as_str()));
                items.push(SExpr::raw_string(max_bid_key.as_str()));
                items.push(dependencies.clone());
                items.push(signature.clone());
            }
        }
        SExpr::List(items)
    }

    /// Quoted wire text, e.g. `'(create "k" 0)`
    pub fn to_wire(&self) -> String {
        SExpr::Quote(Box::new(self.to_expression())).to_string()
    }
}

impl std::fmt::Display for ContractMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_wire())
    }
}
