//! Signing request and response envelopes.
//!
//! A request names exactly one operation from a closed set. Unknown
//! operation kinds still deserialize (into [`Operation::Unsupported`]) so the
//! signer can reject them with a proper error instead of a parse failure.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use zeroize::{Zeroize, Zeroizing};

/// Raw Ed25519 private key bytes (32-byte seed or 64-byte keypair).
///
/// Hex-encoded on the wire; wiped from memory on drop.
#[derive(Clone)]
pub struct PrivateKeyBytes(Zeroizing<Vec<u8>>);

impl PrivateKeyBytes {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(Zeroizing::new(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for PrivateKeyBytes {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl From<&[u8]> for PrivateKeyBytes {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes.to_vec())
    }
}

impl fmt::Debug for PrivateKeyBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrivateKeyBytes([REDACTED; {}])", self.0.len())
    }
}

impl<'de> Deserialize<'de> for PrivateKeyBytes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut text = String::deserialize(deserializer)?;
        let decoded = hex::decode(text.trim_start_matches("0x"));
        text.zeroize();
        decoded
            .map(Self::new)
            .map_err(|e| serde::de::Error::custom(format!("private key is not hex: {e}")))
    }
}

/// Native SOL transfer from the key's address to `recipient`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferOp {
    pub private_key: PrivateKeyBytes,
    pub recipient: String,
    pub lamports: u64,
}

/// Create a stake account funded with `lamports` and delegate it to
/// `validator`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelegateStakeOp {
    pub private_key: PrivateKeyBytes,
    pub validator: String,
    pub lamports: u64,
}

/// Deactivate the stake account delegated to `validator`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeactivateStakeOp {
    pub private_key: PrivateKeyBytes,
    pub validator: String,
}

/// Withdraw `lamports` from the stake account delegated to `validator` back
/// to the key's address.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawStakeOp {
    pub private_key: PrivateKeyBytes,
    pub validator: String,
    pub lamports: u64,
}

/// The operation a request asks for.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Operation {
    Transfer(TransferOp),
    DelegateStake(DelegateStakeOp),
    DeactivateStake(DeactivateStakeOp),
    WithdrawStake(WithdrawStakeOp),
    #[serde(other)]
    Unsupported,
}

impl Operation {
    pub fn kind(&self) -> &'static str {
        match self {
            Operation::Transfer(_) => "transfer",
            Operation::DelegateStake(_) => "delegateStake",
            Operation::DeactivateStake(_) => "deactivateStake",
            Operation::WithdrawStake(_) => "withdrawStake",
            Operation::Unsupported => "unsupported",
        }
    }
}

/// A request to build and sign one transaction.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigningRequest {
    /// Base58 recent blockhash.
    pub recent_blockhash: String,
    #[serde(default)]
    pub operation: Option<Operation>,
}

impl SigningRequest {
    pub fn new(recent_blockhash: impl Into<String>, operation: Operation) -> Self {
        Self {
            recent_blockhash: recent_blockhash.into(),
            operation: Some(operation),
        }
    }
}

/// The signed transaction, raw and hex-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigningResult {
    pub encoded: Vec<u8>,
    pub encoded_hex: String,
}

impl SigningResult {
    pub fn from_wire(encoded: Vec<u8>) -> Self {
        let encoded_hex = hex::encode(&encoded);
        Self {
            encoded,
            encoded_hex,
        }
    }
}
