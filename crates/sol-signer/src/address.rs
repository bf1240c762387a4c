//! Solana addresses.
//!
//! A Solana address is the raw 32-byte Ed25519 public key. There is no
//! hashing step (unlike Bitcoin or Ethereum); the textual form is plain
//! Base58 over the Bitcoin alphabet with no checksum.

use std::fmt;
use std::str::FromStr;

use crate::error::SolError;

/// Length in bytes of every Solana address.
pub const ADDRESS_LEN: usize = 32;

/// Elliptic curve a [`PublicKey`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveType {
    Secp256k1,
    Ed25519,
}

impl fmt::Display for CurveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurveType::Secp256k1 => f.write_str("secp256k1"),
            CurveType::Ed25519 => f.write_str("ed25519"),
        }
    }
}

/// A public key tagged with its curve, as handed over by key derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    pub curve: CurveType,
    pub bytes: Vec<u8>,
}

impl PublicKey {
    pub fn ed25519(bytes: [u8; 32]) -> Self {
        Self {
            curve: CurveType::Ed25519,
            bytes: bytes.to_vec(),
        }
    }
}

/// A 32-byte Solana account address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    /// Wrap raw bytes that are already known to be 32 long.
    pub const fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Decode a Base58 address string.
    pub fn parse(text: &str) -> Result<Self, SolError> {
        let bytes = bs58::decode(text)
            .into_vec()
            .map_err(|e| SolError::InvalidAddress(format!("base58 decode failed: {e}")))?;
        Self::try_from(bytes.as_slice())
    }

    /// Build an address from an Ed25519 public key.
    ///
    /// The address bytes are the public key bytes, copied verbatim.
    pub fn from_public_key(public_key: &PublicKey) -> Result<Self, SolError> {
        if public_key.curve != CurveType::Ed25519 {
            return Err(SolError::InvalidKeyType(public_key.curve.to_string()));
        }
        Self::try_from(public_key.bytes.as_slice())
    }

    /// Whether `text` decodes to a valid 32-byte address.
    pub fn is_valid(text: &str) -> bool {
        Self::parse(text).is_ok()
    }

    pub fn to_bytes(&self) -> [u8; ADDRESS_LEN] {
        self.0
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }
}

impl TryFrom<&[u8]> for Address {
    type Error = SolError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; ADDRESS_LEN] = bytes.try_into().map_err(|_| {
            SolError::InvalidAddress(format!(
                "expected {ADDRESS_LEN} bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(Self(arr))
    }
}

impl From<[u8; ADDRESS_LEN]> for Address {
    fn from(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for Address {
    type Err = SolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bs58::encode(self.0).into_string())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}
