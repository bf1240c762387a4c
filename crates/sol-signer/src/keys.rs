//! Ed25519 key material.
//!
//! Keys arrive already derived (e.g. from an HD wallet path). Two encodings
//! are accepted: the 32-byte secret seed, or the 64-byte `seed || public`
//! keypair used by Solana tooling.

use ed25519_dalek::Signer;
use zeroize::Zeroize;

use crate::address::{Address, PublicKey};
use crate::error::SolError;

/// Length of an Ed25519 signature.
pub const SIGNATURE_LEN: usize = 64;

/// An Ed25519 signing keypair. The secret half is wiped on drop.
pub struct Keypair {
    signing_key: ed25519_dalek::SigningKey,
}

impl Keypair {
    /// Load a keypair from a 32-byte seed or a 64-byte keypair.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SolError> {
        let signing_key = match bytes.len() {
            32 => {
                let mut seed = [0u8; 32];
                seed.copy_from_slice(bytes);
                let key = ed25519_dalek::SigningKey::from_bytes(&seed);
                seed.zeroize();
                key
            }
            64 => {
                let mut pair = [0u8; 64];
                pair.copy_from_slice(bytes);
                let key = ed25519_dalek::SigningKey::from_keypair_bytes(&pair);
                pair.zeroize();
                key.map_err(|_| {
                    SolError::InvalidPrivateKey("public half does not match secret seed".into())
                })?
            }
            n => {
                return Err(SolError::InvalidPrivateKey(format!(
                    "expected 32 or 64 bytes, got {n}"
                )))
            }
        };

        Ok(Self { signing_key })
    }

    /// The Ed25519 public key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey::ed25519(self.signing_key.verifying_key().to_bytes())
    }

    /// The Solana address of this keypair.
    pub fn address(&self) -> Address {
        Address::new(self.signing_key.verifying_key().to_bytes())
    }

    /// Sign `message` (deterministic, RFC 8032).
    pub fn sign(&self, message: &[u8]) -> [u8; SIGNATURE_LEN] {
        self.signing_key.sign(message).to_bytes()
    }
}

impl std::fmt::Debug for Keypair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Keypair")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}
