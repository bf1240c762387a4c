//! Solana transaction building and signing.
//!
//! Takes a typed request (SOL transfer, stake delegation, deactivation or
//! withdrawal), builds the instructions, orders and deduplicates the
//! accounts, serializes the message in Solana's compact wire format and
//! signs it with Ed25519.
//!
//! Like the rest of the wallet crates this avoids `solana-sdk`: the wire
//! format is written by hand on top of `ed25519-dalek` and `bs58`.

pub mod accounts;
pub mod address;
pub mod compact;
pub mod error;
pub mod instructions;
pub mod keys;
pub mod message;
pub mod request;
pub mod signer;
pub mod transaction;

// Re-export key public types for ergonomic imports.
pub use accounts::AccountTable;
pub use address::{Address, CurveType, PublicKey};
pub use error::SolError;
pub use instructions::{AccountMeta, Instruction};
pub use keys::Keypair;
pub use message::{CompiledInstruction, Message};
pub use request::{
    DeactivateStakeOp, DelegateStakeOp, Operation, PrivateKeyBytes, SigningRequest, SigningResult,
    TransferOp, WithdrawStakeOp,
};
pub use signer::{sign_json, sign_request};
pub use transaction::Transaction;
