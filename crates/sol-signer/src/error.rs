use thiserror::Error;

/// Errors produced while building or signing a Solana transaction.
///
/// Every variant is terminal for the request that produced it: nothing here
/// is transient, so callers must not submit anything after an error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SolError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid key type: expected ed25519, got {0}")]
    InvalidKeyType(String),

    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("fee payer {0} is not a signer of any instruction")]
    MissingFeePayer(String),

    #[error("missing private key for signer {0}")]
    MissingPrivateKey(String),

    #[error("malformed recent blockhash: {0}")]
    MalformedReference(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}
