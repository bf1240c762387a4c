//! Transaction signing and wire serialization.
//!
//! ```text
//! Transaction:
//!   num_signatures          compact-u16
//!   signatures              64 bytes * num_signatures
//!   message                 (see `message.rs`)
//! ```
//!
//! Signature `i` belongs to account key `i` of the message.

use log::debug;

use crate::compact::{decode_length, encode_array};
use crate::error::SolError;
use crate::keys::{Keypair, SIGNATURE_LEN};
use crate::message::Message;

/// A fully signed transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub signatures: Vec<[u8; SIGNATURE_LEN]>,
    pub message: Message,
}

impl Transaction {
    /// Sign `message` with `keypairs`.
    ///
    /// Every one of the message's required signers must have a matching
    /// keypair; extra keypairs are ignored.
    pub fn sign(message: Message, keypairs: &[&Keypair]) -> Result<Self, SolError> {
        let message_bytes = message.serialize()?;

        let signatures = message
            .signer_keys()
            .iter()
            .map(|signer| {
                keypairs
                    .iter()
                    .find(|kp| kp.address() == *signer)
                    .map(|kp| kp.sign(&message_bytes))
                    .ok_or_else(|| SolError::MissingPrivateKey(signer.to_string()))
            })
            .collect::<Result<Vec<_>, SolError>>()?;

        debug!(
            "signed message of {} bytes with {} signature(s)",
            message_bytes.len(),
            signatures.len()
        );

        Ok(Self {
            signatures,
            message,
        })
    }

    /// Serialize into the wire format accepted by `sendTransaction`.
    pub fn serialize(&self) -> Result<Vec<u8>, SolError> {
        let message_bytes = self.message.serialize()?;

        let mut wire =
            Vec::with_capacity(1 + SIGNATURE_LEN * self.signatures.len() + message_bytes.len());
        encode_array(&mut wire, &self.signatures, |out, sig| {
            out.extend_from_slice(sig);
            Ok(())
        })?;
        wire.extend_from_slice(&message_bytes);

        Ok(wire)
    }
}

/// Split a serialized transaction into its signatures and message bytes.
pub fn split_signed(wire: &[u8]) -> Result<(Vec<[u8; SIGNATURE_LEN]>, &[u8]), SolError> {
    let (num_sigs, prefix_len) = decode_length(wire)?;

    let sigs_end = prefix_len + num_sigs as usize * SIGNATURE_LEN;
    if sigs_end > wire.len() {
        return Err(SolError::Serialization(
            "transaction too short: signature slots exceed length".into(),
        ));
    }

    let signatures = wire[prefix_len..sigs_end]
        .chunks_exact(SIGNATURE_LEN)
        .map(|chunk| {
            let mut sig = [0u8; SIGNATURE_LEN];
            sig.copy_from_slice(chunk);
            sig
        })
        .collect();

    Ok((signatures, &wire[sigs_end..]))
}
