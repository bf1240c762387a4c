//! Message compilation and wire serialization.
//!
//! The message is the part of a transaction that gets signed:
//!
//! ```text
//! Message:
//!   num_required_sigs     u8
//!   num_readonly_signed   u8
//!   num_readonly_unsigned u8
//!   num_accounts          compact-u16
//!   account_keys          32 bytes * num_accounts
//!   recent_blockhash      32 bytes
//!   num_instructions      compact-u16
//!   instructions[]        (see below)
//!
//! Instruction:
//!   program_id_index      u8
//!   num_accounts          compact-u16
//!   account_indices       u8 * num_accounts
//!   data_len              compact-u16
//!   data                  u8 * data_len
//! ```

use log::debug;

use crate::accounts::AccountTable;
use crate::address::Address;
use crate::compact::{encode_array, encode_bytes};
use crate::error::SolError;
use crate::instructions::Instruction;

/// A compiled instruction where account references are replaced by u8
/// indices into the message's `account_keys`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledInstruction {
    /// Index into `account_keys` for the program to invoke.
    pub program_id_index: u8,
    /// Indices into `account_keys` for each account the instruction uses.
    pub account_indices: Vec<u8>,
    /// Opaque instruction data.
    pub data: Vec<u8>,
}

/// A compiled, unsigned Solana message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Number of required signatures (first N accounts are signers).
    pub num_required_signatures: u8,
    /// How many of the signing accounts are read-only.
    pub num_readonly_signed: u8,
    /// How many of the non-signing accounts are read-only.
    pub num_readonly_unsigned: u8,

    /// All account keys referenced by this message, in canonical order.
    pub account_keys: Vec<Address>,

    /// Recent blockhash (32 bytes).
    pub recent_blockhash: [u8; 32],

    pub instructions: Vec<CompiledInstruction>,
}

impl Message {
    /// Compile `instructions` into a message paid for by `fee_payer`.
    ///
    /// The fee payer is always the first signer and sits at index 0.
    pub fn compile(
        fee_payer: &Address,
        recent_blockhash: &[u8; 32],
        instructions: &[Instruction],
    ) -> Result<Self, SolError> {
        let table = AccountTable::build(fee_payer, instructions)?;

        let mut compiled = Vec::with_capacity(instructions.len());
        for ix in instructions {
            let account_indices = ix
                .accounts
                .iter()
                .map(|meta| table.index_of(&meta.pubkey))
                .collect::<Result<Vec<u8>, SolError>>()?;

            compiled.push(CompiledInstruction {
                program_id_index: table.index_of(&ix.program_id)?,
                account_indices,
                data: ix.data.clone(),
            });
        }

        debug!(
            "compiled message: {} accounts, {} instructions, {} signers",
            table.len(),
            compiled.len(),
            table.num_required_signatures()
        );

        Ok(Self {
            num_required_signatures: table.num_required_signatures(),
            num_readonly_signed: table.num_readonly_signed(),
            num_readonly_unsigned: table.num_readonly_unsigned(),
            account_keys: table.keys(),
            recent_blockhash: *recent_blockhash,
            instructions: compiled,
        })
    }

    /// The accounts that must sign, in signature order.
    pub fn signer_keys(&self) -> &[Address] {
        let n = (self.num_required_signatures as usize).min(self.account_keys.len());
        &self.account_keys[..n]
    }

    /// Serialize the message (the bytes that get signed).
    pub fn serialize(&self) -> Result<Vec<u8>, SolError> {
        let mut buf = Vec::with_capacity(256);

        // Header: 3 bytes.
        buf.push(self.num_required_signatures);
        buf.push(self.num_readonly_signed);
        buf.push(self.num_readonly_unsigned);

        encode_array(&mut buf, &self.account_keys, |out, key| {
            out.extend_from_slice(key.as_bytes());
            Ok(())
        })?;

        buf.extend_from_slice(&self.recent_blockhash);

        encode_array(&mut buf, &self.instructions, |out, ix| {
            out.push(ix.program_id_index);
            encode_bytes(out, &ix.account_indices)?;
            encode_bytes(out, &ix.data)
        })?;

        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compact::encode_length;
    use crate::instructions::{
        stake, system, STAKE_CONFIG_ID, STAKE_PROGRAM_ID, SYSTEM_PROGRAM_ID, SYSVAR_CLOCK_ID,
        SYSVAR_RENT_ID,
    };

    fn transfer_message(blockhash: [u8; 32]) -> (Address, Address, Message) {
        let from = Address::new([1u8; 32]);
        let to = Address::new([2u8; 32]);
        let msg = Message::compile(&from, &blockhash, &[system::transfer(&from, &to, 100)]).unwrap();
        (from, to, msg)
    }

    #[test]
    fn compiled_instruction_indices() {
        let (from, to, msg) = transfer_message([0u8; 32]);

        assert_eq!(msg.instructions.len(), 1);
        let cix = &msg.instructions[0];

        let sys_idx = msg
            .account_keys
            .iter()
            .position(|k| *k == SYSTEM_PROGRAM_ID)
            .unwrap();
        assert_eq!(cix.program_id_index, sys_idx as u8);

        let from_idx = msg.account_keys.iter().position(|k| *k == from).unwrap();
        let to_idx = msg.account_keys.iter().position(|k| *k == to).unwrap();
        assert_eq!(cix.account_indices, vec![from_idx as u8, to_idx as u8]);
    }

    #[test]
    fn compiled_message_blockhash() {
        let (_, _, msg) = transfer_message([0xBB; 32]);
        assert_eq!(msg.recent_blockhash, [0xBB; 32]);
    }

    #[test]
    fn serialize_starts_with_header() {
        let (_, _, msg) = transfer_message([0u8; 32]);
        let bytes = msg.serialize().unwrap();

        assert_eq!(bytes[0], msg.num_required_signatures);
        assert_eq!(bytes[1], msg.num_readonly_signed);
        assert_eq!(bytes[2], msg.num_readonly_unsigned);
    }

    #[test]
    fn serialize_contains_blockhash() {
        let blockhash = [0xCC; 32];
        let (_, _, msg) = transfer_message(blockhash);
        let bytes = msg.serialize().unwrap();

        // Blockhash sits after: header(3) + compact-u16(num_accounts) + 32*num_accounts
        let num_accounts = msg.account_keys.len();
        let compact_len = encode_length(num_accounts as u16).len();
        let offset = 3 + compact_len + 32 * num_accounts;
        assert_eq!(&bytes[offset..offset + 32], &blockhash);
    }

    #[test]
    fn serialize_exact_transfer_layout() {
        let (from, to, msg) = transfer_message([0u8; 32]);
        let bytes = msg.serialize().unwrap();

        let mut expected = vec![1, 0, 2, 3];
        expected.extend_from_slice(from.as_bytes());
        expected.extend_from_slice(to.as_bytes());
        expected.extend_from_slice(&[0u8; 32]); // system program
        expected.extend_from_slice(&[0u8; 32]); // blockhash
        expected.extend_from_slice(&[1, 2, 2, 0, 1, 12, 2, 0, 0, 0]);
        expected.extend_from_slice(&100u64.to_le_bytes());
        assert_eq!(bytes, expected);
    }

    #[test]
    fn serialize_is_deterministic() {
        let payer = Address::new([5u8; 32]);
        let validator = Address::new([6u8; 32]);
        let ixs = stake::create_and_delegate(&payer, &validator, 10);

        let a = Message::compile(&payer, &[7u8; 32], &ixs).unwrap();
        let b = Message::compile(&payer, &[7u8; 32], &ixs).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.serialize().unwrap(), b.serialize().unwrap());
    }

    #[test]
    fn delegate_stake_header_and_order() {
        let payer = Address::new([5u8; 32]);
        let validator = Address::new([6u8; 32]);
        let stake_account = stake::derive_stake_address(&payer, &validator);
        let ixs = stake::create_and_delegate(&payer, &validator, 42);

        let msg = Message::compile(&payer, &[0u8; 32], &ixs).unwrap();
        let bytes = msg.serialize().unwrap();
        assert_eq!(&bytes[..4], &[1, 0, 5, 8]);
        assert_eq!(
            msg.account_keys,
            vec![
                payer,
                stake_account,
                SYSVAR_RENT_ID,
                validator,
                SYSVAR_CLOCK_ID,
                STAKE_CONFIG_ID,
                SYSTEM_PROGRAM_ID,
                STAKE_PROGRAM_ID,
            ]
        );
    }

    #[test]
    fn signer_keys_are_leading_accounts() {
        let (from, _, msg) = transfer_message([0u8; 32]);
        assert_eq!(msg.signer_keys(), &[from]);
    }

    #[test]
    fn compile_without_payer_signature_fails() {
        let payer = Address::new([1u8; 32]);
        let other = Address::new([2u8; 32]);
        let err = Message::compile(&payer, &[0u8; 32], &[system::transfer(&other, &payer, 1)])
            .unwrap_err();
        assert!(matches!(err, SolError::MissingFeePayer(_)));
    }
}
