//! Stake Program instructions.
//!
//! Stake instructions start with a 4-byte little-endian discriminator:
//! - 0: Initialize
//! - 2: DelegateStake
//! - 4: Withdraw
//! - 5: Deactivate
//!
//! The stake account used by every operation here is not supplied by the
//! caller. It is derived from the payer and the validator's vote account so
//! that the same pair always lands on the same stake account.

use sha2::{Digest, Sha256};

use super::{
    instruction_data, system, AccountMeta, Instruction, STAKE_CONFIG_ID, STAKE_PROGRAM_ID,
    SYSVAR_CLOCK_ID, SYSVAR_RENT_ID, SYSVAR_STAKE_HISTORY_ID,
};
use crate::address::Address;

const INITIALIZE_IX_INDEX: u32 = 0;
const DELEGATE_STAKE_IX_INDEX: u32 = 2;
const WITHDRAW_IX_INDEX: u32 = 4;
const DEACTIVATE_IX_INDEX: u32 = 5;

/// Size in bytes of a stake account's state.
pub const STAKE_ACCOUNT_SPACE: u64 = 1752;

/// Serialized `Lockup` length: u64 epoch + 32-byte custodian.
const LOCKUP_LEN: usize = 8 + 32;

/// Derive the stake account address for `payer` delegating to `validator`:
/// `sha256(payer || validator)`.
pub fn derive_stake_address(payer: &Address, validator: &Address) -> Address {
    let mut hasher = Sha256::new();
    hasher.update(payer.as_bytes());
    hasher.update(validator.as_bytes());
    let hash: [u8; 32] = hasher.finalize().into();
    Address::new(hash)
}

/// Build a Stake `Initialize` instruction with `authority` as both staker
/// and withdrawer and an empty lockup.
///
/// The Rent sysvar is listed writable, which gives a create-and-delegate
/// message the header `{1, 0, 5}`.
pub fn initialize(stake_account: &Address, authority: &Address) -> Instruction {
    let mut data = instruction_data(INITIALIZE_IX_INDEX, 32 + 32 + LOCKUP_LEN);
    data.extend_from_slice(authority.as_bytes()); // staker
    data.extend_from_slice(authority.as_bytes()); // withdrawer
    data.extend_from_slice(&[0u8; LOCKUP_LEN]);

    Instruction {
        program_id: STAKE_PROGRAM_ID,
        accounts: vec![
            AccountMeta::writable(*stake_account, false),
            AccountMeta::writable(SYSVAR_RENT_ID, false),
        ],
        data,
    }
}

/// Build a Stake `DelegateStake` instruction.
pub fn delegate(stake_account: &Address, vote_account: &Address, authority: &Address) -> Instruction {
    Instruction {
        program_id: STAKE_PROGRAM_ID,
        accounts: vec![
            AccountMeta::writable(*stake_account, false),
            AccountMeta::readonly(*vote_account, false),
            AccountMeta::readonly(SYSVAR_CLOCK_ID, false),
            AccountMeta::readonly(STAKE_CONFIG_ID, false),
            AccountMeta::readonly(*authority, true),
        ],
        data: instruction_data(DELEGATE_STAKE_IX_INDEX, 0),
    }
}

/// Build a Stake `Deactivate` instruction.
pub fn deactivate(stake_account: &Address, authority: &Address) -> Instruction {
    Instruction {
        program_id: STAKE_PROGRAM_ID,
        accounts: vec![
            AccountMeta::writable(*stake_account, false),
            AccountMeta::readonly(SYSVAR_CLOCK_ID, false),
            AccountMeta::readonly(*authority, true),
        ],
        data: instruction_data(DEACTIVATE_IX_INDEX, 0),
    }
}

/// Build a Stake `Withdraw` instruction paying `lamports` out to the
/// withdraw authority itself.
pub fn withdraw(stake_account: &Address, withdrawer: &Address, lamports: u64) -> Instruction {
    let mut data = instruction_data(WITHDRAW_IX_INDEX, 8);
    data.extend_from_slice(&lamports.to_le_bytes());

    Instruction {
        program_id: STAKE_PROGRAM_ID,
        accounts: vec![
            AccountMeta::writable(*stake_account, false),
            AccountMeta::writable(*withdrawer, true),
            AccountMeta::readonly(SYSVAR_CLOCK_ID, false),
            AccountMeta::readonly(SYSVAR_STAKE_HISTORY_ID, false),
        ],
        data,
    }
}

/// Instructions that create, initialize and delegate a fresh stake account
/// funded with `lamports`.
pub fn create_and_delegate(payer: &Address, validator: &Address, lamports: u64) -> Vec<Instruction> {
    let stake_account = derive_stake_address(payer, validator);
    vec![
        system::create_account(
            payer,
            &stake_account,
            lamports,
            STAKE_ACCOUNT_SPACE,
            &STAKE_PROGRAM_ID,
        ),
        initialize(&stake_account, payer),
        delegate(&stake_account, validator, payer),
    ]
}
