//! System Program instructions.

use super::{instruction_data, AccountMeta, Instruction, SYSTEM_PROGRAM_ID};
use crate::address::Address;

/// System Program `CreateAccount` discriminator.
const CREATE_ACCOUNT_IX_INDEX: u32 = 0;
/// System Program `Transfer` discriminator.
const TRANSFER_IX_INDEX: u32 = 2;

/// Build a System Program `Transfer` instruction moving `lamports` from
/// `from` to `to`.
///
/// The recipient is listed read-only: it is only credited, and the signed
/// message header counts it among the read-only accounts.
pub fn transfer(from: &Address, to: &Address, lamports: u64) -> Instruction {
    // u32 LE instruction index (2 = Transfer) + u64 LE lamports.
    let mut data = instruction_data(TRANSFER_IX_INDEX, 8);
    data.extend_from_slice(&lamports.to_le_bytes());

    Instruction {
        program_id: SYSTEM_PROGRAM_ID,
        accounts: vec![
            AccountMeta::writable(*from, true),
            AccountMeta::readonly(*to, false),
        ],
        data,
    }
}

/// Build a System Program `CreateAccount` instruction.
///
/// Funds `new_account` with `lamports`, allocates `space` bytes and assigns
/// it to `owner`.
pub fn create_account(
    from: &Address,
    new_account: &Address,
    lamports: u64,
    space: u64,
    owner: &Address,
) -> Instruction {
    let mut data = instruction_data(CREATE_ACCOUNT_IX_INDEX, 8 + 8 + 32);
    data.extend_from_slice(&lamports.to_le_bytes());
    data.extend_from_slice(&space.to_le_bytes());
    data.extend_from_slice(owner.as_bytes());

    Instruction {
        program_id: SYSTEM_PROGRAM_ID,
        accounts: vec![
            AccountMeta::writable(*from, true),
            AccountMeta::writable(*new_account, false),
        ],
        data,
    }
}
