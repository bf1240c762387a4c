//! Instruction types and the per-program instruction builders.
//!
//! Builders return uncompiled [`Instruction`]s that reference accounts by
//! address. Compilation into index form happens in [`crate::message`].

pub mod stake;
pub mod system;

use crate::address::Address;

// ---------------------------------------------------------------------------
// Well-known program and sysvar IDs
// ---------------------------------------------------------------------------

/// System Program: `11111111111111111111111111111111` (32 zero bytes).
pub const SYSTEM_PROGRAM_ID: Address = Address::new([0u8; 32]);

/// Stake Program: `Stake11111111111111111111111111111111111111`
pub const STAKE_PROGRAM_ID: Address = Address::new([
    0x06, 0xa1, 0xd8, 0x17, 0x91, 0x37, 0x54, 0x2a, 0x98, 0x34, 0x37, 0xbd, 0xfe, 0x2a,
    0x7a, 0xb2, 0x55, 0x7f, 0x53, 0x5c, 0x8a, 0x78, 0x72, 0x2b, 0x68, 0xa4, 0x9d, 0xc0,
    0x00, 0x00, 0x00, 0x00,
]);

/// Stake config account: `StakeConfig11111111111111111111111111111111`
pub const STAKE_CONFIG_ID: Address = Address::new([
    0x06, 0xa1, 0xd8, 0x17, 0xa5, 0x02, 0x05, 0x0b, 0x68, 0x07, 0x91, 0xe6, 0xce, 0x6d,
    0xb8, 0x8e, 0x1e, 0x5b, 0x71, 0x50, 0xf6, 0x1f, 0xc6, 0x79, 0x0a, 0x4e, 0xb4, 0xd1,
    0x00, 0x00, 0x00, 0x00,
]);

/// Clock sysvar: `SysvarC1ock11111111111111111111111111111111`
pub const SYSVAR_CLOCK_ID: Address = Address::new([
    0x06, 0xa7, 0xd5, 0x17, 0x18, 0xc7, 0x74, 0xc9, 0x28, 0x56, 0x63, 0x98, 0x69, 0x1d,
    0x5e, 0xb6, 0x8b, 0x5e, 0xb8, 0xa3, 0x9b, 0x4b, 0x6d, 0x5c, 0x73, 0x55, 0x5b, 0x21,
    0x00, 0x00, 0x00, 0x00,
]);

/// Rent sysvar: `SysvarRent111111111111111111111111111111111`
pub const SYSVAR_RENT_ID: Address = Address::new([
    0x06, 0xa7, 0xd5, 0x17, 0x19, 0x2c, 0x5c, 0x51, 0x21, 0x8c, 0xc9, 0x4c, 0x3d, 0x4a,
    0xf1, 0x7f, 0x58, 0xda, 0xee, 0x08, 0x9b, 0xa1, 0xfd, 0x44, 0xe3, 0xdb, 0xd9, 0x8a,
    0x00, 0x00, 0x00, 0x00,
]);

/// Stake history sysvar: `SysvarStakeHistory1111111111111111111111111`
pub const SYSVAR_STAKE_HISTORY_ID: Address = Address::new([
    0x06, 0xa7, 0xd5, 0x17, 0x19, 0x35, 0x84, 0xd0, 0xfe, 0xed, 0x9b, 0xb3, 0x43, 0x1d,
    0x13, 0x20, 0x6b, 0xe5, 0x44, 0x28, 0x1b, 0x57, 0xb8, 0x56, 0x6c, 0xc5, 0x37, 0x5f,
    0xf4, 0x00, 0x00, 0x00,
]);

// ---------------------------------------------------------------------------
// Data structures
// ---------------------------------------------------------------------------

/// A single account reference in a Solana instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountMeta {
    pub pubkey: Address,
    pub is_signer: bool,
    pub is_writable: bool,
}

impl AccountMeta {
    pub fn writable(pubkey: Address, is_signer: bool) -> Self {
        Self {
            pubkey,
            is_signer,
            is_writable: true,
        }
    }

    pub fn readonly(pubkey: Address, is_signer: bool) -> Self {
        Self {
            pubkey,
            is_signer,
            is_writable: false,
        }
    }
}

/// A Solana instruction (before it is compiled into a message).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub program_id: Address,
    pub accounts: Vec<AccountMeta>,
    pub data: Vec<u8>,
}

/// Start an instruction payload with a little-endian `u32` discriminator.
///
/// Both the System and the Stake program use bincode-encoded enums, whose
/// variant tag is a `u32`.
pub(crate) fn instruction_data(opcode: u32, capacity: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(4 + capacity);
    data.extend_from_slice(&opcode.to_le_bytes());
    data
}
