//! The account table: every account a message touches, deduplicated and in
//! canonical order.
//!
//! Ordering rules:
//!   1. writable signers  (fee payer first)
//!   2. read-only signers
//!   3. writable non-signers
//!   4. read-only non-signers
//!
//! Within a bucket accounts keep the order in which they were first seen:
//! the fee payer, then each instruction's accounts in order, then every
//! instruction's program id.

use std::collections::HashMap;

use crate::address::Address;
use crate::error::SolError;
use crate::instructions::Instruction;

/// Maximum number of accounts addressable by a `u8` index.
const MAX_ACCOUNTS: usize = u8::MAX as usize + 1;

/// A merged account entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableEntry {
    pub pubkey: Address,
    pub is_signer: bool,
    pub is_writable: bool,
}

impl TableEntry {
    fn bucket(&self) -> u8 {
        match (self.is_signer, self.is_writable) {
            (true, true) => 0,
            (true, false) => 1,
            (false, true) => 2,
            (false, false) => 3,
        }
    }
}

/// Deduplicated, canonically ordered accounts plus the reverse index.
#[derive(Debug, Clone)]
pub struct AccountTable {
    entries: Vec<TableEntry>,
    index: HashMap<Address, u8>,
    /// (num_required_signatures, num_readonly_signed, num_readonly_unsigned)
    header: (u8, u8, u8),
}

impl AccountTable {
    /// Collect and order the accounts of `instructions` with `fee_payer` at
    /// index 0.
    pub fn build(fee_payer: &Address, instructions: &[Instruction]) -> Result<Self, SolError> {
        let payer_signs = instructions
            .iter()
            .flat_map(|ix| ix.accounts.iter())
            .any(|meta| meta.pubkey == *fee_payer && meta.is_signer);
        if !payer_signs {
            return Err(SolError::MissingFeePayer(fee_payer.to_string()));
        }

        let mut entries: Vec<TableEntry> = Vec::new();
        let mut positions: HashMap<Address, usize> = HashMap::new();

        let mut upsert = |pubkey: Address, signer: bool, writable: bool| {
            if let Some(&pos) = positions.get(&pubkey) {
                let entry = &mut entries[pos];
                entry.is_signer |= signer;
                entry.is_writable |= writable;
            } else {
                positions.insert(pubkey, entries.len());
                entries.push(TableEntry {
                    pubkey,
                    is_signer: signer,
                    is_writable: writable,
                });
            }
        };

        // Fee payer is always signer + writable.
        upsert(*fee_payer, true, true);

        for ix in instructions {
            for meta in &ix.accounts {
                upsert(meta.pubkey, meta.is_signer, meta.is_writable);
            }
        }
        // Program IDs are non-signer, read-only accounts.
        for ix in instructions {
            upsert(ix.program_id, false, false);
        }

        // Stable sort keeps first-encounter order inside each bucket, and the
        // payer was seen first as a writable signer, so it stays at index 0.
        entries.sort_by_key(TableEntry::bucket);

        if entries.len() > MAX_ACCOUNTS {
            return Err(SolError::Serialization(format!(
                "{} accounts exceed the {MAX_ACCOUNTS} addressable by a u8 index",
                entries.len()
            )));
        }

        let index = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.pubkey, i as u8))
            .collect();

        let header = (
            header_count(&entries, |e| e.is_signer)?,
            header_count(&entries, |e| e.is_signer && !e.is_writable)?,
            header_count(&entries, |e| !e.is_signer && !e.is_writable)?,
        );

        Ok(Self {
            entries,
            index,
            header,
        })
    }

    /// Table index of `pubkey`.
    pub fn index_of(&self, pubkey: &Address) -> Result<u8, SolError> {
        self.index.get(pubkey).copied().ok_or_else(|| {
            SolError::Serialization(format!("account {pubkey} not in account table"))
        })
    }

    pub fn entries(&self) -> &[TableEntry] {
        &self.entries
    }

    pub fn keys(&self) -> Vec<Address> {
        self.entries.iter().map(|e| e.pubkey).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of signer accounts (buckets 1 + 2).
    pub fn num_required_signatures(&self) -> u8 {
        self.header.0
    }

    /// Number of read-only signer accounts (bucket 2).
    pub fn num_readonly_signed(&self) -> u8 {
        self.header.1
    }

    /// Number of read-only non-signer accounts (bucket 4).
    pub fn num_readonly_unsigned(&self) -> u8 {
        self.header.2
    }
}

fn header_count(
    entries: &[TableEntry],
    pred: impl Fn(&TableEntry) -> bool,
) -> Result<u8, SolError> {
    let count = entries.iter().filter(|e| pred(e)).count();
    u8::try_from(count).map_err(|_| {
        SolError::Serialization(format!("{count} accounts overflow a header count"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instructions::{stake, system, AccountMeta, SYSTEM_PROGRAM_ID};
    use rand::RngCore;

    fn key(b: u8) -> Address {
        Address::new([b; 32])
    }

    #[test]
    fn transfer_table_order() {
        let from = key(1);
        let to = key(2);
        let table = AccountTable::build(&from, &[system::transfer(&from, &to, 1000)]).unwrap();

        assert_eq!(table.keys(), vec![from, to, SYSTEM_PROGRAM_ID]);
        assert_eq!(table.num_required_signatures(), 1);
        assert_eq!(table.num_readonly_signed(), 0);
        // Recipient and System program.
        assert_eq!(table.num_readonly_unsigned(), 2);
    }

    #[test]
    fn self_transfer_deduplicates_accounts() {
        let k = key(0xAA);
        let table = AccountTable::build(&k, &[system::transfer(&k, &k, 100)]).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.num_required_signatures(), 1);
    }

    #[test]
    fn flags_are_or_merged() {
        let payer = key(1);
        let shared = key(2);
        let program = key(9);
        let ixs = [
            Instruction {
                program_id: program,
                accounts: vec![
                    AccountMeta::writable(payer, true),
                    AccountMeta::readonly(shared, true),
                ],
                data: vec![],
            },
            Instruction {
                program_id: program,
                accounts: vec![AccountMeta::writable(shared, false)],
                data: vec![],
            },
        ];
        let table = AccountTable::build(&payer, &ixs).unwrap();
        let entry = table.entries()[table.index_of(&shared).unwrap() as usize];
        assert!(entry.is_signer);
        assert!(entry.is_writable);
        assert_eq!(table.num_required_signatures(), 2);
        assert_eq!(table.num_readonly_signed(), 0);
    }

    #[test]
    fn payer_first_even_when_listed_last() {
        let payer = key(1);
        let stake_account = key(2);
        let table =
            AccountTable::build(&payer, &[stake::deactivate(&stake_account, &payer)]).unwrap();
        assert_eq!(table.index_of(&payer).unwrap(), 0);
        // Payer is promoted to writable, so no read-only signers.
        assert_eq!(table.num_readonly_signed(), 0);
        assert_eq!(table.index_of(&stake_account).unwrap(), 1);
    }

    #[test]
    fn program_ids_follow_instruction_accounts() {
        let payer = key(1);
        let validator = key(7);
        let ixs = stake::create_and_delegate(&payer, &validator, 42);
        let table = AccountTable::build(&payer, &ixs).unwrap();
        let keys = table.keys();

        // System and Stake programs are the last two read-only accounts.
        assert_eq!(keys[keys.len() - 2], SYSTEM_PROGRAM_ID);
        assert_eq!(keys[keys.len() - 1], crate::instructions::STAKE_PROGRAM_ID);
    }

    #[test]
    fn missing_fee_payer_fails() {
        let payer = key(1);
        let other = key(2);
        let err = AccountTable::build(&payer, &[system::transfer(&other, &key(3), 5)]).unwrap_err();
        assert!(matches!(err, SolError::MissingFeePayer(_)));
    }

    #[test]
    fn payer_only_writable_is_not_enough() {
        let payer = key(1);
        let ix = Instruction {
            program_id: key(9),
            accounts: vec![AccountMeta::writable(payer, false)],
            data: vec![],
        };
        assert!(matches!(
            AccountTable::build(&payer, &[ix]),
            Err(SolError::MissingFeePayer(_))
        ));
    }

    #[test]
    fn unknown_account_has_no_index() {
        let payer = key(1);
        let table = AccountTable::build(&payer, &[system::transfer(&payer, &key(2), 1)]).unwrap();
        assert!(table.index_of(&key(0x55)).is_err());
    }

    #[test]
    fn too_many_accounts_fails() {
        let payer = key(1);
        let mut rng = rand::thread_rng();
        let accounts = (0..300)
            .map(|_| {
                let mut b = [0u8; 32];
                rng.fill_bytes(&mut b);
                AccountMeta::readonly(Address::new(b), false)
            })
            .chain(std::iter::once(AccountMeta::writable(payer, true)))
            .collect();
        let ix = Instruction {
            program_id: key(9),
            accounts,
            data: vec![],
        };
        assert!(matches!(
            AccountTable::build(&payer, &[ix]),
            Err(SolError::Serialization(_))
        ));
    }

    #[test]
    fn random_instruction_sets_respect_bucket_order() {
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let payer = key(0xFE);
            let mut ixs = Vec::new();
            for _ in 0..(1 + rng.next_u32() % 4) {
                let mut accounts = Vec::new();
                for _ in 0..(rng.next_u32() % 6) {
                    // Small key space so duplicates actually happen.
                    let b = (rng.next_u32() % 8) as u8;
                    let flags = rng.next_u32();
                    accounts.push(AccountMeta {
                        pubkey: key(b),
                        is_signer: flags & 1 == 1,
                        is_writable: flags & 2 == 2,
                    });
                }
                ixs.push(Instruction {
                    program_id: key(0x80 + (rng.next_u32() % 3) as u8),
                    accounts,
                    data: vec![],
                });
            }
            ixs[0].accounts.push(AccountMeta::readonly(payer, true));

            let table = AccountTable::build(&payer, &ixs).unwrap();
            assert_eq!(table.entries()[0].pubkey, payer);

            let buckets: Vec<u8> = table.entries().iter().map(TableEntry::bucket).collect();
            assert!(buckets.windows(2).all(|w| w[0] <= w[1]), "{buckets:?}");

            let mut seen = std::collections::HashSet::new();
            assert!(table.keys().iter().all(|k| seen.insert(*k)));
        }
    }
}
