//! Top-level signing entry points.
//!
//! `sign_request` is the whole pipeline for one request: parse the inputs,
//! build the instructions for the requested operation, compile the message,
//! sign it and serialize the result. Each call is independent and pure.

use log::{debug, warn};

use crate::address::Address;
use crate::error::SolError;
use crate::instructions::{stake, system, Instruction};
use crate::keys::Keypair;
use crate::message::Message;
use crate::request::{Operation, PrivateKeyBytes, SigningRequest, SigningResult};
use crate::transaction::Transaction;

/// Build, sign and serialize the transaction described by `request`.
pub fn sign_request(request: &SigningRequest) -> Result<SigningResult, SolError> {
    let operation = request
        .operation
        .as_ref()
        .ok_or_else(|| SolError::UnsupportedOperation("request carries no operation".into()))?;

    let recent_blockhash = parse_blockhash(&request.recent_blockhash)?;
    debug!("signing {} request", operation.kind());

    let (keypair, instructions) = build_operation(operation)?;
    let message = Message::compile(&keypair.address(), &recent_blockhash, &instructions)?;
    let wire = Transaction::sign(message, &[&keypair])?.serialize()?;

    Ok(SigningResult::from_wire(wire))
}

/// JSON front end for [`sign_request`]: a `SigningRequest` document in, a
/// `SigningResult` document out.
pub fn sign_json(request_json: &str) -> Result<String, SolError> {
    let request: SigningRequest = serde_json::from_str(request_json)
        .map_err(|e| SolError::InvalidRequest(e.to_string()))?;
    let result = sign_request(&request)?;
    serde_json::to_string(&result).map_err(|e| SolError::Serialization(e.to_string()))
}

/// Decode the Base58 recent blockhash into its 32 raw bytes.
pub fn parse_blockhash(text: &str) -> Result<[u8; 32], SolError> {
    Address::parse(text)
        .map(|hash| hash.to_bytes())
        .map_err(|e| SolError::MalformedReference(format!("{text:?}: {e}")))
}

fn build_operation(operation: &Operation) -> Result<(Keypair, Vec<Instruction>), SolError> {
    match operation {
        Operation::Transfer(op) => {
            let keypair = load_key(&op.private_key)?;
            let recipient = Address::parse(&op.recipient)?;
            let ix = system::transfer(&keypair.address(), &recipient, op.lamports);
            Ok((keypair, vec![ix]))
        }
        Operation::DelegateStake(op) => {
            let keypair = load_key(&op.private_key)?;
            let validator = Address::parse(&op.validator)?;
            let ixs = stake::create_and_delegate(&keypair.address(), &validator, op.lamports);
            Ok((keypair, ixs))
        }
        Operation::DeactivateStake(op) => {
            let keypair = load_key(&op.private_key)?;
            let validator = Address::parse(&op.validator)?;
            let payer = keypair.address();
            let stake_account = stake::derive_stake_address(&payer, &validator);
            Ok((keypair, vec![stake::deactivate(&stake_account, &payer)]))
        }
        Operation::WithdrawStake(op) => {
            let keypair = load_key(&op.private_key)?;
            let validator = Address::parse(&op.validator)?;
            let payer = keypair.address();
            let stake_account = stake::derive_stake_address(&payer, &validator);
            Ok((
                keypair,
                vec![stake::withdraw(&stake_account, &payer, op.lamports)],
            ))
        }
        Operation::Unsupported => {
            warn!("rejecting signing request with unsupported operation kind");
            Err(SolError::UnsupportedOperation(
                "operation kind is not one of transfer, delegateStake, deactivateStake, withdrawStake"
                    .into(),
            ))
        }
    }
}

fn load_key(private_key: &PrivateKeyBytes) -> Result<Keypair, SolError> {
    Keypair::from_bytes(private_key.as_bytes())
}
