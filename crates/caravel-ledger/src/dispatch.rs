//! # Named-Operation Dispatch
//!
//! The contract's external invocation surface: operation name plus
//! string arguments in, a single-level JSON-encoded result string out.
//! This is the seam the transaction gateway calls through.
//!
//! ## Encoding Invariant
//!
//! Every result is JSON-encoded exactly once. Operations never
//! stringify an already-stringified payload, so a well-behaved client
//! decodes once and is done; the gateway's lenient decoder exists only
//! for foreign contracts that do not honor this invariant.

use serde::Serialize;
use serde_json::Value;

use caravel_core::{AssetKey, DocType, LedgerError};
use caravel_schema::Schema;

use crate::contract::AssetContract;
use crate::state::LedgerState;

/// Invoke a contract operation by name with string arguments.
///
/// Arity and argument formats are checked here; everything domain
/// level is the contract's job. `ledger` is the invoked transaction's
/// state view; the caller owns the commit/abort decision.
pub fn invoke(
    contract: &AssetContract,
    ledger: &mut dyn LedgerState,
    operation: &str,
    args: &[String],
) -> Result<String, LedgerError> {
    tracing::debug!(operation, argc = args.len(), "invoking contract operation");
    match operation {
        "initLedger" => {
            expect_args(operation, args, 0, 0)?;
            contract.init_ledger(ledger)?;
            encode(&Value::Null)
        }
        "createAsset" => {
            expect_args(operation, args, 2, 2)?;
            let schema: Schema = parse_arg(operation, "schema", &args[0])?;
            let payload: Value = parse_arg(operation, "payload", &args[1])?;
            encode(&contract.create_asset(ledger, &schema, &payload)?)
        }
        "queryAsset" => {
            expect_args(operation, args, 1, 2)?;
            let key = AssetKey::new(args[0].clone());
            let doc_type = optional_doc_type(args.get(1));
            encode(&contract.query_asset(ledger, &key, &doc_type)?)
        }
        "queryAllAsset" => {
            expect_args(operation, args, 1, 1)?;
            encode(&contract.query_all_assets(ledger, &DocType::new(args[0].clone()))?)
        }
        "queryAssetByProp" => {
            expect_args(operation, args, 2, 2)?;
            // Arguments arrive as strings, so property equality through
            // this surface is always string-valued.
            encode(&contract.query_asset_by_prop(
                ledger,
                &args[0],
                &Value::String(args[1].clone()),
            )?)
        }
        "updateAsset" => {
            expect_args(operation, args, 2, 2)?;
            let key = AssetKey::new(args[0].clone());
            let partial: Value = parse_arg(operation, "partial fields", &args[1])?;
            let partial = partial
                .as_object()
                .ok_or_else(|| LedgerError::InvalidArguments {
                    operation: operation.to_string(),
                    reason: "partial fields must be a JSON object".to_string(),
                })?;
            encode(&contract.update_asset(ledger, &key, partial)?)
        }
        "deleteAsset" => {
            expect_args(operation, args, 1, 2)?;
            let key = AssetKey::new(args[0].clone());
            let doc_type = optional_doc_type(args.get(1));
            encode(&contract.delete_asset(ledger, &key, &doc_type)?)
        }
        "changeCarOwner" => {
            expect_args(operation, args, 1, 1)?;
            let transfer: Value = parse_arg(operation, "transfer object", &args[0])?;
            encode(&contract.change_car_owner(ledger, &transfer)?)
        }
        other => Err(LedgerError::UnknownOperation(other.to_string())),
    }
}

/// Names of all operations the contract exposes, for help output.
pub const OPERATIONS: &[&str] = &[
    "initLedger",
    "createAsset",
    "queryAsset",
    "queryAllAsset",
    "queryAssetByProp",
    "updateAsset",
    "deleteAsset",
    "changeCarOwner",
];

fn expect_args(
    operation: &str,
    args: &[String],
    min: usize,
    max: usize,
) -> Result<(), LedgerError> {
    if args.len() < min || args.len() > max {
        let expected = if min == max {
            format!("{min}")
        } else {
            format!("{min} to {max}")
        };
        return Err(LedgerError::InvalidArguments {
            operation: operation.to_string(),
            reason: format!("expected {expected} argument(s), got {}", args.len()),
        });
    }
    Ok(())
}

fn parse_arg<T: serde::de::DeserializeOwned>(
    operation: &str,
    what: &str,
    raw: &str,
) -> Result<T, LedgerError> {
    serde_json::from_str(raw).map_err(|e| LedgerError::InvalidArguments {
        operation: operation.to_string(),
        reason: format!("{what} is not valid JSON: {e}"),
    })
}

/// An omitted or empty doc-type argument means the wildcard.
fn optional_doc_type(arg: Option<&String>) -> DocType {
    match arg {
        Some(s) if !s.is_empty() => DocType::new(s.clone()),
        _ => DocType::any(),
    }
}

fn encode<T: Serialize>(result: &T) -> Result<String, LedgerError> {
    Ok(serde_json::to_string(result)?)
}
