//! # Asset Contract
//!
//! The business operations exposed to the network, composed from the
//! schema validator and the asset store. Each public method corresponds
//! to exactly one ledger transaction; every failure path returns before
//! the first write, so the transaction boundary never has to unwind a
//! partial mutation from this module.
//!
//! ## Key Derivation
//!
//! Created assets get the key `<SCHEMA_NAME_UPPER><tx_epoch_secs>`.
//! Two creates under the same schema name in the same second derive
//! the same key. Whether that second create overwrites or fails is a
//! deployment decision, so it is a [`CollisionPolicy`] on the contract
//! rather than a hard-coded behavior.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use caravel_core::{Asset, AssetKey, Car, DocType, LedgerError, Owner, DOC_TYPE_FIELD};
use caravel_schema::{validate, Property, PropertyType, Schema};

use crate::state::LedgerState;
use crate::store::AssetStore;

/// What a create does when its derived key already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionPolicy {
    /// Silently overwrite the existing document (historical behavior).
    #[default]
    Overwrite,
    /// Fail the create with [`LedgerError::DuplicateKey`].
    Reject,
}

/// A created or updated asset, echoed back to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetRecord {
    /// The ledger key of the asset.
    pub key: AssetKey,
    /// The asset as stored.
    pub asset: Asset,
}

/// The result of a car ownership transfer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferRecord {
    /// The ledger key of the transferred car.
    pub key: AssetKey,
    /// The car as stored after the transfer.
    pub car: Asset,
}

/// The schema-validated asset CRUD engine.
#[derive(Debug, Clone, Default)]
pub struct AssetContract {
    collision_policy: CollisionPolicy,
}

impl AssetContract {
    /// Contract with the default (overwrite) collision policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Contract with an explicit collision policy.
    pub fn with_collision_policy(collision_policy: CollisionPolicy) -> Self {
        Self { collision_policy }
    }

    /// Seed the ledger with the fixed demo fleet: six cars and four
    /// owners under well-known keys.
    ///
    /// Re-running overwrites the same ten keys with the same seed
    /// data. If those keys have diverged through other operations in
    /// the meantime, the divergence is silently clobbered.
    pub fn init_ledger(&self, ledger: &mut dyn LedgerState) -> Result<(), LedgerError> {
        let mut store = AssetStore::new(ledger);

        for (key, car) in seed_cars() {
            tracing::info!(key = %key, "seeding car");
            store.put(&key, &Asset::Car(car))?;
        }
        for (key, owner) in seed_owners() {
            tracing::info!(key = %key, "seeding owner");
            store.put(&key, &Asset::Owner(owner))?;
        }
        Ok(())
    }

    /// Create a generic asset under a declared schema.
    ///
    /// Validates the payload first; nothing is written on validation
    /// failure. The key is derived from the schema name and the
    /// transaction timestamp, and the stored document is stamped with
    /// the schema name as its `docType` unless the payload already
    /// carries one.
    pub fn create_asset(
        &self,
        ledger: &mut dyn LedgerState,
        schema: &Schema,
        payload: &Value,
    ) -> Result<AssetRecord, LedgerError> {
        validate(schema, payload).map_err(|e| LedgerError::Validation(e.to_string()))?;

        let mut store = AssetStore::new(ledger);
        let key = AssetKey::derive(&schema.name, store.tx_timestamp_secs());

        if self.collision_policy == CollisionPolicy::Reject && store.exists(&key)? {
            return Err(LedgerError::DuplicateKey {
                key: key.to_string(),
            });
        }

        let mut doc = payload.clone();
        if let Value::Object(obj) = &mut doc {
            obj.entry(DOC_TYPE_FIELD)
                .or_insert_with(|| Value::String(schema.name.clone()));
        }
        let asset = Asset::from_value(doc)?;
        store.put(&key, &asset)?;
        tracing::info!(key = %key, schema = %schema.name, "created asset");
        Ok(AssetRecord { key, asset })
    }

    /// Fetch one asset, optionally constrained to a doc type.
    pub fn query_asset(
        &self,
        ledger: &mut dyn LedgerState,
        key: &AssetKey,
        doc_type: &DocType,
    ) -> Result<Asset, LedgerError> {
        AssetStore::new(ledger).get_typed(key, doc_type)
    }

    /// All assets whose doc type matches.
    pub fn query_all_assets(
        &self,
        ledger: &mut dyn LedgerState,
        doc_type: &DocType,
    ) -> Result<Vec<AssetRecord>, LedgerError> {
        let matched = AssetStore::new(ledger).scan_all(doc_type)?;
        Ok(matched
            .into_iter()
            .map(|(key, asset)| AssetRecord { key, asset })
            .collect())
    }

    /// All assets with a top-level field equal to `value`.
    pub fn query_asset_by_prop(
        &self,
        ledger: &mut dyn LedgerState,
        name: &str,
        value: &Value,
    ) -> Result<Vec<AssetRecord>, LedgerError> {
        let matched = AssetStore::new(ledger).scan_by_property(name, value)?;
        Ok(matched
            .into_iter()
            .map(|(key, asset)| AssetRecord { key, asset })
            .collect())
    }

    /// Shallow-merge partial fields onto an existing asset.
    ///
    /// Read-modify-write: the current document is re-read inside this
    /// transaction, merged, and written back. Fields not named in
    /// `partial` are untouched; nothing is removed.
    pub fn update_asset(
        &self,
        ledger: &mut dyn LedgerState,
        key: &AssetKey,
        partial: &Map<String, Value>,
    ) -> Result<AssetRecord, LedgerError> {
        let mut store = AssetStore::new(ledger);
        let existing = store.get(key)?;
        let merged = existing.merge(partial)?;
        store.put(key, &merged)?;
        tracing::info!(key = %key, fields = partial.len(), "updated asset");
        Ok(AssetRecord {
            key: key.clone(),
            asset: merged,
        })
    }

    /// Delete an asset after an existence/type check.
    pub fn delete_asset(
        &self,
        ledger: &mut dyn LedgerState,
        key: &AssetKey,
        doc_type: &DocType,
    ) -> Result<AssetKey, LedgerError> {
        let mut store = AssetStore::new(ledger);
        store.get_typed(key, doc_type)?;
        store.delete(key)?;
        tracing::info!(key = %key, "deleted asset");
        Ok(key.clone())
    }

    /// Transfer a car between owners, keeping the car's `owner` field
    /// and both owners' `cars` lists mutually consistent.
    ///
    /// The transfer object must carry `carNumber`, `newOwner`, and
    /// `firstOwner`, all asset-key strings. The first matching entry is
    /// removed from the current owner's list; the new owner's list
    /// gets the key appended without deduplication. All three
    /// documents are written in one transaction; atomicity across them
    /// is the transaction boundary's guarantee.
    ///
    /// # Errors
    ///
    /// [`LedgerError::Validation`] for a malformed transfer object,
    /// [`LedgerError::NotFound`] if any of the three keys is absent,
    /// [`LedgerError::TypeMismatch`] for wrong doc types, and
    /// [`LedgerError::OwnershipMismatch`] if `firstOwner` does not
    /// hold the car. Nothing is written on any failure.
    pub fn change_car_owner(
        &self,
        ledger: &mut dyn LedgerState,
        transfer: &Value,
    ) -> Result<TransferRecord, LedgerError> {
        validate(&transfer_schema(), transfer)
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        // Validated as required asset-key strings above.
        let car_key = key_field(transfer, "carNumber");
        let new_owner_key = key_field(transfer, "newOwner");
        let first_owner_key = key_field(transfer, "firstOwner");

        let mut store = AssetStore::new(ledger);
        let mut car = require_car(store.get_typed(&car_key, &DocType::new("CAR"))?, &car_key)?;
        let mut first_owner = require_owner(
            store.get_typed(&first_owner_key, &DocType::new("OWNER"))?,
            &first_owner_key,
        )?;
        let mut new_owner = require_owner(
            store.get_typed(&new_owner_key, &DocType::new("OWNER"))?,
            &new_owner_key,
        )?;

        match first_owner.cars.iter().position(|k| *k == car_key) {
            Some(position) => {
                first_owner.cars.remove(position);
            }
            None => {
                return Err(LedgerError::OwnershipMismatch {
                    owner: first_owner_key.to_string(),
                    car: car_key.to_string(),
                });
            }
        }

        new_owner.cars.push(car_key.clone());
        car.owner = new_owner_key.clone();

        let car = Asset::Car(car);
        store.put(&car_key, &car)?;
        store.put(&first_owner_key, &Asset::Owner(first_owner))?;
        store.put(&new_owner_key, &Asset::Owner(new_owner))?;
        tracing::info!(
            car = %car_key,
            from = %first_owner_key,
            to = %new_owner_key,
            "transferred car ownership"
        );

        Ok(TransferRecord { key: car_key, car })
    }
}

/// The built-in schema gating transfer objects.
fn transfer_schema() -> Schema {
    let asset_ref = |name: &str| Property {
        name: name.to_string(),
        property_type: PropertyType::Asset,
        required: true,
    };
    Schema {
        name: "changeCarOwner".to_string(),
        properties: vec![
            asset_ref("carNumber"),
            asset_ref("newOwner"),
            asset_ref("firstOwner"),
        ],
    }
}

/// Read a validated asset-key string field out of a transfer object.
fn key_field(transfer: &Value, name: &str) -> AssetKey {
    AssetKey::new(
        transfer
            .get(name)
            .and_then(Value::as_str)
            .unwrap_or_default(),
    )
}

/// Unwrap a car-typed asset into its typed form.
fn require_car(asset: Asset, key: &AssetKey) -> Result<Car, LedgerError> {
    match asset {
        Asset::Car(car) => Ok(car),
        _ => Err(LedgerError::Validation(format!(
            "document {key} is tagged as a car but is not car-shaped"
        ))),
    }
}

/// Unwrap an owner-typed asset into its typed form.
fn require_owner(asset: Asset, key: &AssetKey) -> Result<Owner, LedgerError> {
    match asset {
        Asset::Owner(owner) => Ok(owner),
        _ => Err(LedgerError::Validation(format!(
            "document {key} is tagged as an owner but is not owner-shaped"
        ))),
    }
}

// ─── Seed Data ───────────────────────────────────────────────────────

fn seed_car(color: &str, make: &str, model: &str, owner: &str) -> Car {
    Car {
        color: color.to_string(),
        make: make.to_string(),
        model: model.to_string(),
        owner: AssetKey::new(owner),
        extra: Map::new(),
    }
}

fn seed_owner(first_name: &str, last_name: &str, cars: &[&str]) -> Owner {
    Owner {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        cars: cars.iter().map(|k| AssetKey::new(*k)).collect(),
        extra: Map::new(),
    }
}

fn seed_cars() -> Vec<(AssetKey, Car)> {
    let cars = [
        seed_car("blue", "Toyota", "Prius", "OWNER1562965001"),
        seed_car("red", "Ford", "Mustang", "OWNER1562965001"),
        seed_car("green", "Hyundai", "Tucson", "OWNER1562965001"),
        seed_car("yellow", "Volkswagen", "Passat", "OWNER1562965002"),
        seed_car("black", "Tesla", "S", "OWNER1562965002"),
        seed_car("purple", "Peugeot", "205", "OWNER1562965003"),
    ];
    cars.into_iter()
        .enumerate()
        .map(|(i, car)| (AssetKey::new(format!("CAR156296500{}", i + 1)), car))
        .collect()
}

fn seed_owners() -> Vec<(AssetKey, Owner)> {
    let owners = [
        seed_owner(
            "Tomoko",
            "Shotaro",
            &["CAR1562965001", "CAR1562965002", "CAR1562965003"],
        ),
        seed_owner("Brad", "Valeria", &["CAR1562965004", "CAR1562965005"]),
        seed_owner("Jin Soo", "Pari", &["CAR1562965006"]),
        seed_owner("Max", "Michel", &[]),
    ];
    owners
        .into_iter()
        .enumerate()
        .map(|(i, owner)| (AssetKey::new(format!("OWNER156296500{}", i + 1)), owner))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MemoryLedger;
    use serde_json::json;

    fn seeded_ledger() -> MemoryLedger {
        let mut ledger = MemoryLedger::new();
        let contract = AssetContract::new();
        ledger
            .transact(1562965000, |tx| contract.init_ledger(tx))
            .unwrap();
        ledger
    }

    fn bike_schema() -> Schema {
        Schema {
            name: "bike".to_string(),
            properties: vec![Property {
                name: "color".to_string(),
                property_type: PropertyType::String,
                required: true,
            }],
        }
    }

    // ── init_ledger ──────────────────────────────────────────────────

    #[test]
    fn test_init_ledger_seeds_six_cars_and_four_owners() {
        let mut ledger = seeded_ledger();
        let contract = AssetContract::new();
        ledger
            .view(2, |tx| {
                assert_eq!(contract.query_all_assets(tx, &DocType::car())?.len(), 6);
                assert_eq!(contract.query_all_assets(tx, &DocType::owner())?.len(), 4);
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_init_ledger_rerun_clobbers_divergence() {
        let mut ledger = seeded_ledger();
        let contract = AssetContract::new();
        let mut partial = Map::new();
        partial.insert("color".to_string(), json!("pink"));
        ledger
            .transact(2, |tx| {
                contract.update_asset(tx, &AssetKey::new("CAR1562965001"), &partial)
            })
            .unwrap();

        ledger.transact(3, |tx| contract.init_ledger(tx)).unwrap();
        ledger
            .view(4, |tx| {
                let car =
                    contract.query_asset(tx, &AssetKey::new("CAR1562965001"), &DocType::any())?;
                assert_eq!(car.field("color"), Some(json!("blue")));
                Ok(())
            })
            .unwrap();
    }

    // ── create_asset ─────────────────────────────────────────────────

    #[test]
    fn test_create_asset_derives_key_from_schema_and_timestamp() {
        let mut ledger = MemoryLedger::new();
        let contract = AssetContract::new();
        let (record, _) = ledger
            .transact(1700000000, |tx| {
                contract.create_asset(tx, &bike_schema(), &json!({"color": "red"}))
            })
            .unwrap();
        assert_eq!(record.key, AssetKey::new("BIKE1700000000"));
        assert_eq!(record.asset.field("color"), Some(json!("red")));

        ledger
            .view(2, |tx| {
                let stored = contract.query_asset(tx, &record.key, &DocType::any())?;
                assert_eq!(stored.field("color"), Some(json!("red")));
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_create_asset_stamps_schema_doc_type() {
        let mut ledger = MemoryLedger::new();
        let contract = AssetContract::new();
        let (record, _) = ledger
            .transact(1700000000, |tx| {
                contract.create_asset(tx, &bike_schema(), &json!({"color": "red"}))
            })
            .unwrap();
        assert_eq!(record.asset.doc_type(), Some(DocType::new("bike")));

        ledger
            .view(2, |tx| {
                assert_eq!(
                    contract.query_all_assets(tx, &DocType::new("bike"))?.len(),
                    1
                );
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_create_asset_validation_failure_writes_nothing() {
        let mut ledger = MemoryLedger::new();
        let contract = AssetContract::new();
        let err = ledger
            .transact(1700000000, |tx| {
                contract.create_asset(tx, &bike_schema(), &json!({"wheels": 2}))
            })
            .unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_create_asset_same_second_overwrites_by_default() {
        let mut ledger = MemoryLedger::new();
        let contract = AssetContract::new();
        ledger
            .transact(1700000000, |tx| {
                contract.create_asset(tx, &bike_schema(), &json!({"color": "red"}))
            })
            .unwrap();
        let (record, _) = ledger
            .transact(1700000000, |tx| {
                contract.create_asset(tx, &bike_schema(), &json!({"color": "blue"}))
            })
            .unwrap();
        assert_eq!(record.key, AssetKey::new("BIKE1700000000"));
        ledger
            .view(2, |tx| {
                let stored = contract.query_asset(tx, &record.key, &DocType::any())?;
                assert_eq!(stored.field("color"), Some(json!("blue")));
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_create_asset_same_second_rejected_in_strict_mode() {
        let mut ledger = MemoryLedger::new();
        let contract = AssetContract::with_collision_policy(CollisionPolicy::Reject);
        ledger
            .transact(1700000000, |tx| {
                contract.create_asset(tx, &bike_schema(), &json!({"color": "red"}))
            })
            .unwrap();
        let err = ledger
            .transact(1700000000, |tx| {
                contract.create_asset(tx, &bike_schema(), &json!({"color": "blue"}))
            })
            .unwrap_err();
        assert!(matches!(err, LedgerError::DuplicateKey { .. }));
    }

    // ── update / delete ──────────────────────────────────────────────

    #[test]
    fn test_update_asset_preserves_unnamed_fields() {
        let mut ledger = seeded_ledger();
        let contract = AssetContract::new();
        let mut partial = Map::new();
        partial.insert("color".to_string(), json!("white"));

        let (record, _) = ledger
            .transact(2, |tx| {
                contract.update_asset(tx, &AssetKey::new("CAR1562965002"), &partial)
            })
            .unwrap();
        let value = record.asset.to_value().unwrap();
        assert_eq!(value["color"], json!("white"));
        assert_eq!(value["make"], json!("Ford"));
        assert_eq!(value["model"], json!("Mustang"));
        assert_eq!(value["owner"], json!("OWNER1562965001"));
    }

    #[test]
    fn test_update_missing_asset_is_not_found() {
        let mut ledger = MemoryLedger::new();
        let contract = AssetContract::new();
        let err = ledger
            .transact(1, |tx| {
                contract.update_asset(tx, &AssetKey::new("NOPE"), &Map::new())
            })
            .unwrap_err();
        assert!(matches!(err, LedgerError::NotFound { .. }));
    }

    #[test]
    fn test_delete_then_query_is_not_found() {
        let mut ledger = seeded_ledger();
        let contract = AssetContract::new();
        let key = AssetKey::new("CAR1562965006");
        ledger
            .transact(2, |tx| contract.delete_asset(tx, &key, &DocType::any()))
            .unwrap();
        let err = ledger
            .view(3, |tx| contract.query_asset(tx, &key, &DocType::any()))
            .unwrap_err();
        assert!(matches!(err, LedgerError::NotFound { .. }));
    }

    #[test]
    fn test_delete_with_wrong_doc_type_fails() {
        let mut ledger = seeded_ledger();
        let contract = AssetContract::new();
        let err = ledger
            .transact(2, |tx| {
                contract.delete_asset(tx, &AssetKey::new("CAR1562965001"), &DocType::owner())
            })
            .unwrap_err();
        assert!(matches!(err, LedgerError::TypeMismatch { .. }));
    }

    // ── change_car_owner ─────────────────────────────────────────────

    fn transfer(car: &str, new_owner: &str, first_owner: &str) -> Value {
        json!({
            "carNumber": car,
            "newOwner": new_owner,
            "firstOwner": first_owner,
        })
    }

    #[test]
    fn test_change_car_owner_happy_path() {
        let mut ledger = seeded_ledger();
        let contract = AssetContract::new();
        let (record, _) = ledger
            .transact(2, |tx| {
                contract.change_car_owner(
                    tx,
                    &transfer("CAR1562965001", "OWNER1562965004", "OWNER1562965001"),
                )
            })
            .unwrap();
        assert_eq!(record.key, AssetKey::new("CAR1562965001"));

        ledger
            .view(3, |tx| {
                let car =
                    contract.query_asset(tx, &AssetKey::new("CAR1562965001"), &DocType::car())?;
                assert_eq!(car.field("owner"), Some(json!("OWNER1562965004")));

                let first = contract.query_asset(
                    tx,
                    &AssetKey::new("OWNER1562965001"),
                    &DocType::owner(),
                )?;
                let Asset::Owner(first) = first else {
                    panic!("expected owner");
                };
                assert!(!first.cars.contains(&AssetKey::new("CAR1562965001")));
                assert_eq!(first.cars.len(), 2);

                let new = contract.query_asset(
                    tx,
                    &AssetKey::new("OWNER1562965004"),
                    &DocType::owner(),
                )?;
                let Asset::Owner(new) = new else {
                    panic!("expected owner");
                };
                assert!(new.cars.contains(&AssetKey::new("CAR1562965001")));
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_change_car_owner_wrong_first_owner_modifies_nothing() {
        let mut ledger = seeded_ledger();
        let contract = AssetContract::new();
        let before = ledger.clone();

        // OWNER1562965002 does not hold CAR1562965001.
        let err = ledger
            .transact(2, |tx| {
                contract.change_car_owner(
                    tx,
                    &transfer("CAR1562965001", "OWNER1562965004", "OWNER1562965002"),
                )
            })
            .unwrap_err();
        match err {
            LedgerError::OwnershipMismatch { owner, car } => {
                assert_eq!(owner, "OWNER1562965002");
                assert_eq!(car, "CAR1562965001");
            }
            other => panic!("expected OwnershipMismatch, got {other}"),
        }

        // All three documents are untouched.
        for key in ["CAR1562965001", "OWNER1562965002", "OWNER1562965004"] {
            let stored = ledger
                .view(3, |tx| {
                    contract.query_asset(tx, &AssetKey::new(key), &DocType::any())
                })
                .unwrap();
            let original = before
                .view(3, |tx| {
                    contract.query_asset(tx, &AssetKey::new(key), &DocType::any())
                })
                .unwrap();
            assert_eq!(stored, original);
        }
    }

    #[test]
    fn test_change_car_owner_missing_car_is_not_found() {
        let mut ledger = seeded_ledger();
        let contract = AssetContract::new();
        let err = ledger
            .transact(2, |tx| {
                contract.change_car_owner(
                    tx,
                    &transfer("CAR9999999999", "OWNER1562965004", "OWNER1562965001"),
                )
            })
            .unwrap_err();
        assert!(matches!(err, LedgerError::NotFound { .. }));
    }

    #[test]
    fn test_change_car_owner_missing_field_fails_validation() {
        let mut ledger = seeded_ledger();
        let contract = AssetContract::new();
        let err = ledger
            .transact(2, |tx| {
                contract.change_car_owner(
                    tx,
                    &json!({"carNumber": "CAR1562965001", "newOwner": "OWNER1562965004"}),
                )
            })
            .unwrap_err();
        match err {
            LedgerError::Validation(message) => assert!(message.contains("firstOwner")),
            other => panic!("expected Validation, got {other}"),
        }
    }

    #[test]
    fn test_change_car_owner_no_dedup_on_new_owner() {
        let mut ledger = seeded_ledger();
        let contract = AssetContract::new();
        // Move CAR1 to OWNER4, then hand it back to OWNER1, then to
        // OWNER4 again: OWNER4's list sees it freshly appended.
        for (new, first) in [
            ("OWNER1562965004", "OWNER1562965001"),
            ("OWNER1562965001", "OWNER1562965004"),
            ("OWNER1562965004", "OWNER1562965001"),
        ] {
            ledger
                .transact(2, |tx| {
                    contract.change_car_owner(tx, &transfer("CAR1562965001", new, first))
                })
                .unwrap();
        }
        ledger
            .view(3, |tx| {
                let owner = contract.query_asset(
                    tx,
                    &AssetKey::new("OWNER1562965004"),
                    &DocType::owner(),
                )?;
                let Asset::Owner(owner) = owner else {
                    panic!("expected owner");
                };
                assert_eq!(owner.cars, vec![AssetKey::new("CAR1562965001")]);
                Ok(())
            })
            .unwrap();
    }

    // ── queries ──────────────────────────────────────────────────────

    #[test]
    fn test_query_asset_by_prop_matches_raw_values() {
        let mut ledger = seeded_ledger();
        let contract = AssetContract::new();
        ledger
            .view(2, |tx| {
                let owned = contract.query_asset_by_prop(
                    tx,
                    "owner",
                    &json!("OWNER1562965001"),
                )?;
                assert_eq!(owned.len(), 3);

                let reds = contract.query_asset_by_prop(tx, "color", &json!("red"))?;
                assert_eq!(reds.len(), 1);
                assert_eq!(reds[0].key, AssetKey::new("CAR1562965002"));
                Ok(())
            })
            .unwrap();
    }
}
