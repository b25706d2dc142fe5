//! # Asset Model — Tagged Union over Ledger Documents
//!
//! Every document on the ledger is a flat JSON object carrying a
//! `docType` discriminator. [`Asset`] lifts that into a tagged union:
//! the known variants ([`Car`], [`Owner`]) get typed fields and
//! exhaustive `match`, while anything else lands in [`GenericAsset`]
//! as a raw field map.
//!
//! ## Leniency Invariant
//!
//! The ledger is schemaless at rest. A document whose `docType` says
//! `car` but whose shape no longer conforms (say, a generic update set
//! `color` to a number) still loads: it degrades to [`GenericAsset`]
//! with the discriminator intact rather than failing the read. Typed
//! variants are a view, not a gate.
//!
//! Unknown top-level fields on a typed variant are preserved through
//! a load/store round trip via the `extra` map, so shallow merges
//! never drop data.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::key::{AssetKey, DocType};

/// Name of the discriminator field on stored documents.
pub const DOC_TYPE_FIELD: &str = "docType";

/// A car document (`docType = "car"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    /// Paint color.
    pub color: String,
    /// Manufacturer.
    pub make: String,
    /// Model name.
    pub model: String,
    /// Ledger key of the owning [`Owner`] document.
    pub owner: AssetKey,
    /// Fields beyond the car shape, preserved across round trips.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An owner document (`docType = "owner"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Ordered keys of the cars this owner holds.
    pub cars: Vec<AssetKey>,
    /// Fields beyond the owner shape, preserved across round trips.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A document of arbitrary or unknown type.
#[derive(Debug, Clone, PartialEq)]
pub struct GenericAsset {
    /// The `docType` discriminator, if the document carried one.
    pub doc_type: Option<DocType>,
    /// All top-level fields except the discriminator.
    pub fields: Map<String, Value>,
}

/// A ledger-stored asset.
#[derive(Debug, Clone, PartialEq)]
pub enum Asset {
    /// A car document.
    Car(Car),
    /// An owner document.
    Owner(Owner),
    /// Any other document, held as a raw field map.
    Generic(GenericAsset),
}

impl Asset {
    /// Build an asset from a parsed JSON document.
    ///
    /// The value must be a JSON object. A string `docType` of `car` or
    /// `owner` selects the typed variant when the shape conforms;
    /// everything else (including shape mismatches) becomes
    /// [`Asset::Generic`].
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        let mut obj = match value {
            Value::Object(obj) => obj,
            other => {
                return Err(serde::de::Error::custom(format!(
                    "asset document must be a JSON object, got {other}"
                )))
            }
        };

        let doc_type = match obj.get(DOC_TYPE_FIELD) {
            Some(Value::String(s)) => {
                let dt = DocType::new(s.clone());
                obj.remove(DOC_TYPE_FIELD);
                Some(dt)
            }
            // A non-string discriminator stays in the field map untyped.
            _ => None,
        };

        let tag = doc_type
            .as_ref()
            .map(|dt| dt.as_str().to_ascii_lowercase());

        match tag.as_deref() {
            Some("car") => match serde_json::from_value::<Car>(Value::Object(obj.clone())) {
                Ok(car) => Ok(Asset::Car(car)),
                Err(_) => Ok(Asset::Generic(GenericAsset {
                    doc_type,
                    fields: obj,
                })),
            },
            Some("owner") => match serde_json::from_value::<Owner>(Value::Object(obj.clone())) {
                Ok(owner) => Ok(Asset::Owner(owner)),
                Err(_) => Ok(Asset::Generic(GenericAsset {
                    doc_type,
                    fields: obj,
                })),
            },
            _ => Ok(Asset::Generic(GenericAsset {
                doc_type,
                fields: obj,
            })),
        }
    }

    /// Render the asset back to its flat JSON document form, with the
    /// `docType` discriminator reinserted.
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        let (mut obj, doc_type) = match self {
            Asset::Car(car) => (
                expect_object(serde_json::to_value(car)?)?,
                Some(DocType::car()),
            ),
            Asset::Owner(owner) => (
                expect_object(serde_json::to_value(owner)?)?,
                Some(DocType::owner()),
            ),
            Asset::Generic(generic) => (generic.fields.clone(), generic.doc_type.clone()),
        };
        if let Some(dt) = doc_type {
            obj.insert(DOC_TYPE_FIELD.to_string(), Value::String(dt.as_str().to_string()));
        }
        Ok(Value::Object(obj))
    }

    /// The document's discriminator, if present.
    pub fn doc_type(&self) -> Option<DocType> {
        match self {
            Asset::Car(_) => Some(DocType::car()),
            Asset::Owner(_) => Some(DocType::owner()),
            Asset::Generic(generic) => generic.doc_type.clone(),
        }
    }

    /// Look up a top-level field by its wire name.
    ///
    /// Equality-based scans use this; the lookup is on the serialized
    /// field names (`firstName`, not `first_name`).
    pub fn field(&self, name: &str) -> Option<Value> {
        match self {
            Asset::Car(car) => match name {
                "color" => Some(Value::String(car.color.clone())),
                "make" => Some(Value::String(car.make.clone())),
                "model" => Some(Value::String(car.model.clone())),
                "owner" => Some(Value::String(car.owner.as_str().to_string())),
                DOC_TYPE_FIELD => Some(Value::String("car".to_string())),
                other => car.extra.get(other).cloned(),
            },
            Asset::Owner(owner) => match name {
                "firstName" => Some(Value::String(owner.first_name.clone())),
                "lastName" => Some(Value::String(owner.last_name.clone())),
                "cars" => serde_json::to_value(&owner.cars).ok(),
                DOC_TYPE_FIELD => Some(Value::String("owner".to_string())),
                other => owner.extra.get(other).cloned(),
            },
            Asset::Generic(generic) => match name {
                DOC_TYPE_FIELD => generic
                    .doc_type
                    .as_ref()
                    .map(|dt| Value::String(dt.as_str().to_string())),
                other => generic.fields.get(other).cloned(),
            },
        }
    }

    /// Shallow-merge a partial field map onto this asset.
    ///
    /// Fields named in `partial` are overwritten (or added); fields not
    /// named are untouched; nothing is ever removed. Overwriting
    /// `docType` may change the variant of the result.
    pub fn merge(&self, partial: &Map<String, Value>) -> Result<Self, serde_json::Error> {
        let mut value = self.to_value()?;
        if let Value::Object(obj) = &mut value {
            for (name, field) in partial {
                obj.insert(name.clone(), field.clone());
            }
        }
        Self::from_value(value)
    }
}

impl From<Car> for Asset {
    fn from(car: Car) -> Self {
        Asset::Car(car)
    }
}

impl From<Owner> for Asset {
    fn from(owner: Owner) -> Self {
        Asset::Owner(owner)
    }
}

impl Serialize for Asset {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = self.to_value().map_err(serde::ser::Error::custom)?;
        value.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Asset {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Asset::from_value(value).map_err(serde::de::Error::custom)
    }
}

fn expect_object(value: Value) -> Result<Map<String, Value>, serde_json::Error> {
    match value {
        Value::Object(obj) => Ok(obj),
        other => Err(serde::ser::Error::custom(format!(
            "expected serialized struct to be an object, got {other}"
        ))),
    }
}
