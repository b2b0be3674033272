//! # Sui Gateway Types
//!
//! The schema catalog for payloads returned by the Sui gateway RPC, and a
//! zero-sized marker type per definition for typed narrowing:
//!
//! ```
//! use sxg_schema::gateway::{self, types::ObjectRef};
//! use sxg_schema::Validator;
//!
//! let catalog = gateway::catalog().expect("gateway catalog is closed");
//! let validator = Validator::new(&catalog);
//! let payload = serde_json::json!({"objectId": "0x5", "digest": "Jx1=", "version": 1});
//! let object_ref = validator.narrow::<ObjectRef, _>(&payload).expect("valid ref");
//! assert_eq!(object_ref["objectId"], "0x5");
//! ```
//!
//! Address, digest, and sequence-number encodings are validated by kind only
//! (string or number); their textual formats are the transport's concern.

use sxg_core::CatalogError;

use crate::catalog::{CatalogBuilder, SchemaCatalog};
use crate::node::SchemaNode;

macro_rules! catalog_types {
    ($($name:ident),* $(,)?) => {
        /// Marker types naming each gateway catalog definition.
        pub mod types {
            use crate::validate::CatalogType;

            $(
                #[doc = concat!("Marker for the `", stringify!($name), "` definition.")]
                #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
                pub enum $name {}

                impl CatalogType for $name {
                    const NAME: &'static str = stringify!($name);
                }
            )*
        }

        /// Every name defined by [`catalog`], in declaration order.
        pub const TYPE_NAMES: &[&str] = &[$(stringify!($name)),*];
    };
}

catalog_types!(
    TransactionDigest,
    SuiAddress,
    ObjectDigest,
    ObjectId,
    AuthorityName,
    AuthoritySignature,
    SequenceNumber,
    EpochId,
    GatewayTxSeqNumber,
    Ed25519KeypairData,
    PublicKeyInitData,
    TransferCoinTransaction,
    ObjectOwner,
    ObjectRef,
    ObjectContentField,
    ObjectContentFields,
    ObjectContent,
    MovePackageContent,
    SuiObject,
    ObjectExistsInfo,
    ObjectNotExistsInfo,
    ObjectStatus,
    ObjectType,
    GetOwnedObjectRefsResponse,
    GetObjectInfoResponse,
    RawObjectRef,
    TransferCoin,
    RawAuthoritySignInfo,
    TransactionKindName,
    SingleTransactionKind,
    TransactionKind,
    TransactionData,
    AuthorityQuorumSignInfo,
    CertifiedTransaction,
    GasCostSummary,
    ExecutionStatusType,
    ExecutionStatus,
    ExecutionStatusDetail,
    OwnedObjectRef,
    TransactionEffects,
    TransactionEffectsResponse,
    GetTxnDigestsResponse,
    MoveModulePublish,
    Event,
    StructTag,
    MoveTypeTag,
    MoveCall,
    MoveCallArg,
    EmptySignInfo,
    TransactionBytes,
    TransactionResponse,
    SignedTransaction,
);

fn r(name: &str) -> SchemaNode {
    SchemaNode::reference(name)
}

fn list_of(name: &str) -> SchemaNode {
    SchemaNode::array(r(name))
}

/// Build the gateway catalog.
///
/// # Errors
///
/// Returns a `CatalogError` only if the definition table itself is
/// inconsistent; callers treat that as fatal at startup.
pub fn catalog() -> Result<SchemaCatalog, CatalogError> {
    let mut b = CatalogBuilder::new();
    define_scalars(&mut b)?;
    define_keys(&mut b)?;
    define_objects(&mut b)?;
    define_transactions(&mut b)?;
    define_effects(&mut b)?;
    define_move(&mut b)?;
    b.build()
}

fn define_scalars(b: &mut CatalogBuilder) -> Result<(), CatalogError> {
    for name in [
        "TransactionDigest",
        "SuiAddress",
        "ObjectDigest",
        "ObjectId",
        "AuthorityName",
        "AuthoritySignature",
    ] {
        b.define(name, SchemaNode::string())?;
    }
    for name in ["SequenceNumber", "EpochId", "GatewayTxSeqNumber"] {
        b.define(name, SchemaNode::number())?;
    }
    Ok(())
}

fn define_keys(b: &mut CatalogBuilder) -> Result<(), CatalogError> {
    b.define(
        "Ed25519KeypairData",
        SchemaNode::record([("publicKey", SchemaNode::bytes()), ("secretKey", SchemaNode::bytes())]),
    )?
    .define(
        "PublicKeyInitData",
        SchemaNode::union([
            SchemaNode::string(),
            SchemaNode::number(),
            SchemaNode::bytes(),
            SchemaNode::array(SchemaNode::number()),
        ]),
    )?
    .define(
        "SignedTransaction",
        SchemaNode::record([
            ("tx_bytes", SchemaNode::string()),
            ("signature", SchemaNode::string()),
            ("pub_key", SchemaNode::string()),
        ]),
    )?
    .define("TransactionBytes", SchemaNode::record([("tx_bytes", SchemaNode::string())]))?
    .define(
        "TransferCoinTransaction",
        SchemaNode::record([
            ("signer", r("SuiAddress")),
            ("objectId", r("ObjectId")),
            ("gasPayment", r("ObjectId")),
            ("gasBudget", SchemaNode::number()),
            ("recipient", r("SuiAddress")),
        ]),
    )?;
    Ok(())
}

fn define_objects(b: &mut CatalogBuilder) -> Result<(), CatalogError> {
    b.define(
        "ObjectOwner",
        SchemaNode::union([
            SchemaNode::variant([("AddressOwner", r("SuiAddress")), ("ObjectOwner", r("SuiAddress"))]),
            SchemaNode::literals(["Shared", "Immutable"]),
        ]),
    )?
    .define(
        "ObjectRef",
        SchemaNode::record([
            ("digest", r("ObjectDigest")),
            ("objectId", r("ObjectId")),
            ("version", r("SequenceNumber")),
        ]),
    )?
    .define(
        "ObjectContentField",
        SchemaNode::union([
            SchemaNode::string(),
            SchemaNode::number(),
            SchemaNode::boolean(),
            SchemaNode::array(SchemaNode::number()),
            r("ObjectContent"),
            list_of("ObjectContent"),
        ]),
    )?
    .define("ObjectContentFields", SchemaNode::map(r("ObjectContentField")))?
    .define(
        "ObjectContent",
        SchemaNode::record([("fields", r("ObjectContentFields")), ("type", SchemaNode::string())]),
    )?
    .define("MovePackageContent", SchemaNode::map(SchemaNode::string()))?
    .define(
        "SuiObject",
        SchemaNode::record([
            ("contents", SchemaNode::union([r("ObjectContent"), r("MovePackageContent")])),
            ("owner", r("ObjectOwner")),
            ("tx_digest", r("TransactionDigest")),
        ]),
    )?
    .define(
        "ObjectExistsInfo",
        SchemaNode::record([
            ("objectRef", r("ObjectRef")),
            ("objectType", r("ObjectType")),
            ("object", r("SuiObject")),
        ]),
    )?
    .define("ObjectNotExistsInfo", SchemaNode::record([("objectId", r("ObjectId"))]))?
    .define("ObjectStatus", SchemaNode::literals(["Exists", "NotExists", "Deleted"]))?
    .define("ObjectType", SchemaNode::literals(["moveObject", "movePackage"]))?
    .define(
        "GetOwnedObjectRefsResponse",
        SchemaNode::record([("objects", list_of("ObjectRef"))]),
    )?
    .define(
        "GetObjectInfoResponse",
        SchemaNode::record([
            ("status", r("ObjectStatus")),
            (
                "details",
                SchemaNode::union([r("ObjectRef"), r("ObjectExistsInfo"), r("ObjectNotExistsInfo")]),
            ),
        ]),
    )?
    .define(
        "RawObjectRef",
        SchemaNode::tuple([r("ObjectId"), r("SequenceNumber"), r("ObjectDigest")]),
    )?
    .define("OwnedObjectRef", SchemaNode::tuple([r("RawObjectRef"), r("ObjectOwner")]))?;
    Ok(())
}

fn define_transactions(b: &mut CatalogBuilder) -> Result<(), CatalogError> {
    b.define(
        "TransferCoin",
        SchemaNode::record([("recipient", r("SuiAddress")), ("object_ref", r("RawObjectRef"))]),
    )?
    .define(
        "RawAuthoritySignInfo",
        SchemaNode::tuple([r("AuthorityName"), r("AuthoritySignature")]),
    )?
    .define("TransactionKindName", SchemaNode::literals(["TransferCoin", "Publish", "Call"]))?
    .define(
        "SingleTransactionKind",
        SchemaNode::variant([
            ("TransferCoin", r("TransferCoin")),
            ("Publish", r("MoveModulePublish")),
            ("Call", r("MoveCall")),
        ]),
    )?
    .define(
        "TransactionKind",
        SchemaNode::variant([
            ("Single", r("SingleTransactionKind")),
            ("Batch", list_of("SingleTransactionKind")),
        ]),
    )?
    .define(
        "TransactionData",
        SchemaNode::record([
            ("kind", r("TransactionKind")),
            ("sender", r("SuiAddress")),
            ("gas_payment", r("RawObjectRef")),
            ("gas_budget", SchemaNode::number()),
        ]),
    )?
    .define(
        "AuthorityQuorumSignInfo",
        SchemaNode::record([("epoch", r("EpochId")), ("signatures", list_of("RawAuthoritySignInfo"))]),
    )?
    .define(
        "CertifiedTransaction",
        SchemaNode::record([
            ("data", r("TransactionData")),
            ("tx_signature", SchemaNode::string()),
            ("auth_sign_info", r("AuthorityQuorumSignInfo")),
        ]),
    )?
    .define("EmptySignInfo", SchemaNode::union([SchemaNode::any_structure(), SchemaNode::Absent]))?
    .define(
        "GetTxnDigestsResponse",
        SchemaNode::array(SchemaNode::tuple([r("GatewayTxSeqNumber"), r("TransactionDigest")])),
    )?;
    Ok(())
}

fn define_effects(b: &mut CatalogBuilder) -> Result<(), CatalogError> {
    b.define(
        "GasCostSummary",
        SchemaNode::record([
            ("computation_cost", SchemaNode::number()),
            ("storage_cost", SchemaNode::number()),
            ("storage_rebate", SchemaNode::number()),
        ]),
    )?
    .define("ExecutionStatusType", SchemaNode::literals(["Success", "Failure"]))?
    .define(
        "ExecutionStatus",
        SchemaNode::variant([("Success", r("ExecutionStatusDetail")), ("Failure", r("ExecutionStatusDetail"))]),
    )?
    .define("ExecutionStatusDetail", SchemaNode::record([("gas_cost", r("GasCostSummary"))]))?
    .define(
        "TransactionEffects",
        SchemaNode::record([
            ("status", r("ExecutionStatus")),
            ("shared_objects", list_of("RawObjectRef")),
            ("transaction_digest", r("TransactionDigest")),
            ("created", list_of("OwnedObjectRef")),
            ("mutated", list_of("OwnedObjectRef")),
            ("unwrapped", list_of("OwnedObjectRef")),
            ("deleted", list_of("RawObjectRef")),
            ("wrapped", list_of("RawObjectRef")),
            ("gas_object", r("OwnedObjectRef")),
            ("events", list_of("Event")),
            ("dependencies", list_of("TransactionDigest")),
        ]),
    )?
    .define(
        "TransactionEffectsResponse",
        SchemaNode::record([("certificate", r("CertifiedTransaction")), ("effects", r("TransactionEffects"))]),
    )?
    .define(
        "TransactionResponse",
        SchemaNode::record([("EffectResponse", r("TransactionEffectsResponse"))]),
    )?;
    Ok(())
}

fn define_move(b: &mut CatalogBuilder) -> Result<(), CatalogError> {
    b.define("MoveModulePublish", SchemaNode::any_structure())?
        .define(
            "Event",
            SchemaNode::record([("type_", r("StructTag")), ("contents", SchemaNode::string())]),
        )?
        .define(
            "StructTag",
            SchemaNode::record([
                ("address", r("SuiAddress")),
                ("module", SchemaNode::string()),
                ("name", SchemaNode::string()),
                ("type_args", list_of("MoveTypeTag")),
            ]),
        )?
        .define(
            "MoveTypeTag",
            SchemaNode::union([
                SchemaNode::literals(["bool", "u8", "u64", "u128", "address", "signer"]),
                SchemaNode::variant([("vector", list_of("MoveTypeTag"))]),
                SchemaNode::variant([("struct", r("StructTag"))]),
            ]),
        )?
        .define(
            "MoveCall",
            SchemaNode::record([
                ("package", r("RawObjectRef")),
                ("module", SchemaNode::string()),
                ("function", SchemaNode::string()),
                ("type_arguments", list_of("MoveTypeTag")),
                ("arguments", list_of("MoveCallArg")),
            ]),
        )?
        .define(
            "MoveCallArg",
            SchemaNode::variant([
                ("Pure", SchemaNode::array(SchemaNode::number())),
                ("ImmOrOwnedObject", r("RawObjectRef")),
                ("SharedObject", r("ObjectId")),
            ]),
        )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn catalog_builds() {
        let catalog = catalog().unwrap();
        assert_eq!(catalog.len(), TYPE_NAMES.len());
    }

    #[test]
    fn markers_match_definitions() {
        let catalog = catalog().unwrap();
        let defined: BTreeSet<&str> = catalog.names().collect();
        let marked: BTreeSet<&str> = TYPE_NAMES.iter().copied().collect();
        assert_eq!(defined, marked);
    }

    #[test]
    fn move_type_tag_is_recursive() {
        let catalog = catalog().unwrap();
        let deps = catalog.dependencies("MoveTypeTag").unwrap();
        assert!(deps.contains("MoveTypeTag"));
        assert!(deps.contains("StructTag"));
    }

    #[test]
    fn rendered_shapes() {
        let catalog = catalog().unwrap();
        assert_eq!(
            catalog.resolve("RawObjectRef").unwrap().to_string(),
            "[ObjectId, SequenceNumber, ObjectDigest]"
        );
        assert_eq!(
            catalog.resolve("ObjectOwner").unwrap().to_string(),
            r#"{ AddressOwner: SuiAddress | ObjectOwner: SuiAddress } | "Shared" | "Immutable""#
        );
    }
}
