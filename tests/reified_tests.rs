//! Behavioural tests for the reification engine: naming, round trips,
//! mismatch rejection and fetch.

use std::collections::HashMap;

use anyhow::{anyhow, Result as AnyResult};
use move_core_types::account_address::AccountAddress;
use ob_client::fetch::ObjectSource;
use ob_client::framework::coin::Coin;
use ob_client::framework::kiosk::KioskOwnerCap;
use ob_client::framework::option::MoveOption;
use ob_client::framework::vec_map::{Entry, VecMap};
use ob_client::packages::nft_protocol::collection::Collection;
use ob_client::packages::originmate::move_box::MoveBox;
use ob_client::packages::utils::sized_vec::SizedVec;
use ob_client::reified::{phantom, vector, Fields, Primitive, StructClass};
use ob_client::{default_loader, ErrorKind, ReifiedError};
use ob_transport::{ObjectDataOptions, ObjectResponse};
use ob_types::encoding::base64_encode;
use serde_json::{json, Value};

const SUI: &str = "0x2::sui::SUI";

fn addr(last: u8) -> AccountAddress {
    let mut bytes = [0u8; 32];
    bytes[31] = last;
    AccountAddress::new(bytes)
}

// =============================================================================
// Type names
// =============================================================================

#[test]
fn test_full_type_name_composition() {
    let coin = Coin::reified(SUI);
    assert_eq!(coin.full_type_name(), "0x2::coin::Coin<0x2::sui::SUI>");

    let boxed = MoveBox::reified(VecMap::reified(Primitive::U8, vector(Coin::reified(SUI))));
    assert_eq!(
        boxed.full_type_name(),
        "0xed6c6fe0732be937f4379bc0b471f0f6bfbe0e8741968009e0f01e6de3d59f32::box::Box<\
         0x2::vec_map::VecMap<u8, vector<0x2::coin::Coin<0x2::sui::SUI>>>>"
    );
}

#[test]
fn test_loader_matches_hand_written_descriptor() {
    let by_hand = MoveBox::reified(MoveOption::reified(Coin::reified(SUI)));
    let loaded = default_loader()
        .reified(&by_hand.full_type_name().replace(", ", ","))
        .unwrap();
    assert_eq!(loaded.full_type_name(), by_hand.full_type_name());
}

#[test]
fn test_phantom_struct_argument_uses_full_name() {
    let inner = Collection::reified(phantom("0x1234::my_nft::MyNft"));
    let coin = Coin::reified(inner);
    assert_eq!(
        coin.type_args(),
        ["0xbc3df36be17f27ac98e3c839b2589db8475fa07b20657b08e8891e3aaf5ee5f9::collection::Collection<0x1234::my_nft::MyNft>"]
    );
}

// =============================================================================
// Round trips
// =============================================================================

#[test]
fn test_nested_generic_round_trips() {
    let reified = MoveBox::reified(SizedVec::reified(Coin::reified(SUI)));
    let coin = |id: u8, value: u64| {
        json!({ "id": format!("0x{:064x}", id), "balance": { "value": value.to_string() } })
    };
    let field = json!({
        "id": format!("0x{:064x}", 0xb0),
        "obj": { "capacity": "4", "vec": [coin(1, 10), coin(2, u64::MAX)] }
    });

    let boxed = reified.from_json_field(&field).unwrap();
    assert_eq!(boxed.to_json_field(), field);

    let bytes = boxed.to_bcs().unwrap();
    assert_eq!(reified.from_bcs(&bytes).unwrap(), boxed);
    assert_eq!(reified.from_json(&boxed.to_json()).unwrap(), boxed);
}

#[test]
fn test_u64_and_u128_survive_json_as_strings() {
    let reified = VecMap::reified(Primitive::U64, Primitive::U128);
    let entry = Entry::reified(Primitive::U64, Primitive::U128)
        .construct(Fields::new().with("key", u64::MAX).with("value", u128::MAX))
        .unwrap();
    let map = reified
        .construct(Fields::new().with("contents", vec![entry.to_value()]))
        .unwrap();

    let json = map.to_json_field();
    assert_eq!(json["contents"][0]["key"], json!("18446744073709551615"));
    assert_eq!(
        json["contents"][0]["value"],
        json!("340282366920938463463374607431768211455")
    );
    assert_eq!(reified.from_json_field(&json).unwrap(), map);
}

#[test]
fn test_empty_option_is_single_zero_byte() {
    let reified = MoveOption::reified(Primitive::U8);
    let none = reified.construct(Fields::new().with("vec", Vec::<u8>::new())).unwrap();
    assert_eq!(none.to_bcs().unwrap(), vec![0]);
    assert_eq!(reified.from_bcs(&[0]).unwrap(), none);
    assert!(!reified.from_bcs(&[0]).unwrap().is_some());
}

#[test]
fn test_owner_cap_is_two_bare_addresses() {
    let reified = KioskOwnerCap::reified();
    let cap = reified
        .construct(Fields::new().with("id", addr(0xaa)).with("for", addr(0xbb)))
        .unwrap();

    let bytes = cap.to_bcs().unwrap();
    assert_eq!(bytes.len(), 64);
    assert_eq!(bytes[31], 0xaa);
    assert_eq!(bytes[63], 0xbb);

    let decoded = reified.from_bcs(&bytes).unwrap();
    assert_eq!(decoded.id(), &addr(0xaa));
    assert_eq!(decoded.for_(), &addr(0xbb));
}

// =============================================================================
// Rejection
// =============================================================================

#[test]
fn test_fields_with_types_rejects_other_type() {
    let item = json!({
        "type": "0x2::coin::Coin<0x2::sui::SUI>",
        "fields": { "id": { "id": "0x1" }, "balance": "5" }
    });
    let err = Coin::reified("0x3::usdc::USDC")
        .from_fields_with_types(&item)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);

    let err = KioskOwnerCap::reified()
        .from_fields_with_types(&item)
        .unwrap_err();
    assert!(matches!(err, ReifiedError::TypeMismatch { .. }));
}

#[test]
fn test_bcs_rejects_short_and_trailing_input() {
    let reified = KioskOwnerCap::reified();
    assert_eq!(
        reified.from_bcs(&[0u8; 63]).unwrap_err().kind(),
        ErrorKind::MalformedInput
    );
    assert_eq!(
        reified.from_bcs(&[0u8; 65]).unwrap_err().kind(),
        ErrorKind::MalformedInput
    );
}

#[test]
fn test_missing_field_is_malformed_input() {
    let err = Coin::reified(SUI)
        .from_fields(&json!({ "id": { "id": { "bytes": "0x1" } } }))
        .unwrap_err();
    assert!(matches!(err, ReifiedError::MissingField { ref field, .. } if field == "balance"));
}

#[test]
fn test_phantom_args_do_not_change_data() {
    let fields = json!({ "id": { "id": { "bytes": "0x1" } }, "balance": { "value": "5" } });
    let sui = Coin::reified(SUI).from_fields(&fields).unwrap();
    let usdc = Coin::reified("0x3::usdc::USDC").from_fields(&fields).unwrap();

    assert_eq!(sui.to_json_field(), usdc.to_json_field());
    assert_eq!(sui.to_bcs().unwrap(), usdc.to_bcs().unwrap());
    assert_ne!(sui.to_json()["$typeArgs"], usdc.to_json()["$typeArgs"]);
    assert_ne!(sui.full_type_name(), usdc.full_type_name());
}

fn deeply_nested(levels: usize) -> String {
    format!("{}u8{}", "vector<".repeat(levels), ">".repeat(levels))
}

#[test]
fn test_fields_with_types_rejects_deep_nesting() {
    let item = json!({
        "type": format!("0x2::coin::Coin<{}>", deeply_nested(20_000)),
        "fields": {}
    });
    let err = Coin::reified(SUI).from_fields_with_types(&item).unwrap_err();
    assert!(matches!(err, ReifiedError::TypeNestingTooDeep { limit: 64, .. }));
    assert_eq!(err.kind(), ErrorKind::MalformedInput);

    let err = ob_client::reified::assert_fields_with_types_args_match(
        &item,
        Coin::reified(SUI).reified_type_args(),
    )
    .unwrap_err();
    assert!(matches!(err, ReifiedError::TypeNestingTooDeep { .. }));
}

#[test]
fn test_from_json_rejects_deep_type_args() {
    let json = json!({
        "$typeName": "0x2::coin::Coin",
        "$typeArgs": [deeply_nested(20_000)],
        "id": format!("0x{:064x}", 1),
        "balance": { "value": "5" }
    });
    let err = Coin::reified(SUI).from_json(&json).unwrap_err();
    assert!(matches!(err, ReifiedError::TypeNestingTooDeep { .. }));
}

#[test]
fn test_from_json_rejects_wrong_type_name() {
    let json = json!({
        "$typeName": "0x2::balance::Balance",
        "$typeArgs": [SUI],
        "value": "5"
    });
    let err = Coin::reified(SUI).from_json(&json).unwrap_err();
    assert!(matches!(err, ReifiedError::TypeMismatch { .. }));
}

#[test]
fn test_from_json_rejects_mismatched_type_args() {
    let coin = |type_args: Value| {
        json!({
            "$typeName": "0x2::coin::Coin",
            "$typeArgs": type_args,
            "id": format!("0x{:064x}", 1),
            "balance": { "value": "5" }
        })
    };
    let reified = Coin::reified(SUI);

    let err = reified.from_json(&coin(json!(["0x3::usdc::USDC"]))).unwrap_err();
    assert!(matches!(err, ReifiedError::TypeArgsMismatch { .. }));
    let err = reified.from_json(&coin(json!([]))).unwrap_err();
    assert!(matches!(err, ReifiedError::TypeArgsMismatch { .. }));

    let padded = "0x0000000000000000000000000000000000000000000000000000000000000002::sui::SUI";
    let decoded = reified.from_json(&coin(json!([padded]))).unwrap();
    assert_eq!(decoded.balance().value(), 5);
}

// =============================================================================
// Parsed object content
// =============================================================================

fn parsed_content(data_type: &str, type_str: &str) -> Value {
    json!({
        "dataType": data_type,
        "type": type_str,
        "hasPublicTransfer": true,
        "fields": { "id": { "id": "0x42" }, "balance": "1000" }
    })
}

#[test]
fn test_from_sui_parsed_data_decodes_move_object() {
    let content = parsed_content("moveObject", "0x2::coin::Coin<0x2::sui::SUI>");
    let coin = Coin::reified(SUI).from_sui_parsed_data(&content).unwrap();
    assert_eq!(coin.id(), &addr(0x42));
    assert_eq!(coin.balance().value(), 1_000);
}

#[test]
fn test_from_sui_parsed_data_rejects_package() {
    let content = parsed_content("package", "0x2::coin::Coin<0x2::sui::SUI>");
    let err = Coin::reified(SUI).from_sui_parsed_data(&content).unwrap_err();
    assert!(matches!(err, ReifiedError::NotAnObject { ref id, .. } if id == "0x42"));
    assert_eq!(err.kind(), ErrorKind::UpstreamFetch);
}

#[test]
fn test_from_sui_parsed_data_rejects_other_type() {
    let reified = Coin::reified(SUI);
    let content = parsed_content("moveObject", "0x2::kiosk::KioskOwnerCap");
    let err = reified.from_sui_parsed_data(&content).unwrap_err();
    assert!(matches!(err, ReifiedError::TypeMismatch { .. }));

    let content = parsed_content("moveObject", "0x2::coin::Coin<0x3::usdc::USDC>");
    let err = reified.from_sui_parsed_data(&content).unwrap_err();
    assert!(matches!(err, ReifiedError::TypeArgsMismatch { .. }));
}

// =============================================================================
// Fetch
// =============================================================================

struct FixtureSource {
    objects: HashMap<String, Value>,
}

impl FixtureSource {
    fn new(entries: impl IntoIterator<Item = (&'static str, Value)>) -> Self {
        Self {
            objects: entries
                .into_iter()
                .map(|(id, v)| (id.to_string(), v))
                .collect(),
        }
    }
}

#[async_trait::async_trait]
impl ObjectSource for FixtureSource {
    async fn fetch_object(
        &self,
        id: &str,
        options: &ObjectDataOptions,
    ) -> AnyResult<ObjectResponse> {
        assert!(options.show_bcs);
        let raw = self
            .objects
            .get(id)
            .ok_or_else(|| anyhow!("connection refused"))?;
        Ok(serde_json::from_value(raw.clone())?)
    }
}

fn move_object(id: &str, type_str: &str, bytes: &[u8]) -> Value {
    json!({
        "data": {
            "objectId": id,
            "version": 7,
            "bcs": {
                "dataType": "moveObject",
                "type": type_str,
                "hasPublicTransfer": true,
                "bcsBytes": base64_encode(bytes)
            }
        }
    })
}

fn coin_bytes() -> Vec<u8> {
    let mut bytes = addr(0x42).to_vec();
    bytes.extend_from_slice(&1_000u64.to_le_bytes());
    bytes
}

#[tokio::test]
async fn test_fetch_decodes_bcs() {
    let source = FixtureSource::new([(
        "0x42",
        move_object(
            "0x42",
            "0x0000000000000000000000000000000000000000000000000000000000000002::coin::Coin<0x2::sui::SUI>",
            &coin_bytes(),
        ),
    )]);

    let coin = Coin::reified(SUI).fetch(&source, "0x42").await.unwrap();
    assert_eq!(coin.id(), &addr(0x42));
    assert_eq!(coin.balance().value(), 1_000);
}

#[tokio::test]
async fn test_fetch_rejects_wrong_type_args() {
    let source = FixtureSource::new([(
        "0x42",
        move_object("0x42", "0x2::coin::Coin<0x3::usdc::USDC>", &coin_bytes()),
    )]);
    let err = Coin::reified(SUI).fetch(&source, "0x42").await.unwrap_err();
    assert!(matches!(err, ReifiedError::TypeArgsMismatch { .. }));
}

#[tokio::test]
async fn test_fetch_upstream_failures() {
    let source = FixtureSource::new([
        (
            "0x1",
            json!({ "error": { "code": "notExists", "object_id": "0x1" } }),
        ),
        (
            "0x2",
            json!({ "data": { "objectId": "0x2", "bcs": { "dataType": "package", "id": "0x2" } } }),
        ),
        ("0x3", json!({ "data": { "objectId": "0x3" } })),
        (
            "0x4",
            move_object("0x4", "0x2::kiosk::KioskOwnerCap", &[0u8; 64]),
        ),
    ]);
    let reified = Coin::reified(SUI);

    for (id, expected) in [
        ("0x1", "Fetch"),
        ("0x2", "NotAnObject"),
        ("0x3", "NotAnObject"),
        ("0x4", "NotAnObject"),
        ("0x5", "Fetch"),
    ] {
        let err = reified.fetch(&source, id).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UpstreamFetch, "{}", id);
        let got = match err {
            ReifiedError::Fetch { .. } => "Fetch",
            ReifiedError::NotAnObject { .. } => "NotAnObject",
            _ => "other",
        };
        assert_eq!(got, expected, "{}", id);
    }
}

#[tokio::test]
async fn test_fetch_rejects_deeply_nested_type() {
    let type_str = format!("0x2::coin::Coin<{}>", deeply_nested(20_000));
    let source = FixtureSource::new([("0x42", move_object("0x42", &type_str, &coin_bytes()))]);
    let err = Coin::reified(SUI).fetch(&source, "0x42").await.unwrap_err();
    assert!(matches!(err, ReifiedError::TypeNestingTooDeep { .. }));
}

#[tokio::test]
#[ignore = "requires network access"]
async fn test_fetch_from_mainnet() {
    // 0x5 is the system state object.
    let client = ob_client::JsonRpcClient::mainnet();
    let err = Coin::reified(SUI).fetch(&client, "0x5").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UpstreamFetch);
}
