use assert_cmd::Command;
use predicates::prelude::*;

const OWNER_CAP_BCS: &str =
    "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAKoAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAuw==";

fn ob_inspect() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("ob-inspect").unwrap();
    cmd.env_remove("OB_LOG");
    cmd
}

#[test]
fn test_type_name_is_canonical() {
    ob_inspect()
        .arg("type-name")
        .arg("0x0000000000000000000000000000000000000000000000000000000000000002::coin::Coin<0x02::sui::SUI>")
        .assert()
        .success()
        .stdout("0x2::coin::Coin<0x2::sui::SUI>\n");
}

#[test]
fn test_type_name_unknown_type_fails() {
    ob_inspect()
        .args(["type-name", "0x99::nope::Nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown type 0x99::nope::Nope"));
}

#[test]
fn test_decode_bcs_struct() {
    let output = ob_inspect()
        .args(["--json", "decode", "--type", "0x2::kiosk::KioskOwnerCap"])
        .args(["--bcs", OWNER_CAP_BCS])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["$typeName"], "0x2::kiosk::KioskOwnerCap");
    assert_eq!(json["id"], format!("0x{:064x}", 0xaa));
    assert_eq!(json["for"], format!("0x{:064x}", 0xbb));
}

#[test]
fn test_decode_bcs_primitive() {
    ob_inspect()
        .args(["decode", "--type", "u64", "--bcs", "6AMAAAAAAAA="])
        .assert()
        .success()
        .stdout("1000\n");
}

#[test]
fn test_decode_fields_with_types() {
    let item = r#"{
        "type": "0x2::coin::Coin<0x2::sui::SUI>",
        "fields": { "id": { "id": "0x42" }, "balance": "18446744073709551615" }
    }"#;
    ob_inspect()
        .args(["decode", "--type", "0x2::coin::Coin<0x2::sui::SUI>"])
        .args(["--fields-with-types", item])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"18446744073709551615\""))
        .stdout(predicate::str::contains("\"$typeArgs\""));
}

#[test]
fn test_decode_rejects_mismatched_type() {
    let item = r#"{ "type": "0x2::coin::Coin<0x2::sui::SUI>", "fields": {} }"#;
    ob_inspect()
        .args(["decode", "--type", "0x2::kiosk::KioskOwnerCap"])
        .args(["--fields-with-types", item])
        .assert()
        .failure()
        .stderr(predicate::str::contains("0x2::kiosk::KioskOwnerCap"));
}

#[test]
fn test_decode_requires_exactly_one_input() {
    ob_inspect()
        .args(["decode", "--type", "u8"])
        .assert()
        .failure();
    ob_inspect()
        .args(["decode", "--type", "u8", "--bcs", "AA==", "--fields-with-types", "{}"])
        .assert()
        .failure();
}

#[test]
fn test_decode_truncated_bcs_fails() {
    ob_inspect()
        .args(["decode", "--type", "0x2::kiosk::KioskOwnerCap", "--bcs", "AA=="])
        .assert()
        .failure();
}

#[test]
#[ignore = "requires network access"]
fn test_fetch_system_state_is_not_a_coin() {
    ob_inspect()
        .args(["--network", "mainnet", "fetch", "--type", "0x2::coin::Coin<0x2::sui::SUI>", "0x5"])
        .assert()
        .failure();
}
