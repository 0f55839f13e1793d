//! Full pipeline tests: kernel + built-in maskers + traversal

use serde_json::json;
use veil_core::{Format, MaskOptions, Strategy};
use veil_maskers::standard_kernel;
use veil_traverse::{FieldMap, TraverseOptions, traverse};

fn opts(mappings: &[(&str, &str)]) -> TraverseOptions {
    TraverseOptions::new(FieldMap::new(mappings.iter().copied()).unwrap())
}

#[test]
fn masks_a_single_nested_leaf() {
    let kernel = standard_kernel().unwrap();
    let tree = json!({"a": {"b": "x@y.com", "keep": "as-is"}, "n": 1});

    let masked = traverse(&kernel, &tree, &opts(&[("a.b", "email")])).unwrap();
    assert_eq!(masked, json!({"a": {"b": "*@y.com", "keep": "as-is"}, "n": 1}));
}

#[test]
fn masks_a_realistic_user_record() {
    let kernel = standard_kernel().unwrap();
    let tree = json!({
        "user": {
            "name": "Ada Lovelace",
            "email": "ada.lovelace@example.com",
            "payment": {"card": "4532-0151-1283-0366"}
        },
        "servers": ["10.0.0.1", "10.0.0.2"],
        "active": true
    });

    let mut options = opts(&[
        ("user.email", "email"),
        ("user.payment.card", "card"),
        ("servers", "ip"),
    ]);
    options.strategy = Some(Strategy::Last(4));

    let masked = traverse(&kernel, &tree, &options).unwrap();
    assert_eq!(masked["user"]["name"], json!("Ada Lovelace"));
    assert_eq!(masked["user"]["email"], json!("********lace@example.com"));
    assert_eq!(masked["user"]["payment"]["card"], json!("**** **** **** 0366"));
    assert_eq!(masked["servers"], json!(["****.0.1", "****.0.2"]));
    assert_eq!(masked["active"], json!(true));
}

#[test]
fn log_format_redacts_every_matched_leaf() {
    let kernel = standard_kernel().unwrap();
    let tree = json!({"email": "a@b.org", "ssn": "123-45-6789"});

    let mut options = opts(&[("email", "email"), ("ssn", "ssn")]);
    options.format = Some(Format::Log);

    let masked = traverse(&kernel, &tree, &options).unwrap();
    assert_eq!(masked["email"], json!("[REDACTED:email]"));
    assert_eq!(masked["ssn"], json!("[REDACTED:ssn]"));
}

#[test]
fn invalid_leaf_aborts_traversal() {
    let kernel = standard_kernel().unwrap();
    let tree = json!({"a": {"email": "not-an-email"}});

    let err = traverse(&kernel, &tree, &opts(&[("a.email", "email")])).unwrap_err();
    assert_eq!(err.code(), "invalid_value");
    assert_eq!(err.context()["mask_type"], "email");
}

#[test]
fn direct_primitive_masking_composes_strategy_and_format() {
    let kernel = standard_kernel().unwrap();

    let options = MaskOptions::default()
        .with_strategy(Strategy::Last(4))
        .with_format(Format::Display);
    let masked = kernel
        .execute_mask("card", "4532015112830366", &options)
        .unwrap();
    assert_eq!(masked, "**** **** **** 0366");

    let compact = kernel
        .execute_mask(
            "card",
            "4532015112830366",
            &options.clone().with_format(Format::Compact),
        )
        .unwrap();
    assert_eq!(compact, "************0366");
}

#[test]
fn wildcard_and_exact_mappings_cooperate() {
    let kernel = standard_kernel().unwrap();
    let tree = json!({
        "contacts": {
            "primary": "a@x.com",
            "backup": "b@y.org",
        }
    });

    // Wildcard treats both as emails; the exact rule narrows `backup`.
    let mut options = opts(&[("contacts.*", "email"), ("contacts.backup", "email")]);
    options.strategy = Some(Strategy::Full);

    let masked = traverse(&kernel, &tree, &options).unwrap();
    assert_eq!(masked["contacts"]["primary"], json!("*@x.com"));
    assert_eq!(masked["contacts"]["backup"], json!("*@y.org"));
}

#[test]
fn structure_is_preserved_for_unmatched_data() {
    let kernel = standard_kernel().unwrap();
    let tree = json!({
        "deeply": {"nested": [{"mixed": [1, "two", null, {"three": 3.0}]}]},
        "flags": [true, false]
    });

    let masked = traverse(&kernel, &tree, &opts(&[("absent.path", "email")])).unwrap();
    assert_eq!(masked, tree);
}
