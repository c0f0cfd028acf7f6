//! Coercion properties across every schema contract

use pkg_meta::{Contract, ScalarKind, ensure_list, schema, verify};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;
use serde_json::{Value, json};

fn arb_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(Value::from),
        (-1.0e6f64..1.0e6).prop_map(Value::from),
        "[a-z0-9 ._-]{0,12}".prop_map(Value::String),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    arb_leaf().prop_recursive(3, 24, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec(("[a-z_]{1,8}", inner), 0..4)
                .prop_map(|entries| Value::Object(entries.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn verify_is_idempotent_for_every_schema_contract(value in arb_value()) {
        for entry in schema().entries() {
            if let Ok(once) = verify(entry.name, &value, &entry.contract) {
                let twice = verify(entry.name, &once, &entry.contract);
                prop_assert_eq!(twice, Ok(once));
            }
        }
    }

    #[test]
    fn list_contract_wraps_scalars(value in arb_leaf()) {
        let coerced = verify("keywords", &value, &Contract::ListOfString).unwrap();
        prop_assert_eq!(coerced.as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn list_contract_keeps_first_seen_order(items in prop::collection::vec("[abc]", 0..10)) {
        let raw: Vec<Value> = items.iter().cloned().map(Value::String).collect();
        let coerced = ensure_list(&raw);

        let mut expected: Vec<Value> = Vec::new();
        for item in raw {
            if !expected.contains(&item) {
                expected.push(item);
            }
        }
        prop_assert_eq!(coerced, expected);
    }

    #[test]
    fn second_alternative_applies_when_first_fails(text in "[a-z]{1,10}") {
        let contract = Contract::OneOf(vec![
            Contract::Scalar(ScalarKind::Float),
            Contract::Scalar(ScalarKind::Str),
        ]);
        prop_assume!(text.parse::<f64>().is_err());
        let coerced = verify("version", &json!(text.clone()), &contract).unwrap();
        prop_assert_eq!(coerced, Value::String(text));
    }
}

#[rstest]
#[case("install_requires", json!("requests"), json!("requests"))]
#[case("install_requires", json!(3), json!("3"))]
#[case("install_requires", json!(["a", "a"]), json!(["a", "a"]))]
#[case("classifiers", json!(["b", "a", "b"]), json!(["b", "a"]))]
#[case("zip_safe", json!(0), json!(false))]
#[case("version", json!(1.5), json!("1.5"))]
#[case("data_files", json!("share/demo"), json!(["share/demo"]))]
#[case("entry_points", json!({"console_scripts": "demo = demo:main"}), json!({"console_scripts": ["demo = demo:main"]}))]
fn test_schema_key_coercion(#[case] key: &str, #[case] raw: Value, #[case] expected: Value) {
    let contract = schema().contract(key).unwrap();
    assert_eq!(verify(key, &raw, contract).unwrap(), expected);
}

#[rstest]
#[case("package_dir", json!("src"), "package_dir should be a dict, not str!")]
#[case("cmdclass", json!(["test"]), "cmdclass should be a dict, not list!")]
#[case("entry_points", json!({"console_scripts": null}), "entry_points[\"console_scripts\"] should be a list, not NoneType!")]
fn test_schema_key_mismatch(#[case] key: &str, #[case] raw: Value, #[case] message: &str) {
    let contract = schema().contract(key).unwrap();
    let err = verify(key, &raw, contract).unwrap_err();
    assert_eq!(err.to_string(), message);
}
