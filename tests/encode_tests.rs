use chrono::{NaiveDate, NaiveTime};
use num_bigint::BigInt;
use tomlconv::batch::encode_all;
use tomlconv::{
    decode, encode, host, EncodeOptions, EnumValue, Error, ErrorCategory, HostMap, HostValue,
    PropertyBag, PropertyError, Record,
};
use uuid::Uuid;

fn encode_text(value: &HostValue) -> String {
    encode(value, &EncodeOptions::default()).unwrap().text
}

fn map_of(entries: Vec<(&str, HostValue)>) -> HostValue {
    HostValue::Map(
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect(),
    )
}

/// A property bag that reads its values from a closure, like a computed
/// property on a live object.
#[derive(Debug)]
struct Sensor {
    id: u32,
}

impl PropertyBag for Sensor {
    fn type_name(&self) -> &str {
        "Sensor"
    }

    fn property_names(&self) -> Vec<String> {
        vec!["id".to_string(), "reading".to_string(), "unit".to_string()]
    }

    fn property(&self, name: &str) -> Result<HostValue, PropertyError> {
        match name {
            "id" => Ok(HostValue::from(self.id)),
            "reading" => Err(PropertyError::new("sensor offline")),
            "unit" => Ok(HostValue::from("celsius")),
            other => Err(PropertyError::new(format!("no property {}", other))),
        }
    }
}

#[test]
fn test_key_order_is_kept() {
    let value = host!({ "c": 1, "a": 2, "b": 3 });
    assert_eq!(encode_text(&value), "c = 1\na = 2\nb = 3\n");
}

#[test]
fn test_depth_zero_stringifies_nested_table() {
    let value = host!({ "a": { "b": 1 } });
    let out = encode(&value, &EncodeOptions::new().with_depth(0)).unwrap();
    assert!(out.truncated);
    assert_eq!(out.text, "a = \"{b = 1}\"\n");
}

#[test]
fn test_depth_one_keeps_nested_table() {
    let value = host!({ "a": { "b": 1 } });
    let out = encode(&value, &EncodeOptions::new().with_depth(1)).unwrap();
    assert!(!out.truncated);
    assert_eq!(out.text, "[a]\nb = 1\n");
}

#[test]
fn test_default_depth_is_two() {
    let value = host!({ "l1": { "l2": { "l3": { "l4": 1 } } } });
    let out = encode(&value, &EncodeOptions::default()).unwrap();
    assert!(out.truncated);

    let decoded = decode(&out.text).unwrap();
    let l2 = decoded.get("l1").and_then(|v| v.get("l2")).unwrap();
    assert_eq!(l2.get("l3").and_then(HostValue::as_str), Some("{l4 = 1}"));
}

#[test]
fn test_self_referencing_graph_terminates() {
    // a graph that keeps producing children, like a parent pointer cycle
    #[derive(Debug)]
    struct Node(u32);

    impl PropertyBag for Node {
        fn type_name(&self) -> &str {
            "Node"
        }
        fn property_names(&self) -> Vec<String> {
            vec!["id".to_string(), "next".to_string()]
        }
        fn property(&self, name: &str) -> Result<HostValue, PropertyError> {
            match name {
                "id" => Ok(HostValue::from(self.0)),
                _ => Ok(HostValue::object(Node(self.0 + 1))),
            }
        }
    }

    let out = encode(&HostValue::object(Node(0)), &EncodeOptions::new().with_depth(5)).unwrap();
    assert!(out.truncated);
    assert!(out.text.contains("id = 5"));
    assert!(!out.text.contains("id = 6"));
}

#[test]
fn test_property_failure_message_is_written() {
    let value = map_of(vec![("sensor", HostValue::object(Sensor { id: 7 }))]);
    let out = encode(&value, &EncodeOptions::default()).unwrap();
    assert!(!out.truncated);
    assert_eq!(
        out.text,
        "[sensor]\nid = 7\nreading = \"sensor offline\"\nunit = \"celsius\"\n"
    );
}

#[test]
fn test_record_failure_isolated() {
    let record = Record::new("Thing")
        .with("ok", 1)
        .with_failure("bad", "boom")
        .with("also_ok", true);
    let out = encode(&HostValue::object(record), &EncodeOptions::default()).unwrap();
    assert_eq!(out.text, "ok = 1\nbad = \"boom\"\nalso_ok = true\n");
}

#[test]
fn test_integer_coercion() {
    let value = map_of(vec![
        ("u64_max", HostValue::from(u64::MAX)),
        ("u64_small", HostValue::from(100u64)),
        ("i128_small", HostValue::from(-5i128)),
        ("u128_big", HostValue::from(u128::MAX)),
        ("usize", HostValue::from(3usize)),
        ("big", HostValue::from(BigInt::from(10).pow(30))),
        ("big_small", HostValue::from(BigInt::from(-42))),
    ]);
    assert_eq!(
        encode_text(&value),
        "u64_max = \"18446744073709551615\"\n\
         u64_small = 100\n\
         i128_small = -5\n\
         u128_big = \"340282366920938463463374607431768211455\"\n\
         usize = 3\n\
         big = \"1000000000000000000000000000000\"\n\
         big_small = -42\n"
    );
}

#[test]
fn test_enum_char_and_uuid() {
    let id = Uuid::nil();
    let value = map_of(vec![
        ("color", HostValue::from(EnumValue::new("Color", "Blue", 2))),
        ("flags", HostValue::from(EnumValue::new("Flags", "All", i128::from(u64::MAX)))),
        ("letter", HostValue::from('x')),
        ("id", HostValue::from(id)),
    ]);
    assert_eq!(
        encode_text(&value),
        "color = 2\n\
         flags = \"18446744073709551615\"\n\
         letter = \"x\"\n\
         id = \"00000000-0000-0000-0000-000000000000\"\n"
    );
}

#[test]
fn test_dates_are_native_toml() {
    let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let value = map_of(vec![
        ("day", HostValue::from(date)),
        ("at", HostValue::from(date.and_hms_opt(12, 0, 0).unwrap())),
        ("time", HostValue::from(NaiveTime::from_hms_opt(8, 30, 0).unwrap())),
    ]);
    assert_eq!(
        encode_text(&value),
        "day = 2024-03-01\nat = 2024-03-01T12:00:00\ntime = 08:30:00\n"
    );
}

#[test]
fn test_null_is_empty_string() {
    assert_eq!(encode_text(&host!({ "nothing": null })), "nothing = \"\"\n");
}

#[test]
fn test_table_array_promotion() {
    let value = host!({ "p": [{ "x": 1 }, { "x": 2 }] });
    assert_eq!(encode_text(&value), "[[p]]\nx = 1\n\n[[p]]\nx = 2\n");
}

#[test]
fn test_empty_sequence_is_plain_array() {
    assert_eq!(encode_text(&host!({ "p": [] })), "p = []\n");
}

#[test]
fn test_mixed_sequence_is_plain_array() {
    let value = host!({ "p": [{ "x": 1 }, 2] });
    assert_eq!(encode_text(&value), "p = [{ x = 1 }, 2]\n");
}

#[test]
fn test_table_before_plain_key_is_inlined() {
    let value = host!({ "server": { "port": 80 }, "name": "web", "tail": { "x": 1 } });
    let text = encode_text(&value);
    assert_eq!(
        text,
        "server = { port = 80 }\nname = \"web\"\n\n[tail]\nx = 1\n"
    );
    let keys: Vec<_> = decode(&text).unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["server", "name", "tail"]);
}

#[test]
fn test_root_must_be_table() {
    for value in [host!(null), host!(1), host!("s"), host!([{ "a": 1 }])] {
        let err = encode(&value, &EncodeOptions::default()).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::InputObjectInvalid);
        assert!(matches!(err, Error::RootNotTable { .. }));
    }
}

#[test]
fn test_empty_map_encodes_to_empty_document() {
    assert_eq!(encode_text(&HostValue::Map(HostMap::new())), "");
}

#[test]
fn test_batch_continues_after_failure() {
    let results = encode_all(
        vec![host!({ "a": 1 }), host!(42), host!({ "a": { "b": { "c": { "d": 1 } } } })],
        &EncodeOptions::default(),
    );
    assert!(results[0].is_ok());
    let err = results[1].as_ref().unwrap_err();
    assert_eq!(err.category, ErrorCategory::InputObjectInvalid);
    assert_eq!(err.target, host!(42));
    assert!(results[2].as_ref().unwrap().truncated);
}
