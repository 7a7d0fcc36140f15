//! Normalization rules observable through the public API.

use bigfix_api::inventory::{parse_timestamp, split_client_setting, Computer, NameValue};

#[test]
fn test_timestamp_layouts_agree_on_instant() {
    let rfc1123 = parse_timestamp("Mon, 2 Jan 2006 15:04:05 -0700").unwrap();
    let rfc3339 = parse_timestamp("2006-01-02T15:04:05-07:00").unwrap();
    let utc = parse_timestamp("2006-01-02T22:04:05Z").unwrap();
    assert_eq!(rfc1123, rfc3339);
    assert_eq!(rfc1123, utc);
    assert_eq!(parse_timestamp("not-a-date"), None);
    assert_eq!(parse_timestamp(""), None);
}

#[test]
fn test_client_setting_split() {
    assert_eq!(split_client_setting("Foo=bar"), NameValue::new("Foo", "bar"));
    assert_eq!(split_client_setting("Foo"), NameValue::new("Foo", ""));
    assert_eq!(split_client_setting("a=b=c"), NameValue::new("a", "b=c"));
}

#[test]
fn test_property_names_are_exact() {
    let mut computer = Computer::default();
    computer.apply_property("OS", "Linux Red Hat Enterprise Server 9.3");
    computer.apply_property("os", "ignored casing");
    assert_eq!(computer.os, "Linux Red Hat Enterprise Server 9.3");
    assert_eq!(computer.other_properties, vec![NameValue::new("os", "ignored casing")]);
}

#[test]
fn test_serializes_for_row_rendering() {
    let mut computer = Computer::default();
    computer.apply_property("Computer Name", "WS-1");
    let json = serde_json::to_value(&computer).unwrap();
    assert_eq!(json["name"], "WS-1");
}
