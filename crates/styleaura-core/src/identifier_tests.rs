//! Tests for `ObjectId`.

use super::*;
use std::collections::HashSet;

#[test]
fn test_parse_valid_hex() {
    let id = ObjectId::parse_str("507f1f77bcf86cd799439011").unwrap();
    assert_eq!(id.to_hex(), "507f1f77bcf86cd799439011");
    assert_eq!(id.to_string(), "507f1f77bcf86cd799439011");
}

#[test]
fn test_parse_uppercase_normalizes_to_lowercase() {
    let id: ObjectId = "507F1F77BCF86CD799439011".parse().unwrap();
    assert_eq!(id.to_hex(), "507f1f77bcf86cd799439011");
}

#[test]
fn test_parse_rejects_empty() {
    let err = ObjectId::parse_str("").unwrap_err();
    assert!(matches!(err, Error::InvalidIdentifier(_)));
}

#[test]
fn test_parse_rejects_wrong_length() {
    assert!(ObjectId::parse_str("507f1f77").is_err());
    assert!(ObjectId::parse_str("507f1f77bcf86cd7994390110").is_err());
}

#[test]
fn test_parse_rejects_non_hex() {
    let err = ObjectId::parse_str("zzzzzzzzzzzzzzzzzzzzzzzz").unwrap_err();
    assert!(matches!(err, Error::InvalidIdentifier(ref s) if s == "zzzzzzzzzzzzzzzzzzzzzzzz"));
}

#[test]
fn test_parse_rejects_multibyte_input_of_matching_length() {
    // 12 two-byte characters: 24 bytes, but not hex.
    assert!(ObjectId::parse_str("éééééééééééé").is_err());
}

#[test]
fn test_new_ids_are_unique() {
    let ids: HashSet<ObjectId> = (0..1000).map(|_| ObjectId::new()).collect();
    assert_eq!(ids.len(), 1000);
}

#[test]
fn test_new_id_roundtrips_through_hex() {
    let id = ObjectId::new();
    let parsed = ObjectId::parse_str(&id.to_hex()).unwrap();
    assert_eq!(parsed, id);
    assert_eq!(id.to_hex().len(), OBJECT_ID_HEX_LEN);
}

#[test]
fn test_timestamp_is_recent() {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs();
    let ts = u64::from(ObjectId::new().timestamp());
    assert!(now.abs_diff(ts) <= 5);
}

#[test]
fn test_from_json_plain_string() {
    let value = serde_json::json!("507f1f77bcf86cd799439011");
    assert!(ObjectId::from_json(&value).is_some());
}

#[test]
fn test_from_json_extended() {
    let value = serde_json::json!({"$oid": "507f1f77bcf86cd799439011"});
    let id = ObjectId::from_json(&value).unwrap();
    assert_eq!(id.to_hex(), "507f1f77bcf86cd799439011");
    assert_eq!(id.to_extended_json(), value);
}

#[test]
fn test_from_json_rejects_other_shapes() {
    assert!(ObjectId::from_json(&serde_json::json!(42)).is_none());
    assert!(ObjectId::from_json(&serde_json::json!({"id": "x"})).is_none());
    assert!(ObjectId::from_json(&serde_json::json!("short")).is_none());
}

#[test]
fn test_serde_uses_hex_string() {
    let id = ObjectId::parse_str("507f1f77bcf86cd799439011").unwrap();
    let json = serde_json::to_value(id).unwrap();
    assert_eq!(json, serde_json::json!("507f1f77bcf86cd799439011"));

    let back: ObjectId = serde_json::from_value(serde_json::json!({"$oid": "507f1f77bcf86cd799439011"})).unwrap();
    assert_eq!(back, id);
}
