use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::converter::{json, Converter, Json};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct WindowState {
    width: u32,
    height: u32,
    maximized: bool,
    title: Option<String>,
}

#[test]
fn test_struct_round_trip() {
    let converter: Json<WindowState> = json();
    let state = WindowState {
        width: 800,
        height: 600,
        maximized: false,
        title: Some("main".into()),
    };
    let raw = converter.stringify(&state);
    assert_eq!(raw, r#"{"width":800,"height":600,"maximized":false,"title":"main"}"#);
    assert_eq!(converter.parse(&raw), Some(state));
}

#[test]
fn test_malformed_or_mismatched_json_is_none() {
    let converter = Json::<WindowState>::new();
    assert_eq!(converter.parse(""), None);
    assert_eq!(converter.parse("{"), None);
    assert_eq!(converter.parse(r#"{"width":"wide"}"#), None);
    assert_eq!(converter.parse("[1,2,3]"), None);
}

#[test]
fn test_unserializable_value_falls_back_to_null() {
    let converter = Json::<HashMap<(u8, u8), u8>>::new();
    let mut value = HashMap::new();
    value.insert((1, 2), 3);
    assert_eq!(converter.stringify(&value), "null");
}
