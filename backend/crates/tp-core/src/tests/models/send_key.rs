use crate::{SEND_KEY_LENGTH, SendKey};

use std::collections::HashSet;

use googletest::prelude::*;

#[test]
fn given_generated_key_then_it_is_64_alphanumeric_chars() {
    let key = SendKey::generate();

    assert_that!(key.as_str().len(), eq(SEND_KEY_LENGTH));
    assert!(key.as_str().chars().all(|c| c.is_ascii_alphanumeric()));
}

#[test]
fn given_many_generated_keys_then_no_duplicates() {
    let keys: HashSet<String> = (0..500).map(|_| SendKey::generate().into_inner()).collect();

    assert_that!(keys.len(), eq(500));
}

#[test]
fn given_key_when_formatted_then_full_value_is_not_printed() {
    let key = SendKey::new("abcdefghijklmnopqrstuvwxyz");

    let display = key.to_string();
    let debug = format!("{:?}", key);

    assert_that!(display, eq("abcdef…"));
    assert_that!(debug, not(contains_substring("xyz")));
}

#[test]
fn given_key_when_serialized_then_raw_value_is_kept() {
    let key = SendKey::new("abc123");

    let json = serde_json::to_string(&key).unwrap();

    assert_that!(json, eq("\"abc123\""));
}
