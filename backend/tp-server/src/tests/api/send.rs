use crate::SendParams;

fn params(key: Option<&str>, text: Option<&str>) -> SendParams {
    SendParams {
        key: key.map(String::from),
        text: text.map(String::from),
    }
}

#[test]
fn test_form_fields_take_precedence() {
    let merged = params(Some("form-key"), Some("form-text"))
        .or(params(Some("query-key"), Some("query-text")));

    assert_eq!(merged.key.as_deref(), Some("form-key"));
    assert_eq!(merged.text.as_deref(), Some("form-text"));
}

#[test]
fn test_missing_form_fields_fall_back_to_query() {
    let merged = params(None, Some("form-text")).or(params(Some("query-key"), None));

    assert_eq!(merged.key.as_deref(), Some("query-key"));
    assert_eq!(merged.text.as_deref(), Some("form-text"));
}

#[test]
fn test_empty_form_field_still_wins() {
    let merged = params(Some(""), None).or(params(Some("query-key"), None));

    assert_eq!(merged.key.as_deref(), Some(""));
}
