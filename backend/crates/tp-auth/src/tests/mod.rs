
use std::collections::BTreeMap;

/// Build an assertion map from literal pairs
pub(crate) fn assertion(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
