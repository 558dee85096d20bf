//! Credential masking and extraction for service integrations.
//!
//! Stored credentials are opaque JSON objects. They are never returned to a
//! client verbatim: every string leaf is passed through [`mask_credential`].

use serde_json::Value;

/// Number of trailing characters left visible by [`mask_credential`].
pub const VISIBLE_SUFFIX_LEN: usize = 4;

/// Mask all but the last four characters of a secret.
///
/// Values of four characters or fewer are masked completely.
pub fn mask_credential(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= VISIBLE_SUFFIX_LEN {
        return "*".repeat(chars.len());
    }
    let hidden = chars.len() - VISIBLE_SUFFIX_LEN;
    let mut masked = "*".repeat(hidden);
    masked.extend(&chars[hidden..]);
    masked
}

/// Return a copy of `credentials` with every string leaf masked.
///
/// Numbers, booleans and nulls are kept; objects and arrays are walked.
pub fn mask_credentials(credentials: &Value) -> Value {
    match credentials {
        Value::String(s) => Value::String(mask_credential(s)),
        Value::Array(items) => Value::Array(items.iter().map(mask_credentials).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), mask_credentials(v)))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// The key/secret pair a provider authenticates with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: Option<String>,
}

impl Credentials {
    /// Read `apiKey` / `apiSecret` out of an integration's credentials JSON.
    ///
    /// Missing fields become empty values; the synthetic providers do not
    /// inspect them.
    pub fn from_json(value: &Value) -> Self {
        let api_key = value
            .get("apiKey")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let api_secret = value
            .get("apiSecret")
            .and_then(Value::as_str)
            .map(str::to_string);
        Self { api_key, api_secret }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn masks_all_but_last_four() {
        assert_eq!(mask_credential("abcd1234"), "****1234");
        assert_eq!(mask_credential("12345"), "*2345");
    }

    #[test]
    fn short_values_are_fully_masked() {
        assert_eq!(mask_credential("ab"), "**");
        assert_eq!(mask_credential("abcd"), "****");
        assert_eq!(mask_credential(""), "");
    }

    #[test]
    fn masks_nested_string_leaves() {
        let creds = json!({
            "apiKey": "sk_live_abcdef",
            "region": "us-east-1",
            "port": 443,
            "extra": { "token": "xyz" }
        });
        let masked = mask_credentials(&creds);
        assert_eq!(masked["apiKey"], "**********cdef");
        assert_eq!(masked["region"], "*****st-1");
        assert_eq!(masked["port"], 443);
        assert_eq!(masked["extra"]["token"], "***");
    }

    #[test]
    fn extracts_key_and_secret() {
        let creds = Credentials::from_json(&json!({ "apiKey": "k", "apiSecret": "s" }));
        assert_eq!(creds.api_key, "k");
        assert_eq!(creds.api_secret.as_deref(), Some("s"));

        let empty = Credentials::from_json(&json!({}));
        assert_eq!(empty, Credentials::default());
    }
}
