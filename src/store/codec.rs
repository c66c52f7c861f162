use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Deserialize;

use crate::store::PrefValue;

/// Phrase whose base64 rendering marks a plain string value as actually
/// encoding a list. The marker must match the target app's byte-for-byte or
/// the app will treat the value as a one-element scalar.
const LIST_MARKER_PHRASE: &str = "This is the prefix for a list.";

/// The marker prefix in its on-disk form.
pub fn list_prefix() -> String {
    BASE64.encode(LIST_MARKER_PHRASE)
}

/// On-disk representation of an ordered string list. The target app has used
/// all three across its history with no version marker on disk, so the scheme
/// is an explicit configuration input and is never inferred from the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ListScheme {
    /// Native multi-value set. Lossy for order; round trips guarantee set
    /// equality only.
    StringSet,
    /// The list serialized as one JSON array string.
    JsonArray,
    /// The marker prefix concatenated with the JSON array string.
    PrefixedJsonArray,
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("expected a {expected} value, found {found}")]
    WrongShape {
        expected: &'static str,
        found: &'static str,
    },
    #[error("list marker prefix missing")]
    MissingPrefix,
    #[error("malformed JSON list: {0}")]
    Json(#[from] serde_json::Error),
}

/// Encode an ordered string list for the given scheme.
pub fn encode(items: &[String], scheme: ListScheme) -> PrefValue {
    match scheme {
        ListScheme::StringSet => PrefValue::StringSet(items.to_vec()),
        ListScheme::JsonArray => PrefValue::String(json_array(items)),
        ListScheme::PrefixedJsonArray => {
            PrefValue::String(format!("{}{}", list_prefix(), json_array(items)))
        }
    }
}

/// Decode a stored value back into the list. Fails when the value's shape
/// does not match the scheme, when the prefixed scheme's marker is absent, or
/// when the JSON payload is malformed.
pub fn decode(value: &PrefValue, scheme: ListScheme) -> Result<Vec<String>, DecodeError> {
    match scheme {
        ListScheme::StringSet => match value {
            PrefValue::StringSet(items) => Ok(items.clone()),
            other => Err(DecodeError::WrongShape {
                expected: "string set",
                found: other.type_name(),
            }),
        },
        ListScheme::JsonArray => Ok(serde_json::from_str(expect_string(value)?)?),
        ListScheme::PrefixedJsonArray => {
            let raw = expect_string(value)?;
            let payload = raw
                .strip_prefix(&list_prefix())
                .ok_or(DecodeError::MissingPrefix)?;
            Ok(serde_json::from_str(payload)?)
        }
    }
}

fn expect_string(value: &PrefValue) -> Result<&str, DecodeError> {
    match value {
        PrefValue::String(s) => Ok(s),
        other => Err(DecodeError::WrongShape {
            expected: "string",
            found: other.type_name(),
        }),
    }
}

fn json_array(items: &[String]) -> String {
    serde_json::Value::from(items.to_vec()).to_string()
}
