//! Serde helper functions for query-string deserialization.
//!
//! Query strings carry every value as text, and clients often send an empty
//! value (`?approved=`) to mean "no filter".

use serde::{Deserialize, Deserializer};

/// Deserialize an optional bool, treating empty strings as None.
/// Accepts native booleans or the strings `true` and `false`.
pub fn deserialize_optional_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        String(String),
    }

    match Option::<BoolOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(BoolOrString::Bool(b)) => Ok(Some(b)),
        Some(BoolOrString::String(s)) => match s.trim() {
            "" => Ok(None),
            "true" => Ok(Some(true)),
            "false" => Ok(Some(false)),
            other => Err(serde::de::Error::custom(format!(
                "expected true or false, got {other:?}"
            ))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test struct that uses the deserializer function
    #[derive(Debug, Deserialize, PartialEq)]
    struct TestStruct {
        #[serde(default, deserialize_with = "deserialize_optional_bool")]
        flag: Option<bool>,
    }

    #[test]
    fn test_deserialize_optional_bool_empty() {
        let json = r#"{"flag": ""}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.flag, None);
    }

    #[test]
    fn test_deserialize_optional_bool_missing() {
        let result: TestStruct = serde_json::from_str("{}").unwrap();
        assert_eq!(result.flag, None);
    }

    #[test]
    fn test_deserialize_optional_bool_strings() {
        let result: TestStruct = serde_json::from_str(r#"{"flag": "true"}"#).unwrap();
        assert_eq!(result.flag, Some(true));

        let result: TestStruct = serde_json::from_str(r#"{"flag": "false"}"#).unwrap();
        assert_eq!(result.flag, Some(false));
    }

    #[test]
    fn test_deserialize_optional_bool_native() {
        let result: TestStruct = serde_json::from_str(r#"{"flag": true}"#).unwrap();
        assert_eq!(result.flag, Some(true));
    }

    #[test]
    fn test_deserialize_optional_bool_invalid() {
        let result: Result<TestStruct, _> = serde_json::from_str(r#"{"flag": "maybe"}"#);
        assert!(result.is_err());
    }
}
