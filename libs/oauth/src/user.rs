//! Canonical member record mapped from the provider profile

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A member profile normalized out of the provider's field names.
///
/// Every mapped field is optional because restricted profiles omit fields;
/// the full original payload is retained in `raw` for introspection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalUser {
    /// Member identifier, from `id` falling back to `member_id`
    pub id: Option<String>,
    /// Login/display handle, from `name`
    pub nickname: Option<String>,
    /// Human name, from `full_name` falling back to `name`
    pub display_name: Option<String>,
    /// Email address
    pub email: Option<String>,
    /// Avatar image URL, from `photo_url`
    pub avatar_url: Option<String>,
    /// The profile payload exactly as the provider returned it
    pub raw: Value,
}

impl CanonicalUser {
    /// Map a raw profile payload onto the canonical field names.
    ///
    /// Numeric identifiers are stringified so `id` is stable regardless of
    /// whether the installation serializes it as a JSON number or string.
    pub fn from_raw(raw: Value) -> Self {
        let id = string_field(&raw, "id").or_else(|| string_field(&raw, "member_id"));
        let nickname = string_field(&raw, "name");
        let display_name = string_field(&raw, "full_name").or_else(|| string_field(&raw, "name"));
        let email = string_field(&raw, "email");
        let avatar_url = string_field(&raw, "photo_url");

        Self {
            id,
            nickname,
            display_name,
            email,
            avatar_url,
            raw,
        }
    }

    /// The Invision member ID, an alias for `id` in provider terminology
    pub fn member_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// The member's full name
    pub fn full_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// The member's avatar URL
    pub fn avatar(&self) -> Option<&str> {
        self.avatar_url.as_deref()
    }
}

fn string_field(raw: &Value, key: &str) -> Option<String> {
    match raw.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
