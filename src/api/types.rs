// API record types.
// Shapes of the JSON documents returned by the platform endpoints.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A platform user as returned by the current-user endpoint.
///
/// Fields outside the ones named here are kept in `extra` so that a
/// parse/serialize round trip keeps every field of the shared schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            is_admin: false,
            email: None,
            first_name: None,
            last_name: None,
            profile_image_url: None,
            extra: Map::new(),
        }
    }

    /// Name to show for this user: full name, then email, then id.
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(first), None) => first.clone(),
            (None, Some(last)) => last.clone(),
            (None, None) => self.email.clone().unwrap_or_else(|| self.id.clone()),
        }
    }
}

/// Site-wide animation settings managed from the admin panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationSettings {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_speed")]
    pub speed: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_enabled() -> bool {
    true
}

fn default_speed() -> f64 {
    1.0
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            speed: default_speed(),
            style: None,
            extra: Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_minimal() {
        let user: User = serde_json::from_str(r#"{"id":"u1","isAdmin":false}"#).unwrap();
        assert_eq!(user, User::new("u1"));
    }

    #[test]
    fn test_user_missing_admin_flag() {
        let user: User = serde_json::from_str(r#"{"id":"u2"}"#).unwrap();
        assert!(!user.is_admin);
    }

    #[test]
    fn test_user_keeps_unknown_fields() {
        let json = r#"{
            "id": "u3",
            "isAdmin": true,
            "email": "dj@example.com",
            "firstName": "Nia",
            "createdAt": "2024-05-01T12:00:00Z",
            "djName": "NiaNights",
            "genres": ["techno", "dub"]
        }"#;
        let user: User = serde_json::from_str(json).unwrap();

        assert!(user.is_admin);
        assert_eq!(user.first_name.as_deref(), Some("Nia"));
        assert_eq!(user.extra["djName"], "NiaNights");

        let reparsed: User = serde_json::from_str(&serde_json::to_string(&user).unwrap()).unwrap();
        assert_eq!(reparsed, user);

        let original: Value = serde_json::from_str(json).unwrap();
        assert_eq!(serde_json::to_value(&user).unwrap(), original);
    }

    #[test]
    fn test_display_name() {
        let mut user = User::new("u4");
        assert_eq!(user.display_name(), "u4");

        user.email = Some("u4@example.com".to_string());
        assert_eq!(user.display_name(), "u4@example.com");

        user.first_name = Some("Kai".to_string());
        user.last_name = Some("Moss".to_string());
        assert_eq!(user.display_name(), "Kai Moss");
    }

    #[test]
    fn test_animation_settings_defaults() {
        let settings: AnimationSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, AnimationSettings::default());

        let settings: AnimationSettings =
            serde_json::from_str(r#"{"enabled":false,"speed":0.5,"style":"pulse","logoGlow":true}"#)
                .unwrap();
        assert!(!settings.enabled);
        assert_eq!(settings.style.as_deref(), Some("pulse"));
        assert_eq!(settings.extra["logoGlow"], true);
    }
}
