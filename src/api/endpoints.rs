// TheCueRoom API endpoint functions.
// Typed calls for the current user and the animation settings.

use std::future::Future;

use crate::error::Result;

use super::client::ApiClient;
use super::types::{AnimationSettings, User};

pub const CURRENT_USER_ENDPOINT: &str = "/api/auth/user";
pub const ANIMATION_SETTINGS_ENDPOINT: &str = "/api/animation-settings";

/// Anything that can report the signed-in user.
///
/// `Ok(None)` means the server answered and nobody is signed in.
pub trait CurrentUserSource {
    fn fetch_current_user(&self) -> impl Future<Output = Result<Option<User>>> + Send;
}

/// Anything that can report the current animation settings.
pub trait SettingsSource {
    fn fetch_animation_settings(&self) -> impl Future<Output = Result<AnimationSettings>> + Send;
}

impl ApiClient {
    /// Get the signed-in user, if any.
    pub async fn get_current_user(&self) -> Result<Option<User>> {
        let response = self.get(CURRENT_USER_ENDPOINT).await?;
        let body = response.text().await?;
        parse_current_user(&body)
    }

    /// Get the site animation settings.
    pub async fn get_animation_settings(&self) -> Result<AnimationSettings> {
        let response = self.get(ANIMATION_SETTINGS_ENDPOINT).await?;
        let settings: AnimationSettings = response.json().await?;
        Ok(settings)
    }
}

impl CurrentUserSource for ApiClient {
    async fn fetch_current_user(&self) -> Result<Option<User>> {
        self.get_current_user().await
    }
}

impl SettingsSource for ApiClient {
    async fn fetch_animation_settings(&self) -> Result<AnimationSettings> {
        self.get_animation_settings().await
    }
}

/// Parse a current-user body. An empty body or JSON `null` means signed out.
pub fn parse_current_user(body: &str) -> Result<Option<User>> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    let user: Option<User> = serde_json::from_str(body)?;
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CueRoomError;

    #[test]
    fn test_parse_user() {
        let user = parse_current_user(r#"{"id":"u1","isAdmin":true}"#).unwrap();
        let user = user.unwrap();
        assert_eq!(user.id, "u1");
        assert!(user.is_admin);
    }

    #[test]
    fn test_parse_signed_out() {
        assert!(parse_current_user("null").unwrap().is_none());
        assert!(parse_current_user("").unwrap().is_none());
        assert!(parse_current_user("  \n").unwrap().is_none());
    }

    #[test]
    fn test_parse_garbage() {
        let err = parse_current_user("<html>").unwrap_err();
        assert!(matches!(err, CueRoomError::Json(_)));
    }
}
