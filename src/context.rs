// Application context.
// Explicitly constructed state passed to the front end; torn down on exit.

use std::sync::Arc;

use crate::api::ApiClient;
use crate::config::Config;
use crate::error::{CueRoomError, Result};
use crate::session::{AuthSession, SessionCache};
use crate::settings::AnimationSettingsProvider;
use crate::storage::FileStore;

pub struct AppContext {
    pub config: Config,
    pub api: Arc<ApiClient>,
    settings: Option<AnimationSettingsProvider>,
}

impl AppContext {
    /// Build the context without starting any background work.
    pub fn new(config: Config) -> Result<Self> {
        let api = ApiClient::new(&config.base_url, config.request_timeout)?;
        Ok(Self {
            config,
            api: Arc::new(api),
            settings: None,
        })
    }

    /// Start the animation settings provider. Calling twice keeps the first.
    pub fn start_settings(&mut self) {
        if self.settings.is_none() {
            self.settings = Some(AnimationSettingsProvider::start(
                Arc::clone(&self.api),
                self.config.settings_poll_interval,
            ));
        }
    }

    pub fn animation_settings(&self) -> Result<&AnimationSettingsProvider> {
        self.settings
            .as_ref()
            .ok_or(CueRoomError::NotInitialized("animation settings"))
    }

    /// Auth session persisted in the configured data directory.
    pub fn auth_session(&self) -> AuthSession<FileStore> {
        let store = FileStore::open(self.config.data_dir.clone());
        AuthSession::new(SessionCache::new(store))
    }

    pub async fn shutdown(self) {
        if let Some(settings) = self.settings {
            settings.shutdown().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    fn test_config(data_dir: Option<&std::path::Path>) -> Config {
        Config {
            base_url: "http://127.0.0.1:9".to_string(),
            data_dir: data_dir.map(|d| d.to_path_buf()),
            settings_poll_interval: Duration::from_secs(60),
            request_timeout: Duration::from_millis(200),
        }
    }

    #[test]
    fn test_settings_not_initialized() {
        let context = AppContext::new(test_config(None)).unwrap();
        let err = context.animation_settings().err().unwrap();
        assert!(matches!(err, CueRoomError::NotInitialized(_)));
    }

    #[tokio::test]
    async fn test_settings_lifecycle() {
        let mut context = AppContext::new(test_config(None)).unwrap();
        context.start_settings();
        assert!(context.animation_settings().is_ok());
        context.shutdown().await;
    }

    #[test]
    fn test_auth_session_reads_data_dir() {
        let temp_dir = TempDir::new().unwrap();
        let context = AppContext::new(test_config(Some(temp_dir.path()))).unwrap();

        context
            .auth_session()
            .cache()
            .set(&crate::api::User::new("u1"));

        let state = context.auth_session().state();
        assert!(state.is_authenticated);
    }

    #[test]
    fn test_auth_session_without_data_dir() {
        let context = AppContext::new(test_config(None)).unwrap();
        let session = context.auth_session();

        session.cache().set(&crate::api::User::new("u1"));
        assert!(!session.state().is_authenticated);
    }
}
