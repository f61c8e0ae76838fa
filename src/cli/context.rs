//! Command execution context
//!
//! Wires the session stack for one command: config, token storage, the
//! navigator, the intercepted HTTP client and the session service.

use std::path::PathBuf;
use std::sync::Arc;

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::client::{AuthApi, AuthInterceptor, StocknetClient};
use crate::config::Config;
use crate::error::Result;
use crate::guard::RouteGuard;
use crate::navigation::{History, Navigator, Router};
use crate::session::{LocalStorage, SessionService, TokenStore};

/// Context for command execution
pub struct CommandContext {
    /// Loaded configuration with CLI overrides applied
    pub config: Config,
    /// Token storage shared by the interceptor, guard and session
    pub store: Arc<dyn TokenStore>,
    /// Where navigation ends up
    pub history: Arc<History>,
    pub session: Arc<SessionService>,
    /// Output format preference
    pub format: OutputFormat,
    storage_path: Option<PathBuf>,
}

impl CommandContext {
    /// Build the context.
    ///
    /// # Errors
    /// Returns error if the config file is unreadable or the API URL invalid.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = Self::load_config(opts)?;

        let storage_path = config.storage_file();
        let store: Arc<dyn TokenStore> = Arc::new(LocalStorage::at(storage_path.clone()));
        let history = Arc::new(History::new());
        let navigator: Arc<dyn Navigator> = history.clone();

        let interceptor = AuthInterceptor::new(store.clone(), navigator.clone());
        let api: Arc<dyn AuthApi> = Arc::new(StocknetClient::new(&config, interceptor)?);
        let session = Arc::new(SessionService::new(api, store.clone(), navigator));

        log::debug!(
            "Context ready (api: {}, storage: {:?})",
            config.base_url(),
            storage_path
        );

        Ok(Self {
            config,
            store,
            history,
            session,
            format: opts.format,
            storage_path,
        })
    }

    /// Config file merged with the flag/env overrides
    pub fn load_config(opts: &GlobalOptions) -> Result<Config> {
        let mut config = Config::load_at(opts.config_ref())?;

        if let Some(url) = opts.api_url_ref() {
            config.api_url = url.to_string();
            config.validate()?;
        }
        if let Some(path) = &opts.storage {
            config.storage_path = Some(path.clone());
        }

        Ok(config)
    }

    /// Guard for protected views
    pub fn guard(&self) -> RouteGuard {
        RouteGuard::new(self.store.clone(), self.session.clone(), self.navigator())
    }

    /// Router with the guard in front of protected views
    pub fn router(&self) -> Router {
        Router::new(self.navigator(), self.guard())
    }

    /// Token storage file, if storage is available
    pub fn storage_path(&self) -> Option<&PathBuf> {
        self.storage_path.as_ref()
    }

    fn navigator(&self) -> Arc<dyn Navigator> {
        self.history.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn opts(dir: &TempDir) -> GlobalOptions {
        GlobalOptions {
            config: Some(dir.path().join("config.yaml").display().to_string()),
            storage: Some(dir.path().join("storage.json")),
            ..Default::default()
        }
    }

    #[test]
    fn test_context_without_config_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let ctx = CommandContext::new(&opts(&dir)).unwrap();

        assert_eq!(ctx.config.base_url(), crate::config::DEFAULT_API_URL);
        assert_eq!(ctx.storage_path(), Some(&dir.path().join("storage.json")));
        assert!(!ctx.session.is_authenticated());
        assert!(ctx.session.state().current().is_none());
    }

    #[test]
    fn test_api_url_override() {
        let dir = TempDir::new().unwrap();
        let mut options = opts(&dir);
        options.api_url = Some("https://stocknet.example.com/api".to_string());

        let config = CommandContext::load_config(&options).unwrap();
        assert_eq!(config.base_url(), "https://stocknet.example.com/api/");
    }

    #[test]
    fn test_invalid_api_url_override() {
        let dir = TempDir::new().unwrap();
        let mut options = opts(&dir);
        options.api_url = Some("ftp://stocknet".to_string());

        assert!(CommandContext::load_config(&options).is_err());
    }

    #[test]
    fn test_context_restores_stored_session() {
        use crate::session::decoder::testing::token_with_claims;

        let dir = TempDir::new().unwrap();
        let token = token_with_claims(&serde_json::json!({
            "userName": "ana",
            "email": "ana@stocknet.io"
        }));
        LocalStorage::open(dir.path().join("storage.json")).set(&token);

        let ctx = CommandContext::new(&opts(&dir)).unwrap();

        assert!(ctx.session.is_authenticated());
        let user = ctx.session.state().current().unwrap();
        assert_eq!(user.username, "ana");
    }
}
