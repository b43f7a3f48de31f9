//! Shared handler state

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::strategy::Authenticator;
use crate::domain::repository::AuthStore;

/// Shared state for auth handlers and the request gate
pub struct AppState<R>
where
    R: AuthStore,
{
    pub repo: Arc<R>,
    pub authenticator: Arc<Authenticator<R>>,
    pub config: Arc<AuthConfig>,
}

impl<R> AppState<R>
where
    R: AuthStore,
{
    /// State with the strategy selected by `config.auth_type`
    pub fn new(repo: R, config: AuthConfig) -> Self {
        let repo = Arc::new(repo);
        let authenticator = Authenticator::from_config(&config, repo.clone());
        Self::with_authenticator(repo, authenticator, config)
    }

    pub fn with_authenticator(
        repo: Arc<R>,
        authenticator: Authenticator<R>,
        config: AuthConfig,
    ) -> Self {
        Self {
            repo,
            authenticator: Arc::new(authenticator),
            config: Arc::new(config),
        }
    }
}

impl<R> Clone for AppState<R>
where
    R: AuthStore,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            authenticator: self.authenticator.clone(),
            config: self.config.clone(),
        }
    }
}
