//! Route guard for protected views

use std::sync::Arc;

use crate::navigation::{Navigator, routes};
use crate::session::{SessionService, TokenStore};

/// Decides whether a protected view may be entered.
///
/// A stored token is not enough: the backend has to confirm it. Any outcome
/// other than a confirmed token sends the user to `/login`.
pub struct RouteGuard {
    store: Arc<dyn TokenStore>,
    session: Arc<SessionService>,
    navigator: Arc<dyn Navigator>,
}

impl RouteGuard {
    pub fn new(
        store: Arc<dyn TokenStore>,
        session: Arc<SessionService>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            store,
            session,
            navigator,
        }
    }

    /// Whether entry is allowed; redirects to `/login` when it is not
    pub async fn can_activate(&self) -> bool {
        let Some(token) = self.store.get().filter(|t| !t.is_empty()) else {
            log::debug!("No session token; redirecting to login");
            return self.deny();
        };

        match self.session.validate_token(&token).await {
            Ok(response) if response.success => true,
            Ok(response) => {
                log::info!(
                    "Session token rejected: {}",
                    response.message_or("no reason given")
                );
                self.deny()
            }
            Err(e) => {
                log::warn!("Could not validate session token: {}", e);
                self.deny()
            }
        }
    }

    fn deny(&self) -> bool {
        self.navigator.navigate(routes::LOGIN);
        false
    }
}
