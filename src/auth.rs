use std::sync::Arc;

use futures::future::{self, BoxFuture};
use parking_lot::RwLock;
use tracing::{error, info};
use uuid::Uuid;

use crate::app::Route;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub uid: String,
    pub email: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
    #[error("identity provider error: {0}")]
    Provider(String),
}

pub trait AuthProvider: Send + Sync {
    fn current_user(&self) -> Option<User>;

    fn is_loading(&self) -> bool;

    fn sign_in(&self, email: &str) -> Result<User, AuthError>;

    fn sign_out(&self) -> BoxFuture<'_, Result<(), AuthError>>;
}

#[derive(Debug, Default)]
struct ProviderState {
    user: Option<User>,
    loading: bool,
}

#[derive(Debug, Default)]
pub struct LocalAuthProvider {
    state: RwLock<ProviderState>,
}

impl LocalAuthProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signed_in(email: &str) -> Result<Self, AuthError> {
        let provider = Self::new();
        provider.sign_in(email)?;
        Ok(provider)
    }

    /// Starts in the loading phase until [`LocalAuthProvider::finish_restore`] runs.
    pub fn restoring() -> Self {
        Self {
            state: RwLock::new(ProviderState {
                user: None,
                loading: true,
            }),
        }
    }

    pub fn finish_restore(&self, user: Option<User>) {
        let mut state = self.state.write();
        state.user = user;
        state.loading = false;
    }
}

impl AuthProvider for LocalAuthProvider {
    fn current_user(&self) -> Option<User> {
        self.state.read().user.clone()
    }

    fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    fn sign_in(&self, email: &str) -> Result<User, AuthError> {
        let email = email.trim();
        let valid = email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
        if !valid {
            return Err(AuthError::InvalidEmail(email.to_string()));
        }

        let user = User {
            uid: Uuid::new_v4().to_string(),
            email: email.to_string(),
        };
        let mut state = self.state.write();
        state.user = Some(user.clone());
        state.loading = false;
        info!(email = %user.email, "signed in");
        Ok(user)
    }

    fn sign_out(&self) -> BoxFuture<'_, Result<(), AuthError>> {
        self.state.write().user = None;
        Box::pin(future::ready(Ok(())))
    }
}

#[derive(Clone)]
pub struct AuthContext {
    provider: Arc<dyn AuthProvider>,
}

impl AuthContext {
    pub fn new(provider: Arc<dyn AuthProvider>) -> Self {
        Self { provider }
    }

    pub fn user(&self) -> Option<User> {
        self.provider.current_user()
    }

    pub fn loading(&self) -> bool {
        self.provider.is_loading()
    }

    pub fn provider(&self) -> &dyn AuthProvider {
        self.provider.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gate {
    Pending,
    Redirect(Route),
    Allow(User),
}

pub fn guard(ctx: &AuthContext) -> Gate {
    if ctx.loading() {
        return Gate::Pending;
    }
    match ctx.user() {
        Some(user) => Gate::Allow(user),
        None => Gate::Redirect(Route::Login),
    }
}

pub async fn sign_out(ctx: &AuthContext, current: Route) -> Route {
    match ctx.provider().sign_out().await {
        Ok(()) => Route::Login,
        Err(err) => {
            error!(error = %err, "error signing out");
            current
        }
    }
}
