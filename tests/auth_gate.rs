use std::sync::Arc;

use chatgto_client::app::Route;
use chatgto_client::auth::{
    self, AuthContext, AuthError, AuthProvider, Gate, LocalAuthProvider, User,
};
use futures::future::BoxFuture;

struct BrokenSignOut {
    user: User,
}

impl AuthProvider for BrokenSignOut {
    fn current_user(&self) -> Option<User> {
        Some(self.user.clone())
    }

    fn is_loading(&self) -> bool {
        false
    }

    fn sign_in(&self, _email: &str) -> Result<User, AuthError> {
        Ok(self.user.clone())
    }

    fn sign_out(&self) -> BoxFuture<'_, Result<(), AuthError>> {
        Box::pin(async { Err(AuthError::Provider("network down".to_string())) })
    }
}

#[test]
fn gate_waits_while_loading() {
    let provider = Arc::new(LocalAuthProvider::restoring());
    let ctx = AuthContext::new(provider.clone());
    assert_eq!(auth::guard(&ctx), Gate::Pending);

    provider.finish_restore(None);
    assert_eq!(auth::guard(&ctx), Gate::Redirect(Route::Login));
}

#[test]
fn gate_admits_restored_user() {
    let provider = Arc::new(LocalAuthProvider::restoring());
    let ctx = AuthContext::new(provider.clone());
    let user = User {
        uid: "u-1".to_string(),
        email: "hero@example.com".to_string(),
    };
    provider.finish_restore(Some(user.clone()));
    assert_eq!(auth::guard(&ctx), Gate::Allow(user));
}

#[test]
fn sign_in_rejects_malformed_email() {
    let provider = LocalAuthProvider::new();
    assert!(matches!(
        provider.sign_in("not-an-email"),
        Err(AuthError::InvalidEmail(_))
    ));
    assert!(matches!(provider.sign_in("@example.com"), Err(AuthError::InvalidEmail(_))));
    assert!(provider.current_user().is_none());

    let user = provider.sign_in(" hero@example.com ").expect("valid email");
    assert_eq!(user.email, "hero@example.com");
    assert!(!user.uid.is_empty());
}

#[tokio::test]
async fn sign_out_navigates_to_login() {
    let provider = LocalAuthProvider::signed_in("hero@example.com").expect("valid email");
    let ctx = AuthContext::new(Arc::new(provider));
    assert!(matches!(auth::guard(&ctx), Gate::Allow(_)));

    let next = auth::sign_out(&ctx, Route::Dashboard).await;
    assert_eq!(next, Route::Login);
    assert!(ctx.user().is_none());
    assert_eq!(auth::guard(&ctx), Gate::Redirect(Route::Login));
}

#[tokio::test]
async fn failed_sign_out_keeps_current_route() {
    let ctx = AuthContext::new(Arc::new(BrokenSignOut {
        user: User {
            uid: "u-2".to_string(),
            email: "villain@example.com".to_string(),
        },
    }));

    let next = auth::sign_out(&ctx, Route::Dashboard).await;
    assert_eq!(next, Route::Dashboard);
    assert!(ctx.user().is_some());
}
