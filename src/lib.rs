pub mod api;
pub mod app;
pub mod auth;
pub mod cards;
pub mod config;
pub mod model;
pub mod pages;
pub mod stub;

pub use api::{ClientError, HttpPracticeApi, PracticeApi};
pub use app::{App, Route};
pub use auth::{AuthContext, AuthProvider, LocalAuthProvider};
pub use config::ClientConfig;
