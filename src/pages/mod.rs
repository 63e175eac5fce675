pub mod dashboard;
pub mod landing;
pub mod training;

pub use dashboard::{DashboardCommand, DashboardPage};
pub use landing::LandingPage;
pub use training::{StreetFilter, TrainingPage, TrainingState};
