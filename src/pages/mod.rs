pub mod app_picks;
pub mod health;
pub mod home;
pub mod quality_review;
pub mod settings;
