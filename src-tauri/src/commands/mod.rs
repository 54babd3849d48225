pub mod config;
pub mod health;
pub mod keychain;
pub mod moderation;
pub mod picks;
pub mod session;
