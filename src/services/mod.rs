/// Storage services and configuration
pub mod config;
pub mod issues;
pub mod subscriptions;
pub mod users;
