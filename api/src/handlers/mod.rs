pub mod admin;
pub mod auth;
pub mod health;
pub mod info;
pub mod jobs;
