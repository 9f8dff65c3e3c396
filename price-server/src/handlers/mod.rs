pub mod auth;
pub mod forum;
pub mod health;
pub mod pricing;
pub mod vehicles;
