pub mod auth;
pub mod content;
pub mod orders;
pub mod products;
