// src/domain/mod.rs
pub mod audit;
pub mod concurrency;
pub mod content;
pub mod errors;
pub mod locale;
pub mod redirect;
pub mod tenant;
pub mod transaction;
pub mod user;
