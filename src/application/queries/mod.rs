// src/application/queries/mod.rs
pub mod audit;
pub mod content;
pub mod redirects;
pub mod tenants;
