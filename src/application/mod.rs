pub mod commands;
pub mod context;
pub mod dto;
pub mod error;
pub mod ports;
pub mod queries;
pub mod services;

pub use context::RequestContext;
pub use error::ApplicationResult;
