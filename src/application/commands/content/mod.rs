// src/application/commands/content/mod.rs
mod create;
mod delete;
mod purge;
mod restore;
mod service;
mod update;

pub use create::{CreateContentCommand, CreateContentCommandBuilder};
pub use delete::DeleteContentCommand;
pub use purge::PurgeContentCommand;
pub use restore::RestoreContentCommand;
pub use service::{ContentCommandService, TranslationInput};
pub use update::UpdateContentCommand;
