pub mod entity;
pub mod planner;
pub mod repository;

pub use entity::{NewRedirect, RedirectRecord, RedirectStatus};
pub use planner::{MAX_REDIRECT_HOPS, RedirectPlan, RetiredPath};
pub use repository::{RedirectReadRepository, RedirectWriteRepository};
