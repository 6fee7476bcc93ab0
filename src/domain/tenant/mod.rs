pub mod entity;
pub mod repository;
pub mod scope;
pub mod value_objects;

pub use entity::{NewTenant, Tenant};
pub use repository::{TenantRepository, TenantWriteRepository};
pub use scope::{TenantScope, Visibility};
pub use value_objects::{TenantId, TenantName, TenantSlug};
