// src/domain/transaction.rs
use crate::domain::audit::AuditWriteRepository;
use crate::domain::content::ContentWriteRepository;
use crate::domain::errors::DomainResult;
use crate::domain::locale::LocaleWriteRepository;
use crate::domain::redirect::RedirectWriteRepository;
use crate::domain::tenant::TenantWriteRepository;
use async_trait::async_trait;

/// One database transaction spanning every write of a single mutation.
///
/// Dropping a unit of work without calling [`UnitOfWork::commit`] rolls it
/// back, which is also what happens when the owning request is cancelled.
#[async_trait]
pub trait UnitOfWork:
    ContentWriteRepository
    + RedirectWriteRepository
    + AuditWriteRepository
    + LocaleWriteRepository
    + TenantWriteRepository
    + Send
{
    async fn commit(self: Box<Self>) -> DomainResult<()>;
}

#[async_trait]
pub trait UnitOfWorkFactory: Send + Sync {
    async fn begin(&self) -> DomainResult<Box<dyn UnitOfWork>>;
}
