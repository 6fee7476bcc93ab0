// src/application/services/redirect_manager.rs
use crate::application::error::ApplicationResult;
use crate::domain::content::PublicPath;
use crate::domain::errors::DomainError;
use crate::domain::redirect::{
    MAX_REDIRECT_HOPS, NewRedirect, RedirectPlan, RedirectRecord, RedirectStatus,
};
use crate::domain::tenant::TenantScope;
use crate::domain::transaction::UnitOfWork;
use chrono::{DateTime, Utc};
use tracing::debug;

/// Writes redirect rows so that every stored redirect points straight at a
/// path that does not redirect again.
#[derive(Debug, Clone, Copy, Default)]
pub struct RedirectManager;

impl RedirectManager {
    pub fn new() -> Self {
        Self
    }

    /// Apply the result of [`RedirectPlan::between`]. Revived paths are cleared
    /// first so that they can serve as targets.
    pub async fn apply(
        &self,
        uow: &mut dyn UnitOfWork,
        scope: &TenantScope,
        plan: &RedirectPlan,
        now: DateTime<Utc>,
    ) -> ApplicationResult<Vec<RedirectRecord>> {
        for path in &plan.revived {
            if uow.delete_redirect(scope, path).await?.is_some() {
                debug!(tenant_id = %scope.tenant_id(), path = %path, "path is live again, redirect removed");
            }
        }

        let mut written = Vec::with_capacity(plan.retired.len());
        for retired in &plan.retired {
            let record = self
                .point(
                    uow,
                    scope,
                    &retired.from,
                    &retired.to,
                    RedirectStatus::MovedPermanently,
                    now,
                )
                .await?;
            written.push(record);
        }
        Ok(written)
    }

    /// Upsert `from -> to`, collapsed to the final target, and re-target every
    /// redirect that pointed at `from`.
    pub async fn point(
        &self,
        uow: &mut dyn UnitOfWork,
        scope: &TenantScope,
        from: &PublicPath,
        to: &PublicPath,
        status: RedirectStatus,
        now: DateTime<Utc>,
    ) -> ApplicationResult<RedirectRecord> {
        let target = self.final_target(uow, scope, from, to).await?;

        for incoming in uow.redirects_targeting(scope, from).await? {
            if incoming.from_path == target {
                uow.delete_redirect(scope, &incoming.from_path).await?;
            } else {
                let rewritten =
                    NewRedirect::new(incoming.from_path, target.clone(), incoming.status, now)?;
                uow.upsert_redirect(scope, rewritten).await?;
            }
        }

        let record = uow
            .upsert_redirect(scope, NewRedirect::new(from.clone(), target, status, now)?)
            .await?;
        debug!(
            tenant_id = %scope.tenant_id(),
            from = %record.from_path,
            to = %record.to_path,
            status = record.status.code(),
            "redirect written"
        );
        Ok(record)
    }

    async fn final_target(
        &self,
        uow: &mut dyn UnitOfWork,
        scope: &TenantScope,
        from: &PublicPath,
        to: &PublicPath,
    ) -> ApplicationResult<PublicPath> {
        let mut current = to.clone();
        for _ in 0..MAX_REDIRECT_HOPS {
            if &current == from {
                return Err(redirect_loop(from).into());
            }
            match uow.find_redirect(scope, &current).await? {
                Some(next) => current = next.to_path,
                None => return Ok(current),
            }
        }
        Err(redirect_loop(from).into())
    }
}

fn redirect_loop(from: &PublicPath) -> DomainError {
    DomainError::conflict(
        "redirect",
        "to_path",
        format!("redirect from {from} would form a loop"),
    )
}
