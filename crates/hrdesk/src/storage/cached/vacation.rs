//! Cached vacation repository decorator.

use std::sync::Arc;

use async_trait::async_trait;

use hrdesk_core::cache::{Cache, CacheCoordinator, CacheKeys};
use hrdesk_core::staff::{NewVacation, Vacation};
use hrdesk_core::storage::{Page, Result, VacationFilter, VacationRepository};

/// Cached vacation repository decorator.
///
/// Single vacations live under `{ns}:vacation_cache:{id}`. Every list page,
/// filtered or pending, is a member of the shared `{ns}:vacations` bucket, so
/// any successful vacation write drops the vacation's own key and every
/// cached page in one go.
pub struct CachedVacationRepository<R, C>
where
    R: VacationRepository + ?Sized,
    C: Cache + ?Sized,
{
    repository: Arc<R>,
    coordinator: CacheCoordinator<C>,
    keys: CacheKeys,
}

impl<R, C> CachedVacationRepository<R, C>
where
    R: VacationRepository + ?Sized,
    C: Cache + ?Sized,
{
    /// Creates a new cached vacation repository.
    pub fn new(repository: Arc<R>, coordinator: CacheCoordinator<C>, keys: CacheKeys) -> Self {
        Self {
            repository,
            coordinator,
            keys,
        }
    }

    async fn changed(&self, id: i64) {
        self.coordinator
            .invalidate(&self.keys.vacation_changed(id))
            .await;
    }
}

#[async_trait]
impl<R, C> VacationRepository for CachedVacationRepository<R, C>
where
    R: VacationRepository + ?Sized + 'static,
    C: Cache + ?Sized + 'static,
{
    #[tracing::instrument(skip(self))]
    async fn get_vacation(&self, id: i64) -> Result<Option<Vacation>> {
        let key = self.keys.vacation(id);
        self.coordinator
            .read_through(&key, || self.repository.get_vacation(id))
            .await
    }

    #[tracing::instrument(skip(self))]
    async fn list_vacations(&self, filter: VacationFilter, page: Page) -> Result<Vec<Vacation>> {
        let key = self.keys.vacation_page(filter, page);
        self.coordinator
            .read_through_all(&key, || self.repository.list_vacations(filter, page))
            .await
    }

    #[tracing::instrument(skip(self))]
    async fn list_pending_vacations(&self, page: Page) -> Result<Vec<Vacation>> {
        let key = self.keys.pending_vacation_page(page);
        self.coordinator
            .read_through_all(&key, || self.repository.list_pending_vacations(page))
            .await
    }

    #[tracing::instrument(skip(self, vacation))]
    async fn create_vacation(&self, vacation: &NewVacation) -> Result<Vacation> {
        let created = self.repository.create_vacation(vacation).await?;
        self.changed(created.id).await;
        tracing::debug!(
            vacation_id = created.id,
            employee_id = created.employee_id,
            "Vacation created"
        );
        Ok(created)
    }

    #[tracing::instrument(skip(self))]
    async fn set_vacation_approval(&self, id: i64, approved: bool) -> Result<Vacation> {
        let vacation = self.repository.set_vacation_approval(id, approved).await?;
        self.changed(id).await;
        Ok(vacation)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_vacation(&self, id: i64) -> Result<()> {
        self.repository.delete_vacation(id).await?;
        self.changed(id).await;
        Ok(())
    }
}
