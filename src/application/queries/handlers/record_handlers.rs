//! Catalog Record Query Handlers

use async_trait::async_trait;
use std::sync::Arc;

use crate::application::bus::QueryHandler;
use crate::application::error::ApplicationError;
use crate::application::ports::RecordRepositoryPort;
use crate::application::queries::{CatalogRecord, GetRecord, ListRecords};
use crate::domain::shared::EntityId;

// ============================================================================
// GetRecord
// ============================================================================

pub struct GetRecordHandler<T: CatalogRecord> {
    repo: Arc<dyn RecordRepositoryPort<T>>,
}

impl<T: CatalogRecord> GetRecordHandler<T> {
    pub fn new(repo: Arc<dyn RecordRepositoryPort<T>>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<T: CatalogRecord> QueryHandler<GetRecord<T>> for GetRecordHandler<T> {
    async fn handle(&self, query: GetRecord<T>) -> Result<T, ApplicationError> {
        let id = EntityId::parse(&query.id)?;
        self.repo
            .find_one_by_id(&id)
            .await
            .map_err(|e| ApplicationError::lookup(T::KIND, &id, e))
    }
}

// ============================================================================
// ListRecords
// ============================================================================

pub struct ListRecordsHandler<T: CatalogRecord> {
    repo: Arc<dyn RecordRepositoryPort<T>>,
}

impl<T: CatalogRecord> ListRecordsHandler<T> {
    pub fn new(repo: Arc<dyn RecordRepositoryPort<T>>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<T: CatalogRecord> QueryHandler<ListRecords<T>> for ListRecordsHandler<T> {
    async fn handle(&self, _query: ListRecords<T>) -> Result<Vec<T>, ApplicationError> {
        let records = self.repo.find_many().await?;
        tracing::debug!(kind = T::KIND, count = records.len(), "Records listed");
        Ok(records)
    }
}
