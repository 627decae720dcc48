//! Workflow Service Use Case
//!
//! Stores the components of a workflow board through any repository
//! adapter bound to `CanvasComponent`.

use crate::domain_services::WorkflowServiceInterface;
use async_trait::async_trait;
use flowdesk_domain::entities::CanvasComponent;
use flowdesk_domain::error::{Error, Result};
use flowdesk_domain::ports::Repository;
use flowdesk_domain::value_objects::{CreateRequest, Key, KeyValue, UpdateRequest};
use std::sync::Arc;
use tracing::{debug, info};

/// Workflow board service over an injected repository
pub struct WorkflowService {
    repository: Arc<dyn Repository<CanvasComponent>>,
}

impl WorkflowService {
    /// Create the service with an injected repository
    pub fn new(repository: Arc<dyn Repository<CanvasComponent>>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl WorkflowServiceInterface for WorkflowService {
    async fn create_all(&self, components: Vec<CanvasComponent>) -> Result<Vec<Key>> {
        let mut keys = Vec::with_capacity(components.len());
        for component in components {
            debug!(id = component.id(), kind = component.component_type(), "Creating component");
            let created = self
                .repository
                .create(CreateRequest::generated(component))
                .await?;
            keys.push(created.key);
        }
        info!(count = keys.len(), "Workflow components created");
        Ok(keys)
    }

    async fn list(&self) -> Result<Vec<CanvasComponent>> {
        let components = self.repository.many_read(None).await?;
        Ok(components.into_iter().map(KeyValue::into_value).collect())
    }

    async fn update_all(&self, components: Vec<CanvasComponent>) -> Result<Vec<CanvasComponent>> {
        let mut updated = Vec::with_capacity(components.len());
        for component in components {
            let Some(object_id) = component.object_id() else {
                return Err(Error::invalid_argument(format!(
                    "component {} has no _id and cannot be updated",
                    component.id()
                )));
            };
            let request = UpdateRequest::from_partial(&component)?.with_key(Key::new(object_id));
            updated.push(self.repository.update(request).await?.into_value());
        }
        info!(count = updated.len(), "Workflow components updated");
        Ok(updated)
    }

    async fn delete_all(&self, ids: Vec<String>) -> Result<usize> {
        let mut deleted = 0;
        for id in ids {
            if self.repository.delete(&Key::new(id)).await? {
                deleted += 1;
            }
        }
        info!(deleted, "Workflow components deleted");
        Ok(deleted)
    }
}
