//! Workflow board service interface

use async_trait::async_trait;
use flowdesk_domain::entities::CanvasComponent;
use flowdesk_domain::error::Result;
use flowdesk_domain::value_objects::Key;

/// Persistence operations of a workflow board
///
/// Components are processed one after another in the order given. The
/// first failure stops the batch; components before it stay applied.
#[async_trait]
pub trait WorkflowServiceInterface: Send + Sync {
    /// Store new components, returning their keys
    async fn create_all(&self, components: Vec<CanvasComponent>) -> Result<Vec<Key>>;

    /// Every component on the board
    async fn list(&self) -> Result<Vec<CanvasComponent>>;

    /// Overwrite stored components, selected by their `_id`
    async fn update_all(&self, components: Vec<CanvasComponent>) -> Result<Vec<CanvasComponent>>;

    /// Remove components by `_id`, returning how many existed
    async fn delete_all(&self, ids: Vec<String>) -> Result<usize>;
}
