pub mod client;
pub mod types;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};

pub use client::NautobotClient;
pub use types::Filter;

/// Collection-level object operations the convergence engine needs.
///
/// `path` is a collection path relative to `/api`, e.g. `/dcim/devices/`.
#[async_trait]
pub trait ObjectApi: Send + Sync {
    /// Filtered list, all pages.
    async fn list(&self, path: &str, filter: &Filter) -> Result<Vec<Value>>;

    async fn create(&self, path: &str, body: &Map<String, Value>) -> Result<Value>;

    /// Partial update (PATCH) carrying only `body`'s fields.
    async fn update(&self, path: &str, id: &str, body: &Map<String, Value>) -> Result<Value>;

    async fn delete(&self, path: &str, id: &str) -> Result<()>;
}
