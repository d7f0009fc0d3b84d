pub mod json;
pub mod memory;

use anyhow::Result;

use crate::core::model::{Idea, Subscription};

/// Read-only record source scoped by the owning user.
///
/// By-id lookups take the requesting user; a record owned by someone else is
/// reported as absent, never as forbidden.
pub trait RecordStore: Send + Sync {
    fn subscriptions(&self, user_id: &str) -> Result<Vec<Subscription>>;
    fn ideas(&self, user_id: &str) -> Result<Vec<Idea>>;
    fn subscription(&self, id: &str, user_id: &str) -> Result<Option<Subscription>>;
    fn idea(&self, id: &str, user_id: &str) -> Result<Option<Idea>>;
}
