use anyhow::Result;

use crate::core::model::{Idea, Subscription};
use crate::store::RecordStore;

/// In-memory record source, mainly for tests.
#[derive(Default)]
pub struct MemoryStore {
    subscriptions: Vec<Subscription>,
    ideas: Vec<Idea>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_subscriptions(mut self, subscriptions: Vec<Subscription>) -> Self {
        self.subscriptions = subscriptions;
        self
    }

    pub fn with_ideas(mut self, ideas: Vec<Idea>) -> Self {
        self.ideas = ideas;
        self
    }
}

impl RecordStore for MemoryStore {
    fn subscriptions(&self, user_id: &str) -> Result<Vec<Subscription>> {
        Ok(self
            .subscriptions
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect())
    }

    fn ideas(&self, user_id: &str) -> Result<Vec<Idea>> {
        Ok(self
            .ideas
            .iter()
            .filter(|i| i.user_id == user_id)
            .cloned()
            .collect())
    }

    fn subscription(&self, id: &str, user_id: &str) -> Result<Option<Subscription>> {
        Ok(self
            .subscriptions
            .iter()
            .find(|s| s.id == id && s.user_id == user_id)
            .cloned())
    }

    fn idea(&self, id: &str, user_id: &str) -> Result<Option<Idea>> {
        Ok(self
            .ideas
            .iter()
            .find(|i| i.id == id && i.user_id == user_id)
            .cloned())
    }
}
