//! Persistence abstraction for content records and campaigns.
//!
//! The [`ContentStore`] trait defines the storage operations the request
//! layer needs, keeping durable backends pluggable. [`MemoryStore`] is the
//! in-process implementation used by the server and tests: `HashMap`s
//! behind `std::sync::RwLock`, returning immediately-ready futures.

use std::collections::HashMap;
use std::sync::RwLock;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{Campaign, ContentRecord};

/// Abstract storage backend for scored content and campaigns.
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`insert_content`](ContentStore::insert_content) | Persist a scored record |
/// | [`get_content`](ContentStore::get_content) | Fetch a record by id |
/// | [`get_contents`](ContentStore::get_contents) | Fetch several records, skipping unknown ids |
/// | [`insert_campaign`](ContentStore::insert_campaign) | Persist a campaign |
/// | [`get_campaign`](ContentStore::get_campaign) | Fetch a campaign by id |
/// | [`list_campaigns`](ContentStore::list_campaigns) | All campaigns, oldest first |
/// | [`delete_campaign`](ContentStore::delete_campaign) | Remove a campaign; `false` if absent |
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn insert_content(&self, record: &ContentRecord) -> Result<()>;

    async fn get_content(&self, id: &str) -> Result<Option<ContentRecord>>;

    async fn get_contents(&self, ids: &[String]) -> Result<Vec<ContentRecord>>;

    async fn insert_campaign(&self, campaign: &Campaign) -> Result<()>;

    async fn get_campaign(&self, id: &str) -> Result<Option<Campaign>>;

    async fn list_campaigns(&self) -> Result<Vec<Campaign>>;

    async fn delete_campaign(&self, id: &str) -> Result<bool>;
}

/// In-memory store backing the single-process deployment.
pub struct MemoryStore {
    contents: RwLock<HashMap<String, ContentRecord>>,
    campaigns: RwLock<HashMap<String, Campaign>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            contents: RwLock::new(HashMap::new()),
            campaigns: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn insert_content(&self, record: &ContentRecord) -> Result<()> {
        let mut contents = self.contents.write().unwrap();
        contents.insert(record.id.clone(), record.clone());
        Ok(())
    }

    async fn get_content(&self, id: &str) -> Result<Option<ContentRecord>> {
        let contents = self.contents.read().unwrap();
        Ok(contents.get(id).cloned())
    }

    async fn get_contents(&self, ids: &[String]) -> Result<Vec<ContentRecord>> {
        let contents = self.contents.read().unwrap();
        Ok(ids.iter().filter_map(|id| contents.get(id).cloned()).collect())
    }

    async fn insert_campaign(&self, campaign: &Campaign) -> Result<()> {
        let mut campaigns = self.campaigns.write().unwrap();
        campaigns.insert(campaign.id.clone(), campaign.clone());
        Ok(())
    }

    async fn get_campaign(&self, id: &str) -> Result<Option<Campaign>> {
        let campaigns = self.campaigns.read().unwrap();
        Ok(campaigns.get(id).cloned())
    }

    async fn list_campaigns(&self) -> Result<Vec<Campaign>> {
        let campaigns = self.campaigns.read().unwrap();
        let mut all: Vec<Campaign> = campaigns.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(all)
    }

    async fn delete_campaign(&self, id: &str) -> Result<bool> {
        let mut campaigns = self.campaigns.write().unwrap();
        Ok(campaigns.remove(id).is_some())
    }
}
