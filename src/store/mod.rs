//! In-memory record store for deals.
//!
//! [`DealStore`] is a cloneable handle; every clone shares the same table.
//! Writes take an exclusive lock, so concurrent request handlers observe
//! create, update and delete as if issued by a single writer. Nothing is
//! persisted: the table lives exactly as long as the last handle.

pub mod search;
pub mod seed;

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::deal::{Deal, DealMutation};
use crate::{AppError, GlobalConfig, Result};

use self::search::SearchKey;

#[derive(Debug)]
struct Entry {
    seq: u64,
    deal: Deal,
}

#[derive(Debug, Default)]
struct Table {
    records: HashMap<String, Entry>,
    next_seq: u64,
    last_created_at: Option<DateTime<Utc>>,
}

impl Table {
    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().simple().to_string();
            if !self.records.contains_key(&id) {
                return id;
            }
        }
    }

    /// Current time, never earlier than the previous insertion.
    fn next_timestamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let stamp = match self.last_created_at {
            Some(last) if last > now => last,
            _ => now,
        };
        self.last_created_at = Some(stamp);
        stamp
    }

    fn insert(&mut self, deal: Deal) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.records.insert(deal.id.clone(), Entry { seq, deal });
    }

    /// All deals in insertion order.
    fn snapshot(&self) -> Vec<Deal> {
        let mut entries: Vec<&Entry> = self.records.values().collect();
        entries.sort_by_key(|entry| entry.seq);
        entries.into_iter().map(|entry| entry.deal.clone()).collect()
    }
}

/// Shared handle to the deal table.
#[derive(Debug, Clone)]
pub struct DealStore {
    table: Arc<RwLock<Table>>,
    latency: Duration,
    search_keys: Arc<[SearchKey]>,
}

impl DealStore {
    /// Create an empty store.
    ///
    /// `latency` is slept before every listing returns; `search_keys` are
    /// the fields [`DealStore::search`] matches against.
    #[must_use]
    pub fn new(latency: Duration, search_keys: &[SearchKey]) -> Self {
        Self {
            table: Arc::new(RwLock::new(Table::default())),
            latency,
            search_keys: search_keys.into(),
        }
    }

    /// Create an empty store configured from `config`.
    #[must_use]
    pub fn from_config(config: &GlobalConfig) -> Self {
        Self::new(config.latency(), &config.search.keys)
    }

    fn read(&self) -> RwLockReadGuard<'_, Table> {
        self.table.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Table> {
        self.table.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Every stored deal, newest first.
    ///
    /// Deals created at the same instant keep their insertion order.
    pub async fn list_all(&self) -> Vec<Deal> {
        tokio::time::sleep(self.latency).await;
        let mut deals = self.read().snapshot();
        deals.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        deals
    }

    /// Search entry point used by the deals page.
    ///
    /// A non-blank `query` keeps only deals that fuzzy-match it on one of
    /// the configured keys. The result is ordered by restaurant, then by
    /// creation time ascending, then by insertion order.
    pub async fn search(&self, query: Option<&str>) -> Vec<Deal> {
        tokio::time::sleep(self.latency).await;
        let mut deals = self.read().snapshot();

        if let Some(query) = query.map(str::trim).filter(|q| !q.is_empty()) {
            deals = search::filter_deals(deals, query, &self.search_keys);
        }

        deals.sort_by(search::listing_order);
        debug!(query, matched = deals.len(), "deal search");
        deals
    }

    /// Look up a deal by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Deal> {
        self.read().records.get(id).map(|entry| entry.deal.clone())
    }

    /// Insert a new deal built from `values` and return it.
    pub fn create(&self, values: DealMutation) -> Deal {
        let mut table = self.write();
        let id = table.fresh_id();
        let created_at = table.next_timestamp();
        let deal = Deal::new(id, created_at, values);
        table.insert(deal.clone());
        debug!(id = %deal.id, "deal created");
        deal
    }

    /// Insert a deal with no fields beyond the defaults.
    pub fn create_empty(&self) -> Deal {
        self.create(DealMutation::default())
    }

    /// Merge `values` into the deal stored under `id` and return the
    /// updated record.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no deal has that id; the store is
    /// left untouched.
    pub fn update(&self, id: &str, values: DealMutation) -> Result<Deal> {
        let mut table = self.write();
        let Some(entry) = table.records.get_mut(id) else {
            return Err(AppError::NotFound(format!("no deal found for {id}")));
        };
        values.apply_to(&mut entry.deal);
        debug!(id, "deal updated");
        Ok(entry.deal.clone())
    }

    /// Remove the deal stored under `id`. Absent ids are ignored.
    pub fn delete(&self, id: &str) {
        if self.write().records.remove(id).is_some() {
            debug!(id, "deal deleted");
        }
    }

    /// Number of stored deals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().records.len()
    }

    /// Whether the store holds no deals.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().records.is_empty()
    }

    /// Fill the store with `count` random sample deals.
    pub fn seed(&self, count: usize) {
        let mut rng = rand::thread_rng();
        seed::populate(self, count, &mut rng);
        info!(count, total = self.len(), "sample deals seeded");
    }
}
