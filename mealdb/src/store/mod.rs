//! The store: single in-process owner of every snapshot collection.
//!
//! Queries share a read lock and never block each other; mutations take the
//! write lock, so a record is observed either fully pre-mutation or fully
//! post-mutation. The revision counter is bumped inside the same critical
//! section as its paired write and is the sole external change signal.

pub mod mutate;
pub mod query;
pub mod register;

#[cfg(test)]
pub(crate) mod fixtures;

use crate::error::{MealDbError, Result};
use crate::model::{
    Account, Address, Banner, BankAccount, Card, Category, Courier, Credential, Food, Order,
    Restaurant, Review, Seller, Voucher,
};
use crate::snapshot::{self, Geography};
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

pub use mutate::{AccountPatch, OrderPatch};
pub use register::Role;

/// Anything held in a [`Collection`]: identifies itself by a process-unique key.
pub(crate) trait Record {
    type Id: Eq + Hash + Clone + Debug;
    fn record_id(&self) -> Self::Id;
}

macro_rules! impl_record {
    ($ty:ty, $id:ty, $field:ident) => {
        impl Record for $ty {
            type Id = $id;
            fn record_id(&self) -> $id {
                self.$field.clone()
            }
        }
    };
}

impl_record!(Category, u64, id);
impl_record!(Restaurant, u64, id);
impl_record!(Food, u64, id);
impl_record!(Banner, u64, id);
impl_record!(Address, u64, id);
impl_record!(BankAccount, u64, id);
impl_record!(Card, u64, id);
impl_record!(Seller, u64, id);
impl_record!(Courier, u64, id);
impl_record!(Voucher, u64, id);
impl_record!(Review, u64, id);
impl_record!(Order, String, id);
impl_record!(Credential, u64, account_id);

impl Record for Account {
    type Id = u64;
    fn record_id(&self) -> u64 {
        self.id()
    }
}

/// A named collection: records in snapshot insertion order plus an id →
/// position map for O(1) point lookup. Replacement keeps the position, so
/// ordering among siblings never changes across mutations.
#[derive(Debug)]
pub(crate) struct Collection<T: Record> {
    name: &'static str,
    records: Vec<T>,
    index: HashMap<T::Id, usize>,
}

impl<T: Record> Collection<T> {
    pub(crate) fn from_records(name: &'static str, records: Vec<T>) -> Self {
        let mut collection = Collection {
            name,
            records: Vec::with_capacity(records.len()),
            index: HashMap::with_capacity(records.len()),
        };
        for record in records {
            collection.push(record);
        }
        collection
    }

    /// Append a record, or replace in place when the id already exists.
    pub(crate) fn push(&mut self, record: T) {
        let id = record.record_id();
        match self.index.get(&id) {
            Some(&pos) => {
                log::warn!("Duplicate id {:?} in '{}', replacing in place", id, self.name);
                self.records[pos] = record;
            }
            None => {
                self.index.insert(id, self.records.len());
                self.records.push(record);
            }
        }
    }

    pub(crate) fn get(&self, id: &T::Id) -> Option<&T> {
        self.index.get(id).map(|&pos| &self.records[pos])
    }

    pub(crate) fn position(&self, id: &T::Id) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Replace the record at `pos` without touching the index. The caller
    /// must keep the id unchanged.
    pub(crate) fn replace_at(&mut self, pos: usize, record: T) {
        self.records[pos] = record;
    }

    pub(crate) fn all(&self) -> &[T] {
        &self.records
    }

    pub(crate) fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }
}

/// Everything behind the lock: the collections, the geography indexes, and
/// the revision counter that must move atomically with its paired write.
#[derive(Debug)]
pub(crate) struct StoreInner {
    pub(crate) categories: Collection<Category>,
    pub(crate) restaurants: Collection<Restaurant>,
    pub(crate) foods: Collection<Food>,
    pub(crate) banners: Collection<Banner>,
    pub(crate) accounts: Collection<Account>,
    pub(crate) credentials: Collection<Credential>,
    pub(crate) addresses: Collection<Address>,
    pub(crate) bank_accounts: Collection<BankAccount>,
    pub(crate) cards: Collection<Card>,
    pub(crate) sellers: Collection<Seller>,
    pub(crate) couriers: Collection<Courier>,
    pub(crate) orders: Collection<Order>,
    pub(crate) vouchers: Collection<Voucher>,
    pub(crate) reviews: Collection<Review>,
    pub(crate) geo: Geography,
    pub(crate) revision: u64,
}

/// The main entry point. Loads the snapshot and geography documents once,
/// then serves queries and mutations for the lifetime of the process.
pub struct Store {
    pub(crate) inner: RwLock<StoreInner>,
}

impl Store {
    /// Build a store from the two raw documents. Fails with
    /// [`MealDbError::MalformedSnapshot`] when a required collection is
    /// absent or structurally unreadable; no partially loaded store is ever
    /// returned.
    pub fn load(snapshot: Value, geography: Value) -> Result<Store> {
        let parsed = snapshot::parse_document(snapshot)?;
        let geo = snapshot::parse_geography(geography)?;

        let inner = StoreInner {
            categories: Collection::from_records("categories", parsed.categories),
            restaurants: Collection::from_records("restaurants", parsed.restaurants),
            foods: Collection::from_records("foods", parsed.foods),
            banners: Collection::from_records("banners", parsed.banners),
            accounts: Collection::from_records("users", parsed.accounts),
            credentials: Collection::from_records("auth.credentials", parsed.credentials),
            addresses: Collection::from_records("addresses", parsed.addresses),
            bank_accounts: Collection::from_records("bankAccounts", parsed.bank_accounts),
            cards: Collection::from_records("cards", parsed.cards),
            sellers: Collection::from_records("sellers", parsed.sellers),
            couriers: Collection::from_records("couriers", parsed.couriers),
            orders: Collection::from_records("orders", parsed.orders),
            vouchers: Collection::from_records("vouchers", parsed.vouchers),
            reviews: Collection::from_records("reviews", parsed.reviews),
            geo,
            revision: 0,
        };

        log::info!(
            "Snapshot loaded: {} users, {} restaurants, {} foods, {} orders, {} provinces",
            inner.accounts.len(),
            inner.restaurants.len(),
            inner.foods.len(),
            inner.orders.len(),
            inner.geo.provinces().len()
        );

        Ok(Store {
            inner: RwLock::new(inner),
        })
    }

    /// Current value of the revision counter. Callers treat any change as
    /// "recompute derived views"; the counter never moves on failed writes.
    pub fn revision(&self) -> u64 {
        self.inner.read().revision
    }

    // ── Point lookups ──────────────────────────────────────────────

    pub fn category(&self, id: u64) -> Option<Category> {
        self.inner.read().categories.get(&id).cloned()
    }

    pub fn restaurant(&self, id: u64) -> Option<Restaurant> {
        self.inner.read().restaurants.get(&id).cloned()
    }

    pub fn restaurant_by_slug(&self, slug: &str) -> Option<Restaurant> {
        self.inner
            .read()
            .restaurants
            .iter()
            .find(|r| r.slug == slug)
            .cloned()
    }

    pub fn food(&self, id: u64) -> Option<Food> {
        self.inner.read().foods.get(&id).cloned()
    }

    pub fn banner(&self, id: u64) -> Option<Banner> {
        self.inner.read().banners.get(&id).cloned()
    }

    pub fn account(&self, id: u64) -> Option<Account> {
        self.inner.read().accounts.get(&id).cloned()
    }

    pub fn credential(&self, account_id: u64) -> Option<Credential> {
        self.inner.read().credentials.get(&account_id).cloned()
    }

    pub fn address(&self, id: u64) -> Option<Address> {
        self.inner.read().addresses.get(&id).cloned()
    }

    pub fn bank_account(&self, id: u64) -> Option<BankAccount> {
        self.inner.read().bank_accounts.get(&id).cloned()
    }

    pub fn card(&self, id: u64) -> Option<Card> {
        self.inner.read().cards.get(&id).cloned()
    }

    pub fn seller(&self, id: u64) -> Option<Seller> {
        self.inner.read().sellers.get(&id).cloned()
    }

    pub fn courier(&self, id: u64) -> Option<Courier> {
        self.inner.read().couriers.get(&id).cloned()
    }

    pub fn order(&self, id: &str) -> Option<Order> {
        self.inner.read().orders.get(&id.to_string()).cloned()
    }

    pub fn voucher(&self, id: u64) -> Option<Voucher> {
        self.inner.read().vouchers.get(&id).cloned()
    }

    pub fn voucher_by_code(&self, code: &str) -> Option<Voucher> {
        self.inner
            .read()
            .vouchers
            .iter()
            .find(|v| v.code.eq_ignore_ascii_case(code))
            .cloned()
    }

    // ── Full listings (snapshot insertion order) ───────────────────

    pub fn categories(&self) -> Vec<Category> {
        self.inner.read().categories.all().to_vec()
    }

    pub fn restaurants(&self) -> Vec<Restaurant> {
        self.inner.read().restaurants.all().to_vec()
    }

    pub fn foods(&self) -> Vec<Food> {
        self.inner.read().foods.all().to_vec()
    }

    pub fn banners(&self) -> Vec<Banner> {
        self.inner.read().banners.all().to_vec()
    }

    pub fn accounts(&self) -> Vec<Account> {
        self.inner.read().accounts.all().to_vec()
    }

    pub fn orders(&self) -> Vec<Order> {
        self.inner.read().orders.all().to_vec()
    }

    pub fn vouchers(&self) -> Vec<Voucher> {
        self.inner.read().vouchers.all().to_vec()
    }

    pub fn reviews(&self) -> Vec<Review> {
        self.inner.read().reviews.all().to_vec()
    }
}

/// Parse a numeric id from caller-supplied text (e.g. a route parameter).
/// The query surface never errors for "no results", only for structurally
/// invalid arguments like this one.
pub fn parse_id(text: &str) -> Result<u64> {
    text.trim()
        .parse()
        .map_err(|_| MealDbError::InvalidArgument(format!("not a numeric id: '{text}'")))
}
