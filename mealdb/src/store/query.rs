//! Read-only query surface: foreign-key joins, substring search, top-N
//! ranking and geography navigation. All of it is a pure function of the
//! current snapshot state — stable filters, no relevance ranking, no hidden
//! ordering.

use crate::model::{
    Address, BankAccount, Card, District, Food, Order, Province, Restaurant, Review, ReviewKind,
    Voucher, Ward,
};
use crate::store::Store;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;

impl Store {
    // ── Foreign-key joins ──────────────────────────────────────────

    pub fn foods_by_restaurant(&self, restaurant_id: u64) -> Vec<Food> {
        self.inner
            .read()
            .foods
            .iter()
            .filter(|f| f.restaurant_id == Some(restaurant_id))
            .cloned()
            .collect()
    }

    pub fn restaurants_by_category(&self, category: &str) -> Vec<Restaurant> {
        let needle = normalize(category);
        self.inner
            .read()
            .restaurants
            .iter()
            .filter(|r| normalize(&r.category) == needle)
            .cloned()
            .collect()
    }

    pub fn orders_by_account(&self, account_id: u64) -> Vec<Order> {
        self.inner
            .read()
            .orders
            .iter()
            .filter(|o| o.user_id == account_id)
            .cloned()
            .collect()
    }

    pub fn orders_by_courier(&self, courier_id: u64) -> Vec<Order> {
        self.inner
            .read()
            .orders
            .iter()
            .filter(|o| o.courier_id == Some(courier_id))
            .cloned()
            .collect()
    }

    pub fn addresses_of(&self, account_id: u64) -> Vec<Address> {
        self.inner
            .read()
            .addresses
            .iter()
            .filter(|a| a.account_id == Some(account_id))
            .cloned()
            .collect()
    }

    pub fn bank_accounts_of(&self, account_id: u64) -> Vec<BankAccount> {
        self.inner
            .read()
            .bank_accounts
            .iter()
            .filter(|b| b.account_id == account_id)
            .cloned()
            .collect()
    }

    pub fn cards_of(&self, account_id: u64) -> Vec<Card> {
        self.inner
            .read()
            .cards
            .iter()
            .filter(|c| c.account_id == account_id)
            .cloned()
            .collect()
    }

    pub fn reviews_for(&self, kind: ReviewKind, target_id: u64) -> Vec<Review> {
        self.inner
            .read()
            .reviews
            .iter()
            .filter(|r| r.kind == kind && r.target_id == target_id)
            .cloned()
            .collect()
    }

    // ── Substring search ───────────────────────────────────────────

    /// Case-insensitive substring match over (food name, restaurant name,
    /// category). An empty keyword returns the whole collection; matches keep
    /// their original relative order.
    pub fn search_foods(&self, keyword: &str) -> Vec<Food> {
        let needle = normalize(keyword);
        let inner = self.inner.read();
        if needle.is_empty() {
            return inner.foods.all().to_vec();
        }
        inner
            .foods
            .iter()
            .filter(|f| {
                let restaurant_name = f
                    .restaurant_id
                    .and_then(|id| inner.restaurants.get(&id))
                    .map(|r| r.name.as_str())
                    .unwrap_or("");
                contains_ci(&f.name, &needle)
                    || contains_ci(restaurant_name, &needle)
                    || contains_ci(&f.category, &needle)
            })
            .cloned()
            .collect()
    }

    /// Same contract as [`Store::search_foods`], over (name, category,
    /// address).
    pub fn search_restaurants(&self, keyword: &str) -> Vec<Restaurant> {
        let needle = normalize(keyword);
        let inner = self.inner.read();
        if needle.is_empty() {
            return inner.restaurants.all().to_vec();
        }
        inner
            .restaurants
            .iter()
            .filter(|r| {
                contains_ci(&r.name, &needle)
                    || contains_ci(&r.category, &needle)
                    || contains_ci(&r.address, &needle)
            })
            .cloned()
            .collect()
    }

    // ── Ranking ────────────────────────────────────────────────────

    pub fn top_foods_by_rating(&self, n: usize) -> Vec<Food> {
        top_n_by(self.inner.read().foods.all(), n, |f| f.rating)
    }

    pub fn top_restaurants_by_rating(&self, n: usize) -> Vec<Restaurant> {
        top_n_by(self.inner.read().restaurants.all(), n, |r| r.rating)
    }

    // ── Vouchers ───────────────────────────────────────────────────

    /// Vouchers applicable at `now`: active flag set and validity window
    /// containing the instant.
    pub fn active_vouchers(&self, now: DateTime<Utc>) -> Vec<Voucher> {
        self.inner
            .read()
            .vouchers
            .iter()
            .filter(|v| v.is_valid_at(now))
            .cloned()
            .collect()
    }

    // ── Geography navigation ───────────────────────────────────────

    pub fn provinces(&self) -> Vec<Province> {
        self.inner.read().geo.provinces().to_vec()
    }

    pub fn province(&self, id: u64) -> Option<Province> {
        self.inner.read().geo.province(id).cloned()
    }

    pub fn district(&self, id: u64) -> Option<District> {
        self.inner.read().geo.district(id).cloned()
    }

    pub fn ward(&self, id: u64) -> Option<Ward> {
        self.inner.read().geo.ward(id).cloned()
    }

    pub fn districts_of(&self, province_id: u64) -> Vec<District> {
        self.inner
            .read()
            .geo
            .districts_of(province_id)
            .map(|d| d.to_vec())
            .unwrap_or_default()
    }

    pub fn wards_of(&self, district_id: u64) -> Vec<Ward> {
        self.inner
            .read()
            .geo
            .wards_of(district_id)
            .map(|w| w.to_vec())
            .unwrap_or_default()
    }

    pub fn find_province_by_name(&self, name: &str) -> Option<Province> {
        self.inner.read().geo.find_province_by_name(name).cloned()
    }

    pub fn find_district_by_name(&self, province: &str, district: &str) -> Option<District> {
        self.inner
            .read()
            .geo
            .find_district_by_name(province, district)
            .cloned()
    }

    pub fn find_ward_by_name(&self, district: &str, ward: &str) -> Option<Ward> {
        self.inner
            .read()
            .geo
            .find_ward_by_name(district, ward)
            .cloned()
    }
}

fn normalize(keyword: &str) -> String {
    keyword.trim().to_lowercase()
}

fn contains_ci(haystack: &str, lowered_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowered_needle)
}

/// Stable descending sort by a numeric key, truncated to `n`. Ties keep the
/// original insertion order.
fn top_n_by<T: Clone>(records: &[T], n: usize, key: impl Fn(&T) -> f64) -> Vec<T> {
    let mut ranked: Vec<&T> = records.iter().collect();
    ranked.sort_by(|a, b| key(b).partial_cmp(&key(a)).unwrap_or(Ordering::Equal));
    ranked.into_iter().take(n).cloned().collect()
}
