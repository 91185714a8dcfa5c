//! Purchase-gate predicates behind the review UI. The core checks are pure
//! functions over order slices so they stay trivially testable; the [`Store`]
//! methods wrap them with the account lookup and the read lock.

use crate::model::{Account, Order};
use crate::store::Store;

/// What a prospective review points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewTarget {
    Food(u64),
    Restaurant(u64),
}

/// True when the account owns at least one fulfilled order containing the
/// food. Pending and cancelled orders do not count.
pub fn has_purchased_food(orders: &[Order], account_id: u64, food_id: u64) -> bool {
    orders.iter().any(|o| {
        o.user_id == account_id
            && o.status.is_fulfilled()
            && o.items.iter().any(|item| item.food_id == food_id)
    })
}

/// True when the account owns at least one fulfilled order with an item from
/// the restaurant.
pub fn has_purchased_from_restaurant(
    orders: &[Order],
    account_id: u64,
    restaurant_id: u64,
) -> bool {
    orders.iter().any(|o| {
        o.user_id == account_id
            && o.status.is_fulfilled()
            && o.items
                .iter()
                .any(|item| item.restaurant_id == Some(restaurant_id))
    })
}

/// Role gate plus purchase gate. Shippers and unrecognized accounts can
/// never review; legacy accounts qualify through a customer or admin role.
pub fn can_create_review(account: &Account, orders: &[Order], target: ReviewTarget) -> bool {
    if !is_consumer(account) {
        return false;
    }
    match target {
        ReviewTarget::Food(id) => has_purchased_food(orders, account.id(), id),
        ReviewTarget::Restaurant(id) => has_purchased_from_restaurant(orders, account.id(), id),
    }
}

fn is_consumer(account: &Account) -> bool {
    match account {
        Account::Legacy(a) => a
            .roles
            .iter()
            .any(|r| matches!(r.to_lowercase().as_str(), "customer" | "admin")),
        Account::Customer(_) => true,
        Account::Shipper(_) | Account::Unknown(_) => false,
    }
}

impl Store {
    pub fn has_purchased_food(&self, account_id: u64, food_id: u64) -> bool {
        let inner = self.inner.read();
        has_purchased_food(inner.orders.all(), account_id, food_id)
    }

    pub fn has_purchased_from_restaurant(&self, account_id: u64, restaurant_id: u64) -> bool {
        let inner = self.inner.read();
        has_purchased_from_restaurant(inner.orders.all(), account_id, restaurant_id)
    }

    /// A missing account can never review.
    pub fn can_create_review(&self, account_id: u64, target: ReviewTarget) -> bool {
        let inner = self.inner.read();
        match inner.accounts.get(&account_id) {
            Some(account) => can_create_review(account, inner.orders.all(), target),
            None => false,
        }
    }
}
