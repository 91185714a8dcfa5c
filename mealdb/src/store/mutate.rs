//! In-place, identity-preserving mutation of accounts and orders, plus the
//! two-phase group-cancellation exchange. Each successful write bumps the
//! revision counter inside the same critical section; a not-found target
//! leaves both the collection and the counter untouched.

use crate::error::{MealDbError, Result};
use crate::model::{Account, Order, OrderRating, OrderStatus};
use crate::store::Store;
use chrono::{DateTime, Utc};

/// Partial update over the contact fields shared by every account shape.
/// Fields left `None` keep their previous value. Role-specific data is
/// mutated through [`Store::update_account_with`] instead.
#[derive(Debug, Clone, Default)]
pub struct AccountPatch {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl AccountPatch {
    fn apply(&self, account: &mut Account) {
        match account {
            Account::Legacy(a) => {
                merge(&mut a.full_name, &self.full_name);
                merge(&mut a.email, &self.email);
                merge(&mut a.phone, &self.phone);
            }
            Account::Customer(a) => {
                merge(&mut a.full_name, &self.full_name);
                merge(&mut a.email, &self.email);
                merge(&mut a.phone, &self.phone);
            }
            Account::Shipper(a) => {
                merge(&mut a.full_name, &self.full_name);
                merge(&mut a.email, &self.email);
                merge(&mut a.phone, &self.phone);
            }
            // No known fields to patch; the record is kept as-is.
            Account::Unknown(_) => {}
        }
    }
}

fn merge(slot: &mut String, patch: &Option<String>) {
    if let Some(value) = patch {
        *slot = value.clone();
    }
}

/// Partial update over an order. Same merge contract as [`AccountPatch`].
#[derive(Debug, Clone, Default)]
pub struct OrderPatch {
    pub status: Option<OrderStatus>,
    pub courier_id: Option<u64>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub rating: Option<OrderRating>,
}

impl OrderPatch {
    fn apply(&self, order: &mut Order) {
        if let Some(status) = self.status {
            order.status = status;
        }
        if let Some(courier_id) = self.courier_id {
            order.courier_id = Some(courier_id);
        }
        if let Some(delivered_at) = self.delivered_at {
            order.delivered_at = Some(delivered_at);
        }
        if let Some(rating) = &self.rating {
            order.rating = Some(rating.clone());
        }
    }
}

impl Store {
    /// Merge `patch` over the account with this id and replace it in place.
    /// Returns the new value, or [`MealDbError::NotFound`] without touching
    /// any state.
    pub fn update_account(&self, id: u64, patch: AccountPatch) -> Result<Account> {
        self.update_account_with(id, move |prev| {
            let mut next = prev.clone();
            patch.apply(&mut next);
            next
        })
    }

    /// Replace the account with this id by a pure transform of its previous
    /// value. The transform must keep the id — changing it would silently
    /// corrupt the index.
    pub fn update_account_with(
        &self,
        id: u64,
        f: impl FnOnce(&Account) -> Account,
    ) -> Result<Account> {
        let mut inner = self.inner.write();
        let pos = inner
            .accounts
            .position(&id)
            .ok_or_else(|| MealDbError::not_found("users", id))?;
        let next = f(&inner.accounts.all()[pos]);
        if next.id() != id {
            return Err(MealDbError::validation(
                "id",
                format!("transform changed account id {id} to {}", next.id()),
            ));
        }
        inner.accounts.replace_at(pos, next.clone());
        inner.revision += 1;
        log::debug!("Account {id} updated, revision {}", inner.revision);
        Ok(next)
    }

    /// Merge `patch` over the order with this id. Same contract as
    /// [`Store::update_account`].
    pub fn update_order(&self, id: &str, patch: OrderPatch) -> Result<Order> {
        self.update_order_with(id, move |prev| {
            let mut next = prev.clone();
            patch.apply(&mut next);
            next
        })
    }

    pub fn update_order_with(&self, id: &str, f: impl FnOnce(&Order) -> Order) -> Result<Order> {
        let mut inner = self.inner.write();
        let key = id.to_string();
        let pos = inner
            .orders
            .position(&key)
            .ok_or_else(|| MealDbError::not_found("orders", id))?;
        let next = f(&inner.orders.all()[pos]);
        if next.id != key {
            return Err(MealDbError::validation(
                "id",
                format!("transform changed order id {id} to {}", next.id),
            ));
        }
        inner.orders.replace_at(pos, next.clone());
        inner.revision += 1;
        log::debug!("Order {id} updated, revision {}", inner.revision);
        Ok(next)
    }

    // ── Group cancellation (two-phase) ─────────────────────────────

    /// Phase 1: every OTHER order sharing the anchor's fulfilment group that
    /// is still cancellable, in insertion order. Mutates nothing; an order
    /// without a group key has no siblings.
    pub fn preview_group_cancellation(&self, order_id: &str) -> Result<Vec<Order>> {
        let inner = self.inner.read();
        let key = order_id.to_string();
        let anchor = inner
            .orders
            .get(&key)
            .ok_or_else(|| MealDbError::not_found("orders", order_id))?;

        let Some(group) = anchor.group_id.clone() else {
            return Ok(Vec::new());
        };

        Ok(inner
            .orders
            .iter()
            .filter(|o| {
                o.id != key && o.group_id.as_deref() == Some(group.as_str()) && o.status.is_cancellable()
            })
            .cloned()
            .collect())
    }

    /// Phase 2: with `confirmed`, transition the anchor and every cancellable
    /// sibling to cancelled as one unit — one critical section, one revision
    /// bump, no partially cancelled group observable. Declining is a
    /// successful no-op.
    pub fn confirm_group_cancellation(
        &self,
        order_id: &str,
        confirmed: bool,
    ) -> Result<Vec<Order>> {
        if !confirmed {
            return Ok(Vec::new());
        }

        let mut inner = self.inner.write();
        let key = order_id.to_string();
        let anchor_pos = inner
            .orders
            .position(&key)
            .ok_or_else(|| MealDbError::not_found("orders", order_id))?;

        let anchor = &inner.orders.all()[anchor_pos];
        if !anchor.status.is_cancellable() {
            return Err(MealDbError::validation(
                "status",
                format!("order {order_id} can no longer be cancelled"),
            ));
        }
        let group = anchor.group_id.clone();

        let positions: Vec<usize> = inner
            .orders
            .iter()
            .enumerate()
            .filter(|(pos, o)| {
                *pos == anchor_pos
                    || (group.is_some() && o.group_id == group && o.status.is_cancellable())
            })
            .map(|(pos, _)| pos)
            .collect();

        let mut cancelled = Vec::with_capacity(positions.len());
        for pos in positions {
            let mut next = inner.orders.all()[pos].clone();
            next.status = OrderStatus::Cancelled;
            inner.orders.replace_at(pos, next.clone());
            cancelled.push(next);
        }
        inner.revision += 1;
        log::debug!(
            "Cancelled {} order(s) in group of {order_id}, revision {}",
            cancelled.len(),
            inner.revision
        );
        Ok(cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixtures::sample_store;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_update_order_merges_patch_only() {
        let store = sample_store();
        let before = store.order("o6").unwrap();

        let updated = store
            .update_order(
                "o6",
                OrderPatch {
                    status: Some(OrderStatus::Delivered),
                    delivered_at: Some(Utc.with_ymd_and_hms(2026, 8, 21, 9, 45, 0).unwrap()),
                    ..OrderPatch::default()
                },
            )
            .unwrap();

        assert_eq!(updated.status, OrderStatus::Delivered);
        assert!(updated.delivered_at.is_some());

        // Everything not named in the patch is untouched.
        let after = store.order("o6").unwrap();
        assert_eq!(after.user_id, before.user_id);
        assert_eq!(after.items.len(), before.items.len());
        assert_eq!(after.courier_id, before.courier_id);
        assert_eq!(after.created_at, before.created_at);
        assert_eq!(after.payment.total, before.payment.total);
    }

    #[test]
    fn test_update_preserves_position() {
        let store = sample_store();
        store
            .update_order("o3", OrderPatch { status: Some(OrderStatus::Preparing), ..OrderPatch::default() })
            .unwrap();
        let ids: Vec<String> = store.orders().iter().map(|o| o.id.clone()).collect();
        assert_eq!(ids, vec!["o1", "o2", "o3", "o4", "o5", "o6", "o7"]);
    }

    #[test]
    fn test_revision_advances_only_on_success() {
        let store = sample_store();
        assert_eq!(store.revision(), 0);

        store
            .update_account(7, AccountPatch { phone: Some("0911222333".into()), ..AccountPatch::default() })
            .unwrap();
        assert_eq!(store.revision(), 1);

        let err = store.update_account(9999, AccountPatch::default()).unwrap_err();
        assert!(matches!(err, MealDbError::NotFound { .. }));
        assert_eq!(store.revision(), 1);

        let err = store.update_order("missing", OrderPatch::default()).unwrap_err();
        assert!(matches!(err, MealDbError::NotFound { .. }));
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn test_account_patch_applies_across_variants() {
        let store = sample_store();
        let updated = store
            .update_account(8, AccountPatch { full_name: Some("Le Van C.".into()), ..AccountPatch::default() })
            .unwrap();
        assert_eq!(updated.full_name(), "Le Van C.");
        // Inline customer data survives the merge.
        match store.account(8).unwrap() {
            Account::Customer(c) => {
                assert_eq!(c.addresses.len(), 1);
                assert_eq!(c.favorites.foods, vec![42, 44]);
            }
            other => panic!("expected customer, got {other:?}"),
        }
    }

    #[test]
    fn test_transform_update() {
        let store = sample_store();
        let updated = store
            .update_account_with(8, |prev| {
                let mut next = prev.clone();
                if let Account::Customer(c) = &mut next {
                    c.wallet.balance += 50000.0;
                }
                next
            })
            .unwrap();
        match updated {
            Account::Customer(c) => assert_eq!(c.wallet.balance, 300000.0),
            other => panic!("expected customer, got {other:?}"),
        }
    }

    #[test]
    fn test_transform_may_not_change_id() {
        let store = sample_store();
        let err = store
            .update_order_with("o1", |prev| {
                let mut next = prev.clone();
                next.id = "o1-copy".into();
                next
            })
            .unwrap_err();
        assert!(matches!(err, MealDbError::Validation { .. }));
        assert_eq!(store.revision(), 0);
        assert!(store.order("o1").is_some());
    }

    #[test]
    fn test_group_cancellation_preview_excludes_anchor() {
        let store = sample_store();
        let siblings: Vec<String> = store
            .preview_group_cancellation("o3")
            .unwrap()
            .iter()
            .map(|o| o.id.clone())
            .collect();
        assert_eq!(siblings, vec!["o2", "o4"]);
        assert_eq!(store.revision(), 0); // preview never mutates
    }

    #[test]
    fn test_group_cancellation_confirm_is_all_or_nothing() {
        let store = sample_store();
        let cancelled = store.confirm_group_cancellation("o3", true).unwrap();
        assert_eq!(cancelled.len(), 3);
        for id in ["o2", "o3", "o4"] {
            assert_eq!(store.order(id).unwrap().status, OrderStatus::Cancelled);
        }
        assert_eq!(store.revision(), 1); // one logical unit
    }

    #[test]
    fn test_group_cancellation_decline_is_a_noop() {
        let store = sample_store();
        let cancelled = store.confirm_group_cancellation("o3", false).unwrap();
        assert!(cancelled.is_empty());
        assert_eq!(store.order("o2").unwrap().status, OrderStatus::Pending);
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_group_cancellation_rejects_settled_anchor() {
        let store = sample_store();
        let err = store.confirm_group_cancellation("o1", true).unwrap_err();
        assert!(matches!(err, MealDbError::Validation { .. }));
        assert_eq!(store.order("o1").unwrap().status, OrderStatus::Delivered);
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_ungrouped_order_cancels_alone() {
        let store = sample_store();
        assert!(store.preview_group_cancellation("o7").unwrap().is_empty());
        let cancelled = store.confirm_group_cancellation("o7", true).unwrap();
        assert_eq!(cancelled.len(), 1);
        assert_eq!(store.order("o7").unwrap().status, OrderStatus::Cancelled);
    }
}
