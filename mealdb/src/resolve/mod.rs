//! Relationship resolver: one exhaustive match over the account union
//! producing role-specific views, instead of structural probing at call
//! sites. Total over every account record — an unrecognized discriminant
//! resolves to [`AccountView::Unrecognized`], never an error.

use crate::error::{MealDbError, Result};
use crate::model::{
    Account, Address, BankAccount, Card, Favorites, LegacyAccount, Order, PaymentKind,
    ShipperStats, Vehicle, Wallet,
};
use crate::store::{Store, StoreInner};

#[derive(Debug, Clone)]
pub enum AccountView {
    Customer(CustomerView),
    Shipper(ShipperView),
    Legacy(LegacyView),
    Unrecognized,
}

/// Demo customer view. Everything is carried inline on the account record,
/// so no joins are involved.
#[derive(Debug, Clone)]
pub struct CustomerView {
    pub addresses: Vec<Address>,
    pub wallet: Wallet,
    pub favorites: Favorites,
}

#[derive(Debug, Clone)]
pub struct ShipperView {
    pub stats: ShipperStats,
    pub vehicle: Vehicle,
    pub bank_accounts: Vec<BankAccount>,
    pub deliveries: Vec<Order>,
}

#[derive(Debug, Clone)]
pub struct LegacyView {
    pub roles: Vec<String>,
    pub payment: Option<PaymentMethod>,
}

/// The resolved default payment method of a legacy account.
#[derive(Debug, Clone)]
pub enum PaymentMethod {
    Bank(BankAccount),
    Card(Card),
}

impl Store {
    /// Resolve the role-specific view of an account. Errors only when the id
    /// itself is absent.
    pub fn resolve_account(&self, id: u64) -> Result<AccountView> {
        let inner = self.inner.read();
        let account = inner
            .accounts
            .get(&id)
            .ok_or_else(|| MealDbError::not_found("users", id))?;

        Ok(match account {
            Account::Customer(c) => AccountView::Customer(CustomerView {
                addresses: c.addresses.clone(),
                wallet: c.wallet.clone(),
                favorites: c.favorites.clone(),
            }),
            Account::Shipper(s) => {
                let bank_accounts = inner
                    .bank_accounts
                    .iter()
                    .filter(|b| b.account_id == s.id)
                    .cloned()
                    .collect();
                // Two-tier resolution: the inline id list when the snapshot
                // carries one, otherwise a linear scan on assigned courier.
                let deliveries = match &s.delivery_ids {
                    Some(ids) => ids
                        .iter()
                        .filter_map(|oid| inner.orders.get(oid).cloned())
                        .collect(),
                    None => inner
                        .orders
                        .iter()
                        .filter(|o| o.courier_id == Some(s.id))
                        .cloned()
                        .collect(),
                };
                AccountView::Shipper(ShipperView {
                    stats: s.stats.clone(),
                    vehicle: s.vehicle.clone(),
                    bank_accounts,
                    deliveries,
                })
            }
            Account::Legacy(l) => AccountView::Legacy(LegacyView {
                roles: l.roles.clone(),
                payment: resolve_payment(&inner, l),
            }),
            Account::Unknown(_) => AccountView::Unrecognized,
        })
    }
}

/// Follow the explicit type+id pointer first; when it is absent or dangling,
/// fall back to the owner's first default-flagged bank account, then card.
fn resolve_payment(inner: &StoreInner, account: &LegacyAccount) -> Option<PaymentMethod> {
    if let Some(reference) = &account.default_payment {
        match reference.kind {
            PaymentKind::Bank => {
                if let Some(bank) = inner.bank_accounts.get(&reference.id) {
                    return Some(PaymentMethod::Bank(bank.clone()));
                }
            }
            PaymentKind::Card => {
                if let Some(card) = inner.cards.get(&reference.id) {
                    return Some(PaymentMethod::Card(card.clone()));
                }
            }
        }
    }

    if let Some(bank) = inner
        .bank_accounts
        .iter()
        .find(|b| b.account_id == account.id && b.is_default)
    {
        return Some(PaymentMethod::Bank(bank.clone()));
    }
    if let Some(card) = inner
        .cards
        .iter()
        .find(|c| c.account_id == account.id && c.is_default)
    {
        return Some(PaymentMethod::Card(card.clone()));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixtures::sample_store;

    #[test]
    fn test_customer_view_is_inline() {
        let store = sample_store();
        match store.resolve_account(8).unwrap() {
            AccountView::Customer(view) => {
                assert_eq!(view.addresses.len(), 1);
                assert_eq!(view.addresses[0].street, "3 Trúc Bạch");
                assert_eq!(view.wallet.balance, 250000.0);
                assert_eq!(view.favorites.restaurants, vec![1]);
                assert_eq!(view.favorites.foods, vec![42, 44]);
            }
            other => panic!("expected customer view, got {other:?}"),
        }
    }

    #[test]
    fn test_shipper_deliveries_fall_back_to_courier_scan() {
        let store = sample_store();
        match store.resolve_account(9).unwrap() {
            AccountView::Shipper(view) => {
                assert_eq!(view.stats.completed, 120);
                assert_eq!(view.bank_accounts.len(), 1);
                assert_eq!(view.bank_accounts[0].bank_name, "ACB");
                let ids: Vec<String> = view.deliveries.iter().map(|o| o.id.clone()).collect();
                assert_eq!(ids, vec!["o1", "o6"]);
            }
            other => panic!("expected shipper view, got {other:?}"),
        }
    }

    #[test]
    fn test_shipper_inline_delivery_ids_take_precedence() {
        let store = sample_store();
        store
            .update_account_with(9, |prev| {
                let mut next = prev.clone();
                if let Account::Shipper(s) = &mut next {
                    s.delivery_ids = Some(vec!["o6".into(), "missing".into()]);
                }
                next
            })
            .unwrap();

        match store.resolve_account(9).unwrap() {
            AccountView::Shipper(view) => {
                let ids: Vec<String> = view.deliveries.iter().map(|o| o.id.clone()).collect();
                // Dangling ids are skipped, no scan happens.
                assert_eq!(ids, vec!["o6"]);
            }
            other => panic!("expected shipper view, got {other:?}"),
        }
    }

    #[test]
    fn test_legacy_payment_follows_explicit_pointer() {
        let store = sample_store();
        match store.resolve_account(7).unwrap() {
            AccountView::Legacy(view) => {
                assert_eq!(view.roles, vec!["customer"]);
                match view.payment {
                    Some(PaymentMethod::Bank(bank)) => assert_eq!(bank.id, 301),
                    other => panic!("expected bank 301, got {other:?}"),
                }
            }
            other => panic!("expected legacy view, got {other:?}"),
        }
    }

    #[test]
    fn test_legacy_payment_falls_back_on_dangling_pointer() {
        let store = sample_store();
        store
            .update_account_with(7, |prev| {
                let mut next = prev.clone();
                if let Account::Legacy(l) = &mut next {
                    l.default_payment = Some(crate::model::PaymentRef {
                        kind: PaymentKind::Card,
                        id: 9999,
                    });
                }
                next
            })
            .unwrap();

        // Pointer dangles; the first default-flagged bank account wins over
        // the default-flagged card.
        match store.resolve_account(7).unwrap() {
            AccountView::Legacy(view) => match view.payment {
                Some(PaymentMethod::Bank(bank)) => assert_eq!(bank.id, 301),
                other => panic!("expected fallback bank, got {other:?}"),
            },
            other => panic!("expected legacy view, got {other:?}"),
        }
    }

    #[test]
    fn test_legacy_without_any_payment_resolves_to_none() {
        let store = sample_store();
        // Account 5 has no payment pointer and owns no instruments.
        match store.resolve_account(5).unwrap() {
            AccountView::Legacy(view) => assert!(view.payment.is_none()),
            other => panic!("expected legacy view, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_discriminant_resolves_to_no_view() {
        let store = sample_store();
        assert!(matches!(
            store.resolve_account(6).unwrap(),
            AccountView::Unrecognized
        ));
    }

    #[test]
    fn test_missing_account_is_not_found() {
        let store = sample_store();
        let err = store.resolve_account(9999).unwrap_err();
        assert!(matches!(err, MealDbError::NotFound { .. }));
    }
}
