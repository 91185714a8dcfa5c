//! Snapshot parsing: turns the raw nested JSON documents into canonical
//! collections and the flat geography indexes. Runs once, before any query is
//! served; a structurally unusable document aborts store construction.

use crate::error::{MealDbError, Result};
use crate::model::{
    Account, Address, Banner, BankAccount, Card, Category, Courier, Credential, District, Food,
    Order, Province, Restaurant, Review, Seller, UnknownAccount, Voucher, Ward,
};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Wire shape of the main snapshot document. Required collections fail the
/// load when absent; `vouchers`, `reviews` and `auth` default to empty.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSnapshot {
    categories: Vec<Category>,
    restaurants: Vec<Restaurant>,
    foods: Vec<Food>,
    banners: Vec<Banner>,
    users: Vec<Value>,
    addresses: Vec<Address>,
    bank_accounts: Vec<BankAccount>,
    cards: Vec<Card>,
    sellers: Vec<Seller>,
    couriers: Vec<Courier>,
    orders: Vec<Order>,
    #[serde(default)]
    vouchers: Vec<Voucher>,
    #[serde(default)]
    reviews: Vec<Review>,
    #[serde(default)]
    auth: AuthSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthSection {
    #[serde(default)]
    credentials: Vec<Credential>,
}

/// Canonical collections extracted from the snapshot document, ready for the
/// store to index.
#[derive(Debug)]
pub struct ParsedSnapshot {
    pub categories: Vec<Category>,
    pub restaurants: Vec<Restaurant>,
    pub foods: Vec<Food>,
    pub banners: Vec<Banner>,
    pub accounts: Vec<Account>,
    pub credentials: Vec<Credential>,
    pub addresses: Vec<Address>,
    pub bank_accounts: Vec<BankAccount>,
    pub cards: Vec<Card>,
    pub sellers: Vec<Seller>,
    pub couriers: Vec<Courier>,
    pub orders: Vec<Order>,
    pub vouchers: Vec<Voucher>,
    pub reviews: Vec<Review>,
}

/// Parse the main snapshot document.
pub fn parse_document(document: Value) -> Result<ParsedSnapshot> {
    let raw: RawSnapshot = serde_json::from_value(document)
        .map_err(|e| MealDbError::MalformedSnapshot(e.to_string()))?;

    let mut accounts = Vec::with_capacity(raw.users.len());
    for user in raw.users {
        accounts.push(parse_account(user)?);
    }

    Ok(ParsedSnapshot {
        categories: raw.categories,
        restaurants: raw.restaurants,
        foods: raw.foods,
        banners: raw.banners,
        accounts,
        credentials: raw.auth.credentials,
        addresses: raw.addresses,
        bank_accounts: raw.bank_accounts,
        cards: raw.cards,
        sellers: raw.sellers,
        couriers: raw.couriers,
        orders: raw.orders,
        vouchers: raw.vouchers,
        reviews: raw.reviews,
    })
}

/// Parse one user record from the tagged-union array. Known discriminants
/// must deserialize cleanly; an unrecognized discriminant is kept as
/// [`Account::Unknown`] so the collection stays total over the snapshot.
fn parse_account(value: Value) -> Result<Account> {
    let kind = value
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    match kind.as_str() {
        "legacy" => Ok(Account::Legacy(
            serde_json::from_value(value)
                .map_err(|e| MealDbError::MalformedSnapshot(format!("legacy account: {e}")))?,
        )),
        "customer" => Ok(Account::Customer(
            serde_json::from_value(value)
                .map_err(|e| MealDbError::MalformedSnapshot(format!("customer account: {e}")))?,
        )),
        "shipper" => Ok(Account::Shipper(
            serde_json::from_value(value)
                .map_err(|e| MealDbError::MalformedSnapshot(format!("shipper account: {e}")))?,
        )),
        other => {
            let id = value.get("id").and_then(Value::as_u64).ok_or_else(|| {
                MealDbError::MalformedSnapshot(format!(
                    "user record with discriminant '{other}' has no numeric id"
                ))
            })?;
            log::warn!("Unrecognized account discriminant '{other}' for user {id}");
            Ok(Account::Unknown(UnknownAccount {
                id,
                kind,
                raw: value,
            }))
        }
    }
}

/// The three-level administrative hierarchy with flat id indexes, so a ward
/// resolves in O(1) without walking the tree.
#[derive(Debug)]
pub struct Geography {
    provinces: Vec<Province>,
    province_idx: HashMap<u64, usize>,
    district_idx: HashMap<u64, (usize, usize)>,
    ward_idx: HashMap<u64, (usize, usize, usize)>,
}

impl Geography {
    /// Build the indexes in one pass per level. Fails when a district's
    /// province id or a ward's district id does not match its container.
    pub fn build(provinces: Vec<Province>) -> Result<Self> {
        let mut province_idx = HashMap::new();
        let mut district_idx = HashMap::new();
        let mut ward_idx = HashMap::new();

        for (pi, province) in provinces.iter().enumerate() {
            province_idx.insert(province.id, pi);
            for (di, district) in province.districts.iter().enumerate() {
                if district.province_id != province.id {
                    return Err(MealDbError::MalformedSnapshot(format!(
                        "district {} claims province {} but is nested under province {}",
                        district.id, district.province_id, province.id
                    )));
                }
                district_idx.insert(district.id, (pi, di));
                for (wi, ward) in district.wards.iter().enumerate() {
                    if ward.district_id != district.id {
                        return Err(MealDbError::MalformedSnapshot(format!(
                            "ward {} claims district {} but is nested under district {}",
                            ward.id, ward.district_id, district.id
                        )));
                    }
                    ward_idx.insert(ward.id, (pi, di, wi));
                }
            }
        }

        Ok(Geography {
            provinces,
            province_idx,
            district_idx,
            ward_idx,
        })
    }

    pub fn provinces(&self) -> &[Province] {
        &self.provinces
    }

    pub fn province(&self, id: u64) -> Option<&Province> {
        self.province_idx.get(&id).map(|&pi| &self.provinces[pi])
    }

    pub fn district(&self, id: u64) -> Option<&District> {
        self.district_idx
            .get(&id)
            .map(|&(pi, di)| &self.provinces[pi].districts[di])
    }

    pub fn ward(&self, id: u64) -> Option<&Ward> {
        self.ward_idx
            .get(&id)
            .map(|&(pi, di, wi)| &self.provinces[pi].districts[di].wards[wi])
    }

    pub fn districts_of(&self, province_id: u64) -> Option<&[District]> {
        self.province(province_id).map(|p| p.districts.as_slice())
    }

    pub fn wards_of(&self, district_id: u64) -> Option<&[Ward]> {
        self.district(district_id).map(|d| d.wards.as_slice())
    }

    pub fn find_province_by_name(&self, name: &str) -> Option<&Province> {
        self.provinces.iter().find(|p| name_eq(&p.name, name))
    }

    pub fn find_district_by_name(&self, province: &str, district: &str) -> Option<&District> {
        self.find_province_by_name(province)?
            .districts
            .iter()
            .find(|d| name_eq(&d.name, district))
    }

    pub fn find_ward_by_name(&self, district: &str, ward: &str) -> Option<&Ward> {
        self.provinces
            .iter()
            .flat_map(|p| p.districts.iter())
            .find(|d| name_eq(&d.name, district))?
            .wards
            .iter()
            .find(|w| name_eq(&w.name, ward))
    }
}

/// Case-insensitive, whitespace-trimmed name equality.
fn name_eq(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Parse the separate geography document (a top-level array of provinces)
/// and build the flat indexes.
pub fn parse_geography(document: Value) -> Result<Geography> {
    let provinces: Vec<Province> = serde_json::from_value(document)
        .map_err(|e| MealDbError::MalformedSnapshot(format!("geography: {e}")))?;
    Geography::build(provinces)
}
