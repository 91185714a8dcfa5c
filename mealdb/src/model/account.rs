use crate::model::payment::Address;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The polymorphic account record: one tagged union over three shapes sharing
/// an id, distinguished by the `type` discriminant on the wire. Records with
/// an unrecognized discriminant are kept as [`Account::Unknown`] so every
/// snapshot row stays addressable; the resolver maps them to "no role-specific
/// view" instead of failing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Account {
    #[serde(rename = "legacy")]
    Legacy(LegacyAccount),
    #[serde(rename = "customer")]
    Customer(CustomerAccount),
    #[serde(rename = "shipper")]
    Shipper(ShipperAccount),
    #[serde(rename = "unknown")]
    Unknown(UnknownAccount),
}

impl Account {
    pub fn id(&self) -> u64 {
        match self {
            Account::Legacy(a) => a.id,
            Account::Customer(a) => a.id,
            Account::Shipper(a) => a.id,
            Account::Unknown(a) => a.id,
        }
    }

    pub fn full_name(&self) -> &str {
        match self {
            Account::Legacy(a) => &a.full_name,
            Account::Customer(a) => &a.full_name,
            Account::Shipper(a) => &a.full_name,
            Account::Unknown(_) => "",
        }
    }

    pub fn email(&self) -> &str {
        match self {
            Account::Legacy(a) => &a.email,
            Account::Customer(a) => &a.email,
            Account::Shipper(a) => &a.email,
            Account::Unknown(_) => "",
        }
    }

    pub fn phone(&self) -> &str {
        match self {
            Account::Legacy(a) => &a.phone,
            Account::Customer(a) => &a.phone,
            Account::Shipper(a) => &a.phone,
            Account::Unknown(_) => "",
        }
    }
}

/// Account shape predating the demo variants: a flat record with a role list
/// and explicit default address/payment references into the flat collections.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyAccount {
    pub id: u64,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub default_address_id: Option<u64>,
    #[serde(default)]
    pub default_payment: Option<PaymentRef>,
}

/// Explicit type+id pointer into either the bank account or card collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRef {
    pub kind: PaymentKind,
    pub id: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentKind {
    Bank,
    Card,
}

/// Demo customer variant: addresses, wallet and favorites are carried inline
/// on the record rather than joined.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerAccount {
    pub id: u64,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub addresses: Vec<Address>,
    #[serde(default)]
    pub wallet: Wallet,
    #[serde(default)]
    pub favorites: Favorites,
    #[serde(default)]
    pub order_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    #[serde(default)]
    pub balance: f64,
    #[serde(default)]
    pub transactions: Vec<WalletTransaction>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletTransaction {
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub at: Option<DateTime<Utc>>,
}

/// Two id sets; membership checks only, no join needed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorites {
    #[serde(default)]
    pub restaurants: Vec<u64>,
    #[serde(default)]
    pub foods: Vec<u64>,
}

/// Demo shipper variant. `delivery_ids` is optional on purpose: when absent
/// the resolver falls back to scanning orders by assigned courier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipperAccount {
    pub id: u64,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub stats: ShipperStats,
    #[serde(default)]
    pub vehicle: Vehicle,
    #[serde(default)]
    pub delivery_ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipperStats {
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub completed: u64,
    #[serde(default)]
    pub completion_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub plate: String,
}

impl Default for Vehicle {
    fn default() -> Self {
        Vehicle {
            kind: "motorbike".to_string(),
            plate: String::new(),
        }
    }
}

/// Catch-all for unrecognized discriminants. The raw payload is kept so
/// nothing is lost if a newer snapshot carries shapes this build predates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnknownAccount {
    pub id: u64,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub raw: serde_json::Value,
}
