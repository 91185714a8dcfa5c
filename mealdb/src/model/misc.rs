use crate::model::account::Vehicle;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountKind {
    Percent,
    Amount,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum VoucherScope {
    #[default]
    Global,
    Restaurant {
        id: u64,
    },
    Category {
        name: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Voucher {
    pub id: u64,
    pub code: String,
    pub kind: DiscountKind,
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub min_order: f64,
    #[serde(default)]
    pub scope: VoucherScope,
    #[serde(default)]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ends_at: Option<DateTime<Utc>>,
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

impl Voucher {
    /// Whether the voucher can be applied at `now`: active flag set and `now`
    /// inside the validity window (open-ended when a bound is absent).
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        if !self.active {
            return false;
        }
        if let Some(start) = self.starts_at {
            if now < start {
                return false;
            }
        }
        if let Some(end) = self.ends_at {
            if now > end {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewKind {
    Restaurant,
    Food,
}

/// Aggregated review row from the flat `reviews` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: u64,
    pub kind: ReviewKind,
    pub target_id: u64,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<u64>,
}

/// Auth-side representation of an account, loosely linked by account id.
/// Registration's duplicate check runs over the union of this collection and
/// the account collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    pub account_id: u64,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub password_hash: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seller {
    pub id: u64,
    pub account_id: u64,
    #[serde(default)]
    pub restaurants: Vec<u64>,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Courier {
    pub id: u64,
    pub account_id: u64,
    #[serde(default)]
    pub vehicle: Vehicle,
    #[serde(default)]
    pub service_area: Vec<String>,
    #[serde(default)]
    pub on_duty: bool,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub completed_trips: u64,
}
