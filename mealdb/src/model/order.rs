use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Delivering,
    Delivered,
    Completed,
    Cancelled,
    Failed,
    Refunded,
}

impl OrderStatus {
    /// An order can only be cancelled before the kitchen hands it off.
    pub fn is_cancellable(self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Preparing)
    }

    /// Statuses that count as a completed purchase for review eligibility.
    pub fn is_fulfilled(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Completed)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub user_id: u64,
    pub status: OrderStatus,
    /// Fulfilment group key: orders from one checkout transaction share it
    /// and must be cancelled together or not at all.
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub delivered_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub payment: PaymentSummary,
    #[serde(default)]
    pub courier_id: Option<u64>,
    #[serde(default)]
    pub rating: Option<OrderRating>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub food_id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default = "one")]
    pub quantity: u32,
    /// Unit price at checkout time.
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub restaurant_id: Option<u64>,
}

fn one() -> u32 {
    1
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSummary {
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub subtotal: f64,
    #[serde(default)]
    pub shipping_fee: f64,
    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRating {
    pub stars: u8,
    #[serde(default)]
    pub comment: String,
}
