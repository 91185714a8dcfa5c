use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// An inline review carried on a food or restaurant record, as denormalized
/// in the snapshot. The separate `reviews` collection holds the aggregated
/// cross-entity form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewEntry {
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub comment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Food {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub restaurant_id: Option<u64>,
    #[serde(default)]
    pub category: String,
    /// Display string, e.g. "45.000đ". The store never does arithmetic on it.
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub reviews: Vec<ReviewEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: u64,
    /// Unique across the collection.
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub location: GeoPoint,
    #[serde(default)]
    pub rating: f64,
    /// Menu as food ids; resolved through the food collection.
    #[serde(default)]
    pub menu: Vec<u64>,
    #[serde(default)]
    pub reviews: Vec<ReviewEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub restaurant_id: Option<u64>,
}
