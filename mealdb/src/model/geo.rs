use serde::{Deserialize, Serialize};

/// Top level of the three-tier administrative hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Province {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub districts: Vec<District>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct District {
    pub id: u64,
    pub province_id: u64,
    pub name: String,
    #[serde(default)]
    pub wards: Vec<Ward>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ward {
    pub id: u64,
    pub district_id: u64,
    pub name: String,
}
