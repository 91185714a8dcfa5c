//! Embedded data layer for a meal-delivery app. Loads a JSON snapshot pair
//! (catalog/accounts/orders plus the province-district-ward tree) into typed
//! in-memory collections and serves queries, relationship resolution,
//! business predicates, and revisioned mutations from a single [`Store`].

pub mod error;
pub mod model;
pub mod predicate;
pub mod resolve;
pub mod snapshot;
pub mod store;
pub mod validation;

pub use error::{MealDbError, Result};
pub use predicate::ReviewTarget;
pub use resolve::{AccountView, CustomerView, LegacyView, PaymentMethod, ShipperView};
pub use store::{parse_id, AccountPatch, OrderPatch, Role, Store};
