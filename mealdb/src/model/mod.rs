//! Entity records held by the store. Field names follow the snapshot wire
//! contract (camelCase) via serde renames.

pub mod account;
pub mod catalog;
pub mod geo;
pub mod misc;
pub mod order;
pub mod payment;

pub use account::{
    Account, CustomerAccount, Favorites, LegacyAccount, PaymentKind, PaymentRef, ShipperAccount,
    ShipperStats, UnknownAccount, Vehicle, Wallet, WalletTransaction,
};
pub use catalog::{Banner, Category, Food, GeoPoint, Restaurant, ReviewEntry};
pub use geo::{District, Province, Ward};
pub use misc::{
    Courier, Credential, DiscountKind, Review, ReviewKind, Seller, Voucher, VoucherScope,
};
pub use order::{Order, OrderItem, OrderRating, OrderStatus, PaymentSummary};
pub use payment::{Address, BankAccount, Card};
