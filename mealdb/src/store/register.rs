//! Registration workflow: validate-then-commit creation of an account, its
//! credential, and the role side-record, as one logical unit.

use crate::error::{MealDbError, Result};
use crate::model::{Account, Courier, Credential, LegacyAccount, Seller, Vehicle};
use crate::store::Store;
use crate::validation;
use sha2::{Digest, Sha256};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Customer,
    Seller,
    Shipper,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Seller => "seller",
            Role::Shipper => "shipper",
            Role::Admin => "admin",
        }
    }
}

impl FromStr for Role {
    type Err = MealDbError;

    fn from_str(s: &str) -> Result<Role> {
        match s.trim().to_lowercase().as_str() {
            "customer" => Ok(Role::Customer),
            "seller" => Ok(Role::Seller),
            "shipper" => Ok(Role::Shipper),
            "admin" => Ok(Role::Admin),
            other => Err(MealDbError::validation(
                "role",
                format!("'{other}' is not one of customer, seller, shipper, admin"),
            )),
        }
    }
}

impl Store {
    /// Create a new account. Normalizes and validates the input, rejects
    /// duplicates over the union of account and credential records, then
    /// appends the account, its credential, and (for sellers and shippers)
    /// the role side-record under one write lock. Nothing is written before
    /// every precondition has passed, so a failure never leaves an account
    /// without its credential or a shipper without a courier record.
    pub fn register(
        &self,
        full_name: &str,
        email: &str,
        phone: &str,
        password: &str,
        role: &str,
    ) -> Result<Account> {
        let role = Role::from_str(role)?;
        let input = validation::normalize(full_name, email, phone);
        validation::validate(&input, password)?;

        let mut inner = self.inner.write();

        // Duplicate check over both representations of "this account exists".
        let clash = inner
            .accounts
            .iter()
            .map(|a| (a.email().to_string(), a.phone().to_string()))
            .chain(
                inner
                    .credentials
                    .iter()
                    .map(|c| (c.email.clone(), c.phone.clone())),
            )
            .find(|(email, phone)| {
                (!email.is_empty() && email.to_lowercase() == input.email)
                    || (!phone.is_empty() && validation::normalize_phone(phone) == input.phone)
            });
        if let Some((email, _)) = clash {
            return Err(MealDbError::DuplicateAccount(if email.to_lowercase() == input.email {
                format!("email {} is already registered", input.email)
            } else {
                format!("phone {} is already registered", input.phone)
            }));
        }

        let id = inner.accounts.iter().map(|a| a.id()).max().unwrap_or(0) + 1;

        // Build every record before the first append.
        let credential = Credential {
            account_id: id,
            email: input.email.clone(),
            phone: input.phone.clone(),
            password_hash: hash_password(password),
            status: "active".to_string(),
            last_login: None,
        };
        let seller = (role == Role::Seller).then(|| Seller {
            id: inner.sellers.iter().map(|s| s.id).max().unwrap_or(0) + 1,
            account_id: id,
            restaurants: Vec::new(),
            status: "active".to_string(),
        });
        let courier = (role == Role::Shipper).then(|| Courier {
            id: inner.couriers.iter().map(|c| c.id).max().unwrap_or(0) + 1,
            account_id: id,
            vehicle: Vehicle::default(),
            service_area: Vec::new(),
            on_duty: false,
            rating: 5.0,
            completed_trips: 0,
        });
        let account = Account::Legacy(LegacyAccount {
            id,
            full_name: input.full_name,
            email: input.email,
            phone: input.phone,
            roles: vec![role.as_str().to_string()],
            default_address_id: None,
            default_payment: None,
        });

        inner.accounts.push(account.clone());
        inner.credentials.push(credential);
        if let Some(seller) = seller {
            inner.sellers.push(seller);
        }
        if let Some(courier) = courier {
            inner.couriers.push(courier);
        }
        inner.revision += 1;
        log::debug!(
            "Registered account {id} as {}, revision {}",
            role.as_str(),
            inner.revision
        );

        Ok(account)
    }
}

fn hash_password(password: &str) -> String {
    let digest = Sha256::digest(password.as_bytes());
    digest.iter().map(|b| format!("{b:02x}")).collect()
}
