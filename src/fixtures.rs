//! Fixtures
//!
//! YAML catalog fixtures for tests and demos, mirroring the shape the
//! inventory service supplies at modal open.

use std::{fs, path::Path, str::FromStr};

use rust_decimal::Decimal;
use rusty_money::{Findable, iso::Currency};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    catalog::{Catalog, CatalogError, CatalogItem},
    totals::{self, TotalsError},
};

/// Fixture parsing errors.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files.
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format.
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    /// Unknown currency code.
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Price conversion to minor units failed.
    #[error(transparent)]
    Conversion(#[from] TotalsError),

    /// Catalog construction failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Raw catalog file layout.
#[derive(Debug, Deserialize)]
struct RawCatalog {
    currency: String,
    items: Vec<RawCatalogItem>,
}

/// Raw catalog item as stored in YAML.
#[derive(Debug, Deserialize)]
struct RawCatalogItem {
    id: String,
    model: String,
    #[serde(default)]
    category: Option<String>,
    price: String,
    status: String,
}

/// Load a catalog from a YAML fixture file.
///
/// # Errors
///
/// Returns a [`FixtureError`] if the file cannot be read or parsed, a price
/// or currency is invalid, or catalog construction fails.
pub fn load_catalog(path: &Path) -> Result<Catalog<'static>, FixtureError> {
    let contents = fs::read_to_string(path)?;

    parse_catalog(&contents)
}

/// The bundled furniture showroom catalog used by tests and the demo.
///
/// # Errors
///
/// Returns a [`FixtureError`] if the bundled fixture fails to parse, which
/// indicates a broken build.
pub fn showroom() -> Result<Catalog<'static>, FixtureError> {
    parse_catalog(include_str!("../fixtures/showroom.yaml"))
}

/// Parse a YAML catalog document.
fn parse_catalog(contents: &str) -> Result<Catalog<'static>, FixtureError> {
    let raw: RawCatalog = serde_norway::from_str(contents)?;

    let currency = Currency::find(&raw.currency)
        .ok_or_else(|| FixtureError::UnknownCurrency(raw.currency.clone()))?;

    let items = raw
        .items
        .into_iter()
        .map(|raw_item| {
            let Ok(amount) = Decimal::from_str(&raw_item.price) else {
                return Err(FixtureError::InvalidPrice(raw_item.price));
            };

            if amount.is_sign_negative() {
                return Err(FixtureError::InvalidPrice(raw_item.price));
            }

            Ok(CatalogItem {
                id: raw_item.id,
                model: raw_item.model,
                category: raw_item.category,
                price: totals::money_from_decimal(amount, currency)?,
                status: raw_item.status,
            })
        })
        .collect::<Result<Vec<_>, FixtureError>>()?;

    Ok(Catalog::with_items(items, currency)?)
}
