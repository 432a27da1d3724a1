//! Catalog
//!
//! Sellable items supplied by the host each time the checkout opens. The
//! catalog keeps only items whose status normalizes to `AVAILABLE`; anything
//! else is never reachable for selection.

use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

/// Status value identifying an item as sellable, after normalization.
const AVAILABLE: &str = "AVAILABLE";

/// Errors related to catalog construction.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// An item's currency differs from the catalog currency (item id, item
    /// currency, catalog currency).
    #[error("Item {0} has currency {1}, but catalog has currency {2}")]
    CurrencyMismatch(String, &'static str, &'static str),
}

/// A sellable item, read-only to this crate.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogItem<'a> {
    /// Unique stock identifier.
    pub id: String,

    /// Model name shown to the operator.
    pub model: String,

    /// Optional category label.
    pub category: Option<String>,

    /// Unit price.
    pub price: Money<'a, Currency>,

    /// Raw status string from the inventory service.
    pub status: String,
}

impl CatalogItem<'_> {
    /// Whether the item's normalized status marks it as sellable.
    pub fn is_available(&self) -> bool {
        self.status.trim().eq_ignore_ascii_case(AVAILABLE)
    }

    /// Whether the id, model, or category contains `needle` as a substring.
    ///
    /// `needle` must already be lower-cased.
    fn matches(&self, needle: &str) -> bool {
        if self.id.to_lowercase().contains(needle) || self.model.to_lowercase().contains(needle) {
            return true;
        }

        self.category
            .as_deref()
            .is_some_and(|category| category.to_lowercase().contains(needle))
    }
}

/// The available portion of the host-supplied catalog, indexed by item id.
#[derive(Debug)]
pub struct Catalog<'a> {
    items: Vec<CatalogItem<'a>>,
    index: FxHashMap<String, usize>,
    currency: &'static Currency,
}

impl<'a> Catalog<'a> {
    /// Create a catalog from host-supplied items, keeping only available ones.
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError` if an available item's currency differs from
    /// the catalog currency.
    pub fn with_items(
        items: impl Into<Vec<CatalogItem<'a>>>,
        currency: &'static Currency,
    ) -> Result<Self, CatalogError> {
        let items: Vec<CatalogItem<'a>> = items
            .into()
            .into_iter()
            .filter(CatalogItem::is_available)
            .collect();

        items.iter().try_for_each(|item| {
            let item_currency = item.price.currency();
            if item_currency == currency {
                Ok(())
            } else {
                Err(CatalogError::CurrencyMismatch(
                    item.id.clone(),
                    item_currency.iso_alpha_code,
                    currency.iso_alpha_code,
                ))
            }
        })?;

        let index = items
            .iter()
            .enumerate()
            .map(|(position, item)| (item.id.clone(), position))
            .collect();

        Ok(Catalog {
            items,
            index,
            currency,
        })
    }

    /// Resolve an item by id.
    pub fn get(&self, id: &str) -> Option<&CatalogItem<'a>> {
        self.index
            .get(id)
            .and_then(|position| self.items.get(*position))
    }

    /// All available items, in the order the host supplied them.
    pub fn items(&self) -> &[CatalogItem<'a>] {
        &self.items
    }

    /// Get the number of available items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the catalog has no available items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the currency of the catalog.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

/// Filter the catalog by a free-text query against id, model, and category.
///
/// Matching is a case-insensitive substring check. A whitespace-only or empty
/// query yields every available item. The returned iterator is lazy and
/// preserves catalog order.
pub fn filter<'c, 'a>(
    catalog: &'c Catalog<'a>,
    query: &str,
) -> impl Iterator<Item = &'c CatalogItem<'a>> + use<'c, 'a> {
    let needle = query.trim().to_lowercase();

    catalog
        .items()
        .iter()
        .filter(move |item| needle.is_empty() || item.matches(&needle))
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;
    use testresult::TestResult;

    use super::*;

    fn item(id: &str, model: &str, category: Option<&str>, status: &str) -> CatalogItem<'static> {
        CatalogItem {
            id: id.to_string(),
            model: model.to_string(),
            category: category.map(ToString::to_string),
            price: Money::from_minor(100_000, iso::BRL),
            status: status.to_string(),
        }
    }

    fn showroom() -> Vec<CatalogItem<'static>> {
        vec![
            item("SOF-001", "Sofá Chesterfield", Some("Sofás"), "AVAILABLE"),
            item("MES-002", "Mesa de Jantar", Some("Mesas"), "available"),
            item("ARM-003", "Armário Rústico", None, "SOLD"),
            item("CAD-004", "Cadeira Eames", Some("Cadeiras"), " Available "),
        ]
    }

    #[test]
    fn construction_keeps_only_available_items() -> TestResult {
        let catalog = Catalog::with_items(showroom(), iso::BRL)?;

        assert_eq!(catalog.len(), 3);
        assert!(catalog.get("SOF-001").is_some());
        assert!(catalog.get("ARM-003").is_none());

        Ok(())
    }

    #[test]
    fn status_normalization_ignores_case_and_whitespace() {
        assert!(item("X", "X", None, "AVAILABLE").is_available());
        assert!(item("X", "X", None, "available").is_available());
        assert!(item("X", "X", None, " Available ").is_available());
        assert!(!item("X", "X", None, "RESERVED").is_available());
    }

    #[test]
    fn currency_mismatch_errors_with_item_id() {
        let mut items = showroom();
        items.push(CatalogItem {
            price: Money::from_minor(500, iso::USD),
            ..item("IMP-005", "Luminária Importada", None, "AVAILABLE")
        });

        let result = Catalog::with_items(items, iso::BRL);

        match result {
            Err(CatalogError::CurrencyMismatch(id, item_currency, catalog_currency)) => {
                assert_eq!(id, "IMP-005");
                assert_eq!(item_currency, iso::USD.iso_alpha_code);
                assert_eq!(catalog_currency, iso::BRL.iso_alpha_code);
            }
            other => panic!("expected CurrencyMismatch error, got {other:?}"),
        }
    }

    #[test]
    fn empty_query_returns_all_available_items() -> TestResult {
        let catalog = Catalog::with_items(showroom(), iso::BRL)?;

        let all: Vec<_> = filter(&catalog, "").collect();
        let blank: Vec<_> = filter(&catalog, "   ").collect();

        assert_eq!(all.len(), 3);
        assert_eq!(all, blank);

        Ok(())
    }

    #[test]
    fn query_matches_id_model_and_category() -> TestResult {
        let catalog = Catalog::with_items(showroom(), iso::BRL)?;

        // Id prefix, case-insensitively, even though the model has diacritics.
        let by_id: Vec<_> = filter(&catalog, "SOF").map(|i| i.id.as_str()).collect();
        assert_eq!(by_id, ["SOF-001"]);

        let by_model: Vec<_> = filter(&catalog, "jantar").map(|i| i.id.as_str()).collect();
        assert_eq!(by_model, ["MES-002"]);

        let by_category: Vec<_> = filter(&catalog, "cadeiras")
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(by_category, ["CAD-004"]);

        Ok(())
    }

    #[test]
    fn filter_is_idempotent_and_order_preserving() -> TestResult {
        let catalog = Catalog::with_items(showroom(), iso::BRL)?;

        let first: Vec<_> = filter(&catalog, "a").map(|i| i.id.as_str()).collect();
        let second: Vec<_> = filter(&catalog, "a").map(|i| i.id.as_str()).collect();

        assert_eq!(first, second);

        let positions: Vec<_> = first
            .iter()
            .filter_map(|id| catalog.items().iter().position(|item| item.id == *id))
            .collect();
        assert!(
            positions
                .windows(2)
                .all(|pair| matches!(pair, [left, right] if left < right)),
            "filter must preserve catalog order"
        );

        Ok(())
    }

    #[test]
    fn unmatched_query_yields_nothing() -> TestResult {
        let catalog = Catalog::with_items(showroom(), iso::BRL)?;

        assert_eq!(filter(&catalog, "poltrona").count(), 0);

        Ok(())
    }
}
