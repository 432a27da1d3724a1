//! Balcão prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    catalog::{Catalog, CatalogError, CatalogItem, filter},
    checkout::{Checkout, CheckoutError, CheckoutHost, CheckoutState},
    draft::SaleDraft,
    fixtures::{FixtureError, load_catalog, showroom},
    masks::{MaskedInput, digits_only, mask_phone, mask_tax_id},
    payment::{Installments, PaymentError, PaymentMethod},
    record::{FINALIZED, SaleRecord},
    session::{Role, SessionContext},
    totals::{Totals, TotalsError, money_from_decimal},
    validate::{ValidationError, is_submittable, validate},
};
