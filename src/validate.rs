//! Validation
//!
//! Ordered validation rules over the sale draft. Rules run top to bottom and
//! the first failure is the one surfaced; failures are values, never panics,
//! and every one is recoverable by further user input.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{catalog::Catalog, draft::SaleDraft, session::Role, totals::Totals};

/// A user-correctable validation failure, one per rule.
///
/// The display text is the message shown at the counter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Rule 1: the seller field is empty.
    #[error("identify the seller responsible for this sale")]
    MissingSeller,

    /// Rule 2: no product selected, or the selection no longer resolves.
    #[error("Select an item from stock to continue.")]
    NoProductSelected,

    /// Rule 3: the customer name is empty after trimming.
    #[error("inform the customer name")]
    MissingCustomerName,

    /// Rule 4: a tax id was entered but is not exactly 11 digits.
    #[error("customer tax id must have exactly 11 digits")]
    InvalidTaxId,

    /// Rule 5: a phone was entered but is not 10 or 11 digits.
    #[error("customer phone must have 10 or 11 digits")]
    InvalidPhone,

    /// Rule 6: no payment method selected.
    #[error("select a payment method")]
    MissingPaymentMethod,

    /// Rule 7a: cash payment with a positive net total but no tendered
    /// amount.
    #[error("inform the amount received from the customer")]
    MissingTenderedAmount,

    /// Rule 7b: the tendered amount does not cover the net total.
    #[error("received amount cannot be less than net total.")]
    InsufficientTenderedAmount,

    /// Rule 8: the applied discount exceeds the standard ceiling for a
    /// non-administrative role. Unreachable in practice, since the applied
    /// discount is already clamped to the role ceiling before validation.
    #[error("discount of {applied}% exceeds the {ceiling}% limit for this profile")]
    DiscountAboveCeiling {
        /// The clamped discount that failed the check, in percent points.
        applied: Decimal,

        /// The ceiling it exceeded, in percent points.
        ceiling: Decimal,
    },
}

/// Run the ordered validation rules, short-circuiting on the first failure.
///
/// # Errors
///
/// Returns the first failing rule's [`ValidationError`].
pub fn validate(
    draft: &SaleDraft,
    catalog: &Catalog<'_>,
    role: Role,
    totals: &Totals<'_>,
) -> Result<(), ValidationError> {
    if draft.seller().trim().is_empty() {
        return Err(ValidationError::MissingSeller);
    }

    if draft.selected_item(catalog).is_none() {
        return Err(ValidationError::NoProductSelected);
    }

    if draft.customer_name().trim().is_empty() {
        return Err(ValidationError::MissingCustomerName);
    }

    let tax_id = draft.customer_tax_id();
    if !tax_id.is_empty() && tax_id.digits().len() != 11 {
        return Err(ValidationError::InvalidTaxId);
    }

    let phone = draft.customer_phone();
    if !phone.is_empty() && !matches!(phone.digits().len(), 10 | 11) {
        return Err(ValidationError::InvalidPhone);
    }

    let Some(method) = draft.payment_method() else {
        return Err(ValidationError::MissingPaymentMethod);
    };

    if method.is_cash() && totals.net_total().to_minor_units() > 0 {
        let Some(tendered) = totals.amount_tendered() else {
            return Err(ValidationError::MissingTenderedAmount);
        };

        if tendered.to_minor_units() < totals.net_total().to_minor_units() {
            return Err(ValidationError::InsufficientTenderedAmount);
        }
    }

    let standard_ceiling = Role::Standard.discount_ceiling();
    if totals.discount_applied() > Decimal::ZERO
        && !role.is_administrative()
        && totals.discount_applied() > standard_ceiling
    {
        return Err(ValidationError::DiscountAboveCeiling {
            applied: totals.discount_applied(),
            ceiling: standard_ceiling,
        });
    }

    Ok(())
}

/// Whether the draft would pass validation and has a resolvable selection.
pub fn is_submittable(
    draft: &SaleDraft,
    catalog: &Catalog<'_>,
    role: Role,
    totals: &Totals<'_>,
) -> bool {
    validate(draft, catalog, role, totals).is_ok() && draft.selected_item(catalog).is_some()
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::{Money, iso};
    use testresult::TestResult;

    use crate::{
        catalog::CatalogItem,
        payment::PaymentMethod,
        session::SessionContext,
    };

    use super::*;

    fn catalog() -> Result<Catalog<'static>, crate::catalog::CatalogError> {
        Catalog::with_items(
            vec![CatalogItem {
                id: "SOF-001".to_string(),
                model: "Sofá Chesterfield".to_string(),
                category: Some("Sofás".to_string()),
                price: Money::from_minor(100_000, iso::BRL),
                status: "AVAILABLE".to_string(),
            }],
            iso::BRL,
        )
    }

    fn valid_draft(catalog: &Catalog<'_>) -> SaleDraft {
        let session = SessionContext::new(Role::Standard, Some("vera".to_string()));
        let mut draft = SaleDraft::new(&session);

        draft.select_product(catalog, "SOF-001");
        draft.set_customer_name("Cliente");
        draft.set_payment_method(PaymentMethod::Pix);

        draft
    }

    fn check(draft: &SaleDraft, catalog: &Catalog<'_>) -> Result<(), ValidationError> {
        match draft.totals(catalog, Role::Standard) {
            Ok(totals) => validate(draft, catalog, Role::Standard, &totals),
            Err(err) => panic!("totals derivation failed: {err}"),
        }
    }

    #[test]
    fn valid_draft_passes() -> TestResult {
        let catalog = catalog()?;
        let draft = valid_draft(&catalog);

        assert_eq!(check(&draft, &catalog), Ok(()));

        Ok(())
    }

    #[test]
    fn missing_seller_fails_first() -> TestResult {
        let catalog = catalog()?;
        let session = SessionContext::new(Role::Standard, None);
        let draft = SaleDraft::new(&session);

        // Everything is missing; the seller rule runs first.
        assert_eq!(check(&draft, &catalog), Err(ValidationError::MissingSeller));

        Ok(())
    }

    #[test]
    fn missing_product_surfaces_stock_message() -> TestResult {
        let catalog = catalog()?;
        let mut draft = valid_draft(&catalog);
        draft.select_product(&catalog, "gone");

        let err = check(&draft, &catalog);

        assert_eq!(err, Err(ValidationError::NoProductSelected));
        assert_eq!(
            ValidationError::NoProductSelected.to_string(),
            "Select an item from stock to continue."
        );

        Ok(())
    }

    #[test]
    fn blank_customer_name_fails() -> TestResult {
        let catalog = catalog()?;
        let mut draft = valid_draft(&catalog);
        draft.set_customer_name("   ");

        assert_eq!(
            check(&draft, &catalog),
            Err(ValidationError::MissingCustomerName)
        );

        Ok(())
    }

    #[test]
    fn short_tax_id_fails_but_empty_is_allowed() -> TestResult {
        let catalog = catalog()?;
        let mut draft = valid_draft(&catalog);

        draft.set_customer_tax_id("123456");
        assert_eq!(check(&draft, &catalog), Err(ValidationError::InvalidTaxId));

        draft.set_customer_tax_id("");
        assert_eq!(check(&draft, &catalog), Ok(()));

        draft.set_customer_tax_id("12345678901");
        assert_eq!(check(&draft, &catalog), Ok(()));

        Ok(())
    }

    #[test]
    fn phone_must_have_ten_or_eleven_digits() -> TestResult {
        let catalog = catalog()?;
        let mut draft = valid_draft(&catalog);

        draft.set_customer_phone("119");
        assert_eq!(check(&draft, &catalog), Err(ValidationError::InvalidPhone));

        draft.set_customer_phone("1133334444");
        assert_eq!(check(&draft, &catalog), Ok(()));

        draft.set_customer_phone("11912345678");
        assert_eq!(check(&draft, &catalog), Ok(()));

        Ok(())
    }

    #[test]
    fn cash_requires_covering_tendered_amount() -> TestResult {
        let catalog = catalog()?;
        let mut draft = valid_draft(&catalog);
        draft.set_payment_method(PaymentMethod::Cash);

        assert_eq!(
            check(&draft, &catalog),
            Err(ValidationError::MissingTenderedAmount)
        );

        draft.set_amount_tendered("500");
        assert_eq!(
            check(&draft, &catalog),
            Err(ValidationError::InsufficientTenderedAmount)
        );

        draft.set_amount_tendered("1000");
        assert_eq!(check(&draft, &catalog), Ok(()));

        Ok(())
    }

    #[test]
    fn clamped_discount_never_trips_ceiling_rule() -> TestResult {
        let catalog = catalog()?;
        let mut draft = valid_draft(&catalog);
        draft.set_discount_percent(50.0);

        // The clamp caps at the ceiling first, so rule 8 stays unreachable.
        let totals = draft.totals(&catalog, Role::Standard)?;
        assert_eq!(totals.discount_applied(), Decimal::from(10));
        assert_eq!(validate(&draft, &catalog, Role::Standard, &totals), Ok(()));

        Ok(())
    }

    #[test]
    fn submittable_requires_passing_validation_and_selection() -> TestResult {
        let catalog = catalog()?;
        let draft = valid_draft(&catalog);
        let totals = draft.totals(&catalog, Role::Standard)?;

        assert!(is_submittable(&draft, &catalog, Role::Standard, &totals));

        let session = SessionContext::new(Role::Standard, Some("vera".to_string()));
        let unselected = SaleDraft::new(&session);
        let totals = unselected.totals(&catalog, Role::Standard)?;

        assert!(!is_submittable(&unselected, &catalog, Role::Standard, &totals));

        Ok(())
    }
}
