//! Checkout
//!
//! The single owner of one in-progress sale: catalog snapshot, session
//! context, draft, and the two-state submit machine. All mutation happens
//! synchronously through this type, so concurrent edits cannot race; each
//! open checkout owns an independent draft.

use chrono::Utc;
use thiserror::Error;

use crate::{
    catalog::{self, Catalog, CatalogItem},
    draft::SaleDraft,
    payment::{Installments, PaymentMethod},
    record::SaleRecord,
    session::SessionContext,
    totals::{Totals, TotalsError},
    validate::{self, ValidationError},
};

/// Host-side collaborator invoked at the checkout boundary.
///
/// `finalize_sale` receives the record exactly once per successful
/// submission; persistence, retries, and timeouts are the host's concern.
/// `close` asks the host to unmount or hide the checkout.
pub trait CheckoutHost {
    /// Hand over a finalized sale for persistence.
    fn finalize_sale(&mut self, record: SaleRecord);

    /// Request that the checkout be closed.
    fn close(&mut self);
}

/// The submit state of a checkout instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutState {
    /// Accepting edits; the default state.
    Editable,

    /// A record was emitted; terminal for this instance unless the host
    /// reopens it after a persistence failure.
    Submitted,
}

/// Errors surfaced by checkout operations.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The draft failed a validation rule.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Totals derivation failed.
    #[error(transparent)]
    Totals(#[from] TotalsError),

    /// `submit` was called again after a record was already emitted.
    #[error("this sale was already submitted")]
    AlreadySubmitted,
}

/// One checkout modal instance.
#[derive(Debug)]
pub struct Checkout<'a> {
    catalog: Catalog<'a>,
    session: SessionContext,
    draft: SaleDraft,
    state: CheckoutState,
    error: Option<ValidationError>,
}

impl<'a> Checkout<'a> {
    /// Open a checkout over the given catalog snapshot and session.
    pub fn new(catalog: Catalog<'a>, session: SessionContext) -> Self {
        let draft = SaleDraft::new(&session);

        Self {
            catalog,
            session,
            draft,
            state: CheckoutState::Editable,
            error: None,
        }
    }

    /// The catalog snapshot this checkout sells from.
    pub fn catalog(&self) -> &Catalog<'a> {
        &self.catalog
    }

    /// The session supplied at construction.
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Read access to the draft.
    pub fn draft(&self) -> &SaleDraft {
        &self.draft
    }

    /// The current submit state.
    pub fn state(&self) -> CheckoutState {
        self.state
    }

    /// The validation error currently displayed, if any.
    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    /// Filter the catalog by a free-text query.
    pub fn filter<'c>(
        &'c self,
        query: &str,
    ) -> impl Iterator<Item = &'c CatalogItem<'a>> + use<'c, 'a> {
        catalog::filter(&self.catalog, query)
    }

    /// Set the seller; ignored when locked to the session user.
    pub fn set_seller(&mut self, seller: &str) {
        self.draft.set_seller(seller);
        self.error = None;
    }

    /// Select a product by id; unresolvable ids clear the selection.
    pub fn select_product(&mut self, id: &str) {
        self.draft.select_product(&self.catalog, id);
        self.error = None;
    }

    /// Set the customer name.
    pub fn set_customer_name(&mut self, name: &str) {
        self.draft.set_customer_name(name);
        self.error = None;
    }

    /// Set the customer tax id, re-applying the CPF mask.
    pub fn set_customer_tax_id(&mut self, raw: &str) {
        self.draft.set_customer_tax_id(raw);
        self.error = None;
    }

    /// Set the customer phone, re-applying the phone mask.
    pub fn set_customer_phone(&mut self, raw: &str) {
        self.draft.set_customer_phone(raw);
        self.error = None;
    }

    /// Select a payment method.
    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.draft.set_payment_method(method);
        self.error = None;
    }

    /// Set the installment count for card payments.
    pub fn set_installments(&mut self, installments: Installments) {
        self.draft.set_installments(installments);
        self.error = None;
    }

    /// Set the discount percentage; invalid input coerces to zero.
    pub fn set_discount_percent(&mut self, raw: f64) {
        self.draft.set_discount_percent(raw);
        self.error = None;
    }

    /// Set the tendered-amount text for cash payments.
    pub fn set_amount_tendered(&mut self, raw: &str) {
        self.draft.set_amount_tendered(raw);
        self.error = None;
    }

    /// Set the free-text notes.
    pub fn set_notes(&mut self, notes: &str) {
        self.draft.set_notes(notes);
        self.error = None;
    }

    /// Derive the financial totals for the current draft state.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalsError`] if a percent or amount conversion cannot be
    /// represented in minor units.
    pub fn totals(&self) -> Result<Totals<'a>, TotalsError> {
        self.draft.totals(&self.catalog, self.session.role())
    }

    /// Whether the entered discount exceeds the role ceiling and is being
    /// capped. Informational; never blocks submission.
    pub fn discount_capped(&self) -> bool {
        self.totals().is_ok_and(|totals| totals.capped())
    }

    /// Whether the draft would pass validation right now.
    pub fn is_submittable(&self) -> bool {
        self.totals().is_ok_and(|totals| {
            validate::is_submittable(&self.draft, &self.catalog, self.session.role(), &totals)
        })
    }

    /// Re-validate and, on success, emit the finalized record to the host and
    /// request closure.
    ///
    /// On a validation failure the error is stored for display and no state
    /// transition happens; the draft stays editable.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::AlreadySubmitted`] after a successful submit,
    /// a [`ValidationError`] when a rule fails, or a [`TotalsError`] when
    /// derivation fails.
    pub fn submit(&mut self, host: &mut dyn CheckoutHost) -> Result<(), CheckoutError> {
        if self.state == CheckoutState::Submitted {
            return Err(CheckoutError::AlreadySubmitted);
        }

        let role = self.session.role();
        let totals = self.draft.totals(&self.catalog, role)?;

        if let Err(err) = validate::validate(&self.draft, &self.catalog, role, &totals) {
            self.error = Some(err.clone());
            return Err(err.into());
        }

        // Validation guarantees both the selection and the method resolve.
        let Some(item) = self.draft.selected_item(&self.catalog) else {
            return Err(ValidationError::NoProductSelected.into());
        };
        let Some(method) = self.draft.payment_method() else {
            return Err(ValidationError::MissingPaymentMethod.into());
        };

        let record = SaleRecord::from_parts(&self.draft, item, method, &totals, role, Utc::now());

        self.state = CheckoutState::Submitted;
        self.error = None;

        host.finalize_sale(record);
        host.close();

        Ok(())
    }

    /// Discard any displayed error and ask the host to close; nothing is
    /// persisted.
    pub fn cancel(&mut self, host: &mut dyn CheckoutHost) {
        self.error = None;
        host.close();
    }

    /// Return a submitted checkout to the editable state with the draft
    /// intact, for hosts whose persistence call failed after submission.
    pub fn reopen(&mut self) {
        self.state = CheckoutState::Editable;
    }
}
