//! Sale draft
//!
//! The mutable in-progress sale. Each checkout instance owns exactly one
//! draft; all mutation funnels through these setters, and every derived value
//! is recomputed from the current field state.

use std::str::FromStr;

use rust_decimal::Decimal;
use rusty_money::Money;

use crate::{
    catalog::{Catalog, CatalogItem},
    masks::MaskedInput,
    payment::{Installments, PaymentMethod},
    session::{Role, SessionContext},
    totals::{self, Totals, TotalsError},
};

/// The in-progress sale being assembled at the counter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaleDraft {
    seller: String,
    seller_locked: bool,
    product_id: Option<String>,
    customer_name: String,
    customer_tax_id: MaskedInput,
    customer_phone: MaskedInput,
    payment_method: Option<PaymentMethod>,
    installments: Installments,
    discount_percent: Decimal,
    amount_tendered: String,
    notes: String,
}

impl SaleDraft {
    /// Create a draft for the given session.
    ///
    /// For non-administrative sessions with a logged-in user, the seller field
    /// is seeded from the session and locked; administrative sessions pick the
    /// seller from a roster instead.
    pub fn new(session: &SessionContext) -> Self {
        let mut draft = Self::default();

        if !session.role().is_administrative()
            && let Some(user) = session.user()
        {
            draft.seller = user.to_string();
            draft.seller_locked = true;
        }

        draft
    }

    /// The seller responsible for the sale.
    pub fn seller(&self) -> &str {
        &self.seller
    }

    /// Whether the seller field was seeded from the session and locked.
    pub fn seller_locked(&self) -> bool {
        self.seller_locked
    }

    /// Set the seller. Ignored when the field is locked to the session user.
    pub fn set_seller(&mut self, seller: &str) {
        if !self.seller_locked {
            self.seller = seller.to_string();
        }
    }

    /// The selected item id, if any.
    pub fn product_id(&self) -> Option<&str> {
        self.product_id.as_deref()
    }

    /// Select a product by id.
    ///
    /// Ids that do not resolve to an available catalog item leave the
    /// selection unset; the absence is caught by validation, not here.
    pub fn select_product(&mut self, catalog: &Catalog<'_>, id: &str) {
        self.product_id = catalog.get(id).map(|item| item.id.clone());
    }

    /// Resolve the selected item against the catalog.
    pub fn selected_item<'c, 'a>(&self, catalog: &'c Catalog<'a>) -> Option<&'c CatalogItem<'a>> {
        self.product_id.as_deref().and_then(|id| catalog.get(id))
    }

    /// The customer name as entered.
    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    /// Set the customer name.
    pub fn set_customer_name(&mut self, name: &str) {
        self.customer_name = name.to_string();
    }

    /// The customer tax id, masked for display with a digit-only form for
    /// validation.
    pub fn customer_tax_id(&self) -> &MaskedInput {
        &self.customer_tax_id
    }

    /// Set the customer tax id, re-applying the CPF mask.
    pub fn set_customer_tax_id(&mut self, raw: &str) {
        self.customer_tax_id = MaskedInput::tax_id(raw);
    }

    /// The customer phone, masked for display with a digit-only form for
    /// validation.
    pub fn customer_phone(&self) -> &MaskedInput {
        &self.customer_phone
    }

    /// Set the customer phone, re-applying the phone mask.
    pub fn set_customer_phone(&mut self, raw: &str) {
        self.customer_phone = MaskedInput::phone(raw);
    }

    /// The selected payment method, if any.
    pub fn payment_method(&self) -> Option<PaymentMethod> {
        self.payment_method
    }

    /// Select a payment method.
    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.payment_method = Some(method);
    }

    /// The installment count. Only meaningful for card methods; switching
    /// away from a card does not clear it, the record build forces `1x`.
    pub fn installments(&self) -> Installments {
        self.installments
    }

    /// Set the installment count.
    pub fn set_installments(&mut self, installments: Installments) {
        self.installments = installments;
    }

    /// The entered discount, in percent points, after entry normalization.
    ///
    /// This is the uncapped display value; the role ceiling clamp happens in
    /// the derived totals so the UI can flag capping separately.
    pub fn discount_percent(&self) -> Decimal {
        self.discount_percent
    }

    /// Set the discount percentage. Negative or non-finite input coerces to
    /// zero.
    pub fn set_discount_percent(&mut self, raw: f64) {
        self.discount_percent = Decimal::from_f64_retain(raw)
            .filter(|points| !points.is_sign_negative())
            .unwrap_or(Decimal::ZERO);
    }

    /// The raw tendered-amount text.
    pub fn amount_tendered(&self) -> &str {
        &self.amount_tendered
    }

    /// Set the tendered-amount text. Only relevant for cash payments.
    pub fn set_amount_tendered(&mut self, raw: &str) {
        self.amount_tendered = raw.to_string();
    }

    /// The tendered amount parsed as a decimal, when the text is numeric.
    pub fn tendered_amount(&self) -> Option<Decimal> {
        let trimmed = self.amount_tendered.trim();

        if trimmed.is_empty() {
            return None;
        }

        Decimal::from_str(trimmed).ok()
    }

    /// Free-text notes.
    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Set the free-text notes.
    pub fn set_notes(&mut self, notes: &str) {
        self.notes = notes.to_string();
    }

    /// Derive the financial totals for the current draft state.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalsError`] if a percent or amount conversion cannot be
    /// represented in minor units.
    pub fn totals<'a>(
        &self,
        catalog: &Catalog<'a>,
        role: Role,
    ) -> Result<Totals<'a>, TotalsError> {
        let base_price = self
            .selected_item(catalog)
            .map_or_else(|| Money::from_minor(0, catalog.currency()), |item| item.price);

        totals::compute(
            base_price,
            self.discount_percent,
            role.discount_ceiling(),
            self.payment_method,
            self.tendered_amount(),
        )
    }
}
