//! Sale record
//!
//! The immutable snapshot emitted on successful submission. Ownership passes
//! to the finalize collaborator; the checkout keeps no reference afterwards.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    catalog::CatalogItem,
    draft::SaleDraft,
    payment::{Installments, PaymentMethod},
    session::Role,
    totals::Totals,
};

/// Status literal carried by every emitted record until the server assigns
/// its own.
pub const FINALIZED: &str = "FINALIZED";

/// A finalized sale, ready for the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaleRecord {
    seller: String,
    product_id: String,
    customer_name: String,
    customer_tax_id: String,
    customer_phone: String,
    payment_method: PaymentMethod,
    installments: Installments,
    discount_percent: Decimal,
    base_price: Decimal,
    discount_value: Decimal,
    net_total: Decimal,
    amount_tendered: Decimal,
    change_due: Decimal,
    notes: String,
    status: String,
    role: Role,
    finalized_at: DateTime<Utc>,
}

impl SaleRecord {
    /// Snapshot a validated draft into a record.
    ///
    /// The caller guarantees the draft passed validation: `item` is the
    /// resolved selection and `method` is the chosen payment method. Non-card
    /// methods force installments to `1x`; non-cash methods carry the net
    /// total as the tendered amount and zero change.
    pub fn from_parts(
        draft: &SaleDraft,
        item: &CatalogItem<'_>,
        method: PaymentMethod,
        totals: &Totals<'_>,
        role: Role,
        finalized_at: DateTime<Utc>,
    ) -> Self {
        let net_total = *totals.net_total().amount();

        let (amount_tendered, change_due) = if method.is_cash() {
            let tendered = totals
                .amount_tendered()
                .map_or(Decimal::ZERO, |money| *money.amount());

            (tendered, *totals.change_due().amount())
        } else {
            (net_total, Decimal::ZERO)
        };

        let installments = if method.is_card() {
            draft.installments()
        } else {
            Installments::ONE
        };

        Self {
            seller: draft.seller().to_string(),
            product_id: item.id.clone(),
            customer_name: draft.customer_name().to_string(),
            customer_tax_id: draft.customer_tax_id().digits().to_string(),
            customer_phone: draft.customer_phone().digits().to_string(),
            payment_method: method,
            installments,
            discount_percent: totals.discount_applied(),
            base_price: *totals.base_price().amount(),
            discount_value: *totals.discount_value().amount(),
            net_total,
            amount_tendered,
            change_due,
            notes: draft.notes().to_string(),
            status: FINALIZED.to_string(),
            role,
            finalized_at,
        }
    }

    /// The seller responsible for the sale.
    pub fn seller(&self) -> &str {
        &self.seller
    }

    /// The sold item's id.
    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    /// The customer name.
    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    /// The customer tax id, digit-only.
    pub fn customer_tax_id(&self) -> &str {
        &self.customer_tax_id
    }

    /// The customer phone, digit-only.
    pub fn customer_phone(&self) -> &str {
        &self.customer_phone
    }

    /// The payment method.
    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    /// The installment count; `1x` for non-card methods.
    pub fn installments(&self) -> Installments {
        self.installments
    }

    /// The applied discount, in percent points, after the ceiling clamp.
    pub fn discount_percent(&self) -> Decimal {
        self.discount_percent
    }

    /// The item price before discount.
    pub fn base_price(&self) -> Decimal {
        self.base_price
    }

    /// The monetary value of the applied discount.
    pub fn discount_value(&self) -> Decimal {
        self.discount_value
    }

    /// The price after discount.
    pub fn net_total(&self) -> Decimal {
        self.net_total
    }

    /// The tendered amount for cash; the net total for other methods.
    pub fn amount_tendered(&self) -> Decimal {
        self.amount_tendered
    }

    /// The change owed for cash; zero for other methods.
    pub fn change_due(&self) -> Decimal {
        self.change_due
    }

    /// Free-text notes.
    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// The pending-server status literal, always [`FINALIZED`].
    pub fn status(&self) -> &str {
        &self.status
    }

    /// The acting role at submission time.
    pub fn role(&self) -> Role {
        self.role
    }

    /// When the record was built.
    pub fn finalized_at(&self) -> DateTime<Utc> {
        self.finalized_at
    }
}
