//! Derived totals
//!
//! The financial fields derived from the sale draft. Nothing here is stored:
//! every value is recomputed from (draft, catalog, role) on each call, so the
//! invariants hold regardless of edit order. Percent application happens on
//! minor units with midpoint-away-from-zero rounding.

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::payment::PaymentMethod;

/// Errors specific to totals derivation.
#[derive(Debug, Error)]
pub enum TotalsError {
    /// Percentage calculation could not be safely converted to minor units.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,

    /// A decimal amount could not be represented in minor units.
    #[error("amount conversion overflowed")]
    AmountConversion,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Derived financial fields for the current draft state.
#[derive(Debug, Clone, PartialEq)]
pub struct Totals<'a> {
    base_price: Money<'a, Currency>,
    discount_applied: Decimal,
    discount_value: Money<'a, Currency>,
    net_total: Money<'a, Currency>,
    amount_tendered: Option<Money<'a, Currency>>,
    change_due: Money<'a, Currency>,
    capped: bool,
}

impl<'a> Totals<'a> {
    /// The selected item's price, or zero when nothing is selected.
    pub fn base_price(&self) -> Money<'a, Currency> {
        self.base_price
    }

    /// The discount actually applied, in percent points, after the role
    /// ceiling clamp. Never negative, never above the ceiling.
    pub fn discount_applied(&self) -> Decimal {
        self.discount_applied
    }

    /// The monetary value of the applied discount.
    pub fn discount_value(&self) -> Money<'a, Currency> {
        self.discount_value
    }

    /// The price after discount, floored at zero.
    pub fn net_total(&self) -> Money<'a, Currency> {
        self.net_total
    }

    /// The tendered amount, parsed, for cash payments.
    pub fn amount_tendered(&self) -> Option<Money<'a, Currency>> {
        self.amount_tendered
    }

    /// Change owed to the customer for cash payments, floored at zero; zero
    /// for every other payment method.
    pub fn change_due(&self) -> Money<'a, Currency> {
        self.change_due
    }

    /// Whether the entered discount exceeded the role ceiling and was capped.
    ///
    /// Informational, not a validation failure: the UI surfaces it as a hint.
    pub fn capped(&self) -> bool {
        self.capped
    }
}

/// Derive totals from the draft's raw figures.
///
/// `discount_percent` and `ceiling` are percent points. `tendered` is the
/// parsed tendered amount and only participates for cash payments.
///
/// # Errors
///
/// Returns an error if:
/// - a percentage calculation cannot be safely represented in minor units
///   (`TotalsError::PercentConversion`).
/// - the tendered amount cannot be represented in minor units
///   (`TotalsError::AmountConversion`).
pub fn compute<'a>(
    base_price: Money<'a, Currency>,
    discount_percent: Decimal,
    ceiling: Decimal,
    method: Option<PaymentMethod>,
    tendered: Option<Decimal>,
) -> Result<Totals<'a>, TotalsError> {
    let currency = base_price.currency();

    let entered = discount_percent.max(Decimal::ZERO);
    let capped = entered > ceiling;
    let discount_applied = entered.min(ceiling);

    let base_minor = base_price.to_minor_units();
    let discount_minor = percent_of_minor(discount_applied, base_minor)?;
    let net_minor = base_minor.saturating_sub(discount_minor).max(0);

    let is_cash = method.is_some_and(PaymentMethod::is_cash);
    let amount_tendered = match tendered {
        Some(amount) if is_cash => Some(money_from_decimal(amount, currency)?),
        _ => None,
    };

    let change_minor = amount_tendered
        .map(|money| money.to_minor_units().saturating_sub(net_minor).max(0))
        .unwrap_or_default();

    Ok(Totals {
        base_price,
        discount_applied,
        discount_value: Money::from_minor(discount_minor, currency),
        net_total: Money::from_minor(net_minor, currency),
        amount_tendered,
        change_due: Money::from_minor(change_minor, currency),
        capped,
    })
}

/// Convert a decimal major-unit amount into money, rounding half away from
/// zero at the currency's exponent.
///
/// # Errors
///
/// Returns [`TotalsError::AmountConversion`] if the amount cannot be
/// represented in minor units.
pub fn money_from_decimal(
    amount: Decimal,
    currency: &Currency,
) -> Result<Money<'_, Currency>, TotalsError> {
    let scale = 10_i64
        .checked_pow(currency.exponent)
        .ok_or(TotalsError::AmountConversion)?;

    let minor = amount
        .checked_mul(Decimal::from(scale))
        .ok_or(TotalsError::AmountConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(TotalsError::AmountConversion)?;

    Ok(Money::from_minor(minor, currency))
}

/// Calculate a percentage of a minor-unit amount, in minor units.
fn percent_of_minor(points: Decimal, minor: i64) -> Result<i64, TotalsError> {
    let rate = Percentage::from(points / Decimal::ONE_HUNDRED);

    let applied = rate * Decimal::from(minor);

    let rounded = applied.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    rounded.to_i64().ok_or(TotalsError::PercentConversion)
}
