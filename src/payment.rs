//! Payment methods
//!
//! The fixed set of payment methods offered at the counter, with the
//! Portuguese labels the portal displays, plus the installment count used by
//! card payments.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while parsing payment input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
    /// The label did not match any offered payment method.
    #[error("unknown payment method: {0}")]
    UnknownMethod(String),

    /// The installment count was outside `1..=12` or not of the form `Nx`.
    #[error("invalid installment count: {0}")]
    InvalidInstallments(String),
}

/// A payment method offered at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Generic card payment.
    Card,

    /// Credit card payment.
    CreditCard,

    /// Debit card payment.
    DebitCard,

    /// PIX instant transfer.
    Pix,

    /// Cash payment; the only method with a tendered amount and change.
    Cash,

    /// Bank slip ("boleto") payment.
    BankSlip,
}

impl PaymentMethod {
    /// Every offered payment method, in display order.
    pub const ALL: [Self; 6] = [
        Self::Card,
        Self::CreditCard,
        Self::DebitCard,
        Self::Pix,
        Self::Cash,
        Self::BankSlip,
    ];

    /// The label shown on the payment selector.
    pub fn label(self) -> &'static str {
        match self {
            Self::Card => "Cartão",
            Self::CreditCard => "Cartão de Crédito",
            Self::DebitCard => "Cartão de Débito",
            Self::Pix => "PIX",
            Self::Cash => "Dinheiro",
            Self::BankSlip => "Boleto",
        }
    }

    /// Whether this is a card variant, which exposes installments.
    pub fn is_card(self) -> bool {
        matches!(self, Self::Card | Self::CreditCard | Self::DebitCard)
    }

    /// Whether this is a cash payment, which tracks tendered amount and
    /// change.
    pub fn is_cash(self) -> bool {
        matches!(self, Self::Cash)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PaymentMethod {
    type Err = PaymentError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        let normalized = label.trim().to_lowercase();

        Self::ALL
            .into_iter()
            .find(|method| method.label().to_lowercase() == normalized)
            .ok_or_else(|| PaymentError::UnknownMethod(label.to_string()))
    }
}

/// Number of installments for a card payment, rendered `1x`..`12x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Installments(u8);

impl Installments {
    /// A single installment, the default and the value forced onto records
    /// paid by non-card methods.
    pub const ONE: Self = Self(1);

    /// Create an installment count.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentError::InvalidInstallments`] when `count` is outside
    /// `1..=12`.
    pub fn new(count: u8) -> Result<Self, PaymentError> {
        if (1..=12).contains(&count) {
            Ok(Self(count))
        } else {
            Err(PaymentError::InvalidInstallments(count.to_string()))
        }
    }

    /// The installment count.
    pub fn count(self) -> u8 {
        self.0
    }
}

impl Default for Installments {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Installments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.0)
    }
}

impl FromStr for Installments {
    type Err = PaymentError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let count = trimmed
            .strip_suffix(['x', 'X'])
            .unwrap_or(trimmed)
            .parse::<u8>()
            .map_err(|_parse| PaymentError::InvalidInstallments(input.to_string()))?;

        Self::new(count).map_err(|_range| PaymentError::InvalidInstallments(input.to_string()))
    }
}
