//! Session context
//!
//! The acting role and optional logged-in user, supplied once when the
//! checkout opens and read-only thereafter. An explicit value, not ambient
//! state: the host passes it in at construction.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The acting role of the current operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Standard sales staff; discount capped at 10%.
    Standard,

    /// Administrative staff; discount capped at 30%.
    Administrative,
}

impl Role {
    /// The highest discount, in percent points, this role may apply.
    pub fn discount_ceiling(self) -> Decimal {
        match self {
            Self::Standard => Decimal::from(10),
            Self::Administrative => Decimal::from(30),
        }
    }

    /// Whether this role has administrative privileges.
    pub fn is_administrative(self) -> bool {
        matches!(self, Self::Administrative)
    }
}

/// Session context supplied by the host when the checkout opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    role: Role,
    user: Option<String>,
}

impl SessionContext {
    /// Create a session context for the given role and optional logged-in
    /// user.
    pub fn new(role: Role, user: Option<String>) -> Self {
        Self { role, user }
    }

    /// The acting role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// The logged-in user identity, if any.
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }
}
