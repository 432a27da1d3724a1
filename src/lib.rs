//! Balcão
//!
//! Balcão is the checkout and catalog engine behind a furniture retailer's
//! point-of-sale: free-text catalog filtering, the mutable sale draft with
//! deterministically derived totals, ordered validation with role-based
//! discount ceilings, and the finalized sale record handed to the host for
//! persistence. Pure library, no I/O: transport, storage, and rendering live
//! on the host side of the [`checkout::CheckoutHost`] seam.

pub mod catalog;
pub mod checkout;
pub mod draft;
pub mod fixtures;
pub mod masks;
pub mod payment;
pub mod prelude;
pub mod record;
pub mod session;
pub mod totals;
pub mod validate;
