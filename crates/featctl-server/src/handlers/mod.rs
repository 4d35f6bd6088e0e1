//! Form handlers.

pub mod toggle;
