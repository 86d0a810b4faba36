//! Domain logic for the estate waitlist.
//!
//! Everything in this crate is pure: no I/O, no async. The store, the
//! notification channel and the HTTP surface live in the sibling crates and
//! call into these modules.

pub mod budget;
pub mod error;
pub mod export;
pub mod filter;
pub mod gazetteer;
pub mod html;
pub mod lead;
pub mod neighborhoods;
pub mod roles;
pub mod selector;
pub mod share;
pub mod stats;
pub mod status;
pub mod types;
pub mod validation;
