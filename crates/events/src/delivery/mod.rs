//! Outbound delivery of new-lead notifications.
//!
//! [`email`] talks SMTP directly; [`notification`] renders the message and
//! defines the [`notification::Notifier`] seam the intake flow calls.

pub mod email;
pub mod notification;
