//! Body-shop job ledger: estimate pricing, receivables, storage accrual, and
//! lien-risk workflows for collision repair shops.
//!
//! The calculation engine is pure and synchronous; persistence and delivery
//! surfaces integrate through the repository seam in
//! [`workflows::jobs::repository`].

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
