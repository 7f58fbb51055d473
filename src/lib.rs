//! Shared primitives for the diabetes screening workstation.
//!
//! The interesting pieces live in the member crates: `logistic` evaluates the
//! pre-trained classifier, `cohort` reads the historical records and keeps the
//! screening history, and the `app` crate is the interactive form. This crate
//! re-exports the domain types they all share.

pub use glyco_helpers::{FEATURE_COUNT, FEATURES, FeatureField, Measurements, Outcome};
