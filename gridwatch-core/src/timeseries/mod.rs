//! Time-series reconciliation and bucketing.
//!
//! Modules include:
//! - `axis`: candidate instants at which the reconciled signal can change
//! - `resolve`: per-unit step lookups and override precedence
//! - `aggregate`: sum resolved points across a unit set
//! - `bucket`: settlement-period energy into calendar buckets
//! - `downsample`: stride compression for previews
/// Time-axis construction.
pub mod axis;
/// Per-unit point resolution.
pub mod resolve;
/// Unit-set aggregation into reconciled samples.
pub mod aggregate;
/// Calendar bucketing of settlement energy.
pub mod bucket;
/// Stride downsampling.
pub mod downsample;
