//! Shared helpers for the runnable gridwatch demos.

pub mod common;
