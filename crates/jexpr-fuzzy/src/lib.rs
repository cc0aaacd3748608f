//! Name matching primitives used for completion ranking.
//!
//! Matching is ASCII case-insensitive: inputs are treated as raw UTF-8 bytes and only
//! `A-Z`/`a-z` are folded; any non-ASCII bytes must match exactly. Java identifiers in practice
//! are ASCII, and keeping the comparison byte based makes ranking deterministic.
//!
//! [`rate_name`] classifies a candidate against the text the user typed into one of the
//! [`NameMatch`] tiers. The tiers are ordered best first, so sorting ascending puts the best
//! matches on top.

#![forbid(unsafe_code)]

mod scoring;

pub use scoring::{camel_hump_match, rate_name, NameMatch};
