//! # Description
//!
//! A2UI Kit is a Rust crate that keeps the state of agent-described user
//! interfaces in sync with the protocol messages an agent sends, independent
//! of the toolkit that finally draws them.
//!
//! # Features
//!
//! - Per-surface component nodes and JSON Pointer addressed data models.
//! - Literal-or-path bindings resolved into immutable component trees.
//! - Unknown component types degrade to a fallback instead of failing.
//! - Cycles, dangling references and runaway depth contained per subtree.
//! - Batch processing with per-message rejection and one notification per surface.
//! - User actions with resolved context, ready to send upstream.

pub mod a2ui;

pub mod prelude;
