//! A2UI Protocol Implementation
//!
//! A2UI (Agent-to-UI) is a declarative JSON protocol for AI agents to describe
//! interactive UIs. This module keeps the per-surface state a renderer needs
//! and resolves it into trees it can draw, without depending on any toolkit.
//!
//! # Architecture
//!
//! ```text
//! A2UI JSON Messages
//!        ↓
//! A2uiMessageProcessor ──→ SubscriptionHub ──→ listeners (surface id)
//!        ↓
//! SurfaceRegistry
//!        ↓
//! ┌──────┴──────┐
//! │             │
//! DataModel   Component nodes
//!    │             │
//!    └──────┬──────┘
//!           ↓
//!     build_tree ──→ ComponentTree ──→ host renderer (ComponentRegistry)
//!                                             ↓
//!                                  dispatch ──→ UserAction
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use a2ui_kit::a2ui::*;
//!
//! let mut processor = A2uiMessageProcessor::default();
//! let outcome = processor.process_json(json)?;
//! for rejected in &outcome.rejected {
//!     eprintln!("message {} skipped: {}", rejected.index, rejected.error);
//! }
//! let tree = processor.get_component_tree("main");
//! ```

mod action;
mod config;
mod data_model;
mod error;
mod message;
mod node;
mod processor;
mod registry;
mod subscription;
mod surface;
mod tree;
mod value;

pub use action::*;
pub use config::*;
pub use data_model::*;
pub use error::*;
pub use message::*;
pub use node::*;
pub use processor::*;
pub use registry::*;
pub use subscription::*;
pub use surface::*;
pub use tree::*;
pub use value::*;
