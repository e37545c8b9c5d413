//! Domain layer containing the qualification flow and its types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (validation errors, state machine trait)
//! - `catalog` - Static service definitions: questions and detection keywords
//! - `dialogue` - Context codec, intent routing, flow engine, fallback recovery
//! - `lead` - Completed prospect record and its validation

pub mod catalog;
pub mod dialogue;
pub mod foundation;
pub mod lead;
