//! # Shared Types Crate
//!
//! This crate contains all domain entities shared across subsystems.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Explicit Identity**: Every operation takes the acting identity as a
//!   parameter; no subsystem reads identity from ambient/global context.
//! - **Weak References**: Notifications reference content by id only. Deleting
//!   the referenced content never cascades into notification records.

pub mod entities;
pub mod identity;
pub mod ids;
pub mod notifications;

pub use entities::*;
pub use identity::{Identity, Role};
pub use ids::*;
pub use notifications::*;
