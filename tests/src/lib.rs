//! # StackForum Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # Cross-subsystem choreography
//!     ├── scenarios.rs    # End-to-end vote/accept/notify flows
//!     ├── concurrency.rs  # Parallel toggle and reputation storms
//!     └── push_flows.rs   # Mailbox and room delivery
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p forum-tests
//!
//! # By category
//! cargo test -p forum-tests integration::
//! ```

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod integration;
