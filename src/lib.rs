//! tickring - a clock service with a bounded history
//!
//! The heart of the crate is [`ring::RingList`], a circular doubly-linked
//! list with an optional capacity and an asymmetric eviction policy. Around
//! it sits a thin service layer:
//!
//! - **Clock**: time payloads for an IANA timezone, with analog hand angles
//! - **Commands**: `state`, `append`, `prepend`, `pop`, `popleft`, `clear`,
//!   `rotate`, `remove` translated into ring operations
//! - **Server**: an axum router with CORS, served on tokio
//!
//! # Quick Start
//!
//! ```
//! use tickring::ring::RingList;
//!
//! let mut history = RingList::new(Some(3)).unwrap();
//! for v in 1..=4 {
//!     history.append(v);
//! }
//! assert_eq!(history.to_list(false), vec![2, 3, 4]);
//! ```

// ─── Core ──────────────────────────────────────────────────────────
pub mod errors;
pub mod ring;

// ─── Service layer ─────────────────────────────────────────────────
pub mod cli;
pub mod clock;
pub mod commands;
pub mod config;
pub mod server;
pub mod telemetry;
