//! Unit tests for tickring modules
//!
//! These tests exercise the public API without network I/O.

mod test_commands;
mod test_config;
mod test_ring;
