//! Conversion Comprehensive Test Suite
//!
//! End-to-end coverage of the public `valbridge` facade: write a host
//! object, read it back, and check the shape the host receives.
//!
//! ## Modules
//!
//! - `records`: record assembly, metadata and disassembly
//! - `keys`: key resolution and key rendering
//! - `admin`: privileges, roles, users, UDF listings
//! - `cdt`: context paths and index arguments
//! - `operations`: single-bin operation values and bin names
//! - `config`: configuration-driven converter behavior
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test conversion_comprehensive
//! cargo test --test conversion_comprehensive records::
//! ```

mod common;

mod admin;
mod cdt;
mod config;
mod keys;
mod operations;
mod records;
