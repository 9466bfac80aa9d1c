//! # tdah-core
//!
//! Core types and error types for SMART-TDAH.
//!
//! This crate provides the foundational types shared across all SMART-TDAH crates:
//! - Entity structs for students, principals, exercise records, and ownership links
//! - `Role` and `FilterField` enums with their wire and SQL representations
//! - Directory paging rules (`DirectoryQuery`, `total_pages`)
//! - Cross-cutting error types
//! - HTTP response bodies shared between the server and its tests

pub mod entities;
pub mod enums;
pub mod errors;
pub mod paging;
pub mod responses;
