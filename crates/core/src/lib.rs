//! Core business logic for Niwaki.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `inquiry` - Inquiry intake, photo attachment, and status workflow
//! - `storage` - Object storage adapter for photo bytes
//! - `estimate` - Price range estimation for garden services

pub mod estimate;
pub mod inquiry;
pub mod storage;
