//! Shared types, auth, and configuration for Niwaki.
//!
//! This crate provides common types used across all other crates:
//! - Application configuration management
//! - JWT claims and token validation
//! - List query parameters for admin endpoints

pub mod auth;
pub mod config;
pub mod jwt;
pub mod pagination;

pub use auth::Claims;
pub use config::AppConfig;
pub use jwt::{JwtConfig, JwtError, JwtService};
pub use pagination::ListQuery;
