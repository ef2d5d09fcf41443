//! API layer - HTTP transport and authentication state
//!
//! Everything here is independent of what gets seeded; the `core` module
//! decides which calls to make.

/// reqwest-backed client, request credentials and raw responses
pub mod client;
/// Per-account bearer token cache
pub mod session;

pub use client::{ApiClient, ApiResponse, Auth};
pub use session::Session;
