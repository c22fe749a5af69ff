//! Modern Blog Reader backend: `WordPress` and Stripe glue for the site

#![deny(clippy::all)]

/// Upstream `WordPress` REST client
pub mod upstream;

/// Post queries on top of the upstream client
pub mod wordpress;

/// Page metadata generation
pub mod metadata;

/// Payment provider integration
pub mod payments;

/// Session token resolution
pub mod session;

/// Request middleware
pub mod middleware;

/// HTTP routes
pub mod routes;

/// Server setup
pub mod server;

/// Shared types: configuration, errors, extractors
pub mod types;
