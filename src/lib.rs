//! tlsconf: layered SSL/TLS configuration
//!
//! A library for resolving declarative SSL settings into immutable
//! configurations: which identity to present, which peers to trust, and
//! which ciphers, protocols, client authentication and verification policy
//! to use. Named contexts layer over a global configuration and share its
//! key and trust material.

pub mod certs;
pub mod config;
pub mod secret;
pub mod tls;
