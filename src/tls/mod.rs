//! Resolved SSL configuration model.
//!
//! This module provides:
//! - The resolved configuration ([`SslConfiguration`])
//! - Identity and trust material ([`KeyConfig`], [`TrustConfig`])
//! - Verification and client authentication policies ([`VerificationMode`], [`ClientAuth`])
//! - Trust restrictions loaded from a subject allow-list ([`TrustRestrictions`])
//! - A global configuration plus named contexts ([`SslContexts`])

mod configuration;
mod contexts;
pub mod environment;
pub mod key;
mod mode;
pub mod restrictions;
pub mod trust;

pub use configuration::SslConfiguration;
pub use contexts::{GLOBAL_CONTEXT, SslContexts};
pub use environment::Environment;
pub use key::{KeyConfig, PemKeyConfig, StoreKeyConfig};
pub use mode::{ClientAuth, VerificationMode};
pub use restrictions::TrustRestrictions;
pub use trust::{
    DerivedTrust, PemTrustConfig, RestrictedTrustConfig, StoreTrustConfig, TrustConfig,
};
