//! Verification and client authentication policies.

use std::fmt;
use std::str::FromStr;

use crate::config::{ConfigError, setting};

/// How strictly a peer's certificate is verified.
///
/// Ordered by strictness: `None < Certificate < Full`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VerificationMode {
    /// No verification at all: any certificate is trusted.
    None,
    /// The certificate chain is verified, the hostname is not.
    Certificate,
    /// Both the certificate chain and the hostname are verified.
    Full,
}

impl VerificationMode {
    /// Returns true if the peer's hostname is checked against its certificate.
    #[must_use]
    pub const fn is_hostname_verification_enabled(self) -> bool {
        matches!(self, Self::Full)
    }

    /// Returns true if the peer's certificate chain is validated.
    #[must_use]
    pub const fn is_certificate_verification_enabled(self) -> bool {
        matches!(self, Self::Full | Self::Certificate)
    }
}

impl fmt::Display for VerificationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Certificate => write!(f, "certificate"),
            Self::Full => write!(f, "full"),
        }
    }
}

impl FromStr for VerificationMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "certificate" => Ok(Self::Certificate),
            "full" => Ok(Self::Full),
            _ => Err(ConfigError::InvalidValue {
                setting: setting::VERIFICATION_MODE,
                value: s.to_string(),
                expected: "one of: full, certificate, none",
            }),
        }
    }
}

/// Whether a server requests a certificate from its clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientAuth {
    /// Client certificates are not requested.
    None,
    /// Client certificates are requested but not required.
    Optional,
    /// Client certificates are required.
    Required,
}

impl ClientAuth {
    /// Returns true if a client certificate is requested at all.
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for ClientAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Optional => write!(f, "optional"),
            Self::Required => write!(f, "required"),
        }
    }
}

impl FromStr for ClientAuth {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "false" => Ok(Self::None),
            "optional" => Ok(Self::Optional),
            "required" | "true" => Ok(Self::Required),
            _ => Err(ConfigError::InvalidValue {
                setting: setting::CLIENT_AUTHENTICATION,
                value: s.to_string(),
                expected: "one of: none, optional, required",
            }),
        }
    }
}
