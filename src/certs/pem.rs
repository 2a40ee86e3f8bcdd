//! PEM file reading and X.509 metadata extraction.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use x509_parser::certificate::X509Certificate;

use super::{CertificateError, CertificateMetadata};

/// Reads every certificate in a PEM file, as DER.
///
/// Non-certificate sections (keys, parameters) are skipped.
pub fn read_certificates(path: &Path) -> Result<Vec<Vec<u8>>, CertificateError> {
    let file = File::open(path).map_err(|e| CertificateError::read(path, e))?;
    let mut reader = BufReader::new(file);

    rustls_pemfile::certs(&mut reader)
        .map(|cert| {
            cert.map(|der| der.as_ref().to_vec())
                .map_err(|e| decode_error(path, e))
        })
        .collect()
}

// Malformed PEM content surfaces as `InvalidData`; anything else is I/O.
fn decode_error(path: &Path, e: io::Error) -> CertificateError {
    if e.kind() == io::ErrorKind::InvalidData {
        CertificateError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
    } else {
        CertificateError::read(path, e)
    }
}

/// Where a DER certificate came from, for reporting.
pub struct Origin<'a> {
    pub path: &'a Path,
    pub format: &'a str,
    pub alias: Option<&'a str>,
    pub has_private_key: bool,
}

/// Decodes a DER certificate into its metadata record.
pub fn describe(origin: &Origin<'_>, der: &[u8]) -> Result<CertificateMetadata, CertificateError> {
    let (_, cert) = x509_parser::parse_x509_certificate(der).map_err(|e| CertificateError::Parse {
        path: origin.path.to_path_buf(),
        reason: e.to_string(),
    })?;

    Ok(metadata(origin, &cert))
}

fn metadata(origin: &Origin<'_>, cert: &X509Certificate<'_>) -> CertificateMetadata {
    let serial_number = cert
        .tbs_certificate
        .raw_serial()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect();
    let validity = cert.validity();

    CertificateMetadata {
        path: origin.path.to_path_buf(),
        format: origin.format.to_string(),
        alias: origin.alias.map(ToString::to_string),
        has_private_key: origin.has_private_key,
        subject_dn: cert.subject().to_string(),
        issuer_dn: cert.issuer().to_string(),
        serial_number,
        not_before: validity.not_before.to_datetime(),
        not_after: validity.not_after.to_datetime(),
    }
}
