//! GitHub webhook signature verification using HMAC.
//!
//! GitHub signs webhook payloads with a shared secret and sends two headers:
//!
//! - `X-Hub-Signature: sha1=<hex>` (HMAC-SHA1)
//! - `X-Hub-Signature-256: sha256=<hex>` (HMAC-SHA256)
//!
//! Both are supported. Signature verification is the first step in webhook
//! processing; invalid signatures are rejected before parsing.

use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::Sha256;

type HmacSha1 = Hmac<Sha1>;
type HmacSha256 = Hmac<Sha256>;

/// The HMAC algorithm a signature header was produced with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureAlgorithm {
    /// HMAC-SHA1, sent in `X-Hub-Signature`.
    Sha1,
    /// HMAC-SHA256, sent in `X-Hub-Signature-256`.
    Sha256,
}

impl SignatureAlgorithm {
    /// Returns the header value prefix, including the `=`.
    pub fn prefix(&self) -> &'static str {
        match self {
            SignatureAlgorithm::Sha1 => "sha1=",
            SignatureAlgorithm::Sha256 => "sha256=",
        }
    }

    /// Returns the header name GitHub uses for this algorithm (lowercase).
    pub fn header_name(&self) -> &'static str {
        match self {
            SignatureAlgorithm::Sha1 => "x-hub-signature",
            SignatureAlgorithm::Sha256 => "x-hub-signature-256",
        }
    }
}

/// Parses a GitHub signature header (e.g., "sha1=abc123...") into raw bytes.
///
/// Returns `None` for malformed headers (missing or wrong prefix, invalid hex).
/// Never panics.
///
/// # Examples
///
/// ```
/// use sink::webhooks::{SignatureAlgorithm, parse_signature_header};
///
/// assert!(parse_signature_header(SignatureAlgorithm::Sha1, "sha1=abcd1234").is_some());
///
/// // Missing prefix
/// assert!(parse_signature_header(SignatureAlgorithm::Sha1, "abcd1234").is_none());
///
/// // Wrong algorithm
/// assert!(parse_signature_header(SignatureAlgorithm::Sha1, "sha256=abcd1234").is_none());
///
/// // Bad hex
/// assert!(parse_signature_header(SignatureAlgorithm::Sha1, "sha1=xyz").is_none());
/// ```
pub fn parse_signature_header(algorithm: SignatureAlgorithm, header: &str) -> Option<Vec<u8>> {
    let hex_sig = header.strip_prefix(algorithm.prefix())?;
    hex::decode(hex_sig).ok()
}

/// Computes the HMAC signature of a payload using the given secret.
///
/// Used by tests and tooling to produce expected signatures.
pub fn compute_signature(algorithm: SignatureAlgorithm, payload: &[u8], secret: &[u8]) -> Vec<u8> {
    match algorithm {
        SignatureAlgorithm::Sha1 => {
            let mut mac = HmacSha1::new_from_slice(secret).expect("HMAC can take key of any size");
            mac.update(payload);
            mac.finalize().into_bytes().to_vec()
        }
        SignatureAlgorithm::Sha256 => {
            let mut mac =
                HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
            mac.update(payload);
            mac.finalize().into_bytes().to_vec()
        }
    }
}

/// Formats a signature as a GitHub-style header value (`sha1=<hex>` or `sha256=<hex>`).
pub fn format_signature_header(algorithm: SignatureAlgorithm, signature: &[u8]) -> String {
    format!("{}{}", algorithm.prefix(), hex::encode(signature))
}

/// Verifies a GitHub webhook signature against the payload and secret.
///
/// Returns `true` if the signature is valid, `false` otherwise.
/// Uses constant-time comparison to prevent timing attacks.
///
/// # Examples
///
/// ```
/// use sink::webhooks::{
///     SignatureAlgorithm, compute_signature, format_signature_header, verify_signature,
/// };
///
/// let payload = b"Hello, World!";
/// let secret = b"my-secret-key";
///
/// let sig = compute_signature(SignatureAlgorithm::Sha1, payload, secret);
/// let header = format_signature_header(SignatureAlgorithm::Sha1, &sig);
///
/// assert!(verify_signature(SignatureAlgorithm::Sha1, payload, &header, secret));
/// assert!(!verify_signature(SignatureAlgorithm::Sha1, payload, &header, b"wrong-secret"));
/// ```
pub fn verify_signature(
    algorithm: SignatureAlgorithm,
    payload: &[u8],
    signature_header: &str,
    secret: &[u8],
) -> bool {
    let expected_signature = match parse_signature_header(algorithm, signature_header) {
        Some(sig) => sig,
        None => return false,
    };

    // Constant-time comparison via the HMAC library
    match algorithm {
        SignatureAlgorithm::Sha1 => match HmacSha1::new_from_slice(secret) {
            Ok(mut mac) => {
                mac.update(payload);
                mac.verify_slice(&expected_signature).is_ok()
            }
            Err(_) => false,
        },
        SignatureAlgorithm::Sha256 => match HmacSha256::new_from_slice(secret) {
            Ok(mut mac) => {
                mac.update(payload);
                mac.verify_slice(&expected_signature).is_ok()
            }
            Err(_) => false,
        },
    }
}
