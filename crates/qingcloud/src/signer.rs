//! Request signing for the IaaS query API.
//!
//! The string to sign is `GET\n/iaas/\n<encoded query>`, where the query is
//! the key-sorted encoding produced by [`ParameterSet::encode`]. The digest is
//! HMAC-SHA256 when `signature_method` is `HmacSHA256` and HMAC-SHA1
//! otherwise, encoded as standard base64.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::Sha256;

use crate::debug;
use crate::error::QingCloudError;
use crate::query::{ParameterSet, query_escape};

type HmacSha256 = Hmac<Sha256>;
type HmacSha1 = Hmac<Sha1>;

pub const API_ENDPOINT: &str = "https://api.qingcloud.com/iaas/?";
pub const API_PATH: &str = "/iaas/";
pub const HTTP_METHOD: &str = "GET";

pub const SIGNATURE_METHOD_KEY: &str = "signature_method";
pub const SIGNATURE_KEY: &str = "signature";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureMethod {
    HmacSha256,
    HmacSha1,
}

impl SignatureMethod {
    /// Anything other than the exact `HmacSHA256` literal, absence included,
    /// selects HMAC-SHA1.
    pub fn from_parameters(params: &ParameterSet) -> Self {
        match params.get(SIGNATURE_METHOD_KEY) {
            Some("HmacSHA256") => SignatureMethod::HmacSha256,
            _ => SignatureMethod::HmacSha1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SignatureMethod::HmacSha256 => "HmacSHA256",
            SignatureMethod::HmacSha1 => "HmacSHA1",
        }
    }
}

pub fn canonical_string(params: &ParameterSet) -> String {
    format!("{HTTP_METHOD}\n{API_PATH}\n{}", params.encode())
}

/// Signature token for `params`, keyed with `secret`.
///
/// HMAC takes keys of any length (long keys are hashed, short ones padded),
/// so the `Signing` error is unreachable for both digests today.
#[tracing::instrument(level = "debug", skip(params, secret), fields(parameters = params.len()))]
pub fn sign(params: &ParameterSet, secret: &[u8]) -> Result<String, QingCloudError> {
    let method = SignatureMethod::from_parameters(params);
    let string_to_sign = canonical_string(params);
    debug!("Signing with {}", method.as_str());

    let digest = match method {
        SignatureMethod::HmacSha256 => {
            let mut mac = HmacSha256::new_from_slice(secret).map_err(signing_error)?;
            mac.update(string_to_sign.as_bytes());
            mac.finalize().into_bytes().to_vec()
        }
        SignatureMethod::HmacSha1 => {
            let mut mac = HmacSha1::new_from_slice(secret).map_err(signing_error)?;
            mac.update(string_to_sign.as_bytes());
            mac.finalize().into_bytes().to_vec()
        }
    };
    Ok(STANDARD.encode(digest))
}

fn signing_error(e: hmac::digest::InvalidLength) -> QingCloudError {
    QingCloudError::Signing {
        reason: e.to_string(),
    }
}

/// `endpoint` followed by the encoded query and the escaped signature.
pub fn assemble_url(endpoint: &str, params: &ParameterSet, token: &str) -> String {
    format!(
        "{endpoint}{}&{SIGNATURE_KEY}={}",
        params.encode(),
        query_escape(token)
    )
}
