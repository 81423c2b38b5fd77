use hmac::{Hmac, Mac};
use serde::Serialize;
use sha1::Sha1;

use crate::utils::error::Result;

type HmacSha1 = Hmac<Sha1>;

/// Serializes a payload into the exact bytes the signature is computed
/// over: compact JSON, no whitespace, fields in struct declaration order.
/// Any deviation here (spacing, field order, number formatting) would
/// invalidate the HMAC and make the vendor reject the request.
pub fn canonical_json<P: Serialize>(payload: &P) -> Result<String> {
    Ok(serde_json::to_string(payload)?)
}

/// HMAC-SHA1 over the UTF-8 bytes of `data`, rendered as a lowercase hex
/// digest. SHA-1 is what the vendor verifies against; this is an integrity
/// check with a static application credential, not a user secret.
pub fn sign(key: &str, data: &str) -> String {
    let mut mac = HmacSha1::new_from_slice(key.as_bytes()).expect("HMAC accepts any key length");
    mac.update(data.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}
