use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

/// Checkout integrity hash: hex SHA-256 of `order_id ‖ amount ‖ currency ‖ secret`.
pub fn integrity_signature(order_id: &str, amount: i64, currency: &str, secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(order_id.as_bytes());
    hasher.update(amount.to_string().as_bytes());
    hasher.update(currency.as_bytes());
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}

/// Webhook check: HMAC-SHA256 over the base64 of the raw body, compared in
/// constant time against the hex signature header.
pub fn webhook_signature_valid(body: &[u8], signature_hex: &str, secret: &str) -> bool {
    let Ok(expected) = hex::decode(signature_hex.trim()) else {
        return false;
    };
    let Ok(mut mac) = Hmac::<Sha256>::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(BASE64.encode(body).as_bytes());
    mac.verify_slice(&expected).is_ok()
}
