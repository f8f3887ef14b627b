use std::sync::OnceLock;

use csrkit::key::KeyPair;

static SHARED_KEY: OnceLock<KeyPair> = OnceLock::new();

/// RSA key generation dominates test runtime, so every test in this binary
/// shares one 2048-bit key.
pub fn shared_rsa_key() -> &'static KeyPair {
    SHARED_KEY.get_or_init(|| KeyPair::generate_rsa(2048).expect("RSA key generation failed"))
}
