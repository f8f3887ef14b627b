//! RSA key generation, signing, and private key export.
//!
//! The certification request pipeline never touches RSA arithmetic or
//! padding itself; everything cryptographic is delegated to this module,
//! which wraps the `rsa` crate.

use std::path::{Path, PathBuf};

use bon::Builder;
use const_oid::ObjectIdentifier;
use pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::pkcs1v15::SigningKey;
use rsa::signature::{SignatureEncoding, Signer};
use rsa::{RsaPrivateKey, RsaPublicKey};
use sha1::Sha1;
use sha2::{Sha256, Sha384, Sha512};

use crate::error::CsrKitError;
use crate::oids;
use crate::pem_utils;

/// Digest and padding scheme used to sign a certification request.
///
/// All schemes use PKCS#1 v1.5 padding. The default is SHA-1, kept for
/// backward format compatibility with existing tooling; new deployments
/// should select one of the SHA-2 schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignatureScheme {
    #[default]
    Sha1WithRsa,
    Sha256WithRsa,
    Sha384WithRsa,
    Sha512WithRsa,
}

impl SignatureScheme {
    /// The signature algorithm OID conveyed in the request.
    pub fn oid(self) -> ObjectIdentifier {
        match self {
            SignatureScheme::Sha1WithRsa => oids::SHA1_WITH_RSA_ENCRYPTION,
            SignatureScheme::Sha256WithRsa => oids::SHA256_WITH_RSA_ENCRYPTION,
            SignatureScheme::Sha384WithRsa => oids::SHA384_WITH_RSA_ENCRYPTION,
            SignatureScheme::Sha512WithRsa => oids::SHA512_WITH_RSA_ENCRYPTION,
        }
    }
}

/// Output format for an exported private key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyFormat {
    #[default]
    Pem,
    Der,
}

/// Options for [`KeyPair::create_rsa`].
///
/// # Example
/// ```rust,no_run
/// use csrkit::key::{KeyGenOptions, KeyPair};
///
/// # fn main() -> Result<(), csrkit::error::CsrKitError> {
/// let options = KeyGenOptions::builder()
///     .bits(3072)
///     .keyfile("key.pem".into())
///     .passphrase("correct horse".to_string())
///     .build();
/// let key_pair = KeyPair::create_rsa(&options)?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Builder)]
pub struct KeyGenOptions {
    /// Bit size of the key modulus.
    #[builder(default = 2048)]
    pub bits: usize,
    /// File the private key should be written to.
    pub keyfile: Option<PathBuf>,
    /// Format for the key file.
    #[builder(default)]
    pub format: KeyFormat,
    /// Pass phrase for encrypting the key file. Only supported together
    /// with [`KeyFormat::Pem`].
    pub passphrase: Option<String>,
}

/// An RSA key pair.
pub struct KeyPair {
    private: Box<RsaPrivateKey>,
    public: RsaPublicKey,
}

impl KeyPair {
    /// Generate an RSA key pair with the specified number of bits.
    pub fn generate_rsa(bits: usize) -> Result<Self, CsrKitError> {
        let mut rng = rand_core::OsRng;
        let private = RsaPrivateKey::new(&mut rng, bits)?;
        let public = RsaPublicKey::from(&private);
        Ok(KeyPair {
            private: Box::new(private),
            public,
        })
    }

    /// Generate a new RSA key and optionally write it to a key file.
    ///
    /// The option combination is validated before any key material is
    /// generated: requesting a passphrase together with a non-PEM format
    /// fails with [`CsrKitError::Configuration`].
    pub fn create_rsa(options: &KeyGenOptions) -> Result<Self, CsrKitError> {
        if options.passphrase.is_some() && options.format != KeyFormat::Pem {
            return Err(CsrKitError::Configuration(
                "passphrase is only supported for PEM encoded private keys".to_string(),
            ));
        }
        let key_pair = Self::generate_rsa(options.bits)?;
        if let Some(keyfile) = &options.keyfile {
            key_pair.write_private_key(keyfile, options.format, options.passphrase.as_deref())?;
        }
        Ok(key_pair)
    }

    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public
    }

    /// The DER-encoded `SubjectPublicKeyInfo` of the public key.
    ///
    /// The request pipeline copies these bytes through into the
    /// certification request verbatim rather than rebuilding the structure
    /// field by field.
    pub fn public_key_der(&self) -> Result<Vec<u8>, CsrKitError> {
        self.public
            .to_public_key_der()
            .map(|doc| doc.as_bytes().to_vec())
            .map_err(|e| CsrKitError::Encoding(e.to_string()))
    }

    /// Sign `message` with the private key under the given scheme.
    pub fn sign(&self, scheme: SignatureScheme, message: &[u8]) -> Result<Vec<u8>, CsrKitError> {
        let signature = match scheme {
            SignatureScheme::Sha1WithRsa => {
                let signing_key: SigningKey<Sha1> = SigningKey::new((*self.private).clone());
                signing_key.try_sign(message).map(|s| s.to_vec())
            }
            SignatureScheme::Sha256WithRsa => {
                let signing_key: SigningKey<Sha256> = SigningKey::new((*self.private).clone());
                signing_key.try_sign(message).map(|s| s.to_vec())
            }
            SignatureScheme::Sha384WithRsa => {
                let signing_key: SigningKey<Sha384> = SigningKey::new((*self.private).clone());
                signing_key.try_sign(message).map(|s| s.to_vec())
            }
            SignatureScheme::Sha512WithRsa => {
                let signing_key: SigningKey<Sha512> = SigningKey::new((*self.private).clone());
                signing_key.try_sign(message).map(|s| s.to_vec())
            }
        };
        signature.map_err(|e| CsrKitError::Signing(e.to_string()))
    }

    /// PEM-encoded PKCS#8 private key, encrypted when a passphrase is given.
    pub fn private_key_pem(&self, passphrase: Option<&str>) -> Result<String, CsrKitError> {
        match passphrase {
            Some(passphrase) => {
                let pem = self.private.to_pkcs8_encrypted_pem(
                    rand_core::OsRng,
                    passphrase.as_bytes(),
                    LineEnding::LF,
                )?;
                Ok(pem.as_str().to_owned())
            }
            None => {
                let pem = self.private.to_pkcs8_pem(LineEnding::LF)?;
                Ok(pem.as_str().to_owned())
            }
        }
    }

    /// DER-encoded PKCS#8 private key.
    pub fn private_key_der(&self) -> Result<Vec<u8>, CsrKitError> {
        let doc = self.private.to_pkcs8_der()?;
        Ok(doc.as_bytes().to_vec())
    }

    fn write_private_key(
        &self,
        path: &Path,
        format: KeyFormat,
        passphrase: Option<&str>,
    ) -> Result<(), CsrKitError> {
        let output = match format {
            KeyFormat::Pem => self.private_key_pem(passphrase)?.into_bytes(),
            KeyFormat::Der => {
                if passphrase.is_some() {
                    return Err(CsrKitError::Configuration(
                        "passphrase is only supported for PEM encoded private keys".to_string(),
                    ));
                }
                self.private_key_der()?
            }
        };
        pem_utils::write_output(path, &output)?;
        log::info!("wrote private key to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scheme_is_legacy_sha1() {
        assert_eq!(SignatureScheme::default(), SignatureScheme::Sha1WithRsa);
        assert_eq!(
            SignatureScheme::default().oid(),
            ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.5")
        );
    }

    #[test]
    fn passphrase_with_der_format_is_rejected_before_generation() {
        let options = KeyGenOptions::builder()
            .bits(2048)
            .format(KeyFormat::Der)
            .passphrase("secret".to_string())
            .build();
        match KeyPair::create_rsa(&options) {
            Err(CsrKitError::Configuration(_)) => {}
            other => panic!("expected configuration error, got {:?}", other.map(|_| ())),
        }
    }
}
