//! Certification request assembly.
//!
//! The pipeline builds an immutable `CertificationRequestInfo` value tree,
//! encodes it exactly once, signs those bytes, and carries them frozen
//! inside the final [`Csr`]. The signed encoding is never re-derived, so
//! the signature always covers the bytes that end up in the output.

pub mod attributes;
pub mod extensions;
pub mod general_name;
pub mod name;

use std::path::{Path, PathBuf};

use bon::Builder;
use rsa::RsaPublicKey;
use rsa::pkcs1v15::{Signature, VerifyingKey};
use rsa::pkcs8::DecodePublicKey;
use rsa::signature::Verifier;
use sha1::Sha1;
use sha2::{Sha256, Sha384, Sha512};

use crate::csr::attributes::{Attribute, AttributeSpec};
use crate::csr::name::DistinguishedName;
use crate::der::DerValue;
use crate::error::CsrKitError;
use crate::key::{KeyPair, SignatureScheme};
use crate::pem_utils;

const CSR_PEM_LABEL: &str = "CERTIFICATE REQUEST";

/// Options for [`Csr::generate`].
#[derive(Clone, Debug, Default, Builder)]
pub struct CsrOptions {
    /// Digest and padding scheme; defaults to the legacy SHA-1 scheme for
    /// backward format compatibility.
    #[builder(default)]
    pub signature_scheme: SignatureScheme,
    /// File the PEM output should be written to, once assembly succeeded.
    pub output: Option<PathBuf>,
}

/// `CertificationRequestInfo ::= SEQUENCE { version, subject,
/// subjectPKInfo, attributes [0] }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificationRequestInfo {
    version: u8,
    pub subject: DistinguishedName,
    /// The key provider's own `SubjectPublicKeyInfo` DER, copied through.
    pub subject_public_key_info: Vec<u8>,
    pub attributes: Vec<Attribute>,
}

impl CertificationRequestInfo {
    fn new(
        subject: DistinguishedName,
        subject_public_key_info: Vec<u8>,
        attributes: Vec<Attribute>,
    ) -> Self {
        CertificationRequestInfo {
            // always 0 per RFC 2986
            version: 0,
            subject,
            subject_public_key_info,
            attributes,
        }
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    /// The canonical encoding. The attributes field is always present as a
    /// `[0] IMPLICIT` set, empty when nothing was requested.
    fn to_der(&self) -> Vec<u8> {
        DerValue::Sequence(vec![
            DerValue::Integer(i64::from(self.version)),
            self.subject.to_der_value(),
            DerValue::Raw(self.subject_public_key_info.clone()),
            DerValue::ContextConstructed(
                0,
                self.attributes.iter().map(Attribute::to_der_value).collect(),
            ),
        ])
        .encode()
    }
}

/// `CertificationRequest ::= SEQUENCE { certificationRequestInfo,
/// signatureAlgorithm, signature BIT STRING }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificationRequest {
    pub certification_request_info: CertificationRequestInfo,
    /// The exact bytes that were signed.
    info_der: Vec<u8>,
    pub signature_algorithm: SignatureScheme,
    pub signature: Vec<u8>,
}

impl CertificationRequest {
    fn to_der(&self) -> Vec<u8> {
        DerValue::Sequence(vec![
            DerValue::Raw(self.info_der.clone()),
            // The algorithm identifier carries the OID alone, without a
            // parameters field.
            DerValue::Sequence(vec![DerValue::ObjectIdentifier(
                self.signature_algorithm.oid(),
            )]),
            DerValue::BitString(self.signature.clone()),
        ])
        .encode()
    }
}

/// A signed PKCS#10 certificate signing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Csr(CertificationRequest);

impl Csr {
    /// Builds and signs a certification request.
    ///
    /// Any failure while building the subject, attributes, or signature
    /// aborts before anything is written; the output file named in
    /// `options` is only touched after the complete PEM text exists.
    ///
    /// # Example
    /// ```rust,no_run
    /// use csrkit::csr::{Csr, CsrOptions};
    /// use csrkit::csr::name::DistinguishedName;
    /// use csrkit::key::KeyPair;
    ///
    /// # fn main() -> Result<(), csrkit::error::CsrKitError> {
    /// let key_pair = KeyPair::generate_rsa(2048)?;
    /// let subject = DistinguishedName::parse("/c=DE/cn=test.example.com")?;
    /// let csr = Csr::generate(&key_pair, &subject, None, &CsrOptions::default())?;
    /// println!("{}", csr.to_pem());
    /// # Ok(())
    /// # }
    /// ```
    pub fn generate(
        key: &KeyPair,
        subject: &DistinguishedName,
        attribute_spec: Option<&AttributeSpec>,
        options: &CsrOptions,
    ) -> Result<Self, CsrKitError> {
        let attributes = match attribute_spec {
            Some(spec) => attributes::build_attributes(spec)?,
            None => Vec::new(),
        };
        let info = CertificationRequestInfo::new(
            subject.clone(),
            key.public_key_der()?,
            attributes,
        );
        let info_der = info.to_der();
        let signature = key.sign(options.signature_scheme, &info_der)?;
        log::debug!("signature value: {} bytes", signature.len());

        let csr = Csr(CertificationRequest {
            certification_request_info: info,
            info_der,
            signature_algorithm: options.signature_scheme,
            signature,
        });
        if let Some(output) = &options.output {
            csr.write_to_file(output)?;
        }
        Ok(csr)
    }

    pub fn certification_request_info(&self) -> &CertificationRequestInfo {
        &self.0.certification_request_info
    }

    /// The canonical `CertificationRequestInfo` encoding the signature
    /// covers.
    pub fn signed_bytes(&self) -> &[u8] {
        &self.0.info_der
    }

    pub fn signature_scheme(&self) -> SignatureScheme {
        self.0.signature_algorithm
    }

    pub fn signature(&self) -> &[u8] {
        &self.0.signature
    }

    /// Encodes the request into DER format.
    pub fn to_der(&self) -> Vec<u8> {
        self.0.to_der()
    }

    /// Encodes the request into PEM format.
    pub fn to_pem(&self) -> String {
        pem_utils::der_to_pem(&self.to_der(), CSR_PEM_LABEL)
    }

    /// Writes the PEM text to `path`. The request itself survives a failed
    /// write, so the caller can retry without rebuilding or re-signing.
    pub fn write_to_file(&self, path: &Path) -> Result<(), CsrKitError> {
        pem_utils::write_output(path, self.to_pem().as_bytes())?;
        log::info!("wrote certification request to {}", path.display());
        Ok(())
    }

    /// Verifies the stored signature over the frozen info bytes against the
    /// embedded public key.
    pub fn verify(&self) -> Result<(), CsrKitError> {
        let public = RsaPublicKey::from_public_key_der(&self.0.certification_request_info.subject_public_key_info)
            .map_err(|e| CsrKitError::Encoding(e.to_string()))?;
        let signature = Signature::try_from(self.0.signature.as_slice())
            .map_err(|e| CsrKitError::Signing(e.to_string()))?;
        let message = &self.0.info_der;
        let verified = match self.0.signature_algorithm {
            SignatureScheme::Sha1WithRsa => {
                VerifyingKey::<Sha1>::new(public).verify(message, &signature)
            }
            SignatureScheme::Sha256WithRsa => {
                VerifyingKey::<Sha256>::new(public).verify(message, &signature)
            }
            SignatureScheme::Sha384WithRsa => {
                VerifyingKey::<Sha384>::new(public).verify(message, &signature)
            }
            SignatureScheme::Sha512WithRsa => {
                VerifyingKey::<Sha512>::new(public).verify(message, &signature)
            }
        };
        verified.map_err(|e| CsrKitError::Signing(e.to_string()))
    }
}
