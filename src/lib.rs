//! # CsrKit - A Pure Rust PKCS#10 Certificate Signing Request Library
//!
//! CsrKit builds signed PKCS#10 certification requests entirely with
//! rustcrypto libraries, without dependencies on ring or openssl. Given an
//! RSA key pair, a subject distinguished name, and a set of requested
//! X.509v3 extensions, it produces a canonical DER-encoded
//! `CertificationRequest` and renders it as a PEM artifact that any CA or
//! CSR parser can consume and verify.
//!
//! ## Supported Inputs
//!
//! - **Subject DN**: ordered `(key, value)` pairs or a slash-delimited
//!   string such as `"/c=DE/l=Dresden/cn=test.example.com"`; supported keys
//!   are `c`, `st`, `l`, `o`, `ou`, `cn`, and `emailAddress`
//!   (case-insensitive)
//! - **Extensions**: `basicConstraints` and `subjectAlternativeName`
//!   (DNS names, IPv4 and IPv6 addresses), packaged as a PKCS#9
//!   `extensionRequest` attribute
//! - **Keys**: RSA, generated by the built-in key provider or supplied by
//!   the caller
//!
//! ## Key Features
//!
//! - **Pure Rust**: built entirely with rustcrypto libraries
//! - **Canonical DER**: deterministic, order-preserving encoding; the
//!   signature covers the exact bytes emitted
//! - **Configurable signing**: PKCS#1 v1.5 with SHA-1 (legacy default, kept
//!   for format compatibility) or SHA-256/384/512
//! - **Key export**: PEM or DER private keys, with optional passphrase
//!   protection for PEM
//!
//! ## Quick Start
//!
//! ### Generating a simple CSR
//!
//! ```rust,no_run
//! use csrkit::{
//!     csr::{Csr, CsrOptions, name::DistinguishedName},
//!     key::KeyPair,
//! };
//!
//! # fn main() -> Result<(), csrkit::error::CsrKitError> {
//! // Generate an RSA key pair
//! let key_pair = KeyPair::generate_rsa(2048)?;
//!
//! // Describe the subject
//! let subject = DistinguishedName::parse(
//!     "/c=DE/l=Dresden/emailAddress=test@example.com/cn=test.example.com",
//! )?;
//!
//! // Build and sign the request
//! let csr = Csr::generate(&key_pair, &subject, None, &CsrOptions::default())?;
//! println!("{}", csr.to_pem());
//! # Ok(())
//! # }
//! ```
//!
//! ### Requesting extensions
//!
//! ```rust,no_run
//! use csrkit::{
//!     csr::{
//!         Csr, CsrOptions,
//!         attributes::{AttributeSpec, ExtensionEntry},
//!         extensions::ExtensionParams,
//!         name::DistinguishedName,
//!     },
//!     key::{KeyPair, SignatureScheme},
//! };
//!
//! # fn main() -> Result<(), csrkit::error::CsrKitError> {
//! let key_pair = KeyPair::generate_rsa(2048)?;
//! let subject = DistinguishedName::parse("/cn=test.example.com")?;
//!
//! let attributes = AttributeSpec::extension_request(vec![
//!     ExtensionEntry::new(
//!         "x509basicConstraints",
//!         true,
//!         ExtensionParams::BasicConstraints { ca: true, path_len: None },
//!     ),
//!     ExtensionEntry::new(
//!         "subjectAlternativeName",
//!         false,
//!         ExtensionParams::SubjectAltName(vec![
//!             "DNS:test.example.com".to_string(),
//!             "IP:127.0.0.1".to_string(),
//!             "IP:::1".to_string(),
//!         ]),
//!     ),
//! ]);
//!
//! let options = CsrOptions::builder()
//!     .signature_scheme(SignatureScheme::Sha256WithRsa)
//!     .build();
//! let csr = Csr::generate(&key_pair, &subject, Some(&attributes), &options)?;
//! csr.verify()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Fatal conditions (unknown DN keys, malformed IP literals, extensions
//! that would be empty) abort the build with a [`error::CsrKitError`]
//! naming the offending input. Unknown subject-alternative-name prefixes
//! and unknown extension names are soft: the entry is dropped and the rest
//! of the request is built normally. This asymmetry (strict for DN keys,
//! lenient for extension content) is deliberate and kept for compatibility
//! with existing callers; unify it only as a conscious breaking change.
//!
//! ```rust
//! use csrkit::{csr::name::DistinguishedName, error::CsrKitError};
//!
//! match DistinguishedName::parse("/c=DE/unsupportedKey=value") {
//!     Err(CsrKitError::UnsupportedAttribute(key)) => {
//!         println!("unsupported DN attribute: {}", key)
//!     }
//!     other => println!("unexpected: {:?}", other.map(|_| ())),
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`csr`]: request assembly, distinguished names, extensions, attributes
//! - [`der`]: minimal canonical DER encoder for the structures used here
//! - [`key`]: RSA key generation, signing schemes, and private key export
//! - [`oids`]: object identifiers for the supported structures
//! - [`pem_utils`]: PEM framing helpers
//! - [`error`]: error types and handling

pub mod csr;
pub mod der;
pub mod error;
pub mod key;
pub mod oids;
pub mod pem_utils;
