//! X.509v3 extension builders for the extension request attribute.

use const_oid::ObjectIdentifier;

use crate::csr::general_name::GeneralName;
use crate::der::DerValue;
use crate::error::CsrKitError;
use crate::oids;

/// The closed set of extension kinds known to the request builder.
///
/// `KeyUsage` and `ExtendedKeyUsage` are recognized but their builders are
/// not implemented yet; requesting them yields
/// [`BuiltExtension::NotYetSupported`] rather than silently producing an
/// empty value, so callers can tell the two apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionKind {
    BasicConstraints,
    SubjectAltName,
    KeyUsage,
    ExtendedKeyUsage,
}

impl ExtensionKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "x509basicConstraints" => Some(ExtensionKind::BasicConstraints),
            "subjectAlternativeName" => Some(ExtensionKind::SubjectAltName),
            "x509v3KeyUsage" => Some(ExtensionKind::KeyUsage),
            "x509v3ExtendedKeyUsage" => Some(ExtensionKind::ExtendedKeyUsage),
            _ => None,
        }
    }

    pub fn oid(self) -> ObjectIdentifier {
        match self {
            ExtensionKind::BasicConstraints => oids::BASIC_CONSTRAINTS,
            ExtensionKind::SubjectAltName => oids::SUBJECT_ALTERNATIVE_NAME,
            ExtensionKind::KeyUsage => oids::KEY_USAGE,
            ExtensionKind::ExtendedKeyUsage => oids::EXTENDED_KEY_USAGE,
        }
    }
}

/// Parameters for one requested extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionParams {
    BasicConstraints {
        ca: bool,
        /// Only emitted when `ca` is true.
        path_len: Option<u32>,
    },
    /// `"DNS:<name>"` / `"IP:<address>"` tokens.
    SubjectAltName(Vec<String>),
}

/// Outcome of building one extension value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuiltExtension {
    /// DER bytes of the extension-specific structure.
    Value(Vec<u8>),
    /// The kind is declared but has no builder; the caller drops the entry
    /// with a warning.
    NotYetSupported,
}

/// A built extension: OID, criticality, and the opaque DER value that gets
/// wrapped into an OCTET STRING.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extension {
    pub oid: ObjectIdentifier,
    pub critical: bool,
    pub value: Vec<u8>,
}

impl Extension {
    /// `Extension ::= SEQUENCE { extnID, critical BOOLEAN DEFAULT FALSE,
    /// extnValue OCTET STRING }`; the critical flag is omitted when false,
    /// as canonical DER requires for DEFAULT components.
    pub(crate) fn to_der_value(&self) -> DerValue {
        let mut fields = vec![DerValue::ObjectIdentifier(self.oid)];
        if self.critical {
            fields.push(DerValue::Boolean(true));
        }
        fields.push(DerValue::OctetString(self.value.clone()));
        DerValue::Sequence(fields)
    }
}

/// Dispatches to the builder for `kind`.
pub(crate) fn build(
    kind: ExtensionKind,
    params: &ExtensionParams,
) -> Result<BuiltExtension, CsrKitError> {
    match (kind, params) {
        (ExtensionKind::BasicConstraints, ExtensionParams::BasicConstraints { ca, path_len }) => {
            Ok(BuiltExtension::Value(build_basic_constraints(*ca, *path_len)))
        }
        (ExtensionKind::SubjectAltName, ExtensionParams::SubjectAltName(tokens)) => {
            Ok(BuiltExtension::Value(build_subject_alt_name(tokens)?))
        }
        (ExtensionKind::KeyUsage | ExtensionKind::ExtendedKeyUsage, _) => {
            Ok(BuiltExtension::NotYetSupported)
        }
        (kind, params) => Err(CsrKitError::Configuration(format!(
            "extension {kind:?} cannot be built from {params:?}"
        ))),
    }
}

/// `BasicConstraints ::= SEQUENCE { cA BOOLEAN DEFAULT FALSE,
/// pathLenConstraint INTEGER OPTIONAL }`.
///
/// The cA flag is omitted when false (DEFAULT component); the path length
/// is emitted only for CA requests that supplied one.
fn build_basic_constraints(ca: bool, path_len: Option<u32>) -> Vec<u8> {
    let mut fields = Vec::new();
    if ca {
        fields.push(DerValue::Boolean(true));
        if let Some(path_len) = path_len {
            fields.push(DerValue::Integer(i64::from(path_len)));
        }
    }
    DerValue::Sequence(fields).encode()
}

/// `SubjectAltName ::= GeneralNames ::= SEQUENCE SIZE (1..MAX) OF
/// GeneralName`. Unrecognized tokens have already been dropped by
/// [`GeneralName::parse`]; if nothing is left the extension fails with
/// [`CsrKitError::EmptyExtension`].
fn build_subject_alt_name(tokens: &[String]) -> Result<Vec<u8>, CsrKitError> {
    let mut names = Vec::new();
    for token in tokens {
        if let Some(name) = GeneralName::parse(token)? {
            names.push(name.to_der_value());
        }
    }
    if names.is_empty() {
        return Err(CsrKitError::EmptyExtension(
            "subjectAlternativeName".to_string(),
        ));
    }
    Ok(DerValue::Sequence(names).encode())
}
