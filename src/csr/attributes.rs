//! PKCS#9 attribute assembly for the certification request.

use const_oid::ObjectIdentifier;

use crate::csr::extensions::{self, BuiltExtension, Extension, ExtensionKind, ExtensionParams};
use crate::der::DerValue;
use crate::error::CsrKitError;
use crate::oids;

/// One requested extension inside an `extensionRequest` attribute,
/// identified by name so that unknown names can be skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionEntry {
    pub name: String,
    pub critical: bool,
    pub params: ExtensionParams,
}

impl ExtensionEntry {
    pub fn new(name: impl Into<String>, critical: bool, params: ExtensionParams) -> Self {
        ExtensionEntry {
            name: name.into(),
            critical,
            params,
        }
    }
}

/// Parameters for one top-level attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeParams {
    ExtensionRequest(Vec<ExtensionEntry>),
}

/// The closed set of attribute kinds the builder produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AttributeKind {
    ExtensionRequest,
}

impl AttributeKind {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "extensionRequest" => Some(AttributeKind::ExtensionRequest),
            _ => None,
        }
    }
}

/// An ordered attribute specification, keyed by attribute name.
///
/// Unknown attribute names are skipped silently, deliberately looser than
/// the distinguished name builder, which rejects unknown keys outright.
/// The same applies one level down to unknown extension names inside an
/// `extensionRequest`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeSpec {
    entries: Vec<(String, AttributeParams)>,
}

impl AttributeSpec {
    pub fn new() -> Self {
        AttributeSpec::default()
    }

    /// Convenience for the common single-attribute case.
    pub fn extension_request(entries: Vec<ExtensionEntry>) -> Self {
        let mut spec = AttributeSpec::new();
        spec.push("extensionRequest", AttributeParams::ExtensionRequest(entries));
        spec
    }

    pub fn push(&mut self, name: impl Into<String>, params: AttributeParams) {
        self.entries.push((name.into(), params));
    }
}

/// A built attribute: OID plus the DER bytes of each member of its value
/// set, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub oid: ObjectIdentifier,
    pub values: Vec<Vec<u8>>,
}

impl Attribute {
    /// `Attribute ::= SEQUENCE { type OBJECT IDENTIFIER, values SET OF ANY }`
    pub(crate) fn to_der_value(&self) -> DerValue {
        DerValue::Sequence(vec![
            DerValue::ObjectIdentifier(self.oid),
            DerValue::Set(self.values.iter().cloned().map(DerValue::Raw).collect()),
        ])
    }
}

/// Builds the attribute set for a certification request. Attributes that
/// end up with no content are omitted entirely rather than emitted empty.
pub(crate) fn build_attributes(spec: &AttributeSpec) -> Result<Vec<Attribute>, CsrKitError> {
    let mut attributes = Vec::new();
    for (name, params) in &spec.entries {
        let Some(kind) = AttributeKind::from_name(name) else {
            continue;
        };
        match (kind, params) {
            (AttributeKind::ExtensionRequest, AttributeParams::ExtensionRequest(entries)) => {
                if let Some(attribute) = build_extension_request(entries)? {
                    attributes.push(attribute);
                }
            }
        }
    }
    Ok(attributes)
}

/// Builds the `extensionRequest` attribute, whose single value is the
/// SEQUENCE of successfully built extensions. Returns `None` when no
/// extension survived.
fn build_extension_request(entries: &[ExtensionEntry]) -> Result<Option<Attribute>, CsrKitError> {
    let mut built = Vec::new();
    for entry in entries {
        let Some(kind) = ExtensionKind::from_name(&entry.name) else {
            continue;
        };
        match extensions::build(kind, &entry.params)? {
            BuiltExtension::Value(value) => built.push(Extension {
                oid: kind.oid(),
                critical: entry.critical,
                value,
            }),
            BuiltExtension::NotYetSupported => {
                log::warn!("extension {} is not yet supported, dropping it", entry.name);
            }
        }
    }
    if built.is_empty() {
        return Ok(None);
    }
    let extension_sequence =
        DerValue::Sequence(built.iter().map(Extension::to_der_value).collect()).encode();
    Ok(Some(Attribute {
        oid: oids::EXTENSION_REQUEST,
        values: vec![extension_sequence],
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn san_entry(tokens: &[&str]) -> ExtensionEntry {
        ExtensionEntry::new(
            "subjectAlternativeName",
            false,
            ExtensionParams::SubjectAltName(tokens.iter().map(|t| t.to_string()).collect()),
        )
    }

    #[test]
    fn unknown_extension_names_are_skipped_silently() {
        let entries = vec![
            ExtensionEntry::new(
                "certificatePolicies",
                false,
                ExtensionParams::SubjectAltName(vec![]),
            ),
            san_entry(&["DNS:example.com"]),
        ];
        let attribute = build_extension_request(&entries).unwrap().unwrap();
        assert_eq!(attribute.oid, oids::EXTENSION_REQUEST);
        assert_eq!(attribute.values.len(), 1);
    }

    #[test]
    fn no_built_extensions_means_no_attribute_at_all() {
        let entries = vec![ExtensionEntry::new(
            "certificatePolicies",
            false,
            ExtensionParams::SubjectAltName(vec![]),
        )];
        assert_eq!(build_extension_request(&entries).unwrap(), None);
    }

    #[test]
    fn unimplemented_kinds_are_dropped_with_a_warning() {
        let entries = vec![
            ExtensionEntry::new(
                "x509v3KeyUsage",
                true,
                ExtensionParams::SubjectAltName(vec![]),
            ),
            san_entry(&["DNS:example.com"]),
        ];
        let attribute = build_extension_request(&entries).unwrap().unwrap();
        // only the SAN extension made it into the sequence
        let value = &attribute.values[0];
        assert_eq!(value[0], 0x30);
        let san_oid = oids::SUBJECT_ALTERNATIVE_NAME.as_bytes();
        assert!(value.windows(san_oid.len()).any(|w| w == san_oid));
        let key_usage_oid = oids::KEY_USAGE.as_bytes();
        assert!(!value.windows(key_usage_oid.len()).any(|w| w == key_usage_oid));
    }

    #[test]
    fn unknown_top_level_attributes_are_skipped_silently() {
        let mut spec = AttributeSpec::new();
        spec.push(
            "challengePassword",
            AttributeParams::ExtensionRequest(vec![san_entry(&["DNS:example.com"])]),
        );
        assert_eq!(build_attributes(&spec).unwrap(), vec![]);
    }

    #[test]
    fn extension_order_is_preserved() {
        let entries = vec![
            ExtensionEntry::new(
                "x509basicConstraints",
                true,
                ExtensionParams::BasicConstraints {
                    ca: true,
                    path_len: None,
                },
            ),
            san_entry(&["DNS:example.com"]),
        ];
        let attribute = build_extension_request(&entries).unwrap().unwrap();
        let value = &attribute.values[0];
        let bc = oids::BASIC_CONSTRAINTS.as_bytes();
        let san = oids::SUBJECT_ALTERNATIVE_NAME.as_bytes();
        let bc_at = value.windows(bc.len()).position(|w| w == bc).unwrap();
        let san_at = value.windows(san.len()).position(|w| w == san).unwrap();
        assert!(bc_at < san_at);
    }
}
