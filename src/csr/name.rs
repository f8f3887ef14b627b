//! Subject distinguished name handling.

use const_oid::ObjectIdentifier;

use crate::der::DerValue;
use crate::error::CsrKitError;
use crate::oids;

/// A supported distinguished name attribute type.
///
/// The set is closed: adding a new supported attribute means adding a
/// variant here and extending every `match`, which the compiler checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DnAttributeKind {
    CountryName,
    StateOrProvinceName,
    LocalityName,
    OrganizationName,
    OrganizationalUnitName,
    CommonName,
    EmailAddress,
}

impl DnAttributeKind {
    /// Looks up a DN key case-insensitively: `c`, `st`, `l`, `o`, `ou`,
    /// `cn`, `emailAddress`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "c" => Some(DnAttributeKind::CountryName),
            "st" => Some(DnAttributeKind::StateOrProvinceName),
            "l" => Some(DnAttributeKind::LocalityName),
            "o" => Some(DnAttributeKind::OrganizationName),
            "ou" => Some(DnAttributeKind::OrganizationalUnitName),
            "cn" => Some(DnAttributeKind::CommonName),
            "emailaddress" => Some(DnAttributeKind::EmailAddress),
            _ => None,
        }
    }

    pub fn oid(self) -> ObjectIdentifier {
        match self {
            DnAttributeKind::CountryName => oids::AT_COUNTRY_NAME,
            DnAttributeKind::StateOrProvinceName => oids::AT_STATE_OR_PROVINCE_NAME,
            DnAttributeKind::LocalityName => oids::AT_LOCALITY_NAME,
            DnAttributeKind::OrganizationName => oids::AT_ORGANIZATION_NAME,
            DnAttributeKind::OrganizationalUnitName => oids::AT_ORGANIZATIONAL_UNIT_NAME,
            DnAttributeKind::CommonName => oids::AT_COMMON_NAME,
            DnAttributeKind::EmailAddress => oids::EMAIL_ADDRESS,
        }
    }

    /// The ASN.1 string type is fixed per attribute: country codes are a
    /// restricted PrintableString, email addresses are IA5, everything else
    /// is UTF8String.
    fn string_value(self, value: &str) -> DerValue {
        match self {
            DnAttributeKind::CountryName => DerValue::PrintableString(value.to_owned()),
            DnAttributeKind::EmailAddress => DerValue::Ia5String(value.to_owned()),
            DnAttributeKind::StateOrProvinceName
            | DnAttributeKind::LocalityName
            | DnAttributeKind::OrganizationName
            | DnAttributeKind::OrganizationalUnitName
            | DnAttributeKind::CommonName => DerValue::Utf8String(value.to_owned()),
        }
    }
}

/// One typed attribute of a distinguished name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeTypeAndValue {
    pub kind: DnAttributeKind,
    pub value: String,
}

impl AttributeTypeAndValue {
    pub fn new(key: &str, value: &str) -> Result<Self, CsrKitError> {
        let kind = DnAttributeKind::from_key(key)
            .ok_or_else(|| CsrKitError::UnsupportedAttribute(key.to_owned()))?;
        if kind == DnAttributeKind::CountryName && value.chars().count() != 2 {
            return Err(CsrKitError::InvalidAttributeValue(format!(
                "country name must be a two-letter code, got {value:?}"
            )));
        }
        Ok(AttributeTypeAndValue {
            kind,
            value: value.to_owned(),
        })
    }

    fn to_der_value(&self) -> DerValue {
        DerValue::Sequence(vec![
            DerValue::ObjectIdentifier(self.kind.oid()),
            self.kind.string_value(&self.value),
        ])
    }
}

/// An ordered subject distinguished name.
///
/// Each attribute becomes its own single-member relative distinguished name
/// SET; input order and multiplicity are preserved exactly, since relying
/// parties can be order-sensitive. Repeated keys (for example several `ou`
/// entries) yield repeated components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistinguishedName(Vec<AttributeTypeAndValue>);

impl DistinguishedName {
    /// Parses a slash-delimited specification such as
    /// `"/c=DE/l=Dresden/cn=test.example.com"`.
    ///
    /// Segments without a `=` are ignored (this makes leading and trailing
    /// slashes harmless). An unknown key fails the whole parse with
    /// [`CsrKitError::UnsupportedAttribute`].
    pub fn parse(spec: &str) -> Result<Self, CsrKitError> {
        let mut components = Vec::new();
        for segment in spec.split('/') {
            let Some((key, value)) = segment.split_once('=') else {
                continue;
            };
            components.push(AttributeTypeAndValue::new(key, value)?);
        }
        Ok(DistinguishedName(components))
    }

    /// Builds a distinguished name from ordered `(key, value)` pairs.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, CsrKitError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut components = Vec::new();
        for (key, value) in pairs {
            components.push(AttributeTypeAndValue::new(key, value)?);
        }
        Ok(DistinguishedName(components))
    }

    pub fn components(&self) -> &[AttributeTypeAndValue] {
        &self.0
    }

    /// The RDNSequence: one single-attribute SET per component, in input
    /// order.
    pub(crate) fn to_der_value(&self) -> DerValue {
        DerValue::Sequence(
            self.0
                .iter()
                .map(|attribute| DerValue::Set(vec![attribute.to_der_value()]))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_preserves_order_and_multiplicity() {
        let dn = DistinguishedName::parse("/c=DE/ou=first/ou=second/cn=example").unwrap();
        let kinds: Vec<_> = dn.components().iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                DnAttributeKind::CountryName,
                DnAttributeKind::OrganizationalUnitName,
                DnAttributeKind::OrganizationalUnitName,
                DnAttributeKind::CommonName,
            ]
        );
        assert_eq!(dn.components()[1].value, "first");
        assert_eq!(dn.components()[2].value, "second");
    }

    #[test]
    fn keys_are_case_insensitive() {
        let dn = DistinguishedName::parse("/CN=example/EmailAddress=a@b.de").unwrap();
        assert_eq!(dn.components()[0].kind, DnAttributeKind::CommonName);
        assert_eq!(dn.components()[1].kind, DnAttributeKind::EmailAddress);
    }

    #[test]
    fn unsupported_key_is_fatal() {
        match DistinguishedName::parse("/c=DE/serialNumber=1234") {
            Err(CsrKitError::UnsupportedAttribute(key)) => assert_eq!(key, "serialNumber"),
            other => panic!("expected UnsupportedAttribute, got {other:?}"),
        }
    }

    #[test]
    fn country_must_be_two_letters() {
        assert!(matches!(
            DistinguishedName::parse("/c=DEU"),
            Err(CsrKitError::InvalidAttributeValue(_))
        ));
    }

    #[test]
    fn value_may_contain_equals_sign() {
        let dn = DistinguishedName::parse("/o=Example=Org").unwrap();
        assert_eq!(dn.components()[0].value, "Example=Org");
    }

    #[test]
    fn string_types_follow_attribute_kind() {
        let dn = DistinguishedName::parse("/c=DE/l=Dresden/emailAddress=test@example.com").unwrap();
        let der = dn.to_der_value().encode();
        // country as PrintableString, locality as UTF8String, email as IA5String
        assert!(der.windows(4).any(|w| w == [0x13, 0x02, b'D', b'E']));
        assert!(der.windows(2).any(|w| w == [0x0c, 0x07]));
        assert!(der.windows(2).any(|w| w == [0x16, 0x10]));
    }
}
