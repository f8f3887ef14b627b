//! Minimal DER encoder for the ASN.1 values appearing in a certification
//! request.
//!
//! This is an encoder only. Values are assembled bottom-up into an immutable
//! [`DerValue`] tree and serialized in one pass; members of constructed types
//! are written in the exact order they were inserted, so any ordering
//! requirement (such as input-order preservation of distinguished name
//! components) is the caller's responsibility. Encoding is canonical:
//! INTEGER uses minimal two's complement, BOOLEAN is a single `0x00`/`0xFF`
//! byte, and lengths use the definite short form below 128 content bytes and
//! the minimal long form otherwise.

use const_oid::ObjectIdentifier;

const TAG_BOOLEAN: u8 = 0x01;
const TAG_INTEGER: u8 = 0x02;
const TAG_BIT_STRING: u8 = 0x03;
const TAG_OCTET_STRING: u8 = 0x04;
const TAG_NULL: u8 = 0x05;
const TAG_OBJECT_IDENTIFIER: u8 = 0x06;
const TAG_UTF8_STRING: u8 = 0x0c;
const TAG_PRINTABLE_STRING: u8 = 0x13;
const TAG_IA5_STRING: u8 = 0x16;
const TAG_SEQUENCE: u8 = 0x30;
const TAG_SET: u8 = 0x31;

/// Class bits for a context-specific tag.
const CLASS_CONTEXT: u8 = 0x80;
/// Constructed bit of a tag octet.
const CONSTRUCTED: u8 = 0x20;

/// An ASN.1 value restricted to the types a certification request needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DerValue {
    Boolean(bool),
    Integer(i64),
    /// BIT STRING with no unused bits.
    BitString(Vec<u8>),
    OctetString(Vec<u8>),
    Null,
    ObjectIdentifier(ObjectIdentifier),
    Utf8String(String),
    PrintableString(String),
    Ia5String(String),
    Sequence(Vec<DerValue>),
    Set(Vec<DerValue>),
    /// `[n] IMPLICIT` over a primitive type; the content bytes are the
    /// underlying primitive's content.
    ContextPrimitive(u8, Vec<u8>),
    /// `[n] IMPLICIT` over a constructed type.
    ContextConstructed(u8, Vec<DerValue>),
    /// A complete, already-encoded TLV copied through verbatim. Used for the
    /// key provider's own SubjectPublicKeyInfo encoding and for the frozen
    /// `CertificationRequestInfo` bytes that were signed.
    Raw(Vec<u8>),
}

impl DerValue {
    /// Serializes the value tree into its canonical DER encoding.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.encode_into(&mut out);
        out
    }

    fn encode_into(&self, out: &mut Vec<u8>) {
        match self {
            DerValue::Boolean(value) => {
                write_header(out, TAG_BOOLEAN, 1);
                out.push(if *value { 0xff } else { 0x00 });
            }
            DerValue::Integer(value) => {
                write_tlv(out, TAG_INTEGER, &integer_content(*value));
            }
            DerValue::BitString(payload) => {
                write_header(out, TAG_BIT_STRING, payload.len() + 1);
                out.push(0x00); // unused bits
                out.extend_from_slice(payload);
            }
            DerValue::OctetString(payload) => {
                write_tlv(out, TAG_OCTET_STRING, payload);
            }
            DerValue::Null => {
                write_header(out, TAG_NULL, 0);
            }
            DerValue::ObjectIdentifier(oid) => {
                write_tlv(out, TAG_OBJECT_IDENTIFIER, oid.as_bytes());
            }
            DerValue::Utf8String(value) => {
                write_tlv(out, TAG_UTF8_STRING, value.as_bytes());
            }
            DerValue::PrintableString(value) => {
                write_tlv(out, TAG_PRINTABLE_STRING, value.as_bytes());
            }
            DerValue::Ia5String(value) => {
                write_tlv(out, TAG_IA5_STRING, value.as_bytes());
            }
            DerValue::Sequence(members) => {
                write_tlv(out, TAG_SEQUENCE, &encode_members(members));
            }
            DerValue::Set(members) => {
                write_tlv(out, TAG_SET, &encode_members(members));
            }
            DerValue::ContextPrimitive(number, payload) => {
                write_tlv(out, CLASS_CONTEXT | number, payload);
            }
            DerValue::ContextConstructed(number, members) => {
                write_tlv(out, CLASS_CONTEXT | CONSTRUCTED | number, &encode_members(members));
            }
            DerValue::Raw(encoded) => {
                out.extend_from_slice(encoded);
            }
        }
    }
}

fn encode_members(members: &[DerValue]) -> Vec<u8> {
    let mut content = Vec::new();
    for member in members {
        member.encode_into(&mut content);
    }
    content
}

fn write_tlv(out: &mut Vec<u8>, tag: u8, content: &[u8]) {
    write_header(out, tag, content.len());
    out.extend_from_slice(content);
}

fn write_header(out: &mut Vec<u8>, tag: u8, len: usize) {
    out.push(tag);
    if len < 0x80 {
        out.push(len as u8);
    } else {
        let be = len.to_be_bytes();
        let skip = be.iter().take_while(|&&b| b == 0).count();
        out.push(0x80 | (be.len() - skip) as u8);
        out.extend_from_slice(&be[skip..]);
    }
}

/// Minimal two's complement content octets of an INTEGER.
fn integer_content(value: i64) -> Vec<u8> {
    let be = value.to_be_bytes();
    let mut skip = 0;
    while skip < be.len() - 1 {
        let redundant = (be[skip] == 0x00 && be[skip + 1] & 0x80 == 0)
            || (be[skip] == 0xff && be[skip + 1] & 0x80 != 0);
        if !redundant {
            break;
        }
        skip += 1;
    }
    be[skip..].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boolean_single_content_byte() {
        assert_eq!(DerValue::Boolean(true).encode(), vec![0x01, 0x01, 0xff]);
        assert_eq!(DerValue::Boolean(false).encode(), vec![0x01, 0x01, 0x00]);
    }

    #[test]
    fn integer_minimal_twos_complement() {
        assert_eq!(DerValue::Integer(0).encode(), vec![0x02, 0x01, 0x00]);
        assert_eq!(DerValue::Integer(127).encode(), vec![0x02, 0x01, 0x7f]);
        assert_eq!(DerValue::Integer(128).encode(), vec![0x02, 0x02, 0x00, 0x80]);
        assert_eq!(DerValue::Integer(256).encode(), vec![0x02, 0x02, 0x01, 0x00]);
        assert_eq!(DerValue::Integer(-1).encode(), vec![0x02, 0x01, 0xff]);
        assert_eq!(DerValue::Integer(-129).encode(), vec![0x02, 0x02, 0xff, 0x7f]);
    }

    #[test]
    fn short_and_long_form_lengths() {
        let short = DerValue::OctetString(vec![0xaa; 127]).encode();
        assert_eq!(&short[..2], &[0x04, 0x7f]);

        let long = DerValue::OctetString(vec![0xaa; 128]).encode();
        assert_eq!(&long[..3], &[0x04, 0x81, 0x80]);

        let longer = DerValue::OctetString(vec![0xaa; 300]).encode();
        assert_eq!(&longer[..4], &[0x04, 0x82, 0x01, 0x2c]);
    }

    #[test]
    fn bit_string_prepends_unused_bits_octet() {
        assert_eq!(
            DerValue::BitString(vec![0xca, 0xfe]).encode(),
            vec![0x03, 0x03, 0x00, 0xca, 0xfe]
        );
    }

    #[test]
    fn object_identifier_content() {
        let oid = ObjectIdentifier::new_unwrap("1.2.840.113549.1.9.14");
        assert_eq!(
            DerValue::ObjectIdentifier(oid).encode(),
            vec![0x06, 0x09, 0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x09, 0x0e]
        );
    }

    #[test]
    fn constructed_types_preserve_member_order() {
        let seq = DerValue::Sequence(vec![
            DerValue::Integer(2),
            DerValue::Integer(1),
        ]);
        assert_eq!(seq.encode(), vec![0x30, 0x06, 0x02, 0x01, 0x02, 0x02, 0x01, 0x01]);

        // SET members are likewise written as inserted, not sorted.
        let set = DerValue::Set(vec![DerValue::Integer(2), DerValue::Integer(1)]);
        assert_eq!(set.encode(), vec![0x31, 0x06, 0x02, 0x01, 0x02, 0x02, 0x01, 0x01]);
    }

    #[test]
    fn context_specific_tags() {
        assert_eq!(
            DerValue::ContextPrimitive(2, b"example.com".to_vec()).encode()[0],
            0x82
        );
        assert_eq!(
            DerValue::ContextConstructed(0, vec![]).encode(),
            vec![0xa0, 0x00]
        );
    }

    #[test]
    fn raw_passthrough_is_verbatim() {
        let inner = DerValue::Sequence(vec![DerValue::Null]).encode();
        let outer = DerValue::Sequence(vec![DerValue::Raw(inner.clone())]).encode();
        assert_eq!(&outer[2..], &inner[..]);
    }

    #[test]
    fn encoding_is_deterministic() {
        let value = DerValue::Sequence(vec![
            DerValue::Integer(0),
            DerValue::Set(vec![DerValue::Utf8String("Dresden".into())]),
            DerValue::ContextConstructed(0, vec![]),
        ]);
        assert_eq!(value.encode(), value.encode());
    }
}
