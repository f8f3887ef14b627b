//! Subject alternative name entries.

use std::net::{Ipv4Addr, Ipv6Addr};

use crate::der::DerValue;
use crate::error::CsrKitError;

/// A single `GeneralName` choice supported in subject alternative names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneralName {
    /// `dNSName`, carried as the literal string.
    DnsName(String),
    /// `iPAddress`, exactly 4 (IPv4) or 16 (IPv6) octets.
    IpAddress(Vec<u8>),
}

impl GeneralName {
    /// Parses a `"TYPE:value"` token, splitting on the first colon (so
    /// `"IP:::1"` yields the IPv6 loopback).
    ///
    /// A malformed IP literal is a hard error. An unrecognized type prefix
    /// is not: the token is dropped with a warning and `None` is returned,
    /// leaving the remaining entries unaffected.
    pub fn parse(token: &str) -> Result<Option<Self>, CsrKitError> {
        let Some((kind, value)) = token.split_once(':') else {
            log::warn!("unsupported general name {token}");
            return Ok(None);
        };
        match kind {
            "DNS" => {
                if value.is_empty() {
                    log::warn!("dropping empty DNS general name");
                    return Ok(None);
                }
                Ok(Some(GeneralName::DnsName(value.to_owned())))
            }
            "IP" => {
                let octets = if value.contains(':') {
                    value
                        .parse::<Ipv6Addr>()
                        .map_err(|_| CsrKitError::InvalidAddress(value.to_owned()))?
                        .octets()
                        .to_vec()
                } else {
                    value
                        .parse::<Ipv4Addr>()
                        .map_err(|_| CsrKitError::InvalidAddress(value.to_owned()))?
                        .octets()
                        .to_vec()
                };
                Ok(Some(GeneralName::IpAddress(octets)))
            }
            _ => {
                log::warn!("unsupported general name {token}");
                Ok(None)
            }
        }
    }

    /// The tagged CHOICE encoding: `[2] IMPLICIT IA5String` for DNS names,
    /// `[7] IMPLICIT OCTET STRING` for IP addresses.
    pub(crate) fn to_der_value(&self) -> DerValue {
        match self {
            GeneralName::DnsName(name) => DerValue::ContextPrimitive(2, name.as_bytes().to_vec()),
            GeneralName::IpAddress(octets) => DerValue::ContextPrimitive(7, octets.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dns_name_holds_literal() {
        let name = GeneralName::parse("DNS:test.example.com").unwrap().unwrap();
        assert_eq!(name, GeneralName::DnsName("test.example.com".to_owned()));
    }

    #[test]
    fn ipv4_yields_four_octets() {
        let name = GeneralName::parse("IP:127.0.0.1").unwrap().unwrap();
        match &name {
            GeneralName::IpAddress(octets) => {
                assert_eq!(octets, &[127, 0, 0, 1]);
                let formatted = Ipv4Addr::new(octets[0], octets[1], octets[2], octets[3]);
                assert_eq!(formatted.to_string(), "127.0.0.1");
            }
            other => panic!("expected IpAddress, got {other:?}"),
        }
    }

    #[test]
    fn ipv6_yields_sixteen_octets() {
        for (token, canonical) in [
            ("IP:::1", "::1"),
            ("IP:2001:0db8:0000:0000:0000:0000:0000:0001", "2001:db8::1"),
        ] {
            let name = GeneralName::parse(token).unwrap().unwrap();
            match name {
                GeneralName::IpAddress(octets) => {
                    assert_eq!(octets.len(), 16);
                    let mut raw = [0u8; 16];
                    raw.copy_from_slice(&octets);
                    assert_eq!(Ipv6Addr::from(raw).to_string(), canonical);
                }
                other => panic!("expected IpAddress, got {other:?}"),
            }
        }
    }

    #[test]
    fn malformed_ip_is_a_hard_error() {
        assert!(matches!(
            GeneralName::parse("IP:300.1.2.3"),
            Err(CsrKitError::InvalidAddress(_))
        ));
        assert!(matches!(
            GeneralName::parse("IP:definitely:not:an:address"),
            Err(CsrKitError::InvalidAddress(_))
        ));
    }

    #[test]
    fn unknown_type_is_dropped() {
        assert_eq!(GeneralName::parse("URI:https://example.com").unwrap(), None);
        assert_eq!(GeneralName::parse("no-colon-at-all").unwrap(), None);
    }

    #[test]
    fn choice_tags() {
        let dns = GeneralName::DnsName("a".to_owned()).to_der_value().encode();
        assert_eq!(dns, vec![0x82, 0x01, b'a']);
        let ip = GeneralName::IpAddress(vec![127, 0, 0, 1]).to_der_value().encode();
        assert_eq!(ip, vec![0x87, 0x04, 127, 0, 0, 1]);
    }
}
