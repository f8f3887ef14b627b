use std::path::PathBuf;

use csrkit::csr::attributes::{AttributeSpec, ExtensionEntry};
use csrkit::csr::extensions::ExtensionParams;
use csrkit::csr::name::DistinguishedName;
use csrkit::csr::{Csr, CsrOptions};
use csrkit::error::CsrKitError;
use csrkit::key::{KeyGenOptions, KeyPair};

fn main() -> Result<(), CsrKitError> {
    // Generate a 2048-bit RSA key and write it out passphrase-protected.
    let key_pair = KeyPair::create_rsa(
        &KeyGenOptions::builder()
            .bits(2048)
            .keyfile(PathBuf::from("key.pem"))
            .passphrase("test".to_string())
            .build(),
    )?;

    let subject = DistinguishedName::parse(
        "/c=DE/l=Dresden/emailAddress=test@example.com/cn=test.example.com",
    )?;

    let attributes = AttributeSpec::extension_request(vec![
        ExtensionEntry::new(
            "x509basicConstraints",
            true,
            ExtensionParams::BasicConstraints {
                ca: false,
                path_len: None,
            },
        ),
        ExtensionEntry::new(
            "subjectAlternativeName",
            false,
            ExtensionParams::SubjectAltName(vec![
                "DNS:test.example.com".to_string(),
                "DNS:www.test.example.com".to_string(),
                "IP:127.0.0.1".to_string(),
                "IP:::1".to_string(),
            ]),
        ),
    ]);

    let options = CsrOptions::builder()
        .output(PathBuf::from("csr.pem"))
        .build();
    let csr = Csr::generate(&key_pair, &subject, Some(&attributes), &options)?;

    println!("{}", csr.to_pem());
    Ok(())
}
