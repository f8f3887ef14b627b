use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::CsrKitError;

/// Convert DER‑encoded data into a PEM‑encoded string with the provided label.
pub fn der_to_pem(der: &[u8], label: &str) -> String {
    let pem = pem::Pem::new(label, der);
    pem::encode_config(
        &pem,
        pem::EncodeConfig::new().set_line_ending(pem::LineEnding::LF),
    )
}

/// Convert a PEM‑encoded string to DER‑encoded bytes.
pub fn pem_to_der(pem_str: &str) -> Result<Vec<u8>, pem::PemError> {
    let pem = pem::parse(pem_str)?;
    Ok(pem.contents().to_vec())
}

/// Write an encoded artifact to `path`, flushing before the handle closes.
pub(crate) fn write_output(path: &Path, contents: &[u8]) -> Result<(), CsrKitError> {
    let mut file = File::create(path)
        .map_err(|e| CsrKitError::Io(format!("{}: {}", path.display(), e)))?;
    file.write_all(contents)
        .and_then(|()| file.flush())
        .map_err(|e| CsrKitError::Io(format!("{}: {}", path.display(), e)))
}
