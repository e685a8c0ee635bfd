use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use sha2::{Digest, Sha256};

use crate::utils::error_handling::{LayoutError, LayoutResult};
use crate::utils::limits::{MAX_PROOF_BASE64_LEN, MAX_PROOF_TOTAL_BYTES};

/// Undecoded proof bytes, immutable after ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawProof {
    bytes: Vec<u8>,
}

impl RawProof {
    pub fn from_bytes(bytes: Vec<u8>) -> LayoutResult<Self> {
        if bytes.len() > MAX_PROOF_TOTAL_BYTES {
            return Err(LayoutError::InvalidEncoding(format!(
                "proof too large: {} bytes, max {}",
                bytes.len(),
                MAX_PROOF_TOTAL_BYTES
            )));
        }
        Ok(RawProof { bytes })
    }

    /// Decode a standard-alphabet base64 transport string.
    pub fn from_base64(encoded: &str) -> LayoutResult<Self> {
        let encoded = encoded.trim();
        if encoded.len() > MAX_PROOF_BASE64_LEN {
            return Err(LayoutError::InvalidEncoding(format!(
                "base64 proof too long: {} chars, max {}",
                encoded.len(),
                MAX_PROOF_BASE64_LEN
            )));
        }
        let bytes = BASE64_STANDARD
            .decode(encoded)
            .map_err(|e| LayoutError::InvalidEncoding(format!("invalid base64 proof: {}", e)))?;
        Self::from_bytes(bytes)
    }

    pub fn to_base64(&self) -> String {
        BASE64_STANDARD.encode(&self.bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// SHA-256 of the raw bytes, used to tag log lines.
    pub fn fingerprint(&self) -> [u8; 32] {
        Sha256::digest(&self.bytes).into()
    }
}

impl AsRef<[u8]> for RawProof {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base64_ingestion_trims_whitespace() {
        let proof = RawProof::from_base64("  AQIDBA==\n").unwrap();
        assert_eq!(proof.as_bytes(), &[1, 2, 3, 4]);
        assert_eq!(proof.to_base64(), "AQIDBA==");
    }

    #[test]
    fn bad_base64_is_encoding_error() {
        assert!(matches!(
            RawProof::from_base64("not base64!"),
            Err(LayoutError::InvalidEncoding(_))
        ));
    }

    #[test]
    fn oversized_proof_is_rejected() {
        let bytes = vec![0u8; MAX_PROOF_TOTAL_BYTES + 1];
        assert!(RawProof::from_bytes(bytes).is_err());
    }

    #[test]
    fn fingerprint_depends_on_content() {
        let a = RawProof::from_bytes(vec![1, 2, 3]).unwrap();
        let b = RawProof::from_bytes(vec![1, 2, 4]).unwrap();
        assert_ne!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint(), a.clone().fingerprint());
    }
}
