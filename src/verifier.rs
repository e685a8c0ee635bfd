//! Verifier boundary.
//!
//! The verification algorithm lives outside this crate; adapters only carry an
//! assembled input across the boundary and report accept/reject.

use crate::assembler::VerifierInput;
use crate::utils::error_handling::{LayoutError, LayoutResult};
use crate::utils::to_hex;

/// Trait every verifier boundary must implement.
///
/// `Ok(false)` is a legitimate rejection of a well-formed input.
/// `Err(LayoutError::VerifierCallError)` means the boundary refused the call
/// itself, which points at an assembly or configuration defect.
pub trait VerifierAdapter: Send + Sync {
    /// Get the name of this verifier
    fn name(&self) -> &str;

    fn verify(&self, input: &VerifierInput) -> LayoutResult<bool>;
}

impl<V: VerifierAdapter + ?Sized> VerifierAdapter for Box<V> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn verify(&self, input: &VerifierInput) -> LayoutResult<bool> {
        (**self).verify(input)
    }
}

/// Accepts exactly one encoded argument, identified by its SHA-256 digest.
#[derive(Debug, Clone)]
pub struct CalldataDigestVerifier {
    expected: [u8; 32],
}

impl CalldataDigestVerifier {
    pub fn new(expected: [u8; 32]) -> Self {
        Self { expected }
    }

    pub fn for_input(input: &VerifierInput) -> Self {
        Self::new(input.digest())
    }

    pub fn expected(&self) -> &[u8; 32] {
        &self.expected
    }
}

impl VerifierAdapter for CalldataDigestVerifier {
    fn name(&self) -> &str {
        "calldata-digest"
    }

    fn verify(&self, input: &VerifierInput) -> LayoutResult<bool> {
        Ok(input.digest() == self.expected)
    }
}

/// Rejects calls whose argument shape differs from the declared one, then
/// delegates to `inner`.
pub struct ShapeCheckedVerifier<V> {
    field_names: Vec<String>,
    signature: String,
    inner: V,
}

impl<V: VerifierAdapter> ShapeCheckedVerifier<V> {
    pub fn new(field_names: Vec<String>, signature: impl Into<String>, inner: V) -> Self {
        Self {
            field_names,
            signature: signature.into(),
            inner,
        }
    }

    /// Take the expected shape from a known-good input.
    pub fn matching(input: &VerifierInput, inner: V) -> Self {
        Self::new(
            input.fields().iter().map(|f| f.name().to_string()).collect(),
            input.abi_signature(),
            inner,
        )
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    fn check_shape(&self, input: &VerifierInput) -> LayoutResult<()> {
        let names: Vec<&str> = input.fields().iter().map(|f| f.name()).collect();
        if names.len() != self.field_names.len()
            || names.iter().zip(&self.field_names).any(|(a, b)| *a != b.as_str())
        {
            return Err(LayoutError::VerifierCallError(format!(
                "argument fields [{}] do not match expected [{}]",
                names.join(","),
                self.field_names.join(",")
            )));
        }
        let signature = input.abi_signature();
        if signature != self.signature {
            return Err(LayoutError::VerifierCallError(format!(
                "argument type {} does not match expected {}",
                signature, self.signature
            )));
        }
        Ok(())
    }
}

impl<V: VerifierAdapter> VerifierAdapter for ShapeCheckedVerifier<V> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn verify(&self, input: &VerifierInput) -> LayoutResult<bool> {
        if let Err(err) = self.check_shape(input) {
            tracing::debug!(verifier = self.inner.name(), error = %err, "argument shape mismatch");
            return Err(err);
        }
        let accepted = self.inner.verify(input)?;
        if !accepted {
            tracing::debug!(argument = %to_hex(&input.digest()[..8]), "verifier returned false");
        }
        Ok(accepted)
    }
}
