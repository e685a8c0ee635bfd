use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::assembler::{ProofAssembler, SelectionSpec, VerifierInput};
use crate::config::ProofConfig;
use crate::decoder::SectionLayoutDecoder;
use crate::proof::RawProof;
use crate::utils::error_handling::LayoutResult;
use crate::utils::to_hex;
use crate::verifier::VerifierAdapter;

/// Config load → decode → assemble → verify, with no state kept between runs.
///
/// The configuration is shared read-only, so one pipeline can serve any
/// number of concurrent runs.
pub struct ProofPipeline {
    config: Arc<ProofConfig>,
    assembler: ProofAssembler,
}

impl ProofPipeline {
    /// Build a pipeline, checking the selection against the schema up front.
    pub fn new(config: Arc<ProofConfig>, selection: SelectionSpec) -> LayoutResult<Self> {
        selection.validate_against(&config)?;
        Ok(Self {
            config,
            assembler: ProofAssembler::new(selection),
        })
    }

    pub fn from_json(config_json: &str, selection_json: &str) -> LayoutResult<Self> {
        let config = ProofConfig::from_json_str(config_json)?;
        let selection = SelectionSpec::from_json_str(selection_json)?;
        Self::new(Arc::new(config), selection)
    }

    pub fn config(&self) -> &Arc<ProofConfig> {
        &self.config
    }

    pub fn selection(&self) -> &SelectionSpec {
        self.assembler.spec()
    }

    /// Decode and assemble; the raw bytes are not needed afterwards.
    pub fn prepare(&self, proof: &RawProof) -> LayoutResult<VerifierInput> {
        let decoded = SectionLayoutDecoder::new(&self.config).decode(proof.as_bytes())?;
        self.assembler.assemble(&decoded)
    }

    pub fn run<V>(&self, proof: &RawProof, verifier: &V) -> LayoutResult<bool>
    where
        V: VerifierAdapter + ?Sized,
    {
        let tag = to_hex(&proof.fingerprint()[..8]);
        let input = self.prepare(proof).map_err(|err| {
            tracing::warn!(proof = %tag, error = %err, "failed to prepare verifier input");
            err
        })?;

        match verifier.verify(&input) {
            Ok(true) => {
                tracing::info!(proof = %tag, verifier = verifier.name(), "proof accepted");
                Ok(true)
            }
            Ok(false) => {
                tracing::warn!(proof = %tag, verifier = verifier.name(), "proof rejected");
                Ok(false)
            }
            Err(err) => {
                tracing::warn!(proof = %tag, verifier = verifier.name(), error = %err, "verifier call failed");
                Err(err)
            }
        }
    }

    pub fn run_base64<V>(&self, encoded: &str, verifier: &V) -> LayoutResult<bool>
    where
        V: VerifierAdapter + ?Sized,
    {
        let proof = RawProof::from_base64(encoded)?;
        self.run(&proof, verifier)
    }

    /// Run every proof independently; slot `i` holds the outcome for `proofs[i]`.
    #[cfg(feature = "parallel")]
    pub fn run_batch<V>(&self, proofs: &[RawProof], verifier: &V) -> Vec<LayoutResult<bool>>
    where
        V: VerifierAdapter + ?Sized,
    {
        proofs.par_iter().map(|p| self.run(p, verifier)).collect()
    }

    /// Run every proof independently; slot `i` holds the outcome for `proofs[i]`.
    #[cfg(not(feature = "parallel"))]
    pub fn run_batch<V>(&self, proofs: &[RawProof], verifier: &V) -> Vec<LayoutResult<bool>>
    where
        V: VerifierAdapter + ?Sized,
    {
        proofs.iter().map(|p| self.run(p, verifier)).collect()
    }
}
