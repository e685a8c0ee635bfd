use pyo3::prelude::*;

use crate::config::ProofConfig;
use crate::decoder::decode;
use crate::pipeline::ProofPipeline;
use crate::proof::RawProof;

/// Decode a base64 proof; returns `([(section, [element, ...]), ...], trailer)`.
#[pyfunction]
pub fn decode_proof(
    config_json: &str,
    proof_base64: &str,
) -> PyResult<(Vec<(String, Vec<Vec<u8>>)>, Vec<u8>)> {
    let config = ProofConfig::from_json_str(config_json)?;
    let proof = RawProof::from_base64(proof_base64)?;
    let decoded = decode(proof.as_bytes(), &config)?;

    let sections: Vec<(String, Vec<Vec<u8>>)> = decoded
        .sections()
        .iter()
        .map(|s| (s.name().to_string(), s.iter().map(<[u8]>::to_vec).collect()))
        .collect();
    Ok((sections, decoded.trailer().to_vec()))
}

/// Decode and assemble a base64 proof, returning the encoded verifier argument.
#[pyfunction]
pub fn encode_verifier_input(
    config_json: &str,
    selection_json: &str,
    proof_base64: &str,
) -> PyResult<Vec<u8>> {
    let pipeline = ProofPipeline::from_json(config_json, selection_json)?;
    let proof = RawProof::from_base64(proof_base64)?;
    let input = pipeline.prepare(&proof)?;
    Ok(input.to_abi_bytes())
}

#[pymodule]
fn zkp_layout(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(decode_proof, m)?)?;
    m.add_function(wrap_pyfunction!(encode_verifier_input, m)?)?;
    Ok(())
}
