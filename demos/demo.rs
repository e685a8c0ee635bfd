use std::sync::Arc;

use zkp_layout::utils::to_hex;
use zkp_layout::{
    CalldataDigestVerifier, LayoutResult, ProofConfig, ProofPipeline, RawProof, SelectionSpec,
    ShapeCheckedVerifier,
};

fn main() -> LayoutResult<()> {
    let config = Arc::new(ProofConfig::from_json_str(include_str!(
        "../configs/keccak_goldilocks.json"
    ))?);
    let selection = SelectionSpec::from_json_str(include_str!(
        "../configs/keccak_goldilocks_selection.json"
    ))?;
    let pipeline = ProofPipeline::new(config.clone(), selection)?;

    // A synthetic proof: canonical limbs in every section plus a 64-byte trailer.
    let bytes: Vec<u8> = (0..config.fixed_len() + 64)
        .map(|i| if i % 8 == 0 { (i / 8) as u8 } else { 0 })
        .collect();
    let encoded = RawProof::from_bytes(bytes)?.to_base64();
    println!("proof size: {}", encoded.len());

    // 1) Decode and assemble
    let proof = RawProof::from_base64(&encoded)?;
    let input = pipeline.prepare(&proof)?;
    println!("signature={}", input.abi_signature());
    for field in input.fields() {
        println!("{} <- {} ({} elements)", field.name(), field.section(), field.elements().len());
    }
    println!("wires_cap limbs={:?}", input.field("wires_cap").map(|f| f.digest_limbs()));
    println!("rest_bytes={}", input.rest_bytes().len());

    // 2) Verify against a boundary that knows this exact argument
    let verifier = ShapeCheckedVerifier::matching(&input, CalldataDigestVerifier::for_input(&input));
    println!("argument digest={}", to_hex(&input.digest()));
    println!("verified={}", pipeline.run(&proof, &verifier)?);

    // 3) A flipped trailer byte is a rejection, not an error
    let mut tampered = proof.as_bytes().to_vec();
    if let Some(last) = tampered.last_mut() {
        *last ^= 0xff;
    }
    let tampered = RawProof::from_bytes(tampered)?;
    println!("tampered_verified={}", pipeline.run(&tampered, &verifier)?);

    // 4) Batch
    let results = pipeline.run_batch(&[proof, tampered], &verifier);
    println!("batch={:?}", results);

    Ok(())
}
