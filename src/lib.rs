pub mod abi;
pub mod assembler;
pub mod config;
pub mod decoder;
pub mod field;
pub mod pipeline;
pub mod proof;
pub mod verifier;

pub mod utils;

#[cfg(feature = "python")]
mod python;

pub use assembler::{assemble, FieldSelection, FieldValue, InputField, ProofAssembler, Selection, SelectionSpec, VerifierInput};
pub use config::{ConfigDescriptor, ProofConfig, ProofConfigBuilder, SectionDescriptor, SectionLayout};
pub use decoder::{decode, DecodedProof, DecodedSection, SectionLayoutDecoder};
pub use pipeline::ProofPipeline;
pub use proof::RawProof;
pub use utils::error_handling::{LayoutError, LayoutResult};
pub use verifier::{CalldataDigestVerifier, ShapeCheckedVerifier, VerifierAdapter};
