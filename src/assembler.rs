//! Verifier input assembly.
//!
//! A [`SelectionSpec`] names every field of the verifier argument and says
//! which decoded section, and which elements of it, fill that field. The
//! trailer is passed through untouched as the final `rest_bytes` field.

use alloy_dyn_abi::{DynSolType, DynSolValue};
use p3_goldilocks::Goldilocks;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::abi;
use crate::config::ProofConfig;
use crate::decoder::{DecodedProof, DecodedSection};
use crate::field::{digest_limbs, element_limbs, DIGEST_BYTES};
use crate::utils::error_handling::{LayoutError, LayoutResult};
use crate::utils::limits::MAX_SELECTION_FIELDS;
use crate::utils::validation::{validate_name, validate_range_bounds, validate_unique_names};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    /// One element, placed in the field as a scalar value.
    Element(usize),
    /// Elements `start..end` as a vector.
    Range { start: usize, end: usize },
    /// The whole decoded section as a vector.
    All,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSelection {
    pub field: String,
    pub section: String,
    pub select: Selection,
}

impl FieldSelection {
    pub fn new(field: impl Into<String>, section: impl Into<String>, select: Selection) -> Self {
        Self {
            field: field.into(),
            section: section.into(),
            select,
        }
    }
}

/// Ordered field selections; field order is the verifier argument order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SelectionDescriptor")]
pub struct SelectionSpec {
    fields: Vec<FieldSelection>,
}

/// Unvalidated wire form of a [`SelectionSpec`].
#[derive(Deserialize)]
struct SelectionDescriptor {
    fields: Vec<FieldSelection>,
}

impl TryFrom<SelectionDescriptor> for SelectionSpec {
    type Error = LayoutError;

    fn try_from(descriptor: SelectionDescriptor) -> LayoutResult<Self> {
        SelectionSpec::new(descriptor.fields)
    }
}

impl SelectionSpec {
    pub fn new(fields: Vec<FieldSelection>) -> LayoutResult<Self> {
        if fields.len() > MAX_SELECTION_FIELDS {
            return Err(LayoutError::ConfigError(format!(
                "too many selection fields: {}, max {}",
                fields.len(),
                MAX_SELECTION_FIELDS
            )));
        }
        validate_unique_names(fields.iter().map(|f| f.field.as_str()), "field")?;
        for f in &fields {
            validate_name(&f.field, "field")?;
            if let Selection::Range { start, end } = f.select {
                validate_range_bounds(&f.field, start, end)?;
            }
        }
        Ok(Self { fields })
    }

    pub fn from_json_str(json: &str) -> LayoutResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| LayoutError::ConfigError(format!("invalid selection spec: {}", e)))
    }

    /// Every section of `config`, whole, in schema order.
    pub fn whole_sections(config: &ProofConfig) -> Self {
        Self {
            fields: config
                .sections()
                .iter()
                .map(|s| FieldSelection::new(s.name(), s.name(), Selection::All))
                .collect(),
        }
    }

    pub fn fields(&self) -> &[FieldSelection] {
        &self.fields
    }

    /// Check that every referenced section exists and that fixed indices fit
    /// the declared counts.
    pub fn validate_against(&self, config: &ProofConfig) -> LayoutResult<()> {
        for f in &self.fields {
            let layout = config.section(&f.section).map_err(|_| {
                LayoutError::ConfigError(format!(
                    "field '{}' references section '{}' which is not declared in the schema",
                    f.field, f.section
                ))
            })?;
            check_bounds(f, layout.element_count())?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Element(Vec<u8>),
    Vector(Vec<Vec<u8>>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputField {
    name: String,
    section: String,
    element_byte_width: usize,
    value: FieldValue,
}

impl InputField {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn element_byte_width(&self) -> usize {
        self.element_byte_width
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    /// All elements of the field, one for a scalar field.
    pub fn elements(&self) -> Vec<&[u8]> {
        match &self.value {
            FieldValue::Element(e) => vec![e.as_slice()],
            FieldValue::Vector(v) => v.iter().map(|e| e.as_slice()).collect(),
        }
    }

    /// Elements as canonical Goldilocks limbs.
    pub fn limbs(&self) -> LayoutResult<Vec<Vec<Goldilocks>>> {
        self.elements().into_iter().map(element_limbs).collect()
    }

    /// Elements as digests mapped to field elements.
    pub fn digest_limbs(&self) -> LayoutResult<Vec<[Goldilocks; 4]>> {
        if self.element_byte_width != DIGEST_BYTES {
            return Err(LayoutError::InvalidEncoding(format!(
                "field '{}' holds {}-byte elements, not digests",
                self.name, self.element_byte_width
            )));
        }
        self.elements().into_iter().map(digest_limbs).collect()
    }

    fn sol_type(&self) -> DynSolType {
        let element = abi::element_type(self.element_byte_width);
        match self.value {
            FieldValue::Element(_) => element,
            FieldValue::Vector(_) => DynSolType::Array(Box::new(element)),
        }
    }

    fn sol_value(&self) -> DynSolValue {
        match &self.value {
            FieldValue::Element(e) => abi::element_value(e),
            FieldValue::Vector(v) => DynSolValue::Array(v.iter().map(|e| abi::element_value(e)).collect()),
        }
    }
}

/// The verifier argument: selected fields followed by the opaque trailer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifierInput {
    fields: Vec<InputField>,
    rest_bytes: Vec<u8>,
}

impl VerifierInput {
    pub fn fields(&self) -> &[InputField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&InputField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn rest_bytes(&self) -> &[u8] {
        &self.rest_bytes
    }

    /// Tuple type of the call argument, e.g. `(bytes32,bytes16[],bytes)`.
    pub fn abi_signature(&self) -> String {
        let mut types: Vec<DynSolType> = self.fields.iter().map(InputField::sol_type).collect();
        types.push(DynSolType::Bytes);
        abi::signature(types)
    }

    /// ABI-encoded call parameters.
    pub fn to_abi_bytes(&self) -> Vec<u8> {
        let mut values: Vec<DynSolValue> = self.fields.iter().map(InputField::sol_value).collect();
        values.push(DynSolValue::Bytes(self.rest_bytes.clone()));
        abi::encode_params(values)
    }

    /// SHA-256 over the encoded call argument.
    pub fn digest(&self) -> [u8; 32] {
        Sha256::digest(self.to_abi_bytes()).into()
    }
}

pub struct ProofAssembler {
    spec: SelectionSpec,
}

impl ProofAssembler {
    pub fn new(spec: SelectionSpec) -> Self {
        Self { spec }
    }

    pub fn spec(&self) -> &SelectionSpec {
        &self.spec
    }

    /// Assemble from a decoded proof, using its trailer as `rest_bytes`.
    pub fn assemble(&self, decoded: &DecodedProof<'_>) -> LayoutResult<VerifierInput> {
        assemble(decoded, decoded.trailer(), &self.spec)
    }
}

/// Build a [`VerifierInput`] from decoded sections and a trailer. Fails
/// without producing a partial input.
pub fn assemble(
    sections: &DecodedProof<'_>,
    trailer: &[u8],
    spec: &SelectionSpec,
) -> LayoutResult<VerifierInput> {
    let fields = spec
        .fields()
        .iter()
        .map(|f| select_field(sections, f))
        .collect::<LayoutResult<Vec<_>>>()?;

    tracing::debug!(
        fields = fields.len(),
        rest_bytes = trailer.len(),
        "assembled verifier input"
    );

    Ok(VerifierInput {
        fields,
        rest_bytes: trailer.to_vec(),
    })
}

fn select_field(sections: &DecodedProof<'_>, f: &FieldSelection) -> LayoutResult<InputField> {
    let section = sections.section(&f.section).map_err(|_| {
        LayoutError::ConfigError(format!(
            "field '{}' references section '{}' which is not declared in the schema",
            f.field, f.section
        ))
    })?;
    check_bounds(f, section.len())?;

    let value = match f.select {
        Selection::Element(i) => FieldValue::Element(element_at(section, f, i)?.to_vec()),
        Selection::Range { start, end } => FieldValue::Vector(
            (start..end)
                .map(|i| element_at(section, f, i).map(<[u8]>::to_vec))
                .collect::<LayoutResult<Vec<_>>>()?,
        ),
        Selection::All => FieldValue::Vector(section.iter().map(<[u8]>::to_vec).collect()),
    };

    Ok(InputField {
        name: f.field.clone(),
        section: f.section.clone(),
        element_byte_width: section.element_byte_width(),
        value,
    })
}

fn element_at<'a>(section: &DecodedSection<'a>, f: &FieldSelection, index: usize) -> LayoutResult<&'a [u8]> {
    section.get(index).ok_or_else(|| out_of_range(f, index, section.len()))
}

fn check_bounds(f: &FieldSelection, len: usize) -> LayoutResult<()> {
    match f.select {
        Selection::Element(i) if i >= len => Err(out_of_range(f, i, len)),
        Selection::Range { end, .. } if end > len => Err(out_of_range(f, end - 1, len)),
        _ => Ok(()),
    }
}

fn out_of_range(f: &FieldSelection, index: usize, len: usize) -> LayoutError {
    LayoutError::SelectionOutOfRange {
        field: f.field.clone(),
        section: f.section.clone(),
        index,
        len,
    }
}
