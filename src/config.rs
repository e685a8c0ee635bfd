//! Proof configuration: the ordered list of fixed-width sections a proof
//! buffer is made of.
//!
//! A configuration is built once, validated eagerly, and shared read-only by
//! every decode that uses it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::utils::error_handling::{safe_add, safe_mul, LayoutError, LayoutResult};
use crate::utils::limits::MAX_SECTIONS;
use crate::utils::validation::{
    validate_element_count, validate_element_width, validate_name, validate_unique_names,
};

/// One section entry as it appears in a JSON descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionDescriptor {
    pub name: String,
    #[serde(alias = "elementCount")]
    pub element_count: i64,
    #[serde(alias = "elementByteWidth")]
    pub element_byte_width: i64,
}

/// External proof configuration descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigDescriptor {
    #[serde(default)]
    pub label: Option<String>,
    pub sections: Vec<SectionDescriptor>,
}

/// A validated section: `element_count` elements of `element_byte_width` bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionLayout {
    name: String,
    element_byte_width: usize,
    element_count: usize,
    byte_len: usize,
}

impl SectionLayout {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn element_byte_width(&self) -> usize {
        self.element_byte_width
    }

    pub fn element_count(&self) -> usize {
        self.element_count
    }

    /// Total bytes this section occupies in a proof buffer.
    pub fn byte_len(&self) -> usize {
        self.byte_len
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofConfig {
    label: Option<String>,
    sections: Vec<SectionLayout>,
    index: HashMap<String, usize>,
    fixed_len: usize,
}

impl ProofConfig {
    pub fn from_descriptor(descriptor: ConfigDescriptor) -> LayoutResult<Self> {
        if descriptor.sections.len() > MAX_SECTIONS {
            return Err(LayoutError::ConfigError(format!(
                "too many sections: {}, max {}",
                descriptor.sections.len(),
                MAX_SECTIONS
            )));
        }
        validate_unique_names(
            descriptor.sections.iter().map(|s| s.name.as_str()),
            "section",
        )?;

        let mut sections = Vec::with_capacity(descriptor.sections.len());
        let mut fixed_len = 0usize;
        for entry in descriptor.sections {
            validate_name(&entry.name, "section")?;
            let element_byte_width = validate_element_width(&entry.name, entry.element_byte_width)?;
            let element_count = validate_element_count(&entry.name, entry.element_count)?;
            let byte_len = safe_mul(element_byte_width, element_count)?;
            fixed_len = safe_add(fixed_len, byte_len)?;
            sections.push(SectionLayout {
                name: entry.name,
                element_byte_width,
                element_count,
                byte_len,
            });
        }

        let index = sections
            .iter()
            .enumerate()
            .map(|(i, s)| (s.name.clone(), i))
            .collect();

        Ok(ProofConfig {
            label: descriptor.label,
            sections,
            index,
            fixed_len,
        })
    }

    pub fn from_json_str(json: &str) -> LayoutResult<Self> {
        let descriptor: ConfigDescriptor = serde_json::from_str(json)
            .map_err(|e| LayoutError::ConfigError(format!("invalid config descriptor: {}", e)))?;
        Self::from_descriptor(descriptor)
    }

    pub fn from_json_slice(json: &[u8]) -> LayoutResult<Self> {
        let descriptor: ConfigDescriptor = serde_json::from_slice(json)
            .map_err(|e| LayoutError::ConfigError(format!("invalid config descriptor: {}", e)))?;
        Self::from_descriptor(descriptor)
    }

    pub fn builder() -> ProofConfigBuilder {
        ProofConfigBuilder::default()
    }

    /// Round-trip back into descriptor form.
    pub fn to_descriptor(&self) -> ConfigDescriptor {
        ConfigDescriptor {
            label: self.label.clone(),
            sections: self
                .sections
                .iter()
                .map(|s| SectionDescriptor {
                    name: s.name.clone(),
                    element_count: s.element_count as i64,
                    element_byte_width: s.element_byte_width as i64,
                })
                .collect(),
        }
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Sections in decode order.
    pub fn sections(&self) -> &[SectionLayout] {
        &self.sections
    }

    /// Look up a section by name; an unknown name is a configuration error.
    pub fn section(&self, name: &str) -> LayoutResult<&SectionLayout> {
        self.index
            .get(name)
            .map(|&i| &self.sections[i])
            .ok_or_else(|| {
                LayoutError::ConfigError(format!("section '{}' is not declared in the schema", name))
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Sum of all fixed-section byte lengths; the minimum valid proof length.
    pub fn fixed_len(&self) -> usize {
        self.fixed_len
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProofConfigBuilder {
    label: Option<String>,
    sections: Vec<SectionDescriptor>,
}

impl ProofConfigBuilder {
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn section(mut self, name: impl Into<String>, element_byte_width: i64, element_count: i64) -> Self {
        self.sections.push(SectionDescriptor {
            name: name.into(),
            element_count,
            element_byte_width,
        });
        self
    }

    pub fn build(self) -> LayoutResult<ProofConfig> {
        ProofConfig::from_descriptor(ConfigDescriptor {
            label: self.label,
            sections: self.sections,
        })
    }
}
