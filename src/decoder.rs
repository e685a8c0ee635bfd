//! Section layout decoding.
//!
//! A proof buffer is a flat concatenation of fixed-width sections followed by
//! an opaque trailer. Decoding threads a single cursor through the schema's
//! sections in order; each step yields the section's element views and the
//! next cursor. Nothing is copied and the buffer is never modified.

use crate::config::{ProofConfig, SectionLayout};
use crate::utils::error_handling::{LayoutError, LayoutResult};

/// Elements of one section, each a view of exactly `element_byte_width` bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedSection<'a> {
    layout: &'a SectionLayout,
    offset: usize,
    elements: Vec<&'a [u8]>,
}

impl<'a> DecodedSection<'a> {
    pub fn name(&self) -> &'a str {
        let layout: &'a SectionLayout = self.layout;
        layout.name()
    }

    pub fn element_byte_width(&self) -> usize {
        self.layout.element_byte_width()
    }

    /// Byte offset of the section's first element in the proof buffer.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn byte_len(&self) -> usize {
        self.layout.byte_len()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'a [u8]> {
        self.elements.get(index).copied()
    }

    pub fn elements(&self) -> &[&'a [u8]] {
        &self.elements
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a [u8]> + '_ {
        self.elements.iter().copied()
    }
}

/// Result of a successful decode: every fixed section plus the trailer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedProof<'a> {
    sections: Vec<DecodedSection<'a>>,
    trailer: &'a [u8],
    trailer_offset: usize,
}

impl<'a> DecodedProof<'a> {
    /// Sections in schema order.
    pub fn sections(&self) -> &[DecodedSection<'a>] {
        &self.sections
    }

    pub fn section(&self, name: &str) -> LayoutResult<&DecodedSection<'a>> {
        self.sections
            .iter()
            .find(|s| s.name() == name)
            .ok_or_else(|| {
                LayoutError::ConfigError(format!("section '{}' is not declared in the schema", name))
            })
    }

    /// Bytes left after the last fixed section; never chunked.
    pub fn trailer(&self) -> &'a [u8] {
        self.trailer
    }

    pub fn trailer_offset(&self) -> usize {
        self.trailer_offset
    }
}

pub struct SectionLayoutDecoder<'c> {
    config: &'c ProofConfig,
}

impl<'c> SectionLayoutDecoder<'c> {
    pub fn new(config: &'c ProofConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &'c ProofConfig {
        self.config
    }

    /// Decode `buffer` against the schema. Fails atomically: either every
    /// section decodes or no section is returned.
    pub fn decode<'a>(&self, buffer: &'a [u8]) -> LayoutResult<DecodedProof<'a>>
    where
        'c: 'a,
    {
        let (sections, cursor) = self.config.sections().iter().try_fold(
            (Vec::with_capacity(self.config.len()), 0usize),
            |(mut sections, cursor), layout| {
                let (section, next) = decode_section(buffer, cursor, layout)?;
                sections.push(section);
                Ok::<_, LayoutError>((sections, next))
            },
        )?;

        tracing::debug!(
            sections = sections.len(),
            consumed = cursor,
            trailer = buffer.len() - cursor,
            "decoded proof layout"
        );

        Ok(DecodedProof {
            sections,
            trailer: &buffer[cursor..],
            trailer_offset: cursor,
        })
    }
}

/// Decode `buffer` with `config`; see [`SectionLayoutDecoder::decode`].
pub fn decode<'a>(buffer: &'a [u8], config: &'a ProofConfig) -> LayoutResult<DecodedProof<'a>> {
    SectionLayoutDecoder::new(config).decode(buffer)
}

fn decode_section<'a>(
    buffer: &'a [u8],
    cursor: usize,
    layout: &'a SectionLayout,
) -> LayoutResult<(DecodedSection<'a>, usize)> {
    let required = layout.byte_len();
    let available = buffer.len().saturating_sub(cursor);
    if required > available {
        return Err(LayoutError::TruncatedBuffer {
            section: layout.name().to_string(),
            offset: cursor,
            required,
            available,
        });
    }

    let end = cursor + required;
    let elements: Vec<&'a [u8]> = buffer[cursor..end]
        .chunks_exact(layout.element_byte_width())
        .collect();
    Ok((
        DecodedSection {
            layout,
            offset: cursor,
            elements,
        },
        end,
    ))
}
