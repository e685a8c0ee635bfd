//! Production safety limits to prevent excessive allocations / DoS.
//!
//! These limits are intentionally conservative and can be adjusted if needed.

/// Maximum size (in bytes) accepted for a single decoded proof.
pub const MAX_PROOF_TOTAL_BYTES: usize = 4 * 1024 * 1024; // 4 MiB

/// Maximum length of a base64 proof string (4 chars per 3 bytes, plus padding).
pub const MAX_PROOF_BASE64_LEN: usize = (MAX_PROOF_TOTAL_BYTES / 3 + 1) * 4;

/// Maximum number of sections a proof configuration may declare.
pub const MAX_SECTIONS: usize = 256;

/// Maximum byte width of a single section element.
pub const MAX_ELEMENT_BYTE_WIDTH: usize = 4096;

/// Maximum number of fields a selection spec may declare.
pub const MAX_SELECTION_FIELDS: usize = 256;
