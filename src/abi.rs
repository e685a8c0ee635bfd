//! Mapping of verifier-input fields onto Solidity ABI types and values.
//!
//! An element of width <= 32 crosses the boundary as a `bytesN` word, a wider
//! one as `bytes`. The argument is encoded as a parameter list, the way a
//! contract call receives it.

use alloy_dyn_abi::{DynSolType, DynSolValue};
use alloy_primitives::B256;

pub const WORD: usize = 32;

/// Type used for a single element of `width` bytes.
pub fn element_type(width: usize) -> DynSolType {
    if (1..=WORD).contains(&width) {
        DynSolType::FixedBytes(width)
    } else {
        DynSolType::Bytes
    }
}

pub fn element_value(data: &[u8]) -> DynSolValue {
    if (1..=WORD).contains(&data.len()) {
        DynSolValue::FixedBytes(B256::right_padding_from(data), data.len())
    } else {
        DynSolValue::Bytes(data.to_vec())
    }
}

/// Render a parameter tuple signature such as `(bytes32,bytes16[],bytes)`.
pub fn signature(types: Vec<DynSolType>) -> String {
    DynSolType::Tuple(types).sol_type_name().into_owned()
}

/// Encode `values` as call parameters.
pub fn encode_params(values: Vec<DynSolValue>) -> Vec<u8> {
    DynSolValue::Tuple(values).abi_encode_params()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(value: usize) -> Vec<u8> {
        let mut w = vec![0u8; WORD];
        w[WORD - 8..].copy_from_slice(&(value as u64).to_be_bytes());
        w
    }

    fn padded(data: &[u8]) -> Vec<u8> {
        let mut w = data.to_vec();
        w.resize(WORD, 0);
        w
    }

    #[test]
    fn static_then_dynamic_bytes() {
        let digest = [0xabu8; 32];
        let encoded = encode_params(vec![
            element_value(&digest),
            DynSolValue::Bytes(b"abc".to_vec()),
        ]);

        let mut expected = digest.to_vec();
        expected.extend(word(0x40));
        expected.extend(word(3));
        expected.extend(padded(b"abc"));
        assert_eq!(encoded, expected);
    }

    #[test]
    fn array_of_words() {
        let a = vec![1u8; 32];
        let b = vec![2u8; 32];
        let encoded = encode_params(vec![DynSolValue::Array(vec![
            element_value(&a),
            element_value(&b),
        ])]);

        let mut expected = word(0x20);
        expected.extend(word(2));
        expected.extend(a);
        expected.extend(b);
        assert_eq!(encoded, expected);
    }

    #[test]
    fn wide_elements_become_dynamic_bytes() {
        let wide = vec![7u8; 40];
        assert_eq!(element_value(&wide), DynSolValue::Bytes(wide.clone()));
        let encoded = encode_params(vec![DynSolValue::Array(vec![element_value(&wide)])]);

        let mut expected = word(0x20);
        expected.extend(word(1));
        expected.extend(word(0x20));
        expected.extend(word(40));
        expected.extend(&wide);
        expected.extend(vec![0u8; 24]);
        assert_eq!(encoded, expected);
    }

    #[test]
    fn short_elements_are_left_aligned_words() {
        let encoded = encode_params(vec![element_value(&[0x11; 16])]);
        assert_eq!(encoded, padded(&[0x11; 16]));
    }

    #[test]
    fn signature_renders_nested_types() {
        let types = vec![
            element_type(32),
            DynSolType::Array(Box::new(element_type(16))),
            DynSolType::Array(Box::new(element_type(48))),
            DynSolType::Bytes,
        ];
        assert_eq!(signature(types), "(bytes32,bytes16[],bytes[],bytes)");
    }
}
