pub mod error_handling;
pub mod limits;
pub mod validation;

pub use error_handling::*;
pub use validation::*;

pub fn to_hex(data: &[u8]) -> String {
    data.iter().map(|b| format!("{:02x}", b)).collect()
}
