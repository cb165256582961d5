pub mod network;
pub mod records;

pub use network::*;
pub use records::*;
