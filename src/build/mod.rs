//! Our build utils

mod solidity;

pub use solidity::SolidityBuilder;
