pub mod assets;
pub mod cli;
pub mod command;
pub mod error;
pub mod forge;
pub mod publish;
pub mod result;
pub mod version;

pub use result::Result;

#[cfg(test)]
pub mod test_helpers;
