//! crypto-resume: crypto operations that pause for a passphrase or a hardware-token
//! tap and pick up where they left off, with Hexagonal Architecture.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;

#[cfg(test)]
mod test_support;
