//! Password digest comparison

mod hasher;

pub use hasher::HashAlgorithm;
