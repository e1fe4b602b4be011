#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Install state for dna
//!
//! A single JSON record at the root of the dna home: the ordered endpoint
//! list, the set of spliced packages, and advisory timestamps. Loading never
//! fails; saving is atomic and its failure is an error for the caller.

pub mod models;
mod store;

pub use models::{parse_timestamp, InstallState};
pub use store::StateStore;
