#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Package installation for dna
//!
//! [`Installer`] walks a package's dependencies depth-first, fetches each
//! file through [`SourceFetcher`] and records the package in the install
//! state only when every one of its files landed.

mod fetcher;
mod installer;

pub use fetcher::SourceFetcher;
pub use installer::Installer;
