//! Offline asset tooling.
//!
//! Format conversion is done by external tools; this module only normalizes file names
//! so catalog sources can use a dense `1..N` sequence per folder.

pub mod renumber;
