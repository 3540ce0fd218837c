//! File input for room history.

pub mod import;
