//! Algorithm implementations for block diffing.
//!
//! - `lcs`: LCS edit script with run-length compression
//! - `highlight`: per-view index sets from edit runs

mod highlight;
mod lcs;

pub use highlight::DiffResult;
pub use lcs::{diff_sequences, diff_with_stats, lcs_len, EditKind, EditRun, LcsResult, LcsStats};
