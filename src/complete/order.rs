//! Display order for completion candidates
//!
//! Hidden and dashed spellings sort next to their plain counterparts:
//! `file.txt`, `.file.txt~`, `.hidden.txt`, `..hidden.txt~` and
//! `-d`, `--debug`, `-h`, `--help`.

use std::cmp::Ordering;

/// Strip leading dots, then leading dashes, counting both
fn completion_key(candidate: &str) -> (&str, usize, usize) {
    let undotted = candidate.trim_start_matches('.');
    let dots = candidate.len() - undotted.len();
    let body = undotted.trim_start_matches('-');
    let dashes = undotted.len() - body.len();
    (body, dashes, dots)
}

/// Compare two candidates in completion order
pub fn completion_cmp(a: &str, b: &str) -> Ordering {
    completion_key(a).cmp(&completion_key(b))
}

/// Stable sort in completion order
pub fn sort_for_completion<S: AsRef<str>>(candidates: &mut [S]) {
    candidates.sort_by(|a, b| completion_cmp(a.as_ref(), b.as_ref()));
}
