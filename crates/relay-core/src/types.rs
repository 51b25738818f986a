use serde::{Deserialize, Serialize};

/// One changed file from the pull-request files listing.
///
/// The hosting API returns more fields than these; everything beyond the
/// filename and patch is ignored on deserialization.
///
/// # Examples
///
/// ```
/// use relay_core::PullFile;
///
/// let file: PullFile = serde_json::from_str(
///     r#"{"filename": "src/lib.rs", "status": "modified", "patch": "+fn main() {}"}"#,
/// )
/// .unwrap();
/// assert_eq!(file.filename, "src/lib.rs");
/// assert!(file.patch.is_some());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullFile {
    /// Path of the file within the repository.
    pub filename: String,
    /// Unified-diff text; absent for binary or unchanged files.
    pub patch: Option<String>,
}
