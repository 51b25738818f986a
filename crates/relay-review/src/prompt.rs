use std::fmt::Write;

use relay_core::PullFile;

const REVIEW_INSTRUCTION: &str = "Review the following GitHub pull request diff for code quality, \
     clarity, and possible improvements. Respond as a code reviewer:";

/// Concatenate file patches into one reviewable diff text.
///
/// Each file with a non-empty patch contributes a block of the form
/// `--- <filename> ---` followed by the patch and a blank separator line,
/// in listing order. Files without a patch (binary or unchanged) are
/// silently skipped.
///
/// # Examples
///
/// ```
/// use relay_core::PullFile;
/// use relay_review::prompt::build_diff_text;
///
/// let files = vec![
///     PullFile { filename: "src/lib.rs".into(), patch: Some("+fn lib() {}".into()) },
///     PullFile { filename: "logo.png".into(), patch: None },
/// ];
/// let text = build_diff_text(&files);
/// assert_eq!(text, "--- src/lib.rs ---\n+fn lib() {}\n\n");
/// ```
pub fn build_diff_text(files: &[PullFile]) -> String {
    let mut text = String::new();
    for file in files {
        let Some(patch) = file.patch.as_deref().filter(|p| !p.is_empty()) else {
            continue;
        };
        let _ = write!(text, "--- {} ---\n{}\n\n", file.filename, patch);
    }
    text
}

/// Embed the diff text into the fixed review instruction.
pub fn build_review_prompt(diff_text: &str) -> String {
    format!("{REVIEW_INSTRUCTION}\n\n{diff_text}")
}
