//! CI helpers.

use std::env;

/// Environment variable holding the git ref of the CI run.
pub const GIT_REF_ENV: &str = "GITHUB_REF";

/// Whether `git_ref` is a `v`-prefixed tag (`refs/tags/v...`).
pub fn is_tag(git_ref: &str) -> bool {
    git_ref.starts_with("refs/tags/v")
}

/// [`is_tag`] on `GITHUB_REF`. Unset counts as empty.
pub fn is_tag_from_env() -> bool {
    let git_ref = env::var(GIT_REF_ENV).unwrap_or_default();
    is_tag(&git_ref)
}
