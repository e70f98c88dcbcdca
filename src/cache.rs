// src/cache.rs
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

/// Maps a remote template identifier to its directory under the cache root.
///
/// Separator-like characters are flattened to hyphens so the result is
/// always a single path segment; a short digest of the original identifier
/// keeps distinct identifiers (e.g. `a/b` vs `a-b`) from sharing a
/// directory.
pub fn cache_path_for(cache_root: &Path, remote_id: &str) -> PathBuf {
  let sanitized: String = remote_id
    .chars()
    .map(|c| if matches!(c, '/' | ':' | '\\') { '-' } else { c })
    .collect();

  let digest = Sha256::digest(remote_id.as_bytes());
  let short: String = digest.iter().take(4).map(|b| format!("{:02x}", b)).collect();

  cache_root.join(format!("{}-{}", sanitized, short))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn cache_path_is_deterministic() {
    let root = Path::new("/home/u/.cache/seedkit/templates");
    assert_eq!(
      cache_path_for(root, "owner/repo"),
      cache_path_for(root, "owner/repo")
    );
  }

  #[test]
  fn cache_path_is_a_single_segment_under_the_root() {
    let root = Path::new("/cache");
    for id in ["owner/repo", "gitlab:owner/repo", "owner/repo#next"] {
      let path = cache_path_for(root, id);
      assert_eq!(path.parent(), Some(root), "{id} escaped the cache root");
      let segment = path.file_name().unwrap().to_string_lossy();
      assert!(!segment.contains('/'), "{segment} contains a separator");
      assert!(!segment.contains(':'), "{segment} contains a separator");
    }
  }

  #[test]
  fn separator_only_differences_do_not_collide() {
    let root = Path::new("/cache");
    let ids = ["a/b", "a-b", "a:b", "a/b#dev", "a/b-dev"];
    for (i, r1) in ids.iter().enumerate() {
      for r2 in &ids[i + 1..] {
        assert_ne!(
          cache_path_for(root, r1),
          cache_path_for(root, r2),
          "{r1} and {r2} collided"
        );
      }
    }
  }
}
