// src/fetch.rs
use std::fs;
use std::io::{self, Cursor};
use std::path::Path;
use std::time::Duration;

use duct::cmd;
use indicatif::ProgressBar;
use log::{debug, info};
use zip::ZipArchive;

use crate::error::SeedError;

/// Repository archives larger than this are refused rather than buffered.
const MAX_ARCHIVE_BYTES: u64 = 256 * 1024 * 1024;

/// Transport selection for a remote fetch.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchOptions {
  /// Clone with git instead of downloading an archive. Needed for private
  /// repositories and full repository URLs.
  pub clone: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Host {
  Github,
  Gitlab,
  Bitbucket,
}

impl Host {
  fn base(self) -> &'static str {
    match self {
      Host::Github => "https://github.com",
      Host::Gitlab => "https://gitlab.com",
      Host::Bitbucket => "https://bitbucket.org",
    }
  }
}

/// Parsed form of a remote template identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
enum RemoteSource {
  /// `[host:]owner/repo[#ref]`, host defaulting to GitHub.
  Hosted {
    host: Host,
    path: String,
    reference: Option<String>,
  },
  /// A full URL or scp-like form, usable only by the git transport.
  Url(String),
}

/// Fetches `remote_id` into `cache_dir`.
///
/// Any previous cache entry is removed first, so the result is never a mix
/// of old and new content; a partial directory left behind by a killed run
/// is cleaned up the same way on the next invocation. Every transport or
/// extraction error surfaces as a single `DownloadFailed`.
pub fn fetch(remote_id: &str, cache_dir: &Path, options: &FetchOptions) -> Result<(), SeedError> {
  let source = parse_remote_id(remote_id)?;

  evict(cache_dir)?;
  if let Some(parent) = cache_dir.parent() {
    fs::create_dir_all(parent)?;
  }

  let spinner = ProgressBar::new_spinner();
  spinner.set_message("Downloading template, hang tight...");
  spinner.enable_steady_tick(Duration::from_millis(100));

  let result = if options.clone {
    clone_into(remote_id, &source, cache_dir)
  } else {
    download_archive_into(remote_id, &source, cache_dir)
  };

  spinner.finish_and_clear();
  result
}

/// Removes a stale cache entry, recursively and unconditionally.
pub fn evict(cache_dir: &Path) -> Result<(), SeedError> {
  if cache_dir.exists() {
    debug!("Removing stale cache entry: {}", cache_dir.display());
    fs::remove_dir_all(cache_dir)?;
  }
  Ok(())
}

fn parse_remote_id(remote_id: &str) -> Result<RemoteSource, SeedError> {
  if remote_id.contains("://") || remote_id.starts_with("git@") {
    return Ok(RemoteSource::Url(remote_id.to_string()));
  }

  let (rest, reference) = match remote_id.split_once('#') {
    Some((rest, reference)) if !reference.is_empty() => (rest, Some(reference.to_string())),
    Some((rest, _)) => (rest, None),
    None => (remote_id, None),
  };

  let (host, path) = match rest.split_once(':') {
    Some(("github", path)) => (Host::Github, path),
    Some(("gitlab", path)) => (Host::Gitlab, path),
    Some(("bitbucket", path)) => (Host::Bitbucket, path),
    Some((other, _)) => {
      return Err(SeedError::download_failed(
        remote_id,
        format!("unknown template host \"{}\"", other),
      ));
    }
    None => (Host::Github, rest),
  };

  if path.split('/').filter(|part| !part.is_empty()).count() < 2 {
    return Err(SeedError::download_failed(
      remote_id,
      "expected an \"owner/repo\" identifier",
    ));
  }

  Ok(RemoteSource::Hosted {
    host,
    path: path.to_string(),
    reference,
  })
}

fn clone_into(remote_id: &str, source: &RemoteSource, cache_dir: &Path) -> Result<(), SeedError> {
  let url = match source {
    RemoteSource::Url(url) => url.clone(),
    RemoteSource::Hosted { host, path, .. } => format!("{}/{}.git", host.base(), path),
  };

  let mut args: Vec<std::ffi::OsString> = vec!["clone".into(), "--depth".into(), "1".into()];
  if let RemoteSource::Hosted {
    reference: Some(reference),
    ..
  } = source
  {
    args.push("--branch".into());
    args.push(reference.into());
  }
  args.push(url.clone().into());
  args.push(cache_dir.as_os_str().to_os_string());

  info!("Cloning {} into {}", url, cache_dir.display());
  let output = cmd("git", args)
    .stdout_capture()
    .stderr_capture()
    .unchecked()
    .run()
    .map_err(|e| SeedError::download_failed(remote_id, format!("failed to run git: {}", e)))?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    return Err(SeedError::download_failed(remote_id, stderr.trim()));
  }

  // The cache entry is a plain file tree, not a working clone.
  let git_dir = cache_dir.join(".git");
  if git_dir.exists() {
    fs::remove_dir_all(git_dir)?;
  }
  Ok(())
}

fn download_archive_into(
  remote_id: &str,
  source: &RemoteSource,
  cache_dir: &Path,
) -> Result<(), SeedError> {
  let url = match source {
    RemoteSource::Url(_) => {
      return Err(SeedError::download_failed(
        remote_id,
        "full repository URLs need the git transport, pass --clone",
      ));
    }
    RemoteSource::Hosted {
      host,
      path,
      reference,
    } => archive_url(*host, path, reference.as_deref()),
  };

  info!("Downloading {}", url);
  let response = ureq::get(&url)
    .call()
    .map_err(|e| SeedError::download_failed(remote_id, e.to_string()))?;
  let bytes = response
    .into_body()
    .with_config()
    .limit(MAX_ARCHIVE_BYTES)
    .read_to_vec()
    .map_err(|e| SeedError::download_failed(remote_id, e.to_string()))?;

  extract_archive(&bytes, cache_dir).map_err(|message| {
    SeedError::download_failed(remote_id, format!("failed to extract archive: {}", message))
  })
}

fn archive_url(host: Host, path: &str, reference: Option<&str>) -> String {
  match host {
    // codeload accepts HEAD for the default branch.
    Host::Github => format!(
      "https://codeload.github.com/{}/zip/{}",
      path,
      reference.unwrap_or("HEAD")
    ),
    Host::Gitlab => format!(
      "https://gitlab.com/{}/-/archive/{}/archive.zip",
      path,
      reference.unwrap_or("master")
    ),
    Host::Bitbucket => format!(
      "https://bitbucket.org/{}/get/{}.zip",
      path,
      reference.unwrap_or("master")
    ),
  }
}

/// Unpacks a repository archive into `dest`, dropping the single top-level
/// directory the hosting services wrap their archives in.
fn extract_archive(bytes: &[u8], dest: &Path) -> Result<(), String> {
  let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(|e| e.to_string())?;
  fs::create_dir_all(dest).map_err(|e| e.to_string())?;

  for index in 0..archive.len() {
    let mut entry = archive.by_index(index).map_err(|e| e.to_string())?;
    let relative = match entry.enclosed_name() {
      Some(name) => {
        let mut components = name.components();
        components.next(); // `repo-ref/` wrapper directory
        components.as_path().to_path_buf()
      }
      // Entries that would escape `dest` are skipped outright.
      None => continue,
    };
    if relative.as_os_str().is_empty() {
      continue;
    }

    let target = dest.join(relative);
    if entry.is_dir() {
      fs::create_dir_all(&target).map_err(|e| e.to_string())?;
    } else {
      if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| e.to_string())?;
      }
      let mut file = fs::File::create(&target).map_err(|e| e.to_string())?;
      io::copy(&mut entry, &mut file).map_err(|e| e.to_string())?;
    }
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::io::Write;

  #[test]
  fn bare_owner_repo_defaults_to_github() {
    assert_eq!(
      parse_remote_id("owner/repo").unwrap(),
      RemoteSource::Hosted {
        host: Host::Github,
        path: "owner/repo".to_string(),
        reference: None,
      }
    );
  }

  #[test]
  fn host_prefix_and_ref_suffix_are_split_out() {
    assert_eq!(
      parse_remote_id("gitlab:owner/repo#next").unwrap(),
      RemoteSource::Hosted {
        host: Host::Gitlab,
        path: "owner/repo".to_string(),
        reference: Some("next".to_string()),
      }
    );
  }

  #[test]
  fn full_urls_pass_through_verbatim() {
    for raw in [
      "https://example.com/owner/repo.git",
      "git@example.com:owner/repo.git",
    ] {
      assert_eq!(parse_remote_id(raw).unwrap(), RemoteSource::Url(raw.to_string()));
    }
  }

  #[test]
  fn malformed_identifiers_are_download_failures() {
    for raw in ["justaname", "codeberg:owner/repo"] {
      match parse_remote_id(raw) {
        Err(SeedError::DownloadFailed { template, .. }) => assert_eq!(template, raw),
        other => panic!("expected DownloadFailed for {raw}, got {other:?}"),
      }
    }
  }

  #[test]
  fn archive_urls_follow_the_host_layout() {
    assert_eq!(
      archive_url(Host::Github, "o/r", None),
      "https://codeload.github.com/o/r/zip/HEAD"
    );
    assert_eq!(
      archive_url(Host::Github, "o/r", Some("dev")),
      "https://codeload.github.com/o/r/zip/dev"
    );
    assert_eq!(
      archive_url(Host::Bitbucket, "o/r", None),
      "https://bitbucket.org/o/r/get/master.zip"
    );
  }

  #[test]
  fn evict_removes_a_stale_entry_and_tolerates_absence() {
    let root = tempfile::tempdir().unwrap();
    let entry = root.path().join("owner-repo-abcd1234");
    fs::create_dir_all(&entry).unwrap();
    fs::write(entry.join("stale.txt"), "old").unwrap();

    evict(&entry).unwrap();
    assert!(!entry.exists());

    // Evicting an entry that is not there is a no-op.
    evict(&entry).unwrap();
  }

  fn repo_archive_bytes() -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    {
      let mut writer = zip::ZipWriter::new(&mut buffer);
      let options = zip::write::FileOptions::default();
      writer.add_directory("repo-HEAD/", options).unwrap();
      writer.start_file("repo-HEAD/README.md", options).unwrap();
      writer.write_all(b"# demo").unwrap();
      writer.add_directory("repo-HEAD/src/", options).unwrap();
      writer.start_file("repo-HEAD/src/main.rs", options).unwrap();
      writer.write_all(b"fn main() {}\n").unwrap();
      writer.finish().unwrap();
    }
    buffer.into_inner()
  }

  #[test]
  fn extraction_strips_the_wrapper_directory() {
    let dest = tempfile::tempdir().unwrap();
    extract_archive(&repo_archive_bytes(), dest.path()).unwrap();

    assert_eq!(
      fs::read_to_string(dest.path().join("README.md")).unwrap(),
      "# demo"
    );
    assert!(dest.path().join("src/main.rs").is_file());
    assert!(!dest.path().join("repo-HEAD").exists());
  }

  #[test]
  fn extraction_rejects_garbage_input() {
    let dest = tempfile::tempdir().unwrap();
    assert!(extract_archive(b"definitely not a zip", dest.path()).is_err());
  }
}
