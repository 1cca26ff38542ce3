//! Directory of named profiles.
//!
//! A profile named `work` lives in `<dir>/work.conf`; its conventional TLS
//! files sit next to it as `work.crt` and `work.key`. The store keeps no
//! state besides the directory: every call looks at the disk again.

use std::{
    collections::BTreeMap,
    fs::DirEntry,
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

use crate::{error::Result, loader::load_config_from_file, schema::Config};

/// File extension of profile files.
pub const PROFILE_EXTENSION: &str = "conf";

/// Extension of the conventional certificate next to a profile.
pub const CERT_EXTENSION: &str = "crt";

/// Extension of the conventional private key next to a profile.
pub const KEY_EXTENSION: &str = "key";

/// Used when no per-user config directory can be determined.
const FALLBACK_DIR: &str = "/etc/clipshare";

/// Profiles found in one directory.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    dir: PathBuf,
}

impl ConfigStore {
    /// Store rooted at the user config directory (`~/.config/clipshare/`
    /// on Linux).
    pub fn new() -> Self {
        Self::with_dir(default_dir())
    }

    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the profile called `name`. The file need not exist.
    pub fn file_from_name(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.{PROFILE_EXTENSION}"))
    }

    /// Load every profile in the directory, keyed by absolute path.
    ///
    /// A profile that fails to load is recorded with its error and does not
    /// keep the others from loading. A missing directory yields no entries.
    pub fn all(&self) -> BTreeMap<PathBuf, Result<Config>> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(dir = %self.dir.display(), error = %e, "profile directory not readable");
                return BTreeMap::new();
            },
        };

        entries
            .filter_map(|entry| entry_path(&self.dir, entry))
            .filter(|path| is_profile(path))
            .map(|path| {
                let path = std::path::absolute(&path).unwrap_or(path);
                let config = load_config_from_file(&path);
                if let Err(e) = &config {
                    warn!(path = %path.display(), error = %e, "failed to load profile");
                }
                (path, config)
            })
            .collect()
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

fn default_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "clipshare")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(FALLBACK_DIR))
}

fn entry_path(dir: &Path, entry: std::io::Result<DirEntry>) -> Option<PathBuf> {
    match entry {
        Ok(entry) => Some(entry.path()),
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "failed to read profile directory entry");
            None
        },
    }
}

fn is_profile(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == PROFILE_EXTENSION) && path.is_file()
}

/// Clipboard name of a profile path: `/etc/clipshare/work.conf` → `work`.
pub fn extract_clipboard(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Conventional certificate path for the profile at `config_path`.
///
/// With `must_exist`, returns `None` unless that file is present.
pub fn default_cert_file(config_path: &Path, must_exist: bool) -> Option<PathBuf> {
    sibling(config_path, CERT_EXTENSION, must_exist)
}

/// Conventional private key path for the profile at `config_path`.
///
/// With `must_exist`, returns `None` unless that file is present.
pub fn default_key_file(config_path: &Path, must_exist: bool) -> Option<PathBuf> {
    sibling(config_path, KEY_EXTENSION, must_exist)
}

fn sibling(config_path: &Path, extension: &str, must_exist: bool) -> Option<PathBuf> {
    let path = config_path.with_extension(extension);
    (!must_exist || path.exists()).then_some(path)
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {super::*, crate::error::Error, rstest::rstest};

    #[test]
    fn file_from_name() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::with_dir(dir.path());
        assert_eq!(store.file_from_name("work"), dir.path().join("work.conf"));
    }

    #[test]
    fn all_lists_profiles() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("work.conf"), "").unwrap();
        std::fs::write(dir.path().join("default.conf"), "").unwrap();
        std::fs::write(dir.path().join("work.crt"), "cert").unwrap();
        std::fs::create_dir(dir.path().join("nested.conf")).unwrap();

        let configs = ConfigStore::with_dir(dir.path()).all();
        assert_eq!(configs.len(), 2);
        assert!(configs[&dir.path().join("work.conf")].is_ok());
        assert!(configs[&dir.path().join("default.conf")].is_ok());
    }

    #[test]
    fn all_records_broken_profiles() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("good.conf"), "WebUI false\n").unwrap();
        std::fs::write(dir.path().join("bad.conf"), "ClipboardSizeLimit huge\n").unwrap();

        let configs = ConfigStore::with_dir(dir.path()).all();
        assert_eq!(configs.len(), 2);
        assert!(!configs[&dir.path().join("good.conf")].as_ref().unwrap().web_ui());
        assert!(matches!(
            configs[&dir.path().join("bad.conf")],
            Err(Error::InvalidLiteral { .. })
        ));
    }

    #[test]
    fn all_on_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::with_dir(dir.path().join("absent"));
        assert!(store.all().is_empty());
    }

    #[test]
    fn unreadable_entry_is_skipped() {
        let err = std::io::Error::other("entry vanished");
        assert_eq!(entry_path(Path::new("/etc/clipshare"), Err(err)), None);

        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("work.conf"), "").unwrap();
        let entry = std::fs::read_dir(dir.path()).unwrap().next().unwrap();
        assert_eq!(entry_path(dir.path(), entry), Some(dir.path().join("work.conf")));
    }

    #[test]
    fn all_sees_new_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::with_dir(dir.path());
        assert!(store.all().is_empty());
        std::fs::write(store.file_from_name("late"), "").unwrap();
        assert_eq!(store.all().len(), 1);
    }

    #[rstest]
    #[case("/etc/clipshare/myclip.conf", "myclip")]
    #[case("relative/work.conf", "work")]
    #[case("plain", "plain")]
    fn extract(#[case] path: &str, #[case] expected: &str) {
        assert_eq!(extract_clipboard(Path::new(path)), expected);
    }

    #[test]
    fn default_tls_files_without_existence_check() {
        let config = Path::new("/etc/clipshare/myclip.conf");
        assert_eq!(
            default_cert_file(config, false),
            Some(PathBuf::from("/etc/clipshare/myclip.crt"))
        );
        assert_eq!(
            default_key_file(config, false),
            Some(PathBuf::from("/etc/clipshare/myclip.key"))
        );
    }

    #[test]
    fn default_tls_files_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("myclip.conf");
        std::fs::write(dir.path().join("myclip.crt"), "something").unwrap();

        assert_eq!(
            default_cert_file(&config, true),
            Some(dir.path().join("myclip.crt"))
        );
        assert_eq!(default_key_file(&config, true), None);
    }
}
