use std::path::Path;

use tracing::debug;

use crate::{
    codec::{load_config, render_config},
    error::{Error, Result},
    schema::Config,
    validate::validate,
};

/// Read, parse and validate the profile at `path`.
pub fn load_config_from_file(path: &Path) -> Result<Config> {
    let raw = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let mut config = load_config(&raw)?;
    validate(&mut config)?;
    debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Write `config` to `path`, replacing any existing content.
///
/// Nothing is written when a value cannot be expressed in the profile
/// format; the existing file is left as it was.
pub fn write_file(config: &Config, path: &Path) -> Result<()> {
    let contents = render_config(config)?;
    std::fs::write(path, contents).map_err(|e| Error::io(path, e))?;
    debug!(path = %path.display(), "saved config");
    Ok(())
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config_from_file(&dir.path().join("nope.conf")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn missing_cert_fails_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("some.conf");
        std::fs::write(&path, "ListenAddr :1234\nCertFile some.crt\n").unwrap();
        let err = load_config_from_file(&path).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn conversion_error_passes_through() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("some.conf");
        std::fs::write(&path, "FileExpireAfter 1d2h\n").unwrap();
        let err = load_config_from_file(&path).unwrap_err();
        assert!(err.to_string().contains("FileExpireAfter"), "{err}");
    }

    #[test]
    fn write_replaces_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("some.conf");
        std::fs::write(&path, "Leftover directive\n".repeat(100)).unwrap();

        write_file(&Config::default(), &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("Leftover"));
        assert_eq!(load_config_from_file(&path).unwrap(), Config::default());
    }

    #[test]
    fn unwritable_value_keeps_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("some.conf");
        std::fs::write(&path, "WebUI true\n").unwrap();

        let config = Config {
            clipboard_dir: "/tmp/clip\nWebUI false".into(),
            ..Config::default()
        };
        let err = write_file(&config, &path).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(err.to_string().contains("ClipboardDir"), "{err}");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "WebUI true\n");
    }

    #[test]
    fn write_into_missing_dir_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("some.conf");
        let err = write_file(&Config::default(), &path).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
