//! Layered property lookup used to configure a registry.
//!
//! [`OverridableProperties`] answers a lookup from, in order of precedence,
//! a process-wide override, a `<source>.properties` file and the caller's
//! default. The file is parsed with `rust-ini`, reading its general section
//! as `key=value` pairs.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use ini::Ini;
use thiserror::Error;

/// Errors raised while loading a properties file.
#[derive(Debug, Error)]
pub enum PropertiesError {
    /// The file exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The file could not be parsed.
    #[error("{path} is invalid: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ini::ParseError,
    },
}

/// Named key to string lookup.
pub trait PropertySource: Send + Sync {
    /// Return the value for `key`, or `default` when no layer defines it.
    fn resolve(&self, key: &str, default: &str) -> String;

    /// Describe where `key` is looked up, for error messages.
    fn describe(&self, key: &str) -> String {
        format!("property {key}")
    }
}

#[derive(Clone, Debug)]
enum OverrideLayer {
    Environment,
    Fixed(HashMap<String, String>),
}

/// Properties file layer with a process-wide override on top.
#[derive(Clone, Debug)]
pub struct OverridableProperties {
    source_name: String,
    file: HashMap<String, String>,
    overrides: OverrideLayer,
}

impl OverridableProperties {
    /// Load `<source_name>.properties` from `$CARGO_MANIFEST_DIR`, or the
    /// current directory when that is unset, with environment overrides.
    ///
    /// # Errors
    ///
    /// Fails if the file exists but cannot be read or parsed.
    pub fn load(source_name: &str) -> Result<Self, PropertiesError> {
        let dir = env::var_os("CARGO_MANIFEST_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        Self::load_from_dir(source_name, &dir)
    }

    /// Load `<source_name>.properties` from `dir`. A missing file yields an
    /// empty file layer.
    ///
    /// # Errors
    ///
    /// Fails if the file exists but cannot be read or parsed.
    pub fn load_from_dir(source_name: &str, dir: &Path) -> Result<Self, PropertiesError> {
        let path = dir.join(format!("{source_name}.properties"));
        let file = read_properties(&path)?;
        tracing::debug!(
            target: "logcapture",
            path = %path.display(),
            entries = file.len(),
            "loaded properties"
        );
        Ok(Self {
            source_name: source_name.to_owned(),
            file,
            overrides: OverrideLayer::Environment,
        })
    }

    /// Build from in-memory layers without touching the filesystem or the
    /// environment.
    pub fn from_layers<K, V>(
        source_name: &str,
        file: impl IntoIterator<Item = (K, V)>,
        overrides: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            source_name: source_name.to_owned(),
            file: collect_pairs(file),
            overrides: OverrideLayer::Fixed(collect_pairs(overrides)),
        }
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Environment variable consulted for `key`, e.g. `LOGCAPTURE_PRINT_LEVEL`.
    pub fn override_name(&self, key: &str) -> String {
        format!("{}_{}", self.source_name, key)
            .chars()
            .map(|c| match c {
                '.' | '-' => '_',
                c => c.to_ascii_uppercase(),
            })
            .collect()
    }

    fn override_value(&self, key: &str) -> Option<String> {
        match &self.overrides {
            OverrideLayer::Environment => env::var(self.override_name(key)).ok(),
            OverrideLayer::Fixed(map) => map.get(key).cloned(),
        }
    }
}

impl PropertySource for OverridableProperties {
    fn resolve(&self, key: &str, default: &str) -> String {
        self.override_value(key)
            .or_else(|| self.file.get(key).cloned())
            .unwrap_or_else(|| default.to_owned())
    }

    fn describe(&self, key: &str) -> String {
        format!(
            "property {key} of file {}.properties or environment variable {}",
            self.source_name,
            self.override_name(key)
        )
    }
}

fn collect_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> HashMap<String, String>
where
    K: Into<String>,
    V: Into<String>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
}

fn read_properties(path: &Path) -> Result<HashMap<String, String>, PropertiesError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(HashMap::new()),
        Err(source) => {
            return Err(PropertiesError::Io {
                path: path.to_owned(),
                source,
            });
        }
    };
    let ini = Ini::load_from_str(&text).map_err(|source| PropertiesError::Parse {
        path: path.to_owned(),
        source,
    })?;
    Ok(ini
        .general_section()
        .iter()
        .map(|(key, value)| (key.to_owned(), value.to_owned()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn override_beats_file_beats_default() {
        let props = OverridableProperties::from_layers(
            "logcapture",
            [("print.level", "INFO"), ("other", "file")],
            [("print.level", "ERROR")],
        );
        assert_eq!(props.resolve("print.level", "OFF"), "ERROR");
        assert_eq!(props.resolve("other", "default"), "file");
        assert_eq!(props.resolve("missing", "default"), "default");
    }

    #[test]
    fn override_name_is_upper_snake_case() {
        let props = OverridableProperties::from_layers::<&str, &str>("logcapture", [], []);
        assert_eq!(props.override_name("print.level"), "LOGCAPTURE_PRINT_LEVEL");
        assert_eq!(
            props.describe("print.level"),
            "property print.level of file logcapture.properties or environment variable LOGCAPTURE_PRINT_LEVEL"
        );
    }

    #[test]
    fn reads_file_layer() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let mut file = fs::File::create(dir.path().join("sample.properties"))
            .expect("create properties file");
        writeln!(file, "# comment\nprint.level=WARN").expect("write properties file");

        let props = OverridableProperties::load_from_dir("sample", dir.path())
            .expect("properties should load");
        assert_eq!(props.file.get("print.level").map(String::as_str), Some("WARN"));
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let props = OverridableProperties::load_from_dir("absent", dir.path())
            .expect("missing file is not an error");
        assert!(props.file.is_empty());
    }

    #[test]
    fn malformed_file_reports_path() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("broken.properties");
        fs::write(&path, "[unterminated\nkey=value\n").expect("write properties file");

        let err = OverridableProperties::load_from_dir("broken", dir.path())
            .expect_err("malformed file should fail");
        assert!(matches!(err, PropertiesError::Parse { .. }));
        assert!(err.to_string().contains("broken.properties"));
    }
}
