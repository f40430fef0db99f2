use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::debug;

use crate::error::{Error, Result};
use crate::generators::GeneratedCode;

/// Destination for generated files
pub trait CodeSink {
    fn save(&mut self, language: &str, code: &GeneratedCode) -> Result<()>;
}

/// Writes files to `<root>/<language>/<stamp>/<file name>`, creating the
/// directories and overwriting existing files.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
    stamp: String,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>, generated_at: DateTime<Utc>) -> Self {
        Self {
            root: root.into(),
            stamp: directory_stamp(generated_at),
        }
    }

    pub fn output_dir(&self, language: &str) -> PathBuf {
        self.root.join(language).join(&self.stamp)
    }
}

impl CodeSink for DirectorySink {
    fn save(&mut self, language: &str, code: &GeneratedCode) -> Result<()> {
        let dir = self.output_dir(language);
        write_file(&dir, code)
    }
}

impl CodeSink for Vec<(String, GeneratedCode)> {
    fn save(&mut self, language: &str, code: &GeneratedCode) -> Result<()> {
        self.push((language.to_string(), code.clone()));
        Ok(())
    }
}

/// RFC 3339 timestamp with `:` replaced, usable as a directory name.
pub fn directory_stamp(generated_at: DateTime<Utc>) -> String {
    generated_at
        .to_rfc3339_opts(SecondsFormat::Secs, true)
        .replace(':', "-")
}

/// Write a generated file into the given directory.
/// Creates the directory if it does not exist.
pub fn write_file(output_dir: &Path, code: &GeneratedCode) -> Result<()> {
    fs::create_dir_all(output_dir).map_err(|source| Error::Write {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let path = output_dir.join(&code.file_name);
    fs::write(&path, &code.code).map_err(|source| Error::Write {
        path: path.clone(),
        source,
    })?;
    debug!(path = %path.display(), "wrote generated file");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_directory_stamp() {
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(directory_stamp(at), "2024-01-02T03-04-05Z");
    }

    #[test]
    fn test_output_dir_layout() {
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let sink = DirectorySink::new("out", at);

        assert_eq!(
            sink.output_dir("go"),
            Path::new("out").join("go").join("2024-01-02T03-04-05Z")
        );
    }

    #[test]
    fn test_vec_sink_collects() {
        let mut sink: Vec<(String, GeneratedCode)> = Vec::new();
        sink.save("go", &GeneratedCode::new("a.go", "package a")).unwrap();

        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].0, "go");
        assert_eq!(sink[0].1.file_name, "a.go");
    }

    #[test]
    fn test_write_error_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("go");
        fs::write(&blocker, "not a directory").unwrap();

        let err = write_file(&blocker.join("stamp"), &GeneratedCode::new("a.go", "package a"))
            .unwrap_err();

        assert!(matches!(err, Error::Write { ref path, .. } if path == &blocker.join("stamp")));
        assert!(err.to_string().contains("stamp"));
    }
}
