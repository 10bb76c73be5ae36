//! JSON export of a fetched lookup.

use crate::Result;
use jetapi_core::query::is_valid_registration;
use jetapi_core::Error;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// A lookup body ready to copy or save as `<registration>.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonExport {
    registration: String,
    contents: String,
}

impl JsonExport {
    /// Serialize `data` with 2-space indentation.
    pub fn new(registration: impl Into<String>, data: &Value) -> Result<Self> {
        Ok(Self {
            registration: registration.into(),
            contents: serde_json::to_string_pretty(data)?,
        })
    }

    /// Registration the export is named after.
    #[must_use]
    pub fn registration(&self) -> &str {
        &self.registration
    }

    /// Suggested file name.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.json", self.registration)
    }

    /// Indented JSON text.
    #[must_use]
    pub fn contents(&self) -> &str {
        &self.contents
    }

    /// Write the export into `dir`, creating it if needed.
    ///
    /// Refuses registrations that could escape `dir` or produce a hidden file.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        if !is_valid_registration(&self.registration) {
            return Err(Error::InvalidRegistration(format!(
                "cannot name an export after `{}`",
                self.registration
            )));
        }

        fs::create_dir_all(dir)?;
        let path = dir.join(self.file_name());
        fs::write(&path, &self.contents)?;

        info!(path = %path.display(), bytes = self.contents.len(), "Wrote JSON export");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn contents_use_two_space_indent() {
        let export = JsonExport::new("G-ABCD", &json!({ "JetPhotos": { "Reg": "G-ABCD" } })).unwrap();
        assert_eq!(
            export.contents(),
            "{\n  \"JetPhotos\": {\n    \"Reg\": \"G-ABCD\"\n  }\n}"
        );
    }

    #[test]
    fn file_name_is_registration() {
        let export = JsonExport::new("N1", &json!({})).unwrap();
        assert_eq!(export.file_name(), "N1.json");
        assert_eq!(export.registration(), "N1");
    }

    #[test]
    fn write_to_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("exports");
        let export = JsonExport::new("G-ABCD", &json!({ "FlightRadar": null })).unwrap();

        let path = export.write_to(&target).unwrap();

        assert_eq!(path, target.join("G-ABCD.json"));
        assert_eq!(fs::read_to_string(&path).unwrap(), export.contents());
    }

    #[test]
    fn write_to_rejects_unsafe_names() {
        let dir = tempfile::tempdir().unwrap();

        for registration in ["", "../escape", "a/b"] {
            let export = JsonExport::new(registration, &json!({})).unwrap();
            let err = export.write_to(dir.path()).unwrap_err();
            assert!(matches!(err, Error::InvalidRegistration(_)), "{registration}");
        }
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
