//! Pre-loaded code-generation templates shared by every compile call.

use crate::error::{BatchError, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Delimiter that opens and closes a template substitution point.
pub const TEMPLATE_DELIMITER: char = '$';

/// A directory of templates, read once and then only borrowed.
#[derive(Debug, Clone)]
pub struct TemplateSource {
    location: PathBuf,
    start: char,
    stop: char,
    templates: BTreeMap<String, String>,
}

impl TemplateSource {
    /// Opens the template directory at `location` and loads every file in it.
    /// The template name is the file stem.
    pub fn open(location: impl AsRef<Path>, start: char, stop: char) -> Result<Self> {
        let location = location.as_ref();
        if !location.is_dir() {
            return Err(BatchError::template(format!(
                "template location '{}' does not exist or is not a directory",
                location.display()
            )));
        }

        let mut templates = BTreeMap::new();
        for entry in WalkDir::new(location)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| BatchError::template(e.to_string()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(name) = entry.path().file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let text = fs::read_to_string(entry.path()).map_err(|e| {
                BatchError::template(format!("failed to read {}: {}", entry.path().display(), e))
            })?;
            debug!("Loaded template {} ({} bytes)", name, text.len());
            templates.insert(name.to_string(), text);
        }

        info!(
            "Opened template source {} with {} template(s)",
            location.display(),
            templates.len()
        );

        Ok(Self {
            location: location.to_path_buf(),
            start,
            stop,
            templates,
        })
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    pub fn delimiters(&self) -> (char, char) {
        (self.start, self.stop)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.templates.get(name).map(String::as_str)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_loads_templates_by_stem() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("stub.st"), "class $name$ {}").unwrap();
        fs::write(dir.path().join("type.st"), "type $name$").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();

        let source = TemplateSource::open(dir.path(), '$', '$').unwrap();

        assert_eq!(source.len(), 2);
        assert_eq!(source.get("stub"), Some("class $name$ {}"));
        assert_eq!(source.names().collect::<Vec<_>>(), vec!["stub", "type"]);
        assert_eq!(source.delimiters(), ('$', '$'));
        assert_eq!(source.location(), dir.path());
    }

    #[test]
    fn test_open_missing_location_fails() {
        let dir = TempDir::new().unwrap();
        let result = TemplateSource::open(dir.path().join("absent"), '$', '$');
        assert!(matches!(result, Err(BatchError::Template(_))));
    }

    #[test]
    fn test_open_empty_directory() {
        let dir = TempDir::new().unwrap();
        let source = TemplateSource::open(dir.path(), '$', '$').unwrap();
        assert!(source.is_empty());
        assert!(source.get("stub").is_none());
    }
}
