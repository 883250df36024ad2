use crate::result::Result;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Fields of a single Debian control stanza, keyed by lowercased field name.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Control {
    fields: BTreeMap<String, String>,
}

impl Control {
    /// Read and parse a control file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(Self::parse(&content))
    }

    /// Parse the first stanza of a control file.
    ///
    /// Continuation lines (leading space or tab) are appended to the previous
    /// field separated by a newline. Comment lines are skipped and parsing
    /// stops at the first blank line.
    pub fn parse(content: &str) -> Self {
        let mut fields: BTreeMap<String, String> = BTreeMap::new();
        let mut last: Option<String> = None;

        for line in content.lines() {
            if line.starts_with('#') {
                continue;
            }

            if line.trim().is_empty() {
                if fields.is_empty() {
                    continue;
                }
                break;
            }

            if line.starts_with(' ') || line.starts_with('\t') {
                if let Some(value) = last.as_ref().and_then(|key| fields.get_mut(key)) {
                    value.push('\n');
                    value.push_str(line.trim());
                }
                continue;
            }

            if let Some(pos) = line.find(':') {
                let (key, value) = line.split_at(pos);
                let key = key.trim().to_ascii_lowercase();
                fields.insert(key.clone(), value[1..].trim().to_owned());
                last = Some(key);
            }
        }

        Self { fields }
    }

    /// Look up a field by name, ignoring case.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .get(&field.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn version(&self) -> Option<&str> {
        self.get("Version")
    }

    pub fn architecture(&self) -> Option<&str> {
        self.get("Architecture")
    }
}
