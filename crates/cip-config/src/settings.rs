use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const DEFAULT_CLASS_NAME: &str = "my_school";
pub const DEFAULT_LANGUAGE: &str = "pl";
pub const DEFAULT_DEVICES_MODULE: &str = "devices";

/// User-editable settings. Unknown keys are kept verbatim in `extra` so a
/// round trip never drops them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub class_name: String,
    pub language: String,
    pub devices_module: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            class_name: DEFAULT_CLASS_NAME.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            devices_module: DEFAULT_DEVICES_MODULE.to_string(),
            extra: BTreeMap::new(),
        }
    }
}

impl Settings {
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "class_name" => Some(&self.class_name),
            "language" => Some(&self.language),
            "devices_module" => Some(&self.devices_module),
            "" => None,
            other => self.extra.get(other).map(String::as_str),
        }
    }

    /// Store `value` under `key`; returns whether anything changed.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> bool {
        let value = value.into();
        let slot = match key {
            "class_name" => &mut self.class_name,
            "language" => &mut self.language,
            "devices_module" => &mut self.devices_module,
            other => {
                return self.extra.insert(other.to_string(), value.clone()) != Some(value);
            }
        };
        if *slot == value {
            return false;
        }
        *slot = value;
        true
    }

    /// Every key with its value, named fields first.
    pub fn entries(&self) -> Vec<(&str, &str)> {
        let mut entries = vec![
            ("class_name", self.class_name.as_str()),
            ("language", self.language.as_str()),
            ("devices_module", self.devices_module.as_str()),
        ];
        entries.extend(self.extra.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = Settings::default();
        assert_eq!(settings.get("class_name"), Some("my_school"));
        assert_eq!(settings.get("language"), Some("pl"));
        assert_eq!(settings.get("devices_module"), Some("devices"));
        assert_eq!(settings.get("missing"), None);
        assert_eq!(settings.get(""), None);
    }

    #[test]
    fn set_reports_changes() {
        let mut settings = Settings::default();
        assert!(settings.set("class_name", "3b"));
        assert!(!settings.set("class_name", "3b"));
        assert!(settings.set("theme", "dark"));
        assert!(!settings.set("theme", "dark"));
        assert_eq!(settings.get("theme"), Some("dark"));
    }

    #[test]
    fn partial_file_fills_defaults() {
        let settings: Settings = toml::from_str("language = \"en\"\nroom = \"B12\"\n").unwrap();
        assert_eq!(settings.class_name, "my_school");
        assert_eq!(settings.language, "en");
        assert_eq!(settings.get("room"), Some("B12"));
    }
}
