//! `.tmTheme` documents as read from disk.
//!
//! A theme is a property list whose root dictionary carries metadata (`name`,
//! `uuid`, `author`, ...) and an ordered `settings` array. The first entry of
//! that array is usually the global one:
//!
//! ```xml
//! <dict>
//!     <key>settings</key>
//!     <dict>
//!         <key>background</key>
//!         <string>#002B36</string>
//!     </dict>
//! </dict>
//! ```
//!
//! and the rest are scoped:
//!
//! ```xml
//! <dict>
//!     <key>name</key>
//!     <string>Comment</string>
//!     <key>scope</key>
//!     <string>comment</string>
//!     <key>settings</key>
//!     <dict>
//!         <key>foreground</key>
//!         <string>#586E75</string>
//!     </dict>
//! </dict>
//! ```

use std::io::Cursor;

use indexmap::IndexMap;
use miette::Diagnostic;
use plist::{Dictionary, Value};
use thiserror::Error;
use tracing::warn;

use crate::style::StyleAttributes;

/// Errors from turning bytes into a [`Theme`].
#[derive(Debug, Error, Diagnostic)]
pub enum ThemeError {
    #[error("malformed property list")]
    #[diagnostic(code(cmtheme::parse))]
    Plist(#[from] plist::Error),

    #[error("theme root is not a dictionary")]
    #[diagnostic(code(cmtheme::invalid_theme))]
    NotADictionary,

    #[error("theme has no `settings` array")]
    #[diagnostic(
        code(cmtheme::invalid_theme),
        help("a .tmTheme lists its rules under a top-level `settings` array")
    )]
    MissingSettings,
}

/// One element of the theme's `settings` array.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsEntry {
    /// Entry with neither `name` nor `scope`: editor-wide settings, keyed by
    /// setting name (`background`, `caret`, ...).
    Global(IndexMap<String, Value>),
    /// Entry styling one syntax scope.
    Scoped {
        name: Option<String>,
        scope: Option<String>,
        settings: StyleAttributes,
    },
}

impl SettingsEntry {
    pub fn from_dictionary(entry: &Dictionary) -> Self {
        let text = |key: &str| {
            entry
                .get(key)
                .and_then(Value::as_string)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        let name = text("name");
        let scope = text("scope");
        let settings = entry.get("settings").and_then(Value::as_dictionary);

        if name.is_none() && scope.is_none() {
            let settings = settings
                .map(|s| s.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
                .unwrap_or_default();
            return SettingsEntry::Global(settings);
        }

        SettingsEntry::Scoped {
            name,
            scope,
            settings: settings
                .map(StyleAttributes::from_dictionary)
                .unwrap_or_default(),
        }
    }
}

/// A parsed theme document.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Every top-level key except `settings`, in document order.
    pub metadata: IndexMap<String, Value>,
    pub settings: Vec<SettingsEntry>,
}

impl Theme {
    /// Parse an XML or binary property list.
    pub fn parse(bytes: &[u8]) -> Result<Self, ThemeError> {
        let value = Value::from_reader(Cursor::new(bytes))?;
        match value {
            Value::Dictionary(root) => Self::from_dictionary(root),
            _ => Err(ThemeError::NotADictionary),
        }
    }

    /// Build a theme from an already decoded root dictionary.
    pub fn from_dictionary(root: Dictionary) -> Result<Self, ThemeError> {
        let mut metadata = IndexMap::new();
        let mut settings = None;

        for (key, value) in root {
            if key.eq_ignore_ascii_case("settings") {
                settings = Some(value);
            } else {
                metadata.insert(key, value);
            }
        }

        let Some(Value::Array(entries)) = settings else {
            return Err(ThemeError::MissingSettings);
        };

        let settings = entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| match entry.as_dictionary() {
                Some(dict) => Some(SettingsEntry::from_dictionary(dict)),
                None => {
                    warn!(index, "skipping settings entry that is not a dictionary");
                    None
                }
            })
            .collect();

        Ok(Self { metadata, settings })
    }

    /// The theme's own `name`, if it has a non-empty one.
    pub fn name(&self) -> Option<&str> {
        self.metadata
            .get("name")
            .and_then(Value::as_string)
            .filter(|s| !s.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>name</key>
    <string>Test</string>
    <key>settings</key>
    <array>
        <dict>
            <key>settings</key>
            <dict>
                <key>background</key>
                <string>#000000</string>
            </dict>
        </dict>
        <dict>
            <key>name</key>
            <string>Comment</string>
            <key>scope</key>
            <string>comment</string>
            <key>settings</key>
            <dict>
                <key>foreground</key>
                <string>#888888</string>
                <key>fontStyle</key>
                <string>italic</string>
            </dict>
        </dict>
        <string>stray</string>
    </array>
    <key>uuid</key>
    <string>0F8D0C9A-1B2C-4D3E-8F90-A1B2C3D4E5F6</string>
</dict>
</plist>
"#;

    #[test]
    fn test_parse_minimal() {
        let theme = Theme::parse(MINIMAL.as_bytes()).unwrap();
        assert_eq!(theme.name(), Some("Test"));
        assert!(theme.metadata.contains_key("uuid"));
        assert!(!theme.metadata.contains_key("settings"));

        // The stray string is skipped
        assert_eq!(theme.settings.len(), 2);
        match &theme.settings[0] {
            SettingsEntry::Global(settings) => {
                assert_eq!(
                    settings.get("background").and_then(Value::as_string),
                    Some("#000000")
                );
            }
            other => panic!("expected global entry, got {other:?}"),
        }
        match &theme.settings[1] {
            SettingsEntry::Scoped {
                name,
                scope,
                settings,
            } => {
                assert_eq!(name.as_deref(), Some("Comment"));
                assert_eq!(scope.as_deref(), Some("comment"));
                assert_eq!(settings.foreground.as_deref(), Some("#888888"));
                assert_eq!(settings.font_style.as_deref(), Some("italic"));
            }
            other => panic!("expected scoped entry, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_name_counts_as_global() {
        let mut entry = Dictionary::new();
        entry.insert("name".to_string(), Value::String(String::new()));
        entry.insert("settings".to_string(), Value::Dictionary(Dictionary::new()));
        assert_eq!(
            SettingsEntry::from_dictionary(&entry),
            SettingsEntry::Global(IndexMap::new())
        );
    }

    #[test]
    fn test_name_without_scope_is_scoped() {
        let mut entry = Dictionary::new();
        entry.insert("name".to_string(), Value::String("Orphan".to_string()));
        assert!(matches!(
            SettingsEntry::from_dictionary(&entry),
            SettingsEntry::Scoped { scope: None, .. }
        ));
    }

    #[test]
    fn test_missing_settings() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0"><dict><key>name</key><string>Empty</string></dict></plist>"#;
        assert!(matches!(
            Theme::parse(xml.as_bytes()),
            Err(ThemeError::MissingSettings)
        ));
    }

    #[test]
    fn test_root_must_be_dictionary() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0"><array><string>nope</string></array></plist>"#;
        assert!(matches!(
            Theme::parse(xml.as_bytes()),
            Err(ThemeError::NotADictionary)
        ));
    }

    #[test]
    fn test_malformed_plist() {
        let garbage = b"<?xml version=\"1.0\"?><plist><dict><key>name</key>";
        assert!(matches!(
            Theme::parse(garbage),
            Err(ThemeError::Plist(_))
        ));
    }
}
