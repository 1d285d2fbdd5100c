//! Style attributes of a scoped settings entry and their CSS declarations.

use plist::{Dictionary, Value};
use serde::Serialize;

/// Raw visual attributes of one settings entry.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    /// Space separated tokens such as `"bold italic"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_style: Option<String>,
}

impl StyleAttributes {
    /// Read `foreground`, `background` and `fontStyle` from a settings dictionary.
    ///
    /// Missing, empty and non-string values are treated as absent.
    pub fn from_dictionary(settings: &Dictionary) -> Self {
        let text = |key: &str| {
            settings
                .get(key)
                .and_then(Value::as_string)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        Self {
            foreground: text("foreground"),
            background: text("background"),
            font_style: text("fontStyle"),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.foreground.is_none() && self.background.is_none() && self.font_style.is_none()
    }

    fn has_font_style(&self, token: &str) -> bool {
        self.font_style
            .as_deref()
            .is_some_and(|s| s.split_whitespace().any(|t| t == token))
    }

    /// The first color of this style: foreground, else background.
    pub fn color(&self) -> Option<&str> {
        self.foreground.as_deref().or(self.background.as_deref())
    }

    /// CSS declarations for this style.
    ///
    /// The order is fixed so output is reproducible: decoration, font style,
    /// font weight, color, background.
    pub fn declarations(&self) -> Vec<(&'static str, String)> {
        let mut css = Vec::new();

        if self.has_font_style("underline") {
            css.push(("text-decoration", "underline".to_string()));
        }
        if self.has_font_style("italic") {
            css.push(("font-style", "italic".to_string()));
        }
        if self.has_font_style("bold") {
            css.push(("font-weight", "bold".to_string()));
        }
        if let Some(fg) = &self.foreground {
            css.push(("color", fg.clone()));
        }
        if let Some(bg) = &self.background {
            css.push(("background", bg.clone()));
        }

        css
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(fg: Option<&str>, bg: Option<&str>, font_style: Option<&str>) -> StyleAttributes {
        StyleAttributes {
            foreground: fg.map(str::to_string),
            background: bg.map(str::to_string),
            font_style: font_style.map(str::to_string),
        }
    }

    #[test]
    fn test_foreground_only() {
        let css = style(Some("#586e75"), None, None).declarations();
        assert_eq!(css, vec![("color", "#586e75".to_string())]);
    }

    #[test]
    fn test_blank_style_is_empty() {
        assert!(StyleAttributes::default().declarations().is_empty());
        assert!(StyleAttributes::default().is_empty());
    }

    #[test]
    fn test_declaration_order() {
        let css = style(Some("#fff"), Some("#000"), Some("italic underline")).declarations();
        let properties: Vec<_> = css.iter().map(|(p, _)| *p).collect();
        assert_eq!(
            properties,
            ["text-decoration", "font-style", "color", "background"]
        );
    }

    #[test]
    fn test_bold_sits_between_style_and_color() {
        let css = style(Some("#fff"), None, Some("bold italic")).declarations();
        let properties: Vec<_> = css.iter().map(|(p, _)| *p).collect();
        assert_eq!(properties, ["font-style", "font-weight", "color"]);
    }

    #[test]
    fn test_font_style_matches_whole_tokens() {
        assert!(style(None, None, Some("underlined")).declarations().is_empty());
        assert!(style(None, None, Some("  ")).declarations().is_empty());
        assert!(style(None, None, Some("regular")).declarations().is_empty());
    }

    #[test]
    fn test_from_dictionary_skips_blank_values() {
        let mut dict = Dictionary::new();
        dict.insert("foreground".to_string(), Value::String("#93a1a1".to_string()));
        dict.insert("background".to_string(), Value::String(String::new()));
        dict.insert("fontStyle".to_string(), Value::Boolean(true));

        let attrs = StyleAttributes::from_dictionary(&dict);
        assert_eq!(attrs, style(Some("#93a1a1"), None, None));
        assert_eq!(attrs.color(), Some("#93a1a1"));
    }

    #[test]
    fn test_color_falls_back_to_background() {
        assert_eq!(style(None, Some("#002b36"), None).color(), Some("#002b36"));
        assert_eq!(style(None, None, Some("italic")).color(), None);
    }
}
