//! Accent colors picked up while walking a theme.
//!
//! Some CodeMirror chrome has no TextMate counterpart (the gutter shadow, the
//! cursor bar, line numbers). Those rules are synthesized after the walk from
//! colors the theme already used elsewhere. Each slot holds a color and keeps
//! the first value offered to it.

/// A named accent slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accent {
    /// Dominant editor background.
    Background,
    /// Dominant editor foreground.
    Foreground,
    Keyword,
    Comment,
    Property,
}

/// First-write-wins accent slots for one conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivedAccents {
    background: Option<String>,
    foreground: Option<String>,
    keyword: Option<String>,
    comment: Option<String>,
    property: Option<String>,
}

impl DerivedAccents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill `accent` with `value` unless it already holds something.
    ///
    /// Returns `true` when the slot was empty and now holds `value`.
    pub fn offer(&mut self, accent: Accent, value: &str) -> bool {
        let slot = self.slot_mut(accent);
        if slot.is_some() {
            return false;
        }
        *slot = Some(value.to_string());
        true
    }

    pub fn get(&self, accent: Accent) -> Option<&str> {
        let slot = match accent {
            Accent::Background => &self.background,
            Accent::Foreground => &self.foreground,
            Accent::Keyword => &self.keyword,
            Accent::Comment => &self.comment,
            Accent::Property => &self.property,
        };
        slot.as_deref()
    }

    fn slot_mut(&mut self, accent: Accent) -> &mut Option<String> {
        match accent {
            Accent::Background => &mut self.background,
            Accent::Foreground => &mut self.foreground,
            Accent::Keyword => &mut self.keyword,
            Accent::Comment => &mut self.comment,
            Accent::Property => &mut self.property,
        }
    }
}
