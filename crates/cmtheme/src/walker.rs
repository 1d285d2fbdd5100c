//! Theme walker - turns a theme's settings into an [`OutputTree`].
//!
//! The walk is a single pass over the settings array:
//!
//! 1. Global entries go through [`global_rule`], one key at a time.
//! 2. Scoped entries go through [`syntax_rule`] and the style extractor.
//! 3. Anything without a mapping is recorded in the tree's `unsupported`
//!    bucket and otherwise ignored.
//!
//! Along the way a handful of colors are remembered in [`DerivedAccents`].
//! Once the pass is over they drive a few decorative rules CodeMirror needs
//! but TextMate has no setting for (gutter, cursor, line numbers).

use indexmap::IndexMap;
use plist::Value;
use tracing::{debug, warn};

use crate::accents::{Accent, DerivedAccents};
use crate::scopes::{GlobalRule, global_rule, syntax_rule};
use crate::selector::Namespace;
use crate::style::StyleAttributes;
use crate::theme::{SettingsEntry, Theme};
use crate::tree::{OutputTree, Unsupported, UnsupportedEntry};

/// Written on the root class alongside each direct global rule.
const BASE_TYPOGRAPHY: &[(&str, &str)] = &[
    ("font-size", "1em"),
    ("line-height", "1.5em"),
    ("font-family", "inconsolata, monospace"),
    ("letter-spacing", "0.3px"),
    ("word-spacing", "1px"),
];

const LINES_PADDING: &str = "8px 0";

const GUTTER_SHADOW: &str = "1px 0 2px 0 rgba(0, 0, 0, 0.5)";

const CURSOR_WIDTH: &str = "3px";

/// Classes that take the property accent as their color.
const PROPERTY_ACCENT_CLASSES: &[&str] = &["cm-property", "cm-atom", "cm-number"];

/// Classes that take the keyword accent as their color.
const KEYWORD_ACCENT_CLASSES: &[&str] = &["cm-keyword", "cm-operator"];

/// Walk `theme` under the display name `theme_name`.
pub fn walk_theme(theme_name: &str, theme: &Theme) -> OutputTree {
    ThemeWalker::new(theme_name, theme.metadata.clone()).walk(&theme.settings)
}

/// Conversion state for a single theme.
///
/// A walker is consumed by [`ThemeWalker::walk`], so tree and accents can
/// never carry over from one theme to the next.
#[derive(Debug)]
pub struct ThemeWalker {
    namespace: Namespace,
    tree: OutputTree,
    accents: DerivedAccents,
    /// Set once a direct global rule has styled the root class.
    root_styled: bool,
}

impl ThemeWalker {
    pub fn new(theme_name: &str, metadata: IndexMap<String, Value>) -> Self {
        Self {
            namespace: Namespace::new(theme_name),
            tree: OutputTree::new(metadata),
            accents: DerivedAccents::new(),
            root_styled: false,
        }
    }

    /// Visit every entry in order, then add the decorative rules.
    pub fn walk(mut self, entries: &[SettingsEntry]) -> OutputTree {
        for entry in entries {
            match entry {
                SettingsEntry::Global(settings) => self.visit_global(settings),
                SettingsEntry::Scoped {
                    name,
                    scope,
                    settings,
                } => self.visit_scoped(name.as_deref(), scope.as_deref(), settings),
            }
        }
        self.decorate();
        self.tree
    }

    fn visit_global(&mut self, settings: &IndexMap<String, Value>) {
        for (key, value) in settings {
            let Some(rule) = global_rule(key) else {
                debug!(setting = %key, "unsupported global setting");
                self.tree.mark_unsupported(key, Unsupported::GlobalStyling);
                continue;
            };

            let Some(value) = value.as_string().filter(|v| !v.is_empty()) else {
                warn!(setting = %key, "global setting has no string value, skipping");
                continue;
            };

            match rule {
                GlobalRule::Direct { property } => {
                    let root = self.namespace.root().to_string();
                    self.root_styled = true;
                    for (typography, setting) in BASE_TYPOGRAPHY {
                        self.tree.write(&root, typography, setting);
                    }
                    match property {
                        "background" => {
                            self.accents.offer(Accent::Background, value);
                        }
                        "color" => {
                            self.accents.offer(Accent::Foreground, value);
                        }
                        _ => {}
                    }
                    self.tree.write(&root, property, value);
                }
                GlobalRule::Suffix { selector, property } => {
                    let selector = self.namespace.scoped(selector);
                    self.tree.write(&selector, property, value);
                }
            }
        }
    }

    fn visit_scoped(&mut self, name: Option<&str>, scope: Option<&str>, style: &StyleAttributes) {
        let rule = scope.and_then(syntax_rule);
        let Some(rule) = rule else {
            // Entries are only scoped when they carry a name or a scope
            let key = scope.or(name).unwrap_or_default();
            debug!(scope = key, "unsupported scope");
            self.tree.mark_unsupported(
                key,
                Unsupported::Entry(UnsupportedEntry {
                    name: name.map(str::to_string),
                    scope: scope.map(str::to_string),
                    settings: style.clone(),
                }),
            );
            return;
        };

        let declarations = style.declarations();
        if declarations.is_empty() {
            return;
        }

        if let (Some(accent), Some(color)) = (rule.accent, style.color()) {
            self.accents.offer(accent, color);
        }

        let selector = self.namespace.scoped(rule.selector);
        for (property, value) in &declarations {
            self.tree.write(&selector, property, value);
        }
    }

    /// Synthesize rules from the collected accents. A rule whose accent was
    /// never seen is left out.
    fn decorate(&mut self) {
        let accents = std::mem::take(&mut self.accents);

        if self.root_styled {
            let lines = self.namespace.scoped("CodeMirror-lines");
            self.tree.write(&lines, "padding", LINES_PADDING);
        }

        if let Some(background) = accents.get(Accent::Background) {
            let gutters = self.namespace.scoped("CodeMirror-gutters");
            self.tree.write(&gutters, "box-shadow", GUTTER_SHADOW);
            self.tree.write(&gutters, "-webkit-box-shadow", GUTTER_SHADOW);
            self.tree.write(&gutters, "background-color", background);
            self.tree.write(&gutters, "padding-right", "10px");
            self.tree.write(&gutters, "z-index", "3");
            self.tree.write(&gutters, "border", "none");
        }

        if let Some(foreground) = accents.get(Accent::Foreground) {
            let cursor = self.namespace.descendant("div.CodeMirror-cursor");
            self.tree.write(
                &cursor,
                "border-left",
                &format!("{CURSOR_WIDTH} solid {foreground}"),
            );
        }

        if let Some(color) = accents.get(Accent::Property) {
            for class in PROPERTY_ACCENT_CLASSES {
                self.tree.write(&self.namespace.scoped(class), "color", color);
            }
        }

        if let Some(color) = accents.get(Accent::Keyword) {
            for class in KEYWORD_ACCENT_CLASSES {
                self.tree.write(&self.namespace.scoped(class), "color", color);
            }
        }

        if let Some(color) = accents.get(Accent::Comment) {
            let line_numbers = self.namespace.scoped("CodeMirror-linenumber");
            self.tree.write(&line_numbers, "color", color);
        }
    }
}
