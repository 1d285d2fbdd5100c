//! Theme namespacing.
//!
//! CodeMirror attaches `cm-s-<theme>` to the editor root when a theme is
//! selected, so every rule a theme emits hangs off that class. Several theme
//! stylesheets can then be loaded side by side.

/// Lower-case a theme name and replace each space with `-`.
///
/// `"Solarized Dark"` becomes `"solarized-dark"`. Used for both the root
/// class and the output file name.
///
/// Nothing else is escaped: `"Solarized (dark)"` gives `solarized-(dark)`,
/// which is a valid file name but not a usable class selector. Such themes
/// need an explicit name.
pub fn slug(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

/// Turn a bare class name into a class selector.
pub fn class(name: &str) -> String {
    format!(".{name}")
}

/// Selector builder for one theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    root: String,
}

impl Namespace {
    pub fn new(theme_name: &str) -> Self {
        Self {
            root: class(&format!("cm-s-{}", slug(theme_name))),
        }
    }

    /// The theme's root class selector, e.g. `.cm-s-solarized-dark`.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// `<root> <selector>` for an arbitrary descendant selector.
    pub fn descendant(&self, selector: &str) -> String {
        format!("{} {selector}", self.root)
    }

    /// `<root> .<class_name>`.
    pub fn scoped(&self, class_name: &str) -> String {
        self.descendant(&class(class_name))
    }
}
