//! Scope tables - which TextMate settings CodeMirror can express.
//!
//! A `.tmTheme` file styles two kinds of things:
//!
//! 1. **Global settings** - editor-wide colors with no scope (`background`,
//!    `caret`, `selection`, ...). These live in the settings entry that has
//!    neither a `name` nor a `scope`.
//!
//! 2. **Syntax scopes** - dotted TextMate scope names (`comment`,
//!    `constant.numeric`, `entity.name.function`, ...), each carrying its own
//!    foreground/background/font style.
//!
//! Both tables match on exact string equality. `keyword.control` does *not*
//! fall back to `keyword`; anything missing from a table is reported as
//! unsupported by the walker.

use crate::accents::Accent;

/// How a global setting lands in the stylesheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalRule {
    /// Sets `property` on the theme's root class (`.cm-s-<theme>`).
    Direct { property: &'static str },
    /// Sets `property` on `.cm-s-<theme> .<selector>`.
    Suffix {
        selector: &'static str,
        property: &'static str,
    },
}

impl GlobalRule {
    /// The CSS property this rule writes.
    pub fn property(self) -> &'static str {
        match self {
            GlobalRule::Direct { property } | GlobalRule::Suffix { property, .. } => property,
        }
    }
}

/// How a syntax scope lands in the stylesheet.
///
/// The declarations themselves come from the scope's style attributes, so a
/// syntax rule only names the CodeMirror token class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntaxRule {
    /// CodeMirror token class, without the leading dot.
    pub selector: &'static str,
    /// Accent slot fed by this scope's first color, if any.
    pub accent: Option<Accent>,
}

impl SyntaxRule {
    const fn plain(selector: &'static str) -> Self {
        Self {
            selector,
            accent: None,
        }
    }

    const fn accent(selector: &'static str, accent: Accent) -> Self {
        Self {
            selector,
            accent: Some(accent),
        }
    }
}

/// Every global key with a mapping, in table order.
pub const GLOBAL_KEYS: &[&str] = &[
    "background",
    "foreground",
    "selection",
    "caret",
    "lineHighlight",
    "invisibles",
    "gutter",
    "gutterForeground",
    "findHighlight",
    "bracketsForeground",
];

/// Every syntax scope with a mapping, in table order.
pub const SYNTAX_SCOPES: &[&str] = &[
    "comment",
    "string",
    "constant.numeric",
    "constant.language",
    "keyword",
    "entity.name.function",
    "variable.parameter",
    "support.function",
    "storage",
    "constant.character",
    "variable",
    "entity.name.tag",
    "entity.other.attribute-name",
    "support.class",
    "markup.heading",
    "invalid",
];

/// Look up a key of the global settings entry.
pub fn global_rule(key: &str) -> Option<GlobalRule> {
    let rule = match key {
        "background" => GlobalRule::Direct {
            property: "background",
        },
        "foreground" => GlobalRule::Direct { property: "color" },
        "selection" => GlobalRule::Suffix {
            selector: "CodeMirror-selected",
            property: "background",
        },
        "caret" => GlobalRule::Suffix {
            selector: "CodeMirror-cursor",
            property: "border-left-color",
        },
        "lineHighlight" => GlobalRule::Suffix {
            selector: "CodeMirror-activeline-background",
            property: "background",
        },
        "invisibles" => GlobalRule::Suffix {
            selector: "cm-tab",
            property: "color",
        },
        "gutter" => GlobalRule::Suffix {
            selector: "CodeMirror-gutters",
            property: "background",
        },
        "gutterForeground" => GlobalRule::Suffix {
            selector: "CodeMirror-linenumber",
            property: "color",
        },
        "findHighlight" => GlobalRule::Suffix {
            selector: "cm-searching",
            property: "background",
        },
        "bracketsForeground" => GlobalRule::Suffix {
            selector: "CodeMirror-matchingbracket",
            property: "color",
        },
        _ => return None,
    };
    Some(rule)
}

/// Look up the scope of a scoped settings entry.
pub fn syntax_rule(scope: &str) -> Option<SyntaxRule> {
    let rule = match scope {
        "comment" => SyntaxRule::accent("cm-comment", Accent::Comment),
        "string" => SyntaxRule::plain("cm-string"),
        "constant.numeric" => SyntaxRule::plain("cm-number"),
        "constant.language" => SyntaxRule::plain("cm-atom"),
        "keyword" => SyntaxRule::accent("cm-keyword", Accent::Keyword),
        "entity.name.function" => SyntaxRule::plain("cm-variable"),
        "variable.parameter" => SyntaxRule::plain("cm-def"),
        "support.function" => SyntaxRule::accent("cm-property", Accent::Property),

        // CodeMirror token classes with a direct TextMate counterpart
        "storage" => SyntaxRule::plain("cm-keyword"),
        "constant.character" => SyntaxRule::plain("cm-string-2"),
        "variable" => SyntaxRule::plain("cm-variable-2"),
        "entity.name.tag" => SyntaxRule::plain("cm-tag"),
        "entity.other.attribute-name" => SyntaxRule::plain("cm-attribute"),
        "support.class" => SyntaxRule::plain("cm-builtin"),
        "markup.heading" => SyntaxRule::plain("cm-header"),
        "invalid" => SyntaxRule::plain("cm-error"),
        _ => return None,
    };
    Some(rule)
}
