//! Convert TextMate / Sublime Text `.tmTheme` files into CodeMirror stylesheets.
//!
//! A `.tmTheme` is a property list: some metadata plus an ordered `settings`
//! array styling editor chrome (background, caret, selection) and syntax
//! scopes (`comment`, `keyword`, `string`, ...). CodeMirror themes are plain
//! CSS hung off a `cm-s-<theme>` root class. Conversion is one pass:
//!
//! 1. **Parse** the property list into a [`Theme`].
//! 2. **Walk** its settings, mapping each key or scope through the
//!    [`scopes`] tables into selector/property pairs on an [`OutputTree`].
//!    Scopes without a mapping are kept aside in the tree's `unsupported`
//!    bucket rather than failing the conversion.
//! 3. **Write** the tree's selectors as CSS.
//!
//! # Usage
//!
//! ```bash
//! cmtheme convert "Solarized Dark" themes/Solarized\ (dark).tmTheme css/
//! cmtheme batch themes/ css/
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use cmtheme::{convert_bytes, to_css};
//!
//! let bytes = std::fs::read("Monokai.tmTheme")?;
//! let tree = convert_bytes("Monokai", &bytes)?;
//! println!("{}", to_css(&tree));
//! ```

pub mod accents;
pub mod convert;
pub mod css;
pub mod error;
pub mod scopes;
pub mod selector;
pub mod style;
pub mod theme;
pub mod tree;
pub mod walker;

pub use convert::{
    BatchFailure, BatchOptions, BatchStats, Conversion, ConvertOptions, DEFAULT_OUTPUT_DIR,
    convert_bytes, convert_dir, convert_file,
};
pub use css::{Stylesheet, to_css};
pub use error::{Error, Result};
pub use style::StyleAttributes;
pub use theme::{SettingsEntry, Theme, ThemeError};
pub use tree::{Declarations, OutputTree, Unsupported};
pub use walker::{ThemeWalker, walk_theme};
