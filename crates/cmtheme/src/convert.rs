//! File-level entry points: read a theme, walk it, write the stylesheet.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::css::to_css;
use crate::error::{Error, Result};
use crate::selector::slug;
use crate::theme::{Theme, ThemeError};
use crate::tree::OutputTree;
use crate::walker::walk_theme;

/// Where stylesheets go when no output directory is given.
pub const DEFAULT_OUTPUT_DIR: &str = "css";

/// File extension picked up by batch conversion (matched case-insensitively).
pub const THEME_EXTENSION: &str = "tmTheme";

/// Options for converting a single theme file.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Display name used for the namespace and the output file name.
    /// Falls back to the theme's `name` key, then to the file stem.
    pub name: Option<String>,
    /// Path to the `.tmTheme` file.
    pub theme_path: Utf8PathBuf,
    /// Directory the stylesheet is written to (created if missing).
    pub output_dir: Utf8PathBuf,
    /// Print the output tree as JSON before writing.
    pub debug: bool,
}

impl ConvertOptions {
    pub fn new(theme_path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            name: None,
            theme_path: theme_path.into(),
            output_dir: Utf8PathBuf::from(DEFAULT_OUTPUT_DIR),
            debug: false,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<Utf8PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// A finished conversion.
#[derive(Debug)]
pub struct Conversion {
    /// The display name the theme was converted under.
    pub name: String,
    /// Where the stylesheet was written.
    pub output_path: Utf8PathBuf,
    pub tree: OutputTree,
}

/// Parse and walk a theme held in memory. Nothing is written.
pub fn convert_bytes(name: &str, bytes: &[u8]) -> Result<OutputTree, ThemeError> {
    let theme = Theme::parse(bytes)?;
    Ok(walk_theme(name, &theme))
}

/// Stylesheet path for a theme called `name` inside `output_dir`.
///
/// The slug must stay a single file name inside `output_dir`: names that
/// would add path components or climb out of it are rejected.
pub fn output_path(output_dir: &Utf8Path, name: &str) -> Result<Utf8PathBuf> {
    let slug = slug(name);
    if slug.is_empty() || slug.contains(['/', '\\']) || slug.contains("..") {
        return Err(Error::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(output_dir.join(format!("{slug}.css")))
}

/// Convert one theme file and write its stylesheet.
///
/// The input is read and fully converted before anything is written, so a
/// read or parse failure never leaves an output file behind.
pub fn convert_file(options: &ConvertOptions) -> Result<Conversion> {
    let bytes = fs::read(&options.theme_path).map_err(Error::Read)?;
    let theme = Theme::parse(&bytes).map_err(|source| Error::Theme {
        path: options.theme_path.clone(),
        source,
    })?;

    let name = resolve_name(options.name.as_deref(), &theme, &options.theme_path)?;
    let output_path = output_path(&options.output_dir, &name)?;
    let tree = walk_theme(&name, &theme);

    if !tree.unsupported().is_empty() {
        debug!(
            theme = %name,
            count = tree.unsupported().len(),
            "theme has unsupported scopes"
        );
    }

    if options.debug {
        println!("{}", serde_json::to_string_pretty(&tree)?);
    }

    fs::create_dir_all(&options.output_dir).map_err(Error::Write)?;
    fs::write(&output_path, to_css(&tree)).map_err(Error::Write)?;
    info!(theme = %name, path = %output_path, "wrote stylesheet");

    Ok(Conversion {
        name,
        output_path,
        tree,
    })
}

fn resolve_name(explicit: Option<&str>, theme: &Theme, path: &Utf8Path) -> Result<String> {
    explicit
        .filter(|n| !n.trim().is_empty())
        .or_else(|| theme.name())
        .or_else(|| path.file_stem())
        .map(str::to_string)
        .ok_or_else(|| Error::MissingName {
            path: path.to_path_buf(),
        })
}

/// Options for converting every theme in a directory.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Directory searched recursively for `.tmTheme` files.
    pub themes_dir: Utf8PathBuf,
    pub output_dir: Utf8PathBuf,
    pub debug: bool,
}

impl BatchOptions {
    pub fn new(themes_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            themes_dir: themes_dir.into(),
            output_dir: Utf8PathBuf::from(DEFAULT_OUTPUT_DIR),
            debug: false,
        }
    }
}

/// A theme file that failed to convert during a batch run.
#[derive(Debug)]
pub struct BatchFailure {
    pub path: Utf8PathBuf,
    pub error: Error,
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchStats {
    pub converted: Vec<Conversion>,
    pub failed: Vec<BatchFailure>,
    /// Theme files whose paths are not valid UTF-8.
    pub skipped: Vec<PathBuf>,
}

impl BatchStats {
    /// Total unsupported scopes across all converted themes.
    pub fn unsupported_scopes(&self) -> usize {
        self.converted
            .iter()
            .map(|c| c.tree.unsupported().len())
            .sum()
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

fn is_theme_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(THEME_EXTENSION))
}

/// Convert every `.tmTheme` under `options.themes_dir`.
///
/// Each file gets its own walk, named after its file stem. A file that fails
/// to convert is recorded in [`BatchStats::failed`] and the run carries on.
/// So is a file whose stylesheet was already written by an earlier file in
/// the run (same stem in another subdirectory); the first one keeps it.
/// Only a missing themes directory is fatal.
pub fn convert_dir(options: &BatchOptions) -> Result<BatchStats> {
    if !options.themes_dir.is_dir() {
        return Err(Error::MissingDirectory {
            path: options.themes_dir.clone(),
        });
    }

    let mut stats = BatchStats::default();
    // Stylesheet path -> theme file that wrote it
    let mut written: HashMap<Utf8PathBuf, Utf8PathBuf> = HashMap::new();

    for entry in WalkDir::new(&options.themes_dir).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "skipping unreadable directory entry");
                continue;
            }
        };
        if !entry.file_type().is_file() || !is_theme_file(entry.path()) {
            continue;
        }

        let path = match Utf8PathBuf::from_path_buf(entry.into_path()) {
            Ok(path) => path,
            Err(path) => {
                warn!(path = %path.display(), "skipping theme with non UTF-8 path");
                stats.skipped.push(path);
                continue;
            }
        };

        let name = path.file_stem().map(str::to_string);
        if let Some(previous) = name
            .as_deref()
            .and_then(|n| output_path(&options.output_dir, n).ok())
            .and_then(|output| written.get_key_value(&output))
        {
            let error = Error::OutputCollision {
                output: previous.0.clone(),
                previous: previous.1.clone(),
            };
            warn!(path = %path, error = %error, "skipping theme");
            stats.failed.push(BatchFailure { path, error });
            continue;
        }

        let file_options = ConvertOptions {
            name,
            theme_path: path.clone(),
            output_dir: options.output_dir.clone(),
            debug: options.debug,
        };

        match convert_file(&file_options) {
            Ok(conversion) => {
                written.insert(conversion.output_path.clone(), path);
                stats.converted.push(conversion);
            }
            Err(error) => {
                warn!(path = %path, error = %error, "failed to convert theme");
                stats.failed.push(BatchFailure { path, error });
            }
        }
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_uses_slug() {
        assert_eq!(
            output_path(Utf8Path::new("out"), "Solarized Dark").unwrap(),
            Utf8PathBuf::from("out/solarized-dark.css")
        );
    }

    #[test]
    fn test_output_path_rejects_path_components() {
        for name in ["One Dark/Pro", "..", "../escape", "back\\slash", ""] {
            assert!(
                matches!(
                    output_path(Utf8Path::new("out"), name),
                    Err(Error::InvalidName { .. })
                ),
                "accepted {name:?}"
            );
        }
    }

    #[test]
    fn test_is_theme_file() {
        assert!(is_theme_file(Path::new("themes/Monokai.tmTheme")));
        assert!(is_theme_file(Path::new("themes/monokai.TMTHEME")));
        assert!(!is_theme_file(Path::new("themes/monokai.json")));
        assert!(!is_theme_file(Path::new("themes/tmTheme")));
    }

    #[test]
    fn test_name_resolution_order() {
        let theme = Theme {
            metadata: [(
                "name".to_string(),
                plist::Value::String("From Theme".to_string()),
            )]
            .into_iter()
            .collect(),
            settings: Vec::new(),
        };
        let path = Utf8Path::new("themes/from-file.tmTheme");

        assert_eq!(resolve_name(Some("Given"), &theme, path).unwrap(), "Given");
        assert_eq!(resolve_name(Some("  "), &theme, path).unwrap(), "From Theme");

        let unnamed = Theme {
            metadata: Default::default(),
            settings: Vec::new(),
        };
        assert_eq!(resolve_name(None, &unnamed, path).unwrap(), "from-file");
    }

    #[test]
    fn test_convert_bytes_reports_parse_errors() {
        let truncated = b"<?xml version=\"1.0\"?><plist version=\"1.0\"><dict><key>name";
        assert!(matches!(
            convert_bytes("Broken", truncated),
            Err(ThemeError::Plist(_))
        ));
    }
}
