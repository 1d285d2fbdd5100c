use std::io;
use std::path::PathBuf;

use camino::Utf8PathBuf;
use miette::Diagnostic;
use thiserror::Error;

use crate::theme::ThemeError;

/// Fatal conversion errors.
///
/// Unsupported scopes are not errors; they are collected on the
/// [`OutputTree`](crate::OutputTree).
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    /// The theme file could not be read. The source carries the path.
    #[error("failed to read theme file")]
    #[diagnostic(code(cmtheme::read))]
    Read(#[source] io::Error),

    #[error("failed to load theme {path}")]
    #[diagnostic(code(cmtheme::theme))]
    Theme {
        path: Utf8PathBuf,
        #[source]
        #[diagnostic_source]
        source: ThemeError,
    },

    /// The stylesheet could not be written. The source carries the path.
    #[error("failed to write stylesheet")]
    #[diagnostic(code(cmtheme::write))]
    Write(#[source] io::Error),

    #[error("themes directory not found: {path}")]
    #[diagnostic(code(cmtheme::read))]
    MissingDirectory { path: Utf8PathBuf },

    #[error("no theme name for {path}")]
    #[diagnostic(
        code(cmtheme::name),
        help("pass a name explicitly or give the theme a `name` key")
    )]
    MissingName { path: Utf8PathBuf },

    #[error("theme name {name:?} cannot be used as a file name")]
    #[diagnostic(
        code(cmtheme::name),
        help("theme names may not contain `/`, `\\` or `..`")
    )]
    InvalidName { name: String },

    /// Two themes in one batch map to the same stylesheet.
    #[error("{output} was already written by {previous}")]
    #[diagnostic(
        code(cmtheme::collision),
        help("rename one of the theme files so their stems differ")
    )]
    OutputCollision {
        output: Utf8PathBuf,
        previous: Utf8PathBuf,
    },

    #[error("path is not valid UTF-8: {}", .0.display())]
    #[diagnostic(code(cmtheme::path))]
    NonUtf8Path(PathBuf),

    #[error("failed to render debug output")]
    #[diagnostic(code(cmtheme::debug))]
    Debug(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
