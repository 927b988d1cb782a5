//! Theme authoring errors
//!
//! A broken theme fails at load, with enough context (screen, region,
//! attribute) to find the offending entry. Missing assets are not errors and
//! never show up here.

use crate::geometry::GeometryError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("theme json is invalid: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot read theme file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("theme '{0}' not found in any theme directory")]
    NotFound(String),

    #[error("theme document must be a map at the top level, found {0}")]
    NotAMap(&'static str),

    #[error("unknown reserved section '{0}'")]
    UnknownSection(String),

    #[error("section '{section}' must be a map, found {found}")]
    SectionNotAMap {
        section: String,
        found: &'static str,
    },

    #[error("color scheme '{requested}' is not declared (available: {available})")]
    UnknownScheme {
        requested: String,
        available: String,
    },

    #[error("screen '{screen}': unknown element '{element}'")]
    UnknownElement { screen: String, element: String },

    #[error("malformed requirement suffix in key '{0}'")]
    MalformedRequirement(String),

    #[error("unknown screen '{0}'")]
    UnknownScreen(String),

    #[error("screen '{screen}': required region '{region}' is missing")]
    MissingRegion { screen: String, region: String },

    #[error("screen '{screen}', region '{region}', attribute '{attribute}': {reason}")]
    InvalidAttribute {
        screen: String,
        region: String,
        attribute: String,
        reason: String,
    },

    #[error("screen '{screen}', region '{region}': bad area: {source}")]
    Geometry {
        screen: String,
        region: String,
        #[source]
        source: GeometryError,
    },
}

pub type Result<T> = std::result::Result<T, ThemeError>;
