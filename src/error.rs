//! Error taxonomy for the skip generator.
//!
//! Every variant is fatal: the generated directives end up compiled into a
//! save reader, so a run either produces the full table or nothing.

use std::path::PathBuf;

use thiserror::Error;

use crate::model::VersionRange;

#[derive(Error, Debug)]
pub enum GenError {
    #[error("file not found: {}", path.display())]
    MissingInput { path: PathBuf },

    #[error("settings block marker not found: {marker:?}")]
    MissingMarker { marker: &'static str },

    #[error("unknown saveload version {token}, check src/saveload/saveload.h")]
    UnresolvedVersionToken { token: String },

    #[error("I don't know what {keyword} is (line: {line})")]
    UnknownDescriptorKind { keyword: String, line: String },

    #[error("unknown type {name}")]
    UnknownTypeName { name: String },

    #[error("malformed {keyword} descriptor: {line}")]
    MalformedDescriptorLine { keyword: String, line: String },

    #[error("version range {from}..{to} is inverted")]
    InvertedRange { from: u32, to: u32 },

    #[error("byte total for versions {range} overflows")]
    WidthOverflow { range: VersionRange },

    #[error("invalid version table: {reason}")]
    InvalidVersionTable { reason: String },
}

pub type GenResult<T> = Result<T, GenError>;
