//! quill.json parsing and compiler options.

use crate::error::CompilerError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Options read from the `compilerOptions` section of quill.json.
/// Unset fields fall back to the defaults of the accessor methods.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilerOptions {
    /// Colour and source context in diagnostics.
    pub pretty: Option<bool>,
    /// Stop printing diagnostics after this many.
    pub max_errors: Option<usize>,
    /// What to print for each parsed file.
    pub emit_ast: Option<EmitAst>,
}

impl CompilerOptions {
    pub fn pretty(&self) -> bool {
        self.pretty.unwrap_or(true)
    }

    pub fn max_errors(&self) -> Option<usize> {
        self.max_errors
    }

    pub fn emit_ast(&self) -> EmitAst {
        self.emit_ast.unwrap_or_default()
    }

    /// Overlay every option set in `other` on top of `self`.
    pub fn merge(&mut self, other: &CompilerOptions) {
        if other.pretty.is_some() {
            self.pretty = other.pretty;
        }
        if other.max_errors.is_some() {
            self.max_errors = other.max_errors;
        }
        if other.emit_ast.is_some() {
            self.emit_ast = other.emit_ast;
        }
    }
}

/// Syntax tree output mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmitAst {
    #[default]
    None,
    Json,
    Source,
}

impl std::str::FromStr for EmitAst {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(EmitAst::None),
            "json" => Ok(EmitAst::Json),
            "source" => Ok(EmitAst::Source),
            _ => Err(format!("unknown emit mode '{}' (expected none, json or source)", s)),
        }
    }
}

/// The quill.json file structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuillConfig {
    pub compiler_options: Option<CompilerOptions>,
    /// Source files, relative to the directory holding quill.json.
    pub files: Option<Vec<String>>,
}

/// Parse a quill.json file from a string.
pub fn parse_config(content: &str) -> Result<QuillConfig, serde_json::Error> {
    serde_json::from_str(content)
}

/// Parse a quill.json file from a path. Relative `files` entries are
/// resolved against the file's directory.
pub fn parse_config_file(path: impl AsRef<Path>) -> Result<QuillConfig, CompilerError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| CompilerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut config = parse_config(&content).map_err(|source| CompilerError::Config {
        path: path.to_path_buf(),
        source,
    })?;

    if let (Some(files), Some(root_dir)) = (config.files.as_mut(), path.parent()) {
        for file in files.iter_mut() {
            *file = root_dir.join(&*file).to_string_lossy().to_string();
        }
    }
    Ok(config)
}
