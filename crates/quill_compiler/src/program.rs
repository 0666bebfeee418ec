//! The program: every source file of one run.

use crate::error::CompilerError;
use crate::options::CompilerOptions;
use quill_diagnostics::DiagnosticCollection;
use quill_parser::{ParseResult, Parser};
use rayon::prelude::*;
use std::path::Path;
use std::time::{Duration, Instant};

/// A named source text.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub file_name: String,
    pub text: String,
}

/// The outcome of parsing one [`SourceFile`].
#[derive(Debug)]
pub struct ParsedFile {
    pub file_name: String,
    pub result: ParseResult,
    /// Wall-clock time spent parsing this file.
    pub elapsed: Duration,
}

/// Every parsed file, in the order the sources were added, plus all of
/// their diagnostics merged and sorted by file and position.
#[derive(Debug)]
pub struct ProgramResult {
    pub files: Vec<ParsedFile>,
    pub diagnostics: DiagnosticCollection,
}

impl ProgramResult {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.error_count()
    }

    pub fn file(&self, file_name: &str) -> Option<&ParsedFile> {
        self.files.iter().find(|file| file.file_name == file_name)
    }
}

/// The program represents the entire compilation unit.
pub struct Program {
    /// Compiler options.
    pub options: CompilerOptions,
    sources: Vec<SourceFile>,
}

impl Program {
    pub fn new(options: CompilerOptions) -> Self {
        Self {
            options,
            sources: Vec::new(),
        }
    }

    /// Add an in-memory source.
    pub fn add_source(&mut self, file_name: impl Into<String>, text: impl Into<String>) {
        self.sources.push(SourceFile {
            file_name: file_name.into(),
            text: text.into(),
        });
    }

    /// Read a source file from disk.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<(), CompilerError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| CompilerError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.add_source(path.to_string_lossy(), text);
        Ok(())
    }

    pub fn sources(&self) -> &[SourceFile] {
        &self.sources
    }

    pub fn source(&self, file_name: &str) -> Option<&SourceFile> {
        self.sources.iter().find(|source| source.file_name == file_name)
    }

    /// Parse every source. Each file gets its own parser and scope tree,
    /// so files are parsed in parallel and never see each other's names.
    pub fn parse_all(&self) -> ProgramResult {
        let files: Vec<ParsedFile> = self
            .sources
            .par_iter()
            .map(|source| {
                let start = Instant::now();
                let result = Parser::new(&source.text)
                    .with_file_name(source.file_name.as_str())
                    .parse_module();
                ParsedFile {
                    file_name: source.file_name.clone(),
                    result,
                    elapsed: start.elapsed(),
                }
            })
            .collect();

        let mut diagnostics = DiagnosticCollection::new();
        for file in &files {
            diagnostics.extend(file.result.diagnostics.clone());
        }
        diagnostics.sort();

        ProgramResult { files, diagnostics }
    }
}
