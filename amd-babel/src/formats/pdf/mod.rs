//! PDF export built on top of the LaTeX renderer + a LaTeX engine.
//!
//! The memo is rendered with [`LatexFormat`], written to `memo.tex` in a
//! private temporary directory, and compiled there by shelling out to
//! `lualatex` (or whatever engine is configured). The resulting `memo.pdf` is
//! read back and returned as binary output.

use crate::error::FormatError;
use crate::format::{Format, SerializedDocument};
use crate::formats::latex::{render, LatexFormat, RenderOptions};
use crate::model::Document;
use std::collections::HashMap;
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;
use tracing::debug;
use which::which;

/// Environment variable overriding the engine binary
pub const ENGINE_ENV: &str = "AMD_LATEX_BIN";

/// Engine looked up on `PATH` when nothing is configured
pub const DEFAULT_ENGINE: &str = "lualatex";

/// Format implementation that shells out to a LaTeX engine to generate PDFs.
#[derive(Debug, Default, Clone)]
pub struct PdfFormat {
    latex: LatexFormat,
    engine: Option<PathBuf>,
    class_dir: Option<PathBuf>,
}

impl PdfFormat {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            latex: LatexFormat::new(options),
            engine: None,
            class_dir: None,
        }
    }

    /// Use this engine binary instead of searching for one
    pub fn with_engine(mut self, engine: impl Into<PathBuf>) -> Self {
        self.engine = Some(engine.into());
        self
    }

    /// Directory holding the `armymemo` class files, added to `TEXINPUTS`
    pub fn with_class_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.class_dir = Some(dir.into());
        self
    }
}

impl Format for PdfFormat {
    fn name(&self) -> &str {
        "pdf"
    }

    fn description(&self) -> &str {
        "PDF export via lualatex"
    }

    fn file_extensions(&self) -> &[&str] {
        &["pdf"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, _doc: &Document) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(
            "PDF serialization produces binary output".to_string(),
        ))
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<SerializedDocument, FormatError> {
        let render_options = self
            .latex
            .options()
            .with_overrides(options, &["engine", "class-dir"])?;
        let engine = match non_empty(options, "engine") {
            Some(engine) => PathBuf::from(engine),
            None => resolve_engine(self.engine.as_deref())?,
        };
        let class_dir = non_empty(options, "class-dir")
            .map(PathBuf::from)
            .or_else(|| self.class_dir.clone());

        let latex = render(doc, &render_options);
        let pdf_bytes = compile_latex(&latex, &engine, class_dir.as_deref())?;
        Ok(SerializedDocument::Binary(pdf_bytes))
    }
}

fn non_empty<'a>(options: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    options
        .get(key)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
}

fn compile_latex(
    latex: &str,
    engine: &Path,
    class_dir: Option<&Path>,
) -> Result<Vec<u8>, FormatError> {
    let temp_dir =
        tempdir().map_err(|e| FormatError::SerializationError(format!("Temp dir error: {e}")))?;
    let tex_path = temp_dir.path().join("memo.tex");
    fs::write(&tex_path, latex).map_err(|e| FormatError::SerializationError(e.to_string()))?;

    let mut command = Command::new(engine);
    command
        .current_dir(temp_dir.path())
        .arg("-interaction=nonstopmode")
        .arg("-halt-on-error")
        .arg("-file-line-error")
        .arg("-synctex=0")
        .arg("memo.tex");
    if let Some(dir) = class_dir {
        command.env("TEXINPUTS", texinputs(dir));
    }
    debug!(engine = %engine.display(), dir = %temp_dir.path().display(), "compiling memo");

    let output = command.output().map_err(|e| {
        FormatError::SerializationError(format!(
            "Failed to launch LaTeX engine ({}): {}",
            engine.display(),
            e
        ))
    })?;

    if !output.status.success() {
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(FormatError::SerializationError(format!(
            "LaTeX engine exited with status {}\nSTDOUT:\n{}\nSTDERR:\n{}",
            output.status,
            stdout.trim_end(),
            stderr.trim_end()
        )));
    }

    fs::read(temp_dir.path().join("memo.pdf"))
        .map_err(|e| FormatError::SerializationError(format!("No PDF was produced: {e}")))
}

/// `dir` followed by the existing search path; the trailing separator keeps
/// the engine's default directories.
fn texinputs(dir: &Path) -> OsString {
    let separator = if cfg!(windows) { ";" } else { ":" };
    let mut value = OsString::from(dir.as_os_str());
    value.push(separator);
    if let Some(existing) = env::var_os("TEXINPUTS") {
        value.push(existing);
    }
    value
}

fn resolve_engine(configured: Option<&Path>) -> Result<PathBuf, FormatError> {
    if let Some(path) = env::var_os(ENGINE_ENV) {
        if !path.is_empty() {
            return Ok(PathBuf::from(path));
        }
    }

    if let Some(path) = configured {
        return Ok(path.to_path_buf());
    }

    which(DEFAULT_ENGINE).map_err(|_| {
        FormatError::SerializationError(format!(
            "Unable to locate {DEFAULT_ENGINE}. Install a TeX distribution or set {ENGINE_ENV}."
        ))
    })
}
