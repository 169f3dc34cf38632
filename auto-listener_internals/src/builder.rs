//! Generation of adapter files from a build script.

use crate::config::Config;
use crate::diagnostics::Diagnostics;
use crate::errors::{Error, Result};
use crate::pass::ListenerPass;
use crate::utils::*;
use proc_macro2::Span;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Generates adapter files for the marked structs of a source file.
///
/// Every inline module of the file is processed, and each adapter is written to
/// `<out_dir>/<module path>/<adapter name in snake case>.rs`, to be pulled in with `include!`.
///
/// ```no_run
/// let report = auto_listener_internals::Builder::new()
///     .source("src/handlers.rs")
///     .generate()
///     .expect("could not generate listeners");
/// report.emit_cargo_messages();
/// ```
#[derive(Clone, Debug, Default)]
pub struct Builder {
    source: Option<PathBuf>,
    out_dir: Option<PathBuf>,
    crate_name: Option<String>,
}
impl Builder {
    pub fn new() -> Self {
        Builder::default()
    }

    /// Sets the file to scan for marked structs.
    pub fn source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(path.into());
        self
    }

    /// Sets the directory adapter files are written to. Defaults to `$OUT_DIR`.
    pub fn out_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.out_dir = Some(path.into());
        self
    }

    /// Sets the path of the runtime crate, for crates that rename the dependency.
    pub fn crate_name(mut self, name: impl Into<String>) -> Self {
        self.crate_name = Some(name.into());
        self
    }

    fn config(&self) -> Result<Config> {
        match &self.crate_name {
            Some(name) => Config::with_crate(name),
            None => Ok(Config::default()),
        }
    }

    /// Parses the source file, generates every adapter and writes them out.
    ///
    /// Failing to read or parse the source is an error. Problems with single types, including
    /// failures to write their files, are recorded in the report instead.
    pub fn generate(self) -> Result<BuildReport> {
        let source = match &self.source {
            Some(source) => source.clone(),
            None => return error(Span::call_site(), "No source file was given to the builder."),
        };
        let out_dir = match &self.out_dir {
            Some(out_dir) => out_dir.clone(),
            None => match std::env::var_os("OUT_DIR") {
                Some(out_dir) => PathBuf::from(out_dir),
                None => return error(
                    Span::call_site(),
                    "No output directory was given, and OUT_DIR is not set.",
                ),
            },
        };
        let config = self.config()?;

        let text = fs::read_to_string(&source).map_err(|e| Error::io(&source, e))?;
        let mut file = syn::parse_file(&text)?;
        let mut pass = ListenerPass::new(config);
        pass.process_items(Vec::new(), &mut file.items);
        let (adapters, mut diagnostics) = pass.finish();

        let mut files = Vec::new();
        for adapter in &adapters {
            let path = out_dir.join(adapter.relative_path());
            match write_file(&path, &adapter.to_source()) {
                Ok(()) => {
                    debug!(path = %path.display(), "Wrote adapter");
                    files.push(path);
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Could not write adapter");
                    diagnostics.error(Span::call_site(), format!(
                        "Could not write `{}` for `{}`: {}",
                        adapter.adapter.ident, adapter.adapter.source, e,
                    ));
                }
            }
        }
        Ok(BuildReport { source, files, diagnostics })
    }
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    fs::write(path, contents).map_err(|e| Error::io(path, e))
}

/// The outcome of [`Builder::generate`].
#[derive(Debug)]
pub struct BuildReport {
    source: PathBuf,
    files: Vec<PathBuf>,
    diagnostics: Diagnostics,
}
impl BuildReport {
    /// Every file written, in generation order.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }

    /// The instructions for cargo: a rerun trigger on the source, and one warning line per
    /// diagnostic.
    pub fn cargo_messages(&self) -> Vec<String> {
        let mut lines = vec![format!("cargo:rerun-if-changed={}", self.source.display())];
        for diagnostic in self.diagnostics.iter() {
            lines.push(format!("cargo:warning={}: {}", self.source.display(), diagnostic));
        }
        lines
    }

    /// Prints [`BuildReport::cargo_messages`] to stdout.
    pub fn emit_cargo_messages(&self) {
        for line in self.cargo_messages() {
            println!("{}", line);
        }
    }
}
