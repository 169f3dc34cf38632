//! Messages produced while generating adapters.

use proc_macro2::{Span, TokenStream as SynTokenStream};
use quote::*;
use std::fmt;

/// How severe a diagnostic is.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Level {
    /// Generation continues with a degraded result.
    Warning,
    /// Generation of the affected item was abandoned.
    Error,
}

/// A single message attached to a location in the processed source.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub level: Level,
    pub span: Span,
    pub message: String,
}
impl Diagnostic {
    pub fn warning(span: Span, message: impl Into<String>) -> Self {
        Diagnostic { level: Level::Warning, span, message: message.into() }
    }

    pub fn error(span: Span, message: impl Into<String>) -> Self {
        Diagnostic { level: Level::Error, span, message: message.into() }
    }

    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }

    /// Emits the diagnostic as tokens: a compile error, or a deprecation warning on stable.
    pub fn to_tokens(&self) -> SynTokenStream {
        match self.level {
            Level::Error => syn::Error::new(self.span, &self.message).to_compile_error(),
            Level::Warning => {
                let message = &self.message;
                let name = format_ident!("auto_listener_warning", span = self.span);
                quote_spanned! {self.span=>
                    const _: () = {
                        #[deprecated(note = #message)]
                        #[allow(non_upper_case_globals)]
                        const #name: () = ();
                        let _ = #name;
                    };
                }
            }
        }
    }
}
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.level {
            Level::Warning => "warning",
            Level::Error => "error",
        };
        let start = self.span.start();
        if start.line == 0 {
            write!(f, "{}: {}", level, self.message)
        } else {
            write!(f, "{} ({}:{}): {}", level, start.line, start.column + 1, self.message)
        }
    }
}

/// An append-only collection of diagnostics owned by one generation pass.
#[derive(Clone, Debug, Default)]
pub struct Diagnostics {
    list: Vec<Diagnostic>,
}
impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.list.push(diagnostic);
    }

    pub fn warning(&mut self, span: Span, message: impl Into<String>) {
        self.push(Diagnostic::warning(span, message));
    }

    pub fn error(&mut self, span: Span, message: impl Into<String>) {
        self.push(Diagnostic::error(span, message));
    }

    /// Moves every diagnostic of `other` into this collection.
    pub fn append(&mut self, other: Diagnostics) {
        self.list.extend(other.list);
    }

    pub fn has_errors(&self) -> bool {
        self.list.iter().any(Diagnostic::is_error)
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.list.iter()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.list.iter().filter(|x| x.level == Level::Warning)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.list.iter().filter(|x| x.level == Level::Error)
    }

    /// Emits every diagnostic as tokens.
    pub fn to_tokens(&self) -> SynTokenStream {
        let mut toks = SynTokenStream::new();
        for diagnostic in &self.list {
            toks.extend(diagnostic.to_tokens());
        }
        toks
    }
}
impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;
    fn into_iter(self) -> Self::IntoIter {
        self.list.into_iter()
    }
}
