use std::fmt;
use std::path::PathBuf;

enum ErrorData {
    SynError(syn::Error),
    DarlingError(darling::Error),
    IoError(PathBuf, std::io::Error),
    Combined(Vec<Error>),
    Empty,
}

/// A error type used by this crate.
pub struct Error(ErrorData);

impl Error {
    /// Creates a new error from a span and an message
    pub fn new<T: fmt::Display>(span: impl Into<proc_macro2::Span>, message: T) -> Self {
        Error(ErrorData::SynError(syn::Error::new(span.into(), message)))
    }

    /// Creates a new error for a failed filesystem operation on `path`.
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Error(ErrorData::IoError(path.into(), err))
    }

    /// Creates an error empty data for collecting errors.
    pub fn empty() -> Self {
        Error(ErrorData::Empty)
    }

    /// Returns whether this error data is empty.
    pub fn is_empty(&self) -> bool {
        match &self.0 {
            ErrorData::Empty => true,
            _ => false,
        }
    }

    /// Combines two errors into one so they can be emitted at one time.
    pub fn combine(self, other: impl Into<Error>) -> Self {
        let mut list = match self.0 {
            ErrorData::Combined(vec) => vec,
            ErrorData::Empty => Vec::new(),
            x => vec![Error(x)],
        };
        match other.into().0 {
            ErrorData::Combined(vec) => list.extend(vec),
            ErrorData::Empty => { }
            x => list.push(Error(x)),
        }
        Error(ErrorData::Combined(list))
    }

    /// Emits the error as a token stream.
    pub fn to_compile_error(self) -> proc_macro2::TokenStream {
        match self.0 {
            ErrorData::SynError(e) => e.to_compile_error(),
            ErrorData::DarlingError(e) => e.write_errors(),
            ErrorData::IoError(path, e) => syn::Error::new(
                proc_macro2::Span::call_site(),
                format!("could not access '{}': {}", path.display(), e),
            ).to_compile_error(),
            ErrorData::Combined(e) => {
                let mut stream = proc_macro2::TokenStream::new();
                for e in e {
                    stream.extend(e.to_compile_error());
                }
                stream
            }
            ErrorData::Empty => {
                Error::new(
                    proc_macro2::Span::call_site(),
                    "internal error: Error::empty() emitted?",
                ).to_compile_error()
            }
        }
    }

    /// Splits the error into its individual messages and the locations they point at.
    pub fn messages(self) -> Vec<(proc_macro2::Span, String)> {
        match self.0 {
            ErrorData::SynError(e) => e.into_iter().map(|x| (x.span(), x.to_string())).collect(),
            ErrorData::DarlingError(e) => vec![(e.span(), e.to_string())],
            ErrorData::IoError(path, e) => vec![(
                proc_macro2::Span::call_site(),
                format!("could not access '{}': {}", path.display(), e),
            )],
            ErrorData::Combined(list) => list.into_iter().flat_map(Error::messages).collect(),
            ErrorData::Empty => Vec::new(),
        }
    }

    /// Emits the error as a token stream for a procedural macro.
    pub fn emit(self) -> proc_macro::TokenStream {
        self.to_compile_error().into()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            ErrorData::SynError(e) => fmt::Display::fmt(e, f),
            ErrorData::DarlingError(e) => fmt::Display::fmt(e, f),
            ErrorData::IoError(path, e) =>
                write!(f, "could not access '{}': {}", path.display(), e),
            ErrorData::Combined(list) => {
                for (i, e) in list.iter().enumerate() {
                    if i != 0 {
                        f.write_str("; ")?;
                    }
                    fmt::Display::fmt(e, f)?;
                }
                Ok(())
            }
            ErrorData::Empty => f.write_str("no error"),
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error({})", self)
    }
}

impl std::error::Error for Error { }

impl From<syn::Error> for Error {
    fn from(e: syn::Error) -> Self {
        Error(ErrorData::SynError(e))
    }
}

impl From<darling::Error> for Error {
    fn from(e: darling::Error) -> Self {
        Error(ErrorData::DarlingError(e))
    }
}

/// An error type specialized for this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[macro_export]
macro_rules! try_syn {
    ($err:expr) => {
        match $err {
            Ok(v) => v,
            Err(e) => return e.emit().into(),
        }
    };
}
