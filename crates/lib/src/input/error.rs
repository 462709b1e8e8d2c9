use core::fmt;
use core::ops::Range;

use crate::env::Size;

/// Boxed error produced by user conversions.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug)]
#[non_exhaustive]
pub enum ErrorKind {
    NotInteger(&'static str),
    NotUtf8,
    ExpectedLine,
    ExpectedTuple(usize),
    ExpectedSplit(char),
    UnexpectedEof,
    ArrayCapacity(usize),
    RowWidth(usize, usize),
    Boxed(BoxError),
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::NotInteger(n) => write!(f, "not an integer or integer overflow `{n}`"),
            ErrorKind::NotUtf8 => write!(f, "not utf-8"),
            ErrorKind::ExpectedLine => write!(f, "expected line"),
            ErrorKind::ExpectedTuple(n) => write!(f, "expected tuple of length `{n}`"),
            ErrorKind::ExpectedSplit(d) => write!(f, "expected input separated by `{d}`"),
            ErrorKind::UnexpectedEof => write!(f, "unexpected eof"),
            ErrorKind::ArrayCapacity(cap) => write!(f, "array out of capacity ({cap})"),
            ErrorKind::RowWidth(expected, actual) => {
                write!(f, "bad row width; expected {expected}, but got {actual}")
            }
            ErrorKind::Boxed(error) => error.fmt(f),
        }
    }
}

/// Error raised through string processing.
#[derive(Debug)]
pub struct IStrError {
    pub(crate) span: Range<Size>,
    pub(crate) kind: ErrorKind,
}

impl IStrError {
    /// Construct a new input error.
    #[inline]
    pub fn new(span: Range<Size>, kind: ErrorKind) -> Self {
        Self { span, kind }
    }

    /// Wrap an error raised while converting the input at `span`.
    #[inline]
    pub fn boxed<E>(span: Range<Size>, error: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::new(span, ErrorKind::Boxed(error.into()))
    }

    #[inline]
    pub fn kind(self) -> ErrorKind {
        self.kind
    }
}

impl fmt::Display for IStrError {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at {:?})", self.kind, Size::usize_range(self.span.clone()))
    }
}

impl std::error::Error for IStrError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ErrorKind::Boxed(error) => error.source(),
            _ => None,
        }
    }
}
