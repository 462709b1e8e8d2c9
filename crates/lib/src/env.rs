use core::ops::Range;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::Context;

use crate::cli::error::LineCol;
use crate::input::IStr;

/// Byte offset into the input being processed.
#[repr(transparent)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Size(usize);

impl Size {
    /// Default zero value.
    pub const ZERO: Self = Self(0);

    #[inline]
    pub(crate) fn usize_range(range: Range<Size>) -> Range<usize> {
        range.start.0..range.end.0
    }

    #[inline]
    pub(crate) fn new(n: usize) -> Self {
        Self(n)
    }

    #[inline]
    pub(crate) fn saturating_add(self, n: Size) -> Self {
        Self(self.0.saturating_add(n.0))
    }
}

/// Get the current input position based on the given span.
pub(crate) fn pos_from(data: &[u8], span: Range<Size>) -> LineCol {
    use crate::input::NL;

    let span = Size::usize_range(span);

    let Some(d) = data.get(..span.start) else {
        return LineCol::EMPTY;
    };

    let (line, start) = match memchr::memrchr(NL, d) {
        Some(last) => (
            memchr::memchr_iter(NL, d).count(),
            d.len() - last.saturating_add(1),
        ),
        None => (0, d.len()),
    };

    let end = if let Some(end) = data.get(span) {
        let len = memchr::memchr(NL, end).unwrap_or(end.len());
        start.saturating_add(len)
    } else {
        start
    };

    LineCol::new(line, start, end)
}

/// Read the input at `path`.
///
/// The contents are leaked since the input is needed for the remaining
/// lifetime of the process anyway, which lets [IStr] be freely copied.
pub fn input(path: &Path) -> anyhow::Result<IStr> {
    return inner(path).with_context(|| path.display().to_string());

    #[inline]
    fn inner(path: &Path) -> anyhow::Result<IStr> {
        let mut file = File::open(path)?;
        let mut buf = Vec::with_capacity(4096);
        file.read_to_end(&mut buf)?;
        Ok(IStr::new(Vec::leak(buf), Size::ZERO))
    }
}

/// Default location of the named input, relative to the manifest of the
/// calling crate.
#[macro_export]
macro_rules! input_path {
    ($path:literal) => {
        concat!(env!("CARGO_MANIFEST_DIR"), "/inputs/", $path)
    };
}
