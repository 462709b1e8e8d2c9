use core::fmt;
use std::ops::Range;
use std::path::{Path, PathBuf};

use crate::env::Size;
use crate::input::{IStr, IStrError};

/// Associate the input path and the position the error was raised at with an
/// error.
pub fn error_context<E>(path: &Path, data: IStr, error: E) -> anyhow::Error
where
    anyhow::Error: From<E>,
{
    let error = anyhow::Error::from(error);
    let span = find_range(&error);
    let pos = crate::env::pos_from(data.as_data(), span);

    error.context(ErrorContext {
        path: path.to_owned(),
        pos,
    })
}

/// A line and column combination.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCol {
    line: usize,
    start: usize,
    end: usize,
}

impl LineCol {
    pub(crate) const EMPTY: Self = Self::new(0, 0, 0);

    pub(crate) const fn new(line: usize, start: usize, end: usize) -> Self {
        Self { line, start, end }
    }

    /// The zero-based line.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Column range covered on the line.
    pub fn columns(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl fmt::Display for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line = self.line + 1;
        write!(f, "{line}:{}", self.start)
    }
}

/// Find the span of the first input error in the chain of causes.
fn find_range(error: &anyhow::Error) -> Range<Size> {
    error
        .chain()
        .find_map(|e| e.downcast_ref::<IStrError>())
        .map_or(Size::ZERO..Size::ZERO, |e| e.span.clone())
}

#[derive(Debug)]
struct ErrorContext {
    path: PathBuf,
    pos: LineCol,
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{path}:{pos}", path = self.path.display(), pos = self.pos)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::error_context;
    use crate::env::Size;
    use crate::input::IStr;

    #[test]
    fn test_error_context() {
        let mut input = IStr::new(b"1\n2\nthree\n", Size::ZERO);
        let original = input;

        let error = (|| -> anyhow::Result<u32> {
            let mut sum = 0;

            while let Some(n) = input.try_line::<u32>()? {
                sum += n;
            }

            Ok(sum)
        })()
        .unwrap_err();

        let error = error_context(Path::new("inputs/d00.txt"), original, error);
        assert_eq!(error.to_string(), "inputs/d00.txt:3:0");
    }
}
