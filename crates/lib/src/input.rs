//! Input parser.

mod error;
mod input_iter;
mod iter;

use std::str::from_utf8;

use arrayvec::ArrayVec;
use bstr::{BStr, ByteSlice};

use crate::env::Size;

pub use self::error::{ErrorKind, IStrError};
pub use self::input_iter::InputIterator;
pub use self::iter::Iter;

type Result<T> = std::result::Result<T, IStrError>;

pub(crate) const NL: u8 = b'\n';

/// Cursor over a `'static` input which tracks its offset into the original
/// data, so that errors can point at where they happened.
#[derive(Debug, Clone, Copy)]
pub struct IStr {
    data: &'static [u8],
    index: Size,
}

impl IStr {
    /// Construct a cursor over `data`, which starts at `index` in the
    /// original input.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib::prelude::*;
    ///
    /// let mut input = IStr::new(b"1 2\n3 4\n", Size::ZERO);
    /// assert_eq!(input.try_line::<(u32, u32)>()?, Some((1, 2)));
    /// assert_eq!(input.try_line::<(u32, u32)>()?, Some((3, 4)));
    /// assert_eq!(input.try_line::<(u32, u32)>()?, None);
    /// # Ok::<_, lib::input::IStrError>(())
    /// ```
    #[inline]
    pub fn new(data: &'static [u8], index: Size) -> Self {
        Self { data, index }
    }

    /// Offset of the cursor into the original input.
    #[inline]
    pub fn index(&self) -> Size {
        self.index
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Bytes which have not been consumed yet.
    #[inline]
    pub fn as_data(&self) -> &'static [u8] {
        self.data
    }

    #[inline]
    pub fn as_bstr(&self) -> &BStr {
        self.data.as_bstr()
    }

    /// Construct an error covering the current input.
    #[inline]
    pub fn error(&self, kind: ErrorKind) -> IStrError {
        IStrError::new(self.index..self.end(), kind)
    }

    /// Iterate over the remaining lines, parsing each as `T`.
    #[inline]
    pub fn iter<T>(&mut self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Pieces of the input separated by `byte`, consumed as they are taken.
    #[inline]
    pub fn splitn(&mut self, byte: u8) -> impl InputIterator + '_ {
        return Pieces { input: self, byte };

        struct Pieces<'a> {
            input: &'a mut IStr,
            byte: u8,
        }

        impl InputIterator for Pieces<'_> {
            #[inline]
            fn next(&mut self) -> Option<IStr> {
                self.input.take_until(self.byte)
            }
        }
    }

    /// Parse a `T`, erroring if the input runs out first.
    #[inline]
    #[allow(clippy::should_implement_trait)]
    pub fn next<T>(&mut self) -> Result<T>
    where
        T: FromInput,
    {
        T::from_input(self)
    }

    /// Parse a `T`, or `None` if the input is exhausted.
    #[inline]
    pub fn try_next<T>(&mut self) -> Result<Option<T>>
    where
        T: FromInput,
    {
        T::try_from_input(self)
    }

    /// Parse the next line as `T`, erroring with
    /// [`ErrorKind::ExpectedLine`] if there are no lines left.
    #[inline]
    pub fn line<T>(&mut self) -> Result<T>
    where
        T: FromInput,
    {
        let start = self.index;

        match self.try_line()? {
            Some(value) => Ok(value),
            None => Err(IStrError::new(start..self.index, ErrorKind::ExpectedLine)),
        }
    }

    /// Parse the next line as `T`.
    ///
    /// Returns `Ok(None)` once every line has been consumed.
    #[inline]
    pub fn try_line<T>(&mut self) -> Result<Option<T>>
    where
        T: FromInput,
    {
        match self.take_until(NL) {
            Some(mut line) => line.try_next(),
            None => Ok(None),
        }
    }

    /// Parse the next whitespace-delimited word as `T`, returning the offset
    /// of the word relative to the cursor.
    pub fn try_next_word<T>(&mut self) -> Result<Option<(Size, T)>>
    where
        T: FromInput,
    {
        let start = self.position(0, |b| !b.is_ascii_whitespace());
        let end = self.position(start, |b| b.is_ascii_whitespace());

        if start == end {
            return Ok(None);
        }

        let index = self.index.saturating_add(Size::new(start));
        let mut word = IStr::new(&self.data[start..end], index);

        let Some(value) = T::try_from_input(&mut word)? else {
            return Ok(None);
        };

        self.advance(end);
        Ok(Some((Size::new(start), value)))
    }

    /// Take everything up to the next `byte`, consuming the separator. The
    /// last piece runs to the end of the input.
    fn take_until(&mut self, byte: u8) -> Option<IStr> {
        if self.data.is_empty() {
            return None;
        }

        let start = self.index;

        let (piece, consumed) = match memchr::memchr(byte, self.data) {
            Some(at) => (&self.data[..at], at + 1),
            None => (self.data, self.data.len()),
        };

        self.advance(consumed);
        Some(IStr::new(piece, start))
    }

    /// Position of the first byte at or after `from` matching `predicate`, or
    /// the length of the input.
    fn position(&self, from: usize, predicate: impl Fn(u8) -> bool) -> usize {
        self.data
            .iter()
            .skip(from)
            .position(|&b| predicate(b))
            .map_or(self.data.len(), |n| from + n)
    }

    #[inline]
    fn end(&self) -> Size {
        self.index.saturating_add(Size::new(self.data.len()))
    }

    #[inline]
    fn advance(&mut self, n: usize) {
        let n = n.min(self.data.len());
        self.data = &self.data[n..];
        self.index = self.index.saturating_add(Size::new(n));
    }
}

/// A value that can be parsed from input.
pub trait FromInput: Sized {
    /// Custom error kind to use.
    #[inline]
    fn error_kind() -> ErrorKind {
        ErrorKind::UnexpectedEof
    }

    /// Try to parse a value, returning `Ok(None)` if there is no input left.
    fn try_from_input(p: &mut IStr) -> Result<Option<Self>>;

    /// Parse a value from a given input.
    #[inline]
    fn from_input(p: &mut IStr) -> Result<Self> {
        let index = p.index;

        let Some(value) = Self::try_from_input(p)? else {
            return Err(IStrError::new(index..p.index, Self::error_kind()));
        };

        Ok(value)
    }
}

/// Parse something from a sequence of inputs.
pub trait FromInputIter: Sized {
    /// Consume inputs from the iterator, returning `Ok(None)` if it runs out
    /// before the value is complete. Each piece is parsed in full, so a piece
    /// which does not hold a value is an error.
    fn from_input_iter<I>(inputs: I) -> Result<Option<Self>>
    where
        I: InputIterator;
}

/// Implement parsing for a tuple, either from consecutive values or from
/// consecutive pieces of an [InputIterator].
macro_rules! tuple {
    ($len:literal => $($ty:ident $var:ident),+) => {
        impl<$($ty,)+> FromInput for ($($ty,)+)
        where
            $($ty: FromInput,)+
        {
            #[inline]
            fn error_kind() -> ErrorKind {
                ErrorKind::ExpectedTuple($len)
            }

            #[inline]
            fn try_from_input(p: &mut IStr) -> Result<Option<Self>> {
                $(let Some($var) = $ty::try_from_input(p)? else { return Ok(None) };)+
                Ok(Some(($($var,)+)))
            }
        }

        impl<$($ty,)+> FromInputIter for ($($ty,)+)
        where
            $($ty: FromInput,)+
        {
            #[inline]
            fn from_input_iter<I>(mut inputs: I) -> Result<Option<Self>>
            where
                I: InputIterator,
            {
                $(let Some(mut $var) = inputs.next() else { return Ok(None) };)+
                Ok(Some(($($ty::from_input(&mut $var)?,)+)))
            }
        }
    };
}

macro_rules! integer {
    ($($ty:ty),* $(,)?) => {
        $(impl FromInput for $ty {
            #[inline]
            fn try_from_input(p: &mut IStr) -> Result<Option<Self>> {
                let index = p.index;

                let Some((at, word)) = p.try_next_word::<&str>()? else {
                    return Ok(None);
                };

                match word.parse() {
                    Ok(n) => Ok(Some(n)),
                    Err(..) => {
                        let start = index.saturating_add(at);
                        Err(IStrError::new(start..p.index, ErrorKind::NotInteger(word)))
                    }
                }
            }
        })*
    };
}

tuple!(1 => A a);
tuple!(2 => A a, B b);
tuple!(3 => A a, B b, C c);
tuple!(4 => A a, B b, C c, D d);

integer!(usize, u32, u64, i64);

impl FromInput for IStr {
    #[inline]
    fn try_from_input(p: &mut IStr) -> Result<Option<Self>> {
        let value = *p;
        p.advance(p.len());
        Ok(Some(value))
    }
}

impl FromInput for &[u8] {
    #[inline]
    fn try_from_input(p: &mut IStr) -> Result<Option<Self>> {
        let data = p.data;
        p.advance(data.len());
        Ok(Some(data))
    }
}

impl FromInput for &str {
    #[inline]
    fn try_from_input(p: &mut IStr) -> Result<Option<Self>> {
        let index = p.index;

        let Some(data) = <&[u8]>::try_from_input(p)? else {
            return Ok(None);
        };

        let Ok(data) = from_utf8(data) else {
            return Err(IStrError::new(index..p.index, ErrorKind::NotUtf8));
        };

        Ok(Some(data))
    }
}

impl<T, const N: usize> FromInput for ArrayVec<T, N>
where
    T: FromInput,
{
    #[inline]
    fn try_from_input(p: &mut IStr) -> Result<Option<Self>> {
        let index = p.index;
        let mut output = ArrayVec::new();

        while let Some(element) = T::try_from_input(p)? {
            if output.try_push(element).is_err() {
                return Err(IStrError::new(index..p.index, ErrorKind::ArrayCapacity(N)));
            }
        }

        Ok(Some(output))
    }
}

/// Split on the byte `D` and parse each piece with [FromInputIter].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Split<const D: char, T>(pub T);

impl<const D: char, T> FromInput for Split<D, T>
where
    T: FromInputIter,
{
    #[inline]
    fn error_kind() -> ErrorKind {
        ErrorKind::ExpectedSplit(D)
    }

    #[inline]
    fn try_from_input(p: &mut IStr) -> Result<Option<Self>> {
        let index = p.index;
        let empty = p.is_empty();

        let Some(out) = T::from_input_iter(p.splitn(D as u8))? else {
            if empty {
                return Ok(None);
            }

            return Err(IStrError::new(index..p.index, ErrorKind::ExpectedSplit(D)));
        };

        Ok(Some(Self(out)))
    }
}

/// Marker which skips over a parsed word.
#[non_exhaustive]
pub struct Skip;

impl FromInput for Skip {
    #[inline]
    fn try_from_input(_: &mut IStr) -> Result<Option<Self>> {
        Ok(Some(Self))
    }
}

/// Parse a word of input, which parses until we reach a whitespace character.
pub struct W<T = Skip>(pub T);

impl<T> FromInput for W<T>
where
    T: FromInput,
{
    #[inline]
    fn try_from_input(p: &mut IStr) -> Result<Option<Self>> {
        let Some((_, value)) = p.try_next_word()? else {
            return Ok(None);
        };

        Ok(Some(Self(value)))
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorKind, IStr, Split, W};
    use crate::env::Size;
    use arrayvec::ArrayVec;

    #[test]
    fn test_lines() {
        let mut input = IStr::new(b"first\n\nthird", Size::ZERO);

        assert_eq!(input.try_line::<&str>().unwrap(), Some("first"));
        assert_eq!(input.try_line::<&str>().unwrap(), Some(""));
        assert_eq!(input.try_line::<&str>().unwrap(), Some("third"));
        assert_eq!(input.try_line::<&str>().unwrap(), None);
        assert!(input.line::<&str>().is_err());
    }

    #[test]
    fn test_line_index() {
        let mut input = IStr::new(b"ab\ncd\n", Size::ZERO);

        let first = input.line::<IStr>().unwrap();
        let second = input.line::<IStr>().unwrap();

        assert_eq!(first.index(), Size::new(0));
        assert_eq!(second.index(), Size::new(3));
        assert_eq!(second.as_data(), b"cd");
    }

    #[test]
    fn test_words() {
        let mut input = IStr::new(b"  Card   12 ", Size::ZERO);
        let (W(name), id) = input.next::<(W<&str>, u32)>().unwrap();
        assert_eq!(name, "Card");
        assert_eq!(id, 12);
    }

    #[test]
    fn test_split() {
        let mut input = IStr::new(b"Card 1: 41 48 | 83 86  6", Size::ZERO);

        let Split(((W(_), id), Split((winners, numbers)))) = input
            .next::<Split<':', ((W, u32), Split<'|', (ArrayVec<u32, 4>, ArrayVec<u32, 4>)>)>>()
            .unwrap();

        assert_eq!(id, 1);
        assert_eq!(&winners[..], &[41, 48]);
        assert_eq!(&numbers[..], &[83, 86, 6]);
    }

    #[test]
    fn test_missing_split() {
        let mut input = IStr::new(b"no separator here", Size::ZERO);
        let error = input.next::<Split<':', (IStr, IStr)>>().unwrap_err();
        assert!(matches!(error.kind(), ErrorKind::ExpectedSplit(':')));
    }

    #[test]
    fn test_not_integer() {
        let mut input = IStr::new(b"12 x4", Size::ZERO);
        assert_eq!(input.next::<u32>().unwrap(), 12);
        let error = input.next::<u32>().unwrap_err();
        assert!(matches!(error.kind(), ErrorKind::NotInteger("x4")));
    }

    #[test]
    fn test_capacity() {
        let mut input = IStr::new(b"1 2 3", Size::ZERO);
        let error = input.next::<ArrayVec<u32, 2>>().unwrap_err();
        assert!(matches!(error.kind(), ErrorKind::ArrayCapacity(2)));
    }
}
