use crate::input::IStr;

/// Source of input pieces, such as the parts of a line split on a separator.
pub trait InputIterator {
    /// Take the next piece, or `None` once the input is exhausted.
    fn next(&mut self) -> Option<IStr>;
}

impl<I> InputIterator for &mut I
where
    I: ?Sized + InputIterator,
{
    #[inline]
    fn next(&mut self) -> Option<IStr> {
        (**self).next()
    }
}
