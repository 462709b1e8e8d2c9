/// Helper macro to implement [FromInput] by converting an already parsed
/// value.
///
/// Errors raised by the conversion are reported with the span of the input
/// that was consumed.
///
/// [FromInput]: crate::input::FromInput
#[macro_export]
macro_rules! from_input {
    (|$($value:ident)? $(($pat:pat))?: $ty:ty| -> $($rest:tt)*) => {
        $crate::from_input!(|[$($value)? $(($pat))?]: $ty| -> $($rest)*);
    };

    (|[$($value:tt)*]: $ty:ty| -> $out:ident $block:block) => {
        impl $crate::input::FromInput for $out {
            #[inline]
            fn try_from_input(
                p: &mut $crate::input::IStr,
            ) -> core::result::Result<Option<Self>, $crate::input::IStrError> {
                let original = *p;

                let Some(value) = $crate::input::FromInput::try_from_input(p)? else {
                    return Ok(None);
                };

                match (|$($value)*: $ty| -> core::result::Result<$out, $crate::macro_support::Error> {
                    $block
                })(value)
                {
                    Ok(value) => Ok(Some(value)),
                    Err(e) => {
                        let span = original.index()..p.index();
                        *p = original;
                        Err($crate::input::IStrError::boxed(span, e))
                    }
                }
            }
        }
    };
}

/// Declare the `main` function of a puzzle binary.
///
/// The solver receives the whole input and returns its answers.
///
/// ```no_run
/// use lib::prelude::*;
///
/// fn solve(mut input: IStr) -> Result<u32> {
///     let mut sum = 0;
///
///     while let Some(n) = input.try_line::<u32>()? {
///         sum += n;
///     }
///
///     Ok(sum)
/// }
///
/// lib::entry!(input = "d00.txt", solve);
/// ```
#[macro_export]
macro_rules! entry {
    (input = $path:literal, $solve:path $(,)?) => {
        fn main() -> $crate::prelude::Result<()> {
            let opts = $crate::cli::Opts::parse()?;
            let path = opts.input_path($crate::input_path!($path));
            let input = $crate::env::input(&path)?;
            $crate::cli::run(&opts, &path, input, $solve)
        }
    };
}
