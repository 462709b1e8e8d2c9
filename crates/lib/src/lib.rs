pub mod cli;
pub mod env;
pub mod grid;
pub mod input;
#[macro_use]
mod macros;

#[doc(hidden)]
pub mod macro_support {
    pub use anyhow::Error;
}

pub mod prelude {
    //! Helper prelude with useful imports.
    pub use crate::env::Size;
    pub use crate::grid::{Grid, GridExt};
    pub use crate::input::{FromInput, IStr, Split, W};
    pub use anyhow::Result;
    pub type ArrayVec<T, const N: usize = 16> = arrayvec::ArrayVec<T, N>;
    pub use log::debug;
}
