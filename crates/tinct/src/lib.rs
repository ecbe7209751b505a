#![doc = include_str!("../../../README.md")]

#[doc(inline)]
pub use tinct_pixel as pixel;

#[doc(inline)]
pub use tinct_image as image;

#[doc(inline)]
pub use tinct_io as io;
