#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use rigidprobe_linalg as linalg;

#[doc(inline)]
pub use rigidprobe_3d as geometry;
