pub use enums::*;
pub use result::*;

pub use crate::astro_math::{Degrees, Minutes};

mod enums;
mod result;
