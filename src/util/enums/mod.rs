pub mod axis;
pub mod longitude_convention;
pub mod session_state;

pub use axis::*;
pub use longitude_convention::*;
pub use session_state::*;
