mod bounded;
mod general;

pub use bounded::*;
pub use general::*;
