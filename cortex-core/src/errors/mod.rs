mod cortex_error;
mod kind;

pub use cortex_error::{CortexError, CortexResult};
pub use kind::ErrorKind;
