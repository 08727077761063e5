mod cpv_code;
mod prediction;

pub use cpv_code::*;
pub use prediction::*;
