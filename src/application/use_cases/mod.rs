mod extract_code;
mod predict_batch;

pub use extract_code::*;
pub use predict_batch::*;
