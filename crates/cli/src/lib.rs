mod provider;
mod sink;
mod utils;

pub use provider::*;
pub use sink::*;
pub use utils::*;
