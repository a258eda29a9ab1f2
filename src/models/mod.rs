pub mod column;
pub mod counters;
pub mod settings;

pub use column::*;
pub use counters::*;
pub use settings::*;
