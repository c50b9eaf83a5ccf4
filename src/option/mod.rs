//! Typed options
//!
//! An option owns a tagged value slot and converts the raw tokens of each
//! occurrence into that slot.

pub mod opt;
pub mod set;
pub mod value;

pub use opt::Opt;
pub use set::OptionSet;
pub use value::{Kind, Value, MAX_RANGE_LEN};
