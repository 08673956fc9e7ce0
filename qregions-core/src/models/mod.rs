pub mod interval;
pub mod region;

// re-export for cleaner imports
pub use self::interval::{LabelId, LabeledInterval, Position};
pub use self::region::Region;
