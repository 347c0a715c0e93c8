pub mod sequential;

pub use sequential::{feed_forward, Sequential};
