pub mod gs1_registry;
pub mod partner_feed;
pub mod payments;

pub use gs1_registry::*;
pub use partner_feed::*;
pub use payments::*;
