pub mod postgres;
pub mod traits;

pub use postgres::*;
pub use traits::*;
