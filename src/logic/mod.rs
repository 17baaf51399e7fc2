pub mod licensing;
pub mod royalties;
pub mod validate;

pub use licensing::*;
pub use royalties::*;
pub use validate::*;
