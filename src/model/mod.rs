pub mod artist;
pub mod auth;
pub mod common;
pub mod contract;
pub mod demo;
pub mod ipi;
pub mod license;
pub mod location;
pub mod partner;
pub mod payment;
pub mod product;

pub use artist::*;
pub use auth::*;
pub use common::*;
pub use contract::*;
pub use demo::*;
pub use ipi::*;
pub use license::*;
pub use location::*;
pub use partner::*;
pub use payment::*;
pub use product::*;
