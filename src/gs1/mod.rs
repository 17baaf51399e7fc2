pub mod check_digit;

pub use check_digit::*;
