pub mod catalog;
pub mod data;
pub mod error;
pub mod favorites;
pub mod policy;
pub mod prelude;
pub mod sequence;
pub mod validate;
