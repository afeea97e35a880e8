pub mod convert;
pub mod entity;
