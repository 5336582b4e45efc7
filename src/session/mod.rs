pub mod cookie;
pub mod extractors;
