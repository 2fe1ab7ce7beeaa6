//! Appender implementations

pub mod stream;

pub use stream::StreamAppender;

pub use crate::core::LogAppender;
