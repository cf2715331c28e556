pub mod aiter;
pub mod error;
pub mod queue;
pub mod tee;

pub mod collections;
pub mod infinite;
pub mod range;
pub mod testing;

pub mod stream_configuration;
pub mod aiter_stream_ext;
pub mod aiter_result_stream_ext;

// Re-export the combinators at the crate root
pub use aiter::*;
pub use collections::*;
pub use infinite::*;
pub use tee::{tee, tee_with_config, try_tee};

pub use aiter_result_stream_ext::AiterResultStreamExt;
pub use aiter_stream_ext::AiterStreamExt;
pub use error::{StreamError, StreamResult};
pub use range::Range;
pub use stream_configuration::TeeConfig;
