pub mod compress;
pub mod dataset;
pub mod record;

pub use dataset::{
    DEFAULT_COUNT, GenerateOptions, HEADER, default_filename, generate, generate_with,
};
pub use record::{Record, Records, Source};
