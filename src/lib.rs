pub mod relief_pipeline;
pub mod logger;
