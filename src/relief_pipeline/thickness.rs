//! Thickness field module
//!
//! This module maps source luminance to a physical thickness field in
//! millimetres. It knows nothing about mesh geometry.

mod builder;
pub mod luminance;
pub mod params;
pub mod types;


pub use builder::{ThicknessFieldBuilder, build_thickness_field};
pub use params::{ReliefParams, ReliefParamsBuilder};
pub use types::ThicknessField;
