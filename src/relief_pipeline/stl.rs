//! Binary STL module
//!
//! Closes a thickness field into a watertight solid and serializes it as a
//! binary STL byte stream.
//!
//! # Binary Format
//!
//! ```text
//! UINT8[80]    – Header (zero filled)
//! UINT32       – Number of triangles
//! foreach triangle
//!     REAL32[3] – Normal vector
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     UINT16    – Attribute byte count (0)
//! end
//! ```

mod geometry;
mod mesh_builder;
mod serializer;


pub use geometry::{Vertex, face_normal, stl_byte_len, triangle_count};
pub use mesh_builder::StlMeshBuilder;
pub use serializer::SolidMeshSerializer;

/// STL binary header size in bytes.
pub const HEADER_SIZE: usize = 80;

/// Header plus the triangle count field.
pub const PREAMBLE_SIZE: usize = HEADER_SIZE + 4;

/// Size of one triangle in binary STL (normal + 3 vertices + attribute).
pub const TRIANGLE_SIZE: usize = 50;
