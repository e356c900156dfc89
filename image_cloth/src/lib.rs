//! # image_cloth
//!
//! A square grid of point masses joined by springs, with an image mapped
//! onto it and its four corners exposed as draggable **handles**.
//!
//! ```rust
//! use image_cloth::{ImageCloth, ClothConfig, Handle};
//!
//! let mut cloth = ImageCloth::new(ClothConfig::default()).unwrap();
//!
//! // Corners start fixed at a 20px margin from the canvas edges.
//! assert!(cloth.handle_is_fixed(Handle::TopLeft));
//!
//! cloth.set_gravity(0.4);
//! cloth.free_handle(Handle::BottomRight);
//! for _ in 0..10 { cloth.step(); }
//! ```
//!
//! ## Handles
//!
//! | Handle | Mesh index |
//! |---|---|
//! | `TopLeft` | `(0, 0)` |
//! | `TopRight` | `(N-1, 0)` |
//! | `BottomLeft` | `(0, N-1)` |
//! | `BottomRight` | `(N-1, N-1)` |
//!
//! All input (mouse, sensors, tracked hands) goes through the handle API;
//! individual mesh points are reachable through the `*_mesh_point_*`
//! methods for effects that need them.
//!
//! ## Drawing
//!
//! [`ImageCloth::draw`] walks the mesh and issues textured quads, outline
//! segments and handle markers to any [`ClothCanvas`].  Drawing never
//! touches the physics state.

pub mod error;
pub mod config;
pub mod handle;
pub mod mesh;
pub mod render;
pub mod cloth;

pub use error::ClothError;
pub use config::ClothConfig;
pub use handle::Handle;
pub use mesh::{Mesh, SpringParams};
pub use render::{ClothCanvas, Colour, DisplayOptions, DrawCommand, DrawList, TexVertex, TexturedQuad};
pub use cloth::ImageCloth;

pub use cloth_physics::{Integrator, Vec3};
