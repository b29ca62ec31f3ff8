//! Scene graph.
//!
//! Nodes reference renderer resources by handle and carry their own model
//! matrix. Insertion order is draw order.

mod graph;
mod light;
mod node;

pub use graph::{MeshDesc, Scene, FAR, FOV, LIGHTING_PROGRAM, NEAR};
pub use light::{Attenuation, DirectionalLight, Lighting, Material, PointLight, SpotLight};
pub use node::Node;
