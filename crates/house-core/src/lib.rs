pub mod asset;
pub mod background;
pub mod backend;
pub mod constants;
pub mod easing;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod mini_house;
pub mod particles;
pub mod scene;

pub static MESH_WGSL: &str = include_str!("../shaders/mesh.wgsl");
pub static POINTS_WGSL: &str = include_str!("../shaders/points.wgsl");

pub use asset::{content_length, parse_glb, ModelSlot, PendingModel};
pub use background::{BackgroundConfig, BackgroundScene};
pub use backend::{ModelLoader, NoTweener, Renderer, ScaleTween, Tweener};
pub use error::{AssetError, RenderError};
pub use geometry::Geometry;
pub use mini_house::{build_house, MiniHouse, MiniHouseConfig, ScrollRotation};
pub use particles::{ExplosionConfig, Particle, ParticleField, SpawnBounds};
pub use scene::*;
