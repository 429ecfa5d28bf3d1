use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("render surface lost")]
    SurfaceLost,
    #[error("render surface outdated")]
    SurfaceOutdated,
    #[error("timed out acquiring the next frame")]
    Timeout,
    #[error("out of GPU memory")]
    OutOfMemory,
    #[error("renderer failure: {0}")]
    Backend(String),
}

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to parse glb: {0}")]
    Parse(#[from] gltf::Error),
    #[error("asset has no scene")]
    NoScene,
    #[error("primitive in mesh '{0}' has no positions")]
    MissingPositions(String),
    #[error("asset contains no triangle meshes")]
    Empty,
}
