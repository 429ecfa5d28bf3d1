use glam::Vec3;

// Shared tuning constants for both widgets. Colors are 24-bit sRGB hex values.

// ---------------- Background scene ----------------

// Camera
pub const BG_CAMERA_FOV_DEG: f32 = 75.0;
pub const BG_CAMERA_NEAR: f32 = 0.1;
pub const BG_CAMERA_FAR: f32 = 2000.0;
pub const BG_CAMERA_BASE: Vec3 = Vec3::new(30.0, 20.0, 30.0);
pub const BG_CAMERA_MOUSE_SPAN: Vec3 = Vec3::new(2.0, 1.0, 0.0); // world units per unit of normalized mouse
pub const BG_CAMERA_FOLLOW: f32 = 0.01; // per-frame smoothing factor

// Fog and tone
pub const BG_FOG_COLOR: u32 = 0x000011;
pub const BG_FOG_NEAR: f32 = 100.0;
pub const BG_FOG_FAR: f32 = 800.0;
pub const BG_EXPOSURE: f32 = 0.8;
pub const BG_MAX_PIXEL_RATIO: f64 = 2.0;

// Lights
pub const BG_AMBIENT: (u32, f32) = (0x1a1a2e, 0.4);
pub const BG_MOON: (u32, f32, Vec3) = (0x9cc5ff, 0.4, Vec3::new(50.0, 100.0, 30.0));
pub const BG_CITY_LIGHT_RANGE: f32 = 60.0;
pub const BG_CITY_LIGHTS: [(u32, f32, Vec3); 5] = [
    (0x00ffff, 0.6, Vec3::new(-30.0, 15.0, -20.0)),
    (0xff0080, 0.5, Vec3::new(25.0, 10.0, 30.0)),
    (0x0080ff, 0.4, Vec3::new(-15.0, 20.0, 40.0)),
    (0x80ff00, 0.3, Vec3::new(40.0, 8.0, -10.0)),
    (0xffffff, 0.8, Vec3::new(0.0, 30.0, 0.0)),
];

// Particles
pub const PARTICLE_COUNT: usize = 50;
pub const PARTICLE_SPREAD_XZ: f32 = 120.0; // centred on the origin
pub const PARTICLE_Y_MIN: f32 = 10.0;
pub const PARTICLE_Y_SPAN: f32 = 40.0;
pub const PARTICLE_SPEED_XZ: f32 = 0.002; // full span, centred on zero
pub const PARTICLE_SPEED_Y: f32 = 0.001;
pub const PARTICLE_COLOR: u32 = 0x4a90e2;
pub const PARTICLE_SIZE: f32 = 1.5;
pub const PARTICLE_OPACITY: f32 = 0.5;
pub const PARTICLE_HOVER_SIZE: f32 = 3.0;
pub const PARTICLE_HOVER_OPACITY: f32 = 1.0;
pub const PARTICLE_LEAVE_SIZE: f32 = 2.0;
pub const PARTICLE_LEAVE_OPACITY: f32 = 0.8;

// Model
pub const MODEL_PATH: &str = "/static/models/house.glb";
pub const MODEL_SCALE: f32 = 8.0;
pub const MODEL_POSITION: Vec3 = Vec3::new(0.0, -10.0, 0.0);
pub const MODEL_OPACITY: f32 = 0.8;
pub const MODEL_SPIN_IDLE: f32 = 0.0005; // radians per frame
pub const MODEL_SPIN_HOVER: f32 = 0.00125;

// Click
pub const PULSE_SCALE: f32 = 1.2;
pub const PULSE_STEPS: u32 = 10;
pub const PULSE_TWEEN_HALF_SEC: f32 = 0.3;
pub const EXPLOSION_STRENGTH: f32 = 2.0;
pub const EXPLOSION_DAMPING_DELAY_MS: u64 = 100;
pub const EXPLOSION_DAMPING: f32 = 0.95;

// Visibility
pub const VISIBILITY_SECTION_ID: &str = "precificador";

// ---------------- Mini house widget ----------------

pub const MINI_CONTAINER_ID: &str = "threejs-container";
pub const MINI_CAMERA_FOV_DEG: f32 = 75.0;
pub const MINI_CAMERA_NEAR: f32 = 0.1;
pub const MINI_CAMERA_FAR: f32 = 1000.0;
pub const MINI_CAMERA_POSITION: Vec3 = Vec3::new(5.0, 5.0, 5.0);
pub const MINI_ROTATION_EASE: f32 = 0.05;
pub const MINI_FLOAT_SPEED: f64 = 0.5;
pub const MINI_FLOAT_AMPLITUDE: f32 = 0.1;
pub const MINI_MIN_VIEWPORT_WIDTH: f64 = 768.0;

pub const MINI_AMBIENT: (u32, f32) = (0x404040, 0.6);
pub const MINI_SUN: (u32, f32, Vec3) = (0xffffff, 0.8, Vec3::new(10.0, 10.0, 5.0));
pub const MINI_ACCENT: (u32, f32, f32, Vec3) = (0x4a90e2, 0.3, 20.0, Vec3::new(-5.0, 5.0, 5.0));

// House palette
pub const HOUSE_WALL: u32 = 0xf5f5f5;
pub const HOUSE_ROOF: u32 = 0x8b4513;
pub const HOUSE_DOOR: u32 = 0x654321;
pub const HOUSE_WINDOW: u32 = 0x87ceeb;
pub const HOUSE_FOUNDATION: u32 = 0x708090;
pub const HOUSE_CHIMNEY: u32 = 0x8b0000;
pub const HOUSE_GRASS: u32 = 0x90ee90;
pub const HOUSE_TRUNK: u32 = 0x8b4513;
pub const HOUSE_LEAVES: u32 = 0x228b22;
