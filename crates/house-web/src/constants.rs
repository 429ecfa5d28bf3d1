// DOM ids, inline styles and timings for the page widgets

pub const BG_CONTAINER_ID: &str = "house-3d-container";

pub const BG_CONTAINER_CSS: &str = "position: fixed; top: 0; left: 0; width: 100vw; height: 100vh; \
     z-index: -1; pointer-events: none; background: transparent;";

pub const MINI_CONTAINER_CSS: &str = "position: fixed; top: 20px; right: 20px; width: 200px; \
     height: 200px; z-index: 1000; border-radius: 15px; overflow: hidden; \
     background: rgba(255, 255, 255, 0.1); backdrop-filter: blur(10px); \
     border: 1px solid rgba(255, 255, 255, 0.2); box-shadow: 0 8px 32px rgba(0, 0, 0, 0.1); \
     pointer-events: none; transition: opacity 0.3s ease;";

pub const CANVAS_CSS: &str = "display: block;";

pub const SHAKE_STYLE_ID: &str = "house-fx-shake";
pub const SHAKE_KEYFRAMES: &str = "@keyframes shake {
  0%, 100% { transform: translateX(0); }
  10% { transform: translateX(-5px); }
  20% { transform: translateX(5px); }
  30% { transform: translateX(-5px); }
  40% { transform: translateX(5px); }
  50% { transform: translateX(-3px); }
  60% { transform: translateX(3px); }
  70% { transform: translateX(-2px); }
  80% { transform: translateX(2px); }
  90% { transform: translateX(-1px); }
}";
pub const SHAKE_ANIMATION: &str = "shake 0.5s ease-in-out";
pub const SHAKE_CLEAR_MS: i32 = 500;

pub const MINI_HOVER_TRANSFORM: &str = "scale(1.05)";
pub const MINI_REST_TRANSFORM: &str = "scale(1)";

// The mini widget renders at CSS resolution
pub const MINI_MAX_PIXEL_RATIO: f64 = 1.0;

// Tweening library bridge
pub const GSAP_GLOBAL: &str = "gsap";
pub const GSAP_EASE: &str = "power2.inOut";

pub const GLOBAL_MINI_HOUSE: &str = "threeDHouse";
