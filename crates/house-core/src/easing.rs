use glam::{Vec2, Vec3};

/// Move `current` a fixed fraction of the way toward `target`.
///
/// A target equal to `current` is a fixed point: the result is `current` bit for bit.
#[inline]
pub fn ease_toward(current: Vec3, target: Vec3, factor: f32) -> Vec3 {
    current + (target - current) * factor
}

/// Map a client-space pointer position to [-1, 1] on both axes, +Y up.
#[inline]
pub fn normalized_pointer(client_x: f32, client_y: f32, width: f32, height: f32) -> Vec2 {
    if width <= 0.0 || height <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(client_x / width * 2.0 - 1.0, -(client_y / height) * 2.0 + 1.0)
}

/// Exponentially smoothed camera follow driven by the pointer.
#[derive(Clone, Copy, Debug)]
pub struct CameraFollow {
    pub base: Vec3,
    /// World-space offset for a pointer at the +1 edge of each axis.
    pub span: Vec3,
    pub factor: f32,
    target: Vec3,
}

impl CameraFollow {
    pub fn new(base: Vec3, span: Vec3, factor: f32) -> Self {
        Self {
            base,
            span,
            factor,
            target: base,
        }
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn aim(&mut self, pointer: Vec2) {
        self.target = self.base + Vec3::new(pointer.x * self.span.x, pointer.y * self.span.y, 0.0);
    }

    pub fn step(&self, eye: Vec3) -> Vec3 {
        ease_toward(eye, self.target, self.factor)
    }
}

/// Fallback scale pulse used when no tweening library is around: a fixed number
/// of linear steps out to `peak` and back to `rest`, one step per frame.
#[derive(Clone, Copy, Debug)]
pub struct ManualPulse {
    rest: Vec3,
    peak: Vec3,
    step: u32,
    steps: u32,
}

impl ManualPulse {
    pub fn new(rest: Vec3, peak: Vec3, steps: u32) -> Self {
        Self {
            rest,
            peak,
            step: 0,
            steps: steps.max(1),
        }
    }
}

impl Iterator for ManualPulse {
    type Item = Vec3;

    fn next(&mut self) -> Option<Vec3> {
        if self.step >= self.steps {
            return None;
        }
        self.step += 1;
        let progress = self.step as f32 / self.steps as f32;
        Some(if progress < 0.5 {
            self.rest.lerp(self.peak, progress * 2.0)
        } else {
            self.peak.lerp(self.rest, (progress - 0.5) * 2.0)
        })
    }
}
