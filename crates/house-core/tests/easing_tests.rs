// Host-side tests for easing, pointer mapping and the fallback pulse.

use glam::{Vec2, Vec3};
use house_core::easing::{ease_toward, normalized_pointer, CameraFollow, ManualPulse};

#[test]
fn ease_fixed_point_is_exact() {
    let p = Vec3::new(30.0, 20.0, 30.0);
    assert_eq!(ease_toward(p, p, 0.01), p);
}

#[test]
fn ease_moves_by_factor() {
    let out = ease_toward(Vec3::ZERO, Vec3::new(10.0, -10.0, 0.0), 0.05);
    assert_eq!(out, Vec3::new(0.5, -0.5, 0.0));
}

#[test]
fn pointer_corners() {
    assert_eq!(normalized_pointer(0.0, 0.0, 200.0, 100.0), Vec2::new(-1.0, 1.0));
    assert_eq!(normalized_pointer(200.0, 100.0, 200.0, 100.0), Vec2::new(1.0, -1.0));
    assert_eq!(normalized_pointer(100.0, 50.0, 200.0, 100.0), Vec2::ZERO);
    assert_eq!(normalized_pointer(10.0, 10.0, 0.0, 0.0), Vec2::ZERO);
}

#[test]
fn camera_follow_aims_in_the_view_plane() {
    let mut follow = CameraFollow::new(Vec3::new(30.0, 20.0, 30.0), Vec3::new(2.0, 1.0, 0.0), 0.01);
    assert_eq!(follow.target(), follow.base);
    follow.aim(Vec2::new(-1.0, 0.5));
    assert_eq!(follow.target(), Vec3::new(28.0, 20.5, 30.0));
}

#[test]
fn manual_pulse_goes_out_and_back() {
    let rest = Vec3::splat(8.0);
    let peak = Vec3::splat(9.6);
    let steps: Vec<f32> = ManualPulse::new(rest, peak, 10).map(|s| s.x).collect();
    assert_eq!(steps.len(), 10);
    for w in steps[..5].windows(2) {
        assert!(w[1] > w[0]);
    }
    for w in steps[4..].windows(2) {
        assert!(w[1] < w[0]);
    }
    assert!((steps[4] - 9.6).abs() < 1e-5);
    assert!((steps[9] - 8.0).abs() < 1e-5);
}

#[test]
fn manual_pulse_with_zero_steps_still_terminates() {
    let mut pulse = ManualPulse::new(Vec3::ONE, Vec3::splat(2.0), 0);
    assert!(pulse.next().is_some());
    assert!(pulse.next().is_none());
}
