// Host-side tests for the scroll-driven mini house widget.

mod common;

use common::*;
use glam::Vec3;
use house_core::{build_house, MiniHouse, MiniHouseConfig, ScrollRotation};

fn make_widget() -> MiniHouse<StubRenderer> {
    let mut w = MiniHouse::new(MiniHouseConfig::default(), (300, 300));
    w.attach_renderer(StubRenderer::default(), (300, 300));
    w
}

#[test]
fn house_is_built_from_eleven_parts() {
    let house = build_house();
    assert_eq!(house.meshes.len(), 11);
    // the three windows share one geometry
    let window_id = house.meshes[4].geometry.id();
    assert_eq!(house.meshes[5].geometry.id(), window_id);
    assert_eq!(house.meshes[6].geometry.id(), window_id);
    assert_ne!(house.meshes[3].geometry.id(), window_id);
}

#[test]
fn widget_setup() {
    let w = make_widget();
    assert_eq!(w.scene().lights.len(), 3);
    assert_eq!(w.camera().eye, Vec3::new(5.0, 5.0, 5.0));
    assert_eq!(w.camera().target, Vec3::ZERO);
    assert!(approx(w.camera().aspect, 1.0, 1e-6));
    assert_eq!(w.renderer().map(|r| r.size), Some((300, 300)));
    assert!(w.scene().background.is_none());
}

#[test]
fn scroll_mapping_is_pure() {
    let mapping = ScrollRotation::default();
    for y in [0.0f32, 1.0, 250.0, 1234.5, 10_000.0] {
        assert_eq!(mapping.target_for(y), mapping.target_for(y));
    }
}

#[test]
fn scroll_mapping_formula() {
    let mapping = ScrollRotation::default();
    assert!(approx_vec(mapping.target_for(0.0), Vec3::new(0.0, 0.0, 0.1), 1e-7));

    let t = mapping.target_for(500.0);
    // progress = 5
    assert!(approx(t.x, (2.5f32).sin() * 0.2, 1e-6));
    assert!(approx(t.y, 1.5, 1e-6));
    assert!(approx(t.z, (1.5f32).cos() * 0.1, 1e-6));
}

#[test]
fn on_scroll_sets_target_only() {
    let mut w = make_widget();
    w.on_scroll(500.0);
    assert_eq!(w.target_rotation(), ScrollRotation::default().target_for(500.0));
    assert_eq!(w.current_rotation(), Vec3::ZERO);
}

#[test]
fn frame_eases_rotation_toward_target() {
    let mut w = make_widget();
    w.on_scroll(500.0);
    let target = w.target_rotation();
    w.frame(0.0).expect("frame");
    assert!(approx_vec(w.current_rotation(), target * 0.05, 1e-7));
    assert_eq!(w.house().expect("house").rotation, w.current_rotation());

    for _ in 0..1000 {
        w.frame(0.0).expect("frame");
    }
    assert!(approx_vec(w.current_rotation(), target, 1e-4));
}

#[test]
fn house_bobs_with_wall_clock() {
    let mut w = make_widget();
    for t in [0.0f64, 1.0, std::f64::consts::PI, 7.25] {
        w.frame(t).expect("frame");
        let y = w.house().expect("house").position.y;
        assert!(approx(y, (t * 0.5).sin() as f32 * 0.1, 1e-6));
    }
}

#[test]
fn resize_tracks_container() {
    let mut w = make_widget();
    w.on_resize(400, 200);
    assert!(approx(w.camera().aspect, 2.0, 1e-6));
    assert_eq!(w.renderer().map(|r| r.size), Some((400, 200)));
}

#[test]
fn zero_sized_resize_is_ignored() {
    let mut w = make_widget();
    w.on_resize(0, 0);
    w.on_resize(300, 0);
    assert!(approx(w.camera().aspect, 1.0, 1e-6));
    assert_eq!(w.renderer().map(|r| r.size), Some((300, 300)));
}

#[test]
fn frames_render_until_destroyed() {
    let mut w = make_widget();
    w.frame(0.1).expect("frame");
    w.frame(0.2).expect("frame");
    assert_eq!(w.renderer().map(|r| r.frames), Some(2));
    w.destroy();
    assert!(w.renderer().is_none());
    assert!(w.house().is_none());
    w.frame(0.3).expect("frame after destroy");
}
