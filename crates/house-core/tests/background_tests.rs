// Host-side tests for the background widget: model spin, camera follow,
// hover, click pulse and resize.

mod common;

use common::*;
use glam::Vec3;
use house_core::{BackgroundConfig, BackgroundScene, NoTweener, ToneMapping};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

const FRAME: Duration = Duration::from_millis(16);

fn make_scene() -> BackgroundScene<StubRenderer> {
    let mut rng = StdRng::seed_from_u64(42);
    let mut bg = BackgroundScene::new(BackgroundConfig::default(), (1280, 720), &mut rng);
    bg.attach_renderer(StubRenderer::default());
    bg
}

fn loaded_scene() -> BackgroundScene<StubRenderer> {
    let mut bg = make_scene();
    bg.begin_model_load(&InstantLoader);
    bg.frame(FRAME).expect("frame");
    bg
}

#[test]
fn scene_setup_matches_defaults() {
    let bg = make_scene();
    let scene = bg.scene();
    // ambient + moon + 5 city lights
    assert_eq!(scene.lights.len(), 7);
    assert_eq!(bg.particles().map(|p| p.len()), Some(50));
    assert!(scene.fog.is_some());
    assert_eq!(scene.tone_mapping, ToneMapping::AcesFilmic { exposure: 0.8 });
    assert_eq!(bg.camera().eye, Vec3::new(30.0, 20.0, 30.0));
    assert_eq!(bg.renderer().map(|r| r.size), Some((1280, 720)));
    assert!(bg.model().is_none());
}

#[test]
fn frames_before_model_arrives_are_fine() {
    let mut bg = make_scene();
    let loader = DeferredLoader::default();
    bg.begin_model_load(&loader);
    for _ in 0..5 {
        bg.frame(FRAME).expect("frame");
    }
    assert!(bg.model().is_none());
    assert_eq!(bg.renderer().map(|r| r.frames), Some(5));

    let requests = loader.requests.borrow();
    let (path, pending) = &requests[0];
    assert_eq!(path, "/static/models/house.glb");
    assert!(pending.deliver(tiny_model()));
    drop(requests);

    bg.frame(FRAME).expect("frame");
    let model = bg.model().expect("model installed");
    assert_eq!(model.scale, Vec3::splat(8.0));
    assert_eq!(model.position, Vec3::new(0.0, -10.0, 0.0));
    for mesh in &model.meshes {
        assert!(mesh.material.transparent);
        assert!(approx(mesh.material.opacity, 0.8, 1e-6));
        assert!(mesh.cast_shadow && mesh.receive_shadow);
    }
}

#[test]
fn model_rotation_after_one_hundred_frames() {
    let mut bg = make_scene();
    bg.begin_model_load(&InstantLoader);
    for _ in 0..100 {
        bg.frame(FRAME).expect("frame");
    }
    let model = bg.model().expect("model");
    assert!(approx(model.rotation.y, 100.0 * 0.0005, 1e-5), "{}", model.rotation.y);
    assert_eq!(model.rotation.x, 0.0);
    assert_eq!(model.rotation.z, 0.0);
}

#[test]
fn delivery_after_destroy_is_dropped() {
    let loader = DeferredLoader::default();
    {
        let mut bg = make_scene();
        bg.begin_model_load(&loader);
        bg.destroy();
    }
    let requests = loader.requests.borrow();
    assert!(!requests[0].1.is_alive());
    assert!(!requests[0].1.deliver(tiny_model()));
}

#[test]
fn camera_rests_at_base_without_pointer_input() {
    let mut bg = make_scene();
    for _ in 0..10 {
        bg.frame(FRAME).expect("frame");
    }
    assert_eq!(bg.camera().eye, Vec3::new(30.0, 20.0, 30.0));
    assert_eq!(bg.camera().target, Vec3::ZERO);
}

#[test]
fn camera_eases_toward_pointer_target() {
    let mut bg = make_scene();
    // top-right corner: normalized (1, 1)
    bg.on_pointer_move(1280.0, 0.0);
    let before = bg.camera().eye;
    bg.frame(FRAME).expect("frame");
    let target = Vec3::new(32.0, 21.0, 30.0);
    let expected = before + (target - before) * 0.01;
    assert!(approx_vec(bg.camera().eye, expected, 1e-5));

    for _ in 0..2000 {
        bg.frame(FRAME).expect("frame");
    }
    assert!(approx_vec(bg.camera().eye, target, 1e-3));
    assert_eq!(bg.camera().target, Vec3::ZERO);
}

#[test]
fn hover_speeds_up_spin_and_brightens_particles() {
    let mut bg = loaded_scene();
    assert!(approx(bg.spin(), 0.0005, 1e-9));

    bg.on_pointer_enter();
    assert!(bg.is_hovering());
    assert!(approx(bg.spin(), 0.00125, 1e-9));
    let mat = bg.scene().points.as_ref().expect("points").material;
    assert_eq!((mat.size, mat.opacity), (3.0, 1.0));

    let before = bg.model().expect("model").rotation.y;
    bg.frame(FRAME).expect("frame");
    let after = bg.model().expect("model").rotation.y;
    assert!(approx(after - before, 0.00125, 1e-6));

    bg.on_pointer_leave();
    assert!(!bg.is_hovering());
    assert!(approx(bg.spin(), 0.0005, 1e-9));
    let mat = bg.scene().points.as_ref().expect("points").material;
    assert_eq!((mat.size, mat.opacity), (2.0, 0.8));
}

#[test]
fn click_damps_particles_after_delay() {
    let mut bg = make_scene();
    assert_eq!(bg.on_click(&NoTweener), 50);
    let post: Vec<Vec3> = bg
        .particles()
        .expect("particles")
        .particles()
        .iter()
        .map(|p| p.velocity)
        .collect();

    bg.frame(Duration::from_millis(100)).expect("frame");
    bg.frame(FRAME).expect("frame");
    for (v, p) in post.iter().zip(bg.particles().expect("particles").particles()) {
        let expected = *v * (0.95 * 0.95);
        assert!((p.velocity - expected).length() <= 1e-6 * v.length().max(1.0));
    }
}

#[test]
fn click_without_model_only_explodes() {
    let mut bg = make_scene();
    bg.on_click(&NoTweener);
    bg.frame(FRAME).expect("frame");
    assert!(bg.model().is_none());
}

#[test]
fn manual_pulse_returns_to_base_scale() {
    let mut bg = loaded_scene();
    bg.on_click(&NoTweener);

    let mut scales = Vec::new();
    for _ in 0..10 {
        bg.frame(FRAME).expect("frame");
        scales.push(bg.model().expect("model").scale.x);
    }
    let peak = scales.iter().cloned().fold(f32::MIN, f32::max);
    assert!(approx(peak, 9.6, 1e-4), "{scales:?}");
    assert!(approx(scales[9], 8.0, 1e-5));

    for _ in 0..5 {
        bg.frame(FRAME).expect("frame");
    }
    assert_eq!(bg.model().expect("model").scale, Vec3::splat(8.0));
}

#[test]
fn repeated_clicks_do_not_compound_the_pulse() {
    let mut bg = loaded_scene();
    bg.on_click(&NoTweener);
    for _ in 0..4 {
        bg.frame(FRAME).expect("frame");
    }
    bg.on_click(&NoTweener);
    let mut peak = 0.0f32;
    for _ in 0..20 {
        bg.frame(FRAME).expect("frame");
        peak = peak.max(bg.model().expect("model").scale.x);
    }
    assert!(peak <= 9.6 + 1e-4);
    assert_eq!(bg.model().expect("model").scale, Vec3::splat(8.0));
}

#[test]
fn tween_pulse_is_preferred_when_available() {
    let mut bg = loaded_scene();
    let tweener = ScriptedTweener {
        calls: Default::default(),
    };
    bg.on_click(&tweener);
    {
        let calls = tweener.calls.borrow();
        assert_eq!(calls.len(), 1);
        let (rest, peak, half) = calls[0];
        assert_eq!(rest, Vec3::splat(8.0));
        assert!(approx_vec(peak, Vec3::splat(9.6), 1e-5));
        assert!(approx(half, 0.3, 1e-6));
    }
    bg.frame(FRAME).expect("frame");
    assert!(approx_vec(bg.model().expect("model").scale, Vec3::splat(9.6), 1e-5));
    bg.frame(FRAME).expect("frame");
    bg.frame(FRAME).expect("frame");
    assert_eq!(bg.model().expect("model").scale, Vec3::splat(8.0));
}

#[test]
fn resize_updates_camera_and_renderer() {
    let mut bg = make_scene();
    for (w, h) in [(800u32, 600u32), (1920, 1080), (375, 812)] {
        bg.on_resize(w, h);
        assert!(approx(bg.camera().aspect, w as f32 / h as f32, 1e-6));
        assert_eq!(bg.renderer().map(|r| r.size), Some((w, h)));
    }
}

#[test]
fn pointer_mapping_follows_the_resized_viewport() {
    let mut bg = make_scene();
    bg.on_resize(400, 200);
    bg.on_pointer_move(400.0, 200.0); // bottom-right: (1, -1)
    for _ in 0..3000 {
        bg.frame(FRAME).expect("frame");
    }
    assert!(approx_vec(bg.camera().eye, Vec3::new(32.0, 19.0, 30.0), 1e-3));
}

#[test]
fn destroy_disposes_renderer_and_stops_drawing() {
    let mut bg = loaded_scene();
    bg.destroy();
    assert!(bg.renderer().is_none());
    bg.frame(FRAME).expect("frame without renderer");
}
