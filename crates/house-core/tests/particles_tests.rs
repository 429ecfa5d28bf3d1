// Host-side tests for particle drift and the click explosion.

mod common;

use common::approx;
use glam::Vec3;
use house_core::{BackgroundConfig, ExplosionConfig, Particle, ParticleField};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

fn explosion() -> ExplosionConfig {
    BackgroundConfig::default().explosion
}

fn make_field(seed: u64) -> ParticleField {
    let config = BackgroundConfig::default();
    let mut rng = StdRng::seed_from_u64(seed);
    ParticleField::spawn(config.particle_count, &config.spawn, config.explosion, &mut rng)
}

fn speeds(field: &ParticleField) -> Vec<f32> {
    field.particles().iter().map(|p| p.velocity.length()).collect()
}

#[test]
fn spawn_respects_count_and_bounds() {
    let config = BackgroundConfig::default();
    let field = make_field(7);
    assert_eq!(field.len(), 50);
    for p in field.particles() {
        assert!(p.position.cmpge(config.spawn.min).all(), "{:?}", p.position);
        assert!(p.position.cmple(config.spawn.max).all(), "{:?}", p.position);
        assert!(p.velocity.x.abs() <= 0.001);
        assert!(p.velocity.y.abs() <= 0.0005);
        assert!(p.velocity.z.abs() <= 0.001);
    }
}

#[test]
fn spawn_is_deterministic_for_a_seed() {
    let a = make_field(3);
    let b = make_field(3);
    assert_eq!(a.particles(), b.particles());
}

#[test]
fn each_tick_adds_velocity_to_position() {
    let mut field = make_field(11);
    for _ in 0..20 {
        let before: Vec<Particle> = field.particles().to_vec();
        field.tick(Duration::from_millis(16));
        for (prev, now) in before.iter().zip(field.particles()) {
            assert_eq!(now.position, prev.position + prev.velocity);
            assert_eq!(now.velocity, prev.velocity);
        }
    }
}

#[test]
fn length_is_fixed_across_ticks_and_clicks() {
    let mut field = make_field(5);
    field.explode();
    for _ in 0..200 {
        field.tick(Duration::from_millis(16));
    }
    assert_eq!(field.len(), 50);
}

#[test]
fn explosion_strictly_increases_every_speed() {
    let mut field = make_field(19);
    let before = speeds(&field);
    let pushed = field.explode();
    assert_eq!(pushed, 50);
    for (i, (b, a)) in before.iter().zip(speeds(&field)).enumerate() {
        assert!(a > *b, "particle {i}: {a} <= {b}");
    }
}

#[test]
fn explosion_pushes_radially_with_falloff() {
    let mut field = ParticleField::from_particles(
        vec![
            Particle {
                position: Vec3::new(3.0, 0.0, 0.0),
                velocity: Vec3::ZERO,
            },
            Particle {
                position: Vec3::new(0.0, 0.0, -9.0),
                velocity: Vec3::ZERO,
            },
        ],
        explosion(),
    );
    field.explode();
    let p = field.particles();
    // 2.0 / (3 + 1) along +X, 2.0 / (9 + 1) along -Z
    assert!(approx(p[0].velocity.x, 0.5, 1e-6));
    assert!(approx(p[0].velocity.length(), 0.5, 1e-6));
    assert!(approx(p[1].velocity.z, -0.2, 1e-6));
    assert!(approx(p[1].velocity.length(), 0.2, 1e-6));
}

#[test]
fn particle_at_origin_has_no_direction_and_is_skipped() {
    let mut field = ParticleField::from_particles(
        vec![Particle {
            position: Vec3::ZERO,
            velocity: Vec3::new(0.001, 0.0, 0.0),
        }],
        explosion(),
    );
    assert_eq!(field.explode(), 0);
    assert_eq!(field.particles()[0].velocity, Vec3::new(0.001, 0.0, 0.0));
    assert!(field.particles()[0].velocity.is_finite());
}

#[test]
fn no_damping_before_the_delay() {
    let mut field = make_field(23);
    field.explode();
    let post: Vec<Vec3> = field.particles().iter().map(|p| p.velocity).collect();
    field.tick(Duration::from_millis(40));
    field.tick(Duration::from_millis(40));
    for (v, p) in post.iter().zip(field.particles()) {
        assert_eq!(*v, p.velocity);
    }
    assert!(field.is_damping());
}

#[test]
fn one_damping_tick_after_delay_never_speeds_up() {
    let mut field = make_field(29);
    field.explode();
    let post = speeds(&field);
    field.tick(Duration::from_millis(100));
    for (p, now) in post.iter().zip(speeds(&field)) {
        assert!(now <= *p);
    }
}

#[test]
fn damping_scales_by_factor_per_tick() {
    let mut field = make_field(31);
    field.explode();
    let post: Vec<Vec3> = field.particles().iter().map(|p| p.velocity).collect();
    field.tick(Duration::from_millis(60));
    field.tick(Duration::from_millis(60)); // crosses 100 ms: first damping tick
    field.tick(Duration::from_millis(16));
    for (v, p) in post.iter().zip(field.particles()) {
        let expected = *v * 0.95 * 0.95;
        assert!((p.velocity - expected).length() <= 1e-6 * v.length().max(1.0));
    }
}

#[test]
fn damping_settles_back_to_resting_speed() {
    let mut field = make_field(37);
    let rest = speeds(&field);
    field.explode();
    let mut ticks = 0;
    while field.is_damping() {
        field.tick(Duration::from_millis(16));
        ticks += 1;
        assert!(ticks < 10_000, "damping never settled");
    }
    for (r, now) in rest.iter().zip(speeds(&field)) {
        assert!(now <= *r + 1e-7);
    }
}

#[test]
fn second_click_keeps_first_resting_speeds() {
    let mut field = make_field(41);
    let rest = speeds(&field);
    field.explode();
    field.tick(Duration::from_millis(150));
    field.explode();
    while field.is_damping() {
        field.tick(Duration::from_millis(16));
    }
    for (r, now) in rest.iter().zip(speeds(&field)) {
        assert!(now <= *r + 1e-7);
    }
}

#[test]
fn drift_is_never_clamped() {
    let mut field = ParticleField::from_particles(
        vec![Particle {
            position: Vec3::new(59.0, 49.0, 59.0),
            velocity: Vec3::new(1.0, 1.0, 1.0),
        }],
        explosion(),
    );
    for _ in 0..1000 {
        field.advance();
    }
    assert_eq!(field.particles()[0].position, Vec3::new(1059.0, 1049.0, 1059.0));
}
