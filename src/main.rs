use std::collections::VecDeque;
use std::time::Instant;
use macroquad::prelude::*;
use ::rand::{rngs::StdRng, SeedableRng};
use tracing::info;

mod boid;
mod config;
mod flock;
mod sim;

use boid::{Boid, Role};
use config::FlockConfig;
use sim::vector::VecExt;
use sim::{BoidSim, Sim};

/// How boids are tinted; `C` cycles through the modes at runtime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum ColorMode {
    #[default]
    Role,
    Heading,
}

impl ColorMode {
    fn next(self) -> Self {
        match self {
            ColorMode::Role => ColorMode::Heading,
            ColorMode::Heading => ColorMode::Role,
        }
    }

    fn color_for(self, boid: &Boid) -> Color {
        match self {
            ColorMode::Role => role_color(boid.role),
            ColorMode::Heading => heading_color(boid.vel.unit()),
        }
    }
}

const MSAA_SAMPLE_COUNT: i32 = 8;
const DEFAULT_SEED: u64 = 1;
const BOID_LENGTH: f32 = 6.0;
const BOID_HALF_WIDTH: f32 = 3.0;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Color {
    let h = h.rem_euclid(1.0) * 6.0;
    let i = h.floor() as i32;
    let f = h - i as f32;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match i % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    Color::new(r, g, b, 0.9)
}

fn heading_color(forward: Vec2) -> Color {
    let angle = forward.y.atan2(forward.x);
    let hue = (angle / std::f32::consts::TAU).rem_euclid(1.0);
    hsv_to_rgb(hue, 1.0, 1.0)
}

fn role_color(role: Role) -> Color {
    match role {
        Role::Normal => Color::new(0.85, 0.85, 0.85, 0.9),
        Role::ScoutA => ORANGE,
        Role::ScoutB => SKYBLUE,
    }
}

fn window_conf() -> Conf {
    let arena = FlockConfig::default();
    Conf {
        window_title: "Boids".to_owned(),
        window_width: arena.width as i32,
        window_height: arena.height as i32,
        sample_count: MSAA_SAMPLE_COUNT,
        high_dpi: true,
        ..Default::default()
    }
}

/// Triangle pointing along the velocity, mapped from arena to screen space.
fn draw_boid(boid: &Boid, scale: Vec2, mode: ColorMode) {
    let forward = boid.vel.unit();
    if forward == Vec2::ZERO {
        return; // no direction → don't draw
    }
    let side = forward.normal();

    let tip = boid.pos + forward * BOID_LENGTH;
    let back = boid.pos - forward * (BOID_LENGTH / 2.0);
    let left = back + side * BOID_HALF_WIDTH;
    let right = back - side * BOID_HALF_WIDTH;

    draw_triangle(tip * scale, left * scale, right * scale, mode.color_for(boid));
}

fn draw_goals(config: &FlockConfig, scale: Vec2) {
    for role in [Role::ScoutA, Role::ScoutB] {
        if let Some(goal) = config.goal_for(role) {
            let at = goal * scale;
            draw_circle_lines(at.x, at.y, 8.0, 2.0, role_color(role));
        }
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    init_tracing();

    let config = FlockConfig::load_from_env_or_default();

    let seed = config.seed.unwrap_or(DEFAULT_SEED);
    info!(seed, "using RNG seed");
    let rng = StdRng::seed_from_u64(seed);

    let mut sim = Sim::from_config(config, rng);

    let mut frame_times_ms: VecDeque<f32> = VecDeque::with_capacity(100);
    let mut color_mode = ColorMode::default();

    loop {
        if is_key_pressed(KeyCode::R) {
            sim.reset_default();
            frame_times_ms.clear();
        }
        if is_key_pressed(KeyCode::C) {
            color_mode = color_mode.next();
            info!(?color_mode, "switched colour mode");
        }

        let start = Instant::now();
        sim.advance(get_frame_time());
        let duration = start.elapsed();

        clear_background(BLACK);

        let config = sim.config();
        let scale = Vec2::new(
            screen_width() / config.width,
            screen_height() / config.height,
        );

        draw_goals(config, scale);
        for b in sim.boids() {
            draw_boid(b, scale, color_mode);
        }

        let engine_ms = (duration.as_micros() as f32) / 1000.0;
        frame_times_ms.push_back(engine_ms);
        if frame_times_ms.len() > 100 {
            frame_times_ms.pop_front();
        }
        let avg_ms: f32 = if frame_times_ms.is_empty() {
            0.0
        } else {
            frame_times_ms.iter().copied().sum::<f32>() / frame_times_ms.len() as f32
        };

        draw_text(
            format!(
                "Sim ({}) boids: {} step: {} avg_engine(100): {:.2}ms fps: {}  [R] reset [C] colours",
                sim.algo_name(),
                sim.boids().len(),
                sim.steps(),
                avg_ms,
                get_fps(),
            )
            .as_str(),
            20.0,
            40.0,
            28.0,
            WHITE,
        );

        next_frame().await;
    }
}
