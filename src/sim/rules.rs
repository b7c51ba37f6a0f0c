//! Per-boid steering: separation, alignment, cohesion, jitter and scout bias.
//!
//! Everything here is a pure function of the boid, its candidate neighbors and
//! the config. Randomness enters only through the jitter vector the caller
//! draws, which keeps the parallel force pass independent of processing order.

use macroquad::prelude::Vec2;
use rand::Rng;
use rand_distr::{Distribution, UnitCircle};

use super::vector::VecExt;
use crate::boid::Boid;
use crate::config::FlockConfig;

/// What a boid gathers from its neighborhood before steering.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NeighborSummary {
    /// Sum of `self.pos - other.pos` over neighbors inside the protected radius.
    pub avoid: Vec2,
    /// Mean velocity of neighbors in vision range but outside the protected radius.
    pub avg_vel: Vec2,
    /// Mean position of the same neighbors.
    pub avg_pos: Vec2,
    pub count: usize,
}

pub fn summarize<'a>(
    me: &Boid,
    neighbors: impl IntoIterator<Item = &'a Boid>,
    config: &FlockConfig,
) -> NeighborSummary {
    let mut summary = NeighborSummary::default();

    for other in neighbors {
        let dist = me.pos.distance(other.pos);
        if dist < config.protected_radius {
            // Raw offset, not distance-weighted.
            summary.avoid += me.pos - other.pos;
        } else if dist < config.vision_radius {
            summary.avg_vel += other.vel;
            summary.avg_pos += other.pos;
            summary.count += 1;
        }
    }

    if summary.count > 0 {
        let inv = 1.0 / summary.count as f32;
        summary.avg_vel *= inv;
        summary.avg_pos *= inv;
    }

    summary
}

/// New velocity for `me`. Each term builds on the velocity left by the one
/// before it; a scout's goal blend then replaces the result rather than adding
/// to it, and the speed limits are applied last.
pub fn steer(me: &Boid, summary: &NeighborSummary, config: &FlockConfig, jitter: Vec2) -> Vec2 {
    let mut vel = me.vel + jitter;
    vel += (summary.avg_vel - vel) * config.match_gain;
    vel += (summary.avg_pos - me.pos) * config.center_gain;
    vel += summary.avoid * config.avoid_gain;

    if let Some(goal) = config.goal_for(me.role) {
        let bias = (goal - me.pos).unit();
        vel = vel * (1.0 - me.bias_weight) + bias * me.bias_weight;
    }

    limit_speed(vel, config.min_speed, config.max_speed)
}

pub fn next_velocity<'a>(
    me: &Boid,
    neighbors: impl IntoIterator<Item = &'a Boid>,
    config: &FlockConfig,
    jitter: Vec2,
) -> Vec2 {
    let summary = summarize(me, neighbors, config);
    steer(me, &summary, config, jitter)
}

/// Rescales `vel` onto the nearest speed bound when outside `[min, max]`.
/// A zero velocity has no direction and stays zero.
pub fn limit_speed(vel: Vec2, min_speed: f32, max_speed: f32) -> Vec2 {
    let mut vel = vel;
    if vel.length() < min_speed {
        vel = vel.unit() * min_speed;
    }
    if vel.length() > max_speed {
        vel = vel.unit() * max_speed;
    }
    vel
}

/// Random direction scaled by a magnitude drawn from `[0, randomness)`.
pub fn random_jitter(rng: &mut impl Rng, randomness: f32) -> Vec2 {
    if randomness <= 0.0 {
        return Vec2::ZERO;
    }
    let [x, y]: [f32; 2] = UnitCircle.sample(rng);
    Vec2::new(x, y) * rng.random_range(0.0..randomness)
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::boid::Role;

    fn quiet_config() -> FlockConfig {
        FlockConfig {
            randomness: 0.0,
            ..FlockConfig::default()
        }
    }

    fn boid(x: f32, y: f32, vx: f32, vy: f32) -> Boid {
        Boid::new(Vec2::new(x, y), Vec2::new(vx, vy), 0.4)
    }

    #[test]
    fn coincident_neighbor_contributes_no_avoidance() {
        let config = quiet_config();
        let me = boid(100.0, 100.0, 150.0, 0.0);
        let twin = boid(100.0, 100.0, 0.0, 150.0);

        let summary = summarize(&me, [&twin], &config);
        assert_eq!(summary.avoid, Vec2::ZERO);
        assert_eq!(summary.count, 0);

        let vel = steer(&me, &summary, &config, Vec2::ZERO);
        assert!(vel.is_finite());
    }

    #[test]
    fn splits_neighbors_by_radius() {
        let config = quiet_config();
        let me = boid(100.0, 100.0, 150.0, 0.0);
        let close = boid(104.0, 100.0, 0.0, 0.0);
        let seen_a = boid(120.0, 100.0, 10.0, 0.0);
        let seen_b = boid(100.0, 80.0, 0.0, 30.0);
        let far = boid(200.0, 100.0, 99.0, 99.0);

        let summary = summarize(&me, [&close, &seen_a, &seen_b, &far], &config);
        assert_eq!(summary.avoid, Vec2::new(-4.0, 0.0));
        assert_eq!(summary.count, 2);
        assert_eq!(summary.avg_vel, Vec2::new(5.0, 15.0));
        assert_eq!(summary.avg_pos, Vec2::new(110.0, 90.0));
    }

    #[test]
    fn avoidance_accumulates_over_intruders() {
        let config = quiet_config();
        let me = boid(100.0, 100.0, 0.0, 0.0);
        let left = boid(98.0, 100.0, 0.0, 0.0);
        let below = boid(100.0, 95.0, 0.0, 0.0);
        let above = boid(100.0, 103.0, 0.0, 0.0);

        let summary = summarize(&me, [&left, &below, &above], &config);
        assert_eq!(summary.avoid, Vec2::new(2.0, 2.0));
        assert_eq!(summary.count, 0);
    }

    #[test]
    fn terms_compose_cumulatively() {
        let config = FlockConfig {
            randomness: 0.0,
            min_speed: 0.0,
            max_speed: 1e6,
            ..FlockConfig::default()
        };
        let me = boid(0.0, 0.0, 100.0, 0.0);
        let summary = NeighborSummary {
            avoid: Vec2::new(0.0, 4.0),
            avg_vel: Vec2::new(0.0, 100.0),
            avg_pos: Vec2::new(1000.0, 0.0),
            count: 1,
        };
        let jitter = Vec2::new(0.0, 2.0);

        let mut expected = Vec2::new(100.0, 2.0);
        expected += (Vec2::new(0.0, 100.0) - expected) * 0.05;
        expected += Vec2::new(1000.0, 0.0) * 0.0005;
        expected += Vec2::new(0.0, 4.0) * 0.25;

        let vel = steer(&me, &summary, &config, jitter);
        assert!((vel - expected).length() < 1e-4, "{vel} vs {expected}");
    }

    #[test]
    fn scout_blend_replaces_composition() {
        let config = FlockConfig {
            randomness: 0.0,
            min_speed: 0.0,
            max_speed: 1e6,
            scout_a_goal: Some([0.0, 500.0]),
            ..FlockConfig::default()
        };
        let normal = boid(0.0, 0.0, 200.0, 0.0);
        let scout = normal.with_role(Role::ScoutA);
        let summary = NeighborSummary::default();

        let composed = steer(&normal, &summary, &config, Vec2::ZERO);
        let blended = steer(&scout, &summary, &config, Vec2::ZERO);

        let expected = composed * 0.6 + Vec2::Y * 0.4;
        assert!((blended - expected).length() < 1e-4);
    }

    #[test]
    fn full_bias_points_scout_at_goal() {
        let config = FlockConfig {
            randomness: 0.0,
            scout_b_goal: Some([100.0, 0.0]),
            ..FlockConfig::default()
        };
        let mut scout = boid(0.0, 0.0, 0.0, 200.0).with_role(Role::ScoutB);
        scout.bias_weight = 1.0;

        let vel = steer(&scout, &NeighborSummary::default(), &config, Vec2::ZERO);
        assert!((vel - Vec2::new(config.min_speed, 0.0)).length() < 1e-3);
    }

    #[test]
    fn speed_is_clamped_to_bounds() {
        let slow = limit_speed(Vec2::new(3.0, 4.0), 125.0, 250.0);
        assert!((slow.length() - 125.0).abs() < 1e-3);
        assert!((slow.unit() - Vec2::new(0.6, 0.8)).length() < 1e-6);

        let fast = limit_speed(Vec2::new(0.0, -1000.0), 125.0, 250.0);
        assert_eq!(fast, Vec2::new(0.0, -250.0));

        let fine = Vec2::new(150.0, 0.0);
        assert_eq!(limit_speed(fine, 125.0, 250.0), fine);

        assert_eq!(limit_speed(Vec2::ZERO, 125.0, 250.0), Vec2::ZERO);
    }

    #[test]
    fn identical_inputs_give_identical_velocities_without_jitter() {
        let config = quiet_config();
        let a = boid(300.0, 300.0, 140.0, 20.0);
        let b = a;
        let neighbors = [
            boid(310.0, 305.0, 100.0, 100.0),
            boid(295.0, 290.0, -50.0, 130.0),
            boid(303.0, 302.0, 0.0, 0.0),
        ];

        let va = next_velocity(&a, &neighbors, &config, random_jitter(&mut rand::rng(), 0.0));
        let vb = next_velocity(&b, &neighbors, &config, Vec2::ZERO);
        assert_eq!(va, vb);
    }

    #[test]
    fn jitter_stays_below_randomness() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..1000 {
            let j = random_jitter(&mut rng, 5.0);
            assert!(j.length() < 5.0 + 1e-4);
        }
        assert_eq!(random_jitter(&mut rng, 0.0), Vec2::ZERO);
    }
}
