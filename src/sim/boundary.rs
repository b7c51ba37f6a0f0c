use crate::boid::Boid;
use crate::config::FlockConfig;
use crate::flock::WorldBounds;

/// Soft steering inside the margin band, then a hard clamp-and-bounce for
/// anything that crossed an edge. All four edges are checked independently
/// and the bounce may fire in the same step as the nudge.
pub fn keep_within_bounds(boid: &mut Boid, bounds: &WorldBounds, config: &FlockConfig) {
    let margin = config.margin;
    let turn = config.turn_force;

    if boid.pos.x < margin {
        boid.vel.x += turn;
    }
    if boid.pos.x < 0.0 {
        boid.pos.x = 0.0;
        boid.vel.x = -boid.vel.x;
    }

    if boid.pos.x > bounds.w - margin {
        boid.vel.x -= turn;
    }
    if boid.pos.x > bounds.w {
        boid.pos.x = bounds.w;
        boid.vel.x = -boid.vel.x;
    }

    if boid.pos.y > bounds.h - margin {
        boid.vel.y -= turn;
    }
    if boid.pos.y > bounds.h {
        boid.pos.y = bounds.h;
        boid.vel.y = -boid.vel.y;
    }

    if boid.pos.y < margin {
        boid.vel.y += turn;
    }
    if boid.pos.y < 0.0 {
        boid.pos.y = 0.0;
        boid.vel.y = -boid.vel.y;
    }
}
