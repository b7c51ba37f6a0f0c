use macroquad::prelude::*;

/// Which steering regime a boid follows.
///
/// Scouts still flock, but their composed velocity is blended toward a fixed
/// goal point every step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Role {
    #[default]
    Normal,
    ScoutA,
    ScoutB,
}

#[derive(Clone, Copy, Debug)]
pub struct Boid {
    pub pos: Vec2,
    pub vel: Vec2,
    pub role: Role,
    /// Share of the goal direction mixed into a scout's velocity, in `[0, 1]`.
    pub bias_weight: f32,
}

impl Boid {
    pub fn new(pos: Vec2, vel: Vec2, bias_weight: f32) -> Self {
        Self {
            pos,
            vel,
            role: Role::Normal,
            bias_weight,
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }
}
