/// Turns measured frame times into the `dt` handed to `step`.
///
/// The first step after construction or a reset runs at the assumed initial
/// frame rate. After that the measured elapsed time is used as is, except when
/// it is zero (or garbage), in which case the default frame rate stands in.
#[derive(Clone, Copy, Debug)]
pub struct FrameClock {
    default_fps: f32,
    initial_fps: f32,
    fresh: bool,
}

impl FrameClock {
    pub fn new(default_fps: f32, initial_fps: f32) -> Self {
        Self {
            default_fps,
            initial_fps,
            fresh: true,
        }
    }

    pub fn tick(&mut self, elapsed: f32) -> f32 {
        if self.fresh {
            self.fresh = false;
            1.0 / self.initial_fps
        } else if elapsed > 0.0 && elapsed.is_finite() {
            elapsed
        } else {
            1.0 / self.default_fps
        }
    }

    pub fn reset(&mut self) {
        self.fresh = true;
    }
}
