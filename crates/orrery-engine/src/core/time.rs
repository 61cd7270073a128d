/// Simulation clock.
///
/// Turns a raw, variable frame delta into the simulated deltas the systems
/// consume. There is no fixed timestep: orbits are exact in accumulated
/// elapsed time, so one large delta and many small ones land in the same
/// place.
#[derive(Debug, Clone)]
pub struct SimClock {
    /// Simulated seconds per real second (0 = paused).
    multiplier: f64,
    /// Multiplier at which comets move at their authored pace.
    reference_multiplier: f64,
    /// Largest raw frame delta accepted in one tick.
    max_frame_dt: f64,
    /// Total simulated seconds.
    sim_elapsed: f64,
    frames: u64,
}

/// Deltas for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameTime {
    /// Raw frame delta after capping (seconds).
    pub raw_dt: f64,
    /// Scaled delta driving orbits and rotation (simulated seconds).
    pub sim_dt: f64,
    /// Delta driving comet flybys and their respawn countdown.
    pub comet_dt: f64,
}

impl SimClock {
    pub fn new(multiplier: f64, reference_multiplier: f64, max_frame_dt: f64) -> Self {
        let mut clock = Self {
            multiplier: 0.0,
            reference_multiplier: if reference_multiplier > 0.0 {
                reference_multiplier
            } else {
                1.0
            },
            max_frame_dt: if max_frame_dt > 0.0 { max_frame_dt } else { f64::INFINITY },
            sim_elapsed: 0.0,
            frames: 0,
        };
        clock.set_multiplier(multiplier);
        clock
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Set the time multiplier. Negative or non-finite values pause.
    pub fn set_multiplier(&mut self, multiplier: f64) {
        if multiplier.is_finite() && multiplier >= 0.0 {
            self.multiplier = multiplier;
        } else {
            log::warn!("rejected time multiplier {multiplier}, pausing instead");
            self.multiplier = 0.0;
        }
    }

    pub fn is_paused(&self) -> bool {
        self.multiplier == 0.0
    }

    /// Consume one raw frame delta and return the deltas for this tick.
    pub fn advance(&mut self, frame_dt: f64) -> FrameTime {
        let raw_dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, self.max_frame_dt)
        } else {
            0.0
        };
        let sim_dt = raw_dt * self.multiplier;
        let comet_dt = raw_dt * self.multiplier / self.reference_multiplier;

        self.sim_elapsed += sim_dt;
        self.frames += 1;

        FrameTime { raw_dt, sim_dt, comet_dt }
    }

    /// Total simulated seconds since creation.
    pub fn sim_elapsed(&self) -> f64 {
        self.sim_elapsed
    }

    /// Number of ticks consumed.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
