use glam::Vec3;

/// A particle looping along one grid edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridParticle {
    /// Index of the edge whose points form the path.
    pub edge: usize,
    /// Fraction of the path travelled, always in `[0, 1)`.
    pub progress: f32,
    /// Path fractions per second.
    pub speed: f32,
}

impl GridParticle {
    pub fn new(edge: usize, progress: f32, speed: f32) -> Self {
        Self {
            edge,
            progress: wrap_progress(progress),
            speed,
        }
    }

    /// Moves forward by `speed * dt`, wrapping past the end back to the start.
    pub fn advance(&mut self, dt: f32) {
        self.progress = wrap_progress(self.progress + self.speed * dt);
    }

    /// Position on a pre-sampled path, interpolating linearly between the
    /// two points around the current progress.
    ///
    /// Motion is not arc-length uniform: segments of different length take
    /// the same time.
    pub fn position_on(&self, path: &[Vec3]) -> Vec3 {
        sample_path(path, self.progress)
    }
}

/// Reduces `progress` into `[0, 1)`.
pub fn wrap_progress(progress: f32) -> f32 {
    if !progress.is_finite() {
        return 0.0;
    }
    let wrapped = progress.rem_euclid(1.0);
    // rem_euclid can round up to exactly 1.0 for tiny negative inputs
    if wrapped >= 1.0 { 0.0 } else { wrapped }
}

/// Piecewise-linear lookup along `path` at fraction `t`.
pub fn sample_path(path: &[Vec3], t: f32) -> Vec3 {
    match path {
        [] => Vec3::ZERO,
        [only] => *only,
        _ => {
            let last_segment = path.len() - 1;
            let exact = t.clamp(0.0, 1.0) * last_segment as f32;
            let idx = (exact.floor() as usize).min(last_segment - 1);
            let local = exact - idx as f32;
            path[idx].lerp(path[idx + 1], local)
        }
    }
}

/// Scale multiplier for the glow pulse of particle `index` at `elapsed` seconds.
///
/// Oscillates in `[0.4, 1.0]` with neighbouring particles out of phase.
pub fn pulse(elapsed: f32, index: usize, frequency: f32, phase_step: f32) -> f32 {
    (elapsed * frequency + index as f32 * phase_step).sin() * 0.3 + 0.7
}
