use fedwatchcore::metrics::MetricSample;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::run::config::RunConfig;

/// Deterministic generator for one simulated training trajectory.
///
/// Loss decays toward a floor, accuracy saturates toward the target, and the
/// privacy budget accumulates every round.
pub struct SynthRun {
    config: RunConfig,
    rng: StdRng,
    epsilon: f64,
    round: u64,
}

impl SynthRun {
    pub fn new(config: RunConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self {
            config,
            rng,
            epsilon: 0.0,
            round: 0,
        }
    }

    /// Produces the next round's sample.
    pub fn next_sample(&mut self) -> MetricSample {
        self.round += 1;
        let progress = self.round as f64 / self.config.rounds.max(1) as f64;
        let jitter = if self.config.noise > 0.0 {
            self.rng.gen_range(-self.config.noise..self.config.noise)
        } else {
            0.0
        };

        let loss = (self.config.start_loss * (-2.2 * progress).exp() + jitter).max(0.0);
        let accuracy = (self.config.target_accuracy * (1.0 - (-2.2 * progress).exp()) + jitter)
            .clamp(0.0, 1.0);
        self.epsilon += self.config.epsilon_per_round * (1.0 + jitter.abs());

        MetricSample::new(self.round, loss, accuracy, self.epsilon)
    }
}
