/// Paces special-attack attempts for a boss controller.
///
/// The host ticks the cadence and calls [`super::BossFight::try_special_attack`]
/// whenever it fires. Once the boss drops below `desperate_threshold` the
/// cadence latches into a faster rhythm for the rest of the fight.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AttackCadence {
    pub interval: f32,
    pub desperate_threshold: f32,
    pub desperate_factor: f32,
    #[cfg_attr(feature = "serde", serde(skip))]
    elapsed: f32,
    #[cfg_attr(feature = "serde", serde(skip))]
    desperate: bool,
}

impl AttackCadence {
    pub const DEFAULT_INTERVAL: f32 = 2.0;
    pub const DEFAULT_DESPERATE_THRESHOLD: f32 = 0.15;
    pub const DEFAULT_DESPERATE_FACTOR: f32 = 0.6;

    pub const fn new(interval: f32) -> Self {
        Self {
            interval,
            desperate_threshold: Self::DEFAULT_DESPERATE_THRESHOLD,
            desperate_factor: Self::DEFAULT_DESPERATE_FACTOR,
            elapsed: 0.0,
            desperate: false,
        }
    }

    pub fn is_desperate(&self) -> bool {
        self.desperate
    }

    /// Interval currently in effect.
    pub fn current_interval(&self) -> f32 {
        if self.desperate {
            self.interval * self.desperate_factor
        } else {
            self.interval
        }
    }

    /// Advances the cadence; returns `true` when an attempt is due.
    pub fn tick(&mut self, dt: f32, health_pct: f32) -> bool {
        if !self.desperate && health_pct < self.desperate_threshold {
            self.desperate = true;
            tracing::debug!(health_pct, "attack cadence turned desperate");
        }

        self.elapsed += dt;
        if self.elapsed >= self.current_interval() {
            self.elapsed = 0.0;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.desperate = false;
    }
}

impl Default for AttackCadence {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INTERVAL)
    }
}
