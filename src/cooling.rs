//! Cooling schedules: the temperature state machine.
//!
//! # References
//!
//! - Geometric: standard textbook approach, `T_{k+1} = alpha * T_k`
//! - Linear: fixed-step cooling, `T_{k+1} = T_k - step`

/// Decay rule applied by [`CoolingSchedule::advance`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DecayRule {
    /// Linear cooling: subtract a fixed step each advance.
    Linear {
        /// Amount subtracted from the temperature per advance. Must be positive.
        step: f64,
    },

    /// Geometric (exponential) cooling: multiply by a fixed factor each advance.
    ///
    /// Most widely used. Typical `alpha`: 0.95–0.99.
    Geometric {
        /// Cooling factor in (0, 1). Higher = slower cooling.
        alpha: f64,
    },
}

/// Temperature state machine driving a simulated annealing run.
///
/// The schedule is *active* while the current temperature is strictly above
/// the minimum; once it drops to or below the minimum it is terminal until
/// [`reset_to_start`](CoolingSchedule::reset_to_start) or
/// [`set_start_temperature`](CoolingSchedule::set_start_temperature) is called.
///
/// # Examples
///
/// ```
/// use tempering::cooling::CoolingSchedule;
///
/// let mut schedule = CoolingSchedule::geometric(100.0, 1.0, 0.5);
/// schedule.advance().advance();
/// assert!((schedule.temperature() - 25.0).abs() < 1e-12);
/// assert!(schedule.is_active());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoolingSchedule {
    start_temperature: f64,
    min_temperature: f64,
    current_temperature: f64,
    decay: DecayRule,
}

impl CoolingSchedule {
    /// Creates a linear schedule that subtracts `step` per advance.
    pub fn linear(start_temperature: f64, min_temperature: f64, step: f64) -> Self {
        Self {
            start_temperature,
            min_temperature,
            current_temperature: start_temperature,
            decay: DecayRule::Linear { step },
        }
    }

    /// Creates a geometric schedule that multiplies by `alpha` per advance.
    pub fn geometric(start_temperature: f64, min_temperature: f64, alpha: f64) -> Self {
        Self {
            start_temperature,
            min_temperature,
            current_temperature: start_temperature,
            decay: DecayRule::Geometric { alpha },
        }
    }

    /// Applies the decay rule once. Returns `&mut self` for chaining.
    pub fn advance(&mut self) -> &mut Self {
        self.current_temperature = match self.decay {
            DecayRule::Linear { step } => self.current_temperature - step,
            DecayRule::Geometric { alpha } => self.current_temperature * alpha,
        };
        self
    }

    /// True while the current temperature is strictly above the minimum.
    pub fn is_active(&self) -> bool {
        self.current_temperature > self.min_temperature
    }

    /// Current temperature. No side effects.
    pub fn temperature(&self) -> f64 {
        self.current_temperature
    }

    /// Sets the starting temperature and resets the current temperature to it.
    ///
    /// Used by automatic calibration to install the tuned temperature.
    pub fn set_start_temperature(&mut self, temperature: f64) {
        self.start_temperature = temperature;
        self.current_temperature = temperature;
    }

    /// Sets the temperature floor only; the current temperature is untouched.
    pub fn set_min_temperature(&mut self, temperature: f64) {
        self.min_temperature = temperature;
    }

    /// Restores the current temperature to the starting temperature.
    pub fn reset_to_start(&mut self) -> &mut Self {
        self.current_temperature = self.start_temperature;
        self
    }

    /// Validates the schedule parameters.
    pub fn validate(&self) -> Result<(), String> {
        if self.start_temperature <= 0.0 {
            return Err("start temperature must be positive".into());
        }
        if self.min_temperature >= self.start_temperature {
            return Err("min temperature must be less than start temperature".into());
        }
        match self.decay {
            DecayRule::Linear { step } => {
                if step <= 0.0 {
                    return Err(format!("linear step must be positive, got {step}"));
                }
            }
            DecayRule::Geometric { alpha } => {
                if alpha <= 0.0 || alpha >= 1.0 {
                    return Err(format!("geometric alpha must be in (0, 1), got {alpha}"));
                }
            }
        }
        Ok(())
    }
}
