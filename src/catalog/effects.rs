//! Parameter records shared by ability and combo effects

/// A chance roll paired with a damage factor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChanceEffect {
    pub chance: f64,
    pub factor: f64,
}

impl ChanceEffect {
    pub fn is_well_formed(&self) -> bool {
        is_fraction(self.chance) && is_factor(self.factor)
    }
}

/// An effect that fires once health falls to a fraction of max
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdEffect {
    /// Health fraction at or below which the effect fires
    pub threshold: f64,
    /// Damage multiplier or heal fraction, depending on the effect
    pub factor: f64,
}

impl ThresholdEffect {
    pub fn is_well_formed(&self) -> bool {
        is_fraction(self.threshold) && is_factor(self.factor)
    }
}

/// Poison inflicted on the opponent: damage per tick for a number of ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoisonDose {
    pub damage: i32,
    pub duration: u32,
}

impl PoisonDose {
    pub fn is_well_formed(&self) -> bool {
        self.damage > 0 && self.duration > 0
    }
}

/// Timed outgoing damage bonus
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageBuff {
    /// Added to 1.0 to form the damage multiplier
    pub bonus: f64,
    pub duration: u32,
}

impl DamageBuff {
    pub fn is_well_formed(&self) -> bool {
        is_factor(self.bonus) && self.duration > 0
    }
}

/// Finite value within [0, 1]
pub fn is_fraction(value: f64) -> bool {
    value.is_finite() && (0.0..=1.0).contains(&value)
}

/// Finite, non-negative multiplier
pub fn is_factor(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction_bounds() {
        assert!(is_fraction(0.0));
        assert!(is_fraction(1.0));
        assert!(!is_fraction(1.01));
        assert!(!is_fraction(-0.1));
        assert!(!is_fraction(f64::NAN));
    }

    #[test]
    fn test_malformed_params_detected() {
        assert!(!ChanceEffect { chance: 1.5, factor: 2.0 }.is_well_formed());
        assert!(!ThresholdEffect { threshold: 0.3, factor: f64::INFINITY }.is_well_formed());
        assert!(!PoisonDose { damage: 5, duration: 0 }.is_well_formed());
        assert!(!DamageBuff { bonus: -0.5, duration: 4 }.is_well_formed());
        assert!(DamageBuff { bonus: 0.35, duration: 4 }.is_well_formed());
    }
}
