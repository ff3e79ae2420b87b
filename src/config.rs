//! Generation parameters and configuration validation.

/// All numeric knobs for the generation pipeline.
///
/// Defaults reproduce the reference structure: a 30x30 plan, 15 layers, and
/// the phase constants tuned for a dense, organically-grown silhouette.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratorConfig {
    /// Horizontal grid extent (both x and z)
    pub size: usize,
    /// Vertical grid extent in layers
    pub layers: usize,

    // =========================================================================
    // Core construction
    // =========================================================================
    /// Lattice spacing range for core candidates (inclusive)
    pub core_spacing_min: usize,
    pub core_spacing_max: usize,
    /// Probability that an s-spaced lattice point receives a core
    pub core_probability: f64,
    /// Minimum core height in layers (upper bound is the grid top)
    pub core_height_min: usize,
    /// Maximum base half-width of a core footprint
    pub core_half_width_max: usize,

    // =========================================================================
    // Floor-slab growth
    // =========================================================================
    /// Probability that a core cell seeds a floor expansion
    pub floor_probability: f64,
    /// Horizontal noise-sampling scale
    pub noise_scale: f64,
    /// Vertical noise-sampling scale
    pub noise_vertical_scale: f64,
    /// Noise value a position must exceed to receive floor
    pub noise_threshold: f64,
    /// Slab thickness in layers
    pub floor_thickness: usize,

    // =========================================================================
    // Rooms, bridges, circulation, scatter
    // =========================================================================
    /// Room attempts = size^2 / divisor
    pub room_attempt_divisor: usize,
    /// Bridges are attempted at every `bridge_interval`-th elevation
    pub bridge_interval: usize,
    /// Probability that a pair of core columns is bridged at an elevation
    pub bridge_probability: f64,
    /// Probability that a non-topmost core cell becomes a stair
    pub stair_probability: f64,
    /// Fraction of the total volume attempted as secondary fragments
    pub scatter_fraction: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            size: 30,
            layers: 15,
            core_spacing_min: 4,
            core_spacing_max: 6,
            core_probability: 0.7,
            core_height_min: 3,
            core_half_width_max: 2,
            floor_probability: 0.35,
            noise_scale: 0.1,
            noise_vertical_scale: 0.15,
            noise_threshold: 0.05,
            floor_thickness: 1,
            room_attempt_divisor: 8,
            bridge_interval: 4,
            bridge_probability: 0.002,
            stair_probability: 0.1,
            scatter_fraction: 0.02,
        }
    }
}

impl GeneratorConfig {
    /// Check every knob, failing fast on the first degenerate value.
    /// Nothing is clamped: a bad configuration is a caller error.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size == 0 {
            return Err(ConfigError::ZeroExtent("size"));
        }
        if self.layers == 0 {
            return Err(ConfigError::ZeroExtent("layers"));
        }
        if self.core_spacing_min == 0 {
            return Err(ConfigError::NonPositive("core_spacing_min"));
        }
        if self.core_spacing_max < self.core_spacing_min {
            return Err(ConfigError::EmptyRange("core_spacing"));
        }
        if self.core_height_min == 0 {
            return Err(ConfigError::NonPositive("core_height_min"));
        }
        if self.core_height_min > self.layers {
            return Err(ConfigError::EmptyRange("core_height"));
        }
        if self.core_half_width_max == 0 {
            return Err(ConfigError::NonPositive("core_half_width_max"));
        }
        if self.floor_thickness == 0 {
            return Err(ConfigError::NonPositive("floor_thickness"));
        }
        if self.room_attempt_divisor == 0 {
            return Err(ConfigError::NonPositive("room_attempt_divisor"));
        }
        if self.bridge_interval == 0 {
            return Err(ConfigError::NonPositive("bridge_interval"));
        }

        for (name, value) in [
            ("core_probability", self.core_probability),
            ("floor_probability", self.floor_probability),
            ("bridge_probability", self.bridge_probability),
            ("stair_probability", self.stair_probability),
            ("scatter_fraction", self.scatter_fraction),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ProbabilityOutOfRange(name, value));
            }
        }

        for (name, value) in [
            ("noise_scale", self.noise_scale),
            ("noise_vertical_scale", self.noise_vertical_scale),
            ("noise_threshold", self.noise_threshold),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite(name));
            }
        }

        Ok(())
    }
}

/// Degenerate-configuration errors. Construction-time only.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A grid extent is zero
    ZeroExtent(&'static str),
    /// A count or interval that must be at least 1 is zero
    NonPositive(&'static str),
    /// A min/max pair describes an empty range
    EmptyRange(&'static str),
    /// A probability knob is outside [0, 1]
    ProbabilityOutOfRange(&'static str, f64),
    /// A noise parameter is NaN or infinite
    NonFinite(&'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ZeroExtent(name) => write!(f, "{} must be positive", name),
            ConfigError::NonPositive(name) => write!(f, "{} must be at least 1", name),
            ConfigError::EmptyRange(name) => write!(f, "{} range is empty", name),
            ConfigError::ProbabilityOutOfRange(name, value) => {
                write!(f, "{} must lie in [0, 1], got {}", name, value)
            }
            ConfigError::NonFinite(name) => write!(f, "{} must be finite", name),
        }
    }
}

impl std::error::Error for ConfigError {}
