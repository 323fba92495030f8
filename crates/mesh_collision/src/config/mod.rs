//! Configuration system
//!
//! Settings live in plain serde structs and can be stored as TOML or RON.
//! [`CollisionConfig`] carries the tunables used around the tree: the long-ray
//! segmentation parameters and the recursion guard for tree construction.

pub use serde::{Serialize, Deserialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(ConfigError::Io)?;

        // Format is picked from the extension
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A value failed validation
    #[error("Invalid value for {field}: {reason}")]
    Invalid {
        /// Offending field
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

/// How a long ray cast is cut into sub-segments
///
/// Each sub-segment is `max(min_segment_length, total_length / segment_divisor)`
/// long, which keeps the per-query bounding box tight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaySegmentConfig {
    /// Lower bound on the length of a single sub-segment
    pub min_segment_length: f32,
    /// Number of pieces a long ray is divided into before clamping
    pub segment_divisor: u32,
}

impl Default for RaySegmentConfig {
    fn default() -> Self {
        Self {
            min_segment_length: 100.0,
            segment_divisor: 20,
        }
    }
}

/// Settings for mesh collision queries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Recursion guard for tree construction
    pub max_tree_depth: usize,
    /// Long-ray segmentation parameters
    pub ray_segments: RaySegmentConfig,
}

impl CollisionConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self {
            max_tree_depth: 4096,
            ray_segments: RaySegmentConfig::default(),
        }
    }

    /// Set the minimum sub-segment length for long rays
    pub fn with_min_segment_length(mut self, length: f32) -> Self {
        self.ray_segments.min_segment_length = length;
        self
    }

    /// Set how many pieces a long ray is divided into
    pub fn with_segment_divisor(mut self, divisor: u32) -> Self {
        self.ray_segments.segment_divisor = divisor;
        self
    }

    /// Set the tree depth bound
    pub fn with_max_tree_depth(mut self, depth: usize) -> Self {
        self.max_tree_depth = depth;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let length = self.ray_segments.min_segment_length;
        if !(length.is_finite() && length > 0.0) {
            return Err(ConfigError::Invalid {
                field: "ray_segments.min_segment_length",
                reason: format!("must be a positive finite length, got {length}"),
            });
        }

        if self.ray_segments.segment_divisor == 0 {
            return Err(ConfigError::Invalid {
                field: "ray_segments.segment_divisor",
                reason: "must be at least 1".to_string(),
            });
        }

        if self.max_tree_depth == 0 {
            return Err(ConfigError::Invalid {
                field: "max_tree_depth",
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for CollisionConfig {}
