use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServoError {
    #[error("Servo not found")]
    ServoNotFound { name: String },

    #[error("Preset not found")]
    PresetNotFound { name: String },

    #[error("Position {desired} is {} than {}", relation(.desired, .min), bound(.desired, .min, .max))]
    MovementOutOfRange {
        servo: String,
        current: i32,
        desired: i32,
        min: i32,
        max: i32,
    },

    #[error("Position {desired} is {} than {}", relation(.desired, .min), bound(.desired, .min, .max))]
    PresetMemberPositionOutOfRange {
        servo: String,
        desired: i32,
        min: i32,
        max: i32,
    },

    #[error("Invalid limits: min {min} is greater than max {max}")]
    InvalidLimits { min: i32, max: i32 },

    #[error("Invalid servo spec for '{name}': {reason}")]
    InvalidServoSpec { name: String, reason: String },

    #[error("Servo '{servo}' appears more than once in preset '{preset}'")]
    DuplicatePresetMember { preset: String, servo: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

fn relation(desired: &i32, min: &i32) -> &'static str {
    if desired < min {
        "lower"
    } else {
        "higher"
    }
}

fn bound(desired: &i32, min: &i32, max: &i32) -> i32 {
    if desired < min {
        *min
    } else {
        *max
    }
}

/// Coarse classification used by the transport to pick a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    OutOfRange,
    Invalid,
    Internal,
}

impl ServoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServoError::ServoNotFound { .. } | ServoError::PresetNotFound { .. } => {
                ErrorKind::NotFound
            }
            ServoError::MovementOutOfRange { .. }
            | ServoError::PresetMemberPositionOutOfRange { .. } => ErrorKind::OutOfRange,
            ServoError::InvalidLimits { .. }
            | ServoError::InvalidServoSpec { .. }
            | ServoError::DuplicatePresetMember { .. }
            | ServoError::InvalidConfigValueError { .. } => ErrorKind::Invalid,
            ServoError::IoError(_)
            | ServoError::SerializationError(_)
            | ServoError::TomlError(_)
            | ServoError::ConfigError { .. } => ErrorKind::Internal,
        }
    }

    /// Error-kind name reported to API clients.
    pub fn name(&self) -> &'static str {
        match self {
            ServoError::ServoNotFound { .. } => "ServoNotFound",
            ServoError::PresetNotFound { .. } => "PresetNotFound",
            ServoError::MovementOutOfRange { .. } => "MovementOutOfRange",
            ServoError::PresetMemberPositionOutOfRange { .. } => "PresetMemberPositionOutOfRange",
            ServoError::InvalidLimits { .. } => "InvalidLimits",
            ServoError::InvalidServoSpec { .. } => "InvalidServoSpec",
            ServoError::DuplicatePresetMember { .. } => "DuplicatePresetMember",
            ServoError::IoError(_) => "IoError",
            ServoError::SerializationError(_) => "SerializationError",
            ServoError::TomlError(_) => "TomlError",
            ServoError::ConfigError { .. } => "ConfigError",
            ServoError::InvalidConfigValueError { .. } => "InvalidConfigValue",
        }
    }

    /// The servo or preset the error is about, when there is one.
    pub fn item(&self) -> Option<&str> {
        match self {
            ServoError::ServoNotFound { name }
            | ServoError::PresetNotFound { name }
            | ServoError::InvalidServoSpec { name, .. } => Some(name),
            ServoError::MovementOutOfRange { servo, .. }
            | ServoError::PresetMemberPositionOutOfRange { servo, .. }
            | ServoError::DuplicatePresetMember { servo, .. } => Some(servo),
            _ => None,
        }
    }

    pub fn servo_not_found(name: impl Into<String>) -> Self {
        ServoError::ServoNotFound { name: name.into() }
    }

    pub fn preset_not_found(name: impl Into<String>) -> Self {
        ServoError::PresetNotFound { name: name.into() }
    }
}

pub type Result<T> = std::result::Result<T, ServoError>;
