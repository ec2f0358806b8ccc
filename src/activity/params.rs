use std::{fmt, str::FromStr};

use super::fetch::RequestError;

/// Level every informal-register category is served at.
pub const ADVANCED_LEVEL: &str = "advanced";

/// What kind of content a request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Vocabulary,
    Exercises,
}

impl Mode {
    /// Number of items asked of the generation service.
    pub fn expected_len(self) -> usize {
        match self {
            Mode::Vocabulary => 5,
            Mode::Exercises => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Vocabulary => "vocabulary",
            Mode::Exercises => "exercises",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "vocabulary" => Ok(Mode::Vocabulary),
            "exercises" => Ok(Mode::Exercises),
            other => Err(RequestError::InvalidParameters(format!(
                "unknown mode '{}', expected 'vocabulary' or 'exercises'",
                other
            ))),
        }
    }
}

/// Informal registers that get their own exercise phrasing and are always
/// served at [`ADVANCED_LEVEL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Register {
    Slang,
    Hood,
    Idioms,
}

impl Register {
    /// Classifies a category name, case-insensitively.
    pub fn of(category: &str) -> Option<Self> {
        match category.trim().to_lowercase().as_str() {
            "slang" => Some(Register::Slang),
            "hood" => Some(Register::Hood),
            "idioms" => Some(Register::Idioms),
            _ => None,
        }
    }
}

/// Level actually sent to the generation service for `category`.
pub fn effective_level<'a>(category: &str, level: &'a str) -> &'a str {
    match Register::of(category) {
        Some(_) => ADVANCED_LEVEL,
        None => level,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParameters {
    pub category: String,
    pub level: String,
    pub mode: Mode,
}

impl RequestParameters {
    /// Rejects a blank category or level before anything goes over the wire.
    pub fn new(category: &str, level: &str, mode: Mode) -> Result<Self, RequestError> {
        let category = category.trim();
        let level = level.trim();

        if category.is_empty() || level.is_empty() {
            return Err(RequestError::InvalidParameters(format!(
                "category and level are required (got category '{}', level '{}')",
                category, level
            )));
        }

        Ok(Self {
            category: category.to_string(),
            level: level.to_string(),
            mode,
        })
    }

    pub fn register(&self) -> Option<Register> {
        Register::of(&self.category)
    }

    pub fn effective_level(&self) -> &str {
        effective_level(&self.category, &self.level)
    }
}
