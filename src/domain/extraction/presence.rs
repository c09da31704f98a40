//! Presence policy for extracted user records.

use std::fmt;

use super::UserRecord;

/// Message returned when no usable summary can be formed.
pub const INSUFFICIENT_INFORMATION: &str = "Insufficient user information provided.";

/// A field of [`UserRecord`] that was absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MissingField {
    Age,
    Name,
    Email,
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MissingField::Age => "age",
            MissingField::Name => "name",
            MissingField::Email => "email",
        };
        write!(f, "{}", s)
    }
}

/// Which summary a record supports, given the fields it carries.
///
/// Rules, first match wins:
/// 1. every field present: full sentence
/// 2. only age missing
/// 3. only name missing (blank counts as missing)
/// 4. only email missing
/// 5. anything else: insufficient
///
/// A fallback sentence needs two fields, so a record with a single field is
/// as unusable as an empty one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenceOutcome {
    Complete { name: String, email: String, age: u32 },
    MissingAge { name: String, email: String },
    MissingName { email: String, age: u32 },
    MissingEmail { name: String, age: u32 },
    Insufficient,
}

impl PresenceOutcome {
    /// Classifies a record by field presence.
    pub fn from_record(record: &UserRecord) -> Self {
        let name = record.present_name().map(str::to_string);
        let email = record.present_email().map(str::to_string);

        match (name, email, record.age) {
            (Some(name), Some(email), Some(age)) => Self::Complete { name, email, age },
            (Some(name), Some(email), None) => Self::MissingAge { name, email },
            (None, Some(email), Some(age)) => Self::MissingName { email, age },
            (Some(name), None, Some(age)) => Self::MissingEmail { name, age },
            _ => Self::Insufficient,
        }
    }

    /// The single field whose absence triggered a fallback, if any.
    pub fn missing_field(&self) -> Option<MissingField> {
        match self {
            Self::MissingAge { .. } => Some(MissingField::Age),
            Self::MissingName { .. } => Some(MissingField::Name),
            Self::MissingEmail { .. } => Some(MissingField::Email),
            Self::Complete { .. } | Self::Insufficient => None,
        }
    }

    /// Returns true if the summary is degraded or empty.
    pub fn is_fallback(&self) -> bool {
        !matches!(self, Self::Complete { .. })
    }
}

impl fmt::Display for PresenceOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Complete { name, email, age } => {
                write!(f, "User {} ({}) is {} years old", name, email, age)
            }
            Self::MissingAge { name, email } => write!(f, "User {} has email {}", name, email),
            Self::MissingName { email, age } => {
                write!(f, "User with email {} is {} years old", email, age)
            }
            Self::MissingEmail { name, age } => write!(f, "User {} is {} years old", name, age),
            Self::Insufficient => write!(f, "{}", INSUFFICIENT_INFORMATION),
        }
    }
}
