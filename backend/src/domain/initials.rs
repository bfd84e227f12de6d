//! Name normalisation: turning a first/last name pair into a two-letter code.

use serde::{Deserialize, Serialize};

/// Raw name pair as submitted by a client.
///
/// No validation happens at construction; [`normalize`] is the gate.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NameInput {
    /// Given name.
    #[serde(default)]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    pub last_name: String,
}

impl NameInput {
    /// Convenience constructor.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

/// Which name field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameField {
    /// `first_name`.
    First,
    /// `last_name`.
    Last,
}

impl NameField {
    /// Wire name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::First => "first_name",
            Self::Last => "last_name",
        }
    }
}

impl std::fmt::Display for NameField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation failures for names and stored initials codes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InitialsValidationError {
    /// A name field was empty once trimmed.
    #[error("{0} must not be empty")]
    EmptyName(NameField),
    /// A name field had no alphabetic character to take an initial from.
    #[error("{0} must contain at least one letter")]
    NoLetters(NameField),
    /// A stored code was not exactly two letters in canonical case.
    #[error("initials must be exactly two letters in canonical case, got {0:?}")]
    MalformedCode(String),
}

/// Two-character initials code, e.g. `AS` for Arjun Sharma.
///
/// Letters are uppercased where their script has case; letters from caseless
/// scripts such as CJK are kept as written (`王李`).
///
/// Also used verbatim as the per-user directory name in the output tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Initials(String);

impl Initials {
    /// Validate a code read back from a path segment.
    ///
    /// # Errors
    /// Returns [`InitialsValidationError::MalformedCode`] unless `code` is two
    /// alphabetic characters already in canonical (uppercased) form.
    pub fn parse(code: &str) -> Result<Self, InitialsValidationError> {
        let mut chars = code.chars();
        let (Some(first), Some(second), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(InitialsValidationError::MalformedCode(code.to_owned()));
        };
        if [first, second]
            .iter()
            .all(|c| c.is_alphabetic() && upper_initial(*c) == *c)
        {
            Ok(Self(code.to_owned()))
        } else {
            Err(InitialsValidationError::MalformedCode(code.to_owned()))
        }
    }

    /// The code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Initials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Initials {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Multi-character expansions (ß -> SS) keep only their first character.
fn upper_initial(c: char) -> char {
    c.to_uppercase().next().unwrap_or(c)
}

fn initial_of(raw: &str, field: NameField) -> Result<char, InitialsValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InitialsValidationError::EmptyName(field));
    }
    trimmed
        .chars()
        .find(|c| c.is_alphabetic())
        .map(upper_initial)
        .ok_or(InitialsValidationError::NoLetters(field))
}

/// Derive initials from a first and last name.
///
/// The initial of each name is its first alphabetic character after trimming,
/// uppercased.
///
/// # Errors
/// Fails when either name is blank or has no letters.
///
/// # Examples
/// ```
/// use avatar_backend::domain::normalize;
///
/// let initials = normalize("  arjun ", "Sharma").expect("valid names");
/// assert_eq!(initials.as_str(), "AS");
/// ```
pub fn normalize(first_name: &str, last_name: &str) -> Result<Initials, InitialsValidationError> {
    let first = initial_of(first_name, NameField::First)?;
    let last = initial_of(last_name, NameField::Last)?;
    Ok(Initials([first, last].iter().collect()))
}

impl TryFrom<&NameInput> for Initials {
    type Error = InitialsValidationError;

    fn try_from(value: &NameInput) -> Result<Self, Self::Error> {
        normalize(&value.first_name, &value.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Arjun", "Sharma", "AS")]
    #[case("priya", "patel", "PP")]
    #[case("  vikram\t", "\nsingh ", "VS")]
    #[case("O'Neil", "'Brien", "OB")]
    #[case("élodie", "ñúñez", "ÉÑ")]
    #[case("ßtraße", "Kim", "SK")]
    #[case("王", "李", "王李")]
    fn derives_uppercase_first_letters(
        #[case] first: &str,
        #[case] last: &str,
        #[case] expected: &str,
    ) {
        let initials = normalize(first, last).expect("valid names");
        assert_eq!(initials.as_str(), expected);
        assert_eq!(initials.as_str().chars().count(), 2);
    }

    #[rstest]
    #[case("", "Sharma", InitialsValidationError::EmptyName(NameField::First))]
    #[case("   ", "Sharma", InitialsValidationError::EmptyName(NameField::First))]
    #[case("Arjun", "", InitialsValidationError::EmptyName(NameField::Last))]
    #[case("123", "Sharma", InitialsValidationError::NoLetters(NameField::First))]
    #[case("Arjun", "--", InitialsValidationError::NoLetters(NameField::Last))]
    fn rejects_unusable_names(
        #[case] first: &str,
        #[case] last: &str,
        #[case] expected: InitialsValidationError,
    ) {
        assert_eq!(normalize(first, last), Err(expected));
    }

    #[rstest]
    fn error_messages_name_the_field() {
        let err = normalize("", "x").expect_err("empty first name");
        assert_eq!(err.to_string(), "first_name must not be empty");
    }

    #[rstest]
    #[case("AS")]
    #[case("ÉÑ")]
    #[case("王李")]
    fn parse_accepts_canonical_codes(#[case] code: &str) {
        assert_eq!(Initials::parse(code).expect("valid").as_str(), code);
    }

    #[rstest]
    #[case("as")]
    #[case("A")]
    #[case("ASD")]
    #[case("A1")]
    #[case("..")]
    #[case("")]
    fn parse_rejects_non_canonical_codes(#[case] code: &str) {
        assert!(matches!(
            Initials::parse(code),
            Err(InitialsValidationError::MalformedCode(_))
        ));
    }

    #[rstest]
    fn name_input_converts_via_try_from() {
        let input = NameInput::new("Radha", "Krishna");
        let initials = Initials::try_from(&input).expect("valid input");
        assert_eq!(initials.to_string(), "RK");
    }
}
