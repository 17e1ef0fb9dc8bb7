//! Input checks applied before theme state is touched.

use crate::error::ThemeError;
use crate::model::DARK_MARKER;

/// Core validation trait shared by the theme inputs.
pub trait Validator<T: ?Sized> {
    type Error;

    /// Validate the input and return Ok(()) if valid, or Err with validation error
    fn validate(&self, input: &T) -> Result<(), Self::Error>;
}

/// Accents become class-like markers on the rendering surface, so they must
/// be CSS identifiers: `-?[_a-zA-Z][_a-zA-Z0-9-]*`. The empty string is the
/// "no accent" sentinel and always passes.
pub struct AccentValidator;

const MAX_ACCENT_LENGTH: usize = 64;

impl Validator<str> for AccentValidator {
    type Error = ThemeError;

    fn validate(&self, input: &str) -> Result<(), Self::Error> {
        let invalid = |reason: &str| ThemeError::InvalidAccent {
            accent: input.to_string(),
            reason: reason.to_string(),
        };

        if input.is_empty() {
            return Ok(());
        }

        if input.len() > MAX_ACCENT_LENGTH {
            return Err(invalid("Accent too long (max 64 characters)"));
        }

        if input == DARK_MARKER {
            return Err(invalid("'dark' is reserved for the base theme marker"));
        }

        let body = input.strip_prefix('-').unwrap_or(input);
        let mut chars = body.chars();
        match chars.next() {
            Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
            _ => return Err(invalid("Accent must start with a letter or underscore")),
        }

        if !chars.all(|c| c == '_' || c == '-' || c.is_ascii_alphanumeric()) {
            return Err(invalid(
                "Accent contains invalid characters (only letters, digits, hyphens and underscores allowed)",
            ));
        }

        Ok(())
    }
}
