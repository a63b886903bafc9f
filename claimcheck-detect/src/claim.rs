use serde::Serialize;
use std::fmt;

/// A claim that is known to be non-empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Claim(String);

/// Returned by [`Claim::parse`] for empty or whitespace-only input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("claim is empty")]
pub struct EmptyClaim;

impl Claim {
    /// Trim `input` and keep it if anything is left.
    ///
    /// ```
    /// use claimcheck_detect::{Claim, EmptyClaim};
    ///
    /// let claim = Claim::parse("  The moon is made of cheese \n").unwrap();
    /// assert_eq!(claim.as_str(), "The moon is made of cheese");
    /// assert_eq!(Claim::parse(" \t "), Err(EmptyClaim));
    /// ```
    pub fn parse(input: &str) -> Result<Self, EmptyClaim> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(EmptyClaim);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Claim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Claim {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(Claim::parse(""), Err(EmptyClaim));
        assert_eq!(Claim::parse("   \n\t"), Err(EmptyClaim));
    }

    #[test]
    fn inner_whitespace_is_preserved() {
        let claim = Claim::parse("  a   b  ").unwrap();
        assert_eq!(claim.as_str(), "a   b");
    }

    #[test]
    fn serializes_as_plain_string() {
        let claim = Claim::parse("x").unwrap();
        assert_eq!(serde_json::to_string(&claim).unwrap(), r#""x""#);
    }
}
