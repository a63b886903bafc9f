use crate::Claim;
use serde::{Deserialize, Deserializer, Serialize};

/// Body of `POST /detect`.
#[derive(Debug, Clone, Serialize)]
pub struct DetectRequest<'a> {
    pub claim: &'a Claim,
}

/// Body of a successful `/detect` answer.
///
/// Decoding is lenient: missing or `null` text fields become empty strings
/// and missing `sources` an empty list. When the service could not turn its
/// model output into JSON it answers `{"raw": "..."}` instead, kept in
/// [`VerdictResponse::raw`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictResponse {
    #[serde(default, deserialize_with = "nullable")]
    pub verdict: String,
    #[serde(default, deserialize_with = "nullable")]
    pub explanation: String,
    #[serde(default, deserialize_with = "nullable")]
    pub search_query: String,
    #[serde(default, deserialize_with = "nullable")]
    pub sources: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

fn nullable<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(de).map(Option::unwrap_or_default)
}

impl VerdictResponse {
    pub fn label(&self) -> VerdictLabel {
        VerdictLabel::classify(&self.verdict)
    }
}

/// Coarse reading of the verdict text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerdictLabel {
    LikelyTrue,
    LikelyFake,
    Unverifiable,
    /// Empty verdict, typically a `raw` answer.
    Missing,
    Other(String),
}

impl VerdictLabel {
    /// ```
    /// use claimcheck_detect::VerdictLabel;
    ///
    /// assert_eq!(VerdictLabel::classify("Likely Fake"), VerdictLabel::LikelyFake);
    /// assert_eq!(VerdictLabel::classify(" likely true "), VerdictLabel::LikelyTrue);
    /// assert_eq!(VerdictLabel::classify("False"), VerdictLabel::Other("False".into()));
    /// ```
    pub fn classify(text: &str) -> Self {
        let norm = text
            .trim()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_ascii_lowercase();
        match norm.as_str() {
            "" => VerdictLabel::Missing,
            "likely true" => VerdictLabel::LikelyTrue,
            "likely fake" => VerdictLabel::LikelyFake,
            "unverifiable" => VerdictLabel::Unverifiable,
            _ => VerdictLabel::Other(text.trim().to_string()),
        }
    }
}
