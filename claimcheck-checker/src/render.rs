//! Turn a [`DisplayState`] into what a front-end should show.
//!
//! All service-provided text passes through [`crate::sanitize`] here, so
//! front-ends can print a [`View`] as-is.
use crate::display::DisplayState;
use crate::sanitize::{plain_text, strip_controls};
use claimcheck_detect::{CheckError, VerdictLabel, VerdictResponse};
use serde::Serialize;
use std::fmt;

pub const IDLE_TEXT: &str = "Enter a claim to check.";
pub const PROMPT_TEXT: &str = "Please enter a claim.";
pub const CHECKING_TEXT: &str = "Checking…";
pub const WARNING_SIGN: &str = "⚠️";

/// Colour family a front-end should use for the headline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Neutral,
    Busy,
    Supported,
    Refuted,
    Uncertain,
    Error,
}

/// Render-ready contents of the display region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct View {
    pub tone: Tone,
    pub headline: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claim: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verdict: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,
    /// `Some` only for a verdict; may be empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<String>>,
}

impl View {
    fn message(tone: Tone, headline: impl Into<String>) -> Self {
        Self {
            tone,
            headline: headline.into(),
            claim: None,
            verdict: None,
            explanation: None,
            search_query: None,
            sources: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.tone == Tone::Error
    }
}

impl From<&DisplayState> for View {
    fn from(state: &DisplayState) -> Self {
        match state {
            DisplayState::Idle => View::message(Tone::Neutral, IDLE_TEXT),
            DisplayState::Prompt => View::message(Tone::Neutral, PROMPT_TEXT),
            DisplayState::Checking { claim, .. } => View {
                claim: Some(strip_controls(claim)),
                ..View::message(Tone::Busy, CHECKING_TEXT)
            },
            DisplayState::Verdict { claim, verdict, .. } => verdict_view(claim, verdict),
            DisplayState::Failed { claim, error, .. } => View {
                claim: Some(strip_controls(claim)),
                ..View::message(Tone::Error, error_text(error))
            },
        }
    }
}

fn verdict_view(claim: &str, v: &VerdictResponse) -> View {
    let label = v.label();
    let tone = match label {
        VerdictLabel::LikelyTrue => Tone::Supported,
        VerdictLabel::LikelyFake => Tone::Refuted,
        VerdictLabel::Unverifiable | VerdictLabel::Missing | VerdictLabel::Other(_) => {
            Tone::Uncertain
        }
    };

    let verdict = strip_controls(&v.verdict);
    let mut explanation = plain_text(&v.explanation);
    if label == VerdictLabel::Missing && explanation.is_empty() {
        if let Some(raw) = &v.raw {
            explanation = strip_controls(raw);
        }
    }

    let headline = if verdict.is_empty() {
        "Verdict: (none)".to_string()
    } else {
        format!("Verdict: {verdict}")
    };

    View {
        tone,
        headline,
        claim: Some(strip_controls(claim)),
        verdict: Some(verdict),
        explanation: Some(explanation),
        search_query: Some(strip_controls(&v.search_query)),
        sources: Some(v.sources.iter().map(|s| strip_controls(s)).collect()),
    }
}

/// Error line for a failed submission.
///
/// ```
/// use claimcheck_checker::render::error_text;
/// use claimcheck_detect::CheckError;
///
/// let text = error_text(&CheckError::Status { status: 500, body: "internal error".into() });
/// assert_eq!(text, "Error 500: internal error");
///
/// let text = error_text(&CheckError::Transport("connection refused".into()));
/// assert_eq!(text, "⚠️ Error: connection refused");
/// ```
pub fn error_text(error: &CheckError) -> String {
    match error {
        CheckError::Status { status, body } => {
            format!("Error {status}: {}", strip_controls(body))
        }
        CheckError::Transport(msg) => format!("{WARNING_SIGN} Error: {}", strip_controls(msg)),
        other => format!("{WARNING_SIGN} Error: {}", strip_controls(&other.to_string())),
    }
}

impl fmt::Display for View {
    /// Plain-text layout used by the one-shot command.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.headline)?;
        if let Some(claim) = &self.claim {
            writeln!(f, "Claim: {claim}")?;
        }
        if let Some(explanation) = &self.explanation {
            writeln!(f, "Explanation: {explanation}")?;
        }
        if let Some(query) = &self.search_query {
            writeln!(f, "Search query: {query}")?;
        }
        if let Some(sources) = &self.sources {
            if sources.is_empty() {
                writeln!(f, "Sources: (none)")?;
            } else {
                writeln!(f, "Sources:")?;
                for source in sources {
                    writeln!(f, "  • {source}")?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verdict(json: serde_json::Value) -> DisplayState {
        DisplayState::Verdict {
            ticket: 1,
            claim: "The moon is made of cheese".into(),
            verdict: serde_json::from_value(json).unwrap(),
        }
    }

    #[test]
    fn renders_all_four_fields() {
        let state = verdict(serde_json::json!({
            "verdict": "False",
            "explanation": "No evidence supports this.",
            "search_query": "moon composition",
            "sources": ["nasa.gov"]
        }));
        let view = View::from(&state);

        assert_eq!(view.headline, "Verdict: False");
        assert_eq!(view.verdict.as_deref(), Some("False"));
        assert_eq!(view.explanation.as_deref(), Some("No evidence supports this."));
        assert_eq!(view.search_query.as_deref(), Some("moon composition"));
        assert_eq!(view.sources, Some(vec!["nasa.gov".to_string()]));
        assert_eq!(view.tone, Tone::Uncertain);
    }

    #[test]
    fn empty_sources_render_as_empty_list() {
        let state = verdict(serde_json::json!({
            "verdict": "Likely Fake",
            "explanation": "x",
            "search_query": "y",
            "sources": []
        }));
        let view = View::from(&state);

        assert_eq!(view.sources, Some(vec![]));
        assert_eq!(view.tone, Tone::Refuted);
        assert!(view.to_string().contains("Sources: (none)"));
    }

    #[test]
    fn raw_answer_fills_explanation() {
        let state = verdict(serde_json::json!({ "raw": "model said maybe" }));
        let view = View::from(&state);

        assert_eq!(view.headline, "Verdict: (none)");
        assert_eq!(view.explanation.as_deref(), Some("model said maybe"));
    }

    #[test]
    fn explanation_markup_is_flattened() {
        let state = verdict(serde_json::json!({
            "verdict": "Likely True",
            "explanation": "<img src=x onerror=alert(1)>Confirmed by <b>two</b> outlets",
        }));
        let view = View::from(&state);

        assert_eq!(view.explanation.as_deref(), Some("Confirmed by two outlets"));
        assert_eq!(view.tone, Tone::Supported);
    }

    #[test]
    fn prompt_and_checking_states() {
        assert_eq!(View::from(&DisplayState::Prompt).headline, PROMPT_TEXT);
        let checking = View::from(&DisplayState::Checking {
            ticket: 4,
            claim: "x".into(),
        });
        assert_eq!(checking.tone, Tone::Busy);
        assert_eq!(checking.headline, CHECKING_TEXT);
    }

    #[test]
    fn decode_failures_read_as_errors() {
        let view = View::from(&DisplayState::Failed {
            ticket: 2,
            claim: "x".into(),
            error: CheckError::Decode {
                message: "expected value".into(),
                body_snippet: "<html>".into(),
            },
        });
        assert!(view.is_error());
        assert!(view.headline.contains("Error"));
        assert!(view.headline.contains("<html>"));
    }

    #[test]
    fn text_layout_lists_sources_in_order() {
        let state = verdict(serde_json::json!({
            "verdict": "Likely True",
            "sources": ["a.example - first", "b.example - second"]
        }));
        let text = View::from(&state).to_string();
        let first = text.find("a.example").unwrap();
        let second = text.find("b.example").unwrap();
        assert!(first < second);
    }
}
