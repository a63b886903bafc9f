//! Make service-provided text safe to print on a terminal.
//!
//! Everything the service sends is untrusted. Escape sequences could move the
//! cursor, retitle the window or rewrite earlier output, and markup meant for
//! a browser is just noise here.
use regex::Regex;
use std::sync::OnceLock;

fn escape_sequences() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // CSI ... final byte, OSC ... BEL/ST, and two-byte ESC sequences.
        Regex::new(r"\x1b\[[0-?]*[ -/]*[@-~]|\x1b\][^\x07\x1b]*(?:\x07|\x1b\\)?|\x1b[@-_]?")
            .expect("static escape-sequence regex")
    })
}

fn markup_tags() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)<!--.*?-->|</?[A-Za-z][^<>]*>").expect("static tag regex")
    })
}

/// Drop escape sequences and control characters, keeping `\n` and `\t`.
///
/// ```
/// use claimcheck_checker::sanitize::strip_controls;
///
/// assert_eq!(strip_controls("\x1b[31mred\x1b[0m\x07 text\n"), "red text\n");
/// ```
pub fn strip_controls(input: &str) -> String {
    let without_sequences = escape_sequences().replace_all(input, "");
    without_sequences
        .chars()
        .filter(|c| *c == '\n' || *c == '\t' || !c.is_control())
        .collect()
}

/// Reduce a markup fragment to its text: tags removed, basic entities decoded,
/// then [`strip_controls`].
///
/// ```
/// use claimcheck_checker::sanitize::plain_text;
///
/// assert_eq!(
///     plain_text("<b>No</b> evidence &amp; <script>alert(1)</script>none"),
///     "No evidence & alert(1)none"
/// );
/// ```
pub fn plain_text(input: &str) -> String {
    let without_tags = markup_tags().replace_all(input, "");
    let decoded = without_tags
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&");
    strip_controls(&decoded)
}
