//! Flattening of WebVTT/SRT cue streams into plain text.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

const WEBVTT_HEADER: &str = "WEBVTT";
const TIMING_ARROW: &str = "-->";

static INLINE_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<[^>]*>").expect("inline tag pattern is a valid regex")
});

/// Reduce raw cue content to its spoken text, one line per distinct caption line.
///
/// Sequence numbers, timing lines, the `WEBVTT` header and inline tags are dropped.
/// Auto-generated tracks repeat each line across overlapping cues, so a line is kept
/// only the first time it appears; cue order is otherwise preserved as-is.
pub fn clean_transcript(content: &str) -> String {
    let mut cleaned = String::new();
    let mut in_cue_text = false;
    let mut seen: HashSet<String> = HashSet::new();

    for line in content.lines() {
        let line = line.trim();

        if is_sequence_number(line) {
            continue;
        }

        if line.contains(TIMING_ARROW) {
            in_cue_text = true;
            continue;
        }

        if line.is_empty() {
            in_cue_text = false;
            continue;
        }

        if line == WEBVTT_HEADER || !in_cue_text {
            continue;
        }

        let text = INLINE_TAG.replace_all(line, "");
        let text = text.trim();
        if !text.is_empty() && seen.insert(text.to_string()) {
            cleaned.push_str(text);
            cleaned.push('\n');
        }
    }

    cleaned.trim_end().to_string()
}

fn is_sequence_number(line: &str) -> bool {
    !line.is_empty() && line.bytes().all(|b| b.is_ascii_digit())
}
