//! Reply parsing and scoring for the chat policy.

const DECISION_MARKER: &str = "I choose to:";

/// Width of the " X) " letter label following the marker.
const LABEL_WIDTH: usize = 4;

const SPAN_TERMINATORS: [&str; 4] = ["\n", ",", ".", " and"];

/// Text span naming the chosen action.
///
/// After "I choose to:" the letter label is skipped and the span runs up to
/// the first newline, comma, period or " and". A reply without the marker
/// is used whole.
pub fn decision_span(reply: &str) -> &str {
    let Some(at) = reply.find(DECISION_MARKER) else {
        return reply;
    };

    let start = reply[at..]
        .char_indices()
        .nth(DECISION_MARKER.chars().count() + LABEL_WIDTH)
        .map(|(offset, _)| at + offset)
        .unwrap_or(reply.len());
    let rest = &reply[start..];

    let end = SPAN_TERMINATORS
        .iter()
        .filter_map(|terminator| rest.find(terminator))
        .min()
        .unwrap_or(rest.len());

    &rest[..end]
}

/// Scores every phrase against a decision span.
///
/// A phrase scores the number of span words (lowercased) found among its own
/// words, divided by its word count. Phrases sharing no word score `-inf`.
pub fn score_reply<'a, I>(span: &str, phrases: I) -> Vec<f64>
where
    I: IntoIterator<Item = &'a str>,
{
    let span = span.to_lowercase();
    let span_words: Vec<&str> = span.split_whitespace().collect();

    phrases
        .into_iter()
        .map(|phrase| {
            let phrase = phrase.to_lowercase();
            let words: Vec<&str> = phrase.split_whitespace().collect();
            if words.is_empty() {
                return f64::NEG_INFINITY;
            }
            let hits = span_words.iter().filter(|w| words.contains(*w)).count();
            if hits == 0 {
                f64::NEG_INFINITY
            } else {
                hits as f64 / words.len() as f64
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_skips_label_and_stops_at_terminator() {
        let reply = "The stairs are east. I should move east.\n\nI choose to: D) move east.";
        assert_eq!(decision_span(reply), "move east");

        let reply = "I choose to: A) attack the kobold and then move south";
        assert_eq!(decision_span(reply), "attack the kobold");

        let reply = "I choose to: C) move west, because";
        assert_eq!(decision_span(reply), "move west");
    }

    #[test]
    fn span_without_marker_is_whole_reply() {
        assert_eq!(decision_span("move north please"), "move north please");
    }

    #[test]
    fn span_of_truncated_reply_is_empty() {
        assert_eq!(decision_span("I choose to: A"), "");
    }

    #[test]
    fn scores_count_shared_words() {
        let scores = score_reply(
            "move east",
            ["move north", "move east", "attack the kobold", "Move East Now"],
        );
        assert_eq!(scores[0], 0.5);
        assert_eq!(scores[1], 1.0);
        assert_eq!(scores[2], f64::NEG_INFINITY);
        assert!((scores[3] - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn repeated_span_words_count_each_time() {
        let scores = score_reply("east east", ["move east"]);
        assert_eq!(scores, vec![1.0]);
    }
}
