use std::sync::LazyLock;

use regex::Regex;

use super::random::pick_random;
use crate::error::{ProserError, Result};

// shortest run from a word boundary up to a terminator, a line break or the end of the text
static SENTENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[^\r\n\x0C]+?(?:[.!?]|[\r\n\x0C]|\z)").expect("sentence pattern is valid")
});

/// Splits `text` into sentences, in source order.
///
/// Every call scans `text` from the start, so results never depend on earlier inputs.
pub fn extract_sentences(text: &str) -> Result<Vec<&str>> {
    let sentences: Vec<&str> = SENTENCE
        .find_iter(text)
        .map(|m| m.as_str().trim_end())
        .filter(|s| !s.is_empty())
        .collect();

    if sentences.is_empty() {
        return Err(ProserError::NoSentencesFound {
            text: text.to_string(),
        });
    }
    Ok(sentences)
}

pub fn pick_random_sentence(text: &str) -> Result<String> {
    let sentences = extract_sentences(text)?;
    pick_random(&sentences)
        .map(|s| s.to_string())
        .ok_or_else(|| ProserError::NoSentencesFound {
            text: text.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const BRIEFING: &str = "Our people stay out of this, got it? Did you check the parallel circuitry? \
        The onboard systems of twenty million cars in this city answer to someone else. Including mine. \
        The grid is down! Move now.";

    #[test]
    fn empty_text_has_no_sentences() {
        assert!(matches!(
            extract_sentences(""),
            Err(ProserError::NoSentencesFound { .. })
        ));
        assert!(extract_sentences("  \n\r\n ... ?!").is_err());
    }

    #[test]
    fn single_sentence_is_returned_whole() {
        let source = "Time is a human construct.";
        assert_eq!(extract_sentences(source).unwrap(), vec![source]);
        assert_eq!(pick_random_sentence(source).unwrap(), source);
    }

    #[test]
    fn each_terminator_closes_a_sentence() {
        let sentences = extract_sentences(BRIEFING).unwrap();
        assert_eq!(
            sentences,
            vec![
                "Our people stay out of this, got it?",
                "Did you check the parallel circuitry?",
                "The onboard systems of twenty million cars in this city answer to someone else.",
                "Including mine.",
                "The grid is down!",
                "Move now.",
            ]
        );

        let mut cursor = 0;
        for sentence in &sentences {
            let at = BRIEFING[cursor..].find(sentence).unwrap() + cursor;
            cursor = at + sentence.len();
        }
        assert_eq!(sentences.iter().collect::<HashSet<_>>().len(), 6);
    }

    #[test]
    fn unpunctuated_lines_split_at_line_breaks() {
        let sentences = extract_sentences("first line\r\nsecond line\nthird\x0Cfourth").unwrap();
        assert_eq!(sentences, vec!["first line", "second line", "third", "fourth"]);
    }

    #[test]
    fn trailing_whitespace_is_not_part_of_a_sentence() {
        assert_eq!(extract_sentences("no stop here   ").unwrap(), vec!["no stop here"]);
        assert_eq!(
            extract_sentences("Line one   \nLine two\t\r\n").unwrap(),
            vec!["Line one", "Line two"]
        );
    }

    #[test]
    fn unpunctuated_text_is_one_sentence() {
        let sentences = extract_sentences("no full stop here").unwrap();
        assert_eq!(sentences, vec!["no full stop here"]);
    }

    #[test]
    fn trailing_fragment_after_the_last_terminator_is_kept() {
        let sentences = extract_sentences("It ended. Or did it").unwrap();
        assert_eq!(sentences, vec!["It ended.", "Or did it"]);
    }

    #[test]
    fn scans_do_not_leak_between_inputs() {
        let long = "One. Two. Three. Four.";
        let _ = extract_sentences(long).unwrap();
        assert_eq!(extract_sentences("Short.").unwrap(), vec!["Short."]);
        assert_eq!(extract_sentences(long).unwrap().len(), 4);
    }

    #[test]
    fn random_sentences_come_from_the_text() {
        let sentences = extract_sentences(BRIEFING).unwrap();
        let picked: HashSet<String> = (0..100)
            .map(|_| pick_random_sentence(BRIEFING).unwrap())
            .collect();
        assert!(picked.len() > 1);
        assert!(picked.iter().all(|p| sentences.contains(&p.as_str())));
    }
}
