use std::borrow::Borrow;

use crate::{RawCaption, SentenceCaption};

const SENTENCE_TERMINATORS: &[char] = &['.', '!', '?'];

/// A fragment containing any terminator closes the sentence it belongs to.
pub fn ends_sentence(text: &str) -> bool {
    text.contains(SENTENCE_TERMINATORS)
}

/// Groups timed caption fragments into sentences.
///
/// Fragments are joined with a single space. A sentence keeps the start of its
/// first fragment and the summed duration of all of them. Fragments are never
/// split, so a fragment holding several terminators still ends exactly one
/// sentence. Whatever is pending when the input runs out is emitted as a final
/// sentence.
pub fn sentences<I>(captions: I) -> Sentences<I::IntoIter>
where
    I: IntoIterator,
    I::Item: Borrow<RawCaption>,
{
    Sentences {
        captions: captions.into_iter(),
    }
}

pub fn segment_captions<I>(captions: I) -> Vec<SentenceCaption>
where
    I: IntoIterator,
    I::Item: Borrow<RawCaption>,
{
    sentences(captions).collect()
}

/// Lazy iterator returned by [`sentences`].
pub struct Sentences<I> {
    captions: I,
}

impl<I> Iterator for Sentences<I>
where
    I: Iterator,
    I::Item: Borrow<RawCaption>,
{
    type Item = SentenceCaption;

    fn next(&mut self) -> Option<SentenceCaption> {
        let mut text = String::new();
        let mut start = 0.0;
        let mut duration = 0.0;

        for caption in self.captions.by_ref() {
            let caption = caption.borrow();
            if text.is_empty() {
                text.clone_from(&caption.text);
                start = caption.start;
                duration = caption.duration;
            } else {
                text.push(' ');
                text.push_str(&caption.text);
                duration += caption.duration;
            }

            if ends_sentence(&caption.text) {
                return Some(SentenceCaption {
                    text,
                    start,
                    duration,
                });
            }
        }

        (!text.is_empty()).then_some(SentenceCaption {
            text,
            start,
            duration,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(text: &str, start: f64, duration: f64) -> RawCaption {
        RawCaption::new(text, start, duration)
    }

    #[test]
    fn fragments_merge_until_terminator() {
        let sentences = segment_captions(&[raw("hello", 0.0, 1.0), raw("world.", 1.0, 1.0)]);
        assert_eq!(sentences, vec![SentenceCaption::new("hello world.", 0.0, 2.0)]);
    }

    #[test]
    fn trailing_fragment_is_flushed_without_terminator() {
        let sentences = segment_captions(&[raw("hi", 0.0, 1.0)]);
        assert_eq!(sentences, vec![SentenceCaption::new("hi", 0.0, 1.0)]);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(segment_captions(Vec::<RawCaption>::new()).is_empty());
    }

    #[test]
    fn multiple_terminators_end_a_single_sentence() {
        let sentences = segment_captions(&[
            raw("Wait. What?! Really", 0.0, 2.0),
            raw("yes", 2.0, 1.0),
        ]);
        assert_eq!(
            sentences,
            vec![
                SentenceCaption::new("Wait. What?! Really", 0.0, 2.0),
                SentenceCaption::new("yes", 2.0, 1.0),
            ]
        );
    }

    #[test]
    fn punctuation_only_caption_seals() {
        let sentences = segment_captions(&[
            raw("so", 0.5, 0.5),
            raw("!", 1.0, 0.25),
            raw("next", 3.0, 1.0),
        ]);
        assert_eq!(sentences[0], SentenceCaption::new("so !", 0.5, 0.75));
        assert_eq!(sentences[1], SentenceCaption::new("next", 3.0, 1.0));
    }

    #[test]
    fn start_stays_pinned_to_first_fragment() {
        let sentences = segment_captions(&[
            raw("one", 4.0, 1.0),
            raw("two", 5.0, 1.0),
            raw("three?", 6.5, 1.5),
            raw("four", 9.0, 1.0),
        ]);
        assert_eq!(sentences[0].start, 4.0);
        assert_eq!(sentences[0].duration, 3.5);
        assert_eq!(sentences[1].start, 9.0);
    }

    #[test]
    fn empty_fragment_does_not_open_a_sentence() {
        let sentences = segment_captions(&[raw("", 0.0, 1.0), raw("late.", 2.0, 1.0)]);
        assert_eq!(sentences, vec![SentenceCaption::new("late.", 2.0, 1.0)]);
    }

    #[test]
    fn coverage_count_and_starts_hold_for_mixed_input() {
        let input = vec![
            raw("so today", 0.0, 1.2),
            raw("we talk about rust.", 1.2, 2.0),
            raw("It is fast!", 3.5, 1.0),
            raw("and", 5.0, 0.4),
            raw("safe", 5.4, 0.6),
            raw("right?", 6.0, 0.5),
            raw("bye", 8.0, 0.5),
        ];
        let output = segment_captions(&input);

        let joined_input = input
            .iter()
            .map(|caption| caption.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let joined_output = output
            .iter()
            .map(|sentence| sentence.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(joined_output, joined_input);
        assert!(output.len() <= input.len());

        let starts: Vec<f64> = output.iter().map(|sentence| sentence.start).collect();
        assert_eq!(starts, vec![0.0, 3.5, 5.0, 8.0]);
        assert!(output
            .iter()
            .all(|sentence| input.iter().any(|caption| caption.start == sentence.start)));
        assert!(output.windows(2).all(|pair| pair[0].start <= pair[1].start));
    }

    #[test]
    fn segmentation_is_idempotent() {
        let input = vec![raw("a", 0.0, 1.0), raw("b.", 1.0, 1.0), raw("c", 2.0, 1.0)];
        assert_eq!(segment_captions(&input), segment_captions(&input));
    }

    #[test]
    fn iterator_is_lazy() {
        let mut pulled = 0;
        let source = (0..).map(|index| {
            pulled += 1;
            RawCaption::new(format!("part {index}."), index as f64, 1.0)
        });
        let first_two: Vec<_> = sentences(source).take(2).collect();
        assert_eq!(first_two.len(), 2);
        assert_eq!(first_two[1].text, "part 1.");
        assert_eq!(pulled, 2);
    }
}
