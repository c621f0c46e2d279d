use crate::data::LetterSet;
use crate::data::Puzzle;
use crate::results::Chain;
use crate::results::LetterBoxedError;
use log::debug;
use rayon::prelude::*;
use std::result::Result;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Words shorter than this are never legal.
pub const MIN_WORD_LENGTH: usize = 3;

/// A word that can be played on a specific puzzle, along with the details the solver links on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LegalWord {
    word: Arc<str>,
    first_letter: char,
    last_letter: char,
    letters: LetterSet,
}

impl LegalWord {
    /// The word, in upper case.
    pub fn word(&self) -> &Arc<str> {
        &self.word
    }

    pub fn first_letter(&self) -> char {
        self.first_letter
    }

    pub fn last_letter(&self) -> char {
        self.last_letter
    }

    /// The distinct letters used by this word.
    pub fn letters(&self) -> LetterSet {
        self.letters
    }

    /// The number of letters in the word.
    pub fn len(&self) -> usize {
        self.word.len()
    }

    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }
}

impl Puzzle {
    /// Returns the [`LegalWord`] for `word` if it can be played on this puzzle.
    ///
    /// A word is legal iff it is at least [`MIN_WORD_LENGTH`] letters long, uses only puzzle
    /// letters, never repeats a letter immediately, and never follows a letter with another from
    /// the same side. ASCII case is ignored; any other character makes the word illegal.
    ///
    /// ```
    /// use letter_boxed_solver::Puzzle;
    ///
    /// let puzzle = Puzzle::new(["WML", "FRO", "EIP", "TUD"]).unwrap();
    ///
    /// let word = puzzle.legal_word("flowerpot").unwrap();
    /// assert_eq!(word.first_letter(), 'F');
    /// assert_eq!(word.last_letter(), 'T');
    /// // 'F' and 'R' are on the same side.
    /// assert!(puzzle.legal_word("FRET").is_none());
    /// ```
    pub fn legal_word(&self, word: &str) -> Option<LegalWord> {
        let word = word.trim().to_ascii_uppercase();
        if word.chars().count() < MIN_WORD_LENGTH {
            return None;
        }
        let mut previous: Option<(char, usize)> = None;
        for letter in word.chars() {
            let side = self.side_of(letter)?;
            if let Some((previous_letter, previous_side)) = previous {
                if previous_letter == letter || previous_side == side {
                    return None;
                }
            }
            previous = Some((letter, side));
        }
        let first_letter = word.chars().next()?;
        let (last_letter, _) = previous?;
        Some(LegalWord {
            letters: LetterSet::from_letters(word.chars()),
            word: Arc::from(word.as_str()),
            first_letter,
            last_letter,
        })
    }

    /// Checks that the given words form a complete solution to this puzzle, and returns them as a
    /// [`Chain`].
    ///
    /// This is intended for answers produced elsewhere, such as a published reference solution.
    pub fn check_chain<S>(&self, words: &[S]) -> Result<Chain, LetterBoxedError>
    where
        S: AsRef<str>,
    {
        if words.is_empty() {
            return Err(LetterBoxedError::EmptyChain);
        }
        let mut legal_words: Vec<LegalWord> = Vec::with_capacity(words.len());
        for word in words {
            let legal_word = self
                .legal_word(word.as_ref())
                .ok_or_else(|| LetterBoxedError::IllegalWord(word.as_ref().trim().to_string()))?;
            if let Some(previous) = legal_words.last() {
                if previous.last_letter != legal_word.first_letter {
                    return Err(LetterBoxedError::BrokenChain {
                        previous: previous.word.to_string(),
                        next: legal_word.word.to_string(),
                    });
                }
            }
            legal_words.push(legal_word);
        }
        let chain = Chain::new(legal_words.into_iter().map(|word| word.word).collect());
        let missing = self.letter_set().difference(chain.covered());
        if !missing.is_empty() {
            return Err(LetterBoxedError::MissingLetters(missing));
        }
        Ok(chain)
    }
}

/// Selects the words from `dictionary` that are legal for `puzzle`.
///
/// The dictionary may contain words in any case, repeats, and words that can never be played;
/// these are all tolerated. The result is sorted by word and contains each word once.
pub fn filter_legal<S>(puzzle: &Puzzle, dictionary: &[S]) -> Vec<LegalWord>
where
    S: AsRef<str> + Sync,
{
    let mut legal_words: Vec<LegalWord> = dictionary
        .par_iter()
        .filter_map(|word| puzzle.legal_word(word.as_ref()))
        .collect();
    legal_words.sort_unstable_by(|a, b| a.word.cmp(&b.word));
    legal_words.dedup_by(|a, b| a.word == b.word);
    debug!(
        "{} of {} words are legal for {}",
        legal_words.len(),
        dictionary.len(),
        puzzle
    );
    legal_words
}
