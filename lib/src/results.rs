use crate::data::LetterSet;
use std::io;
use std::sync::Arc;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Indicates that an error occurred while building a puzzle or checking a chain.
#[derive(Error, Debug)]
pub enum LetterBoxedError {
    /// Indicates that the puzzle did not have exactly four sides. Contains the number given.
    #[error("expected 4 sides, got {0}")]
    SideCount(usize),
    /// Indicates that a side did not have exactly three letters.
    #[error("side {side} must have 3 letters, but has {length}")]
    SideLength { side: usize, length: usize },
    /// Indicates that one or more given characters are not in the supported set (`A`-`Z`).
    #[error("unsupported character {0:?}")]
    UnsupportedCharacter(char),
    /// Indicates that the same letter appears twice in the puzzle.
    #[error("letter {0} appears more than once in the puzzle")]
    DuplicateLetter(char),
    /// Indicates that a chain contained no words.
    #[error("chain is empty")]
    EmptyChain,
    /// Indicates that a word in a chain cannot be played on this puzzle.
    #[error("{0} is not a legal word for this puzzle")]
    IllegalWord(String),
    /// Indicates that a word does not start with the last letter of the word before it.
    #[error("{next} does not start with the last letter of {previous}")]
    BrokenChain { previous: String, next: String },
    /// Indicates that a chain leaves some puzzle letters unused.
    #[error("chain never uses the letters {0}")]
    MissingLetters(LetterSet),
    /// Wraps an error from reading the word list.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// A chain of words where each word starts with the last letter of the word before it.
///
/// With the `serde` feature a chain is stored as its list of words. The covered letters and the
/// letter count are recomputed when it is deserialized.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "Vec<Arc<str>>", into = "Vec<Arc<str>>")
)]
pub struct Chain {
    words: Vec<Arc<str>>,
    covered: LetterSet,
    total_letters: usize,
}

impl Chain {
    pub(crate) fn new(words: Vec<Arc<str>>) -> Chain {
        let covered = words.iter().fold(LetterSet::new(), |set, word| {
            set.union(LetterSet::from_letters(word.chars()))
        });
        let total_letters = words.iter().map(|word| word.len()).sum();
        Chain {
            words,
            covered,
            total_letters,
        }
    }

    /// The words in play order.
    pub fn words(&self) -> &[Arc<str>] {
        &self.words
    }

    /// The number of words in the chain.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The sum of the lengths of every word, used to break ties between chains of equal length.
    pub fn total_letters(&self) -> usize {
        self.total_letters
    }

    /// Every letter used by at least one word in the chain.
    pub fn covered(&self) -> LetterSet {
        self.covered
    }
}

impl From<Vec<Arc<str>>> for Chain {
    fn from(words: Vec<Arc<str>>) -> Self {
        Chain::new(words)
    }
}

impl From<Chain> for Vec<Arc<str>> {
    fn from(chain: Chain) -> Self {
        chain.words
    }
}

/// The outcome of searching for a chain that uses every puzzle letter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveResult {
    /// Indicates that a covering chain was found, and provides the best one.
    Solved(Chain),
    /// Indicates that no covering chain exists within the search limits.
    NoSolution,
}

impl SolveResult {
    /// Returns the chain if one was found.
    pub fn chain(&self) -> Option<&Chain> {
        match self {
            SolveResult::Solved(chain) => Some(chain),
            SolveResult::NoSolution => None,
        }
    }
}
