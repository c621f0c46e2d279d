use crate::results::LetterBoxedError;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use std::fmt;
use std::io::BufRead;
use std::ops::Deref;
use std::result::Result;
use std::str::FromStr;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The number of sides on a puzzle.
pub const NUM_SIDES: usize = 4;
/// The number of letters on each side of a puzzle.
pub const LETTERS_PER_SIDE: usize = 3;
/// The number of distinct letters in a puzzle.
pub const NUM_PUZZLE_LETTERS: usize = NUM_SIDES * LETTERS_PER_SIDE;

/// Returns the zero-based alphabet position of an uppercase ASCII letter.
pub(crate) fn letter_index(letter: char) -> Option<usize> {
    if letter.is_ascii_uppercase() {
        Some(letter as usize - 'A' as usize)
    } else {
        None
    }
}

/// A set of letters from `A` to `Z`, stored as one bit per letter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LetterSet(u32);

impl LetterSet {
    /// Creates an empty set.
    pub fn new() -> LetterSet {
        LetterSet(0)
    }

    /// Collects the given letters into a set. Lowercase letters are treated as uppercase, and
    /// anything outside `A`-`Z` is skipped.
    pub fn from_letters<I>(letters: I) -> LetterSet
    where
        I: IntoIterator<Item = char>,
    {
        let mut set = LetterSet::new();
        for letter in letters {
            set.insert(letter);
        }
        set
    }

    /// Adds the letter, returning `true` if it was not already present. Letters outside `A`-`Z`
    /// (after uppercasing) are never added.
    pub fn insert(&mut self, letter: char) -> bool {
        match letter_index(letter.to_ascii_uppercase()) {
            Some(index) => {
                let bit = 1 << index;
                let is_new = self.0 & bit == 0;
                self.0 |= bit;
                is_new
            }
            None => false,
        }
    }

    pub fn contains(&self, letter: char) -> bool {
        letter_index(letter.to_ascii_uppercase()).map_or(false, |index| self.0 & (1 << index) != 0)
    }

    pub fn union(self, other: LetterSet) -> LetterSet {
        LetterSet(self.0 | other.0)
    }

    /// Returns the letters in this set that are not in `other`.
    pub fn difference(self, other: LetterSet) -> LetterSet {
        LetterSet(self.0 & !other.0)
    }

    /// Returns `true` iff every letter in `other` is also in this set.
    pub fn is_superset(self, other: LetterSet) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Iterates over the letters in alphabetical order.
    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        ('A'..='Z').filter(move |letter| self.contains(*letter))
    }
}

impl fmt::Display for LetterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for letter in self.iter() {
            write!(f, "{}", letter)?;
        }
        Ok(())
    }
}

/// A Letter Boxed puzzle: twelve distinct letters split across the four sides of a square.
///
/// Words may only use these letters, and two consecutive letters in a word can never come from
/// the same side.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "Vec<String>", into = "Vec<String>")
)]
pub struct Puzzle {
    sides: [[char; LETTERS_PER_SIDE]; NUM_SIDES],
    side_by_letter: [Option<u8>; 26],
    letters: LetterSet,
}

impl Puzzle {
    /// Constructs a puzzle from its four sides. Each side is trimmed and converted to upper case.
    ///
    /// ```
    /// use letter_boxed_solver::Puzzle;
    ///
    /// let puzzle = Puzzle::new(["wml", "FRO", "EIP", "TUD"]).unwrap();
    ///
    /// assert_eq!(puzzle.side_of('M'), Some(0));
    /// assert_eq!(puzzle.letter_set().len(), 12);
    /// assert!(Puzzle::new(["WML", "FRO", "EIP"]).is_err());
    /// ```
    pub fn new<I, S>(sides: I) -> Result<Puzzle, LetterBoxedError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let sides: Vec<String> = sides
            .into_iter()
            .map(|side| side.as_ref().trim().to_ascii_uppercase())
            .collect();
        if sides.len() != NUM_SIDES {
            return Err(LetterBoxedError::SideCount(sides.len()));
        }
        let mut puzzle_sides = [[' '; LETTERS_PER_SIDE]; NUM_SIDES];
        let mut letters = LetterSet::new();
        for (side_index, side) in sides.iter().enumerate() {
            let length = side.chars().count();
            if length != LETTERS_PER_SIDE {
                return Err(LetterBoxedError::SideLength {
                    side: side_index,
                    length,
                });
            }
            for (index, letter) in side.chars().enumerate() {
                if letter_index(letter).is_none() {
                    return Err(LetterBoxedError::UnsupportedCharacter(letter));
                }
                if !letters.insert(letter) {
                    return Err(LetterBoxedError::DuplicateLetter(letter));
                }
                puzzle_sides[side_index][index] = letter;
            }
        }
        Ok(Puzzle::assemble(puzzle_sides))
    }

    /// Generates a puzzle from twelve distinct random letters.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Puzzle {
        let mut alphabet: Vec<char> = ('A'..='Z').collect();
        alphabet.shuffle(rng);
        let mut sides = [[' '; LETTERS_PER_SIDE]; NUM_SIDES];
        for (index, letter) in alphabet.into_iter().take(NUM_PUZZLE_LETTERS).enumerate() {
            sides[index / LETTERS_PER_SIDE][index % LETTERS_PER_SIDE] = letter;
        }
        Puzzle::assemble(sides)
    }

    /// Builds the lookup tables. The letters must already be distinct and within `A`-`Z`.
    fn assemble(sides: [[char; LETTERS_PER_SIDE]; NUM_SIDES]) -> Puzzle {
        let mut side_by_letter = [None; 26];
        let mut letters = LetterSet::new();
        for (side_index, side) in sides.iter().enumerate() {
            for letter in side {
                if let Some(index) = letter_index(*letter) {
                    side_by_letter[index] = Some(side_index as u8);
                    letters.insert(*letter);
                }
            }
        }
        Puzzle {
            sides,
            side_by_letter,
            letters,
        }
    }

    /// The letters on each side, in the order they were given.
    pub fn sides(&self) -> &[[char; LETTERS_PER_SIDE]; NUM_SIDES] {
        &self.sides
    }

    /// All twelve letters of the puzzle. A solution must use each of them at least once.
    pub fn letter_set(&self) -> LetterSet {
        self.letters
    }

    /// Returns the zero-based side that holds the given letter, or `None` if the letter is not in
    /// the puzzle.
    pub fn side_of(&self, letter: char) -> Option<usize> {
        letter_index(letter.to_ascii_uppercase())
            .and_then(|index| self.side_by_letter[index])
            .map(|side| side as usize)
    }
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, side) in self.sides.iter().enumerate() {
            if index > 0 {
                write!(f, "-")?;
            }
            for letter in side {
                write!(f, "{}", letter)?;
            }
        }
        Ok(())
    }
}

impl FromStr for Puzzle {
    type Err = LetterBoxedError;

    /// Parses sides separated by `-`, `,`, `/` or whitespace, e.g. `"WML-FRO-EIP-TUD"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Puzzle::new(
            s.split(|c: char| c == '-' || c == ',' || c == '/' || c.is_whitespace())
                .filter(|side| !side.is_empty()),
        )
    }
}

impl TryFrom<Vec<String>> for Puzzle {
    type Error = LetterBoxedError;

    fn try_from(sides: Vec<String>) -> Result<Self, Self::Error> {
        Puzzle::new(sides)
    }
}

impl From<Puzzle> for Vec<String> {
    fn from(puzzle: Puzzle) -> Self {
        puzzle
            .sides
            .iter()
            .map(|side| side.iter().collect())
            .collect()
    }
}

/// Contains all the candidate words for a puzzle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordBank {
    all_words: Vec<Arc<str>>,
}

impl WordBank {
    /// Constructs a new `WordBank` by reading words from the given reader.
    ///
    /// The reader should provide one word per line. Each word is trimmed and converted to upper
    /// case. Blank lines and repeated words are skipped.
    pub fn from_reader<R: BufRead>(word_reader: R) -> Result<Self, LetterBoxedError> {
        let mut all_words = Vec::new();
        for maybe_word in word_reader.lines() {
            all_words.push(maybe_word?);
        }
        Ok(WordBank::from_iterator(all_words))
    }

    /// Constructs a new `WordBank` using the words from the given iterator.
    ///
    /// Each word is trimmed and its ASCII letters converted to upper case. Empty and repeated words
    /// are skipped.
    pub fn from_iterator<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen: HashSet<Arc<str>> = HashSet::new();
        let all_words = words
            .into_iter()
            .filter_map(|word| {
                let word = word.as_ref().trim();
                if word.is_empty() {
                    return None;
                }
                let word: Arc<str> = Arc::from(word.to_ascii_uppercase().as_str());
                if seen.insert(Arc::clone(&word)) {
                    Some(word)
                } else {
                    None
                }
            })
            .collect();
        WordBank { all_words }
    }

    /// Returns the number of words in the bank.
    pub fn len(&self) -> usize {
        self.all_words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all_words.is_empty()
    }
}

impl Deref for WordBank {
    type Target = [Arc<str>];

    fn deref(&self) -> &Self::Target {
        &self.all_words
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn letter_set_insert_and_contains() {
        let mut set = LetterSet::new();

        assert!(set.insert('a'));
        assert!(!set.insert('A'));
        assert!(set.insert('Z'));
        assert!(!set.insert('1'));

        assert!(set.contains('A'));
        assert!(set.contains('z'));
        assert!(!set.contains('B'));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn letter_set_operations() {
        let abc = LetterSet::from_letters("ABC".chars());
        let cde = LetterSet::from_letters("CDE".chars());

        assert_eq!(abc.union(cde), LetterSet::from_letters("ABCDE".chars()));
        assert_eq!(abc.difference(cde), LetterSet::from_letters("AB".chars()));
        assert!(abc.union(cde).is_superset(abc));
        assert!(!abc.is_superset(cde));
        assert!(abc.is_superset(LetterSet::new()));
        assert!(LetterSet::new().is_empty());
    }

    #[test]
    fn letter_set_displays_alphabetically() {
        let set = LetterSet::from_letters("ZEBRA".chars());

        assert_eq!(set.iter().collect::<String>(), "ABERZ");
        assert_eq!(set.to_string(), "ABERZ");
    }

    #[test]
    fn puzzle_side_lookup() -> Result<(), LetterBoxedError> {
        let puzzle = Puzzle::new(["WML", "FRO", "EIP", "TUD"])?;

        assert_eq!(puzzle.side_of('W'), Some(0));
        assert_eq!(puzzle.side_of('o'), Some(1));
        assert_eq!(puzzle.side_of('P'), Some(2));
        assert_eq!(puzzle.side_of('D'), Some(3));
        assert_eq!(puzzle.side_of('Z'), None);
        assert_eq!(puzzle.side_of('?'), None);
        Ok(())
    }

    #[test]
    fn puzzle_random_is_valid() {
        let mut rng = rand::thread_rng();

        for _ in 0..20 {
            let puzzle = Puzzle::random(&mut rng);
            assert_eq!(puzzle.letter_set().len(), NUM_PUZZLE_LETTERS);
            let reparsed: Puzzle = puzzle.to_string().parse().unwrap();
            assert_eq!(reparsed, puzzle);
        }
    }

    #[test]
    fn word_bank_from_reader_skips_blanks_and_repeats() -> Result<(), LetterBoxedError> {
        let cursor = Cursor::new(String::from("tedium\n\n  Flowerpot \nTEDIUM\n"));

        let bank = WordBank::from_reader(cursor)?;

        assert_eq!(bank.len(), 2);
        assert_eq!(&*bank[0], "TEDIUM");
        assert_eq!(&*bank[1], "FLOWERPOT");
        Ok(())
    }
}
