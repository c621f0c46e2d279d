//! Solves Letter Boxed puzzles.
//!
//! A puzzle has twelve letters split across the four sides of a square. A word is playable when
//! it only uses puzzle letters and never follows a letter with another from the same side. A
//! solution is a chain of playable words, each starting with the last letter of the word before
//! it, that uses every puzzle letter at least once.
//!
//! Solving happens in two steps: [`filter_legal`] narrows a dictionary down to the words that are
//! legal for a puzzle, and [`solve`] searches those words for the shortest covering chain.
//!
//! ```
//! use letter_boxed_solver::*;
//!
//! let puzzle: Puzzle = "WML-FRO-EIP-TUD".parse().unwrap();
//! let dictionary = WordBank::from_iterator(["flowerpot", "tedium", "mow", "flowerpot"]);
//!
//! let legal_words = filter_legal(&puzzle, &dictionary);
//! assert_eq!(legal_words.len(), 3);
//!
//! match solve(&legal_words, puzzle.letter_set()) {
//!     SolveResult::Solved(chain) => assert_eq!(chain.total_letters(), 15),
//!     SolveResult::NoSolution => panic!("expected a solution"),
//! }
//! ```

mod data;
mod engine;
mod restrictions;
mod results;

pub use data::LetterSet;
pub use data::Puzzle;
pub use data::WordBank;
pub use data::{LETTERS_PER_SIDE, NUM_PUZZLE_LETTERS, NUM_SIDES};
pub use engine::*;
pub use restrictions::*;
pub use results::*;
