use crate::data::LetterSet;
use crate::data::Puzzle;
use crate::restrictions::filter_legal;
use crate::restrictions::LegalWord;
use crate::results::*;
use log::{debug, trace, warn};
use smallvec::{smallvec, SmallVec};
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::collections::HashMap;
use std::sync::Arc;

/// The default maximum number of words in a chain.
pub const DEFAULT_MAX_WORDS: usize = 5;

/// Limits on how far the solver searches before giving up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverConfig {
    /// Chains longer than this are never considered.
    pub max_words: usize,
    /// If set, the search stops with [`SolveResult::NoSolution`] after expanding this many states.
    pub max_expansions: Option<usize>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            max_words: DEFAULT_MAX_WORDS,
            max_expansions: None,
        }
    }
}

/// The cost of reaching a search state. Costs compare by number of words, then total letters, then
/// the word sequence itself.
///
/// Paths hold indices into the sorted word list, so comparing two paths of equal length compares
/// their words lexicographically. Paths up to [`INLINE_PATH_LEN`] words are stored inline, so
/// extending one is a copy rather than an allocation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Cost {
    num_words: usize,
    total_letters: usize,
    path: Path,
}

const INLINE_PATH_LEN: usize = 8;

type Path = SmallVec<[u32; INLINE_PATH_LEN]>;

/// Two chains are interchangeable once they end on the same letter having covered the same letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct State {
    last_letter: char,
    covered: LetterSet,
}

impl State {
    fn after(word: &LegalWord, covered: LetterSet) -> State {
        State {
            last_letter: word.last_letter(),
            covered: covered.union(word.letters()),
        }
    }
}

/// Finds the shortest chain of `legal_words` that uses every letter in `letter_set`, using the
/// default [`SolverConfig`].
///
/// ```
/// use letter_boxed_solver::*;
///
/// let puzzle = Puzzle::new(["WML", "FRO", "EIP", "TUD"]).unwrap();
/// let legal_words = filter_legal(&puzzle, &["FLOWERPOT", "TEDIUM", "TOTEM"]);
///
/// let result = solve(&legal_words, puzzle.letter_set());
///
/// let chain = result.chain().unwrap();
/// assert_eq!(chain.words().len(), 2);
/// assert_eq!(chain.words()[0].as_ref(), "FLOWERPOT");
/// assert_eq!(chain.words()[1].as_ref(), "TEDIUM");
/// ```
pub fn solve(legal_words: &[LegalWord], letter_set: LetterSet) -> SolveResult {
    solve_with_config(legal_words, letter_set, &SolverConfig::default())
}

/// Finds the best chain of `legal_words` that uses every letter in `letter_set`.
///
/// Chains with fewer words are preferred, then chains with fewer letters in total, and then the
/// chain whose words come first alphabetically. The result does not depend on the order of
/// `legal_words`, and repeated words are ignored.
pub fn solve_with_config(
    legal_words: &[LegalWord],
    letter_set: LetterSet,
    config: &SolverConfig,
) -> SolveResult {
    if legal_words.is_empty() || config.max_words == 0 {
        debug!("Nothing to search: no legal words or a zero word limit.");
        return SolveResult::NoSolution;
    }

    let mut words: Vec<&LegalWord> = legal_words.iter().collect();
    words.sort_unstable_by(|a, b| a.word().cmp(b.word()));
    words.dedup_by(|a, b| a.word() == b.word());

    let mut words_by_first_letter: HashMap<char, Vec<u32>> = HashMap::new();
    for (index, word) in words.iter().enumerate() {
        words_by_first_letter
            .entry(word.first_letter())
            .or_default()
            .push(index as u32);
    }
    debug!(
        "Searching {} legal words for a chain of at most {} covering {}.",
        words.len(),
        config.max_words,
        letter_set
    );

    let mut best_costs: HashMap<State, Cost> = HashMap::new();
    let mut queue: BinaryHeap<Reverse<(Cost, State)>> = BinaryHeap::new();
    for (index, word) in words.iter().enumerate() {
        let cost = Cost {
            num_words: 1,
            total_letters: word.len(),
            path: smallvec![index as u32],
        };
        push_if_better(
            &mut queue,
            &mut best_costs,
            State::after(word, LetterSet::new()),
            cost,
        );
    }

    let mut num_expanded: usize = 0;
    while let Some(Reverse((cost, state))) = queue.pop() {
        // Skip entries that were superseded after they were queued.
        if best_costs.get(&state) != Some(&cost) {
            continue;
        }
        if state.covered.is_superset(letter_set) {
            debug!(
                "Found a {}-word chain after expanding {} states.",
                cost.num_words, num_expanded
            );
            let chain_words: Vec<Arc<str>> = cost
                .path
                .iter()
                .map(|index| Arc::clone(words[*index as usize].word()))
                .collect();
            return SolveResult::Solved(Chain::new(chain_words));
        }
        if cost.num_words >= config.max_words {
            continue;
        }
        if let Some(max_expansions) = config.max_expansions {
            if num_expanded >= max_expansions {
                warn!(
                    "Gave up after expanding {} states without covering {}.",
                    num_expanded, letter_set
                );
                return SolveResult::NoSolution;
            }
        }
        num_expanded += 1;
        trace!(
            "Expanding {} words ending in {} covering {}",
            cost.num_words,
            state.last_letter,
            state.covered
        );

        let next_words = match words_by_first_letter.get(&state.last_letter) {
            Some(next_words) => next_words,
            None => continue,
        };
        let num_words = cost.num_words + 1;
        for &next in next_words {
            let word = words[next as usize];
            let next_state = State::after(word, state.covered);
            let total_letters = cost.total_letters + word.len();
            // The path only decides ties, so skip building it when the state is already reached
            // more cheaply.
            if let Some(best) = best_costs.get(&next_state) {
                if (best.num_words, best.total_letters) < (num_words, total_letters) {
                    continue;
                }
            }
            let mut path = cost.path.clone();
            path.push(next);
            push_if_better(
                &mut queue,
                &mut best_costs,
                next_state,
                Cost {
                    num_words,
                    total_letters,
                    path,
                },
            );
        }
    }

    debug!(
        "Exhausted the search after expanding {} states.",
        num_expanded
    );
    SolveResult::NoSolution
}

/// Queues the state unless it has already been reached at an equal or lower cost.
fn push_if_better(
    queue: &mut BinaryHeap<Reverse<(Cost, State)>>,
    best_costs: &mut HashMap<State, Cost>,
    state: State,
    cost: Cost,
) {
    if let Some(best) = best_costs.get(&state) {
        if *best <= cost {
            return;
        }
    }
    best_costs.insert(state, cost.clone());
    queue.push(Reverse((cost, state)));
}

/// Filters `dictionary` down to the legal words for `puzzle`, then solves for all of its letters.
pub fn solve_puzzle<S>(puzzle: &Puzzle, dictionary: &[S], config: &SolverConfig) -> SolveResult
where
    S: AsRef<str> + Sync,
{
    let legal_words = filter_legal(puzzle, dictionary);
    solve_with_config(&legal_words, puzzle.letter_set(), config)
}
