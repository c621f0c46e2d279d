#[macro_use]
extern crate assert_matches;

use letter_boxed_solver::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

fn nyt_puzzle() -> Puzzle {
    let sides = [["W", "M", "L"], ["F", "R", "O"], ["E", "I", "P"], ["T", "U", "D"]];
    Puzzle::new(sides.map(|side| side.concat())).unwrap()
}

fn chain_words(result: &SolveResult) -> Vec<String> {
    result
        .chain()
        .map(|chain| chain.words().iter().map(|word| word.to_string()).collect())
        .unwrap_or_default()
}

/// Builds a word by walking the puzzle, never staying on the same side twice in a row.
fn random_walk_word<R: Rng>(puzzle: &Puzzle, rng: &mut R) -> String {
    let length = rng.gen_range(3..=8);
    let mut side = rng.gen_range(0..NUM_SIDES);
    let mut word = String::new();
    for _ in 0..length {
        word.push(puzzle.sides()[side][rng.gen_range(0..LETTERS_PER_SIDE)]);
        side = (side + rng.gen_range(1..NUM_SIDES)) % NUM_SIDES;
    }
    word
}

/// Returns two linked words that use every letter, visiting the sides in turn.
fn planted_cover(puzzle: &Puzzle) -> [String; 2] {
    let mut tour = String::new();
    for index in 0..LETTERS_PER_SIDE {
        for side in puzzle.sides() {
            tour.push(side[index]);
        }
    }
    [tour[..7].to_string(), tour[6..].to_string()]
}

/// Finds the best covering chain by trying every sequence of at most `max_words` words.
fn brute_force(
    words: &[LegalWord],
    letter_set: LetterSet,
    max_words: usize,
) -> Option<(usize, usize, Vec<String>)> {
    let mut best: Option<(usize, usize, Vec<String>)> = None;
    let mut stack: Vec<Vec<&LegalWord>> = words.iter().map(|word| vec![word]).collect();
    while let Some(chain) = stack.pop() {
        let covered = chain
            .iter()
            .fold(LetterSet::new(), |set, word| set.union(word.letters()));
        if covered.is_superset(letter_set) {
            let candidate = (
                chain.len(),
                chain.iter().map(|word| word.len()).sum(),
                chain.iter().map(|word| word.word().to_string()).collect(),
            );
            if best.as_ref().map_or(true, |best| candidate < *best) {
                best = Some(candidate);
            }
            continue;
        }
        if chain.len() >= max_words {
            continue;
        }
        let last_letter = chain[chain.len() - 1].last_letter();
        for word in words.iter().filter(|word| word.first_letter() == last_letter) {
            let mut next = chain.clone();
            next.push(word);
            stack.push(next);
        }
    }
    best
}

#[test]
fn solve_nyt_example() {
    let puzzle = nyt_puzzle();
    let dictionary = WordBank::from_iterator([
        "flowerpot",
        "tedium",
        "TOTEM",
        "mildew",
        "wife",
        "pot",
        "Tumid",
        "frump",
    ]);

    let legal_words = filter_legal(&puzzle, &dictionary);
    let result = solve(&legal_words, puzzle.letter_set());

    assert_eq!(chain_words(&result), vec!["FLOWERPOT", "TEDIUM"]);
    let chain = result.chain().unwrap();
    assert_eq!(chain.covered(), puzzle.letter_set());
    assert_eq!(chain.total_letters(), 15);
}

#[test]
fn solve_no_legal_words() {
    let puzzle = nyt_puzzle();

    let legal_words = filter_legal(&puzzle, &["XYZ", "FRO", "", "ab"]);

    assert!(legal_words.is_empty());
    assert_matches!(
        solve(&legal_words, puzzle.letter_set()),
        SolveResult::NoSolution
    );
}

#[test]
fn solve_missing_bridge_letter() {
    let puzzle = nyt_puzzle();
    // Nothing starts with 'R', so MOWER can never be followed.
    let legal_words = filter_legal(&puzzle, &["TEDIUM", "MOWER"]);

    assert_eq!(legal_words.len(), 2);
    assert_eq!(
        solve(&legal_words, puzzle.letter_set()),
        SolveResult::NoSolution
    );
}

#[test]
fn solve_puzzle_pipeline() {
    let puzzle: Puzzle = "WML FRO EIP TUD".parse().unwrap();

    let result = solve_puzzle(
        &puzzle,
        &["FLOWERPOT", "tedium", "FLOWERPOT"],
        &SolverConfig::default(),
    );

    assert_eq!(chain_words(&result), vec!["FLOWERPOT", "TEDIUM"]);
}

#[test]
fn solve_chains_are_valid_solutions() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        let puzzle = Puzzle::random(&mut rng);
        let dictionary: Vec<String> = (0..60)
            .map(|_| random_walk_word(&puzzle, &mut rng))
            .collect();
        let legal_words = filter_legal(&puzzle, &dictionary);

        if let SolveResult::Solved(chain) = solve(&legal_words, puzzle.letter_set()) {
            assert_eq!(chain.covered(), puzzle.letter_set());
            for pair in chain.words().windows(2) {
                assert_eq!(pair[0].chars().last(), pair[1].chars().next());
            }
            assert_matches!(puzzle.check_chain(chain.words()), Ok(_));
        }
    }
}

#[test]
fn solve_matches_brute_force() {
    let mut rng = StdRng::seed_from_u64(42);
    let config = SolverConfig {
        max_words: 3,
        ..SolverConfig::default()
    };
    let mut num_solved = 0;
    for round in 0..40 {
        let puzzle = Puzzle::random(&mut rng);
        let mut dictionary: Vec<String> = (0..40)
            .map(|_| random_walk_word(&puzzle, &mut rng))
            .collect();
        if round % 2 == 0 {
            dictionary.extend(planted_cover(&puzzle));
        }
        let legal_words = filter_legal(&puzzle, &dictionary);

        let expected = brute_force(&legal_words, puzzle.letter_set(), config.max_words);
        let result = solve_with_config(&legal_words, puzzle.letter_set(), &config);

        match expected {
            Some((num_words, total_letters, words)) => {
                num_solved += 1;
                let chain = result.chain().unwrap();
                assert_eq!(chain.len(), num_words);
                assert_eq!(chain.total_letters(), total_letters);
                assert_eq!(chain_words(&result), words);
            }
            None => assert_eq!(result, SolveResult::NoSolution),
        }
    }
    assert!(num_solved >= 20);
}

#[test]
fn solve_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..10 {
        let puzzle = Puzzle::random(&mut rng);
        let mut dictionary: Vec<String> = (0..80)
            .map(|_| random_walk_word(&puzzle, &mut rng))
            .collect();
        let first = solve_puzzle(&puzzle, &dictionary, &SolverConfig::default());
        let second = solve_puzzle(&puzzle, &dictionary, &SolverConfig::default());
        assert_eq!(first, second);

        let mut legal_words = filter_legal(&puzzle, &dictionary);
        legal_words.shuffle(&mut rng);
        legal_words.extend(legal_words.clone());
        assert_eq!(solve(&legal_words, puzzle.letter_set()), first);

        dictionary.reverse();
        assert_eq!(
            solve_puzzle(&puzzle, &dictionary, &SolverConfig::default()),
            first
        );
    }
}
