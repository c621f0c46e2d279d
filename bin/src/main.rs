use clap::{Parser, Subcommand};
use letter_boxed_solver::*;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::fs::File;
use std::io;
use std::time::Instant;

/// Solves Letter Boxed puzzles: finds the shortest chain of words that uses every letter on the
/// square.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to a file that contains a list of candidate words, with one word on each line.
    #[arg(short = 'f', long)]
    words_file: String,

    /// The maximum number of words allowed in a solution.
    #[arg(long, default_value_t = DEFAULT_MAX_WORDS)]
    max_words: usize,

    /// Stop searching after expanding this many search states.
    #[arg(long)]
    max_expansions: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Solve a single puzzle, given as four sides such as "WML-FRO-EIP-TUD".
    Solve { puzzle: Puzzle },
    /// List every word in the words file that can be played on the puzzle.
    Legal { puzzle: Puzzle },
    /// Check that the given words solve the puzzle, and compare them with the solver's answer.
    Check {
        puzzle: Puzzle,
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Solve randomly generated puzzles and report how many words each solution needed.
    Benchmark {
        /// How many puzzles to generate.
        #[arg(short = 'n', long, default_value_t = 100)]
        num_puzzles: usize,
        /// Seed for the puzzle generator, for repeatable runs.
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<(), LetterBoxedError> {
    env_logger::init();
    let start_time = Instant::now();
    let args = Args::parse();
    debug!("Command line options: {:?}", args);
    println!("File: {}", args.words_file);

    let words_reader = io::BufReader::new(File::open(&args.words_file)?);
    let word_bank = WordBank::from_reader(words_reader)?;
    println!("There are {} candidate words.", word_bank.len());

    let config = SolverConfig {
        max_words: args.max_words,
        max_expansions: args.max_expansions,
    };

    match args.command {
        Command::Solve { puzzle } => solve_single_puzzle(&puzzle, &word_bank, &config),
        Command::Legal { puzzle } => list_legal_words(&puzzle, &word_bank),
        Command::Check { puzzle, words } => check_words(&puzzle, &words, &word_bank, &config)?,
        Command::Benchmark { num_puzzles, seed } => {
            run_benchmark(num_puzzles, seed, &word_bank, &config)
        }
    }

    println!(
        "Command executed in {:.3}s.",
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}

fn solve_single_puzzle(puzzle: &Puzzle, word_bank: &WordBank, config: &SolverConfig) {
    match solve_puzzle(puzzle, word_bank, config) {
        SolveResult::Solved(chain) => print_chain(&chain),
        SolveResult::NoSolution => {
            println!(
                "No solution found for {} within {} words.",
                puzzle, config.max_words
            );
        }
    }
}

fn list_legal_words(puzzle: &Puzzle, word_bank: &WordBank) {
    let legal_words = filter_legal(puzzle, word_bank);
    println!("{} words can be played on {}:", legal_words.len(), puzzle);
    for word in legal_words.iter() {
        println!("\t{}", word.word());
    }
}

fn check_words(
    puzzle: &Puzzle,
    words: &[String],
    word_bank: &WordBank,
    config: &SolverConfig,
) -> Result<(), LetterBoxedError> {
    let given = puzzle.check_chain(words)?;
    println!("The given words solve {}.", puzzle);
    print_chain(&given);

    match solve_puzzle(puzzle, word_bank, config) {
        SolveResult::Solved(chain) => {
            if (chain.len(), chain.total_letters()) < (given.len(), given.total_letters()) {
                println!("I found a shorter solution:");
            } else {
                println!("My solution:");
            }
            print_chain(&chain);
        }
        SolveResult::NoSolution => println!("I couldn't find a solution with these words."),
    }
    Ok(())
}

fn print_chain(chain: &Chain) {
    println!(
        "Solved it with {} words and {} letters.",
        chain.len(),
        chain.total_letters()
    );
    for word in chain.words() {
        println!("\t{}", word);
    }
}

fn run_benchmark(
    num_puzzles: usize,
    seed: Option<u64>,
    word_bank: &WordBank,
    config: &SolverConfig,
) {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let puzzles: Vec<Puzzle> = (0..num_puzzles)
        .map(|_| Puzzle::random(&mut rng))
        .collect();
    info!("Generated {} puzzles.", puzzles.len());

    let results: Vec<SolveResult> = puzzles
        .par_iter()
        .map(|puzzle| solve_puzzle(puzzle, word_bank, config))
        .collect();

    let num_words_per_solution: Vec<usize> = results
        .iter()
        .filter_map(|result| result.chain().map(Chain::len))
        .collect();
    println!(
        "Solved {} of {} puzzles. Results:",
        num_words_per_solution.len(),
        num_puzzles
    );

    let mut num_puzzles_per_length: BTreeMap<usize, usize> = BTreeMap::new();
    for num_words in num_words_per_solution.iter() {
        *(num_puzzles_per_length.entry(*num_words).or_insert(0)) += 1;
    }

    println!("|Num words|Num puzzles|");
    println!("|---------|-----------|");
    for (num_words, count) in num_puzzles_per_length.iter() {
        println!("|{}|{}|", num_words, count);
    }
    println!("|none|{}|", num_puzzles - num_words_per_solution.len());

    if num_words_per_solution.is_empty() {
        return;
    }
    let average: f64 = num_words_per_solution.iter().sum::<usize>() as f64
        / num_words_per_solution.len() as f64;
    let std_dev: f64 = (num_words_per_solution
        .iter()
        .map(|num_words| (*num_words as f64 - average).powi(2))
        .sum::<f64>()
        / num_words_per_solution.len() as f64)
        .sqrt();

    println!(
        "\n**Average number of words:** {:.2} +/- {:.2}",
        average, std_dev
    );
}
