use clap::{Parser, Subcommand, ValueEnum};
use rs_wordle_narrower::scorers::{
    MaxEliminationsScorer, PrecomputeOptions, RandomScorer, WordScorer,
};
use rs_wordle_narrower::*;
use std::error::Error;
use std::fs::File;
use std::io;
use std::num::NonZeroUsize;
use std::process::ExitCode;
use std::time::Instant;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Narrows down a Wordle, where the computer guesses the word.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to a file that contains a list of possible words, with one word on each line.
    #[arg(short = 'f', long)]
    words_file: String,

    /// How to choose each guess.
    #[arg(short, long, value_enum, default_value_t = GuesserKind::MaxEliminations)]
    guesser: GuesserKind,

    /// Which words each guess may be chosen from.
    #[arg(long, value_enum, default_value_t = GuessMode::All)]
    guess_from: GuessMode,

    /// The maximum number of guesses before giving up.
    #[arg(long, default_value_t = 128)]
    max_guesses: u32,

    /// Seed for random choices, for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,

    /// Number of threads used to precompute first-round scores. Defaults to one per CPU.
    #[arg(long)]
    threads: Option<NonZeroUsize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a single game with the given word.
    Solve { word: String },
    /// Print the best opening guesses.
    Rank {
        /// How many guesses to print.
        #[arg(short = 'n', long, default_value_t = 10)]
        count: usize,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum GuesserKind {
    /// Guess at random among the possible words.
    Random,
    /// Guess the word expected to eliminate the most possible words.
    MaxEliminations,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum GuessMode {
    /// Guess from any word that hasn't been guessed yet.
    All,
    /// Guess only from the words that could still be the answer.
    Possible,
}

impl From<GuessMode> for GuessFrom {
    fn from(mode: GuessMode) -> Self {
        match mode {
            GuessMode::All => GuessFrom::AllUnguessedWords,
            GuessMode::Possible => GuessFrom::PossibleWords,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let start_time = Instant::now();
    info!(words_file = %args.words_file, "loading words");

    let words_reader = io::BufReader::new(File::open(&args.words_file)?);
    let word_bank = WordBank::from_reader(words_reader)?;
    info!("There are {} possible words.", word_bank.len());

    match &args.command {
        Command::Solve { word } => solve(&args, &word_bank, word)?,
        Command::Rank { count } => rank(&args, &word_bank, *count)?,
    }

    info!(
        "Command executed in {:.3}s.",
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}

fn solve(args: &Args, word_bank: &WordBank, word: &str) -> Result<(), Box<dyn Error>> {
    let objective = Word::from(word.trim().to_lowercase());
    if !word_bank.contains(&objective) {
        return Err(format!("\"{}\" is not in the word list", objective).into());
    }
    let result = match args.guesser {
        GuesserKind::Random => {
            let mut guesser = match args.seed {
                Some(seed) => RandomGuesser::with_seed(word_bank, seed),
                None => RandomGuesser::new(word_bank),
            };
            play_game_with_guesser(&objective, args.max_guesses, &mut guesser)?
        }
        GuesserKind::MaxEliminations => {
            let scorer = max_eliminations_scorer(args, word_bank)?;
            let mut guesser = MaxScoreGuesser::new(args.guess_from.into(), word_bank, scorer);
            play_game_with_guesser(&objective, args.max_guesses, &mut guesser)?
        }
    };

    match result.status {
        GameStatus::Success => println!("Solved it! It took me {} guesses.", result.turns.len()),
        GameStatus::Failure => println!(
            "I still couldn't solve it after {} guesses :(",
            result.turns.len()
        ),
    }
    for turn in &result.turns {
        println!(
            "\t{} ({} possible words)",
            turn.guess, turn.num_possible_words_before_guess
        );
    }
    Ok(())
}

fn rank(args: &Args, word_bank: &WordBank, count: usize) -> Result<(), Box<dyn Error>> {
    match args.guesser {
        GuesserKind::Random => {
            let scorer = match args.seed {
                Some(seed) => RandomScorer::with_seed(word_bank, seed),
                None => RandomScorer::new(word_bank),
            };
            print_top_guesses(
                &MaxScoreGuesser::new(args.guess_from.into(), word_bank, scorer),
                count,
            );
        }
        GuesserKind::MaxEliminations => {
            let scorer = max_eliminations_scorer(args, word_bank)?;
            print_top_guesses(
                &MaxScoreGuesser::new(args.guess_from.into(), word_bank, scorer),
                count,
            );
        }
    }
    Ok(())
}

fn max_eliminations_scorer(
    args: &Args,
    word_bank: &WordBank,
) -> Result<MaxEliminationsScorer, WordleError> {
    let options = PrecomputeOptions {
        num_threads: args.threads,
        ..PrecomputeOptions::default()
    };
    MaxEliminationsScorer::with_options(word_bank, options)
}

fn print_top_guesses<S: WordScorer>(guesser: &MaxScoreGuesser<S>, count: usize) {
    println!("|Guess|Score|");
    println!("|-----|-----|");
    for guess in guesser.select_top_n_guesses(count) {
        println!("|{}|{}|", guess.word, guess.score);
    }
}
