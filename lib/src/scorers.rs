use crate::data::PossibleWords;
use crate::data::Word;
use crate::data::WordBank;
use crate::results::get_result_for_guess;
use crate::results::CompressedGuessResult;
use crate::results::WordleError;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::result::Result;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;
use tracing::instrument;
use tracing::warn;

/// Gives words a score, where the maximum score indicates the best guess.
///
/// Scorers are cloned to get an independent continuation, for example to play several games from
/// the same precomputed state.
pub trait WordScorer {
    /// Restores the scorer to its state at the start of a game, with the given possible words.
    fn reset(&mut self, possible_words: &PossibleWords);
    /// Updates the scorer with the latest guess and the updated set of possible words.
    fn update(
        &mut self,
        latest_guess: &Word,
        possible_words: &PossibleWords,
    ) -> Result<(), WordleError>;
    /// Determines a score for the given word. The higher the score, the better the guess.
    ///
    /// Scoring the same word twice without an intervening update returns the same score.
    fn score_word(&self, word: &Word) -> i64;
}

/// Gives every word in the bank a random score, redrawn after every reset and update.
///
/// This is mostly useful as a baseline for comparing other scorers.
#[derive(Debug, Clone)]
pub struct RandomScorer {
    bank: WordBank,
    rng: StdRng,
    scores: HashMap<Word, i64>,
}

impl RandomScorer {
    /// Constructs a `RandomScorer` seeded from system entropy.
    pub fn new(bank: &WordBank) -> RandomScorer {
        RandomScorer::with_rng(bank, StdRng::from_entropy())
    }

    /// Constructs a `RandomScorer` whose scores are reproducible for the given seed.
    pub fn with_seed(bank: &WordBank, seed: u64) -> RandomScorer {
        RandomScorer::with_rng(bank, StdRng::seed_from_u64(seed))
    }

    fn with_rng(bank: &WordBank, rng: StdRng) -> RandomScorer {
        let mut scorer = RandomScorer {
            bank: bank.clone(),
            rng,
            scores: HashMap::with_capacity(bank.len()),
        };
        scorer.redraw();
        scorer
    }

    fn redraw(&mut self) {
        for word in self.bank.iter() {
            self.scores
                .insert(word.clone(), self.rng.gen_range(0..1_000_000));
        }
    }
}

impl WordScorer for RandomScorer {
    fn reset(&mut self, _possible_words: &PossibleWords) {
        self.redraw();
    }

    fn update(
        &mut self,
        _latest_guess: &Word,
        _possible_words: &PossibleWords,
    ) -> Result<(), WordleError> {
        self.redraw();
        Ok(())
    }

    fn score_word(&self, word: &Word) -> i64 {
        self.scores.get(word).copied().unwrap_or(0)
    }
}

/// Tunes the first-round precomputation of [`MaxEliminationsScorer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrecomputeOptions {
    /// How many guesses each unit of parallel work scores.
    pub chunk_size: NonZeroUsize,
    /// The number of worker threads. If `None`, rayon's global pool is used, which is sized to the
    /// available parallelism.
    pub num_threads: Option<NonZeroUsize>,
}

impl Default for PrecomputeOptions {
    fn default() -> Self {
        PrecomputeOptions {
            chunk_size: NonZeroUsize::new(64).unwrap_or(NonZeroUsize::MIN),
            num_threads: None,
        }
    }
}

/// This calculates the expectation value for how many possible words will be eliminated by each
/// guess, and scores words by that expectation.
///
/// For `n` possible words, the possible words are grouped by the result they would give for the
/// scored guess. A group of size `k` leaves `k` words if the objective is in it, eliminating
/// `n - k`. The score is `1000 * sum(k * (n - k)) / n`, rounded down.
///
/// The first round is scored against every word in the bank, which costs *O*(*n*<sup>2</sup>) and
/// is precomputed in parallel on construction. Clones share that precomputation, so the scorer can
/// be constructed once and then cloned for each game. Later rounds are scored directly against the
/// remaining possible words.
///
/// ```
/// use rs_wordle_narrower::*;
/// use rs_wordle_narrower::scorers::MaxEliminationsScorer;
///
/// let bank = WordBank::from_iterator(&["abc", "def", "ghi"]).unwrap();
/// let scorer = MaxEliminationsScorer::new(&bank).unwrap();
/// let mut guesser = MaxScoreGuesser::new(GuessFrom::AllUnguessedWords, &bank, scorer);
///
/// assert!(guesser.select_next_guess().is_some());
/// ```
#[derive(Debug, Clone)]
pub struct MaxEliminationsScorer {
    possible_words: Vec<Word>,
    first_round_scores: Arc<HashMap<Word, i64>>,
    is_first_round: bool,
}

impl MaxEliminationsScorer {
    /// Constructs a `MaxEliminationsScorer` with the default [`PrecomputeOptions`]. **Be careful,
    /// this is expensive to compute!**
    pub fn new(bank: &WordBank) -> Result<MaxEliminationsScorer, WordleError> {
        MaxEliminationsScorer::with_options(bank, PrecomputeOptions::default())
    }

    /// Constructs a `MaxEliminationsScorer`, precomputing the first-round scores as configured.
    ///
    /// Returns [`WordleError::WordTooLong`] if the bank's words can't be scored, or
    /// [`WordleError::ThreadPool`] if a dedicated pool was requested and couldn't be built.
    #[instrument(skip(bank), fields(num_words = bank.len()))]
    pub fn with_options(
        bank: &WordBank,
        options: PrecomputeOptions,
    ) -> Result<MaxEliminationsScorer, WordleError> {
        let start_time = Instant::now();
        debug!("precomputing first-round scores");
        let words: &[Word] = bank;
        let scores = match options.num_threads {
            Some(num_threads) => ThreadPoolBuilder::new()
                .num_threads(num_threads.get())
                .build()?
                .install(|| precompute_scores(words, options.chunk_size))?,
            None => precompute_scores(words, options.chunk_size)?,
        };
        debug!(
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "finished precomputing first-round scores"
        );
        let first_round_scores: HashMap<Word, i64> =
            words.iter().cloned().zip(scores).collect();
        Ok(MaxEliminationsScorer::from_first_round_scores(
            bank,
            first_round_scores,
        ))
    }

    /// Constructs a `MaxEliminationsScorer` from a table previously returned by
    /// [`first_round_scores`](Self::first_round_scores), skipping the precomputation.
    ///
    /// Words missing from the table are scored on demand.
    pub fn from_first_round_scores(
        bank: &WordBank,
        first_round_scores: HashMap<Word, i64>,
    ) -> MaxEliminationsScorer {
        MaxEliminationsScorer {
            possible_words: bank.to_vec(),
            first_round_scores: Arc::new(first_round_scores),
            is_first_round: true,
        }
    }

    /// The precomputed first-round score of every word in the bank.
    pub fn first_round_scores(&self) -> &HashMap<Word, i64> {
        &self.first_round_scores
    }
}

impl WordScorer for MaxEliminationsScorer {
    fn reset(&mut self, possible_words: &PossibleWords) {
        self.possible_words = possible_words.iter().cloned().collect();
        self.is_first_round = true;
    }

    fn update(
        &mut self,
        _latest_guess: &Word,
        possible_words: &PossibleWords,
    ) -> Result<(), WordleError> {
        self.possible_words = possible_words.iter().cloned().collect();
        self.is_first_round = false;
        Ok(())
    }

    fn score_word(&self, word: &Word) -> i64 {
        if self.is_first_round {
            if let Some(score) = self.first_round_scores.get(word) {
                return *score;
            }
        }
        match compute_expected_eliminations(word, &self.possible_words) {
            Ok(score) => score,
            Err(error) => {
                warn!(word = %word, %error, "unable to score word");
                0
            }
        }
    }
}

/// Scores each word against all the words, in parallel chunks. Each chunk writes only its own
/// slots of the result.
fn precompute_scores(words: &[Word], chunk_size: NonZeroUsize) -> Result<Vec<i64>, WordleError> {
    let chunk_size = chunk_size.get();
    debug!(
        num_words = words.len(),
        chunk_size,
        num_threads = rayon::current_num_threads(),
        "scoring all words"
    );
    let mut scores = vec![0i64; words.len()];
    // Stops handing out chunks after the first error, but waits for running chunks to finish.
    scores
        .par_chunks_mut(chunk_size)
        .enumerate()
        .try_for_each(|(chunk_index, chunk)| {
            let chunk_words = words.iter().skip(chunk_index * chunk_size);
            for (slot, word) in chunk.iter_mut().zip(chunk_words) {
                *slot = compute_expected_eliminations(word, words)?;
            }
            Ok::<(), WordleError>(())
        })?;
    Ok(scores)
}

fn compute_expected_eliminations(
    word: &Word,
    possible_words: &[Word],
) -> Result<i64, WordleError> {
    let num_possible_words = possible_words.len();
    if num_possible_words == 0 {
        return Ok(0);
    }
    let mut matching_results: HashMap<CompressedGuessResult, usize> = HashMap::new();
    for possible_word in possible_words {
        let guess_result = get_result_for_guess(possible_word, word)?;
        let compressed_result = CompressedGuessResult::from_results(&guess_result.results)?;
        *matching_results.entry(compressed_result).or_insert(0) += 1;
    }
    let sum = matching_results
        .into_values()
        .fold(0, |acc, num_matched| {
            acc + num_matched * (num_possible_words - num_matched)
        });
    Ok((sum * 1000 / num_possible_words) as i64)
}
