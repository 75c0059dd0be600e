use crate::data::PossibleWords;
use crate::data::Word;
use crate::data::WordBank;
use crate::results::*;
use crate::scorers::WordScorer;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use std::result::Result;
use tracing::debug;
use tracing::instrument;
use tracing::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Guesses words in order to solve a single Wordle.
pub trait Guesser {
    /// Resets the guesser to the start of a new game.
    fn reset(&mut self);

    /// Updates this guesser with information about a word.
    ///
    /// Returns an error if the result conflicts with earlier results, after which the guesser
    /// should be reset before it's used again.
    fn update(&mut self, result: &GuessResult) -> Result<(), WordleError>;

    /// Selects a new guess for the Wordle.
    ///
    /// Returns `None` if no known words are possible given the known restrictions imposed by
    /// previous calls to [`Self::update()`].
    fn select_next_guess(&mut self) -> Option<Word>;

    /// Provides read access to the remaining set of possible words in this guesser.
    fn possible_words(&self) -> &PossibleWords;
}

/// Attempts to guess the given word within the maximum number of guesses, using the given word
/// guesser.
///
/// The guesser is reset before the game starts.
///
/// Returns [`WordleError::NoGuessAvailable`] if the guesser runs out of possible words, which
/// happens if the objective isn't in the guesser's word bank. Returns
/// [`WordleError::GuesserUpdate`] if the guesser rejects the result of its own guess.
///
/// ```
/// use rs_wordle_narrower::*;
///
/// let bank = WordBank::from_iterator(&["abc", "bcd", "cde"]).unwrap();
/// let mut guesser = RandomGuesser::with_seed(&bank, 7);
///
/// let result = play_game_with_guesser(&Word::from("abc"), 4, &mut guesser).unwrap();
///
/// assert_eq!(result.status, GameStatus::Success);
/// ```
#[instrument(skip(objective, guesser), fields(objective = %objective))]
pub fn play_game_with_guesser<G: Guesser>(
    objective: &Word,
    max_num_guesses: u32,
    guesser: &mut G,
) -> Result<GameResult, WordleError> {
    guesser.reset();
    let mut turns: Vec<TurnData> = Vec::new();
    for _ in 0..max_num_guesses {
        let num_possible_words_before_guess = guesser.possible_words().len();
        let guess = guesser
            .select_next_guess()
            .ok_or(WordleError::NoGuessAvailable)?;
        let result = get_result_for_guess(objective, &guess)?;
        turns.push(TurnData {
            guess: guess.clone(),
            num_possible_words_before_guess,
        });
        if result.is_correct() {
            debug!(num_turns = turns.len(), "solved");
            return Ok(GameResult {
                status: GameStatus::Success,
                turns,
            });
        }
        guesser
            .update(&result)
            .map_err(|source| WordleError::GuesserUpdate {
                guess,
                source: Box::new(source),
            })?;
    }
    debug!(num_turns = turns.len(), "ran out of guesses");
    Ok(GameResult {
        status: GameStatus::Failure,
        turns,
    })
}

/// Guesses at random from the possible words that meet the restrictions.
#[derive(Debug, Clone)]
pub struct RandomGuesser {
    bank: WordBank,
    possible_words: PossibleWords,
    rng: StdRng,
}

impl RandomGuesser {
    /// Constructs a new `RandomGuesser` seeded from system entropy.
    pub fn new(bank: &WordBank) -> RandomGuesser {
        RandomGuesser::with_rng(bank, StdRng::from_entropy())
    }

    /// Constructs a new `RandomGuesser` whose guesses are reproducible for the given seed.
    pub fn with_seed(bank: &WordBank, seed: u64) -> RandomGuesser {
        RandomGuesser::with_rng(bank, StdRng::seed_from_u64(seed))
    }

    fn with_rng(bank: &WordBank, rng: StdRng) -> RandomGuesser {
        RandomGuesser {
            bank: bank.clone(),
            possible_words: bank.all_words(),
            rng,
        }
    }
}

impl Guesser for RandomGuesser {
    fn reset(&mut self) {
        self.possible_words = self.bank.all_words();
        debug!(num_words = self.possible_words.len(), "reset random guesser");
    }

    fn update(&mut self, result: &GuessResult) -> Result<(), WordleError> {
        self.possible_words.filter(result)
    }

    fn select_next_guess(&mut self) -> Option<Word> {
        if self.possible_words.is_empty() {
            return None;
        }
        let index = self.rng.gen_range(0..self.possible_words.len());
        let guess = self.possible_words.get(index).cloned();
        trace!(guess = ?guess, "selected random guess");
        guess
    }

    fn possible_words(&self) -> &PossibleWords {
        &self.possible_words
    }
}

/// Indicates which set of words to guess from. See [`MaxScoreGuesser::new()`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GuessFrom {
    /// Choose the next guess from any unguessed word in the whole word list.
    AllUnguessedWords,
    /// Choose the next guess from any possible word based on the current restrictions.
    PossibleWords,
}

/// A guess and the score it was given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredGuess {
    pub word: Word,
    pub score: i64,
}

/// Selects the next guess that maximizes the score according to the owned scorer.
///
/// See [`scorers`](crate::scorers) for available scorers.
#[derive(Debug, Clone)]
pub struct MaxScoreGuesser<S: WordScorer> {
    bank: WordBank,
    guess_mode: GuessFrom,
    possible_words: PossibleWords,
    unguessed_words: PossibleWords,
    scorer: S,
}

impl<S: WordScorer> MaxScoreGuesser<S> {
    /// Constructs a new `MaxScoreGuesser` that will guess the word with the maximum score
    /// according to the given [`WordScorer`]. This will only select words from the given
    /// [`WordBank`].
    ///
    /// If `guess_mode` is [`GuessFrom::AllUnguessedWords`], then the guesser may select words
    /// that can't be the answer, in order to learn more about the possible words. It only does so
    /// while more than two words remain possible, and only if the scores discriminate between
    /// words. If `guess_mode` is [`GuessFrom::PossibleWords`], it only guesses possible words.
    ///
    /// The scorer is reset to the bank's words.
    pub fn new(guess_mode: GuessFrom, bank: &WordBank, mut scorer: S) -> MaxScoreGuesser<S> {
        let possible_words = bank.all_words();
        scorer.reset(&possible_words);
        MaxScoreGuesser {
            bank: bank.clone(),
            guess_mode,
            unguessed_words: possible_words.clone(),
            possible_words,
            scorer,
        }
    }

    /// Returns up to the top `n` guesses, in descending order of score. Words with equal scores
    /// keep their word bank order.
    pub fn select_top_n_guesses(&self, n: usize) -> Vec<ScoredGuess> {
        if self.possible_words.is_empty() {
            return Vec::new();
        }
        let mut scored_guesses: Vec<ScoredGuess> = self
            .guess_pool()
            .iter()
            .map(|word| ScoredGuess {
                word: word.clone(),
                score: self.scorer.score_word(word),
            })
            .collect();
        scored_guesses.sort_by(|a, b| b.score.cmp(&a.score));
        scored_guesses.truncate(n);
        scored_guesses
    }

    fn should_guess_from_all(&self) -> bool {
        self.guess_mode == GuessFrom::AllUnguessedWords && self.possible_words.len() > 2
    }

    fn guess_pool(&self) -> &PossibleWords {
        if self.should_guess_from_all() {
            &self.unguessed_words
        } else {
            &self.possible_words
        }
    }

    /// Picks the best unguessed word, unless every unguessed word scores the same, in which case
    /// there's nothing to learn and the first possible word is picked instead.
    fn select_from_unguessed(&self) -> Option<&Word> {
        let mut scored = self
            .unguessed_words
            .iter()
            .map(|word| (word, self.scorer.score_word(word)));
        let Some((mut best_word, first_score)) = scored.next() else {
            return self.possible_words.get(0);
        };
        let mut best_score = first_score;
        let mut all_equal = true;
        for (word, score) in scored {
            if score != first_score {
                all_equal = false;
            }
            if score > best_score {
                best_score = score;
                best_word = word;
            }
        }
        if all_equal {
            return self.possible_words.get(0);
        }
        Some(best_word)
    }
}

impl<S: WordScorer> Guesser for MaxScoreGuesser<S> {
    fn reset(&mut self) {
        self.possible_words = self.bank.all_words();
        self.unguessed_words = self.possible_words.clone();
        self.scorer.reset(&self.possible_words);
        debug!(num_words = self.possible_words.len(), "reset max score guesser");
    }

    fn update(&mut self, result: &GuessResult) -> Result<(), WordleError> {
        self.unguessed_words.remove(&result.guess);
        self.possible_words.filter(result)?;
        self.scorer.update(&result.guess, &self.possible_words)
    }

    fn select_next_guess(&mut self) -> Option<Word> {
        if self.possible_words.is_empty() {
            return None;
        }
        let guess = if self.should_guess_from_all() {
            self.select_from_unguessed().cloned()
        } else {
            let scorer = &self.scorer;
            self.possible_words
                .maximizing(|word| scorer.score_word(word))
                .cloned()
        };
        if let Some(word) = &guess {
            trace!(guess = %word, score = self.scorer.score_word(word), "selected guess");
        }
        guess
    }

    fn possible_words(&self) -> &PossibleWords {
        &self.possible_words
    }
}
