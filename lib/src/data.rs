use crate::restrictions::WordRestrictions;
use crate::results::GuessResult;
use crate::results::WordleError;
use std::fmt;
use std::io::BufRead;
use std::ops::Deref;
use std::result::Result;
use std::slice;
use std::sync::Arc;
use tracing::debug;
use tracing::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A read-only word, stored as a sequence of letters (i.e. `char`s) instead of bytes.
///
/// Cloning a `Word` is cheap: clones share the same letters.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Word {
    letters: Arc<[char]>,
}

impl Word {
    /// Returns the number of letters in this word.
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    /// Returns true iff this word has no letters.
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Returns the letter at the given index, if there is one.
    pub fn at(&self, index: usize) -> Option<char> {
        self.letters.get(index).copied()
    }

    /// Returns the letters in this word.
    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    /// Counts how many times the given letter appears in this word.
    pub fn count_letter(&self, letter: char) -> usize {
        self.letters
            .iter()
            .filter(|word_letter| **word_letter == letter)
            .count()
    }
}

impl From<&str> for Word {
    fn from(value: &str) -> Self {
        Word {
            letters: value.chars().collect(),
        }
    }
}

impl From<String> for Word {
    fn from(value: String) -> Self {
        Word::from(value.as_str())
    }
}

impl AsRef<[char]> for Word {
    fn as_ref(&self) -> &[char] {
        &self.letters
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.letters
            .iter()
            .try_for_each(|letter| fmt::Write::write_char(f, *letter))
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word(\"{}\")", self)
    }
}

#[cfg(feature = "serde")]
impl Serialize for Word {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Word {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Word::from)
    }
}

/// Contains all the possible words for this Wordle game.
///
/// The bank is immutable once built, and cheap to clone.
#[derive(Debug, Clone)]
pub struct WordBank {
    all_words: Arc<[Word]>,
    word_length: usize,
}

impl WordBank {
    /// Constructs a new `WordBank` struct by reading words from the given reader.
    ///
    /// The reader should provide one word per line. Each word is trimmed and converted to lower
    /// case, and empty lines are skipped. At least one word must be provided, and all words must
    /// have the same length.
    ///
    /// ```
    /// use rs_wordle_narrower::WordBank;
    /// use std::io::Cursor;
    ///
    /// let bank = WordBank::from_reader(Cursor::new("abc\n\nDEF \n")).unwrap();
    ///
    /// assert_eq!(bank.len(), 2);
    /// assert_eq!(bank.word_length(), 3);
    /// ```
    pub fn from_reader<R: BufRead>(word_reader: R) -> Result<Self, WordleError> {
        let words = word_reader
            .lines()
            .collect::<Result<Vec<String>, std::io::Error>>()?;
        WordBank::from_iterator(words)
    }

    /// Constructs a new `WordBank` struct using the words from the given iterator.
    ///
    /// Each word is trimmed and converted to lower case, and empty words are skipped. At least one
    /// word must be provided, and all words must have the same length.
    pub fn from_iterator<S, I>(words: I) -> Result<Self, WordleError>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = S>,
    {
        let mut all_words: Vec<Word> = Vec::new();
        for word in words {
            let normalized = word.as_ref().trim().to_lowercase();
            if normalized.is_empty() {
                continue;
            }
            let word = Word::from(normalized);
            if let Some(first_word) = all_words.first() {
                if first_word.len() != word.len() {
                    return Err(WordleError::InconsistentWordLengths {
                        expected: first_word.len(),
                        actual: word.len(),
                    });
                }
            }
            all_words.push(word);
        }
        let word_length = all_words
            .first()
            .map(Word::len)
            .ok_or(WordleError::EmptyWordBank)?;
        debug!(num_words = all_words.len(), word_length, "built word bank");
        Ok(WordBank {
            all_words: all_words.into(),
            word_length,
        })
    }

    /// Returns the number of letters in each word in this word bank.
    pub fn word_length(&self) -> usize {
        self.word_length
    }

    /// Returns all the words in this bank as a fresh set of possible words.
    pub fn all_words(&self) -> PossibleWords {
        PossibleWords::new(&self.all_words, self.word_length)
    }
}

impl Deref for WordBank {
    type Target = [Word];

    fn deref(&self) -> &Self::Target {
        &self.all_words
    }
}

/// The words that are still possible given every [`GuessResult`] seen so far.
///
/// Words keep the order of the [`WordBank`] they came from.
#[derive(Debug, Clone)]
pub struct PossibleWords {
    words: Vec<Word>,
    restrictions: WordRestrictions,
}

impl PossibleWords {
    fn new(words: &[Word], word_length: usize) -> PossibleWords {
        PossibleWords {
            words: words.to_vec(),
            restrictions: WordRestrictions::new(word_length),
        }
    }

    /// Returns the number of possible words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true iff there are no possible words left.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Retrieves the word at the given index.
    pub fn get(&self, index: usize) -> Option<&Word> {
        self.words.get(index)
    }

    pub fn iter(&self) -> slice::Iter<'_, Word> {
        self.words.iter()
    }

    pub fn contains(&self, word: &Word) -> bool {
        self.words.contains(word)
    }

    /// The accumulated restrictions that every remaining word satisfies.
    pub fn restrictions(&self) -> &WordRestrictions {
        &self.restrictions
    }

    /// Filters the possible words based on the given [`GuessResult`].
    ///
    /// Results from multiple calls to this method are accumulated to filter as many words as
    /// possible. If the result conflicts with earlier results, this returns
    /// [`WordleError::ConflictingRestriction`], after which this object should be discarded.
    pub fn filter(&mut self, result: &GuessResult) -> Result<(), WordleError> {
        self.restrictions.update(result)?;
        let num_before = self.words.len();
        let restrictions = &self.restrictions;
        self.words.retain(|word| restrictions.is_satisfied_by(word));
        trace!(
            guess = %result.guess,
            num_before,
            num_after = self.words.len(),
            "filtered possible words"
        );
        Ok(())
    }

    /// Removes the given word, if present. The restrictions are not changed.
    ///
    /// Returns true if the word was present and has now been removed.
    pub fn remove(&mut self, word: &Word) -> bool {
        match self.words.iter().position(|other| other == word) {
            Some(index) => {
                self.words.remove(index);
                true
            }
            None => false,
        }
    }

    /// Returns the word that maximizes the given function. If multiple words share the maximum,
    /// the earliest one wins.
    ///
    /// Returns `None` if there are no possible words.
    pub fn maximizing<F>(&self, mut score_fn: F) -> Option<&Word>
    where
        F: FnMut(&Word) -> i64,
    {
        let mut words = self.words.iter();
        let mut best_word = words.next()?;
        let mut best_score = score_fn(best_word);
        for word in words {
            let score = score_fn(word);
            if score > best_score {
                best_score = score;
                best_word = word;
            }
        }
        Some(best_word)
    }
}

impl<'a> IntoIterator for &'a PossibleWords {
    type Item = &'a Word;
    type IntoIter = slice::Iter<'a, Word>;

    fn into_iter(self) -> Self::IntoIter {
        self.words.iter()
    }
}
