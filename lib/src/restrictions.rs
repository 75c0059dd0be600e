use crate::data::Word;
use crate::results::GuessResult;
use crate::results::LetterResult;
use crate::results::WordleError;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::collections::HashSet;
use std::fmt;
use std::iter::zip;
use std::result::Result;

/// A letter along with its location in the word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocatedLetter {
    pub letter: char,
    /// The zero-based location (i.e. index) for this letter in a word.
    pub location: usize,
}

impl LocatedLetter {
    /// Constructs a new `LocatedLetter`.
    pub fn new(letter: char, location: usize) -> LocatedLetter {
        LocatedLetter { letter, location }
    }
}

/// Indicates if a letter is known to be in a given location or not.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum LocatedLetterState {
    Unknown,
    Here,
    NotHere,
}

impl fmt::Display for LocatedLetterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LocatedLetterState::Unknown => "unknown",
            LocatedLetterState::Here => "here",
            LocatedLetterState::NotHere => "not here",
        })
    }
}

/// Indicates information about a letter that is in the word.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct PresentLetter {
    /// If known, the letter must appear exactly this many times in the word.
    maybe_required_count: Option<usize>,
    /// The minimum number of times this letter must appear in the word.
    min_count: usize,
    /// The number of locations we know the letter must appear.
    num_here: usize,
    /// The number of locations we know the letter must not appear.
    num_not_here: usize,
    /// The status of the letter at each location in the word.
    located_state: Box<[LocatedLetterState]>,
}

impl PresentLetter {
    /// Constructs a `PresentLetter` for use with words of the given length.
    pub fn new(word_length: usize) -> PresentLetter {
        PresentLetter {
            maybe_required_count: None,
            min_count: 1,
            num_here: 0,
            num_not_here: 0,
            located_state: vec![LocatedLetterState::Unknown; word_length].into_boxed_slice(),
        }
    }

    /// Returns whether the letter must be in, or not in, the given location, or if that is not yet
    /// known.
    pub fn state(&self, index: usize) -> LocatedLetterState {
        self.located_state
            .get(index)
            .copied()
            .unwrap_or(LocatedLetterState::Unknown)
    }

    /// Returns the required number of times this letter must appear in the word, if this is known.
    pub fn maybe_required_count(&self) -> Option<usize> {
        self.maybe_required_count
    }

    /// Returns the minimum number of times this letter must appear in the word.
    pub fn min_count(&self) -> usize {
        self.min_count
    }

    pub fn num_here(&self) -> usize {
        self.num_here
    }

    pub fn num_not_here(&self) -> usize {
        self.num_not_here
    }

    /// Sets that this letter must be at the given index.
    ///
    /// If the required count for this letter is known, then this may fill any remaining `Unknown`
    /// locations with either `Here` or `NotHere` accordingly.
    ///
    /// This returns [`WordleError::ConflictingRestriction`] if this letter is already known not to
    /// be at the given index.
    pub fn set_must_be_at(&mut self, index: usize) -> Result<(), WordleError> {
        let previous = self.checked_state(index)?;
        match previous {
            LocatedLetterState::Here => return Ok(()),
            LocatedLetterState::NotHere => {
                return Err(WordleError::ConflictingRestriction(format!(
                    "can't set letter to {} at index {} since it's already marked as {}",
                    LocatedLetterState::Here,
                    index,
                    previous
                )))
            }
            LocatedLetterState::Unknown => {}
        }
        self.located_state[index] = LocatedLetterState::Here;
        self.num_here += 1;
        if self.num_here > self.min_count {
            self.min_count = self.num_here;
        }
        if let Some(count) = self.maybe_required_count {
            if self.num_here == count {
                // If the count has been met, then this letter doesn't appear anywhere else.
                self.set_unknowns_to(LocatedLetterState::NotHere);
            } else if self.max_possible_num_here() == count {
                // If the letter must be in all possible remaining spaces, set them to here.
                self.set_unknowns_to(LocatedLetterState::Here);
            }
        } else {
            // No unknowns are left if this is full, so there is nothing else to update.
            self.set_required_count_if_full();
        }
        Ok(())
    }

    /// Sets that this letter must not be at the given index.
    ///
    /// If setting this leaves only as many `Here` and `Unknown` locations as the value of
    /// `min_count`, then this sets the `Unknown` locations to `Here`.
    ///
    /// This returns [`WordleError::ConflictingRestriction`] if this letter is already known to be
    /// at the given index, or if too few locations would remain for the letter.
    pub fn set_must_not_be_at(&mut self, index: usize) -> Result<(), WordleError> {
        let previous = self.checked_state(index)?;
        match previous {
            LocatedLetterState::NotHere => return Ok(()),
            LocatedLetterState::Here => {
                return Err(WordleError::ConflictingRestriction(format!(
                    "can't set letter to {} at index {} since it's already marked as {}",
                    LocatedLetterState::NotHere,
                    index,
                    previous
                )))
            }
            LocatedLetterState::Unknown => {}
        }
        // The location is unknown, so it currently counts towards the possible locations.
        let max_possible_here = self.max_possible_num_here() - 1;
        if max_possible_here < self.min_count {
            return Err(WordleError::ConflictingRestriction(format!(
                "can't set letter to {} at index {} since only {} locations would remain for at \
                 least {} occurrences",
                LocatedLetterState::NotHere,
                index,
                max_possible_here,
                self.min_count
            )));
        }
        self.located_state[index] = LocatedLetterState::NotHere;
        self.num_not_here += 1;
        if max_possible_here == self.min_count {
            // If the letter must be in all possible remaining spaces, set them to `Here`.
            self.maybe_required_count = Some(self.min_count);
            if self.num_here < self.min_count {
                self.set_unknowns_to(LocatedLetterState::Here);
            }
        }
        Ok(())
    }

    /// Sets the exact number of times this letter appears in the word.
    ///
    /// Returns [`WordleError::ConflictingRestriction`] if the required count is already set to a
    /// different value, if the `min_count` is known to be higher than the provided value, or if
    /// fewer than `count` locations are still possible.
    pub fn set_required_count(&mut self, count: usize) -> Result<(), WordleError> {
        if let Some(existing_count) = self.maybe_required_count {
            if existing_count != count {
                return Err(WordleError::ConflictingRestriction(format!(
                    "can't set required count to {} since it's already {}",
                    count, existing_count
                )));
            }
            return Ok(());
        }
        if self.min_count > count {
            return Err(WordleError::ConflictingRestriction(format!(
                "can't set required count to {} since that would be less than the minimum count \
                 ({})",
                count, self.min_count
            )));
        }
        let max_possible_num_here = self.max_possible_num_here();
        if max_possible_num_here < count {
            return Err(WordleError::ConflictingRestriction(format!(
                "can't set required count to {} since there aren't enough possible locations \
                 (only {})",
                count, max_possible_num_here
            )));
        }
        self.min_count = count;
        self.maybe_required_count = Some(count);
        if self.num_here == count {
            self.set_unknowns_to(LocatedLetterState::NotHere);
        } else if max_possible_num_here == count {
            self.set_unknowns_to(LocatedLetterState::Here);
        }
        Ok(())
    }

    /// If count is higher than the current min count, this bumps it up to the provided value and
    /// modifies the known data as needed.
    ///
    /// Returns [`WordleError::ConflictingRestriction`] if it would be impossible for `count`
    /// locations to be marked `Here` given what is already known about the word.
    pub fn possibly_bump_min_count(&mut self, count: usize) -> Result<(), WordleError> {
        if self.min_count >= count {
            return Ok(());
        }
        if let Some(required_count) = self.maybe_required_count {
            return Err(WordleError::ConflictingRestriction(format!(
                "can't set min count to {} since the letter must appear exactly {} times",
                count, required_count
            )));
        }
        let max_possible_num_here = self.max_possible_num_here();
        if max_possible_num_here < count {
            return Err(WordleError::ConflictingRestriction(format!(
                "can't set min count to {} when there are only {} possible locations",
                count, max_possible_num_here
            )));
        }
        self.min_count = count;
        if max_possible_num_here == count && self.num_here < count {
            // If all possible unknowns must be here, set them.
            self.set_unknowns_to(LocatedLetterState::Here);
            self.maybe_required_count = Some(count);
        }
        Ok(())
    }

    /// Merges the information known in the other object into this one.
    ///
    /// Returns [`WordleError::ConflictingRestriction`] if they contain incompatible information.
    pub fn merge(&mut self, other: &PresentLetter) -> Result<(), WordleError> {
        if self.located_state.len() != other.located_state.len() {
            return Err(WordleError::LengthMismatch {
                expected: self.located_state.len(),
                actual: other.located_state.len(),
            });
        }
        if let Some(count) = other.maybe_required_count {
            self.set_required_count(count)?;
        } else if other.min_count > self.min_count {
            self.possibly_bump_min_count(other.min_count)?;
        }

        for (index, state) in other.located_state.iter().enumerate() {
            if self.located_state[index] == *state {
                continue;
            }
            match state {
                LocatedLetterState::Here => self.set_must_be_at(index)?,
                LocatedLetterState::NotHere => self.set_must_not_be_at(index)?,
                LocatedLetterState::Unknown => {}
            }
        }
        Ok(())
    }

    fn checked_state(&self, index: usize) -> Result<LocatedLetterState, WordleError> {
        self.located_state
            .get(index)
            .copied()
            .ok_or(WordleError::LengthMismatch {
                expected: self.located_state.len(),
                actual: index + 1,
            })
    }

    fn max_possible_num_here(&self) -> usize {
        self.located_state.len() - self.num_not_here
    }

    fn set_unknowns_to(&mut self, new_state: LocatedLetterState) {
        let mut num_updated = 0;
        for state in self.located_state.iter_mut() {
            if *state == LocatedLetterState::Unknown {
                *state = new_state;
                num_updated += 1;
            }
        }
        match new_state {
            LocatedLetterState::Here => self.num_here += num_updated,
            LocatedLetterState::NotHere => self.num_not_here += num_updated,
            LocatedLetterState::Unknown => {}
        }
    }

    fn set_required_count_if_full(&mut self) {
        if self.num_here + self.num_not_here == self.located_state.len() {
            self.maybe_required_count = Some(self.num_here);
        }
    }
}

/// Indicates the known restrictions that apply to a letter at a given location.
///
/// See [`WordRestrictions`].
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum LetterRestriction {
    /// Nothing is known about the letter.
    Unknown,
    /// The letter goes here.
    Here,
    /// The letter is in the word and might be here.
    PresentMaybeHere,
    /// The letter is in the word but not here.
    PresentNotHere,
    /// The letter is not in the word.
    NotPresent,
}

/// Defines letter restrictions that a word must adhere to, such as "the first letter of the word
/// must be 'a'".
///
/// Restrictions are derived from [`GuessResult`]s. A letter is either tracked as present (with
/// per-location knowledge) or recorded as not present, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordRestrictions {
    word_length: usize,
    present_letters: HashMap<char, PresentLetter>,
    not_present_letters: HashSet<char>,
}

impl WordRestrictions {
    /// Creates a `WordRestrictions` object for the given word length with all letters unknown.
    pub fn new(word_length: usize) -> WordRestrictions {
        WordRestrictions {
            word_length,
            present_letters: HashMap::new(),
            not_present_letters: HashSet::new(),
        }
    }

    /// Returns the restrictions imposed by the given result.
    pub fn from_result(result: &GuessResult) -> Result<WordRestrictions, WordleError> {
        let mut restrictions = WordRestrictions::new(result.guess.len());
        restrictions.update(result)?;
        Ok(restrictions)
    }

    pub fn word_length(&self) -> usize {
        self.word_length
    }

    /// Adds restrictions arising from the given result.
    ///
    /// Returns an error if the result is incompatible with the existing restrictions. Applying the
    /// same result twice has no further effect.
    pub fn update(&mut self, guess_result: &GuessResult) -> Result<(), WordleError> {
        for actual in [guess_result.guess.len(), guess_result.results.len()] {
            if actual != self.word_length {
                return Err(WordleError::LengthMismatch {
                    expected: self.word_length,
                    actual,
                });
            }
        }
        for (index, (letter, result)) in zip(
            guess_result.guess.letters(),
            guess_result.results.iter(),
        )
        .enumerate()
        {
            match result {
                LetterResult::Correct => self.set_letter_here(*letter, index, guess_result)?,
                LetterResult::PresentNotHere => {
                    self.set_letter_present_not_here(*letter, index, guess_result)?
                }
                LetterResult::NotPresent => {
                    self.set_letter_not_present(*letter, index, guess_result)?
                }
                LetterResult::Unknown => {}
            }
        }
        Ok(())
    }

    /// Adds the given restrictions to this restriction.
    ///
    /// Returns an error if the restrictions are incompatible.
    pub fn merge(&mut self, other: &WordRestrictions) -> Result<(), WordleError> {
        if self.word_length != other.word_length {
            return Err(WordleError::LengthMismatch {
                expected: self.word_length,
                actual: other.word_length,
            });
        }
        for not_present_letter in &other.not_present_letters {
            if self.present_letters.contains_key(not_present_letter) {
                return Err(WordleError::ConflictingRestriction(format!(
                    "can't merge restrictions: {} is both present and not present",
                    not_present_letter
                )));
            }
            self.not_present_letters.insert(*not_present_letter);
        }
        for (letter, presence) in &other.present_letters {
            if self.not_present_letters.contains(letter) {
                return Err(WordleError::ConflictingRestriction(format!(
                    "can't merge restrictions: {} is both present and not present",
                    letter
                )));
            }
            match self.present_letters.entry(*letter) {
                Entry::Occupied(mut known_presence) => known_presence.get_mut().merge(presence)?,
                Entry::Vacant(entry) => {
                    entry.insert(presence.clone());
                }
            }
        }
        Ok(())
    }

    /// Returns `true` iff the given word satisfies these restrictions.
    pub fn is_satisfied_by(&self, word: &Word) -> bool {
        word.len() == self.word_length
            && self.present_letters.iter().all(|(letter, presence)| {
                let mut count_found = 0;
                for (index, word_letter) in word.letters().iter().enumerate() {
                    if word_letter == letter {
                        count_found += 1;
                        if presence.state(index) == LocatedLetterState::NotHere {
                            return false;
                        }
                    } else if presence.state(index) == LocatedLetterState::Here {
                        return false;
                    }
                }
                match presence.maybe_required_count() {
                    Some(required_count) => count_found == required_count,
                    None => count_found >= presence.min_count(),
                }
            })
            && word
                .letters()
                .iter()
                .all(|letter| !self.not_present_letters.contains(letter))
    }

    /// Returns true iff the exact state of the given letter at the given location is already known.
    pub fn is_state_known(&self, located_letter: &LocatedLetter) -> bool {
        match self.present_letters.get(&located_letter.letter) {
            Some(presence) => presence.state(located_letter.location) != LocatedLetterState::Unknown,
            None => self.not_present_letters.contains(&located_letter.letter),
        }
    }

    /// Returns the current known state of this letter at this location.
    pub fn state(&self, located_letter: &LocatedLetter) -> LetterRestriction {
        if let Some(presence) = self.present_letters.get(&located_letter.letter) {
            return match presence.state(located_letter.location) {
                LocatedLetterState::Here => LetterRestriction::Here,
                LocatedLetterState::NotHere => LetterRestriction::PresentNotHere,
                LocatedLetterState::Unknown => LetterRestriction::PresentMaybeHere,
            };
        }
        if self.not_present_letters.contains(&located_letter.letter) {
            return LetterRestriction::NotPresent;
        }
        LetterRestriction::Unknown
    }

    fn set_letter_here(
        &mut self,
        letter: char,
        location: usize,
        result: &GuessResult,
    ) -> Result<(), WordleError> {
        self.check_not_known_absent(letter, location)?;
        // Only one letter can go in each location.
        for (other_letter, other_presence) in self.present_letters.iter_mut() {
            if *other_letter != letter {
                other_presence.set_must_not_be_at(location)?;
            }
        }
        let num_times_present = count_num_times_in_guess(letter, result);
        let presence = self.presence_mut(letter)?;
        presence.set_must_be_at(location)?;
        presence.possibly_bump_min_count(num_times_present)
    }

    fn set_letter_present_not_here(
        &mut self,
        letter: char,
        location: usize,
        result: &GuessResult,
    ) -> Result<(), WordleError> {
        self.check_not_known_absent(letter, location)?;
        let num_times_present = count_num_times_in_guess(letter, result);
        let presence = self.presence_mut(letter)?;
        presence.set_must_not_be_at(location)?;
        // This is only a lower bound. If the same guess marked this letter `NotPresent` elsewhere,
        // that location sets the exact count.
        presence.possibly_bump_min_count(num_times_present)
    }

    fn set_letter_not_present(
        &mut self,
        letter: char,
        location: usize,
        result: &GuessResult,
    ) -> Result<(), WordleError> {
        let num_times_present = count_num_times_in_guess(letter, result);
        if num_times_present == 0 && !self.present_letters.contains_key(&letter) {
            self.not_present_letters.insert(letter);
            return Ok(());
        }
        // The letter is in the word, but only as many times as this guess marked it `Correct` or
        // `PresentNotHere`.
        let presence = self.presence_mut(letter)?;
        presence.set_must_not_be_at(location)?;
        presence.set_required_count(num_times_present)
    }

    fn check_not_known_absent(&self, letter: char, location: usize) -> Result<(), WordleError> {
        if self.not_present_letters.contains(&letter) {
            return Err(WordleError::ConflictingRestriction(format!(
                "can't mark {} as present at index {} since it's already known not to be in the \
                 word",
                letter, location
            )));
        }
        Ok(())
    }

    /// Retrieves the tracker for the given letter, creating it if needed. New trackers start out
    /// excluded from any location already claimed by another letter.
    fn presence_mut(&mut self, letter: char) -> Result<&mut PresentLetter, WordleError> {
        let word_length = self.word_length;
        let claimed_locations: Vec<usize> = if self.present_letters.contains_key(&letter) {
            Vec::new()
        } else {
            self.present_letters
                .values()
                .flat_map(|presence| {
                    (0..word_length)
                        .filter(move |index| presence.state(*index) == LocatedLetterState::Here)
                })
                .collect()
        };
        match self.present_letters.entry(letter) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let mut presence = PresentLetter::new(self.word_length);
                for location in claimed_locations {
                    presence.set_must_not_be_at(location)?;
                }
                Ok(entry.insert(presence))
            }
        }
    }
}

fn count_num_times_in_guess(letter: char, guess_result: &GuessResult) -> usize {
    zip(guess_result.guess.letters(), guess_result.results.iter())
        .filter(|(guess_letter, result)| {
            **guess_letter == letter && **result != LetterResult::NotPresent
        })
        .count()
}
