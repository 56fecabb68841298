use alloc::string::String;
use alloc::vec::Vec;
use core::time::Duration;
use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Words per category, and the selection size that triggers evaluation.
pub const GROUP_SIZE: usize = 4;

/// How long a one-away notice stays up before it is dismissed.
pub const NOTICE_DURATION: Duration = Duration::from_secs(2);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CategoryId(pub u16);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TokenId(pub u16);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NoticeId(pub u64);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub words: Vec<String>,
}

impl Category {
    pub fn new<S: Into<String>>(name: impl Into<String>, words: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.into(),
            words: words.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub word: String,
    pub category: CategoryId,
}

/// Validated category content: every word is a token owned by exactly one category.
#[derive(Clone, Debug)]
pub struct CategorySet {
    categories: Vec<Category>,
    tokens: Vec<Token>,
    by_word: HashMap<String, TokenId>,
}

impl CategorySet {
    pub fn new(categories: Vec<Category>) -> Result<Self> {
        let mut tokens = Vec::with_capacity(categories.len() * GROUP_SIZE);
        let mut by_word = HashMap::new();

        for (index, category) in categories.iter().enumerate() {
            if category.words.len() != GROUP_SIZE {
                return Err(PuzzleError::CategorySize(index));
            }
            let category_id = CategoryId(index.try_into().map_err(|_| PuzzleError::TooManyWords)?);
            for word in &category.words {
                let id = TokenId(
                    tokens
                        .len()
                        .try_into()
                        .map_err(|_| PuzzleError::TooManyWords)?,
                );
                if by_word.insert(word.clone(), id).is_some() {
                    return Err(PuzzleError::DuplicateWord);
                }
                tokens.push(Token {
                    word: word.clone(),
                    category: category_id,
                });
            }
        }

        Ok(Self {
            categories,
            tokens,
            by_word,
        })
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.get(usize::from(id.0))
    }

    pub fn token(&self, id: TokenId) -> Option<&Token> {
        self.tokens.get(usize::from(id.0))
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn token_ids(&self) -> impl Iterator<Item = TokenId> + '_ {
        (0..self.tokens.len()).filter_map(|index| index.try_into().ok().map(TokenId))
    }

    pub fn find_word(&self, word: &str) -> Option<TokenId> {
        self.by_word.get(word).copied()
    }

    pub fn word(&self, id: TokenId) -> &str {
        self.token(id).map_or("", |token| token.word.as_str())
    }

    fn category_of(&self, id: TokenId) -> Option<CategoryId> {
        self.token(id).map(|token| token.category)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedGroup {
    pub category: CategoryId,
    /// In the order the player selected them.
    pub tokens: [TokenId; GROUP_SIZE],
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeKind {
    OneAway,
}

impl NoticeKind {
    pub const fn message(self) -> &'static str {
        match self {
            Self::OneAway => "One away...",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub id: NoticeId,
    pub kind: NoticeKind,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SelectOutcome {
    NoChange,
    Selected,
    Deselected,
    Matched(CategoryId),
    OneAway(NoticeId),
    Missed,
}

impl SelectOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenStatus {
    Available,
    Selected,
    Resolved,
}

/// Mutable category game state: pool order, selection, resolved groups and the current notice.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchingGame {
    pool: Vec<TokenId>,
    selection: SmallVec<[TokenId; GROUP_SIZE]>,
    completed: Vec<CompletedGroup>,
    #[serde(skip)]
    notice: Option<Notice>,
    next_notice: u64,
    mistakes: u16,
}

impl MatchingGame {
    /// Starts a game with every token in the pool, shuffled once.
    pub fn new(set: &CategorySet, seed: u64) -> Self {
        let mut game = Self {
            pool: set.token_ids().collect(),
            selection: SmallVec::new(),
            completed: Vec::new(),
            notice: None,
            next_notice: 0,
            mistakes: 0,
        };
        game.shuffle(seed);
        game
    }

    pub fn pool(&self) -> &[TokenId] {
        &self.pool
    }

    pub fn selection(&self) -> &[TokenId] {
        &self.selection
    }

    pub fn completed(&self) -> &[CompletedGroup] {
        &self.completed
    }

    pub fn notice(&self) -> Option<Notice> {
        self.notice
    }

    pub fn mistakes(&self) -> u16 {
        self.mistakes
    }

    pub fn is_complete(&self) -> bool {
        self.pool.is_empty()
    }

    pub fn token_status(&self, token: TokenId) -> TokenStatus {
        if self.selection.contains(&token) {
            TokenStatus::Selected
        } else if self.pool.contains(&token) {
            TokenStatus::Available
        } else {
            TokenStatus::Resolved
        }
    }

    /// Selects or deselects `token`, evaluating the selection once it holds four tokens.
    pub fn toggle(&mut self, set: &CategorySet, token: TokenId) -> SelectOutcome {
        if !self.pool.contains(&token) {
            return SelectOutcome::NoChange;
        }

        if let Some(index) = self.selection.iter().position(|&selected| selected == token) {
            self.selection.remove(index);
            return SelectOutcome::Deselected;
        }

        self.selection.push(token);
        if self.selection.len() < GROUP_SIZE {
            return SelectOutcome::Selected;
        }

        let outcome = self.evaluate(set);
        self.selection.clear();
        log::debug!("evaluated selection: {:?}", outcome);
        outcome
    }

    fn evaluate(&mut self, set: &CategorySet) -> SelectOutcome {
        let mut counts: SmallVec<[(Option<CategoryId>, usize); GROUP_SIZE]> = SmallVec::new();
        for &token in &self.selection {
            let category = set.category_of(token);
            match counts.iter_mut().find(|(seen, _)| *seen == category) {
                Some((_, count)) => *count += 1,
                None => counts.push((category, 1)),
            }
        }

        let majority = counts.iter().map(|&(_, count)| count).max().unwrap_or(0);
        match (counts.as_slice(), majority) {
            (&[(Some(category), _)], GROUP_SIZE) => {
                let tokens: [TokenId; GROUP_SIZE] = core::array::from_fn(|index| self.selection[index]);
                self.pool.retain(|token| !tokens.contains(token));
                self.completed.push(CompletedGroup { category, tokens });
                SelectOutcome::Matched(category)
            }
            (_, count) if count == GROUP_SIZE - 1 => {
                self.mistakes = self.mistakes.saturating_add(1);
                SelectOutcome::OneAway(self.raise_notice(NoticeKind::OneAway))
            }
            _ => {
                self.mistakes = self.mistakes.saturating_add(1);
                SelectOutcome::Missed
            }
        }
    }

    fn raise_notice(&mut self, kind: NoticeKind) -> NoticeId {
        self.next_notice += 1;
        let id = NoticeId(self.next_notice);
        self.notice = Some(Notice { id, kind });
        id
    }

    /// Clears the notice only if it is still the one raised as `id`.
    pub fn dismiss_notice(&mut self, id: NoticeId) -> bool {
        match self.notice {
            Some(notice) if notice.id == id => {
                self.notice = None;
                true
            }
            _ => false,
        }
    }

    pub fn clear_selection(&mut self) -> bool {
        let had_selection = !self.selection.is_empty();
        self.selection.clear();
        had_selection
    }

    /// Reorders the pool with an unbiased shuffle. Membership and selection are untouched.
    pub fn shuffle(&mut self, seed: u64) {
        use rand::prelude::*;

        let mut rng = SmallRng::seed_from_u64(seed);
        self.pool.shuffle(&mut rng);
    }

    /// Whether a restored game can be used with `set`.
    pub fn fits(&self, set: &CategorySet) -> bool {
        let mut seen = HashSet::new();
        let resolved = self.completed.iter().flat_map(|group| group.tokens);
        let all_unique = self
            .pool
            .iter()
            .copied()
            .chain(resolved)
            .all(|token| set.token(token).is_some() && seen.insert(token));

        all_unique
            && seen.len() == set.token_count()
            && self.selection.len() < GROUP_SIZE
            && self.selection.iter().all(|token| self.pool.contains(token))
            && self.completed.iter().all(|group| {
                group
                    .tokens
                    .iter()
                    .all(|&token| set.category_of(token) == Some(group.category))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn set() -> CategorySet {
        CategorySet::new(vec![
            Category::new("A", ["w1", "w2", "w3", "w4"]),
            Category::new("B", ["x1", "x2", "x3", "x4"]),
        ])
        .unwrap()
    }

    fn ids(set: &CategorySet, words: &[&str]) -> Vec<TokenId> {
        words.iter().map(|word| set.find_word(word).unwrap()).collect()
    }

    fn select_all(game: &mut MatchingGame, set: &CategorySet, words: &[&str]) -> SelectOutcome {
        ids(set, words)
            .into_iter()
            .map(|token| game.toggle(set, token))
            .last()
            .unwrap_or(SelectOutcome::NoChange)
    }

    #[test]
    fn exact_match_moves_tokens_into_completed_in_selection_order() {
        let set = set();
        let mut game = MatchingGame::new(&set, 7);
        let before = game.clone();

        let outcome = select_all(&mut game, &set, &["w3", "w1", "w4", "w2"]);

        assert_eq!(outcome, SelectOutcome::Matched(CategoryId(0)));
        let tokens: [TokenId; GROUP_SIZE] = ids(&set, &["w3", "w1", "w4", "w2"]).try_into().unwrap();
        assert_eq!(
            game.completed(),
            &[CompletedGroup {
                category: CategoryId(0),
                tokens
            }]
        );
        assert_eq!(game.pool().len(), 4);
        assert!(tokens.iter().all(|token| !game.pool().contains(token)));
        assert!(game.selection().is_empty());
        assert_ne!(game, before);
        assert!(game.fits(&set));
    }

    #[test]
    fn three_one_split_is_one_away() {
        let set = set();
        let mut game = MatchingGame::new(&set, 7);
        let pool = game.pool().to_vec();

        let outcome = select_all(&mut game, &set, &["w1", "w2", "w3", "x1"]);

        let SelectOutcome::OneAway(id) = outcome else {
            panic!("expected one away, got {outcome:?}");
        };
        assert_eq!(
            game.notice(),
            Some(Notice {
                id,
                kind: NoticeKind::OneAway
            })
        );
        assert_eq!(game.pool(), pool.as_slice());
        assert!(game.completed().is_empty());
        assert!(game.selection().is_empty());
        assert_eq!(game.mistakes(), 1);
    }

    #[test]
    fn two_two_split_is_plain_miss() {
        let set = set();
        let mut game = MatchingGame::new(&set, 7);

        let outcome = select_all(&mut game, &set, &["w1", "w2", "x1", "x2"]);

        assert_eq!(outcome, SelectOutcome::Missed);
        assert_eq!(game.notice(), None);
        assert!(game.selection().is_empty());
        assert_eq!(game.pool().len(), 8);
    }

    #[test]
    fn reselecting_a_token_deselects_it() {
        let set = set();
        let mut game = MatchingGame::new(&set, 7);
        let w1 = set.find_word("w1").unwrap();
        let w2 = set.find_word("w2").unwrap();

        assert_eq!(game.toggle(&set, w1), SelectOutcome::Selected);
        assert_eq!(game.toggle(&set, w2), SelectOutcome::Selected);
        assert_eq!(game.toggle(&set, w1), SelectOutcome::Deselected);
        assert_eq!(game.selection(), &[w2]);
        assert_eq!(game.token_status(w1), TokenStatus::Available);
        assert_eq!(game.token_status(w2), TokenStatus::Selected);
    }

    #[test]
    fn resolved_tokens_cannot_be_reselected() {
        let set = set();
        let mut game = MatchingGame::new(&set, 7);
        select_all(&mut game, &set, &["x1", "x2", "x3", "x4"]);
        let x1 = set.find_word("x1").unwrap();

        assert_eq!(game.toggle(&set, x1), SelectOutcome::NoChange);
        assert_eq!(game.token_status(x1), TokenStatus::Resolved);
        assert_eq!(game.toggle(&set, TokenId(99)), SelectOutcome::NoChange);
    }

    #[test]
    fn stale_notice_dismissal_is_ignored() {
        let set = set();
        let mut game = MatchingGame::new(&set, 7);

        let SelectOutcome::OneAway(first) = select_all(&mut game, &set, &["w1", "w2", "w3", "x1"])
        else {
            panic!("expected one away");
        };
        let SelectOutcome::OneAway(second) = select_all(&mut game, &set, &["x1", "x2", "x3", "w1"])
        else {
            panic!("expected one away");
        };

        assert!(second > first);
        assert!(!game.dismiss_notice(first));
        assert_eq!(game.notice().map(|notice| notice.id), Some(second));
        assert!(game.dismiss_notice(second));
        assert_eq!(game.notice(), None);
    }

    #[test]
    fn shuffle_keeps_membership() {
        let set = set();
        let mut game = MatchingGame::new(&set, 1);
        select_all(&mut game, &set, &["w1", "w2", "w3", "w4"]);
        game.toggle(&set, set.find_word("x1").unwrap());

        let mut before = game.pool().to_vec();
        game.shuffle(2);
        game.shuffle(3);
        let mut after = game.pool().to_vec();

        before.sort();
        after.sort();
        assert_eq!(before, after);
        assert_eq!(game.selection().len(), 1);
        assert!(game.fits(&set));
    }

    #[test]
    fn game_completes_when_pool_is_empty() {
        let set = set();
        let mut game = MatchingGame::new(&set, 1);

        select_all(&mut game, &set, &["w1", "w2", "w3", "w4"]);
        assert!(!game.is_complete());
        select_all(&mut game, &set, &["x4", "x3", "x2", "x1"]);
        assert!(game.is_complete());
        assert_eq!(game.completed().len(), 2);
    }

    #[test]
    fn category_set_rejects_bad_content() {
        assert_eq!(
            CategorySet::new(vec![Category::new("A", ["a", "b", "c"])]).err(),
            Some(PuzzleError::CategorySize(0))
        );
        assert_eq!(
            CategorySet::new(vec![
                Category::new("A", ["a", "b", "c", "d"]),
                Category::new("B", ["e", "f", "g", "a"]),
            ])
            .err(),
            Some(PuzzleError::DuplicateWord)
        );
    }

    #[test]
    fn fits_rejects_duplicated_tokens() {
        let set = set();
        let mut game = MatchingGame::new(&set, 1);
        assert!(game.fits(&set));

        game.pool.push(game.pool[0]);
        assert!(!game.fits(&set));
    }
}
