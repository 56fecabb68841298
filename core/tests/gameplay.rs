use std::time::Duration;

use web_time::Instant;
use wordnook_core::{
    catalog, restore_or_new, CellStatus, ClueId, ClueSpec, Crossword, Direction, EntryOutcome,
    EntryPolicy, DirectionPolicy, Gesture, GameTab, MemoryStore, SelectOutcome, SnapshotStore,
    ViewState,
};

fn guardian_rows() -> Crossword {
    Crossword::from_rows(
        &[
            "###############",
            "#####DEFEAT####",
            "####ELEGANT####",
            "###############",
        ],
        vec![
            ClueSpec::new(1, "Overcome", (1, 5)),
            ClueSpec::new(2, "Stylish", (2, 4)),
        ],
        vec![ClueSpec::new(3, "Two down", (1, 5))],
    )
    .unwrap()
}

#[test]
fn index_agrees_with_clue_spans_for_every_cell() {
    let puzzle = guardian_rows();

    for coords in puzzle.grid().iter_coords() {
        let found = puzzle.clues_at(coords);
        for direction in Direction::ALL {
            let expected = puzzle
                .clues(direction)
                .iter()
                .find(|clue| clue.span().contains(coords));
            let expected = expected.filter(|_| puzzle.grid().is_open(coords));
            assert_eq!(found.get(direction).copied(), expected, "{coords:?}");
        }
    }
}

#[test]
fn typing_defeat_after_clicking_start_locks_the_word() {
    let puzzle = guardian_rows();
    let mut state = ViewState::new(&puzzle, &catalog::categories().unwrap(), 3);
    let policy = DirectionPolicy::default();

    state
        .crossword
        .interact(&puzzle, (1, 5), Gesture::Single, policy, Instant::now());
    let mut coords = (1, 5);
    for ch in "DEFEAT".chars() {
        let outcome = state.crossword.enter(&puzzle, coords, ch, EntryPolicy::Strict);
        let EntryOutcome::Written { correct, next } = outcome else {
            panic!("{ch} not written: {outcome:?}");
        };
        assert!(correct);
        if let Some(next) = next {
            coords = next;
        }
    }

    assert_eq!(coords, (1, 10));
    for col in 5..=10 {
        let status = state.crossword.cell_status(&puzzle, (1, col), EntryPolicy::Strict);
        assert!(status.contains(CellStatus::LOCKED | CellStatus::HIGHLIGHTED));
        assert!(!status.contains(CellStatus::ERROR));
    }
}

#[test]
fn repeat_click_switches_to_crossing_word() {
    let puzzle = guardian_rows();
    let mut state = ViewState::new(&puzzle, &catalog::categories().unwrap(), 3);
    let policy = DirectionPolicy::default();
    let t0 = Instant::now();

    state
        .crossword
        .interact(&puzzle, (1, 5), Gesture::Single, policy, t0);
    state.crossword.interact(
        &puzzle,
        (1, 5),
        Gesture::Single,
        policy,
        t0 + Duration::from_millis(500),
    );

    assert_eq!(
        state.crossword.highlight(),
        Some(ClueId {
            number: 3,
            direction: Direction::Down
        })
    );
    assert!(state.crossword.is_highlighted(&puzzle, (2, 5)));
}

#[test]
fn connections_game_played_to_completion_and_restored() {
    let puzzle = catalog::crossword().unwrap();
    let set = catalog::categories().unwrap();
    let store = MemoryStore::new();
    let mut state = restore_or_new(&store, &puzzle, &set, 42);
    state.tab = GameTab::Connections;

    let physics = set.find_word("Physics").unwrap();
    let beaker = set.find_word("Beaker").unwrap();
    for word in ["Chemistry", "Biology"] {
        state.matching.toggle(&set, set.find_word(word).unwrap());
    }
    state.matching.toggle(&set, physics);
    assert!(matches!(
        state.matching.toggle(&set, beaker),
        SelectOutcome::OneAway(_)
    ));
    store.save(&state.to_snapshot());

    let mut state = restore_or_new(&store, &puzzle, &set, 0);
    assert_eq!(state.tab, GameTab::Connections);
    assert_eq!(state.matching.mistakes(), 1);

    for category in set.categories() {
        let mut last = SelectOutcome::NoChange;
        for word in &category.words {
            last = state.matching.toggle(&set, set.find_word(word).unwrap());
        }
        assert!(matches!(last, SelectOutcome::Matched(_)), "{}", category.name);
    }

    assert!(state.matching.is_complete());
    let names: Vec<_> = state
        .matching
        .completed()
        .iter()
        .filter_map(|group| set.category(group.category))
        .map(|category| category.name.as_str())
        .collect();
    assert_eq!(
        names,
        ["Science Fields", "Tools", "Methods", "Equipment"]
    );
}
