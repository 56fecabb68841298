//! Bundled puzzle content.

use alloc::vec::Vec;

use crate::*;

pub const CROSSWORD_ROWS: [&str; 7] = [
    "#######",
    "#HEART#",
    "#EMBER#",
    "#ABUSE#",
    "#RESIN#",
    "#TREND#",
    "#######",
];

pub const ACROSS_CLUES: [(ClueNumber, &str, Coord2); 5] = [
    (1, "Organ that keeps the beat", (1, 1)),
    (6, "Glowing remnant of a fire", (2, 1)),
    (7, "Treat badly", (3, 1)),
    (8, "Sticky tree secretion", (4, 1)),
    (9, "Fashion of the moment", (5, 1)),
];

pub const DOWN_CLUES: [(ClueNumber, &str, Coord2); 5] = [
    (1, "Courage, or the core of a matter", (1, 1)),
    (2, "Last spark in the grate", (1, 2)),
    (3, "Misuse", (1, 3)),
    (4, "Varnish ingredient", (1, 4)),
    (5, "General direction", (1, 5)),
];

pub const CATEGORIES: [(&str, [&str; 4]); 4] = [
    (
        "Science Fields",
        ["Physics", "Chemistry", "Biology", "Astronomy"],
    ),
    (
        "Tools",
        ["Microscope", "Telescope", "Calculator", "Computer"],
    ),
    ("Methods", ["Observe", "Measure", "Analyze", "Predict"]),
    ("Equipment", ["Beaker", "Pipette", "Burner", "Flask"]),
];

fn clue_specs(clues: &[(ClueNumber, &str, Coord2)]) -> Vec<ClueSpec> {
    clues
        .iter()
        .map(|&(number, text, start)| ClueSpec::new(number, text, start))
        .collect()
}

pub fn crossword() -> Result<Crossword> {
    Crossword::from_rows(
        &CROSSWORD_ROWS,
        clue_specs(&ACROSS_CLUES),
        clue_specs(&DOWN_CLUES),
    )
}

pub fn categories() -> Result<CategorySet> {
    CategorySet::new(
        CATEGORIES
            .iter()
            .map(|&(name, words)| Category::new(name, words))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_crossword_is_consistent() {
        let puzzle = crossword().unwrap();

        assert!(puzzle.check_consistency().is_empty());
        for direction in Direction::ALL {
            for clue in puzzle.clues(direction) {
                assert_eq!(clue.len, 5, "{} {}", clue.number, direction);
            }
        }
        assert_eq!(puzzle.clue_number_at((1, 1)), Some(1));
        assert_eq!(puzzle.clue_number_at((3, 1)), Some(7));
    }

    #[test]
    fn bundled_categories_load() {
        let set = categories().unwrap();

        assert_eq!(set.categories().len(), 4);
        assert_eq!(set.token_count(), 16);
        assert!(set.find_word("Pipette").is_some());
    }
}
