use wordnook_core as game;
use game::{CellStatus, Coord2, Direction, Gesture};
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum CellMsg {
    Activate(Coord2, Gesture),
    Enter(Coord2, char),
    Erase(Coord2),
}

/// Last character of the entry input's value; the input is emptied after every keystroke.
fn typed_char(value: &str) -> Option<char> {
    value.chars().next_back()
}

/// Keys handled before the input sees them. Modified keys are left to the browser.
fn is_erase_key(key: &str, modified: bool) -> bool {
    !modified && matches!(key, "Backspace" | "Delete")
}

fn cell_class_names(status: CellStatus) -> Vec<&'static str> {
    if !status.contains(CellStatus::OPEN) {
        return vec!["cell", "blocked"];
    }
    let mut names = vec!["cell"];
    for (flag, name) in [
        (CellStatus::FILLED, "filled"),
        (CellStatus::LOCKED, "locked"),
        (CellStatus::ERROR, "wrong"),
        (CellStatus::HIGHLIGHTED, "highlight"),
        (CellStatus::FOCUSED, "focus"),
    ] {
        if status.contains(flag) {
            names.push(name);
        }
    }
    names
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    pos: Coord2,
    status: CellStatus,
    #[prop_or_default]
    letter: Option<char>,
    #[prop_or_default]
    number: Option<game::ClueNumber>,
    #[prop_or_default]
    double_click: bool,
    callback: Callback<CellMsg>,
}

#[function_component(CellView)]
fn cell_component(props: &CellProps) -> Html {
    let CellProps {
        pos,
        status,
        letter,
        number,
        double_click,
        callback,
    } = props.clone();

    let class = classes!(cell_class_names(status));
    if !status.contains(CellStatus::OPEN) {
        return html! { <td {class}/> };
    }

    let onclick = {
        let callback = callback.clone();
        Callback::from(move |_: MouseEvent| {
            log::trace!("{:?} click", pos);
            callback.emit(CellMsg::Activate(pos, Gesture::Single));
        })
    };

    let ondblclick = Callback::from(move |_: MouseEvent| {
        log::trace!("{:?} double click", pos);
        if double_click {
            callback.emit(CellMsg::Activate(pos, Gesture::Double));
        }
    });

    html! {
        <td {class} {onclick} {ondblclick}>
            if let Some(number) = number {
                <small>{number}</small>
            }
            <span>{letter.map(String::from).unwrap_or_default()}</span>
        </td>
    }
}

fn clue_list(puzzle: &game::Crossword, direction: Direction, highlight: Option<game::ClueId>) -> Html {
    html! {
        <section class="clues">
            <h3>{direction.label()}</h3>
            <ol>
                {
                    for puzzle.clues(direction).iter().map(|clue| {
                        let active = highlight == Some(clue.id());
                        html! {
                            <li class={classes!(active.then_some("highlight"))} value={clue.number.to_string()}>
                                {&clue.text}
                            </li>
                        }
                    })
                }
            </ol>
        </section>
    }
}

/// Off-screen text input holding keyboard focus for the focused cell. Brings up soft keyboards on touch devices.
fn entry_input(focus: Option<Coord2>, entry_ref: &NodeRef, callback: &Callback<CellMsg>) -> Html {
    let oninput = {
        let callback = callback.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let value = input.value();
            input.set_value("");
            if let (Some(pos), Some(ch)) = (focus, typed_char(&value)) {
                callback.emit(CellMsg::Enter(pos, ch));
            }
        })
    };

    let onkeydown = {
        let callback = callback.clone();
        Callback::from(move |e: KeyboardEvent| {
            let modified = e.ctrl_key() || e.meta_key() || e.alt_key();
            if let Some(pos) = focus.filter(|_| is_erase_key(&e.key(), modified)) {
                e.prevent_default();
                callback.emit(CellMsg::Erase(pos));
            }
        })
    };

    html! {
        <input
            class="entry"
            ref={entry_ref.clone()}
            type="text"
            autocomplete="off"
            autocapitalize="characters"
            spellcheck="false"
            aria-label="Cell entry"
            style="position: absolute; opacity: 0; width: 1px; height: 1px;"
            {oninput}
            {onkeydown}
        />
    }
}

pub(crate) fn view(
    puzzle: &game::Crossword,
    session: &game::CrosswordSession,
    settings: game::Settings,
    entry_ref: &NodeRef,
    callback: Callback<CellMsg>,
) -> Html {
    let (rows, cols) = puzzle.size();
    let solved = session.is_solved(puzzle);
    let double_click = matches!(settings.direction_policy, game::DirectionPolicy::Gesture);

    html! {
        <div class="crossword">
            <table class={classes!(solved.then_some("solved"))}>
                {
                    for (0..rows).map(|row| html! {
                        <tr>
                            {
                                for (0..cols).map(|col| {
                                    let pos = (row, col);
                                    let status = session.cell_status(puzzle, pos, settings.entry_policy);
                                    let letter = session.entry_at(pos);
                                    let number = puzzle.clue_number_at(pos);
                                    let callback = callback.clone();
                                    html! {
                                        <CellView {pos} {status} {letter} {number} {double_click} {callback}/>
                                    }
                                })
                            }
                        </tr>
                    })
                }
            </table>
            {entry_input(session.focus(), entry_ref, &callback)}
            if solved {
                <p class="banner">{"Solved!"}</p>
            }
            <div class="clue-lists">
                {clue_list(puzzle, Direction::Across, session.highlight())}
                {clue_list(puzzle, Direction::Down, session.highlight())}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_unmodified_deletions_are_intercepted() {
        assert!(is_erase_key("Backspace", false));
        assert!(is_erase_key("Delete", false));
        assert!(!is_erase_key("Backspace", true));
        assert!(!is_erase_key("a", false));
        assert!(!is_erase_key("Unidentified", false));
    }

    #[test]
    fn typed_char_takes_the_latest_character() {
        assert_eq!(typed_char("a"), Some('a'));
        assert_eq!(typed_char("ab"), Some('b'));
        assert_eq!(typed_char("é"), Some('é'));
        assert_eq!(typed_char(""), None);
    }

    #[test]
    fn class_names_follow_status_flags() {
        assert_eq!(cell_class_names(CellStatus::empty()), ["cell", "blocked"]);
        assert_eq!(
            cell_class_names(CellStatus::OPEN | CellStatus::FILLED | CellStatus::ERROR),
            ["cell", "filled", "wrong"]
        );
    }
}
