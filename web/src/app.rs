use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use web_time::Instant;
use wordnook_core as game;
use game::{GameTab, Snapshot, SnapshotStore, ViewState};
use yew::prelude::*;

use crate::connections;
use crate::crossword::{self, CellMsg};
use crate::utils::*;

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct AppProps {
    pub(crate) settings: game::Settings,
    #[prop_or_default]
    pub(crate) seed: Option<u64>,
    #[prop_or_default]
    pub(crate) fresh: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    SelectTab(GameTab),
    Cell(CellMsg),
    Token(game::TokenId),
    Shuffle,
    ClearSelection,
    DismissNotice(game::NoticeId),
    NewGame,
}

/// Seed source for shuffles: reproducible when forced from the location, random otherwise.
#[derive(Copy, Clone, Debug, PartialEq)]
struct Seeds {
    forced: Option<u64>,
}

impl Seeds {
    fn next(&mut self) -> u64 {
        match self.forced.as_mut() {
            Some(seed) => {
                let current = *seed;
                *seed = seed.wrapping_add(1);
                current
            }
            None => js_random_seed(),
        }
    }
}

pub(crate) struct App {
    puzzle: Rc<game::Crossword>,
    categories: Rc<game::CategorySet>,
    settings: game::Settings,
    state: ViewState,
    seeds: Seeds,
    entry_ref: NodeRef,
    focus_pending: bool,
    notice_timeout: Option<Timeout>,
    latest_snapshot: Rc<RefCell<Option<Snapshot>>>,
    _pagehide: EventListener,
}

impl App {
    fn load_content() -> (game::Crossword, game::CategorySet) {
        let puzzle = game::catalog::crossword().expect("bundled crossword must load");
        for issue in puzzle.check_consistency() {
            log::warn!("crossword content: {:?}", issue);
        }
        let categories = game::catalog::categories().expect("bundled categories must load");
        (puzzle, categories)
    }

    fn persist(&self) {
        let snapshot = self.state.to_snapshot();
        LocalSnapshotStore.save(&snapshot);
        self.latest_snapshot.replace(Some(snapshot));
    }

    fn schedule_dismiss(&mut self, ctx: &Context<Self>, id: game::NoticeId) {
        let link = ctx.link().clone();
        let millis = game::NOTICE_DURATION.as_millis().try_into().unwrap_or(u32::MAX);
        // Replacing the handle cancels the previous timer.
        self.notice_timeout = Some(Timeout::new(millis, move || {
            link.send_message(Msg::DismissNotice(id))
        }));
    }

    fn handle_cell(&mut self, msg: CellMsg) -> bool {
        let policy = self.settings;
        let activated = matches!(msg, CellMsg::Activate(..));
        let session = &mut self.state.crossword;

        let updated = match msg {
            CellMsg::Activate(pos, gesture) => session
                .interact(
                    &self.puzzle,
                    pos,
                    gesture,
                    policy.direction_policy,
                    Instant::now(),
                )
                .has_update(),
            CellMsg::Enter(pos, ch) => session
                .enter(&self.puzzle, pos, ch, policy.entry_policy)
                .has_update(),
            CellMsg::Erase(pos) => session
                .erase(&self.puzzle, pos, policy.entry_policy)
                .has_update(),
        };

        if updated && session.is_solved(&self.puzzle) {
            log::info!("crossword solved");
        }
        // Clicking a cell takes focus away from the entry input.
        self.focus_pending |= updated || activated;
        updated
    }

    fn handle_token(&mut self, ctx: &Context<Self>, token: game::TokenId) -> bool {
        use game::SelectOutcome::*;

        let outcome = self.state.matching.toggle(&self.categories, token);
        match outcome {
            OneAway(id) => self.schedule_dismiss(ctx, id),
            Matched(category) => {
                log::debug!("category found: {:?}", self.categories.category(category));
                if self.state.matching.is_complete() {
                    log::info!("all categories found");
                }
            }
            NoChange | Selected | Deselected | Missed => {}
        }
        outcome.has_update()
    }

    fn focus_entry(&self) {
        if self.state.crossword.focus().is_none() {
            return;
        }
        let Some(input) = self.entry_ref.cast::<web_sys::HtmlElement>() else {
            return;
        };
        if let Err(err) = input.focus() {
            log::error!("failed to focus entry: {:?}", err);
        }
    }

    fn view_tabs(&self, ctx: &Context<Self>) -> Html {
        let tab_button = |tab: GameTab, label: &'static str| {
            let class = classes!((self.state.tab == tab).then_some("active"));
            let onclick = ctx.link().callback(move |_: MouseEvent| Msg::SelectTab(tab));
            html! { <button {class} {onclick}>{label}</button> }
        };
        let cb_new_game = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            Msg::NewGame
        });

        html! {
            <nav>
                {tab_button(GameTab::Crossword, "Crossword")}
                {tab_button(GameTab::Connections, "Connections")}
                <button class="new-game" onclick={cb_new_game}>{"New game"}</button>
            </nav>
        }
    }
}

impl Component for App {
    type Message = Msg;
    type Properties = AppProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let (puzzle, categories) = Self::load_content();
        let mut seeds = Seeds {
            forced: props.seed,
        };

        let store = LocalSnapshotStore;
        let state = if props.fresh {
            ViewState::new(&puzzle, &categories, seeds.next())
        } else {
            game::restore_or_new(&store, &puzzle, &categories, seeds.next())
        };

        let latest_snapshot = Rc::new(RefCell::new(None));
        let pagehide = {
            let latest_snapshot = latest_snapshot.clone();
            EventListener::new(&gloo::utils::window(), "pagehide", move |_| {
                if let Some(snapshot) = latest_snapshot.borrow().as_ref() {
                    log::debug!("saving session on pagehide");
                    LocalSnapshotStore.save(snapshot);
                }
            })
        };

        let app = Self {
            entry_ref: NodeRef::default(),
            puzzle: Rc::new(puzzle),
            categories: Rc::new(categories),
            settings: props.settings,
            state,
            seeds,
            focus_pending: false,
            notice_timeout: None,
            latest_snapshot,
            _pagehide: pagehide,
        };
        app.persist();
        app
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        log::trace!("msg: {:?}", msg);
        let updated = match msg {
            SelectTab(tab) => {
                let changed = self.state.tab != tab;
                self.state.tab = tab;
                changed
            }
            Cell(cell_msg) => self.handle_cell(cell_msg),
            Token(token) => self.handle_token(ctx, token),
            Shuffle => {
                self.state.matching.shuffle(self.seeds.next());
                true
            }
            ClearSelection => self.state.matching.clear_selection(),
            DismissNotice(id) => self.state.matching.dismiss_notice(id),
            NewGame => {
                let tab = self.state.tab;
                self.state = ViewState::new(&self.puzzle, &self.categories, self.seeds.next());
                self.state.tab = tab;
                self.notice_timeout = None;
                log::debug!("new game");
                true
            }
        };

        if updated {
            self.persist();
        } else if std::mem::take(&mut self.focus_pending) {
            self.focus_entry();
        }
        updated
    }

    fn rendered(&mut self, _ctx: &Context<Self>, _first_render: bool) {
        if std::mem::take(&mut self.focus_pending) && self.state.tab == GameTab::Crossword {
            self.focus_entry();
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let content = match self.state.tab {
            GameTab::Crossword => crossword::view(
                &self.puzzle,
                &self.state.crossword,
                self.settings,
                &self.entry_ref,
                ctx.link().callback(Msg::Cell),
            ),
            GameTab::Connections => connections::view(
                &self.categories,
                &self.state.matching,
                connections::Callbacks {
                    token: ctx.link().callback(Msg::Token),
                    shuffle: ctx.link().callback(|_: MouseEvent| Msg::Shuffle),
                    clear: ctx.link().callback(|_: MouseEvent| Msg::ClearSelection),
                },
            ),
        };

        html! {
            <div class="wordnook">
                {self.view_tabs(ctx)}
                {content}
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forced_seeds_are_reproducible() {
        let mut seeds = Seeds { forced: Some(41) };

        assert_eq!(seeds.next(), 41);
        assert_eq!(seeds.next(), 42);
    }
}
