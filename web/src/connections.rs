use wordnook_core as game;
use game::{CategorySet, CompletedGroup, MatchingGame, TokenId, TokenStatus};
use yew::prelude::*;

fn group_words(set: &CategorySet, group: &CompletedGroup) -> String {
    group
        .tokens
        .iter()
        .map(|&token| set.word(token))
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Properties, Clone, PartialEq)]
struct TokenProps {
    token: TokenId,
    word: AttrValue,
    selected: bool,
    callback: Callback<TokenId>,
}

#[function_component(TokenView)]
fn token_component(props: &TokenProps) -> Html {
    let TokenProps {
        token,
        word,
        selected,
        callback,
    } = props.clone();

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("token {:?} click", token);
        callback.emit(token);
    });

    html! {
        <button class={classes!("token", selected.then_some("selected"))} {onclick}>{word}</button>
    }
}

pub(crate) struct Callbacks {
    pub(crate) token: Callback<TokenId>,
    pub(crate) shuffle: Callback<MouseEvent>,
    pub(crate) clear: Callback<MouseEvent>,
}

pub(crate) fn view(set: &CategorySet, game: &MatchingGame, callbacks: Callbacks) -> Html {
    let Callbacks {
        token: on_token,
        shuffle,
        clear,
    } = callbacks;
    let complete = game.is_complete();
    let nothing_selected = game.selection().is_empty();

    html! {
        <div class="connections">
            {
                for game.completed().iter().map(|group| {
                    let name = set
                        .category(group.category)
                        .map(|category| category.name.clone())
                        .unwrap_or_default();
                    html! {
                        <div class="group">
                            <span class="words">{group_words(set, group)}</span>
                            <span class="category">{name}</span>
                        </div>
                    }
                })
            }
            if complete {
                <p class="banner">{"All groups found!"}</p>
            } else {
                <div class="tokens">
                    {
                        for game.pool().iter().map(|&token| {
                            let word = AttrValue::from(set.word(token).to_string());
                            let selected = game.token_status(token) == TokenStatus::Selected;
                            let callback = on_token.clone();
                            html! {
                                <TokenView key={token.0.to_string()} {token} {word} {selected} {callback}/>
                            }
                        })
                    }
                </div>
                <footer>
                    <span class="mistakes">{format!("Mistakes: {}", game.mistakes())}</span>
                    <button onclick={shuffle}>{"Shuffle"}</button>
                    <button onclick={clear} disabled={nothing_selected}>{"Deselect all"}</button>
                </footer>
            }
            if let Some(notice) = game.notice() {
                <div class="toast" role="status">{notice.kind.message()}</div>
            }
        </div>
    }
}
