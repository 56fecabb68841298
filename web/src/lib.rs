use clap::Parser;
use wasm_bindgen::prelude::*;

mod app;
mod connections;
mod crossword;
mod settings;
mod utils;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a shuffle seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Discard any saved session on load
    #[arg(long)]
    fresh: bool,

    #[command(flatten)]
    settings: settings::SettingsArgs,
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let args = Args::try_parse_from(location_hash.split(['#', '&'])).unwrap_or_else(|err| {
        web_sys::console::warn_1(&format!("ignoring location arguments: {err}").into());
        Args::parse_from([""])
    });
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    log::debug!("args: {:?}", args);

    let props = app::AppProps {
        settings: settings::load(&args.settings),
        seed: args.seed,
        fresh: args.fresh,
    };

    let root = document()
        .get_element_by_id("wordnook")
        .expect("Could not find id=\"wordnook\" element");

    log::debug!("App started");
    yew::Renderer::<app::App>::with_root_and_props(root, props).render();
}
