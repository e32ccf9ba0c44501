//! Project Explorer entry point

use zoon::*;

mod app;
mod clipboard;
mod config;
mod context_menu;
mod dataflow;
mod dialogs;
mod domain;
mod drag_drop;
mod logging;
mod mutations;
mod notifications;
mod platform;
mod session;
mod theme;
mod tree_view;

pub fn main() {
    let explorer_config = config::load();
    logging::init(&explorer_config.ui.log_level);
    log::info!("project explorer {} starting", explorer_config.app.version);

    let app = app::ProjectExplorerApp::new(&explorer_config, config::initial_project());
    // Elements hold clones of the domain, which keep its actors running
    let root_element = app.root();
    start_app("app", move || root_element);
}
