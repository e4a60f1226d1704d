mod layout;
mod lobby;
mod table;

use crate::transport::Transport;
use crate::tui::app::{AppState, Scene};
use ratatui::prelude::Frame;

pub fn draw<T: Transport>(f: &mut Frame, app: &AppState<T>) {
    match app.scene {
        Scene::Lobby => lobby::draw_lobby(f, app),
        Scene::Table => table::draw_table(f, app),
    }
}
