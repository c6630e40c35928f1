mod tui;

pub(crate) use tui::as_tui;
