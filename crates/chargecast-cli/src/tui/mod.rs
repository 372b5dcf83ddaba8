mod app;
mod runner;
mod screen;

pub use self::{
    app::App,
    runner::Tui,
    screen::{Screen, ScreenStack, ScreenTransition},
};
