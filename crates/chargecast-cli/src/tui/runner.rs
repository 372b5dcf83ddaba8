use crossterm::event;

use crate::tui::App;

/// TUI application runtime.
///
/// The form has no timed updates: the loop draws, blocks on the next terminal
/// event, hands it to the application and draws again. Each event is fully
/// processed before the next one is read.
#[derive(Default, Debug)]
pub struct Tui {}

impl Tui {
    /// Creates a new Tui.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the application until `app.should_exit()` returns true.
    pub fn run<A>(self, app: &mut A) -> anyhow::Result<()>
    where
        A: App,
    {
        ratatui::run(|terminal| {
            while !app.should_exit() {
                terminal.draw(|f| app.draw(f))?;
                let event = event::read()?;
                app.handle_event(&event);
            }
            Ok(())
        })
    }
}
