use std::fmt;

use crossterm::event::Event;
use ratatui::Frame;

use crate::tui::App;

/// Individual screen in the application.
///
/// # Lifecycle
///
/// ```text
/// Create
///   ↓
/// on_active() ←──────────┐
///   ↓                     │ Child screen pops
/// (Active/Foreground) ────┘
///   ↓
/// on_close()  ← Pop/Exit only
///   ↓
/// Drop
/// ```
///
/// A screen pushed over another one keeps the lower screen alive (and its state
/// untouched) until it pops.
pub trait Screen: fmt::Debug {
    /// Called when this screen becomes the foreground screen.
    ///
    /// This is called on startup for the initial screen, when the screen is pushed,
    /// and when a screen above it pops.
    fn on_active(&mut self);

    /// Called when this screen is removed from the stack (Pop or Exit).
    fn on_close(&mut self);

    /// Handles terminal events and returns transition.
    fn handle_event(&mut self, event: &Event) -> ScreenTransition;

    /// Renders the screen.
    fn draw(&self, frame: &mut Frame);
}

/// Screen transition result from event handling.
#[derive(Debug)]
pub enum ScreenTransition {
    /// Stay in the current screen.
    Stay,

    /// Push a new screen on top of the current one.
    Push(Box<dyn Screen>),

    /// Pop the current screen and return to the previous one.
    Pop,

    /// Close every screen and exit the application.
    Exit,
}

/// Screen stack manager that implements App.
#[derive(Debug)]
pub struct ScreenStack<'a> {
    screens: Vec<Box<dyn Screen + 'a>>,
    should_exit: bool,
}

impl<'a> ScreenStack<'a> {
    /// Creates a new screen stack and activates the initial screen.
    pub fn new(mut initial: Box<dyn Screen + 'a>) -> Self {
        initial.on_active();
        Self {
            screens: vec![initial],
            should_exit: false,
        }
    }

    fn apply_transition(&mut self, transition: ScreenTransition) {
        match transition {
            ScreenTransition::Stay => {}

            ScreenTransition::Push(mut new_screen) => {
                new_screen.on_active();
                self.screens.push(new_screen);
            }

            ScreenTransition::Pop => {
                if let Some(mut old_screen) = self.screens.pop() {
                    old_screen.on_close();
                }
                if let Some(prev_screen) = self.screens.last_mut() {
                    prev_screen.on_active();
                }
            }

            ScreenTransition::Exit => {
                while let Some(mut screen) = self.screens.pop() {
                    screen.on_close();
                }
                self.should_exit = true;
            }
        }
    }
}

impl App for ScreenStack<'_> {
    fn should_exit(&self) -> bool {
        self.should_exit || self.screens.is_empty()
    }

    fn handle_event(&mut self, event: &Event) {
        if let Some(current) = self.screens.last_mut() {
            let transition = current.handle_event(event);
            self.apply_transition(transition);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        if let Some(current) = self.screens.last() {
            current.draw(frame);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::*;

    /// Tracks lifecycle calls for testing
    #[derive(Debug, Clone, Default)]
    struct LifecycleLog {
        calls: Rc<RefCell<Vec<String>>>,
    }

    impl LifecycleLog {
        fn log(&self, msg: impl Into<String>) {
            self.calls.borrow_mut().push(msg.into());
        }

        fn take(&self) -> Vec<String> {
            std::mem::take(&mut *self.calls.borrow_mut())
        }
    }

    #[derive(Debug)]
    struct TestScreen {
        name: &'static str,
        log: LifecycleLog,
        transitions: Vec<ScreenTransition>,
    }

    impl TestScreen {
        fn new(name: &'static str, log: &LifecycleLog) -> Self {
            Self {
                name,
                log: log.clone(),
                transitions: vec![],
            }
        }

        /// Transitions returned by successive `handle_event` calls.
        fn with_transitions(mut self, mut transitions: Vec<ScreenTransition>) -> Self {
            transitions.reverse();
            self.transitions = transitions;
            self
        }
    }

    impl Screen for TestScreen {
        fn on_active(&mut self) {
            self.log.log(format!("{}: on_active", self.name));
        }

        fn on_close(&mut self) {
            self.log.log(format!("{}: on_close", self.name));
        }

        fn handle_event(&mut self, _event: &Event) -> ScreenTransition {
            self.log.log(format!("{}: handle_event", self.name));
            self.transitions.pop().unwrap_or(ScreenTransition::Stay)
        }

        fn draw(&self, _frame: &mut Frame) {}
    }

    fn key() -> Event {
        Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
    }

    #[test]
    fn test_new_activates_initial_screen() {
        let log = LifecycleLog::default();
        let stack = ScreenStack::new(Box::new(TestScreen::new("form", &log)));
        assert_eq!(log.take(), ["form: on_active"]);
        assert!(!stack.should_exit());
    }

    #[test]
    fn test_push_then_pop_returns_to_form() {
        let log = LifecycleLog::default();
        let result = TestScreen::new("result", &log).with_transitions(vec![ScreenTransition::Pop]);
        let form = TestScreen::new("form", &log)
            .with_transitions(vec![ScreenTransition::Push(Box::new(result))]);
        let mut stack = ScreenStack::new(Box::new(form));
        log.take();

        stack.handle_event(&key());
        assert_eq!(stack.screens.len(), 2);
        assert_eq!(log.take(), ["form: handle_event", "result: on_active"]);

        stack.handle_event(&key());
        assert_eq!(stack.screens.len(), 1);
        assert_eq!(
            log.take(),
            ["result: handle_event", "result: on_close", "form: on_active"]
        );
        assert!(!stack.should_exit());
    }

    #[test]
    fn test_events_go_to_top_screen_only() {
        let log = LifecycleLog::default();
        let form = TestScreen::new("form", &log).with_transitions(vec![ScreenTransition::Push(
            Box::new(TestScreen::new("result", &log)),
        )]);
        let mut stack = ScreenStack::new(Box::new(form));
        stack.handle_event(&key());
        log.take();

        stack.handle_event(&key());
        stack.handle_event(&key());
        assert_eq!(log.take(), ["result: handle_event", "result: handle_event"]);
    }

    #[test]
    fn test_exit_closes_all_screens_top_down() {
        let log = LifecycleLog::default();
        let result = TestScreen::new("result", &log).with_transitions(vec![ScreenTransition::Exit]);
        let form = TestScreen::new("form", &log)
            .with_transitions(vec![ScreenTransition::Push(Box::new(result))]);
        let mut stack = ScreenStack::new(Box::new(form));
        stack.handle_event(&key());
        log.take();

        stack.handle_event(&key());
        assert_eq!(
            log.take(),
            ["result: handle_event", "result: on_close", "form: on_close"]
        );
        assert!(stack.should_exit());
    }

    #[test]
    fn test_popping_last_screen_exits() {
        let log = LifecycleLog::default();
        let form = TestScreen::new("form", &log).with_transitions(vec![ScreenTransition::Pop]);
        let mut stack = ScreenStack::new(Box::new(form));
        stack.handle_event(&key());
        assert!(stack.should_exit());
    }
}
