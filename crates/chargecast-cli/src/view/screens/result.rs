use chargecast_evaluator::prediction::ChargePrediction;
use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, HorizontalAlignment, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block as BlockWidget, Padding, Paragraph},
};

use crate::{
    tui::{Screen, ScreenTransition},
    view::widgets::{KeyBinding, KeyBindingDisplay},
};

const BINDINGS: &[KeyBinding<'static>] = &[(&["Enter", "Esc"], "Back to form"), (&["q"], "Quit")];
const SUMMARY_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Shows one prediction until the user goes back to the form.
#[derive(Debug)]
pub struct ResultScreen {
    prediction: ChargePrediction,
}

impl ResultScreen {
    pub fn new(prediction: ChargePrediction) -> Self {
        Self { prediction }
    }
}

impl Screen for ResultScreen {
    fn on_active(&mut self) {}

    fn on_close(&mut self) {}

    fn handle_event(&mut self, event: &Event) -> ScreenTransition {
        let Some(key) = event.as_key_event() else {
            return ScreenTransition::Stay;
        };
        if key.kind != KeyEventKind::Press {
            return ScreenTransition::Stay;
        }
        match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Backspace => ScreenTransition::Pop,
            KeyCode::Char('q') => ScreenTransition::Exit,
            _ => ScreenTransition::Stay,
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let viewport = frame
            .area()
            .centered(Constraint::Max(80), Constraint::Length(9));
        let block = BlockWidget::bordered()
            .title("Prediction")
            .title_alignment(HorizontalAlignment::Center)
            .padding(Padding::symmetric(2, 1));

        let [body_area, help_area] = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)])
            .areas(block.inner(viewport));

        let body = Paragraph::new(vec![
            Line::from(self.prediction.greeting()),
            Line::default(),
            Line::from(self.prediction.summary()).style(SUMMARY_STYLE),
        ]);

        frame.render_widget(block, viewport);
        frame.render_widget(body, body_area);
        frame.render_widget(KeyBindingDisplay::new(BINDINGS), help_area);
    }
}
