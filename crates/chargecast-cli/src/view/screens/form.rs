use chargecast_engine::{
    Choice, FormSession, Gender, IncompleteSelection, NumericField, Region, Smoker,
};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, HorizontalAlignment, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block as BlockWidget, Padding, Paragraph, Wrap},
};

use crate::{
    backend::PredictionBackend,
    tui::{Screen, ScreenTransition},
    view::{
        screens::ResultScreen,
        widgets::{ChoiceRow, KeyBinding, KeyBindingDisplay},
    },
};

/// Maximum number of digits typed into a numeric field.
const MAX_DIGITS: usize = 3;

/// Rows of the form, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormField {
    FirstName,
    LastName,
    Gender,
    Age,
    Smoker,
    Height,
    Weight,
    Region,
    Children,
    Submit,
}

impl FormField {
    const ALL: [Self; 10] = [
        Self::FirstName,
        Self::LastName,
        Self::Gender,
        Self::Age,
        Self::Smoker,
        Self::Height,
        Self::Weight,
        Self::Region,
        Self::Children,
        Self::Submit,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Gender => Gender::LABEL,
            Self::Smoker => Smoker::LABEL,
            Self::Region => Region::LABEL,
            Self::Submit => "",
            Self::Age | Self::Height | Self::Weight | Self::Children => {
                self.numeric().map_or("", NumericField::label)
            }
        }
    }

    fn numeric(self) -> Option<NumericField> {
        match self {
            Self::Age => Some(NumericField::Age),
            Self::Height => Some(NumericField::Height),
            Self::Weight => Some(NumericField::Weight),
            Self::Children => Some(NumericField::Children),
            _ => None,
        }
    }

    fn position(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn offset(self, delta: isize) -> Self {
        let len = Self::ALL.len();
        let index = (self.position() + len).wrapping_add_signed(delta) % len;
        Self::ALL[index]
    }

    fn bindings(self) -> &'static [KeyBinding<'static>] {
        match self {
            Self::FirstName | Self::LastName => &[
                (&["Tab", "↓"], "Next"),
                (&["S-Tab", "↑"], "Prev"),
                (&["Bksp"], "Delete"),
                (&["Esc"], "Quit"),
            ],
            Self::Gender | Self::Smoker | Self::Region => &[
                (&["Tab", "↓"], "Next"),
                (&["S-Tab", "↑"], "Prev"),
                (&["←", "→"], "Move"),
                (&["Enter", "Space"], "Select"),
                (&["Esc"], "Quit"),
            ],
            Self::Age | Self::Height | Self::Weight | Self::Children => &[
                (&["Tab", "↓"], "Next"),
                (&["S-Tab", "↑"], "Prev"),
                (&["0-9"], "Type"),
                (&["←", "→"], "∓1"),
                (&["PgDn", "PgUp"], "∓10"),
                (&["Esc"], "Quit"),
            ],
            Self::Submit => &[
                (&["Enter"], "Generate Prediction"),
                (&["S-Tab", "↑"], "Prev"),
                (&["Esc"], "Quit"),
            ],
        }
    }
}

/// Highlighted option of each choice row.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct ChoiceCursors {
    gender: usize,
    smoker: usize,
    region: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Status {
    Warning(IncompleteSelection),
    Failure(String),
}

/// Interactive prediction form.
///
/// Owns the [`FormSession`]; it survives visits to the result screen, so
/// selections stay in place across repeated submissions.
#[derive(Debug)]
pub(crate) struct FormScreen<B> {
    backend: B,
    session: FormSession,
    focus: FormField,
    cursors: ChoiceCursors,
    numeric_input: Option<String>,
    status: Option<Status>,
}

impl<B> FormScreen<B>
where
    B: PredictionBackend,
{
    pub(crate) fn new(backend: B) -> Self {
        Self {
            backend,
            session: FormSession::new(),
            focus: FormField::FirstName,
            cursors: ChoiceCursors::default(),
            numeric_input: None,
            status: None,
        }
    }

    fn move_focus(&mut self, delta: isize) {
        self.commit_numeric_input();
        self.focus = self.focus.offset(delta);
    }

    /// Stores the digits typed into the focused numeric field, clamped to its range.
    fn commit_numeric_input(&mut self) {
        let Some(input) = self.numeric_input.take() else {
            return;
        };
        if let (Some(field), Ok(value)) = (self.focus.numeric(), input.parse::<u16>()) {
            self.session.set_value(field, value);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> ScreenTransition {
        if key.code == KeyCode::Esc
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
        {
            return ScreenTransition::Exit;
        }

        // any other key dismisses the previous outcome
        self.status = None;

        match key.code {
            KeyCode::Tab | KeyCode::Down => self.move_focus(1),
            KeyCode::BackTab | KeyCode::Up => self.move_focus(-1),
            code => match self.focus {
                FormField::FirstName => edit_text(self.session.first_name_mut(), key),
                FormField::LastName => edit_text(self.session.last_name_mut(), key),
                FormField::Gender => {
                    if let Some(gender) = choose(&mut self.cursors.gender, code) {
                        self.session.select_gender(gender);
                    }
                }
                FormField::Smoker => {
                    if let Some(smoker) = choose(&mut self.cursors.smoker, code) {
                        self.session.select_smoker(smoker);
                    }
                }
                FormField::Region => {
                    if let Some(region) = choose(&mut self.cursors.region, code) {
                        self.session.select_region(region);
                    }
                }
                FormField::Age | FormField::Height | FormField::Weight | FormField::Children => {
                    self.edit_numeric(code);
                }
                FormField::Submit => {
                    if matches!(code, KeyCode::Enter | KeyCode::Char(' ')) {
                        return self.submit();
                    }
                }
            },
        }
        ScreenTransition::Stay
    }

    fn edit_numeric(&mut self, code: KeyCode) {
        let Some(field) = self.focus.numeric() else {
            return;
        };
        match code {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                let input = self.numeric_input.get_or_insert_with(String::new);
                if input.len() < MAX_DIGITS {
                    input.push(c);
                }
            }
            KeyCode::Backspace => {
                let input = self
                    .numeric_input
                    .get_or_insert_with(|| self.session.value(field).to_string());
                input.pop();
            }
            KeyCode::Left | KeyCode::Right | KeyCode::PageDown | KeyCode::PageUp => {
                self.commit_numeric_input();
                let delta = match code {
                    KeyCode::Left => -1,
                    KeyCode::Right => 1,
                    KeyCode::PageDown => -10,
                    _ => 10,
                };
                self.session.step_value(field, delta);
            }
            KeyCode::Enter => self.move_focus(1),
            _ => {}
        }
    }

    fn submit(&mut self) -> ScreenTransition {
        self.commit_numeric_input();
        let applicant = match self.session.submit() {
            Ok(applicant) => applicant,
            Err(err) => {
                tracing::warn!(%err, "submission rejected");
                self.status = Some(Status::Warning(err));
                return ScreenTransition::Stay;
            }
        };

        match self.backend.predict(&applicant) {
            Ok(prediction) => ScreenTransition::Push(Box::new(ResultScreen::new(prediction))),
            Err(err) => {
                let message = format!("{err:#}");
                tracing::error!(error = %message, "prediction failed");
                self.status = Some(Status::Failure(message));
                ScreenTransition::Stay
            }
        }
    }
}

/// Applies a key to a free-text field. Chords other than Shift are ignored.
fn edit_text(text: &mut String, key: KeyEvent) {
    if !key.modifiers.difference(KeyModifiers::SHIFT).is_empty() {
        return;
    }
    match key.code {
        KeyCode::Char(c) => text.push(c),
        KeyCode::Backspace => _ = text.pop(),
        _ => {}
    }
}

/// Moves the cursor of a choice row or commits an option.
///
/// Digits `1..=N` commit the N-th option directly.
fn choose<C>(cursor: &mut usize, code: KeyCode) -> Option<C>
where
    C: Choice,
{
    match code {
        KeyCode::Left => *cursor = cursor.saturating_sub(1),
        KeyCode::Right => *cursor = usize::min(*cursor + 1, C::ALL.len() - 1),
        KeyCode::Enter | KeyCode::Char(' ') => return C::ALL.get(*cursor).copied(),
        KeyCode::Char(c) => {
            let index = usize::try_from(c.to_digit(10)?).ok()?.checked_sub(1)?;
            let choice = C::ALL.get(index).copied()?;
            *cursor = index;
            return Some(choice);
        }
        _ => {}
    }
    None
}

const TITLE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const SUBTITLE_STYLE: Style = Style::new().fg(Color::Gray);
const LABEL_STYLE: Style = Style::new().fg(Color::White);
const FOCUSED_LABEL_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const HINT_STYLE: Style = Style::new().fg(Color::DarkGray);
const WARNING_STYLE: Style = Style::new().fg(Color::Yellow);
const BUTTON_STYLE: Style = Style::new().fg(Color::Black).bg(Color::Gray);
const FOCUSED_BUTTON_STYLE: Style = Style::new()
    .fg(Color::Black)
    .bg(Color::Green)
    .add_modifier(Modifier::BOLD);

impl<B> FormScreen<B>
where
    B: PredictionBackend,
{
    fn draw_field(&self, frame: &mut Frame, field: FormField, area: Rect) {
        let focused = self.focus == field;
        let [label_area, value_area] =
            Layout::horizontal([Constraint::Length(22), Constraint::Fill(1)]).areas(area);

        if field == FormField::Submit {
            let style = if focused {
                FOCUSED_BUTTON_STYLE
            } else {
                BUTTON_STYLE
            };
            let button = Line::from(Span::styled("[ Generate Prediction ]", style)).centered();
            frame.render_widget(button, area);
            return;
        }

        let label_style = if focused {
            FOCUSED_LABEL_STYLE
        } else {
            LABEL_STYLE
        };
        frame.render_widget(Span::styled(field.label(), label_style), label_area);

        let cursor = |value: usize| focused.then_some(value);
        match field {
            FormField::FirstName | FormField::LastName => {
                let text = match field {
                    FormField::FirstName => self.session.first_name(),
                    _ => self.session.last_name(),
                };
                let mut spans = vec![Span::raw(text.to_owned())];
                if focused {
                    spans.push(Span::styled("▏", FOCUSED_LABEL_STYLE));
                }
                frame.render_widget(Line::from(spans), value_area);
            }
            FormField::Gender => frame.render_widget(
                ChoiceRow::new(self.session.gender()).cursor(cursor(self.cursors.gender)),
                value_area,
            ),
            FormField::Smoker => frame.render_widget(
                ChoiceRow::new(self.session.smoker()).cursor(cursor(self.cursors.smoker)),
                value_area,
            ),
            FormField::Region => frame.render_widget(
                ChoiceRow::new(self.session.region()).cursor(cursor(self.cursors.region)),
                value_area,
            ),
            FormField::Age | FormField::Height | FormField::Weight | FormField::Children => {
                let Some(numeric) = field.numeric() else {
                    return;
                };
                let value = match (&self.numeric_input, focused) {
                    (Some(input), true) => format!("{input}▏"),
                    _ => self.session.value(numeric).to_string(),
                };
                let range = numeric.range();
                let line = Line::from(vec![
                    Span::raw(format!("{value:<6}")),
                    Span::styled(format!("({}-{})", range.start(), range.end()), HINT_STYLE),
                ]);
                frame.render_widget(line, value_area);
            }
            FormField::Submit => {}
        }
    }

    fn status_text(&self) -> Text<'_> {
        match &self.status {
            None => Text::default(),
            Some(Status::Warning(err)) => Text::styled(err.to_string(), WARNING_STYLE),
            Some(Status::Failure(message)) => Text::raw(message.as_str()),
        }
    }
}

impl<B> Screen for FormScreen<B>
where
    B: PredictionBackend,
{
    fn on_active(&mut self) {}

    fn on_close(&mut self) {}

    fn handle_event(&mut self, event: &Event) -> ScreenTransition {
        match event.as_key_event() {
            Some(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            _ => ScreenTransition::Stay,
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let viewport = frame
            .area()
            .centered(Constraint::Max(90), Constraint::Max(24));
        let block = BlockWidget::bordered()
            .title(Line::styled(" Real-Time Prediction Application ", TITLE_STYLE))
            .title_alignment(HorizontalAlignment::Center)
            .padding(Padding::symmetric(2, 0));

        let rows = FormField::ALL.len();
        let mut constraints = vec![Constraint::Length(2)];
        constraints.extend(std::iter::repeat_n(Constraint::Length(1), rows));
        constraints.extend([Constraint::Min(2), Constraint::Length(2)]);
        let areas = Layout::vertical(constraints).split(block.inner(viewport));

        frame.render_widget(block, viewport);
        frame.render_widget(
            Line::styled(
                "Your trusted tool for insurance charges prediction",
                SUBTITLE_STYLE,
            )
            .centered(),
            areas[0],
        );
        for (field, area) in FormField::ALL.into_iter().zip(&areas[1..=rows]) {
            self.draw_field(frame, field, *area);
        }
        frame.render_widget(
            Paragraph::new(self.status_text()).wrap(Wrap { trim: true }),
            areas[rows + 1],
        );
        frame.render_widget(KeyBindingDisplay::new(self.focus.bindings()), areas[rows + 2]);
    }
}
