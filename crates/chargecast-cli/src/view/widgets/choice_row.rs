use chargecast_engine::Choice;
use ratatui::{
    prelude::{Buffer, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Row of single-choice buttons.
///
/// The committed selection is highlighted; the cursor (shown only while the row
/// has focus) marks the option Enter/Space would commit.
#[derive(Debug)]
pub struct ChoiceRow<C> {
    selected: Option<C>,
    cursor: Option<usize>,
}

const SELECTED_STYLE: Style = Style::new().fg(Color::Black).bg(Color::Green);
const OPTION_STYLE: Style = Style::new().fg(Color::White);
const CURSOR_MODIFIER: Modifier = Modifier::REVERSED;
const UNSET_STYLE: Style = Style::new().fg(Color::DarkGray);

impl<C> ChoiceRow<C>
where
    C: Choice,
{
    pub fn new(selected: Option<C>) -> Self {
        Self {
            selected,
            cursor: None,
        }
    }

    pub fn cursor(self, cursor: Option<usize>) -> Self {
        Self { cursor, ..self }
    }

    fn line(&self) -> Line<'static> {
        let mut spans = vec![];
        for (i, option) in C::ALL.iter().copied().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            let mut style = if self.selected == Some(option) {
                SELECTED_STYLE
            } else {
                OPTION_STYLE
            };
            if self.cursor == Some(i) {
                style = style.add_modifier(CURSOR_MODIFIER);
            }
            spans.push(Span::styled(format!("[ {option} ]"), style));
        }
        if self.selected.is_none() {
            spans.push(Span::styled("  (not selected)", UNSET_STYLE));
        }
        Line::from(spans)
    }
}

impl<C> Widget for ChoiceRow<C>
where
    C: Choice,
{
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        self.line().render(area, buf);
    }
}
