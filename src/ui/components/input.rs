use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Bordered single-line text input. The form keyboard handlers only
/// append and pop, so the cursor always sits at the end of the value.
pub struct InputWidget<'a> {
    label: &'a str,
    value: &'a str,
    focused: bool,
    editing: bool,
}

impl<'a> InputWidget<'a> {
    pub fn new(label: &'a str, value: &'a str) -> Self {
        Self {
            label,
            value,
            focused: false,
            editing: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn editing(mut self, editing: bool) -> Self {
        self.editing = editing;
        self
    }
}

impl Widget for InputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Theme::border_focused()
        } else {
            Theme::border()
        };

        let block = Block::default()
            .title(self.label)
            .borders(Borders::ALL)
            .border_style(border_style);

        let inner = block.inner(area);
        block.render(area, buf);

        let line = if self.editing {
            Line::from(vec![
                Span::styled(self.value, Theme::highlight()),
                Span::styled(" ", Theme::selected()),
            ])
        } else {
            let style = if self.focused {
                Theme::selected()
            } else {
                Theme::normal()
            };
            Line::from(Span::styled(self.value, style))
        };

        Paragraph::new(line).render(inner, buf);
    }
}

pub struct SelectWidget<'a> {
    label: &'a str,
    options: &'a [&'a str],
    selected: usize,
    focused: bool,
}

impl<'a> SelectWidget<'a> {
    pub fn new(label: &'a str, options: &'a [&'a str], selected: usize) -> Self {
        Self {
            label,
            options,
            selected,
            focused: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for SelectWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Theme::border_focused()
        } else {
            Theme::border()
        };

        let block = Block::default()
            .title(self.label)
            .borders(Borders::ALL)
            .border_style(border_style);

        let inner = block.inner(area);
        block.render(area, buf);

        let value = self.options.get(self.selected).unwrap_or(&"");
        let display = if self.focused {
            format!("< {} >", value)
        } else {
            value.to_string()
        };

        let style = if self.focused {
            Theme::highlight()
        } else {
            Theme::normal()
        };

        let para = Paragraph::new(Span::styled(display, style));
        para.render(inner, buf);
    }
}
