use crate::models::{Crop, FieldPlot, SensorReading};
use crate::ui::components::InputWidget;
use crate::ui::Theme;
use chrono::Local;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, List, ListItem, Paragraph, Row, Table, TableState, Widget},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadingField {
    Temperature,
    Humidity,
    SoilMoisture,
    SoilPh,
}

impl ReadingField {
    pub fn all() -> &'static [ReadingField] {
        &[
            ReadingField::Temperature,
            ReadingField::Humidity,
            ReadingField::SoilMoisture,
            ReadingField::SoilPh,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReadingField::Temperature => "Temperature (°C)",
            ReadingField::Humidity => "Humidity (%)",
            ReadingField::SoilMoisture => "Soil Moisture (%)",
            ReadingField::SoilPh => "Soil pH",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            ReadingField::Temperature => 0,
            ReadingField::Humidity => 1,
            ReadingField::SoilMoisture => 2,
            ReadingField::SoilPh => 3,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            ReadingField::Temperature => ReadingField::Humidity,
            ReadingField::Humidity => ReadingField::SoilMoisture,
            ReadingField::SoilMoisture => ReadingField::SoilPh,
            ReadingField::SoilPh => ReadingField::Temperature,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            ReadingField::Temperature => ReadingField::SoilPh,
            ReadingField::Humidity => ReadingField::Temperature,
            ReadingField::SoilMoisture => ReadingField::Humidity,
            ReadingField::SoilPh => ReadingField::SoilMoisture,
        }
    }
}

pub struct FieldsScreen<'a> {
    pub plots: &'a [FieldPlot],
    pub crops: &'a [Crop],
    pub latest_reading: Option<&'a SensorReading>,
    pub selected_index: usize,
    pub adding_plot: bool,
    pub name_buffer: &'a str,
    pub recording_reading: bool,
    pub reading_field: ReadingField,
    pub reading_buffers: [&'a str; 4],
}

impl Widget for FieldsScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Min(10),   // Plot list and detail
                Constraint::Length(1), // Nav
            ])
            .split(area);

        let title = Line::from(vec![
            Span::styled("Field Plots", Theme::title()),
            Span::styled(format!(" ({} plots)", self.plots.len()), Theme::dim()),
        ]);
        Paragraph::new(title).render(chunks[0], buf);

        let content = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
            .split(chunks[1]);

        self.render_plot_list(content[0], buf);

        if self.adding_plot {
            self.render_add_form(content[1], buf);
        } else if self.recording_reading {
            self.render_reading_form(content[1], buf);
        } else {
            self.render_detail(content[1], buf);
        }

        let nav = Line::from(vec![
            Span::styled("[↑↓]", Theme::nav_key()),
            Span::styled("Navigate ", Theme::nav_label()),
            Span::styled("[a]", Theme::nav_key()),
            Span::styled("Add plot ", Theme::nav_label()),
            Span::styled("[m]", Theme::nav_key()),
            Span::styled("Record reading ", Theme::nav_label()),
            Span::styled("[d]", Theme::nav_key()),
            Span::styled("Delete ", Theme::nav_label()),
            Span::styled("[Esc]", Theme::nav_key()),
            Span::styled("Back", Theme::nav_label()),
        ]);
        Paragraph::new(nav).render(chunks[2], buf);
    }
}

impl FieldsScreen<'_> {
    fn render_plot_list(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Plots")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        if self.plots.is_empty() {
            let para = Paragraph::new(Span::styled(
                "No plots yet. Press [a] to add one.",
                Theme::dim(),
            ));
            para.render(inner, buf);
            return;
        }

        let items: Vec<ListItem> = self
            .plots
            .iter()
            .enumerate()
            .map(|(i, plot)| {
                let style = if i == self.selected_index {
                    Theme::selected()
                } else {
                    Theme::normal()
                };
                let status_style = Style::default().fg(plot.status.color());
                let area_str = plot
                    .area_hectares
                    .map(|a| format!(" {:.1} ha", a))
                    .unwrap_or_default();
                let line = Line::from(vec![
                    Span::styled(plot.name.as_str(), style),
                    Span::styled(area_str, Theme::dim()),
                    Span::raw(" "),
                    Span::styled(plot.status.as_str(), status_style),
                ]);
                ListItem::new(line).style(style)
            })
            .collect();

        List::new(items).render(inner, buf);
    }

    fn render_detail(&self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(6), Constraint::Length(4)])
            .split(area);

        self.render_crops(chunks[0], buf);
        self.render_latest_reading(chunks[1], buf);
    }

    fn render_crops(&self, area: Rect, buf: &mut Buffer) {
        let plot_name = self
            .plots
            .get(self.selected_index)
            .map(|p| p.name.as_str())
            .unwrap_or("-");

        let block = Block::default()
            .title(format!("Crops - {}", plot_name))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        if self.crops.is_empty() {
            let inner = block.inner(area);
            block.render(area, buf);
            let para = Paragraph::new(Span::styled("No crops recorded", Theme::dim()));
            para.render(inner, buf);
            return;
        }

        let header_cells = ["Crop", "Variety", "Planted", "Stage", "Harvest in"]
            .iter()
            .map(|h| Cell::from(*h).style(Theme::header()));
        let header = Row::new(header_cells).height(1);

        let today = Local::now().date_naive();
        let rows: Vec<Row> = self
            .crops
            .iter()
            .map(|crop| {
                let stage_style = Style::default().fg(crop.growth_stage.color());
                let harvest = match crop.expected_harvest_date {
                    Some(_) => format!("{} days", crop.days_to_harvest(today)),
                    None => "-".to_string(),
                };
                Row::new(vec![
                    Cell::from(crop.name.as_str()),
                    Cell::from(crop.variety.as_str()),
                    Cell::from(crop.planting_date.format("%Y-%m-%d").to_string()),
                    Cell::from(crop.growth_stage.as_str()).style(stage_style),
                    Cell::from(harvest),
                ])
            })
            .collect();

        let widths = [
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Min(10),
        ];

        let table = Table::new(rows, widths).header(header).block(block);

        let mut state = TableState::default();
        ratatui::widgets::StatefulWidget::render(table, area, buf, &mut state);
    }

    fn render_latest_reading(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Latest Reading")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let reading = match self.latest_reading {
            Some(r) => r,
            None => {
                let para = Paragraph::new(Span::styled(
                    "No readings for this plot. Press [m] to record one.",
                    Theme::dim(),
                ));
                para.render(inner, buf);
                return;
            }
        };

        let mut spans = vec![Span::styled(
            reading.timestamp.format("%Y-%m-%d %H:%M  ").to_string(),
            Theme::dim(),
        )];
        if let Some(t) = reading.temperature_c {
            spans.push(Span::styled(
                format!("{:.1}°C  ", t),
                Style::default().fg(Theme::temp_color(t)),
            ));
        }
        if let Some(h) = reading.humidity_percent {
            spans.push(Span::styled(format!("RH {:.0}%  ", h), Theme::normal()));
        }
        if let Some(m) = reading.soil_moisture_percent {
            spans.push(Span::styled(
                format!("moisture {:.0}%  ", m),
                Style::default().fg(Theme::moisture_color(m)),
            ));
        }
        if let Some(ph) = reading.soil_ph {
            let style = if reading.ph_in_paddy_range() == Some(true) {
                Theme::success()
            } else {
                Theme::warning()
            };
            spans.push(Span::styled(format!("pH {:.1}", ph), style));
        }

        Paragraph::new(Line::from(spans)).render(inner, buf);
    }

    fn render_add_form(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Add Plot")
            .borders(Borders::ALL)
            .border_style(Theme::border_focused());

        let inner = block.inner(area);
        block.render(area, buf);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(1)])
            .split(inner);

        InputWidget::new("Plot name", self.name_buffer)
            .focused(true)
            .editing(true)
            .render(rows[0], buf);

        Paragraph::new(Span::styled(
            "[Enter] save  [Esc] cancel",
            Theme::dim(),
        ))
        .render(rows[1], buf);
    }

    fn render_reading_form(&self, area: Rect, buf: &mut Buffer) {
        let plot_name = self
            .plots
            .get(self.selected_index)
            .map(|p| p.name.as_str())
            .unwrap_or("-");

        let block = Block::default()
            .title(format!("Record Reading - {}", plot_name))
            .borders(Borders::ALL)
            .border_style(Theme::border_focused());

        let inner = block.inner(area);
        block.render(area, buf);

        let constraints: Vec<Constraint> = ReadingField::all()
            .iter()
            .map(|_| Constraint::Length(3))
            .chain(std::iter::once(Constraint::Min(1)))
            .collect();

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        for (i, field) in ReadingField::all().iter().enumerate() {
            let focused = *field == self.reading_field;
            InputWidget::new(field.label(), self.reading_buffers[field.index()])
                .focused(focused)
                .editing(focused)
                .render(rows[i], buf);
        }

        Paragraph::new(Span::styled(
            "[Tab] next field  [Enter] save  [Esc] cancel  (blank fields are skipped)",
            Theme::dim(),
        ))
        .render(rows[ReadingField::all().len()], buf);
    }
}
