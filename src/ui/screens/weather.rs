use crate::models::WeatherReport;
use crate::ui::components::InputWidget;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
};

pub struct WeatherScreen<'a> {
    pub location_input: &'a str,
    pub editing: bool,
    pub report: Option<&'a WeatherReport>,
    pub status_message: Option<&'a str>,
}

impl Widget for WeatherScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Length(3), // Location input
                Constraint::Min(10),   // Conditions and outlook
                Constraint::Length(1), // Status message
                Constraint::Length(1), // Nav
            ])
            .split(area);

        let title = Line::from(vec![
            Span::styled("Weather Lookup", Theme::title()),
            Span::styled(" - any town or district", Theme::dim()),
        ]);
        Paragraph::new(title).render(chunks[0], buf);

        InputWidget::new("Location", self.location_input)
            .focused(true)
            .editing(self.editing)
            .render(chunks[1], buf);

        let content = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(chunks[2]);

        self.render_current(content[0], buf);
        self.render_outlook(content[1], buf);

        if let Some(msg) = self.status_message {
            let style = if msg.contains("not found") || msg.contains("failed") {
                Theme::warning()
            } else {
                Theme::success()
            };
            Paragraph::new(Span::styled(msg, style)).render(chunks[3], buf);
        }

        let nav = Line::from(vec![
            Span::styled("[e]", Theme::nav_key()),
            Span::styled("Edit location ", Theme::nav_label()),
            Span::styled("[Enter]", Theme::nav_key()),
            Span::styled("Search ", Theme::nav_label()),
            Span::styled("[Esc]", Theme::nav_key()),
            Span::styled("Back", Theme::nav_label()),
        ]);
        Paragraph::new(nav).render(chunks[4], buf);
    }
}

impl WeatherScreen<'_> {
    fn render_current(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Current Conditions")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let report = match self.report {
            Some(r) => r,
            None => {
                let para = Paragraph::new(Span::styled(
                    "Enter a location and press [Enter]",
                    Theme::dim(),
                ));
                para.render(inner, buf);
                return;
            }
        };

        let current = &report.current;
        let mut lines = vec![
            Line::from(vec![
                Span::styled(format!("{} ", current.condition.symbol()), Theme::normal()),
                Span::styled(current.condition.as_str(), Theme::header()),
            ]),
            Line::from(vec![]),
            Line::from(vec![
                Span::styled("Temperature: ", Theme::dim()),
                Span::styled(
                    format!("{:.1}°C", current.temperature_c),
                    Style::default().fg(Theme::temp_color(current.temperature_c)),
                ),
            ]),
        ];

        if let Some(feels) = current.apparent_temperature_c {
            lines.push(Line::from(vec![
                Span::styled("Feels like: ", Theme::dim()),
                Span::styled(format!("{:.1}°C", feels), Theme::normal()),
            ]));
        }
        if let Some(humidity) = current.humidity_percent {
            lines.push(Line::from(vec![
                Span::styled("Humidity: ", Theme::dim()),
                Span::styled(format!("{:.0}%", humidity), Theme::normal()),
            ]));
        }
        if let Some(precip) = current.precipitation_mm {
            lines.push(Line::from(vec![
                Span::styled("Precipitation: ", Theme::dim()),
                Span::styled(format!("{:.1} mm", precip), Theme::normal()),
            ]));
        }
        if let Some(wind) = current.wind_speed_kmh {
            lines.push(Line::from(vec![
                Span::styled("Wind: ", Theme::dim()),
                Span::styled(format!("{:.0} km/h", wind), Theme::normal()),
            ]));
        }

        lines.push(Line::from(vec![]));
        lines.push(Line::from(vec![
            Span::styled("Resolved to: ", Theme::dim()),
            Span::styled(report.resolved.display_name.as_str(), Theme::highlight()),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Coordinates: ", Theme::dim()),
            Span::styled(
                format!(
                    "{:.4}, {:.4}",
                    report.resolved.latitude, report.resolved.longitude
                ),
                Theme::normal(),
            ),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Found via: ", Theme::dim()),
            Span::styled(report.strategy.as_str(), Theme::dim()),
        ]));

        Paragraph::new(lines).render(inner, buf);
    }

    fn render_outlook(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("7-Day Outlook")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let report = match self.report {
            Some(r) if !r.daily.is_empty() => r,
            _ => {
                let para = Paragraph::new(Span::styled("No outlook available", Theme::dim()));
                para.render(inner, buf);
                return;
            }
        };

        let items: Vec<ListItem> = report
            .daily
            .iter()
            .map(|day| {
                let prob = day
                    .precipitation_prob_percent
                    .map(|p| format!(" ({:.0}%)", p))
                    .unwrap_or_default();
                let line = Line::from(vec![
                    Span::styled(day.date.format("%a %m/%d").to_string(), Theme::dim()),
                    Span::raw("  "),
                    Span::styled(format!("{} ", day.condition.symbol()), Theme::normal()),
                    Span::styled(
                        format!("{:.0}°/{:.0}°C", day.high_c, day.low_c),
                        Style::default().fg(Theme::temp_color(day.high_c)),
                    ),
                    Span::styled(
                        format!("  {:.1} mm{}", day.precipitation_mm, prob),
                        Theme::dim(),
                    ),
                ]);
                ListItem::new(line)
            })
            .collect();

        List::new(items).render(inner, buf);
    }
}
