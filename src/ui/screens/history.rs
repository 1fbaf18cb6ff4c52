use crate::models::{PaddyAdvice, WeatherObservation};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, List, ListItem, Paragraph, Row, Table, TableState, Widget, Wrap},
};

pub struct HistoryScreen<'a> {
    pub recommendations: &'a [PaddyAdvice],
    pub observations: &'a [WeatherObservation],
    pub selected_index: usize,
    pub show_weather: bool,
}

impl Widget for HistoryScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title and tabs
                Constraint::Min(10),   // Content
                Constraint::Length(1), // Nav
            ])
            .split(area);

        let (rec_style, weather_style) = if self.show_weather {
            (Theme::dim(), Theme::highlight())
        } else {
            (Theme::highlight(), Theme::dim())
        };
        let title = Line::from(vec![
            Span::styled("History  ", Theme::title()),
            Span::styled("[Recommendations]", rec_style),
            Span::raw(" "),
            Span::styled("[Weather]", weather_style),
        ]);
        Paragraph::new(title).render(chunks[0], buf);

        if self.show_weather {
            self.render_weather_table(chunks[1], buf);
        } else {
            let content = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
                .split(chunks[1]);
            self.render_recommendation_list(content[0], buf);
            self.render_recommendation_detail(content[1], buf);
        }

        let nav = Line::from(vec![
            Span::styled("[Tab]", Theme::nav_key()),
            Span::styled("Switch tab ", Theme::nav_label()),
            Span::styled("[↑↓]", Theme::nav_key()),
            Span::styled("Navigate ", Theme::nav_label()),
            Span::styled("[d]", Theme::nav_key()),
            Span::styled("Delete ", Theme::nav_label()),
            Span::styled("[Esc]", Theme::nav_key()),
            Span::styled("Back", Theme::nav_label()),
        ]);
        Paragraph::new(nav).render(chunks[2], buf);
    }
}

impl HistoryScreen<'_> {
    fn render_recommendation_list(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!("Saved ({})", self.recommendations.len()))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        if self.recommendations.is_empty() {
            let para = Paragraph::new(Span::styled("No saved recommendations", Theme::dim()));
            para.render(inner, buf);
            return;
        }

        let items: Vec<ListItem> = self
            .recommendations
            .iter()
            .enumerate()
            .map(|(i, advice)| {
                let style = if i == self.selected_index {
                    Theme::selected()
                } else {
                    Style::default()
                };
                let band_style = Style::default().fg(advice.temperature_band().color());
                let line = Line::from(vec![
                    Span::styled(
                        advice.created_at.format("%m/%d ").to_string(),
                        Theme::dim(),
                    ),
                    Span::styled(advice.location.as_str(), Theme::normal()),
                    Span::styled(format!(" {:.0}°C", advice.soil_temp_c), band_style),
                ]);
                ListItem::new(line).style(style)
            })
            .collect();

        List::new(items).render(inner, buf);
    }

    fn render_recommendation_detail(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Details")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let advice = match self.recommendations.get(self.selected_index) {
            Some(a) => a,
            None => {
                let para = Paragraph::new(Span::styled(
                    "Select a recommendation to view details",
                    Theme::dim(),
                ));
                para.render(inner, buf);
                return;
            }
        };

        let band = advice.temperature_band();
        let mut lines = vec![
            Line::from(vec![
                Span::styled(
                    format!("{} · {}", advice.field_name, advice.location),
                    Theme::header(),
                ),
            ]),
            Line::from(vec![
                Span::styled(
                    format!("{:.1}°C {}", advice.soil_temp_c, band.as_str()),
                    Style::default().fg(band.color()),
                ),
                Span::styled(
                    format!("  {} soil · {} season", advice.soil_type, advice.season),
                    Theme::dim(),
                ),
            ]),
            Line::from(vec![
                Span::styled("Saved: ", Theme::dim()),
                Span::styled(
                    advice.created_at.format("%Y-%m-%d %H:%M").to_string(),
                    Theme::dim(),
                ),
            ]),
            Line::from(vec![]),
            Line::from(vec![
                Span::styled("Primary: ", Theme::dim()),
                Span::styled(advice.primary_varieties.join(", "), Theme::highlight()),
            ]),
            Line::from(vec![
                Span::styled("Secondary: ", Theme::dim()),
                Span::styled(advice.secondary_varieties.join(", "), Theme::normal()),
            ]),
            Line::from(vec![]),
            Line::from(Span::styled("Timing:", Theme::dim())),
            Line::from(Span::styled(advice.planting_timing.as_str(), Theme::normal())),
            Line::from(vec![]),
            Line::from(Span::styled("Water:", Theme::dim())),
            Line::from(Span::styled(
                advice.water_management.as_str(),
                Theme::normal(),
            )),
            Line::from(vec![]),
        ];

        if advice.risk_factors.is_empty() {
            lines.push(Line::from(Span::styled("No risk factors", Theme::success())));
        } else {
            lines.push(Line::from(Span::styled("Risks:", Theme::dim())));
            for risk in &advice.risk_factors {
                lines.push(Line::from(vec![
                    Span::styled("  ! ", Theme::error()),
                    Span::styled(risk.as_str(), Theme::error()),
                ]));
            }
        }

        let para = Paragraph::new(lines).wrap(Wrap { trim: true });
        para.render(inner, buf);
    }

    fn render_weather_table(&self, area: Rect, buf: &mut Buffer) {
        let header_cells = ["Recorded", "Location", "Temp", "RH", "Rain", "Wind", "Condition"]
            .iter()
            .map(|h| Cell::from(*h).style(Theme::header()));
        let header = Row::new(header_cells).height(1);

        let rows: Vec<Row> = self
            .observations
            .iter()
            .enumerate()
            .map(|(i, obs)| {
                let style = if i == self.selected_index {
                    Theme::selected()
                } else {
                    Theme::normal()
                };
                let temp = obs
                    .temperature_c
                    .map(|t| format!("{:.1}°C", t))
                    .unwrap_or_else(|| "-".to_string());
                let humidity = obs
                    .humidity_percent
                    .map(|h| format!("{:.0}%", h))
                    .unwrap_or_else(|| "-".to_string());
                let rain = obs
                    .rainfall_mm
                    .map(|r| format!("{:.1}mm", r))
                    .unwrap_or_else(|| "-".to_string());
                let wind = obs
                    .wind_speed_kmh
                    .map(|w| format!("{:.0}km/h", w))
                    .unwrap_or_else(|| "-".to_string());
                let condition = obs
                    .condition
                    .map(|c| format!("{} {}", c.symbol(), c.as_str()))
                    .unwrap_or_else(|| "-".to_string());

                Row::new(vec![
                    Cell::from(obs.recorded_at.format("%Y-%m-%d %H:%M").to_string()),
                    Cell::from(obs.location.clone()),
                    Cell::from(temp),
                    Cell::from(humidity),
                    Cell::from(rain),
                    Cell::from(wind),
                    Cell::from(condition),
                ])
                .style(style)
            })
            .collect();

        let widths = [
            Constraint::Length(17),
            Constraint::Min(18),
            Constraint::Length(8),
            Constraint::Length(5),
            Constraint::Length(7),
            Constraint::Length(8),
            Constraint::Min(12),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Theme::border()),
            )
            .highlight_style(Theme::selected());

        let mut state = TableState::default();
        state.select(Some(self.selected_index));
        ratatui::widgets::StatefulWidget::render(table, area, buf, &mut state);
    }
}
