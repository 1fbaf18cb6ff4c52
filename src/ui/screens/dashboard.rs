use crate::models::{Crop, Farm, PaddyAdvice, SeasonPeriod, SensorReading, WeatherReport};
use crate::ui::components::{humidity_gauge, moisture_gauge, ph_gauge, temperature_gauge};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
};

pub struct DashboardScreen<'a> {
    pub farm: Option<&'a Farm>,
    pub weather: Option<&'a WeatherReport>,
    pub latest_reading: Option<&'a SensorReading>,
    pub crops: &'a [Crop],
    pub recommendations: &'a [PaddyAdvice],
    pub month: u32,
    pub status_message: Option<&'a str>,
}

impl<'a> DashboardScreen<'a> {
    pub fn new(
        farm: Option<&'a Farm>,
        weather: Option<&'a WeatherReport>,
        latest_reading: Option<&'a SensorReading>,
        crops: &'a [Crop],
        recommendations: &'a [PaddyAdvice],
        month: u32,
    ) -> Self {
        Self {
            farm,
            weather,
            latest_reading,
            crops,
            recommendations,
            month,
            status_message: None,
        }
    }

    pub fn with_status(mut self, status: Option<&'a str>) -> Self {
        self.status_message = status;
        self
    }
}

impl Widget for DashboardScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(5), // Gauges row
                Constraint::Min(8),    // Weather and advice
                Constraint::Length(1), // Status message
                Constraint::Length(1), // Nav bar
            ])
            .split(area);

        self.render_header(chunks[0], buf);
        self.render_gauges(chunks[1], buf);

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[2]);

        self.render_weather(middle[0], buf);
        self.render_recent_advice(middle[1], buf);

        self.render_status_message(chunks[3], buf);
        self.render_nav(chunks[4], buf);
    }
}

impl DashboardScreen<'_> {
    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let title = match self.farm {
            Some(f) => format!("PaddySense - {} ({})", f.name, f.location),
            None => "PaddySense - No Farm Configured".to_string(),
        };

        let block = Block::default()
            .title(Span::styled(title, Theme::title()))
            .borders(Borders::BOTTOM)
            .border_style(Theme::border());

        let period = SeasonPeriod::for_month(self.month);
        let info = format!(
            "{} season ({}) · {} crop(s) tracked",
            period,
            period.months_label(),
            self.crops.len()
        );
        let para = Paragraph::new(Span::styled(info, Theme::dim())).block(block);
        para.render(area, buf);
    }

    fn render_gauges(&self, area: Rect, buf: &mut Buffer) {
        let gauge_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(20),
                Constraint::Percentage(20),
                Constraint::Percentage(20),
                Constraint::Percentage(20),
                Constraint::Percentage(20),
            ])
            .split(area);

        let reading = self.latest_reading;

        let plot_temp = reading.and_then(|r| r.temperature_c);
        temperature_gauge("Plot Temp", plot_temp).render(gauge_chunks[0], buf);

        let moisture = reading.and_then(|r| r.soil_moisture_percent);
        moisture_gauge("Soil Moisture", moisture).render(gauge_chunks[1], buf);

        let humidity = reading.and_then(|r| r.humidity_percent);
        humidity_gauge("Humidity", humidity).render(gauge_chunks[2], buf);

        let ph = reading.and_then(|r| r.soil_ph);
        ph_gauge("Soil pH", ph).render(gauge_chunks[3], buf);

        let air_temp = self.weather.map(|w| w.current.temperature_c);
        temperature_gauge("Air Temp", air_temp).render(gauge_chunks[4], buf);
    }

    fn render_weather(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled("Current Weather", Theme::header()))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let report = match self.weather {
            Some(r) => r,
            None => {
                let para = Paragraph::new(Span::styled(
                    "No weather loaded. Press [r] to fetch for the farm location.",
                    Theme::dim(),
                ));
                para.render(inner, buf);
                return;
            }
        };

        let current = &report.current;
        let mut lines = vec![
            Line::from(vec![
                Span::styled(
                    format!("{} ", current.condition.symbol()),
                    Theme::normal(),
                ),
                Span::styled(current.condition.as_str(), Theme::header()),
            ]),
            Line::from(vec![
                Span::styled("Temperature: ", Theme::dim()),
                Span::styled(
                    format!("{:.1}°C", current.temperature_c),
                    Style::default().fg(Theme::temp_color(current.temperature_c)),
                ),
            ]),
        ];

        if let Some(humidity) = current.humidity_percent {
            lines.push(Line::from(vec![
                Span::styled("Humidity: ", Theme::dim()),
                Span::styled(format!("{:.0}%", humidity), Theme::normal()),
            ]));
        }
        if let Some(wind) = current.wind_speed_kmh {
            lines.push(Line::from(vec![
                Span::styled("Wind: ", Theme::dim()),
                Span::styled(format!("{:.0} km/h", wind), Theme::normal()),
            ]));
        }
        if report.rain_expected_within(3, 10.0) {
            lines.push(Line::from(Span::styled(
                "Rain expected within 3 days, hold irrigation",
                Theme::warning(),
            )));
        }
        lines.push(Line::from(vec![
            Span::styled("Resolved: ", Theme::dim()),
            Span::styled(report.resolved.display_name.as_str(), Theme::normal()),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Fetched: ", Theme::dim()),
            Span::styled(
                report.fetched_at.format("%Y-%m-%d %H:%M").to_string(),
                Theme::dim(),
            ),
        ]));

        Paragraph::new(lines).render(inner, buf);
    }

    fn render_recent_advice(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled("Recent Advice", Theme::header()))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        if self.recommendations.is_empty() {
            let para = Paragraph::new(Span::styled(
                "No recommendations yet. Open the Advisor with [2].",
                Theme::dim(),
            ));
            para.render(inner, buf);
            return;
        }

        let items: Vec<ListItem> = self
            .recommendations
            .iter()
            .take(3)
            .map(|advice| {
                let band = advice.temperature_band();
                let band_style = Style::default().fg(band.color());
                let title_line = Line::from(vec![
                    Span::styled(
                        advice.created_at.format("%m/%d %H:%M ").to_string(),
                        Theme::dim(),
                    ),
                    Span::styled(advice.location.as_str(), Theme::normal()),
                    Span::styled(format!(" {:.1}°C", advice.soil_temp_c), band_style),
                ]);
                let detail_line = Line::from(vec![
                    Span::styled("  ", Theme::dim()),
                    Span::styled(
                        advice.primary_varieties.join(", "),
                        Theme::dim(),
                    ),
                ]);
                ListItem::new(vec![title_line, detail_line])
            })
            .collect();

        List::new(items).render(inner, buf);
    }

    fn render_status_message(&self, area: Rect, buf: &mut Buffer) {
        if let Some(msg) = self.status_message {
            let style = if msg.contains("failed") || msg.contains("not found") {
                Theme::warning()
            } else {
                Theme::success()
            };
            let para = Paragraph::new(Span::styled(msg, style));
            para.render(area, buf);
        }
    }

    fn render_nav(&self, area: Rect, buf: &mut Buffer) {
        let nav = Line::from(vec![
            Span::styled("[1]", Theme::nav_key()),
            Span::styled("Dashboard ", Theme::nav_label()),
            Span::styled("[2]", Theme::nav_key()),
            Span::styled("Advisor ", Theme::nav_label()),
            Span::styled("[3]", Theme::nav_key()),
            Span::styled("Weather ", Theme::nav_label()),
            Span::styled("[4]", Theme::nav_key()),
            Span::styled("Fields ", Theme::nav_label()),
            Span::styled("[5]", Theme::nav_key()),
            Span::styled("History ", Theme::nav_label()),
            Span::styled("[6]", Theme::nav_key()),
            Span::styled("Settings ", Theme::nav_label()),
            Span::styled("[r]", Theme::nav_key()),
            Span::styled("Refresh ", Theme::nav_label()),
            Span::styled("[q]", Theme::nav_key()),
            Span::styled("Quit", Theme::nav_label()),
        ]);

        let para = Paragraph::new(nav);
        para.render(area, buf);
    }
}
