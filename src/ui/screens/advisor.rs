use crate::models::{PaddyAdvice, PlantingSeason, SoilType};
use crate::ui::components::{InputWidget, SelectWidget};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvisorField {
    Location,
    FieldName,
    SoilTemp,
    SoilType,
    Season,
}

impl AdvisorField {
    pub fn all() -> &'static [AdvisorField] {
        &[
            AdvisorField::Location,
            AdvisorField::FieldName,
            AdvisorField::SoilTemp,
            AdvisorField::SoilType,
            AdvisorField::Season,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            AdvisorField::Location => "Location",
            AdvisorField::FieldName => "Field Name",
            AdvisorField::SoilTemp => "Soil Temperature (°C)",
            AdvisorField::SoilType => "Soil Type",
            AdvisorField::Season => "Planting Season",
        }
    }

    pub fn is_selector(&self) -> bool {
        matches!(self, AdvisorField::SoilType | AdvisorField::Season)
    }

    pub fn next(&self) -> Self {
        match self {
            AdvisorField::Location => AdvisorField::FieldName,
            AdvisorField::FieldName => AdvisorField::SoilTemp,
            AdvisorField::SoilTemp => AdvisorField::SoilType,
            AdvisorField::SoilType => AdvisorField::Season,
            AdvisorField::Season => AdvisorField::Location,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            AdvisorField::Location => AdvisorField::Season,
            AdvisorField::FieldName => AdvisorField::Location,
            AdvisorField::SoilTemp => AdvisorField::FieldName,
            AdvisorField::SoilType => AdvisorField::SoilTemp,
            AdvisorField::Season => AdvisorField::SoilType,
        }
    }
}

pub struct AdvisorScreen<'a> {
    pub location: &'a str,
    pub field_name: &'a str,
    pub soil_temp_input: &'a str,
    pub soil_type: SoilType,
    pub season: PlantingSeason,
    pub focused_field: AdvisorField,
    pub editing: bool,
    pub edit_buffer: &'a str,
    pub result: Option<&'a PaddyAdvice>,
    pub scroll: u16,
    pub status_message: Option<&'a str>,
}

impl Widget for AdvisorScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Min(10),   // Form and result
                Constraint::Length(1), // Status message
                Constraint::Length(1), // Nav
            ])
            .split(area);

        let title = Line::from(vec![
            Span::styled("Paddy Advisor", Theme::title()),
            Span::styled(" - variety and cultivation guidance", Theme::dim()),
        ]);
        Paragraph::new(title).render(chunks[0], buf);

        let content = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(40), Constraint::Min(40)])
            .split(chunks[1]);

        self.render_form(content[0], buf);
        self.render_result(content[1], buf);

        if let Some(msg) = self.status_message {
            let style = if msg.starts_with("Saved") {
                Theme::success()
            } else {
                Theme::warning()
            };
            Paragraph::new(Span::styled(msg, style)).render(chunks[2], buf);
        }

        let nav = Line::from(vec![
            Span::styled("[↑↓]", Theme::nav_key()),
            Span::styled("Field ", Theme::nav_label()),
            Span::styled("[Enter]", Theme::nav_key()),
            Span::styled("Edit ", Theme::nav_label()),
            Span::styled("[←→]", Theme::nav_key()),
            Span::styled("Cycle ", Theme::nav_label()),
            Span::styled("[g]", Theme::nav_key()),
            Span::styled("Generate ", Theme::nav_label()),
            Span::styled("[PgUp/PgDn]", Theme::nav_key()),
            Span::styled("Scroll ", Theme::nav_label()),
            Span::styled("[Esc]", Theme::nav_key()),
            Span::styled("Back", Theme::nav_label()),
        ]);
        Paragraph::new(nav).render(chunks[3], buf);
    }
}

impl AdvisorScreen<'_> {
    fn render_form(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Field Conditions")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let constraints: Vec<Constraint> = AdvisorField::all()
            .iter()
            .map(|_| Constraint::Length(3))
            .chain(std::iter::once(Constraint::Min(1)))
            .collect();

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        for (i, field) in AdvisorField::all().iter().enumerate() {
            let focused = *field == self.focused_field;
            match field {
                AdvisorField::Location | AdvisorField::FieldName | AdvisorField::SoilTemp => {
                    let stored = match field {
                        AdvisorField::Location => self.location,
                        AdvisorField::FieldName => self.field_name,
                        _ => self.soil_temp_input,
                    };
                    let editing = focused && self.editing;
                    let value = if editing { self.edit_buffer } else { stored };
                    InputWidget::new(field.label(), value)
                        .focused(focused)
                        .editing(editing)
                        .render(rows[i], buf);
                }
                AdvisorField::SoilType => {
                    let options: Vec<&str> =
                        SoilType::all().iter().map(|s| s.label()).collect();
                    let selected = SoilType::all()
                        .iter()
                        .position(|s| *s == self.soil_type)
                        .unwrap_or(0);
                    SelectWidget::new(field.label(), &options, selected)
                        .focused(focused)
                        .render(rows[i], buf);
                }
                AdvisorField::Season => {
                    let options: Vec<&str> =
                        PlantingSeason::all().iter().map(|s| s.label()).collect();
                    let selected = PlantingSeason::all()
                        .iter()
                        .position(|s| *s == self.season)
                        .unwrap_or(0);
                    SelectWidget::new(field.label(), &options, selected)
                        .focused(focused)
                        .render(rows[i], buf);
                }
            }
        }

        let hint = Paragraph::new(Span::styled(
            "Press [g] to generate advice",
            Theme::dim(),
        ));
        hint.render(rows[AdvisorField::all().len()], buf);
    }

    fn render_result(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Recommendation")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let advice = match self.result {
            Some(a) => a,
            None => {
                let para = Paragraph::new(Span::styled(
                    "Fill in the field conditions and press [g]",
                    Theme::dim(),
                ));
                para.render(inner, buf);
                return;
            }
        };

        let band = advice.temperature_band();
        let band_style = Style::default().fg(band.color());

        let mut lines = Vec::new();

        lines.push(Line::from(vec![
            Span::styled(format!("{} · {}", advice.field_name, advice.location), Theme::header()),
        ]));
        lines.push(Line::from(vec![
            Span::styled(format!("{:.1}°C ", advice.soil_temp_c), band_style),
            Span::styled(
                format!("{} ({})", band.as_str(), band.range_label()),
                band_style,
            ),
            Span::styled(
                format!("  {} soil, {} season", advice.soil_type, advice.season),
                Theme::dim(),
            ),
        ]));
        lines.push(Line::from(vec![]));

        lines.push(Line::from(Span::styled("Recommended Varieties:", Theme::dim())));
        lines.push(Line::from(vec![
            Span::styled("  Primary: ", Theme::dim()),
            Span::styled(advice.primary_varieties.join(", "), Theme::highlight()),
        ]));
        lines.push(Line::from(vec![
            Span::styled("  Secondary: ", Theme::dim()),
            Span::styled(advice.secondary_varieties.join(", "), Theme::normal()),
        ]));
        lines.push(Line::from(vec![
            Span::styled("  Seasonal: ", Theme::dim()),
            Span::styled(advice.seasonal_varieties.join(", "), Theme::normal()),
        ]));
        lines.push(Line::from(vec![]));

        for (heading, body) in [
            ("Planting Timing:", &advice.planting_timing),
            ("Soil Preparation:", &advice.soil_preparation),
            ("Water Management:", &advice.water_management),
            ("Fertilizer:", &advice.fertilizer_tips),
        ] {
            lines.push(Line::from(Span::styled(heading, Theme::dim())));
            lines.push(Line::from(Span::styled(body.as_str(), Theme::normal())));
            lines.push(Line::from(vec![]));
        }

        lines.push(Line::from(Span::styled("Risk Factors:", Theme::dim())));
        if advice.risk_factors.is_empty() {
            lines.push(Line::from(Span::styled(
                "  None at these conditions",
                Theme::success(),
            )));
        } else {
            for risk in &advice.risk_factors {
                lines.push(Line::from(vec![
                    Span::styled("  ! ", Theme::error()),
                    Span::styled(risk.as_str(), Theme::error()),
                ]));
            }
        }
        lines.push(Line::from(vec![]));

        lines.push(Line::from(Span::styled("Immediate Actions:", Theme::dim())));
        for action in &advice.immediate_actions {
            lines.push(Line::from(vec![
                Span::styled("  - ", Theme::success()),
                Span::styled(action.as_str(), Theme::success()),
            ]));
        }
        lines.push(Line::from(vec![]));

        lines.push(Line::from(Span::styled("Right Now:", Theme::dim())));
        lines.push(Line::from(Span::styled(
            advice.current_time_recommendations.as_str(),
            Theme::normal(),
        )));
        lines.push(Line::from(vec![]));

        lines.push(Line::from(Span::styled("Optimal Conditions:", Theme::dim())));
        for condition in &advice.optimal_conditions {
            lines.push(Line::from(vec![
                Span::styled("  - ", Theme::dim()),
                Span::styled(condition.as_str(), Theme::normal()),
            ]));
        }
        lines.push(Line::from(vec![]));

        lines.push(Line::from(Span::styled(
            advice.explanation.as_str(),
            Theme::dim(),
        )));

        let para = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0));
        para.render(inner, buf);
    }
}
