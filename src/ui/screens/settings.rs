use crate::config::Config;
use crate::models::Farm;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    Name,
    Location,
    Area,
    SoilType,
    ContactEmail,
    RefreshInterval,
}

impl SettingsField {
    pub fn all() -> &'static [SettingsField] {
        &[
            SettingsField::Name,
            SettingsField::Location,
            SettingsField::Area,
            SettingsField::SoilType,
            SettingsField::ContactEmail,
            SettingsField::RefreshInterval,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            SettingsField::Name => "Farm Name",
            SettingsField::Location => "Location",
            SettingsField::Area => "Area (hectares)",
            SettingsField::SoilType => "Soil Type",
            SettingsField::ContactEmail => "Geocoder Contact Email",
            SettingsField::RefreshInterval => "Weather Refresh (minutes)",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            SettingsField::Name => SettingsField::Location,
            SettingsField::Location => SettingsField::Area,
            SettingsField::Area => SettingsField::SoilType,
            SettingsField::SoilType => SettingsField::ContactEmail,
            SettingsField::ContactEmail => SettingsField::RefreshInterval,
            SettingsField::RefreshInterval => SettingsField::Name,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            SettingsField::Name => SettingsField::RefreshInterval,
            SettingsField::Location => SettingsField::Name,
            SettingsField::Area => SettingsField::Location,
            SettingsField::SoilType => SettingsField::Area,
            SettingsField::ContactEmail => SettingsField::SoilType,
            SettingsField::RefreshInterval => SettingsField::ContactEmail,
        }
    }
}

pub struct SettingsScreen<'a> {
    pub farm: Option<&'a Farm>,
    pub config: &'a Config,
    pub focused_field: SettingsField,
    pub editing: bool,
    pub edit_buffer: String,
}

impl<'a> SettingsScreen<'a> {
    pub fn new(farm: Option<&'a Farm>, config: &'a Config) -> Self {
        Self {
            farm,
            config,
            focused_field: SettingsField::Name,
            editing: false,
            edit_buffer: String::new(),
        }
    }

    pub fn with_focus(mut self, field: SettingsField) -> Self {
        self.focused_field = field;
        self
    }

    pub fn editing(mut self, editing: bool, buffer: &str) -> Self {
        self.editing = editing;
        self.edit_buffer = buffer.to_string();
        self
    }

    fn get_field_value(&self, field: SettingsField) -> String {
        match field {
            SettingsField::Name => self
                .farm
                .map(|f| f.name.clone())
                .unwrap_or_else(|| self.config.farm.name.clone()),
            SettingsField::Location => self
                .farm
                .map(|f| f.location.clone())
                .unwrap_or_else(|| self.config.farm.location.clone()),
            SettingsField::Area => self
                .farm
                .and_then(|f| f.area_hectares)
                .map(|a| format!("{:.2}", a))
                .unwrap_or_else(|| "Not set".to_string()),
            SettingsField::SoilType => self
                .farm
                .and_then(|f| f.soil_type.clone())
                .unwrap_or_else(|| "Not set".to_string()),
            SettingsField::ContactEmail => self
                .config
                .weather
                .contact_email
                .clone()
                .unwrap_or_else(|| "Not set".to_string()),
            SettingsField::RefreshInterval => {
                self.config.weather.refresh_interval_minutes.to_string()
            }
        }
    }
}

impl Widget for SettingsScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Min(20),   // Form (6 fields * 3 lines + borders)
                Constraint::Length(4), // Help
                Constraint::Length(1), // Nav
            ])
            .split(area);

        let title = Line::from(vec![
            Span::styled("Settings", Theme::title()),
            Span::styled(" - Farm & Weather", Theme::dim()),
        ]);
        Paragraph::new(title).render(chunks[0], buf);

        self.render_form(chunks[1], buf);
        self.render_help(chunks[2], buf);

        let nav = Line::from(vec![
            Span::styled("[↑↓]", Theme::nav_key()),
            Span::styled("Navigate ", Theme::nav_label()),
            Span::styled("[Enter]", Theme::nav_key()),
            Span::styled("Edit ", Theme::nav_label()),
            Span::styled("[Esc]", Theme::nav_key()),
            Span::styled("Cancel/Back", Theme::nav_label()),
        ]);
        Paragraph::new(nav).render(chunks[3], buf);
    }
}

impl SettingsScreen<'_> {
    fn render_form(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Farm Profile")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let constraints: Vec<Constraint> = SettingsField::all()
            .iter()
            .map(|_| Constraint::Length(3))
            .collect();

        let field_areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        for (i, field) in SettingsField::all().iter().enumerate() {
            let is_focused = *field == self.focused_field;

            let value = if is_focused && self.editing {
                format!("{}_", self.edit_buffer)
            } else {
                self.get_field_value(*field)
            };

            let border_style = if is_focused {
                Theme::border_focused()
            } else {
                Theme::border()
            };

            let value_style = if is_focused && self.editing {
                Theme::highlight()
            } else if is_focused {
                Theme::selected()
            } else {
                Theme::normal()
            };

            let field_block = Block::default()
                .title(field.label())
                .borders(Borders::ALL)
                .border_style(border_style);

            let field_inner = field_block.inner(field_areas[i]);
            field_block.render(field_areas[i], buf);

            let para = Paragraph::new(Span::styled(value, value_style));
            para.render(field_inner, buf);
        }
    }

    fn render_help(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Field Notes")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let help_text = match self.focused_field {
            SettingsField::Name => "Display name for the farm",
            SettingsField::Location => {
                "Town or district used for weather lookups (e.g. Kurunegala, Sri Lanka)"
            }
            SettingsField::Area => "Total cultivated area in hectares",
            SettingsField::SoilType => "Predominant soil, free text (e.g. clay, loamy)",
            SettingsField::ContactEmail => {
                "Sent in the geocoder user agent per its usage policy; blank to omit"
            }
            SettingsField::RefreshInterval => "How often the farm weather auto-refreshes",
        };

        let para = Paragraph::new(Span::styled(help_text, Theme::dim()));
        para.render(inner, buf);
    }
}
