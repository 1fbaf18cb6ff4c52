use crate::config::Config;
use crate::db::Database;
use crate::error::{PaddySenseError, Result};
use crate::logic::AdvisorEngine;
use crate::models::{
    AdvisorRequest, Crop, Farm, FieldPlot, PaddyAdvice, PlantingSeason, SensorReading, SoilType,
    WeatherObservation, WeatherReport,
};
use crate::ui::screens::{AdvisorField, ReadingField, SettingsField};
use chrono::{Datelike, Local, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Advisor,
    Weather,
    Fields,
    History,
    Settings,
}

impl Screen {
    pub fn from_key(c: char) -> Option<Self> {
        match c {
            '1' => Some(Screen::Dashboard),
            '2' => Some(Screen::Advisor),
            '3' => Some(Screen::Weather),
            '4' => Some(Screen::Fields),
            '5' => Some(Screen::History),
            '6' | 's' | 'S' => Some(Screen::Settings),
            _ => None,
        }
    }
}

pub struct DashboardState {
    // Dashboard is mostly read-only
}

impl DashboardState {
    pub fn new() -> Self {
        Self {}
    }
}

pub struct AdvisorState {
    pub focused_field: AdvisorField,
    pub editing: bool,
    pub edit_buffer: String,
    pub location: String,
    pub field_name: String,
    pub soil_temp_input: String,
    pub soil_type: SoilType,
    pub season: PlantingSeason,
    pub result: Option<PaddyAdvice>,
    pub scroll: u16,
}

impl AdvisorState {
    pub fn new() -> Self {
        Self {
            focused_field: AdvisorField::Location,
            editing: false,
            edit_buffer: String::new(),
            location: String::new(),
            field_name: "Main Field".to_string(),
            soil_temp_input: String::new(),
            soil_type: SoilType::Loamy,
            season: PlantingSeason::Current,
            result: None,
            scroll: 0,
        }
    }

    pub fn next_field(&mut self) {
        self.focused_field = self.focused_field.next();
    }

    pub fn prev_field(&mut self) {
        self.focused_field = self.focused_field.prev();
    }

    pub fn start_editing(&mut self, current_value: &str) {
        self.editing = true;
        self.edit_buffer = current_value.to_string();
    }

    pub fn cancel_editing(&mut self) {
        self.editing = false;
        self.edit_buffer.clear();
    }

    pub fn finish_editing(&mut self) -> String {
        self.editing = false;
        std::mem::take(&mut self.edit_buffer)
    }

    pub fn cycle_soil_type(&mut self, forward: bool) {
        self.soil_type = cycle(SoilType::all(), self.soil_type, forward);
    }

    pub fn cycle_season(&mut self, forward: bool) {
        self.season = cycle(PlantingSeason::all(), self.season, forward);
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: T, forward: bool) -> T {
    let pos = all.iter().position(|v| *v == current).unwrap_or(0);
    let next = if forward {
        (pos + 1) % all.len()
    } else {
        (pos + all.len() - 1) % all.len()
    };
    all[next]
}

pub struct WeatherState {
    pub location_input: String,
    pub editing: bool,
}

impl WeatherState {
    pub fn new() -> Self {
        Self {
            location_input: String::new(),
            editing: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldsMode {
    Browse,
    AddingPlot,
    RecordingReading,
}

/// Text buffers for the record-a-reading modal. Empty fields are left
/// out of the stored reading.
pub struct ReadingDraft {
    pub temperature: String,
    pub humidity: String,
    pub soil_moisture: String,
    pub soil_ph: String,
}

impl ReadingDraft {
    pub fn new() -> Self {
        Self {
            temperature: String::new(),
            humidity: String::new(),
            soil_moisture: String::new(),
            soil_ph: String::new(),
        }
    }

    pub fn buffer_mut(&mut self, field: ReadingField) -> &mut String {
        match field {
            ReadingField::Temperature => &mut self.temperature,
            ReadingField::Humidity => &mut self.humidity,
            ReadingField::SoilMoisture => &mut self.soil_moisture,
            ReadingField::SoilPh => &mut self.soil_ph,
        }
    }

    pub fn buffer(&self, field: ReadingField) -> &str {
        match field {
            ReadingField::Temperature => &self.temperature,
            ReadingField::Humidity => &self.humidity,
            ReadingField::SoilMoisture => &self.soil_moisture,
            ReadingField::SoilPh => &self.soil_ph,
        }
    }

    pub fn to_reading(&self, field_plot_id: i64) -> Result<SensorReading> {
        let mut reading = SensorReading::new(field_plot_id);
        reading.timestamp = Utc::now();
        reading.temperature_c = parse_optional(&self.temperature, "temperature")?;
        reading.humidity_percent = parse_optional(&self.humidity, "humidity")?;
        reading.soil_moisture_percent = parse_optional(&self.soil_moisture, "soil moisture")?;
        reading.soil_ph = parse_optional(&self.soil_ph, "soil pH")?;

        if reading.is_empty() {
            return Err(PaddySenseError::InvalidData(
                "Enter at least one measurement".into(),
            ));
        }
        Ok(reading)
    }
}

fn parse_optional(input: &str, label: &str) -> Result<Option<f64>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<f64>()
        .map(Some)
        .map_err(|_| PaddySenseError::InvalidData(format!("Invalid {} value", label)))
}

pub struct FieldsState {
    pub selected_index: usize,
    pub mode: FieldsMode,
    pub name_buffer: String,
    pub reading_field: ReadingField,
    pub reading_draft: ReadingDraft,
}

impl FieldsState {
    pub fn new() -> Self {
        Self {
            selected_index: 0,
            mode: FieldsMode::Browse,
            name_buffer: String::new(),
            reading_field: ReadingField::Temperature,
            reading_draft: ReadingDraft::new(),
        }
    }

    pub fn next(&mut self, max: usize) {
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    pub fn prev(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn start_adding(&mut self) {
        self.mode = FieldsMode::AddingPlot;
        self.name_buffer.clear();
    }

    pub fn start_recording(&mut self) {
        self.mode = FieldsMode::RecordingReading;
        self.reading_field = ReadingField::Temperature;
        self.reading_draft = ReadingDraft::new();
    }

    pub fn cancel_modal(&mut self) {
        self.mode = FieldsMode::Browse;
        self.name_buffer.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryTab {
    Recommendations,
    Weather,
}

pub struct HistoryState {
    pub tab: HistoryTab,
    pub selected_index: usize,
}

impl HistoryState {
    pub fn new() -> Self {
        Self {
            tab: HistoryTab::Recommendations,
            selected_index: 0,
        }
    }

    pub fn toggle_tab(&mut self) {
        self.tab = match self.tab {
            HistoryTab::Recommendations => HistoryTab::Weather,
            HistoryTab::Weather => HistoryTab::Recommendations,
        };
        self.selected_index = 0;
    }

    pub fn next(&mut self, max: usize) {
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    pub fn prev(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }
}

pub struct SettingsState {
    pub focused_field: SettingsField,
    pub editing: bool,
    pub edit_buffer: String,
    pub farm_modified: bool,
}

impl SettingsState {
    pub fn new() -> Self {
        Self {
            focused_field: SettingsField::Name,
            editing: false,
            edit_buffer: String::new(),
            farm_modified: false,
        }
    }

    pub fn next_field(&mut self) {
        self.focused_field = self.focused_field.next();
    }

    pub fn prev_field(&mut self) {
        self.focused_field = self.focused_field.prev();
    }

    pub fn start_editing(&mut self, current_value: &str) {
        self.editing = true;
        self.edit_buffer = current_value.to_string();
    }

    pub fn cancel_editing(&mut self) {
        self.editing = false;
        self.edit_buffer.clear();
    }

    pub fn finish_editing(&mut self) -> String {
        self.editing = false;
        self.farm_modified = true;
        std::mem::take(&mut self.edit_buffer)
    }
}

pub struct App {
    pub screen: Screen,
    pub should_quit: bool,
    pub config: Config,
    pub db: Database,

    // Data
    pub farm: Option<Farm>,
    pub field_plots: Vec<FieldPlot>,
    pub crops: Vec<Crop>,
    pub latest_reading: Option<SensorReading>,
    pub recommendations: Vec<PaddyAdvice>,
    pub weather_history: Vec<WeatherObservation>,
    pub current_weather: Option<WeatherReport>,

    // Screen states
    pub dashboard_state: DashboardState,
    pub advisor_state: AdvisorState,
    pub weather_state: WeatherState,
    pub fields_state: FieldsState,
    pub history_state: HistoryState,
    pub settings_state: SettingsState,

    // Services
    pub advisor_engine: AdvisorEngine,

    // UI state
    pub status_message: Option<String>,
    pub refreshing: bool,
    pub needs_refresh: bool,
    pub pending_lookup: Option<String>,
}

impl App {
    pub fn new(config: Config, db: Database) -> Result<Self> {
        // Load farm record
        let farm = db.get_default_farm()?;

        // Load field plots
        let field_plots = match &farm {
            Some(f) => db.get_field_plots_for_farm(f.id.unwrap_or(0))?,
            None => Vec::new(),
        };

        let recommendations = db.get_recent_recommendations(50)?;
        let weather_history = db.get_recent_weather(50)?;

        let mut advisor_state = AdvisorState::new();
        advisor_state.location = config.farm.location.clone();

        let mut weather_state = WeatherState::new();
        weather_state.location_input = config.farm.location.clone();

        let mut app = Self {
            screen: Screen::Dashboard,
            should_quit: false,
            config,
            db,
            farm,
            field_plots,
            crops: Vec::new(),
            latest_reading: None,
            recommendations,
            weather_history,
            current_weather: None,
            dashboard_state: DashboardState::new(),
            advisor_state,
            weather_state,
            fields_state: FieldsState::new(),
            history_state: HistoryState::new(),
            settings_state: SettingsState::new(),
            advisor_engine: AdvisorEngine::new(),
            status_message: None,
            refreshing: false,
            needs_refresh: false,
            pending_lookup: None,
        };
        app.reload_plot_details()?;

        Ok(app)
    }

    pub fn switch_screen(&mut self, screen: Screen) {
        self.screen = screen;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_status(&mut self, message: &str) {
        self.status_message = Some(message.to_string());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn request_refresh(&mut self) {
        self.needs_refresh = true;
        self.set_status("Refreshing weather...");
    }

    pub fn request_lookup(&mut self, location: &str) {
        self.pending_lookup = Some(location.to_string());
        self.set_status("Looking up weather...");
    }

    /// Run the advisor over the current form inputs and persist the result.
    pub fn generate_advice(&mut self) -> Result<()> {
        let location = self.advisor_state.location.trim().to_string();
        if location.is_empty() {
            return Err(PaddySenseError::InvalidData("Location is required".into()));
        }

        let soil_temp_c: f64 = self
            .advisor_state
            .soil_temp_input
            .trim()
            .parse()
            .map_err(|_| {
                PaddySenseError::InvalidData("Soil temperature must be a number".into())
            })?;

        let field_name = match self.advisor_state.field_name.trim() {
            "" => "Main Field".to_string(),
            name => name.to_string(),
        };

        let request = AdvisorRequest {
            location,
            field_name,
            soil_temp_c,
            soil_type: self.advisor_state.soil_type,
            season: self.advisor_state.season,
            month: Local::now().month(),
        };

        let mut advice = self.advisor_engine.advise(&request);
        let id = self.db.save_recommendation(&advice)?;
        advice.id = Some(id);

        self.advisor_state.result = Some(advice);
        self.advisor_state.scroll = 0;
        self.reload_recommendations()?;
        Ok(())
    }

    pub fn selected_plot(&self) -> Option<&FieldPlot> {
        self.field_plots.get(self.fields_state.selected_index)
    }

    /// Reload crops and the latest reading for the currently selected plot.
    pub fn reload_plot_details(&mut self) -> Result<()> {
        let plot_id = self.selected_plot().and_then(|p| p.id);
        match plot_id {
            Some(id) => {
                self.crops = self.db.get_crops_for_plot(id)?;
                self.latest_reading = self.db.get_latest_reading(id)?;
            }
            None => {
                self.crops = Vec::new();
                self.latest_reading = None;
            }
        }
        Ok(())
    }

    pub fn reload_field_plots(&mut self) -> Result<()> {
        if let Some(ref farm) = self.farm {
            if let Some(farm_id) = farm.id {
                self.field_plots = self.db.get_field_plots_for_farm(farm_id)?;
            }
        }
        if self.fields_state.selected_index >= self.field_plots.len() {
            self.fields_state.selected_index = self.field_plots.len().saturating_sub(1);
        }
        self.reload_plot_details()
    }

    pub fn add_field_plot(&mut self, name: &str) -> Result<i64> {
        let farm_id = self
            .farm
            .as_ref()
            .and_then(|f| f.id)
            .ok_or_else(|| PaddySenseError::NotFound("No farm configured".into()))?;
        let plot = FieldPlot::new(farm_id, name.to_string());
        let id = self.db.create_field_plot(&plot)?;
        self.reload_field_plots()?;
        Ok(id)
    }

    pub fn delete_selected_plot(&mut self) -> Result<()> {
        if let Some(id) = self.selected_plot().and_then(|p| p.id) {
            self.db.delete_field_plot(id)?;
            self.reload_field_plots()?;
        }
        Ok(())
    }

    pub fn record_reading(&mut self) -> Result<()> {
        let plot_id = self
            .selected_plot()
            .and_then(|p| p.id)
            .ok_or_else(|| PaddySenseError::NotFound("No field plot selected".into()))?;
        let reading = self.fields_state.reading_draft.to_reading(plot_id)?;
        self.db.insert_sensor_reading(&reading)?;
        self.reload_plot_details()?;
        Ok(())
    }

    pub fn reload_recommendations(&mut self) -> Result<()> {
        self.recommendations = self.db.get_recent_recommendations(50)?;
        if self.history_state.selected_index >= self.recommendations.len() {
            self.history_state.selected_index = self.recommendations.len().saturating_sub(1);
        }
        Ok(())
    }

    pub fn delete_selected_recommendation(&mut self) -> Result<()> {
        let selected = self
            .recommendations
            .get(self.history_state.selected_index)
            .and_then(|r| r.id);
        if let Some(id) = selected {
            self.db.delete_recommendation(id)?;
            self.reload_recommendations()?;
        }
        Ok(())
    }

    pub fn reload_weather_history(&mut self) -> Result<()> {
        self.weather_history = self.db.get_recent_weather(50)?;
        Ok(())
    }

    pub fn update_weather(&mut self, report: WeatherReport) {
        self.current_weather = Some(report);
        if let Err(e) = self.reload_weather_history() {
            tracing::warn!("Failed to reload weather history: {}", e);
        }
    }

    pub fn save_farm(&mut self, farm: Farm) -> Result<()> {
        if farm.id.is_some() {
            self.db.update_farm(&farm)?;
            self.farm = Some(farm);
        } else {
            let id = self.db.create_farm(&farm)?;
            let mut f = farm;
            f.id = Some(id);
            self.farm = Some(f);
        }
        Ok(())
    }

    pub fn create_default_farm(&mut self) -> Result<()> {
        let farm = Farm::new(
            self.config.farm.name.clone(),
            self.config.farm.location.clone(),
        );
        let id = self.db.create_farm(&farm)?;
        let mut f = farm;
        f.id = Some(id);
        self.farm = Some(f);
        Ok(())
    }

    /// Write the current weather settings back to the default config path.
    pub fn save_config(&self) -> Result<()> {
        let path = Config::default_config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(&self.config)
            .map_err(|e| PaddySenseError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(&path, yaml)?;
        Ok(())
    }
}
