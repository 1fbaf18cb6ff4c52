mod app;
mod cli;
mod config;
mod datasources;
mod db;
mod error;
mod logic;
mod models;
mod ui;

use app::{App, FieldsMode, HistoryTab, Screen};
use chrono::{Datelike, Local};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use datasources::{GeocodingClient, OpenMeteoClient};
use db::Database;
use error::{PaddySenseError, Result};
use logic::WeatherSyncService;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;
use ui::screens::{
    AdvisorField, AdvisorScreen, DashboardScreen, FieldsScreen, HistoryScreen, SettingsField,
    SettingsScreen, WeatherScreen,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Subcommands run on the plain terminal, before any TUI setup
    match cli.command {
        Some(Commands::Init) => {
            init_console_logging(cli.verbose);
            Config::setup_interactive()?;
            return Ok(());
        }
        Some(Commands::Check) => {
            init_console_logging(cli.verbose);
            return run_check(cli.config).await;
        }
        None => {}
    }

    // The TUI owns stdout, so logs go to a file under the data dir
    init_file_logging(cli.verbose, cli.data_dir.as_ref())?;

    // Load configuration, walking through setup on first launch
    let config = if Config::exists(cli.config.as_ref()) {
        match Config::load(cli.config.clone()) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        }
    } else if cli.config.is_none() {
        Config::setup_interactive()?.0
    } else {
        eprintln!("Config file not found at {:?}", cli.config.unwrap());
        std::process::exit(1);
    };

    // Initialize database
    let db = Database::open(cli.data_dir.as_ref())?;

    // Create app
    let mut app = App::new(config.clone(), db)?;

    // Create a farm record if none exists
    if app.farm.is_none() {
        app.create_default_farm()?;
    }

    // Initialize weather sync and fetch initial conditions
    let weather_sync = WeatherSyncService::new(config, app.db.clone());

    let status = weather_sync.check_connections().await;
    let mut status_parts = Vec::new();
    if status.geocoding {
        status_parts.push("Geocoder: OK");
    } else {
        status_parts.push("Geocoder: OFFLINE");
    }
    if status.openmeteo {
        status_parts.push("Open-Meteo: OK");
    } else {
        status_parts.push("Open-Meteo: OFFLINE");
    }

    if status.all_connected() {
        match weather_sync.refresh().await {
            Ok(report) => app.update_weather(report),
            Err(e) => tracing::warn!("Initial weather refresh failed: {}", e),
        }
    }
    app.set_status(&status_parts.join(" | "));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the main loop
    let result = run_app(&mut terminal, &mut app, &weather_sync).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn log_filter(verbose: u8) -> EnvFilter {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

fn init_console_logging(verbose: u8) {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose))
        .with_writer(io::stderr)
        .init();
}

fn init_file_logging(verbose: u8, data_dir: Option<&PathBuf>) -> Result<()> {
    let log_path = Config::data_dir(data_dir)?.join("paddysense.log");
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose))
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// `paddysense check`: validate config and probe both weather services.
async fn run_check(config_override: Option<PathBuf>) -> Result<()> {
    let config = match Config::load(config_override) {
        Ok(c) => {
            println!("✓ Config loaded ({} - {})", c.farm.name, c.farm.location);
            c
        }
        Err(e) => {
            println!("✗ {}", e);
            std::process::exit(1);
        }
    };

    let geocoder = GeocodingClient::new(&config.user_agent())?;
    let meteo = OpenMeteoClient::new()?;

    let geo_ok = geocoder.test_connection().await.unwrap_or(false);
    if geo_ok {
        println!("✓ Geocoding service reachable");
    } else {
        println!("✗ Geocoding service unreachable");
    }

    let meteo_ok = meteo.test_connection().await.unwrap_or(false);
    if meteo_ok {
        println!("✓ Forecast service reachable");
    } else {
        println!("✗ Forecast service unreachable");
    }

    if geo_ok {
        match geocoder.resolve(&config.farm.location).await {
            Ok((candidate, strategy)) => {
                println!(
                    "✓ Farm location resolved: {} ({:.4}, {:.4}) via {}",
                    candidate.display_name,
                    candidate.latitude,
                    candidate.longitude,
                    strategy.as_str()
                );
            }
            Err(e) => println!("✗ Farm location \"{}\": {}", config.farm.location, e),
        }
    }

    if !(geo_ok && meteo_ok) {
        std::process::exit(1);
    }
    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    weather_sync: &WeatherSyncService,
) -> Result<()>
where
    PaddySenseError: From<B::Error>,
{
    let mut last_refresh = Instant::now();

    loop {
        // Draw UI
        terminal.draw(|f| {
            let area = f.area();

            match app.screen {
                Screen::Dashboard => {
                    let screen = DashboardScreen::new(
                        app.farm.as_ref(),
                        app.current_weather.as_ref(),
                        app.latest_reading.as_ref(),
                        &app.crops,
                        &app.recommendations,
                        Local::now().month(),
                    )
                    .with_status(app.status_message.as_deref());
                    f.render_widget(screen, area);
                }
                Screen::Advisor => {
                    let screen = AdvisorScreen {
                        location: &app.advisor_state.location,
                        field_name: &app.advisor_state.field_name,
                        soil_temp_input: &app.advisor_state.soil_temp_input,
                        soil_type: app.advisor_state.soil_type,
                        season: app.advisor_state.season,
                        focused_field: app.advisor_state.focused_field,
                        editing: app.advisor_state.editing,
                        edit_buffer: &app.advisor_state.edit_buffer,
                        result: app.advisor_state.result.as_ref(),
                        scroll: app.advisor_state.scroll,
                        status_message: app.status_message.as_deref(),
                    };
                    f.render_widget(screen, area);
                }
                Screen::Weather => {
                    let screen = WeatherScreen {
                        location_input: &app.weather_state.location_input,
                        editing: app.weather_state.editing,
                        report: app.current_weather.as_ref(),
                        status_message: app.status_message.as_deref(),
                    };
                    f.render_widget(screen, area);
                }
                Screen::Fields => {
                    let state = &app.fields_state;
                    let screen = FieldsScreen {
                        plots: &app.field_plots,
                        crops: &app.crops,
                        latest_reading: app.latest_reading.as_ref(),
                        selected_index: state.selected_index,
                        adding_plot: state.mode == FieldsMode::AddingPlot,
                        name_buffer: &state.name_buffer,
                        recording_reading: state.mode == FieldsMode::RecordingReading,
                        reading_field: state.reading_field,
                        reading_buffers: [
                            &state.reading_draft.temperature,
                            &state.reading_draft.humidity,
                            &state.reading_draft.soil_moisture,
                            &state.reading_draft.soil_ph,
                        ],
                    };
                    f.render_widget(screen, area);
                }
                Screen::History => {
                    let screen = HistoryScreen {
                        recommendations: &app.recommendations,
                        observations: &app.weather_history,
                        selected_index: app.history_state.selected_index,
                        show_weather: app.history_state.tab == HistoryTab::Weather,
                    };
                    f.render_widget(screen, area);
                }
                Screen::Settings => {
                    let screen = SettingsScreen::new(app.farm.as_ref(), &app.config)
                        .with_focus(app.settings_state.focused_field)
                        .editing(app.settings_state.editing, &app.settings_state.edit_buffer);
                    f.render_widget(screen, area);
                }
            }
        })?;

        // Handle input with timeout so pending lookups still run
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                let editing = is_editing(app);

                // Global key handling
                match key.code {
                    KeyCode::Char('q') if !editing => {
                        app.quit();
                    }
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        app.quit();
                    }
                    KeyCode::Esc if !editing => {
                        // Go back to dashboard
                        app.clear_status();
                        app.switch_screen(Screen::Dashboard);
                    }
                    KeyCode::Char(c)
                        if !editing && !key.modifiers.contains(KeyModifiers::CONTROL) =>
                    {
                        if let Some(screen) = Screen::from_key(c) {
                            app.clear_status();
                            app.switch_screen(screen);
                        } else {
                            // Screen-specific key handling
                            handle_screen_input(app, key.code, key.modifiers);
                        }
                    }
                    _ => {
                        handle_screen_input(app, key.code, key.modifiers);
                    }
                }
            }
        }

        // Lookup requested from the weather screen
        if let Some(location) = app.pending_lookup.take() {
            app.refreshing = true;
            match weather_sync.lookup(&location).await {
                Ok(report) => {
                    let resolved = report.resolved.display_name.clone();
                    app.update_weather(report);
                    app.set_status(&format!("Weather loaded for {}", resolved));
                }
                Err(e @ PaddySenseError::LocationNotFound(_)) => {
                    app.set_status(&format!("{}", e));
                }
                Err(e) => {
                    app.set_status(&format!("Lookup failed: {}", e));
                }
            }
            app.refreshing = false;
        }

        // Periodic refresh of the configured farm location
        let refresh_minutes = app.config.weather.refresh_interval_minutes;
        if refresh_minutes > 0
            && last_refresh.elapsed() >= Duration::from_secs(refresh_minutes * 60)
        {
            app.needs_refresh = true;
        }

        // Handle refresh request
        if app.needs_refresh {
            app.needs_refresh = false;
            app.refreshing = true;
            match weather_sync.refresh().await {
                Ok(report) => {
                    app.update_weather(report);
                    app.set_status("Weather refreshed");
                }
                Err(e) => {
                    app.set_status(&format!("Refresh failed: {}", e));
                }
            }
            app.refreshing = false;
            last_refresh = Instant::now();
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// True while any screen has a text edit or modal open; global keys are
/// suppressed so typed characters land in the buffer.
fn is_editing(app: &App) -> bool {
    app.advisor_state.editing
        || app.weather_state.editing
        || app.settings_state.editing
        || app.fields_state.mode != FieldsMode::Browse
}

fn handle_screen_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match app.screen {
        Screen::Dashboard => handle_dashboard_input(app, code),
        Screen::Advisor => handle_advisor_input(app, code),
        Screen::Weather => handle_weather_input(app, code),
        Screen::Fields => handle_fields_input(app, code),
        Screen::History => handle_history_input(app, code),
        Screen::Settings => handle_settings_input(app, code, modifiers),
    }
}

fn handle_dashboard_input(app: &mut App, code: KeyCode) {
    if let KeyCode::Char('r') = code {
        app.request_refresh();
    }
}

fn handle_advisor_input(app: &mut App, code: KeyCode) {
    if app.advisor_state.editing {
        match code {
            KeyCode::Esc => {
                app.advisor_state.cancel_editing();
            }
            KeyCode::Enter => {
                let value = app.advisor_state.finish_editing();
                match app.advisor_state.focused_field {
                    AdvisorField::Location => app.advisor_state.location = value,
                    AdvisorField::FieldName => app.advisor_state.field_name = value,
                    AdvisorField::SoilTemp => app.advisor_state.soil_temp_input = value,
                    _ => {}
                }
            }
            KeyCode::Backspace => {
                app.advisor_state.edit_buffer.pop();
            }
            KeyCode::Char(c) => {
                app.advisor_state.edit_buffer.push(c);
            }
            _ => {}
        }
    } else {
        match code {
            KeyCode::Up => app.advisor_state.prev_field(),
            KeyCode::Down | KeyCode::Tab => app.advisor_state.next_field(),
            KeyCode::Left => match app.advisor_state.focused_field {
                AdvisorField::SoilType => app.advisor_state.cycle_soil_type(false),
                AdvisorField::Season => app.advisor_state.cycle_season(false),
                _ => {}
            },
            KeyCode::Right => match app.advisor_state.focused_field {
                AdvisorField::SoilType => app.advisor_state.cycle_soil_type(true),
                AdvisorField::Season => app.advisor_state.cycle_season(true),
                _ => {}
            },
            KeyCode::Enter => {
                if !app.advisor_state.focused_field.is_selector() {
                    let current = match app.advisor_state.focused_field {
                        AdvisorField::Location => app.advisor_state.location.clone(),
                        AdvisorField::FieldName => app.advisor_state.field_name.clone(),
                        AdvisorField::SoilTemp => app.advisor_state.soil_temp_input.clone(),
                        _ => String::new(),
                    };
                    app.advisor_state.start_editing(&current);
                }
            }
            KeyCode::Char('g') => match app.generate_advice() {
                Ok(()) => app.set_status("Saved recommendation"),
                Err(e) => app.set_status(&format!("{}", e)),
            },
            KeyCode::PageDown => app.advisor_state.scroll_down(),
            KeyCode::PageUp => app.advisor_state.scroll_up(),
            _ => {}
        }
    }
}

fn handle_weather_input(app: &mut App, code: KeyCode) {
    if app.weather_state.editing {
        match code {
            KeyCode::Esc => {
                app.weather_state.editing = false;
            }
            KeyCode::Enter => {
                app.weather_state.editing = false;
                let location = app.weather_state.location_input.trim().to_string();
                if !location.is_empty() {
                    app.request_lookup(&location);
                }
            }
            KeyCode::Backspace => {
                app.weather_state.location_input.pop();
            }
            KeyCode::Char(c) => {
                app.weather_state.location_input.push(c);
            }
            _ => {}
        }
    } else {
        match code {
            KeyCode::Char('e') => {
                app.weather_state.editing = true;
            }
            KeyCode::Enter => {
                let location = app.weather_state.location_input.trim().to_string();
                if !location.is_empty() {
                    app.request_lookup(&location);
                }
            }
            _ => {}
        }
    }
}

fn handle_fields_input(app: &mut App, code: KeyCode) {
    match app.fields_state.mode {
        FieldsMode::Browse => match code {
            KeyCode::Up => {
                app.fields_state.prev();
                if let Err(e) = app.reload_plot_details() {
                    tracing::warn!("Failed to load plot details: {}", e);
                }
            }
            KeyCode::Down => {
                app.fields_state.next(app.field_plots.len());
                if let Err(e) = app.reload_plot_details() {
                    tracing::warn!("Failed to load plot details: {}", e);
                }
            }
            KeyCode::Char('a') => {
                app.fields_state.start_adding();
            }
            KeyCode::Char('m') => {
                if app.selected_plot().is_some() {
                    app.fields_state.start_recording();
                } else {
                    app.set_status("Add a field plot first");
                }
            }
            KeyCode::Char('d') => {
                if let Err(e) = app.delete_selected_plot() {
                    app.set_status(&format!("Delete failed: {}", e));
                }
            }
            _ => {}
        },
        FieldsMode::AddingPlot => match code {
            KeyCode::Esc => {
                app.fields_state.cancel_modal();
            }
            KeyCode::Enter => {
                let name = app.fields_state.name_buffer.trim().to_string();
                if name.is_empty() {
                    app.set_status("Plot name cannot be empty");
                } else {
                    match app.add_field_plot(&name) {
                        Ok(_) => {
                            app.fields_state.cancel_modal();
                            app.set_status(&format!("Added plot \"{}\"", name));
                        }
                        Err(e) => app.set_status(&format!("Add failed: {}", e)),
                    }
                }
            }
            KeyCode::Backspace => {
                app.fields_state.name_buffer.pop();
            }
            KeyCode::Char(c) => {
                app.fields_state.name_buffer.push(c);
            }
            _ => {}
        },
        FieldsMode::RecordingReading => match code {
            KeyCode::Esc => {
                app.fields_state.cancel_modal();
            }
            KeyCode::Up => {
                app.fields_state.reading_field = app.fields_state.reading_field.prev();
            }
            KeyCode::Down | KeyCode::Tab => {
                app.fields_state.reading_field = app.fields_state.reading_field.next();
            }
            KeyCode::Enter => match app.record_reading() {
                Ok(()) => {
                    app.fields_state.cancel_modal();
                    app.set_status("Reading recorded");
                }
                Err(e) => app.set_status(&format!("{}", e)),
            },
            KeyCode::Backspace => {
                let field = app.fields_state.reading_field;
                app.fields_state.reading_draft.buffer_mut(field).pop();
            }
            KeyCode::Char(c) => {
                let field = app.fields_state.reading_field;
                app.fields_state.reading_draft.buffer_mut(field).push(c);
            }
            _ => {}
        },
    }
}

fn handle_history_input(app: &mut App, code: KeyCode) {
    let count = match app.history_state.tab {
        HistoryTab::Recommendations => app.recommendations.len(),
        HistoryTab::Weather => app.weather_history.len(),
    };
    match code {
        KeyCode::Tab => app.history_state.toggle_tab(),
        KeyCode::Up => app.history_state.prev(),
        KeyCode::Down => app.history_state.next(count),
        KeyCode::Char('d') => {
            if app.history_state.tab == HistoryTab::Recommendations {
                if let Err(e) = app.delete_selected_recommendation() {
                    app.set_status(&format!("Delete failed: {}", e));
                }
            }
        }
        _ => {}
    }
}

fn handle_settings_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    if app.settings_state.editing {
        // Editing mode
        match code {
            KeyCode::Esc => {
                app.settings_state.cancel_editing();
            }
            KeyCode::Enter => {
                let value = app.settings_state.finish_editing();
                let field = app.settings_state.focused_field;
                apply_setting(app, field, &value);
            }
            KeyCode::Backspace => {
                app.settings_state.edit_buffer.pop();
            }
            KeyCode::Char(c) => {
                app.settings_state.edit_buffer.push(c);
            }
            _ => {}
        }
    } else {
        // Navigation mode
        match code {
            KeyCode::Up => app.settings_state.prev_field(),
            KeyCode::Down | KeyCode::Tab => app.settings_state.next_field(),
            KeyCode::Enter => {
                let current = current_setting(app, app.settings_state.focused_field);
                app.settings_state.start_editing(&current);
            }
            KeyCode::Char('s') if modifiers.contains(KeyModifiers::CONTROL) => {
                if let Some(farm) = app.farm.clone() {
                    match app.save_farm(farm) {
                        Ok(()) => app.set_status("Settings saved"),
                        Err(e) => app.set_status(&format!("Save failed: {}", e)),
                    }
                }
            }
            _ => {}
        }
    }
}

fn current_setting(app: &App, field: SettingsField) -> String {
    match field {
        SettingsField::Name => app
            .farm
            .as_ref()
            .map(|f| f.name.clone())
            .unwrap_or_default(),
        SettingsField::Location => app
            .farm
            .as_ref()
            .map(|f| f.location.clone())
            .unwrap_or_default(),
        SettingsField::Area => app
            .farm
            .as_ref()
            .and_then(|f| f.area_hectares)
            .map(|a| a.to_string())
            .unwrap_or_default(),
        SettingsField::SoilType => app
            .farm
            .as_ref()
            .and_then(|f| f.soil_type.clone())
            .unwrap_or_default(),
        SettingsField::ContactEmail => app.config.weather.contact_email.clone().unwrap_or_default(),
        SettingsField::RefreshInterval => app.config.weather.refresh_interval_minutes.to_string(),
    }
}

/// Commit an edited settings value to the farm record or the config,
/// persisting whichever one changed.
fn apply_setting(app: &mut App, field: SettingsField, value: &str) {
    let value = value.trim();
    let mut config_changed = false;

    match field {
        SettingsField::Name => {
            if let Some(ref mut farm) = app.farm {
                if !value.is_empty() {
                    farm.name = value.to_string();
                }
            }
        }
        SettingsField::Location => {
            if !value.is_empty() {
                if let Some(ref mut farm) = app.farm {
                    farm.location = value.to_string();
                }
                // Keep the refresh target in sync with the farm record
                app.config.farm.location = value.to_string();
                config_changed = true;
            }
        }
        SettingsField::Area => {
            if let Some(ref mut farm) = app.farm {
                farm.area_hectares = value.parse().ok();
            }
        }
        SettingsField::SoilType => {
            if let Some(ref mut farm) = app.farm {
                farm.soil_type = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                };
            }
        }
        SettingsField::ContactEmail => {
            app.config.weather.contact_email = if value.is_empty() {
                None
            } else {
                Some(value.to_string())
            };
            config_changed = true;
        }
        SettingsField::RefreshInterval => {
            if let Ok(minutes) = value.parse::<u64>() {
                app.config.weather.refresh_interval_minutes = minutes;
                config_changed = true;
            } else {
                app.set_status("Refresh interval must be a whole number of minutes");
                return;
            }
        }
    }

    if let Some(farm) = app.farm.clone() {
        if let Err(e) = app.save_farm(farm) {
            app.set_status(&format!("Save failed: {}", e));
            return;
        }
    }
    if config_changed {
        if let Err(e) = app.save_config() {
            app.set_status(&format!("Config save failed: {}", e));
            return;
        }
    }
    app.set_status("Settings saved");
}
