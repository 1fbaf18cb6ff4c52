use crate::db::Database;
use crate::error::Result;

const MIGRATIONS: &[&str] = &[
    // Migration 1: Initial schema
    r#"
    CREATE TABLE IF NOT EXISTS farms (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        location TEXT NOT NULL,
        area_hectares REAL,
        soil_type TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        updated_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE IF NOT EXISTS field_plots (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        farm_id INTEGER NOT NULL REFERENCES farms(id) ON DELETE CASCADE,
        name TEXT NOT NULL,
        area_hectares REAL,
        field_type TEXT NOT NULL,
        status TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE IF NOT EXISTS crops (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        field_plot_id INTEGER NOT NULL REFERENCES field_plots(id) ON DELETE CASCADE,
        name TEXT NOT NULL,
        variety TEXT NOT NULL,
        planting_date TEXT NOT NULL,
        expected_harvest_date TEXT,
        growth_stage TEXT NOT NULL,
        health_score INTEGER NOT NULL DEFAULT 100,
        notes TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE IF NOT EXISTS sensor_readings (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        field_plot_id INTEGER NOT NULL REFERENCES field_plots(id) ON DELETE CASCADE,
        timestamp TEXT NOT NULL,
        temperature_c REAL,
        humidity_percent REAL,
        soil_moisture_percent REAL,
        soil_ph REAL,
        light_intensity_lux REAL,
        rainfall_mm REAL
    );

    CREATE TABLE IF NOT EXISTS weather_history (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        location TEXT NOT NULL,
        latitude REAL,
        longitude REAL,
        temperature_c REAL,
        humidity_percent REAL,
        rainfall_mm REAL,
        wind_speed_kmh REAL,
        condition TEXT,
        recorded_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE IF NOT EXISTS paddy_recommendations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        location TEXT NOT NULL,
        field_name TEXT NOT NULL,
        soil_temperature_c REAL NOT NULL,
        soil_type TEXT NOT NULL,
        planting_season TEXT NOT NULL,
        primary_varieties TEXT NOT NULL,
        secondary_varieties TEXT NOT NULL,
        planting_timing TEXT NOT NULL,
        soil_preparation TEXT NOT NULL,
        water_management TEXT NOT NULL,
        fertilizer_tips TEXT NOT NULL,
        risk_factors TEXT NOT NULL,
        optimal_conditions TEXT NOT NULL,
        current_time_recommendations TEXT NOT NULL,
        seasonal_varieties TEXT NOT NULL,
        immediate_actions TEXT NOT NULL,
        explanation TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE IF NOT EXISTS schema_migrations (
        version INTEGER PRIMARY KEY,
        applied_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    "#,
    // Migration 2: Add indexes
    r#"
    CREATE INDEX IF NOT EXISTS idx_field_plots_farm_id
        ON field_plots(farm_id);
    CREATE INDEX IF NOT EXISTS idx_crops_field_plot_id
        ON crops(field_plot_id);
    CREATE INDEX IF NOT EXISTS idx_sensor_readings_plot_time
        ON sensor_readings(field_plot_id, timestamp);
    CREATE INDEX IF NOT EXISTS idx_weather_history_recorded_at
        ON weather_history(recorded_at);
    CREATE INDEX IF NOT EXISTS idx_recommendations_location
        ON paddy_recommendations(location, created_at);
    CREATE INDEX IF NOT EXISTS idx_recommendations_soil_temp
        ON paddy_recommendations(soil_temperature_c, created_at);
    CREATE INDEX IF NOT EXISTS idx_recommendations_soil_type
        ON paddy_recommendations(soil_type, created_at);
    CREATE INDEX IF NOT EXISTS idx_recommendations_season
        ON paddy_recommendations(planting_season, created_at);
    "#,
];

pub fn run(db: &Database) -> Result<()> {
    db.with_conn_mut(|conn| {
        // Ensure schema_migrations table exists
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                applied_at TEXT NOT NULL DEFAULT (datetime('now'))
            );
            "#,
        )?;

        // Get current version
        let current_version: i32 = conn
            .query_row(
                "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
                [],
                |row| row.get(0),
            )
            .unwrap_or(0);

        // Apply pending migrations
        for (i, migration) in MIGRATIONS.iter().enumerate() {
            let version = (i + 1) as i32;
            if version > current_version {
                tracing::info!("Applying migration {}", version);
                conn.execute_batch(migration)?;
                conn.execute(
                    "INSERT INTO schema_migrations (version) VALUES (?1)",
                    [version],
                )?;
            }
        }

        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use crate::db::Database;

    #[test]
    fn rerunning_migrations_is_a_no_op() {
        // open_in_memory already ran the migrations once
        let db = Database::open_in_memory().unwrap();
        super::run(&db).unwrap();
        super::run(&db).unwrap();

        let version: i32 = db
            .with_conn(|conn| {
                conn.query_row("SELECT MAX(version) FROM schema_migrations", [], |row| {
                    row.get(0)
                })
                .map_err(Into::into)
            })
            .unwrap();
        assert_eq!(version as usize, super::MIGRATIONS.len());

        let rows: i32 = db
            .with_conn(|conn| {
                conn.query_row("SELECT COUNT(*) FROM schema_migrations", [], |row| {
                    row.get(0)
                })
                .map_err(Into::into)
            })
            .unwrap();
        assert_eq!(rows as usize, super::MIGRATIONS.len());
    }
}
