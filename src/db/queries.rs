use crate::db::Database;
use crate::error::{PaddySenseError, Result};
use crate::models::{
    Crop, Farm, FieldPlot, FieldType, GrowthStage, PaddyAdvice, PlantingSeason, PlotStatus,
    SensorReading, SoilType, WeatherCondition, WeatherObservation,
};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Row};
use tracing::warn;

// Farm Queries

impl Database {
    pub fn create_farm(&self, farm: &Farm) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO farms
                    (name, location, area_hectares, soil_type, created_at, updated_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
                params![
                    farm.name,
                    farm.location,
                    farm.area_hectares,
                    farm.soil_type,
                    farm.created_at.to_rfc3339(),
                    farm.updated_at.to_rfc3339(),
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn get_default_farm(&self) -> Result<Option<Farm>> {
        self.with_conn(|conn| {
            conn.query_row("SELECT * FROM farms ORDER BY id LIMIT 1", [], row_to_farm)
                .optional()
                .map_err(Into::into)
        })
    }

    pub fn update_farm(&self, farm: &Farm) -> Result<()> {
        let id = farm
            .id
            .ok_or_else(|| PaddySenseError::InvalidData("Farm has no ID".into()))?;

        self.with_conn(|conn| {
            conn.execute(
                r#"
                UPDATE farms SET
                    name = ?1, location = ?2, area_hectares = ?3, soil_type = ?4, updated_at = ?5
                WHERE id = ?6
                "#,
                params![
                    farm.name,
                    farm.location,
                    farm.area_hectares,
                    farm.soil_type,
                    Utc::now().to_rfc3339(),
                    id,
                ],
            )?;
            Ok(())
        })
    }
}

fn row_to_farm(row: &Row) -> rusqlite::Result<Farm> {
    let created_at_str: String = row.get("created_at")?;
    let updated_at_str: String = row.get("updated_at")?;

    Ok(Farm {
        id: Some(row.get("id")?),
        name: row.get("name")?,
        location: row.get("location")?,
        area_hectares: row.get("area_hectares")?,
        soil_type: row.get("soil_type")?,
        created_at: DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now()),
        updated_at: DateTime::parse_from_rfc3339(&updated_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now()),
    })
}

// Field Plot Queries

impl Database {
    pub fn create_field_plot(&self, plot: &FieldPlot) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO field_plots
                    (farm_id, name, area_hectares, field_type, status)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
                params![
                    plot.farm_id,
                    plot.name,
                    plot.area_hectares,
                    format!("{:?}", plot.field_type),
                    format!("{:?}", plot.status),
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn get_field_plots_for_farm(&self, farm_id: i64) -> Result<Vec<FieldPlot>> {
        self.with_conn(|conn| {
            let mut stmt = conn
                .prepare("SELECT * FROM field_plots WHERE farm_id = ?1 ORDER BY name")?;
            let plots = stmt
                .query_map([farm_id], row_to_field_plot)?
                .filter_map(|r| r.ok())
                .collect();
            Ok(plots)
        })
    }

    pub fn update_field_plot(&self, plot: &FieldPlot) -> Result<()> {
        let id = plot
            .id
            .ok_or_else(|| PaddySenseError::InvalidData("Field plot has no ID".into()))?;

        self.with_conn(|conn| {
            conn.execute(
                r#"
                UPDATE field_plots SET
                    name = ?1, area_hectares = ?2, field_type = ?3, status = ?4
                WHERE id = ?5
                "#,
                params![
                    plot.name,
                    plot.area_hectares,
                    format!("{:?}", plot.field_type),
                    format!("{:?}", plot.status),
                    id,
                ],
            )?;
            Ok(())
        })
    }

    pub fn delete_field_plot(&self, id: i64) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM field_plots WHERE id = ?1", [id])?;
            Ok(())
        })
    }
}

fn row_to_field_plot(row: &Row) -> rusqlite::Result<FieldPlot> {
    let field_type_str: String = row.get("field_type")?;
    let status_str: String = row.get("status")?;

    let field_type = FieldType::from_str(&field_type_str).unwrap_or_else(|| {
        warn!(
            field_type = %field_type_str,
            "Unknown field_type in database, defaulting to Paddy"
        );
        FieldType::Paddy
    });
    let status = PlotStatus::from_str(&status_str).unwrap_or_else(|| {
        warn!(status = %status_str, "Unknown status in database, defaulting to Active");
        PlotStatus::Active
    });

    Ok(FieldPlot {
        id: Some(row.get("id")?),
        farm_id: row.get("farm_id")?,
        name: row.get("name")?,
        area_hectares: row.get("area_hectares")?,
        field_type,
        status,
    })
}

// Crop Queries

impl Database {
    pub fn create_crop(&self, crop: &Crop) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO crops
                    (field_plot_id, name, variety, planting_date, expected_harvest_date,
                     growth_stage, health_score, notes, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                "#,
                params![
                    crop.field_plot_id,
                    crop.name,
                    crop.variety,
                    crop.planting_date.format("%Y-%m-%d").to_string(),
                    crop.expected_harvest_date
                        .map(|d| d.format("%Y-%m-%d").to_string()),
                    format!("{:?}", crop.growth_stage),
                    crop.health_score,
                    crop.notes,
                    crop.created_at.to_rfc3339(),
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn get_crops_for_plot(&self, plot_id: i64) -> Result<Vec<Crop>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT * FROM crops WHERE field_plot_id = ?1 ORDER BY planting_date DESC",
            )?;
            let crops = stmt
                .query_map([plot_id], row_to_crop)?
                .filter_map(|r| r.ok())
                .collect();
            Ok(crops)
        })
    }

    pub fn update_crop(&self, crop: &Crop) -> Result<()> {
        let id = crop
            .id
            .ok_or_else(|| PaddySenseError::InvalidData("Crop has no ID".into()))?;

        self.with_conn(|conn| {
            conn.execute(
                r#"
                UPDATE crops SET
                    name = ?1, variety = ?2, planting_date = ?3, expected_harvest_date = ?4,
                    growth_stage = ?5, health_score = ?6, notes = ?7
                WHERE id = ?8
                "#,
                params![
                    crop.name,
                    crop.variety,
                    crop.planting_date.format("%Y-%m-%d").to_string(),
                    crop.expected_harvest_date
                        .map(|d| d.format("%Y-%m-%d").to_string()),
                    format!("{:?}", crop.growth_stage),
                    crop.health_score,
                    crop.notes,
                    id,
                ],
            )?;
            Ok(())
        })
    }

    pub fn delete_crop(&self, id: i64) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM crops WHERE id = ?1", [id])?;
            Ok(())
        })
    }
}

fn row_to_crop(row: &Row) -> rusqlite::Result<Crop> {
    let stage_str: String = row.get("growth_stage")?;
    let planting_str: String = row.get("planting_date")?;
    let harvest_str: Option<String> = row.get("expected_harvest_date")?;
    let created_at_str: String = row.get("created_at")?;

    let growth_stage = GrowthStage::from_str(&stage_str).unwrap_or_else(|| {
        warn!(
            growth_stage = %stage_str,
            "Unknown growth_stage in database, defaulting to Germination"
        );
        GrowthStage::Germination
    });

    Ok(Crop {
        id: Some(row.get("id")?),
        field_plot_id: row.get("field_plot_id")?,
        name: row.get("name")?,
        variety: row.get("variety")?,
        planting_date: NaiveDate::parse_from_str(&planting_str, "%Y-%m-%d")
            .unwrap_or_else(|_| chrono::Local::now().date_naive()),
        expected_harvest_date: harvest_str
            .as_deref()
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()),
        growth_stage,
        health_score: row.get("health_score")?,
        notes: row.get("notes")?,
        created_at: DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now()),
    })
}

// Sensor Reading Queries

impl Database {
    pub fn insert_sensor_reading(&self, reading: &SensorReading) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO sensor_readings
                    (field_plot_id, timestamp, temperature_c, humidity_percent,
                     soil_moisture_percent, soil_ph, light_intensity_lux, rainfall_mm)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                "#,
                params![
                    reading.field_plot_id,
                    reading.timestamp.to_rfc3339(),
                    reading.temperature_c,
                    reading.humidity_percent,
                    reading.soil_moisture_percent,
                    reading.soil_ph,
                    reading.light_intensity_lux,
                    reading.rainfall_mm,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn get_recent_readings(&self, plot_id: i64, limit: u32) -> Result<Vec<SensorReading>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT * FROM sensor_readings WHERE field_plot_id = ?1
                 ORDER BY timestamp DESC LIMIT ?2",
            )?;
            let readings = stmt
                .query_map(params![plot_id, limit], row_to_sensor_reading)?
                .filter_map(|r| r.ok())
                .collect();
            Ok(readings)
        })
    }

    pub fn get_latest_reading(&self, plot_id: i64) -> Result<Option<SensorReading>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT * FROM sensor_readings WHERE field_plot_id = ?1
                 ORDER BY timestamp DESC LIMIT 1",
                [plot_id],
                row_to_sensor_reading,
            )
            .optional()
            .map_err(Into::into)
        })
    }
}

fn row_to_sensor_reading(row: &Row) -> rusqlite::Result<SensorReading> {
    let timestamp_str: String = row.get("timestamp")?;

    Ok(SensorReading {
        id: Some(row.get("id")?),
        field_plot_id: row.get("field_plot_id")?,
        timestamp: DateTime::parse_from_rfc3339(&timestamp_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now()),
        temperature_c: row.get("temperature_c")?,
        humidity_percent: row.get("humidity_percent")?,
        soil_moisture_percent: row.get("soil_moisture_percent")?,
        soil_ph: row.get("soil_ph")?,
        light_intensity_lux: row.get("light_intensity_lux")?,
        rainfall_mm: row.get("rainfall_mm")?,
    })
}

// Weather History Queries

impl Database {
    pub fn insert_weather_observation(&self, obs: &WeatherObservation) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO weather_history
                    (location, latitude, longitude, temperature_c, humidity_percent,
                     rainfall_mm, wind_speed_kmh, condition, recorded_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                "#,
                params![
                    obs.location,
                    obs.latitude,
                    obs.longitude,
                    obs.temperature_c,
                    obs.humidity_percent,
                    obs.rainfall_mm,
                    obs.wind_speed_kmh,
                    obs.condition.map(|c| format!("{:?}", c)),
                    obs.recorded_at.to_rfc3339(),
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn get_recent_weather(&self, limit: u32) -> Result<Vec<WeatherObservation>> {
        self.with_conn(|conn| {
            let mut stmt = conn
                .prepare("SELECT * FROM weather_history ORDER BY recorded_at DESC LIMIT ?1")?;
            let observations = stmt
                .query_map([limit], row_to_weather_observation)?
                .filter_map(|r| r.ok())
                .collect();
            Ok(observations)
        })
    }
}

fn row_to_weather_observation(row: &Row) -> rusqlite::Result<WeatherObservation> {
    let condition_str: Option<String> = row.get("condition")?;
    let recorded_at_str: String = row.get("recorded_at")?;

    let condition = condition_str.as_ref().and_then(|c| {
        WeatherCondition::from_str(c).or_else(|| {
            warn!(condition = %c, "Unknown condition in database, ignoring");
            None
        })
    });

    Ok(WeatherObservation {
        id: Some(row.get("id")?),
        location: row.get("location")?,
        latitude: row.get("latitude")?,
        longitude: row.get("longitude")?,
        temperature_c: row.get("temperature_c")?,
        humidity_percent: row.get("humidity_percent")?,
        rainfall_mm: row.get("rainfall_mm")?,
        wind_speed_kmh: row.get("wind_speed_kmh")?,
        condition,
        recorded_at: DateTime::parse_from_rfc3339(&recorded_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now()),
    })
}

// Recommendation Queries

impl Database {
    pub fn save_recommendation(&self, advice: &PaddyAdvice) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO paddy_recommendations
                    (location, field_name, soil_temperature_c, soil_type, planting_season,
                     primary_varieties, secondary_varieties, planting_timing, soil_preparation,
                     water_management, fertilizer_tips, risk_factors, optimal_conditions,
                     current_time_recommendations, seasonal_varieties, immediate_actions,
                     explanation, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)
                "#,
                params![
                    advice.location,
                    advice.field_name,
                    advice.soil_temp_c,
                    format!("{:?}", advice.soil_type),
                    format!("{:?}", advice.season),
                    serde_json::to_string(&advice.primary_varieties)?,
                    serde_json::to_string(&advice.secondary_varieties)?,
                    advice.planting_timing,
                    advice.soil_preparation,
                    advice.water_management,
                    advice.fertilizer_tips,
                    serde_json::to_string(&advice.risk_factors)?,
                    serde_json::to_string(&advice.optimal_conditions)?,
                    advice.current_time_recommendations,
                    serde_json::to_string(&advice.seasonal_varieties)?,
                    serde_json::to_string(&advice.immediate_actions)?,
                    advice.explanation,
                    advice.created_at.to_rfc3339(),
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn get_recent_recommendations(&self, limit: u32) -> Result<Vec<PaddyAdvice>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT * FROM paddy_recommendations ORDER BY created_at DESC LIMIT ?1",
            )?;
            let recommendations = stmt
                .query_map([limit], row_to_recommendation)?
                .filter_map(|r| r.ok())
                .collect();
            Ok(recommendations)
        })
    }

    pub fn get_recommendation(&self, id: i64) -> Result<Option<PaddyAdvice>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT * FROM paddy_recommendations WHERE id = ?1",
                [id],
                row_to_recommendation,
            )
            .optional()
            .map_err(Into::into)
        })
    }

    pub fn delete_recommendation(&self, id: i64) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM paddy_recommendations WHERE id = ?1", [id])?;
            Ok(())
        })
    }
}

fn parse_list(raw: &str, column: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_else(|_| {
        warn!(column = %column, "Malformed list column in database, dropping contents");
        Vec::new()
    })
}

fn row_to_recommendation(row: &Row) -> rusqlite::Result<PaddyAdvice> {
    let soil_type_str: String = row.get("soil_type")?;
    let season_str: String = row.get("planting_season")?;
    let primary_raw: String = row.get("primary_varieties")?;
    let secondary_raw: String = row.get("secondary_varieties")?;
    let risks_raw: String = row.get("risk_factors")?;
    let optimal_raw: String = row.get("optimal_conditions")?;
    let seasonal_raw: String = row.get("seasonal_varieties")?;
    let actions_raw: String = row.get("immediate_actions")?;
    let created_at_str: String = row.get("created_at")?;

    let soil_type = SoilType::from_str(&soil_type_str).unwrap_or_else(|| {
        warn!(
            soil_type = %soil_type_str,
            "Unknown soil_type in database, defaulting to Other"
        );
        SoilType::Other
    });
    let season = PlantingSeason::from_str(&season_str).unwrap_or_else(|| {
        warn!(
            planting_season = %season_str,
            "Unknown planting_season in database, defaulting to Other"
        );
        PlantingSeason::Other
    });

    Ok(PaddyAdvice {
        id: Some(row.get("id")?),
        location: row.get("location")?,
        field_name: row.get("field_name")?,
        soil_temp_c: row.get("soil_temperature_c")?,
        soil_type,
        season,
        primary_varieties: parse_list(&primary_raw, "primary_varieties"),
        secondary_varieties: parse_list(&secondary_raw, "secondary_varieties"),
        planting_timing: row.get("planting_timing")?,
        soil_preparation: row.get("soil_preparation")?,
        water_management: row.get("water_management")?,
        fertilizer_tips: row.get("fertilizer_tips")?,
        risk_factors: parse_list(&risks_raw, "risk_factors"),
        optimal_conditions: parse_list(&optimal_raw, "optimal_conditions"),
        current_time_recommendations: row.get("current_time_recommendations")?,
        seasonal_varieties: parse_list(&seasonal_raw, "seasonal_varieties"),
        immediate_actions: parse_list(&actions_raw, "immediate_actions"),
        explanation: row.get("explanation")?,
        created_at: DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now()),
    })
}

trait OptionalExt<T> {
    fn optional(self) -> rusqlite::Result<Option<T>>;
}

impl<T> OptionalExt<T> for rusqlite::Result<T> {
    fn optional(self) -> rusqlite::Result<Option<T>> {
        match self {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::db::Database;
    use crate::logic::advisor::AdvisorEngine;
    use crate::models::{
        AdvisorRequest, Crop, Farm, FieldPlot, GrowthStage, PlantingSeason, PlotStatus,
        SensorReading, SoilType,
    };
    use chrono::NaiveDate;

    fn seeded_farm(db: &Database) -> i64 {
        let farm = Farm::new("Test Farm".to_string(), "Anuradhapura, Sri Lanka".to_string());
        db.create_farm(&farm).unwrap()
    }

    #[test]
    fn farm_round_trip() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.get_default_farm().unwrap().is_none());

        seeded_farm(&db);
        let loaded = db.get_default_farm().unwrap().unwrap();
        assert_eq!(loaded.name, "Test Farm");
        assert_eq!(loaded.location, "Anuradhapura, Sri Lanka");
        assert!(loaded.id.is_some());
    }

    #[test]
    fn field_plots_and_readings_round_trip() {
        let db = Database::open_in_memory().unwrap();
        let farm_id = seeded_farm(&db);

        let plot = FieldPlot::new(farm_id, "North Tract".to_string()).with_area(1.8);
        let plot_id = db.create_field_plot(&plot).unwrap();

        let reading = SensorReading::new(plot_id)
            .with_temperature(27.4)
            .with_soil_ph(6.1);
        db.insert_sensor_reading(&reading).unwrap();

        let mut older = SensorReading::new(plot_id).with_soil_moisture(62.0);
        older.timestamp = older.timestamp - chrono::Duration::minutes(5);
        db.insert_sensor_reading(&older).unwrap();

        let plots = db.get_field_plots_for_farm(farm_id).unwrap();
        assert_eq!(plots.len(), 1);
        assert_eq!(plots[0].area_hectares, Some(1.8));
        assert_eq!(plots[0].status, PlotStatus::Active);

        let mut plot = plots[0].clone();
        plot.status = PlotStatus::Fallow;
        plot.area_hectares = Some(2.5);
        db.update_field_plot(&plot).unwrap();

        let updated = db.get_field_plots_for_farm(farm_id).unwrap();
        assert_eq!(updated[0].status, PlotStatus::Fallow);
        assert_eq!(updated[0].area_hectares, Some(2.5));

        let recent = db.get_recent_readings(plot_id, 10).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].temperature_c, Some(27.4));
        assert_eq!(recent[1].soil_moisture_percent, Some(62.0));

        let latest = db.get_latest_reading(plot_id).unwrap().unwrap();
        assert_eq!(latest.temperature_c, Some(27.4));
        assert_eq!(latest.soil_ph, Some(6.1));
    }

    #[test]
    fn crop_lifecycle_updates_and_deletes() {
        let db = Database::open_in_memory().unwrap();
        let farm_id = seeded_farm(&db);
        let plot_id = db
            .create_field_plot(&FieldPlot::new(farm_id, "East Tract".to_string()))
            .unwrap();

        let planted = NaiveDate::from_ymd_opt(2025, 10, 12).unwrap();
        let harvest = NaiveDate::from_ymd_opt(2026, 1, 20).unwrap();
        let crop = Crop::new(plot_id, "Rice".to_string(), "BG 352".to_string(), planted)
            .with_harvest_date(harvest);
        let crop_id = db.create_crop(&crop).unwrap();

        let mut loaded = db.get_crops_for_plot(plot_id).unwrap().remove(0);
        assert_eq!(loaded.id, Some(crop_id));
        assert_eq!(loaded.variety, "BG 352");
        assert_eq!(loaded.growth_stage, GrowthStage::Germination);
        assert_eq!(loaded.expected_harvest_date, Some(harvest));

        loaded.growth_stage = GrowthStage::Vegetative;
        loaded.health_score = 85;
        db.update_crop(&loaded).unwrap();

        let updated = db.get_crops_for_plot(plot_id).unwrap();
        assert_eq!(updated[0].growth_stage, GrowthStage::Vegetative);
        assert_eq!(updated[0].health_score, 85);

        db.delete_crop(crop_id).unwrap();
        assert!(db.get_crops_for_plot(plot_id).unwrap().is_empty());
    }

    #[test]
    fn deleting_plot_cascades_to_readings() {
        let db = Database::open_in_memory().unwrap();
        let farm_id = seeded_farm(&db);
        let plot_id = db
            .create_field_plot(&FieldPlot::new(farm_id, "South Tract".to_string()))
            .unwrap();
        db.insert_sensor_reading(&SensorReading::new(plot_id).with_temperature(25.0))
            .unwrap();

        db.delete_field_plot(plot_id).unwrap();
        assert!(db.get_latest_reading(plot_id).unwrap().is_none());
    }

    #[test]
    fn recommendation_round_trip_preserves_lists() {
        let db = Database::open_in_memory().unwrap();
        let engine = AdvisorEngine::new();

        let request = AdvisorRequest {
            location: "Jaffna, Sri Lanka".to_string(),
            field_name: "Main Field".to_string(),
            soil_temp_c: 18.0,
            soil_type: SoilType::Clay,
            season: PlantingSeason::Maha,
            month: 11,
        };
        let advice = engine.advise(&request);
        let id = db.save_recommendation(&advice).unwrap();

        let loaded = db.get_recommendation(id).unwrap().unwrap();
        assert_eq!(loaded.primary_varieties, advice.primary_varieties);
        assert_eq!(loaded.risk_factors, advice.risk_factors);
        assert_eq!(loaded.immediate_actions, advice.immediate_actions);
        assert_eq!(loaded.soil_type, SoilType::Clay);
        assert_eq!(loaded.season, PlantingSeason::Maha);
        assert_eq!(loaded.explanation, advice.explanation);
    }

    #[test]
    fn recent_recommendations_ordered_newest_first() {
        let db = Database::open_in_memory().unwrap();
        let engine = AdvisorEngine::new();

        for (i, temp) in [18.0_f64, 25.0, 33.0].iter().enumerate() {
            let request = AdvisorRequest {
                location: format!("Field {}", i),
                field_name: "Main Field".to_string(),
                soil_temp_c: *temp,
                soil_type: SoilType::Loamy,
                season: PlantingSeason::Yala,
                month: 4,
            };
            let mut advice = engine.advise(&request);
            // Spread created_at so ordering is deterministic
            advice.created_at = advice.created_at + chrono::Duration::seconds(i as i64);
            db.save_recommendation(&advice).unwrap();
        }

        let recent = db.get_recent_recommendations(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].location, "Field 2");
        assert_eq!(recent[1].location, "Field 1");
    }
}
