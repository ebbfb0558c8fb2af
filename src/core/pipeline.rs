use crate::core::normalize::{normalize, normalize_team};
use crate::core::order::sort_packages;
use crate::core::workload::summarize;
use crate::core::{ConfigProvider, Pipeline, Storage};
use crate::domain::model::{
    HourPackage, RawPackageRecord, RawTeamRecord, TeamExtraction, TeamReport,
};
use crate::utils::error::{EngineError, Result};
use reqwest::Client;
use std::io::Write;
use std::time::Duration;
use zip::write::{FileOptions, ZipWriter};

/// Fetches raw team and package records from the persistence API, runs the
/// pure normalize → sort → summarize core per team, and writes one report
/// bundle per team through the storage port.
pub struct WorkloadPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: Client,
}

impl<S: Storage, C: ConfigProvider> WorkloadPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            client: Client::new(),
        }
    }

    /// GET a JSON document. An error status or an undecodable body is
    /// reported as `None` so one broken team cannot sink the whole run;
    /// transport failures still propagate.
    async fn fetch_json(&self, url: &str) -> Result<Option<serde_json::Value>> {
        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .timeout(Duration::from_secs(self.config.request_timeout_seconds()))
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::warn!("{} returned status {}", url, response.status());
            return Ok(None);
        }

        match response.json::<serde_json::Value>().await {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!("Undecodable body from {}: {}", url, e);
                Ok(None)
            }
        }
    }

    async fn fetch_team(&self, team_id: &str) -> Result<RawTeamRecord> {
        let url = format!(
            "{}/equipos/{}",
            self.config.api_endpoint().trim_end_matches('/'),
            team_id
        );
        let record = match self.fetch_json(&url).await? {
            Some(value) => serde_json::from_value(value).unwrap_or_else(|e| {
                tracing::warn!("Unexpected team payload for {}: {}", team_id, e);
                RawTeamRecord::default()
            }),
            None => RawTeamRecord::default(),
        };
        Ok(record)
    }

    async fn fetch_packages(&self, team_id: &str) -> Result<Vec<RawPackageRecord>> {
        let url = format!(
            "{}/equipos/{}/paquetes",
            self.config.api_endpoint().trim_end_matches('/'),
            team_id
        );
        let records = match self.fetch_json(&url).await? {
            Some(serde_json::Value::Array(items)) => items
                .into_iter()
                .filter_map(|item| match serde_json::from_value(item) {
                    Ok(record) => Some(record),
                    Err(e) => {
                        tracing::warn!("Skipping malformed package record: {}", e);
                        None
                    }
                })
                .collect(),
            // A single object is treated as a one-element collection
            Some(value @ serde_json::Value::Object(_)) => serde_json::from_value(value)
                .map(|record| vec![record])
                .unwrap_or_default(),
            Some(other) => {
                tracing::warn!("Unexpected package payload shape: {}", other);
                Vec::new()
            }
            None => Vec::new(),
        };
        Ok(records)
    }

    fn packages_csv(&self, packages: &[HourPackage]) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record([
            "id",
            "tipo",
            "profesional",
            "colegio",
            "diaSemana",
            "horaInicio",
            "horaFin",
            "rotativo",
            "semanas",
            "horas",
        ])?;

        for pkg in packages {
            let weeks = pkg
                .schedule
                .cycle_weeks
                .iter()
                .map(|w| w.to_string())
                .collect::<Vec<_>>()
                .join(",");
            let day = pkg
                .schedule
                .day_of_week
                .map(|d| d.to_string())
                .unwrap_or_default();
            let hours = pkg.quantity_hours.to_string();
            writer.write_record([
                pkg.id.as_str(),
                pkg.package_type.label(),
                pkg.professional_ref.as_str(),
                pkg.school_ref.as_deref().unwrap_or(""),
                day.as_str(),
                pkg.schedule.start_time.as_str(),
                pkg.schedule.end_time.as_str(),
                if pkg.schedule.recurring { "true" } else { "false" },
                weeks.as_str(),
                hours.as_str(),
            ])?;
        }

        writer
            .into_inner()
            .map_err(|e| EngineError::ProcessingError {
                message: format!("Failed to finish CSV report: {}", e),
            })
    }

    fn report_bundle(&self, report: &TeamReport) -> Result<Vec<u8>> {
        let csv_data = self.packages_csv(&report.packages)?;

        let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

        zip.start_file::<_, ()>("paquetes.csv", FileOptions::default())?;
        zip.write_all(&csv_data)?;

        zip.start_file::<_, ()>("carga.json", FileOptions::default())?;
        let json_data = serde_json::to_string_pretty(report)?;
        zip.write_all(json_data.as_bytes())?;

        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for WorkloadPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<TeamExtraction>> {
        let mut extractions = Vec::new();

        for team_id in self.config.team_ids() {
            let team = self.fetch_team(team_id).await?;
            let packages = self.fetch_packages(team_id).await?;
            tracing::info!(
                "Team {}: fetched {} raw package records",
                team_id,
                packages.len()
            );
            extractions.push(TeamExtraction {
                requested_id: team_id.clone(),
                team,
                packages,
            });
        }

        Ok(extractions)
    }

    async fn transform(&self, teams: Vec<TeamExtraction>) -> Result<Vec<TeamReport>> {
        let mut reports = Vec::new();

        for extraction in teams {
            let team = normalize_team(&extraction.team, &extraction.requested_id);
            let mut packages: Vec<HourPackage> =
                extraction.packages.iter().map(normalize).collect();
            sort_packages(&mut packages);

            let workload = summarize(&packages, team.school_ids.len());
            tracing::debug!(
                "Team {}: {} packages, {:.1}h total, {:.2}h average per school",
                team.id,
                packages.len(),
                workload.total_hours,
                workload.average_hours_per_school
            );

            reports.push(TeamReport {
                team,
                packages,
                workload,
                generated_at: chrono::Utc::now(),
            });
        }

        Ok(reports)
    }

    async fn load(&self, reports: Vec<TeamReport>) -> Result<String> {
        for report in &reports {
            let bundle = self.report_bundle(report)?;
            let filename = format!("equipo_{}.zip", report.team.id);
            tracing::debug!("Writing {} ({} bytes)", filename, bundle.len());
            self.storage.write_file(&filename, &bundle).await?;
        }

        Ok(self.config.output_path().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        api_endpoint: String,
        team_ids: Vec<String>,
        output_path: String,
    }

    impl MockConfig {
        fn new(api_endpoint: String, team_ids: &[&str]) -> Self {
            Self {
                api_endpoint,
                team_ids: team_ids.iter().map(|s| s.to_string()).collect(),
                output_path: "test_output".to_string(),
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn api_endpoint(&self) -> &str {
            &self.api_endpoint
        }

        fn team_ids(&self) -> &[String] {
            &self.team_ids
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }
    }

    fn mock_team_endpoints(
        server: &MockServer,
        team_id: &str,
        team: serde_json::Value,
        packages: serde_json::Value,
    ) {
        let team_path = format!("/equipos/{}", team_id);
        let packages_path = format!("/equipos/{}/paquetes", team_id);
        server.mock(|when, then| {
            when.method(GET).path(team_path);
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(team);
        });
        server.mock(|when, then| {
            when.method(GET).path(packages_path);
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(packages);
        });
    }

    #[tokio::test]
    async fn test_extract_collects_teams_and_packages() {
        let server = MockServer::start();
        mock_team_endpoints(
            &server,
            "4",
            serde_json::json!({ "id": 4, "nombre": "North", "colegios": ["9", "10"] }),
            serde_json::json!([
                { "id": 1, "tipo": "School", "cantidad": 2, "colegio": "9",
                  "diaSemana": 1, "horaInicio": "08:00", "horaFin": "10:00", "rotativo": false },
                { "id": 2, "tipo": "GEI-Load", "cantidad": 1,
                  "dias": { "diaSemana": 2, "horaInicio": "09:00:00", "horaFin": "10:00:00",
                            "rotativo": true, "semanas": [2] } }
            ]),
        );

        let config = MockConfig::new(server.base_url(), &["4"]);
        let pipeline = WorkloadPipeline::new(MockStorage::new(), config);

        let extractions = pipeline.extract().await.unwrap();
        assert_eq!(extractions.len(), 1);
        assert_eq!(extractions[0].requested_id, "4");
        assert_eq!(extractions[0].packages.len(), 2);
    }

    #[tokio::test]
    async fn test_extract_tolerates_missing_team() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/equipos/99");
            then.status(404);
        });
        server.mock(|when, then| {
            when.method(GET).path("/equipos/99/paquetes");
            then.status(404);
        });

        let config = MockConfig::new(server.base_url(), &["99"]);
        let pipeline = WorkloadPipeline::new(MockStorage::new(), config);

        let extractions = pipeline.extract().await.unwrap();
        assert_eq!(extractions.len(), 1);
        assert!(extractions[0].packages.is_empty());
    }

    #[tokio::test]
    async fn test_transform_orders_and_aggregates() {
        let config = MockConfig::new("http://unused.test".to_string(), &["4"]);
        let pipeline = WorkloadPipeline::new(MockStorage::new(), config);

        let extraction = TeamExtraction {
            requested_id: "4".to_string(),
            team: serde_json::from_value(serde_json::json!({
                "id": 4, "nombre": "North", "colegios": ["A", "B", "C", "D"]
            }))
            .unwrap(),
            packages: vec![
                serde_json::from_value(serde_json::json!({
                    "id": "P2", "tipo": "School", "cantidad": 2, "colegio": "B",
                    "diaSemana": 1, "horaInicio": "08:00", "horaFin": "10:00",
                    "rotativo": true, "semanas": [2]
                }))
                .unwrap(),
                serde_json::from_value(serde_json::json!({
                    "id": "P1", "tipo": "School", "cantidad": 2, "colegio": "A",
                    "diaSemana": 1, "horaInicio": "08:00", "horaFin": "10:00",
                    "rotativo": false
                }))
                .unwrap(),
            ],
        };

        let reports = pipeline.transform(vec![extraction]).await.unwrap();
        assert_eq!(reports.len(), 1);

        let report = &reports[0];
        assert_eq!(report.packages[0].id, "P1");
        assert_eq!(report.packages[1].id, "P2");
        assert_eq!(report.workload.total_hours, 4.0);
        assert_eq!(report.workload.hours_in_schools, 2.0);
        assert_eq!(report.workload.school_count, 4);
        assert_eq!(report.workload.average_hours_per_school, 0.5);
    }

    #[tokio::test]
    async fn test_load_writes_one_bundle_per_team() {
        let storage = MockStorage::new();
        let config = MockConfig::new("http://unused.test".to_string(), &["4"]);
        let pipeline = WorkloadPipeline::new(storage.clone(), config);

        let extraction = TeamExtraction {
            requested_id: "4".to_string(),
            team: RawTeamRecord::default(),
            packages: vec![serde_json::from_value(serde_json::json!({
                "id": 1, "tipo": "School", "cantidad": 2, "colegio": "9",
                "diaSemana": 1, "horaInicio": "08:00", "horaFin": "10:00", "rotativo": false
            }))
            .unwrap()],
        };
        let reports = pipeline.transform(vec![extraction]).await.unwrap();

        let output_path = pipeline.load(reports).await.unwrap();
        assert_eq!(output_path, "test_output");

        let bundle = storage.get_file("equipo_4.zip").await.unwrap();
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bundle)).unwrap();
        assert_eq!(archive.len(), 2);

        let mut names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        names.sort();
        assert_eq!(names, vec!["carga.json", "paquetes.csv"]);

        let csv_content = {
            let mut file = archive.by_name("paquetes.csv").unwrap();
            let mut content = String::new();
            std::io::Read::read_to_string(&mut file, &mut content).unwrap();
            content
        };
        assert!(csv_content.starts_with("id,tipo,profesional,colegio,diaSemana"));
        assert!(csv_content.contains("1,School,,9,1,08:00,10:00,false,,2"));
    }
}
