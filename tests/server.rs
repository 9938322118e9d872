mod server {
    #![allow(non_snake_case)]

    use kafka_dashboard::analysis::AlwaysPassed;
    use kafka_dashboard::discovery::ReportLocator;
    use kafka_dashboard::reporting::RenderOptions;
    use kafka_dashboard::server::{AppState, RefreshPipeline, router};

    use reqwest::StatusCode;
    use serde_json::Value;
    use std::fs;
    use std::path::Path;
    use std::sync::Arc;
    use tokio::net::TcpListener;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    /// Serve the router on an ephemeral port and return its base URL
    async fn spawn_dashboard(data_dir: &Path) -> Result<String, Box<dyn std::error::Error>> {
        let pipeline = RefreshPipeline::new(ReportLocator::new(data_dir), Arc::new(AlwaysPassed));
        let state = AppState::new(pipeline, RenderOptions::default());

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, router(state)).await;
        });

        Ok(format!("http://{addr}"))
    }

    fn write_report(dir: &Path) -> TestResult {
        fs::write(
            dir.join("kafka-analysis-1.json"),
            r#"{
                "timestamp": "2025-03-01T12:00:00Z",
                "vendor": "aws-msk",
                "topics": [{"name": "payments", "partitions": 12, "replicationFactor": 3}],
                "healthChecks": {"totalChecks": 4, "passedChecks": 4, "checks": []}
            }"#,
        )?;
        Ok(())
    }

    #[tokio::test]
    async fn test_healthz() -> TestResult {
        let temp_dir = tempfile::tempdir()?;
        let base = spawn_dashboard(temp_dir.path()).await?;

        let response = reqwest::get(format!("{base}/healthz")).await?;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.text().await?, "ok");
        Ok(())
    }

    #[tokio::test]
    async fn test_index__without_data() -> TestResult {
        let temp_dir = tempfile::tempdir()?;
        let base = spawn_dashboard(temp_dir.path()).await?;

        let response = reqwest::get(format!("{base}/")).await?;

        assert_eq!(response.status(), StatusCode::OK);
        let page = response.text().await?;
        assert!(page.contains("<!DOCTYPE html>"));
        assert!(page.contains("superstream-kafka-analyzer"));
        Ok(())
    }

    #[tokio::test]
    async fn test_report__404_until_refreshed() -> TestResult {
        let temp_dir = tempfile::tempdir()?;
        let base = spawn_dashboard(temp_dir.path()).await?;
        let client = reqwest::Client::new();

        let missing = client.get(format!("{base}/api/report")).send().await?;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        let body: Value = missing.json().await?;
        assert_eq!(body["error"], "No analysis report available");

        write_report(temp_dir.path())?;
        let refreshed: Value = client
            .post(format!("{base}/api/refresh"))
            .send()
            .await?
            .json()
            .await?;
        assert_eq!(refreshed["hasData"], true);
        assert_eq!(refreshed["reportsLoaded"], 1);
        assert_eq!(refreshed["skipped"], 0);

        let report = client.get(format!("{base}/api/report")).send().await?;
        assert_eq!(report.status(), StatusCode::OK);
        let body: Value = report.json().await?;
        assert_eq!(body["vendor"], "aws-msk");
        Ok(())
    }

    #[tokio::test]
    async fn test_snapshot_and_trends() -> TestResult {
        let temp_dir = tempfile::tempdir()?;
        write_report(temp_dir.path())?;
        let base = spawn_dashboard(temp_dir.path()).await?;
        let client = reqwest::Client::new();
        client.post(format!("{base}/api/refresh")).send().await?;

        let snapshot: Value = client
            .get(format!("{base}/api/snapshot"))
            .send()
            .await?
            .json()
            .await?;
        assert_eq!(snapshot["overview"]["healthScore"], 100.0);
        assert_eq!(snapshot["overview"]["topics"]["total"], 1);
        assert_eq!(snapshot["reportsLoaded"], 1);

        let trends: Value = client
            .get(format!("{base}/api/trends"))
            .send()
            .await?
            .json()
            .await?;
        assert_eq!(trends["healthScore"].as_array().map(Vec::len), Some(1));
        assert_eq!(trends["topics"].as_array().map(Vec::len), Some(1));

        let page = client.get(format!("{base}/")).send().await?.text().await?;
        assert!(page.contains("payments"));
        Ok(())
    }
}
