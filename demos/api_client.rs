/// Example HTTP client demonstrating how to call the ZIP radius server API
///
/// Run the server first:
/// ```bash
/// ZIP_DATASET=data/sample_zips.csv cargo run --bin server
/// ```
///
/// Then run this example:
/// ```bash
/// cargo run --example api_client
/// ```

use serde::{Deserialize, Serialize};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RadiusRequest {
    zip_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    radius: Option<f64>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct RadiusResponse {
    zip_codes: Vec<String>,
}

#[derive(Deserialize, Debug)]
struct HealthResponse {
    status: String,
    version: String,
    entries: usize,
}

#[derive(Deserialize, Debug)]
struct MetricsResponse {
    total_requests: u64,
    requests_in_flight: u64,
    uptime_seconds: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = std::env::var("API_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
    let client = reqwest::Client::new();

    println!("=== ZIP Radius HTTP API Client Demo ===\n");

    // 1. Health Check
    println!("1. Checking server health...");
    let health: HealthResponse = client
        .get(format!("{}/health", base_url))
        .send()
        .await?
        .json()
        .await?;
    println!("   Server status: {}", health.status);
    println!("   Version: {}", health.version);
    println!("   ZIP codes loaded: {}\n", health.entries);

    // 2. Radius queries, including one for a ZIP that does not exist
    let query_url = format!("{}/get_zips_within_radius", base_url);
    let queries = [
        ("10001", Some(5.0)),
        ("60601", None), // Default radius
        ("00000", Some(10.0)),
    ];

    for (i, (zip, radius)) in queries.into_iter().enumerate() {
        println!("{}. ZIP codes near {} (radius {:?})...", i + 2, zip, radius);
        let request = RadiusRequest {
            zip_code: zip.to_string(),
            radius,
        };

        match client.post(&query_url).json(&request).send().await {
            Ok(response) => {
                if response.status().is_success() {
                    let result: RadiusResponse = response.json().await?;
                    println!("   Found {}: {:?}\n", result.zip_codes.len(), result.zip_codes);
                } else {
                    let status = response.status();
                    let error_text = response.text().await?;
                    println!("   Error ({}): {}\n", status, error_text);
                }
            }
            Err(e) => {
                println!("   Request failed: {}\n", e);
            }
        }
    }

    // 5. Get Metrics
    println!("5. Getting server metrics...");
    let metrics: MetricsResponse = client
        .get(format!("{}/api/metrics", base_url))
        .send()
        .await?
        .json()
        .await?;
    println!("   Total requests: {}", metrics.total_requests);
    println!("   Requests in flight: {}", metrics.requests_in_flight);
    println!("   Uptime: {} seconds\n", metrics.uptime_seconds);

    println!("=== Demo Complete ===");

    Ok(())
}
