//! One-shot fetch of the historical automobile sales dataset.

use reqwest::blocking::Client;

use crate::domain::SalesTable;
use crate::error::AppError;

/// The published location of the dataset.
pub const DEFAULT_DATA_URL: &str = "https://cf-courses-data.s3.us.cloud-object-storage.appdomain.cloud/IBMDeveloperSkillsNetwork-DV0101EN-SkillsNetwork/Data%20Files/historical_automobile_sales.csv";

/// Environment variable overriding the dataset URL (a `.env` file is honored).
const URL_ENV: &str = "AUTOSTATS_DATA_URL";

pub struct DatasetClient {
    client: Client,
    url: String,
}

impl DatasetClient {
    /// Client pointed at `AUTOSTATS_DATA_URL` if set, else the published URL.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let url = std::env::var(URL_ENV).unwrap_or_else(|_| DEFAULT_DATA_URL.to_string());
        Self::with_url(url)
    }

    pub fn with_url(url: String) -> Self {
        Self {
            client: Client::new(),
            url,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Download and parse the dataset.
    ///
    /// This is the process's only network call; any failure here is fatal to
    /// startup (there is no fallback dataset and no retry).
    pub fn fetch(&self) -> Result<SalesTable, AppError> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .map_err(|e| AppError::runtime(format!("Dataset request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::runtime(format!(
                "Dataset request failed with status {}.",
                resp.status()
            )));
        }

        let body = resp
            .text()
            .map_err(|e| AppError::runtime(format!("Failed to read dataset body: {e}")))?;

        crate::data::table::parse_sales_csv(body.as_bytes(), &self.url)
    }
}
