use crate::domain::model::{GenreList, RestaurantList};
use crate::domain::ports::RestaurantSource;
use crate::utils::error::{Result, ShuffleError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Reads listings from the scraping collaborator's JSON endpoints.
#[derive(Debug, Clone)]
pub struct HttpRestaurantSource {
    client: Client,
    base_url: String,
}

impl HttpRestaurantSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("GET {}", url);

        let response = self.client.get(&url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ShuffleError::Upstream {
                status: status.as_u16(),
                message: format!("scraper returned {} for {}", status, path),
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl RestaurantSource for HttpRestaurantSource {
    async fn nearby(&self, genre: Option<&str>) -> Result<RestaurantList> {
        let query: Vec<(&str, &str)> = genre
            .filter(|g| !g.trim().is_empty())
            .map(|g| vec![("genre", g)])
            .unwrap_or_default();
        self.get_json("/restaurants", &query).await
    }

    async fn genres(&self) -> Result<GenreList> {
        self.get_json("/genres", &[]).await
    }
}
