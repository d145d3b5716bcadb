use async_trait::async_trait;
use reqwest::Client;

use super::error::ElementSetError;
use super::parsing::parse_multi_tle;
use super::{ElementSet, ElementSetProvider};

pub const DEFAULT_CELESTRAK_URL: &str = "https://celestrak.org/NORAD/elements/gp.php";

/// Fetches the current GP element set for one catalog number from celestrak.
pub struct Celestrak {
    client: Client,
    url: String,
}

impl Celestrak {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }

    fn query_url(&self, catalog_id: u32) -> String {
        format!("{}?CATNR={catalog_id}&FORMAT=TLE", self.url)
    }
}

impl Default for Celestrak {
    fn default() -> Self {
        Self::new(DEFAULT_CELESTRAK_URL)
    }
}

#[async_trait]
impl ElementSetProvider for Celestrak {
    async fn fetch(&self, catalog_id: u32) -> Result<ElementSet, ElementSetError> {
        let url = self.query_url(catalog_id);
        log::debug!("fetching element set from {url}");

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ElementSetError::Status(response.status().as_u16()));
        }
        let text = response.text().await?;
        element_set_from_response(catalog_id, &text)
    }
}

fn element_set_from_response(catalog_id: u32, text: &str) -> Result<ElementSet, ElementSetError> {
    let (name, line1, line2) = parse_multi_tle(text)
        .into_iter()
        .next()
        .ok_or(ElementSetError::NotFound(catalog_id))?;

    let set = ElementSet::from_lines(name, &line1, &line2)?;
    if set.catalog_id != catalog_id {
        return Err(ElementSetError::InvalidFormat(format!(
            "asked for catalog id {catalog_id}, got {}",
            set.catalog_id
        )));
    }
    Ok(set)
}
