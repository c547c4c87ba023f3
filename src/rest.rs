use async_trait::async_trait;
use log::{debug, trace};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::SourceConfig;
use crate::record::RawProfile;
use crate::source::{
    ActionInvoker, ErrorDescriptor, ProfileSource, Query, Response,
};
use crate::{DirectoryError, Result};

const USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Data source speaking to a PostgREST-style table endpoint
/// (`/rest/v1/<table>`) and a functions endpoint (`/functions/v1/<name>`).
#[derive(Debug, Clone)]
pub struct RestSource {
    http: reqwest::Client,
    base_url: Url,
}

impl RestSource {
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let key = HeaderValue::from_str(&config.api_key).map_err(|_| {
            DirectoryError::Config("api key is not a valid header".to_string())
        })?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| {
                DirectoryError::Config(
                    "api key is not a valid header".to_string(),
                )
            })?;

        let mut headers = HeaderMap::new();
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: config.url.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                DirectoryError::Config(format!(
                    "{} cannot be used as a base url",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Full url of a table read, projection and ordering included.
    pub fn table_url(&self, query: &Query) -> Result<Url> {
        let mut url = self.endpoint(&["rest", "v1", query.table])?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("select", &query.select_clause());
            if let Some(order) = query.order_clause() {
                pairs.append_pair("order", &order);
            }
        }
        Ok(url)
    }

    pub fn action_url(&self, action: &str) -> Result<Url> {
        self.endpoint(&["functions", "v1", action])
    }
}

#[async_trait]
impl ProfileSource for RestSource {
    async fn select(&self, query: &Query) -> Result<Response<Vec<RawProfile>>> {
        let url = self.table_url(query)?;
        debug!("Selecting {} from {}", query.select_clause(), query.table);

        let response = self.http.get(url).send().await?;
        into_envelope(response).await
    }
}

#[async_trait]
impl ActionInvoker for RestSource {
    async fn invoke(
        &self,
        action: &str,
        body: serde_json::Value,
    ) -> Result<Response<serde_json::Value>> {
        let url = self.action_url(action)?;
        debug!("Invoking action {}", action);

        let response = self.http.post(url).json(&body).send().await?;
        into_envelope(response).await
    }
}

/// Turn an HTTP reply into the `{data, error}` envelope.
///
/// Success bodies must decode as `T` (an empty body decodes as JSON null).
/// Failure bodies are read as an [`ErrorDescriptor`] when they look like one,
/// otherwise the status and raw body become its message.
async fn into_envelope<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<Response<T>> {
    let status = response.status();
    let text = response.text().await?;
    trace!("{} bytes with status {}", text.len(), status);

    if status.is_success() {
        let body = if text.trim().is_empty() { "null" } else { text.as_str() };
        let data = serde_json::from_str(body)?;
        return Ok(Response::ok(data));
    }

    let error = match serde_json::from_str::<ErrorDescriptor>(&text) {
        Ok(descriptor) => descriptor,
        Err(_) => ErrorDescriptor {
            message: format!("{} {}", status, text.trim()).trim().to_string(),
            code: Some(status.as_u16().to_string()),
            ..Default::default()
        },
    };
    Ok(Response::err(error))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(url: &str) -> RestSource {
        RestSource::new(&SourceConfig::new(
            Url::parse(url).unwrap(),
            "anon".to_string(),
        ))
        .unwrap()
    }

    #[test]
    fn test_table_url() {
        let url = source("https://project.example.com")
            .table_url(&Query::profiles())
            .unwrap();
        assert_eq!(url.path(), "/rest/v1/profiles");

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("select".to_string(), "id,nome".to_string()),
                ("order".to_string(), "nome.asc".to_string()),
            ]
        );
    }

    #[test]
    fn test_base_path_is_kept() {
        let rest = source("https://gateway.example.com/project/");
        assert_eq!(
            rest.action_url("get-sharepoint-link").unwrap().as_str(),
            "https://gateway.example.com/project/functions/v1/get-sharepoint-link"
        );
    }

    #[test]
    fn test_key_must_fit_in_a_header() {
        let config = SourceConfig::new(
            Url::parse("https://project.example.com").unwrap(),
            "bad\nkey".to_string(),
        );
        assert!(matches!(
            RestSource::new(&config),
            Err(DirectoryError::Config(_))
        ));
    }
}
