use reqwest::StatusCode;
use reqwest::Url;
use reqwest::blocking::Client;

use super::{DefinitionSource, WordListSource, parse_word_list};
use crate::error::{Result, WordbookError};
use crate::types::{DefinitionPayload, WordbookConfig};

/// Blocking HTTP client for the dictionary API and the word-list document.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    api_base_url: Url,
    words_dictionary_url: Url,
}

impl HttpClient {
    pub fn new(config: &WordbookConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(concat!("wordbook-core/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(request_error)?;
        Ok(Self {
            client,
            api_base_url: parse_url("api_base_url", &config.api_base_url)?,
            words_dictionary_url: parse_url(
                "words_dictionary_url",
                &config.words_dictionary_url,
            )?,
        })
    }

    /// Endpoint for `word`, percent-encoded as one trailing path segment.
    pub fn definition_url(&self, word: &str) -> Result<Url> {
        let mut url = self.api_base_url.clone();
        url.path_segments_mut()
            .map_err(|()| WordbookError::InvalidConfig {
                reason: format!("api_base_url {} cannot take a path", self.api_base_url),
            })?
            .pop_if_empty()
            .push(word);
        Ok(url)
    }
}

impl DefinitionSource for HttpClient {
    fn fetch_definition(&self, word: &str) -> Result<Vec<DefinitionPayload>> {
        let url = self.definition_url(word)?;
        tracing::debug!(http.url = %url, "fetching definition");

        let response = self.client.get(url).send().map_err(request_error)?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(WordbookError::WordNotFound {
                word: word.to_string(),
            });
        }
        if !status.is_success() {
            return Err(status_error(status));
        }
        response.json().map_err(request_error)
    }
}

impl WordListSource for HttpClient {
    fn fetch_word_list(&self) -> Result<Vec<String>> {
        tracing::info!(http.url = %self.words_dictionary_url, "fetching word list");
        let response = self
            .client
            .get(self.words_dictionary_url.clone())
            .send()
            .map_err(request_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status));
        }
        let body = response.text().map_err(request_error)?;
        parse_word_list(&body)
    }
}

fn parse_url(field: &str, raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|err| WordbookError::InvalidConfig {
        reason: format!("{field} {raw:?}: {err}"),
    })
}

fn status_error(status: StatusCode) -> WordbookError {
    WordbookError::RequestFailed {
        status: Some(status.as_u16()),
        reason: status
            .canonical_reason()
            .unwrap_or("unexpected status")
            .to_string(),
    }
}

fn request_error(err: reqwest::Error) -> WordbookError {
    WordbookError::RequestFailed {
        status: err.status().map(|status| status.as_u16()),
        reason: err.to_string(),
    }
}
