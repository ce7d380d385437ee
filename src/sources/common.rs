use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Communication(#[from] reqwest::Error),

    #[error("Failed to construct URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Failed to parse response: {0}")]
    Parsing(#[from] serde_json::Error),

    #[error("Bad request: {reason:?}")]
    BadRequest {
        reason: String
    },
}


/// Fetches `url` and parses the body as the wire type `S`, converted into `O` afterwards.
pub async fn fetch_json<O, S>(client: &reqwest::Client, url: &str) -> Result<O, ApiError>
where
    S: for<'de> Deserialize<'de> + Into<O>,
{
    let url = reqwest::Url::parse(url)?;

    let response = client.get(url).send().await?;
    let status = response.status();
    let payload = response.text().await?;

    if !status.is_success() {
        return Err(ApiError::BadRequest {
            reason: format!("server answered with status {}", status),
        });
    }

    parse_payload::<O, S>(&payload)
}

pub fn parse_payload<O, S>(payload: &str) -> Result<O, ApiError>
where
    S: for<'de> Deserialize<'de> + Into<O>,
{
    let parsed = serde_json::from_str::<S>(payload)?;
    Ok(parsed.into())
}
