use reqwest::{Client, Response, StatusCode};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Status: {0}")]
    Status(StatusCode),

    #[error("Request: {0}")]
    Request(#[from] reqwest::Error),
}

/// Single GET with query parameters. No retries: the first failure is returned.
pub async fn get(client: &Client, url: &str, params: &[(&str, String)]) -> Result<Response, Error> {
    let resp = client.get(url).query(params).send().await?;

    let status = resp.status();

    if status.is_success() {
        Ok(resp)
    } else {
        Err(Error::Status(status))
    }
}

pub async fn get_text(
    client: &Client,
    url: &str,
    params: &[(&str, String)],
) -> Result<String, Error> {
    let resp = get(client, url, params).await?;

    Ok(resp.text().await?)
}
