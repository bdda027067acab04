//! HTTP plumbing shared by the external-service clients.

pub mod auth;
mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use crate::error::Result;

/// Sends `req` and returns the body, failing on non-success status codes with
/// the status and response text in the message.
pub async fn send_for_text<C: HttpClient + ?Sized>(client: &C, req: reqwest::Request) -> Result<String> {
    let resp = client.execute(req).await?;
    let status = resp.status();

    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(crate::Error::HttpStatus {
            status: status.as_u16(),
            body,
        });
    }
    Ok(resp.text().await?)
}
