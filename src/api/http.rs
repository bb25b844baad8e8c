//! HTTP implementation of the branding API.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use url::Url;

use crate::types::{BrandingRequest, LogoFile};

use super::{
    ApiError, BrandingApi, CompletePayload, CompleteResponse, PrepareResponse, SubmitResponse,
};

/// Branding API over HTTP.
///
/// Uses the client's default timeout behaviour; callers that need a deadline
/// should configure it on the `reqwest::Client` they pass in.
#[derive(Debug, Clone)]
pub struct HttpBrandingApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpBrandingApi {
    pub fn new(base_url: Url) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn form(request: &BrandingRequest) -> Result<Form, ApiError> {
        let mut form = Form::new()
            .text("tokenId", request.token_id().to_string())
            .text("tokenInfo", request.token_info_json()?)
            .part("logoPng", logo_part(request.logo_png())?)
            .part("logoSvg", logo_part(request.logo_svg())?);

        if let Some(creator) = request.creator() {
            form = form.text("creator", creator.to_string());
        }

        Ok(form)
    }
}

/// Append path segments to a base URL, percent-encoding each one.
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, ApiError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| ApiError::InvalidUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Send a request and decode a JSON body from a 2xx response.
pub(crate) async fn send_json<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, ApiError> {
    let response = builder.send().await?;
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Status {
            status: status.as_u16(),
            body,
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::InvalidResponse(e.to_string()))
}

fn logo_part(file: &LogoFile) -> Result<Part, ApiError> {
    Ok(Part::bytes(file.bytes().to_vec())
        .file_name(file.name().to_string())
        .mime_str(file.kind().mime())?)
}

#[async_trait]
impl BrandingApi for HttpBrandingApi {
    async fn prepare(&self, request: &BrandingRequest) -> Result<PrepareResponse, ApiError> {
        let url = endpoint(
            &self.base_url,
            &["api", "tokens", request.token_id(), "branding", "prepare"],
        )?;
        tracing::debug!(token = request.token_id(), %url, "Preparing token branding");

        let builder = self.client.post(url).multipart(Self::form(request)?);
        send_json(builder).await
    }

    async fn complete(
        &self,
        token_id: &str,
        payload: &CompletePayload,
    ) -> Result<CompleteResponse, ApiError> {
        let url = endpoint(&self.base_url, &["api", "tokens", token_id, "branding", "complete"])?;
        tracing::debug!(token = token_id, %url, commit = %payload.commit_hash, "Completing token branding");

        let builder = self.client.post(url).json(payload);
        send_json(builder).await
    }

    async fn submit(&self, request: &BrandingRequest) -> Result<SubmitResponse, ApiError> {
        let url = endpoint(&self.base_url, &["api", "token-branding"])?;
        tracing::debug!(token = request.token_id(), %url, "Submitting token branding");

        let builder = self.client.post(url).multipart(Self::form(request)?);
        send_json(builder).await
    }
}
