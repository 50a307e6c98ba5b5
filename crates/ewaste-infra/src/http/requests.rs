//! `PickupRequestApi` over HTTP. Create and update are multipart uploads.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::Method;
use reqwest::multipart::{Form, Part};

use ewaste_core::domain::{PickupRequest, RequestSubmission, Session};
use ewaste_core::ports::{ApiError, PickupRequestApi, RequestImage};
use ewaste_shared::dto::{ImagePayload, MessageResponse};

use super::client::{HttpApiClient, Payload, decode};

const DEFAULT_IMAGE_TYPE: &str = "image/jpeg";

fn submission_form(submission: &RequestSubmission) -> Result<Form, ApiError> {
    let mut form = Form::new()
        .text("deviceType", submission.device_type.clone())
        .text("brand", submission.brand.clone())
        .text("model", submission.model.clone())
        .text("condition", submission.condition.as_str())
        .text("quantity", submission.quantity.to_string())
        .text("pickupAddress", submission.pickup_address.clone());

    if let Some(remarks) = &submission.additional_remarks {
        form = form.text("additionalRemarks", remarks.clone());
    }

    if let Some(image) = &submission.image {
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.content_type)
            .map_err(|e| ApiError::InvalidRequest(format!("Invalid image type: {e}")))?;
        form = form.part("image", part);
    }

    Ok(form)
}

fn decode_image(payload: ImagePayload) -> Result<Option<RequestImage>, ApiError> {
    let Some(data) = payload.base64_data.filter(|d| !d.is_empty()) else {
        return Ok(None);
    };
    let bytes = STANDARD
        .decode(data.as_bytes())
        .map_err(|e| ApiError::Decode(format!("image data: {e}")))?;
    Ok(Some(RequestImage {
        content_type: payload
            .content_type
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_IMAGE_TYPE.to_string()),
        bytes,
    }))
}

#[async_trait]
impl PickupRequestApi for HttpApiClient {
    async fn submit(
        &self,
        session: &Session,
        submission: &RequestSubmission,
    ) -> Result<PickupRequest, ApiError> {
        let form = submission_form(submission)?;
        let body = self
            .call(Method::POST, "/requests", Some(session), Payload::Multipart(form))
            .await?;
        decode(body)
    }

    async fn list_mine(&self, session: &Session) -> Result<Vec<PickupRequest>, ApiError> {
        let body = self
            .call(Method::GET, "/requests/mine", Some(session), Payload::Empty)
            .await?;
        decode(body)
    }

    async fn get(&self, session: &Session, id: i64) -> Result<PickupRequest, ApiError> {
        let body = self
            .call(
                Method::GET,
                &format!("/requests/{id}"),
                Some(session),
                Payload::Empty,
            )
            .await?;
        decode(body)
    }

    async fn update(
        &self,
        session: &Session,
        id: i64,
        submission: &RequestSubmission,
    ) -> Result<PickupRequest, ApiError> {
        let form = submission_form(submission)?;
        let body = self
            .call(
                Method::POST,
                &format!("/requests/{id}/update"),
                Some(session),
                Payload::Multipart(form),
            )
            .await?;
        decode(body)
    }

    async fn delete(&self, session: &Session, id: i64) -> Result<Option<String>, ApiError> {
        let body = self
            .call(
                Method::DELETE,
                &format!("/requests/{id}"),
                Some(session),
                Payload::Empty,
            )
            .await?;
        let body: MessageResponse = decode(body)?;
        Ok(body.message)
    }

    async fn image(&self, session: &Session, id: i64) -> Result<Option<RequestImage>, ApiError> {
        let body = self
            .call(
                Method::GET,
                &format!("/requests/{id}/image-data"),
                Some(session),
                Payload::Empty,
            )
            .await?;
        decode_image(decode(body)?)
    }
}
