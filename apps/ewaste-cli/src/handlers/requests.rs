//! Pickup request handlers: submit wizard, list, tracking, update, delete.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use ewaste_core::DomainError;
use ewaste_core::domain::{
    Condition, DeviceType, ImageUpload, PickupRequest, RequestDraft, RequestQuery, RequestWizard,
    StepState, TimelineStep, WizardStep, timeline,
};
use ewaste_core::ports::RequestImage;
use ewaste_infra::images::{load_image, load_thumbnails};

use super::message_or;
use crate::error::{AppError, AppResult};
use crate::guard::{authorized, require_session};
use crate::state::AppState;

/// Size and type of an image, without the bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageInfo {
    pub content_type: String,
    pub size: usize,
}

impl From<&RequestImage> for ImageInfo {
    fn from(image: &RequestImage) -> Self {
        Self {
            content_type: image.content_type.clone(),
            size: image.bytes.len(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestRow {
    #[serde(flatten)]
    pub request: PickupRequest,
    /// What the status means, absent for unrecognised statuses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<&'static str>,
    /// `None` leaves a placeholder in the list.
    pub image: Option<ImageInfo>,
}

impl RequestRow {
    pub fn new(request: PickupRequest, image: Option<ImageInfo>) -> Self {
        Self {
            detail: request.status.detail(),
            request,
            image,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestList {
    /// Requests before filtering.
    pub total: usize,
    pub rows: Vec<RequestRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StepView {
    pub status: String,
    pub label: &'static str,
    pub detail: &'static str,
    pub state: &'static str,
}

impl From<&TimelineStep> for StepView {
    fn from(step: &TimelineStep) -> Self {
        Self {
            status: step.status.as_str().to_string(),
            label: step.label(),
            detail: step.detail(),
            state: match step.state {
                StepState::Done => "done",
                StepState::Active => "active",
                StepState::Pending => "pending",
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TrackingView {
    pub request: PickupRequest,
    pub steps: Vec<StepView>,
    pub image: Option<ImageInfo>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SavedImage {
    pub path: PathBuf,
    #[serde(flatten)]
    pub image: ImageInfo,
}

/// Field changes for an existing request. `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct RequestEdits {
    pub device_type: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub condition: Option<Condition>,
    pub quantity: Option<u32>,
    pub pickup_address: Option<String>,
    pub additional_remarks: Option<String>,
    pub image: Option<ImageUpload>,
}

/// Picks a listed device type, or `Other` with the name as the custom type.
pub fn set_device_type(draft: &mut RequestDraft, name: &str) {
    match DeviceType::known(name) {
        Some(known) => {
            draft.device_type = known;
            draft.custom_device_type.clear();
        }
        None if name.trim().eq_ignore_ascii_case(DeviceType::Other.as_str()) => {
            draft.device_type = DeviceType::Other;
        }
        None => {
            draft.device_type = DeviceType::Other;
            draft.custom_device_type = name.trim().to_string();
        }
    }
}

impl RequestEdits {
    fn apply(self, draft: &mut RequestDraft) {
        if let Some(device_type) = self.device_type {
            set_device_type(draft, &device_type);
        }
        if let Some(brand) = self.brand {
            draft.brand = brand;
        }
        if let Some(model) = self.model {
            draft.model = model;
        }
        if let Some(condition) = self.condition {
            draft.condition = condition;
        }
        if let Some(quantity) = self.quantity {
            draft.quantity = quantity;
        }
        if let Some(address) = self.pickup_address {
            draft.pickup_address = address;
        }
        if let Some(remarks) = self.additional_remarks {
            draft.additional_remarks = remarks;
        }
        if self.image.is_some() {
            draft.image = self.image;
        }
    }
}

fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "heic" => "image/heic",
        _ => "application/octet-stream",
    }
}

/// Reads a proof image from disk, typed by its extension.
pub async fn read_image(path: &Path) -> AppResult<ImageUpload> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| AppError::Input(format!("Cannot read {}: {e}", path.display())))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("image")
        .to_string();
    Ok(ImageUpload::new(file_name, content_type_for(path), bytes))
}

/// Walks the submit wizard to the confirm step and sends the request.
pub async fn submit(state: &AppState, draft: RequestDraft) -> AppResult<PickupRequest> {
    let session = require_session(state).await?;

    let mut wizard = RequestWizard::new(draft);
    while wizard.step() != WizardStep::Confirm {
        tracing::debug!(step = %wizard.step().heading(), "Checking wizard step");
        wizard.advance()?;
    }
    let submission = wizard.submit()?;

    let created = authorized(state, state.requests.submit(&session, &submission).await).await?;
    tracing::info!(request_id = created.id, "Pickup request submitted");
    Ok(created)
}

/// GET /requests/mine, filtered locally.
pub async fn list(state: &AppState, query: &RequestQuery, with_images: bool) -> AppResult<RequestList> {
    let session = require_session(state).await?;
    let all = authorized(state, state.requests.list_mine(&session).await).await?;
    let matching: Vec<PickupRequest> = query.apply(&all).into_iter().cloned().collect();

    let mut images = if with_images {
        let ids: Vec<i64> = matching.iter().map(|r| r.id).collect();
        load_thumbnails(
            state.requests.as_ref(),
            &session,
            &ids,
            state.thumbnail_concurrency,
        )
        .await
    } else {
        HashMap::new()
    };

    let rows = matching
        .into_iter()
        .map(|request| {
            let image = images.remove(&request.id).as_ref().map(ImageInfo::from);
            RequestRow::new(request, image)
        })
        .collect();

    Ok(RequestList {
        total: all.len(),
        rows,
    })
}

/// Request detail with its progress list and proof image.
pub async fn track(state: &AppState, id: i64) -> AppResult<TrackingView> {
    let session = require_session(state).await?;
    let request = authorized(state, state.requests.get(&session, id).await).await?;
    let image = load_image(state.requests.as_ref(), &session, id).await;

    Ok(TrackingView {
        steps: timeline(&request.status).iter().map(StepView::from).collect(),
        image: image.as_ref().map(ImageInfo::from),
        request,
    })
}

/// POST /requests/{id}/update, only while the request is still submitted.
pub async fn update(state: &AppState, id: i64, edits: RequestEdits) -> AppResult<PickupRequest> {
    let session = require_session(state).await?;
    let current = authorized(state, state.requests.get(&session, id).await).await?;
    if !current.status.is_editable() {
        return Err(DomainError::NotEditable {
            status: current.status,
        }
        .into());
    }

    let mut draft = RequestDraft::from_request(&current);
    edits.apply(&mut draft);
    let submission = draft.to_update()?;

    let updated = authorized(state, state.requests.update(&session, id, &submission).await).await?;
    tracing::info!(request_id = id, "Pickup request updated");
    Ok(updated)
}

/// DELETE /requests/{id}. Nothing is sent unless `confirmed`.
pub async fn delete(state: &AppState, id: i64, confirmed: bool) -> AppResult<String> {
    if !confirmed {
        return Err(AppError::Cancelled);
    }
    let session = require_session(state).await?;
    let message = authorized(state, state.requests.delete(&session, id).await).await?;
    tracing::info!(request_id = id, "Pickup request deleted");
    Ok(message_or(message, "Request deleted successfully"))
}

/// Writes the proof image of a request to `out`.
pub async fn save_image(state: &AppState, id: i64, out: &Path) -> AppResult<SavedImage> {
    let session = require_session(state).await?;
    let image = authorized(state, state.requests.image(&session, id).await)
        .await?
        .ok_or_else(|| AppError::Input("No image available for this request.".into()))?;

    tokio::fs::write(out, &image.bytes)
        .await
        .map_err(|e| AppError::Input(format!("Cannot write {}: {e}", out.display())))?;

    Ok(SavedImage {
        path: out.to_path_buf(),
        image: ImageInfo::from(&image),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ewaste_core::domain::{RequestStatus, StatusFilter};

    use super::*;
    use ewaste_core::domain::{Route, StorageKey};

    use crate::handlers::testing::{FakeBackend, REVOKED_TOKEN, pickup, signed_in};

    fn png() -> ImageUpload {
        ImageUpload::new("proof.png", "image/png", vec![1, 2, 3])
    }

    fn draft() -> RequestDraft {
        RequestDraft {
            brand: " Dell ".into(),
            model: "Latitude".into(),
            pickup_address: "12 MG Road, Pune".into(),
            additional_remarks: "   ".into(),
            image: Some(png()),
            ..RequestDraft::default()
        }
    }

    fn backend_with(requests: Vec<PickupRequest>) -> Arc<FakeBackend> {
        let backend = Arc::new(FakeBackend::default());
        *backend.requests.lock().unwrap() = requests;
        backend
    }

    #[tokio::test]
    async fn test_submit_trims_and_drops_blank_remarks() {
        let backend = Arc::new(FakeBackend::default());
        let state = signed_in(backend.clone()).await;

        let created = submit(&state, draft()).await.unwrap();
        assert_eq!(created.status, RequestStatus::Submitted);

        let sent = backend.last_submission.lock().unwrap().clone().unwrap();
        assert_eq!(sent.brand, "Dell");
        assert_eq!(sent.device_type, "Laptop");
        assert_eq!(sent.additional_remarks, None);
    }

    #[tokio::test]
    async fn test_submit_stops_at_device_step() {
        let backend = Arc::new(FakeBackend::default());
        let state = signed_in(backend.clone()).await;

        let err = submit(
            &state,
            RequestDraft {
                brand: String::new(),
                ..draft()
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "Brand is required.");
        assert!(!backend.called("submit"));
    }

    #[tokio::test]
    async fn test_submit_requires_image() {
        let state = signed_in(Arc::new(FakeBackend::default())).await;
        let err = submit(
            &state,
            RequestDraft {
                image: None,
                ..draft()
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "Proof image is required.");
    }

    #[tokio::test]
    async fn test_custom_device_type_is_sent() {
        let backend = Arc::new(FakeBackend::default());
        let state = signed_in(backend.clone()).await;

        let mut draft = draft();
        set_device_type(&mut draft, "Router");
        submit(&state, draft).await.unwrap();

        let sent = backend.last_submission.lock().unwrap().clone().unwrap();
        assert_eq!(sent.device_type, "Router");
    }

    #[tokio::test]
    async fn test_list_filters_by_status() {
        let requests = (1..=10)
            .map(|id| {
                let status = if id % 3 == 0 {
                    RequestStatus::Recycled
                } else {
                    RequestStatus::Submitted
                };
                pickup(id, status)
            })
            .collect();
        let state = signed_in(backend_with(requests)).await;

        let query = RequestQuery::new("", StatusFilter::Only(RequestStatus::Recycled));
        let list = list(&state, &query, false).await.unwrap();
        assert_eq!(list.total, 10);
        assert_eq!(list.rows.len(), 3);
    }

    #[tokio::test]
    async fn test_list_rows_carry_status_detail() {
        let state = signed_in(backend_with(vec![
            pickup(1, RequestStatus::Recycled),
            pickup(2, RequestStatus::Other("ON_HOLD".into())),
        ]))
        .await;

        let list = list(&state, &RequestQuery::default(), false).await.unwrap();
        assert_eq!(
            list.rows[0].detail,
            Some("Great news! Your electronic waste has been successfully processed and recycled.")
        );
        assert_eq!(list.rows[1].detail, None);
    }

    #[tokio::test]
    async fn test_rejected_token_is_cleared_on_list() {
        let backend = backend_with(vec![pickup(1, RequestStatus::Submitted)]);
        let state = signed_in(backend).await;
        state.store.set(StorageKey::Token, REVOKED_TOKEN).await.unwrap();

        let err = list(&state, &RequestQuery::default(), true).await.unwrap_err();
        assert_eq!(err.route(), Some(Route::Login));
        assert_eq!(state.store.get(StorageKey::Token).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_thumbnail_failures_leave_placeholders() {
        let requests = (1..=4).map(|id| pickup(id, RequestStatus::Submitted)).collect();
        let state = signed_in(backend_with(requests)).await;

        let list = list(&state, &RequestQuery::default(), true).await.unwrap();
        let with_image: Vec<i64> = list
            .rows
            .iter()
            .filter(|row| row.image.is_some())
            .map(|row| row.request.id)
            .collect();
        assert_eq!(with_image, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_track_builds_timeline() {
        let state = signed_in(backend_with(vec![pickup(1, RequestStatus::PickedUp)])).await;

        let view = track(&state, 1).await.unwrap();
        let states: Vec<&str> = view.steps.iter().map(|s| s.state).collect();
        assert_eq!(states, vec!["done", "done", "active", "pending"]);
        assert!(view.image.is_some());
    }

    #[tokio::test]
    async fn test_update_only_while_submitted() {
        let backend = backend_with(vec![
            pickup(1, RequestStatus::Submitted),
            pickup(2, RequestStatus::PickupScheduled),
        ]);
        let state = signed_in(backend.clone()).await;

        let err = update(&state, 2, RequestEdits::default()).await.unwrap_err();
        assert!(err.to_string().starts_with("Only submitted requests can be updated"));
        assert!(!backend.called("update"));

        let edits = RequestEdits {
            quantity: Some(3),
            condition: Some(Condition::Dead),
            ..RequestEdits::default()
        };
        let updated = update(&state, 1, edits).await.unwrap();
        assert_eq!(updated.quantity, 3);
        assert_eq!(updated.condition, Condition::Dead);

        let sent = backend.last_submission.lock().unwrap().clone().unwrap();
        assert!(sent.image.is_none());
    }

    #[tokio::test]
    async fn test_update_rejects_bad_quantity() {
        let state = signed_in(backend_with(vec![pickup(1, RequestStatus::Submitted)])).await;
        let edits = RequestEdits {
            quantity: Some(1001),
            ..RequestEdits::default()
        };
        let err = update(&state, 1, edits).await.unwrap_err();
        assert_eq!(err.to_string(), "Quantity must be between 1 and 1000");
    }

    #[tokio::test]
    async fn test_delete_needs_confirmation() {
        let backend = backend_with(vec![pickup(1, RequestStatus::Submitted)]);
        let state = signed_in(backend.clone()).await;

        assert!(matches!(
            delete(&state, 1, false).await.unwrap_err(),
            AppError::Cancelled
        ));
        assert!(!backend.called("delete"));

        let message = delete(&state, 1, true).await.unwrap();
        assert_eq!(message, "Request deleted successfully");
        assert!(backend.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_read_and_save_image() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("proof.JPG");
        std::fs::write(&source, [9u8, 9, 9]).unwrap();

        let image = read_image(&source).await.unwrap();
        assert_eq!(image.content_type, "image/jpeg");
        assert_eq!(image.file_name, "proof.JPG");

        let state = signed_in(backend_with(vec![pickup(1, RequestStatus::Submitted)])).await;
        let out = dir.path().join("out.png");
        let saved = save_image(&state, 1, &out).await.unwrap();
        assert_eq!(saved.image.content_type, "image/png");
        assert_eq!(std::fs::read(&out).unwrap().len(), saved.image.size);
    }
}
