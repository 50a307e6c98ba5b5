//! Best-effort image loading for list thumbnails and the tracking view.

use std::collections::HashMap;

use futures::stream::{self, StreamExt};

use ewaste_core::domain::Session;
use ewaste_core::ports::{PickupRequestApi, RequestImage};

pub const DEFAULT_THUMBNAIL_CONCURRENCY: usize = 4;

/// Loads one request image. Any failure yields `None`.
pub async fn load_image(
    api: &dyn PickupRequestApi,
    session: &Session,
    id: i64,
) -> Option<RequestImage> {
    match api.image(session, id).await {
        Ok(image) => image,
        Err(e) => {
            tracing::debug!(request_id = id, error = %e, "Image unavailable");
            None
        }
    }
}

/// Loads images for many requests with at most `concurrency` in flight.
///
/// Requests whose image failed or is missing are absent from the map.
pub async fn load_thumbnails(
    api: &dyn PickupRequestApi,
    session: &Session,
    ids: &[i64],
    concurrency: usize,
) -> HashMap<i64, RequestImage> {
    stream::iter(ids.iter().copied())
        .map(|id| async move { (id, load_image(api, session, id).await) })
        .buffer_unordered(concurrency.max(1))
        .filter_map(|(id, image)| async move { image.map(|image| (id, image)) })
        .collect()
        .await
}
