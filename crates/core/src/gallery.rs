//! Assembles the page model: photos grouped by day plus the stored comments.

use crate::indexer;
use crate::models::{DateMap, DayUnit, GalleryView, PhotosByDate};
use anyhow::Context;
use std::path::PathBuf;
use storage::CommentStore;
use tracing::debug;

pub const ALL_PHOTOS_TITLE: &str = "All Photos";

pub fn month_title(month: &str) -> String {
    format!("Photos of {month}")
}

/// Scans `photos_dir` on the blocking pool.
pub async fn photos_by_date(photos_dir: PathBuf) -> anyhow::Result<PhotosByDate> {
    let grouped = tokio::task::spawn_blocking(move || indexer::list_photos_by_date(&photos_dir))
        .await
        .context("photo scan task")??;
    Ok(grouped)
}

/// Builds the view for every photo, or for a single `YYYY-MM` month.
pub async fn build_view(
    photos_dir: PathBuf,
    store: &dyn CommentStore,
    month: Option<&str>,
) -> anyhow::Result<GalleryView> {
    let mut grouped = photos_by_date(photos_dir).await?;
    if let Some(month) = month {
        grouped = indexer::filter_by_month_prefix(grouped, month);
    }
    debug!("{} day(s) with photos", grouped.len());
    let photos: DateMap<DayUnit> = indexer::annotate_with_week(grouped)?;
    let comments = store.load().await.context("load comments")?;
    let title = month.map(month_title).unwrap_or_else(|| ALL_PHOTOS_TITLE.to_string());
    Ok(GalleryView {
        photos,
        comments,
        title,
    })
}
