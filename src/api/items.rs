//! Item Routes
//!
//! The listing page and the lost/found report forms.
//!
//! Routes:
//! - GET / - Listing, newest first
//! - GET /lost - Lost item form
//! - POST /lost - Record a lost item, redirect to /
//! - GET /found - Found item form
//! - POST /found - Record a found item, redirect to /

use std::collections::HashMap;

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Multipart, Request, State},
    http::{header::CONTENT_TYPE, StatusCode},
    response::{Html, Redirect},
    routing::get,
    Form, Router,
};
use tracing::info;

use crate::models::{Item, ItemStatus, NewItem};
use crate::{AppState, Error, Result};

/// Form field holding the optional photo.
const IMAGE_FIELD: &str = "item_image";

/// Build item routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_items))
        .route("/lost", get(lost_form).post(report_lost))
        .route("/found", get(found_form).post(report_found))
}

// ============================================================================
// Request Types
// ============================================================================

/// A file attached to a report.
#[derive(Debug)]
pub struct UploadedFile {
    pub filename: String,
    pub data: Bytes,
}

/// Parsed body of a report submission.
///
/// Accepts `multipart/form-data` (the only way to attach a photo) and
/// `application/x-www-form-urlencoded`. Missing fields are empty; any other
/// content type is treated as a submission with no fields at all. When a
/// field repeats, the first value is kept in either encoding.
#[derive(Debug, Default)]
pub struct ReportSubmission {
    pub fields: NewItem,
    pub image: Option<UploadedFile>,
}

impl ReportSubmission {
    fn from_fields(mut fields: HashMap<String, String>, image: Option<UploadedFile>) -> Self {
        let mut take = |name: &str| fields.remove(name).unwrap_or_default();

        Self {
            fields: NewItem {
                name: take("item_name"),
                description: take("description"),
                location: take("location"),
                contact: take("contact"),
            },
            image,
        }
    }

    async fn from_multipart(mut multipart: Multipart) -> Result<Self> {
        let mut fields = HashMap::new();
        let mut image = None;

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or_default().to_string();

            if name == IMAGE_FIELD {
                let filename = field.file_name().unwrap_or_default().to_string();
                if filename.is_empty() || image.is_some() {
                    continue;
                }

                let data = field.bytes().await.map_err(multipart_error)?;
                image = Some(UploadedFile { filename, data });
                continue;
            }

            // Files sent under text field names are ignored.
            if field.file_name().is_some() {
                continue;
            }

            let value = field.text().await.map_err(multipart_error)?;
            fields.entry(name).or_insert(value);
        }

        Ok(Self::from_fields(fields, image))
    }
}

fn multipart_error(e: axum::extract::multipart::MultipartError) -> Error {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        Error::PayloadTooLarge
    } else {
        Error::InvalidInput(format!("Failed to read multipart field: {}", e.body_text()))
    }
}

#[async_trait]
impl<S> FromRequest<S> for ReportSubmission
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| Error::InvalidInput(e.body_text()))?;
            Self::from_multipart(multipart).await
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                .await
                .map_err(|e| {
                    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                        Error::PayloadTooLarge
                    } else {
                        Error::InvalidInput(e.body_text())
                    }
                })?;

            let mut fields = HashMap::new();
            for (name, value) in pairs {
                fields.entry(name).or_insert(value);
            }
            Ok(Self::from_fields(fields, None))
        } else {
            Ok(Self::default())
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Render all reports, newest first.
///
/// GET /
#[axum::debug_handler]
async fn list_items(State(state): State<AppState>) -> Result<Html<String>> {
    let items = state.items.newest_first().await;
    Ok(Html(state.views.render_index(&items)?))
}

/// GET /lost
#[axum::debug_handler]
async fn lost_form(State(state): State<AppState>) -> Result<Html<String>> {
    Ok(Html(state.views.render_report(ItemStatus::Lost)?))
}

/// POST /lost
#[axum::debug_handler]
async fn report_lost(
    State(state): State<AppState>,
    submission: ReportSubmission,
) -> Result<Redirect> {
    create_report(&state, ItemStatus::Lost, submission).await
}

/// GET /found
#[axum::debug_handler]
async fn found_form(State(state): State<AppState>) -> Result<Html<String>> {
    Ok(Html(state.views.render_report(ItemStatus::Found)?))
}

/// POST /found
#[axum::debug_handler]
async fn report_found(
    State(state): State<AppState>,
    submission: ReportSubmission,
) -> Result<Redirect> {
    create_report(&state, ItemStatus::Found, submission).await
}

/// Store the optional photo, append the record, and send the client back to
/// the listing so a refresh does not resubmit the form.
async fn create_report(
    state: &AppState,
    status: ItemStatus,
    submission: ReportSubmission,
) -> Result<Redirect> {
    let image_filename = match submission.image {
        Some(file) => state.uploads.save(&file.filename, &file.data).await?,
        None => None,
    };

    let item = Item::from_submission(status, submission.fields, image_filename);
    info!(
        status = %item.status,
        name = %item.name,
        image = ?item.image_filename,
        "New report"
    );

    state.items.append(item).await?;

    Ok(Redirect::to("/"))
}
