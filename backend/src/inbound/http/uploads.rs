//! Image upload handler.
//!
//! ```text
//! POST /post-image (multipart/form-data; field "image")
//! ```

use actix_multipart::form::MultipartForm;
use actix_multipart::form::bytes::Bytes;
use actix_web::{post, web};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{Error, UploadReport};

/// Multipart body accepted by [`post_image`].
#[derive(MultipartForm, ToSchema)]
pub struct ImageUpload {
    /// File to describe.
    #[schema(value_type = String, format = Binary)]
    pub image: Bytes,
}

/// Describe an uploaded image without storing it.
#[utoipa::path(
    post,
    path = "/post-image",
    request_body(content = ImageUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Upload summary", body = UploadReport),
        (status = 400, description = "Invalid request", body = Error),
        (status = 413, description = "Upload larger than 20 MiB", body = Error),
        (status = 422, description = "Validation failed", body = Error)
    ),
    tags = ["uploads"],
    operation_id = "postImage"
)]
#[post("/post-image")]
pub async fn post_image(
    MultipartForm(form): MultipartForm<ImageUpload>,
) -> web::Json<UploadReport> {
    let Bytes {
        data,
        content_type,
        file_name,
    } = form.image;
    let report = UploadReport::describe(
        file_name,
        content_type.map(|mime| mime.essence_str().to_owned()),
        &data,
    );
    info!(size_kb = report.size_kb, "upload described");
    web::Json(report)
}
