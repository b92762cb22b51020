// src/services/upload_form.rs
// DOCUMENTATION: multipart/form-data decoding for the image form

use crate::errors::GalleryError;
use crate::models::{ImageForm, UploadedFile};
use bytes::Bytes;
use futures_util::stream;
use uuid::Uuid;

const UNKNOWN_FILE_BASENAME: &str = "upload";

fn multipart_error(e: multer::Error) -> GalleryError {
    GalleryError::InvalidInput(format!("malformed multipart body: {}", e))
}

/// Decode an image form body
/// DOCUMENTATION: unknown fields are ignored; an empty file part (a file
/// input left blank) counts as no file
pub async fn parse_image_form(content_type: &str, body: Bytes) -> Result<ImageForm, GalleryError> {
    let boundary = multer::parse_boundary(content_type).map_err(multipart_error)?;
    let body_stream = stream::once(async move { Ok::<Bytes, std::io::Error>(body) });
    let mut multipart = multer::Multipart::new(body_stream, boundary);

    let mut form = ImageForm::default();
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "image" => {
                let file_name = field
                    .file_name()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| UNKNOWN_FILE_BASENAME.to_string());
                let content_type = field.content_type().map(|mime| mime.to_string());
                let bytes = field.bytes().await.map_err(multipart_error)?.to_vec();
                if !bytes.is_empty() {
                    form.image = Some(UploadedFile {
                        file_name,
                        content_type,
                        bytes,
                    });
                }
            }
            "title" => form.title = Some(field.text().await.map_err(multipart_error)?),
            "description" => {
                form.description = Some(field.text().await.map_err(multipart_error)?)
            }
            "tags" => form.tags = Some(field.text().await.map_err(multipart_error)?),
            "place_text" => form.place_text = Some(field.text().await.map_err(multipart_error)?),
            "album" => {
                let raw = field.text().await.map_err(multipart_error)?;
                let raw = raw.trim();
                if !raw.is_empty() {
                    let id = Uuid::parse_str(raw).map_err(|_| {
                        GalleryError::ValidationError(
                            "album: select a valid choice".to_string(),
                        )
                    })?;
                    form.album = Some(id);
                }
            }
            other => log::debug!("Ignoring unknown image form field {:?}", other),
        }
    }

    Ok(form)
}
