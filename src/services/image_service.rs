// src/services/image_service.rs
// DOCUMENTATION: Business logic for images and tag listings
// PURPOSE: Upload, edit and delete images; build listing pages

use crate::config::DbPool;
use crate::db::{AlbumRepository, ImageRepository, TagRepository};
use crate::errors::{db_error, GalleryError};
use crate::models::{
    image_url, parse_tag_input, AlbumChoice, Image, ImageDetailResponse, ImageForm, ImageFormResponse,
    ImageListResponse, ImageResponse, NewImage, PageQuery, TagListResponse, UploadedFile, User,
    Viewer, MAX_TAG_LENGTH,
};
use crate::services::{access, MediaStore, PlaceHandle, PlaceService};
use uuid::Uuid;

/// Header facts read from an uploaded payload
struct Inspected {
    content_type: Option<String>,
    width: Option<i32>,
    height: Option<i32>,
}

/// Reject payloads that are not a recognised image format
fn inspect_image(file: &UploadedFile) -> Result<Inspected, GalleryError> {
    let invalid = || {
        GalleryError::ValidationError(
            "image: upload a valid image; the file was either not an image or corrupted"
                .to_string(),
        )
    };
    let kind = imagesize::image_type(&file.bytes).map_err(|_| invalid())?;
    let size = imagesize::blob_size(&file.bytes).map_err(|_| invalid())?;

    let guessed = match kind {
        imagesize::ImageType::Jpeg => Some("image/jpeg"),
        imagesize::ImageType::Png => Some("image/png"),
        imagesize::ImageType::Gif => Some("image/gif"),
        imagesize::ImageType::Webp => Some("image/webp"),
        _ => None,
    };

    Ok(Inspected {
        content_type: guessed
            .map(str::to_string)
            .or_else(|| file.content_type.clone()),
        width: i32::try_from(size.width).ok(),
        height: i32::try_from(size.height).ok(),
    })
}

fn parse_tags(raw: &str) -> Result<Vec<String>, GalleryError> {
    let tags = parse_tag_input(raw);
    if let Some(long) = tags.iter().find(|t| t.chars().count() > MAX_TAG_LENGTH) {
        return Err(GalleryError::ValidationError(format!(
            "tags: {:?} is longer than {} characters",
            long, MAX_TAG_LENGTH
        )));
    }
    Ok(tags)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim().to_string();
        (!trimmed.is_empty()).then_some(trimmed)
    })
}

pub struct ImageService;

impl ImageService {
    /// Albums of `owner_id` offered in the form shown to `user`
    async fn album_choices(
        pool: &DbPool,
        owner_id: Uuid,
        user: &User,
    ) -> Result<Vec<AlbumChoice>, GalleryError> {
        let albums = AlbumRepository::list_by_user(pool, owner_id, &Viewer::of(Some(user))).await?;
        Ok(albums.iter().map(AlbumChoice::from).collect())
    }

    /// The target album must exist and belong to the uploader
    async fn require_owned_album(
        pool: &DbPool,
        owner_id: Uuid,
        album_id: Uuid,
    ) -> Result<(), GalleryError> {
        let invalid =
            || GalleryError::ValidationError("album: select a valid choice".to_string());
        match AlbumRepository::get_by_id(pool, album_id).await {
            Ok(album) if album.user_id == owner_id => Ok(()),
            Ok(_) | Err(GalleryError::NotFound(_)) => Err(invalid()),
            Err(e) => Err(e),
        }
    }

    /// Paginated index of every visible image
    pub async fn list_images(
        pool: &DbPool,
        user: Option<&User>,
        query: &PageQuery,
        default_limit: i64,
    ) -> Result<ImageListResponse, GalleryError> {
        let (page, limit, offset) = query.resolve(default_limit);
        let (images, total_count) =
            ImageRepository::list_visible(pool, &Viewer::of(user), limit, offset).await?;

        Ok(ImageListResponse {
            image_list: images.iter().map(|i| i.to_response()).collect(),
            total_count,
            page,
            limit,
            has_more: total_count > page * limit,
        })
    }

    /// Blank upload form offering the requester's albums
    pub async fn upload_form(
        pool: &DbPool,
        places: &PlaceHandle,
        user: &User,
    ) -> Result<ImageFormResponse, GalleryError> {
        let albums = Self::album_choices(pool, user.id, user).await?;
        Ok(ImageFormResponse::blank(albums, places.is_some()))
    }

    /// Store the payload and create the image with its tags and place
    pub async fn upload_image(
        pool: &DbPool,
        media: &MediaStore,
        places: &PlaceHandle,
        user: &User,
        form: ImageForm,
    ) -> Result<ImageResponse, GalleryError> {
        let file = form
            .image
            .as_ref()
            .ok_or_else(|| GalleryError::ValidationError("image: this field is required".into()))?;
        let album_id = form
            .album
            .ok_or_else(|| GalleryError::ValidationError("album: this field is required".into()))?;

        let inspected = inspect_image(file)?;
        Self::require_owned_album(pool, user.id, album_id).await?;
        let tags = parse_tags(form.tags.as_deref().unwrap_or_default())?;
        let place = PlaceService::resolve_text(places, form.place_text.as_deref()).await?;

        let file_path = media.save(file).await?;
        let new = NewImage {
            title: form.title.as_deref().unwrap_or_default().trim().to_string(),
            description: non_blank(form.description),
            album_id,
            user_id: user.id,
            file_path: file_path.clone(),
            content_type: inspected.content_type,
            width: inspected.width,
            height: inspected.height,
            place_id: place.map(|p| p.id),
        };

        let inserted = async {
            let mut tx = pool.begin().await.map_err(db_error("begin transaction"))?;
            let id = ImageRepository::insert_image(&mut *tx, &new).await?;
            TagRepository::set_tags(&mut *tx, id, &tags).await?;
            tx.commit().await.map_err(db_error("commit transaction"))?;
            Ok::<Uuid, GalleryError>(id)
        }
        .await;

        let id = match inserted {
            Ok(id) => id,
            Err(e) => {
                media.remove_all(&[file_path]).await;
                return Err(e);
            }
        };

        log::info!("User {} uploaded image {}", user.username, id);
        Ok(ImageRepository::get_by_id(pool, id).await?.to_response())
    }

    /// Image page with album context and neighbours
    pub async fn get_image(
        pool: &DbPool,
        user: Option<&User>,
        id: Uuid,
    ) -> Result<ImageDetailResponse, GalleryError> {
        let image = ImageRepository::get_by_id(pool, id).await?;
        let album = AlbumRepository::get_by_id(pool, image.album_id).await?;
        access::ensure_album_visible(user, &album)?;

        let (previous, next) = ImageRepository::neighbours(pool, &image).await?;
        Ok(ImageDetailResponse {
            image: image.to_response(),
            album: album.to_response(),
            previous: previous.map(image_url),
            next: next.map(image_url),
        })
    }

    /// Raw payload and its content type
    pub async fn image_file(
        pool: &DbPool,
        media: &MediaStore,
        user: Option<&User>,
        id: Uuid,
    ) -> Result<(Vec<u8>, String), GalleryError> {
        let image = ImageRepository::get_by_id(pool, id).await?;
        let album = AlbumRepository::get_by_id(pool, image.album_id).await?;
        access::ensure_album_visible(user, &album)?;

        let bytes = media.read(&image.file_path).await?;
        let content_type = image
            .content_type
            .unwrap_or_else(|| "application/octet-stream".to_string());
        Ok((bytes, content_type))
    }

    /// Pre-filled edit form
    pub async fn edit_form(
        pool: &DbPool,
        places: &PlaceHandle,
        user: &User,
        id: Uuid,
    ) -> Result<ImageFormResponse, GalleryError> {
        let image = ImageRepository::get_by_id(pool, id).await?;
        access::ensure_image_editable(user, &image)?;

        let place_name = match (places, image.place_id) {
            (Some(directory), Some(place_id)) => directory.get(place_id).await.ok().map(|p| p.name),
            _ => None,
        };
        // updates only accept the uploader's albums, so offer those
        let albums = Self::album_choices(pool, image.user_id, user).await?;
        Ok(ImageFormResponse::for_image(
            &image,
            place_name,
            albums,
            places.is_some(),
        ))
    }

    /// Apply the submitted fields; omitted fields keep their stored value
    pub async fn update_image(
        pool: &DbPool,
        media: &MediaStore,
        places: &PlaceHandle,
        user: &User,
        id: Uuid,
        form: ImageForm,
    ) -> Result<ImageResponse, GalleryError> {
        let mut image = ImageRepository::get_by_id(pool, id).await?;
        access::ensure_image_editable(user, &image)?;

        if let Some(title) = &form.title {
            image.title = title.trim().to_string();
        }
        if form.description.is_some() {
            image.description = non_blank(form.description.clone());
        }
        if let Some(album_id) = form.album {
            if album_id != image.album_id {
                // images stay within the uploader's albums, even when a superuser edits
                Self::require_owned_album(pool, image.user_id, album_id).await?;
                image.album_id = album_id;
            }
        }
        if places.is_some() {
            if let Some(text) = form.place_text.as_deref() {
                image.place_id = PlaceService::resolve_text(places, Some(text))
                    .await?
                    .map(|p| p.id);
            }
        }
        let tags = match form.tags.as_deref() {
            Some(raw) => Some(parse_tags(raw)?),
            None => None,
        };

        let mut replaced_file = None;
        if let Some(file) = &form.image {
            let inspected = inspect_image(file)?;
            let new_path = media.save(file).await?;
            replaced_file = Some(std::mem::replace(&mut image.file_path, new_path));
            image.content_type = inspected.content_type;
            image.width = inspected.width;
            image.height = inspected.height;
        }

        let saved = async {
            let mut tx = pool.begin().await.map_err(db_error("begin transaction"))?;
            ImageRepository::update_image(&mut *tx, &image).await?;
            if let Some(tags) = &tags {
                TagRepository::set_tags(&mut *tx, image.id, tags).await?;
            }
            tx.commit().await.map_err(db_error("commit transaction"))?;
            Ok::<(), GalleryError>(())
        }
        .await;

        match (saved, replaced_file) {
            (Ok(()), Some(old_path)) => media.remove_all(&[old_path]).await,
            (Err(e), Some(_)) => {
                media.remove_all(&[image.file_path.clone()]).await;
                return Err(e);
            }
            (Err(e), None) => return Err(e),
            (Ok(()), None) => {}
        }

        Ok(ImageRepository::get_by_id(pool, image.id).await?.to_response())
    }

    /// Remove image row, tag links and stored payload
    pub async fn delete_image(
        pool: &DbPool,
        media: &MediaStore,
        user: &User,
        id: Uuid,
    ) -> Result<(), GalleryError> {
        let image = ImageRepository::get_by_id(pool, id).await?;
        access::ensure_image_editable(user, &image)?;

        ImageRepository::delete_image(pool, image.id).await?;
        media.remove_all(&[image.file_path]).await;
        log::info!("User {} deleted image {}", user.username, id);
        Ok(())
    }

    /// Visible images carrying exactly `tag`
    pub async fn list_by_tag(
        pool: &DbPool,
        user: Option<&User>,
        tag: &str,
    ) -> Result<TagListResponse, GalleryError> {
        let images = ImageRepository::list_by_tag(pool, tag, &Viewer::of(user)).await?;
        Ok(TagListResponse {
            tag: tag.to_string(),
            count: images.len(),
            image_list: images.iter().map(Image::to_response).collect(),
        })
    }
}
