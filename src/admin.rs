//! Admin editor state.
//!
//! An [`AdminSession`] holds the photo list as last loaded, the add/edit
//! form, and the status message shown after each action. It drives any
//! [`PhotoApi`]: the server's admin pages run it against the store directly,
//! the CLI runs it against a remote server.
//!
//! Saving is a whole-collection replace, exactly as the gallery API works:
//! the session builds the updated list, sends it, and only adopts it locally
//! once the save succeeded. A failed save keeps the form (caption, image,
//! editing id) so the user can retry.
//!
//! A session only writes after its photo list loaded successfully. Saving
//! from an empty list that merely stands in for a failed fetch would replace
//! the stored collection with the new photo alone.

use crate::client::{ClientError, PhotoApi};
use crate::config::PlacementConfig;
use crate::imaging::{BackendError, CompressionConfig, ImageBackend, compress_image};
use crate::types::{Placement, PhotoRecord};
use rand::Rng;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdminError {
    #[error("Please choose an image first")]
    MissingImage,
    #[error("Photo not found: {0}")]
    NotFound(String),
    #[error("Photo list has not been loaded")]
    NotLoaded,
    #[error("Image error: {0}")]
    Image(#[from] BackendError),
    #[error("API error: {0}")]
    Api(#[from] ClientError),
}

/// The add/edit form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminForm {
    pub caption: String,
    /// Compressed image as a JPEG data URI.
    pub image: Option<String>,
    /// Set while editing an existing photo.
    pub editing_id: Option<String>,
}

impl AdminForm {
    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

impl Status {
    pub fn text(&self) -> &str {
        match self {
            Status::Info(s) | Status::Error(s) => s,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Status::Error(_))
    }
}

/// Random placement for a new photo.
///
/// Each component is `(r - 0.5) * spread` with `r` uniform in `[0, 1)`.
/// Z rotation is always 0.
pub fn random_placement<R: Rng>(rng: &mut R, config: &PlacementConfig) -> Placement {
    let mut centred = |spread: f64| (rng.r#gen::<f64>() - 0.5) * spread;
    let [px, py, pz] = config.position_spread;
    let [rx, ry] = config.rotation_spread;
    let position = [centred(px), centred(py), centred(pz)];
    let rotation = [centred(rx), centred(ry), 0.0];
    Placement { position, rotation }
}

/// Timestamp id in milliseconds, bumped past any id already in use.
pub fn new_photo_id(existing: &[PhotoRecord], now_millis: i64) -> String {
    let mut candidate = now_millis;
    loop {
        let id = candidate.to_string();
        if !existing.iter().any(|p| p.id == id) {
            return id;
        }
        candidate += 1;
    }
}

pub struct AdminSession<A> {
    api: A,
    photos: Vec<PhotoRecord>,
    loaded: bool,
    form: AdminForm,
    status: Option<Status>,
    placement: PlacementConfig,
    compression: CompressionConfig,
}

impl<A: PhotoApi> AdminSession<A> {
    pub fn new(api: A, placement: PlacementConfig, compression: CompressionConfig) -> Self {
        Self {
            api,
            photos: Vec::new(),
            loaded: false,
            form: AdminForm::default(),
            status: None,
            placement,
            compression,
        }
    }

    /// Refresh the photo list.
    ///
    /// On failure the previous list is kept, an error status is set, and
    /// writes are refused until a later load succeeds.
    pub fn load(&mut self) -> Result<(), AdminError> {
        match self.api.fetch_photos() {
            Ok(photos) => {
                self.photos = photos;
                self.loaded = true;
                Ok(())
            }
            Err(e) => {
                log::error!("Error loading photos: {e}");
                self.loaded = false;
                self.status = Some(Status::Error(
                    "Could not load photos. Reload the page and try again.".into(),
                ));
                Err(e.into())
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn require_loaded(&mut self) -> Result<(), AdminError> {
        if self.loaded {
            return Ok(());
        }
        self.status = Some(Status::Error(
            "Could not load photos. Reload the page and try again.".into(),
        ));
        Err(AdminError::NotLoaded)
    }

    pub fn photos(&self) -> &[PhotoRecord] {
        &self.photos
    }

    pub fn form(&self) -> &AdminForm {
        &self.form
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn set_caption(&mut self, caption: impl Into<String>) {
        self.form.caption = caption.into();
    }

    /// Compress an uploaded image into the form.
    pub fn select_image(
        &mut self,
        backend: &impl ImageBackend,
        bytes: &[u8],
    ) -> Result<(), AdminError> {
        match compress_image(backend, bytes, &self.compression) {
            Ok(uri) => {
                self.form.image = Some(uri);
                Ok(())
            }
            Err(e) => {
                log::error!("Error compressing image: {e}");
                self.status = Some(Status::Error(
                    "Could not compress the image. Please try again.".into(),
                ));
                Err(e.into())
            }
        }
    }

    /// Fill the form from an existing photo.
    pub fn edit(&mut self, id: &str) -> Result<(), AdminError> {
        let Some(photo) = self.photos.iter().find(|p| p.id == id) else {
            self.status = Some(Status::Error(format!("Photo {id} no longer exists.")));
            return Err(AdminError::NotFound(id.to_string()));
        };
        self.form = AdminForm {
            caption: photo.caption.clone(),
            image: Some(photo.image.clone()),
            editing_id: Some(photo.id.clone()),
        };
        Ok(())
    }

    pub fn cancel(&mut self) {
        self.form = AdminForm::default();
    }

    /// Save the form, timestamping new photos with the current time.
    pub fn save<R: Rng>(&mut self, rng: &mut R) -> Result<String, AdminError> {
        let now = chrono::Utc::now().timestamp_millis();
        self.save_at(rng, now)
    }

    /// Save the form as a new photo or as an edit of `editing_id`.
    ///
    /// New photos get a fresh id and a random placement. Edits keep the
    /// existing id, position and rotation. Returns the saved photo's id.
    pub fn save_at<R: Rng>(
        &mut self,
        rng: &mut R,
        now_millis: i64,
    ) -> Result<String, AdminError> {
        self.require_loaded()?;
        let Some(image) = self.form.image.clone() else {
            self.status = Some(Status::Error("Please choose an image first.".into()));
            return Err(AdminError::MissingImage);
        };

        let (updated, id) = match &self.form.editing_id {
            Some(id) => {
                let Some(existing) = self.photos.iter().find(|p| &p.id == id) else {
                    self.status = Some(Status::Error(format!("Photo {id} no longer exists.")));
                    return Err(AdminError::NotFound(id.clone()));
                };
                let placement = existing.placement();
                let record = PhotoRecord {
                    id: id.clone(),
                    image,
                    caption: self.form.caption.clone(),
                    position: placement.position,
                    rotation: placement.rotation,
                };
                let updated = self
                    .photos
                    .iter()
                    .map(|p| if &p.id == id { record.clone() } else { p.clone() })
                    .collect::<Vec<_>>();
                (updated, id.clone())
            }
            None => {
                let id = new_photo_id(&self.photos, now_millis);
                let placement = random_placement(rng, &self.placement);
                let mut updated = self.photos.clone();
                updated.push(PhotoRecord {
                    id: id.clone(),
                    image,
                    caption: self.form.caption.clone(),
                    position: placement.position,
                    rotation: placement.rotation,
                });
                (updated, id)
            }
        };

        if let Err(e) = self.api.save_photos(&updated) {
            log::error!("Error saving photo: {e}");
            self.status = Some(Status::Error(
                "Could not save the photo. Try again or use a smaller image.".into(),
            ));
            return Err(e.into());
        }

        self.photos = updated;
        self.form = AdminForm::default();
        self.status = Some(Status::Info("Photo saved.".into()));
        Ok(id)
    }

    /// Delete one photo by id.
    pub fn delete(&mut self, id: &str) -> Result<(), AdminError> {
        self.require_loaded()?;
        if let Err(e) = self.api.delete_photo(id) {
            log::error!("Error deleting photo {id}: {e}");
            self.status = Some(Status::Error("Could not delete the photo.".into()));
            return Err(e.into());
        }
        self.photos.retain(|p| p.id != id);
        if self.form.editing_id.as_deref() == Some(id) {
            self.form = AdminForm::default();
        }
        self.status = Some(Status::Info("Photo deleted.".into()));
        Ok(())
    }
}
