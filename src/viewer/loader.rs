//! Background image decode for photo planes.
//!
//! Each record's image is identified on the rayon pool. Results come back
//! over a channel in completion order and are drained on the viewer's thread
//! with [`SceneLoader::drain`], so the scene is only ever touched from one
//! thread. There is no cancellation: a decode that finishes after the viewer
//! is disposed still sends, and the viewer discards the result.

use super::scene::{PhotoPlane, SceneLayout};
use crate::imaging::{BackendError, ImageBackend, aspect_ratio, data_uri_dimensions};
use crate::types::PhotoRecord;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, channel};

/// Outcome of decoding one record.
#[derive(Debug)]
pub struct LoadedPlane {
    pub index: usize,
    pub photo_id: String,
    pub result: Result<PhotoPlane, BackendError>,
}

/// Build the plane for one record by reading its image dimensions.
pub fn build_plane(
    backend: &impl ImageBackend,
    record: &PhotoRecord,
    index: usize,
    layout: &SceneLayout,
) -> Result<PhotoPlane, BackendError> {
    let dims = data_uri_dimensions(backend, &record.image)?;
    let aspect = aspect_ratio(dims).ok_or_else(|| {
        BackendError::ProcessingFailed(format!("image has zero height ({}x{})", dims.0, dims.1))
    })?;
    Ok(layout.plane_for(record, index, aspect))
}

pub struct SceneLoader<B> {
    backend: Arc<B>,
    layout: Arc<SceneLayout>,
    sender: Sender<LoadedPlane>,
    receiver: Receiver<LoadedPlane>,
    pending: usize,
}

impl<B: ImageBackend + Send + 'static> SceneLoader<B> {
    pub fn new(backend: B, layout: SceneLayout) -> Self {
        let (sender, receiver) = channel();
        Self {
            backend: Arc::new(backend),
            layout: Arc::new(layout),
            sender,
            receiver,
            pending: 0,
        }
    }

    /// Queue a decode for every record. Indices follow list order.
    pub fn spawn_all(&mut self, records: &[PhotoRecord]) {
        for (index, record) in records.iter().enumerate() {
            self.spawn(index, record.clone());
        }
    }

    pub fn spawn(&mut self, index: usize, record: PhotoRecord) {
        let backend = Arc::clone(&self.backend);
        let layout = Arc::clone(&self.layout);
        let sender = self.sender.clone();
        self.pending += 1;
        rayon::spawn(move || {
            let result = build_plane(backend.as_ref(), &record, index, &layout);
            // The receiver is gone once the loader is dropped; nothing to deliver to.
            let _ = sender.send(LoadedPlane {
                index,
                photo_id: record.id,
                result,
            });
        });
    }

    /// Collect every result that has arrived so far without blocking.
    pub fn drain(&mut self) -> Vec<LoadedPlane> {
        let loaded: Vec<LoadedPlane> = self.receiver.try_iter().collect();
        self.pending = self.pending.saturating_sub(loaded.len());
        loaded
    }

    /// Block until `count` more results arrive.
    pub fn wait_for(&mut self, count: usize) -> Vec<LoadedPlane> {
        let mut loaded = Vec::with_capacity(count);
        for _ in 0..count {
            match self.receiver.recv() {
                Ok(item) => loaded.push(item),
                Err(_) => break,
            }
        }
        self.pending = self.pending.saturating_sub(loaded.len());
        loaded
    }

    /// Decodes queued but not yet drained.
    pub fn pending(&self) -> usize {
        self.pending
    }

    pub fn layout(&self) -> &SceneLayout {
        &self.layout
    }
}
