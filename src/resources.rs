/*!
 * Resource handles for generated content.
 *
 * Caption tracks, exported files and attached videos are handed to the player
 * as opaque handles, the way a browser hands out object URLs. Handles are not
 * reference counted: whoever replaces a handle must release the old one.
 */

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use log::{debug, trace};
use uuid::Uuid;

/// Opaque reference to a registered resource
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceHandle(String);

impl ResourceHandle {
    /// URL form of the handle, e.g. `blob:subedit/<uuid>`
    pub fn url(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Payload behind a handle
#[derive(Debug, Clone, PartialEq)]
pub enum BlobBody {
    /// Generated text such as a caption track or export
    Text(String),
    /// A user-selected file referenced in place
    File(PathBuf),
}

/// A registered resource
#[derive(Debug, Clone, PartialEq)]
pub struct Blob {
    pub mime: String,
    pub body: BlobBody,
}

impl Blob {
    /// Text payload, if this blob holds generated text
    pub fn text(&self) -> Option<&str> {
        match &self.body {
            BlobBody::Text(text) => Some(text),
            BlobBody::File(_) => None,
        }
    }
}

/// Storage that hands out and takes back resource handles
pub trait ResourceStore {
    /// Register a payload and return a fresh handle for it
    fn create(&mut self, body: BlobBody, mime: &str) -> ResourceHandle;

    /// Release a handle. Returns false if it was unknown or already released.
    fn release(&mut self, handle: &ResourceHandle) -> bool;

    /// Look up the payload behind a live handle
    fn resolve(&self, handle: &ResourceHandle) -> Option<&Blob>;

    /// Number of handles not yet released
    fn live_count(&self) -> usize;
}

/// In-memory resource store issuing `blob:` URLs
#[derive(Debug)]
pub struct BlobRegistry {
    origin: String,
    blobs: HashMap<String, Blob>,
}

impl BlobRegistry {
    pub fn new(origin: impl Into<String>) -> Self {
        BlobRegistry {
            origin: origin.into(),
            blobs: HashMap::new(),
        }
    }
}

impl Default for BlobRegistry {
    fn default() -> Self {
        Self::new("subedit")
    }
}

impl ResourceStore for BlobRegistry {
    fn create(&mut self, body: BlobBody, mime: &str) -> ResourceHandle {
        let url = format!("blob:{}/{}", self.origin, Uuid::new_v4());
        trace!("Registered {} ({})", url, mime);
        self.blobs.insert(
            url.clone(),
            Blob {
                mime: mime.to_string(),
                body,
            },
        );
        ResourceHandle(url)
    }

    fn release(&mut self, handle: &ResourceHandle) -> bool {
        let released = self.blobs.remove(handle.url()).is_some();
        if !released {
            debug!("Release of unknown handle {}", handle);
        }
        released
    }

    fn resolve(&self, handle: &ResourceHandle) -> Option<&Blob> {
        self.blobs.get(handle.url())
    }

    fn live_count(&self) -> usize {
        self.blobs.len()
    }
}
