use crate::error::ImageError;

/// Aspect ratio (width / height) shown until an image resolves.
pub const PLACEHOLDER_ASPECT: f32 = 0.8;

/// One displayable catalog entry, supplied by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayItem {
    /// Stable identity.
    pub id: String,
    /// Image locator (URL or path); resolved out of band by the host.
    pub image: String,
    pub title: Option<String>,
    pub year: Option<u16>,
    pub medium: Option<String>,
}

impl DisplayItem {
    pub fn new(id: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            image: image.into(),
            title: None,
            year: None,
            medium: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_year(mut self, year: u16) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_medium(mut self, medium: impl Into<String>) -> Self {
        self.medium = Some(medium.into());
        self
    }
}

/// Decoded image dimensions delivered by the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImageState {
    Pending,
    Ready { aspect: f32 },
    /// Stays on the placeholder for the rest of the session.
    Failed,
}

/// An item plus the resolution state of its image.
#[derive(Debug, Clone)]
pub struct Content {
    pub item: DisplayItem,
    pub image: ImageState,
}

impl Content {
    pub fn new(item: DisplayItem) -> Self {
        Self {
            item,
            image: ImageState::Pending,
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        match self.image {
            ImageState::Ready { aspect } => aspect,
            ImageState::Pending | ImageState::Failed => PLACEHOLDER_ASPECT,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        !matches!(self.image, ImageState::Ready { .. })
    }

    /// Apply a loader result. A failure after a success keeps the image.
    pub fn resolve(&mut self, result: Result<ImageInfo, ImageError>) {
        let outcome = result.and_then(|info| {
            if info.width == 0 || info.height == 0 {
                Err(ImageError::EmptyImage(self.item.image.clone()))
            } else {
                Ok(info.width as f32 / info.height as f32)
            }
        });

        match outcome {
            Ok(aspect) => {
                log::debug!("image for {} ready, aspect {:.3}", self.item.id, aspect);
                self.image = ImageState::Ready { aspect };
            }
            Err(e) => {
                log::warn!("image for {} unavailable: {e}", self.item.id);
                if self.image == ImageState::Pending {
                    self.image = ImageState::Failed;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_until_resolved() {
        let mut c = Content::new(DisplayItem::new("a", "a.jpg"));
        assert!(c.is_placeholder());
        assert_eq!(c.aspect_ratio(), PLACEHOLDER_ASPECT);

        c.resolve(Ok(ImageInfo { width: 1600, height: 900 }));
        assert!(!c.is_placeholder());
        assert!((c.aspect_ratio() - 16.0 / 9.0).abs() < 1e-5);
    }

    #[test]
    fn failures_keep_placeholder() {
        let mut c = Content::new(DisplayItem::new("b", "b.jpg"));
        c.resolve(Err(ImageError::NotFound("b.jpg".into())));
        assert_eq!(c.image, ImageState::Failed);
        assert_eq!(c.aspect_ratio(), PLACEHOLDER_ASPECT);

        let mut empty = Content::new(DisplayItem::new("c", "c.jpg"));
        empty.resolve(Ok(ImageInfo { width: 0, height: 10 }));
        assert_eq!(empty.image, ImageState::Failed);
    }
}
