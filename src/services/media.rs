use crate::config::media::MediaConfig;
use crate::error::{AppError, AppResult};
use std::str::FromStr;
use tokio::fs;
use uuid::Uuid;

pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024; // 5 MB

/// Upload directories, one per kind of stored image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaCategory {
    Article,
    RestaurantImage,
    RestaurantMenu,
    ReviewImages,
    ReviewProfile,
}

impl MediaCategory {
    pub const ALL: [MediaCategory; 5] = [
        MediaCategory::Article,
        MediaCategory::RestaurantImage,
        MediaCategory::RestaurantMenu,
        MediaCategory::ReviewImages,
        MediaCategory::ReviewProfile,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MediaCategory::Article => "article",
            MediaCategory::RestaurantImage => "restaurant_image",
            MediaCategory::RestaurantMenu => "restaurant_menu",
            MediaCategory::ReviewImages => "review_images",
            MediaCategory::ReviewProfile => "review_profile",
        }
    }
}

impl FromStr for MediaCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MediaCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or(AppError::NotFound)
    }
}

/// Extension for a supported image type, checked against the file's
/// leading bytes.
fn image_extension(data: &[u8], content_type: &str) -> Option<&'static str> {
    let (ext, matches) = match content_type {
        "image/jpeg" => ("jpg", data.starts_with(&[0xFF, 0xD8, 0xFF])),
        "image/png" => ("png", data.starts_with(&[0x89, 0x50, 0x4E, 0x47])),
        "image/gif" => ("gif", data.starts_with(b"GIF8")),
        "image/webp" => (
            "webp",
            data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP",
        ),
        _ => return None,
    };
    matches.then_some(ext)
}

pub struct MediaService;

impl MediaService {
    /// Store an uploaded image under `<root>/<category>/<uuid>.<ext>` and
    /// return the relative path that records persist.
    pub async fn store(
        config: &MediaConfig,
        category: MediaCategory,
        data: &[u8],
        content_type: &str,
    ) -> AppResult<String> {
        if data.len() > MAX_FILE_SIZE {
            return Err(AppError::PayloadTooLarge);
        }

        let ext = image_extension(data, content_type).ok_or_else(|| {
            AppError::Validation(format!(
                "Unsupported or mismatched file type '{}'. Allowed: jpeg, png, gif, webp",
                content_type
            ))
        })?;

        let relative = format!("{}/{}.{}", category.as_str(), Uuid::new_v4(), ext);
        let dir = config.root.join(category.as_str());

        fs::create_dir_all(&dir).await.map_err(|e| {
            AppError::Internal(anyhow::anyhow!(
                "Failed to create media directory {}: {}",
                dir.display(),
                e
            ))
        })?;
        fs::write(config.root.join(&relative), data)
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to write {}: {}", relative, e)))?;

        tracing::debug!("Stored {} bytes as {}", data.len(), relative);
        Ok(relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn category_names_round_trip() {
        for category in MediaCategory::ALL {
            assert_eq!(category.as_str().parse::<MediaCategory>().unwrap(), category);
        }
        assert!("avatars".parse::<MediaCategory>().is_err());
    }

    #[test]
    fn jpeg_detected() {
        assert_eq!(image_extension(&[0xFF, 0xD8, 0xFF, 0xE0], "image/jpeg"), Some("jpg"));
    }

    #[test]
    fn webp_detected() {
        let data = *b"RIFF\0\0\0\0WEBPVP8 ";
        assert_eq!(image_extension(&data, "image/webp"), Some("webp"));
    }

    #[test]
    fn mismatched_type_rejected() {
        assert_eq!(image_extension(&PNG, "image/jpeg"), None);
        assert_eq!(image_extension(&[], "image/png"), None);
        assert_eq!(image_extension(&PNG, "application/pdf"), None);
    }

    #[tokio::test]
    async fn store_writes_under_category() {
        let root = std::env::temp_dir().join(format!("media-test-{}", Uuid::new_v4()));
        let config = MediaConfig::new(&root, "/media");

        let path = MediaService::store(&config, MediaCategory::ReviewProfile, &PNG, "image/png")
            .await
            .unwrap();
        assert!(path.starts_with("review_profile/"));
        assert!(path.ends_with(".png"));
        assert_eq!(std::fs::read(root.join(&path)).unwrap(), PNG);

        let _ = std::fs::remove_dir_all(&root);
    }

    #[tokio::test]
    async fn oversized_upload_rejected() {
        let config = MediaConfig::new(std::env::temp_dir(), "/media");
        let data = vec![0u8; MAX_FILE_SIZE + 1];
        let err = MediaService::store(&config, MediaCategory::Article, &data, "image/png")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::PayloadTooLarge));
    }
}
