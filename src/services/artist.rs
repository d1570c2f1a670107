//! Artist service

use crate::audit::AuditContext;
use crate::error::{GalleryError, GalleryResult};
use crate::models::Artist;
use crate::storage::{Storage, UnitOfWork};

/// Profile fields of an artist
#[derive(Debug, Clone, Default)]
pub struct ArtistDetails {
    pub name: String,
    pub bio: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub image_path: Option<String>,
}

/// Fields to change on an existing artist; `None` leaves a field as is
#[derive(Debug, Clone, Default)]
pub struct ArtistUpdate {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub image_path: Option<String>,
    pub is_active: Option<bool>,
}

/// Service for artist management
pub struct ArtistService<'a> {
    storage: &'a Storage,
    ctx: &'a AuditContext,
}

impl<'a> ArtistService<'a> {
    /// Create a new artist service
    pub fn new(storage: &'a Storage, ctx: &'a AuditContext) -> Self {
        Self { storage, ctx }
    }

    /// Add an artist
    pub fn create(&self, details: ArtistDetails) -> GalleryResult<Artist> {
        let mut artist = Artist::new(details.name.trim());
        artist.bio = details.bio;
        artist.email = details.email;
        artist.website = details.website;
        artist.image_path = details.image_path;

        artist
            .validate()
            .map_err(|e| GalleryError::Validation(e.to_string()))?;

        let mut uow = UnitOfWork::new();
        uow.insert(artist);
        self.storage
            .commit(uow, self.ctx)?
            .first_inserted::<Artist>()
            .ok_or_else(|| GalleryError::Storage("Artist was not written".into()))
    }

    /// Get an artist by id, failing if it doesn't exist
    pub fn require(&self, id: i64) -> GalleryResult<Artist> {
        self.storage
            .get::<Artist>(id)?
            .ok_or_else(|| GalleryError::artist_not_found(id.to_string()))
    }

    /// List artists by name (case-insensitive)
    pub fn list(&self, include_inactive: bool) -> GalleryResult<Vec<Artist>> {
        let mut artists = self
            .storage
            .find::<Artist, _>(|a| include_inactive || a.is_active)?;
        artists.sort_by_key(|a| a.name.to_lowercase());
        Ok(artists)
    }

    /// Update profile fields
    pub fn update(&self, id: i64, changes: ArtistUpdate) -> GalleryResult<Artist> {
        let mut artist = self.require(id)?;

        if let Some(name) = changes.name {
            artist.name = name.trim().to_string();
        }
        if let Some(bio) = changes.bio {
            artist.bio = Some(bio);
        }
        if let Some(email) = changes.email {
            artist.email = Some(email);
        }
        if let Some(website) = changes.website {
            artist.website = Some(website);
        }
        if let Some(image_path) = changes.image_path {
            artist.image_path = Some(image_path);
        }
        if let Some(active) = changes.is_active {
            artist.is_active = active;
        }

        artist
            .validate()
            .map_err(|e| GalleryError::Validation(e.to_string()))?;

        let mut uow = UnitOfWork::new();
        uow.update(artist.clone());
        self.storage.commit(uow, self.ctx)?;

        Ok(artist)
    }

    /// Delete an artist
    pub fn delete(&self, id: i64) -> GalleryResult<Artist> {
        let artist = self.require(id)?;

        let mut uow = UnitOfWork::new();
        uow.delete(artist.clone());
        self.storage.commit(uow, self.ctx)?;

        Ok(artist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{ActivityLog, ActivityLogSubscriber};
    use crate::config::paths::GalleryPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = GalleryPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::open(paths).unwrap();
        storage.register_listener(ActivityLogSubscriber::default());
        (temp_dir, storage)
    }

    fn named(name: &str) -> ArtistDetails {
        ArtistDetails {
            name: name.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_artist() {
        let (_temp_dir, storage) = create_test_storage();
        let ctx = AuditContext::empty();
        let service = ArtistService::new(&storage, &ctx);

        let artist = service.create(named("  Berthe Morisot ")).unwrap();
        assert_eq!(artist.name, "Berthe Morisot");
        assert!(artist.is_active);

        let logs = storage.all::<ActivityLog>().unwrap();
        assert_eq!(logs[0].target_data(), Some("Artist: Berthe Morisot"));
    }

    #[test]
    fn test_empty_name_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let ctx = AuditContext::empty();
        let service = ArtistService::new(&storage, &ctx);

        assert!(service.create(named("   ")).unwrap_err().is_validation());
    }

    #[test]
    fn test_update_long_bio_truncated_in_log() {
        let (_temp_dir, storage) = create_test_storage();
        let ctx = AuditContext::empty();
        let service = ArtistService::new(&storage, &ctx);

        service.create(named("Mary Cassatt")).unwrap();
        service
            .update(
                1,
                ArtistUpdate {
                    bio: Some("x".repeat(300)),
                    ..Default::default()
                },
            )
            .unwrap();

        let logs = storage.all::<ActivityLog>().unwrap();
        let target = logs[1].target_data().unwrap();
        let expected = format!(
            "Artist: Mary Cassatt | Changes: bio: null → {}...",
            "x".repeat(117)
        );
        assert_eq!(target, expected);
    }

    #[test]
    fn test_list_sorted_and_filtered() {
        let (_temp_dir, storage) = create_test_storage();
        let ctx = AuditContext::empty();
        let service = ArtistService::new(&storage, &ctx);

        service.create(named("Mary Cassatt")).unwrap();
        service.create(named("berthe Morisot")).unwrap();
        service
            .update(
                1,
                ArtistUpdate {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .unwrap();

        let all = service.list(true).unwrap();
        assert_eq!(all[0].name, "berthe Morisot");
        assert_eq!(service.list(false).unwrap().len(), 1);
    }

    #[test]
    fn test_delete_artist() {
        let (_temp_dir, storage) = create_test_storage();
        let ctx = AuditContext::empty();
        let service = ArtistService::new(&storage, &ctx);

        service.create(named("Mary Cassatt")).unwrap();
        service.delete(1).unwrap();
        assert!(service.require(1).unwrap_err().is_not_found());
    }
}
