//! Exhibition service
//!
//! Manages the exhibition catalogue. Renaming or deleting an exhibition also
//! updates the tours that visit it, in the same commit.

use chrono::{NaiveDate, Utc};

use crate::audit::AuditContext;
use crate::error::{GalleryError, GalleryResult};
use crate::models::{Exhibition, Tour};
use crate::storage::{Storage, UnitOfWork};

/// Catalogue fields of an exhibition
#[derive(Debug, Clone, Default)]
pub struct ExhibitionDetails {
    pub title: String,
    pub exhibition_type: Option<String>,
    pub period: Option<String>,
    pub artists: Option<String>,
    pub description: Option<String>,
    pub image_path: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Fields to change on an existing exhibition; `None` leaves a field as is
#[derive(Debug, Clone, Default)]
pub struct ExhibitionUpdate {
    pub title: Option<String>,
    pub exhibition_type: Option<String>,
    pub period: Option<String>,
    pub artists: Option<String>,
    pub description: Option<String>,
    pub image_path: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Service for exhibition management
pub struct ExhibitionService<'a> {
    storage: &'a Storage,
    ctx: &'a AuditContext,
}

impl<'a> ExhibitionService<'a> {
    /// Create a new exhibition service
    pub fn new(storage: &'a Storage, ctx: &'a AuditContext) -> Self {
        Self { storage, ctx }
    }

    /// Add an exhibition to the catalogue
    pub fn create(&self, details: ExhibitionDetails) -> GalleryResult<Exhibition> {
        let mut exhibition = Exhibition::new(details.title.trim());
        exhibition.exhibition_type = details.exhibition_type;
        exhibition.period = details.period;
        exhibition.artists = details.artists;
        exhibition.description = details.description;
        exhibition.image_path = details.image_path;
        exhibition.start_date = details.start_date;
        exhibition.end_date = details.end_date;

        exhibition
            .validate()
            .map_err(|e| GalleryError::Validation(e.to_string()))?;

        let mut uow = UnitOfWork::new();
        uow.insert(exhibition);
        self.storage
            .commit(uow, self.ctx)?
            .first_inserted::<Exhibition>()
            .ok_or_else(|| GalleryError::Storage("Exhibition was not written".into()))
    }

    /// Get an exhibition by id
    pub fn get(&self, id: i64) -> GalleryResult<Option<Exhibition>> {
        self.storage.get::<Exhibition>(id)
    }

    /// Get an exhibition by id, failing if it doesn't exist
    pub fn require(&self, id: i64) -> GalleryResult<Exhibition> {
        self.get(id)?
            .ok_or_else(|| GalleryError::exhibition_not_found(id.to_string()))
    }

    /// List exhibitions by start date, then title
    pub fn list(&self, active_only: bool) -> GalleryResult<Vec<Exhibition>> {
        let mut exhibitions = self
            .storage
            .find::<Exhibition, _>(|e| !active_only || e.is_active)?;
        exhibitions.sort_by(|a, b| {
            a.start_date
                .cmp(&b.start_date)
                .then_with(|| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
        });
        Ok(exhibitions)
    }

    /// Exhibitions open to visitors on a given day
    pub fn running_on(&self, day: NaiveDate) -> GalleryResult<Vec<Exhibition>> {
        Ok(self
            .list(true)?
            .into_iter()
            .filter(|e| e.runs_on(day))
            .collect())
    }

    /// Update catalogue fields
    pub fn update(&self, id: i64, changes: ExhibitionUpdate) -> GalleryResult<Exhibition> {
        let mut exhibition = self.require(id)?;
        let old_title = exhibition.title.clone();

        if let Some(title) = changes.title {
            exhibition.title = title.trim().to_string();
        }
        if let Some(kind) = changes.exhibition_type {
            exhibition.exhibition_type = Some(kind);
        }
        if let Some(period) = changes.period {
            exhibition.period = Some(period);
        }
        if let Some(artists) = changes.artists {
            exhibition.artists = Some(artists);
        }
        if let Some(description) = changes.description {
            exhibition.description = Some(description);
        }
        if let Some(image_path) = changes.image_path {
            exhibition.image_path = Some(image_path);
        }
        if let Some(start) = changes.start_date {
            exhibition.start_date = Some(start);
        }
        if let Some(end) = changes.end_date {
            exhibition.end_date = Some(end);
        }

        exhibition
            .validate()
            .map_err(|e| GalleryError::Validation(e.to_string()))?;
        exhibition.updated_at = Utc::now();

        let mut uow = UnitOfWork::new();
        if exhibition.title != old_title {
            for mut tour in self.visiting_tours(id)? {
                tour.exhibition = exhibition.as_ref_link();
                tour.touch();
                uow.update(tour);
            }
        }
        uow.update(exhibition.clone());
        self.storage.commit(uow, self.ctx)?;

        Ok(exhibition)
    }

    /// Open or close an exhibition for bookings
    pub fn set_active(&self, id: i64, active: bool) -> GalleryResult<Exhibition> {
        let mut exhibition = self.require(id)?;
        if exhibition.is_active == active {
            return Ok(exhibition);
        }
        exhibition.set_active(active);

        let mut uow = UnitOfWork::new();
        uow.update(exhibition.clone());
        self.storage.commit(uow, self.ctx)?;

        Ok(exhibition)
    }

    /// Delete an exhibition, unlinking the tours that visit it
    pub fn delete(&self, id: i64) -> GalleryResult<Exhibition> {
        let exhibition = self.require(id)?;

        let mut uow = UnitOfWork::new();
        for mut tour in self.visiting_tours(id)? {
            tour.exhibition = None;
            tour.touch();
            uow.update(tour);
        }
        uow.delete(exhibition.clone());
        self.storage.commit(uow, self.ctx)?;

        Ok(exhibition)
    }

    fn visiting_tours(&self, id: i64) -> GalleryResult<Vec<Tour>> {
        self.storage
            .find::<Tour, _>(|t| t.exhibition.as_ref().map_or(false, |e| e.id == id))
    }
}
