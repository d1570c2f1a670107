//! Tour service
//!
//! Booking, editing and reviewing guided tours. Every change commits through
//! a unit of work, which the activity log subscriber records field by field.
//! Staff actions (book, edit, status, delete) additionally write a short
//! explicit row naming the tour. Visitors editing their own bookings do not.

use chrono::NaiveDateTime;

use crate::audit::{AuditAction, AuditContext, AuditWriter, Persist};
use crate::error::{GalleryError, GalleryResult};
use crate::models::{Exhibition, ExhibitionRef, Tour, TourStatus, User};
use crate::storage::{Storage, UnitOfWork};

/// Input for a new booking
#[derive(Debug, Clone)]
pub struct TourBooking {
    pub name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub number_of_guests: u32,
    pub date: NaiveDateTime,
    pub notes: Option<String>,
    /// Listed exhibition to visit
    pub exhibition_id: Option<i64>,
    /// Free-text request; takes precedence over `exhibition_id`
    pub requested_exhibition: Option<String>,
}

/// Fields to change on an existing booking; `None` leaves a field as is
#[derive(Debug, Clone, Default)]
pub struct TourUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub number_of_guests: Option<u32>,
    pub date: Option<NaiveDateTime>,
    pub notes: Option<String>,
    pub exhibition_id: Option<i64>,
    pub requested_exhibition: Option<String>,
}

/// Service for tour management
pub struct TourService<'a> {
    storage: &'a Storage,
    ctx: &'a AuditContext,
}

impl<'a> TourService<'a> {
    /// Create a new tour service
    pub fn new(storage: &'a Storage, ctx: &'a AuditContext) -> Self {
        Self { storage, ctx }
    }

    /// Book a new tour
    pub fn book(&self, booking: TourBooking) -> GalleryResult<Tour> {
        let mut tour = Tour::new(booking.name.trim(), booking.email.trim(), booking.date);
        tour.phone_number = non_blank(booking.phone_number);
        tour.number_of_guests = booking.number_of_guests;
        tour.notes = non_blank(booking.notes);
        tour.user_id = self.current_user_id()?;

        if let Some(exhibition_id) = booking.exhibition_id {
            tour.exhibition = Some(self.bookable_exhibition(exhibition_id)?);
        }
        if let Some(requested) = booking.requested_exhibition {
            tour.request_exhibition(requested);
        }

        tour.validate()
            .map_err(|e| GalleryError::Validation(e.to_string()))?;

        let mut uow = UnitOfWork::new();
        uow.insert(tour);
        let tour = self
            .storage
            .commit(uow, self.ctx)?
            .first_inserted::<Tour>()
            .ok_or_else(|| GalleryError::Storage("Tour was not written".into()))?;

        self.record(
            AuditAction::Create,
            format!(
                "{} {}",
                tour_label(&tour),
                tour.date.format(BOOKING_DATE_FORMAT)
            ),
        )?;

        Ok(tour)
    }

    /// Get a tour by id
    pub fn get(&self, id: i64) -> GalleryResult<Option<Tour>> {
        self.storage.get::<Tour>(id)
    }

    /// Get a tour by id, failing if it doesn't exist
    pub fn require(&self, id: i64) -> GalleryResult<Tour> {
        self.get(id)?
            .ok_or_else(|| GalleryError::tour_not_found(id.to_string()))
    }

    /// List tours by visit date, optionally only those with a given status
    pub fn list(&self, status: Option<TourStatus>) -> GalleryResult<Vec<Tour>> {
        let mut tours = self
            .storage
            .find::<Tour, _>(|t| status.map_or(true, |s| t.status == s))?;
        tours.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));
        Ok(tours)
    }

    /// Bookings made by one user account, latest visit first
    pub fn list_for_user(&self, user_id: i64) -> GalleryResult<Vec<Tour>> {
        let mut tours = self.storage.find::<Tour, _>(|t| t.user_id == Some(user_id))?;
        tours.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(tours)
    }

    /// Bookings of the signed-in user, latest visit first
    pub fn mine(&self) -> GalleryResult<Vec<Tour>> {
        let user_id = self.require_user_id()?;
        self.list_for_user(user_id)
    }

    /// Update booking details as staff
    pub fn update(&self, id: i64, changes: TourUpdate) -> GalleryResult<Tour> {
        let tour = self.apply_update(self.require(id)?, changes)?;
        self.record(AuditAction::Update, format!("{} updated.", tour_label(&tour)))?;
        Ok(tour)
    }

    /// Update one of the signed-in user's own bookings
    ///
    /// The contact email and the status stay as they are; any email in
    /// `changes` is ignored.
    pub fn update_own(&self, id: i64, changes: TourUpdate) -> GalleryResult<Tour> {
        let user_id = self.require_user_id()?;
        let tour = self.require(id)?;
        if tour.user_id != Some(user_id) {
            return Err(GalleryError::Auth(format!(
                "Tour #{} is not one of your bookings",
                id
            )));
        }

        self.apply_update(
            tour,
            TourUpdate {
                email: None,
                ..changes
            },
        )
    }

    fn apply_update(&self, mut tour: Tour, changes: TourUpdate) -> GalleryResult<Tour> {
        if let Some(name) = changes.name {
            tour.name = name.trim().to_string();
        }
        if let Some(email) = changes.email {
            tour.email = email.trim().to_string();
        }
        if let Some(phone) = changes.phone_number {
            tour.phone_number = non_blank(Some(phone));
        }
        if let Some(guests) = changes.number_of_guests {
            tour.number_of_guests = guests;
        }
        if let Some(date) = changes.date {
            tour.date = date;
        }
        if let Some(notes) = changes.notes {
            tour.notes = non_blank(Some(notes));
        }
        if let Some(exhibition_id) = changes.exhibition_id {
            tour.exhibition = Some(self.bookable_exhibition(exhibition_id)?);
            tour.requested_exhibition = None;
        }
        if let Some(requested) = changes.requested_exhibition {
            tour.request_exhibition(requested);
        }

        tour.validate()
            .map_err(|e| GalleryError::Validation(e.to_string()))?;
        tour.touch();

        let mut uow = UnitOfWork::new();
        uow.update(tour.clone());
        self.storage.commit(uow, self.ctx)?;

        Ok(tour)
    }

    /// Confirm, cancel or reopen a booking
    pub fn set_status(&self, id: i64, status: TourStatus) -> GalleryResult<Tour> {
        let mut tour = self.require(id)?;
        tour.set_status(status);

        let mut uow = UnitOfWork::new();
        uow.update(tour.clone());
        self.storage.commit(uow, self.ctx)?;

        self.record(
            AuditAction::Update,
            format!("Tour#{} Status Update: {}", id, status),
        )?;

        Ok(tour)
    }

    /// Delete a booking
    pub fn delete(&self, id: i64) -> GalleryResult<Tour> {
        let tour = self.require(id)?;

        let mut uow = UnitOfWork::new();
        uow.delete(tour.clone());
        self.storage.commit(uow, self.ctx)?;

        self.record(AuditAction::Delete, format!("{} deleted.", tour_label(&tour)))?;
        Ok(tour)
    }

    fn bookable_exhibition(&self, id: i64) -> GalleryResult<ExhibitionRef> {
        let exhibition = self
            .storage
            .get::<Exhibition>(id)?
            .ok_or_else(|| GalleryError::exhibition_not_found(id.to_string()))?;

        if !exhibition.is_active {
            return Err(GalleryError::Validation(format!(
                "Exhibition '{}' is not open for bookings",
                exhibition.title
            )));
        }

        exhibition
            .as_ref_link()
            .ok_or_else(|| GalleryError::exhibition_not_found(id.to_string()))
    }

    fn record(&self, action: AuditAction, target: String) -> GalleryResult<()> {
        AuditWriter::new().log(
            Persist::Immediately(self.storage),
            self.ctx,
            action,
            Some(&target),
            None,
        )?;
        Ok(())
    }

    fn require_user_id(&self) -> GalleryResult<i64> {
        self.current_user_id()?
            .ok_or_else(|| GalleryError::Auth("Log in to manage your bookings".into()))
    }

    fn current_user_id(&self) -> GalleryResult<Option<i64>> {
        let Some(principal) = self.ctx.principal() else {
            return Ok(None);
        };
        Ok(self
            .storage
            .find_one::<User, _>(|u| u.username == principal.username())?
            .and_then(|u| u.id))
    }
}

const BOOKING_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// `Tour#<id> (<name>)`
fn tour_label(tour: &Tour) -> String {
    format!("Tour#{} ({})", tour.id.unwrap_or_default(), tour.name)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{ActivityLog, ActivityLogSubscriber, Principal};
    use crate::config::paths::GalleryPaths;
    use chrono::{Duration, NaiveDate, Utc};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = GalleryPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::open(paths).unwrap();
        storage.register_listener(ActivityLogSubscriber::default());
        (temp_dir, storage)
    }

    fn booking() -> TourBooking {
        TourBooking {
            name: "Ada Lovelace".into(),
            email: "ada@example.org".into(),
            phone_number: None,
            number_of_guests: 3,
            date: NaiveDate::from_ymd_opt(2025, 5, 3)
                .unwrap()
                .and_hms_opt(14, 0, 0)
                .unwrap(),
            notes: None,
            exhibition_id: None,
            requested_exhibition: None,
        }
    }

    fn targets(storage: &Storage) -> Vec<String> {
        storage
            .all::<ActivityLog>()
            .unwrap()
            .iter()
            .map(|l| format!("{} {}", l.action(), l.target_data().unwrap_or_default()))
            .collect()
    }

    #[test]
    fn test_book_tour() {
        let (_temp_dir, storage) = create_test_storage();
        let ctx = AuditContext::empty();
        let service = TourService::new(&storage, &ctx);

        let tour = service.book(booking()).unwrap();
        assert_eq!(tour.id, Some(1));
        assert_eq!(tour.status, TourStatus::Pending);
        assert_eq!(
            targets(&storage),
            vec!["CREATE Tour#1", "CREATE Tour#1 (Ada Lovelace) 2025-05-03 14:00"]
        );
    }

    #[test]
    fn test_book_rejects_invalid() {
        let (_temp_dir, storage) = create_test_storage();
        let ctx = AuditContext::empty();
        let service = TourService::new(&storage, &ctx);

        let mut bad = booking();
        bad.email = "not-an-email".into();
        assert!(service.book(bad).unwrap_err().is_validation());

        let mut bad = booking();
        bad.number_of_guests = 0;
        assert!(service.book(bad).unwrap_err().is_validation());

        assert!(storage.all::<ActivityLog>().unwrap().is_empty());
    }

    #[test]
    fn test_requested_exhibition_clears_link() {
        let (_temp_dir, storage) = create_test_storage();
        let ctx = AuditContext::empty();

        let mut uow = UnitOfWork::new();
        uow.insert(Exhibition::new("Impressions"));
        storage.commit(uow, &ctx).unwrap();

        let service = TourService::new(&storage, &ctx);
        let mut request = booking();
        request.exhibition_id = Some(1);
        request.requested_exhibition = Some("Private collection".into());

        let tour = service.book(request).unwrap();
        assert!(tour.exhibition.is_none());
        assert_eq!(tour.requested_exhibition.as_deref(), Some("Private collection"));
    }

    #[test]
    fn test_inactive_exhibition_not_bookable() {
        let (_temp_dir, storage) = create_test_storage();
        let ctx = AuditContext::empty();

        let mut closed = Exhibition::new("Closed show");
        closed.is_active = false;
        let mut uow = UnitOfWork::new();
        uow.insert(closed);
        storage.commit(uow, &ctx).unwrap();

        let service = TourService::new(&storage, &ctx);
        let mut request = booking();
        request.exhibition_id = Some(1);
        assert!(service.book(request).unwrap_err().is_validation());
    }

    #[test]
    fn test_booking_links_logged_in_user() {
        let (_temp_dir, storage) = create_test_storage();

        let mut uow = UnitOfWork::new();
        uow.insert(User::new("visitor", vec![], "hash".into()));
        storage.commit(uow, &AuditContext::empty()).unwrap();

        let ctx =
            AuditContext::empty().with_principal(Principal::new("visitor", vec!["ROLE_USER".into()]));
        let tour = TourService::new(&storage, &ctx).book(booking()).unwrap();
        assert_eq!(tour.user_id, Some(1));
    }

    #[test]
    fn test_status_change_logged_twice() {
        let (_temp_dir, storage) = create_test_storage();
        let ctx = AuditContext::empty()
            .with_principal(Principal::new("admin", vec!["ROLE_ADMIN".into()]));
        let service = TourService::new(&storage, &ctx);

        service.book(booking()).unwrap();
        let tour = service.set_status(1, TourStatus::Confirmed).unwrap();
        assert_eq!(tour.status, TourStatus::Confirmed);

        let logged = targets(&storage);
        assert_eq!(
            logged[2],
            "UPDATE Tour#1 | Changes: status: pending → confirmed"
        );
        assert_eq!(logged[3], "UPDATE Tour#1 Status Update: confirmed");
    }

    #[test]
    fn test_update_only_timestamp_has_no_suffix() {
        let (_temp_dir, storage) = create_test_storage();
        let ctx = AuditContext::empty();
        let service = TourService::new(&storage, &ctx);

        let mut tour = service.book(booking()).unwrap();
        tour.updated_at = Utc::now() + Duration::seconds(5);

        let mut uow = UnitOfWork::new();
        uow.update(tour);
        storage.commit(uow, &ctx).unwrap();

        assert_eq!(targets(&storage).last().unwrap(), "UPDATE Tour#1");
    }

    #[test]
    fn test_list_filters_status() {
        let (_temp_dir, storage) = create_test_storage();
        let ctx = AuditContext::empty();
        let service = TourService::new(&storage, &ctx);

        service.book(booking()).unwrap();
        service.book(booking()).unwrap();
        service.set_status(2, TourStatus::Cancelled).unwrap();

        assert_eq!(service.list(None).unwrap().len(), 2);
        let cancelled = service.list(Some(TourStatus::Cancelled)).unwrap();
        assert_eq!(cancelled.len(), 1);
        assert_eq!(cancelled[0].id, Some(2));
    }

    #[test]
    fn test_delete_tour() {
        let (_temp_dir, storage) = create_test_storage();
        let ctx = AuditContext::empty();
        let service = TourService::new(&storage, &ctx);

        service.book(booking()).unwrap();
        service.delete(1).unwrap();

        assert!(service.get(1).unwrap().is_none());
        assert!(service.delete(1).unwrap_err().is_not_found());
        let logged = targets(&storage);
        assert_eq!(
            logged[logged.len() - 2..],
            ["DELETE Tour#1", "DELETE Tour#1 (Ada Lovelace) deleted."]
        );
    }

    #[test]
    fn test_staff_update_writes_explicit_row() {
        let (_temp_dir, storage) = create_test_storage();
        let ctx = AuditContext::empty();
        let service = TourService::new(&storage, &ctx);

        service.book(booking()).unwrap();
        service
            .update(
                1,
                TourUpdate {
                    number_of_guests: Some(5),
                    ..TourUpdate::default()
                },
            )
            .unwrap();

        let logged = targets(&storage);
        assert_eq!(
            logged[logged.len() - 2..],
            [
                "UPDATE Tour#1 | Changes: numberOfGuests: 3 → 5",
                "UPDATE Tour#1 (Ada Lovelace) updated."
            ]
        );
    }

    fn seed_visitors(storage: &Storage) {
        let mut uow = UnitOfWork::new();
        uow.insert(User::new("visitor", vec![], "hash".into()));
        uow.insert(User::new("other", vec![], "hash".into()));
        storage.commit(uow, &AuditContext::empty()).unwrap();
    }

    fn visitor_ctx(username: &str) -> AuditContext {
        AuditContext::empty().with_principal(Principal::new(username, vec!["ROLE_USER".into()]))
    }

    #[test]
    fn test_list_for_user_latest_first() {
        let (_temp_dir, storage) = create_test_storage();
        seed_visitors(&storage);

        let ctx = visitor_ctx("visitor");
        let service = TourService::new(&storage, &ctx);
        let mut later = booking();
        later.date += Duration::days(7);
        service.book(booking()).unwrap();
        service.book(later).unwrap();

        let other_ctx = visitor_ctx("other");
        TourService::new(&storage, &other_ctx).book(booking()).unwrap();

        let mine: Vec<_> = service.mine().unwrap().iter().map(|t| t.id).collect();
        assert_eq!(mine, vec![Some(2), Some(1)]);
        assert_eq!(service.list_for_user(2).unwrap().len(), 1);
    }

    #[test]
    fn test_mine_requires_login() {
        let (_temp_dir, storage) = create_test_storage();
        let ctx = AuditContext::empty();
        let service = TourService::new(&storage, &ctx);

        assert!(matches!(service.mine(), Err(GalleryError::Auth(_))));
    }

    #[test]
    fn test_update_own_rejects_other_users_booking() {
        let (_temp_dir, storage) = create_test_storage();
        seed_visitors(&storage);

        let owner_ctx = visitor_ctx("visitor");
        TourService::new(&storage, &owner_ctx).book(booking()).unwrap();

        let other_ctx = visitor_ctx("other");
        let result = TourService::new(&storage, &other_ctx).update_own(
            1,
            TourUpdate {
                number_of_guests: Some(9),
                ..TourUpdate::default()
            },
        );
        assert!(matches!(result, Err(GalleryError::Auth(_))));
        assert_eq!(storage.get::<Tour>(1).unwrap().unwrap().number_of_guests, 3);
    }

    #[test]
    fn test_update_own_keeps_email_and_status() {
        let (_temp_dir, storage) = create_test_storage();
        seed_visitors(&storage);

        let ctx = visitor_ctx("visitor");
        let service = TourService::new(&storage, &ctx);
        service.book(booking()).unwrap();
        let rows_before = targets(&storage).len();

        let tour = service
            .update_own(
                1,
                TourUpdate {
                    email: Some("someone-else@example.org".into()),
                    number_of_guests: Some(2),
                    ..TourUpdate::default()
                },
            )
            .unwrap();

        assert_eq!(tour.email, "ada@example.org");
        assert_eq!(tour.number_of_guests, 2);
        assert_eq!(tour.status, TourStatus::Pending);

        let logged = targets(&storage);
        assert_eq!(logged.len(), rows_before + 1);
        assert_eq!(
            logged.last().unwrap(),
            "UPDATE Tour#1 | Changes: numberOfGuests: 3 → 2"
        );
    }
}
