//! Service layer for Gallery
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, lookups, and cross-entity changes. Services that
//! mutate data take the caller's `AuditContext` so every commit is
//! attributed.

pub mod activity_log;
pub mod artist;
pub mod exhibition;
pub mod session;
pub mod setting;
pub mod tour;
pub mod user;

pub use activity_log::{parse_date, ActivityLogService, LogFilter};
pub use artist::{ArtistDetails, ArtistService, ArtistUpdate};
pub use exhibition::{ExhibitionDetails, ExhibitionService, ExhibitionUpdate};
pub use session::{Session, SessionService};
pub use setting::SettingService;
pub use tour::{TourBooking, TourService, TourUpdate};
pub use user::UserService;
