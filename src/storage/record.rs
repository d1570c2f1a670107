//! Type-erased entity records
//!
//! A unit of work mixes entities of every type, so the storage layer moves
//! them around as `Record`s and dispatches back to the typed tables.

use std::collections::BTreeMap;

use crate::audit::ActivityLog;
use crate::models::{
    Artist, Describable, Entity, EntityKind, Exhibition, FieldValue, Setting, Tour, User,
};

use super::database::Database;

/// An entity that lives in one table of the database
pub trait Stored: Entity + Sized {
    #[doc(hidden)]
    fn table(db: &Database) -> &BTreeMap<i64, Self>;

    /// Unwrap a record of this type
    fn from_record(record: Record) -> Option<Self>;
}

macro_rules! define_records {
    ($($ty:ident => $table:ident),+ $(,)?) => {
        /// Any persisted entity
        #[derive(Debug, Clone, PartialEq)]
        pub enum Record {
            $($ty($ty),)+
        }

        impl Record {
            pub fn kind(&self) -> EntityKind {
                match self {
                    $(Self::$ty(_) => EntityKind::$ty,)+
                }
            }

            pub fn id(&self) -> Option<i64> {
                match self {
                    $(Self::$ty(e) => e.id(),)+
                }
            }

            pub(super) fn assign_id(&mut self, id: i64) {
                match self {
                    $(Self::$ty(e) => e.assign_id(id),)+
                }
            }

            /// Tracked column values of the wrapped entity
            pub fn fields(&self) -> Vec<(&'static str, FieldValue)> {
                match self {
                    $(Self::$ty(e) => e.fields(),)+
                }
            }

            pub fn as_describable(&self) -> &dyn Describable {
                match self {
                    $(Self::$ty(e) => e as &dyn Describable,)+
                }
            }
        }

        $(
            impl From<$ty> for Record {
                fn from(entity: $ty) -> Self {
                    Self::$ty(entity)
                }
            }

            impl Stored for $ty {
                fn table(db: &Database) -> &BTreeMap<i64, Self> {
                    &db.$table
                }

                #[allow(unreachable_patterns)]
                fn from_record(record: Record) -> Option<Self> {
                    match record {
                        Record::$ty(e) => Some(e),
                        _ => None,
                    }
                }
            }
        )+

        impl Database {
            /// Currently stored version of the row a record points at
            pub(super) fn stored(&self, kind: EntityKind, id: i64) -> Option<Record> {
                match kind {
                    $(EntityKind::$ty => self.$table.get(&id).cloned().map(Record::$ty),)+
                }
            }

            /// Insert or replace a row; the record must carry an id
            pub(super) fn put(&mut self, record: Record) -> bool {
                let Some(id) = record.id() else {
                    return false;
                };
                match record {
                    $(Record::$ty(e) => {
                        self.$table.insert(id, e);
                    })+
                }
                true
            }

            /// Remove a row, returning whether it existed
            pub(super) fn remove(&mut self, kind: EntityKind, id: i64) -> bool {
                match kind {
                    $(EntityKind::$ty => self.$table.remove(&id).is_some(),)+
                }
            }
        }
    };
}

define_records! {
    Tour => tours,
    Exhibition => exhibitions,
    Artist => artists,
    Setting => settings,
    User => users,
    ActivityLog => activity_logs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_dispatch() {
        let mut record = Record::from(Artist::new("Berthe Morisot"));
        assert_eq!(record.kind(), EntityKind::Artist);
        assert_eq!(record.id(), None);

        record.assign_id(7);
        assert_eq!(record.id(), Some(7));
        assert_eq!(record.as_describable().type_name(), "Artist");
    }

    #[test]
    fn test_from_record_checks_type() {
        let record = Record::from(Artist::new("Berthe Morisot"));
        assert!(Exhibition::from_record(record.clone()).is_none());
        assert_eq!(
            Artist::from_record(record).map(|a| a.name),
            Some("Berthe Morisot".to_string())
        );
    }

    #[test]
    fn test_database_put_requires_id() {
        let mut db = Database::default();
        assert!(!db.put(Record::from(Artist::new("Unsaved"))));

        let mut artist = Artist::new("Saved");
        artist.assign_id(3);
        assert!(db.put(Record::from(artist)));
        assert!(db.stored(EntityKind::Artist, 3).is_some());
        assert!(db.remove(EntityKind::Artist, 3));
        assert!(!db.remove(EntityKind::Artist, 3));
    }
}
