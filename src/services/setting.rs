//! Setting service
//!
//! Site-wide key/value settings, grouped for display. Keys are unique.

use std::collections::BTreeSet;

use crate::audit::AuditContext;
use crate::error::{GalleryError, GalleryResult};
use crate::models::Setting;
use crate::storage::{Storage, UnitOfWork};

/// Service for site settings
pub struct SettingService<'a> {
    storage: &'a Storage,
    ctx: &'a AuditContext,
}

impl<'a> SettingService<'a> {
    /// Create a new setting service
    pub fn new(storage: &'a Storage, ctx: &'a AuditContext) -> Self {
        Self { storage, ctx }
    }

    /// Create a setting
    pub fn create(
        &self,
        key: &str,
        value: Option<String>,
        group: Option<&str>,
        description: Option<String>,
    ) -> GalleryResult<Setting> {
        let key = key.trim();
        if self.get(key)?.is_some() {
            return Err(GalleryError::Duplicate {
                entity_type: "Setting",
                identifier: key.to_string(),
            });
        }

        let mut setting = Setting::new(key, value);
        if let Some(group) = group {
            setting.group_name = group.trim().to_string();
        }
        setting.description = description;

        setting
            .validate()
            .map_err(|e| GalleryError::Validation(e.to_string()))?;

        let mut uow = UnitOfWork::new();
        uow.insert(setting);
        self.storage
            .commit(uow, self.ctx)?
            .first_inserted::<Setting>()
            .ok_or_else(|| GalleryError::Storage("Setting was not written".into()))
    }

    /// Get a setting by key
    pub fn get(&self, key: &str) -> GalleryResult<Option<Setting>> {
        let key = key.trim();
        self.storage.find_one::<Setting, _>(|s| s.key_name == key)
    }

    /// Get a setting by key, failing if it doesn't exist
    pub fn require(&self, key: &str) -> GalleryResult<Setting> {
        self.get(key)?
            .ok_or_else(|| GalleryError::setting_not_found(key.trim()))
    }

    /// List settings ordered by group, then key
    pub fn list(&self, group: Option<&str>) -> GalleryResult<Vec<Setting>> {
        let mut settings = self
            .storage
            .find::<Setting, _>(|s| group.map_or(true, |g| s.group_name.eq_ignore_ascii_case(g)))?;
        settings.sort_by(|a, b| {
            a.group_name
                .cmp(&b.group_name)
                .then_with(|| a.key_name.cmp(&b.key_name))
        });
        Ok(settings)
    }

    /// Distinct group names in use
    pub fn groups(&self) -> GalleryResult<Vec<String>> {
        let groups: BTreeSet<String> = self
            .storage
            .all::<Setting>()?
            .into_iter()
            .map(|s| s.group_name)
            .collect();
        Ok(groups.into_iter().collect())
    }

    /// Change the value of a setting
    pub fn set_value(&self, key: &str, value: Option<String>) -> GalleryResult<Setting> {
        let mut setting = self.require(key)?;
        setting.value = value;

        let mut uow = UnitOfWork::new();
        uow.update(setting.clone());
        self.storage.commit(uow, self.ctx)?;

        Ok(setting)
    }

    /// Enable or disable a setting
    pub fn set_active(&self, key: &str, active: bool) -> GalleryResult<Setting> {
        let mut setting = self.require(key)?;
        setting.is_active = active;

        let mut uow = UnitOfWork::new();
        uow.update(setting.clone());
        self.storage.commit(uow, self.ctx)?;

        Ok(setting)
    }

    /// Delete a setting
    pub fn delete(&self, key: &str) -> GalleryResult<Setting> {
        let setting = self.require(key)?;

        let mut uow = UnitOfWork::new();
        uow.delete(setting.clone());
        self.storage.commit(uow, self.ctx)?;

        Ok(setting)
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

    #[test]
    fn test_create_uses_default_group() {
        let (_temp_dir, storage) = create_test_storage();
        let ctx = AuditContext::empty();
        let service = SettingService::new(&storage, &ctx);

        let setting = service
            .create("site_name", Some("City Gallery".into()), None, None)
            .unwrap();
        assert_eq!(setting.group_name, "general");
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let ctx = AuditContext::empty();
        let service = SettingService::new(&storage, &ctx);

        service.create("site_name", None, None, None).unwrap();
        let result = service.create("site_name", None, Some("contact"), None);
        assert!(matches!(result, Err(GalleryError::Duplicate { .. })));
    }

    #[test]
    fn test_set_value_logged_by_id() {
        let (_temp_dir, storage) = create_test_storage();
        let ctx = AuditContext::empty();
        let service = SettingService::new(&storage, &ctx);

        service
            .create("opening_hours", Some("9-17".into()), None, None)
            .unwrap();
        service.set_value("opening_hours", Some("10-18".into())).unwrap();

        let logs = storage.all::<ActivityLog>().unwrap();
        assert_eq!(logs[0].target_data(), Some("Setting#1"));
        assert_eq!(
            logs[1].target_data(),
            Some("Setting#1 | Changes: value: 9-17 → 10-18")
        );
    }

    #[test]
    fn test_groups_and_filter() {
        let (_temp_dir, storage) = create_test_storage();
        let ctx = AuditContext::empty();
        let service = SettingService::new(&storage, &ctx);

        service.create("site_name", None, None, None).unwrap();
        service.create("phone", None, Some("contact"), None).unwrap();
        service.create("email", None, Some("contact"), None).unwrap();

        assert_eq!(service.groups().unwrap(), vec!["contact", "general"]);

        let contact = service.list(Some("CONTACT")).unwrap();
        let keys: Vec<_> = contact.iter().map(|s| s.key_name.as_str()).collect();
        assert_eq!(keys, vec!["email", "phone"]);
    }

    #[test]
    fn test_delete_missing_key() {
        let (_temp_dir, storage) = create_test_storage();
        let ctx = AuditContext::empty();
        let service = SettingService::new(&storage, &ctx);

        assert!(service.delete("nope").unwrap_err().is_not_found());
    }
}
