use crate::commands::helpers::finite;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{FitError, Result};
use crate::model::UserProfile;
use crate::store::{KvBackend, RecordStore};

/// Fields to change on a profile. `None` leaves the stored value alone;
/// `Some("")` clears a text field.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub goal: Option<String>,
}

impl ProfileUpdate {
    fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.full_name.is_none()
            && self.height.is_none()
            && self.weight.is_none()
            && self.goal.is_none()
    }

    fn apply(self, profile: &mut UserProfile) {
        fn text(value: String) -> Option<String> {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        }

        if let Some(v) = self.username {
            profile.username = text(v);
        }
        if let Some(v) = self.full_name {
            profile.full_name = text(v);
        }
        if let Some(v) = self.height {
            profile.height = Some(v);
        }
        if let Some(v) = self.weight {
            profile.weight = Some(v);
        }
        if let Some(v) = self.goal {
            profile.goal = text(v);
        }
    }
}

pub fn show<B: KvBackend>(store: &RecordStore<B>, user: &str) -> Result<CmdResult> {
    let profile = store.get_profile(user);
    let mut result = CmdResult::default();
    if profile.is_none() {
        result.add_message(CmdMessage::info("No profile yet"));
    }
    Ok(result.with_profile(profile))
}

/// Merge `update` into the stored profile and save it.
pub fn update<B: KvBackend>(
    store: &mut RecordStore<B>,
    user: &str,
    update: ProfileUpdate,
) -> Result<CmdResult> {
    if update.is_empty() {
        return Err(FitError::InvalidInput("Nothing to update".to_string()));
    }
    for (field, value) in [("Height", update.height), ("Weight", update.weight)] {
        if finite(field, value)?.is_some_and(|v| v <= 0.0) {
            return Err(FitError::InvalidInput(format!("{} must be positive", field)));
        }
    }

    let mut profile = store.get_profile(user).unwrap_or_default();
    update.apply(&mut profile);
    store.save_profile(user, profile.clone())?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success("Profile updated"));
    Ok(result.with_profile(Some(profile)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Account;
    use crate::store::mem_backend::MemBackend;

    fn store() -> RecordStore<MemBackend> {
        RecordStore::with_backend(MemBackend::new())
    }

    #[test]
    fn show_without_profile() {
        let result = show(&store(), "u1").unwrap();
        assert!(result.profile.is_none());
    }

    #[test]
    fn update_merges_fields() {
        let mut store = store();
        update(
            &mut store,
            "u1",
            ProfileUpdate {
                username: Some("sam".into()),
                height: Some(180.0),
                ..Default::default()
            },
        )
        .unwrap();
        update(
            &mut store,
            "u1",
            ProfileUpdate {
                goal: Some("Gain strength".into()),
                ..Default::default()
            },
        )
        .unwrap();

        let profile = store.get_profile("u1").unwrap();
        assert_eq!(profile.username.as_deref(), Some("sam"));
        assert_eq!(profile.height, Some(180.0));
        assert_eq!(profile.goal.as_deref(), Some("Gain strength"));
        assert_eq!(store.list::<Account>("u1").len(), 1);
    }

    #[test]
    fn empty_text_clears_field() {
        let mut store = store();
        update(
            &mut store,
            "u1",
            ProfileUpdate {
                username: Some("sam".into()),
                ..Default::default()
            },
        )
        .unwrap();
        update(
            &mut store,
            "u1",
            ProfileUpdate {
                username: Some("".into()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(store.get_profile("u1").unwrap().username, None);
    }

    #[test]
    fn rejects_empty_and_negative_updates() {
        let mut store = store();
        assert!(update(&mut store, "u1", ProfileUpdate::default()).is_err());
        let bad = ProfileUpdate {
            weight: Some(-3.0),
            ..Default::default()
        };
        assert!(update(&mut store, "u1", bad).is_err());
        let nan = ProfileUpdate {
            height: Some(f64::NAN),
            ..Default::default()
        };
        assert!(matches!(
            update(&mut store, "u1", nan),
            Err(FitError::InvalidInput(_))
        ));
        assert!(store.get_profile("u1").is_none());
    }
}
