use crate::error::{FitError, Result};
use crate::store::{KvBackend, Record, RecordStore};

/// Resolve a user-typed id against the owner's records of kind `R`.
///
/// An exact match wins; otherwise a unique prefix is accepted so that the
/// short ids shown in listings can be typed back. Returns Ok(None) when
/// nothing matches and an error when the prefix is ambiguous.
pub fn resolve<B: KvBackend, R: Record>(
    store: &RecordStore<B>,
    owner_id: &str,
    needle: &str,
) -> Result<Option<R>> {
    let needle = needle.trim();
    if needle.is_empty() {
        return Err(FitError::InvalidInput(format!("Empty {} id", R::KIND)));
    }

    let records = store.list::<R>(owner_id);
    if let Some(exact) = records.iter().find(|r| r.id() == needle) {
        return Ok(Some(exact.clone()));
    }

    let mut matches = records.into_iter().filter(|r| r.id().starts_with(needle));
    match (matches.next(), matches.next()) {
        (None, _) => Ok(None),
        (Some(only), None) => Ok(Some(only)),
        (Some(_), Some(_)) => Err(FitError::InvalidInput(format!(
            "Ambiguous {} id prefix: {}",
            R::KIND,
            needle
        ))),
    }
}

/// First eight characters of an id, used in listings and messages.
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}

/// Trim and reject empty required text fields.
pub fn required(field: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FitError::InvalidInput(format!("{} cannot be empty", field)));
    }
    Ok(value.to_string())
}

/// Reject NaN and infinities, which JSON cannot store.
pub fn finite(field: &str, value: Option<f64>) -> Result<Option<f64>> {
    match value {
        Some(v) if !v.is_finite() => Err(FitError::InvalidInput(format!(
            "{} must be a finite number, got {}",
            field, v
        ))),
        _ => Ok(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Todo;
    use crate::store::mem_backend::MemBackend;

    fn seeded(ids: &[&str]) -> RecordStore<MemBackend> {
        let mut store = RecordStore::with_backend(MemBackend::new());
        for id in ids {
            let mut todo = Todo::new("u1", *id);
            todo.id = id.to_string();
            store.save(&todo).unwrap();
        }
        store
    }

    #[test]
    fn exact_match_beats_prefix() {
        let store = seeded(&["ab", "abc"]);
        let found: Option<Todo> = resolve(&store, "u1", "ab").unwrap();
        assert_eq!(found.unwrap().id, "ab");
    }

    #[test]
    fn unique_prefix_resolves() {
        let store = seeded(&["abc123", "def456"]);
        let found: Option<Todo> = resolve(&store, "u1", "de").unwrap();
        assert_eq!(found.unwrap().id, "def456");
    }

    #[test]
    fn ambiguous_prefix_is_an_error() {
        let store = seeded(&["abc123", "abd456"]);
        let result: Result<Option<Todo>> = resolve(&store, "u1", "ab");
        assert!(matches!(result, Err(FitError::InvalidInput(_))));
    }

    #[test]
    fn no_match_is_none() {
        let store = seeded(&["abc123"]);
        let found: Option<Todo> = resolve(&store, "u1", "zz").unwrap();
        assert!(found.is_none());
        let other_user: Option<Todo> = resolve(&store, "u2", "abc123").unwrap();
        assert!(other_user.is_none());
    }

    #[test]
    fn short_id_truncates() {
        assert_eq!(short_id("0123456789"), "01234567");
        assert_eq!(short_id("abc"), "abc");
    }

    #[test]
    fn required_trims_and_rejects_blank() {
        assert_eq!(required("Name", "  Push  ").unwrap(), "Push");
        assert!(required("Name", "   ").is_err());
    }

    #[test]
    fn finite_rejects_nan_and_infinity() {
        assert_eq!(finite("Weight", Some(80.5)).unwrap(), Some(80.5));
        assert_eq!(finite("Weight", None).unwrap(), None);
        assert!(finite("Weight", Some(f64::NAN)).is_err());
        assert!(finite("Weight", Some(f64::INFINITY)).is_err());
        assert!(finite("Weight", Some(f64::NEG_INFINITY)).is_err());
    }
}
