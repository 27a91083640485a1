use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{CollectionState, KvBackend, RecordStore};

/// Report collections that reads silently treat as empty.
pub fn run<B: KvBackend>(store: &RecordStore<B>) -> Result<CmdResult> {
    let health = store.inspect();
    let mut result = CmdResult::default();

    for entry in &health {
        match &entry.state {
            CollectionState::Corrupt { reason } => {
                result.add_message(CmdMessage::warning(format!(
                    "{} ({}) is corrupt and reads as empty: {}",
                    entry.kind, entry.key, reason
                )));
            }
            CollectionState::Unreadable { reason } => {
                result.add_message(CmdMessage::error(format!(
                    "{} ({}) cannot be read: {}",
                    entry.kind, entry.key, reason
                )));
            }
            CollectionState::Absent | CollectionState::Valid { .. } => {}
        }
    }

    if !result.has_warnings() {
        result.add_message(CmdMessage::success("All collections are readable"));
    }
    Ok(result.with_health(health))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::store::keys;
    use crate::store::mem_backend::fixtures::StoreFixture;

    #[test]
    fn healthy_store() {
        let fixture = StoreFixture::new().with_todo("u1", "a", false);
        let result = run(&fixture.store).unwrap();
        assert_eq!(result.health.len(), 5);
        assert!(!result.has_warnings());
        assert!(result
            .health
            .iter()
            .any(|h| h.state == CollectionState::Valid { entries: 1 }));
    }

    #[test]
    fn flags_corrupt_collection() {
        let fixture = StoreFixture::new().with_raw(keys::DIET_LOGS, "[{\"broken\": true}]");
        let result = run(&fixture.store).unwrap();
        assert_eq!(result.messages.len(), 1);
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
        assert!(result.messages[0].content.contains(keys::DIET_LOGS));
    }
}
