use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{KvBackend, RecordStore};

/// Drop every stored collection, for all users.
pub fn run<B: KvBackend>(store: &mut RecordStore<B>) -> Result<CmdResult> {
    store.clear()?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success("All data cleared"));
    Ok(result)
}
