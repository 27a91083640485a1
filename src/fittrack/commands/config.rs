use crate::commands::{CmdMessage, CmdResult};
use crate::config::FitConfig;
use crate::error::Result;
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    match action {
        ConfigAction::ShowAll => {
            let config = FitConfig::load(dir)?;
            Ok(CmdResult::default().with_config(config))
        }
        ConfigAction::ShowKey(key) => {
            let config = FitConfig::load(dir)?;
            let mut result = CmdResult::default();
            match config.get(&key) {
                Some(val) => result.add_message(CmdMessage::info(val)),
                None => {
                    result.add_message(CmdMessage::error(format!("Unknown config key: {}", key)))
                }
            }
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            let mut config = FitConfig::load(dir)?;
            if let Err(e) = config.set(&key, &value) {
                let mut res = CmdResult::default();
                res.add_message(CmdMessage::error(e.to_string()));
                return Ok(res);
            }
            config.save(dir)?;
            let display_val = config.get(&key).unwrap_or_else(|| value.clone());
            let mut result = CmdResult::default().with_config(config);
            result.add_message(CmdMessage::success(format!("{} set to {}", key, display_val)));
            Ok(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;

    #[test]
    fn set_then_show_key() {
        let dir = tempfile::tempdir().unwrap();
        run(
            dir.path(),
            ConfigAction::Set("default-user".into(), "u7".into()),
        )
        .unwrap();

        let shown = run(dir.path(), ConfigAction::ShowKey("default-user".into())).unwrap();
        assert_eq!(shown.messages[0].content, "u7");

        let all = run(dir.path(), ConfigAction::ShowAll).unwrap();
        assert_eq!(all.config.unwrap().default_user.as_deref(), Some("u7"));
    }

    #[test]
    fn unknown_key_is_an_error_message() {
        let dir = tempfile::tempdir().unwrap();
        let result = run(dir.path(), ConfigAction::Set("colour".into(), "red".into())).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Error);
        assert!(!dir.path().join("config.json").exists());
    }
}
