use clap::Args;
use wordnook_core::{DirectionPolicy, EntryPolicy, Settings};

use crate::utils::*;

impl StorageKey for Settings {
    const KEY: &'static str = "wordnook:settings";
}

/// Gameplay switches accepted in the location hash, eg. `#--lenient&--gesture`.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub(crate) struct SettingsArgs {
    /// Always advance after typing, without locking or flagging cells
    #[arg(long, conflicts_with = "strict")]
    lenient: bool,

    /// Advance only on correct letters and lock them
    #[arg(long)]
    strict: bool,

    /// Select across with a click and down with a double click
    #[arg(long, conflicts_with = "debounce_ms")]
    gesture: bool,

    /// Toggle direction by clicking the same cell again, ignoring repeats within this window
    #[arg(long, value_name = "MS")]
    debounce_ms: Option<u32>,
}

impl SettingsArgs {
    pub(crate) fn apply(&self, settings: &mut Settings) -> bool {
        let before = *settings;

        if self.lenient {
            settings.entry_policy = EntryPolicy::Lenient;
        } else if self.strict {
            settings.entry_policy = EntryPolicy::Strict;
        }

        if self.gesture {
            settings.direction_policy = DirectionPolicy::Gesture;
        } else if let Some(debounce_ms) = self.debounce_ms {
            settings.direction_policy = DirectionPolicy::Toggle { debounce_ms };
        }

        before != *settings
    }
}

/// Stored settings with the hash arguments layered on top. Overrides are remembered.
pub(crate) fn load(args: &SettingsArgs) -> Settings {
    let mut settings = Settings::local_or_default();
    if args.apply(&mut settings) {
        log::debug!("settings overridden from location: {:?}", settings);
        settings.local_save();
    }
    settings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_override_only_what_they_name() {
        let mut settings = Settings::default();
        let args = SettingsArgs {
            lenient: true,
            ..Default::default()
        };

        assert!(args.apply(&mut settings));
        assert_eq!(settings.entry_policy, EntryPolicy::Lenient);
        assert_eq!(settings.direction_policy, DirectionPolicy::default());
        assert!(!args.apply(&mut settings));
    }

    #[test]
    fn debounce_window_is_configurable() {
        let mut settings = Settings {
            entry_policy: EntryPolicy::Lenient,
            direction_policy: DirectionPolicy::Gesture,
        };
        let args = SettingsArgs {
            strict: true,
            debounce_ms: Some(150),
            ..Default::default()
        };

        args.apply(&mut settings);

        assert_eq!(settings.entry_policy, EntryPolicy::Strict);
        assert_eq!(
            settings.direction_policy,
            DirectionPolicy::Toggle { debounce_ms: 150 }
        );
    }
}
