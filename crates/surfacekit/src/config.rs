//! # Notifier configuration
//!
//! ## Overview
//!
//! [NotifierConfig] controls what a [ChangeNotifier](crate::notifier::ChangeNotifier) looks at.
//! It can be deserialized from a host's settings; any missing fields take their default values.
//!
//! ## Example
//!
//! ```
//! use surfacekit::config::NotifierConfig;
//! use surfacekit::surface_types::KindFlags;
//!
//! let config: NotifierConfig = serde_json::from_str(r#"{ "kinds": "SELECTION" }"#).unwrap();
//!
//! assert_eq!(config.kinds, KindFlags::SELECTION);
//! assert_eq!(config.strict_signals, true);
//! ```
use serde::{Deserialize, Serialize};

use surface_types::KindFlags;

/// Options for a [ChangeNotifier](crate::notifier::ChangeNotifier).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifierConfig {
    /// Which kinds of notifications to observe. Kinds not listed here are never compared or
    /// dispatched.
    pub kinds: KindFlags,

    /// Only compare the parts of the surface that a [Signal](surface_types::Signal) can affect.
    ///
    /// When this is off, every signal compares everything.
    pub strict_signals: bool,

    /// Catch panicking listeners and report them as
    /// [HandlerError::Panicked](crate::errors::HandlerError::Panicked).
    pub catch_panics: bool,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        NotifierConfig {
            kinds: KindFlags::ALL,
            strict_signals: true,
            catch_panics: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config() {
        let config: NotifierConfig = serde_json::from_str(r#"{ "catch_panics": false }"#).unwrap();

        assert_eq!(config.kinds, KindFlags::ALL);
        assert_eq!(config.strict_signals, true);
        assert_eq!(config.catch_panics, false);
    }

    #[test]
    fn test_combined_kinds() {
        let config: NotifierConfig =
            serde_json::from_str(r#"{ "kinds": "FIELD | SELECTION", "strict_signals": false }"#)
                .unwrap();

        assert_eq!(config.kinds, KindFlags::ALL);
        assert_eq!(config.strict_signals, false);
    }
}
