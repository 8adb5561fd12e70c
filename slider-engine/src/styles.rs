//! Process-wide record of which slider variants have installed their styles.

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::collections::HashSet;

use crate::config::SliderVariant;

static INSTALLED: Lazy<Mutex<HashSet<SliderVariant>>> =
    Lazy::new(|| Mutex::new(HashSet::new()));

/// Mark `variant` installed. Returns true only for the first caller in the
/// process, which is responsible for installing the styles.
pub fn ensure_installed(variant: SliderVariant) -> bool {
    INSTALLED.lock().insert(variant)
}
