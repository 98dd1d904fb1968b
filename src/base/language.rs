//! Multilingual text.

use smol_str::SmolStr;
use std::collections::BTreeMap;

/// Text keyed by language tag (`"en"`, `"cs"`, ...).
pub type LanguageString = BTreeMap<SmolStr, String>;

/// Pick the best translation for display.
///
/// Languages are tried in preference order; when none matches, the
/// alphabetically first translation is used so output stays deterministic.
pub fn pick_language<'a>(text: &'a LanguageString, preferred: &[SmolStr]) -> Option<&'a str> {
    preferred
        .iter()
        .find_map(|lang| text.get(lang))
        .or_else(|| text.values().next())
        .map(String::as_str)
}
