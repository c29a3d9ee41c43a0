//! Human readable captions from identifiers

use inflector::Inflector;

use crate::html::SafeString;

/// Turn an identifier into a title-cased caption
///
/// Every non-alphanumeric character and every camel-case hump separates
/// words; a trailing `_id` is dropped. Each word starts upper case and
/// continues lower case. The result is escaped.
///
/// # Examples
///
/// ```rust
/// use dry_crud::format::captionize;
///
/// assert_eq!(captionize("camel_case").as_str(), "Camel Case");
/// assert_eq!(captionize("all upper case").as_str(), "All Upper Case");
/// assert_eq!(captionize("companion_id").as_str(), "Companion");
/// assert_eq!(captionize("first.name").as_str(), "First Name");
/// assert_eq!(captionize("bad <title>").as_str(), "Bad Title");
/// ```
#[must_use]
pub fn captionize(key: &str) -> SafeString {
    let key = key.trim();
    let key = key.strip_suffix("_id").filter(|k| !k.is_empty()).unwrap_or(key);
    SafeString::escape(&key.to_title_case())
}
