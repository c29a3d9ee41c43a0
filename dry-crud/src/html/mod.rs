//! HTML-safe output and tag assembly
//!
//! Every helper in this crate returns a [`SafeString`]: markup that has
//! already been escaped and must not be escaped again by the rendering
//! layer. Raw text only becomes a `SafeString` by passing through
//! [`SafeString::escape`] (directly or via [`IntoHtml`]).
//!
//! # Examples
//!
//! ```rust
//! use dry_crud::html::{content_tag, IntoHtml, SafeString};
//!
//! let cell = content_tag("td", &[("class", "name")], "Tom & Jerry");
//! assert_eq!(cell.as_str(), r#"<td class="name">Tom &amp; Jerry</td>"#);
//!
//! let escaped = "<b>".into_html();
//! assert_eq!(escaped.as_str(), "&lt;b&gt;");
//! ```

use std::fmt;

/// Marker rendered in place of empty content
pub const EMPTY_STRING: &str = "&nbsp;";

/// HTML-safe string wrapper
///
/// Holds markup that is safe for direct HTML output (already escaped).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SafeString(String);

impl SafeString {
    /// Wrap markup that is already safe for output
    ///
    /// Only use this for markup assembled from escaped parts. Untrusted
    /// text goes through [`SafeString::escape`].
    #[must_use]
    pub fn new(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    /// Escape raw text and mark the result safe
    #[must_use]
    pub fn escape(raw: &str) -> Self {
        Self(escape_html(raw))
    }

    /// An empty safe string
    #[must_use]
    pub const fn empty() -> Self {
        Self(String::new())
    }

    /// The non-breaking space marker used for empty values
    #[must_use]
    pub fn nbsp() -> Self {
        Self(EMPTY_STRING.to_string())
    }

    /// Borrow the markup
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the markup is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append another safe fragment
    pub fn push(&mut self, other: &Self) {
        self.0.push_str(&other.0);
    }

    /// Append raw text, escaping it
    pub fn push_escaped(&mut self, raw: &str) {
        self.0.push_str(&escape_html(raw));
    }

    /// Consume the wrapper and return the markup
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for SafeString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<SafeString> for String {
    fn from(s: SafeString) -> Self {
        s.0
    }
}

impl AsRef<str> for SafeString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for SafeString {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for SafeString {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl FromIterator<Self> for SafeString {
    fn from_iter<I: IntoIterator<Item = Self>>(iter: I) -> Self {
        let mut out = Self::empty();
        for fragment in iter {
            out.push(&fragment);
        }
        out
    }
}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for SafeString {
    fn into_response(self) -> axum::response::Response {
        axum::response::Html(self.0).into_response()
    }
}

/// Conversion into safe markup
///
/// Safe strings pass through unchanged; plain strings are escaped.
pub trait IntoHtml {
    /// Convert into a [`SafeString`]
    fn into_html(self) -> SafeString;
}

impl IntoHtml for SafeString {
    fn into_html(self) -> SafeString {
        self
    }
}

impl IntoHtml for &SafeString {
    fn into_html(self) -> SafeString {
        self.clone()
    }
}

impl IntoHtml for &str {
    fn into_html(self) -> SafeString {
        SafeString::escape(self)
    }
}

impl IntoHtml for String {
    fn into_html(self) -> SafeString {
        SafeString::escape(&self)
    }
}

impl IntoHtml for &String {
    fn into_html(self) -> SafeString {
        SafeString::escape(self)
    }
}

impl<T: IntoHtml> IntoHtml for Option<T> {
    fn into_html(self) -> SafeString {
        self.map_or_else(SafeString::empty, IntoHtml::into_html)
    }
}

/// Escape a string for safe use in HTML content
///
/// # Examples
///
/// ```rust
/// use dry_crud::html::escape_html;
///
/// assert_eq!(escape_html("<script>alert('xss')</script>"),
///            "&lt;script&gt;alert('xss')&lt;/script&gt;");
/// assert_eq!(escape_html("Hello & goodbye"), "Hello &amp; goodbye");
/// ```
#[must_use]
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape a string for use in HTML attribute values
#[must_use]
pub fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Write ` name="value"` with the value attribute-escaped
pub fn write_attr(html: &mut String, name: &str, value: &str) {
    html.push(' ');
    html.push_str(name);
    html.push_str("=\"");
    html.push_str(&escape_attr(value));
    html.push('"');
}

fn open_tag(name: &str, attrs: &[(&str, &str)]) -> String {
    let mut html = String::with_capacity(32);
    html.push('<');
    html.push_str(name);
    for (attr, value) in attrs {
        write_attr(&mut html, attr, value);
    }
    html
}

/// Render `<name attrs>content</name>`
///
/// Attribute values are escaped; content follows [`IntoHtml`].
#[must_use]
pub fn content_tag(name: &str, attrs: &[(&str, &str)], content: impl IntoHtml) -> SafeString {
    let mut html = open_tag(name, attrs);
    html.push('>');
    html.push_str(content.into_html().as_str());
    html.push_str("</");
    html.push_str(name);
    html.push('>');
    SafeString(html)
}

/// Render a void element such as `<input ... />`
#[must_use]
pub fn tag(name: &str, attrs: &[(&str, &str)]) -> SafeString {
    let mut html = open_tag(name, attrs);
    html.push_str(" />");
    SafeString(html)
}

/// Render a link
#[must_use]
pub fn link_to(label: impl IntoHtml, href: &str) -> SafeString {
    content_tag("a", &[("href", href)], label)
}

/// Render a caption and a value as a labeled block
///
/// Empty content is replaced by [`EMPTY_STRING`].
///
/// ```rust
/// use dry_crud::html::labeled;
///
/// assert_eq!(
///     labeled("Name", "Jane & John").as_str(),
///     r#"<div class="labeled"><div class="caption">Name</div><div class="value">Jane &amp; John</div></div>"#
/// );
/// ```
#[must_use]
pub fn labeled(label: impl IntoHtml, content: impl IntoHtml) -> SafeString {
    let content = content.into_html();
    let content = if content.as_str().trim().is_empty() {
        SafeString::nbsp()
    } else {
        content
    };

    let mut html = SafeString::new(r#"<div class="labeled"><div class="caption">"#);
    html.push(&label.into_html());
    html.push(&SafeString::new(r#"</div><div class="value">"#));
    html.push(&content);
    html.push(&SafeString::new("</div></div>"));
    html
}
