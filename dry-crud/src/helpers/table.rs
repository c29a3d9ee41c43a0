//! Table rendering for lists of entries

use crate::error::Result;
use crate::html::{content_tag, IntoHtml, SafeString};
use crate::model::Model;

use super::StandardHelper;

type CellRenderer<'h, T> = Box<dyn Fn(&T) -> Result<SafeString> + 'h>;

enum Header {
    Attr(String),
    Html(SafeString),
}

struct Column<'h, T> {
    header: Header,
    content: CellRenderer<'h, T>,
}

/// Builds a `<table class="list">` column by column
///
/// Attribute columns are captioned with the translated attribute name
/// and filled with [`StandardHelper::format_attr`]. Custom columns take
/// a header and a closure rendering one cell.
///
/// # Examples
///
/// ```rust
/// use dry_crud::config::DryCrudConfig;
/// use dry_crud::helpers::StandardHelper;
/// use dry_crud::html::SafeString;
/// use dry_crud::model::{Model, ModelName, Value};
///
/// struct City(&'static str);
///
/// impl Model for City {
///     fn model_name(&self) -> ModelName {
///         ModelName::from_type_name("City")
///     }
///
///     fn attribute(&self, name: &str) -> Option<Value> {
///         (name == "name").then(|| Value::from(self.0))
///     }
/// }
///
/// let helper = StandardHelper::new(DryCrudConfig::default());
/// let html = helper.table_with(&[City("Bern")], |t| {
///     t.attr("name")
///         .col("Length", |c: &City| SafeString::escape(&c.0.len().to_string()));
/// }).unwrap();
///
/// assert_eq!(
///     html.as_str(),
///     r#"<table class="list"><tr><th>Name</th><th>Length</th></tr><tr class="even"><td>Bern</td><td>4</td></tr></table>"#
/// );
/// ```
pub struct StandardTableBuilder<'h, T> {
    helper: &'h StandardHelper,
    cols: Vec<Column<'h, T>>,
}

impl<'h, T: Model + 'h> StandardTableBuilder<'h, T> {
    /// Create an empty builder
    #[must_use]
    pub const fn new(helper: &'h StandardHelper) -> Self {
        Self {
            helper,
            cols: Vec::new(),
        }
    }

    /// Build and render a table in one go
    ///
    /// # Errors
    ///
    /// Returns an error if a cell cannot be formatted
    pub fn table<F>(entries: &[T], helper: &'h StandardHelper, build: F) -> Result<SafeString>
    where
        F: FnOnce(&mut Self),
    {
        let mut builder = Self::new(helper);
        build(&mut builder);
        builder.render(entries)
    }

    /// Add one column per attribute
    pub fn attrs(&mut self, attrs: &[&str]) -> &mut Self {
        for attr in attrs {
            self.attr(attr);
        }
        self
    }

    /// Add a column showing a formatted attribute
    pub fn attr(&mut self, attr: &str) -> &mut Self {
        let helper = self.helper;
        let name = attr.to_string();
        self.cols.push(Column {
            header: Header::Attr(attr.to_string()),
            content: Box::new(move |entry: &T| helper.format_attr(entry, &name)),
        });
        self
    }

    /// Add a custom column
    pub fn col<F>(&mut self, header: impl IntoHtml, content: F) -> &mut Self
    where
        F: Fn(&T) -> SafeString + 'h,
    {
        self.cols.push(Column {
            header: Header::Html(header.into_html()),
            content: Box::new(move |entry: &T| Ok(content(entry))),
        });
        self
    }

    /// Render the table; rows start at `even`
    ///
    /// # Errors
    ///
    /// Returns an error if a cell cannot be formatted
    pub fn render(&self, entries: &[T]) -> Result<SafeString> {
        tracing::trace!(rows = entries.len(), cols = self.cols.len(), "rendering table");

        let mut html = SafeString::new(r#"<table class="list"><tr>"#);
        for col in &self.cols {
            let header = match col.header {
                Header::Html(ref header) => header.clone(),
                Header::Attr(ref attr) => entries.first().map_or_else(
                    || self.helper.captionize(attr),
                    |entry| self.helper.human_attribute_name(entry, attr),
                ),
            };
            html.push(&content_tag("th", &[], header));
        }
        html.push(&SafeString::new("</tr>"));

        self.helper.reset_cycle();
        for entry in entries {
            let cells = self
                .cols
                .iter()
                .map(|col| (col.content)(entry).map(|cell| content_tag("td", &[], cell)))
                .collect::<Result<SafeString>>()?;
            html.push(&self.helper.tr_alt(cells));
        }

        html.push(&SafeString::new("</table>"));
        Ok(html)
    }
}
