//! Form rendering to HTML
//!
//! Renders form builders to HTML with proper escaping and validation
//! error display. Attributes are written in alphabetical order and each
//! visible field is wrapped in a labeled block on its own line.

use chrono::{Datelike, Local, Month, NaiveDate, NaiveTime, Timelike};

use super::builder::FormBuilder;
use super::error::ValidationErrors;
use super::field::{FieldKind, FormField, InputType, SelectOption};
use crate::config::{FormSettings, FormStyle};
use crate::html::{escape_html, labeled, write_attr, SafeString};

/// Options for customizing form rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormRenderOptions {
    /// Markup conventions
    pub style: FormStyle,
    /// Years shown before and after the selected year in date selects
    pub year_range: i32,
}

impl Default for FormRenderOptions {
    fn default() -> Self {
        Self {
            style: FormStyle::Current,
            year_range: 5,
        }
    }
}

impl From<&FormSettings> for FormRenderOptions {
    fn from(settings: &FormSettings) -> Self {
        Self {
            style: settings.style,
            year_range: settings.year_range,
        }
    }
}

type Attrs<'a> = Vec<(&'a str, String)>;

/// Renders forms to HTML
pub struct FormRenderer;

impl FormRenderer {
    /// Render a form to HTML
    #[must_use]
    pub fn render(form: &FormBuilder<'_>) -> SafeString {
        let mut html = String::with_capacity(1024);

        let mut attrs: Attrs<'_> = vec![
            ("action", form.action.clone()),
            ("method", form.method.clone()),
        ];
        if let Some(ref id) = form.id {
            attrs.push(("id", id.clone()));
        }
        if let Some(ref class) = form.class {
            attrs.push(("class", class.clone()));
        }
        for (name, value) in &form.custom_attrs {
            attrs.push((name, value.clone()));
        }
        Self::open_tag(&mut html, "form", attrs);
        html.push_str(">\n");

        Self::render_hidden_params(&mut html, form);

        let errors = form.errors.filter(|e| e.has_errors());
        if let Some(errors) = errors {
            Self::render_error_explanation(&mut html, form, errors);
        }

        for field in &form.fields {
            if field.is_hidden() {
                html.push_str(&Self::render_input(field, InputType::Hidden));
            } else {
                let field_markup = Self::render_field(field, form.options);
                let has_errors = errors.is_some_and(|e| e.has_field_error(field.attribute()));
                let mut label = Self::render_label(field);
                let mut control = SafeString::new(field_markup);
                if has_errors {
                    let class = form.options.style.field_error_class();
                    label = Self::wrap_error(class, &label);
                    control = Self::wrap_error(class, &control);
                }
                html.push_str(labeled(label, control).as_str());
            }
            html.push('\n');
        }

        if form.submit_text.is_some() || form.cancel.is_some() {
            html.push_str(labeled(SafeString::nbsp(), Self::render_buttons(form)).as_str());
            html.push('\n');
        }

        html.push_str("</form>");
        SafeString::new(html)
    }

    fn render_hidden_params(html: &mut String, form: &FormBuilder<'_>) {
        if form.method_override.is_none() && form.csrf_token.is_none() {
            return;
        }
        html.push_str(r#"<div style="margin:0;padding:0;display:inline">"#);
        if let Some(ref method) = form.method_override {
            Self::void_tag(html, "input", vec![
                ("name", "_method".to_string()),
                ("type", "hidden".to_string()),
                ("value", method.clone()),
            ]);
        }
        if let Some(ref token) = form.csrf_token {
            Self::void_tag(html, "input", vec![
                ("name", "_csrf_token".to_string()),
                ("type", "hidden".to_string()),
                ("value", token.clone()),
            ]);
        }
        html.push_str("</div>\n");
    }

    fn render_error_explanation(html: &mut String, form: &FormBuilder<'_>, errors: &ValidationErrors) {
        let (attr, value) = form.options.style.error_explanation_attr();
        let header = form.error_header.clone().unwrap_or_else(|| {
            let count = errors.count();
            let noun = if count == 1 { "error" } else { "errors" };
            format!("{count} {noun} prohibited this record from being saved")
        });

        Self::open_tag(html, "div", vec![(attr, value.to_string())]);
        html.push_str(">\n<h2>");
        html.push_str(&escape_html(&header));
        html.push_str("</h2>\n<ul>\n");
        for message in errors.full_messages() {
            html.push_str("<li>");
            html.push_str(&escape_html(&message));
            html.push_str("</li>\n");
        }
        html.push_str("</ul>\n</div>\n");
    }

    fn render_label(field: &FormField) -> SafeString {
        let Some(ref caption) = field.label else {
            return SafeString::empty();
        };
        let mut html = String::with_capacity(64);
        Self::open_tag(&mut html, "label", vec![("for", field.effective_id())]);
        html.push('>');
        html.push_str(caption.as_str());
        html.push_str("</label>");
        SafeString::new(html)
    }

    fn wrap_error(class: &str, markup: &SafeString) -> SafeString {
        if markup.is_empty() {
            return markup.clone();
        }
        let mut html = String::with_capacity(markup.as_str().len() + 40);
        Self::open_tag(&mut html, "div", vec![("class", class.to_string())]);
        html.push('>');
        html.push_str(markup.as_str());
        html.push_str("</div>");
        SafeString::new(html)
    }

    fn render_field(field: &FormField, options: FormRenderOptions) -> String {
        match &field.kind {
            FieldKind::Input(input_type) => Self::render_input(field, *input_type),
            FieldKind::Textarea { rows, cols } => Self::render_textarea(field, *rows, *cols),
            FieldKind::Select {
                options: opts,
                include_blank,
            } => Self::render_select(
                field,
                &field.name,
                field.effective_id(),
                opts,
                include_blank.as_deref(),
                field.value.as_deref(),
            ),
            FieldKind::Checkbox { checked } => Self::render_checkbox(field, *checked),
            FieldKind::DateSelect { value } => Self::render_date_select(field, *value, options),
            FieldKind::TimeSelect { value } => Self::render_time_select(field, *value),
            FieldKind::DateTimeSelect { value } => {
                let mut html = Self::render_date_select(field, value.map(|v| v.date()), options);
                html.push_str(" &mdash; ");
                html.push_str(&Self::render_time_select(field, value.map(|v| v.time())));
                html
            }
            FieldKind::Static(content) => content.as_str().to_string(),
        }
    }

    fn common_attrs(field: &FormField) -> Attrs<'_> {
        let mut attrs: Attrs<'_> = vec![("id", field.effective_id()), ("name", field.name.clone())];
        if let Some(ref class) = field.class {
            attrs.push(("class", class.clone()));
        }
        for (name, value) in &field.custom_attrs {
            attrs.push((name, value.clone()));
        }
        attrs
    }

    fn render_input(field: &FormField, input_type: InputType) -> String {
        let mut html = String::with_capacity(128);
        let mut attrs = if input_type == InputType::Hidden {
            vec![("name", field.name.clone())]
        } else {
            Self::common_attrs(field)
        };
        attrs.push(("type", input_type.as_str().to_string()));

        if let Some(ref value) = field.value {
            attrs.push(("value", value.clone()));
        }
        if let Some(len) = field.max_length {
            attrs.push(("maxlength", len.to_string()));
        }
        if let Some(ref step) = field.step {
            attrs.push(("step", step.clone()));
        }

        Self::void_tag(&mut html, "input", attrs);
        html
    }

    fn render_textarea(field: &FormField, rows: Option<u32>, cols: Option<u32>) -> String {
        let mut html = String::with_capacity(128);
        let mut attrs = Self::common_attrs(field);
        if let Some(r) = rows {
            attrs.push(("rows", r.to_string()));
        }
        if let Some(c) = cols {
            attrs.push(("cols", c.to_string()));
        }

        Self::open_tag(&mut html, "textarea", attrs);
        html.push('>');
        if let Some(ref value) = field.value {
            html.push_str(&escape_html(value));
        }
        html.push_str("</textarea>");
        html
    }

    fn render_select(
        field: &FormField,
        name: &str,
        id: String,
        opts: &[SelectOption],
        include_blank: Option<&str>,
        selected: Option<&str>,
    ) -> String {
        let mut html = String::with_capacity(256);
        let mut attrs = Self::common_attrs(field);
        attrs.retain(|(attr, _)| *attr != "id" && *attr != "name");
        attrs.push(("id", id));
        attrs.push(("name", name.to_string()));

        Self::open_tag(&mut html, "select", attrs);
        html.push_str(">\n");

        if let Some(blank) = include_blank {
            html.push_str(r#"<option value="">"#);
            html.push_str(&escape_html(blank));
            html.push_str("</option>\n");
        }
        for opt in opts {
            let mut attrs = vec![("value", opt.value.clone())];
            if selected == Some(opt.value.as_str()) {
                attrs.push(("selected", "selected".to_string()));
            }
            Self::open_tag(&mut html, "option", attrs);
            html.push('>');
            html.push_str(&escape_html(&opt.label));
            html.push_str("</option>\n");
        }

        html.push_str("</select>");
        html
    }

    fn render_checkbox(field: &FormField, checked: bool) -> String {
        let mut html = String::with_capacity(192);

        Self::void_tag(&mut html, "input", vec![
            ("name", field.name.clone()),
            ("type", "hidden".to_string()),
            ("value", "0".to_string()),
        ]);

        let mut attrs = Self::common_attrs(field);
        attrs.push(("type", "checkbox".to_string()));
        attrs.push(("value", "1".to_string()));
        if checked {
            attrs.push(("checked", "checked".to_string()));
        }
        Self::void_tag(&mut html, "input", attrs);
        html
    }

    fn render_date_select(
        field: &FormField,
        value: Option<NaiveDate>,
        options: FormRenderOptions,
    ) -> String {
        let blank = value.is_none().then_some("");
        let center = value.map_or_else(|| Local::now().year(), |d| d.year());

        let years: Vec<SelectOption> = (center - options.year_range..=center + options.year_range)
            .map(|y| SelectOption::new(y.to_string(), y.to_string()))
            .collect();
        let months: Vec<SelectOption> = (1u8..=12)
            .filter_map(|m| {
                Month::try_from(m)
                    .ok()
                    .map(|month| SelectOption::new(m.to_string(), month.name()))
            })
            .collect();
        let days: Vec<SelectOption> = (1..=31)
            .map(|d: u32| SelectOption::new(d.to_string(), d.to_string()))
            .collect();

        let parts = [
            (1, years, value.map(|d| d.year().to_string())),
            (2, months, value.map(|d| d.month().to_string())),
            (3, days, value.map(|d| d.day().to_string())),
        ];
        Self::render_parts(field, parts, blank, "\n")
    }

    fn render_time_select(field: &FormField, value: Option<NaiveTime>) -> String {
        let blank = value.is_none().then_some("");
        let hours: Vec<SelectOption> = (0..24)
            .map(|h: u32| SelectOption::new(format!("{h:02}"), format!("{h:02}")))
            .collect();
        let minutes: Vec<SelectOption> = (0..60)
            .map(|m: u32| SelectOption::new(format!("{m:02}"), format!("{m:02}")))
            .collect();

        let parts = [
            (4, hours, value.map(|t| format!("{:02}", t.hour()))),
            (5, minutes, value.map(|t| format!("{:02}", t.minute()))),
        ];
        Self::render_parts(field, parts, blank, " : ")
    }

    fn render_parts<const N: usize>(
        field: &FormField,
        parts: [(u8, Vec<SelectOption>, Option<String>); N],
        blank: Option<&str>,
        separator: &str,
    ) -> String {
        let base_id = field.effective_id();
        parts
            .iter()
            .map(|(part, opts, selected)| {
                Self::render_select(
                    field,
                    &field.part_name(*part),
                    format!("{base_id}_{part}i"),
                    opts,
                    blank,
                    selected.as_deref(),
                )
            })
            .collect::<Vec<_>>()
            .join(separator)
    }

    fn render_buttons(form: &FormBuilder<'_>) -> SafeString {
        let mut html = String::with_capacity(128);
        if let Some(ref text) = form.submit_text {
            Self::void_tag(&mut html, "input", vec![
                ("name", "commit".to_string()),
                ("type", "submit".to_string()),
                ("value", text.clone()),
            ]);
        }
        if let Some((ref label, ref url)) = form.cancel {
            if !html.is_empty() {
                html.push(' ');
            }
            Self::open_tag(&mut html, "a", vec![("href", url.clone())]);
            html.push('>');
            html.push_str(&escape_html(label));
            html.push_str("</a>");
        }
        SafeString::new(html)
    }

    fn open_tag(html: &mut String, name: &str, mut attrs: Attrs<'_>) {
        attrs.sort_by(|a, b| a.0.cmp(b.0));
        html.push('<');
        html.push_str(name);
        for (attr, value) in &attrs {
            write_attr(html, attr, value);
        }
    }

    fn void_tag(html: &mut String, name: &str, attrs: Attrs<'_>) {
        Self::open_tag(html, name, attrs);
        html.push_str(" />");
    }
}
