//! Integration tests for the standard view helpers
//!
//! Exercises formatting, tables, forms and translation lookups against a
//! model with one column of every supported type.

mod common;

use common::{CrudTestModel, Word};
use dry_crud::config::DryCrudConfig;
use dry_crud::forms::FormOptions;
use dry_crud::helpers::{StandardHelper, StandardTableBuilder};
use dry_crud::html::SafeString;
use dry_crud::i18n::{ControllerScope, Translations};
use dry_crud::model::{ColumnType, Model, Value};
use regex::Regex;

fn helper() -> StandardHelper {
    StandardHelper::new(DryCrudConfig::default())
}

fn helper_with_size_formatter() -> StandardHelper {
    let mut helper = helper();
    helper.register_formatter("size", |h, model| {
        Ok(SafeString::new(format!("{} chars", h.format_type(model, "size")?)))
    });
    helper
}

fn assert_matches(pattern: &str, html: &SafeString) {
    let re = Regex::new(pattern).unwrap();
    assert!(re.is_match(html.as_str()), "expected /{pattern}/ to match:\n{html}");
}

fn assert_no_match(pattern: &str, html: &SafeString) {
    let re = Regex::new(pattern).unwrap();
    assert!(!re.is_match(html.as_str()), "expected /{pattern}/ not to match:\n{html}");
}

// ---------------------------------------------------------------------------
// labeled / tr_alt
// ---------------------------------------------------------------------------

#[test]
fn test_labeled_text() {
    assert_eq!(
        helper().labeled("label", "value"),
        r#"<div class="labeled"><div class="caption">label</div><div class="value">value</div></div>"#
    );
}

#[test]
fn test_labeled_text_empty() {
    assert_eq!(
        helper().labeled("label", ""),
        r#"<div class="labeled"><div class="caption">label</div><div class="value">&nbsp;</div></div>"#
    );
}

#[test]
fn test_labeled_text_as_content() {
    assert_eq!(
        helper().labeled("label", "value <unsafe>"),
        r#"<div class="labeled"><div class="caption">label</div><div class="value">value &lt;unsafe&gt;</div></div>"#
    );
}

#[test]
fn test_labeled_attr_uses_custom_formatter() {
    let html = helper_with_size_formatter()
        .labeled_attr(&Word("foo"), "size")
        .unwrap();
    assert_eq!(
        html,
        r#"<div class="labeled"><div class="caption">Size</div><div class="value">3 chars</div></div>"#
    );
}

#[test]
fn test_alternate_rows() {
    let helper = helper();
    let first = helper.tr_alt(SafeString::new("(test row content)"));
    let second = helper.tr_alt(SafeString::new("(test row content)"));
    assert_eq!(first, r#"<tr class="even">(test row content)</tr>"#);
    assert_eq!(second, r#"<tr class="odd">(test row content)</tr>"#);
}

// ---------------------------------------------------------------------------
// f / format_attr
// ---------------------------------------------------------------------------

#[test]
fn test_format_integers() {
    let helper = helper();
    assert_eq!(helper.f(0), "0");
    assert_eq!(helper.f(10), "10");
    assert_eq!(helper.f(10_000_000), "10,000,000");
}

#[test]
#[allow(clippy::approx_constant)]
fn test_format_floats() {
    let helper = helper();
    assert_eq!(helper.f(1.0), "1.00");
    assert_eq!(helper.f(1.2), "1.20");
    assert_eq!(helper.f(3.14159), "3.14");
    assert_eq!(helper.f(1.23456), "1.23");
}

#[test]
fn test_format_booleans() {
    let helper = helper();
    assert_eq!(helper.f(true), "yes");
    assert_eq!(helper.f(false), "no");
}

#[test]
fn test_format_nil() {
    assert!(helper().f(Value::Nil).is_empty());
    assert!(helper().f(None::<i64>).is_empty());
}

#[test]
fn test_format_strings_are_escaped() {
    let helper = helper();
    assert_eq!(helper.f("blah blah"), "blah blah");
    assert_eq!(helper.f("<injection>"), "&lt;injection&gt;");
}

#[test]
fn test_format_attr_falls_through_to_value() {
    assert_eq!(helper().format_attr(&Word("12.23424"), "to_f").unwrap(), "12.23");
}

#[test]
fn test_format_attr_with_custom_formatter() {
    let html = helper_with_size_formatter()
        .format_attr(&Word("abcd"), "size")
        .unwrap();
    assert_eq!(html, "4 chars");
}

#[test]
fn test_format_attr_of_association_without_record() {
    let model = CrudTestModel::aaaaa();
    assert_eq!(helper().format_attr(&model, "companion").unwrap(), "&nbsp;");
}

#[test]
fn test_format_attr_of_association_links_record() {
    let mut model = CrudTestModel::aaaaa();
    model.companion_id = Some(2);
    assert_eq!(
        helper().format_attr(&model, "companion").unwrap(),
        r#"<a href="/crud_test_models/2">Companion 2</a>"#
    );
}

// ---------------------------------------------------------------------------
// column types
// ---------------------------------------------------------------------------

#[test]
fn test_column_types() {
    let helper = helper();
    let m = CrudTestModel::aaaaa();
    assert_eq!(helper.column_type(&m, "name"), Some(ColumnType::String));
    assert_eq!(helper.column_type(&m, "children"), Some(ColumnType::Integer));
    assert_eq!(helper.column_type(&m, "companion_id"), Some(ColumnType::Integer));
    assert_eq!(helper.column_type(&m, "companion"), None);
    assert_eq!(helper.column_type(&m, "rating"), Some(ColumnType::Float));
    assert_eq!(helper.column_type(&m, "income"), Some(ColumnType::Decimal));
    assert_eq!(helper.column_type(&m, "birthdate"), Some(ColumnType::Date));
    assert_eq!(helper.column_type(&m, "gets_up_at"), Some(ColumnType::Time));
    assert_eq!(helper.column_type(&m, "last_seen"), Some(ColumnType::DateTime));
    assert_eq!(helper.column_type(&m, "human"), Some(ColumnType::Boolean));
    assert_eq!(helper.column_type(&m, "remarks"), Some(ColumnType::Text));
}

// ---------------------------------------------------------------------------
// format_type
// ---------------------------------------------------------------------------

#[test]
fn test_format_integer_column() {
    let helper = helper();
    let mut m = CrudTestModel::aaaaa();
    assert_eq!(helper.format_type(&m, "children").unwrap(), "9");

    m.children = Some(10_000);
    assert_eq!(helper.format_type(&m, "children").unwrap(), "10,000");
}

#[test]
fn test_format_float_column() {
    let helper = helper();
    let mut m = CrudTestModel::aaaaa();
    assert_eq!(helper.format_type(&m, "rating").unwrap(), "1.10");

    m.rating = Some(3.145_001);
    assert_eq!(helper.format_type(&m, "rating").unwrap(), "3.15");
}

#[test]
fn test_format_decimal_column() {
    let m = CrudTestModel::aaaaa();
    assert_eq!(helper().format_type(&m, "income").unwrap(), "10000000.10");
}

#[test]
fn test_format_date_column() {
    let m = CrudTestModel::aaaaa();
    assert_eq!(helper().format_type(&m, "birthdate").unwrap(), "1910-01-01");
}

#[test]
fn test_format_time_column() {
    let m = CrudTestModel::aaaaa();
    assert_eq!(helper().format_type(&m, "gets_up_at").unwrap(), "01:01");
}

#[test]
fn test_format_datetime_column() {
    let m = CrudTestModel::aaaaa();
    assert_eq!(helper().format_type(&m, "last_seen").unwrap(), "2010-01-01 11:21");
}

#[test]
fn test_format_text_column() {
    let m = CrudTestModel::aaaaa();
    assert_eq!(
        helper().format_type(&m, "remarks").unwrap(),
        "<p>AAAAA BBBBB CCCCC\n<br />AAAAA BBBBB CCCCC\n</p>"
    );
}

#[test]
fn test_format_text_column_keeps_rich_text() {
    let mut m = CrudTestModel::aaaaa();
    m.remarks = Some("<b>bold</b>\nnext<script>alert(1)</script>".to_string());
    let html = helper().format_type(&m, "remarks").unwrap();
    assert!(html.as_str().contains("<b>bold</b>"));
    assert!(!html.as_str().contains("script"));
}

#[test]
fn test_format_nil_column() {
    let m = CrudTestModel::new_record();
    assert!(helper().format_type(&m, "birthdate").unwrap().is_empty());
}

#[test]
fn test_format_unknown_attribute_fails() {
    let m = CrudTestModel::aaaaa();
    assert!(helper().format_type(&m, "shoe_size").is_err());
}

// ---------------------------------------------------------------------------
// tables
// ---------------------------------------------------------------------------

#[test]
fn test_empty_table_renders_message() {
    let entries: [Word; 0] = [];
    assert_eq!(
        helper().table_with(&entries, |_| {}).unwrap(),
        r#"<div class="list">No entries found.</div>"#
    );
}

#[test]
fn test_empty_table_message_is_translated() {
    let helper = helper().with_translations(
        Translations::new().with("global.no_list_entries", "Nothing here."),
    );
    let entries: [Word; 0] = [];
    assert_eq!(
        helper.table(&entries, &["size"]).unwrap(),
        r#"<div class="list">Nothing here.</div>"#
    );
}

#[test]
fn test_non_empty_table_renders_table() {
    let html = helper()
        .table_with(&[Word("foo"), Word("bar")], |t| {
            t.attrs(&["size", "upcase"]);
        })
        .unwrap();
    assert_matches(r"^<table.*</table>$", &html);
}

#[test]
fn test_table_with_attrs() {
    let helper = helper();
    let words = [Word("foo"), Word("bar")];
    let expected = StandardTableBuilder::table(&words, &helper, |t| {
        t.attrs(&["size", "upcase"]);
    })
    .unwrap();
    let actual = helper.table(&words, &["size", "upcase"]).unwrap();
    assert_eq!(expected, actual);
}

#[test]
fn test_table_uses_custom_formatters() {
    let html = helper_with_size_formatter()
        .table(&[Word("foo")], &["size"])
        .unwrap();
    assert!(html.as_str().contains("<td>3 chars</td>"));
}

#[test]
fn test_table_headers_use_translated_attribute_names() {
    let helper = helper().with_translations(
        Translations::new().with("activerecord.attributes.crud_test_model.children", "Kids"),
    );
    let html = helper
        .table(&[CrudTestModel::aaaaa()], &["name", "children"])
        .unwrap();
    assert!(html.as_str().starts_with(
        r#"<table class="list"><tr><th>Name</th><th>Kids</th></tr><tr class="even"><td>AAAAA</td><td>9</td></tr>"#
    ));
}

// ---------------------------------------------------------------------------
// captionize
// ---------------------------------------------------------------------------

#[test]
fn test_captionize() {
    let helper = helper();
    assert_eq!(helper.captionize("camel_case"), "Camel Case");
    assert_eq!(helper.captionize("all upper case"), "All Upper Case");
    assert_eq!(helper.captionize("With object"), "With Object");
    assert_eq!(helper.captionize("first.name"), "First Name");
    assert_eq!(helper.captionize("price/unit"), "Price Unit");
    assert_eq!(helper.captionize("bad <title>"), "Bad Title");
}

// ---------------------------------------------------------------------------
// standard_form
// ---------------------------------------------------------------------------

const FORM_ATTRS: [&str; 4] = ["name", "children", "birthdate", "human"];

#[test]
fn test_standard_form_for_existing_entry() {
    let e = CrudTestModel::aaaaa();
    let f = helper().standard_form(&e, &FORM_ATTRS, FormOptions::default().class("special"));

    assert_matches(r#"form .*?action="/crud_test_models/1" .*?method="post""#, &f);
    assert_matches(r#"input .*?name="_method" .*?type="hidden" .*?value="put""#, &f);
    assert_matches(r#"input .*?name="crud_test_model\[name\]" .*?type="text" .*?value="AAAAA""#, &f);
    assert_matches(r#"select .*?name="crud_test_model\[birthdate\(1i\)\]""#, &f);
    assert_matches(r#"option selected="selected" value="1910">1910</option>"#, &f);
    assert_matches(r#"option selected="selected" value="1">January</option>"#, &f);
    assert_matches(r#"option selected="selected" value="1">1</option>"#, &f);
    assert_matches(r#"input .*?name="crud_test_model\[children\]" .*?type="number" .*?value="9""#, &f);
    assert_matches(r#"input .*?name="crud_test_model\[human\]" .*?type="checkbox""#, &f);
    assert_matches(r#"input .*?type="submit" .*?value="Save""#, &f);
}

#[test]
fn test_standard_form_for_new_entry() {
    let e = CrudTestModel::new_record();
    let f = helper().standard_form(&e, &FORM_ATTRS, FormOptions::default().class("special"));

    assert_matches(r#"form .*?action="/crud_test_models" .?class="special" .*?method="post""#, &f);
    assert_matches(r#"input .*?name="crud_test_model\[name\]" .*?type="text""#, &f);
    assert_no_match(r#"input .*?name="crud_test_model\[name\]" .*?type="text" .*?value="#, &f);
    assert_matches(r#"select .*?name="crud_test_model\[birthdate\(1i\)\]""#, &f);
    assert_matches(r#"input .*?name="crud_test_model\[children\]" .*?type="number""#, &f);
    assert_no_match(r#"input .*?name="crud_test_model\[children\]" .*?type="text" .*?value="#, &f);
    assert_no_match(r#"name="_method""#, &f);
    assert_matches(r#"input .*?type="submit" .*?value="Save""#, &f);
}

#[test]
fn test_standard_form_with_errors() {
    let mut e = CrudTestModel::aaaaa();
    e.name = None;
    assert!(e.errors().has_errors());

    let f = helper().standard_form(&e, &FORM_ATTRS, FormOptions::default());

    assert_matches(r#"form .*?action="/crud_test_models/1" .*?method="post""#, &f);
    assert_matches(r#"input .*?name="_method" .*?type="hidden" .*?value="put""#, &f);
    assert_matches(r#"div id="error_explanation""#, &f);
    assert_matches(r"<li>Name can't be blank</li>", &f);
    assert_matches(
        r#"div class="field_with_errors">.*?<input .*?name="crud_test_model\[name\]" .*?type="text""#,
        &f,
    );
    assert_matches(r#"select .*?name="crud_test_model\[birthdate\(1i\)\]""#, &f);
    assert_matches(r#"option selected="selected" value="1910">1910</option>"#, &f);
    assert_matches(r#"option selected="selected" value="1">January</option>"#, &f);
    assert_matches(r#"option selected="selected" value="1">1</option>"#, &f);
    assert_matches(r#"input .*?name="crud_test_model\[children\]" .*?type="number" .*?value="9""#, &f);
    assert_matches(r#"input .*?name="crud_test_model\[human\]" .*?type="checkbox""#, &f);
    assert_matches(r#"input .*?type="submit" .*?value="Save""#, &f);
}

#[test]
fn test_standard_form_error_header_is_translated() {
    let mut e = CrudTestModel::aaaaa();
    e.name = None;
    let helper = helper().with_translations(
        Translations::new().with("global.errors.header", "%{count} problems with this %{model}"),
    );
    let f = helper.standard_form(&e, &["name"], FormOptions::default());
    assert_matches(r"<h2>1 problems with this crud test model</h2>", &f);
}

#[test]
fn test_standard_form_association_select() {
    let mut e = CrudTestModel::aaaaa();
    e.companion_id = Some(3);
    let f = helper().standard_form(&e, &["companion"], FormOptions::default());

    assert_matches(r#"select .*?name="crud_test_model\[companion_id\]""#, &f);
    assert_matches(r#"<option value="">Please select</option>"#, &f);
    assert_matches(r#"<option value="2">BBBBB</option>"#, &f);
    assert_matches(r#"option selected="selected" value="3">CCCCC</option>"#, &f);
}

#[test]
fn test_standard_form_association_select_translated_per_association() {
    let e = CrudTestModel::aaaaa();
    let helper = helper().with_translations(
        Translations::new()
            .with("global.associations.please_select", "Bitte wählen")
            .with(
                "activerecord.associations.models.crud_test_model.companion.please_select",
                "Choose a companion",
            ),
    );
    let f = helper.standard_form(&e, &["companion"], FormOptions::default());

    assert_matches(r#"<option value="">Choose a companion</option>"#, &f);
    assert_no_match("Bitte wählen", &f);
}

#[test]
fn test_standard_form_association_select_global_translation() {
    let e = CrudTestModel::aaaaa();
    let helper = helper().with_translations(
        Translations::new().with("global.associations.please_select", "Bitte wählen"),
    );
    let f = helper.standard_form(&e, &["companion"], FormOptions::default());

    assert_matches(r#"<option value="">Bitte wählen</option>"#, &f);
}

#[test]
fn test_standard_form_translated_labels() {
    let e = CrudTestModel::aaaaa();
    let helper = helper().with_translations(
        Translations::new()
            .with("global.button.save", "Speichern")
            .with("global.button.cancel", "Abbrechen")
            .with("attributes.crud_test_model.children", "Kinder"),
    );
    let f = helper.standard_form(
        &e,
        &["children"],
        FormOptions::default().cancel_url("/crud_test_models"),
    );

    assert_matches(r#"<label for="crud_test_model_children">Kinder</label>"#, &f);
    assert_matches(r#"input .*?type="submit" .*?value="Speichern""#, &f);
    assert_matches(r#"<a href="/crud_test_models">Abbrechen</a>"#, &f);
}

#[test]
fn test_standard_form_text_column_is_textarea() {
    let e = CrudTestModel::aaaaa();
    let f = helper().standard_form(&e, &["remarks"], FormOptions::default());
    assert_matches(r#"<textarea .*?name="crud_test_model\[remarks\]""#, &f);
    assert_matches(r"AAAAA BBBBB CCCCC", &f);
}

// ---------------------------------------------------------------------------
// translations
// ---------------------------------------------------------------------------

fn scoped(translations: &Translations) -> StandardHelper {
    helper()
        .with_translations(translations.clone())
        .with_scope(ControllerScope::new(["crud_test_models", "crud", "list"], "index"))
}

#[test]
fn test_translate_inheritable_lookup() {
    let mut t = Translations::new();
    assert_eq!(scoped(&t).ti("test_key"), None);

    let steps = [
        ("global.test_key", "global"),
        ("list.global.test_key", "list global"),
        ("list.index.test_key", "list index"),
        ("crud.global.test_key", "crud global"),
        ("crud.index.test_key", "crud index"),
        ("crud_test_models.global.test_key", "test global"),
        ("crud_test_models.index.test_key", "test index"),
    ];
    for (key, value) in steps {
        t.insert(key, value);
        assert_eq!(scoped(&t).ti("test_key").as_deref(), Some(value), "after storing {key}");
    }
}

#[test]
fn test_translate_inheritable_lookup_without_scope() {
    let helper = helper().with_translations(
        Translations::new()
            .with("crud.index.test_key", "crud index")
            .with("global.test_key", "global"),
    );
    assert_eq!(helper.ti("test_key").as_deref(), Some("global"));
}

#[test]
fn test_translate_association_lookup() {
    let model = CrudTestModel::aaaaa();
    let assoc = model.association("companion").unwrap();
    let mut t = Translations::new();

    t.insert("global.associations.test_key", "global");
    let h = helper().with_translations(t.clone());
    assert_eq!(h.ta("test_key", Some(&assoc)).as_deref(), Some("global"));

    t.insert("activerecord.associations.crud_test_model.test_key", "model");
    let h = helper().with_translations(t.clone());
    assert_eq!(h.ta("test_key", Some(&assoc)).as_deref(), Some("model"));

    t.insert(
        "activerecord.associations.models.crud_test_model.companion.test_key",
        "companion",
    );
    let h = helper().with_translations(t);
    assert_eq!(h.ta("test_key", Some(&assoc)).as_deref(), Some("companion"));
    assert_eq!(h.ta("test_key", None).as_deref(), Some("global"));
}

#[test]
fn test_translated_booleans() {
    let helper = helper().with_translations(
        Translations::new()
            .with("global.yes", "ja")
            .with("global.no", "nein"),
    );
    assert_eq!(helper.f(true), "ja");
    assert_eq!(helper.f(false), "nein");
}
