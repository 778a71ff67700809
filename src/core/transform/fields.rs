//! Field mapping from Notion property values to frontmatter values

use crate::domain::{ExportError, FrontmatterDocument, FrontmatterValue, Page, PropertyValue, Result};

/// Placeholder written for empty values: two double quotes
pub const EMPTY_VALUE: &str = "\"\"";

/// Written for a number property without a value
const NULL_NUMBER: &str = "null";

fn empty() -> String {
    EMPTY_VALUE.to_string()
}

/// Map one property value to its frontmatter value
///
/// Returns `None` for property kinds that never appear in frontmatter
/// (formulas, relations, people, ...).
///
/// # Examples
///
/// ```
/// use n2md::core::transform::map_property;
/// use n2md::domain::{FrontmatterValue, PropertyValue, SelectOption};
///
/// let tags = PropertyValue::MultiSelect(vec![SelectOption::new("A"), SelectOption::new("B")]);
/// assert_eq!(map_property(&tags).unwrap().to_string(), "[A, B]");
///
/// assert_eq!(
///     map_property(&PropertyValue::Checkbox(true)),
///     Some(FrontmatterValue::Bool(true))
/// );
/// ```
pub fn map_property(value: &PropertyValue) -> Option<FrontmatterValue> {
    let mapped = match value {
        PropertyValue::Title(runs) | PropertyValue::RichText(runs) => FrontmatterValue::Text(
            runs.first()
                .map(|run| run.plain_text.clone())
                .unwrap_or_else(empty),
        ),
        PropertyValue::Number(Some(number)) => FrontmatterValue::Number(number.clone()),
        PropertyValue::Number(None) => FrontmatterValue::Text(NULL_NUMBER.to_string()),
        PropertyValue::Checkbox(checked) => FrontmatterValue::Bool(*checked),
        PropertyValue::Url(url) => FrontmatterValue::Text(url.clone().unwrap_or_else(empty)),
        PropertyValue::Date(date) => FrontmatterValue::Text(
            date.as_ref()
                .map(|d| format!("\"{}\"", d.start))
                .unwrap_or_else(empty),
        ),
        PropertyValue::MultiSelect(options) => {
            FrontmatterValue::List(options.iter().map(|o| o.name.clone()).collect())
        }
        PropertyValue::Select(option) => FrontmatterValue::Text(
            option
                .as_ref()
                .map(|o| o.name.clone())
                .unwrap_or_else(empty),
        ),
        PropertyValue::Other { .. } => return None,
    };
    Some(mapped)
}

/// Build the frontmatter of a page
///
/// With `columns`, entries follow the configured order; otherwise every
/// property of the page is mapped in page order.
///
/// # Errors
///
/// Returns [`ExportError::ColumnNotFound`] when a configured column does not
/// exist on the page.
pub fn build_frontmatter(page: &Page, columns: Option<&[String]>) -> Result<FrontmatterDocument> {
    let mut document = FrontmatterDocument::new();

    let mut add = |name: &str, value: &PropertyValue| match map_property(value) {
        Some(mapped) => document.insert(name, mapped),
        None => tracing::trace!(
            page_id = %page.id,
            column = %name,
            kind = %value.kind(),
            "Property kind has no frontmatter rendering"
        ),
    };

    match columns {
        Some(columns) => {
            for column in columns {
                let value = page.property(column).ok_or_else(|| ExportError::ColumnNotFound {
                    page_id: page.id.to_string(),
                    column: column.clone(),
                })?;
                add(column, value);
            }
        }
        None => {
            for property in &page.properties {
                add(&property.name, &property.value);
            }
        }
    }

    Ok(document)
}

/// Title of a page: the first rich-text run of the title column
///
/// # Errors
///
/// Returns [`ExportError::MissingTitle`] when the column is absent, not a
/// text property, or has no runs.
pub fn read_title<'a>(page: &'a Page, column: &str) -> Result<&'a str> {
    page.title(column).ok_or_else(|| {
        ExportError::MissingTitle {
            page_id: page.id.to_string(),
            column: column.to_string(),
        }
        .into()
    })
}
