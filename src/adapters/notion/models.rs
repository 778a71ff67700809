//! Notion API models
//!
//! Request and response structures of the Notion REST API, kept separate from
//! the domain model. Property values and blocks are carried as raw JSON and
//! converted with `to_domain`.

use crate::domain::{
    Block, BlockContent, DateRange, NotionError, Page, PageId, Property, PropertyValue, Result,
    RichText, SelectOption,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Cursor-paginated list response
#[derive(Debug, Clone, Deserialize)]
pub struct PaginatedList<T> {
    pub results: Vec<T>,

    #[serde(default)]
    pub has_more: bool,

    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// Body of `POST /v1/databases/{id}/query`
#[derive(Debug, Clone, Serialize)]
pub struct QueryRequest {
    pub page_size: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,
}

/// Error body returned with non-2xx responses
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: String,

    #[serde(default)]
    pub message: String,
}

/// Database metadata from `GET /v1/databases/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseObject {
    pub id: String,

    #[serde(default)]
    pub title: Vec<RichText>,

    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl DatabaseObject {
    /// Concatenated plain text of the database title
    pub fn title_text(&self) -> String {
        self.title.iter().map(|t| t.plain_text.as_str()).collect()
    }

    /// Column names with their property types, in API order
    pub fn columns(&self) -> Vec<(String, String)> {
        self.properties
            .iter()
            .map(|(name, schema)| {
                let kind = schema
                    .get("type")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown")
                    .to_string();
                (name.clone(), kind)
            })
            .collect()
    }
}

/// A page object as returned by database queries
#[derive(Debug, Clone, Deserialize)]
pub struct PageObject {
    pub id: String,

    #[serde(default)]
    pub url: Option<String>,

    /// Property values keyed by column name (object order preserved)
    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl PageObject {
    /// Convert to the domain Page
    ///
    /// # Errors
    ///
    /// Returns an error if the id is blank or a property value is malformed.
    pub fn to_domain(&self) -> Result<Page> {
        let id = PageId::new(self.id.as_str()).map_err(NotionError::InvalidResponse)?;

        let mut page = Page::new(id);
        page.url = self.url.clone();
        for (name, value) in &self.properties {
            page.properties.push(Property {
                name: name.clone(),
                value: property_from_json(name, value)?,
            });
        }
        Ok(page)
    }
}

/// Converts one raw property value (`{"type": "...", "<type>": payload}`)
pub fn property_from_json(name: &str, value: &Value) -> Result<PropertyValue> {
    let kind = value.get("type").and_then(Value::as_str).ok_or_else(|| {
        NotionError::InvalidResponse(format!("property '{name}' has no type"))
    })?;
    let payload = value.get(kind).cloned().unwrap_or(Value::Null);

    let parsed = match kind {
        "title" => PropertyValue::Title(parse_payload(name, payload)?),
        "rich_text" => PropertyValue::RichText(parse_payload(name, payload)?),
        "number" => PropertyValue::Number(match payload {
            Value::Number(n) => Some(n),
            _ => None,
        }),
        "checkbox" => PropertyValue::Checkbox(payload.as_bool().unwrap_or(false)),
        "url" => PropertyValue::Url(payload.as_str().map(String::from)),
        "date" => PropertyValue::Date(parse_payload::<Option<DateRange>>(name, payload)?),
        "multi_select" => PropertyValue::MultiSelect(parse_payload(name, payload)?),
        "select" => PropertyValue::Select(parse_payload::<Option<SelectOption>>(name, payload)?),
        other => PropertyValue::Other {
            kind: other.to_string(),
        },
    };
    Ok(parsed)
}

fn parse_payload<T: DeserializeOwned + Default>(name: &str, payload: Value) -> Result<T> {
    if payload.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(payload).map_err(|e| {
        NotionError::InvalidResponse(format!("malformed value for property '{name}': {e}")).into()
    })
}

/// A block object from `GET /v1/blocks/{id}/children`
#[derive(Debug, Clone, Deserialize)]
pub struct BlockObject {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub has_children: bool,

    /// Remaining fields, including the type-specific payload
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl BlockObject {
    /// Whether the children of this block belong to the page body
    ///
    /// Child pages and child databases are separate documents.
    pub fn should_descend(&self) -> bool {
        self.has_children && self.kind != "child_page" && self.kind != "child_database"
    }

    /// Convert to a domain Block without children
    pub fn to_domain(&self) -> Block {
        Block::new(self.id.clone(), self.content())
    }

    fn content(&self) -> BlockContent {
        let payload = self.rest.get(&self.kind).cloned().unwrap_or(Value::Null);
        let text = || rich_text_field(&payload, "rich_text");

        match self.kind.as_str() {
            "paragraph" => BlockContent::Paragraph(text()),
            "heading_1" => BlockContent::Heading {
                level: 1,
                text: text(),
            },
            "heading_2" => BlockContent::Heading {
                level: 2,
                text: text(),
            },
            "heading_3" => BlockContent::Heading {
                level: 3,
                text: text(),
            },
            "bulleted_list_item" => BlockContent::BulletedListItem(text()),
            "numbered_list_item" => BlockContent::NumberedListItem(text()),
            "to_do" => BlockContent::ToDo {
                text: text(),
                checked: payload
                    .get("checked")
                    .and_then(Value::as_bool)
                    .unwrap_or(false),
            },
            "toggle" => BlockContent::Toggle(text()),
            "quote" => BlockContent::Quote(text()),
            "callout" => BlockContent::Callout {
                text: text(),
                icon: payload
                    .get("icon")
                    .and_then(|icon| icon.get("emoji"))
                    .and_then(Value::as_str)
                    .map(String::from),
            },
            "code" => BlockContent::Code {
                text: text(),
                language: string_field(&payload, "language"),
            },
            "equation" => BlockContent::Equation(string_field(&payload, "expression")),
            "divider" => BlockContent::Divider,
            "image" => BlockContent::Image {
                url: file_url(&payload),
                caption: rich_text_field(&payload, "caption"),
            },
            "bookmark" | "embed" | "link_preview" => BlockContent::Link {
                url: string_field(&payload, "url"),
                caption: rich_text_field(&payload, "caption"),
            },
            "video" | "file" | "pdf" | "audio" => BlockContent::Link {
                url: file_url(&payload),
                caption: rich_text_field(&payload, "caption"),
            },
            "child_page" => BlockContent::ChildPage(string_field(&payload, "title")),
            "table" => BlockContent::Table {
                has_column_header: payload
                    .get("has_column_header")
                    .and_then(Value::as_bool)
                    .unwrap_or(false),
            },
            "table_row" => BlockContent::TableRow(
                payload
                    .get("cells")
                    .cloned()
                    .and_then(|cells| serde_json::from_value(cells).ok())
                    .unwrap_or_default(),
            ),
            other => BlockContent::Unsupported(other.to_string()),
        }
    }
}

fn rich_text_field(payload: &Value, key: &str) -> Vec<RichText> {
    payload
        .get(key)
        .cloned()
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default()
}

fn string_field(payload: &Value, key: &str) -> String {
    payload
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// URL of a file object (`{"type": "external", "external": {"url": ...}}`)
fn file_url(payload: &Value) -> String {
    payload
        .get("type")
        .and_then(Value::as_str)
        .and_then(|kind| payload.get(kind))
        .and_then(|file| file.get("url"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rich(text: &str) -> Value {
        json!({
            "type": "text",
            "text": { "content": text, "link": null },
            "annotations": { "bold": false, "italic": false, "strikethrough": false,
                             "underline": false, "code": false, "color": "default" },
            "plain_text": text,
            "href": null
        })
    }

    #[test]
    fn test_page_to_domain_keeps_property_order() {
        let raw = json!({
            "object": "page",
            "id": "59833787-2cf9-4fdf-8782-e53db20768a5",
            "url": "https://www.notion.so/Hello-598337872cf94fdf8782e53db20768a5",
            "properties": {
                "title": { "id": "title", "type": "title", "title": [rich("Hello World")] },
                "Count": { "id": "a", "type": "number", "number": 3 },
                "Draft": { "id": "b", "type": "checkbox", "checkbox": true },
                "Tags": { "id": "c", "type": "multi_select",
                          "multi_select": [{ "id": "1", "name": "A", "color": "red" },
                                           { "id": "2", "name": "B", "color": "blue" }] },
                "Author": { "id": "d", "type": "people", "people": [] }
            }
        });

        let page: PageObject = serde_json::from_value(raw).unwrap();
        let page = page.to_domain().unwrap();

        let names: Vec<&str> = page.property_names().collect();
        assert_eq!(names, vec!["title", "Count", "Draft", "Tags", "Author"]);
        assert_eq!(page.title("title"), Some("Hello World"));
        assert_eq!(
            page.property("Count"),
            Some(&PropertyValue::Number(Some(3.into())))
        );
        assert_eq!(page.property("Draft"), Some(&PropertyValue::Checkbox(true)));
        assert_eq!(
            page.property("Tags"),
            Some(&PropertyValue::MultiSelect(vec![
                SelectOption {
                    name: "A".to_string(),
                    color: Some("red".to_string())
                },
                SelectOption {
                    name: "B".to_string(),
                    color: Some("blue".to_string())
                },
            ]))
        );
        assert_eq!(
            page.property("Author"),
            Some(&PropertyValue::Other {
                kind: "people".to_string()
            })
        );
    }

    #[test]
    fn test_null_payloads() {
        assert_eq!(
            property_from_json("d", &json!({ "type": "date", "date": null })).unwrap(),
            PropertyValue::Date(None)
        );
        assert_eq!(
            property_from_json("s", &json!({ "type": "select", "select": null })).unwrap(),
            PropertyValue::Select(None)
        );
        assert_eq!(
            property_from_json("u", &json!({ "type": "url", "url": null })).unwrap(),
            PropertyValue::Url(None)
        );
        assert_eq!(
            property_from_json("n", &json!({ "type": "number", "number": null })).unwrap(),
            PropertyValue::Number(None)
        );
    }

    #[test]
    fn test_date_payload() {
        let value = property_from_json(
            "Date",
            &json!({ "type": "date", "date": { "start": "2023-01-15", "end": null, "time_zone": null } }),
        )
        .unwrap();
        assert_eq!(
            value,
            PropertyValue::Date(Some(DateRange {
                start: "2023-01-15".to_string(),
                end: None,
                time_zone: None,
            }))
        );
    }

    #[test]
    fn test_property_without_type_is_error() {
        assert!(property_from_json("x", &json!({ "id": "x" })).is_err());
    }

    #[test]
    fn test_malformed_payload_is_error() {
        let result = property_from_json("Tags", &json!({ "type": "multi_select", "multi_select": "oops" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_block_conversion() {
        let raw = json!({
            "object": "block",
            "id": "b1",
            "type": "to_do",
            "has_children": false,
            "to_do": { "rich_text": [rich("Ship it")], "checked": true, "color": "default" }
        });
        let block: BlockObject = serde_json::from_value(raw).unwrap();
        assert_eq!(
            block.to_domain().content,
            BlockContent::ToDo {
                text: vec![RichText::plain("Ship it")],
                checked: true
            }
        );
    }

    #[test]
    fn test_image_block_file_url() {
        let raw = json!({
            "id": "img",
            "type": "image",
            "has_children": false,
            "image": { "type": "external", "external": { "url": "https://example.com/a.png" },
                       "caption": [rich("A cat")] }
        });
        let block: BlockObject = serde_json::from_value(raw).unwrap();
        assert_eq!(
            block.to_domain().content,
            BlockContent::Image {
                url: "https://example.com/a.png".to_string(),
                caption: vec![RichText::plain("A cat")]
            }
        );
    }

    #[test]
    fn test_child_page_is_not_descended() {
        let raw = json!({
            "id": "cp",
            "type": "child_page",
            "has_children": true,
            "child_page": { "title": "Sub page" }
        });
        let block: BlockObject = serde_json::from_value(raw).unwrap();
        assert!(!block.should_descend());
        assert_eq!(
            block.to_domain().content,
            BlockContent::ChildPage("Sub page".to_string())
        );
    }

    #[test]
    fn test_unknown_block_type() {
        let raw = json!({ "id": "x", "type": "synced_block", "has_children": true, "synced_block": {} });
        let block: BlockObject = serde_json::from_value(raw).unwrap();
        assert!(block.should_descend());
        assert_eq!(
            block.to_domain().content,
            BlockContent::Unsupported("synced_block".to_string())
        );
    }

    #[test]
    fn test_query_request_omits_missing_cursor() {
        let body = serde_json::to_value(QueryRequest {
            page_size: 100,
            start_cursor: None,
        })
        .unwrap();
        assert_eq!(body, json!({ "page_size": 100 }));
    }

    #[test]
    fn test_database_columns() {
        let raw = json!({
            "id": "db",
            "title": [rich("Blog")],
            "properties": {
                "Name": { "id": "title", "type": "title", "title": {} },
                "Tags": { "id": "t", "type": "multi_select", "multi_select": { "options": [] } }
            }
        });
        let db: DatabaseObject = serde_json::from_value(raw).unwrap();
        assert_eq!(db.title_text(), "Blog");
        assert_eq!(
            db.columns(),
            vec![
                ("Name".to_string(), "title".to_string()),
                ("Tags".to_string(), "multi_select".to_string())
            ]
        );
    }
}
