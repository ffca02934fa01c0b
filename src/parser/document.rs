//! Announcement page parser
//!
//! Turns one rendered announcement page into a [`DocumentRecord`]. Header
//! fields come from the page's label/value columns, the extract from the page
//! heading, and the body is kept as raw markup.

use crate::parser::text::{select_all, select_first, stripped_text};
use scraper::Html;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Header label carrying the portal-assigned publication id
pub const PUBLICATION_LABEL: &str = "Nº de Publicación:";

/// Header label carrying the bulletin section
pub const SECTION_LABEL: &str = "Sección:";

/// Header label carrying the announcing authority
pub const AUTHORITY_LABEL: &str = "Anunciante:";

/// One announcement, as persisted
///
/// Serialized field names follow the portal's own vocabulary. The raw body is
/// stored as a separate artifact and is not part of the serialized record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    #[serde(rename = "number")]
    pub bulletin_number: String,

    #[serde(rename = "date")]
    pub bulletin_date: String,

    #[serde(rename = "type")]
    pub doc_type: String,

    #[serde(rename = "cve")]
    pub publication_id: String,

    pub section: String,

    pub authority: String,

    pub extract: String,

    pub url: String,

    #[serde(skip)]
    pub raw_body: String,
}

/// What the summary page already told us about an announcement
#[derive(Debug, Clone, Copy)]
pub struct DocumentContext<'a> {
    pub bulletin_number: &'a str,
    pub bulletin_date: &'a str,
    pub doc_type: &'a str,
    pub url: &'a str,
}

/// Parses a rendered announcement page
///
/// Absent header labels, heading or body container resolve to empty strings.
///
/// # Example
///
/// ```
/// use borm_scraper::parser::{parse_document, DocumentContext};
///
/// let html = r#"
///     <div class="col-md-5 col-sm-6 col-xs-12">
///         <h3 class="dato1">Nº de Publicación:</h3><p class="dato2 ng-binding">1234</p>
///     </div>
///     <div class="cuerpoAnuncioHTML"><p>Texto</p></div>"#;
/// let ctx = DocumentContext {
///     bulletin_number: "45",
///     bulletin_date: "07-03-2024",
///     doc_type: "Edicto",
///     url: "https://www.borm.es/#/home/anuncio/07-03-2024/1234",
/// };
/// let record = parse_document(html, ctx);
/// assert_eq!(record.publication_id, "1234");
/// assert_eq!(record.section, "");
/// assert_eq!(record.raw_body, "<p>Texto</p>");
/// ```
pub fn parse_document(html: &str, ctx: DocumentContext<'_>) -> DocumentRecord {
    let document = Html::parse_document(html);
    let header = header_fields(&document);
    let field = |label: &str| header.get(label).cloned().unwrap_or_default();

    DocumentRecord {
        bulletin_number: ctx.bulletin_number.to_string(),
        bulletin_date: ctx.bulletin_date.to_string(),
        doc_type: ctx.doc_type.to_string(),
        publication_id: field(PUBLICATION_LABEL),
        section: field(SECTION_LABEL),
        authority: field(AUTHORITY_LABEL),
        extract: extract_heading(&document),
        url: ctx.url.to_string(),
        raw_body: raw_body(&document),
    }
}

/// Label to value mapping from the header columns
///
/// Within each column block the i-th label is paired with the i-th value;
/// unmatched trailing labels or values are dropped. A label repeated in a
/// later block overwrites the earlier value.
pub fn header_fields(document: &Html) -> HashMap<String, String> {
    let mut fields = HashMap::new();

    for block in select_all(document.root_element(), "div.col-md-5.col-sm-6.col-xs-12") {
        let labels = select_all(block, "h3.dato1");
        let values = select_all(block, "p.dato2.ng-binding");

        for (label, value) in labels.into_iter().zip(values) {
            fields.insert(stripped_text(label), stripped_text(value));
        }
    }

    fields
}

/// Announcement heading, or an empty string when the header is missing
pub fn extract_heading(document: &Html) -> String {
    select_first(document.root_element(), "div.container-fluid.cabecera02.ng-scope")
        .and_then(|header| select_first(header, "h1.ng-binding"))
        .map(stripped_text)
        .unwrap_or_default()
}

/// Inner markup of the announcement body, verbatim
pub fn raw_body(document: &Html) -> String {
    select_first(document.root_element(), "div.cuerpoAnuncioHTML")
        .map(|body| body.inner_html())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_PAGE: &str = r#"
        <html><body>
        <div class="container-fluid cabecera02 ng-scope">
            <h1 class="ng-binding">
                Anuncio de licitación del contrato de suministro
            </h1>
        </div>
        <div class="col-md-5 col-sm-6 col-xs-12">
            <h3 class="dato1">Nº de Publicación:</h3>
            <p class="dato2 ng-binding">1234</p>
            <h3 class="dato1">Sección:</h3>
            <p class="dato2 ng-binding">III. Administración Local</p>
        </div>
        <div class="col-md-5 col-sm-6 col-xs-12">
            <h3 class="dato1">Anunciante:</h3>
            <p class="dato2 ng-binding">Ayuntamiento de Lorca</p>
        </div>
        <div class="cuerpoAnuncioHTML"><p>Primero.</p><p>Segundo &amp; último.</p></div>
        </body></html>
    "#;

    fn ctx() -> DocumentContext<'static> {
        DocumentContext {
            bulletin_number: "45",
            bulletin_date: "07-03-2024",
            doc_type: "Anuncio",
            url: "https://www.borm.es/#/home/anuncio/07-03-2024/1234",
        }
    }

    #[test]
    fn test_full_page() {
        let record = parse_document(FULL_PAGE, ctx());

        assert_eq!(record.bulletin_number, "45");
        assert_eq!(record.bulletin_date, "07-03-2024");
        assert_eq!(record.doc_type, "Anuncio");
        assert_eq!(record.publication_id, "1234");
        assert_eq!(record.section, "III. Administración Local");
        assert_eq!(record.authority, "Ayuntamiento de Lorca");
        assert_eq!(
            record.extract,
            "Anuncio de licitación del contrato de suministro"
        );
        assert_eq!(record.url, ctx().url);
        assert_eq!(
            record.raw_body,
            "<p>Primero.</p><p>Segundo &amp; último.</p>"
        );
    }

    #[test]
    fn test_missing_publication_label() {
        let html = r#"
            <div class="col-md-5 col-sm-6 col-xs-12">
                <h3 class="dato1">Sección:</h3>
                <p class="dato2 ng-binding">I. Comunidad Autónoma</p>
            </div>
        "#;
        let record = parse_document(html, ctx());
        assert_eq!(record.publication_id, "");
        assert_eq!(record.section, "I. Comunidad Autónoma");
        assert_eq!(record.authority, "");
    }

    #[test]
    fn test_pairing_is_positional() {
        // Values are paired by order, not by any relation to the label text
        let html = r#"
            <div class="col-md-5 col-sm-6 col-xs-12">
                <h3 class="dato1">Sección:</h3>
                <h3 class="dato1">Anunciante:</h3>
                <p class="dato2 ng-binding">first</p>
            </div>
        "#;
        let fields = header_fields(&Html::parse_document(html));
        assert_eq!(fields.len(), 1);
        assert_eq!(fields.get(SECTION_LABEL).map(String::as_str), Some("first"));
    }

    #[test]
    fn test_values_without_binding_class_ignored() {
        let html = r#"
            <div class="col-md-5 col-sm-6 col-xs-12">
                <h3 class="dato1">Sección:</h3>
                <p class="dato2">static</p>
            </div>
        "#;
        assert!(header_fields(&Html::parse_document(html)).is_empty());
    }

    #[test]
    fn test_extract_requires_header_container() {
        let html = r#"<h1 class="ng-binding">Loose heading</h1>"#;
        assert_eq!(parse_document(html, ctx()).extract, "");

        let html = r#"<div class="container-fluid cabecera02 ng-scope"><h2>Other</h2></div>"#;
        assert_eq!(parse_document(html, ctx()).extract, "");
    }

    #[test]
    fn test_empty_page_yields_empty_fields() {
        let record = parse_document("", ctx());
        assert_eq!(record.publication_id, "");
        assert_eq!(record.section, "");
        assert_eq!(record.authority, "");
        assert_eq!(record.extract, "");
        assert_eq!(record.raw_body, "");
        assert_eq!(record.doc_type, "Anuncio");
    }

    #[test]
    fn test_serialized_field_names() {
        let record = parse_document(FULL_PAGE, ctx());
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["number"], "45");
        assert_eq!(json["date"], "07-03-2024");
        assert_eq!(json["type"], "Anuncio");
        assert_eq!(json["cve"], "1234");
        assert_eq!(json["authority"], "Ayuntamiento de Lorca");
        assert!(json.get("raw_body").is_none());
    }
}
