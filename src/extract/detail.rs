// src/extract/detail.rs
// =============================================================================
// Extracts one idiom record from a detail page.
//
// A detail page holds several "tabbed panels" (div.tabbertab). The first one
// describes the idiom itself as labelled paragraphs:
//
//   <p><strong>Enunciado:</strong> A mal tiempo, buena cara.</p>
//   <p><strong>Significado:</strong> Recomienda afrontar ...</p>
//   <p><strong>Marcador de uso:</strong> Muy usado</p>
//
// For each label we find the first <strong> inside a <p> whose text contains
// the label, take the whole paragraph text, drop the label and trim.
// =============================================================================

use scraper::{ElementRef, Html, Selector};
use serde::Serialize;

pub const TABBED_PANEL: &str = "div.tabbertab";

pub const SECTION_USAGE: &str = "Marcador de uso:";
pub const SECTION_IDIOM: &str = "Enunciado:";
pub const SECTION_DEFINITION: &str = "Significado:";

// Usage marker value kept in the final output (exact, case-sensitive match)
pub const COMMONLY_USED: &str = "Muy usado";

/// The fixed set of labelled sections read from a detail page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Usage,
    Idiom,
    Definition,
}

impl Section {
    pub fn label(self) -> &'static str {
        match self {
            Section::Usage => SECTION_USAGE,
            Section::Idiom => SECTION_IDIOM,
            Section::Definition => SECTION_DEFINITION,
        }
    }
}

/// One idiom as read from its detail page. Fields may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IdiomRecord {
    pub idiom: String,
    pub usage: String,
    pub definition: String,
}

impl IdiomRecord {
    pub fn is_commonly_used(&self) -> bool {
        self.usage == COMMONLY_USED
    }
}

// Parses a detail page and reads the three sections from its first tabbed
// panel. A page without a panel gives a record with every field empty.
pub fn extract_record(html: &str) -> IdiomRecord {
    let document = Html::parse_document(html);

    // Constant selector, known to be valid
    let panel_selector = Selector::parse(TABBED_PANEL).unwrap();

    match document.select(&panel_selector).next() {
        Some(panel) => IdiomRecord {
            idiom: section_text(panel, Section::Idiom),
            usage: section_text(panel, Section::Usage),
            definition: section_text(panel, Section::Definition),
        },
        None => IdiomRecord::default(),
    }
}

// Returns the text of the paragraph labelled `section` inside `scope`,
// without the label and trimmed, or "" if there is no such paragraph
pub fn section_text(scope: ElementRef<'_>, section: Section) -> String {
    let label = section.label();
    let selector = Selector::parse("p > strong").unwrap();

    let paragraph = scope
        .select(&selector)
        .find(|strong| strong.text().collect::<String>().contains(label))
        .and_then(|strong| strong.parent())
        .and_then(ElementRef::wrap);

    match paragraph {
        Some(p) => {
            let text: String = p.text().collect();
            text.strip_prefix(label).unwrap_or(&text).trim().to_string()
        }
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail_page(usage: &str) -> String {
        format!(
            r#"<html><body>
            <div class="tabber">
              <div class="tabbertab">
                <p><strong>Enunciado:</strong> A mal tiempo, buena cara.</p>
                <p><strong>Significado:</strong>
                   Recomienda afrontar con optimismo las adversidades.</p>
                <p><strong>Marcador de uso:</strong> {usage}</p>
              </div>
              <div class="tabbertab">
                <p><strong>Enunciado:</strong> Second panel, ignored</p>
                <p><strong>Marcador de uso:</strong> Poco usado</p>
              </div>
            </div>
            </body></html>"#
        )
    }

    #[test]
    fn test_section_labels() {
        assert_eq!(Section::Usage.label(), "Marcador de uso:");
        assert_eq!(Section::Idiom.label(), "Enunciado:");
        assert_eq!(Section::Definition.label(), "Significado:");
    }

    #[test]
    fn test_extract_record_from_first_panel() {
        let record = extract_record(&detail_page("Muy usado"));
        assert_eq!(record.idiom, "A mal tiempo, buena cara.");
        assert_eq!(
            record.definition,
            "Recomienda afrontar con optimismo las adversidades."
        );
        assert_eq!(record.usage, "Muy usado");
        assert!(record.is_commonly_used());
    }

    #[test]
    fn test_other_usage_is_not_common() {
        let record = extract_record(&detail_page("Poco usado"));
        assert_eq!(record.usage, "Poco usado");
        assert!(!record.is_commonly_used());
    }

    #[test]
    fn test_usage_match_is_case_sensitive() {
        let record = extract_record(&detail_page("muy usado"));
        assert!(!record.is_commonly_used());
    }

    #[test]
    fn test_missing_section_is_empty() {
        let html = r#"<div class="tabbertab">
            <p><strong>Marcador de uso:</strong> Muy usado</p>
        </div>"#;
        let record = extract_record(html);
        assert_eq!(record.idiom, "");
        assert_eq!(record.definition, "");
        assert_eq!(record.usage, "Muy usado");
    }

    #[test]
    fn test_page_without_panel_gives_empty_record() {
        let record = extract_record("<html><body><p>Nada</p></body></html>");
        assert_eq!(record, IdiomRecord::default());
    }

    #[test]
    fn test_strong_outside_paragraph_is_ignored() {
        let html = r#"<div class="tabbertab">
            <div><strong>Enunciado:</strong> not a paragraph</div>
        </div>"#;
        assert_eq!(extract_record(html).idiom, "");
    }

    #[test]
    fn test_label_not_at_start_is_kept() {
        // The label is only stripped when the paragraph starts with it
        let html = r#"<div class="tabbertab">
            <p>Nota <strong>Significado:</strong> figurado</p>
        </div>"#;
        assert_eq!(
            extract_record(html).definition,
            "Nota Significado: figurado"
        );
    }
}
