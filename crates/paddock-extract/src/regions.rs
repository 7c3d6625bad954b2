//! Page segmentation.
//!
//! Cuts a parsed detail page into the regions the field extractors consume:
//! title text, labeled "essentials" rows, description body with comment
//! subtrees removed, the sold/result banner, live-auction marker elements,
//! and any machine-readable end date from meta tags or JSON-LD. All
//! segmentation is driven by the site's [`SelectorSet`]; the extractors
//! themselves never touch the DOM.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use paddock_core::SiteConfig;

use crate::error::ExtractError;

/// One labeled row from a definition list / essentials block.
///
/// Rows without a recognizable label keep the whole text in `value` with an
/// empty `label` — several auction sites list specs as bare phrases
/// ("8,456 Miles Shown") rather than key/value pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredRow {
    pub label: String,
    pub value: String,
}

/// The text regions of one detail page.
#[derive(Debug, Clone, Default)]
pub struct PageRegions {
    pub title: String,
    pub structured: Vec<StructuredRow>,
    /// Description text with comment subtrees removed.
    pub body: String,
    /// Every text node on the page, comments included. Last-resort search
    /// space only.
    pub full_text: String,
    /// Text of the sold/result banner, empty when absent.
    pub sold_banner: String,
    /// Raw option/equipment bullet texts, unfiltered.
    pub option_items: Vec<String>,
    /// Text of elements whose class/id naming suggests a sold or final
    /// price (`sold-price`, `final-amount`, ...).
    pub sold_class_text: Vec<String>,
    pub has_bid_button: bool,
    pub has_countdown: bool,
    /// Machine-readable auction end date from meta tags or JSON-LD,
    /// verbatim as found.
    pub meta_end_date: Option<String>,
}

impl PageRegions {
    /// Value of the first structured row whose label contains any of
    /// `label_keys` (case-insensitive).
    #[must_use]
    pub fn structured_value(&self, label_keys: &[&str]) -> Option<&str> {
        self.structured.iter().find_map(|row| {
            let label = row.label.to_lowercase();
            label_keys
                .iter()
                .any(|key| label.contains(key))
                .then_some(row.value.as_str())
        })
    }

    /// Unlabeled structured rows (bare-phrase essentials items).
    pub fn unlabeled_rows(&self) -> impl Iterator<Item = &str> {
        self.structured
            .iter()
            .filter(|row| row.label.is_empty())
            .map(|row| row.value.as_str())
    }
}

/// Segment a parsed document according to the site's selector set.
///
/// # Errors
///
/// Returns [`ExtractError::InvalidSelector`] when a configured selector
/// does not parse. A selector that parses but matches nothing yields an
/// empty region, not an error.
pub fn segment(doc: &Html, cfg: &SiteConfig) -> Result<PageRegions, ExtractError> {
    let sel = |selector: &str| -> Result<Selector, ExtractError> {
        Selector::parse(selector).map_err(|e| ExtractError::InvalidSelector {
            site: cfg.id.clone(),
            selector: selector.to_string(),
            reason: e.to_string(),
        })
    };

    let title_sel = sel(&cfg.selectors.title)?;
    let essentials_sel = sel(&cfg.selectors.essentials_item)?;
    let body_sel = sel(&cfg.selectors.body)?;
    let comments_sel = sel(&cfg.selectors.comments)?;
    let sold_banner_sel = sel(&cfg.selectors.sold_banner)?;
    let bid_button_sel = sel(&cfg.selectors.bid_button)?;
    let countdown_sel = sel(&cfg.selectors.countdown)?;
    let options_sel = sel(&cfg.selectors.options_item)?;

    let title = doc
        .select(&title_sel)
        .next()
        .map(element_text)
        .unwrap_or_default();

    let structured = doc
        .select(&essentials_sel)
        .map(parse_structured_row)
        .collect();

    let body = doc
        .select(&body_sel)
        .map(|el| {
            let mut out = String::new();
            text_excluding(el, &comments_sel, &mut out);
            collapse_ws(&out)
        })
        .collect::<Vec<_>>()
        .join(" ");

    let full_text = collapse_ws(
        &doc.root_element()
            .text()
            .collect::<Vec<_>>()
            .join(" "),
    );

    let sold_banner = doc
        .select(&sold_banner_sel)
        .next()
        .map(element_text)
        .unwrap_or_default();

    let option_items = doc.select(&options_sel).map(element_text).collect();

    Ok(PageRegions {
        title,
        structured,
        body,
        full_text,
        sold_banner,
        option_items,
        sold_class_text: collect_sold_class_text(doc),
        has_bid_button: doc.select(&bid_button_sel).next().is_some(),
        has_countdown: doc.select(&countdown_sel).next().is_some(),
        meta_end_date: extract_meta_end_date(doc),
    })
}

/// Collapsed text of one element's subtree.
fn element_text(el: ElementRef<'_>) -> String {
    collapse_ws(&el.text().collect::<Vec<_>>().join(" "))
}

/// Collect text nodes under `el`, skipping any child subtree that matches
/// `excluded` — comment streams are often nested inside the description
/// container.
fn text_excluding(el: ElementRef<'_>, excluded: &Selector, out: &mut String) {
    for child in el.children() {
        if let Some(child_el) = ElementRef::wrap(child) {
            if excluded.matches(&child_el) {
                continue;
            }
            text_excluding(child_el, excluded, out);
        } else if let Some(text) = child.value().as_text() {
            out.push_str(text);
            out.push(' ');
        }
    }
}

/// Split an essentials row into label and value.
///
/// `"Mileage: 8,456"` → (`"Mileage"`, `"8,456"`). A row with two or more
/// child elements and no colon is treated as a dt/dd pair. Anything else is
/// an unlabeled row.
fn parse_structured_row(el: ElementRef<'_>) -> StructuredRow {
    let text = element_text(el);
    if let Some((label, value)) = text.split_once(':') {
        return StructuredRow {
            label: label.trim().to_string(),
            value: value.trim().to_string(),
        };
    }

    let children: Vec<ElementRef<'_>> = el
        .children()
        .filter_map(ElementRef::wrap)
        .collect();
    if children.len() >= 2 {
        let label = element_text(children[0]);
        let value = collapse_ws(
            &children[1..]
                .iter()
                .map(|c| element_text(*c))
                .collect::<Vec<_>>()
                .join(" "),
        );
        if !label.is_empty() && !value.is_empty() {
            return StructuredRow { label, value };
        }
    }

    StructuredRow {
        label: String::new(),
        value: text,
    }
}

/// Text of elements whose class or id suggests a sold/final price.
fn collect_sold_class_text(doc: &Html) -> Vec<String> {
    let attr_sel = Selector::parse("[class], [id]").expect("valid selector");
    doc.select(&attr_sel)
        .filter(|el| {
            let naming = format!(
                "{} {}",
                el.value().attr("class").unwrap_or_default(),
                el.value().attr("id").unwrap_or_default()
            )
            .to_lowercase();
            (naming.contains("sold") || naming.contains("final"))
                && (naming.contains("price") || naming.contains("amount") || naming.contains("bid"))
        })
        .map(element_text)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Machine-readable end date: `<meta>` tags first, then JSON-LD `endDate`.
fn extract_meta_end_date(doc: &Html) -> Option<String> {
    let meta_sel = Selector::parse("meta[content]").expect("valid selector");
    for el in doc.select(&meta_sel) {
        let name = [
            el.value().attr("itemprop"),
            el.value().attr("property"),
            el.value().attr("name"),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

        if name.contains("end") && (name.contains("date") || name.contains("time")) {
            if let Some(content) = el.value().attr("content") {
                if !content.trim().is_empty() {
                    return Some(content.trim().to_string());
                }
            }
        }
    }

    extract_jsonld_end_date(&doc.root_element().html())
}

/// Pull `endDate` out of `<script type="application/ld+json">` blocks,
/// accepting top-level objects, arrays, and `@graph` containers.
fn extract_jsonld_end_date(html: &str) -> Option<String> {
    let script_re = Regex::new(
        r#"(?is)<script[^>]+type\s*=\s*["']application/ld\+json["'][^>]*>(.*?)</script>"#,
    )
    .expect("valid regex");

    for cap in script_re.captures_iter(html) {
        let json_text = match cap.get(1) {
            Some(m) => m.as_str(),
            None => continue,
        };
        let value: serde_json::Value = match serde_json::from_str(json_text) {
            Ok(v) => v,
            Err(_) => continue,
        };

        let mut candidates: Vec<serde_json::Value> = if value.is_array() {
            value.as_array().cloned().unwrap_or_default()
        } else {
            vec![value]
        };
        let mut expanded = Vec::new();
        for item in &candidates {
            if let Some(graph) = item.get("@graph").and_then(serde_json::Value::as_array) {
                expanded.extend(graph.iter().cloned());
            }
        }
        candidates.extend(expanded);

        for item in candidates {
            if let Some(end) = item.get("endDate").and_then(serde_json::Value::as_str) {
                if !end.trim().is_empty() {
                    return Some(end.trim().to_string());
                }
            }
        }
    }

    None
}

pub(crate) fn collapse_ws(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
#[path = "regions_test.rs"]
mod regions_test;
