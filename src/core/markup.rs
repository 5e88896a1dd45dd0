//! SEO signals read straight off the parsed document.

use crate::domain::model::{MarkupSummary, NOT_AVAILABLE};
use scraper::{ElementRef, Html, Selector};

macro_rules! static_selector {
    ($css:literal) => {{
        static SELECTOR: ::std::sync::OnceLock<::scraper::Selector> = ::std::sync::OnceLock::new();
        SELECTOR.get_or_init(|| {
            ::scraper::Selector::parse($css).expect(concat!("valid selector: ", $css))
        })
    }};
}

pub(crate) use static_selector;

/// 缺少的標籤回傳 "N/A" 或空值，不視為錯誤
pub fn analyze(document: &Html) -> MarkupSummary {
    MarkupSummary {
        title: first_text(document, static_selector!("title")),
        meta_description: meta_description(document),
        h1: first_text(document, static_selector!("h1")),
        has_viewport: document
            .select(static_selector!("meta[name='viewport']"))
            .next()
            .is_some(),
        images_missing_alt: images_missing_alt(document),
    }
}

fn first_text(document: &Html, selector: &Selector) -> String {
    document
        .select(selector)
        .next()
        .map(|element| element_text(&element))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn meta_description(document: &Html) -> String {
    document
        .select(static_selector!("meta[name='description']"))
        .next()
        .and_then(|element| element.value().attr("content"))
        .map(|content| content.trim().to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// alt 缺少或為空字串的圖片，依文件順序
fn images_missing_alt(document: &Html) -> Vec<String> {
    document
        .select(static_selector!("img"))
        .filter(|img| img.value().attr("alt").map_or(true, str::is_empty))
        .map(|img| img.value().attr("src").unwrap_or_default().to_string())
        .collect()
}
