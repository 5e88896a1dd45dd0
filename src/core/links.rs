//! Anchor collection, resolution, and HEAD-based reachability checks.

use crate::adapters::http::Prober;
use crate::core::markup::static_selector;
use crate::domain::model::LinkRecord;
use crate::utils::error::ProbeError;
use scraper::Html;
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

/// 收集所有 href 並轉成絕對網址；無主機名的（mailto:、javascript: 等）丟棄，
/// 以字串完全相同去重，保留文件中首次出現的順序
pub fn collect_links(document: &Html, base: &Url) -> Vec<String> {
    let mut seen = HashSet::new();
    document
        .select(static_selector!("a[href]"))
        .filter_map(|anchor| anchor.value().attr("href"))
        .filter_map(|href| resolve(base, href))
        .filter(|url| seen.insert(url.clone()))
        .collect()
}

fn resolve(base: &Url, href: &str) -> Option<String> {
    let resolved = base.join(href.trim()).ok()?;
    match resolved.host_str() {
        Some(host) if !host.is_empty() => Some(resolved.to_string()),
        _ => None,
    }
}

/// 狀態碼 >= 400 或任何探測錯誤都算失效
pub fn is_broken(outcome: &Result<u16, ProbeError>) -> bool {
    match outcome {
        Ok(status) => *status >= 400,
        Err(_) => true,
    }
}

/// 依序逐一探測，不並行
pub async fn probe_links(prober: &Prober, links: Vec<String>, timeout: Duration) -> Vec<LinkRecord> {
    let mut records = Vec::with_capacity(links.len());
    for url in links {
        let outcome = prober.head(&url, timeout).await;
        if let Err(e) = &outcome {
            tracing::debug!("Link probe failed: {}", e);
        }
        records.push(LinkRecord {
            is_broken: is_broken(&outcome),
            absolute_url: url,
        });
    }
    records
}
