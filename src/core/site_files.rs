use crate::adapters::http::Prober;
use crate::domain::model::AuxiliaryPaths;
use crate::utils::error::AuditError;
use std::time::Duration;
use url::Url;

pub const SITEMAP_PATH: &str = "sitemap.xml";
pub const ROBOTS_PATH: &str = "robots.txt";

/// sitemap.xml 與 robots.txt 相對於 base 解析；只有剛好 200 才算存在
pub async fn check_auxiliary_paths(prober: &Prober, base: &Url, timeout: Duration) -> AuxiliaryPaths {
    AuxiliaryPaths {
        sitemap_present: is_present(prober, base, SITEMAP_PATH, timeout).await,
        robots_present: is_present(prober, base, ROBOTS_PATH, timeout).await,
    }
}

async fn is_present(prober: &Prober, base: &Url, path: &str, timeout: Duration) -> bool {
    let url = match base.join(path) {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!("Cannot resolve {} against {}: {}", path, base, e);
            return false;
        }
    };

    match prober.head(url.as_str(), timeout).await {
        Ok(status) => status == 200,
        Err(e) => {
            let err = AuditError::from(e);
            tracing::warn!("⚠️ {} treated as absent: {}", path, err);
            false
        }
    }
}
