use crate::domain::model::FetchResult;
use crate::utils::error::{FetchError, ProbeError, Result};
use reqwest::{redirect::Policy, Client};
use std::error::Error as StdError;
use std::time::{Duration, Instant};

const USER_AGENT: &str = concat!("seo-sentry/", env!("CARGO_PKG_VERSION"));

/// 主頁面抓取：跟隨轉址，量測回應時間
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }

    pub async fn fetch(&self, url: &str, timeout: Duration) -> std::result::Result<FetchResult, FetchError> {
        tracing::debug!("GET {} (timeout {:?})", url, timeout);
        let started = Instant::now();

        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify_fetch_error(url, &e))?;

        // 與常見客戶端一致：量到收到回應標頭為止
        let elapsed = started.elapsed();
        let status = response.status();
        let final_url = response.url().to_string();
        tracing::debug!("GET {} -> {} in {:?}", url, status, elapsed);

        if !(status.is_success() || status.is_redirection()) {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| classify_fetch_error(url, &e))?;

        Ok(FetchResult {
            status_code: status.as_u16(),
            elapsed,
            body,
            final_url,
        })
    }
}

/// HEAD 探測：不跟隨轉址，只回傳狀態碼
#[derive(Debug, Clone)]
pub struct Prober {
    client: Client,
}

impl Prober {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(Policy::none())
            .build()?;
        Ok(Self { client })
    }

    pub async fn head(&self, url: &str, timeout: Duration) -> std::result::Result<u16, ProbeError> {
        let outcome = self.client.head(url).timeout(timeout).send().await;
        match outcome {
            Ok(response) => {
                let status = response.status().as_u16();
                tracing::debug!("HEAD {} -> {}", url, status);
                Ok(status)
            }
            Err(e) if e.is_timeout() => {
                tracing::debug!("HEAD {} timed out", url);
                Err(ProbeError::Timeout { url: url.to_string() })
            }
            Err(e) => {
                tracing::debug!("HEAD {} failed: {}", url, e);
                Err(ProbeError::Transport {
                    url: url.to_string(),
                    message: error_chain(&e),
                })
            }
        }
    }
}

fn classify_fetch_error(url: &str, err: &reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::Timeout { url: url.to_string() };
    }
    match tls_failure(err) {
        Some(reason) => FetchError::Tls {
            url: url.to_string(),
            message: reason.to_string(),
        },
        None => FetchError::Transport {
            url: url.to_string(),
            message: error_chain(err),
        },
    }
}

/// reqwest 把底層錯誤包在 source 鏈裡，頂層訊息通常只有 "error sending request"
fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut parts = vec![err.to_string()];
    let mut source = err.source();
    while let Some(inner) = source {
        parts.push(inner.to_string());
        source = inner.source();
    }
    parts.join(": ")
}

/// 依型別找出 rustls 錯誤；tokio-rustls 會把它包在 io::Error 裡，
/// 而 io::Error::source() 會跳過被包住的那一層，所以要用 get_ref
fn tls_failure<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a rustls::Error> {
    let mut source = err.source();
    while let Some(inner) = source {
        if let Some(tls) = inner.downcast_ref::<rustls::Error>() {
            return Some(tls);
        }
        if let Some(tls) = inner
            .downcast_ref::<std::io::Error>()
            .and_then(|io| io.get_ref())
            .and_then(|wrapped| wrapped.downcast_ref::<rustls::Error>())
        {
            return Some(tls);
        }
        source = inner.source();
    }
    None
}
