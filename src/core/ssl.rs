use crate::adapters::http::PageFetcher;
use crate::domain::model::SslStatus;
use crate::utils::error::{AuditError, FetchError};
use std::time::Duration;
use url::Url;

/// 以啟用憑證驗證的 GET 判斷；只有 TLS 錯誤算 Invalid，其餘連線錯誤為 Unverified
pub async fn check_ssl(fetcher: &PageFetcher, target: &Url, timeout: Duration) -> SslStatus {
    if target.scheme() != "https" {
        return SslStatus::NotApplicable;
    }

    let status = classify(fetcher.fetch(target.as_str(), timeout).await.map(|_| ()));
    match &status {
        SslStatus::Invalid(reason) => {
            let err = AuditError::SslValidation {
                message: reason.clone(),
            };
            tracing::warn!("❌ {} ({})", err, err.recovery_suggestion());
        }
        SslStatus::Unverified(reason) => tracing::warn!("⚠️ SSL could not be verified: {}", reason),
        _ => tracing::debug!("SSL check for {}: {:?}", target, status),
    }
    status
}

fn classify(outcome: Result<(), FetchError>) -> SslStatus {
    match outcome {
        Ok(()) => SslStatus::Valid,
        // 握手已完成，伺服器只是回了錯誤狀態
        Err(FetchError::Status { .. }) => SslStatus::Valid,
        Err(FetchError::Tls { message, .. }) => SslStatus::Invalid(message),
        Err(other) => SslStatus::Unverified(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_plain_http_is_not_applicable() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/");
            then.status(200);
        });

        let fetcher = PageFetcher::new().unwrap();
        let target = Url::parse(&server.url("/")).unwrap();
        let status = check_ssl(&fetcher, &target, Duration::from_secs(5)).await;

        assert_eq!(status, SslStatus::NotApplicable);
        mock.assert_hits(0);
    }

    #[test]
    fn test_classification() {
        assert_eq!(classify(Ok(())), SslStatus::Valid);
        assert_eq!(
            classify(Err(FetchError::Status {
                url: "https://example.com/".to_string(),
                status: 500
            })),
            SslStatus::Valid
        );
        assert_eq!(
            classify(Err(FetchError::Tls {
                url: "https://example.com/".to_string(),
                message: "invalid peer certificate: Expired".to_string()
            })),
            SslStatus::Invalid("invalid peer certificate: Expired".to_string())
        );
        assert!(matches!(
            classify(Err(FetchError::Timeout {
                url: "https://example.com/".to_string()
            })),
            SslStatus::Unverified(_)
        ));
    }

    #[tokio::test]
    async fn test_plain_http_server_behind_https_scheme_fails_handshake() {
        let server = MockServer::start();
        let target = Url::parse(&format!("https://127.0.0.1:{}/", server.port())).unwrap();

        let fetcher = PageFetcher::new().unwrap();
        let status = check_ssl(&fetcher, &target, Duration::from_secs(5)).await;

        assert!(matches!(status, SslStatus::Invalid(_)), "got {:?}", status);
    }

    #[tokio::test]
    async fn test_refused_connection_is_unverified_even_with_ssl_in_path() {
        let fetcher = PageFetcher::new().unwrap();

        for path in ["ssl-guide/", "about/"] {
            let target = Url::parse(&format!("https://127.0.0.1:9/{}", path)).unwrap();
            let status = check_ssl(&fetcher, &target, Duration::from_secs(2)).await;
            assert!(matches!(status, SslStatus::Unverified(_)), "{}: got {:?}", path, status);
        }
    }
}
