use crate::utils::error::{AuditError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 解析稽核目標；只接受 http/https
pub fn parse_target_url(url_str: &str) -> Result<Url> {
    validate_non_empty_string("target.url", url_str).map_err(|_| AuditError::InvalidTarget {
        url: url_str.to_string(),
        reason: "URL cannot be empty".to_string(),
    })?;

    let url = Url::parse(url_str.trim()).map_err(|e| AuditError::InvalidTarget {
        url: url_str.to_string(),
        reason: format!("Invalid URL format: {}", e),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(AuditError::InvalidTarget {
            url: url_str.to_string(),
            reason: format!("Unsupported URL scheme: {}", scheme),
        }),
    }
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| AuditError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AuditError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(AuditError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// 只檢查基本形狀，真正的位址解析交給郵件傳輸層
pub fn validate_email(field_name: &str, value: &str) -> Result<()> {
    let trimmed = value.trim();
    let well_formed = match trimmed.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.contains('@'),
        None => false,
    };
    if !well_formed {
        return Err(AuditError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Not a valid email address".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_target_url() {
        assert!(parse_target_url("https://example.com").is_ok());
        assert!(parse_target_url("http://example.com/page").is_ok());
        assert!(parse_target_url("").is_err());
        assert!(parse_target_url("   ").is_err());
        assert!(parse_target_url("example.com").is_err());
        assert!(parse_target_url("ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("timeouts.page_seconds", 10u64, 1, 300).is_ok());
        assert!(validate_range("timeouts.page_seconds", 0u64, 1, 300).is_err());
        assert!(validate_range("timeouts.page_seconds", 301u64, 1, 300).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("alerts.recipient", "ops@example.com").is_ok());
        assert!(validate_email("alerts.recipient", "ops").is_err());
        assert!(validate_email("alerts.recipient", "@example.com").is_err());
        assert!(validate_email("alerts.recipient", "ops@localhost").is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some("smtp.example.com".to_string());
        let missing: Option<String> = None;
        assert!(validate_required_field("smtp.host", &present).is_ok());
        assert!(matches!(
            validate_required_field("smtp.host", &missing),
            Err(AuditError::MissingConfigError { .. })
        ));
    }
}
