use crate::utils::error::{BookingError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(BookingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(BookingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BookingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(BookingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Valid values: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

pub fn validate_command_prefix(field_name: &str, prefix: &str) -> Result<()> {
    validate_non_empty_string(field_name, prefix)?;
    if prefix.chars().any(char::is_whitespace) {
        return Err(BookingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: prefix.to_string(),
            reason: "Prefix cannot contain whitespace".to_string(),
        });
    }
    Ok(())
}

/// 資料驗證用 (非設定檔)，錯誤型別為 ValidationError
pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    // NaN 兩個比較都為 false，要用否定形式擋掉
    if !(value >= min && value <= max) {
        return Err(BookingError::ValidationError {
            message: format!(
                "{} = {} is out of range, must be between {} and {}",
                field_name, value, min, max
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("storage.data_dir", "./data").is_ok());
        assert!(validate_path("storage.data_dir", "").is_err());
        assert!(validate_path("storage.data_dir", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("rating", 5.0, 0.0, 5.0).is_ok());
        assert!(validate_range("rating", 0.0, 0.0, 5.0).is_ok());
        assert!(validate_range("rating", 5.01, 0.0, 5.0).is_err());
        assert!(validate_range("rating", -0.5, 0.0, 5.0).is_err());
        assert!(validate_range("rating", f64::NAN, 0.0, 5.0).is_err());
    }

    #[test]
    fn test_validate_one_of() {
        assert!(validate_one_of("logging.format", "json", &["compact", "json"]).is_ok());
        assert!(validate_one_of("logging.format", "xml", &["compact", "json"]).is_err());
    }

    #[test]
    fn test_validate_command_prefix() {
        assert!(validate_command_prefix("bot.command_prefix", "!").is_ok());
        assert!(validate_command_prefix("bot.command_prefix", "?!").is_ok());
        assert!(validate_command_prefix("bot.command_prefix", "").is_err());
        assert!(validate_command_prefix("bot.command_prefix", "! ").is_err());
    }
}
