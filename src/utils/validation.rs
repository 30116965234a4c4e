use crate::utils::error::{ConsultError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ConsultError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ConsultError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(ConsultError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| ConsultError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ConsultError::InvalidConfigValueError {
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
        return Err(ConsultError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("output.path", "./output").is_ok());
        assert!(validate_path("output.path", "").is_err());
        assert!(validate_path("output.path", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("verification.ttl_seconds", 300, 1).is_ok());
        assert!(validate_positive_number("verification.ttl_seconds", 0, 1).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("avg_rating", 4.5, 0.0, 5.0).is_ok());
        assert!(validate_range("avg_rating", 5.2, 0.0, 5.0).is_err());
        assert!(validate_range("avg_rating", -0.1, 0.0, 5.0).is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("expert.id", "exp-001").is_ok());
        assert!(validate_non_empty_string("expert.id", "   ").is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some("./roster.json".to_string());
        let absent: Option<String> = None;
        assert!(validate_required_field("roster.path", &present).is_ok());
        assert!(validate_required_field("roster.path", &absent).is_err());
    }
}
