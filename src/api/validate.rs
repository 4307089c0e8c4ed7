use std::collections::HashMap;

pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Field name -> problem, collected over a whole request body
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FieldErrors(HashMap<String, String>);

impl FieldErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_insert_with(|| message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_result(self) -> Result<(), HashMap<String, String>> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self.0)
        }
    }
}

pub fn require(errors: &mut FieldErrors, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.add(field, "This field is required");
    }
}

/// Basic email shape check: one `@`, non-empty local part, dotted domain
pub fn validate_email_format(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err("Invalid email format".to_string());
    }

    let domain = parts[1];
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err("Invalid email format".to_string());
    }

    if email.chars().any(char::is_whitespace) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), String> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(format!("Password must be at least {} characters", MIN_PASSWORD_LENGTH));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_format() {
        assert!(validate_email_format("budi@kampus.ac.id").is_ok());
        assert!(validate_email_format("").is_err());
        assert!(validate_email_format("budi").is_err());
        assert!(validate_email_format("@kampus.ac.id").is_err());
        assert!(validate_email_format("budi@kampus").is_err());
        assert!(validate_email_format("bu di@kampus.ac.id").is_err());
        assert!(validate_email_format("a@b@c.id").is_err());
    }

    #[test]
    fn password_length() {
        assert!(validate_password("123456").is_ok());
        assert!(validate_password("12345").is_err());
    }

    #[test]
    fn first_error_per_field_wins() {
        let mut errors = FieldErrors::default();
        errors.add("email", "first");
        errors.add("email", "second");
        let map = errors.into_result().unwrap_err();
        assert_eq!(map["email"], "first");
    }
}
