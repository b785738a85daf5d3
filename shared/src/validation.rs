//! Input validation functions
//!
//! Small `Result<(), String>` validators used at the API boundary; the
//! message is what the caller sees in a 400 response.

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }
    if email.len() > 255 {
        return Err("Email too long".to_string());
    }
    let email_regex = regex_lite::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    if !email_regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }
    Ok(())
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters".to_string());
    }
    if password.len() > 128 {
        return Err("Password too long".to_string());
    }
    Ok(())
}

/// Validate a display name (account holder or reviewer)
pub fn validate_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Name cannot be empty".to_string());
    }
    if name.len() > 100 {
        return Err("Name too long".to_string());
    }
    Ok(())
}

/// Validate a review rating (1-5 stars)
pub fn validate_rating(rating: i32) -> Result<(), String> {
    if !(1..=5).contains(&rating) {
        return Err("Rating must be between 1 and 5".to_string());
    }
    Ok(())
}

/// Validate a review comment
pub fn validate_comment(comment: &str) -> Result<(), String> {
    if comment.len() > 1000 {
        return Err("Comment too long".to_string());
    }
    Ok(())
}

/// Validate a product price
pub fn validate_price(price: rust_decimal::Decimal) -> Result<(), String> {
    if price <= rust_decimal::Decimal::ZERO {
        return Err("Price must be greater than zero".to_string());
    }
    Ok(())
}

/// Validate a stock quantity
pub fn validate_stock_quantity(quantity: i32) -> Result<(), String> {
    if quantity < 0 {
        return Err("Stock cannot be negative".to_string());
    }
    Ok(())
}

/// Validate an order line quantity
pub fn validate_order_quantity(quantity: i32) -> Result<(), String> {
    if quantity < 1 {
        return Err("Quantity must be at least 1".to_string());
    }
    if quantity > 1000 {
        return Err("Quantity unreasonably large".to_string());
    }
    Ok(())
}
