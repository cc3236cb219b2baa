use std::sync::LazyLock;

use regex::Regex;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

static DIGIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d").expect("digit pattern is valid"));

static SPECIAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[!@#$%^&*()_+{}\[\]:";'<>,.?/~\\-]"#).expect("special pattern is valid")
});

const MIN_PASSWORD_CHARS: usize = 8;

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// At least eight characters, one digit and one special character.
pub fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_CHARS
        && DIGIT.is_match(password)
        && SPECIAL.is_match(password)
}

/// Treats `None` and whitespace-only strings alike.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
