use once_cell::sync::Lazy;
use regex::{Regex, RegexSet};

static SQL_INJECTION: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([
        r"(?i)\b(select|insert|update|delete|drop)\b",
        r"(?is)\bunion\b.*\bselect\b",
        r"(?i)'\s*or\s+'?\d+'?\s*=\s*'?\d+",
        r"(?i);\s*--",
    ])
    .unwrap()
});

static XSS: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([
        r"(?is)<script.*?>.*?</script>",
        r"(?i)<script\b",
        r"(?i)javascript:",
        r"(?i)\bon\w+\s*=",
        r"(?i)<iframe.*?>",
        r"(?i)<object.*?>",
    ])
    .unwrap()
});

static PATH_TRAVERSAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\.\./|\.\.\\|%2e%2e(%2f|%5c))").unwrap());

pub fn detect_sql_injection(input: &str) -> bool {
    SQL_INJECTION.is_match(input)
}

pub fn detect_xss(input: &str) -> bool {
    XSS.is_match(input)
}

pub fn detect_path_traversal(input: &str) -> bool {
    PATH_TRAVERSAL.is_match(input)
}

pub fn is_suspicious_input(input: &str) -> bool {
    detect_sql_injection(input) || detect_xss(input) || detect_path_traversal(input)
}
