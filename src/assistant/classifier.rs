use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Greeting,
    Revenue,
    Users,
    Performance,
    Analysis,
    Help,
    Unknown,
}

// Earlier rows win when a message hits several categories.
const KEYWORDS: &[(Intent, &[&str])] = &[
    (Intent::Revenue, &["revenue", "sales", "income", "profit", "receita", "vendas"]),
    (Intent::Users, &["user", "users", "customer", "customers", "signup", "usuarios"]),
    (Intent::Performance, &["performance", "cpu", "memory", "uptime", "latency", "desempenho"]),
    (Intent::Analysis, &["analyze", "analysis", "trend", "forecast", "statistics", "analise"]),
    (Intent::Help, &["help", "how", "what", "ajuda"]),
    (Intent::Greeting, &["hello", "hi", "hey", "ola", "oi", "greetings"]),
];

/// Maps a message to the first category whose keywords it mentions.
pub fn classify(message: &str) -> Intent {
    let tokens: Vec<String> = message
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect();

    KEYWORDS
        .iter()
        .find(|(_, words)| tokens.iter().any(|t| words.contains(&t.as_str())))
        .map(|(intent, _)| *intent)
        .unwrap_or(Intent::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify("Hello there"), Intent::Greeting);
        assert_eq!(classify("Show me SALES for March"), Intent::Revenue);
        assert_eq!(classify("how many users signed up?"), Intent::Users);
        assert_eq!(classify("what is the cpu load"), Intent::Performance);
        assert_eq!(classify("how do I export?"), Intent::Help);
        assert_eq!(classify("zzz"), Intent::Unknown);
        assert_eq!(classify(""), Intent::Unknown);
    }

    #[test]
    fn test_serialized_tag() {
        assert_eq!(serde_json::to_value(Intent::Revenue).unwrap(), "revenue");
        assert_eq!(serde_json::to_value(Intent::Unknown).unwrap(), "unknown");
    }

    #[test]
    fn test_whole_words_only() {
        assert_eq!(classify("this is nothing"), Intent::Unknown);
    }
}
