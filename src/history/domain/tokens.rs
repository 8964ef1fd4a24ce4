//! Keyword extraction for topics and recall.

use regex::Regex;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::LazyLock;

#[expect(clippy::expect_used, reason = "the token pattern is a compile-time literal")]
static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z][A-Za-z0-9_-]{2,}|[\u{4e00}-\u{9fff}]{2,8}")
        .expect("token pattern should compile")
});

/// Filler words in both supported scripts.
const STOP_WORDS: &[&str] = &[
    "我们", "你们", "这个", "那个", "然后", "可以", "需要", "如何", "现在", "今天", "一下", "一个",
    "还有", "已经", "因为", "所以", "是否", "进行", "方案", "问题", "with", "that", "this", "from",
    "have", "should", "what", "when", "where", "the", "and", "for", "are", "you", "your",
];

/// Extracts lowercase content tokens from `text`.
///
/// Tokens are Latin words of at least three characters or runs of two to
/// eight CJK ideographs. Stop words are removed.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    TOKEN_PATTERN
        .find_iter(text)
        .map(|found| found.as_str().to_lowercase())
        .filter(|token| token.chars().count() >= 2 && !STOP_WORDS.contains(&token.as_str()))
        .collect()
}

/// Returns the `limit` most frequent tokens, earliest first among equals.
#[must_use]
pub fn top_topics<'a>(texts: impl IntoIterator<Item = &'a str>, limit: usize) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut order: Vec<String> = Vec::new();
    for token in texts.into_iter().flat_map(tokenize) {
        let count = counts.entry(token.clone()).or_insert(0);
        if *count == 0 {
            order.push(token);
        }
        *count += 1;
    }

    // Stable sort keeps first-seen order for equal counts.
    order.sort_by_key(|token| Reverse(counts.get(token).copied().unwrap_or_default()));
    order.truncate(limit);
    order
}
