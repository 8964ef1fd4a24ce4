//! Unit tests for keyword extraction.

use crate::history::domain::{tokenize, top_topics};
use rstest::rstest;

#[rstest]
#[case("Plan the Supply route", &["plan", "supply", "route"])]
#[case("go to v2 API", &["api"])]
#[case("we need rust-lang and tokio_rt", &["need", "rust-lang", "tokio_rt"])]
#[case("我们讨论粮草调度", &["我们讨论粮草调度"])]
#[case("粮草 我们 可以", &["粮草"])]
#[case("what should this be", &[])]
fn tokenize_extracts_content_words(#[case] input: &str, #[case] expected: &[&str]) {
    assert_eq!(tokenize(input), expected);
}

#[rstest]
fn long_ideograph_runs_are_split_into_chunks() {
    let tokens = tokenize("一二三四五六七八九十");

    assert_eq!(tokens, vec!["一二三四五六七八", "九十"]);
}

#[rstest]
fn top_topics_orders_by_frequency_then_first_seen() {
    let texts = [
        "cavalry scouts river",
        "river crossing scouts",
        "river bridge",
    ];

    let topics = top_topics(texts, 3);

    assert_eq!(topics, vec!["river", "scouts", "cavalry"]);
}

#[rstest]
fn top_topics_respects_limit_and_empty_input() {
    assert!(top_topics(["", "a b"], 8).is_empty());
    assert_eq!(top_topics(["alpha beta gamma delta"], 2).len(), 2);
}
