//! Term ranking over the page's paragraph text.
//!
//! The page is the whole corpus, so inverse document frequency is the same
//! for every term and the ranking reduces to in-document frequency. Scores
//! are L2-normalized counts.

use crate::core::markup::static_selector;
use crate::domain::model::{Keyword, KeywordOutcome};
use regex::Regex;
use scraper::Html;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

pub const DEFAULT_KEYWORD_LIMIT: usize = 10;

/// 所有 <p> 的文字以空白串接
pub fn paragraph_text(document: &Html) -> String {
    document
        .select(static_selector!("p"))
        .map(|p| p.text().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// 空白內容直接回傳 NoContent，不進入權重計算
pub fn extract_keywords(text: &str, limit: usize) -> KeywordOutcome {
    if text.trim().is_empty() {
        return KeywordOutcome::NoContent;
    }
    KeywordOutcome::Ranked(rank_terms(text, limit))
}

fn rank_terms(text: &str, limit: usize) -> Vec<Keyword> {
    let counts = term_counts(text);
    let norm = counts
        .values()
        .map(|&count| (count * count) as f64)
        .sum::<f64>()
        .sqrt();

    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    // 分數相同時依字母排序，確保輸出穩定
    ranked.sort_by(|(a_term, a_count), (b_term, b_count)| {
        b_count.cmp(a_count).then_with(|| a_term.cmp(b_term))
    });

    ranked
        .into_iter()
        .take(limit)
        .map(|(term, count)| Keyword {
            term,
            score: if norm > 0.0 { count as f64 / norm } else { 0.0 },
        })
        .collect()
}

fn term_counts(text: &str) -> HashMap<String, usize> {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    let token = TOKEN.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("valid token pattern"));

    let lowered = text.to_lowercase();
    let mut counts = HashMap::new();
    for term in token.find_iter(&lowered).map(|m| m.as_str()) {
        if is_stop_word(term) {
            continue;
        }
        *counts.entry(term.to_string()).or_insert(0) += 1;
    }
    counts
}

fn is_stop_word(term: &str) -> bool {
    static STOP_WORDS: OnceLock<HashSet<&'static str>> = OnceLock::new();
    STOP_WORDS
        .get_or_init(|| ENGLISH_STOP_WORDS.iter().copied().collect())
        .contains(term)
}

const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst",
    "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway",
    "anywhere", "are", "around", "as", "at", "back", "be", "became", "because", "become",
    "becomes", "becoming", "been", "before", "beforehand", "behind", "being", "below", "beside",
    "besides", "between", "beyond", "bill", "both", "bottom", "but", "by", "call", "can",
    "cannot", "cant", "co", "con", "could", "couldnt", "cry", "de", "describe", "detail", "do",
    "done", "down", "due", "during", "each", "eg", "eight", "either", "eleven", "else",
    "elsewhere", "empty", "enough", "etc", "even", "ever", "every", "everyone", "everything",
    "everywhere", "except", "few", "fifteen", "fifty", "fill", "find", "fire", "first", "five",
    "for", "former", "formerly", "forty", "found", "four", "from", "front", "full", "further",
    "get", "give", "go", "had", "has", "hasnt", "have", "he", "hence", "her", "here",
    "hereafter", "hereby", "herein", "hereupon", "hers", "herself", "him", "himself", "his",
    "how", "however", "hundred", "i", "ie", "if", "in", "inc", "indeed", "interest", "into",
    "is", "it", "its", "itself", "keep", "last", "latter", "latterly", "least", "less", "ltd",
    "made", "many", "may", "me", "meanwhile", "might", "mill", "mine", "more", "moreover",
    "most", "mostly", "move", "much", "must", "my", "myself", "name", "namely", "neither",
    "never", "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor", "not",
    "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto",
    "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own",
    "part", "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem", "seemed",
    "seeming", "seems", "serious", "several", "she", "should", "show", "side", "since",
    "sincere", "six", "sixty", "so", "some", "somehow", "someone", "something", "sometime",
    "sometimes", "somewhere", "still", "such", "system", "take", "ten", "than", "that", "the",
    "their", "them", "themselves", "then", "thence", "there", "thereafter", "thereby",
    "therefore", "therein", "thereupon", "these", "they", "thick", "thin", "third", "this",
    "those", "though", "three", "through", "throughout", "thru", "thus", "to", "together",
    "too", "top", "toward", "towards", "twelve", "twenty", "two", "un", "under", "until", "up",
    "upon", "us", "very", "via", "was", "we", "well", "were", "what", "whatever", "when",
    "whence", "whenever", "where", "whereafter", "whereas", "whereby", "wherein", "whereupon",
    "wherever", "whether", "which", "while", "whither", "who", "whoever", "whole", "whom",
    "whose", "why", "will", "with", "within", "without", "would", "yet", "you", "your", "yours",
    "yourself", "yourselves",
];
