use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::borrow::Cow;
use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref NON_WORD: Regex = Regex::new(r"\W+").expect("valid regex");
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","about","above","after","again","against","ain","all","am","an","and","any","are","aren","aren't","as","at",
            "be","because","been","before","being","below","between","both","but","by",
            "can","couldn","couldn't",
            "d","did","didn","didn't","do","does","doesn","doesn't","doing","don","don't","down","during",
            "each","few","for","from","further",
            "had","hadn","hadn't","has","hasn","hasn't","have","haven","haven't","having","he","her","here","hers","herself","him","himself","his","how",
            "i","if","in","into","is","isn","isn't","it","it's","its","itself",
            "just","ll","m","ma","me","mightn","mightn't","more","most","mustn","mustn't","my","myself",
            "needn","needn't","no","nor","not","now",
            "o","of","off","on","once","only","or","other","our","ours","ourselves","out","over","own",
            "re","s","same","shan","shan't","she","she's","should","should've","shouldn","shouldn't","so","some","such",
            "t","than","that","that'll","the","their","theirs","them","themselves","then","there","these","they","this","those","through","to","too",
            "under","until","up","ve","very",
            "was","wasn","wasn't","we","were","weren","weren't","what","when","where","which","while","who","whom","why","will","with","won","won't","wouldn","wouldn't",
            "y","you","you'd","you'll","you're","you've","your","yours","yourself","yourselves"
        ];
        words.iter().copied().collect()
    };
}

/// Read-only language rules consulted by the normalizer.
pub trait Analyzer {
    fn is_stopword(&self, term: &str) -> bool;
    fn stem<'a>(&self, term: &'a str) -> Cow<'a, str>;
}

/// English stopwords plus the Snowball English stemmer.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnglishAnalyzer;

impl Analyzer for EnglishAnalyzer {
    fn is_stopword(&self, term: &str) -> bool { STOPWORDS.contains(term) }

    fn stem<'a>(&self, term: &'a str) -> Cow<'a, str> { STEMMER.stem(term) }
}

/// Normalize text with the English rules: NFKC, lowercase, collapse non-word runs,
/// drop stopwords, stem, and join with single spaces.
pub fn normalize(text: &str) -> String {
    normalize_with(text, &EnglishAnalyzer)
}

pub fn normalize_with<A: Analyzer + ?Sized>(text: &str, analyzer: &A) -> String {
    let lowered = text.nfkc().collect::<String>().to_lowercase();
    let spaced = NON_WORD.replace_all(&lowered, " ");
    let mut out = String::with_capacity(spaced.len());
    for token in spaced.split_whitespace() {
        if analyzer.is_stopword(token) { continue; }
        let stem = analyzer.stem(token);
        if stem.is_empty() { continue; }
        if !out.is_empty() { out.push(' '); }
        out.push_str(&stem);
    }
    out
}

/// Normalize a batch, preserving input order.
pub fn normalize_all<A, S>(texts: &[S], analyzer: &A) -> Vec<String>
where
    A: Analyzer + ?Sized,
    S: AsRef<str>,
{
    texts.iter().map(|t| normalize_with(t.as_ref(), analyzer)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_normalize() {
        assert_eq!(normalize("Running, runner's run!"), "run runner run");
    }

    #[test]
    fn empty_input_is_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("  ...!!  "), "");
        assert_eq!(normalize("the and of"), "");
    }

    struct Passthrough;

    impl Analyzer for Passthrough {
        fn is_stopword(&self, term: &str) -> bool { term == "skip" }
        fn stem<'a>(&self, term: &'a str) -> Cow<'a, str> { Cow::Borrowed(term) }
    }

    #[test]
    fn custom_analyzer_is_used() {
        assert_eq!(normalize_with("Skip the Running-Dogs", &Passthrough), "the running dogs");
    }
}
