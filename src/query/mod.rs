//! Query compilation module
//!
//! Turns a free-text query into a regular expression the backends can run:
//! - Explicit regex: `/foo.*bar/` is passed through verbatim
//! - Wildcards: `log*` matches `logger`, `*Handler` matches `ErrorHandler`
//! - Plurals: `cat` matches `cats` and `cats` matches `cat`
//! - Word order: up to four words match in any order

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use tracing::debug;

/// Largest token count for which every word order is generated
pub const DEFAULT_MAX_PERMUTED_TOKENS: usize = 4;

/// Hard cap on the permutation limit; the pattern grows with n!
pub const MAX_PERMUTED_TOKENS: usize = 6;

static DEFAULT_COMPILER: Lazy<QueryCompiler> = Lazy::new(QueryCompiler::new);

/// Compile a query with the default compiler
pub fn compile(raw: &str) -> String {
    DEFAULT_COMPILER.compile(raw)
}

/// Stateless query compiler. Build once and share.
#[derive(Debug, Clone)]
pub struct QueryCompiler {
    /// Matches `/.../` queries
    explicit_re: Regex,
    /// Word and wildcard runs
    words_re: Regex,
    /// Permutations are generated for 1..=max_permuted_tokens words
    max_permuted_tokens: usize,
}

impl QueryCompiler {
    /// Create a compiler with the default permutation limit
    pub fn new() -> Self {
        Self::with_max_permuted_tokens(DEFAULT_MAX_PERMUTED_TOKENS)
    }

    /// Create a compiler with a custom permutation limit, capped at [`MAX_PERMUTED_TOKENS`]
    pub fn with_max_permuted_tokens(max_permuted_tokens: usize) -> Self {
        Self {
            // ASCII whitespace only, like the backends' `\s`.
            explicit_re: Regex::new(r"^[\t\n\f\r ]*/(.*)/[\t\n\f\r ]*$")
                .expect("static regex"),
            // ASCII word characters, the same class the backends' `\w` covers.
            words_re: Regex::new(r"[0-9A-Za-z_*]+").expect("static regex"),
            max_permuted_tokens: max_permuted_tokens.min(MAX_PERMUTED_TOKENS),
        }
    }

    pub fn max_permuted_tokens(&self) -> usize {
        self.max_permuted_tokens
    }

    /// Compile a raw query into a search pattern. Never fails.
    pub fn compile(&self, raw: &str) -> String {
        debug!("old query: {:?}", raw);

        if let Some(cap) = self.explicit_re.captures(raw) {
            let pattern = cap[1].to_string();
            debug!("new query (explicit regex): {:?}", pattern);
            return pattern;
        }

        let tokens: Vec<String> = self
            .words_re
            .find_iter(raw)
            .map(|m| munge_word(m.as_str()))
            .collect();

        let pattern = if !tokens.is_empty() && tokens.len() <= self.max_permuted_tokens {
            let mut seen = HashSet::new();
            permutations(&tokens)
                .into_iter()
                .map(|order| order.join(".*"))
                .filter(|alt| seen.insert(alt.clone()))
                .collect::<Vec<_>>()
                .join("|")
        } else {
            tokens.join(".*")
        };

        debug!("new query: {:?}", pattern);
        pattern
    }
}

impl Default for QueryCompiler {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply wildcard and plural tolerance to one token and anchor it on word boundaries
fn munge_word(word: &str) -> String {
    let mut x = word.to_string();

    if x.starts_with('*') {
        x = format!(r"\w{}", x);
    }

    if let Some(stem) = x.strip_suffix('*') {
        x = format!(r"{}\w*", stem);
    } else if x.ends_with('s') {
        x.push('?');
    } else {
        x.push_str("s?");
    }

    format!(r"\b{}\b", x)
}

/// Every ordering of `items`, starting with the original order (Heap's algorithm)
fn permutations<T: Clone>(items: &[T]) -> Vec<Vec<T>> {
    let mut current = items.to_vec();
    let mut out = vec![current.clone()];
    let n = current.len();
    let mut c = vec![0usize; n];

    let mut i = 1;
    while i < n {
        if c[i] < i {
            if i % 2 == 0 {
                current.swap(0, i);
            } else {
                current.swap(c[i], i);
            }
            out.push(current.clone());
            c[i] += 1;
            i = 1;
        } else {
            c[i] = 0;
            i += 1;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alternatives(pattern: &str) -> HashSet<String> {
        pattern.split('|').map(str::to_string).collect()
    }

    #[test]
    fn test_explicit_regex_passthrough() {
        assert_eq!(compile("/foo.*bar/"), "foo.*bar");
        assert_eq!(compile("   /^fn\\s+main/  "), "^fn\\s+main");
        assert_eq!(compile("/a/b/"), "a/b");
        assert_eq!(compile("//"), "");
    }

    #[test]
    fn test_unicode_whitespace_is_not_trimmed() {
        assert_eq!(compile("\u{a0}/foo/\u{a0}"), r"\bfoos?\b");
        assert_eq!(compile("\t/foo/\r\n"), "foo");
    }

    #[test]
    fn test_malformed_regex_is_not_rejected() {
        assert_eq!(compile("/foo(/"), "foo(");
    }

    #[test]
    fn test_single_word() {
        assert_eq!(compile("cat"), r"\bcats?\b");
    }

    #[test]
    fn test_word_ending_in_s() {
        assert_eq!(compile("cats"), r"\bcats?\b");
    }

    #[test]
    fn test_trailing_wildcard() {
        assert_eq!(compile("log*"), r"\blog\w*\b");
    }

    #[test]
    fn test_leading_wildcard() {
        assert_eq!(compile("*Handler"), r"\b\w*Handlers?\b");
        assert_eq!(compile("*"), r"\b\w\w*\b");
    }

    #[test]
    fn test_two_words_any_order() {
        let alts = alternatives(&compile("foo bar"));
        assert_eq!(alts.len(), 2);
        assert!(alts.contains(r"\bfoos?\b.*\bbars?\b"));
        assert!(alts.contains(r"\bbars?\b.*\bfoos?\b"));
    }

    #[test]
    fn test_four_words_every_order() {
        let alts = alternatives(&compile("a b c d"));
        assert_eq!(alts.len(), 24);
        assert!(alts.contains(r"\bds?\b.*\bcs?\b.*\bbs?\b.*\bas?\b"));
    }

    #[test]
    fn test_five_words_keep_order() {
        let pattern = compile("one two three four five");
        assert!(!pattern.contains('|'));
        assert_eq!(
            pattern,
            r"\bones?\b.*\btwos?\b.*\bthrees?\b.*\bfours?\b.*\bfives?\b"
        );
    }

    #[test]
    fn test_punctuation_is_ignored() {
        assert_eq!(compile("cat!"), r"\bcats?\b");
        let alts = alternatives(&compile("foo.bar()"));
        assert!(alts.contains(r"\bfoos?\b.*\bbars?\b"));
    }

    #[test]
    fn test_no_tokens_gives_empty_pattern() {
        assert_eq!(compile(""), "");
        assert_eq!(compile("!@# $%^"), "");
        assert_eq!(compile("   "), "");
    }

    #[test]
    fn test_repeated_words_collapse() {
        assert_eq!(compile("foo foo"), r"\bfoos?\b.*\bfoos?\b");
    }

    #[test]
    fn test_compile_is_deterministic() {
        let compiler = QueryCompiler::new();
        assert_eq!(compiler.compile("x y z"), compiler.compile("x y z"));
    }

    #[test]
    fn test_compiled_pattern_matches_source() {
        let re = Regex::new(&compile("reader buffer")).unwrap();
        assert!(re.is_match("let buffers = BufReader::new(reader);"));
        assert!(re.is_match("reader.fill(buffer)"));
        assert!(!re.is_match("readers"));
    }

    #[test]
    fn test_custom_permutation_limit() {
        let compiler = QueryCompiler::with_max_permuted_tokens(1);
        assert_eq!(compiler.compile("foo bar"), r"\bfoos?\b.*\bbars?\b");
        assert_eq!(compiler.max_permuted_tokens(), 1);
    }

    #[test]
    fn test_permutation_limit_is_capped() {
        let compiler = QueryCompiler::with_max_permuted_tokens(10);
        assert_eq!(compiler.max_permuted_tokens(), MAX_PERMUTED_TOKENS);
        assert!(!compiler.compile("a b c d e f g").contains('|'));
        assert_eq!(alternatives(&compiler.compile("a b c d e f")).len(), 720);
    }

    #[test]
    fn test_permutations() {
        let perms = permutations(&[1, 2, 3]);
        assert_eq!(perms.len(), 6);
        assert_eq!(perms[0], vec![1, 2, 3]);
        let unique: HashSet<_> = perms.into_iter().collect();
        assert_eq!(unique.len(), 6);
    }
}
