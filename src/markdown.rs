use regex::Regex;
use std::sync::LazyLock;

use crate::github::Issue;

// `![alt](url)`, non-greedy on both groups. Raw text only: escapes and nested
// brackets or parentheses are not understood.
static IMAGE_RE: LazyLock<Regex> = LazyLock::new(|| match Regex::new(r"!\[.*?\]\((.*?)\)") {
    Ok(re) => re,
    Err(_) => unreachable!("static regex pattern"),
});

/// Return the URL of every Markdown image in `body`, in order of appearance.
/// Duplicates are kept.
pub fn extract_image_urls(body: &str) -> Vec<&str> {
    IMAGE_RE
        .captures_iter(body)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// Replace every literal occurrence of each original URL with its local path.
///
/// Replacements run in the order given, each over the output of the previous
/// one. A URL that is a substring of another URL, or of an earlier local path,
/// is rewritten wherever it occurs in the current text.
pub fn rewrite_body<S, P>(body: &str, replacements: &[(S, P)]) -> String
where
    S: AsRef<str>,
    P: AsRef<str>,
{
    replacements
        .iter()
        .fold(body.to_string(), |text, (url, local)| {
            text.replace(url.as_ref(), local.as_ref())
        })
}

/// File name for an issue's output document: `<number>_<title>.md` with
/// spaces in the title replaced by underscores. No other character is touched.
pub fn issue_filename(issue: &Issue) -> String {
    format!("{}_{}.md", issue.number, issue.title.replace(' ', "_"))
}

/// Full document text: a level-one title heading followed by the body.
pub fn compose_document(title: &str, body: &str) -> String {
    format!("# {title}\n\n{body}")
}
