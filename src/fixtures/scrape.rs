//! Example-pair acquisition
//!
//! Fetches the problem description HTML from the public API and extracts the
//! example input/output pairs from its `<pre>` blocks. The URL is validated
//! before any network call; a missing `question` field or a non-success
//! status is fatal to the fetch step, so no partial fixture set is stored.

use std::time::Duration;

use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

use super::FixtureCase;

/// Default API endpoint serving problem descriptions.
pub const DEFAULT_API_BASE: &str = "https://alfa-leetcode-api.onrender.com";

/// Errors that occur while acquiring example pairs.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid problem URL '{0}': expected a problems/<slug>/ segment")]
    InvalidUrl(String),

    #[error("problem API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("problem API returned HTTP {0}")]
    Status(u16),

    #[error("problem API response has no question body")]
    MissingQuestion,
}

#[derive(Debug, Deserialize)]
struct QuestionResponse {
    question: Option<String>,
}

/// Extract the title slug from a problem URL.
///
/// The URL must contain a `problems/<slug>/` path segment; absence is fatal
/// before any network traffic happens.
pub fn extract_slug(url: &str) -> Result<String, FetchError> {
    let re = Regex::new(r"problems/([^/]+)/").expect("INVARIANT: slug pattern is valid");
    re.captures(url)
        .map(|caps| caps[1].to_string())
        .ok_or_else(|| FetchError::InvalidUrl(url.to_string()))
}

/// Fetch the example pairs for a problem slug.
pub fn fetch_examples(slug: &str, api_base: &str) -> Result<Vec<FixtureCase>, FetchError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()?;

    let url = format!("{api_base}/select?titleSlug={slug}");
    tracing::debug!("fetching problem description from {url}");

    let resp = client.get(&url).send()?;
    if !resp.status().is_success() {
        return Err(FetchError::Status(resp.status().as_u16()));
    }

    let body: QuestionResponse = resp.json()?;
    let html = body.question.ok_or(FetchError::MissingQuestion)?;

    let cases = extract_examples(&html);
    tracing::info!("extracted {} example pair(s) for '{slug}'", cases.len());
    Ok(cases)
}

/// Extract example pairs from problem-description HTML.
///
/// Pairs come from `<pre>` blocks whose lines start with the literal
/// `Input:` / `Output:` prefixes. The input line is split into one parameter
/// per line so the stored fixture matches what the generated harness decodes.
pub fn extract_examples(html: &str) -> Vec<FixtureCase> {
    let pre_re = Regex::new(r"(?s)<pre[^>]*>(.*?)</pre>").expect("INVARIANT: pre pattern is valid");

    let mut cases = Vec::new();
    for caps in pre_re.captures_iter(html) {
        let text = unescape_entities(&strip_tags(&caps[1]));

        let mut input: Option<String> = None;
        let mut output: Option<String> = None;
        for line in text.lines() {
            let line = line.trim();
            if let Some(rest) = line.strip_prefix("Input:") {
                input.get_or_insert_with(|| split_input_fields(rest.trim()));
            } else if let Some(rest) = line.strip_prefix("Output:") {
                output.get_or_insert_with(|| rest.trim().to_string());
            }
        }

        if let (Some(input), Some(output)) = (input, output) {
            cases.push(FixtureCase { input, output });
        }
    }
    cases
}

/// Strip HTML tags, keeping their text content.
fn strip_tags(html: &str) -> String {
    let tag_re = Regex::new(r"<[^>]+>").expect("INVARIANT: tag pattern is valid");
    tag_re.replace_all(html, "").to_string()
}

/// Decode the handful of entities that show up in problem descriptions.
fn unescape_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

/// Split a scraped input line like `nums = [2,7,11,15], target = 9` into one
/// assignment per line. Commas inside brackets or quotes never split, and a
/// comma only splits when an assignment follows it.
fn split_input_fields(raw: &str) -> String {
    let assign_re = Regex::new(r"^\s*[A-Za-z_]\w*\s*=").expect("INVARIANT: assign pattern is valid");

    let mut fields: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut depth = 0i32;
    let mut quote: Option<char> = None;
    let chars: Vec<char> = raw.chars().collect();

    for (i, &c) in chars.iter().enumerate() {
        if let Some(q) = quote {
            current.push(c);
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => {
                quote = Some(c);
                current.push(c);
            }
            '[' => {
                depth += 1;
                current.push(c);
            }
            ']' => {
                depth -= 1;
                current.push(c);
            }
            ',' if depth == 0 => {
                let rest: String = chars[i + 1..].iter().collect();
                if assign_re.is_match(&rest) {
                    fields.push(current.trim().to_string());
                    current.clear();
                } else {
                    current.push(c);
                }
            }
            _ => current.push(c),
        }
    }
    if !current.trim().is_empty() {
        fields.push(current.trim().to_string());
    }

    fields.join("\n")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_slug() {
        assert_eq!(
            extract_slug("https://leetcode.com/problems/two-sum/").unwrap(),
            "two-sum"
        );
        assert_eq!(
            extract_slug("https://leetcode.com/problems/two-sum/description/").unwrap(),
            "two-sum"
        );
    }

    #[test]
    fn test_extract_slug_invalid() {
        assert!(matches!(
            extract_slug("https://leetcode.com/contest/weekly-1/"),
            Err(FetchError::InvalidUrl(_))
        ));
        // Slug without its closing slash is rejected too
        assert!(matches!(
            extract_slug("https://leetcode.com/problems/two-sum"),
            Err(FetchError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_extract_examples_from_pre_blocks() {
        let html = r#"
<p>Given an array...</p>
<pre>
<strong>Input:</strong> nums = [2,7,11,15], target = 9
<strong>Output:</strong> [0,1]
</pre>
<pre>
<strong>Input:</strong> nums = [3,2,4], target = 6
<strong>Output:</strong> [1,2]
</pre>
"#;
        let cases = extract_examples(html);
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].input, "nums = [2,7,11,15]\ntarget = 9");
        assert_eq!(cases[0].output, "[0,1]");
        assert_eq!(cases[1].input, "nums = [3,2,4]\ntarget = 6");
    }

    #[test]
    fn test_extract_examples_unescapes_entities() {
        let html = "<pre>Input: s = &quot;ab&amp;c&quot;\nOutput: true</pre>";
        let cases = extract_examples(html);
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].input, "s = \"ab&c\"");
    }

    #[test]
    fn test_extract_examples_ignores_incomplete_blocks() {
        let html = "<pre>Input: n = 3</pre><pre>just an explanation</pre>";
        assert!(extract_examples(html).is_empty());
    }

    #[test]
    fn test_split_input_fields_respects_brackets_and_quotes() {
        assert_eq!(split_input_fields("a = 2"), "a = 2");
        assert_eq!(
            split_input_fields("nums = [2,7,11,15], target = 9"),
            "nums = [2,7,11,15]\ntarget = 9"
        );
        assert_eq!(
            split_input_fields("words = [\"x,y\", \"z\"], sep = \",\""),
            "words = [\"x,y\", \"z\"]\nsep = \",\""
        );
    }
}
