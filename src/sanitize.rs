//! Name sanitising for Sonatype Lifecycle identifiers
//!
//! Source-control systems accept names that are illegal in Sonatype Lifecycle
//! or dangerous once interpolated into other tooling. Everything here is a
//! pure function of its input (plus the run's [`WhitespacePolicy`]) so that a
//! given source entity maps to the same target identifier on every run.

use std::sync::LazyLock;

use log::warn;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Characters replaced by `-` in organization and application names.
const BANNED_CHARS_NAME: &str = ";$!&|()[]<>";

/// Characters replaced by `-` in application public ids.
const BANNED_CHARS_ID: &str = ";$!&|()[]<> _#";

/// Two or more consecutive whitespace characters.
static MULTIPLE_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("MULTIPLE_WHITESPACE is a valid regex pattern"));

/// Leading dot, shell/URL metacharacters or whitespace anywhere, trailing dot or slash.
static DANGEROUS_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\.|[;$!*&|()\[\]<>#?~%'\s]|[./]$")
        .expect("DANGEROUS_REF is a valid regex pattern")
});

/// A well-formed percent escape.
static PERCENT_ESCAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"%[0-9A-Fa-f]{2}").expect("PERCENT_ESCAPE is a valid regex pattern")
});

/// How a lone whitespace character inside a name is treated.
///
/// Runs of two or more whitespace characters always collapse to a single `-`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WhitespacePolicy {
    /// Leave a single internal space as it is: `"Org 1"` stays `"Org 1"`.
    #[default]
    Preserve,
    /// Replace every remaining whitespace character: `"Org 1"` becomes `"Org-1"`.
    Hyphenate,
}

/// Maps raw external names to Sonatype Lifecycle names and public ids.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sanitizer {
    whitespace: WhitespacePolicy,
}

impl Sanitizer {
    pub fn new(whitespace: WhitespacePolicy) -> Self {
        Self { whitespace }
    }

    pub fn whitespace_policy(&self) -> WhitespacePolicy {
        self.whitespace
    }

    /// Safe organization/application name.
    pub fn safe_name(&self, raw: &str) -> String {
        let replaced: String = raw
            .trim()
            .chars()
            .map(|c| {
                if c == '\t' || BANNED_CHARS_NAME.contains(c) {
                    '-'
                } else {
                    c
                }
            })
            .collect();

        let collapsed = MULTIPLE_WHITESPACE.replace_all(&replaced, "-");

        match self.whitespace {
            WhitespacePolicy::Preserve => collapsed.into_owned(),
            WhitespacePolicy::Hyphenate => collapsed
                .chars()
                .map(|c| if c.is_whitespace() { '-' } else { c })
                .collect(),
        }
    }

    /// Safe application public id: the safe name with the stricter id
    /// denylist applied, lowercased.
    pub fn safe_id(&self, raw: &str) -> String {
        self.safe_name(raw)
            .chars()
            .map(|c| {
                if c.is_whitespace() || BANNED_CHARS_ID.contains(c) {
                    '-'
                } else {
                    c
                }
            })
            .collect::<String>()
            .to_lowercase()
    }
}

/// Whether a branch name may be handed to Sonatype Lifecycle as a base branch.
pub fn is_branch_name_permitted(branch: Option<&str>) -> bool {
    match branch {
        Some(name) if !name.trim().is_empty() => !DANGEROUS_REF.is_match(name),
        _ => false,
    }
}

/// Whether a repository URL is safe once query-decoded (`+` reads as a space).
///
/// Fails closed: malformed escapes or non UTF-8 decodings are not permitted.
pub fn is_repository_url_permitted(url: &str) -> bool {
    if url.trim().is_empty() {
        return false;
    }

    if PERCENT_ESCAPE.find_iter(url).count() != url.matches('%').count() {
        warn!("Failed to URL decode Repository URL: {}", url);
        return false;
    }

    match urlencoding::decode(&url.replace('+', " ")) {
        Ok(decoded) => !DANGEROUS_REF.is_match(&decoded),
        Err(_) => {
            warn!("Failed to URL decode Repository URL: {}", url);
            false
        }
    }
}
