//! Section detection and reordering for analysis replies.
//!
//! The backend returns free text. Sections are located by keyword, sliced at
//! the next section's start and re-emitted in a fixed, numbered order.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

pub const MAIN_HEADING: &str = "사주(전문/분석):";

pub const MISSING_MAIN_PLACEHOLDER: &str =
    "사주(전문/분석) 내용이 응답에 포함되어 있지 않습니다. 아래는 전달받은 분석을 재구성한 결과입니다.";

/// Main text shorter than this (in characters) is replaced by a summary.
const MIN_MAIN_CHARS: usize = 10;

static PLACEHOLDER_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\(\d+\)\s*$").expect("valid regex"));
static INLINE_INDEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\d+\)\s*").expect("valid regex"));
static EXTRA_BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid regex"));
static HEADING_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\n:\-–—]+[:\-–—]?\s*").expect("valid regex"));
static ORDINAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+[.)]\s*").expect("valid regex"));
static LEADING_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-\s\d.)(]+").expect("valid regex"));

static DEFAULT_MATCHERS: LazyLock<SectionMatchers> = LazyLock::new(SectionMatchers::default);

/// The five labeled regions of an analysis reply, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    Strengths,
    Weaknesses,
    Action,
    RecommendJob,
    Skills,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Strengths,
        Section::Weaknesses,
        Section::Action,
        Section::RecommendJob,
        Section::Skills,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Section::Strengths => "strengths",
            Section::Weaknesses => "weaknesses",
            Section::Action => "action",
            Section::RecommendJob => "recommend_job",
            Section::Skills => "skills",
        }
    }

    /// Numbered heading used when rendering.
    pub fn heading(self) -> &'static str {
        match self {
            Section::Strengths => "(1) 강점 2가지:",
            Section::Weaknesses => "(2) 보완해야 할 점 1가지:",
            Section::Action => "(3) 권장 행동 1줄:",
            Section::RecommendJob => "(4) 추천 PM 직무:",
            Section::Skills => "(5) 관련 스킬 키워드 3개:",
        }
    }

    fn summary_label(self) -> &'static str {
        match self {
            Section::Strengths => "강점",
            Section::Weaknesses => "보완점",
            Section::Action => "권장 행동",
            Section::RecommendJob => "추천 직무",
            Section::Skills => "스킬",
        }
    }

    fn summary_needs_text(self) -> bool {
        matches!(self, Section::Strengths | Section::Weaknesses)
    }

    fn default_pattern(self) -> &'static str {
        match self {
            Section::Strengths => r"(?i)(강점|장점|Strengths?)[\s:\-–—]*",
            Section::Weaknesses => r"(?i)(보완|단점|보완해야|개선)[\s:\-–—]*",
            Section::Action => r"(?i)(권장|권장 행동|행동)[\s:\-–—]*",
            Section::RecommendJob => r"(?i)(추천|추천 직무|추천직무)[\s:\-–—]*",
            Section::Skills => r"(?i)(관련 스킬|스킬|키워드|관련 키워드)[\s:\-–—]*",
        }
    }
}

/// Locates the start of a section label inside a reply.
pub trait SectionMatcher: Send + Sync {
    /// Byte offset of the first label occurrence, if any.
    fn find_start(&self, text: &str) -> Option<usize>;
}

impl SectionMatcher for Regex {
    fn find_start(&self, text: &str) -> Option<usize> {
        self.find(text).map(|m| m.start())
    }
}

/// Matcher per section. Defaults to the Korean keyword patterns; any entry can
/// be swapped out or removed without touching the reordering itself.
pub struct SectionMatchers {
    matchers: BTreeMap<Section, Box<dyn SectionMatcher>>,
}

impl Default for SectionMatchers {
    fn default() -> Self {
        let mut matchers = Self::empty();
        for section in Section::ALL {
            let pattern = Regex::new(section.default_pattern()).expect("valid section pattern");
            matchers = matchers.with(section, pattern);
        }
        matchers
    }
}

impl SectionMatchers {
    /// A matcher set that recognizes nothing.
    pub fn empty() -> Self {
        Self {
            matchers: BTreeMap::new(),
        }
    }

    pub fn with(mut self, section: Section, matcher: impl SectionMatcher + 'static) -> Self {
        self.matchers.insert(section, Box::new(matcher));
        self
    }

    pub fn without(mut self, section: Section) -> Self {
        self.matchers.remove(&section);
        self
    }

    /// Splits a reply into its main text and labeled sections.
    pub fn extract(&self, text: &str) -> SectionSet {
        let clean = clean_placeholders(text);

        let mut found: Vec<(Section, usize)> = self
            .matchers
            .iter()
            .filter_map(|(section, matcher)| {
                matcher.find_start(&clean).map(|start| (*section, start))
            })
            .filter(|(_, start)| *start <= clean.len())
            .collect();
        // stable: equal offsets keep canonical order
        found.sort_by_key(|(_, start)| *start);

        let mut set = SectionSet::default();

        let Some(&(_, first)) = found.first() else {
            set.main = clean;
            return set;
        };

        if first > 0 {
            set.main = clean.get(..first).unwrap_or_default().trim().to_string();
        }

        for &(section, start) in &found {
            let end = found
                .iter()
                .map(|(_, other)| *other)
                .filter(|other| *other > start)
                .min()
                .unwrap_or(clean.len());

            let Some(span) = clean.get(start..end) else {
                continue;
            };
            let content = section_content(span);
            if !content.is_empty() {
                set.sections.insert(section, content);
            }
        }

        set
    }

    /// Reorders an already markdown-stripped reply.
    pub fn reorder(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        let mut set = self.extract(text);
        set.fill_missing_main();
        set.render()
    }
}

/// Reorders a markdown-stripped reply using the default Korean matchers.
pub fn reorder_reply(text: &str) -> String {
    DEFAULT_MATCHERS.reorder(text)
}

/// Main analysis text plus the content of each recognized section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionSet {
    pub main: String,
    sections: BTreeMap<Section, String>,
}

impl SectionSet {
    /// Content for `section`; empty when the section was not found.
    pub fn get(&self, section: Section) -> &str {
        self.sections.get(&section).map(String::as_str).unwrap_or("")
    }

    pub fn contains(&self, section: Section) -> bool {
        self.sections.contains_key(&section)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Synthesizes a one-line summary from the sections when the main text is
    /// missing or too short to be meaningful.
    pub fn fill_missing_main(&mut self) {
        if self.main.chars().count() >= MIN_MAIN_CHARS {
            return;
        }

        let parts: Vec<String> = Section::ALL
            .iter()
            .filter(|section| self.contains(**section))
            .filter_map(|section| {
                let line = first_line(self.get(*section));
                let skip = line.is_empty() && section.summary_needs_text();
                (!skip).then(|| format!("{}: {}", section.summary_label(), line))
            })
            .collect();

        if !parts.is_empty() {
            self.main = parts.join(" / ");
        }
    }

    pub fn render(&self) -> String {
        let mut parts = Vec::with_capacity(Section::ALL.len() + 1);

        if self.main.is_empty() {
            parts.push(MISSING_MAIN_PLACEHOLDER.to_string());
        } else {
            parts.push(format!("{}\n{}", MAIN_HEADING, self.main));
        }

        for section in Section::ALL {
            if let Some(content) = self.sections.get(&section) {
                parts.push(format!("\n{}\n{}", section.heading(), content));
            }
        }

        parts.join("\n\n").trim().to_string()
    }
}

fn clean_placeholders(text: &str) -> String {
    let clean = PLACEHOLDER_LINE.replace_all(text, "");
    let clean = INLINE_INDEX.replace_all(&clean, "");
    EXTRA_BLANK_LINES.replace_all(&clean, "\n\n").into_owned()
}

/// Drops the section's own label line and a leading list numeral.
fn section_content(span: &str) -> String {
    let content = HEADING_RUN.replace(span.trim(), "");
    let content = ORDINAL.replace(&content, "");
    content.trim().to_string()
}

fn first_line(content: &str) -> String {
    content
        .lines()
        .find(|line| !line.trim().is_empty())
        .map(|line| LEADING_PUNCT.replace(line, "").trim().to_string())
        .unwrap_or_default()
}
