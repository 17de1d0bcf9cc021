//! Markdown removal for model replies.
//!
//! Not a parser: each rule is an independent regex substitution applied to
//! the output of the previous one, so the order of `RULES` matters.

use regex::Regex;
use std::sync::LazyLock;

struct Rule {
    pattern: Regex,
    replacement: &'static str,
}

impl Rule {
    fn new(pattern: &str, replacement: &'static str) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("markdown rule pattern must compile"),
            replacement,
        }
    }
}

static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        // fenced code blocks, content included
        Rule::new(r"```[\s\S]*?```", ""),
        Rule::new(r"`+", ""),
        // bold before italic
        Rule::new(r"\*\*(.*?)\*\*", "$1"),
        Rule::new(r"__(.*?)__", "$1"),
        Rule::new(r"\*(.*?)\*", "$1"),
        Rule::new(r"_(.*?)_", "$1"),
        // headings and blockquotes
        Rule::new(r"(?m)^\s{0,3}#{1,6}\s+", ""),
        Rule::new(r"(?m)^>\s?", ""),
        // bullets keep a dash so the list still reads as a list
        Rule::new(r"(?m)^\s*[-*+]\s+", "- "),
        Rule::new(r"(?m)^\s*\d+[.)]\s*", ""),
        // horizontal rules
        Rule::new(r"(?m)^([-*_]){3,}\s*$", ""),
        Rule::new(r"<[^>]+>", ""),
    ]
});

/// Strips common markdown syntax, leaving plain prose.
pub fn strip_markdown(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut stripped = text.to_string();
    for rule in RULES.iter() {
        stripped = rule
            .pattern
            .replace_all(&stripped, rule.replacement)
            .into_owned();
    }

    stripped.replace('\u{00A0}', " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_empty_input() {
        assert_eq!(strip_markdown(""), "");
        assert_eq!(strip_markdown("   \n  "), "");
    }

    #[test]
    fn test_fenced_code_block_is_removed_with_content() {
        let input = "앞 문단\n```rust\nfn main() {}\n```\n뒷 문단";
        assert_eq!(strip_markdown(input), "앞 문단\n\n뒷 문단");
    }

    #[rstest]
    #[case("`inline` code", "inline code")]
    #[case("**굵게** 표시", "굵게 표시")]
    #[case("__굵게__ 표시", "굵게 표시")]
    #[case("*기울임* 표시", "기울임 표시")]
    #[case("_기울임_ 표시", "기울임 표시")]
    #[case("***둘 다***", "둘 다")]
    fn test_inline_markers(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(strip_markdown(input), expected);
    }

    #[test]
    fn test_headings_and_blockquotes() {
        let input = "# 제목\n   ### 소제목\n> 인용문\n>붙은 인용";
        assert_eq!(strip_markdown(input), "제목\n소제목\n인용문\n붙은 인용");
    }

    #[test]
    fn test_heading_without_space_is_kept() {
        assert_eq!(strip_markdown("#해시태그"), "#해시태그");
    }

    #[test]
    fn test_bullets_are_normalized_to_dash() {
        let input = "목록\n+ 하나\n  - 둘";
        assert_eq!(strip_markdown(input), "목록\n- 하나\n- 둘");
    }

    #[test]
    fn test_star_bullet_survives_italic_pass() {
        // a lone `* ` has no closing star, so the italic rule leaves it alone
        assert_eq!(strip_markdown("목록\n* 셋"), "목록\n- 셋");
    }

    #[test]
    fn test_ordered_markers_are_removed() {
        let input = "1. 첫째\n2) 둘째\n10.열째";
        assert_eq!(strip_markdown(input), "첫째\n둘째\n열째");
    }

    #[test]
    fn test_horizontal_rule_is_removed() {
        let input = "위\n---\n아래";
        assert_eq!(strip_markdown(input), "위\n\n아래");
    }

    #[test]
    fn test_html_tags_and_nbsp() {
        let input = "<b>강조</b>\u{00A0}텍스트<br/>";
        assert_eq!(strip_markdown(input), "강조 텍스트");
    }

    #[test]
    fn test_rule_order_inline_code_inside_bold() {
        assert_eq!(strip_markdown("**`PM` 역량**"), "PM 역량");
    }

    #[rstest]
    #[case("사주 분석 결과입니다.\n\n강점: 빠른 학습력\n보완: 우유부단함")]
    #[case("- 첫 항목\n- 둘째 항목")]
    #[case("# 제목\n**굵게** 그리고 `코드`\n1. 순서\n---\n<p>끝</p>")]
    fn test_idempotent_on_stripped_output(#[case] input: &str) {
        let once = strip_markdown(input);
        let twice = strip_markdown(&once);
        assert_eq!(once, twice);
    }
}
