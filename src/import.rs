//! Parse a Markdown skill book into catalog records.
//!
//! Each skill is a `## <skillKey> — <Name>` section with bullet metadata and
//! `###` subsections:
//!
//! ```text
//! ## planning.questionsPack5 — Planning questions
//! - **Stage:** planning
//! - **Channel:** structured_questions
//! - **Allowed tools:** none
//! ### Input Schema
//! ### Output Schema
//! ### Prompt (FULL)
//! ### Guidelines
//! ```

use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedSkill {
    pub skill_key: String,
    pub stage: String,
    pub channel: String,
    pub allowed_tools: Vec<String>,
    pub input_schema: String,
    pub output_schema: String,
    pub prompt: String,
    pub guidelines: String,
}

pub struct SkillBookParser {
    section_re: Regex,
    heading_re: Regex,
    subsection_re: Regex,
    fenced_re: Regex,
    stage_re: Regex,
    channel_re: Regex,
    tools_re: Regex,
}

impl SkillBookParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            section_re: Regex::new(r"(?m)^##\s+")?,
            heading_re: Regex::new(r"^([\w.]+)\s+[—–-]\s+(.*)$")?,
            subsection_re: Regex::new(r"(?m)^###\s+(.+?)\s*$")?,
            fenced_re: Regex::new(r"```[\w-]*[ \t]*\r?\n([\s\S]*?)```")?,
            stage_re: Regex::new(r"(?m)^- \*\*Stage:\*\*[ \t]*(.*?)\s*$")?,
            channel_re: Regex::new(r"(?m)^- \*\*Channel:\*\*[ \t]*(.*?)\s*$")?,
            tools_re: Regex::new(r"(?m)^- \*\*Allowed tools:\*\*[ \t]*(.*?)\s*$")?,
        })
    }

    /// Parse every well-formed skill section. Sections whose heading is not
    /// `<key> — <name>` are skipped.
    pub fn parse(&self, content: &str) -> Vec<ImportedSkill> {
        let skills: Vec<_> = self
            .section_re
            .split(content)
            .skip(1)
            .filter_map(|section| self.parse_section(section))
            .collect();
        debug!("Parsed {} skills from skill book", skills.len());
        skills
    }

    fn parse_section(&self, section: &str) -> Option<ImportedSkill> {
        let (heading, body) = section.split_once('\n').unwrap_or((section, ""));
        let Some(caps) = self.heading_re.captures(heading.trim_end()) else {
            debug!("Skipping section without a skill heading: {}", heading.trim());
            return None;
        };
        let skill_key = caps[1].to_string();

        let allowed_tools = match self.capture(&self.tools_re, body) {
            tools if tools.is_empty() || tools.eq_ignore_ascii_case("none") => Vec::new(),
            tools => tools
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
        };

        let prompt = self
            .subsection(body, "Prompt")
            .map(|text| match self.fenced(text) {
                Some(block) => block,
                None => text.trim().to_string(),
            })
            .unwrap_or_default();

        Some(ImportedSkill {
            stage: self.capture(&self.stage_re, body),
            channel: self.capture(&self.channel_re, body),
            allowed_tools,
            input_schema: self
                .subsection(body, "Input Schema")
                .and_then(|text| self.fenced(text))
                .unwrap_or_default(),
            output_schema: self
                .subsection(body, "Output Schema")
                .and_then(|text| self.fenced(text))
                .unwrap_or_default(),
            prompt,
            guidelines: self
                .subsection(body, "Guidelines")
                .map(|text| text.trim().to_string())
                .unwrap_or_default(),
            skill_key,
        })
    }

    fn capture(&self, re: &Regex, body: &str) -> String {
        re.captures(body)
            .map(|caps| caps[1].trim().to_string())
            .unwrap_or_default()
    }

    /// Body of the first `### <title>...` subsection, up to the next `###`
    /// heading or a `---` rule. Lines inside fenced blocks never end it.
    fn subsection<'a>(&self, body: &'a str, title: &str) -> Option<&'a str> {
        let fences = fenced_ranges(body);
        let outside = |pos: usize| !fences.iter().any(|fence| fence.contains(&pos));

        let headings: Vec<_> = self
            .subsection_re
            .captures_iter(body)
            .filter(|caps| caps.get(0).is_some_and(|m| outside(m.start())))
            .collect();
        for (i, caps) in headings.iter().enumerate() {
            if !caps[1].starts_with(title) {
                continue;
            }
            let start = caps.get(0).map(|m| m.end())?;
            let end = headings
                .get(i + 1)
                .and_then(|next| next.get(0))
                .map(|m| m.start())
                .unwrap_or(body.len());
            let end = body[start..end]
                .match_indices("\n---")
                .map(|(at, _)| start + at)
                .find(|&at| outside(at))
                .unwrap_or(end);
            return Some(&body[start..end]);
        }
        None
    }

    fn fenced(&self, text: &str) -> Option<String> {
        self.fenced_re
            .captures(text)
            .map(|caps| caps[1].trim().to_string())
    }
}

/// Byte ranges of ``` fenced blocks, fence lines included. An unclosed
/// fence runs to the end of the text.
fn fenced_ranges(text: &str) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut open = None;
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if line.trim_start().starts_with("```") {
            match open.take() {
                Some(start) => ranges.push(start..offset + line.len()),
                None => open = Some(offset),
            }
        }
        offset += line.len();
    }
    if let Some(start) = open {
        ranges.push(start..text.len());
    }
    ranges
}
