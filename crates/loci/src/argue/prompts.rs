//! Skill prompts for the pipeline's LLM nodes.
//!
//! Each skill ships an embedded default prompt; setting `LOCI_SKILLS_DIR`
//! overrides it with `<dir>/<skill>/prompt.md` when that file exists, so
//! prompts can be tuned without rebuilding.

use std::path::Path;

const HISTORIAN: &str = include_str!("../../skills/historian/prompt.md");
const VIBE: &str = include_str!("../../skills/vibe/prompt.md");
const TREASURER: &str = include_str!("../../skills/treasurer/prompt.md");

/// System prompt for the named skill.
///
/// Unknown skills get an empty prompt rather than an error; the node
/// still runs, just without persona instructions.
pub fn skill_prompt(name: &str) -> String {
    if let Ok(dir) = std::env::var("LOCI_SKILLS_DIR") {
        let path = Path::new(&dir).join(name).join("prompt.md");
        if let Ok(text) = std::fs::read_to_string(&path) {
            return text;
        }
    }
    match name {
        "historian" => HISTORIAN,
        "vibe" => VIBE,
        "treasurer" => TREASURER,
        _ => "",
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_prompts_are_nonempty() {
        assert!(skill_prompt("historian").contains("Historian"));
        assert!(skill_prompt("vibe").contains("Score:"));
        assert!(skill_prompt("treasurer").contains("Treasurer"));
    }

    #[test]
    fn unknown_skill_is_empty() {
        assert_eq!(skill_prompt("no-such-skill"), "");
    }
}
