//! Knowledge-base lookup parser

use serde_json::json;

use super::ParseError;
use crate::types::{RawStep, ToolId};

const CUE: &str = "who is";

/// Parse "who is NAME" into one `kb` step
pub fn parse_kb(text: &str) -> Result<Vec<RawStep>, ParseError> {
    let lowered = text.to_lowercase();
    let Some((_, rest)) = lowered.split_once(CUE) else {
        return Ok(Vec::new());
    };

    let name = rest
        .trim()
        .trim_end_matches(['?', '.', '!'])
        .trim();
    if name.is_empty() {
        tracing::warn!("'who is' cue without a name");
        return Ok(Vec::new());
    }

    Ok(vec![RawStep::new(ToolId::Kb, json!({ "q": name }))])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_name_after_cue() {
        assert_eq!(
            parse_kb("Who is Ada Lovelace?").unwrap(),
            vec![RawStep::new(ToolId::Kb, json!({"q": "ada lovelace"}))]
        );
    }

    #[test]
    fn test_trailing_punctuation_stripped() {
        let steps = parse_kb("who is  grace hopper?!.").unwrap();
        assert_eq!(steps[0].args["q"], "grace hopper");
    }

    #[test]
    fn test_empty_name_yields_nothing() {
        assert!(parse_kb("who is ?").unwrap().is_empty());
        assert!(parse_kb("what is 2 + 2").unwrap().is_empty());
    }
}
