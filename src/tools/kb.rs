//! Knowledge-base lookup tool

use crate::tool::{ToolContext, ToolError};
use crate::types::{Answer, KbArgs};

pub const NOT_FOUND: &str = "No entry found.";

pub fn handle(args: &KbArgs, ctx: &mut ToolContext<'_>) -> Result<Answer, ToolError> {
    let summary = match ctx.reference.knowledge_base().lookup(&args.q) {
        Some(entry) => entry.summary.clone(),
        None => {
            tracing::info!(q = %args.q, "no knowledge-base entry");
            NOT_FOUND.to_string()
        }
    };
    ctx.working_set.set_last_lookup(summary.clone());
    Ok(Answer::Text(summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{KbEntry, KnowledgeBase, ReferenceData, WorkingSet};

    fn run(q: &str, reference: &ReferenceData, ws: &mut WorkingSet) -> Answer {
        let mut ctx = ToolContext::new(ws, reference);
        handle(&KbArgs { q: q.to_string() }, &mut ctx).unwrap()
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let reference = ReferenceData::builtin();
        let mut ws = WorkingSet::new();
        let answer = run("ada lovelace", &reference, &mut ws);
        assert!(answer.as_text().unwrap().starts_with("Ada Lovelace was"));
        assert_eq!(ws.last_lookup(), answer.as_text());
    }

    #[test]
    fn test_missing_entry() {
        let reference = ReferenceData::builtin().with_knowledge_base(KnowledgeBase {
            entries: vec![KbEntry {
                name: "Edsger Dijkstra".to_string(),
                summary: "Shortest paths.".to_string(),
            }],
        });
        let mut ws = WorkingSet::new();
        assert_eq!(
            run("ada lovelace", &reference, &mut ws),
            Answer::Text(NOT_FOUND.to_string())
        );
    }
}
