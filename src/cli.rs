use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;

use query_agent::config::{load_config, AgentConfig};
use query_agent::observability::init_tracing;
use query_agent::Agent;

#[derive(Debug, Parser)]
#[command(name = "query-agent", about = "Answer arithmetic, weather, currency and who-is questions")]
pub struct Cli {
    /// YAML config file; built-in defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,
    /// Force debug logging
    #[arg(long)]
    verbose: bool,
    /// Print the execution outcome as JSON
    #[arg(long, conflicts_with = "plan")]
    json: bool,
    /// Print the compiled plan as JSON without executing it
    #[arg(long)]
    plan: bool,
    /// Read queries from file (one per line; '#' comments supported)
    #[arg(long)]
    script: Option<PathBuf>,
    #[arg(value_name = "QUERY")]
    query: Vec<String>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let mut config = match &self.config {
            Some(path) => load_config(path)
                .with_context(|| format!("failed to load config '{}'", path.display()))?,
            None => AgentConfig::default(),
        };
        if self.verbose {
            config.observability.log_level = "debug".to_string();
        }
        init_tracing(&config.observability);

        let agent = Agent::new(&config).context("failed to build agent")?;

        let queries = self.queries()?;
        if queries.is_empty() {
            bail!("no query given; pass QUERY words or --script");
        }
        for query in &queries {
            self.answer_one(&agent, query)?;
        }
        Ok(())
    }

    fn queries(&self) -> anyhow::Result<Vec<String>> {
        let mut queries = Vec::new();
        if !self.query.is_empty() {
            queries.push(self.query.join(" "));
        }
        if let Some(path) = &self.script {
            let content = fs::read_to_string(path)
                .with_context(|| format!("failed to read script '{}'", path.display()))?;
            queries.extend(
                content
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty() && !line.starts_with('#'))
                    .map(str::to_string),
            );
        }
        Ok(queries)
    }

    fn answer_one(&self, agent: &Agent, query: &str) -> anyhow::Result<()> {
        if self.plan {
            let plan = agent.compile(query);
            println!("{}", serde_json::to_string_pretty(&plan)?);
        } else if self.json {
            let result = agent.run(query);
            println!("{}", serde_json::to_string(&result)?);
        } else {
            println!("{}", agent.answer(query));
        }
        Ok(())
    }
}
