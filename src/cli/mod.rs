//! # Command-line front end
//!
//! `loadplan test.json` reads a scenario options document, compiles it and
//! writes the resulting `.jmx` next to the caller (or to stdout with `-o -`).

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser};
use tracing::{debug, info};

use crate::error::{PlanError, Result};
use crate::jmx::JmxSettings;
use crate::model::{JmxExport, Test};

pub const STDOUT_PATH: &str = "-";

#[derive(Debug, Clone, Parser)]
#[command(name = "loadplan", version, about = "Compile API test scenarios into JMeter test plans")]
pub struct Cli {
    /// Scenario options document (JSON).
    pub input: PathBuf,

    /// Where to write the plan; `-` for stdout. Defaults to `<test name>.jmx`.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// JSON file overriding document version attributes and the listener class.
    #[arg(long, env = "LOADPLAN_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Backend listener class receiving sample results.
    #[arg(long, env = "LOADPLAN_LISTENER_CLASS")]
    pub listener_class: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }

    /// Settings from the optional file, with the listener flag applied last.
    pub fn jmx_settings(&self) -> Result<JmxSettings> {
        let mut settings = match &self.settings {
            Some(path) => serde_json::from_str(&read_file(path)?)?,
            None => JmxSettings::default(),
        };
        if let Some(class) = &self.listener_class {
            settings.backend_listener_class = class.clone();
        }
        Ok(settings)
    }
}

pub fn load_test(path: &Path) -> Result<Test> {
    let raw = read_file(path)?;
    let test = Test::from_json(&raw)?;
    debug!(
        path = %path.display(),
        scenarios = test.scenario_definition.len(),
        "Loaded scenario options"
    );
    Ok(test)
}

/// Compile the input document and write the plan. Returns the written path,
/// or `None` when the plan went to stdout.
pub fn run(cli: &Cli) -> Result<Option<PathBuf>> {
    let settings = cli.jmx_settings()?;
    let test = load_test(&cli.input)?;
    let export = test.to_jmx_with(&settings);

    let target = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&export.name));
    if target.as_os_str() == STDOUT_PATH {
        write_stdout(&export)?;
        return Ok(None);
    }

    fs::write(&target, &export.xml).map_err(|source| PlanError::Io {
        path: target.clone(),
        source,
    })?;
    info!(path = %target.display(), bytes = export.xml.len(), "Wrote test plan");
    Ok(Some(target))
}

fn write_stdout(export: &JmxExport) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(export.xml.as_bytes())
        .and_then(|()| stdout.flush())
        .map_err(|source| PlanError::Io {
            path: PathBuf::from(STDOUT_PATH),
            source,
        })
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| PlanError::Io {
        path: path.to_path_buf(),
        source,
    })
}
