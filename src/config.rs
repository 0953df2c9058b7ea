use std::path::PathBuf;

use crate::error::{HeuristicError, Result};
use crate::evaluation::Strategy;
use crate::heuristic::EngineOptions;

pub const USAGE: &str = "Usage: box_heuristic <level_file> \
[--astar | --greedy | --wastar <w> | --strategy <name>] [--sequential]";

#[derive(Clone, Debug)]
pub struct RunConfig {
    pub level_path: PathBuf,
    pub strategy: Strategy,
    pub options: EngineOptions,
}

impl RunConfig {
    /// Parses arguments, program name excluded.
    pub fn from_args<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let mut level_path = None;
        let mut strategy = Strategy::default();
        let mut options = EngineOptions::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--astar" => strategy = Strategy::AStar,
                "--greedy" => strategy = Strategy::Greedy,
                "--wastar" => {
                    let w = value_of(&mut args, "--wastar")?;
                    strategy = format!("wastar:{w}").parse()?;
                }
                "--strategy" => strategy = value_of(&mut args, "--strategy")?.parse()?,
                "--sequential" => options.parallel = false,
                flag if flag.starts_with("--") => {
                    return Err(HeuristicError::InvalidArgument(format!(
                        "unknown flag {flag}"
                    )))
                }
                _ if level_path.is_some() => {
                    return Err(HeuristicError::InvalidArgument(format!(
                        "unexpected argument {arg}"
                    )))
                }
                _ => level_path = Some(PathBuf::from(arg)),
            }
        }

        let level_path = level_path
            .ok_or_else(|| HeuristicError::InvalidArgument("missing level file".to_string()))?;

        Ok(RunConfig {
            level_path,
            strategy,
            options,
        })
    }
}

fn value_of(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    args.next()
        .ok_or_else(|| HeuristicError::InvalidArgument(format!("{flag} needs a value")))
}
