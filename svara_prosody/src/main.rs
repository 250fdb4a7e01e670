// svara: command-line front end for the prosody engine.
//
// Every subcommand prints pretty JSON on stdout. Diagnostics go through
// tracing (set RUST_LOG=debug to see each pipeline stage).
//
// Usage:
//   svara classify <vowel> [--strict] [--script iast|devanagari]
//   svara decompose <vowel>
//   svara aggregate <text> [--vocative] [--far|--near] [--distance M]
//     [--threshold M] [--ritual] [--japa] [--saman] [--sacred]
//     [--compound-initial] [--chandas] [--meter NAME] [--subrahmanya]
//     [--context FILE.json] [--config FILE.json]
//   svara request <FILE.json>

use std::path::{Path, PathBuf};
use svara_lang::{AccentError, ClassifyOptions, Script, classify};
use svara_prosody::{
    ConfigError, DistanceCategory, Engine, EngineConfig, GrammaticalCase, ProsodyContext,
    RequestError, decompose, default_engine,
};
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Debug, Error)]
enum CliError {
    #[error("{0}\nusage: svara <classify|decompose|aggregate|request> <arg> [flags]")]
    Usage(String),
    #[error(transparent)]
    Accent(#[from] AccentError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().without_time().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().collect();
    match run(&args) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(match e {
                CliError::Usage(_) => 2,
                _ => 1,
            });
        }
    }
}

fn run(args: &[String]) -> Result<String, CliError> {
    let command = args
        .get(1)
        .ok_or_else(|| CliError::Usage("missing subcommand".into()))?;
    let operand = positional(args)?;

    match command.as_str() {
        "classify" => {
            let script = match parse_flag::<String>(args, "--script")? {
                Some(name) => Some(
                    Script::from_name(&name)
                        .ok_or_else(|| CliError::Usage(format!("unknown script '{name}'")))?,
                ),
                None => None,
            };
            let options = ClassifyOptions {
                script,
                strict: has_flag(args, "--strict"),
            };
            let vowel = classify(operand, options)?;
            Ok(serde_json::to_string_pretty(&vowel)?)
        }
        "decompose" => Ok(serde_json::to_string_pretty(&decompose(operand))?),
        "aggregate" => {
            let engine = match parse_flag::<String>(args, "--config")? {
                Some(path) => Engine::new(EngineConfig::load(Path::new(&path))?)?,
                None => Engine::default(),
            };
            let ctx = context_from_args(args)?;
            tracing::debug!(?ctx, "context");
            Ok(serde_json::to_string_pretty(&engine.aggregate(operand, &ctx))?)
        }
        "request" => {
            let json = read_file(Path::new(operand))?;
            let result = default_engine().resolve_request(&json)?;
            Ok(serde_json::to_string_pretty(&result)?)
        }
        other => Err(CliError::Usage(format!("unknown subcommand '{other}'"))),
    }
}

/// The subcommand's operand: the first argument after it that is not a flag
/// or a flag's value.
fn positional(args: &[String]) -> Result<&str, CliError> {
    const VALUED: &[&str] = &[
        "--script",
        "--distance",
        "--threshold",
        "--meter",
        "--context",
        "--config",
    ];
    let mut i = 2;
    while i < args.len() {
        let arg = &args[i];
        if VALUED.contains(&arg.as_str()) {
            i += 2;
        } else if arg.starts_with("--") {
            i += 1;
        } else {
            return Ok(arg);
        }
    }
    Err(CliError::Usage("missing operand".into()))
}

/// Build the context from `--context FILE` (if given), then apply flags on
/// top of it.
fn context_from_args(args: &[String]) -> Result<ProsodyContext, CliError> {
    let mut ctx = match parse_flag::<String>(args, "--context")? {
        Some(path) => serde_json::from_str(&read_file(Path::new(&path))?)?,
        None => ProsodyContext::default(),
    };

    if has_flag(args, "--vocative") {
        ctx.case = Some(GrammaticalCase::Vocative);
    }
    if has_flag(args, "--far") {
        ctx.distance_category = Some(DistanceCategory::Far);
    } else if has_flag(args, "--near") {
        ctx.distance_category = Some(DistanceCategory::Near);
    }
    if let Some(d) = parse_flag(args, "--distance")? {
        ctx.distance_meters = Some(d);
    }
    if let Some(t) = parse_flag(args, "--threshold")? {
        ctx.distance_threshold = Some(t);
    }
    if let Some(meter) = parse_flag(args, "--meter")? {
        ctx.meter = Some(meter);
    }
    ctx.ritual |= has_flag(args, "--ritual");
    ctx.japa |= has_flag(args, "--japa");
    ctx.saman |= has_flag(args, "--saman");
    ctx.sacred_syllable |= has_flag(args, "--sacred");
    ctx.compound_initial_stressed |= has_flag(args, "--compound-initial");
    ctx.chandas |= has_flag(args, "--chandas");
    ctx.subrahmanya |= has_flag(args, "--subrahmanya");
    Ok(ctx)
}

fn read_file(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

/// The value following `flag`, parsed. Absent flags are `None`; a flag
/// with a missing or unparseable value is a usage error.
fn parse_flag<T: std::str::FromStr>(args: &[String], flag: &str) -> Result<Option<T>, CliError> {
    let Some(i) = args.iter().position(|a| a == flag) else {
        return Ok(None);
    };
    let value = args
        .get(i + 1)
        .ok_or_else(|| CliError::Usage(format!("missing value for {flag}")))?;
    value
        .parse()
        .map(Some)
        .map_err(|_| CliError::Usage(format!("invalid value '{value}' for {flag}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("svara")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_positional_skips_flag_values() {
        let a = args(&["aggregate", "--meter", "gāyatrī", "--ritual", "agnim"]);
        assert_eq!(positional(&a).unwrap(), "agnim");
    }

    #[test]
    fn test_missing_operand() {
        assert!(matches!(
            positional(&args(&["decompose"])),
            Err(CliError::Usage(_))
        ));
    }

    #[test]
    fn test_context_flags() {
        let a = args(&["aggregate", "agne", "--vocative", "--distance", "30", "--ritual"]);
        let ctx = context_from_args(&a).unwrap();
        assert!(ctx.is_vocative());
        assert_eq!(ctx.distance_meters, Some(30.0));
        assert!(ctx.ritual);
        assert!(!ctx.subrahmanya);
    }

    #[test]
    fn test_run_rejects_bad_distance() {
        let err = run(&args(&["aggregate", "agne", "--vocative", "--distance", "30m"])).unwrap_err();
        assert!(matches!(&err, CliError::Usage(msg) if msg == "invalid value '30m' for --distance"));
    }

    #[test]
    fn test_run_rejects_bad_threshold() {
        let err = run(&args(&["aggregate", "agne", "--threshold", "far"])).unwrap_err();
        assert!(matches!(&err, CliError::Usage(msg) if msg.contains("--threshold")));
    }

    #[test]
    fn test_flag_without_value() {
        let a = args(&["aggregate", "agne", "--distance"]);
        assert!(matches!(
            parse_flag::<f64>(&a, "--distance"),
            Err(CliError::Usage(msg)) if msg == "missing value for --distance"
        ));
        assert!(parse_flag::<f64>(&a, "--threshold").unwrap().is_none());
    }

    #[test]
    fn test_run_decompose() {
        let json = run(&args(&["decompose", "â"])).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["applies"], true);
        assert_eq!(value["duration_units"], 1.0);
    }

    #[test]
    fn test_run_unknown_subcommand() {
        assert!(matches!(
            run(&args(&["sing", "x"])),
            Err(CliError::Usage(_))
        ));
    }

    #[test]
    fn test_run_classify_strict() {
        let json = run(&args(&["classify", "a", "--strict"])).unwrap();
        assert!(json.contains("\"unmarked\""));
    }
}
