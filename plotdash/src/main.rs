//! Entry point for the plotdash TUI. Parses args, loads config and runs the App.

use std::env;
use std::path::PathBuf;

use plotdash::app::{self, App};
use plotdash::backend::BackendKind;
use plotdash::config::{config_dir, default_config_path, load_config};
use plotdash::logging::init_logging;
use plotdash::policy::StaggerPolicy;
use plotdash_probe::ProcessProbe;
use tracing::{error, info};

#[derive(Debug, PartialEq)]
struct ParsedArgs {
    backend: BackendKind,
    config: Option<PathBuf>,
    log_file: Option<PathBuf>,
}

#[derive(Debug, PartialEq)]
enum Command {
    Run(ParsedArgs),
    Help(String),
}

fn usage(prog: &str) -> String {
    format!(
        "Usage: {prog} [--backend poll|coop|-b poll|coop] [--config PATH|-c PATH] [--log-file PATH]"
    )
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Command, String> {
    let mut it = args.into_iter();
    let prog = it.next().unwrap_or_else(|| "plotdash".into());
    let mut backend = BackendKind::default();
    let mut config: Option<PathBuf> = None;
    let mut log_file: Option<PathBuf> = None;

    let missing = |flag: &str| format!("{flag} needs a value. {}", usage(&prog));

    while let Some(arg) = it.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((f, v)) if f.starts_with("--") => (f.to_string(), Some(v.to_string())),
            _ => (arg.clone(), None),
        };
        match flag.as_str() {
            "-h" | "--help" => return Ok(Command::Help(usage(&prog))),
            "--backend" | "-b" => {
                let v = inline.or_else(|| it.next()).ok_or_else(|| missing(&flag))?;
                backend = v.parse()?;
            }
            "--config" | "-c" => {
                let v = inline.or_else(|| it.next()).ok_or_else(|| missing(&flag))?;
                config = Some(PathBuf::from(v));
            }
            "--log-file" => {
                let v = inline.or_else(|| it.next()).ok_or_else(|| missing(&flag))?;
                log_file = Some(PathBuf::from(v));
            }
            _ => {
                return Err(format!("Unexpected argument '{arg}'. {}", usage(&prog)));
            }
        }
    }
    Ok(Command::Run(ParsedArgs {
        backend,
        config,
        log_file,
    }))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let parsed = match parse_args(env::args()) {
        Ok(Command::Run(p)) => p,
        Ok(Command::Help(text)) => {
            println!("{text}");
            return Ok(());
        }
        Err(msg) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
    };

    let log_path = parsed
        .log_file
        .unwrap_or_else(|| config_dir().join("plotdash.log"));
    // the dashboard is still usable without its log
    if let Err(e) = init_logging(&log_path) {
        eprintln!(
            "warning: cannot open log file '{}': {e}; continuing without logging",
            log_path.display()
        );
    }

    let config_path = parsed.config.unwrap_or_else(default_config_path);
    let cfg = load_config(&config_path).inspect_err(|e| error!(error = %e, "bad configuration"))?;
    info!(
        config = %config_path.display(),
        backend = ?parsed.backend,
        tmp_dirs = cfg.directories.tmp.len(),
        "configuration loaded"
    );

    let app = App::new(cfg, ProcessProbe::new(), StaggerPolicy);
    app::run(app, parsed.backend)
        .await
        .inspect_err(|e| error!(error = %e, "dashboard failed"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_to_polling_backend() {
        assert_eq!(
            parse_args(args(&["plotdash"])),
            Ok(Command::Run(ParsedArgs {
                backend: BackendKind::Polling,
                config: None,
                log_file: None,
            }))
        );
    }

    #[test]
    fn long_short_and_assign_forms() {
        let expected = Command::Run(ParsedArgs {
            backend: BackendKind::Cooperative,
            config: Some(PathBuf::from("/etc/plotdash.yaml")),
            log_file: Some(PathBuf::from("/tmp/p.log")),
        });
        assert_eq!(
            parse_args(args(&["p", "--backend", "coop", "--config", "/etc/plotdash.yaml", "--log-file", "/tmp/p.log"])),
            Ok(expected)
        );
        let Ok(Command::Run(short)) = parse_args(args(&["p", "-b", "coop", "-c", "x.yaml"])) else {
            panic!("short flags rejected");
        };
        assert_eq!(short.backend, BackendKind::Cooperative);
        let Ok(Command::Run(assign)) = parse_args(args(&["p", "--backend=poll", "--config=y.yaml"])) else {
            panic!("--flag=value rejected");
        };
        assert_eq!(assign.config, Some(PathBuf::from("y.yaml")));
    }

    #[test]
    fn help_wins() {
        assert!(matches!(
            parse_args(args(&["p", "-b", "coop", "--help"])),
            Ok(Command::Help(_))
        ));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_args(args(&["p", "--backend", "threads"])).is_err());
        assert!(parse_args(args(&["p", "--config"])).is_err());
        assert!(parse_args(args(&["p", "extra"])).is_err());
    }
}
