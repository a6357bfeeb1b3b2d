use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

fn cli() -> Command {
    let skeleton = Arg::new("skeleton")
        .long("skeleton")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Generated files as JSON: {\"files\": {path: trace record}}");
    let out = Arg::new("out")
        .long("out")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Output directory holding the previous run");
    let config = Arg::new("config")
        .long("config")
        .value_parser(value_parser!(PathBuf))
        .help("TOML configuration file");

    Command::new("regen")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Regenerate traced files while keeping user edits")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("run")
                .about("Merge a generation with the previous run and write the results")
                .arg(skeleton.clone())
                .arg(out.clone())
                .arg(config.clone())
                .arg(
                    Arg::new("strict")
                        .long("strict")
                        .action(ArgAction::SetTrue)
                        .help("Fail on unreadable previous traces"),
                ),
        )
        .subcommand(
            Command::new("render")
                .about("Print the text a persisted trace renders to")
                .arg(
                    Arg::new("trace")
                        .long("trace")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Path to a .traces file"),
                ),
        )
        .subcommand(
            Command::new("stale")
                .about("List previously traced files the generation no longer produces")
                .arg(skeleton)
                .arg(out)
                .arg(config),
        )
}

/// Logs go to stderr; stdout carries command output
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn path_arg(args: &ArgMatches, name: &str) -> anyhow::Result<PathBuf> {
    args.get_one::<PathBuf>(name)
        .cloned()
        .with_context(|| format!("missing --{name}"))
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let matches = cli().get_matches();

    match matches.subcommand() {
        Some(("run", args)) => {
            let options = commands::RunOptions {
                skeleton: path_arg(args, "skeleton")?,
                out: path_arg(args, "out")?,
                config: args.get_one::<PathBuf>("config").cloned(),
                strict: args.get_flag("strict"),
            };
            let summary = commands::run(&options)?;
            print!("{summary}");
        }
        Some(("render", args)) => {
            print!("{}", commands::render(&path_arg(args, "trace")?)?);
        }
        Some(("stale", args)) => {
            let stale = commands::stale(
                &path_arg(args, "skeleton")?,
                &path_arg(args, "out")?,
                args.get_one::<PathBuf>("config").map(PathBuf::as_path),
            )?;
            for path in stale {
                println!("{path}");
            }
        }
        Some((other, _)) => anyhow::bail!("unknown subcommand {other}"),
        None => anyhow::bail!("no subcommand given"),
    }

    Ok(())
}
