// src/cli.rs
use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command, parser::ValueSource};
use std::{env, path::PathBuf};

use crate::core::config::DEFAULT_CONFIG_FILE;
use crate::infra::t;

pub mod commands;

use commands::run::RunOptions;

/// Pre-parses the command line arguments to find an explicit language setting.
/// This allows i18n to be initialized before the full CLI is built.
/// It looks for a `--lang <VALUE>` or `--lang=<VALUE>` argument.
fn pre_parse_language() -> Option<String> {
    let args: Vec<String> = env::args().collect();
    if let Some(pos) = args.iter().position(|arg| arg == "--lang") {
        return args.get(pos + 1).cloned();
    }
    args.iter()
        .find_map(|arg| arg.strip_prefix("--lang="))
        .map(str::to_string)
}

fn run_args(command: Command, locale: &str) -> Command {
    command
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help(t!("arg_config", locale = locale).to_string())
                .value_name("CONFIG")
                .default_value(DEFAULT_CONFIG_FILE)
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("tests-dir")
                .short('t')
                .long("tests-dir")
                .help(t!("arg_tests_dir", locale = locale).to_string())
                .value_name("TESTS_DIR")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("case")
                .long("case")
                .help(t!("arg_case", locale = locale).to_string())
                .value_name("NAME")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .help(t!("arg_timeout", locale = locale).to_string())
                .value_name("SECS")
                .value_parser(clap::value_parser!(u64))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("html")
                .long("html")
                .help(t!("arg_html", locale = locale).to_string())
                .value_name("HTML")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help(t!("arg_json", locale = locale).to_string())
                .value_name("JSON")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help(t!("arg_verbose", locale = locale).to_string())
                .action(ArgAction::SetTrue),
        )
}

fn build_cli(locale: &str) -> Command {
    let root = Command::new("golden-runner")
        .version(env!("CARGO_PKG_VERSION"))
        .about(t!("cli_about", locale = locale).to_string())
        .arg(
            Arg::new("lang")
                .long("lang")
                .help(t!("cli_lang", locale = locale).to_string())
                .value_name("LANGUAGE")
                .global(true)
                .action(ArgAction::Set),
        );

    // `run` is also the default when no subcommand is given.
    run_args(root, locale)
        .subcommand(run_args(
            Command::new("run").about(t!("cmd_run_about", locale = locale).to_string()),
            locale,
        ))
        .subcommand(
            Command::new("init")
                .about(t!("cmd_init_about", locale = locale).to_string())
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help(t!("arg_init_output", locale = locale).to_string())
                        .value_name("PATH")
                        .default_value(DEFAULT_CONFIG_FILE)
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("non-interactive")
                        .long("non-interactive")
                        .help(t!("arg_non_interactive", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("force")
                        .long("force")
                        .help(t!("arg_force", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn run_options(matches: &ArgMatches, lang: Option<String>) -> RunOptions {
    RunOptions {
        config: matches
            .get_one::<PathBuf>("config")
            .cloned()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE)),
        config_required: matches.value_source("config") == Some(ValueSource::CommandLine),
        tests_dir: matches.get_one::<PathBuf>("tests-dir").cloned(),
        cases: matches
            .get_many::<String>("case")
            .map(|names| names.cloned().collect())
            .unwrap_or_default(),
        timeout_secs: matches.get_one::<u64>("timeout").copied(),
        html: matches.get_one::<PathBuf>("html").cloned(),
        json: matches.get_one::<PathBuf>("json").cloned(),
        verbose: matches.get_flag("verbose"),
        lang,
    }
}

pub async fn run() -> Result<()> {
    // Pre-parse language and initialize i18n first.
    let explicit_lang = pre_parse_language();
    let detected = sys_locale::get_locale().unwrap_or_else(|| "en".to_string());
    let language = crate::resolve_locale(explicit_lang.as_deref().unwrap_or(&detected)).to_string();
    rust_i18n::set_locale(&language);

    let matches = build_cli(&language).get_matches();

    match matches.subcommand() {
        Some(("init", init_matches)) => {
            let output = init_matches
                .get_one::<PathBuf>("output")
                .cloned()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
            commands::init::run_init_wizard(
                &output,
                &language,
                init_matches.get_flag("non-interactive"),
                init_matches.get_flag("force"),
            )?;
        }
        Some(("run", run_matches)) => {
            commands::run::execute(run_options(run_matches, explicit_lang), &language).await?;
        }
        _ => {
            commands::run::execute(run_options(&matches, explicit_lang), &language).await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lang_is_accepted_with_every_subcommand() {
        for argv in [
            vec!["golden-runner", "--lang", "en", "run", "--case", "01_ok"],
            vec!["golden-runner", "run", "--lang", "zh-CN", "--case", "01_ok"],
            vec!["golden-runner", "--lang", "en", "init", "--non-interactive"],
            vec!["golden-runner", "--lang", "en", "--tests-dir", "cases"],
        ] {
            assert!(
                build_cli("en").try_get_matches_from(argv.clone()).is_ok(),
                "rejected: {:?}",
                argv
            );
        }
    }

    #[test]
    fn subcommand_options_are_read_from_the_subcommand() {
        let matches = build_cli("en")
            .try_get_matches_from(["golden-runner", "--lang", "en", "run", "--case", "a", "--case", "b"])
            .unwrap();
        let (name, run_matches) = matches.subcommand().unwrap();
        assert_eq!(name, "run");

        let options = run_options(run_matches, Some("en".to_string()));
        assert_eq!(options.cases, ["a", "b"]);
        assert!(!options.config_required);
        assert_eq!(options.config, PathBuf::from(DEFAULT_CONFIG_FILE));
    }

    #[test]
    fn explicit_config_must_exist() {
        let matches = build_cli("en")
            .try_get_matches_from(["golden-runner", "--config", "other.toml"])
            .unwrap();
        let options = run_options(&matches, None);
        assert!(options.config_required);
        assert_eq!(options.config, PathBuf::from("other.toml"));
    }
}
