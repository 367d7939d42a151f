//! # Init Command Module / 初始化命令模块
//!
//! This module implements the `init` command, which writes a starter
//! `GoldenRunner.toml`. The interactive wizard asks for the tests root and
//! the collaborator command lines; `--non-interactive` writes the defaults.
//!
//! 此模块实现 `init` 命令，用于写出初始的 `GoldenRunner.toml`。
//! 交互式向导会询问测试根目录和协作进程命令行；`--non-interactive` 直接写出默认值。

use anyhow::{Context, Result};
use colored::*;
use dialoguer::{Confirm, Input, theme::ColorfulTheme};
use std::{fs, path::Path, path::PathBuf};

use crate::core::config::{BUILTIN_COMPARATOR, HarnessConfig};
use crate::core::execution::Pipeline;
use crate::infra::t;

const CONFIG_HEADER: &str = "\
# Golden Runner configuration / Golden Runner 配置
#
# Placeholders available in command lines / 命令行中可用的占位符:
#   {case} {dir} {spec} {input} {expected} {program} {actual} {diagnostics}
# Set `diff = \"builtin\"` for an in-process exact comparison.
# Uncomment to bound every collaborator run / 取消注释以限制每次协作进程运行的时间:
# timeout_secs = 30

";

/// Writes a configuration file to `output`.
///
/// # Arguments
/// * `output` - Path of the configuration file to create
/// * `language` - Language for prompts and messages
/// * `non_interactive` - Skip the wizard and write the defaults
/// * `force` - Overwrite an existing file without asking
pub fn run_init_wizard(
    output: &Path,
    language: &str,
    non_interactive: bool,
    force: bool,
) -> Result<()> {
    let theme = ColorfulTheme::default();

    if !non_interactive {
        println!("\n{}", t!("init.welcome", locale = language).cyan().bold());
        println!("{}", t!("init.description", locale = language));
    }

    if output.exists() && !force {
        if non_interactive {
            println!(
                "{}",
                t!("init.file_exists", locale = language, path = output.display()).red()
            );
            println!("{}", t!("init.use_force", locale = language).yellow());
            return Ok(());
        }

        let confirmation = Confirm::with_theme(&theme)
            .with_prompt(t!("init.overwrite_prompt", locale = language, path = output.display()))
            .default(false)
            .interact()
            .context(t!("init.confirmation_failed", locale = language).to_string())?;
        if !confirmation {
            println!("{}", t!("init.aborted", locale = language));
            return Ok(());
        }
    }

    let config = if non_interactive {
        HarnessConfig::default()
    } else {
        prompt_config(&theme, language)?
    };

    // Reject command lines the runner could not split later.
    Pipeline::new(&config).context(t!("run.invalid_collaborator", locale = language).to_string())?;

    write_config(output, &config, language)
}

fn prompt_config(theme: &ColorfulTheme, language: &str) -> Result<HarnessConfig> {
    let defaults = HarnessConfig::default();
    let ask = |prompt: String, default: String| -> Result<String> {
        Input::<String>::with_theme(theme)
            .with_prompt(prompt)
            .default(default)
            .interact_text()
            .context(t!("init.confirmation_failed", locale = language).to_string())
    };

    let tests_dir = ask(
        t!("init.tests_dir_prompt", locale = language).to_string(),
        defaults.tests_dir.display().to_string(),
    )?;
    let compiler = ask(
        t!("init.compiler_prompt", locale = language).to_string(),
        defaults.compiler.clone(),
    )?;
    let vm = ask(
        t!("init.vm_prompt", locale = language).to_string(),
        defaults.vm.clone(),
    )?;
    let use_builtin = Confirm::with_theme(theme)
        .with_prompt(t!("init.builtin_diff_prompt", locale = language))
        .default(false)
        .interact()
        .context(t!("init.confirmation_failed", locale = language).to_string())?;
    let hint = ask(
        t!("init.hint_prompt", locale = language).to_string(),
        defaults.hint.clone(),
    )?;

    Ok(HarnessConfig {
        language: Some(language.to_string()),
        tests_dir: PathBuf::from(tests_dir),
        compiler,
        vm,
        diff: if use_builtin {
            BUILTIN_COMPARATOR.to_string()
        } else {
            defaults.diff.clone()
        },
        hint,
        ..defaults
    })
}

fn write_config(path: &Path, config: &HarnessConfig, language: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| {
            t!("init.create_parent_dir_failed", locale = language, path = parent.display())
                .to_string()
        })?;
    }

    let content = format!("{}{}", CONFIG_HEADER, config.to_toml_string()?);
    fs::write(path, content).with_context(|| {
        t!("init.write_failed", locale = language, path = path.display()).to_string()
    })?;

    println!(
        "{}",
        t!("init.success", locale = language, path = path.display()).green()
    );
    println!("{}", t!("init.next_steps", locale = language));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn non_interactive_init_writes_loadable_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("GoldenRunner.toml");

        run_init_wizard(&path, "en", true, false).unwrap();

        let (config, loaded_from) = HarnessConfig::load(&path, true).unwrap();
        assert!(loaded_from.is_some());
        assert_eq!(config, HarnessConfig::default());
    }

    #[test]
    fn existing_file_is_kept_without_force() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("GoldenRunner.toml");
        fs::write(&path, "tests_dir = \"cases\"\n").unwrap();

        run_init_wizard(&path, "en", true, false).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "tests_dir = \"cases\"\n");

        run_init_wizard(&path, "en", true, true).unwrap();
        let (config, _) = HarnessConfig::load(&path, true).unwrap();
        assert_eq!(config.tests_dir, PathBuf::from("tests"));
    }
}
