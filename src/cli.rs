// src/cli.rs
use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;

use crate::commands;
use crate::core::config::PRESET_NAMES;

fn build_cli() -> Command {
    Command::new("allure-docx")
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate a DOCX report from an Allure results directory")
        .arg(
            Arg::new("alluredir")
                .help("Path (absolute or relative) to the directory with Allure test results")
                .value_name("ALLURE_DIR")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("output")
                .help("Path (absolute or relative) of the generated docx file")
                .value_name("OUTPUT")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help(format!(
                    "Report configuration: one of {}, or a path to a custom TOML config file \
                     (merged over `standard`)",
                    PRESET_NAMES.join(", ")
                ))
                .value_name("CONFIG")
                .default_value("standard")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("title")
                .long("title")
                .help("Custom report title, overriding the config's cover title")
                .value_name("TITLE")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("logo")
                .long("logo")
                .help("Path to a logo image placed on the cover page")
                .value_name("LOGO")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("logo-height")
                .long("logo-height")
                .help("Logo height in centimeters; width is scaled to keep the aspect ratio")
                .value_name("LOGO_HEIGHT")
                .value_parser(clap::value_parser!(f32))
                .requires("logo")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("pdf")
                .long("pdf")
                .help("Also convert the generated docx to PDF using soffice (LibreOffice)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("fail-if-empty")
                .long("fail-if-empty")
                .help(
                    "Fail instead of generating a placeholder report when the results \
                     directory contains no test results",
                )
                .action(ArgAction::SetTrue),
        )
}

pub fn run() -> Result<()> {
    let matches = build_cli().get_matches();

    let options = commands::generate::GenerateOptions {
        allure_dir: matches
            .get_one::<PathBuf>("alluredir")
            .expect("required argument")
            .clone(),
        output: matches
            .get_one::<PathBuf>("output")
            .expect("required argument")
            .clone(),
        config: matches
            .get_one::<String>("config")
            .expect("has default")
            .clone(),
        title: matches.get_one::<String>("title").cloned(),
        logo: matches.get_one::<PathBuf>("logo").cloned(),
        logo_height_cm: matches.get_one::<f32>("logo-height").copied(),
        pdf: matches.get_flag("pdf"),
        fail_if_empty: matches.get_flag("fail-if-empty"),
    };

    commands::generate::execute(options)
}
