// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use anyhow::{bail, Context};
use std::env;
use std::path::PathBuf;
use typings_gen::generator::Generator;
use typings_gen::model::DeclarationModel;

fn main() {
    // Initialize tracing for diagnostics
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_help();
        return;
    }

    match args[1].as_str() {
        "generate" => {
            if let Err(e) = generate(&args[2..]) {
                eprintln!("[ERROR] {:#}", e);
                std::process::exit(1);
            }
        }
        "--help" | "-h" | "help" => {
            print_help();
        }
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            print_help();
            std::process::exit(1);
        }
    }
}

struct GenerateArgs {
    model: PathBuf,
    config: Option<PathBuf>,
    out: Option<PathBuf>,
}

fn parse_generate_args(args: &[String]) -> anyhow::Result<GenerateArgs> {
    let mut model = None;
    // Config defaults to $TYPINGS_CONFIG when --config is absent
    let mut config = env::var_os("TYPINGS_CONFIG").map(PathBuf::from);
    let mut out = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let value = iter.next().context("--config requires a path")?;
                config = Some(PathBuf::from(value));
            }
            "--out" | "-o" => {
                let value = iter.next().context("--out requires a path")?;
                out = Some(PathBuf::from(value));
            }
            flag if flag.starts_with('-') => bail!("Unknown option: {}", flag),
            path if model.is_none() => model = Some(PathBuf::from(path)),
            extra => bail!("Unexpected argument: {}", extra),
        }
    }

    Ok(GenerateArgs {
        model: model.context("Missing <model> argument")?,
        config,
        out,
    })
}

fn generate(args: &[String]) -> anyhow::Result<()> {
    let args = parse_generate_args(args)?;

    tracing::info!("Initializing declaration generator");
    let generator = Generator::from_config_file(args.config.as_deref())?;

    match args.out {
        Some(out) => {
            let report = generator.generate_file(&args.model, &out)?;
            report.summary();
        }
        None => {
            let model = DeclarationModel::from_file(&args.model)?;
            let generated = generator.generate(model, &args.model.display().to_string())?;
            print!("{}", generated.content);
        }
    }

    Ok(())
}

fn print_help() {
    println!("typings-gen v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("USAGE:");
    println!("    typings-gen <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    generate <model>  Emit TypeScript declarations from a YAML/JSON model");
    println!("    help              Print this help message");
    println!();
    println!("OPTIONS (generate):");
    println!("    -c, --config <file>  typings.toml (default: $TYPINGS_CONFIG)");
    println!("    -o, --out <file>     Write to file instead of stdout");
    println!();
    println!("EXAMPLES:");
    println!("    typings-gen generate api.yaml --config typings.toml --out api.d.ts");
    println!();
}
