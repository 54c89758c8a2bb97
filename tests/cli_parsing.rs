use casegen::cli::{Cli, Commands};
use clap::Parser;
use std::path::PathBuf;

#[test]
fn test_parse_files() {
    let cli = Cli::try_parse_from(["casegen", "files", "https://github.com/octo/demo"]).unwrap();

    assert!(!cli.json);
    match cli.command {
        Commands::Files(args) => assert_eq!(args.repository, "https://github.com/octo/demo"),
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_parse_run_with_selection_and_summary() {
    let cli = Cli::try_parse_from([
        "casegen",
        "run",
        "https://github.com/octo/demo",
        "--select",
        "src/b.js",
        "-s",
        "src/a.js",
        "--summary",
        "2",
        "--submit",
    ])
    .unwrap();

    match cli.command {
        Commands::Run(args) => {
            assert_eq!(args.select, vec!["src/b.js", "src/a.js"]);
            assert_eq!(args.summary.as_deref(), Some("2"));
            assert!(args.submit);
        }
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_run_requires_a_selection() {
    let result = Cli::try_parse_from(["casegen", "run", "https://github.com/octo/demo"]);
    assert!(result.is_err());
}

#[test]
fn test_submit_requires_summary() {
    let result = Cli::try_parse_from([
        "casegen",
        "run",
        "https://github.com/octo/demo",
        "--select",
        "a.js",
        "--submit",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_parse_session_without_repository() {
    let cli = Cli::try_parse_from(["casegen", "session"]).unwrap();

    match cli.command {
        Commands::Session(args) => assert!(args.repository.is_none()),
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "casegen",
        "session",
        "https://github.com/octo/demo",
        "--json",
        "--config",
        "custom.yaml",
    ])
    .unwrap();

    assert!(cli.json);
    assert_eq!(cli.config, Some(PathBuf::from("custom.yaml")));
}

#[test]
fn test_unknown_subcommand_fails() {
    assert!(Cli::try_parse_from(["casegen", "deploy"]).is_err());
}
