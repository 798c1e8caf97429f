use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["vidtrack"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_ingest_without_input() {
    let cli = Cli::try_parse_from(["vidtrack", "ingest"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Ingest { input: None })));
}

#[test]
fn parses_ingest_with_input_file() {
    let cli = Cli::try_parse_from(["vidtrack", "ingest", "--input", "scrape.json"])
        .expect("expected valid cli args");
    match cli.command {
        Some(Commands::Ingest { input: Some(path) }) => {
            assert_eq!(path, PathBuf::from("scrape.json"));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn parses_schedule_command() {
    let cli = Cli::try_parse_from(["vidtrack", "schedule"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Schedule)));
}

#[test]
fn parses_report_with_top() {
    let cli = Cli::try_parse_from(["vidtrack", "report", "--top", "5"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Report { top: Some(5) })
    ));
}

#[test]
fn report_top_must_be_a_number() {
    let result = Cli::try_parse_from(["vidtrack", "report", "--top", "many"]);
    assert!(result.is_err());
}

#[test]
fn help_is_answered_by_the_parser() {
    let err = Cli::try_parse_from(["vidtrack", "--help"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
}
