use super::*;
use shelfsort_core::ReorderSink;

#[test]
fn parses_run_command() {
    let cli = Cli::try_parse_from(["shelfsort-cli", "run"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Run {
            dry_run: false,
            preview: run::DEFAULT_PREVIEW
        })
    ));
}

#[test]
fn parses_run_dry_run_with_preview() {
    let cli = Cli::try_parse_from(["shelfsort-cli", "run", "--dry-run", "--preview", "5"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Run {
            dry_run: true,
            preview: 5
        })
    ));
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["shelfsort-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn rejects_unknown_subcommand() {
    assert!(Cli::try_parse_from(["shelfsort-cli", "collect"]).is_err());
}

#[tokio::test]
async fn dry_run_sink_accepts_any_order() {
    let sink = run::DryRunSink::new(2);
    let ids: Vec<String> = ["P1", "P2", "P3"].iter().map(|s| (*s).to_owned()).collect();
    assert!(sink.apply("C1", &ids).await.is_ok());
    assert!(sink.apply("C2", &[]).await.is_ok());
}
