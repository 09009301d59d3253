//! Library integration tests.

use bxplan::BxplanError;

#[test]
fn error_types_are_public() {
    let err = BxplanError::MissingField {
        field: "browser_target".into(),
        hint: "pass --browser".into(),
    };
    assert!(err.to_string().contains("browser_target"));
    assert!(err.is_invalid_input());
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> bxplan::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use bxplan::cli::{Cli, Commands};
    use clap::Parser;

    let cli = Cli::parse_from(["bxplan", "env", "--json", "-b", "chrome"]);

    if let Some(Commands::Env(args)) = cli.command {
        assert!(args.json);
        assert_eq!(args.target.browser, ["chrome"]);
    } else {
        panic!("Expected Env command");
    }
}
