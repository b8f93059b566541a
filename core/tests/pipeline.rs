use command_args_core::*;
use serde_json::json;

fn registry() -> Registry {
    Registry::new(RegistryMeta {
        name: Some("mobile".to_string()),
        version: Some("2.1.0".to_string()),
        description: Some("Mobile toolkit".to_string()),
    })
    .command(
        "test",
        CommandDefinition::new("Run the test suite")
            .with_options(
                Fields::new()
                    .field(FieldSchema::with_value("files", ValueType::String).allow_multiple())
                    .field(FieldSchema::boolean("verbose").with_description("Verbose output"))
                    .field(FieldSchema::with_value("androidMax", ValueType::String))
                    .field(FieldSchema::with_value("env", ValueType::String)),
            )
            .with_alias("v", "verbose"),
    )
    .command("plain", CommandDefinition::new("No schema at all"))
    .command(
        "flags",
        CommandDefinition::new("Single-letter switches").with_options(
            Fields::new()
                .field(FieldSchema::boolean("a"))
                .field(FieldSchema::boolean("b"))
                .field(FieldSchema::boolean("c")),
        ),
    )
}

fn run<'r>(registry: &'r Registry, argv: &[&str]) -> Result<Outcome<'r, ()>> {
    let mut sink = Vec::new();
    process(registry, argv, &mut sink)
}

fn options(registry: &Registry, argv: &[&str]) -> serde_json::Value {
    run(registry, argv)
        .expect("processing should succeed")
        .success()
        .expect("a command should run")
        .options
}

#[test]
fn repeated_flag_builds_sequence() {
    let registry = registry();
    let opts = options(&registry, &["test", "--files", "a.txt", "--files", "b.txt"]);
    assert_eq!(opts["files"], json!(["a.txt", "b.txt"]));
}

#[test]
fn single_value_for_array_field_is_wrapped() {
    let registry = registry();
    let opts = options(&registry, &["test", "--files", "a.txt"]);
    assert_eq!(opts["files"], json!(["a.txt"]));
}

#[test]
fn equals_split_on_first_only() {
    let registry = registry();
    let opts = options(&registry, &["test", "--env=NODE_ENV=production"]);
    assert_eq!(opts["env"], json!("NODE_ENV=production"));
}

#[test]
fn clustered_short_flags() {
    let registry = registry();
    let opts = options(&registry, &["flags", "-abc"]);
    assert_eq!(opts, json!({"a": true, "b": true, "c": true}));
}

#[test]
fn alias_overrides_canonical() {
    let registry = registry();
    let opts = options(&registry, &["test", "--verbose=false", "-v"]);
    assert_eq!(opts["verbose"], json!(true));
}

#[test]
fn hyphenated_spelling_resolves_to_camel_field() {
    let registry = registry();
    let opts = options(&registry, &["test", "--android-max", "10"]);
    assert_eq!(opts["androidMax"], json!("10"));
}

#[test]
fn hyphenated_spelling_is_unknown_when_camel_given() {
    let registry = registry();
    let err = run(&registry, &["test", "--androidMax", "1", "--android-max", "2"]).unwrap_err();
    assert_eq!(err, ProcessError::UnknownOption("--android-max".to_string()));
}

#[test]
fn unknown_option_with_schema() {
    let registry = registry();
    let err = run(&registry, &["test", "--unknown"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownOption);
    assert_eq!(err.to_string(), "unknown option: --unknown");
}

#[test]
fn unknown_option_without_schema() {
    let registry = registry();
    let err = run(&registry, &["plain", "--unknown"]).unwrap_err();
    assert_eq!(err, ProcessError::UnknownOption("--unknown".to_string()));
}

#[test]
fn unknown_option_checked_before_validation() {
    let registry = registry();
    // `--env` without a value would fail validation; the unknown flag wins.
    let err = run(&registry, &["test", "--env", "--bogus"]).unwrap_err();
    assert_eq!(err, ProcessError::UnknownOption("--bogus".to_string()));
}

#[test]
fn no_command_renders_help_then_fails() {
    let registry = registry();
    let mut sink = Vec::new();
    let err = process(&registry, &[] as &[&str], &mut sink).unwrap_err();

    assert_eq!(err, ProcessError::NoCommand);
    let help = String::from_utf8(sink).unwrap();
    assert!(help.starts_with("mobile 2.1.0\nMobile toolkit\n"));
    assert!(help.contains("Usage: mobile <test|plain|flags>"));
}

#[test]
fn unknown_command_renders_help_then_fails() {
    let registry = registry();
    let mut sink = Vec::new();
    let err = process(&registry, &["deploy"], &mut sink).unwrap_err();

    assert_eq!(err, ProcessError::UnknownCommand("deploy".to_string()));
    assert!(String::from_utf8(sink).unwrap().contains("Commands:"));
}

#[test]
fn default_command_receives_everything() {
    let registry = Registry::new(RegistryMeta::default())
        .command("other", CommandDefinition::new("Other"))
        .default_command(
            CommandDefinition::new("Serve")
                .with_options(Fields::new().field(FieldSchema::with_value("port", ValueType::Integer)))
                .with_args(
                    Positionals::new().arg(ArgSchema::optional("root", ValueType::String).with_default(".")),
                ),
        );

    let result = run(&registry, &["--port", "8080"]).unwrap().success().unwrap();
    assert_eq!(result.name, None);
    assert_eq!(result.command.description, "Serve");
    assert_eq!(result.options, json!({"port": 8080}));
    assert_eq!(result.args, json!({"root": "."}));
}

#[test]
fn default_command_can_share_named_entry() {
    let registry = registry().default_to("plain");
    let result = run(&registry, &[]).unwrap().success().unwrap();
    assert_eq!(result.name, Some("plain"));
    assert_eq!(result.args, json!([]));
}

#[test]
fn help_short_circuits_unknown_option_checks() {
    let registry = registry();
    let mut sink = Vec::new();
    let outcome = process(&registry, &["test", "--bogus", "--help"], &mut sink).unwrap();

    assert!(matches!(outcome, Outcome::HelpDisplayed));
    let help = String::from_utf8(sink).unwrap();
    assert!(help.starts_with("Usage: mobile test [OPTIONS]\n"));
    assert!(help.contains("-v, --verbose  Verbose output"));
    assert!(help.contains("--android-max"));
}

#[test]
fn help_without_command_shows_top_level() {
    let registry = registry();
    let mut sink = Vec::new();
    let outcome = process(&registry, &["--help"], &mut sink).unwrap();

    assert!(matches!(outcome, Outcome::HelpDisplayed));
    assert!(String::from_utf8(sink).unwrap().contains("Usage: mobile <test|plain|flags>"));
}

#[test]
fn version_without_command() {
    let registry = registry();
    let mut sink = Vec::new();
    let outcome = process(&registry, &["--version"], &mut sink).unwrap();

    assert!(matches!(outcome, Outcome::VersionDisplayed));
    assert_eq!(String::from_utf8(sink).unwrap(), "mobile 2.1.0\n");
}

#[test]
fn repeated_scalar_fails_validation() {
    let registry = registry();
    let err = run(&registry, &["test", "--env", "a", "--env", "b"]).unwrap_err();
    assert_eq!(
        err,
        ProcessError::ValidationFailed("env: expected a single value, received 2 values".to_string())
    );
}

#[test]
fn positional_validation_failure() {
    let registry = Registry::new(RegistryMeta::default()).command(
        "scale",
        CommandDefinition::new("Scale").with_args(
            Positionals::new()
                .arg(ArgSchema::required("service", ValueType::String))
                .arg(ArgSchema::required("replicas", ValueType::Integer)),
        ),
    );

    let err = run(&registry, &["scale", "web", "many"]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "validation failed: replicas: expected an integer, received \"many\""
    );

    let ok = run(&registry, &["scale", "web", "3"]).unwrap().success().unwrap();
    assert_eq!(ok.args, json!({"service": "web", "replicas": 3}));
}

#[test]
fn processing_is_idempotent() {
    let registry = registry();
    let argv = ["test", "--files", "a", "-v", "--android-max", "2", "x"];

    let first = run(&registry, &argv).unwrap().success().unwrap();
    let second = run(&registry, &argv).unwrap().success().unwrap();

    assert_eq!(first.name, second.name);
    assert_eq!(first.options, second.options);
    assert_eq!(first.args, second.args);
    assert!(std::ptr::eq(first.command, second.command));
}

#[test]
fn default_command_claiming_short_h_receives_value() {
    let registry = Registry::new(RegistryMeta {
        name: Some("srv".to_string()),
        ..Default::default()
    })
    .default_command(
        CommandDefinition::new("Serve")
            .with_options(Fields::new().field(FieldSchema::with_value("host", ValueType::String)))
            .with_alias("h", "host"),
    );

    let mut sink = Vec::new();
    let outcome = process(&registry, &["-h", "localhost"], &mut sink).unwrap();
    let result = outcome.success().expect("default command should run");

    assert_eq!(result.name, None);
    assert_eq!(result.options, json!({"host": "localhost"}));
    assert!(sink.is_empty());

    let help = process(&registry, &["--help"], &mut sink).unwrap();
    assert!(matches!(help, Outcome::HelpDisplayed));
}

#[test]
fn unknown_option_quotes_flag_as_typed() {
    let registry = registry();
    let err = run(&registry, &["test", "--x"]).unwrap_err();
    assert_eq!(err, ProcessError::UnknownOption("--x".to_string()));

    let err = run(&registry, &["test", "-q"]).unwrap_err();
    assert_eq!(err, ProcessError::UnknownOption("-q".to_string()));
}
