use super::*;

mod test_helpers {
    use super::*;

    pub(super) fn parse_args(argv: &[&str]) -> Args {
        Args::try_parse_from(argv)
            .unwrap_or_else(|err| panic!("argv={argv:?} should parse successfully: {err}"))
    }
}

use test_helpers::parse_args;

#[test]
fn no_subcommand_defaults_to_chat() {
    let args = parse_args(&["mistral-chat"]);
    assert!(args.command.is_none());
    assert!(args.base_url.is_none());
}

#[test]
fn global_flags_parse_before_and_after_subcommand() {
    let argv = [
        "mistral-chat",
        "--base-url",
        "http://gpu:9000",
        "say",
        "hello",
        "--config",
        "/tmp/c.toml",
    ];
    let args = parse_args(&argv);
    assert_eq!(args.base_url.as_deref(), Some("http://gpu:9000"));
    // Everything after the prompt starts is part of the prompt.
    assert_eq!(
        args.command,
        Some(Commands::Say {
            prompt: vec![
                "hello".to_string(),
                "--config".to_string(),
                "/tmp/c.toml".to_string()
            ]
        })
    );

    let args = parse_args(&["mistral-chat", "-c", "/tmp/c.toml", "-l", "chat.log", "chat"]);
    assert_eq!(args.config, Some(PathBuf::from("/tmp/c.toml")));
    assert_eq!(args.log_file, Some(PathBuf::from("chat.log")));
    assert_eq!(args.command, Some(Commands::Chat));
}

#[test]
fn say_joins_multiword_prompts() {
    let args = parse_args(&["mistral-chat", "say", "why", "is", "the", "sky", "blue?"]);
    match args.command {
        Some(Commands::Say { prompt }) => assert_eq!(prompt.join(" "), "why is the sky blue?"),
        _ => panic!("expected say command"),
    }
}

#[test]
fn set_and_unset_take_keys_and_values() {
    let args = parse_args(&["mistral-chat", "set", "base-url", "http://localhost:8080"]);
    assert_eq!(
        args.command,
        Some(Commands::Set {
            key: "base-url".to_string(),
            value: vec!["http://localhost:8080".to_string()],
        })
    );

    let args = parse_args(&["mistral-chat", "set", "theme"]);
    assert_eq!(
        args.command,
        Some(Commands::Set {
            key: "theme".to_string(),
            value: Vec::new(),
        })
    );

    let args = parse_args(&["mistral-chat", "unset", "theme"]);
    assert_eq!(
        args.command,
        Some(Commands::Unset {
            key: "theme".to_string()
        })
    );
}

#[test]
fn save_config_writes_to_given_path() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("config.toml");
    let mut config = Config::default();
    set_value(&mut config, "theme", "light").expect("set");
    save_config(&config, &path).expect("save");
    let loaded = Config::load_from_path(&path).expect("load");
    assert_eq!(loaded.theme.as_deref(), Some("light"));
}
