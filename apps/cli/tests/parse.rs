//! Tests for CLI argument parsing.

use clap::Parser;
use scout_cli::{Cli, Command, cmd::verbosity_filter};

#[test]
fn cli_parse_chat_one_shot() {
    let cli = Cli::parse_from(["scout", "chat", "hi im r4to", "--thread", "7"]);
    match cli.command {
        Command::Chat(chat) => {
            assert_eq!(chat.message.as_deref(), Some("hi im r4to"));
            assert_eq!(chat.thread.as_deref(), Some("7"));
        }
        _ => panic!("expected Chat command"),
    }
}

#[test]
fn cli_parse_chat_interactive() {
    let cli = Cli::parse_from(["scout", "chat"]);
    assert!(matches!(cli.command, Command::Chat(ref c) if c.message.is_none()));
}

#[test]
fn cli_parse_global_flags() {
    let cli = Cli::parse_from([
        "scout", "-vv", "--model", "gpt-4o", "--config", "scout.toml", "supervisor",
    ]);
    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.model.as_deref(), Some("gpt-4o"));
    assert_eq!(cli.config.unwrap().to_str(), Some("scout.toml"));
    assert!(matches!(cli.command, Command::Supervisor(_)));
}

#[test]
fn cli_parse_translate_default_language() {
    let cli = Cli::parse_from(["scout", "translate", "Hello, how are you?"]);
    match cli.command {
        Command::Translate(t) => assert_eq!(t.language, "Brazilian Portuguese"),
        _ => panic!("expected Translate command"),
    }
}

#[test]
fn cli_parse_agent_default_turns() {
    let cli = Cli::parse_from(["scout", "agent"]);
    match cli.command {
        Command::Agent(a) => {
            assert_eq!(a.turns, ["what is the current weather in sf", "what about ny"]);
            assert_eq!(a.thread, "42");
            assert_eq!(a.max_results, 3);
        }
        _ => panic!("expected Agent command"),
    }
}

#[test]
fn cli_parse_swarm_turns() {
    let cli = Cli::parse_from(["scout", "swarm", "hello", "bye", "--thread", "x"]);
    match cli.command {
        Command::Swarm(s) => {
            assert_eq!(s.turns, ["hello", "bye"]);
            assert_eq!(s.thread, "x");
        }
        _ => panic!("expected Swarm command"),
    }
}

#[test]
fn cli_parse_analyze_timeout() {
    let address = "0x1234567890123456789012345678901234567890";
    let cli = Cli::parse_from(["scout", "analyze", address]);
    match cli.command {
        Command::Analyze(a) => {
            assert_eq!(a.address, address);
            assert_eq!(a.timeout_secs, 300);
        }
        _ => panic!("expected Analyze command"),
    }

    let cli = Cli::parse_from(["scout", "analyze", address, "--timeout-secs", "5"]);
    assert!(matches!(cli.command, Command::Analyze(ref a) if a.timeout_secs == 5));
}

#[test]
fn cli_parse_research_default_token() {
    let cli = Cli::parse_from(["scout", "research"]);
    match cli.command {
        Command::Research(r) => {
            assert_eq!(r.token, "0xf1fc9580784335b2613c1392a530c1aa2a69ba3d")
        }
        _ => panic!("expected Research command"),
    }
}

#[test]
fn cli_parse_reflect_levels() {
    let cli = Cli::parse_from(["scout", "reflect", "should I move?", "--fear", "0.9"]);
    match cli.command {
        Command::Reflect(r) => {
            assert_eq!(r.blend().0, [0.8, 0.1, 0.05, 0.9, 0.03]);
            assert_eq!(r.prompt, "should I move?");
        }
        _ => panic!("expected Reflect command"),
    }
}

#[test]
fn cli_parse_sql_defaults() {
    let cli = Cli::parse_from(["scout", "sql"]);
    match cli.command {
        Command::Sql(s) => {
            assert_eq!(s.question, "How many employees are there?");
            assert_eq!(s.db.to_str(), Some("data/Chinook.db"));
        }
        _ => panic!("expected Sql command"),
    }
}

#[test]
fn cli_parse_config_init() {
    let cli = Cli::parse_from(["scout", "config", "--init"]);
    assert!(matches!(cli.command, Command::Config(ref c) if c.init));
}

#[test]
fn verbosity_maps_to_filters() {
    assert_eq!(verbosity_filter(0), "info");
    assert_eq!(verbosity_filter(1), "scout=debug,info");
    assert_eq!(verbosity_filter(2), "scout=trace,info");
    assert_eq!(verbosity_filter(3), "debug");
    assert_eq!(verbosity_filter(9), "trace");
}

#[test]
fn cli_parse_search_compare() {
    let cli = Cli::parse_from(["scout", "search", "--compare", "--max-results", "5"]);
    match cli.command {
        Command::Search(s) => {
            assert!(s.compare);
            assert_eq!(s.max_results, 5);
            assert!(s.query().starts_with("You are an expert researcher"));
            assert!(s.query().contains("the topic: bitcoin"));
        }
        _ => panic!("expected Search command"),
    }
}

#[test]
fn cli_parse_search_defaults() {
    let cli = Cli::parse_from(["scout", "search"]);
    match cli.command {
        Command::Search(s) => {
            assert!(!s.compare);
            assert_eq!(s.query(), "what's the latest news on bitcoin?");
            assert_eq!(s.thread, "42");
        }
        _ => panic!("expected Search command"),
    }

    let cli = Cli::parse_from(["scout", "search", "eth price", "--compare"]);
    assert!(matches!(cli.command, Command::Search(ref s) if s.query() == "eth price"));
}

#[test]
fn cli_parse_classify_strict() {
    let cli = Cli::parse_from(["scout", "classify", "Estoy muy enojado con vos!", "--strict"]);
    match cli.command {
        Command::Classify(c) => {
            assert!(c.strict);
            assert_eq!(c.text, "Estoy muy enojado con vos!");
        }
        _ => panic!("expected Classify command"),
    }
    let cli = Cli::parse_from(["scout", "classify", "hi"]);
    assert!(matches!(cli.command, Command::Classify(ref c) if !c.strict));
}
