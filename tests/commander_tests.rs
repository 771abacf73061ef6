//! Tests for command registration, parsing and execution
//!
//! Covers:
//! - Registration rules for command names
//! - Token stream parsing, consumed counts and parse errors
//! - Help precedence and fail-fast execution

use anyhow::{Context as _, Result, anyhow};
use atcommander::config::{DEFAULT_COPYRIGHT, DEFAULT_NAME};
use atcommander::system::MockSystem;
use atcommander::{BoolOption, Command, Commander, Context, Settings, StringOption};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct Command1 {
    seen: Mutex<Option<(bool, bool, bool)>>,
}

impl Command1 {
    fn seen(&self) -> Option<(bool, bool, bool)> {
        *self.seen.lock().unwrap()
    }
}

impl Command for Command1 {
    fn description(&self) -> &str {
        "command 1"
    }

    fn init(&self, ctx: &mut Context) {
        ctx.declare_option("opt1", BoolOption::new(false), "option 1");
        ctx.declare_option("opt2", BoolOption::new(true), "option 2");
        ctx.declare_option("opt3", BoolOption::new(true), "option 3");
    }

    fn run(&self, ctx: &Context) -> Result<()> {
        ctx.system().write_out("command1 is started\n")?;
        *self.seen.lock().unwrap() = Some((
            ctx.get_bool("opt1").unwrap(),
            ctx.get_bool("opt2").unwrap(),
            ctx.get_bool("opt3").unwrap(),
        ));
        Ok(())
    }
}

struct Command2;

impl Command for Command2 {
    fn description(&self) -> &str {
        "command 2"
    }

    fn run(&self, _ctx: &Context) -> Result<()> {
        Err(anyhow!("always fail"))
    }
}

struct Command4;

impl Command for Command4 {
    fn description(&self) -> &str {
        "command 4"
    }

    fn run(&self, _ctx: &Context) -> Result<()> {
        Err(anyhow!("disk is full")).context("cannot save report")
    }
}

struct Command3;

impl Command for Command3 {
    fn description(&self) -> &str {
        "command 3"
    }

    fn init(&self, ctx: &mut Context) {
        ctx.declare_option("name", StringOption::new("anonymous"), "a name");
    }

    fn run(&self, _ctx: &Context) -> Result<()> {
        Ok(())
    }
}

fn commander_with_mock() -> (Commander, MockSystem) {
    let system = MockSystem::new();
    let settings = Settings::default().with_system(Arc::new(system.clone()));
    (Commander::new(settings), system)
}

#[test]
fn test_commander_parse_and_run() {
    let (mut commander, _system) = commander_with_mock();
    assert_eq!(commander.name(), DEFAULT_NAME);
    assert_eq!(commander.copyright(), DEFAULT_COPYRIGHT);

    let cmd1 = Arc::new(Command1::default());
    commander.register("cmd1", Arc::clone(&cmd1));
    assert!(commander.get("cmd1").is_some());
    assert!(commander.get("cmd2").is_none());

    let consumed = commander.parse(&["@cmd1", "opt1", "opt2-"]).unwrap();
    assert_eq!(consumed, 3);
    assert_eq!(commander.queue(), ["cmd1"]);

    commander.run().unwrap();
    assert_eq!(cmd1.seen(), Some((true, false, true)));
}

#[test]
fn test_register_returns_initialized_context() {
    let (mut commander, _system) = commander_with_mock();
    let ctx = commander.register("cmd1", Arc::new(Command1::default()));
    assert_eq!(
        ctx.options_string(),
        "[opt1:false opt2:true opt3:true]"
    );
}

#[test]
fn test_commander_help() {
    let (mut commander, system) = commander_with_mock();
    commander.register("cmd1", Arc::new(Command1::default()));
    commander.register("cmd2", Arc::new(Command2));

    commander.parse(&["@cmd2", "@help", "@cmd1", "help"]).unwrap();
    assert!(commander.help_requested());
    commander.run().unwrap();
    assert_eq!(
        system.output(),
        format!(
            "{DEFAULT_NAME}\n{DEFAULT_COPYRIGHT}\n\ncommands:\n  @help\tShow this help and exit\n  @cmd1\tcommand 1\n  @cmd2\tcommand 2\n"
        )
    );

    system.clear_output();
    commander.parse(&["@cmd2", "@cmd1", "help"]).unwrap();
    assert!(!commander.help_requested());
    commander.run().unwrap();
    assert_eq!(
        system.output(),
        format!(
            "{DEFAULT_NAME}\n{DEFAULT_COPYRIGHT}\n\n@cmd1: command 1\noptions:\n  help\tShow this help and exit\n  opt1[+-]\toption 1\n  opt2[+-]\toption 2 (default true)\n  opt3[+-]\toption 3 (default true)\n"
        )
    );

    system.clear_output();
    commander.parse(&["@cmd1"]).unwrap();
    commander.run().unwrap();
    assert_eq!(system.output(), "command1 is started\n");
}

#[test]
fn test_first_command_help_wins() {
    let (mut commander, system) = commander_with_mock();
    commander.register("cmd1", Arc::new(Command1::default()));
    commander.register("cmd3", Arc::new(Command3));

    commander.parse(&["@cmd3", "help", "@cmd1", "help"]).unwrap();
    commander.run().unwrap();
    let output = system.output();
    assert!(output.contains("@cmd3: command 3\n"));
    assert!(output.contains("  name=VALUE\ta name (default \"anonymous\")\n"));
    assert!(!output.contains("@cmd1"));
}

#[test]
fn test_help_does_not_run_commands() {
    let (mut commander, system) = commander_with_mock();
    let cmd1 = Arc::new(Command1::default());
    commander.register("cmd1", Arc::clone(&cmd1));

    commander.parse(&["@cmd1", "opt1", "@help"]).unwrap();
    commander.run().unwrap();
    assert_eq!(cmd1.seen(), None);
    assert!(!system.output().contains("command1 is started"));
}

#[test]
#[should_panic(expected = "commander has already command cmd1")]
fn test_register_duplicate_name() {
    let mut commander = Commander::default();
    commander.register("cmd1", Arc::new(Command1::default()));
    commander.register("cmd1", Arc::new(Command1::default()));
}

#[test]
#[should_panic(expected = "illegal command name: help")]
fn test_register_help_name() {
    let mut commander = Commander::default();
    commander.register("help", Arc::new(Command1::default()));
}

#[test]
#[should_panic(expected = "illegal command name: cmd1+")]
fn test_register_name_ending_with_plus() {
    let mut commander = Commander::default();
    commander.register("cmd1+", Arc::new(Command1::default()));
}

#[test]
#[should_panic(expected = "illegal command name: cmd1-")]
fn test_register_name_ending_with_minus() {
    let mut commander = Commander::default();
    commander.register("cmd1-", Arc::new(Command1::default()));
}

#[test]
#[should_panic(expected = "illegal command name: cmd1=")]
fn test_register_name_ending_with_equals() {
    let mut commander = Commander::default();
    commander.register("cmd1=", Arc::new(Command1::default()));
}

#[test]
#[should_panic(expected = "illegal command name: ")]
fn test_register_empty_name() {
    let mut commander = Commander::default();
    commander.register("", Arc::new(Command1::default()));
}

#[test]
fn test_commander_parse_errors() {
    let (mut commander, _system) = commander_with_mock();
    commander.register("cmd1", Arc::new(Command1::default()));

    let err = commander.parse(&["cmd", "opt1", "opt2-"]).unwrap_err();
    assert_eq!(err.to_string(), "expected command name, but got: cmd");
    assert_eq!(err.exit_code(), 2);

    let err = commander.parse(&["@cmd", "opt1", "opt2-"]).unwrap_err();
    assert_eq!(err.to_string(), "unknown command: @cmd");

    let err = commander
        .parse(&["@cmd1", "opt1", "opt2-", "@cmd1"])
        .unwrap_err();
    assert_eq!(err.to_string(), "cannot run @cmd1 multiple times");

    let err = commander.parse(&["@cmd1", "opt1", "opt2=X"]).unwrap_err();
    assert_eq!(err.to_string(), "@cmd1: opt2: illegal OptionBool value: =X");
    assert_eq!(err.exit_code(), 2);

    let err = commander.parse(&["@cmd1", "opt4"]).unwrap_err();
    assert_eq!(err.to_string(), "@cmd1: unknown option: opt4");
}

#[test]
fn test_commander_run_error() {
    let (mut commander, system) = commander_with_mock();
    let cmd1 = Arc::new(Command1::default());
    commander.register("cmd1", Arc::clone(&cmd1));
    commander.register("cmd2", Arc::new(Command2));

    let consumed = commander
        .parse(&["@cmd1", "opt1", "opt2-", "@cmd2"])
        .unwrap();
    assert_eq!(consumed, 4);

    let err = commander.run().unwrap_err();
    assert_eq!(err.to_string(), "@cmd2: always fail");
    assert_eq!(err.exit_code(), 3);
    assert_eq!(cmd1.seen(), Some((true, false, true)));
    assert_eq!(system.output(), "command1 is started\n");
}

#[test]
fn test_failing_command_stops_the_queue() {
    let (mut commander, system) = commander_with_mock();
    let cmd1 = Arc::new(Command1::default());
    commander.register("cmd1", Arc::clone(&cmd1));
    commander.register("cmd2", Arc::new(Command2));

    commander.parse(&["@cmd2", "@cmd1"]).unwrap();
    let err = commander.run().unwrap_err();
    assert_eq!(err.to_string(), "@cmd2: always fail");
    assert_eq!(cmd1.seen(), None);
    assert_eq!(system.output(), "");
}

#[test]
fn test_parse_resets_previous_values() {
    let (mut commander, _system) = commander_with_mock();
    commander.register("cmd1", Arc::new(Command1::default()));
    commander.register("cmd3", Arc::new(Command3));

    commander
        .parse(&["@cmd1", "opt1", "opt3-", "help", "@cmd3", "name=x", "@help"])
        .unwrap();
    let ctx1 = commander.get("cmd1").unwrap();
    assert_eq!(ctx1.options_string(), "[opt1:true opt2:true opt3:false]");
    assert!(ctx1.help_requested());
    assert_eq!(commander.get("cmd3").unwrap().get_string("name"), Some("x"));
    assert!(commander.help_requested());

    commander.parse(&["@cmd3"]).unwrap();
    let ctx1 = commander.get("cmd1").unwrap();
    assert_eq!(ctx1.options_string(), "[opt1:false opt2:true opt3:true]");
    assert!(!ctx1.help_requested());
    assert_eq!(
        commander.get("cmd3").unwrap().get_string("name"),
        Some("anonymous")
    );
    assert!(!commander.help_requested());
    assert_eq!(commander.queue(), ["cmd3"]);
}

#[test]
fn test_string_option_through_commander() {
    let (mut commander, _system) = commander_with_mock();
    commander.register("cmd3", Arc::new(Command3));

    commander.parse(&["@cmd3", "name= a=b "]).unwrap();
    assert_eq!(commander.get("cmd3").unwrap().get_string("name"), Some(" a=b "));

    commander.parse(&["@cmd3", "name"]).unwrap();
    assert_eq!(commander.get("cmd3").unwrap().get_string("name"), Some(""));

    let err = commander.parse(&["@cmd3", "name+"]).unwrap_err();
    assert_eq!(err.to_string(), "@cmd3: name: illegal OptionString value: +");
    let err = commander.parse(&["@cmd3", "name-"]).unwrap_err();
    assert_eq!(err.to_string(), "@cmd3: name: illegal OptionString value: -");
}

#[test]
fn test_queue_keeps_invocation_order() {
    let (mut commander, _system) = commander_with_mock();
    commander.register("cmd1", Arc::new(Command1::default()));
    commander.register("cmd3", Arc::new(Command3));

    let consumed = commander.parse(&["@cmd3", "@help", "@cmd1", "opt1"]).unwrap();
    assert_eq!(consumed, 4);
    assert_eq!(commander.queue(), ["cmd3", "cmd1"]);
    assert_eq!(commander.command_names().collect::<Vec<_>>(), ["cmd1", "cmd3"]);
}

#[test]
fn test_empty_token_stream() {
    let (mut commander, system) = commander_with_mock();
    let cmd1 = Arc::new(Command1::default());
    commander.register("cmd1", Arc::clone(&cmd1));

    let tokens: [&str; 0] = [];
    assert_eq!(commander.parse(&tokens).unwrap(), 0);
    commander.run().unwrap();
    assert_eq!(cmd1.seen(), None);
    assert_eq!(system.output(), "");
}

#[test]
fn test_command_failure_keeps_cause_chain() {
    let (mut commander, _system) = commander_with_mock();
    commander.register("cmd4", Arc::new(Command4));

    commander.parse(&["@cmd4"]).unwrap();
    let err = commander.run().unwrap_err();
    assert_eq!(err.to_string(), "@cmd4: cannot save report: disk is full");
    assert_eq!(err.exit_code(), 3);
}
