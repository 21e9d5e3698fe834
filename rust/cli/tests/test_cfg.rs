use holdem_cli::run;
use serde_json::Value;
use serial_test::serial;
use std::io::Write;

const VARS: [&str; 7] = [
    "HOLDEM_CONFIG",
    "HOLDEM_SMALL_BLIND",
    "HOLDEM_BIG_BLIND",
    "HOLDEM_STARTING_POINTS",
    "HOLDEM_PLAYERS",
    "HOLDEM_SEED",
    "HOLDEM_BOT",
];

fn clear_env() {
    for key in VARS {
        unsafe { std::env::remove_var(key) };
    }
}

fn cfg_json() -> (i32, Value) {
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let code = run(["holdem", "cfg"], &mut out, &mut err);
    let json = serde_json::from_slice(&out).unwrap_or(Value::Null);
    (code, json)
}

#[test]
#[serial]
fn cfg_shows_defaults() {
    clear_env();
    let (code, json) = cfg_json();
    assert_eq!(code, 0);
    assert_eq!(json["small_blind"]["value"], 1);
    assert_eq!(json["big_blind"]["value"], 2);
    assert_eq!(json["starting_points"]["value"], 1000);
    assert_eq!(json["seed"]["value"], Value::Null);
    assert_eq!(json["bot"]["source"], "default");
}

#[test]
#[serial]
fn precedence_env_over_file_over_default() {
    clear_env();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "seed = 7\nplayers = 6\nbot = \"random\"").unwrap();
    unsafe {
        std::env::set_var("HOLDEM_CONFIG", file.path());
        std::env::set_var("HOLDEM_PLAYERS", "3");
    }

    let (code, json) = cfg_json();
    clear_env();

    assert_eq!(code, 0);
    assert_eq!(json["seed"]["value"], 7);
    assert_eq!(json["seed"]["source"], "file");
    assert_eq!(json["players"]["value"], 3);
    assert_eq!(json["players"]["source"], "env");
    assert_eq!(json["bot"]["value"], "random");
    assert_eq!(json["small_blind"]["source"], "default");
}

#[test]
#[serial]
fn unknown_file_keys_are_errors() {
    clear_env();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "level = 3").unwrap();
    unsafe { std::env::set_var("HOLDEM_CONFIG", file.path()) };

    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let code = run(["holdem", "cfg"], &mut out, &mut err);
    clear_env();

    assert_eq!(code, 2);
    assert!(String::from_utf8_lossy(&err).contains("cannot parse config file"));
}

#[test]
#[serial]
fn configured_seed_drives_deal() {
    clear_env();
    unsafe { std::env::set_var("HOLDEM_SEED", "31") };
    let mut first: Vec<u8> = Vec::new();
    let mut second: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    run(["holdem", "deal"], &mut first, &mut err);
    run(["holdem", "deal", "--seed", "31"], &mut second, &mut err);
    clear_env();

    assert!(String::from_utf8_lossy(&first).starts_with("Seed: 31"));
    assert_eq!(first, second);
}
