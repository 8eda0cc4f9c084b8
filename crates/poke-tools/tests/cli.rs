//! Tests bout-en-bout du binaire `poke-disasm`.

use std::fs;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;

fn poke_disasm(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_poke-disasm"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("spawn poke-disasm")
}

#[test]
fn demo_prints_single_return() {
    let out = poke_disasm(&["--demo"]);
    assert!(out.status.success());
    assert_eq!(
        String::from_utf8_lossy(&out.stdout),
        "== demo == (count=1, capacity=8)\n0000 OP_RETURN\n"
    );
}

#[test]
fn nine_bytes_grow_to_sixteen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nine.bin");
    fs::write(&path, [0u8; 9]).unwrap();

    let out = poke_disasm(&[path.to_str().unwrap()]);
    assert!(out.status.success());
    let text = String::from_utf8_lossy(&out.stdout);
    assert!(text.starts_with("== nine.bin == (count=9, capacity=16)\n"));
    assert_eq!(text.lines().count(), 10);
}

#[test]
fn custom_policy_is_applied() {
    let out = poke_disasm(&["--demo", "--min-capacity", "4", "--growth-factor", "3"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("capacity=4"));
}

#[test]
fn strict_rejects_unknown_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.bin");
    fs::write(&path, [0x00, 0xAB]).unwrap();
    let arg = path.to_str().unwrap();

    assert!(poke_disasm(&[arg]).status.success());

    let out = poke_disasm(&[arg, "--strict"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("invalid opcode 0xAB at offset 1"));
}

#[test]
fn json_output_parses() {
    let dir = tempfile::tempdir().unwrap();
    let emit = dir.path().join("out/demo.json");
    let out = poke_disasm(&["--demo", "--json", "--emit", emit.to_str().unwrap()]);
    assert!(out.status.success());

    let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&emit).unwrap()).unwrap();
    assert_eq!(v["name"], "demo");
    assert_eq!(v["count"], 1);
    assert_eq!(v["valid"], true);
    assert_eq!(v["instructions"][0]["text"], "OP_RETURN");
}

#[test]
fn missing_input_fails() {
    let out = poke_disasm(&[]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).starts_with("error: "));
}
