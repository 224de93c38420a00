#![allow(dead_code)]

use anyhow::{Context, Result, bail};
use serde_json::{Value, json};
use snippet_palette::{BlockCategory, BlockEntry, Palette};
use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::NamedTempFile;

pub fn palette_binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_palette"))
}

// Runs the command, failing with both streams when it exits non-zero.
pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}

// Runs the command with `input` piped to stdin.
pub fn run_with_stdin(mut cmd: Command, input: &str) -> Result<Output> {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("failed to spawn command: {:?}", cmd))?;
    child
        .stdin
        .take()
        .context("stdin not captured")?
        .write_all(input.as_bytes())?;
    let output = child.wait_with_output()?;
    if !output.status.success() {
        bail!(
            "command failed: status {:?}\nstderr: {}",
            output.status.code(),
            String::from_utf8_lossy(&output.stderr)
        );
    }
    Ok(output)
}

pub fn stdout_json(output: &Output) -> Result<Value> {
    serde_json::from_slice(&output.stdout).context("stdout was not JSON")
}

pub fn write_json_file(value: &Value) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    serde_json::to_writer(&mut file, value)?;
    file.flush()?;
    Ok(file)
}

// A small authored palette in the legacy `block` spelling.
pub fn sample_palette_json() -> Value {
    json!([
        {
            "name": "Move",
            "color": "lightblue",
            "blocks": [
                {"block": "@fd 100", "title": "Move forward"},
                {"block": "@rt 90", "title": "Turn right"}
            ]
        },
        {
            "name": "Sound",
            "color": "indigo",
            "blocks": [
                {"block": "@say 'hello'", "title": "Speak a word"},
                {"block": "listen (x) ->\n  write x", "title": "Hear words"},
                {"block": "@tone 440, 0", "title": "Silence a frequency", "id": "toneHz0"},
                {
                    "block": "new Audio(url).play()",
                    "expansion": "(new Audio('a.ogg')).play()",
                    "title": "Play an audio file"
                }
            ]
        }
    ])
}

pub fn sample_palette() -> Palette {
    Palette::new(vec![BlockCategory {
        name: "Move".into(),
        color: "lightblue".into(),
        blocks: vec![
            BlockEntry::new("@fd 100", "Move forward"),
            BlockEntry::new("@moveto @lastclick", "Move to click").with_id("movetoclick"),
        ],
    }])
}
