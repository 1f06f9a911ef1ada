mod script;

use std::io::Read;

use anyhow::{Context, Result};
use forma_core::logging::{init_logging, LoggingConfig};
use forma_inputs::prelude::*;

use script::{parse_line, Command, Session};

const DEMO_FORM: &str = include_str!("../ui/demo.fml");
const DEMO_SCRIPT: &str = include_str!("../ui/demo.script");

/// `forma-studio [form.fml] [script | -]`
///
/// Without arguments the bundled demo form and script run. `-` reads the
/// script from stdin.
fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let args: Vec<String> = std::env::args().skip(1).collect();

    let form_src = match args.first() {
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("reading form {path}"))?,
        None => DEMO_FORM.to_string(),
    };
    let script_src = match args.get(1).map(String::as_str) {
        Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).context("reading script from stdin")?;
            buf
        }
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("reading script {path}"))?,
        None => DEMO_SCRIPT.to_string(),
    };

    let form = FormLoader::new().load(&form_src).context("loading form")?;

    println!();
    println!("  ╔════════════════════════════════════════╗");
    println!("  ║            FORMA STUDIO v0.1           ║");
    println!("  ╠════════════════════════════════════════╣");
    println!("  ║  {:<2} widgets attached.                 ║", form.len());
    println!("  ╚════════════════════════════════════════╝");
    println!();

    let mut session = Session::new(form);
    let mut failures = 0usize;

    for (i, line) in script_src.lines().enumerate() {
        let lineno = i + 1;
        let cmd = match parse_line(line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(err) => {
                log::error!("line {lineno}: {err:#}");
                failures += 1;
                continue;
            }
        };

        println!("  > {}", line.trim());
        match session.run(&cmd) {
            Ok(notes) => {
                for note in notes {
                    println!("    {:<6} {:<10} {:?}", note.kind, session.name_of(note.widget), note.value);
                }
            }
            Err(err) => {
                log::error!("line {lineno}: {err:#}");
                failures += 1;
            }
        }
        if cmd == Command::Show {
            for row in session.describe() {
                println!("    {row}");
            }
        }
    }

    println!();
    if failures > 0 {
        println!("  {failures} script line(s) failed.");
    } else {
        println!("  Script complete. {} widgets remain.", session.form().len());
    }
    println!();
    Ok(())
}
