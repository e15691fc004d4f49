//! cad-construct: Headless-Treiber für den Konstruktions-Kern.
//!
//! Liest pro Zeile ein Ereignis (z.B. `tool polyline`, `click 10 0`,
//! `cmd close`), spielt es gegen `AppController` ab, gibt Meldungen und
//! eine Zusammenfassung der übernommenen Entitäten aus und schreibt die
//! Zeichnung optional als JSON.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context};
use cad_construct::shared::evaluate;
use cad_construct::{
    AppController, AppIntent, AppState, EditorOptions, Restriction, SnapFlag, ToolKind, Vector,
};

fn main() -> anyhow::Result<()> {
    // Logger initialisieren
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("cad-construct v{} startet...", env!("CARGO_PKG_VERSION"));

    let args = CliArgs::parse(std::env::args().skip(1))?;
    let config_path = EditorOptions::config_path();
    let options = EditorOptions::load_from_file(&config_path);

    let script = match &args.script {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Skript nicht lesbar: {}", path.display()))?,
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Skript von stdin nicht lesbar")?;
            text
        }
    };

    let mut state = AppState::with_options(options);
    let mut controller = AppController::new();

    for (index, line) in script.lines().enumerate() {
        let intent = parse_line(line).with_context(|| format!("Zeile {}: '{}'", index + 1, line.trim()))?;
        let Some(intent) = intent else {
            continue;
        };
        if let Err(e) = controller.handle_intent(&mut state, intent) {
            log::warn!("Zeile {}: {:#}", index + 1, e);
        }
        for message in state.take_messages() {
            println!("{message}");
        }
    }

    // Werkzeug beenden, damit die Einstellungen zurückgeschrieben werden
    controller.handle_intent(&mut state, AppIntent::EscapeRequested)?;

    let entities = state.drawing.export();
    println!("{} Entität(en) in der Zeichnung", entities.len());
    for entity in &entities {
        println!("  #{} {:?}", entity.id, entity.kind());
    }

    if let Some(path) = &args.json {
        let json = serde_json::to_string_pretty(&entities)?;
        std::fs::write(path, json)
            .with_context(|| format!("JSON nicht schreibbar: {}", path.display()))?;
        log::info!("Zeichnung exportiert nach: {}", path.display());
    }

    if args.save_options {
        state.options.save_to_file(&config_path)?;
    }

    Ok(())
}

/// Kommandozeilen-Argumente: `[script] [--json out.json] [--save-options]`.
#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    script: Option<PathBuf>,
    json: Option<PathBuf>,
    save_options: bool,
}

impl CliArgs {
    fn parse(args: impl IntoIterator<Item = String>) -> anyhow::Result<Self> {
        let mut parsed = Self::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--json" => {
                    let path = args.next().ok_or_else(|| anyhow!("--json erwartet einen Pfad"))?;
                    parsed.json = Some(PathBuf::from(path));
                }
                "--save-options" => parsed.save_options = true,
                flag if flag.starts_with("--") => bail!("unbekannte Option: {flag}"),
                _ if parsed.script.is_none() => parsed.script = Some(PathBuf::from(&arg)),
                _ => bail!("mehr als ein Skript angegeben: {arg}"),
            }
        }
        Ok(parsed)
    }
}

/// Übersetzt eine Skript-Zeile in einen Intent. Leere Zeilen und
/// Kommentare (`#`) ergeben `None`.
fn parse_line(line: &str) -> anyhow::Result<Option<AppIntent>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (keyword, rest) = line
        .split_once(char::is_whitespace)
        .map(|(k, r)| (k, r.trim()))
        .unwrap_or((line, ""));

    let intent = match keyword.to_ascii_lowercase().as_str() {
        "tool" => {
            let kind = ToolKind::from_name(rest).ok_or_else(|| anyhow!("unbekanntes Werkzeug: {rest}"))?;
            AppIntent::ToolSelected { kind }
        }
        "move" => {
            let (point, shift) = parse_pointer(rest)?;
            AppIntent::PointerMoved { point, shift }
        }
        "click" => {
            let (point, shift) = parse_pointer(rest)?;
            AppIntent::PointerClicked { point, shift }
        }
        "coord" => {
            let (relative, rest) = match rest.strip_prefix('@') {
                Some(r) => (true, r.trim()),
                None => (false, rest),
            };
            let (point, _) = parse_pointer(rest)?;
            AppIntent::CoordinateTyped { point, relative }
        }
        "cmd" => AppIntent::CommandTyped {
            text: rest.to_string(),
        },
        "back" => AppIntent::BackRequested,
        "escape" => AppIntent::EscapeRequested,
        "snap" => {
            let (name, state) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| anyhow!("snap erwartet '<modus> on|off'"))?;
            let flag = SnapFlag::from_name(name).ok_or_else(|| anyhow!("unbekannter Fangmodus: {name}"))?;
            let on = match state.trim() {
                "on" => true,
                "off" => false,
                other => bail!("on|off erwartet, nicht '{other}'"),
            };
            AppIntent::SnapFlagToggled { flag, on }
        }
        "restrict" => {
            let restriction =
                Restriction::from_name(rest).ok_or_else(|| anyhow!("unbekannte Einschränkung: {rest}"))?;
            AppIntent::RestrictionSelected { restriction }
        }
        "grid" => {
            let (spacing, _) = parse_pointer(rest)?;
            AppIntent::GridChanged { spacing }
        }
        "undo" => AppIntent::UndoRequested,
        "redo" => AppIntent::RedoRequested,
        other => bail!("unbekannter Befehl: {other}"),
    };
    Ok(Some(intent))
}

/// `x y [shift]`; x und y dürfen Ausdrücke ohne Leerzeichen sein.
fn parse_pointer(text: &str) -> anyhow::Result<(Vector, bool)> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    let (x, y, shift) = match parts.as_slice() {
        [x, y] => (x, y, false),
        [x, y, flag] if flag.eq_ignore_ascii_case("shift") => (x, y, true),
        _ => bail!("Koordinate 'x y' erwartet"),
    };
    let x = evaluate(x).map_err(|e| anyhow!("x: {e}"))?;
    let y = evaluate(y).map_err(|e| anyhow!("y: {e}"))?;
    Ok((Vector::new(x, y), shift))
}
