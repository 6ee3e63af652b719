//! Line-oriented front end over the palette engine.
//!
//! Each input line parses into a [`Command`]; [`Shell::execute`] runs it and
//! returns the text to show. The native binary feeds it from stdin.

use kurbo::{Point, Rect};
use swatchbook_core::color::Ink;
use swatchbook_core::generator::ColorGenerator;
use swatchbook_core::input::{Platform, ShortcutAction, ShortcutRegistry};
use swatchbook_core::picker::{PickerController, PickerOutcome};
use swatchbook_core::{EntryId, PaletteEngine};
use thiserror::Error;

/// Width of a rendered swatch, used as the picker anchor.
const SWATCH_WIDTH: f64 = 120.0;
const SWATCH_HEIGHT: f64 = 80.0;

/// Virtual hue track: one pixel per degree.
const HUE_TRACK: Rect = Rect::new(0.0, 0.0, 360.0, 12.0);
/// Virtual saturation/value field: one pixel per percent.
const SV_FIELD: Rect = Rect::new(0.0, 0.0, 100.0, 100.0);

/// Command parse errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Unknown command: {0}")]
    Unknown(String),
    #[error("Missing argument for {0}")]
    MissingArgument(&'static str),
    #[error("Invalid number: {0}")]
    InvalidNumber(String),
}

/// A shell command. Entry positions are 1-based, as displayed.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Generate,
    Lock(usize),
    Move { from: usize, to: usize },
    Add(usize),
    Remove(usize),
    Copy(usize),
    Edit(usize),
    Hue(f64),
    SatVal(f64, f64),
    Hex(String),
    Apply,
    Cancel,
    Undo,
    Redo,
    Open(String),
    Show,
    Keys,
    Help,
    Quit,
}

fn position(arg: Option<&str>, name: &'static str) -> Result<usize, ParseError> {
    let arg = arg.ok_or(ParseError::MissingArgument(name))?;
    arg.parse::<usize>()
        .ok()
        .filter(|&n| n > 0)
        .ok_or_else(|| ParseError::InvalidNumber(arg.to_string()))
}

fn number(arg: Option<&str>, name: &'static str) -> Result<f64, ParseError> {
    let arg = arg.ok_or(ParseError::MissingArgument(name))?;
    arg.parse::<f64>()
        .map_err(|_| ParseError::InvalidNumber(arg.to_string()))
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>, ParseError> {
    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Ok(None);
    };

    let command = match name.to_ascii_lowercase().as_str() {
        "gen" | "generate" | "space" => Command::Generate,
        "lock" => Command::Lock(position(words.next(), "lock")?),
        "move" | "mv" => Command::Move {
            from: position(words.next(), "move")?,
            to: position(words.next(), "move")?,
        },
        "add" => Command::Add(position(words.next(), "add")?),
        "rm" | "remove" => Command::Remove(position(words.next(), "remove")?),
        "copy" | "cp" => Command::Copy(position(words.next(), "copy")?),
        "edit" => Command::Edit(position(words.next(), "edit")?),
        "hue" => Command::Hue(number(words.next(), "hue")?),
        "sv" => Command::SatVal(number(words.next(), "sv")?, number(words.next(), "sv")?),
        "hex" => Command::Hex(words.collect::<Vec<_>>().join("")),
        "apply" => Command::Apply,
        "cancel" => Command::Cancel,
        "undo" => Command::Undo,
        "redo" => Command::Redo,
        "open" => Command::Open(words.next().unwrap_or_default().to_string()),
        "show" | "ls" => Command::Show,
        "keys" => Command::Keys,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(ParseError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

/// What happened after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellStatus {
    Continue(String),
    Quit,
}

/// Engine plus picker, driven by commands.
pub struct Shell<G: ColorGenerator> {
    engine: PaletteEngine<G>,
    picker: PickerController,
    platform: Platform,
}

impl<G: ColorGenerator> Shell<G> {
    pub fn new(engine: PaletteEngine<G>, platform: Platform) -> Self {
        let picker = PickerController::from_config(engine.config());
        Self {
            engine,
            picker,
            platform,
        }
    }

    pub fn engine(&self) -> &PaletteEngine<G> {
        &self.engine
    }

    pub fn picker(&self) -> &PickerController {
        &self.picker
    }

    fn entry_id(&self, index: usize) -> Option<EntryId> {
        self.engine
            .palette()
            .entries()
            .get(index.checked_sub(1)?)
            .map(|e| e.id())
    }

    fn anchor(index: usize) -> Rect {
        let x0 = (index.saturating_sub(1)) as f64 * SWATCH_WIDTH;
        Rect::new(x0, 0.0, x0 + SWATCH_WIDTH, SWATCH_HEIGHT)
    }

    /// Run a command and return what to print.
    pub fn execute(&mut self, command: Command) -> ShellStatus {
        let message = match command {
            Command::Quit => return ShellStatus::Quit,
            Command::Generate => {
                let changed = self.engine.apply_shortcut(ShortcutAction::Generate);
                self.report(changed, "all colors are locked")
            }
            Command::Undo => {
                let changed = self.engine.undo();
                self.report(changed, "nothing to undo")
            }
            Command::Redo => {
                let changed = self.engine.redo();
                self.report(changed, "nothing to redo")
            }
            Command::Lock(index) => match self.entry_id(index) {
                Some(id) => {
                    let changed = self.engine.toggle_lock(id);
                    self.report(changed, "no such entry")
                }
                None => format!("no entry {index}"),
            },
            Command::Move { from, to } => match self.entry_id(from) {
                Some(id) => {
                    let over = self.entry_id(to);
                    let changed = self.engine.reorder(id, over);
                    self.report(changed, "nothing to move")
                }
                None => format!("no entry {from}"),
            },
            Command::Add(index) => {
                let changed = self.engine.insert_between(index.saturating_sub(1)).is_some();
                self.report(changed, "cannot add: palette is full or position is invalid")
            }
            Command::Remove(index) => match self.entry_id(index) {
                Some(id) => {
                    let changed = self.engine.remove(id);
                    self.report(changed, "cannot remove: palette at minimum size")
                }
                None => format!("no entry {index}"),
            },
            Command::Copy(index) => match self.entry_id(index) {
                Some(id) => {
                    self.engine.copy_entry(id);
                    self.render()
                }
                None => format!("no entry {index}"),
            },
            Command::Edit(index) => match self.entry_id(index) {
                Some(id) => {
                    let hex = self.engine.palette().entries()[index - 1].hex;
                    let mut message = String::new();
                    if let Some(outcome) = self.picker.open(id, hex, Self::anchor(index)) {
                        message.push_str(&describe(&outcome));
                        message.push('\n');
                    }
                    message.push_str(&self.render_picker());
                    message
                }
                None => format!("no entry {index}"),
            },
            Command::Hue(degrees) => self.picker_step(|picker| {
                picker.drag_hue(HUE_TRACK.x0 + degrees, HUE_TRACK).is_some()
            }),
            Command::SatVal(s, v) => self.picker_step(|picker| {
                let point = Point::new(SV_FIELD.x0 + s, SV_FIELD.y1 - v);
                picker.drag_field(point, SV_FIELD).is_some()
            }),
            Command::Hex(text) => self.picker_step(|picker| picker.type_hex(&text).is_some()),
            Command::Apply => match self.picker.apply(&mut self.engine) {
                Some(outcome) => format!("{}\n{}", describe(&outcome), self.render()),
                None => "picker is not open".to_string(),
            },
            Command::Cancel => match self.picker.cancel() {
                Some(outcome) => format!("{}\n{}", describe(&outcome), self.render()),
                None => "picker is not open".to_string(),
            },
            Command::Open(token) => {
                self.picker.cancel();
                let token = token.trim();
                self.engine.load_token((!token.is_empty()).then_some(token));
                self.render()
            }
            Command::Show => self.render(),
            Command::Keys => self.render_keys(),
            Command::Help => HELP.to_string(),
        };
        ShellStatus::Continue(message)
    }

    fn report(&self, changed: bool, reason: &str) -> String {
        if changed {
            self.render()
        } else {
            format!("unchanged: {reason}")
        }
    }

    fn picker_step(&mut self, step: impl FnOnce(&mut PickerController) -> bool) -> String {
        if step(&mut self.picker) {
            self.render_picker()
        } else {
            "picker is not open".to_string()
        }
    }

    /// The palette as one line per entry, followed by the share path.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (i, entry) in self.engine.palette().entries().iter().enumerate() {
            let ink = match entry.ink() {
                Ink::Light => "light",
                Ink::Dark => "dark",
            };
            out.push_str(&format!(
                "{:>2}  {}  {:<6}  ink:{:<5}{}\n",
                i + 1,
                entry.hex,
                if entry.locked { "locked" } else { "" },
                ink,
                if self.engine.is_copied(entry.id()) { "  copied!" } else { "" },
            ));
        }
        out.push_str(&format!(
            "{}  [undo:{} redo:{}]",
            self.engine.share_path(),
            if self.engine.can_undo() { "yes" } else { "no" },
            if self.engine.can_redo() { "yes" } else { "no" },
        ));
        out
    }

    fn render_picker(&self) -> String {
        match self.picker.session() {
            Some(session) => {
                let hsv = session.hsv();
                format!(
                    "editing {} -> {}  (h {:.2}, s {:.4}, v {:.4}, typed {:?})",
                    session.committed_hex(),
                    session.live_hex(),
                    hsv.h,
                    hsv.s,
                    hsv.v,
                    session.text()
                )
            }
            None => "picker is not open".to_string(),
        }
    }

    fn render_keys(&self) -> String {
        ShortcutRegistry::all(self.platform)
            .iter()
            .map(|s| format!("  {:10} {}", s.label, s.description))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn describe(outcome: &PickerOutcome) -> String {
    match outcome {
        PickerOutcome::Applied { hex, committed: true, .. } => format!("applied {hex}"),
        PickerOutcome::Applied { hex, committed: false, .. } => format!("{hex} unchanged"),
        PickerOutcome::Cancelled { restored, .. } => format!("cancelled, kept {restored}"),
    }
}

const HELP: &str = "\
commands:
  gen                 regenerate unlocked colors
  lock N              toggle lock on entry N
  move A B            move entry A to position B
  add N               insert a color after entry N
  rm N                remove entry N
  copy N              copy entry N to the clipboard
  edit N              open the picker on entry N
  hue DEG             picker: set hue (0-360)
  sv S V              picker: set saturation and value (0-100)
  hex TEXT            picker: type a hex value
  apply | cancel      picker: close
  undo | redo
  open TOKEN          load a palette token, e.g. 778899-889977-fefefe
  show | keys | help | quit";

#[cfg(test)]
mod tests {
    use super::*;
    use swatchbook_core::config::EngineConfig;
    use swatchbook_core::generator::RandomColorGenerator;
    use swatchbook_core::platform::{Host, MemoryClipboard, MemoryLocation};

    fn shell(token: &str) -> (Shell<RandomColorGenerator>, MemoryClipboard) {
        let clipboard = MemoryClipboard::new();
        let location = MemoryLocation::with_path(&format!("/colorpalettegenerator/{token}"));
        let engine = PaletteEngine::new(
            EngineConfig::default(),
            RandomColorGenerator::with_seed(3),
            Host::new(clipboard.clone(), location),
        );
        (Shell::new(engine, Platform::Other), clipboard)
    }

    fn run(shell: &mut Shell<RandomColorGenerator>, line: &str) -> String {
        let command = parse_command(line).unwrap().unwrap();
        match shell.execute(command) {
            ShellStatus::Continue(text) => text,
            ShellStatus::Quit => panic!("unexpected quit"),
        }
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command("  "), Ok(None));
        assert_eq!(parse_command("gen"), Ok(Some(Command::Generate)));
        assert_eq!(parse_command("LOCK 2"), Ok(Some(Command::Lock(2))));
        assert_eq!(
            parse_command("move 1 3"),
            Ok(Some(Command::Move { from: 1, to: 3 }))
        );
        assert_eq!(parse_command("sv 25 75"), Ok(Some(Command::SatVal(25.0, 75.0))));
        assert_eq!(parse_command("hex 3f 00"), Ok(Some(Command::Hex("3f00".to_string()))));
        assert_eq!(parse_command("lock"), Err(ParseError::MissingArgument("lock")));
        assert_eq!(parse_command("lock 0"), Err(ParseError::InvalidNumber("0".to_string())));
        assert_eq!(parse_command("hue x"), Err(ParseError::InvalidNumber("x".to_string())));
        assert!(matches!(parse_command("paint"), Err(ParseError::Unknown(_))));
    }

    #[test]
    fn test_render_lists_entries_and_path() {
        let (shell, _) = shell("778899-889977-fefefe");
        let text = shell.render();
        assert!(text.contains(" 1  #778899"));
        assert!(text.contains(" 3  #FEFEFE"));
        assert!(text.contains("/colorpalettegenerator/778899-889977-fefefe"));
        assert!(text.contains("undo:no"));
    }

    #[test]
    fn test_edit_apply_flow() {
        let (mut shell, _) = shell("336699-aaaaaa");
        run(&mut shell, "edit 1");
        assert!(shell.picker().is_open());

        let text = run(&mut shell, "hex ff8000");
        assert!(text.contains("#FF8000"));

        let text = run(&mut shell, "apply");
        assert!(text.starts_with("applied #FF8000"));
        assert_eq!(shell.engine().token(), "ff8000-aaaaaa");
        assert!(shell.engine().can_undo());
    }

    #[test]
    fn test_edit_cancel_keeps_color() {
        let (mut shell, _) = shell("336699-aaaaaa");
        run(&mut shell, "edit 1");
        run(&mut shell, "hue 120");
        run(&mut shell, "sv 100 100");
        let text = run(&mut shell, "cancel");
        assert!(text.starts_with("cancelled, kept #336699"));
        assert_eq!(shell.engine().token(), "336699-aaaaaa");
        assert!(!shell.engine().can_undo());
    }

    #[test]
    fn test_picker_commands_need_session() {
        let (mut shell, _) = shell("336699-aaaaaa");
        assert_eq!(run(&mut shell, "hue 10"), "picker is not open");
        assert_eq!(run(&mut shell, "apply"), "picker is not open");
    }

    #[test]
    fn test_structural_commands() {
        let (mut shell, clipboard) = shell("000000-ffffff");
        assert!(run(&mut shell, "rm 1").starts_with("unchanged"));

        run(&mut shell, "add 1");
        assert_eq!(shell.engine().token(), "000000-808080-ffffff");

        run(&mut shell, "move 3 1");
        assert_eq!(shell.engine().token(), "ffffff-000000-808080");

        let text = run(&mut shell, "copy 3");
        assert_eq!(clipboard.contents().as_deref(), Some("808080"));
        assert!(text.contains("copied!"));

        run(&mut shell, "undo");
        assert_eq!(shell.engine().token(), "000000-808080-ffffff");
        run(&mut shell, "redo");
        assert_eq!(shell.engine().token(), "ffffff-000000-808080");

        assert_eq!(run(&mut shell, "lock 9"), "no entry 9");
    }

    #[test]
    fn test_open_token_resets() {
        let (mut shell, _) = shell("000000-ffffff");
        run(&mut shell, "gen");
        run(&mut shell, "open 111111-222222-333333");
        assert_eq!(shell.engine().token(), "111111-222222-333333");
        assert!(!shell.engine().can_undo());
    }

    #[test]
    fn test_keys_listing() {
        let (mut shell, _) = shell("000000-ffffff");
        let text = run(&mut shell, "keys");
        assert!(text.contains("Ctrl Z"));
        assert!(text.contains("Ctrl Y"));
    }

    #[test]
    fn test_quit() {
        let (mut shell, _) = shell("000000-ffffff");
        assert_eq!(shell.execute(Command::Quit), ShellStatus::Quit);
    }
}
