use std::{
    env,
    io::{self, BufRead, Write},
    path::PathBuf,
};

use log::{info, warn};
use readaloud_core::{
    app::{NavOrigin, ReadingSession, SessionNotice, TickResult},
    content::DocumentSource,
    loupe::{CaretHit, ElementHit, ElementKind, HitTester, Point, Viewport},
    marks::HighlightId,
    render::{Emphasis, ParagraphView, auto_scroll_offset},
};

use console_speech::ConsoleSpeech;
use settings_file::{FileSettingsStore, parse_setting};
use text_file::TextFile;
use typed_recognition::TypedRecognition;

#[path = "main/console_speech.rs"]
mod console_speech;
#[path = "main/settings_file.rs"]
mod settings_file;
#[path = "main/text_file.rs"]
mod text_file;
#[path = "main/typed_recognition.rs"]
mod typed_recognition;

const SETTINGS_FILE: &str = "readaloud.conf";
const VIEWPORT: Viewport = Viewport::new(1024.0, 768.0);
const LINE_HEIGHT_PX: f32 = 24.0;
const CHAR_WIDTH_PX: f32 = 9.0;

const ANSI_RESET: &str = "\x1b[0m";
const ANSI_BOLD: &str = "\x1b[1m";
const ANSI_DIM: &str = "\x1b[2m";
const ANSI_INVERSE: &str = "\x1b[7m";

type Session = ReadingSession<ConsoleSpeech, TypedRecognition, FileSettingsStore>;

struct Args {
    document: Option<PathBuf>,
    settings: PathBuf,
}

fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args();
    let mut session = ReadingSession::new(
        ConsoleSpeech::new(),
        TypedRecognition::new(),
        FileSettingsStore::new(args.settings),
        VIEWPORT,
    );

    if let Some(path) = args.document {
        load(&mut session, path);
    }
    repl(&mut session)
}

fn parse_args() -> Args {
    let mut document = None;
    let mut settings = PathBuf::from(SETTINGS_FILE);
    let mut args = env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--settings" => {
                if let Some(path) = args.next() {
                    settings = PathBuf::from(path);
                }
            }
            "--help" | "-h" => print_help(),
            _ => document = Some(PathBuf::from(arg)),
        }
    }

    Args { document, settings }
}

fn print_help() -> ! {
    println!("usage: readaloud [--settings <path>] [document.txt]");
    println!();
    println!("commands:");
    println!("  open PATH            load a text document");
    println!("  show [P]             print all paragraphs or one");
    println!("  next | prev          move focus (keyboard)");
    println!("  click P              focus a paragraph (pointer)");
    println!("  speak | all | stop   read focused paragraph, read to the end, stop");
    println!("  voice on|off         toggle voice commands");
    println!("  say PHRASE           speak a voice command");
    println!("  hl P START END       highlight a byte range");
    println!("  unhl P ID            remove a highlight");
    println!("  note P TEXT          attach a note");
    println!("  hover P OFFSET       move the pointer over a paragraph char");
    println!("  hover-ui LABEL       move the pointer over a button");
    println!("  voices               list speech voices");
    println!("  set KEY VALUE        change a setting");
    println!("  scroll MS            auto-scroll distance after MS milliseconds");
    println!("  quit");
    std::process::exit(0);
}

fn load(session: &mut Session, path: PathBuf) {
    let mut source = TextFile::new(path.clone());
    match source.load_text() {
        Ok(text) => {
            session.load_document(&text);
            info!(
                "loaded {} ({} paragraphs)",
                path.display(),
                session.document().len()
            );
        }
        Err(err) => warn!("cannot read {}: {}", path.display(), err),
    }
}

fn repl(session: &mut Session) -> io::Result<()> {
    let stdin = io::stdin();
    let mut out = io::stdout();
    let mut line = String::new();

    writeln!(out, "readaloud | type `help` for commands, `quit` to exit")?;
    loop {
        line.clear();
        write!(out, "read> ")?;
        out.flush()?;
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if matches!(input, "quit" | "exit" | ":q") {
            break;
        }

        if let Err(message) = run_command(session, input) {
            writeln!(out, "  {message}")?;
        }
        while session.tick() == TickResult::RenderRequested {}
        report_notices(session);
    }

    Ok(())
}

fn run_command(session: &mut Session, input: &str) -> Result<(), String> {
    let (command, rest) = input.split_once(' ').unwrap_or((input, ""));
    let rest = rest.trim();

    match command {
        "help" => print_commands(),
        "open" => load(session, PathBuf::from(rest)),
        "show" => show(session, rest)?,
        "next" => session.next_paragraph(NavOrigin::Keyboard),
        "prev" => session.previous_paragraph(NavOrigin::Keyboard),
        "click" => session.select_paragraph(parse_index(rest)?),
        "speak" => session.speak_current(),
        "all" => session.speak_all(),
        "stop" => session.stop(),
        "voice" => match rest {
            "on" => session.set_voice_control(true),
            "off" => session.set_voice_control(false),
            _ => return Err("usage: voice on|off".into()),
        },
        "say" => {
            if !session.recognizer_mut().say(rest) {
                return Err("voice control is off (`voice on`)".into());
            }
            println!("  heard: {rest}");
        }
        "hl" => {
            let [p, start, end] = parse_numbers::<3>(rest)?;
            let id = session
                .highlight_range(p, start, end)
                .map_err(|err| err.to_string())?;
            println!("  added {id}");
        }
        "unhl" => {
            let (p, id) = rest.split_once(' ').ok_or("usage: unhl P ID")?;
            let id: HighlightId = id.trim().parse().map_err(|_| "bad highlight id")?;
            if !session.remove_highlight(parse_index(p)?, id) {
                return Err(format!("no highlight {id}"));
            }
        }
        "note" => {
            let (p, text) = rest.split_once(' ').unwrap_or((rest, ""));
            session.set_annotation(parse_index(p)?, text.trim());
        }
        "hover" => {
            let [p, offset] = parse_numbers::<2>(rest)?;
            let text = session
                .document()
                .get(p)
                .map(|paragraph| paragraph.text.clone())
                .ok_or("no such paragraph")?;
            let cursor = Point::new(offset as f32 * CHAR_WIDTH_PX, p as f32 * LINE_HEIGHT_PX);
            hover(session, &TextUnderPointer { text: &text, offset }, cursor);
        }
        "hover-ui" => {
            hover(session, &ButtonUnderPointer { label: rest }, Point::new(8.0, 8.0));
        }
        "voices" => {
            let configured = session.settings().speech_voice.clone();
            for voice in session.voices() {
                let mark = if voice.id == configured { '*' } else { ' ' };
                println!(
                    " {mark} {} {} ({})",
                    voice.id, voice.display_name, voice.language_tag
                );
            }
        }
        "set" => {
            let (key, value) = rest.split_once(' ').ok_or("usage: set KEY VALUE")?;
            let update = parse_setting(key, value.trim()).ok_or("unknown setting or value")?;
            if !session.update_setting(update) {
                println!("  unchanged");
            }
        }
        "scroll" => {
            let elapsed_ms: u64 = rest.parse().map_err(|_| "usage: scroll MS")?;
            let speed = session.settings().auto_scroll_speed;
            if speed == 0 {
                println!("  auto-scroll is off");
            } else {
                println!("  {} px", auto_scroll_offset(speed, elapsed_ms));
            }
        }
        _ => return Err(format!("unknown command `{command}`")),
    }

    Ok(())
}

fn print_commands() {
    println!(
        "  open show next prev click speak all stop voice say hl unhl note hover hover-ui voices set scroll quit"
    );
}

fn parse_index(raw: &str) -> Result<usize, String> {
    raw.trim()
        .parse()
        .map_err(|_| format!("expected a paragraph number, got `{raw}`"))
}

fn parse_numbers<const N: usize>(raw: &str) -> Result<[usize; N], String> {
    let mut numbers = [0usize; N];
    let mut parts = raw.split_whitespace();
    for slot in numbers.iter_mut() {
        let part = parts.next().ok_or(format!("expected {N} numbers"))?;
        *slot = part.parse().map_err(|_| format!("not a number: `{part}`"))?;
    }
    Ok(numbers)
}

fn show(session: &Session, rest: &str) -> Result<(), String> {
    if rest.is_empty() {
        if session.document().is_empty() {
            println!("  (no document, use `open PATH`)");
        }
        for view in session.paragraph_views() {
            print_view(session, &view);
        }
        return Ok(());
    }

    let index = parse_index(rest)?;
    let view = session.paragraph_view(index).ok_or("no such paragraph")?;
    print_view(session, &view);
    for highlight in session.highlights().for_paragraph(index) {
        println!(
            "      {} {}..{} {:?}",
            highlight.id, highlight.start, highlight.end, highlight.text
        );
    }
    Ok(())
}

fn print_view(session: &Session, view: &ParagraphView<'_>) {
    let marker = if view.speaking {
        '~'
    } else if view.active {
        '>'
    } else {
        ' '
    };
    let note = if view.has_note { '*' } else { ' ' };

    let mut line = String::new();
    for run in &view.runs {
        if view.dimmed {
            line.push_str(ANSI_DIM);
        }
        if run.highlight.is_some() {
            line.push_str(ANSI_INVERSE);
        }
        match run.emphasis {
            Emphasis::Regular => {}
            Emphasis::Fixation => line.push_str(ANSI_BOLD),
            Emphasis::Faded => line.push_str(ANSI_DIM),
        }
        line.push_str(run.text);
        line.push_str(ANSI_RESET);
    }

    println!("{marker}{note}{:>3} {line}", view.index);
    if let Some(text) = session.annotation(view.index).filter(|text| !text.is_empty()) {
        println!("      note: {text}");
    }
}

fn hover<H: HitTester>(session: &mut Session, hit: &H, cursor: Point) {
    if !session.settings().loupe_active {
        println!("  loupe is off (`set loupe on`)");
        return;
    }
    match session.pointer_moved(hit, cursor) {
        Some(view) => println!(
            "  loupe: {:?} at ({}, {})",
            view.target.text(),
            view.position.x,
            view.position.y
        ),
        None => println!("  loupe: nothing under the pointer"),
    }
}

fn report_notices(session: &mut Session) {
    for notice in session.take_notices() {
        match notice {
            SessionNotice::ScrollIntoView(index) => {
                if let Some(view) = session.paragraph_view(index) {
                    print_view(session, &view);
                }
            }
            SessionNotice::Alert(alert) => println!("  ! {}", alert.message()),
        }
    }
}

struct TextUnderPointer<'a> {
    text: &'a str,
    offset: usize,
}

impl HitTester for TextUnderPointer<'_> {
    fn resolve_caret(&self, _point: Point) -> Option<CaretHit<'_>> {
        Some(CaretHit {
            text: self.text,
            offset: self.offset,
        })
    }

    fn resolve_element(&self, _point: Point) -> Option<ElementHit<'_>> {
        None
    }
}

struct ButtonUnderPointer<'a> {
    label: &'a str,
}

impl HitTester for ButtonUnderPointer<'_> {
    fn resolve_caret(&self, _point: Point) -> Option<CaretHit<'_>> {
        None
    }

    fn resolve_element(&self, _point: Point) -> Option<ElementHit<'_>> {
        Some(ElementHit {
            kind: ElementKind::Button,
            text: self.label,
            accessible_label: None,
        })
    }
}
