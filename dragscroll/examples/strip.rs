use std::fs::File;
use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEventKind};
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::{cursor, execute, queue, terminal};
use simplelog::{Config, LevelFilter, WriteLogger};

use dragscroll::{
    display_width, Container, DragHost, DragScroll, Event, EventResult, Node, Rect,
};

const FRAME: Duration = Duration::from_millis(16);
const MARGIN: u16 = 2;

/// Build the strip text and a node per card. Every fifth card carries a
/// "[pin]" control that must not start a drag.
fn cards(count: usize) -> (String, Vec<Node>) {
    let mut text = String::new();
    let mut nodes = Vec::new();

    for i in 0..count {
        let start = display_width(&text);
        text.push_str(&format!("│ card {i:02} "));
        let mut card = Node::new(format!("card-{i}"));

        if i % 5 == 0 {
            let pin_start = display_width(&text);
            text.push_str("[pin] ");
            card = card.child(
                Node::new(format!("pin-{i}"))
                    .marker("non-draggable")
                    .span(pin_start, 5),
            );
        }
        nodes.push(card.span(start, display_width(&text) - start));
    }

    (text, nodes)
}

fn container(text: &str, nodes: Vec<Node>, width: u16) -> Container {
    let viewport = width.saturating_sub(MARGIN * 2);
    nodes.into_iter().fold(
        Container::new("strip")
            .bounds(Rect::new(MARGIN, 2, viewport, 1))
            .text_content(text),
        Container::child,
    )
}

fn draw(out: &mut impl Write, strip: &Container, text: &str) -> io::Result<()> {
    let rect = strip.rect();
    let visible: String = text
        .chars()
        .skip(strip.scroll_left() as usize)
        .take(rect.width as usize)
        .collect();

    let mut markers: Vec<&str> = strip.markers().collect();
    markers.sort_unstable();

    queue!(
        out,
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(MARGIN, 0),
        Print("drag the strip to scroll, q to quit"),
        cursor::MoveTo(rect.x, rect.y),
        SetAttribute(Attribute::Reverse),
        Print(visible),
        SetAttribute(Attribute::Reset),
        cursor::MoveTo(MARGIN, 4),
        Print(format!(
            "scroll_left={} / {}  markers=[{}]",
            strip.scroll_left(),
            strip.max_scroll_left(),
            markers.join(", ")
        )),
    )?;
    out.flush()
}

fn main() -> io::Result<()> {
    // The terminal owns stdout, so log to a file
    let log_file = File::create("strip.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(
        stdout,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        event::EnableMouseCapture,
        event::EnableFocusChange
    )?;

    let result = run(&mut stdout);

    execute!(
        stdout,
        event::DisableFocusChange,
        event::DisableMouseCapture,
        cursor::Show,
        terminal::LeaveAlternateScreen
    )?;
    terminal::disable_raw_mode()?;

    result
}

fn run(out: &mut io::Stdout) -> io::Result<()> {
    let (width, _) = terminal::size()?;
    let (text, nodes) = cards(40);
    let mut strip = container(&text, nodes, width);

    let mut drag = DragScroll::new();
    drag.on_attach(&mut strip);

    loop {
        draw(out, &strip, &text)?;

        let now = Instant::now();
        let timeout = drag
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
            .unwrap_or(FRAME);

        if event::poll(timeout)? {
            let raw = event::read()?;

            if let CrosstermEvent::Key(key) = &raw {
                if key.kind == KeyEventKind::Press
                    && matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
                {
                    return Ok(());
                }
            }
            if let CrosstermEvent::Resize(width, _) = raw {
                strip.resize(width.saturating_sub(MARGIN * 2));
            }

            let bounds = strip.rect();
            let translated = Event::from_crossterm(&raw, bounds, |x, y| strip.hit_test(x, y));
            if let Some(ev) = translated {
                if drag.handle(&mut strip, &ev, Instant::now()) == EventResult::Ignored {
                    log::trace!("Unhandled: {:?}", ev);
                }
            }
        }

        drag.poll(&mut strip, Instant::now());
        drag.on_frame(&mut strip);
    }
}
