use crate::{
    command::{Command, parse_command},
    editor::{KeyAction, LineEditor},
    view::{self, ViewSnap},
};
use anyhow::Result;
use async_trait::async_trait;
use claimcheck_checker::{ClaimChecker, DisplayRegion, render::View};
use claimcheck_runtime::actor::{Actor, Context};
use crossterm::{
    event::Event as CtEvent,
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io::{self, Stdout},
    time::{Duration, Instant},
};

const BRAILLE_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const HELP: &[&str] = &[
    "Type a claim and press Enter to check it.",
    "",
    "Keys:",
    "  Enter          submit the claim",
    "  Esc            clear the input",
    "  Up/Down        scroll the result",
    "  PgUp/PgDn      scroll faster",
    "  Ctrl-C         quit",
    "",
    "Commands:",
    "  /help          show this text",
    "  /clear         clear the result",
    "  /quit          exit",
];

pub enum TuiMsg {
    InputEvent(CtEvent),
    InputError(String),
    Tick,
    /// The checker wrote a new display state.
    Display(DisplayRegion),
}

pub struct TuiActor {
    checker: ClaimChecker,
    endpoint: String,

    // terminal
    term: Terminal<CrosstermBackend<Stdout>>,
    tick_rate: Duration,
    last_tick: Instant,
    restored: bool,

    // ui state
    editor: LineEditor,
    region: DisplayRegion,
    notice: Option<Vec<String>>,
    scroll: usize,
    dirty: bool,
    spin_idx: usize,
}

impl TuiActor {
    /// Switch the terminal to raw mode and the alternate screen.
    pub fn new(checker: ClaimChecker) -> Result<Self> {
        let mut stdout = io::stdout();
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut term = Terminal::new(backend)?;
        term.clear()?;

        let region = checker.snapshot();
        let endpoint = checker.endpoint();

        Ok(Self {
            checker,
            endpoint,
            term,
            tick_rate: Duration::from_millis(80),
            last_tick: Instant::now(),
            restored: false,
            editor: LineEditor::default(),
            region,
            notice: None,
            scroll: 0,
            dirty: true,
            spin_idx: 0,
        })
    }

    fn restore_terminal(&mut self) {
        if self.restored {
            return;
        }
        self.restored = true;
        disable_raw_mode().ok();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = self.term.show_cursor();
    }

    fn spinner(&self) -> &'static str {
        if self.region.in_flight > 0 {
            BRAILLE_FRAMES[self.spin_idx % BRAILLE_FRAMES.len()]
        } else {
            " "
        }
    }

    fn step_spinner(&mut self) {
        if self.region.in_flight > 0 {
            self.spin_idx = (self.spin_idx + 1) % BRAILLE_FRAMES.len();
            self.dirty = true;
        }
    }

    fn draw(&mut self) -> Result<()> {
        let snap = ViewSnap {
            endpoint: self.endpoint.clone(),
            input: self.editor.text().to_string(),
            input_cursor: self.editor.cursor(),
            view: View::from(&self.region.state),
            notice: self.notice.clone(),
            scroll: self.scroll,
            in_flight: self.region.in_flight,
            spinner: self.spinner(),
        };

        view::draw(&mut self.term, &snap)
    }

    fn apply_key(&mut self, action: KeyAction, ctx: &mut Context<Self>) {
        match action {
            KeyAction::Ignored => return,
            KeyAction::Edited => {}
            KeyAction::Scroll(delta) => {
                self.scroll = self.scroll.saturating_add_signed(delta);
            }
            KeyAction::Submit(line) => self.route_submit(line, ctx),
            KeyAction::Quit => self.quit(ctx),
        }
        self.dirty = true;
    }

    fn quit(&mut self, ctx: &mut Context<Self>) {
        self.restore_terminal();
        ctx.cancellation().cancel();
        ctx.stop();
    }

    fn route_submit(&mut self, line: String, ctx: &mut Context<Self>) {
        if let Some(cmd) = parse_command(&line) {
            match cmd {
                Command::Help => self.notice = Some(HELP.iter().map(|s| s.to_string()).collect()),
                Command::Clear => self.notice = None,
                Command::Quit => self.quit(ctx),
            }
            self.dirty = true;
            return;
        }

        self.notice = None;
        self.scroll = 0;
        // The request runs detached; its outcome arrives as `TuiMsg::Display`.
        if self.checker.submit(&line).is_none() {
            tracing::debug!("tui.empty_submit");
        }
    }
}

#[async_trait]
impl Actor for TuiActor {
    type Msg = TuiMsg;

    async fn handle(&mut self, msg: Self::Msg, ctx: &mut Context<Self>) -> Result<()> {
        match msg {
            TuiMsg::InputEvent(ev) => match ev {
                CtEvent::Key(k) => {
                    let action = self.editor.handle_key(k);
                    self.apply_key(action, ctx);
                }
                CtEvent::Resize(..) => self.dirty = true,
                _ => {}
            },
            TuiMsg::InputError(e) => {
                tracing::warn!(error = %e, "tui.input_error");
            }
            TuiMsg::Display(region) => {
                if region.state != self.region.state {
                    self.scroll = 0;
                }
                self.region = region;
                self.dirty = true;
            }
            TuiMsg::Tick => {
                self.step_spinner();
                if self.dirty || self.last_tick.elapsed() >= self.tick_rate {
                    self.draw()?;
                    self.last_tick = Instant::now();
                    self.dirty = false;
                }
            }
        }

        Ok(())
    }

    async fn stopped(&mut self) {
        self.restore_terminal();
        tracing::debug!("tui.stopped");
    }
}
