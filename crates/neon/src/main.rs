use std::io::stdout;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    event::{
        self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
        Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    execute,
};
use glam::{Vec2, Vec3};
use neon_config::Config;
use neon_core::{Viewport, palette};
use neon_cursor::{MarkerKind, PointerFollower};
use neon_menu::{ContextMenu, MenuOutcome};
use neon_particles::{ParticleField, Projection};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Position, Rect},
    style::Stylize,
    text::Line,
};

mod actions;
mod banner;
mod feed;
mod fetch;
mod logging;
mod notify;
mod poll;
mod stats;

use actions::{Command, ENABLE_EFFECTS_LABEL, TOGGLE_EFFECTS_LABEL};
use banner::Banner;
use feed::FeedMonitor;
use notify::Notifier;
use stats::StatsMonitor;

/// A neon portfolio landing screen for the terminal.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Config file to use instead of the platform default.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Print the effective config as TOML and exit.
    #[arg(long)]
    print_config: bool,
    /// Start with effects dimmed.
    #[arg(long)]
    no_effects: bool,
    /// Seed for the particle field.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    match logging::init() {
        Ok(path) => log::info!("Logging to {}", path.display()),
        Err(e) => eprintln!("neon: logging disabled: {e}"),
    }

    let mut config = neon_config::load_or_default(cli.config.as_deref());
    if cli.no_effects {
        config.effects.enabled = false;
    }
    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let terminal = ratatui::init();
    execute!(stdout(), EnableMouseCapture, EnableFocusChange)?;
    let result = App::new(config, cli.seed).run(terminal);
    if let Err(e) = execute!(stdout(), DisableMouseCapture, DisableFocusChange) {
        log::error!("Failed to release mouse capture: {}", e);
    }
    ratatui::restore();
    result
}

/// The main application which owns every effect and the polling monitors.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    config: Config,
    field: ParticleField,
    follower: PointerFollower,
    menu: ContextMenu<Command>,
    notifier: Notifier,
    banner: Banner,
    feed: Option<FeedMonitor>,
    stats: Option<StatsMonitor>,
    /// Effects off dims the field instead of removing it.
    effects_enabled: bool,
    viewport: Viewport,
    started: Instant,
    last_frame: Instant,
    /// Field steps taken so far.
    frames: u64,
    /// Pointer cell, while it is inside the terminal.
    pointer: Option<Position>,
    hovered_link: Option<usize>,
}

impl App {
    /// Construct a new instance of [`App`]. Pollers start in [`run`](Self::run).
    pub fn new(config: Config, seed: Option<u64>) -> Self {
        let field = match seed {
            Some(seed) => ParticleField::with_seed(config.field.clone(), seed),
            None => ParticleField::new(config.field.clone()),
        };
        let now = Instant::now();
        let mut app = Self {
            running: false,
            field,
            follower: PointerFollower::new(config.cursor.clone()),
            menu: ContextMenu::new(actions::default_menu(), config.menu),
            notifier: Notifier::new(Duration::from_millis(config.effects.toast_ms)),
            banner: Banner::new(&config.banner),
            feed: None,
            stats: None,
            effects_enabled: config.effects.enabled,
            viewport: Viewport::default(),
            started: now,
            last_frame: now,
            frames: 0,
            pointer: None,
            hovered_link: None,
            config,
        };
        app.sync_effects_label();
        app
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        let size = terminal.size()?;
        self.resize(Rect::new(0, 0, size.width, size.height));
        self.start_pollers();

        self.running = true;
        while self.running {
            self.update(Instant::now());
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        Ok(())
    }

    fn start_pollers(&mut self) {
        if let Some(url) = self.config.feed.url.clone() {
            log::info!("Polling update feed {}", url);
            let interval = Duration::from_secs(self.config.feed.interval_secs.max(1));
            self.feed = Some(FeedMonitor::start(url, interval));
        }
        if let Some(url) = self.config.stats.url.clone() {
            log::info!("Polling stats {}", url);
            let interval = Duration::from_secs(self.config.stats.interval_secs.max(1));
            self.stats = Some(StatsMonitor::start(url, interval));
        }
    }

    fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.config.effects.frame_ms.max(1))
    }

    fn elapsed(&self, now: Instant) -> f32 {
        now.saturating_duration_since(self.started).as_secs_f32()
    }

    fn projection(&self, now: Instant) -> Projection {
        self.field.projection(&self.viewport, self.elapsed(now))
    }

    /// Pointer position in field coordinates.
    fn pointer_in_field(&self, position: Position, now: Instant) -> Vec3 {
        self.projection(now)
            .unproject(self.viewport.to_world(position))
    }

    /// Advance every effect by one frame, unless the last frame was less than
    /// one frame interval ago. Returns whether a frame was taken.
    fn update(&mut self, now: Instant) -> bool {
        let delta = now.saturating_duration_since(self.last_frame);
        if delta < self.frame_interval() {
            return false;
        }
        self.last_frame = now;
        self.frames += 1;

        let pointer = self
            .pointer
            .filter(|_| self.effects_enabled && self.follower.is_inside())
            .map(|p| self.pointer_in_field(p, now));
        self.field.step(self.elapsed(now), pointer);
        self.field.refresh_connections();

        self.follower.tick(now);
        self.menu.tick(delta);
        self.notifier.tick(now);

        if let Some(feed) = &self.feed {
            for update in feed.drain() {
                self.notifier.push(format!("Update: {update}"), now);
            }
        }
        true
    }

    /// (Re)populate the field for the current viewport.
    fn reset_field(&mut self) {
        let settings = self.field.settings();
        let bounds = settings.bounds_for(self.viewport.size());
        let count = settings.count;
        self.field.initialize(count, bounds);
        log::debug!("Field initialized with {} particles", self.field.len());
    }

    fn resize(&mut self, area: Rect) {
        self.viewport = Viewport::new(area);
        self.menu.on_resize(area);
        self.reset_field();
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let now = Instant::now();
        let area = frame.area();
        let opacity = if self.effects_enabled {
            1.0
        } else {
            self.config.effects.dimmed_opacity
        };

        self.field
            .render(frame, self.viewport, self.projection(now), opacity);
        self.banner
            .render(frame, area, self.elapsed(now), self.hovered_link);
        self.render_status(frame, area);
        self.menu.render(frame);
        self.notifier.render(frame, area, now);
        self.follower.render(frame, self.viewport, now);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        if area.height == 0 {
            return;
        }
        let row = Rect::new(area.x, area.bottom() - 1, area.width, 1);
        let help = Line::from(vec![
            "q".bold().fg(palette::ACCENT),
            " quit  ".dark_gray(),
            "e".bold().fg(palette::ACCENT),
            " effects  ".dark_gray(),
            "alt+←/→".bold().fg(palette::ACCENT),
            " sections  ".dark_gray(),
            "right-click".bold().fg(palette::ACCENT),
            " menu".dark_gray(),
        ]);
        frame.render_widget(help, row);

        if let Some(stats) = &self.stats {
            let line = Line::from(stats.status().line())
                .fg(palette::MUTED)
                .right_aligned();
            frame.render_widget(line, row);
        }
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Keeps handling events until the next frame is due.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        let deadline = self.last_frame + self.frame_interval();
        while self.running {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if timeout.is_zero() || !event::poll(timeout)? {
                break;
            }
            let event = event::read()?;
            self.on_event(event, Instant::now());
        }
        Ok(())
    }

    fn on_event(&mut self, event: Event, now: Instant) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key, now),
            Event::Mouse(mouse) => self.on_mouse_event(mouse, now),
            Event::FocusGained => self.follower.pointer_entered(),
            Event::FocusLost => {
                self.follower.pointer_left();
                self.field.aim_camera(Vec2::ZERO);
                self.pointer = None;
                self.hovered_link = None;
            }
            Event::Resize(width, height) => self.resize(Rect::new(0, 0, width, height)),
            _ => {}
        }
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent, now: Instant) {
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        {
            self.quit();
            return;
        }
        if self.menu.is_visible() {
            if let MenuOutcome::Selected(command) = self.menu.on_key(key.code) {
                self.execute(command, now);
            }
            return;
        }
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q')) => self.quit(),
            (_, KeyCode::F(5)) => self.execute(Command::Refresh, now),
            (KeyModifiers::ALT, KeyCode::Right) => self.execute(Command::Forward, now),
            (KeyModifiers::ALT, KeyCode::Left) => self.execute(Command::Back, now),
            (_, KeyCode::Char('e')) => self.execute(Command::ToggleEffects, now),
            _ => {}
        }
    }

    fn on_mouse_event(&mut self, mouse: MouseEvent, now: Instant) {
        let position = Position::new(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(MouseButton::Left) => {
                self.pointer_moved(position, now);
            }
            MouseEventKind::Down(MouseButton::Left) => {
                self.pointer_moved(position, now);
                self.follower.set_pressed_state(true, now);
                self.on_left_click(position, now);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.follower.set_pressed_state(false, now);
            }
            MouseEventKind::Down(MouseButton::Right) => {
                self.pointer_moved(position, now);
                self.menu.show(position, self.viewport.area);
            }
            _ => {}
        }
    }

    fn pointer_moved(&mut self, position: Position, now: Instant) {
        let world = self.viewport.to_world(position);
        let moved = self.pointer != Some(position);
        self.pointer = Some(position);
        self.follower.update_raw_position(world, now);
        self.field.aim_camera(self.pointer_ndc(world));

        if moved {
            let origin = self.pointer_in_field(position, now);
            self.field.emit_trail(origin);
        }

        self.menu.on_pointer_move(position);
        self.hovered_link = self.banner.link_at(self.viewport.area, position);
        self.follower
            .set_hover_state(self.menu.contains(position) || self.hovered_link.is_some());
    }

    /// World point in normalized viewport coordinates, -1.0..=1.0.
    fn pointer_ndc(&self, world: Vec2) -> Vec2 {
        let size = self.viewport.size().max(Vec2::ONE);
        world / size * 2.0 - Vec2::ONE
    }

    fn on_left_click(&mut self, position: Position, now: Instant) {
        match self.menu.on_click(position) {
            MenuOutcome::Selected(command) => self.execute(command, now),
            MenuOutcome::Consumed => {}
            MenuOutcome::Ignored | MenuOutcome::Dismissed => {
                if let Some(index) = self.banner.link_at(self.viewport.area, position) {
                    self.banner.select(index);
                }
                let origin = self.pointer_in_field(position, now);
                let count = self.field.settings().burst.count;
                self.field.spawn_burst(origin, count);
            }
        }
    }

    fn execute(&mut self, command: Command, now: Instant) {
        log::debug!("command: {:?}", command);
        match command {
            Command::Refresh => self.reset_field(),
            Command::Forward => {
                self.banner.forward();
            }
            Command::Back => {
                self.banner.back();
            }
            Command::ViewContent => {
                self.banner.select_named("projects");
            }
            Command::Contact => {
                self.banner.select_named("contact");
            }
            Command::ToggleEffects => self.toggle_effects(now),
            Command::ToggleTrail => {
                let trail = &mut self.field.settings_mut().trail;
                trail.enabled = !trail.enabled;
                let state = if trail.enabled { "On" } else { "Off" };
                self.notifier.push(format!("Pointer Trail {state}"), now);
            }
            Command::ToggleConnections => {
                let connections = &mut self.field.settings_mut().connections;
                connections.enabled = !connections.enabled;
                let state = if connections.enabled { "On" } else { "Off" };
                self.notifier.push(format!("Connections {state}"), now);
            }
            Command::ToggleRing => {
                let visible = self.follower.toggle_kind(MarkerKind::Ring);
                let state = if visible { "On" } else { "Off" };
                self.notifier.push(format!("Cursor Ring {state}"), now);
            }
            Command::Quit => self.quit(),
        }
    }

    fn toggle_effects(&mut self, now: Instant) {
        self.effects_enabled = !self.effects_enabled;
        self.sync_effects_label();
        let message = if self.effects_enabled {
            "Effects Enabled"
        } else {
            "Effects Disabled"
        };
        self.notifier.push(message, now);
    }

    fn sync_effects_label(&mut self) {
        let label = if self.effects_enabled {
            TOGGLE_EFFECTS_LABEL
        } else {
            ENABLE_EFFECTS_LABEL
        };
        self.menu.relabel(&Command::ToggleEffects, label);
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

impl Drop for App {
    fn drop(&mut self) {
        if let Some(feed) = &self.feed {
            feed.stop();
        }
        if let Some(stats) = &self.stats {
            stats.stop();
        }
    }
}
