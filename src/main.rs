mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ecosort::{
    app_dirs::AppDirs,
    catalog::{Catalog, CategoryTag},
    classifier::Classifier,
    config::{Config, ConfigStore, FileConfigStore},
    impact::{self, WeeklyWaste},
    logging, login,
    notify::Notification,
    report::AnalysisReport,
    runtime::{AppEvent, CrosstermEventSource, FixedTicker, Runner},
    session::{Session, SessionConfig},
    SimError,
};
use rand::{rngs::StdRng, SeedableRng};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};
use tracing::{info, warn};

/// terminal waste-sorting simulator with a mock AI scanner
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Scan waste with a simulated AI camera, practise segregation on a drag-and-drop style board, and work through recycling challenges."
)]
pub struct Cli {
    /// seed for the simulated detector (random when omitted)
    #[clap(long, global = true)]
    seed: Option<u64>,

    /// skip the demo login screen
    #[clap(long)]
    skip_login: bool,

    /// count a challenge as completed when it starts as well as when it finishes
    #[clap(long)]
    count_starts: bool,

    /// stop the live camera from triggering analyses on its own
    #[clap(long)]
    no_live: bool,

    /// config file to use instead of the default location
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// run a single detection and print the analysis report
    Detect {
        /// print the report as JSON
        #[clap(long)]
        json: bool,
    },
    /// estimate weekly savings from sorted waste
    Impact {
        /// kg of wet waste sorted per week
        #[clap(long, default_value_t = 0.0)]
        wet: f64,
        /// kg of dry waste sorted per week
        #[clap(long, default_value_t = 0.0)]
        dry: f64,
        /// kg of hazardous waste sorted per week
        #[clap(long, default_value_t = 0.0)]
        hazardous: f64,
        /// print the figures as JSON
        #[clap(long)]
        json: bool,
    },
    /// print the effective configuration
    Config {
        /// write it back to the config file
        #[clap(long)]
        save: bool,
    },
}

impl Cli {
    fn config_store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }

    /// Flags win over the config file
    fn apply(&self, cfg: &mut Config) {
        if let Some(seed) = self.seed {
            cfg.seed = Some(seed);
        }
        if self.skip_login {
            cfg.skip_login = true;
        }
        if self.count_starts {
            cfg.count_challenge_starts = true;
        }
        if self.no_live {
            cfg.live_detection = false;
        }
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppState {
    Login,
    Scanner,
    Sorting,
    Challenges,
}

impl AppState {
    pub const TABS: [AppState; 3] = [AppState::Scanner, AppState::Sorting, AppState::Challenges];

    fn next(self) -> Self {
        match self {
            AppState::Login => AppState::Login,
            AppState::Scanner => AppState::Sorting,
            AppState::Sorting => AppState::Challenges,
            AppState::Challenges => AppState::Scanner,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            AppState::Login => "Login",
            AppState::Scanner => "Scanner",
            AppState::Sorting => "Sorting",
            AppState::Challenges => "Challenges",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LoginField {
    #[default]
    Email,
    Password,
}

#[derive(Debug, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub focus: LoginField,
    pub error: Option<String>,
}

impl LoginForm {
    fn focused(&mut self) -> &mut String {
        match self.focus {
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
        }
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        };
    }
}

#[derive(Debug)]
pub struct App {
    pub session: Session,
    pub state: AppState,
    pub login: LoginForm,
    pub selected_item: usize,
    pub selected_challenge: usize,
    rng: StdRng,
}

impl App {
    pub fn new(config: &Config) -> Result<Self, SimError> {
        Ok(Self {
            session: Session::new(SessionConfig::from(config))?,
            state: if config.skip_login {
                AppState::Scanner
            } else {
                AppState::Login
            },
            login: LoginForm::default(),
            selected_item: 0,
            selected_challenge: 0,
            rng: make_rng(config.seed),
        })
    }

    /// Surfaces a config file that was ignored at startup
    pub fn warn_config(&mut self, problem: &str) {
        self.session
            .toasts
            .push(Notification::warning(format!("⚠️ {problem}, using defaults")));
    }

    pub fn on_tick(&mut self, dt: Duration) {
        self.session.tick(dt, &mut self.rng);
    }

    /// Returns true when the app should quit
    pub fn on_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }
        if key.code == KeyCode::Esc {
            return true;
        }

        if self.state == AppState::Login {
            self.on_login_key(key);
            return false;
        }

        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Tab => self.state = self.state.next(),
            _ => match self.state {
                AppState::Scanner => self.on_scanner_key(key),
                AppState::Sorting => self.on_sorting_key(key),
                AppState::Challenges => self.on_challenges_key(key),
                AppState::Login => {}
            },
        }
        false
    }

    fn on_login_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab | KeyCode::Up | KeyCode::Down => self.login.toggle_focus(),
            KeyCode::Backspace => {
                self.login.focused().pop();
            }
            KeyCode::Enter => match login::authenticate(&self.login.email, &self.login.password) {
                Ok(()) => {
                    self.login.error = None;
                    self.state = AppState::Scanner;
                    self.session
                        .toasts
                        .push(Notification::success("Welcome back! 🌿"));
                }
                Err(err) => self.login.error = Some(err.to_string()),
            },
            KeyCode::Char(c) => self.login.focused().push(c),
            _ => {}
        }
    }

    fn on_scanner_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') => self.session.start_camera(),
            KeyCode::Char('s') => self.session.stop_camera(),
            KeyCode::Char('x') => self.session.clear_history(),
            KeyCode::Char(' ') | KeyCode::Enter => {
                // refusal is already surfaced as a toast
                let _ = self.session.capture();
            }
            _ => {}
        }
    }

    fn on_sorting_key(&mut self, key: KeyEvent) {
        let deck_len = self.session.quiz.deck().len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_item = self.selected_item.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected_item + 1 < deck_len {
                    self.selected_item += 1;
                }
            }
            KeyCode::Char(d @ '1'..='4') => {
                let zone = CategoryTag::ALL[(d as u8 - b'1') as usize];
                if let Ok(drop) = self.session.drop_item(self.selected_item, zone) {
                    if drop.outcome.correct {
                        self.select_next_unsorted();
                    }
                }
            }
            KeyCode::Char('r') => {
                self.session.reset_quiz();
                self.selected_item = 0;
            }
            _ => {}
        }
    }

    fn select_next_unsorted(&mut self) {
        let quiz = &self.session.quiz;
        let len = quiz.deck().len();
        if let Some(next) = (1..=len)
            .map(|offset| (self.selected_item + offset) % len)
            .find(|idx| !quiz.is_sorted(*idx))
        {
            self.selected_item = next;
        }
    }

    fn on_challenges_key(&mut self, key: KeyEvent) {
        let count = self.session.scoreboard.challenges().len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_challenge = self.selected_challenge.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected_challenge + 1 < count {
                    self.selected_challenge += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let _ = self.session.activate_challenge(self.selected_challenge);
            }
            _ => {}
        }
    }
}

fn print_report(report: &AnalysisReport) {
    println!("🔬 AI Analysis Summary");
    println!(
        "Items Detected: {} | Avg Confidence: {}% | Categories: {}",
        report.items_detected, report.avg_confidence, report.categories
    );
    println!();
    for result in &report.results {
        println!(
            "{} {} [{}] {}%",
            result.item.icon,
            result.item.name,
            result.item.category.zone_title().to_uppercase(),
            result.confidence
        );
        println!("    {}", result.item.material);
        println!("    {}", result.item.recycling);
    }
}

fn run_detect(config: &Config, json: bool) -> Result<(), Box<dyn Error>> {
    let classifier = Classifier::new(Catalog::standard())?;
    let mut rng = make_rng(config.seed);
    let report = AnalysisReport::from_results(classifier.detect(&mut rng));
    info!(items = report.items_detected, "one-shot detection");

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn run_impact(waste: WeeklyWaste, json: bool) -> Result<(), Box<dyn Error>> {
    let impact = impact::calculate(&waste);
    if json {
        println!("{}", serde_json::to_string_pretty(&impact)?);
    } else {
        println!("{}", impact.summary());
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    // logging first so config problems are reported
    match cli.command {
        Some(_) => logging::init_stderr_logging(),
        None => {
            if let Err(err) = logging::init_file_logging(&AppDirs::log_path()) {
                eprintln!("logging disabled: {err}");
            }
        }
    }

    let store = cli.config_store();
    let (mut config, config_warning) = match store.load() {
        Ok(cfg) => (cfg, None),
        // never overwrite a file we could not parse
        Err(err) if matches!(cli.command, Some(Command::Config { save: true })) => {
            let mut cmd = Cli::command();
            cmd.error(ErrorKind::Io, format!("{err}; not overwriting it")).exit();
        }
        Err(err) => {
            warn!(%err, "using default config");
            (Config::default(), Some(err.to_string()))
        }
    };
    cli.apply(&mut config);

    match cli.command.clone() {
        Some(Command::Detect { json }) => return run_detect(&config, json),
        Some(Command::Impact {
            wet,
            dry,
            hazardous,
            json,
        }) => {
            return run_impact(
                WeeklyWaste {
                    wet_kg: wet,
                    dry_kg: dry,
                    hazardous_kg: hazardous,
                },
                json,
            );
        }
        Some(Command::Config { save }) => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            if save {
                store.save(&config)?;
                eprintln!("saved to {}", store.path().display());
            }
            return Ok(());
        }
        None => {}
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let mut app = App::new(&config)?;
    if let Some(warning) = config_warning {
        app.warn_config(&warning);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());
    info!("tui started");

    loop {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        match runner.step() {
            AppEvent::Tick => app.on_tick(runner.tick_interval()),
            AppEvent::Resize => {}
            AppEvent::Key(key) => {
                if app.on_key(key) {
                    break;
                }
            }
        }
    }

    info!(
        points = app.session.scoreboard.profile().points,
        scans = app.session.scanner.history().len(),
        "tui finished"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.on_key(key(KeyCode::Char(c)));
        }
    }

    fn test_app(skip_login: bool) -> App {
        App::new(&Config {
            seed: Some(1),
            skip_login,
            live_detection: false,
            count_challenge_starts: false,
        })
        .unwrap()
    }

    #[test]
    fn login_gate_then_tabs() {
        let mut app = test_app(false);
        assert_eq!(app.state, AppState::Login);

        type_text(&mut app, "green@gmail.com");
        app.on_key(key(KeyCode::Tab));
        type_text(&mut app, "12345");
        app.on_key(key(KeyCode::Enter));
        assert_eq!(app.state, AppState::Login);
        assert_eq!(
            app.login.error.as_deref(),
            Some("Password must be at least 6 characters")
        );

        type_text(&mut app, "6");
        app.on_key(key(KeyCode::Enter));
        assert_eq!(app.state, AppState::Scanner);
        assert!(app.login.error.is_none());

        app.on_key(key(KeyCode::Tab));
        assert_eq!(app.state, AppState::Sorting);
        app.on_key(key(KeyCode::Tab));
        assert_eq!(app.state, AppState::Challenges);
        app.on_key(key(KeyCode::Tab));
        assert_eq!(app.state, AppState::Scanner);
    }

    #[test]
    fn q_is_text_on_login_but_quits_elsewhere() {
        let mut app = test_app(false);
        assert!(!app.on_key(key(KeyCode::Char('q'))));
        assert_eq!(app.login.email, "q");

        let mut app = test_app(true);
        assert!(app.on_key(key(KeyCode::Char('q'))));
        assert!(app.on_key(key(KeyCode::Esc)));
        assert!(app.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn capture_through_keys() {
        let mut app = test_app(true);
        app.on_key(key(KeyCode::Char('c')));
        app.on_key(key(KeyCode::Char(' ')));
        assert!(app.session.scanner.is_analyzing());

        for _ in 0..50 {
            app.on_tick(Duration::from_millis(100));
        }
        assert!(!app.session.scanner.is_analyzing());
        assert_eq!(app.session.scanner.history().len(), 1);

        app.on_key(key(KeyCode::Char('x')));
        assert!(app.session.scanner.history().is_empty());
    }

    #[test]
    fn sorting_keys_move_to_next_unsorted() {
        let mut app = test_app(true);
        app.on_key(key(KeyCode::Tab));
        // Banana Peel is first and wet
        app.on_key(key(KeyCode::Char('2')));
        assert!(app.session.quiz.is_sorted(0));
        assert_eq!(app.selected_item, 1);

        app.on_key(key(KeyCode::Char('3')));
        assert!(!app.session.quiz.is_sorted(1));
        assert_eq!(app.selected_item, 1);

        app.on_key(key(KeyCode::Char('r')));
        assert_eq!(app.session.quiz.sorted_count(), 0);
        assert_eq!(app.selected_item, 0);
    }

    #[test]
    fn challenge_keys_activate_selected() {
        let mut app = test_app(true);
        app.on_key(key(KeyCode::Tab));
        app.on_key(key(KeyCode::Tab));
        app.on_key(key(KeyCode::Down));
        app.on_key(key(KeyCode::Enter));
        let challenge = app.session.scoreboard.challenge(1).unwrap();
        assert_eq!(challenge.progress, 10);
    }

    #[test]
    fn config_problem_becomes_warning_toast() {
        let mut app = test_app(true);
        app.warn_config("malformed config /tmp/config.json: expected value");
        let toast = app.session.toasts.latest().unwrap();
        assert_eq!(toast.kind, ecosort::notify::NotificationKind::Warning);
        assert!(toast.message.ends_with("using defaults"));
    }

    #[test]
    fn cli_flags_override_config() {
        let cli = Cli::parse_from(["ecosort", "--seed", "5", "--skip-login", "--no-live", "--count-starts"]);
        let mut cfg = Config::default();
        cli.apply(&mut cfg);
        assert_eq!(cfg.seed, Some(5));
        assert!(cfg.skip_login);
        assert!(!cfg.live_detection);
        assert!(cfg.count_challenge_starts);
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }
}
