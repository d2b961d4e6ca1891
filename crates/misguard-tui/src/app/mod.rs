mod backend;
mod timers;
mod update;

use std::sync::Arc;
use std::time::Duration;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::widgets::Block;
use tokio::sync::mpsc;

use misguard_core::{
    AnalysisMode, AnalysisSession, Clock, ConnectivityMonitor, ContactField, ContactForm,
    FormField, FormInput, NotificationQueue, Scheduler, Settings, SettingsStore, Severity,
    TimerEvent,
};

use crate::model::prompt::BackendPrompt;
use crate::theme::Theme;
use crate::tui_event::BackendCommand;

/// Which page is currently displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Analyze,
    About,
    Api,
    Contact,
}

impl Screen {
    pub fn all() -> &'static [Screen] {
        &[
            Screen::Home,
            Screen::Analyze,
            Screen::About,
            Screen::Api,
            Screen::Contact,
        ]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Analyze => "Analyze",
            Self::About => "About",
            Self::Api => "API",
            Self::Contact => "Contact",
        }
    }

    pub fn index(self) -> usize {
        Self::all().iter().position(|&s| s == self).unwrap_or(0)
    }

    pub fn from_index(i: usize) -> Option<Self> {
        Self::all().get(i).copied()
    }
}

/// Input mode determines how keyboard input is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    TextInput,
    /// Like `TextInput`, but Enter inserts a line break.
    MultilineInput,
}

/// What keystrokes go into while editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    Form(FormField),
    Contact(ContactField),
    BackendUrl,
}

impl EditTarget {
    /// Fields that hold paragraphs rather than a single line.
    pub fn multiline(self) -> bool {
        matches!(
            self,
            Self::Form(FormField::Body) | Self::Contact(ContactField::Message)
        )
    }
}

/// Focusable rows on the analyze page, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyzeItem {
    Mode,
    Field(FormField),
    LoadExample,
    Clear,
    Submit,
}

pub const ANALYZE_ITEMS: [AnalyzeItem; 7] = [
    AnalyzeItem::Mode,
    AnalyzeItem::Field(FormField::Headline),
    AnalyzeItem::Field(FormField::Body),
    AnalyzeItem::Field(FormField::SourceUrl),
    AnalyzeItem::LoadExample,
    AnalyzeItem::Clear,
    AnalyzeItem::Submit,
];

/// Home page buttons.
pub const HOME_BUTTONS: [&str; 2] = ["Start Analysis", "Watch Demo"];

/// Delay before the simulated contact send reports success.
pub const CONTACT_SEND_DELAY: Duration = Duration::from_secs(1);

/// Main application state.
pub struct App {
    pub screen: Screen,
    pub theme: Theme,
    /// Effective settings, including CLI and env overrides.
    pub settings: Settings,
    /// What the store holds. Explicit changes are applied here and saved,
    /// so overrides never leak into the config file.
    persisted: Settings,
    store: Box<dyn SettingsStore>,
    pub scheduler: Scheduler<TimerEvent>,
    pub notifications: NotificationQueue,
    pub connectivity: ConnectivityMonitor,
    pub session: AnalysisSession,

    pub form: FormInput,
    pub mode: AnalysisMode,
    pub analyze_cursor: usize,
    pub results_scroll: u16,

    pub contact: ContactForm,
    pub contact_cursor: usize,
    pub contact_sending: bool,

    pub home_cursor: usize,
    /// Scheduler time when the home page was last entered (counter animation).
    pub home_entered_at: Duration,

    pub backend_prompt: BackendPrompt,
    pub input_mode: InputMode,
    pub editing: Option<EditTarget>,
    pub show_help: bool,
    pub should_quit: bool,
    pub tick: usize,

    /// Channel to send commands to the backend listener.
    pub backend_cmd_tx: Option<mpsc::UnboundedSender<BackendCommand>>,
}

impl App {
    pub fn new(store: Box<dyn SettingsStore>, clock: Arc<dyn Clock>) -> Self {
        let settings = store.load();
        let scheduler = Scheduler::new(clock);
        let home_entered_at = scheduler.now();

        Self {
            screen: Screen::Home,
            theme: Theme::for_kind(settings.theme),
            connectivity: ConnectivityMonitor::new(settings.backend_url.clone()),
            persisted: settings.clone(),
            settings,
            store,
            scheduler,
            notifications: NotificationQueue::new(),
            session: AnalysisSession::new(),
            form: FormInput::default(),
            mode: AnalysisMode::default(),
            analyze_cursor: 1,
            results_scroll: 0,
            contact: ContactForm::default(),
            contact_cursor: 0,
            contact_sending: false,
            home_cursor: 0,
            home_entered_at,
            backend_prompt: BackendPrompt::default(),
            input_mode: InputMode::Normal,
            editing: None,
            show_help: false,
            should_quit: false,
            tick: 0,
            backend_cmd_tx: None,
        }
    }

    /// Override settings resolved outside the store (CLI flags, env).
    /// Nothing is written back.
    pub fn apply_overrides(&mut self, settings: Settings) {
        if settings.backend_url != self.settings.backend_url {
            self.connectivity.reconfigure(settings.backend_url.clone());
        }
        self.theme = Theme::for_kind(settings.theme);
        self.settings = settings;
    }

    /// Startup: greet, arm the connectivity poll, probe once.
    /// Call after `backend_cmd_tx` is wired.
    pub fn start(&mut self) {
        self.notify("Welcome to Misinformation Guard!", Severity::Info);
        let probe = self.connectivity.start(&mut self.scheduler);
        self.send(BackendCommand::Probe {
            base_url: probe.base_url,
        });
    }

    /// Teardown: stop the recurring poll so no timer outlives the app.
    pub fn shutdown(&mut self) {
        self.connectivity.shutdown(&mut self.scheduler);
    }

    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) {
        self.notifications
            .push(message, severity, &mut self.scheduler);
    }

    pub fn analyze_item(&self) -> AnalyzeItem {
        ANALYZE_ITEMS[self.analyze_cursor.min(ANALYZE_ITEMS.len() - 1)]
    }

    pub fn contact_item(&self) -> Option<ContactField> {
        ContactField::all().get(self.contact_cursor).copied()
    }

    pub fn switch_screen(&mut self, screen: Screen) {
        if screen == Screen::Home && self.screen != Screen::Home {
            self.home_entered_at = self.scheduler.now();
        }
        self.screen = screen;
    }

    /// Time since the home page was entered, for the counters.
    pub fn home_elapsed(&self) -> Duration {
        self.scheduler.now().saturating_sub(self.home_entered_at)
    }

    /// Apply an explicit change to the stored settings and save them.
    fn persist_settings(&mut self, change: impl FnOnce(&mut Settings)) {
        change(&mut self.persisted);
        if let Err(e) = self.store.save(&self.persisted) {
            tracing::warn!(error = %e, "failed to persist settings");
            self.notify(format!("Could not save settings: {e}"), Severity::Error);
        }
    }

    /// Render the full UI.
    pub fn view(&mut self, f: &mut Frame) {
        f.render_widget(Block::default().style(self.theme.base_style()), f.area());

        let [nav, body, footer] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .areas(f.area());

        crate::view::nav::render(f, nav, self);
        match self.screen {
            Screen::Home => crate::view::home::render(f, body, self),
            Screen::Analyze => crate::view::analyze::render(f, body, self),
            Screen::About => crate::view::about::render(f, body, &self.theme),
            Screen::Api => crate::view::api::render(f, body, &self.theme),
            Screen::Contact => crate::view::contact::render(f, body, self),
        }
        crate::view::nav::render_status(f, footer, self);

        if self.backend_prompt.open {
            crate::view::backend_config::render(f, self);
        }
        if self.show_help {
            crate::view::help::render(f, &self.theme);
        }
        crate::view::notifications::render(f, self);
    }
}

#[cfg(test)]
mod tests;
