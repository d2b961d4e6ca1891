use misguard_core::{AnalysisReport, AnalysisResult, Severity, StartError};

use super::{ANALYZE_ITEMS, AnalyzeItem, App, CONTACT_SEND_DELAY, EditTarget, InputMode, Screen};
use crate::action::Action;
use crate::tui_event::BackendCommand;

impl App {
    /// Process a user action and update state. Returns true if the app should quit.
    pub fn update(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => {
                self.should_quit = true;
                return true;
            }
            Action::Tick => {
                self.on_tick();
                return false;
            }
            Action::Resize(..) | Action::None => return false,
            _ => {}
        }

        // Text entry intercepts everything else
        if self.input_mode != InputMode::Normal {
            self.handle_text_input(action);
            return false;
        }

        // Backend config modal
        if self.backend_prompt.open {
            match action {
                Action::Activate => self.begin_edit(EditTarget::BackendUrl),
                Action::NavigateBack | Action::OpenBackendConfig => self.backend_prompt.close(),
                _ => {}
            }
            return false;
        }

        // Help overlay
        if self.show_help {
            if matches!(action, Action::ToggleHelp | Action::NavigateBack) {
                self.show_help = false;
            }
            return false;
        }

        match action {
            Action::NextPage => {
                let next = (self.screen.index() + 1) % Screen::all().len();
                self.switch_screen(Screen::all()[next]);
            }
            Action::PrevPage => {
                let n = Screen::all().len();
                let prev = (self.screen.index() + n - 1) % n;
                self.switch_screen(Screen::all()[prev]);
            }
            Action::GoToPage(i) => {
                if let Some(screen) = Screen::from_index(i) {
                    self.switch_screen(screen);
                }
            }
            Action::ToggleTheme => self.toggle_theme(),
            Action::ToggleHelp => self.show_help = true,
            Action::OpenBackendConfig => self.open_backend_config(),
            Action::DismissNotification => {
                if let Some(id) = self.notifications.newest().map(|n| n.id) {
                    self.notifications.dismiss(id, &mut self.scheduler);
                }
            }
            Action::DismissAllNotifications => {
                self.notifications.clear(&mut self.scheduler);
            }
            Action::WatchDemo => self.watch_demo(),
            Action::NavigateBack => {
                if self.screen != Screen::Home {
                    self.switch_screen(Screen::Home);
                }
            }
            other => match self.screen {
                Screen::Home => self.update_home(other),
                Screen::Analyze => self.update_analyze(other),
                Screen::Contact => self.update_contact(other),
                Screen::About | Screen::Api => {}
            },
        }
        false
    }

    fn update_home(&mut self, action: Action) {
        match action {
            Action::MoveDown | Action::MoveUp => {
                self.home_cursor = (self.home_cursor + 1) % super::HOME_BUTTONS.len();
            }
            Action::Activate => {
                if self.home_cursor == 0 {
                    self.switch_screen(Screen::Analyze);
                } else {
                    self.watch_demo();
                }
            }
            _ => {}
        }
    }

    fn update_analyze(&mut self, action: Action) {
        match action {
            Action::MoveDown => {
                self.analyze_cursor = (self.analyze_cursor + 1).min(ANALYZE_ITEMS.len() - 1);
            }
            Action::MoveUp => {
                self.analyze_cursor = self.analyze_cursor.saturating_sub(1);
            }
            Action::Activate => match self.analyze_item() {
                AnalyzeItem::Mode => self.mode = self.mode.toggle(),
                AnalyzeItem::Field(field) => self.begin_edit(EditTarget::Form(field)),
                AnalyzeItem::LoadExample => self.load_example(),
                AnalyzeItem::Clear => self.clear_form(),
                AnalyzeItem::Submit => self.submit_analysis(),
            },
            Action::Submit => self.submit_analysis(),
            Action::LoadExample => self.load_example(),
            Action::ClearForm => self.clear_form(),
            Action::ToggleMode => self.mode = self.mode.toggle(),
            Action::ScrollResultsDown => {
                self.results_scroll = self.results_scroll.saturating_add(1);
            }
            Action::ScrollResultsUp => {
                self.results_scroll = self.results_scroll.saturating_sub(1);
            }
            _ => {}
        }
    }

    fn update_contact(&mut self, action: Action) {
        let rows = misguard_core::ContactField::all().len() + 1; // fields + send button
        match action {
            Action::MoveDown => {
                self.contact_cursor = (self.contact_cursor + 1).min(rows - 1);
            }
            Action::MoveUp => {
                self.contact_cursor = self.contact_cursor.saturating_sub(1);
            }
            Action::Activate => match self.contact_item() {
                Some(field) => self.begin_edit(EditTarget::Contact(field)),
                None => self.submit_contact(),
            },
            Action::Submit => self.submit_contact(),
            _ => {}
        }
    }

    fn handle_text_input(&mut self, action: Action) {
        let Some(target) = self.editing else {
            self.input_mode = InputMode::Normal;
            return;
        };
        match action {
            Action::TextInput(ch) => self.insert_char(target, ch),
            Action::Paste(text) => {
                for ch in text.replace("\r\n", "\n").chars() {
                    let ch = match ch {
                        '\r' | '\n' if !target.multiline() => ' ',
                        '\r' => '\n',
                        other => other,
                    };
                    self.insert_char(target, ch);
                }
            }
            Action::Backspace => match target {
                EditTarget::Form(field) => self.form.backspace(field),
                EditTarget::Contact(field) => {
                    self.contact.field_mut(field).pop();
                }
                EditTarget::BackendUrl => {
                    self.backend_prompt.buffer.pop();
                }
            },
            Action::ConfirmInput => {
                self.end_edit();
                if target == EditTarget::BackendUrl {
                    self.save_backend_config();
                }
            }
            Action::CancelInput => {
                self.end_edit();
                if target == EditTarget::BackendUrl {
                    self.backend_prompt.close();
                }
            }
            _ => {}
        }
    }

    fn insert_char(&mut self, target: EditTarget, ch: char) {
        match target {
            EditTarget::Form(field) => {
                self.form.push_char(field, ch);
            }
            EditTarget::Contact(field) => self.contact.field_mut(field).push(ch),
            EditTarget::BackendUrl => {
                if !ch.is_whitespace() {
                    self.backend_prompt.buffer.push(ch);
                }
            }
        }
    }

    fn begin_edit(&mut self, target: EditTarget) {
        self.editing = Some(target);
        self.input_mode = if target.multiline() {
            InputMode::MultilineInput
        } else {
            InputMode::TextInput
        };
    }

    fn end_edit(&mut self) {
        self.editing = None;
        self.input_mode = InputMode::Normal;
    }

    /// Validate and start an analysis session.
    pub fn submit_analysis(&mut self) {
        let connected = self.connectivity.is_connected();
        match self.session.start(&self.form, connected, &mut self.scheduler) {
            Ok(generation) => {
                self.results_scroll = 0;
                if self.settings.live_analysis {
                    let sent = self.send(BackendCommand::Analyze {
                        generation,
                        base_url: self.settings.backend_url.clone(),
                        request: self.form.to_request(self.mode),
                    });
                    if !sent {
                        self.session.supply(generation, AnalysisResult::failure());
                    }
                } else {
                    self.session
                        .supply(generation, AnalysisResult::Success(AnalysisReport::mock()));
                }
            }
            Err(StartError::EmptyBody) => {
                self.notify("Please enter content to analyze.", Severity::Error);
            }
            Err(StartError::Disconnected) => {
                self.notify(
                    "Backend is not connected. Please configure the backend URL.",
                    Severity::Error,
                );
                self.open_backend_config();
            }
            Err(StartError::AlreadyRunning) => {}
        }
    }

    pub fn load_example(&mut self) {
        self.form = misguard_core::FormInput::example();
        self.notify("Example content loaded!", Severity::Info);
    }

    /// Reset the form and drop the last result. A running session keeps
    /// going; only its inputs are cleared.
    pub fn clear_form(&mut self) {
        self.form.clear();
        self.session.clear(&mut self.scheduler);
        self.results_scroll = 0;
    }

    pub fn toggle_theme(&mut self) {
        let theme = self.settings.theme.toggle();
        self.settings.theme = theme;
        self.theme = crate::theme::Theme::for_kind(theme);
        self.persist_settings(|s| s.theme = theme);
    }

    pub fn open_backend_config(&mut self) {
        let current = self.settings.backend_url.clone();
        self.backend_prompt.open_with(&current);
    }

    /// Persist the edited URL, probe it immediately, and confirm.
    pub fn save_backend_config(&mut self) {
        if let Some(url) = self.backend_prompt.candidate() {
            self.settings.backend_url = url;
        }
        self.backend_prompt.close();
        let url = self.settings.backend_url.clone();
        self.persist_settings(|s| s.backend_url = url);
        let probe = self
            .connectivity
            .reconfigure(self.settings.backend_url.clone());
        self.send(BackendCommand::Probe {
            base_url: probe.base_url,
        });
        self.notify("Backend configuration saved!", Severity::Success);
    }

    pub fn submit_contact(&mut self) {
        if self.contact_sending {
            return;
        }
        if self.contact.missing_required().is_some() {
            self.notify("Please fill in all required fields.", Severity::Error);
            return;
        }
        if !self.connectivity.is_connected() {
            self.notify(
                "Backend is not connected. Please try again later.",
                Severity::Error,
            );
            return;
        }
        self.contact_sending = true;
        self.scheduler
            .after(CONTACT_SEND_DELAY, misguard_core::TimerEvent::ContactSent);
    }

    fn watch_demo(&mut self) {
        self.notify("Demo feature coming soon!", Severity::Info);
    }
}
