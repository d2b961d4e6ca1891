use std::sync::Arc;

use misguard_core::{
    AnalysisResult, ManualClock, MemorySettingsStore, NotificationId, SessionState, ThemeKind,
};

use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

use super::*;
use crate::action::Action;
use crate::tui_event::BackendEvent;

struct Harness {
    app: App,
    clock: Arc<ManualClock>,
    store: Arc<MemorySettingsStore>,
}

/// App on a virtual clock with an in-memory store and no backend attached.
fn harness() -> Harness {
    harness_with(Settings::default())
}

fn harness_with(settings: Settings) -> Harness {
    let clock = Arc::new(ManualClock::new());
    let store = Arc::new(MemorySettingsStore::new(settings));
    let app = App::new(Box::new(store.clone()), clock.clone());
    Harness { app, clock, store }
}

impl Harness {
    /// Move virtual time forward in 100ms frames, ticking the app each frame.
    fn advance(&mut self, by: Duration) {
        let frame = Duration::from_millis(100);
        let mut left = by;
        while !left.is_zero() {
            let step = left.min(frame);
            self.clock.advance(step);
            self.app.update(Action::Tick);
            left -= step;
        }
    }

    fn connect(&mut self) {
        let base_url = self.app.settings.backend_url.clone();
        self.app.handle_backend_event(BackendEvent::StatusProbed {
            base_url,
            connected: true,
        });
    }

    fn messages(&self) -> Vec<String> {
        self.app
            .notifications
            .iter()
            .map(|n| n.message.clone())
            .collect()
    }

    fn attach_backend(&mut self) -> mpsc::UnboundedReceiver<BackendCommand> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.app.backend_cmd_tx = Some(tx);
        rx
    }
}

// ── Submission validation ───────────────────────────────────────

#[test]
fn empty_body_does_not_start_a_session() {
    let mut h = harness();
    h.connect();
    h.app.screen = Screen::Analyze;
    h.app.form.headline = "Only a headline".to_string();

    h.app.update(Action::Submit);

    assert_eq!(h.app.session.state(), &SessionState::Idle);
    assert_eq!(h.messages(), vec!["Please enter content to analyze."]);
    assert_eq!(
        h.app.notifications.newest().map(|n| n.severity),
        Some(Severity::Error)
    );
}

#[test]
fn whitespace_body_counts_as_empty() {
    let mut h = harness();
    h.connect();
    h.app.screen = Screen::Analyze;
    h.app.form.body = "   \n\t ".to_string();

    h.app.update(Action::Submit);

    assert!(!h.app.session.is_running());
    assert_eq!(h.app.notifications.len(), 1);
}

#[test]
fn disconnected_submission_opens_backend_prompt() {
    let mut h = harness();
    h.app.screen = Screen::Analyze;
    h.app.update(Action::LoadExample);
    let before = h.app.notifications.len();

    h.app.update(Action::Submit);

    assert_eq!(h.app.session.state(), &SessionState::Idle);
    assert!(h.app.backend_prompt.open);
    assert_eq!(h.app.backend_prompt.buffer, h.app.settings.backend_url);
    assert_eq!(h.app.notifications.len(), before + 1);
    assert_eq!(
        h.app.notifications.newest().map(|n| n.message.as_str()),
        Some("Backend is not connected. Please configure the backend URL.")
    );
}

// ── Session lifecycle ───────────────────────────────────────────

#[test]
fn example_analysis_completes_at_final_checkpoint() {
    let mut h = harness();
    h.connect();
    h.app.screen = Screen::Analyze;
    h.app.update(Action::LoadExample);
    h.app.update(Action::Submit);
    assert!(h.app.session.is_running());

    let mut seen = vec![h.app.session.progress()];
    for _ in 0..31 {
        h.advance(Duration::from_millis(100));
        seen.push(h.app.session.progress());
    }
    assert!(h.app.session.is_running(), "still running at 3.1s");
    assert!(seen.windows(2).all(|w| w[0] <= w[1]), "progress went backwards: {seen:?}");
    for checkpoint in [25, 50, 75] {
        assert!(seen.contains(&checkpoint), "missed {checkpoint}: {seen:?}");
    }

    h.advance(Duration::from_millis(100));
    let Some(AnalysisResult::Success(report)) = h.app.session.result() else {
        panic!("expected a report, got {:?}", h.app.session.state());
    };
    assert_eq!(report.credibility_score, 0.85);
    assert_eq!(report.confidence, 0.92);
    assert!(h.messages().contains(&"Analysis completed successfully!".to_string()));
}

#[test]
fn resubmitting_while_running_is_ignored() {
    let mut h = harness();
    h.connect();
    h.app.screen = Screen::Analyze;
    h.app.update(Action::LoadExample);
    h.app.update(Action::Submit);
    let generation = h.app.session.generation();
    let notes = h.app.notifications.len();

    h.advance(Duration::from_millis(900));
    h.app.update(Action::Submit);

    assert_eq!(h.app.session.generation(), generation);
    assert_eq!(h.app.notifications.len(), notes);
    assert_eq!(h.app.session.progress(), 25);
}

#[test]
fn new_session_discards_previous_result() {
    let mut h = harness();
    h.connect();
    h.app.screen = Screen::Analyze;
    h.app.update(Action::LoadExample);
    h.app.update(Action::Submit);
    h.advance(Duration::from_millis(3200));
    assert!(h.app.session.result().is_some());

    h.app.update(Action::Submit);

    assert!(h.app.session.result().is_none());
    assert_eq!(h.app.session.progress(), 0);
}

#[test]
fn clear_resets_form_and_result() {
    let mut h = harness();
    h.connect();
    h.app.screen = Screen::Analyze;
    h.app.update(Action::LoadExample);
    h.app.update(Action::Submit);
    h.advance(Duration::from_millis(3200));

    h.app.update(Action::ClearForm);

    assert_eq!(h.app.form, misguard_core::FormInput::default());
    assert_eq!(h.app.session.state(), &SessionState::Idle);
}

#[test]
fn clear_while_running_keeps_session_going() {
    let mut h = harness();
    h.connect();
    h.app.screen = Screen::Analyze;
    h.app.update(Action::LoadExample);
    h.app.update(Action::Submit);
    h.advance(Duration::from_millis(1000));

    h.app.update(Action::ClearForm);

    assert!(h.app.form.body.is_empty());
    assert!(h.app.session.is_running());
    h.advance(Duration::from_millis(2200));
    assert!(matches!(
        h.app.session.result(),
        Some(AnalysisResult::Success(_))
    ));
}

#[test]
fn live_mode_without_backend_resolves_to_error_card() {
    let mut h = harness_with(Settings {
        live_analysis: true,
        ..Settings::default()
    });
    h.connect();
    h.app.screen = Screen::Analyze;
    h.app.update(Action::LoadExample);
    h.app.update(Action::Submit);

    h.advance(Duration::from_millis(3200));

    assert_eq!(h.app.session.result(), Some(AnalysisResult::failure()));
    assert_eq!(
        h.app.notifications.newest().map(|n| n.message.as_str()),
        Some("Analysis failed. Please try again.")
    );
}

#[test]
fn live_mode_sends_request_and_waits_for_reply() {
    let mut h = harness_with(Settings {
        live_analysis: true,
        ..Settings::default()
    });
    let mut rx = h.attach_backend();
    h.connect();
    h.app.screen = Screen::Analyze;
    h.app.update(Action::LoadExample);
    h.app.update(Action::ToggleMode);
    h.app.update(Action::Submit);

    let Ok(BackendCommand::Analyze {
        generation,
        base_url,
        request,
    }) = rx.try_recv()
    else {
        panic!("expected an analyze command");
    };
    assert_eq!(base_url, h.app.settings.backend_url);
    assert_eq!(request.mode, AnalysisMode::Advanced);
    assert!(!request.text.is_empty());

    // Checkpoints alone do not resolve without an outcome.
    h.advance(Duration::from_millis(4000));
    assert!(h.app.session.is_running());
    assert_eq!(h.app.session.progress(), 100);

    let mut report = misguard_core::AnalysisReport::mock();
    report.credibility_score = 0.3;
    h.app.handle_backend_event(BackendEvent::AnalysisFinished {
        generation,
        result: AnalysisResult::Success(report),
    });
    let Some(AnalysisResult::Success(report)) = h.app.session.result() else {
        panic!("expected a report");
    };
    assert_eq!(report.band(), misguard_core::CredibilityBand::Low);
}

#[test]
fn stale_analysis_reply_is_ignored() {
    let mut h = harness();
    h.connect();
    h.app.screen = Screen::Analyze;
    h.app.update(Action::LoadExample);
    h.app.update(Action::Submit);
    let old = h.app.session.generation();
    h.advance(Duration::from_millis(3200));
    h.app.update(Action::Submit);

    h.app.handle_backend_event(BackendEvent::AnalysisFinished {
        generation: old,
        result: AnalysisResult::failure(),
    });
    h.advance(Duration::from_millis(3200));

    assert!(matches!(
        h.app.session.result(),
        Some(AnalysisResult::Success(_))
    ));
}

// ── Notifications ───────────────────────────────────────────────

#[test]
fn notification_expires_after_lifetime() {
    let mut h = harness();
    h.app.notify("hello", Severity::Info);

    h.advance(Duration::from_millis(4900));
    assert_eq!(h.app.notifications.len(), 1);

    h.advance(Duration::from_millis(100));
    assert!(h.app.notifications.is_empty());
}

#[test]
fn dismiss_removes_newest_before_expiry() {
    let mut h = harness();
    h.app.notify("first", Severity::Info);
    h.app.notify("second", Severity::Success);

    h.app.update(Action::DismissNotification);

    assert_eq!(h.messages(), vec!["first"]);
    assert_eq!(h.app.scheduler.len(), 1);
}

#[test]
fn dismiss_all_cancels_every_expiry() {
    let mut h = harness();
    h.app.notify("first", Severity::Info);
    h.app.notify("second", Severity::Error);

    h.app.update(Action::DismissAllNotifications);

    assert!(h.app.notifications.is_empty());
    assert!(h.app.scheduler.is_empty());
}

#[test]
fn notification_ids_are_unique() {
    let mut h = harness();
    let ids: Vec<NotificationId> = (0..5)
        .map(|i| {
            h.app
                .notifications
                .push(format!("n{i}"), Severity::Info, &mut h.app.scheduler)
        })
        .collect();
    let mut deduped = ids.clone();
    deduped.dedup();
    assert_eq!(ids.len(), deduped.len());
}

// ── Theme and settings ──────────────────────────────────────────

#[test]
fn theme_toggle_persists() {
    let mut h = harness();
    assert_eq!(h.app.settings.theme, ThemeKind::Dark);

    h.app.update(Action::ToggleTheme);
    assert_eq!(h.store.load().theme, ThemeKind::Light);
    assert_eq!(h.app.theme.kind, ThemeKind::Light);

    h.app.update(Action::ToggleTheme);
    assert_eq!(h.store.load().theme, ThemeKind::Dark);
    assert_eq!(h.store.writes(), 2);
}

#[test]
fn saved_theme_is_loaded_on_start() {
    let h = harness_with(Settings {
        theme: ThemeKind::Light,
        ..Settings::default()
    });
    assert_eq!(h.app.theme.kind, ThemeKind::Light);
}

#[test]
fn overrides_are_not_written_back() {
    let mut h = harness();
    h.app.apply_overrides(Settings {
        backend_url: "http://10.0.0.2:8080".to_string(),
        ..Settings::default()
    });

    assert_eq!(h.app.connectivity.base_url(), "http://10.0.0.2:8080");
    assert_eq!(h.store.writes(), 0);
}

#[test]
fn theme_toggle_saves_only_the_theme() {
    let mut h = harness();
    h.app.apply_overrides(Settings {
        backend_url: "http://10.0.0.2:8080".to_string(),
        theme: ThemeKind::Dark,
        live_analysis: true,
    });

    h.app.update(Action::ToggleTheme);

    let stored = h.store.load();
    assert_eq!(stored.theme, ThemeKind::Light);
    assert_eq!(stored.backend_url, misguard_core::settings::DEFAULT_BACKEND_URL);
    assert!(!stored.live_analysis);
    assert_eq!(h.app.settings.backend_url, "http://10.0.0.2:8080");
    assert!(h.app.settings.live_analysis);
}

#[test]
fn saving_backend_url_keeps_theme_override_out_of_store() {
    let mut h = harness();
    h.app.apply_overrides(Settings {
        theme: ThemeKind::Light,
        ..Settings::default()
    });
    h.app.update(Action::OpenBackendConfig);
    h.app.backend_prompt.buffer = "http://saved:1".to_string();
    h.app.save_backend_config();

    let stored = h.store.load();
    assert_eq!(stored.backend_url, "http://saved:1");
    assert_eq!(stored.theme, ThemeKind::Dark);
}

// ── Backend configuration ──────────────────────────────────────

#[test]
fn saving_backend_url_persists_and_probes() {
    let mut h = harness();
    let mut rx = h.attach_backend();
    h.app.update(Action::OpenBackendConfig);
    assert!(h.app.backend_prompt.open);

    h.app.update(Action::Activate);
    assert_eq!(h.app.input_mode, InputMode::TextInput);
    let len = h.app.backend_prompt.buffer.chars().count();
    for _ in 0..len {
        h.app.update(Action::Backspace);
    }
    for ch in "http://api.test:9000".chars() {
        h.app.update(Action::TextInput(ch));
    }
    h.app.update(Action::ConfirmInput);

    assert!(!h.app.backend_prompt.open);
    assert_eq!(h.app.input_mode, InputMode::Normal);
    assert_eq!(h.store.load().backend_url, "http://api.test:9000");
    assert_eq!(h.app.connectivity.base_url(), "http://api.test:9000");
    assert_eq!(
        rx.try_recv().ok(),
        Some(BackendCommand::Probe {
            base_url: "http://api.test:9000".to_string()
        })
    );
    assert_eq!(
        h.app.notifications.newest().map(|n| n.message.as_str()),
        Some("Backend configuration saved!")
    );
}

#[test]
fn cancelling_backend_edit_keeps_url() {
    let mut h = harness();
    h.app.update(Action::OpenBackendConfig);
    h.app.update(Action::Activate);
    h.app.update(Action::TextInput('x'));
    h.app.update(Action::CancelInput);

    assert!(!h.app.backend_prompt.open);
    assert_eq!(h.app.settings.backend_url, misguard_core::settings::DEFAULT_BACKEND_URL);
    assert_eq!(h.store.writes(), 0);
}

#[test]
fn probe_for_previous_url_is_ignored() {
    let mut h = harness();
    h.app.apply_overrides(Settings {
        backend_url: "http://new:1".to_string(),
        ..Settings::default()
    });

    h.app.handle_backend_event(BackendEvent::StatusProbed {
        base_url: misguard_core::settings::DEFAULT_BACKEND_URL.to_string(),
        connected: true,
    });

    assert!(!h.app.connectivity.is_connected());
}

// ── Connectivity lifecycle ──────────────────────────────────────

#[test]
fn start_greets_and_probes_then_polls() {
    let mut h = harness();
    let mut rx = h.attach_backend();

    h.app.start();

    assert_eq!(h.messages(), vec!["Welcome to Misinformation Guard!"]);
    assert!(matches!(rx.try_recv(), Ok(BackendCommand::Probe { .. })));
    assert!(rx.try_recv().is_err());

    h.advance(misguard_core::POLL_INTERVAL);
    assert!(matches!(rx.try_recv(), Ok(BackendCommand::Probe { .. })));
}

#[test]
fn wake_from_suspend_sends_one_poll() {
    let mut h = harness();
    let mut rx = h.attach_backend();
    h.app.start();
    while rx.try_recv().is_ok() {}

    h.clock.advance(Duration::from_secs(3600));
    h.app.update(Action::Tick);

    assert!(matches!(rx.try_recv(), Ok(BackendCommand::Probe { .. })));
    assert!(rx.try_recv().is_err());
}

#[test]
fn shutdown_stops_polling() {
    let mut h = harness();
    let mut rx = h.attach_backend();
    h.app.start();
    while rx.try_recv().is_ok() {}

    h.app.shutdown();
    h.advance(misguard_core::POLL_INTERVAL * 2);

    assert!(rx.try_recv().is_err());
}

// ── Contact form ────────────────────────────────────────────────

fn fill_contact(app: &mut App) {
    app.contact.name = "Ada".to_string();
    app.contact.email = "ada@example.com".to_string();
    app.contact.message = "Hello".to_string();
}

#[test]
fn contact_requires_fields() {
    let mut h = harness();
    h.connect();
    h.app.screen = Screen::Contact;
    h.app.contact.name = "Ada".to_string();

    h.app.update(Action::Submit);

    assert!(!h.app.contact_sending);
    assert_eq!(h.messages(), vec!["Please fill in all required fields."]);
}

#[test]
fn contact_requires_connection() {
    let mut h = harness();
    h.app.screen = Screen::Contact;
    fill_contact(&mut h.app);

    h.app.update(Action::Submit);

    assert!(!h.app.contact_sending);
    assert_eq!(
        h.messages(),
        vec!["Backend is not connected. Please try again later."]
    );
}

#[test]
fn contact_send_resets_after_delay() {
    let mut h = harness();
    h.connect();
    h.app.screen = Screen::Contact;
    fill_contact(&mut h.app);

    h.app.update(Action::Submit);
    assert!(h.app.contact_sending);

    h.advance(Duration::from_millis(900));
    assert!(h.app.contact_sending);

    h.advance(Duration::from_millis(100));
    assert!(!h.app.contact_sending);
    assert!(h.app.contact.name.is_empty());
    assert_eq!(
        h.app.notifications.newest().map(|n| n.message.as_str()),
        Some("Message sent successfully!")
    );
}

// ── Navigation and input ───────────────────────────────────────

#[test]
fn page_navigation_wraps() {
    let mut h = harness();
    h.app.update(Action::PrevPage);
    assert_eq!(h.app.screen, Screen::Contact);
    h.app.update(Action::NextPage);
    assert_eq!(h.app.screen, Screen::Home);
    h.app.update(Action::GoToPage(3));
    assert_eq!(h.app.screen, Screen::Api);
    h.app.update(Action::GoToPage(9));
    assert_eq!(h.app.screen, Screen::Api);
}

#[test]
fn home_start_analysis_opens_analyze_page() {
    let mut h = harness();
    h.app.update(Action::Activate);
    assert_eq!(h.app.screen, Screen::Analyze);
}

#[test]
fn watch_demo_notifies() {
    let mut h = harness();
    h.app.update(Action::MoveDown);
    h.app.update(Action::Activate);
    assert_eq!(h.app.screen, Screen::Home);
    assert_eq!(h.messages(), vec!["Demo feature coming soon!"]);
}

#[test]
fn typing_respects_headline_limit() {
    let mut h = harness();
    h.app.screen = Screen::Analyze;
    h.app.analyze_cursor = 1;
    h.app.update(Action::Activate);
    assert_eq!(
        h.app.editing,
        Some(EditTarget::Form(FormField::Headline))
    );

    for _ in 0..250 {
        h.app.update(Action::TextInput('a'));
    }
    h.app.update(Action::ConfirmInput);

    assert_eq!(h.app.form.char_count(FormField::Headline), 200);
    assert_eq!(h.app.input_mode, InputMode::Normal);
}

fn body_editing(h: &mut Harness) {
    h.app.screen = Screen::Analyze;
    h.app.analyze_cursor = 2;
    h.app.update(Action::Activate);
    assert_eq!(h.app.editing, Some(EditTarget::Form(FormField::Body)));
    assert_eq!(h.app.input_mode, InputMode::MultilineInput);
}

#[test]
fn typed_newline_stays_in_body() {
    let mut h = harness();
    body_editing(&mut h);

    let keys = [
        Event::Key(KeyEvent::new(KeyCode::Char('o'), KeyModifiers::NONE)),
        Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)),
        Event::Key(KeyEvent::new(KeyCode::Char('t'), KeyModifiers::NONE)),
        Event::Key(KeyEvent::new(KeyCode::Char('h'), KeyModifiers::NONE)),
        Event::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)),
    ];
    for key in &keys {
        let action = crate::input::map_event(key, &h.app.input_mode);
        assert!(!h.app.update(action));
    }

    assert_eq!(h.app.form.body, "o\nthq");
    assert_eq!(h.app.screen, Screen::Analyze);
    assert_eq!(h.app.settings.theme, ThemeKind::Dark);
    assert_eq!(h.store.writes(), 0);

    let esc = Event::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
    let action = crate::input::map_event(&esc, &h.app.input_mode);
    h.app.update(action);
    assert_eq!(h.app.input_mode, InputMode::Normal);
    assert_eq!(h.app.form.body, "o\nthq");
}

#[test]
fn pasted_paragraphs_keep_line_breaks_and_cap() {
    let mut h = harness();
    body_editing(&mut h);

    h.app.update(Action::Paste("line one\r\nthen more text".to_string()));
    assert_eq!(h.app.form.body, "line one\nthen more text");
    assert_eq!(h.app.input_mode, InputMode::MultilineInput);

    h.app.update(Action::Paste("x".repeat(6000)));
    assert_eq!(
        h.app.form.char_count(FormField::Body),
        misguard_core::form::BODY_MAX_CHARS
    );
}

#[test]
fn paste_into_headline_flattens_newlines() {
    let mut h = harness();
    h.app.screen = Screen::Analyze;
    h.app.analyze_cursor = 1;
    h.app.update(Action::Activate);

    h.app.update(Action::Paste("Big\nNews".to_string()));

    assert_eq!(h.app.form.headline, "Big News");
    assert_eq!(h.app.input_mode, InputMode::TextInput);
}

#[test]
fn quit_while_editing_still_quits() {
    let mut h = harness();
    h.app.screen = Screen::Analyze;
    h.app.update(Action::Activate);
    assert!(h.app.update(Action::Quit));
    assert!(h.app.should_quit);
}
