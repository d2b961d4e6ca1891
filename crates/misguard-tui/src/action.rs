/// Everything the user (or the clock) can ask the app to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    Tick,
    Resize(u16, u16),
    None,

    // Navigation
    NextPage,
    PrevPage,
    GoToPage(usize),
    MoveUp,
    MoveDown,
    /// Activate the focused item (edit field, press button).
    Activate,
    NavigateBack,

    // Global toggles
    ToggleTheme,
    ToggleHelp,
    OpenBackendConfig,
    DismissNotification,
    DismissAllNotifications,

    // Page-specific
    Submit,
    LoadExample,
    ClearForm,
    ToggleMode,
    WatchDemo,
    ScrollResultsDown,
    ScrollResultsUp,

    // Text entry
    TextInput(char),
    /// Bracketed paste into the field being edited.
    Paste(String),
    Backspace,
    ConfirmInput,
    CancelInput,
}
