/// Events emitted while the wizard runs.
/// The presentation layer consumes these for sound.

use crate::domain::screen::ScreenId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WizardEvent {
    ScreenEntered(ScreenId),
    TransitionStarted { from: ScreenId, to: ScreenId },
    FileTrashed { id: String },
    AccessDenied { label: String },
    DesktopCleared,
    DialogOpened,
    DialogDismissed,
    ErrorPopped(usize),
    InstallItemDone(usize),
    ConsoleToggled(bool),
    ConsoleCommand,
    FortuneConsulted,
    EggToggled(bool),
    Reset,
}
