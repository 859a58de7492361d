/// Per-visit screen data.
///
/// `ScreenId` says *which* screen is current; `Scene` holds what that visit
/// of the screen owns (ramps, typewriters, the minigame, the drawn fortune).
/// A scene is built on entry and dropped on exit, so nothing carries over
/// between visits.

use rand::Rng;

use crate::domain::anim::{install_manifest, InstallSequence, ProgressRamp, Typewriter};
use crate::domain::desktop::Desktop;
use crate::domain::fortune::Fortune;
use crate::domain::screen::{personalize, ScreenId, CASCADE_ERRORS};

/// Ramp step used by the preparing bar and install items.
pub const PREPARING_STEP: u8 = 2;
pub const INSTALL_STEP: u8 = 5;

/// Longest name / intention answer accepted.
pub const MAX_NAME: usize = 24;
pub const MAX_ANSWER: usize = 280;

pub enum Scene {
    Intro,
    Preparing { ramp: ProgressRamp },
    UserId,
    /// Numbered wizard step (also the desktop intro card and the lessons prompt).
    Step { body: Typewriter },
    Desktop { desktop: Desktop, sweeping: bool },
    Cascade { index: usize },
    Transition,
    Installing(InstallSequence),
    Intention { answer: String },
    Final {
        fortune: Fortune,
        consulted: bool,
        headline: Typewriter,
    },
}

impl Scene {
    /// Fresh scene for a visit to `screen`.
    pub fn build<R: Rng + ?Sized>(screen: ScreenId, name: &str, dwell_ticks: u32, rng: &mut R) -> Scene {
        match screen {
            ScreenId::Intro => Scene::Intro,
            ScreenId::Preparing => Scene::Preparing {
                ramp: ProgressRamp::new(100, PREPARING_STEP),
            },
            ScreenId::UserId => Scene::UserId,
            ScreenId::Desktop => Scene::Desktop {
                desktop: Desktop::new(),
                sweeping: false,
            },
            ScreenId::WizardM => Scene::Cascade { index: 0 },
            ScreenId::Transition => Scene::Transition,
            ScreenId::Installing => {
                Scene::Installing(InstallSequence::new(install_manifest(), INSTALL_STEP, dwell_ticks))
            }
            ScreenId::Intention => Scene::Intention { answer: String::new() },
            ScreenId::Final => {
                let headline = if name.trim().is_empty() {
                    "installation complete.".to_string()
                } else {
                    format!("installation complete, {}.", name.trim())
                };
                Scene::Final {
                    fortune: Fortune::draw(rng),
                    consulted: false,
                    headline: Typewriter::new(headline),
                }
            }
            // Numbered steps, the desktop intro card and the lessons prompt.
            ScreenId::WizardA
            | ScreenId::WizardB
            | ScreenId::WizardC
            | ScreenId::WizardD
            | ScreenId::WizardE
            | ScreenId::WizardF
            | ScreenId::WizardG
            | ScreenId::WizardH
            | ScreenId::WizardI
            | ScreenId::DesktopIntro
            | ScreenId::WizardK
            | ScreenId::WizardL => {
                let body = screen.step_copy().map(|c| c.body).unwrap_or_default();
                Scene::Step {
                    body: Typewriter::new(personalize(body, name)),
                }
            }
        }
    }

    /// Text currently being typed out, if this scene has one.
    pub fn typewriter_mut(&mut self) -> Option<&mut Typewriter> {
        match self {
            Scene::Step { body } => Some(body),
            Scene::Final { headline, .. } => Some(headline),
            _ => None,
        }
    }

    /// Number of cascade windows on screen.
    pub fn cascade_visible(&self) -> usize {
        match self {
            Scene::Cascade { index } => (*index + 1).min(CASCADE_ERRORS.len()),
            _ => 0,
        }
    }
}
