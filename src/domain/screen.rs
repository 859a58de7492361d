/// Screen registry.
///
/// Every screen of the wizard is a variant of `ScreenId`. The order of
/// `ScreenId::ALL` is the narrative order; `next()` is the only successor
/// each screen ever requests. Static copy lives here as well so the
/// renderer and the controller agree on it.

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum ScreenId {
    Intro,
    Preparing,
    UserId,
    WizardA,
    WizardB,
    WizardC,
    WizardD,
    WizardE,
    WizardF,
    WizardG,
    WizardH,
    WizardI,
    DesktopIntro,
    Desktop,
    WizardK,
    WizardL,
    WizardM,
    Transition,
    Installing,
    Intention,
    Final,
}

/// What makes a screen ask for its successor.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Trigger {
    /// Any key or click.
    AnyKey,
    /// Enter / click on the "next"-style button.
    Next,
    /// Enter with a non-blank name typed.
    NameEntry,
    /// Fires by itself after this many milliseconds.
    Timer(u64),
    /// Enter, but only once the desktop minigame has completed.
    MinigameComplete,
    /// One of the numbered choices, then the follow-up dialog is dismissed.
    Choice,
    /// Screen-owned animation finishes and advances on its own.
    Sequence,
    /// Enter to continue, Esc to skip.
    Answer,
    /// Terminal screen.
    Never,
}

/// Copy for a numbered wizard step.
#[derive(Clone, Copy, Debug)]
pub struct StepCopy {
    pub step: &'static str,
    pub title: &'static str,
    /// May contain `{name}`.
    pub body: &'static str,
    pub button: &'static str,
}

pub const PREPARING_MS: u64 = 3500;

/// Shown in the name prompt and substituted into `{name}`.
pub const NAME_PLACEHOLDER: &str = "{name}";

impl ScreenId {
    pub const ALL: [ScreenId; 21] = [
        ScreenId::Intro,
        ScreenId::Preparing,
        ScreenId::UserId,
        ScreenId::WizardA,
        ScreenId::WizardB,
        ScreenId::WizardC,
        ScreenId::WizardD,
        ScreenId::WizardE,
        ScreenId::WizardF,
        ScreenId::WizardG,
        ScreenId::WizardH,
        ScreenId::WizardI,
        ScreenId::DesktopIntro,
        ScreenId::Desktop,
        ScreenId::WizardK,
        ScreenId::WizardL,
        ScreenId::WizardM,
        ScreenId::Transition,
        ScreenId::Installing,
        ScreenId::Intention,
        ScreenId::Final,
    ];

    /// Linear successor. `Final` has none.
    pub fn next(self) -> Option<ScreenId> {
        let idx = Self::ALL.iter().position(|s| *s == self)?;
        Self::ALL.get(idx + 1).copied()
    }

    pub fn trigger(self) -> Trigger {
        use ScreenId::*;
        match self {
            Intro => Trigger::AnyKey,
            Preparing => Trigger::Timer(PREPARING_MS),
            UserId => Trigger::NameEntry,
            WizardA | WizardB | WizardC | WizardD | WizardE | WizardF | WizardG | WizardH
            | WizardI | WizardL | DesktopIntro | Transition => Trigger::Next,
            Desktop => Trigger::MinigameComplete,
            WizardK => Trigger::Choice,
            WizardM | Installing => Trigger::Sequence,
            Intention => Trigger::Answer,
            Final => Trigger::Never,
        }
    }

    /// Upper-case tag used in logs.
    pub fn tag(self) -> &'static str {
        use ScreenId::*;
        match self {
            Intro => "INTRO",
            Preparing => "PREPARING",
            UserId => "USER_ID",
            WizardA => "WIZARD_A",
            WizardB => "WIZARD_B",
            WizardC => "WIZARD_C",
            WizardD => "WIZARD_D",
            WizardE => "WIZARD_E",
            WizardF => "WIZARD_F",
            WizardG => "WIZARD_G",
            WizardH => "WIZARD_H",
            WizardI => "WIZARD_I",
            DesktopIntro => "DESKTOP_INTRO",
            Desktop => "DESKTOP",
            WizardK => "WIZARD_K",
            WizardL => "WIZARD_L",
            WizardM => "WIZARD_M",
            Transition => "TRANSITION",
            Installing => "INSTALLING",
            Intention => "INTENTION",
            Final => "FINAL",
        }
    }

    /// Interstitial text shown while loading *into* this screen.
    pub fn loading_message(self) -> Option<&'static str> {
        use ScreenId::*;
        match self {
            WizardA => Some("loading user profile..."),
            DesktopIntro => Some("mounting desktop..."),
            WizardK => Some("emptying trash..."),
            Transition => Some("archiving 2025.exe..."),
            Installing => Some("preparing to install 2026.exe..."),
            Final => Some("finalizing installation..."),
            _ => None,
        }
    }

    /// Copy for screens drawn as a numbered wizard step.
    pub fn step_copy(self) -> Option<StepCopy> {
        use ScreenId::*;
        let copy = |step, title, body| StepCopy { step, title, body, button: "next" };
        let c = match self {
            WizardA => copy(
                "step 1 of 14",
                "removing temporary files...",
                "hi {name}. temporary files served their purpose in this version. sometimes you delete to make space for an upgrade. holding on to them slows the whole system down. clearing space for what's next...",
            ),
            WizardB => copy(
                "step 2 of 14",
                "analyzing installed programs...",
                "you learned how humans work better this year. including yourself. especially yourself. you're not the same person who started this year. AFFIRM!!!!!",
            ),
            WizardC => copy(
                "step 3 of 14",
                "scanning for corrupted narratives...",
                "you know yourself best. trust your pattern recognition. you're allowed to believe what you see. TRUST YOURSELF.",
            ),
            WizardD => copy(
                "step 4 of 14",
                "ERROR: cannot delete hope.exe",
                "God's Not Finished. some things refuse to be uninstalled. there are so many tomorrows you haven't seen yet. so many versions of yourself you haven't become.",
            ),
            WizardE => copy(
                "step 5 of 14",
                "archiving lessons learned...",
                "THE DAY YOU PLANT THE SEED IS NOT THE DAY YOU EAT THE FRUIT. you watered things in the dark. the garden remembers. your seeds are still growing even if you can't see them yet.",
            ),
            WizardF => copy(
                "step 6 of 14",
                "removing broken shortcuts...",
                "heartbreak redirected you. rejection protected you. there is no path to get back on. you're not stuck, you're just scared. you're not a tree. MOVE. there are no shortcuts, darling.",
            ),
            WizardG => copy(
                "step 7 of 14",
                "WARNING: patience.exe is still processing...",
                "not everything blooms on your timeline and that's okay. wanting is not weakness. you don't have to be patient perfectly. you just have to keep going.",
            ),
            WizardH => copy(
                "step 8 of 14",
                "scanning for corrupted files...",
                "you speedran through love and heartbreak and growth and that's GOOD actually. you stayed present, open and earnest even when it hurt. LFG :-)",
            ),
            WizardI => copy(
                "step 9 of 14",
                "defragmenting memories...",
                "you're not who you were in january, {name}. you're always becoming. shedding is never comfortable. growth is supposed to feel like this.",
            ),
            DesktopIntro => StepCopy {
                step: "step 10 of 14",
                title: "cleaning up your desktop...",
                body: "some files on your desktop are corrupted. drag them to the trash with the mouse, or select one with tab and press delete. some files will not go quietly.",
                button: "open desktop",
            },
            WizardK => StepCopy {
                step: "step 11 of 14",
                title: "compressing 2025...",
                body: "save these lessons?",
                button: "1 yes   2 always   3 already saved in my bones",
            },
            WizardL => copy(
                "step 12 of 14",
                "ERROR: cannot install cynicism.exe",
                "you could close off. you could decide love isn't worth it. you could build walls. but you won't. because you're not a coward, {name}. LFG :-)",
            ),
            _ => return None,
        };
        Some(c)
    }

    /// In-fiction error raised the moment the screen is entered.
    pub fn entry_error(self) -> Option<(&'static str, &'static str)> {
        match self {
            ScreenId::WizardD => Some(("Error", "cannot delete hope.exe - file is protected")),
            _ => None,
        }
    }
}

/// Substitute the user's name into `{name}` placeholders.
pub fn personalize(text: &str, name: &str) -> String {
    text.replace(NAME_PLACEHOLDER, name.trim())
}

/// Choices offered on `WizardK`.
pub const LESSON_CHOICES: [&str; 3] = ["yes", "always", "already saved in my bones"];
pub const LESSON_ALERT: &str = "good. you'll need them later.";

/// Error windows stacked on `WizardM`, in order.
pub const CASCADE_ERRORS: [&str; 5] = [
    "ERROR: cannot delete love.exe - access denied",
    "ERROR: cannot remove hope.dll - system file protected by God's Not Finished",
    "ERROR: cannot uninstall faith.sys - required by future.exe",
    "ERROR: cannot remove growth.dll - permanently installed",
    "some things aren't meant to be uninstalled :-)",
];

/// Delay before error `index + 1` appears.
pub fn cascade_delay_ms(index: usize) -> u64 {
    1500 + index as u64 * 500
}

/// Pause after the last error before moving on.
pub const CASCADE_HOLD_MS: u64 = 3000;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn chain_is_linear_and_ends_at_final() {
        let mut seen = HashSet::new();
        let mut cur = ScreenId::Intro;
        seen.insert(cur);
        while let Some(n) = cur.next() {
            assert!(seen.insert(n), "{:?} visited twice", n);
            cur = n;
        }
        assert_eq!(cur, ScreenId::Final);
        assert_eq!(seen.len(), ScreenId::ALL.len());
    }

    #[test]
    fn desktop_sits_between_intro_card_and_k() {
        assert_eq!(ScreenId::DesktopIntro.next(), Some(ScreenId::Desktop));
        assert_eq!(ScreenId::Desktop.next(), Some(ScreenId::WizardK));
        assert_eq!(ScreenId::Desktop.trigger(), Trigger::MinigameComplete);
    }

    #[test]
    fn only_final_never_advances() {
        for s in ScreenId::ALL {
            assert_eq!(s.trigger() == Trigger::Never, s == ScreenId::Final, "{:?}", s);
        }
    }

    #[test]
    fn tags_are_unique() {
        let tags: HashSet<&str> = ScreenId::ALL.iter().map(|s| s.tag()).collect();
        assert_eq!(tags.len(), ScreenId::ALL.len());
    }

    #[test]
    fn every_next_step_has_copy() {
        for s in ScreenId::ALL {
            if s.trigger() == Trigger::Next && s != ScreenId::Transition {
                assert!(s.step_copy().is_some(), "{:?} has no copy", s);
            }
        }
    }

    #[test]
    fn personalize_fills_name() {
        let body = ScreenId::WizardA.step_copy().unwrap().body;
        let text = personalize(body, "  Ada ");
        assert!(text.starts_with("hi Ada."));
        assert!(!text.contains(NAME_PLACEHOLDER));
    }

    #[test]
    fn cascade_delays_grow() {
        assert_eq!(cascade_delay_ms(0), 1500);
        assert_eq!(cascade_delay_ms(4), 3500);
    }
}
