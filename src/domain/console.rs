/// Hidden command console.
///
/// A lookup table from command name to canned response. Two commands act
/// instead of answering: `clear` (alias `cls`) wipes the history, `reset`
/// asks the caller to throw the whole application state away.

pub const BANNER: &str = "terminal v0.1 - type 'help' for commands";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ConsoleOutcome {
    /// Echo + response were appended.
    Answered,
    /// History was emptied.
    Cleared,
    /// Caller must reset the application.
    Reset,
}

#[derive(Clone, Debug)]
pub struct ConsoleSession {
    history: Vec<String>,
    pub input: String,
}

/// Canned response for a normalized command, if there is one.
pub fn lookup(cmd: &str) -> Option<&'static str> {
    let response = match cmd {
        "help" => "commands: seeds, bravery, move, hope, patience, 2025, heartbreak, bloom, truth, clear, reset",
        "seeds" => "the day you plant the seed is not the day you eat the fruit. keep planting. keep watering. keep trusting even when you can't see anything growing.",
        "bravery" => "you are not a coward. don't be a coward. no matter what. pursue what you really want. always tell the truth.",
        "move" => "you're not a tree. MOVE. pivot. change direction. start over. you can go literally anywhere from here :-)",
        "hope" => "God's Not Finished. there are so many tomorrows. so many versions of yourself you haven't met yet. LFG :-)",
        "patience" => "you're allowed to want things before they arrive. waiting is not punishment. you're exactly on time even when it doesn't feel like it.",
        "2025" => "you loved. you learned. you planted seeds in the dark. you're not who you were. AFFIRM!!!!!",
        "heartbreak" => "you speedran through love and heartbreak and that's GOOD actually. tomorrow is beautiful. redirect accepted.",
        "bloom" => "not everything you planted this year was meant to bloom this year. the garden remembers what you watered in the dark.",
        "truth" => "i always speak my truth :-) i always get clarity :-) i never leave anything unsaid :-) AFFIRM!!!!!",
        _ => return None,
    };
    Some(response)
}

impl ConsoleSession {
    pub fn new() -> Self {
        ConsoleSession {
            history: vec![BANNER.to_string()],
            input: String::new(),
        }
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Run whatever is in the input buffer and clear it.
    pub fn submit(&mut self) -> ConsoleOutcome {
        let line = std::mem::take(&mut self.input);
        self.execute(&line)
    }

    /// Run one command line. Matching is trimmed and case-insensitive;
    /// anything unknown answers "command not found".
    pub fn execute(&mut self, line: &str) -> ConsoleOutcome {
        let cmd = line.trim().to_lowercase();
        match cmd.as_str() {
            "clear" | "cls" => {
                self.history.clear();
                ConsoleOutcome::Cleared
            }
            "reset" => ConsoleOutcome::Reset,
            _ => {
                let response = match lookup(&cmd) {
                    Some(r) => r.to_string(),
                    None => format!("command not found: {}", cmd),
                };
                self.history.push(format!("> {}", line));
                self.history.push(response);
                ConsoleOutcome::Answered
            }
        }
    }
}

impl Default for ConsoleSession {
    fn default() -> Self {
        Self::new()
    }
}
