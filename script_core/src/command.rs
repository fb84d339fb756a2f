//! Player commands and the session that routes them to a program.

use std::path::PathBuf;

use crate::grammar::strip_prefix_ci;
use crate::normalize::normalize;
use crate::program::Program;

pub const HELP: &str = "\
where am I?
who am I?
what do I have?
what can I do?
look around
look at <thing>
enter <place>
take <thing>
drop <thing>
<verb> <thing>
save <file>
load <file>
quit";

/// Reply to anything the session cannot parse.
pub const UNKNOWN: &str = "what?";

/// A parsed player command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    WhereAmI,
    WhoAmI,
    WhatDoIHave,
    WhatCanIDo,
    LookAround,
    LookAt(String),
    Enter(String),
    Take(String),
    Drop(String),
    Act { verb: String, object: String },
    Save(PathBuf),
    Load(PathBuf),
    Quit,
    Unknown(String),
}

impl Command {
    /// Parse one line of player input. Blank input parses to `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let line = normalize(line);
        if line.is_empty() {
            return None;
        }

        let exact = [
            ("help", Command::Help),
            ("where am i", Command::WhereAmI),
            ("who am i", Command::WhoAmI),
            ("what do i have", Command::WhatDoIHave),
            ("what can i do", Command::WhatCanIDo),
            ("look around", Command::LookAround),
            ("look", Command::LookAround),
            ("quit", Command::Quit),
            ("exit", Command::Quit),
        ];
        if let Some((_, command)) = exact
            .into_iter()
            .find(|(words, _)| words.eq_ignore_ascii_case(&line))
        {
            return Some(command);
        }

        let prefixed: [(&str, fn(String) -> Command); 8] = [
            ("look at ", Command::LookAt),
            ("enter ", Command::Enter),
            ("go to ", Command::Enter),
            ("move to ", Command::Enter),
            ("take ", Command::Take),
            ("drop ", Command::Drop),
            ("save ", |rest| Command::Save(PathBuf::from(rest))),
            ("load ", |rest| Command::Load(PathBuf::from(rest))),
        ];
        for (prefix, build) in prefixed {
            if let Some(rest) = strip_prefix_ci(&line, prefix) {
                return Some(build(rest.trim().to_string()));
            }
        }

        match line.split_once(' ') {
            Some((verb, object)) => Some(Command::Act {
                verb: verb.to_lowercase(),
                object: object.trim().to_string(),
            }),
            None => Some(Command::Unknown(line)),
        }
    }
}

/// What the read loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Say(String),
    Quit,
}

/// An interactive session over one program.
#[derive(Debug, Clone)]
pub struct Session {
    program: Program,
}

impl Session {
    pub fn new(program: Program) -> Self {
        Self { program }
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn has_won(&self) -> bool {
        self.program.has_won()
    }

    /// Run a command. Failures become messages; nothing here ends the session
    /// except `quit`.
    pub fn execute(&mut self, command: &Command) -> Reply {
        let program = &mut self.program;
        let text = match command {
            Command::Help => HELP.to_string(),
            Command::WhereAmI => program.where_am_i(),
            Command::WhoAmI => program.who_am_i(),
            Command::WhatDoIHave => program.what_do_i_have(),
            Command::WhatCanIDo => program.what_can_i_do(),
            Command::LookAround => program.look_around(),
            Command::LookAt(name) => render(program.look_at(name)),
            Command::Enter(name) => render(program.enter(name)),
            Command::Take(name) => render(program.take(name)),
            Command::Drop(name) => render(program.drop_item(name)),
            Command::Act { verb, object } => render(program.act(verb, object)),
            Command::Save(path) => match program.save(path) {
                Ok(()) => format!("saved to {}", path.display()),
                Err(err) => err.to_string(),
            },
            Command::Load(path) => match program.load_snapshot(path) {
                Ok(()) => format!("loaded {}", path.display()),
                Err(err) => err.to_string(),
            },
            Command::Quit => return Reply::Quit,
            Command::Unknown(_) => UNKNOWN.to_string(),
        };
        Reply::Say(text)
    }
}

fn render<E: std::fmt::Display>(result: Result<String, E>) -> String {
    result.unwrap_or_else(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_questions() {
        assert_eq!(Command::parse("Where am I?"), Some(Command::WhereAmI));
        assert_eq!(Command::parse("  who   am i "), Some(Command::WhoAmI));
        assert_eq!(Command::parse("what do I have?"), Some(Command::WhatDoIHave));
        assert_eq!(Command::parse("what can I do?"), Some(Command::WhatCanIDo));
        assert_eq!(Command::parse(""), None);
    }

    #[test]
    fn test_parse_object_commands() {
        assert_eq!(
            Command::parse("look at the blue key"),
            Some(Command::LookAt("the blue key".to_string()))
        );
        assert_eq!(
            Command::parse("go to the bathroom."),
            Some(Command::Enter("the bathroom".to_string()))
        );
        assert_eq!(
            Command::parse("Take lamp"),
            Some(Command::Take("lamp".to_string()))
        );
        assert_eq!(
            Command::parse("save game.json"),
            Some(Command::Save(PathBuf::from("game.json")))
        );
    }

    #[test]
    fn test_parse_act_and_unknown() {
        assert_eq!(
            Command::parse("Unlock the door"),
            Some(Command::Act {
                verb: "unlock".to_string(),
                object: "the door".to_string()
            })
        );
        assert_eq!(
            Command::parse("dance"),
            Some(Command::Unknown("dance".to_string()))
        );
    }

    #[test]
    fn test_session_renders_errors() {
        let program = Program::compile("the hall is a place\nyou are in the hall").unwrap();
        let mut session = Session::new(program);

        assert_eq!(
            session.execute(&Command::Take("unicorn".to_string())),
            Reply::Say("there is no unicorn".to_string())
        );
        assert_eq!(
            session.execute(&Command::Enter("the hall".to_string())),
            Reply::Say("you are already in the hall".to_string())
        );
        assert_eq!(
            session.execute(&Command::Unknown("dance".to_string())),
            Reply::Say(UNKNOWN.to_string())
        );
        assert_eq!(session.execute(&Command::Quit), Reply::Quit);
    }
}
