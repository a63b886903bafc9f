/// Slash commands recognised in the input line.
///
/// Anything else, including other text that starts with `/`, is a claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Clear,
    Quit,
}

pub fn parse_command(input: &str) -> Option<Command> {
    match input.trim() {
        "/help" | "/?" => Some(Command::Help),
        "/clear" => Some(Command::Clear),
        "/quit" | "/exit" => Some(Command::Quit),
        _ => None,
    }
}
