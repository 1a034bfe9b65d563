/// One parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Say(String),
    Status,
    Analyze(String),
    Reflect,
    Predict { domain: String, timeframe: String },
    Theme(Option<String>),
    Metrics,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  /status                       system status as JSON
  /analyze [kind]               quantum | ethical | memory | erps | security
  /reflect                      ERPS self-reflection
  /predict <domain> <timeframe> technology|society|ethics x short|medium|long
  /theme [light|dark]           show or set the stored theme
  /metrics                      Prometheus text exposition
  /quit                         leave
anything else is sent as a message";

/// `None` for blank lines.
pub fn parse(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let Some(rest) = line.strip_prefix('/') else {
        return Some(Command::Say(line.to_string()));
    };
    let mut words = rest.split_whitespace();
    let head = words.next().unwrap_or_default().to_lowercase();
    let command = match head.as_str() {
        "status" => Command::Status,
        "analyze" | "analyse" => Command::Analyze(words.next().unwrap_or("default").to_string()),
        "reflect" => Command::Reflect,
        "predict" => Command::Predict {
            domain: words.next().unwrap_or_default().to_string(),
            timeframe: words.next().unwrap_or_default().to_string(),
        },
        "theme" => Command::Theme(words.next().map(str::to_string)),
        "metrics" => Command::Metrics,
        "quit" | "exit" => Command::Quit,
        _ => Command::Help,
    };
    Some(command)
}
