//! Timeline scripts: one `<ms> <command> [args]` per line, `#` starts a
//! comment. Times are absolute milliseconds from engine construction and
//! must not decrease.

use serde::Serialize;
use slider_engine::{EngineInput, Point, PointerEvent};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScriptAction {
    Input(EngineInput),
    /// Replace the slides with this many generated ones.
    Items(usize),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScriptStep {
    pub at_ms: u64,
    pub action: ScriptAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("line {line}: expected `<ms> <command> [args]`")]
    Malformed { line: usize },

    #[error("line {line}: invalid time `{value}`")]
    BadTime { line: usize, value: String },

    #[error("line {line}: time {at_ms}ms is earlier than the previous step")]
    OutOfOrder { line: usize, at_ms: u64 },

    #[error("line {line}: unknown command `{command}`")]
    UnknownCommand { line: usize, command: String },

    #[error("line {line}: `{command}` expects {expected}")]
    BadArguments {
        line: usize,
        command: String,
        expected: &'static str,
    },
}

pub fn parse_script(source: &str) -> Result<Vec<ScriptStep>, ScriptError> {
    let mut steps = Vec::new();
    let mut last_ms = 0;

    for (idx, raw) in source.lines().enumerate() {
        let line = idx + 1;
        let text = raw.split('#').next().unwrap_or_default().trim();
        if text.is_empty() {
            continue;
        }

        let mut parts = text.split_whitespace();
        let (Some(time), Some(command)) = (parts.next(), parts.next()) else {
            return Err(ScriptError::Malformed { line });
        };
        let at_ms: u64 = time.parse().map_err(|_| ScriptError::BadTime {
            line,
            value: time.to_string(),
        })?;
        if at_ms < last_ms {
            return Err(ScriptError::OutOfOrder { line, at_ms });
        }
        last_ms = at_ms;

        let args: Vec<&str> = parts.collect();
        let action = parse_action(line, command, &args)?;
        steps.push(ScriptStep { at_ms, action });
    }

    Ok(steps)
}

fn parse_action(
    line: usize,
    command: &str,
    args: &[&str],
) -> Result<ScriptAction, ScriptError> {
    let bad = |expected: &'static str| ScriptError::BadArguments {
        line,
        command: command.to_string(),
        expected,
    };

    let no_args = |input: EngineInput| {
        if args.is_empty() {
            Ok(ScriptAction::Input(input))
        } else {
            Err(bad("no arguments"))
        }
    };

    let index = || match args {
        [value] => value.parse::<usize>().map_err(|_| bad("one slide index")),
        _ => Err(bad("one slide index")),
    };

    let point = || match args {
        [x, y] => match (x.parse::<f32>(), y.parse::<f32>()) {
            (Ok(x), Ok(y)) => Ok(Point::new(x, y)),
            _ => Err(bad("two coordinates `X Y`")),
        },
        _ => Err(bad("two coordinates `X Y`")),
    };

    let pointer = |event: PointerEvent| {
        Ok(ScriptAction::Input(EngineInput::Pointer(event)))
    };

    match command {
        "next" => no_args(EngineInput::Next),
        "prev" => no_args(EngineInput::Prev),
        "play" => no_args(EngineInput::Play),
        "pause" => no_args(EngineInput::Pause),
        "enter" => no_args(EngineInput::PointerEnter),
        "leave" => no_args(EngineInput::PointerLeave),
        "cancel" => no_args(EngineInput::Pointer(PointerEvent::Cancel)),
        "goto" => Ok(ScriptAction::Input(EngineInput::SlideTo(index()?))),
        "page" => Ok(ScriptAction::Input(EngineInput::PaginationClick(
            index()?,
        ))),
        "down" => pointer(PointerEvent::Down(point()?)),
        "move" => pointer(PointerEvent::Move(point()?)),
        "up" => pointer(PointerEvent::Up(point()?)),
        "items" => match index()? {
            0 => Err(bad("a slide count above zero")),
            count => Ok(ScriptAction::Items(count)),
        },
        other => Err(ScriptError::UnknownCommand {
            line,
            command: other.to_string(),
        }),
    }
}
