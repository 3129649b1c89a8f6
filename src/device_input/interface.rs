use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum InputCommand {
    SelectImage(PathBuf),
    PredictImage,
    StartCamera,
    StopCamera,
    PredictFrame,
    SetAuto(bool),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseCommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
}

pub const HELP: &str =
    "commands: image <path> | predict | start | stop | frame | auto on|off | quit";

impl InputCommand {
    pub fn parse(line: &str) -> Result<Self, ParseCommandError> {
        let line = line.trim();
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        match name.to_lowercase().as_str() {
            "" => Err(ParseCommandError::Empty),
            "image" | "open" => {
                if rest.is_empty() {
                    Err(ParseCommandError::MissingArgument("image"))
                } else {
                    Ok(InputCommand::SelectImage(PathBuf::from(rest)))
                }
            }
            "predict" => Ok(InputCommand::PredictImage),
            "start" => Ok(InputCommand::StartCamera),
            "stop" => Ok(InputCommand::StopCamera),
            "frame" => Ok(InputCommand::PredictFrame),
            "auto" => match rest.to_lowercase().as_str() {
                "on" => Ok(InputCommand::SetAuto(true)),
                "off" => Ok(InputCommand::SetAuto(false)),
                "" => Err(ParseCommandError::MissingArgument("auto")),
                other => Err(ParseCommandError::Unknown(format!("auto {}", other))),
            },
            "quit" | "exit" => Ok(InputCommand::Quit),
            other => Err(ParseCommandError::Unknown(other.to_string())),
        }
    }
}

/// A source of user commands, the buttons and file picker of the controller.
pub trait DeviceInput: Send + Sync {
    fn commands(&self) -> std::sync::mpsc::Receiver<InputCommand>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            InputCommand::parse("image photos/leaf 1.jpg"),
            Ok(InputCommand::SelectImage(PathBuf::from("photos/leaf 1.jpg")))
        );
        assert_eq!(InputCommand::parse(" predict "), Ok(InputCommand::PredictImage));
        assert_eq!(InputCommand::parse("START"), Ok(InputCommand::StartCamera));
        assert_eq!(InputCommand::parse("stop"), Ok(InputCommand::StopCamera));
        assert_eq!(InputCommand::parse("frame"), Ok(InputCommand::PredictFrame));
        assert_eq!(InputCommand::parse("auto on"), Ok(InputCommand::SetAuto(true)));
        assert_eq!(InputCommand::parse("auto OFF"), Ok(InputCommand::SetAuto(false)));
        assert_eq!(InputCommand::parse("exit"), Ok(InputCommand::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(InputCommand::parse("   "), Err(ParseCommandError::Empty));
        assert_eq!(
            InputCommand::parse("image"),
            Err(ParseCommandError::MissingArgument("image"))
        );
        assert_eq!(
            InputCommand::parse("auto"),
            Err(ParseCommandError::MissingArgument("auto"))
        );
        assert_eq!(
            InputCommand::parse("dance"),
            Err(ParseCommandError::Unknown("dance".to_string()))
        );
    }
}
