use crate::device_input::interface::{DeviceInput, InputCommand, ParseCommandError, HELP};
use crate::library::logger::interface::Logger;
use std::io::BufRead;
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;

/// Reads one command per line from stdin. End of input quits.
pub struct DeviceInputStdin {
    logger: Arc<dyn Logger + Send + Sync>,
}

impl DeviceInputStdin {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("input").with_namespace("stdin"),
        }
    }
}

impl DeviceInput for DeviceInputStdin {
    fn commands(&self) -> Receiver<InputCommand> {
        let (tx, rx) = channel();
        let logger = self.logger.clone();

        std::thread::spawn(move || {
            let _ = logger.info(HELP);
            let stdin = std::io::stdin();

            for line in stdin.lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        let _ = logger.error(&format!("Failed to read stdin: {}", e));
                        break;
                    }
                };

                match InputCommand::parse(&line) {
                    Ok(command) => {
                        if tx.send(command).is_err() {
                            return;
                        }
                    }
                    Err(ParseCommandError::Empty) => continue,
                    Err(e) => {
                        let _ = logger.error(&format!("{} ({})", e, HELP));
                    }
                }
            }

            let _ = tx.send(InputCommand::Quit);
        });

        rx
    }
}
