use crate::device_input::interface::{DeviceInput, InputCommand};
use std::sync::mpsc::{channel, Receiver};
use std::time::Duration;

/// Sends a fixed script of commands, each after its delay.
pub struct DeviceInputFake {
    script: Vec<(Duration, InputCommand)>,
}

impl DeviceInputFake {
    pub fn new(script: Vec<(Duration, InputCommand)>) -> Self {
        Self { script }
    }
}

impl DeviceInput for DeviceInputFake {
    fn commands(&self) -> Receiver<InputCommand> {
        let (tx, rx) = channel();
        let script = self.script.clone();

        std::thread::spawn(move || {
            for (delay, command) in script {
                std::thread::sleep(delay);
                if tx.send(command).is_err() {
                    return;
                }
            }
        });

        rx
    }
}
