use crate::library::periodic_task::PeriodicTask;
use crate::session::core::{Effect, Event};
use crate::session::main::Session;

impl Session {
    pub fn run_effect(&self, effect: Effect) {
        let _ = self
            .logger
            .info(&format!("Running effect: {}", effect.to_display_string()));

        match effect {
            Effect::SubscribeToInput => {
                let commands = self.device_input.commands();
                while let Ok(command) = commands.recv() {
                    if self.event_sender.send(Event::Input(command)).is_err() {
                        return;
                    }
                }
            }
            Effect::LoadModel => {
                let loaded = self.inference.load().and_then(|info| {
                    self.inference.warm_up()?;
                    let _ = self.logger.info(&format!(
                        "Model {} ready with {} outputs",
                        info.name, info.output_len
                    ));
                    Ok(info)
                });
                let _ = self.event_sender.send(Event::ModelLoadDone(loaded));
            }
            Effect::ReadImage { path } => {
                let read: Result<Vec<u8>, Box<dyn std::error::Error + Send + Sync>> =
                    std::fs::read(&path).map_err(|e| format!("{}: {}", path.display(), e).into());
                let _ = self.event_sender.send(Event::ImageReadDone(read));
            }
            Effect::StartCamera => {
                let started = self.device_camera.start();
                let _ = self.event_sender.send(Event::CameraStartDone(started));
            }
            Effect::StopCamera => {
                let stopped = self.device_camera.stop();
                let _ = self.event_sender.send(Event::CameraStopDone(stopped));
            }
            Effect::CaptureFrame => {
                let frame = self.device_camera.capture_frame();
                let _ = self.event_sender.send(Event::FrameCaptureDone(frame));
            }
            Effect::Infer { source, pixels } => {
                let output = self.inference.infer(&pixels);
                let _ = self
                    .event_sender
                    .send(Event::InferenceDone { source, output });
            }
            Effect::StartAutoTimer => {
                let event_sender = self.event_sender.clone();
                let task = PeriodicTask::spawn(self.config.auto_interval, move || {
                    event_sender.send(Event::AutoTick).is_ok()
                });

                let previous = self
                    .auto_task
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner())
                    .replace(task);
                if let Some(previous) = previous {
                    previous.cancel();
                }
            }
            Effect::StopAutoTimer => self.stop_auto_timer(),
        }
    }

    pub fn stop_auto_timer(&self) {
        let task = self
            .auto_task
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        if let Some(task) = task {
            task.cancel();
        }
    }
}
