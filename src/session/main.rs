use crate::config::Config;
use crate::device_camera::interface::DeviceCamera;
use crate::device_display::interface::DeviceDisplay;
use crate::device_input::interface::DeviceInput;
use crate::inference::interface::InferenceProvider;
use crate::library::logger::interface::Logger;
use crate::library::periodic_task::PeriodicTask;
use crate::session::core::{init, transition, Effect, Event, State};
use crate::session::render::Render;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};

/// Owns the model, camera and auto timer of one controller and runs its event loop.
#[derive(Clone)]
pub struct Session {
    pub config: Config,
    pub logger: Arc<dyn Logger + Send + Sync>,
    pub device_camera: Arc<dyn DeviceCamera + Send + Sync>,
    pub device_input: Arc<dyn DeviceInput + Send + Sync>,
    pub inference: Arc<dyn InferenceProvider + Send + Sync>,
    pub render: Render,
    pub event_sender: Sender<Event>,
    pub event_receiver: Arc<Mutex<Receiver<Event>>>,
    pub auto_task: Arc<Mutex<Option<PeriodicTask>>>,
}

impl Session {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        device_camera: Arc<dyn DeviceCamera + Send + Sync>,
        device_input: Arc<dyn DeviceInput + Send + Sync>,
        device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
        inference: Arc<dyn InferenceProvider + Send + Sync>,
    ) -> Self {
        let (event_sender, event_receiver) = channel();

        Self {
            config,
            logger: logger.with_namespace("session"),
            device_camera,
            device_input,
            inference,
            render: Render::new(device_display),
            event_sender,
            event_receiver: Arc::new(Mutex::new(event_receiver)),
            auto_task: Arc::new(Mutex::new(None)),
        }
    }

    /// Runs until a quit command arrives and returns the final state.
    pub fn run(&self) -> Result<State, Box<dyn std::error::Error + Send + Sync>> {
        self.render.init()?;

        let (mut state, effects) = init();
        self.render.render(&state)?;
        self.spawn_effects(effects);

        let event_receiver = self
            .event_receiver
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        while state.running {
            let event = event_receiver.recv()?;

            let _ = self
                .logger
                .info(&format!("event: {}", event.to_display_string()));

            let (new_state, effects) = transition(&self.config, state, event);
            state = new_state;

            self.render.render(&state)?;

            if state.running {
                self.spawn_effects(effects);
            } else {
                for effect in effects {
                    self.run_effect(effect);
                }
            }
        }

        self.stop_auto_timer();
        let _ = self.logger.info("Session stopped");

        Ok(state)
    }

    fn spawn_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            if effect.is_immediate() {
                self.run_effect(effect);
                continue;
            }
            let self_clone = self.clone();
            std::thread::spawn(move || self_clone.run_effect(effect));
        }
    }
}
