use crate::config::Config;
use crate::device_input::interface::InputCommand;
use crate::inference::interface::ModelInfo;
use crate::prediction::ranker::{rank, RankedPrediction};
use serde::Serialize;
use std::path::PathBuf;

/// Where the pixels of a prediction came from. Each source has its own result slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Image,
    Camera,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModelStatus {
    Loading,
    Ready(ModelInfo),
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CameraState {
    #[default]
    Stopped,
    Starting,
    Streaming,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AutoMode {
    #[default]
    Off,
    On,
}

#[derive(Debug, Clone, PartialEq)]
pub struct State {
    pub model: ModelStatus,
    pub camera: CameraState,
    pub auto: AutoMode,
    pub selected_image: Option<Vec<u8>>,
    pub in_flight: Option<Source>,
    pub status: String,
    pub image_result: Option<RankedPrediction>,
    pub camera_result: Option<RankedPrediction>,
    pub running: bool,
}

impl State {
    pub fn result(&self, source: Source) -> Option<&RankedPrediction> {
        match source {
            Source::Image => self.image_result.as_ref(),
            Source::Camera => self.camera_result.as_ref(),
        }
    }

    fn model_ready(&self) -> bool {
        matches!(self.model, ModelStatus::Ready(_))
    }

    fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }
}

#[derive(Debug)]
pub enum Event {
    Input(InputCommand),
    ModelLoadDone(Result<ModelInfo, Box<dyn std::error::Error + Send + Sync>>),
    ImageReadDone(Result<Vec<u8>, Box<dyn std::error::Error + Send + Sync>>),
    CameraStartDone(Result<(), Box<dyn std::error::Error + Send + Sync>>),
    CameraStopDone(Result<(), Box<dyn std::error::Error + Send + Sync>>),
    FrameCaptureDone(Result<Vec<u8>, Box<dyn std::error::Error + Send + Sync>>),
    InferenceDone {
        source: Source,
        output: Result<Vec<f64>, Box<dyn std::error::Error + Send + Sync>>,
    },
    AutoTick,
}

impl Event {
    pub fn to_display_string(&self) -> String {
        match self {
            Event::ImageReadDone(Ok(bytes)) => format!("ImageReadDone(Ok({} bytes))", bytes.len()),
            Event::FrameCaptureDone(Ok(frame)) => {
                format!("FrameCaptureDone(Ok({} bytes))", frame.len())
            }
            event => format!("{:?}", event),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    SubscribeToInput,
    LoadModel,
    ReadImage { path: PathBuf },
    StartCamera,
    StopCamera,
    CaptureFrame,
    Infer { source: Source, pixels: Vec<u8> },
    StartAutoTimer,
    StopAutoTimer,
}

impl Effect {
    pub fn to_display_string(&self) -> String {
        match self {
            Effect::Infer { source, pixels } => {
                format!("Infer {{ source: {:?}, pixels: {} bytes }}", source, pixels.len())
            }
            effect => format!("{:?}", effect),
        }
    }

    /// Effects that must take effect, in order, before the next event is handled.
    pub fn is_immediate(&self) -> bool {
        matches!(
            self,
            Effect::StartAutoTimer
                | Effect::StopAutoTimer
                | Effect::StartCamera
                | Effect::StopCamera
        )
    }
}

pub fn init() -> (State, Vec<Effect>) {
    (
        State {
            model: ModelStatus::Loading,
            camera: CameraState::Stopped,
            auto: AutoMode::Off,
            selected_image: None,
            in_flight: None,
            status: "Loading model…".to_string(),
            image_result: None,
            camera_result: None,
            running: true,
        },
        vec![Effect::SubscribeToInput, Effect::LoadModel],
    )
}

pub fn transition(config: &Config, state: State, event: Event) -> (State, Vec<Effect>) {
    match event {
        Event::Input(command) => on_input(state, command),

        Event::ModelLoadDone(Ok(info)) => {
            let status = if info.output_len > 0 && info.output_len != config.labels.len() {
                format!(
                    "Model loaded. Ready. ({} outputs, {} labels configured)",
                    info.output_len,
                    config.labels.len()
                )
            } else {
                "Model loaded. Ready.".to_string()
            };
            (
                State {
                    model: ModelStatus::Ready(info),
                    ..state
                }
                .with_status(status),
                vec![],
            )
        }
        Event::ModelLoadDone(Err(e)) => (
            State {
                model: ModelStatus::Failed(e.to_string()),
                ..state
            }
            .with_status("Failed to load model. Check the model path."),
            vec![],
        ),

        Event::ImageReadDone(Ok(bytes)) => (
            State {
                selected_image: Some(bytes),
                ..state
            }
            .with_status("Image selected"),
            vec![],
        ),
        Event::ImageReadDone(Err(e)) => (
            state.with_status(format!("Failed to read image: {}", e)),
            vec![],
        ),

        Event::CameraStartDone(Ok(())) => match state.camera {
            CameraState::Starting => (
                State {
                    camera: CameraState::Streaming,
                    ..state
                }
                .with_status("Camera started"),
                vec![],
            ),
            // stopped while starting
            CameraState::Stopped => (state, vec![Effect::StopCamera]),
            // completion of an earlier start, the camera is already up
            CameraState::Streaming => (state, vec![]),
        },
        Event::CameraStartDone(Err(_)) => (
            State {
                camera: CameraState::Stopped,
                ..state
            }
            .with_status("Camera access denied or unavailable"),
            vec![],
        ),
        Event::CameraStopDone(Ok(())) => (state, vec![]),
        Event::CameraStopDone(Err(e)) => (
            state.with_status(format!("Failed to stop camera: {}", e)),
            vec![],
        ),

        Event::AutoTick => {
            if state.auto == AutoMode::Off
                || !state.model_ready()
                || state.camera != CameraState::Streaming
                || state.in_flight.is_some()
            {
                return (state, vec![]);
            }
            (
                State {
                    in_flight: Some(Source::Camera),
                    ..state
                },
                vec![Effect::CaptureFrame],
            )
        }

        Event::FrameCaptureDone(Ok(frame)) => {
            if state.in_flight != Some(Source::Camera) {
                return (state, vec![]);
            }
            (
                state,
                vec![Effect::Infer {
                    source: Source::Camera,
                    pixels: frame,
                }],
            )
        }
        Event::FrameCaptureDone(Err(e)) => (
            State {
                in_flight: None,
                ..state
            }
            .with_status(format!("Frame capture failed: {}", e)),
            vec![],
        ),

        Event::InferenceDone { source, output } => {
            let state = State {
                in_flight: None,
                ..state
            };
            let ranked = output
                .map_err(|e| e.to_string())
                .and_then(|raw| rank(&raw, &config.labels).map_err(|e| e.to_string()));

            match ranked {
                Ok(prediction) => {
                    let state = match source {
                        Source::Image => State {
                            image_result: Some(prediction),
                            ..state
                        },
                        Source::Camera => State {
                            camera_result: Some(prediction),
                            ..state
                        },
                    };
                    (state.with_status("Ready"), vec![])
                }
                Err(message) => (
                    state.with_status(format!("Prediction failed: {}", message)),
                    vec![],
                ),
            }
        }
    }
}

fn on_input(state: State, command: InputCommand) -> (State, Vec<Effect>) {
    match command {
        InputCommand::SelectImage(path) => (
            state.with_status("Reading image…"),
            vec![Effect::ReadImage { path }],
        ),

        InputCommand::PredictImage => {
            if !state.model_ready() {
                return (state.with_status("Model not loaded"), vec![]);
            }
            if state.in_flight.is_some() {
                return (state.with_status("Prediction already running"), vec![]);
            }
            let pixels = match &state.selected_image {
                Some(pixels) => pixels.clone(),
                None => return (state.with_status("No image selected"), vec![]),
            };
            (
                State {
                    in_flight: Some(Source::Image),
                    ..state
                }
                .with_status("Predicting image…"),
                vec![Effect::Infer {
                    source: Source::Image,
                    pixels,
                }],
            )
        }

        InputCommand::StartCamera => match state.camera {
            CameraState::Stopped => (
                State {
                    camera: CameraState::Starting,
                    ..state
                }
                .with_status("Starting camera…"),
                vec![Effect::StartCamera],
            ),
            _ => (state, vec![]),
        },

        InputCommand::StopCamera => {
            let (state, mut effects) = stop_auto(state);
            if state.camera != CameraState::Stopped {
                effects.push(Effect::StopCamera);
            }
            (
                State {
                    camera: CameraState::Stopped,
                    ..state
                }
                .with_status("Camera stopped"),
                effects,
            )
        }

        InputCommand::PredictFrame => {
            if !state.model_ready() {
                return (state.with_status("Model not loaded"), vec![]);
            }
            if state.camera != CameraState::Streaming {
                return (state.with_status("Camera is not streaming"), vec![]);
            }
            if state.in_flight.is_some() {
                return (state.with_status("Prediction already running"), vec![]);
            }
            (
                State {
                    in_flight: Some(Source::Camera),
                    ..state
                },
                vec![Effect::CaptureFrame],
            )
        }

        InputCommand::SetAuto(true) => (
            State {
                auto: AutoMode::On,
                ..state
            }
            .with_status("Auto prediction on"),
            vec![Effect::StartAutoTimer],
        ),
        InputCommand::SetAuto(false) => {
            let was_on = state.auto == AutoMode::On;
            let (state, effects) = stop_auto(state);
            if was_on {
                (state.with_status("Auto prediction off"), effects)
            } else {
                (state, effects)
            }
        }

        InputCommand::Quit => {
            let (state, mut effects) = stop_auto(state);
            if state.camera != CameraState::Stopped {
                effects.push(Effect::StopCamera);
            }
            (
                State {
                    camera: CameraState::Stopped,
                    running: false,
                    ..state
                }
                .with_status("Shutting down"),
                effects,
            )
        }
    }
}

fn stop_auto(state: State) -> (State, Vec<Effect>) {
    match state.auto {
        AutoMode::On => (
            State {
                auto: AutoMode::Off,
                ..state
            },
            vec![Effect::StopAutoTimer],
        ),
        AutoMode::Off => (state, vec![]),
    }
}
