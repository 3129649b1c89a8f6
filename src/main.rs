use config::{Config, DisplayKind};
use device_camera::impl_fake::DeviceCameraFake;
use device_display::{
    impl_console::DeviceDisplayConsole, impl_gui::DeviceDisplayGui, impl_json::DeviceDisplayJson,
    interface::DeviceDisplay,
};
use device_input::impl_stdin::DeviceInputStdin;
use inference::impl_fake::InferenceFake;
use library::logger::{impl_console::LoggerConsole, interface::Logger};
use session::main::Session;
use std::sync::{Arc, Mutex};

mod config;
mod device_camera;
mod device_display;
mod device_input;
mod inference;
mod library;
mod prediction;
mod session;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    let logger: Arc<dyn Logger + Send + Sync> =
        Arc::new(LoggerConsole::new(config.logger_timezone));

    let device_camera = Arc::new(DeviceCameraFake::new(
        logger.clone(),
        config.frame_width,
        config.frame_height,
    ));

    let device_input = Arc::new(DeviceInputStdin::new(logger.clone()));

    let inference = Arc::new(InferenceFake::new(
        logger.clone(),
        config.model_path.clone(),
        config.input_size,
        config.pixel_range,
        config.labels.len(),
        config.output_kind,
    ));

    let new_session = |device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>| {
        Session::new(
            config.clone(),
            logger.clone(),
            device_camera.clone(),
            device_input.clone(),
            device_display,
            inference.clone(),
        )
    };

    match config.display {
        DisplayKind::Gui => {
            let device_display = DeviceDisplayGui::new();
            let window = device_display.window();
            let session = new_session(Arc::new(Mutex::new(device_display)));

            let session_window = window.clone();
            std::thread::spawn(move || {
                if let Err(e) = session.run() {
                    let _ = session.logger.error(&format!("Session failed: {}", e));
                }
                session_window.close();
            });

            // the native window must own the main thread
            window.run().map_err(|e| e.to_string())?;
        }
        DisplayKind::Json => {
            new_session(Arc::new(Mutex::new(DeviceDisplayJson::stdout())))
                .run()
                .map_err(|e| e.to_string())?;
        }
        DisplayKind::Console => {
            new_session(Arc::new(Mutex::new(DeviceDisplayConsole::new())))
                .run()
                .map_err(|e| e.to_string())?;
        }
    }

    Ok(())
}
