use crate::device_camera::interface::DeviceCamera;
use crate::library::logger::interface::Logger;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub struct DeviceCameraFake {
    logger: Arc<dyn Logger + Send + Sync>,
    width: u32,
    height: u32,
    available: bool,
    streaming: AtomicBool,
}

impl DeviceCameraFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>, width: u32, height: u32) -> Self {
        Self {
            logger: logger.with_namespace("camera").with_namespace("fake"),
            width,
            height,
            available: true,
            streaming: AtomicBool::new(false),
        }
    }

    /// A camera that refuses to start, like a denied permission prompt.
    #[allow(dead_code)]
    pub fn unavailable(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            available: false,
            ..Self::new(logger, 0, 0)
        }
    }
}

impl DeviceCamera for DeviceCameraFake {
    fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info("Starting camera...")?;
        if !self.available {
            return Err("camera permission denied".into());
        }
        self.streaming.store(true, Ordering::SeqCst);
        self.logger.info("Camera started")?;
        Ok(())
    }

    fn stop(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info("Stopping camera...")?;
        self.streaming.store(false, Ordering::SeqCst);
        self.logger.info("Camera stopped")?;
        Ok(())
    }

    fn capture_frame(&self) -> Result<Vec<u8>, Box<dyn std::error::Error + Send + Sync>> {
        if !self.streaming.load(Ordering::SeqCst) {
            return Err("camera is not streaming".into());
        }
        self.logger.info("Capturing frame...")?;
        let len = self.width as usize * self.height as usize * 3;
        let frame: Vec<u8> = (0..len).map(|_| rand::random::<u8>()).collect();
        Ok(frame)
    }
}
