// One error type for the effect core and the camera viewer.
// Every variant states *where* things went wrong.
use std::collections::TryReserveError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Allocation error: {0}")]
    Allocation(#[from] TryReserveError), // Ring or delay map storage could not be reserved
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),             // Host handed us a buffer of the wrong size
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] image::ImageError), // Writing the PNG snapshot failed
    #[error("Log init error: {0}")]
    LogInit(String),                     // Setting up console logging failed
    #[error("Window init error: {0}")]
    WindowInit(String),                  // Creating the window failed
    #[error("Window update error: {0}")]
    WindowUpdate(String),                // Updating the window buffer failed
    #[error("Camera init error: {0}")]
    CameraInit(String),                  // Opening/starting the camera failed
    #[error("Camera frame error: {0}")]
    CameraFrame(String),                 // Grabbing/decoding a frame failed
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }
}
