// Opens a camera and hands out frames as packed 0x00RRGGBB pixels.
// Visual expectation: each `next_frame_into()` leaves the newest camera
// image in the buffer, ready to feed the effect.

use delaygrab::types::pack_rgb;
use delaygrab::{Error, FrameBuffer, Result};
use log::{debug, info};

// Bring in nokhwa types for camera control.
use nokhwa::{
    Camera,
    pixel_format::RgbFormat,
    utils::{
        CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
    },
};

// Decoded frames arrive as an `image` RGB buffer.
use image::{ImageBuffer, Rgb};

// A small wrapper around nokhwa::Camera so the main loop stays clean.
pub struct CameraCapture {
    cam: Camera,
    width: u32,
    height: u32,
}

impl CameraCapture {
    /// Open camera `index` near the requested resolution and start streaming.
    pub fn new(index: u32, width: u32, height: u32) -> Result<Self> {
        let idx = CameraIndex::Index(index);

        let fmt = CameraFormat::new(
            Resolution::new(width, height),
            FrameFormat::YUYV, // uncompressed; cheap to convert to RGB
            30,                // target FPS
        );

        // Closest match to the request; drivers rarely give exactly what we ask.
        let req = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(fmt));

        let mut cam = Camera::new(idx, req)
            .map_err(|e| Error::CameraInit(format!("Create camera {index}: {e}")))?;

        cam.open_stream()
            .map_err(|e| Error::CameraInit(format!("Open stream: {e}")))?;

        // The stream may settle on a different resolution than requested.
        let actual = cam.resolution();
        info!(
            "camera {}: asked {}x{}, streaming {}x{} @ {} fps",
            index,
            width,
            height,
            actual.width(),
            actual.height(),
            cam.frame_rate()
        );

        Ok(Self {
            cam,
            width: actual.width(),
            height: actual.height(),
        })
    }

    /// Block until the next frame arrives and write it into `fb`.
    /// `fb` is resized if the camera changed resolution mid-stream.
    pub fn next_frame_into(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        let frame = self
            .cam
            .frame()
            .map_err(|e| Error::CameraFrame(format!("Fetch frame: {e}")))?;

        let rgb_img: ImageBuffer<Rgb<u8>, Vec<u8>> = frame
            .decode_image::<RgbFormat>()
            .map_err(|e| Error::CameraFrame(format!("Decode RGB: {e}")))?;

        let (w, h) = rgb_img.dimensions();
        if (w as usize, h as usize) != (fb.width, fb.height) {
            debug!("camera: frame size {}x{} -> {}x{}", fb.width, fb.height, w, h);
            *fb = FrameBuffer::new(w as usize, h as usize)?;
            self.width = w;
            self.height = h;
        }

        for (dst, px) in fb.pixels.iter_mut().zip(rgb_img.pixels()) {
            *dst = pack_rgb(px[0], px[1], px[2]);
        }
        Ok(())
    }

    /// The resolution the camera is actually delivering.
    pub fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
