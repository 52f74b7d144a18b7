// What you SEE:
// • The live camera, but every block of it lags behind by its own number of
//   frames, so anything that moves leaves an echo shaped like the pattern.
// • W / Q: next / previous pattern (random, vertical, horizontal, radial).
// • S / A: bigger / smaller blocks.  R: rebuild the pattern.
// • P saves a PNG of the effect.  ESC quits.

mod camera;
mod config;
mod draw;
mod logging;

use std::time::{Duration, Instant};

use camera::CameraCapture;
use clap::Parser;
use config::Args;
use delaygrab::{DelayGrab, FrameBuffer, RING_DEPTH, Result, snapshot};
use draw::{Drawer, draw_progress_bar, draw_text_5x7};
use log::{error, info};

/// Fresh effect sized for the camera, with the command-line pattern applied.
fn build_effect(args: &Args, width: usize, height: usize) -> Result<DelayGrab> {
    let mut fx = match args.seed {
        Some(seed) => DelayGrab::with_seed(width, height, seed)?,
        None => DelayGrab::new(width, height)?,
    };
    fx.set_block_size(args.block_size)?;
    fx.set_mode(args.mode)?;
    Ok(fx)
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("delaygrab: {e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    logging::init_log(args.log_level)?;

    /* --- Camera + window setup --- */
    let mut cam = CameraCapture::new(args.camera, args.width, args.height)?;
    let (w, h) = cam.resolution();
    let (w, h) = (w as usize, h as usize);
    let mut drawer = Drawer::new("Delaygrab - time echo", w, h)?;

    /* --- Effect + buffers (reused every frame) --- */
    let mut fx = build_effect(&args, w, h)?;
    let mut live = FrameBuffer::new(w, h)?;
    let mut screen = FrameBuffer::new(w, h)?; // effect output; edge remainder stays black
    let mut view = FrameBuffer::new(w, h)?;   // effect output + HUD, what the window shows

    /* --- HUD / FPS --- */
    let started = Instant::now();
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;
    let mut frame_no: u64 = 0;
    let mut hud_fps_text = String::from("FPS: 0.0");

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        let now = Instant::now();

        /* 1) Grab a fresh live frame. */
        cam.next_frame_into(&mut live)?;

        // New camera resolution: start over with an effect (and history) of that size.
        if (live.width, live.height) != (fx.geometry().width, fx.geometry().height) {
            info!("frame size changed to {}x{}, rebuilding effect", live.width, live.height);
            fx = build_effect(&args, live.width, live.height)?;
            screen = FrameBuffer::new(live.width, live.height)?;
            view = FrameBuffer::new(live.width, live.height)?;
        }

        /* 2) Controls */
        for cmd in drawer.commands() {
            if !fx.apply(cmd)? {
                info!("{cmd:?}: already at the limit");
            }
        }

        /* 3) The effect: live frame in, echoed frame out. */
        fx.update(started.elapsed().as_secs_f64(), &live.pixels, &mut screen.pixels)?;

        /* 4) Snapshot before the HUD goes on top. */
        if drawer.snapshot_pressed_once() {
            let path = snapshot::snapshot_path(&args.snapshot_dir, frame_no);
            if let Err(e) = snapshot::save_png(&screen, &path) {
                error!("{e}");
            }
        }

        /* 5) HUD: warm-up bar while history fills, then mode/block/FPS text. */
        view.pixels.copy_from_slice(&screen.pixels);
        let filled = fx.ring().filled();
        if filled < RING_DEPTH {
            draw_progress_bar(&mut view, 0, 3, filled as f32 / RING_DEPTH as f32, 0x00_33_CC_FF);
        }
        let hud = format!(
            "{} | BLOCK {} | HISTORY {}/{} | {}",
            fx.mode().name(),
            fx.block_size(),
            filled,
            RING_DEPTH,
            hud_fps_text
        );
        draw_text_5x7(&mut view, 8, 8, &hud, 0x00_FF_FF_FF);
        draw_text_5x7(&mut view, 8, 18, "W/Q MODE  S/A BLOCK  R RESEED  P SNAP", 0x00_AA_AA_AA);

        /* 6) Present to the window. */
        drawer.present(&view)?;
        frame_no += 1;

        /* 7) FPS counter (log + HUD once per second) */
        frames_this_second += 1;
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            let fps = frames_this_second as f32 / secs;
            info!("FPS: {:.1}", fps);
            hud_fps_text = format!("FPS: {:.1}", fps);
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    Ok(())
}
