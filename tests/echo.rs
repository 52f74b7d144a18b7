// End-to-end runs of the effect through the public API.

use delaygrab::{Command, DelayGrab, Error, MAX_DELAY, Mode, RING_DEPTH};

fn solid(w: usize, h: usize, px: u32) -> Vec<u32> {
    vec![px; w * h]
}

#[test]
fn four_by_four_vertical_stripes_pass_the_frame_through() {
    let (w, h) = (4, 4);
    let mut fx = DelayGrab::with_seed(w, h, 0).unwrap();
    fx.set_mode(Mode::VerticalStripes).unwrap();

    let b = *fx.blocks();
    assert_eq!((b.map_width, b.map_height, b.cell_count), (2, 2, 4));
    assert_eq!(fx.delay_map().cells(), &[0, 0, 0, 0]);

    let input: Vec<u32> = (0..16).collect();
    let mut output = vec![0; 16];
    fx.update(0.0, &input, &mut output).unwrap();
    assert_eq!(output, input);
}

#[test]
fn block_size_two_to_four_gives_a_single_cell() {
    let mut fx = DelayGrab::with_seed(4, 4, 0).unwrap();
    fx.set_block_size(4).unwrap();
    assert_eq!(fx.delay_map().len(), 1);

    let input: Vec<u32> = (100..116).collect();
    let mut output = vec![0; 16];
    fx.update(1.0 / 30.0, &input, &mut output).unwrap();
    // Horizontal mode, 1x1 map: center cell, zero delay.
    assert_eq!(output, input);
}

#[test]
fn radial_echo_lags_outer_blocks() {
    // 64x64, block 8: 8x8 map, center (4,4). Corner (0,0) delay isqrt(32)/2 = 2.
    let (w, h) = (64, 64);
    let mut fx = DelayGrab::with_seed(w, h, 0).unwrap();
    fx.set_block_size(8).unwrap();
    fx.set_mode(Mode::RadialRings).unwrap();
    assert_eq!(fx.delay_map().get(0, 0), 2);
    assert_eq!(fx.delay_map().get(4, 4), 0);

    let mut output = solid(w, h, 0);
    for frame in 1..=10u32 {
        fx.update(frame as f64, &solid(w, h, frame), &mut output).unwrap();
    }
    assert_eq!(output[0], 8); // top-left block: two frames behind
    assert_eq!(output[4 * 8 * w + 4 * 8], 10); // center block: live
}

#[test]
fn every_mode_keeps_delays_in_range_on_a_real_size_frame() {
    let mut fx = DelayGrab::with_seed(320, 240, 9).unwrap();
    fx.set_block_size(1).unwrap();
    for mode in Mode::ALL {
        fx.set_mode(mode).unwrap();
        assert!(fx.delay_map().cells().iter().all(|&d| d <= MAX_DELAY));
    }
}

#[test]
fn long_run_wraps_the_history() {
    let (w, h) = (2, 2);
    let mut fx = DelayGrab::with_seed(w, h, 0).unwrap();
    fx.set_block_size(1).unwrap();
    fx.set_mode(Mode::HorizontalStripes).unwrap();
    // 2x2 map, center row 1: every delay is |y-1|/2 = 0.
    let mut output = solid(w, h, 0);
    for frame in 0..(RING_DEPTH as u32 * 3) {
        fx.update(0.0, &solid(w, h, frame), &mut output).unwrap();
        assert_eq!(output, solid(w, h, frame));
    }
    assert_eq!(fx.ring().filled(), RING_DEPTH);
}

#[test]
fn controls_drive_the_same_protocol_as_setters() {
    let mut a = DelayGrab::with_seed(40, 40, 11).unwrap();
    let mut b = DelayGrab::with_seed(40, 40, 11).unwrap();

    a.apply(Command::NextMode).unwrap();
    a.apply(Command::GrowBlock).unwrap();
    b.set_mode(Mode::RadialRings).unwrap();
    b.set_block_size(3).unwrap();

    assert_eq!(a.mode(), b.mode());
    assert_eq!(a.blocks(), b.blocks());
    assert_eq!(a.delay_map(), b.delay_map());
}

#[test]
fn mismatched_buffers_are_invalid_arguments() {
    let mut fx = DelayGrab::with_seed(8, 8, 0).unwrap();
    let mut output = solid(8, 8, 0);
    let err = fx.update(0.0, &solid(8, 7, 1), &mut output).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[test]
fn frame_too_large_to_address_is_an_invalid_argument() {
    let err = DelayGrab::new(usize::MAX / 2, 4).err().unwrap();
    assert!(matches!(err, Error::InvalidArgument(_)));
}
