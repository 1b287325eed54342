#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
//! Scripted flythrough without a window.
//!
//! Runs the camera to the middle of the tunnel, clicks the marker in view,
//! waits for the camera to stop, then dismisses the popup.
//!
//! Run with `RUST_LOG=debug` to see the motion controller's transitions.

use flythrough::*;

const FRAME: f32 = 1.0 / 60.0;

/// Path parameter to stop short of the third marker.
const CLICK_PARAM: f32 = 0.46;

fn main() -> Result<()> {
    init_logging();

    let mut scene = Scene::new(Options::default(), RecordingOverlayHost::new())?;
    println!("markers: {}", scene.marker_metadata_json()?);

    let motion = &scene.options().motion;
    let frames = (CLICK_PARAM * motion.loop_period / motion.nominal_speed / FRAME).round() as usize;
    for _ in 0..frames {
        scene.advance(FRAME);
    }
    println!(
        "after {} frames: u = {:.3}",
        scene.frame_count(),
        scene.controller().current_param()
    );

    // Aim at the first marker in front of the camera
    let target = scene
        .markers()
        .iter()
        .filter_map(|m| scene.camera().project_to_ndc(m.position))
        .find(|ndc| ndc.abs().max_element() <= 1.0);
    let Some(ndc) = target else {
        println!("no marker in view");
        return Ok(());
    };
    let screen = scene.viewport().ndc_to_screen(ndc);
    scene.on_pointer_move(screen.x, screen.y);

    match scene.on_pointer_click() {
        Some(id) => println!("clicked marker {id}"),
        None => println!("click missed"),
    }

    let mut frames = 0;
    while !scene.controller().is_stopped() && frames < 600 {
        scene.advance(FRAME);
        frames += 1;
    }
    println!("camera stopped after {frames} frames");
    for text in scene.overlay_host().live_texts() {
        println!("popup: {}", text.replace('\n', " "));
    }

    scene.on_popup_click();
    scene.advance(FRAME);
    println!(
        "resumed: {:?} at speed {}",
        scene.controller().phase(),
        scene.controller().speed()
    );

    Ok(())
}
