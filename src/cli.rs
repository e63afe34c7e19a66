// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands for camera operations
//!
//! This module provides command-line functionality for:
//! - Listing available cameras
//! - Taking a single screenshot
//! - Recording a clip for a fixed duration
//! - The interactive console (default mode)

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use viewfinder::capture::{ClipRecorder, MotionJpegRecorder, screenshot};
use viewfinder::config::Config;
use viewfinder::constants::RESOLUTION_PRESETS;
use viewfinder::constants::capture::{RECORDING_PREFIX, SCREENSHOT_PREFIX};
use viewfinder::constants::timing::{
    CAPTURE_WARMUP, FIRST_FRAME_TIMEOUT, FPS_TICK_INTERVAL, FRAME_POLL_INTERVAL,
};
use viewfinder::controller::{CameraApp, RecordToggle};
use viewfinder::providers::{
    CameraDevice, CameraFrame, CameraProvider, StreamConstraints, platform_provider, synthetic,
};
use viewfinder::storage::{self, OutputPaths};

/// Provider selected by the global `--synthetic` flag
fn make_provider(synthetic_flag: bool) -> Box<dyn CameraProvider> {
    if synthetic_flag {
        Box::new(synthetic::SyntheticProvider::new())
    } else {
        platform_provider()
    }
}

/// List all available cameras
pub fn list_devices(synthetic_flag: bool) -> Result<(), Box<dyn std::error::Error>> {
    let provider = make_provider(synthetic_flag);
    let devices = provider.enumerate()?;

    if devices.is_empty() {
        println!("No cameras found.");
        return Ok(());
    }

    println!("Available cameras ({}):", provider.name());
    println!();
    for (index, device) in devices.iter().enumerate() {
        println!("  [{}] {} ({})", index, device.name, device.id);
    }
    println!();

    Ok(())
}

/// Take a single screenshot with the specified camera
pub fn take_photo(
    synthetic_flag: bool,
    camera_index: usize,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let provider = make_provider(synthetic_flag);
    let devices = provider.enumerate().unwrap_or_default();
    if devices.is_empty() {
        return Err("No cameras found".into());
    }
    if camera_index >= devices.len() {
        return Err(format!(
            "Camera index {} out of range (0-{})",
            camera_index,
            devices.len() - 1
        )
        .into());
    }

    let device = &devices[camera_index];
    println!("Using camera: {}", device.name);

    let constraints = StreamConstraints {
        device_id: Some(device.id.clone()),
        ..Default::default()
    };
    let stream = provider.open(&constraints)?;
    println!("Capture format: {}", stream.format());

    // Determine output directory
    let output_dir = if let Some(path) = output.as_ref() {
        if path.is_dir() {
            path.clone()
        } else {
            path.parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| OutputPaths::system_default().screenshots)
        }
    } else {
        OutputPaths::system_default().screenshots
    };

    // Let the sensor settle, then take the next good frame
    println!("Capturing...");
    let track = stream.primary_track().clone();
    let mut receiver = track.tap_frames();
    let start = Instant::now();
    let mut frame: Option<Arc<CameraFrame>> = None;

    while start.elapsed() < FIRST_FRAME_TIMEOUT {
        match receiver.try_next() {
            Ok(Some(f)) => {
                frame = Some(f);
                if start.elapsed() > CAPTURE_WARMUP {
                    break;
                }
            }
            _ => {
                // No frame available yet, wait a bit
                std::thread::sleep(FRAME_POLL_INTERVAL);
            }
        }
    }
    track.detach_tap();

    let frame = frame.ok_or("Failed to capture frame from camera")?;
    let shot = screenshot::encode_png(&frame)?;
    let filename = storage::timestamped_filename(SCREENSHOT_PREFIX, "png");
    let path = storage::write_artifact(&output_dir, &filename, &shot.data)?;
    stream.close();

    // If user specified a specific filename, rename the file
    if let Some(user_path) = output
        && !user_path.is_dir()
    {
        std::fs::rename(&path, &user_path)?;
        println!("Screenshot saved: {}", user_path.display());
        return Ok(());
    }

    println!("Screenshot saved: {}", path.display());
    Ok(())
}

/// Record a clip with the specified camera
pub fn record_clip(
    synthetic_flag: bool,
    camera_index: usize,
    duration: u64,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let provider = make_provider(synthetic_flag);
    let devices = provider.enumerate().unwrap_or_default();
    if devices.is_empty() {
        return Err("No cameras found".into());
    }
    if camera_index >= devices.len() {
        return Err(format!(
            "Camera index {} out of range (0-{})",
            camera_index,
            devices.len() - 1
        )
        .into());
    }

    let device = &devices[camera_index];
    println!("Using camera: {}", device.name);

    let constraints = StreamConstraints {
        device_id: Some(device.id.clone()),
        ..Default::default()
    };
    let stream = provider.open(&constraints)?;
    println!("Recording format: {}", stream.format());

    if let Some(path) = output.as_ref()
        && let Some(parent) = path.parent()
    {
        std::fs::create_dir_all(parent)?;
    }

    let mut recorder = MotionJpegRecorder::new();

    println!();
    println!("Recording... (press Ctrl+C to stop early)");
    recorder.start(stream.primary_track())?;

    // Set up Ctrl+C handler
    let stop_flag = Arc::new(AtomicBool::new(false));
    let stop_flag_clone = stop_flag.clone();
    ctrlc::set_handler(move || {
        stop_flag_clone.store(true, Ordering::SeqCst);
    })?;

    // Wait for duration or Ctrl+C
    let start = Instant::now();
    let target_duration = Duration::from_secs(duration);

    while start.elapsed() < target_duration {
        if stop_flag.load(Ordering::SeqCst) {
            println!();
            println!("Stopping early...");
            break;
        }

        // Print progress
        let elapsed = start.elapsed().as_secs();
        print!("\rRecording: {:02}:{:02}", elapsed / 60, elapsed % 60);
        std::io::Write::flush(&mut std::io::stdout())?;

        std::thread::sleep(Duration::from_millis(100));
    }
    println!();

    let clip = recorder.stop()?;
    stream.close();

    let path = match output {
        Some(user_path) => {
            std::fs::write(&user_path, &clip.data)?;
            user_path
        }
        None => {
            let filename = storage::timestamped_filename(RECORDING_PREFIX, clip.extension);
            storage::write_artifact(&OutputPaths::system_default().clips, &filename, &clip.data)?
        }
    };

    println!(
        "Clip saved: {} ({} chunks, {} KiB)",
        path.display(),
        clip.chunk_count,
        clip.data.len() / 1024
    );
    Ok(())
}

// ===== Interactive console =====

#[derive(Debug, PartialEq, Eq)]
enum ConsoleAction {
    Continue,
    Quit,
}

/// Run the interactive console controlling one [`CameraApp`].
///
/// Commands are read line by line from stdin while a fixed-interval timer
/// drives the frame-rate estimator.
pub fn run_console(synthetic_flag: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load();
    let mut app = CameraApp::new(
        make_provider(synthetic_flag),
        Box::new(MotionJpegRecorder::new()),
        config,
        OutputPaths::system_default(),
    );

    if let Err(e) = app.refresh_devices() {
        eprintln!("Warning: {}", e);
    }
    print_devices(app.devices());
    println!("Type 'help' for commands.");
    println!();

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        use tokio::io::AsyncBufReadExt;

        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        let mut lines = stdin.lines();
        let mut ticker = tokio::time::interval(FPS_TICK_INTERVAL);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    app.tick(Instant::now());
                }
                line = lines.next_line() => {
                    match line? {
                        Some(text) => {
                            if handle_command(&mut app, text.trim()) == ConsoleAction::Quit {
                                break;
                            }
                        }
                        None => break,
                    }
                }
            }
        }

        app.shutdown();
        if let Err(e) = app.config().save() {
            eprintln!("Warning: could not save settings: {}", e);
        }
        Ok(())
    })
}

/// Dispatch one console command
fn handle_command(app: &mut CameraApp, input: &str) -> ConsoleAction {
    let mut parts = input.split_whitespace();
    let Some(command) = parts.next() else {
        return ConsoleAction::Continue;
    };
    let argument = parts.next();

    match command {
        "start" => {
            let _ = app.start();
            println!("{}", app.status());
        }
        "pause" => {
            let _ = app.pause();
            println!("{}", app.status());
        }
        "resume" => {
            let _ = app.resume();
            println!("{}", app.status());
        }
        "stop" => {
            let _ = app.stop();
            println!("{}", app.status());
        }
        "shot" | "screenshot" => {
            match app.take_screenshot() {
                Ok(path) => println!("Screenshot saved: {}", path.display()),
                Err(_) => println!("{}", app.status()),
            }
        }
        "rec" | "record" => match app.toggle_recording() {
            Ok(RecordToggle::Started) => println!("{}", app.status()),
            Ok(RecordToggle::Saved(saved)) => println!(
                "Clip saved: {} ({} chunks, {} KiB)",
                saved.path.display(),
                saved.chunks,
                saved.bytes / 1024
            ),
            Err(_) => println!("{}", app.status()),
        },
        "devices" => print_devices(app.devices()),
        "dev" => match argument.and_then(|a| a.parse::<usize>().ok()) {
            Some(index) => {
                let _ = app.select_device(index);
                println!("{}", app.status());
            }
            None => println!("Usage: dev <index>"),
        },
        "res" => match argument.and_then(parse_resolution) {
            Some((width, height)) => {
                let _ = app.set_resolution(width, height);
                println!("{}", app.status());
            }
            None => println!("Usage: res <width>x<height>"),
        },
        "status" => print_status(app),
        "gallery" => print_gallery(app),
        "help" => print_help(),
        "quit" | "exit" | "q" => return ConsoleAction::Quit,
        _ => println!("Unknown command '{}'; type 'help'", command),
    }

    ConsoleAction::Continue
}

/// Parse "1280x720" into (1280, 720)
fn parse_resolution(text: &str) -> Option<(u32, u32)> {
    let (width, height) = text.split_once(['x', 'X'])?;
    Some((width.parse().ok()?, height.parse().ok()?))
}

fn print_devices(devices: &[CameraDevice]) {
    if devices.is_empty() {
        println!("No cameras found.");
        return;
    }
    println!("Available cameras:");
    for (index, device) in devices.iter().enumerate() {
        println!("  [{}] {} ({})", index, device.name, device.id);
    }
}

fn print_status(app: &CameraApp) {
    println!("  State:       {}", app.state());
    println!("  Status:      {}", app.status());
    println!("  FPS:         {}", app.current_fps());
    println!("  Resolution:  {}", app.resolution_label());
    if let Some(format) = app.session_format() {
        println!("  Granted:     {}", format);
    }
    if let Some(id) = app.session_device_id() {
        println!("  Device:      {}", id);
    }
    if let Some(uptime) = app.session_uptime() {
        println!("  Uptime:      {}s", uptime.as_secs());
    }
    println!("  Screenshots: {}", app.gallery().len());
    println!("  Recording:   {}", app.is_recording());
}

fn print_gallery(app: &CameraApp) {
    if app.gallery().is_empty() {
        println!("No screenshots taken yet.");
        return;
    }
    println!("Screenshots:");
    for entry in app.gallery().entries() {
        println!(
            "  {}  {}x{}  {:>6} B  {}",
            entry.taken_at.format("%H:%M:%S"),
            entry.width,
            entry.height,
            entry.bytes,
            entry.path.display()
        );
    }
}

fn print_help() {
    println!("Commands:");
    println!("  start              Open the camera session");
    println!("  pause              Freeze the live stream");
    println!("  resume             Unfreeze the live stream");
    println!("  stop               Close the camera session");
    println!("  shot               Take a screenshot");
    println!("  rec                Start or stop recording");
    println!("  devices            List cameras");
    println!("  dev <index>        Switch camera");
    println!("  res <w>x<h>        Change resolution");
    println!("  status             Show controller state");
    println!("  gallery            List screenshots taken this session");
    println!("  help               Show this help");
    println!("  quit               Exit");
    println!();
    println!("Resolution presets:");
    for preset in &RESOLUTION_PRESETS {
        println!(
            "  {}x{} ({})",
            preset.width, preset.height, preset.label
        );
    }
}
