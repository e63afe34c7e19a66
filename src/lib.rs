// SPDX-License-Identifier: GPL-3.0-only

//! Viewfinder - webcam session controller
//!
//! This library provides the core functionality for the viewfinder
//! application: camera session lifecycle, screenshot capture and clip
//! recording, driven by an injected camera provider.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`controller`]: The application controller and its state machine
//! - [`providers`]: Camera capability providers (V4L2, synthetic)
//! - [`capture`]: Screenshot encoding, clip recording, the gallery
//! - [`config`]: User configuration handling
//! - [`storage`]: Artifact file storage
//!
//! # Example
//!
//! ```no_run
//! use viewfinder::capture::MotionJpegRecorder;
//! use viewfinder::config::Config;
//! use viewfinder::controller::CameraApp;
//! use viewfinder::providers::platform_provider;
//! use viewfinder::storage::OutputPaths;
//!
//! let mut app = CameraApp::new(
//!     platform_provider(),
//!     Box::new(MotionJpegRecorder::new()),
//!     Config::load(),
//!     OutputPaths::system_default(),
//! );
//! app.refresh_devices()?;
//! app.start()?;
//! # Ok::<(), viewfinder::errors::AppError>(())
//! ```

pub mod capture;
pub mod config;
pub mod constants;
pub mod controller;
pub mod errors;
pub mod providers;
pub mod storage;

// Re-export commonly used types
pub use config::Config;
pub use controller::{CameraApp, RunState};
pub use errors::{AppError, AppResult};
pub use providers::CameraProvider;
