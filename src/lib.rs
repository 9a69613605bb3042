//! # Connect Four
//!
//! A two-player Connect Four game. The board engine validates and applies
//! column drops and detects runs of four; a terminal UI built with Ratatui
//! drives it from mouse and keyboard input.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, player, session
//! - [`ui`] — Terminal UI, pointer-to-column mapping, text mode
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod ui;
