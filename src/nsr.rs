//! Main module for nsr library functionality

pub mod assembling;
pub mod block;
pub mod classifying;
pub mod config;
pub mod error;
pub mod formats;
pub mod lexing;
pub mod options;
pub mod pipeline;
pub mod styles;
pub mod testing;
