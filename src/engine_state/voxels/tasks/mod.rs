//! # Voxel Task System
//!
//! This module contains tasks related to voxel world generation. They let the
//! chunks of one streaming update be generated and meshed on worker threads.

pub mod chunk_generation_task;
