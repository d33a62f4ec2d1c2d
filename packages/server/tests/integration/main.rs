mod common;
mod misc;
