//! Upload fixtures.
//!
//! The fake encoder copies bytes, so most fixtures only need to be
//! recognizable, not decodable.

#![allow(dead_code)]

use axum_test::multipart::{MultipartForm, Part};

pub fn payload(tag: &str, len: usize) -> Vec<u8> {
    tag.as_bytes().iter().copied().cycle().take(len).collect()
}

pub fn file_part(bytes: Vec<u8>, filename: &str) -> Part {
    Part::bytes(bytes).file_name(filename.to_string())
}

pub fn cut_audio_form(audio: Vec<u8>, filename: &str, start: &str, duration: &str) -> MultipartForm {
    MultipartForm::new()
        .add_part("file", file_part(audio, filename))
        .add_text("start", start.to_string())
        .add_text("duration", duration.to_string())
}

pub fn crop_form(video: Vec<u8>, filename: &str, x: &str, y: &str, w: &str, h: &str) -> MultipartForm {
    MultipartForm::new()
        .add_part("file", file_part(video, filename))
        .add_text("x", x.to_string())
        .add_text("y", y.to_string())
        .add_text("w", w.to_string())
        .add_text("h", h.to_string())
}

pub fn trim_form(video: Vec<u8>, filename: &str, start: &str, end: &str) -> MultipartForm {
    MultipartForm::new()
        .add_part("file", file_part(video, filename))
        .add_text("start", start.to_string())
        .add_text("end", end.to_string())
}

pub fn replace_audio_form(video: Vec<u8>, audio: Vec<u8>) -> MultipartForm {
    MultipartForm::new()
        .add_part("video", file_part(video, "clip.mp4"))
        .add_part("audio", file_part(audio, "track.wav"))
}

pub fn image_to_video_form(image: Vec<u8>, audio: Vec<u8>) -> MultipartForm {
    MultipartForm::new()
        .add_part("image", file_part(image, "cover.png"))
        .add_part("audio", file_part(audio, "track.mp3"))
}
