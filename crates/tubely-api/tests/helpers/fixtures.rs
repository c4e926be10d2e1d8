//! Test fixtures: PNG/MP4-looking blobs and multipart forms.

use axum_test::multipart::{MultipartForm, Part};

const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// `size` bytes starting with the PNG signature, patterned so corruption is detectable.
pub fn png_bytes(size: usize) -> Vec<u8> {
    let mut data: Vec<u8> = (0..size).map(|i| (i % 251) as u8).collect();
    let head = size.min(PNG_SIGNATURE.len());
    data[..head].copy_from_slice(&PNG_SIGNATURE[..head]);
    data
}

/// `size` bytes starting with an MP4 `ftyp` box header.
pub fn mp4_bytes(size: usize) -> Vec<u8> {
    let header = b"\x00\x00\x00\x18ftypmp42";
    let mut data: Vec<u8> = (0..size).map(|i| (i % 241) as u8).collect();
    let head = size.min(header.len());
    data[..head].copy_from_slice(&header[..head]);
    data
}

/// A form with a single file part.
pub fn file_form(field: &str, file_name: &str, mime_type: &str, data: Vec<u8>) -> MultipartForm {
    let part = Part::bytes(data).file_name(file_name).mime_type(mime_type);
    MultipartForm::new().add_part(field, part)
}
