//! # OCR Module
//!
//! Photo text extraction through Tesseract (via `leptess`), configured for
//! Russian plus English. Runs on blocking threads; callers get a
//! [`MediaError`] for every failure mode instead of a raw engine error.

use leptess::LepTess;
use log::info;
use std::fs::File;
use std::io::{BufReader, Read};

use crate::media::MediaError;

/// Tesseract language codes used for extraction.
pub const OCR_LANGUAGES: &str = "rus+eng";

/// Bytes sniffed from the file head for format detection.
const FORMAT_DETECTION_BUFFER_SIZE: usize = 32;

/// Minimum bytes needed before format detection is attempted.
const MIN_FORMAT_BYTES: usize = 8;

/// Extract text from an image file.
///
/// The raw engine output is cleaned up line by line: surrounding whitespace
/// is stripped and empty lines dropped. An image with no recognizable text
/// yields `Ok` with an empty string, which the caller reports as its own
/// user-facing message rather than an error.
pub fn extract_text_from_image(image_path: &str) -> Result<String, MediaError> {
    info!("Starting OCR text extraction from image: {image_path}");

    let mut tess = LepTess::new(None, OCR_LANGUAGES)
        .map_err(|e| MediaError::Initialization(format!("Tesseract init failed: {e}")))?;

    tess.set_image(image_path)
        .map_err(|e| MediaError::Extraction(format!("failed to load image: {e}")))?;

    let extracted_text = tess
        .get_utf8_text()
        .map_err(|e| MediaError::Extraction(format!("failed to extract text: {e}")))?;

    let cleaned_text = extracted_text
        .trim()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<&str>>()
        .join("\n");

    info!(
        "OCR extraction completed. Extracted {} characters of text",
        cleaned_text.chars().count()
    );

    Ok(cleaned_text)
}

/// Check whether a file looks like an image format Tesseract accepts.
///
/// Sniffs the first bytes and asks `image::guess_format`; PNG, JPEG, BMP
/// and TIFF pass. Anything unreadable or unrecognized fails closed.
pub fn is_supported_image_format(file_path: &str) -> bool {
    let file = match File::open(file_path) {
        Ok(file) => file,
        Err(e) => {
            info!("Could not open image file for format detection: {file_path} - {e}");
            return false;
        }
    };

    let mut reader = BufReader::new(file);
    let mut buffer = vec![0; FORMAT_DETECTION_BUFFER_SIZE];
    let bytes_read = match reader.read(&mut buffer) {
        Ok(bytes_read) => bytes_read,
        Err(e) => {
            info!("Error reading image file for format detection: {file_path} - {e}");
            return false;
        }
    };
    if bytes_read < MIN_FORMAT_BYTES {
        info!("File {file_path} too short for format detection ({bytes_read} bytes)");
        return false;
    }
    buffer.truncate(bytes_read);

    match image::guess_format(&buffer) {
        Ok(format) => {
            let supported = matches!(
                format,
                image::ImageFormat::Png
                    | image::ImageFormat::Jpeg
                    | image::ImageFormat::Bmp
                    | image::ImageFormat::Tiff
            );
            info!(
                "Detected image format {format:?} for file {file_path} (supported: {supported})"
            );
            supported
        }
        Err(e) => {
            info!("Could not determine image format for file: {file_path} - {e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_png_magic_is_supported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let png_header: [u8; 12] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 13];
        file.write_all(&png_header).unwrap();
        assert!(is_supported_image_format(
            &file.path().to_string_lossy()
        ));
    }

    #[test]
    fn test_plain_text_is_not_supported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"this is certainly not an image").unwrap();
        assert!(!is_supported_image_format(
            &file.path().to_string_lossy()
        ));
    }

    #[test]
    fn test_short_file_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0x89, b'P']).unwrap();
        assert!(!is_supported_image_format(
            &file.path().to_string_lossy()
        ));
    }

    #[test]
    fn test_missing_file_is_rejected() {
        assert!(!is_supported_image_format("/nonexistent/image.png"));
    }
}
