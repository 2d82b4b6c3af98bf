use honyaku_core::{Frame, OcrError};
use image::{ImageEncoder, RgbaImage};

pub fn frame_image(frame: &Frame) -> Result<RgbaImage, OcrError> {
    RgbaImage::from_raw(frame.width, frame.height, frame.rgba.clone()).ok_or_else(|| {
        OcrError::Recognition(format!(
            "frame of {} bytes does not match {}x{}",
            frame.rgba.len(),
            frame.width,
            frame.height
        ))
    })
}

pub fn encode_png(frame: &Frame) -> Result<Vec<u8>, OcrError> {
    let image = frame_image(frame)?;
    let mut buffer = Vec::new();
    image::codecs::png::PngEncoder::new(&mut buffer)
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| OcrError::Recognition(format!("cannot encode PNG: {e}")))?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(width: u32, height: u32, bytes: usize) -> Frame {
        Frame {
            width,
            height,
            rgba: vec![255; bytes],
        }
    }

    #[test]
    fn test_encode_png() {
        let png = encode_png(&frame(4, 2, 4 * 2 * 4)).unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }

    #[test]
    fn test_size_mismatch_is_rejected() {
        assert!(frame_image(&frame(4, 2, 7)).is_err());
        assert!(encode_png(&frame(10, 10, 0)).is_err());
    }
}
