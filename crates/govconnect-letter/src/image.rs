//! Attachment image decoding into PDF image XObjects.
//!
//! PNG files are decoded with the `png` crate and re-encoded as
//! zlib-compressed raw samples (`FlateDecode`); JPEG files are embedded
//! as-is (`DCTDecode`), the PDF viewer owns the decode.

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::{Dictionary, Object, Stream};

use crate::error::LetterError;

/// A decoded image ready to be added to a document as an XObject.
pub struct EmbeddedImage {
    pub width: u32,
    pub height: u32,
    pub stream: Stream,
}

/// Decode PNG or JPEG bytes; anything else is rejected.
pub fn decode(bytes: &[u8]) -> Result<EmbeddedImage, LetterError> {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
        decode_png(bytes)
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        embed_jpeg(bytes)
    } else {
        Err(LetterError::Image("not a PNG or JPEG file".into()))
    }
}

fn image_dictionary(width: u32, height: u32, color_space: &[u8], filter: &[u8]) -> Dictionary {
    Dictionary::from_iter(vec![
        ("Type", Object::Name(b"XObject".to_vec())),
        ("Subtype", Object::Name(b"Image".to_vec())),
        ("Width", Object::Integer(width as i64)),
        ("Height", Object::Integer(height as i64)),
        ("ColorSpace", Object::Name(color_space.to_vec())),
        ("BitsPerComponent", Object::Integer(8)),
        ("Filter", Object::Name(filter.to_vec())),
    ])
}

fn decode_png(bytes: &[u8]) -> Result<EmbeddedImage, LetterError> {
    let decoder = png::Decoder::new(bytes);
    let mut reader = decoder
        .read_info()
        .map_err(|e| LetterError::Image(format!("PNG header: {e}")))?;

    let mut buf = vec![0u8; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| LetterError::Image(format!("PNG data: {e}")))?;
    buf.truncate(info.buffer_size());

    if info.bit_depth != png::BitDepth::Eight {
        return Err(LetterError::Image(format!(
            "unsupported PNG bit depth {:?}",
            info.bit_depth
        )));
    }

    // Strip any alpha channel; PDF image XObjects carry opaque samples.
    let (samples, color_space): (Vec<u8>, &[u8]) = match info.color_type {
        png::ColorType::Rgb => (buf, b"DeviceRGB"),
        png::ColorType::Grayscale => (buf, b"DeviceGray"),
        png::ColorType::Rgba => (
            buf.chunks_exact(4).flat_map(|px| px[..3].to_vec()).collect(),
            b"DeviceRGB",
        ),
        png::ColorType::GrayscaleAlpha => (
            buf.chunks_exact(2).map(|px| px[0]).collect(),
            b"DeviceGray",
        ),
        other => {
            return Err(LetterError::Image(format!(
                "unsupported PNG color type {other:?}"
            )))
        }
    };

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(&samples)
        .and_then(|_| encoder.finish())
        .map(|compressed| EmbeddedImage {
            width: info.width,
            height: info.height,
            stream: Stream::new(
                image_dictionary(info.width, info.height, color_space, b"FlateDecode"),
                compressed,
            ),
        })
        .map_err(|e| LetterError::Image(format!("compressing PNG samples: {e}")))
}

fn embed_jpeg(bytes: &[u8]) -> Result<EmbeddedImage, LetterError> {
    let (width, height, components) = jpeg_dimensions(bytes)
        .ok_or_else(|| LetterError::Image("could not read JPEG dimensions".into()))?;

    let color_space: &[u8] = match components {
        1 => b"DeviceGray",
        3 => b"DeviceRGB",
        other => {
            return Err(LetterError::Image(format!(
                "unsupported JPEG component count {other}"
            )))
        }
    };

    let mut stream = Stream::new(
        image_dictionary(width, height, color_space, b"DCTDecode"),
        bytes.to_vec(),
    );
    // Already DCT-compressed; must not be deflated again.
    stream.allows_compression = false;

    Ok(EmbeddedImage { width, height, stream })
}

/// Walk the JPEG marker segments to the first start-of-frame and read
/// `(width, height, components)` from it.
fn jpeg_dimensions(bytes: &[u8]) -> Option<(u32, u32, u8)> {
    let mut i = 2;
    while i + 4 <= bytes.len() {
        if bytes[i] != 0xFF {
            return None;
        }
        let marker = bytes[i + 1];

        // Standalone markers carry no length field.
        if marker == 0x01 || (0xD0..=0xD9).contains(&marker) {
            i += 2;
            continue;
        }

        let len = u16::from_be_bytes([bytes[i + 2], bytes[i + 3]]) as usize;
        if len < 2 {
            return None;
        }

        let is_sof = matches!(
            marker,
            0xC0 | 0xC1 | 0xC2 | 0xC3 | 0xC5..=0xC7 | 0xC9..=0xCB | 0xCD..=0xCF
        );
        if is_sof {
            if i + 10 > bytes.len() {
                return None;
            }
            let height = u16::from_be_bytes([bytes[i + 5], bytes[i + 6]]) as u32;
            let width = u16::from_be_bytes([bytes[i + 7], bytes[i + 8]]) as u32;
            let components = bytes[i + 9];
            return Some((width, height, components));
        }

        i += 2 + len;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_png(color: png::ColorType) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, 2, 2);
            encoder.set_color(color);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            let samples_per_px = match color {
                png::ColorType::Rgb => 3,
                png::ColorType::Rgba => 4,
                png::ColorType::Grayscale => 1,
                _ => unreachable!(),
            };
            writer.write_image_data(&vec![128u8; 4 * samples_per_px]).unwrap();
        }
        out
    }

    #[test]
    fn decodes_rgb_png() {
        let img = decode(&tiny_png(png::ColorType::Rgb)).unwrap();
        assert_eq!((img.width, img.height), (2, 2));
        assert_eq!(
            img.stream.dict.get(b"ColorSpace").unwrap(),
            &Object::Name(b"DeviceRGB".to_vec())
        );
    }

    #[test]
    fn rgba_png_drops_alpha() {
        let img = decode(&tiny_png(png::ColorType::Rgba)).unwrap();
        assert_eq!(
            img.stream.dict.get(b"ColorSpace").unwrap(),
            &Object::Name(b"DeviceRGB".to_vec())
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(decode(b"not an image at all").is_err());
    }

    #[test]
    fn reads_jpeg_sof_dimensions() {
        // SOI, APP0 (minimal), SOF0 with 100x50 RGB, EOI.
        let mut jpeg = vec![0xFF, 0xD8];
        jpeg.extend_from_slice(&[0xFF, 0xE0, 0x00, 0x02]);
        jpeg.extend_from_slice(&[
            0xFF, 0xC0, 0x00, 0x0B, 0x08, 0x00, 0x32, 0x00, 0x64, 0x03, 0x01, 0x02, 0x03,
        ]);
        jpeg.extend_from_slice(&[0xFF, 0xD9]);

        let (w, h, c) = jpeg_dimensions(&jpeg).unwrap();
        assert_eq!((w, h, c), (100, 50, 3));
    }

    #[test]
    fn jpeg_without_sof_is_rejected() {
        let jpeg = vec![0xFF, 0xD8, 0xFF, 0xD9];
        assert!(decode(&jpeg).is_err());
    }
}
