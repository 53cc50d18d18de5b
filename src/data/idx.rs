use std::fs::File;
use std::io::{Read, Seek, SeekFrom};

use crate::data::example::{Example, ExampleSource};
use crate::error::{NetError, Result};

const IMAGE_MAGIC: u32 = 0x0000_0803;
const LABEL_MAGIC: u32 = 0x0000_0801;
const IMAGE_HEADER: u64 = 16;
const LABEL_HEADER: u64 = 8;

/// A pair of IDX files (image + label, as used by MNIST) read one record at
/// a time by seeking.
///
/// # IDX3 image file layout
/// ```text
/// bytes  0-3:   0x00000803  (magic, big-endian)
/// bytes  4-7:   N           (number of images, big-endian u32)
/// bytes  8-11:  rows        (big-endian u32)
/// bytes 12-15:  cols        (big-endian u32)
/// bytes 16..:   N * rows * cols bytes, row-major, uint8
/// ```
///
/// # IDX1 label file layout
/// ```text
/// bytes  0-3:   0x00000801  (magic, big-endian)
/// bytes  4-7:   N           (number of labels, big-endian u32)
/// bytes  8..:   N bytes, one label each
/// ```
pub struct IdxStore<R = File> {
    images: R,
    labels: R,
    count: usize,
    pixels: usize,
}

impl IdxStore<File> {
    /// Opens and validates an image/label file pair.
    pub fn open(images_path: &str, labels_path: &str) -> Result<IdxStore<File>> {
        let images = File::open(images_path)?;
        let labels = File::open(labels_path)?;
        IdxStore::from_readers(images, labels)
    }
}

impl<R: Read + Seek> IdxStore<R> {
    /// Validates both headers and that each stream is long enough for the
    /// declared record count.
    pub fn from_readers(mut images: R, mut labels: R) -> Result<IdxStore<R>> {
        let mut header = [0u8; IMAGE_HEADER as usize];
        images.seek(SeekFrom::Start(0))?;
        read_header(&mut images, &mut header, "image")?;
        let magic = be_u32(&header[0..4]);
        if magic != IMAGE_MAGIC {
            return Err(NetError::format(format!(
                "IDX image file: magic must be {IMAGE_MAGIC:#010x}, got {magic:#010x}"
            )));
        }
        let count = be_u32(&header[4..8]);
        let rows = be_u32(&header[8..12]) as usize;
        let cols = be_u32(&header[12..16]) as usize;
        let pixels = rows.checked_mul(cols).filter(|&n| n > 0).ok_or_else(|| {
            NetError::format(format!("IDX image file: invalid image size {rows}x{cols}"))
        })?;

        let mut header = [0u8; LABEL_HEADER as usize];
        labels.seek(SeekFrom::Start(0))?;
        read_header(&mut labels, &mut header, "label")?;
        let magic = be_u32(&header[0..4]);
        if magic != LABEL_MAGIC {
            return Err(NetError::format(format!(
                "IDX label file: magic must be {LABEL_MAGIC:#010x}, got {magic:#010x}"
            )));
        }
        let label_count = be_u32(&header[4..8]);
        if label_count != count {
            return Err(NetError::format(format!(
                "IDX file mismatch: image file declares {count} items but label file declares {label_count}"
            )));
        }

        let count = count as usize;
        let image_len = images.seek(SeekFrom::End(0))?;
        let label_len = labels.seek(SeekFrom::End(0))?;
        let image_needed = (count as u64)
            .checked_mul(pixels as u64)
            .and_then(|n| n.checked_add(IMAGE_HEADER))
            .ok_or_else(|| NetError::format("IDX image file: declared size overflows"))?;
        if image_len < image_needed {
            return Err(NetError::format(format!(
                "IDX image file too short: {count} images of {rows}x{cols} need {image_needed} bytes, got {image_len}"
            )));
        }
        if label_len < LABEL_HEADER + count as u64 {
            return Err(NetError::format(format!(
                "IDX label file too short: {count} labels need {} bytes, got {label_len}",
                LABEL_HEADER + count as u64
            )));
        }

        log::debug!("opened IDX store: {count} images of {rows}x{cols}");
        Ok(IdxStore { images, labels, count, pixels })
    }

    /// Pixels per image.
    pub fn pixels(&self) -> usize {
        self.pixels
    }
}

impl<R: Read + Seek> ExampleSource for IdxStore<R> {
    fn len(&self) -> usize {
        self.count
    }

    fn example(&mut self, index: usize) -> Result<Example> {
        if index >= self.count {
            return Err(NetError::shape(format!(
                "example {index} out of range for {} examples",
                self.count
            )));
        }

        let mut label = [0u8; 1];
        self.labels.seek(SeekFrom::Start(LABEL_HEADER + index as u64))?;
        self.labels.read_exact(&mut label)?;

        let mut pixels = vec![0u8; self.pixels];
        let offset = IMAGE_HEADER + (index as u64) * (self.pixels as u64);
        self.images.seek(SeekFrom::Start(offset))?;
        self.images.read_exact(&mut pixels)?;

        Ok(Example::from_pixels(&pixels, label[0]))
    }
}

fn read_header<R: Read>(reader: &mut R, header: &mut [u8], kind: &str) -> Result<()> {
    reader.read_exact(header).map_err(|e| match e.kind() {
        std::io::ErrorKind::UnexpectedEof => NetError::format(format!(
            "IDX {kind} file too short: expected at least {} header bytes",
            header.len()
        )),
        _ => NetError::Io(e),
    })
}

fn be_u32(bytes: &[u8]) -> u32 {
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn image_file(images: &[[u8; 4]]) -> Vec<u8> {
        let mut buf = Vec::new();
        for word in [IMAGE_MAGIC, images.len() as u32, 2, 2] {
            buf.extend_from_slice(&word.to_be_bytes());
        }
        for img in images {
            buf.extend_from_slice(img);
        }
        buf
    }

    fn label_file(labels: &[u8]) -> Vec<u8> {
        let mut buf = Vec::new();
        for word in [LABEL_MAGIC, labels.len() as u32] {
            buf.extend_from_slice(&word.to_be_bytes());
        }
        buf.extend_from_slice(labels);
        buf
    }

    #[test]
    fn reads_records_by_index() {
        let images = image_file(&[[0, 0, 0, 0], [255, 0, 51, 255]]);
        let labels = label_file(&[3, 9]);
        let mut store = IdxStore::from_readers(Cursor::new(images), Cursor::new(labels)).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.pixels(), 4);
        let ex = store.example(1).unwrap();
        assert_eq!(ex.label, 9);
        assert_eq!(ex.input, vec![1.0, 0.0, 0.2, 1.0]);
        assert_eq!(store.example(0).unwrap().label, 3);
    }

    #[test]
    fn index_past_end_is_rejected() {
        let mut store = IdxStore::from_readers(
            Cursor::new(image_file(&[[1, 2, 3, 4]])),
            Cursor::new(label_file(&[0])),
        )
        .unwrap();
        assert!(matches!(store.example(1), Err(NetError::Shape(_))));
    }

    #[test]
    fn bad_magic_is_a_format_error() {
        let mut images = image_file(&[[0; 4]]);
        images[3] = 0x01;
        let res = IdxStore::from_readers(Cursor::new(images), Cursor::new(label_file(&[0])));
        assert!(matches!(res, Err(NetError::Format(_))));
    }

    #[test]
    fn count_mismatch_is_a_format_error() {
        let res = IdxStore::from_readers(
            Cursor::new(image_file(&[[0; 4]])),
            Cursor::new(label_file(&[0, 1])),
        );
        assert!(matches!(res, Err(NetError::Format(_))));
    }

    #[test]
    fn truncated_files_are_format_errors() {
        let mut images = image_file(&[[0; 4], [0; 4]]);
        images.pop();
        let res = IdxStore::from_readers(Cursor::new(images), Cursor::new(label_file(&[0, 1])));
        assert!(matches!(res, Err(NetError::Format(_))));

        let res = IdxStore::from_readers(Cursor::new(vec![0u8; 5]), Cursor::new(label_file(&[])));
        assert!(matches!(res, Err(NetError::Format(_))));
    }
}
