/// Errors produced when wrapping raw pixel buffers.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    #[error("invalid grayscale buffer length (expected {expected} bytes, got {got})")]
    BufferLength { expected: usize, got: usize },
    #[error("invalid grayscale image dimensions (width={width}, height={height})")]
    Dimensions { width: usize, height: usize },
}

#[derive(Clone, Copy, Debug)]
pub struct GrayImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // row-major, len = w*h
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

fn checked_len(width: usize, height: usize) -> Result<usize, ImageError> {
    if width == 0 || height == 0 {
        return Err(ImageError::Dimensions { width, height });
    }
    width
        .checked_mul(height)
        .ok_or(ImageError::Dimensions { width, height })
}

impl<'a> GrayImageView<'a> {
    /// Wrap a row-major 8-bit buffer, validating its length.
    pub fn new(width: usize, height: usize, data: &'a [u8]) -> Result<Self, ImageError> {
        let expected = checked_len(width, height)?;
        if data.len() != expected {
            return Err(ImageError::BufferLength {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }

    /// Pixel lookup with coordinates clamped into the image (edge replication).
    #[inline]
    pub fn get_clamped(&self, x: i64, y: i64) -> u8 {
        let cx = x.clamp(0, self.width as i64 - 1) as usize;
        let cy = y.clamp(0, self.height as i64 - 1) as usize;
        self.get(cx, cy)
    }
}

impl GrayImage {
    /// Image of the given size filled with `value`.
    pub fn filled(width: usize, height: usize, value: u8) -> Result<Self, ImageError> {
        let len = checked_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![value; len],
        })
    }

    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self, ImageError> {
        GrayImageView::new(width, height, &data)?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn view(&self) -> GrayImageView<'_> {
        GrayImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }

    #[inline]
    pub fn put(&mut self, x: usize, y: usize, value: u8) {
        self.data[y * self.width + x] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_rejects_wrong_buffer_length() {
        let data = vec![0u8; 11];
        let err = GrayImageView::new(4, 3, &data).unwrap_err();
        assert_eq!(
            err,
            ImageError::BufferLength {
                expected: 12,
                got: 11
            }
        );
    }

    #[test]
    fn empty_dimensions_are_rejected() {
        assert!(matches!(
            GrayImage::filled(0, 5, 0),
            Err(ImageError::Dimensions { .. })
        ));
    }

    #[test]
    fn clamped_lookup_replicates_edges() {
        let img = GrayImage::from_raw(3, 2, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let v = img.view();
        assert_eq!(v.get_clamped(-4, -1), 1);
        assert_eq!(v.get_clamped(10, 0), 3);
        assert_eq!(v.get_clamped(1, 7), 5);
        assert_eq!(v.get_clamped(2, 1), 6);
    }
}
