use crate::error::{Result, SkeletonError};

use super::pixel::Pixel;

/// 8-connected neighbourhood offsets, scanned row by row.
const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A boolean raster marking a one-pixel-wide skeleton curve.
///
/// `true` cells are foreground curve pixels. Storage is dense and row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkeletonMask {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl SkeletonMask {
    /// Creates an all-background mask.
    ///
    /// # Errors
    ///
    /// Returns `SkeletonError::InvalidSkeleton` if either dimension does not
    /// fit a pixel coordinate.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if i32::try_from(rows).is_err() || i32::try_from(cols).is_err() {
            return Err(SkeletonError::InvalidSkeleton(format!(
                "mask dimensions {rows}x{cols} exceed the pixel coordinate range"
            ))
            .into());
        }
        Ok(Self {
            rows,
            cols,
            cells: vec![false; rows * cols],
        })
    }

    /// Builds a mask from nested rows.
    ///
    /// # Errors
    ///
    /// Returns `SkeletonError::InvalidSkeleton` if the rows differ in length.
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut mask = Self::new(rows.len(), cols)?;
        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(SkeletonError::InvalidSkeleton(format!(
                    "row {r} has {} cells, expected {cols}",
                    row.len()
                ))
                .into());
            }
            mask.cells[r * cols..(r + 1) * cols].copy_from_slice(row);
        }
        Ok(mask)
    }

    /// Parses a text picture: `#` or `1` marks foreground, anything else is
    /// background. Surrounding whitespace on each line is ignored, so use `.`
    /// for leading background. Short lines are padded with background and
    /// blank leading/trailing lines are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the picture is too large for pixel coordinates.
    pub fn from_ascii(picture: &str) -> Result<Self> {
        let lines: Vec<&str> = picture
            .lines()
            .map(str::trim)
            .skip_while(|l| l.is_empty())
            .collect();
        let end = lines.iter().rposition(|l| !l.is_empty()).map_or(0, |i| i + 1);
        let lines = &lines[..end];
        let cols = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);

        let mut mask = Self::new(lines.len(), cols)?;
        for (r, line) in lines.iter().enumerate() {
            for (c, ch) in line.chars().enumerate() {
                mask.cells[r * cols + c] = matches!(ch, '#' | '1');
            }
        }
        Ok(mask)
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns `true` if the mask has no foreground pixel.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.cells.iter().any(|&c| c)
    }

    /// Returns whether `pixel` is foreground. Out-of-range pixels are
    /// background.
    #[must_use]
    pub fn get(&self, pixel: Pixel) -> bool {
        self.index(pixel).is_some_and(|i| self.cells[i])
    }

    /// Sets a cell. Out-of-range pixels are ignored.
    pub fn set(&mut self, pixel: Pixel, value: bool) {
        if let Some(i) = self.index(pixel) {
            self.cells[i] = value;
        }
    }

    /// All foreground pixels in row-major order.
    #[must_use]
    pub fn foreground_pixels(&self) -> Vec<Pixel> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &on)| on)
            .map(|(i, _)| self.pixel_at(i))
            .collect()
    }

    /// Foreground pixels 8-connected to `pixel`, in scan order.
    #[must_use]
    pub fn neighbors(&self, pixel: Pixel) -> Vec<Pixel> {
        NEIGHBOR_OFFSETS
            .iter()
            .map(|&(dr, dc)| Pixel::new(pixel.row + dr, pixel.col + dc))
            .filter(|&p| self.get(p))
            .collect()
    }

    fn index(&self, pixel: Pixel) -> Option<usize> {
        let row = usize::try_from(pixel.row).ok()?;
        let col = usize::try_from(pixel.col).ok()?;
        (row < self.rows && col < self.cols).then_some(row * self.cols + col)
    }

    // Dimensions are bounded by `new`, so both casts are lossless.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn pixel_at(&self, index: usize) -> Pixel {
        Pixel::new((index / self.cols) as i32, (index % self.cols) as i32)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_rejects_ragged_input() {
        let rows = vec![vec![true, false], vec![true]];
        assert!(SkeletonMask::from_rows(&rows).is_err());
    }

    #[test]
    fn from_rows_round_trips_cells() {
        let rows = [[false, true, false], [true, true, true]];
        let mask = SkeletonMask::from_rows(&rows).unwrap();
        assert_eq!(mask.rows(), 2);
        assert_eq!(mask.cols(), 3);
        assert!(mask.get(Pixel::new(0, 1)));
        assert!(!mask.get(Pixel::new(0, 0)));
        assert_eq!(mask.foreground_pixels().len(), 4);
    }

    #[test]
    fn empty_input_is_empty_mask() {
        let rows: Vec<Vec<bool>> = Vec::new();
        let mask = SkeletonMask::from_rows(&rows).unwrap();
        assert!(mask.is_empty());
        assert!(mask.foreground_pixels().is_empty());
    }

    #[test]
    fn ascii_picture_is_padded() {
        let mask = SkeletonMask::from_ascii(
            "
            .#
            ###.
            ",
        )
        .unwrap();
        assert_eq!(mask.rows(), 2);
        assert_eq!(mask.cols(), 4);
        assert!(!mask.get(Pixel::new(0, 2)));
        assert_eq!(mask.foreground_pixels().len(), 4);
    }

    #[test]
    fn out_of_range_reads_as_background() {
        let mask = SkeletonMask::from_ascii("#").unwrap();
        assert!(mask.get(Pixel::new(0, 0)));
        assert!(!mask.get(Pixel::new(-1, 0)));
        assert!(!mask.get(Pixel::new(0, 1)));
    }

    #[test]
    fn neighbors_are_eight_connected_in_scan_order() {
        let mask = SkeletonMask::from_ascii("#.#\n.#.\n##.").unwrap();
        let centre = Pixel::new(1, 1);
        assert_eq!(
            mask.neighbors(centre),
            vec![
                Pixel::new(0, 0),
                Pixel::new(0, 2),
                Pixel::new(2, 0),
                Pixel::new(2, 1),
            ]
        );
    }

    #[test]
    fn set_ignores_out_of_range() {
        let mut mask = SkeletonMask::new(2, 2).unwrap();
        mask.set(Pixel::new(5, 5), true);
        mask.set(Pixel::new(1, 0), true);
        assert_eq!(mask.foreground_pixels(), vec![Pixel::new(1, 0)]);
    }
}
