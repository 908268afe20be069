/// Flat per-pixel boolean grid indexed by `y * width + x`
///
/// Used for the edge map produced by [`DetectEdges`](crate::DetectEdges) and the
/// background classification produced by [`grow_background`](crate::grow_background).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMap {
    data: Vec<bool>,
    width: u32,
    height: u32,
}

/// Pixels whose local gradient exceeds the edge threshold
pub type EdgeMap = BinaryMap;

/// Pixels reached by at least one border-seeded flood fill
pub type BackgroundMap = BinaryMap;

impl BinaryMap {
    /// Creates an all-false map of the given size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![false; width as usize * height as usize],
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the flag at `(x, y)`, or `false` when out of bounds
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.data[self.index(x, y)]
    }

    /// Sets the flag at `(x, y)`. Out-of-bounds writes are ignored.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: bool) {
        if x < self.width && y < self.height {
            let index = self.index(x, y);
            self.data[index] = value;
        }
    }

    /// Number of `true` flags
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&flag| flag).count()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.data
    }

    #[inline]
    pub(crate) fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    pub(crate) fn get_index(&self, index: usize) -> bool {
        self.data[index]
    }

    #[inline]
    pub(crate) fn set_index(&mut self, index: usize, value: bool) {
        self.data[index] = value;
    }
}
