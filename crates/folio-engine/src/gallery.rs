//! Media gallery cursor
//!
//! Tracks which media item of the displayed record is active. Every change
//! bumps `remount_key`, which the presentation layer uses as the player's
//! key so a newly shown video remounts and autoplays from the start.

/// Active media index with wrap-around navigation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GalleryCursor {
    len: usize,
    index: usize,
    remount_key: u64,
}

impl GalleryCursor {
    /// Cursor at the first of `len` items
    pub fn new(len: usize) -> Self {
        Self {
            len,
            index: 0,
            remount_key: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn remount_key(&self) -> u64 {
        self.remount_key
    }

    /// Advance, wrapping to the first item; no-op with one item or fewer
    pub fn next(&mut self) -> usize {
        if self.len > 1 {
            self.index = (self.index + 1) % self.len;
            self.remount_key += 1;
        }
        self.index
    }

    /// Step back, wrapping to the last item; no-op with one item or fewer
    pub fn prev(&mut self) -> usize {
        if self.len > 1 {
            self.index = self.index.checked_sub(1).unwrap_or(self.len - 1);
            self.remount_key += 1;
        }
        self.index
    }

    /// Jump to `index` (thumbnail click); out-of-range indices are ignored
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        self.index = index;
        self.remount_key += 1;
        true
    }
}

/// Caption for a media thumbnail: `AB_01`, `AB_02`, ...
///
/// Records without a project code get no label.
pub fn media_label(project_code: Option<&str>, index: usize) -> Option<String> {
    project_code
        .filter(|code| !code.is_empty())
        .map(|code| format!("{}_{:02}", code, index + 1))
}
