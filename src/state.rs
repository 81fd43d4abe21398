use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::figure::{CurveKind, Figure};

// ---------------------------------------------------------------------------
// Viewer state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    /// Interactive egui plot of the curves.
    Interactive,
    /// The PNG exactly as written to disk.
    Saved,
}

/// The full viewer state, independent of rendering.
pub struct AppState {
    /// The composed curves for every dataset.
    pub figure: Figure,

    /// Encoded PNG as written to `output`.
    pub png: Arc<[u8]>,

    /// Where the figure was saved.
    pub output: PathBuf,

    /// Per-kind visibility in the interactive plot.
    pub show_raw: bool,
    pub show_interpolated: bool,
    pub show_envelope: bool,

    pub tab: Tab,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(figure: Figure, png: Vec<u8>, output: PathBuf) -> Self {
        Self {
            figure,
            png: png.into(),
            output,
            show_raw: true,
            show_interpolated: true,
            show_envelope: true,
            tab: Tab::Interactive,
            status_message: None,
        }
    }

    pub fn is_visible(&self, kind: CurveKind) -> bool {
        match kind {
            CurveKind::Raw => self.show_raw,
            CurveKind::Interpolated => self.show_interpolated,
            CurveKind::Envelope => self.show_envelope,
        }
    }

    pub fn toggle(&mut self, kind: CurveKind) {
        let flag = match kind {
            CurveKind::Raw => &mut self.show_raw,
            CurveKind::Interpolated => &mut self.show_interpolated,
            CurveKind::Envelope => &mut self.show_envelope,
        };
        *flag = !*flag;
    }

    /// Write the saved PNG bytes to another location.
    pub fn save_copy(&mut self, path: &Path) -> Result<()> {
        std::fs::write(path, &*self.png).with_context(|| format!("writing {}", path.display()))?;
        self.status_message = Some(format!("Saved {}", path.display()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_kinds_start_visible_and_toggle() {
        let mut state = AppState::new(Figure::new(), Vec::new(), PathBuf::from("fig.png"));
        assert!(CurveKind::ALL.iter().all(|&k| state.is_visible(k)));

        state.toggle(CurveKind::Envelope);
        assert!(!state.is_visible(CurveKind::Envelope));
        assert!(state.is_visible(CurveKind::Raw));

        state.toggle(CurveKind::Envelope);
        assert!(state.is_visible(CurveKind::Envelope));
    }

    #[test]
    fn save_copy_writes_the_png_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("copy.png");
        let mut state = AppState::new(Figure::new(), vec![1, 2, 3], PathBuf::from("fig.png"));

        state.save_copy(&target).unwrap();
        assert_eq!(std::fs::read(&target).unwrap(), vec![1, 2, 3]);
        assert!(state.status_message.as_deref().unwrap().contains("copy.png"));
    }
}
