use image::RgbaImage;

use crate::factories::texture::{checkerboard_pixels, MipmappedTextureFactory, TextureBundle, CHECKER_SIZE};
use crate::state::State;

/// Orders photo decodes. Decodes finish out of order (image loading is
/// asynchronous to the render loop), so each one gets a ticket at start and
/// only the newest ticket may commit; stale completions are dropped.
#[derive(Debug, Default)]
pub struct DecodeSequence {
    next: u64,
    committed: u64,
}

impl DecodeSequence {
    pub fn allocate(&mut self) -> u64 {
        self.next += 1;
        self.next
    }

    pub fn try_commit(&mut self, ticket: u64) -> bool {
        if ticket > self.committed {
            self.committed = ticket;
            true
        } else {
            false
        }
    }
}

/// Owns the single texture bound to the active program: the procedural
/// checkerboard by default, the latest photo once one exists. The previous
/// device texture is destroyed on every rebind, and the photo survives shape
/// switches until explicitly cleared.
pub struct TextureBinder {
    bundle: TextureBundle,
    has_photo: bool,
    sequence: DecodeSequence,
}

impl TextureBinder {
    pub fn new(state: &State) -> Self {
        Self {
            bundle: Self::upload_checkerboard(state),
            has_photo: false,
            sequence: DecodeSequence::default(),
        }
    }

    fn upload_checkerboard(state: &State) -> TextureBundle {
        MipmappedTextureFactory::build(
            &state.device,
            &state.queue,
            CHECKER_SIZE,
            CHECKER_SIZE,
            &checkerboard_pixels(),
            "checkerboard",
        )
    }

    pub fn bundle(&self) -> &TextureBundle {
        &self.bundle
    }

    pub fn has_photo(&self) -> bool {
        self.has_photo
    }

    /// Ticket for a decode that is about to start.
    pub fn begin_decode(&mut self) -> u64 {
        self.sequence.allocate()
    }

    /// Binds a finished photo decode. Returns false when a newer decode
    /// already committed; the caller should then leave its bind groups alone.
    pub fn submit_photo(&mut self, state: &State, ticket: u64, photo: &RgbaImage) -> bool {
        if !self.sequence.try_commit(ticket) {
            log::debug!("discarding stale photo decode (ticket {})", ticket);
            return false;
        }

        let new_bundle = MipmappedTextureFactory::build(
            &state.device,
            &state.queue,
            photo.width(),
            photo.height(),
            photo.as_raw(),
            "photo",
        );
        self.replace(new_bundle);
        self.has_photo = true;
        true
    }

    /// Back to the checkerboard; the next frame's flags report "no texture".
    pub fn clear_photo(&mut self, state: &State) {
        let checker = Self::upload_checkerboard(state);
        self.replace(checker);
        self.has_photo = false;
    }

    fn replace(&mut self, new_bundle: TextureBundle) {
        let old = std::mem::replace(&mut self.bundle, new_bundle);
        old.texture.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::DecodeSequence;

    #[test]
    fn newest_ticket_wins() {
        let mut seq = DecodeSequence::default();
        let first = seq.allocate();
        let second = seq.allocate();

        assert!(seq.try_commit(second));
        // The older decode finishes afterwards and must be discarded.
        assert!(!seq.try_commit(first));
    }

    #[test]
    fn in_order_completions_all_commit() {
        let mut seq = DecodeSequence::default();
        let a = seq.allocate();
        let b = seq.allocate();
        assert!(seq.try_commit(a));
        assert!(seq.try_commit(b));
    }

    #[test]
    fn double_commit_of_same_ticket_is_rejected() {
        let mut seq = DecodeSequence::default();
        let a = seq.allocate();
        assert!(seq.try_commit(a));
        assert!(!seq.try_commit(a));
    }
}
