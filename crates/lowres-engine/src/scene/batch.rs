use super::{Sprite, SpriteInstance};

/// Default per-frame sprite budget.
pub const MAX_SPRITES: usize = 1024;

/// Fixed-capacity, insertion-ordered sprite records for one frame.
///
/// Storage is allocated once and reused; `reset()` only rewinds the count.
/// Appending to a full batch is a no-op: the renderer has a hard sprite budget
/// and excess sprites are dropped for that frame.
///
/// Draw order is insertion order; later entries composite over earlier ones.
#[derive(Debug)]
pub struct SpriteBatch {
    slots: Box<[SpriteInstance]>,
    len: usize,
    dropped: usize,
}

impl SpriteBatch {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![SpriteInstance::default(); capacity].into_boxed_slice(),
            len: 0,
            dropped: 0,
        }
    }

    /// Rewinds to an empty batch. Keeps storage.
    #[inline]
    pub fn reset(&mut self) {
        self.len = 0;
        self.dropped = 0;
    }

    /// Copies `instance` into the next free slot, or drops it if the batch is full.
    #[inline]
    pub fn append(&mut self, instance: SpriteInstance) {
        if self.len == self.slots.len() {
            self.dropped += 1;
            return;
        }
        self.slots[self.len] = instance;
        self.len += 1;
    }

    /// Maps a host sprite to an instance, picking the animation frame for `anim_tick`.
    pub fn push_sprite(&mut self, sprite: &Sprite<'_>, anim_tick: u64) {
        if let Some(instance) = sprite.instance(anim_tick) {
            self.append(instance);
        }
    }

    /// The valid prefix, in draw order.
    #[inline]
    pub fn instances(&self) -> &[SpriteInstance] {
        &self.slots[..self.len]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.slots.len()
    }

    /// Appends rejected since the last `reset()`.
    #[inline]
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

impl Default for SpriteBatch {
    fn default() -> Self {
        Self::with_capacity(MAX_SPRITES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{SpriteDef, Tint};

    fn at(x: f32) -> SpriteInstance {
        SpriteInstance {
            position: [x, 0.0],
            size: [1.0, 1.0],
            scale: [1.0, 1.0],
            ..Default::default()
        }
    }

    #[test]
    fn append_keeps_insertion_order() {
        let mut batch = SpriteBatch::with_capacity(4);
        batch.append(at(3.0));
        batch.append(at(1.0));
        batch.append(at(2.0));

        let xs: Vec<f32> = batch.instances().iter().map(|i| i.position[0]).collect();
        assert_eq!(xs, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn overflow_is_dropped_silently() {
        let mut batch = SpriteBatch::with_capacity(8);
        for i in 0..9 {
            batch.append(at(i as f32));
        }

        assert_eq!(batch.len(), batch.capacity());
        assert!(batch.is_full());
        assert_eq!(batch.dropped(), 1);
        // The first eight survive; the ninth never lands.
        assert_eq!(batch.instances().last().map(|i| i.position[0]), Some(7.0));
    }

    #[test]
    fn reset_empties_regardless_of_prior_state() {
        let mut batch = SpriteBatch::with_capacity(2);
        for i in 0..5 {
            batch.append(at(i as f32));
        }
        batch.reset();

        assert_eq!(batch.len(), 0);
        assert!(batch.is_empty());
        assert!(batch.instances().is_empty());
        assert_eq!(batch.dropped(), 0);
        assert_eq!(batch.capacity(), 2);
    }

    #[test]
    fn reset_twice_equals_reset_once() {
        let mut once = SpriteBatch::with_capacity(3);
        let mut twice = SpriteBatch::with_capacity(3);
        for b in [&mut once, &mut twice] {
            b.append(at(1.0));
            b.append(at(2.0));
        }

        once.reset();
        twice.reset();
        twice.reset();

        assert_eq!(once.len(), twice.len());
        assert_eq!(once.instances(), twice.instances());
        assert_eq!(once.dropped(), twice.dropped());
    }

    #[test]
    fn storage_is_reused_after_reset() {
        let mut batch = SpriteBatch::with_capacity(2);
        batch.append(at(1.0));
        let before = batch.instances().as_ptr();

        batch.reset();
        batch.append(at(9.0));

        assert_eq!(batch.instances().as_ptr(), before);
        assert_eq!(batch.instances()[0].position[0], 9.0);
    }

    #[test]
    fn push_sprite_cycles_frames_by_tick() {
        let def = SpriteDef::new(vec![[0, 0], [16, 0], [32, 0]], [16, 16]);
        let sprite = Sprite::new(&def, [10, 20]);
        let mut batch = SpriteBatch::with_capacity(4);

        batch.push_sprite(&sprite, 0);
        batch.push_sprite(&sprite, 4);
        batch.push_sprite(&sprite, 5);

        let locs: Vec<[f32; 2]> = batch.instances().iter().map(|i| i.location).collect();
        assert_eq!(locs, vec![[0.0, 0.0], [16.0, 0.0], [32.0, 0.0]]);
        assert_eq!(batch.instances()[0].color, Tint::WHITE.to_array());
    }

    #[test]
    fn push_sprite_without_frames_draws_nothing() {
        let def = SpriteDef::new(Vec::new(), [16, 16]);
        let mut batch = SpriteBatch::with_capacity(4);
        batch.push_sprite(&Sprite::new(&def, [0, 0]), 3);
        assert!(batch.is_empty());
        assert_eq!(batch.dropped(), 0);
    }
}
