use std::ops::{Index, IndexMut};

/// A record that can live in a [`Pool`] slot.
pub trait Slot {
    fn is_active(&self) -> bool;
}

/// Fixed-capacity pool of entity slots.
///
/// Slots are index-stable and never freed: an entity is toggled inactive and
/// later reinitialized in place. No allocation happens after construction.
#[derive(Debug, Clone)]
pub struct Pool<T, const N: usize> {
    items: [T; N],
}

impl<T: Slot, const N: usize> Pool<T, N> {
    pub fn from_fn(f: impl FnMut(usize) -> T) -> Self {
        Self {
            items: std::array::from_fn(f),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    /// Active slots in index order.
    pub fn active(&self) -> impl Iterator<Item = &T> {
        self.items.iter().filter(|item| item.is_active())
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    /// First inactive slot, or `None` when the pool is exhausted.
    pub fn alloc(&mut self) -> Option<&mut T> {
        self.items.iter_mut().find(|item| !item.is_active())
    }
}

impl<T, const N: usize> Index<usize> for Pool<T, N> {
    type Output = T;

    fn index(&self, idx: usize) -> &T {
        &self.items[idx]
    }
}

impl<T, const N: usize> IndexMut<usize> for Pool<T, N> {
    fn index_mut(&mut self, idx: usize) -> &mut T {
        &mut self.items[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, Default)]
    struct Dot {
        active: bool,
        tag: u8,
    }

    impl Slot for Dot {
        fn is_active(&self) -> bool {
            self.active
        }
    }

    #[test]
    fn alloc_returns_first_free_slot() {
        let mut pool: Pool<Dot, 3> = Pool::from_fn(|i| Dot {
            active: i == 0,
            tag: i as u8,
        });

        let slot = pool.alloc().unwrap();
        assert_eq!(slot.tag, 1);
        slot.active = true;

        assert_eq!(pool.alloc().unwrap().tag, 2);
        assert_eq!(pool.active_count(), 2);
    }

    #[test]
    fn exhausted_pool_yields_none() {
        let mut pool: Pool<Dot, 2> = Pool::from_fn(|_| Dot {
            active: true,
            tag: 0,
        });
        assert!(pool.alloc().is_none());
        assert_eq!(pool.iter().count(), 2);
    }
}
